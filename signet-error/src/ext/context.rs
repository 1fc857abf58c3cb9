use std::fmt;

use super::OpaqueError;
use crate::BoxError;

/// An error annotated with a human readable context message.
///
/// Displays as `context: error` and exposes the wrapped error as its source.
pub(super) struct ContextError<C> {
    pub(super) context: C,
    pub(super) error: BoxError,
}

impl<C: fmt::Display> fmt::Debug for ContextError<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContextError")
            .field("context", &self.context.to_string())
            .field("error", &self.error)
            .finish()
    }
}

impl<C: fmt::Display> fmt::Display for ContextError<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.context, self.error)
    }
}

impl<C: fmt::Display> std::error::Error for ContextError<C> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        // opaque layers are transparent, expose what they wrap
        let mut error: &(dyn std::error::Error + Send + Sync + 'static) = self.error.as_ref();
        while let Some(opaque) = error.downcast_ref::<OpaqueError>() {
            error = opaque.inner();
        }
        Some(error)
    }
}
