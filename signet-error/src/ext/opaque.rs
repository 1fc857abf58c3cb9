use std::fmt;

use crate::BoxError;

/// A type-erased error that keeps its original error reachable.
///
/// Useful as the cause carried by domain errors, or as a last-resort
/// when the concrete error type does not matter to the caller.
pub struct OpaqueError(BoxError);

impl OpaqueError {
    /// Create a new [`OpaqueError`] from a display value.
    pub fn from_display(msg: impl fmt::Display + fmt::Debug + Send + Sync + 'static) -> Self {
        Self::from_std(MessageError(msg))
    }

    /// Create a new [`OpaqueError`] from a std error.
    pub fn from_std(error: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self(Box::new(error))
    }

    /// Create a new [`OpaqueError`] from a boxed error.
    pub fn from_boxed(inner: BoxError) -> Self {
        Self(inner)
    }

    /// Returns true if the underlying error is of type `T`.
    pub fn is<T>(&self) -> bool
    where
        T: std::error::Error + 'static,
    {
        self.0.is::<T>()
    }

    /// Attempts to downcast the error to the concrete type `T`.
    pub fn downcast<T>(self) -> Result<T, Self>
    where
        T: std::error::Error + 'static,
    {
        match self.0.downcast::<T>() {
            Ok(error) => Ok(*error),
            Err(inner) => Err(Self(inner)),
        }
    }

    /// Attempts to downcast the error to a shared reference of type `T`.
    pub fn downcast_ref<T>(&self) -> Option<&T>
    where
        T: std::error::Error + 'static,
    {
        self.0.downcast_ref()
    }

    /// Attempts to downcast the error to the exclusive reference of type `T`.
    pub fn downcast_mut<T>(&mut self) -> Option<&mut T>
    where
        T: std::error::Error + 'static,
    {
        self.0.downcast_mut()
    }

    /// Consumes the error and returns the inner [`BoxError`].
    pub fn into_boxed(self) -> BoxError {
        self.0
    }

    pub(crate) fn inner(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
        self.0.as_ref()
    }
}

impl fmt::Debug for OpaqueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl fmt::Display for OpaqueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl std::error::Error for OpaqueError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl From<BoxError> for OpaqueError {
    fn from(error: BoxError) -> Self {
        Self(error)
    }
}

/// A plain message used as an error.
#[derive(Debug)]
pub(crate) struct MessageError<M>(pub(crate) M);

impl<M: fmt::Display> fmt::Display for MessageError<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl<M: fmt::Display + fmt::Debug> std::error::Error for MessageError<M> {}
