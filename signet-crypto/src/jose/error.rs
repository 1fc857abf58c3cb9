use std::{borrow::Cow, fmt};

use signet_error::{BoxError, OpaqueError};

use super::JWA;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Category of a [`JoseError`], used by callers to branch on failures.
pub enum JoseErrorKind {
    /// The key's concrete type is not usable with the selected algorithm.
    InvalidKeyType,
    /// No signer or verifier is registered for the algorithm.
    UnsupportedAlgorithm,
    /// The underlying primitive failed to produce a signature.
    SigningFailure,
    /// The primitive reported that a signature does not match.
    SignatureMismatch,
    /// None of the signatures of a message could be verified.
    VerificationFailed,
    /// Input could not be parsed as a signed message.
    MalformedMessage,
    /// The algorithm of a signature is not the one the caller expected.
    AlgorithmMismatch,
    /// A registered header parameter was given a value of the wrong type.
    InvalidHeader,
    /// The message cannot be represented in the requested serialization.
    Serialization,
}

impl JoseErrorKind {
    /// Returns `true` for the expected (non-fault) outcome of a failed cryptographic check.
    pub fn is_verification_failure(self) -> bool {
        matches!(self, Self::SignatureMismatch | Self::VerificationFailed)
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::InvalidKeyType => "invalid key type",
            Self::UnsupportedAlgorithm => "unsupported algorithm",
            Self::SigningFailure => "signing failure",
            Self::SignatureMismatch => "signature mismatch",
            Self::VerificationFailed => "verification failed",
            Self::MalformedMessage => "malformed message",
            Self::AlgorithmMismatch => "algorithm mismatch",
            Self::InvalidHeader => "invalid header",
            Self::Serialization => "unsupported serialization",
        }
    }
}

impl fmt::Display for JoseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned by all JOSE operations.
///
/// Carries the [`JoseErrorKind`], and optionally the algorithm involved,
/// a message describing the stage that failed and the underlying cause.
/// The cause is exposed through [`std::error::Error::source`].
pub struct JoseError {
    kind: JoseErrorKind,
    algorithm: Option<JWA>,
    message: Option<Cow<'static, str>>,
    cause: Option<BoxError>,
}

impl JoseError {
    /// Create a new [`JoseError`] of the given kind.
    pub fn new(kind: JoseErrorKind) -> Self {
        Self {
            kind,
            algorithm: None,
            message: None,
            cause: None,
        }
    }

    /// Shorthand for a [`JoseErrorKind::InvalidKeyType`] error for the given algorithm.
    pub fn invalid_key_type(algorithm: JWA) -> Self {
        Self::new(JoseErrorKind::InvalidKeyType).with_algorithm(algorithm)
    }

    /// Shorthand for a [`JoseErrorKind::MalformedMessage`] error.
    pub fn malformed(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(JoseErrorKind::MalformedMessage).with_message(message)
    }

    #[must_use]
    /// Attach the algorithm this error relates to.
    pub fn with_algorithm(mut self, algorithm: JWA) -> Self {
        self.algorithm = Some(algorithm);
        self
    }

    #[must_use]
    /// Attach a message describing the stage that failed.
    pub fn with_message(mut self, message: impl Into<Cow<'static, str>>) -> Self {
        self.message = Some(message.into());
        self
    }

    #[must_use]
    /// Attach the underlying cause.
    pub fn with_cause(mut self, cause: impl Into<BoxError>) -> Self {
        let cause = match cause.into().downcast::<OpaqueError>() {
            Ok(opaque) => (*opaque).into_boxed(),
            Err(cause) => cause,
        };
        self.cause = Some(cause);
        self
    }

    /// The kind of this error.
    pub fn kind(&self) -> JoseErrorKind {
        self.kind
    }

    /// The algorithm involved, if known.
    pub fn algorithm(&self) -> Option<&JWA> {
        self.algorithm.as_ref()
    }

    /// The stage message, if any.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// The underlying cause, if any.
    pub fn cause(&self) -> Option<&(dyn std::error::Error + Send + Sync + 'static)> {
        self.cause.as_deref()
    }
}

impl fmt::Debug for JoseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JoseError")
            .field("kind", &self.kind)
            .field("algorithm", &self.algorithm)
            .field("message", &self.message)
            .field("cause", &self.cause)
            .finish()
    }
}

impl fmt::Display for JoseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;
        if let Some(algorithm) = &self.algorithm {
            write!(f, " ({algorithm})")?;
        }
        if let Some(message) = &self.message {
            write!(f, ": {message}")?;
        }
        Ok(())
    }
}

impl std::error::Error for JoseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.cause
            .as_deref()
            .map(|cause| cause as &(dyn std::error::Error + 'static))
    }
}

impl From<JoseErrorKind> for JoseError {
    fn from(kind: JoseErrorKind) -> Self {
        Self::new(kind)
    }
}

#[cfg(test)]
mod tests {
    use signet_error::ErrorExt;

    use super::*;

    #[test]
    fn display_includes_algorithm_and_stage() {
        let error = JoseError::invalid_key_type(JWA::EdDSA).with_message("sign payload");
        assert_eq!(error.to_string(), "invalid key type (EdDSA): sign payload");

        let error = JoseError::new(JoseErrorKind::VerificationFailed);
        assert_eq!(error.to_string(), "verification failed");
    }

    #[test]
    fn cause_is_preserved() {
        let cause = std::io::Error::other("primitive rejected input");
        let error = JoseError::new(JoseErrorKind::SigningFailure).with_cause(cause);
        assert_eq!(error.kind(), JoseErrorKind::SigningFailure);
        assert!(error.root_cause().is::<std::io::Error>());
        assert_eq!(error.chain().count(), 2);
    }

    #[test]
    fn verification_failure_kinds() {
        assert!(JoseErrorKind::SignatureMismatch.is_verification_failure());
        assert!(JoseErrorKind::VerificationFailed.is_verification_failure());
        assert!(!JoseErrorKind::MalformedMessage.is_verification_failure());
    }
}
