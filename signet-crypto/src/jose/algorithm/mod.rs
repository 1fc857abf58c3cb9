//! The [`Signer`] and [`Verifier`] capabilities and their built-in implementations.
//!
//! Every algorithm is a value implementing both traits, selected by its
//! [`JWA`] identifier through the [`AlgorithmRegistry`]. Key type validation
//! happens inside each implementation: a key variant the algorithm cannot use
//! fails with [`JoseErrorKind::InvalidKeyType`].
//!
//! [`AlgorithmRegistry`]: super::AlgorithmRegistry
//! [`JoseErrorKind::InvalidKeyType`]: super::JoseErrorKind::InvalidKeyType

use std::sync::Arc;

use aws_lc_rs::hmac;
use signet_error::OpaqueError;

use super::{JWA, JoseError, JoseErrorKind, SigningKey, VerifyingKey};

mod ecdsa;
pub use ecdsa::EcdsaAlgorithm;

mod eddsa;
pub use eddsa::EdDsaAlgorithm;

mod hmac_sha;
pub use hmac_sha::HmacAlgorithm;

mod rsa;
pub use rsa::RsaAlgorithm;

/// [`Signer`] produces the raw signature bytes over a signing input.
///
/// Implementations must be safe to share between threads, as one instance
/// can be used by concurrent `sign` calls.
pub trait Signer: Send + Sync + 'static {
    /// Identifier of the algorithm this signer implements.
    fn algorithm(&self) -> JWA;

    /// Sign the payload (the JWS signing input) with the given key.
    ///
    /// Fails with `InvalidKeyType` when the key cannot be used by this
    /// algorithm, and `SigningFailure` when the primitive fails.
    fn sign(&self, payload: &[u8], key: &SigningKey) -> Result<Vec<u8>, JoseError>;
}

/// [`Verifier`] checks raw signature bytes over a signing input.
pub trait Verifier: Send + Sync + 'static {
    /// Identifier of the algorithm this verifier implements.
    fn algorithm(&self) -> JWA;

    /// Verify the signature of the payload (the JWS signing input).
    ///
    /// Fails with `InvalidKeyType` when the key cannot be used by this
    /// algorithm, and `SignatureMismatch` when the signature is not valid.
    fn verify(&self, payload: &[u8], signature: &[u8], key: &VerifyingKey)
    -> Result<(), JoseError>;
}

/// Creates [`Signer`] instances for one algorithm.
///
/// Implemented for any `Fn() -> S` where `S: Signer`. Implement it
/// manually for factories that can fail.
pub trait SignerFactory: Send + Sync + 'static {
    /// Create a new signer.
    fn create(&self) -> Result<Arc<dyn Signer>, OpaqueError>;
}

impl<F, S> SignerFactory for F
where
    F: Fn() -> S + Send + Sync + 'static,
    S: Signer,
{
    fn create(&self) -> Result<Arc<dyn Signer>, OpaqueError> {
        Ok(Arc::new(self()))
    }
}

/// Creates [`Verifier`] instances for one algorithm.
///
/// Implemented for any `Fn() -> V` where `V: Verifier`. Implement it
/// manually for factories that can fail.
pub trait VerifierFactory: Send + Sync + 'static {
    /// Create a new verifier.
    fn create(&self) -> Result<Arc<dyn Verifier>, OpaqueError>;
}

impl<F, V> VerifierFactory for F
where
    F: Fn() -> V + Send + Sync + 'static,
    V: Verifier,
{
    fn create(&self) -> Result<Arc<dyn Verifier>, OpaqueError> {
        Ok(Arc::new(self()))
    }
}

fn invalid_signing_key(algorithm: JWA, expected: &str, key: &SigningKey) -> JoseError {
    JoseError::invalid_key_type(algorithm).with_message(format!(
        "sign requires {expected} key, got {} key",
        key.kind_name()
    ))
}

fn invalid_verifying_key(algorithm: JWA, expected: &str, key: &VerifyingKey) -> JoseError {
    JoseError::invalid_key_type(algorithm).with_message(format!(
        "verify requires {expected} key, got {} key",
        key.kind_name()
    ))
}

fn signing_failure(algorithm: JWA, cause: impl Into<signet_error::BoxError>) -> JoseError {
    JoseError::new(JoseErrorKind::SigningFailure)
        .with_algorithm(algorithm)
        .with_cause(cause)
}

fn signature_mismatch(algorithm: JWA) -> JoseError {
    JoseError::new(JoseErrorKind::SignatureMismatch).with_algorithm(algorithm)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum ShaSize {
    Sha256,
    Sha384,
    Sha512,
}

impl ShaSize {
    pub(crate) fn hmac_algorithm(self) -> hmac::Algorithm {
        match self {
            Self::Sha256 => hmac::HMAC_SHA256,
            Self::Sha384 => hmac::HMAC_SHA384,
            Self::Sha512 => hmac::HMAC_SHA512,
        }
    }
}

/// Every built-in algorithm, as registered by
/// [`AlgorithmRegistry::with_builtins`](super::AlgorithmRegistry::with_builtins).
pub(crate) fn builtins() -> [(JWA, BuiltinAlgorithm); 13] {
    [
        (JWA::HS256, BuiltinAlgorithm::Hmac(HmacAlgorithm::HS256)),
        (JWA::HS384, BuiltinAlgorithm::Hmac(HmacAlgorithm::HS384)),
        (JWA::HS512, BuiltinAlgorithm::Hmac(HmacAlgorithm::HS512)),
        (JWA::RS256, BuiltinAlgorithm::Rsa(RsaAlgorithm::RS256)),
        (JWA::RS384, BuiltinAlgorithm::Rsa(RsaAlgorithm::RS384)),
        (JWA::RS512, BuiltinAlgorithm::Rsa(RsaAlgorithm::RS512)),
        (JWA::ES256, BuiltinAlgorithm::Ecdsa(EcdsaAlgorithm::ES256)),
        (JWA::ES384, BuiltinAlgorithm::Ecdsa(EcdsaAlgorithm::ES384)),
        (JWA::ES512, BuiltinAlgorithm::Ecdsa(EcdsaAlgorithm::ES512)),
        (JWA::PS256, BuiltinAlgorithm::Rsa(RsaAlgorithm::PS256)),
        (JWA::PS384, BuiltinAlgorithm::Rsa(RsaAlgorithm::PS384)),
        (JWA::PS512, BuiltinAlgorithm::Rsa(RsaAlgorithm::PS512)),
        (JWA::EdDSA, BuiltinAlgorithm::EdDsa(EdDsaAlgorithm)),
    ]
}

#[derive(Debug, Clone, Copy)]
pub(crate) enum BuiltinAlgorithm {
    Hmac(HmacAlgorithm),
    Rsa(RsaAlgorithm),
    Ecdsa(EcdsaAlgorithm),
    EdDsa(EdDsaAlgorithm),
}

impl BuiltinAlgorithm {
    pub(crate) fn signer_factory(self) -> Arc<dyn SignerFactory> {
        match self {
            Self::Hmac(alg) => Arc::new(move || alg),
            Self::Rsa(alg) => Arc::new(move || alg),
            Self::Ecdsa(alg) => Arc::new(move || alg),
            Self::EdDsa(alg) => Arc::new(move || alg),
        }
    }

    pub(crate) fn verifier_factory(self) -> Arc<dyn VerifierFactory> {
        match self {
            Self::Hmac(alg) => Arc::new(move || alg),
            Self::Rsa(alg) => Arc::new(move || alg),
            Self::Ecdsa(alg) => Arc::new(move || alg),
            Self::EdDsa(alg) => Arc::new(move || alg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_table_is_consistent() {
        for (alg, builtin) in builtins() {
            let signer = builtin.signer_factory().create().unwrap();
            let verifier = builtin.verifier_factory().create().unwrap();
            assert_eq!(signer.algorithm(), alg);
            assert_eq!(verifier.algorithm(), alg);
        }
    }
}
