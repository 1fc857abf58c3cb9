use std::{any::Any, fmt, sync::Arc};

use aws_lc_rs::{
    rand::SystemRandom,
    rsa::KeySize,
    signature::{
        ECDSA_P256_SHA256_FIXED, ECDSA_P256_SHA256_FIXED_SIGNING, ECDSA_P384_SHA384_FIXED,
        ECDSA_P384_SHA384_FIXED_SIGNING, ECDSA_P521_SHA512_FIXED,
        ECDSA_P521_SHA512_FIXED_SIGNING, EcdsaKeyPair, EcdsaSigningAlgorithm,
        EcdsaVerificationAlgorithm, Ed25519KeyPair, KeyPair, RsaKeyPair,
    },
};
use bytes::Bytes;
use zeroize::Zeroizing;

use super::{JWA, JoseError, JoseErrorKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// NIST curves supported for ECDSA signatures.
pub enum EllipticCurve {
    /// P-256, used by `ES256`
    P256,
    /// P-384, used by `ES384`
    P384,
    /// P-521, used by `ES512`
    P521,
}

impl EllipticCurve {
    /// The `ES*` algorithm bound to this curve.
    pub fn algorithm(self) -> JWA {
        match self {
            Self::P256 => JWA::ES256,
            Self::P384 => JWA::ES384,
            Self::P521 => JWA::ES512,
        }
    }

    /// Name of the curve as used by JOSE, e.g. `P-256`.
    pub fn name(self) -> &'static str {
        match self {
            Self::P256 => "P-256",
            Self::P384 => "P-384",
            Self::P521 => "P-521",
        }
    }

    pub(crate) fn signing_algorithm(self) -> &'static EcdsaSigningAlgorithm {
        match self {
            Self::P256 => &ECDSA_P256_SHA256_FIXED_SIGNING,
            Self::P384 => &ECDSA_P384_SHA384_FIXED_SIGNING,
            Self::P521 => &ECDSA_P521_SHA512_FIXED_SIGNING,
        }
    }

    pub(crate) fn verification_algorithm(self) -> &'static EcdsaVerificationAlgorithm {
        match self {
            Self::P256 => &ECDSA_P256_SHA256_FIXED,
            Self::P384 => &ECDSA_P384_SHA384_FIXED,
            Self::P521 => &ECDSA_P521_SHA512_FIXED,
        }
    }
}

impl fmt::Display for EllipticCurve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Clone)]
/// ECDSA private key bound to the curve it was created for.
pub struct EcdsaSigningKey {
    curve: EllipticCurve,
    key_pair: Arc<EcdsaKeyPair>,
}

impl EcdsaSigningKey {
    /// Wrap a key pair created for `curve`.
    pub fn new(curve: EllipticCurve, key_pair: EcdsaKeyPair) -> Self {
        Self {
            curve,
            key_pair: Arc::new(key_pair),
        }
    }

    /// The curve of this key.
    pub fn curve(&self) -> EllipticCurve {
        self.curve
    }

    /// The underlying key pair.
    pub fn key_pair(&self) -> &EcdsaKeyPair {
        &self.key_pair
    }
}

#[derive(Clone, PartialEq, Eq)]
/// ECDSA public key, an uncompressed curve point.
pub struct EcdsaVerifyingKey {
    curve: EllipticCurve,
    point: Bytes,
}

impl EcdsaVerifyingKey {
    /// Create a public key from an uncompressed point (`0x04 || x || y`).
    pub fn new(curve: EllipticCurve, point: impl Into<Bytes>) -> Self {
        Self {
            curve,
            point: point.into(),
        }
    }

    /// The curve of this key.
    pub fn curve(&self) -> EllipticCurve {
        self.curve
    }

    /// The encoded point.
    pub fn point(&self) -> &[u8] {
        &self.point
    }
}

#[derive(Clone)]
/// Shared secret used by the `HS*` algorithms, zeroized on drop.
pub struct HmacKey(Zeroizing<Vec<u8>>);

impl HmacKey {
    /// Create a new HMAC key from the given secret.
    pub fn new(secret: impl Into<Vec<u8>>) -> Self {
        Self(Zeroizing::new(secret.into()))
    }

    pub(crate) fn secret(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for HmacKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HmacKey")
            .field("len", &self.0.len())
            .finish_non_exhaustive()
    }
}

impl PartialEq for HmacKey {
    fn eq(&self, other: &Self) -> bool {
        aws_lc_rs::constant_time::verify_slices_are_equal(&self.0, &other.0).is_ok()
    }
}

impl Eq for HmacKey {}

#[derive(Clone)]
/// Key material used to produce a signature.
///
/// Each algorithm accepts only the variant it is built for, and fails
/// with [`JoseErrorKind::InvalidKeyType`] otherwise. Externally registered
/// algorithms can carry their own key type through [`SigningKey::Custom`].
pub enum SigningKey {
    /// RSA private key, used by `RS*` and `PS*`
    Rsa(Arc<RsaKeyPair>),
    /// ECDSA private key, used by `ES*`
    Ecdsa(EcdsaSigningKey),
    /// Ed25519 private key, used by `EdDSA`
    Ed25519(Arc<Ed25519KeyPair>),
    /// Shared secret, used by `HS*`
    Hmac(HmacKey),
    /// Key of an externally registered algorithm
    Custom(Arc<dyn Any + Send + Sync>),
}

impl SigningKey {
    /// Generate a new 2048 bit RSA key.
    pub fn generate_rsa() -> Result<Self, JoseError> {
        let key_pair = RsaKeyPair::generate(KeySize::Rsa2048)
            .map_err(|err| generation_failure("generate rsa key pair", err))?;
        Ok(Self::Rsa(Arc::new(key_pair)))
    }

    /// Create an RSA key from a PKCS#8 DER document.
    pub fn rsa_from_pkcs8(der: &[u8]) -> Result<Self, JoseError> {
        let key_pair = RsaKeyPair::from_pkcs8(der).map_err(|err| {
            JoseError::new(JoseErrorKind::InvalidKeyType)
                .with_message("create rsa key pair from pkcs8")
                .with_cause(err)
        })?;
        Ok(Self::Rsa(Arc::new(key_pair)))
    }

    /// Generate a new ECDSA key on the given curve.
    pub fn generate_ecdsa(curve: EllipticCurve) -> Result<Self, JoseError> {
        let key_pair = EcdsaKeyPair::generate(curve.signing_algorithm()).map_err(|err| {
            generation_failure("generate ecdsa key pair", err).with_algorithm(curve.algorithm())
        })?;
        Ok(Self::Ecdsa(EcdsaSigningKey::new(curve, key_pair)))
    }

    /// Create an ECDSA key on the given curve from a PKCS#8 DER document.
    pub fn ecdsa_from_pkcs8(curve: EllipticCurve, der: &[u8]) -> Result<Self, JoseError> {
        let key_pair = EcdsaKeyPair::from_pkcs8(curve.signing_algorithm(), der).map_err(|err| {
            JoseError::new(JoseErrorKind::InvalidKeyType)
                .with_algorithm(curve.algorithm())
                .with_message("create ecdsa key pair from pkcs8")
                .with_cause(err)
        })?;
        Ok(Self::Ecdsa(EcdsaSigningKey::new(curve, key_pair)))
    }

    /// Generate a new Ed25519 key.
    pub fn generate_ed25519() -> Result<Self, JoseError> {
        let document = Ed25519KeyPair::generate_pkcs8(&SystemRandom::new()).map_err(|err| {
            generation_failure("generate ed25519 key pair", err).with_algorithm(JWA::EdDSA)
        })?;
        Self::ed25519_from_pkcs8(document.as_ref())
    }

    /// Create an Ed25519 key from a PKCS#8 DER document.
    pub fn ed25519_from_pkcs8(der: &[u8]) -> Result<Self, JoseError> {
        let key_pair = Ed25519KeyPair::from_pkcs8(der).map_err(|err| {
            JoseError::new(JoseErrorKind::InvalidKeyType)
                .with_algorithm(JWA::EdDSA)
                .with_message("create ed25519 key pair from pkcs8")
                .with_cause(err)
        })?;
        Ok(Self::Ed25519(Arc::new(key_pair)))
    }

    /// Create an HMAC key from a shared secret.
    pub fn hmac(secret: impl Into<Vec<u8>>) -> Self {
        Self::Hmac(HmacKey::new(secret))
    }

    /// Wrap a key of an externally registered algorithm.
    pub fn custom<K: Any + Send + Sync>(key: K) -> Self {
        Self::Custom(Arc::new(key))
    }

    /// Downcast a [`SigningKey::Custom`] key to its concrete type.
    pub fn downcast_custom<K: Any>(&self) -> Option<&K> {
        match self {
            Self::Custom(key) => (**key).downcast_ref::<K>(),
            _ => None,
        }
    }

    /// The public counterpart of this key.
    ///
    /// For shared secrets and custom keys this is the key itself.
    pub fn verifying_key(&self) -> VerifyingKey {
        match self {
            Self::Rsa(key_pair) => {
                VerifyingKey::Rsa(Bytes::copy_from_slice(key_pair.public_key().as_ref()))
            }
            Self::Ecdsa(key) => VerifyingKey::Ecdsa(EcdsaVerifyingKey::new(
                key.curve,
                Bytes::copy_from_slice(key.key_pair.public_key().as_ref()),
            )),
            Self::Ed25519(key_pair) => {
                VerifyingKey::Ed25519(Bytes::copy_from_slice(key_pair.public_key().as_ref()))
            }
            Self::Hmac(key) => VerifyingKey::Hmac(key.clone()),
            Self::Custom(key) => VerifyingKey::Custom(key.clone()),
        }
    }

    pub(crate) fn kind_name(&self) -> &'static str {
        match self {
            Self::Rsa(_) => "rsa",
            Self::Ecdsa(_) => "ecdsa",
            Self::Ed25519(_) => "ed25519",
            Self::Hmac(_) => "hmac",
            Self::Custom(_) => "custom",
        }
    }
}

impl fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rsa(_) => f.debug_tuple("Rsa").finish_non_exhaustive(),
            Self::Ecdsa(key) => f.debug_tuple("Ecdsa").field(&key.curve).finish(),
            Self::Ed25519(_) => f.debug_tuple("Ed25519").finish_non_exhaustive(),
            Self::Hmac(key) => f.debug_tuple("Hmac").field(key).finish(),
            Self::Custom(_) => f.debug_tuple("Custom").finish_non_exhaustive(),
        }
    }
}

#[derive(Clone)]
/// Key material used to check a signature.
pub enum VerifyingKey {
    /// RSA public key, DER encoded `RSAPublicKey`
    Rsa(Bytes),
    /// ECDSA public key
    Ecdsa(EcdsaVerifyingKey),
    /// Ed25519 public key, the raw 32 bytes
    Ed25519(Bytes),
    /// Shared secret, used by `HS*`
    Hmac(HmacKey),
    /// Key of an externally registered algorithm
    Custom(Arc<dyn Any + Send + Sync>),
}

impl VerifyingKey {
    /// Create an RSA public key from a DER encoded `RSAPublicKey`.
    pub fn rsa(der: impl Into<Bytes>) -> Self {
        Self::Rsa(der.into())
    }

    /// Create an ECDSA public key from an uncompressed point.
    pub fn ecdsa(curve: EllipticCurve, point: impl Into<Bytes>) -> Self {
        Self::Ecdsa(EcdsaVerifyingKey::new(curve, point))
    }

    /// Create an Ed25519 public key from its raw bytes.
    pub fn ed25519(public_key: impl Into<Bytes>) -> Self {
        Self::Ed25519(public_key.into())
    }

    /// Create an HMAC key from a shared secret.
    pub fn hmac(secret: impl Into<Vec<u8>>) -> Self {
        Self::Hmac(HmacKey::new(secret))
    }

    /// Wrap a key of an externally registered algorithm.
    pub fn custom<K: Any + Send + Sync>(key: K) -> Self {
        Self::Custom(Arc::new(key))
    }

    /// Downcast a [`VerifyingKey::Custom`] key to its concrete type.
    pub fn downcast_custom<K: Any>(&self) -> Option<&K> {
        match self {
            Self::Custom(key) => (**key).downcast_ref::<K>(),
            _ => None,
        }
    }

    pub(crate) fn kind_name(&self) -> &'static str {
        match self {
            Self::Rsa(_) => "rsa",
            Self::Ecdsa(_) => "ecdsa",
            Self::Ed25519(_) => "ed25519",
            Self::Hmac(_) => "hmac",
            Self::Custom(_) => "custom",
        }
    }
}

impl fmt::Debug for VerifyingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rsa(der) => f.debug_tuple("Rsa").field(der).finish(),
            Self::Ecdsa(key) => f
                .debug_struct("Ecdsa")
                .field("curve", &key.curve)
                .field("point", &key.point)
                .finish(),
            Self::Ed25519(public_key) => f.debug_tuple("Ed25519").field(public_key).finish(),
            Self::Hmac(key) => f.debug_tuple("Hmac").field(key).finish(),
            Self::Custom(_) => f.debug_tuple("Custom").finish_non_exhaustive(),
        }
    }
}

impl From<&SigningKey> for VerifyingKey {
    fn from(key: &SigningKey) -> Self {
        key.verifying_key()
    }
}

/// Key generation fails in the primitive (e.g. the random source),
/// not because of the caller's key.
fn generation_failure(message: &'static str, cause: aws_lc_rs::error::Unspecified) -> JoseError {
    JoseError::new(JoseErrorKind::SigningFailure)
        .with_message(message)
        .with_cause(cause)
}

#[cfg(test)]
mod tests {
    use aws_lc_rs::signature::{EcdsaKeyPair, KeyPair};

    use super::*;

    #[test]
    fn ecdsa_key_keeps_its_curve() {
        let key = SigningKey::generate_ecdsa(EllipticCurve::P384).unwrap();
        let SigningKey::Ecdsa(inner) = &key else {
            panic!("expected ecdsa key");
        };
        assert_eq!(inner.curve(), EllipticCurve::P384);

        let VerifyingKey::Ecdsa(public) = key.verifying_key() else {
            panic!("expected ecdsa public key");
        };
        assert_eq!(public.curve(), EllipticCurve::P384);
        // uncompressed point: 0x04 || x || y
        assert_eq!(public.point().len(), 1 + 2 * 48);
        assert_eq!(public.point()[0], 0x04);
    }

    #[test]
    fn ecdsa_pkcs8_round_trip() {
        let key_pair = EcdsaKeyPair::generate(&ECDSA_P256_SHA256_FIXED_SIGNING).unwrap();
        let der = key_pair.to_pkcs8v1().unwrap();

        let key = SigningKey::ecdsa_from_pkcs8(EllipticCurve::P256, der.as_ref()).unwrap();
        let VerifyingKey::Ecdsa(public) = key.verifying_key() else {
            panic!("expected ecdsa public key");
        };
        assert_eq!(public.point(), key_pair.public_key().as_ref());

        let err = SigningKey::ecdsa_from_pkcs8(EllipticCurve::P384, der.as_ref()).unwrap_err();
        assert_eq!(err.kind(), JoseErrorKind::InvalidKeyType);
    }

    #[test]
    fn ed25519_public_key_is_raw_bytes() {
        let key = SigningKey::generate_ed25519().unwrap();
        let VerifyingKey::Ed25519(public) = key.verifying_key() else {
            panic!("expected ed25519 public key");
        };
        assert_eq!(public.len(), 32);
    }

    #[test]
    fn hmac_debug_does_not_leak_secret() {
        let key = SigningKey::hmac(b"super secret".to_vec());
        let debug = format!("{key:?}");
        assert!(!debug.contains("super"));
        assert!(debug.contains("len: 12"));
    }

    #[test]
    fn custom_key_downcast() {
        #[derive(Debug, PartialEq)]
        struct Token(&'static str);

        let key = SigningKey::custom(Token("abc"));
        assert_eq!(key.downcast_custom::<Token>(), Some(&Token("abc")));
        assert_eq!(key.downcast_custom::<String>(), None);
        assert_eq!(
            key.verifying_key().downcast_custom::<Token>(),
            Some(&Token("abc"))
        );
    }

    #[test]
    fn hmac_keys_compare_by_secret() {
        assert_eq!(HmacKey::new(b"a".to_vec()), HmacKey::new(b"a".to_vec()));
        assert_ne!(HmacKey::new(b"a".to_vec()), HmacKey::new(b"b".to_vec()));
    }

    #[test]
    fn generation_and_parse_failures_are_distinct() {
        let err = generation_failure("generate rsa key pair", aws_lc_rs::error::Unspecified);
        assert_eq!(err.kind(), JoseErrorKind::SigningFailure);
        assert!(!err.kind().is_verification_failure());

        for err in [
            SigningKey::rsa_from_pkcs8(b"not a key").unwrap_err(),
            SigningKey::ecdsa_from_pkcs8(EllipticCurve::P256, b"not a key").unwrap_err(),
            SigningKey::ed25519_from_pkcs8(b"not a key").unwrap_err(),
        ] {
            assert_eq!(err.kind(), JoseErrorKind::InvalidKeyType);
        }
    }
}
