use aws_lc_rs::{
    rand::SystemRandom,
    signature::{
        RSA_PKCS1_2048_8192_SHA256, RSA_PKCS1_2048_8192_SHA384, RSA_PKCS1_2048_8192_SHA512,
        RSA_PKCS1_SHA256, RSA_PKCS1_SHA384, RSA_PKCS1_SHA512, RSA_PSS_2048_8192_SHA256,
        RSA_PSS_2048_8192_SHA384, RSA_PSS_2048_8192_SHA512, RSA_PSS_SHA256, RSA_PSS_SHA384,
        RSA_PSS_SHA512, RsaEncoding, RsaParameters, UnparsedPublicKey,
    },
};

use super::{
    ShaSize, Signer, Verifier, invalid_signing_key, invalid_verifying_key, signature_mismatch,
    signing_failure,
};
use crate::jose::{JWA, JoseError, JoseErrorKind, SigningKey, VerifyingKey};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum RsaPadding {
    Pkcs1,
    Pss,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// RSASSA-PKCS1-v1_5 (`RS*`) and RSASSA-PSS (`PS*`) signatures.
///
/// Requires a [`SigningKey::Rsa`] to sign and a [`VerifyingKey::Rsa`]
/// of at least 2048 bits to verify.
pub struct RsaAlgorithm {
    padding: RsaPadding,
    sha: ShaSize,
}

impl RsaAlgorithm {
    /// RSASSA-PKCS1-v1_5 using SHA-256
    pub const RS256: Self = Self::pkcs1(ShaSize::Sha256);
    /// RSASSA-PKCS1-v1_5 using SHA-384
    pub const RS384: Self = Self::pkcs1(ShaSize::Sha384);
    /// RSASSA-PKCS1-v1_5 using SHA-512
    pub const RS512: Self = Self::pkcs1(ShaSize::Sha512);
    /// RSASSA-PSS using SHA-256 and MGF1 with SHA-256
    pub const PS256: Self = Self::pss(ShaSize::Sha256);
    /// RSASSA-PSS using SHA-384 and MGF1 with SHA-384
    pub const PS384: Self = Self::pss(ShaSize::Sha384);
    /// RSASSA-PSS using SHA-512 and MGF1 with SHA-512
    pub const PS512: Self = Self::pss(ShaSize::Sha512);

    const fn pkcs1(sha: ShaSize) -> Self {
        Self {
            padding: RsaPadding::Pkcs1,
            sha,
        }
    }

    const fn pss(sha: ShaSize) -> Self {
        Self {
            padding: RsaPadding::Pss,
            sha,
        }
    }

    fn jwa(self) -> JWA {
        match (self.padding, self.sha) {
            (RsaPadding::Pkcs1, ShaSize::Sha256) => JWA::RS256,
            (RsaPadding::Pkcs1, ShaSize::Sha384) => JWA::RS384,
            (RsaPadding::Pkcs1, ShaSize::Sha512) => JWA::RS512,
            (RsaPadding::Pss, ShaSize::Sha256) => JWA::PS256,
            (RsaPadding::Pss, ShaSize::Sha384) => JWA::PS384,
            (RsaPadding::Pss, ShaSize::Sha512) => JWA::PS512,
        }
    }

    fn encoding(self) -> &'static dyn RsaEncoding {
        match (self.padding, self.sha) {
            (RsaPadding::Pkcs1, ShaSize::Sha256) => &RSA_PKCS1_SHA256,
            (RsaPadding::Pkcs1, ShaSize::Sha384) => &RSA_PKCS1_SHA384,
            (RsaPadding::Pkcs1, ShaSize::Sha512) => &RSA_PKCS1_SHA512,
            (RsaPadding::Pss, ShaSize::Sha256) => &RSA_PSS_SHA256,
            (RsaPadding::Pss, ShaSize::Sha384) => &RSA_PSS_SHA384,
            (RsaPadding::Pss, ShaSize::Sha512) => &RSA_PSS_SHA512,
        }
    }

    fn parameters(self) -> &'static RsaParameters {
        match (self.padding, self.sha) {
            (RsaPadding::Pkcs1, ShaSize::Sha256) => &RSA_PKCS1_2048_8192_SHA256,
            (RsaPadding::Pkcs1, ShaSize::Sha384) => &RSA_PKCS1_2048_8192_SHA384,
            (RsaPadding::Pkcs1, ShaSize::Sha512) => &RSA_PKCS1_2048_8192_SHA512,
            (RsaPadding::Pss, ShaSize::Sha256) => &RSA_PSS_2048_8192_SHA256,
            (RsaPadding::Pss, ShaSize::Sha384) => &RSA_PSS_2048_8192_SHA384,
            (RsaPadding::Pss, ShaSize::Sha512) => &RSA_PSS_2048_8192_SHA512,
        }
    }
}

impl TryFrom<&JWA> for RsaAlgorithm {
    type Error = JoseError;

    fn try_from(value: &JWA) -> Result<Self, Self::Error> {
        match value {
            JWA::RS256 => Ok(Self::RS256),
            JWA::RS384 => Ok(Self::RS384),
            JWA::RS512 => Ok(Self::RS512),
            JWA::PS256 => Ok(Self::PS256),
            JWA::PS384 => Ok(Self::PS384),
            JWA::PS512 => Ok(Self::PS512),
            other => Err(JoseError::new(JoseErrorKind::UnsupportedAlgorithm)
                .with_algorithm(other.clone())
                .with_message("not an rsa algorithm")),
        }
    }
}

impl Signer for RsaAlgorithm {
    fn algorithm(&self) -> JWA {
        self.jwa()
    }

    fn sign(&self, payload: &[u8], key: &SigningKey) -> Result<Vec<u8>, JoseError> {
        let SigningKey::Rsa(key_pair) = key else {
            return Err(invalid_signing_key(self.jwa(), "rsa", key));
        };

        let mut signature = vec![0; key_pair.public_modulus_len()];
        key_pair
            .sign(
                self.encoding(),
                &SystemRandom::new(),
                payload,
                &mut signature,
            )
            .map_err(|err| signing_failure(self.jwa(), err))?;
        Ok(signature)
    }
}

impl Verifier for RsaAlgorithm {
    fn algorithm(&self) -> JWA {
        self.jwa()
    }

    fn verify(
        &self,
        payload: &[u8],
        signature: &[u8],
        key: &VerifyingKey,
    ) -> Result<(), JoseError> {
        let VerifyingKey::Rsa(public_key) = key else {
            return Err(invalid_verifying_key(self.jwa(), "rsa", key));
        };

        UnparsedPublicKey::new(self.parameters(), public_key.as_ref())
            .verify(payload, signature)
            .map_err(|err| signature_mismatch(self.jwa()).with_cause(err))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::OnceLock;

    use tokio_test::assert_err;

    use super::*;
    use crate::jose::{EllipticCurve, JoseErrorKind};

    fn rsa_key() -> &'static SigningKey {
        static KEY: OnceLock<SigningKey> = OnceLock::new();
        KEY.get_or_init(|| SigningKey::generate_rsa().unwrap())
    }

    #[test]
    fn sign_and_verify_all_variants() {
        let key = rsa_key();
        let public = key.verifying_key();
        for alg in [
            RsaAlgorithm::RS256,
            RsaAlgorithm::RS384,
            RsaAlgorithm::RS512,
            RsaAlgorithm::PS256,
            RsaAlgorithm::PS384,
            RsaAlgorithm::PS512,
        ] {
            let signature = alg.sign(b"Lorem ipsum", key).unwrap();
            assert_eq!(signature.len(), 256);
            alg.verify(b"Lorem ipsum", &signature, &public).unwrap();

            let err = assert_err!(alg.verify(b"Lorem ipsun", &signature, &public));
            assert_eq!(err.kind(), JoseErrorKind::SignatureMismatch);
        }
    }

    #[test]
    fn pkcs1_is_deterministic_and_pss_is_not() {
        let key = rsa_key();
        let a = RsaAlgorithm::RS256.sign(b"payload", key).unwrap();
        let b = RsaAlgorithm::RS256.sign(b"payload", key).unwrap();
        assert_eq!(a, b);

        let a = RsaAlgorithm::PS256.sign(b"payload", key).unwrap();
        let b = RsaAlgorithm::PS256.sign(b"payload", key).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn padding_schemes_do_not_cross_verify() {
        let key = rsa_key();
        let signature = RsaAlgorithm::RS256.sign(b"payload", key).unwrap();
        let err = assert_err!(RsaAlgorithm::PS256.verify(
            b"payload",
            &signature,
            &key.verifying_key()
        ));
        assert_eq!(err.kind(), JoseErrorKind::SignatureMismatch);
    }

    #[test]
    fn wrong_key_type() {
        let key = SigningKey::generate_ecdsa(EllipticCurve::P256).unwrap();
        let err = assert_err!(RsaAlgorithm::RS256.sign(b"payload", &key));
        assert_eq!(err.kind(), JoseErrorKind::InvalidKeyType);
        assert_eq!(err.algorithm(), Some(&JWA::RS256));

        let err = assert_err!(RsaAlgorithm::RS256.verify(
            b"payload",
            b"signature",
            &VerifyingKey::hmac(b"secret".to_vec())
        ));
        assert_eq!(err.kind(), JoseErrorKind::InvalidKeyType);
    }

    #[test]
    fn try_from_jwa() {
        assert_eq!(RsaAlgorithm::try_from(&JWA::PS384).unwrap(), RsaAlgorithm::PS384);
        let err = assert_err!(RsaAlgorithm::try_from(&JWA::ES256));
        assert_eq!(err.kind(), JoseErrorKind::UnsupportedAlgorithm);
    }
}
