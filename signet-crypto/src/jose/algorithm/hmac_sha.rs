use aws_lc_rs::hmac;

use super::{
    ShaSize, Signer, Verifier, invalid_signing_key, invalid_verifying_key, signature_mismatch,
};
use crate::jose::{HmacKey, JWA, JoseError, JoseErrorKind, SigningKey, VerifyingKey};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// HMAC with SHA-2 (`HS*`), keyed by a shared secret.
pub struct HmacAlgorithm {
    sha: ShaSize,
}

impl HmacAlgorithm {
    /// HMAC using SHA-256
    pub const HS256: Self = Self { sha: ShaSize::Sha256 };
    /// HMAC using SHA-384
    pub const HS384: Self = Self { sha: ShaSize::Sha384 };
    /// HMAC using SHA-512
    pub const HS512: Self = Self { sha: ShaSize::Sha512 };

    fn jwa(self) -> JWA {
        match self.sha {
            ShaSize::Sha256 => JWA::HS256,
            ShaSize::Sha384 => JWA::HS384,
            ShaSize::Sha512 => JWA::HS512,
        }
    }

    fn key(self, secret: &HmacKey) -> Result<hmac::Key, JoseError> {
        if secret.secret().is_empty() {
            return Err(
                JoseError::invalid_key_type(self.jwa()).with_message("hmac secret is empty")
            );
        }
        Ok(hmac::Key::new(self.sha.hmac_algorithm(), secret.secret()))
    }
}

impl TryFrom<&JWA> for HmacAlgorithm {
    type Error = JoseError;

    fn try_from(value: &JWA) -> Result<Self, Self::Error> {
        match value {
            JWA::HS256 => Ok(Self::HS256),
            JWA::HS384 => Ok(Self::HS384),
            JWA::HS512 => Ok(Self::HS512),
            other => Err(JoseError::new(JoseErrorKind::UnsupportedAlgorithm)
                .with_algorithm(other.clone())
                .with_message("not an hmac algorithm")),
        }
    }
}

impl Signer for HmacAlgorithm {
    fn algorithm(&self) -> JWA {
        self.jwa()
    }

    fn sign(&self, payload: &[u8], key: &SigningKey) -> Result<Vec<u8>, JoseError> {
        let SigningKey::Hmac(secret) = key else {
            return Err(invalid_signing_key(self.jwa(), "hmac", key));
        };
        let tag = hmac::sign(&self.key(secret)?, payload);
        Ok(tag.as_ref().to_vec())
    }
}

impl Verifier for HmacAlgorithm {
    fn algorithm(&self) -> JWA {
        self.jwa()
    }

    fn verify(
        &self,
        payload: &[u8],
        signature: &[u8],
        key: &VerifyingKey,
    ) -> Result<(), JoseError> {
        let VerifyingKey::Hmac(secret) = key else {
            return Err(invalid_verifying_key(self.jwa(), "hmac", key));
        };
        // constant time comparison
        hmac::verify(&self.key(secret)?, payload, signature)
            .map_err(|err| signature_mismatch(self.jwa()).with_cause(err))
    }
}
