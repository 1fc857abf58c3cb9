use aws_lc_rs::{rand::SystemRandom, signature::UnparsedPublicKey};

use super::{
    Signer, Verifier, invalid_signing_key, invalid_verifying_key, signature_mismatch,
    signing_failure,
};
use crate::jose::{EllipticCurve, JWA, JoseError, JoseErrorKind, SigningKey, VerifyingKey};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// ECDSA signatures (`ES*`), in the fixed `r || s` encoding used by JWS.
///
/// The key has to be on the curve of the algorithm: an `ES256` signer given a
/// P-384 key fails with [`JoseErrorKind::InvalidKeyType`].
pub struct EcdsaAlgorithm {
    curve: EllipticCurve,
}

impl EcdsaAlgorithm {
    /// ECDSA using P-256 and SHA-256
    pub const ES256: Self = Self::new(EllipticCurve::P256);
    /// ECDSA using P-384 and SHA-384
    pub const ES384: Self = Self::new(EllipticCurve::P384);
    /// ECDSA using P-521 and SHA-512
    pub const ES512: Self = Self::new(EllipticCurve::P521);

    /// Create the algorithm for the given curve.
    pub const fn new(curve: EllipticCurve) -> Self {
        Self { curve }
    }

    /// The curve keys must be on.
    pub fn curve(&self) -> EllipticCurve {
        self.curve
    }

    fn wrong_curve(self, curve: EllipticCurve) -> JoseError {
        JoseError::invalid_key_type(self.curve.algorithm()).with_message(format!(
            "ecdsa key on {curve}, algorithm requires {}",
            self.curve
        ))
    }
}

impl TryFrom<&JWA> for EcdsaAlgorithm {
    type Error = JoseError;

    fn try_from(value: &JWA) -> Result<Self, Self::Error> {
        match value {
            JWA::ES256 => Ok(Self::ES256),
            JWA::ES384 => Ok(Self::ES384),
            JWA::ES512 => Ok(Self::ES512),
            other => Err(JoseError::new(JoseErrorKind::UnsupportedAlgorithm)
                .with_algorithm(other.clone())
                .with_message("not an ecdsa algorithm")),
        }
    }
}

impl Signer for EcdsaAlgorithm {
    fn algorithm(&self) -> JWA {
        self.curve.algorithm()
    }

    fn sign(&self, payload: &[u8], key: &SigningKey) -> Result<Vec<u8>, JoseError> {
        let SigningKey::Ecdsa(key) = key else {
            return Err(invalid_signing_key(self.curve.algorithm(), "ecdsa", key));
        };
        if key.curve() != self.curve {
            return Err(self.wrong_curve(key.curve()));
        }

        let signature = key
            .key_pair()
            .sign(&SystemRandom::new(), payload)
            .map_err(|err| signing_failure(self.curve.algorithm(), err))?;
        Ok(signature.as_ref().to_vec())
    }
}

impl Verifier for EcdsaAlgorithm {
    fn algorithm(&self) -> JWA {
        self.curve.algorithm()
    }

    fn verify(
        &self,
        payload: &[u8],
        signature: &[u8],
        key: &VerifyingKey,
    ) -> Result<(), JoseError> {
        let VerifyingKey::Ecdsa(key) = key else {
            return Err(invalid_verifying_key(self.curve.algorithm(), "ecdsa", key));
        };
        if key.curve() != self.curve {
            return Err(self.wrong_curve(key.curve()));
        }

        UnparsedPublicKey::new(self.curve.verification_algorithm(), key.point())
            .verify(payload, signature)
            .map_err(|err| signature_mismatch(self.curve.algorithm()).with_cause(err))
    }
}
