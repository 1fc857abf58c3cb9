use aws_lc_rs::signature::{ED25519, UnparsedPublicKey};

use super::{Signer, Verifier, invalid_signing_key, invalid_verifying_key, signature_mismatch};
use crate::jose::{JWA, JoseError, SigningKey, VerifyingKey};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
/// Edwards-curve signatures (`EdDSA`) as defined in [`rfc8037`],
/// only the Ed25519 curve is supported.
///
/// [`rfc8037`]: https://datatracker.ietf.org/doc/html/rfc8037
pub struct EdDsaAlgorithm;

impl Signer for EdDsaAlgorithm {
    fn algorithm(&self) -> JWA {
        JWA::EdDSA
    }

    fn sign(&self, payload: &[u8], key: &SigningKey) -> Result<Vec<u8>, JoseError> {
        let SigningKey::Ed25519(key_pair) = key else {
            return Err(invalid_signing_key(JWA::EdDSA, "ed25519", key));
        };
        Ok(key_pair.sign(payload).as_ref().to_vec())
    }
}

impl Verifier for EdDsaAlgorithm {
    fn algorithm(&self) -> JWA {
        JWA::EdDSA
    }

    fn verify(
        &self,
        payload: &[u8],
        signature: &[u8],
        key: &VerifyingKey,
    ) -> Result<(), JoseError> {
        let VerifyingKey::Ed25519(public_key) = key else {
            return Err(invalid_verifying_key(JWA::EdDSA, "ed25519", key));
        };
        UnparsedPublicKey::new(&ED25519, public_key.as_ref())
            .verify(payload, signature)
            .map_err(|err| signature_mismatch(JWA::EdDSA).with_cause(err))
    }
}

#[cfg(test)]
mod tests {
    use tokio_test::assert_err;

    use super::*;
    use crate::jose::{EllipticCurve, JoseErrorKind};

    #[test]
    fn sign_and_verify() {
        let key = SigningKey::generate_ed25519().unwrap();
        let signature = EdDsaAlgorithm.sign(b"payload", &key).unwrap();
        assert_eq!(signature.len(), 64);
        EdDsaAlgorithm
            .verify(b"payload", &signature, &key.verifying_key())
            .unwrap();

        let other = SigningKey::generate_ed25519().unwrap();
        let err =
            assert_err!(EdDsaAlgorithm.verify(b"payload", &signature, &other.verifying_key()));
        assert_eq!(err.kind(), JoseErrorKind::SignatureMismatch);
    }

    #[test]
    fn only_ed25519_keys() {
        let key = SigningKey::generate_ecdsa(EllipticCurve::P256).unwrap();
        let err = assert_err!(EdDsaAlgorithm.sign(b"payload", &key));
        assert_eq!(err.kind(), JoseErrorKind::InvalidKeyType);
        assert_eq!(
            err.to_string(),
            "invalid key type (EdDSA): sign requires ed25519 key, got ecdsa key"
        );
    }
}
