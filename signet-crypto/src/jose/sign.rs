use signet_utils::macros::generate_set_and_with;

use super::{
    AlgorithmRegistry, Headers, JWA, JoseError, Message, Serialization, SigningKey,
    jws::sign_payload,
};

#[derive(Debug, Clone, Default)]
/// Options for [`sign`] and [`sign_with`]: the headers to add
/// and the form in which the message is serialized.
pub struct SignOptions {
    protected: Headers,
    unprotected: Headers,
    serialization: Serialization,
}

impl SignOptions {
    /// Create [`SignOptions`] producing a compact message
    /// with only the `alg` protected header.
    pub fn new() -> Self {
        Self::default()
    }

    generate_set_and_with! {
        /// Set the protected headers.
        ///
        /// An `alg` parameter in them overrides the signing algorithm's identifier.
        pub fn protected_headers(mut self, headers: Headers) -> Self {
            self.protected = headers;
            self
        }
    }

    generate_set_and_with! {
        /// Set the unprotected headers, these cannot be represented by
        /// the [`Serialization::Compact`] form.
        pub fn unprotected_headers(mut self, headers: Headers) -> Self {
            self.unprotected = headers;
            self
        }
    }

    generate_set_and_with! {
        /// Set the [`Serialization`] of the signed message
        pub fn serialization(mut self, serialization: Serialization) -> Self {
            self.serialization = serialization;
            self
        }
    }

    /// Protected headers to sign
    pub fn protected_headers(&self) -> &Headers {
        &self.protected
    }

    /// Unprotected headers to add
    pub fn unprotected_headers(&self) -> &Headers {
        &self.unprotected
    }

    /// Form in which the message is serialized
    pub fn serialization(&self) -> Serialization {
        self.serialization
    }
}

/// Sign the payload with the [global](AlgorithmRegistry::global) registry,
/// returning the serialized message.
pub fn sign(
    payload: impl AsRef<[u8]>,
    algorithm: JWA,
    key: &SigningKey,
    options: SignOptions,
) -> Result<String, JoseError> {
    sign_with(AlgorithmRegistry::global(), payload, algorithm, key, options)
}

/// Sign the payload with the signer registered for `algorithm`
/// in the given registry, returning the serialized message.
///
/// The `alg` protected header is set to `algorithm`, unless the
/// protected headers of the options already contain one.
pub fn sign_with(
    registry: &AlgorithmRegistry,
    payload: impl AsRef<[u8]>,
    algorithm: JWA,
    key: &SigningKey,
    options: SignOptions,
) -> Result<String, JoseError> {
    let SignOptions {
        mut protected,
        unprotected,
        serialization,
    } = options;
    if !protected.contains("alg") {
        protected.set_algorithm(algorithm.clone());
    }

    let signer = registry.signer(&algorithm)?;
    tracing::trace!(%algorithm, ?serialization, "sign jws payload");

    let payload = payload.as_ref();
    let signature = sign_payload(payload, signer.as_ref(), key, protected, unprotected)
        .map_err(|err| with_algorithm(err, algorithm))?;
    Message::builder()
        .with_payload(payload)
        .with_signature(signature)
        .build()?
        .serialize(serialization)
}

fn with_algorithm(err: JoseError, algorithm: JWA) -> JoseError {
    if err.algorithm().is_some() {
        err
    } else {
        err.with_algorithm(algorithm)
    }
}

#[cfg(test)]
mod tests {
    use base64::{Engine as _, prelude::BASE64_URL_SAFE_NO_PAD};
    use serde_json::json;
    use tokio_test::assert_err;

    use super::*;
    use crate::jose::{EllipticCurve, HmacAlgorithm, JoseErrorKind};

    fn hmac_key() -> SigningKey {
        SigningKey::hmac(b"0123456789abcdef0123456789abcdef".to_vec())
    }

    #[test]
    fn sign_compact_sets_algorithm() {
        let token = sign("Lorem ipsum", JWA::HS256, &hmac_key(), SignOptions::new()).unwrap();
        let mut parts = token.split('.');
        assert_eq!(parts.next(), Some("eyJhbGciOiJIUzI1NiJ9"));
        assert_eq!(parts.next(), Some("TG9yZW0gaXBzdW0"));
        let signature = BASE64_URL_SAFE_NO_PAD.decode(parts.next().unwrap()).unwrap();
        assert_eq!(signature.len(), 32);
        assert_eq!(parts.next(), None);
    }

    #[test]
    fn sign_keeps_caller_headers_in_order() {
        let options = SignOptions::new()
            .with_protected_headers(Headers::new().with_typ("JWT").with_key_id("k1"));
        let token = sign("x", JWA::HS384, &hmac_key(), options).unwrap();
        let message = Message::parse(&token).unwrap();
        let headers = message.signatures()[0].protected_headers();
        let names: Vec<_> = headers.iter().map(|(name, _)| name).collect();
        assert_eq!(names, ["typ", "kid", "alg"]);
        assert_eq!(headers.algorithm(), Some(JWA::HS384));
    }

    #[test]
    fn sign_does_not_override_caller_algorithm() {
        let options = SignOptions::new()
            .with_protected_headers(Headers::new().with_algorithm(JWA::from("X-CUSTOM")));
        let token = sign("x", JWA::HS256, &hmac_key(), options).unwrap();
        let message = Message::parse(&token).unwrap();
        assert_eq!(message.signatures()[0].algorithm(), Some(JWA::from("X-CUSTOM")));
    }

    #[test]
    fn sign_json_forms() {
        let options = SignOptions::new()
            .with_unprotected_headers(Headers::new().with_key_id("k1"))
            .with_serialization(Serialization::General);
        let json = sign("x", JWA::HS512, &hmac_key(), options.clone()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["signatures"][0]["header"], json!({"kid": "k1"}));
        assert_eq!(value["signatures"][0]["protected"], "eyJhbGciOiJIUzUxMiJ9");

        let json = sign(
            "x",
            JWA::HS512,
            &hmac_key(),
            options.with_serialization(Serialization::Flattened),
        )
        .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["header"], json!({"kid": "k1"}));
        assert_eq!(value["payload"], "eA");
    }

    #[test]
    fn sign_compact_with_unprotected_headers_fails() {
        let options =
            SignOptions::new().with_unprotected_headers(Headers::new().with_key_id("k1"));
        let err = assert_err!(sign("x", JWA::HS256, &hmac_key(), options));
        assert_eq!(err.kind(), JoseErrorKind::Serialization);
    }

    #[test]
    fn sign_unsupported_algorithm() {
        let err = assert_err!(sign(
            "x",
            JWA::from("X-UNKNOWN"),
            &hmac_key(),
            SignOptions::new()
        ));
        assert_eq!(err.kind(), JoseErrorKind::UnsupportedAlgorithm);
        assert_eq!(err.algorithm(), Some(&JWA::from("X-UNKNOWN")));
    }

    #[test]
    fn sign_with_wrong_key_type() {
        let key = SigningKey::generate_ecdsa(EllipticCurve::P256).unwrap();
        let err = assert_err!(sign("x", JWA::HS256, &key, SignOptions::new()));
        assert_eq!(err.kind(), JoseErrorKind::InvalidKeyType);
        assert_eq!(err.algorithm(), Some(&JWA::HS256));
    }

    #[test]
    fn sign_with_isolated_registry() {
        let registry = AlgorithmRegistry::new();
        let err = assert_err!(sign_with(
            &registry,
            "x",
            JWA::HS256,
            &hmac_key(),
            SignOptions::new()
        ));
        assert_eq!(err.kind(), JoseErrorKind::UnsupportedAlgorithm);

        registry.register_signer(JWA::HS256, || HmacAlgorithm::HS256);
        let token = sign_with(&registry, "x", JWA::HS256, &hmac_key(), SignOptions::new()).unwrap();
        assert_eq!(
            token,
            sign("x", JWA::HS256, &hmac_key(), SignOptions::new()).unwrap()
        );
    }
}
