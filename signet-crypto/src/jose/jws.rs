use std::str::FromStr;

use base64::{Engine as _, prelude::BASE64_URL_SAFE_NO_PAD};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use signet_utils::macros::generate_set_and_with;

use super::{Headers, JWA, JoseError, JoseErrorKind, Signer, SigningKey};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
/// Serialization forms of a JWS as defined in [`rfc7515, section 7`]
///
/// [`rfc7515, section 7`]: https://datatracker.ietf.org/doc/html/rfc7515#section-7
pub enum Serialization {
    #[default]
    /// `protected.payload.signature`, only for a single signature
    /// without unprotected headers
    Compact,
    /// JSON object with the signature fields at the root, only for a single signature
    Flattened,
    /// JSON object with a `signatures` array
    General,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// [`Signature`] is one signature of a [`Message`]: the protected headers
/// covered by it, the unprotected headers which are not, and the signature bytes.
///
/// The encoded form of the protected headers is kept exactly as it was
/// signed or received, as it is part of the signing input.
pub struct Signature {
    protected: Headers,
    encoded_protected: String,
    unprotected: Headers,
    signature: Vec<u8>,
}

impl Signature {
    /// Create a builder which can be used to create a [`Signature`]
    pub fn builder() -> SignatureBuilder {
        SignatureBuilder::default()
    }

    /// Reference to the protected [`Headers`]
    pub fn protected_headers(&self) -> &Headers {
        &self.protected
    }

    /// Reference to the unprotected [`Headers`]
    pub fn unprotected_headers(&self) -> &Headers {
        &self.unprotected
    }

    /// The raw signature bytes
    pub fn signature(&self) -> &[u8] {
        &self.signature
    }

    /// Base64 url encoded protected headers, as signed
    pub fn encoded_protected(&self) -> &str {
        &self.encoded_protected
    }

    /// Algorithm set in the protected headers
    pub fn algorithm(&self) -> Option<JWA> {
        self.protected.algorithm()
    }

    fn new(
        protected: Headers,
        encoded_protected: String,
        unprotected: Headers,
        signature: Vec<u8>,
    ) -> Result<Self, JoseError> {
        if let Some((name, _)) = unprotected.iter().find(|(name, _)| protected.contains(name)) {
            return Err(JoseError::new(JoseErrorKind::InvalidHeader).with_message(format!(
                "header parameter {name:?} is both protected and unprotected"
            )));
        }
        Ok(Self {
            protected,
            encoded_protected,
            unprotected,
            signature,
        })
    }

    fn from_wire(wire: SignatureWire) -> Result<Self, JoseError> {
        let protected = Headers::decode_encoded(&wire.protected)?;
        let signature = BASE64_URL_SAFE_NO_PAD
            .decode(&wire.signature)
            .map_err(|err| JoseError::malformed("decode signature").with_cause(err))?;
        Self::new(protected, wire.protected, wire.header, signature)
            .map_err(|err| JoseError::malformed("invalid signature headers").with_cause(err))
    }

    fn to_wire(&self) -> SignatureWire {
        SignatureWire {
            header: self.unprotected.clone(),
            protected: self.encoded_protected.clone(),
            signature: BASE64_URL_SAFE_NO_PAD.encode(&self.signature),
        }
    }
}

#[derive(Debug, Clone, Default)]
/// [`SignatureBuilder`] should be used when manually creating a [`Signature`],
/// e.g. from a signature produced outside of this crate.
pub struct SignatureBuilder {
    protected: Headers,
    unprotected: Headers,
    signature: Option<Vec<u8>>,
}

impl SignatureBuilder {
    generate_set_and_with! {
        /// Set the protected headers, replacing the current ones
        pub fn protected_headers(mut self, headers: Headers) -> Self {
            self.protected = headers;
            self
        }
    }

    generate_set_and_with! {
        /// Set the unprotected headers, replacing the current ones
        pub fn unprotected_headers(mut self, headers: Headers) -> Self {
            self.unprotected = headers;
            self
        }
    }

    generate_set_and_with! {
        /// Set the raw signature bytes
        pub fn signature(mut self, signature: impl Into<Vec<u8>>) -> Self {
            self.signature = Some(signature.into());
            self
        }
    }

    /// Get mutable reference to the underlying protected header store
    pub fn protected_headers_mut(&mut self) -> &mut Headers {
        &mut self.protected
    }

    /// Get mutable reference to the underlying unprotected header store
    pub fn unprotected_headers_mut(&mut self) -> &mut Headers {
        &mut self.unprotected
    }

    /// Build the [`Signature`]
    ///
    /// Fails if no signature bytes were set, or if a header
    /// parameter is both protected and unprotected.
    pub fn build(self) -> Result<Signature, JoseError> {
        let Some(signature) = self.signature else {
            return Err(JoseError::new(JoseErrorKind::Serialization)
                .with_message("signature bytes are required"));
        };
        let encoded_protected = self.protected.encode()?;
        Signature::new(self.protected, encoded_protected, self.unprotected, signature)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// [`Message`] is a signed payload with one or more [`Signature`]s.
///
/// The order of signatures is kept for serialization, any of them
/// validating is sufficient for verification.
pub struct Message {
    payload: Vec<u8>,
    encoded_payload: String,
    signatures: Vec<Signature>,
}

impl Message {
    /// Create a builder which can be used to create a [`Message`]
    pub fn builder() -> MessageBuilder {
        MessageBuilder::default()
    }

    /// Get reference to the payload
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Base64 url encoded payload
    pub fn encoded_payload(&self) -> &str {
        &self.encoded_payload
    }

    /// Consume the message, returning its payload
    pub fn into_payload(self) -> Vec<u8> {
        self.payload
    }

    /// Get reference to the [`Signature`]s, never empty
    pub fn signatures(&self) -> &[Signature] {
        &self.signatures
    }

    /// The signing input of a signature of this message:
    /// `base64url(protected) || '.' || base64url(payload)`
    pub fn signing_input(&self, signature: &Signature) -> Vec<u8> {
        signing_input(&signature.encoded_protected, &self.encoded_payload)
    }

    /// Serialize in the requested form.
    pub fn serialize(&self, serialization: Serialization) -> Result<String, JoseError> {
        match serialization {
            Serialization::Compact => self.to_compact(),
            Serialization::Flattened => self.to_flattened_json(),
            Serialization::General => self.to_general_json(),
        }
    }

    /// Generate the compact serialization of this message
    ///
    /// Only possible for a single signature without unprotected headers.
    pub fn to_compact(&self) -> Result<String, JoseError> {
        let signature = self.single_signature("compact")?;
        if !signature.unprotected.is_empty() {
            return Err(JoseError::new(JoseErrorKind::Serialization)
                .with_message("compact serialization does not support unprotected headers"));
        }
        if signature.encoded_protected.is_empty() {
            return Err(JoseError::new(JoseErrorKind::Serialization)
                .with_message("compact serialization requires protected headers"));
        }

        Ok(format!(
            "{}.{}.{}",
            signature.encoded_protected,
            self.encoded_payload,
            BASE64_URL_SAFE_NO_PAD.encode(&signature.signature)
        ))
    }

    /// Generate the flattened JSON serialization of this message
    ///
    /// Only possible for a single signature.
    pub fn to_flattened_json(&self) -> Result<String, JoseError> {
        let signature = self.single_signature("flattened json")?;
        to_json(&FlattenedWire {
            payload: self.encoded_payload.clone(),
            signature: signature.to_wire(),
        })
    }

    /// Generate the general JSON serialization of this message
    pub fn to_general_json(&self) -> Result<String, JoseError> {
        to_json(&GeneralWire {
            payload: self.encoded_payload.clone(),
            signatures: self.signatures.iter().map(Signature::to_wire).collect(),
        })
    }

    /// Parse a message in any serialization form.
    ///
    /// JSON input is detected by its leading `{`, the general form
    /// by the presence of `signatures`.
    pub fn parse(input: &str) -> Result<Self, JoseError> {
        let input = input.trim();
        if !input.starts_with('{') {
            return Self::parse_compact(input);
        }

        let object: Map<String, Value> = serde_json::from_str(input)
            .map_err(|err| JoseError::malformed("parse json serialization").with_cause(err))?;
        if object.contains_key("signatures") {
            let wire = serde_json::from_value(Value::Object(object))
                .map_err(|err| JoseError::malformed("parse general json").with_cause(err))?;
            Self::from_general_wire(wire)
        } else {
            let wire = serde_json::from_value(Value::Object(object))
                .map_err(|err| JoseError::malformed("parse flattened json").with_cause(err))?;
            Self::from_flattened_wire(wire)
        }
    }

    /// Parse the compact serialization.
    pub fn parse_compact(input: &str) -> Result<Self, JoseError> {
        let mut parts = input.split('.');
        let (Some(protected), Some(payload), Some(signature), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(JoseError::malformed(
                "compact serialization requires exactly three parts",
            ));
        };
        if protected.is_empty() {
            return Err(JoseError::malformed(
                "compact serialization requires protected headers",
            ));
        }

        let signature = Signature::from_wire(SignatureWire {
            header: Headers::default(),
            protected: protected.to_owned(),
            signature: signature.to_owned(),
        })?;
        Self::from_parts(payload.to_owned(), vec![signature])
    }

    /// Parse the flattened JSON serialization.
    pub fn parse_flattened_json(input: &str) -> Result<Self, JoseError> {
        let wire = serde_json::from_str(input)
            .map_err(|err| JoseError::malformed("parse flattened json").with_cause(err))?;
        Self::from_flattened_wire(wire)
    }

    /// Parse the general JSON serialization.
    pub fn parse_general_json(input: &str) -> Result<Self, JoseError> {
        let wire = serde_json::from_str(input)
            .map_err(|err| JoseError::malformed("parse general json").with_cause(err))?;
        Self::from_general_wire(wire)
    }

    fn from_flattened_wire(wire: FlattenedWire) -> Result<Self, JoseError> {
        let signature = Signature::from_wire(wire.signature)?;
        Self::from_parts(wire.payload, vec![signature])
    }

    fn from_general_wire(wire: GeneralWire) -> Result<Self, JoseError> {
        let signatures = wire
            .signatures
            .into_iter()
            .map(Signature::from_wire)
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_parts(wire.payload, signatures)
    }

    fn from_parts(encoded_payload: String, signatures: Vec<Signature>) -> Result<Self, JoseError> {
        if signatures.is_empty() {
            return Err(JoseError::malformed("message has no signatures"));
        }
        let payload = BASE64_URL_SAFE_NO_PAD
            .decode(&encoded_payload)
            .map_err(|err| JoseError::malformed("decode payload").with_cause(err))?;
        Ok(Self {
            payload,
            encoded_payload,
            signatures,
        })
    }

    fn single_signature(&self, form: &str) -> Result<&Signature, JoseError> {
        match self.signatures.as_slice() {
            [signature] => Ok(signature),
            signatures => Err(JoseError::new(JoseErrorKind::Serialization).with_message(format!(
                "{form} serialization requires exactly one signature, message has {}",
                signatures.len()
            ))),
        }
    }
}

impl FromStr for Message {
    type Err = JoseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[derive(Debug, Clone, Default)]
/// [`MessageBuilder`] creates a [`Message`] from a payload and its signatures
pub struct MessageBuilder {
    payload: Vec<u8>,
    signatures: Vec<Signature>,
}

impl MessageBuilder {
    generate_set_and_with! {
        /// Set the payload of the message
        pub fn payload(mut self, payload: impl Into<Vec<u8>>) -> Self {
            self.payload = payload.into();
            self
        }
    }

    generate_set_and_with! {
        /// Append an already created [`Signature`]
        pub fn signature(mut self, signature: Signature) -> Self {
            self.signatures.push(signature);
            self
        }
    }

    /// Sign the payload with the given [`Signer`] and key, appending the signature.
    ///
    /// The `alg` protected header is set to the signer's algorithm,
    /// unless it was already provided.
    pub fn add_signature<S>(
        mut self,
        signer: &S,
        key: &SigningKey,
        protected: Headers,
        unprotected: Headers,
    ) -> Result<Self, JoseError>
    where
        S: Signer + ?Sized,
    {
        let signature = sign_payload(&self.payload, signer, key, protected, unprotected)?;
        self.signatures.push(signature);
        Ok(self)
    }

    /// Build the final [`Message`] containing all provided signatures
    pub fn build(self) -> Result<Message, JoseError> {
        if self.signatures.is_empty() {
            return Err(JoseError::new(JoseErrorKind::Serialization)
                .with_message("message requires at least one signature"));
        }
        Ok(Message {
            encoded_payload: BASE64_URL_SAFE_NO_PAD.encode(&self.payload),
            payload: self.payload,
            signatures: self.signatures,
        })
    }
}

/// Sign a payload, producing one [`Signature`].
pub(crate) fn sign_payload<S>(
    payload: &[u8],
    signer: &S,
    key: &SigningKey,
    mut protected: Headers,
    unprotected: Headers,
) -> Result<Signature, JoseError>
where
    S: Signer + ?Sized,
{
    if !protected.contains("alg") {
        protected.set_algorithm(signer.algorithm());
    }
    let encoded_protected = protected.encode()?;
    let input = signing_input(&encoded_protected, &BASE64_URL_SAFE_NO_PAD.encode(payload));
    let signature = signer.sign(&input, key)?;
    Signature::new(protected, encoded_protected, unprotected, signature)
}

fn signing_input(encoded_protected: &str, encoded_payload: &str) -> Vec<u8> {
    let mut input = Vec::with_capacity(encoded_protected.len() + 1 + encoded_payload.len());
    input.extend_from_slice(encoded_protected.as_bytes());
    input.push(b'.');
    input.extend_from_slice(encoded_payload.as_bytes());
    input
}

fn to_json(value: &impl Serialize) -> Result<String, JoseError> {
    serde_json::to_string(value).map_err(|err| {
        JoseError::new(JoseErrorKind::Serialization)
            .with_message("encode json serialization")
            .with_cause(err)
    })
}

#[derive(Debug, Serialize, Deserialize)]
struct SignatureWire {
    #[serde(default, skip_serializing_if = "Headers::is_empty")]
    header: Headers,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    protected: String,
    signature: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct FlattenedWire {
    payload: String,
    #[serde(flatten)]
    signature: SignatureWire,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeneralWire {
    payload: String,
    signatures: Vec<SignatureWire>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use tokio_test::{assert_err, assert_ok};

    use super::*;

    const RFC_PAYLOAD: &str = "eyJpc3MiOiJqb2UiLA0KICJleHAiOjEzMDA4MTkzODAsDQogImh0dHA6Ly9leGFtcGxlLmNvbS9pc19yb290Ijp0cnVlfQ";
    const RFC_RS256_SIGNATURE: &str = "cC4hiUPoj9Eetdgtv3hF80EGrhuB__dzERat0XF9g2VtQgr9PJbu3XOiZj5RZmh7AAuHIm4Bh-0Qc_lF5YKt_O8W2Fp5jujGbds9uJdbF9CUAr7t1dnZcAcQjbKBYNX4BAynRFdiuB--f_nZLgrnbyTyWzO75vRK5h6xBArLIARNPvkSjtQBMHlb1L07Qe7K0GarZRmB_eSN9383LcOLn6_dO--xi12jzDwusC-eOkHWEsqtFZESc6BfI7noOPqvhJ1phCnvWh6IeYI2w9QOYEUipUTI8np6LbgGY9Fs98rqVt5AXLIhWkWywlVmtVrBp0igcN_IoypGlUPQGe77Rw";
    const RFC_ES256_SIGNATURE: &str = "DtEhU3ljbEg8L38VWAfUAqOyKAM6-Xx-F4GawxaepmXFCgfTjDxw5djxLa8ISlSApmWQxfKTUJqPP3-Kg6NU1Q";

    fn rfc_general_json() -> String {
        json!({
            "payload": RFC_PAYLOAD,
            "signatures": [
                {
                    "header": {"kid": "2010-12-29"},
                    "protected": "eyJhbGciOiJSUzI1NiJ9",
                    "signature": RFC_RS256_SIGNATURE,
                },
                {
                    "header": {"kid": "e9bc097a-ce51-4036-9562-d2ade882db0d"},
                    "protected": "eyJhbGciOiJFUzI1NiJ9",
                    "signature": RFC_ES256_SIGNATURE,
                },
            ],
        })
        .to_string()
    }

    /// Appends `!` to the signing input, for testing the message model only.
    struct DummySigner;

    impl Signer for DummySigner {
        fn algorithm(&self) -> JWA {
            JWA::from("X-DUMMY")
        }

        fn sign(&self, payload: &[u8], _key: &SigningKey) -> Result<Vec<u8>, JoseError> {
            let mut out = payload.to_vec();
            out.push(b'!');
            Ok(out)
        }
    }

    #[test]
    fn parse_rfc7515_general_json() {
        let message = Message::parse(&rfc_general_json()).unwrap();

        assert!(message.payload().starts_with(br#"{"iss":"joe","#));
        assert_eq!(message.encoded_payload(), RFC_PAYLOAD);

        let [first, second] = message.signatures() else {
            panic!("expected two signatures");
        };
        assert_eq!(first.algorithm(), Some(JWA::RS256));
        assert_eq!(first.protected_headers().len(), 1);
        assert_eq!(first.protected_headers().key_id(), None);
        assert_eq!(first.unprotected_headers().key_id(), Some("2010-12-29"));
        assert_eq!(first.unprotected_headers().algorithm(), None);
        assert_eq!(first.signature().len(), 256);

        assert_eq!(second.algorithm(), Some(JWA::ES256));
        assert_eq!(
            second.unprotected_headers().key_id(),
            Some("e9bc097a-ce51-4036-9562-d2ade882db0d")
        );
        assert_eq!(second.signature().len(), 64);

        assert_eq!(
            message.signing_input(first),
            format!("eyJhbGciOiJSUzI1NiJ9.{RFC_PAYLOAD}").into_bytes()
        );
    }

    #[test]
    fn general_json_round_trip_is_byte_exact() {
        let input = rfc_general_json();
        let message = Message::parse_general_json(&input).unwrap();
        assert_eq!(message.to_general_json().unwrap(), input);
    }

    #[test]
    fn general_json_refuses_compact_and_flattened() {
        let message = Message::parse(&rfc_general_json()).unwrap();
        let err = assert_err!(message.to_compact());
        assert_eq!(err.kind(), JoseErrorKind::Serialization);
        let err = assert_err!(message.to_flattened_json());
        assert_eq!(err.kind(), JoseErrorKind::Serialization);
    }

    #[test]
    fn compact_round_trip_keeps_raw_protected_header() {
        // rfc7515, appendix A.1: the protected header contains a CRLF
        let compact = format!(
            "eyJ0eXAiOiJKV1QiLA0KICJhbGciOiJIUzI1NiJ9.{RFC_PAYLOAD}.dBjftJeZ4CVP-mB92K27uhbUJU1p1r_wW1gFWFOEjXk"
        );
        let message = Message::parse(&compact).unwrap();
        let signature = &message.signatures()[0];
        assert_eq!(signature.algorithm(), Some(JWA::HS256));
        assert_eq!(signature.protected_headers().typ(), Some("JWT"));
        assert_eq!(message.to_compact().unwrap(), compact);
    }

    #[test]
    fn flattened_json_detection_and_field_omission() {
        let message = Message::builder()
            .with_payload("Lorem ipsum")
            .with_signature(
                Signature::builder()
                    .with_protected_headers(Headers::new().with_algorithm(JWA::HS256))
                    .with_signature(vec![1, 2, 3])
                    .build()
                    .unwrap(),
            )
            .build()
            .unwrap();

        let flattened = message.to_flattened_json().unwrap();
        assert_eq!(
            flattened,
            r#"{"payload":"TG9yZW0gaXBzdW0","protected":"eyJhbGciOiJIUzI1NiJ9","signature":"AQID"}"#
        );
        assert_eq!(Message::parse(&flattened).unwrap(), message);

        let general = message.to_general_json().unwrap();
        assert_eq!(
            general,
            r#"{"payload":"TG9yZW0gaXBzdW0","signatures":[{"protected":"eyJhbGciOiJIUzI1NiJ9","signature":"AQID"}]}"#
        );
        assert_eq!(Message::parse(&general).unwrap(), message);
    }

    #[test]
    fn empty_protected_headers_are_omitted() {
        let signature = Signature::builder()
            .with_unprotected_headers(Headers::new().with_key_id("k1"))
            .with_signature(b"sig".to_vec())
            .build()
            .unwrap();
        let message = Message::builder()
            .with_payload(Vec::new())
            .with_signature(signature)
            .build()
            .unwrap();

        let json = message.to_flattened_json().unwrap();
        assert_eq!(json, r#"{"payload":"","header":{"kid":"k1"},"signature":"c2ln"}"#);

        let parsed = Message::parse(&json).unwrap();
        assert!(parsed.payload().is_empty());
        assert!(parsed.signatures()[0].protected_headers().is_empty());
        assert_eq!(parsed, message);

        let err = assert_err!(message.to_compact());
        assert_eq!(err.kind(), JoseErrorKind::Serialization);
    }

    #[test]
    fn multi_signature_builder() {
        let message = Message::builder()
            .with_payload("something")
            .add_signature(
                &DummySigner,
                &SigningKey::custom(()),
                Headers::new().try_with_header("nonce", "random").unwrap(),
                Headers::new().try_with_header("data", "something_random").unwrap(),
            )
            .unwrap()
            .add_signature(
                &DummySigner,
                &SigningKey::custom(()),
                Headers::new().with_algorithm(JWA::from("X-OTHER")),
                Headers::new(),
            )
            .unwrap()
            .build()
            .unwrap();

        let [first, second] = message.signatures() else {
            panic!("expected two signatures");
        };
        assert_eq!(first.algorithm(), Some(JWA::from("X-DUMMY")));
        assert_eq!(first.protected_headers().get("nonce"), Some(&json!("random")));
        // caller provided alg is kept
        assert_eq!(second.algorithm(), Some(JWA::from("X-OTHER")));

        for signature in message.signatures() {
            let mut expected = message.signing_input(signature);
            expected.push(b'!');
            assert_eq!(signature.signature(), expected.as_slice());
        }

        let parsed = Message::parse(&message.to_general_json().unwrap()).unwrap();
        assert_eq!(parsed, message);
    }

    #[test]
    fn builders_validate_required_fields() {
        let err = assert_err!(Signature::builder().build());
        assert_eq!(err.kind(), JoseErrorKind::Serialization);

        let err = assert_err!(Message::builder().with_payload("x").build());
        assert_eq!(err.kind(), JoseErrorKind::Serialization);

        let err = assert_err!(
            Signature::builder()
                .with_protected_headers(Headers::new().with_key_id("a"))
                .with_unprotected_headers(Headers::new().with_key_id("b"))
                .with_signature(vec![0])
                .build()
        );
        assert_eq!(err.kind(), JoseErrorKind::InvalidHeader);
    }

    #[test]
    fn parse_rejects_malformed_input() {
        for input in [
            "",
            "a.b",
            "a.b.c.d",
            ".TG9yZW0.AQID",
            "eyJhbGciOiJIUzI1NiJ9.not*base64.AQID",
            "eyJhbGciOiJIUzI1NiJ9.TG9yZW0.not*base64",
            "bm90IGpzb24.TG9yZW0.AQID",
            r#"{"payload":"TG9yZW0","signatures":[]}"#,
            r#"{"payload":"TG9yZW0"}"#,
            r#"{"signatures":[{"protected":"eyJhbGciOiJIUzI1NiJ9","signature":"AQID"}]}"#,
            r#"{"payload":"TG9yZW0","protected":"eyJhbGciOiJIUzI1NiJ9","signature":"AQ=D"}"#,
            r#"{"payload":"TG9yZW0","header":{"kid":1},"signature":"AQID"}"#,
            r#"{"payload":"TG9yZW0","header":{"alg":"HS256"},"protected":"eyJhbGciOiJIUzI1NiJ9","signature":"AQID"}"#,
            "{not json",
        ] {
            let err = assert_err!(Message::parse(input), "input: {input}");
            assert_eq!(err.kind(), JoseErrorKind::MalformedMessage, "input: {input}");
        }
    }

    #[test]
    fn explicit_form_parsers() {
        let general = rfc_general_json();
        assert_err!(Message::parse_flattened_json(&general));
        assert_ok!(Message::parse_general_json(&general));
        assert_err!(Message::parse_compact(&general));

        let compact = format!("eyJhbGciOiJIUzI1NiJ9.{RFC_PAYLOAD}.AQID");
        let message: Message = compact.parse().unwrap();
        assert_eq!(message.serialize(Serialization::Compact).unwrap(), compact);
    }
}
