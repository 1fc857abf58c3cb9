use signet_utils::macros::generate_set_and_with;

use super::{AlgorithmRegistry, JWA, JoseError, JoseErrorKind, Message, Signature, VerifyingKey};

#[derive(Debug, Clone, Default)]
/// Options for [`verify_with`] and [`verify_message_with`].
pub struct VerifyOptions {
    algorithm: Option<JWA>,
}

impl VerifyOptions {
    /// Create [`VerifyOptions`] accepting any registered algorithm.
    pub fn new() -> Self {
        Self::default()
    }

    generate_set_and_with! {
        /// Set the algorithm a signature has to declare in its protected
        /// headers, signatures declaring another one fail with
        /// [`JoseErrorKind::AlgorithmMismatch`].
        pub fn algorithm(mut self, algorithm: Option<JWA>) -> Self {
            self.algorithm = algorithm;
            self
        }
    }

    /// Expected algorithm, if any
    pub fn algorithm(&self) -> Option<&JWA> {
        self.algorithm.as_ref()
    }
}

#[derive(Debug, Clone)]
/// A [`Message`] of which at least one signature verified.
pub struct VerifiedMessage {
    message: Message,
    index: usize,
}

impl VerifiedMessage {
    /// Index of the signature that verified
    pub fn index(&self) -> usize {
        self.index
    }

    /// The [`Signature`] that verified, its headers identify the signer
    pub fn signature(&self) -> &Signature {
        &self.message.signatures()[self.index]
    }

    /// The complete verified [`Message`]
    pub fn message(&self) -> &Message {
        &self.message
    }

    /// The verified payload
    pub fn payload(&self) -> &[u8] {
        self.message.payload()
    }

    /// Consume, returning the verified payload
    pub fn into_payload(self) -> Vec<u8> {
        self.message.into_payload()
    }

    /// Consume, returning the verified [`Message`]
    pub fn into_message(self) -> Message {
        self.message
    }
}

/// Verify a serialized message with the [global](AlgorithmRegistry::global)
/// registry, returning its payload.
///
/// Every signature has to declare `algorithm` in its protected headers,
/// the message is valid as soon as one of them verifies with `key`.
pub fn verify(
    message: impl AsRef<[u8]>,
    algorithm: JWA,
    key: &VerifyingKey,
) -> Result<Vec<u8>, JoseError> {
    verify_with(
        AlgorithmRegistry::global(),
        message,
        &VerifyOptions::new().with_algorithm(algorithm),
        key,
    )
}

/// Verify a serialized message in any serialization form,
/// returning its payload.
pub fn verify_with(
    registry: &AlgorithmRegistry,
    message: impl AsRef<[u8]>,
    options: &VerifyOptions,
    key: &VerifyingKey,
) -> Result<Vec<u8>, JoseError> {
    let message = std::str::from_utf8(message.as_ref())
        .map_err(|err| JoseError::malformed("message is not valid utf-8").with_cause(err))?;
    let message = Message::parse(message)?;
    verify_message_with(registry, message, options, key).map(VerifiedMessage::into_payload)
}

/// Verify the signatures of a parsed [`Message`] in order, until one verifies.
///
/// When none verifies, the error kind shared by all failed signatures is
/// returned if it is one of `MalformedMessage`, `AlgorithmMismatch`,
/// `UnsupportedAlgorithm` or `InvalidKeyType`. Any other outcome fails with
/// `VerificationFailed`, caused by the error of the last signature.
pub fn verify_message_with(
    registry: &AlgorithmRegistry,
    message: Message,
    options: &VerifyOptions,
    key: &VerifyingKey,
) -> Result<VerifiedMessage, JoseError> {
    let mut verified = None;
    let mut shared_kind = None;
    let mut last_error = None;

    for (index, signature) in message.signatures().iter().enumerate() {
        match verify_signature(registry, &message, signature, options, key) {
            Ok(algorithm) => {
                tracing::trace!(index, %algorithm, "jws signature verified");
                verified = Some(index);
                break;
            }
            Err(err) => {
                tracing::trace!(index, kind = %err.kind(), "jws signature rejected");
                shared_kind = match shared_kind {
                    None => Some(err.kind()),
                    Some(kind) if kind == err.kind() => Some(kind),
                    Some(_) => Some(JoseErrorKind::VerificationFailed),
                };
                last_error = Some(err);
            }
        }
    }

    if let Some(index) = verified {
        return Ok(VerifiedMessage { message, index });
    }

    tracing::debug!(
        signatures = message.signatures().len(),
        "no jws signature verified"
    );
    match (shared_kind, last_error) {
        (
            Some(
                JoseErrorKind::MalformedMessage
                | JoseErrorKind::AlgorithmMismatch
                | JoseErrorKind::UnsupportedAlgorithm
                | JoseErrorKind::InvalidKeyType,
            ),
            Some(err),
        ) => Err(err),
        (_, Some(err)) => {
            let algorithm = err.algorithm().cloned();
            let mut failure = JoseError::new(JoseErrorKind::VerificationFailed)
                .with_message("no signature verified")
                .with_cause(err);
            if let Some(algorithm) = algorithm {
                failure = failure.with_algorithm(algorithm);
            }
            Err(failure)
        }
        (_, None) => Err(JoseError::malformed("message has no signatures")),
    }
}

fn verify_signature(
    registry: &AlgorithmRegistry,
    message: &Message,
    signature: &Signature,
    options: &VerifyOptions,
    key: &VerifyingKey,
) -> Result<JWA, JoseError> {
    let Some(algorithm) = signature.algorithm() else {
        return Err(JoseError::malformed("signature has no alg protected header"));
    };
    if let Some(expected) = options.algorithm()
        && *expected != algorithm
    {
        return Err(JoseError::new(JoseErrorKind::AlgorithmMismatch)
            .with_message(format!("expected {expected}"))
            .with_algorithm(algorithm));
    }

    let verifier = registry.verifier(&algorithm)?;
    verifier.verify(
        &message.signing_input(signature),
        signature.signature(),
        key,
    )?;
    Ok(algorithm)
}
