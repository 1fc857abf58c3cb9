//! # JOSE: JSON Object Signing and Encryption
//!
//! This module implements the signing core of JOSE:
//!
//! * JWS (JSON Web Signature): a payload with one or more signatures, each
//!   covering a set of protected headers. Messages can be serialized in the
//!   compact, flattened JSON and general JSON forms.
//!   See [`rfc7515`] for more details.
//!
//! * JWA (JSON Web Algorithms): the algorithm identifiers and the
//!   built-in implementations of the `HS*`, `RS*`, `PS*`, `ES*` and `EdDSA`
//!   signature algorithms. See [`rfc7518`] for more details.
//!
//! Algorithms are resolved through an [`AlgorithmRegistry`], which is
//! extensible at runtime with [`register_signer`] and [`register_verifier`].
//!
//! ```
//! use signet_crypto::jose::{JWA, SignOptions, SigningKey, sign, verify};
//!
//! let key = SigningKey::hmac(b"a secret of at least some length".to_vec());
//! let token = sign(b"hello", JWA::HS256, &key, SignOptions::default()).unwrap();
//! let payload = verify(&token, JWA::HS256, &key.verifying_key()).unwrap();
//! assert_eq!(payload, b"hello");
//! ```
//!
//! [`rfc7515`]: https://datatracker.ietf.org/doc/html/rfc7515
//! [`rfc7518`]: https://datatracker.ietf.org/doc/html/rfc7518

mod jwa;
pub use jwa::JWA;

mod error;
pub use error::{JoseError, JoseErrorKind};

mod headers;
pub use headers::Headers;

mod key;
pub use key::{
    EcdsaSigningKey, EcdsaVerifyingKey, EllipticCurve, HmacKey, SigningKey, VerifyingKey,
};

pub mod algorithm;
pub use algorithm::{
    EcdsaAlgorithm, EdDsaAlgorithm, HmacAlgorithm, RsaAlgorithm, Signer, SignerFactory, Verifier,
    VerifierFactory,
};

mod registry;
pub use registry::{AlgorithmRegistry, register_signer, register_verifier};

mod jws;
pub use jws::{Message, MessageBuilder, Serialization, Signature, SignatureBuilder};

mod sign;
pub use sign::{SignOptions, sign, sign_with};

mod verify;
pub use verify::{VerifiedMessage, VerifyOptions, verify, verify_message_with, verify_with};
