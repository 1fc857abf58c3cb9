//! Signet is a JOSE signing core for the 🦀 Rust language:
//! JSON Web Signatures (JWS) with an extensible algorithm registry,
//! and the Concat KDF used by JWE key agreement.
//!
//! | category | support list |
//! |-|-|
//! | [algorithms](crate::jose::algorithm) | `HS256` ⸱ `HS384` ⸱ `HS512` ⸱ `RS256` ⸱ `RS384` ⸱ `RS512` ⸱ `PS256` ⸱ `PS384` ⸱ `PS512` ⸱ `ES256` ⸱ `ES384` ⸱ `ES512` ⸱ `EdDSA` ⸱ [custom](crate::jose::register_signer) |
//! | [serialization](crate::jose::Serialization) | compact ⸱ flattened JSON ⸱ general JSON |
//! | [key derivation](crate::kdf) | [Concat KDF](crate::kdf::ConcatKdf) |
//!
//! Sign and verify a payload:
//!
//! ```
//! use signet::jose::{JWA, SignOptions, SigningKey, sign, verify};
//!
//! let key = SigningKey::generate_ed25519().unwrap();
//! let token = sign("Lorem ipsum", JWA::EdDSA, &key, SignOptions::new()).unwrap();
//!
//! let payload = verify(&token, JWA::EdDSA, &key.verifying_key()).unwrap();
//! assert_eq!(payload, b"Lorem ipsum");
//! ```
//!
//! Messages with multiple signatures are created with the
//! [`MessageBuilder`](crate::jose::MessageBuilder) and verified as soon
//! as one signature verifies, see [`verify_message_with`](crate::jose::verify_message_with)
//! for how to learn which one did.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![cfg_attr(not(test), warn(clippy::print_stdout, clippy::dbg_macro))]

pub mod error {
    //! Error plumbing, see [`signet_error`] for more information.

    #[doc(inline)]
    pub use signet_error::*;
}

pub mod utils {
    //! Utilities, see [`signet_utils`] for more information.

    #[doc(inline)]
    pub use signet_utils::*;
}

#[doc(inline)]
pub use signet_crypto::{jose, kdf};

pub mod dep {
    //! Dependencies for signet, exported for your convenience.

    #[doc(inline)]
    pub use signet_crypto::dep::aws_lc_rs;
}
