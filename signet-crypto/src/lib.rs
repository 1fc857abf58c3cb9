//! Crypto logic used by signet.
//!
//! This includes:
//! - JSON Object Signing and Encryption (JOSE): JWS messages, headers, algorithms
//!   and the registry resolving them
//! - Key derivation: the Concat KDF shared with JWE key agreement
//!
//! # Signet
//!
//! Crate used by the end-user `signet` crate and `signet` crate authors alike.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![cfg_attr(not(test), warn(clippy::print_stdout, clippy::dbg_macro))]

pub mod jose;
pub mod kdf;

pub mod dep {
    //! Dependencies for signet crypto modules.
    //!
    //! Exported for your convenience

    pub mod aws_lc_rs {
        //! Re-export of the [`aws-lc-rs`] crate.
        //!
        //! [`aws-lc-rs`]: https://docs.rs/aws-lc-rs

        #[doc(inline)]
        pub use aws_lc_rs::*;
    }
}
