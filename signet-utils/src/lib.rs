//! utilities crate for signet
//!
//! `signet-utils` contains the declarative macros shared by the
//! other signet crates: builder setter generation and string enums
//! with an `Unknown` fallback.
//!
//! # Signet
//!
//! Crate used by the end-user `signet` crate and `signet` crate authors alike.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![cfg_attr(not(test), warn(clippy::print_stdout, clippy::dbg_macro))]

#[doc(hidden)]
#[macro_use]
pub mod macros;
