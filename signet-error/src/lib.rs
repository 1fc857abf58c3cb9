//! Error types and utilities for signet.
//!
//! The [`BoxError`] type is a type-erased error type that can be used to represent any error that
//! implements the `std::error::Error` trait and is used for cases where it is usually not
//! that important what specific error type is returned, but rather that an error occurred.
//!
//! [`OpaqueError`] wraps such a [`BoxError`] and is what most fallible signet
//! plumbing returns. Domain errors that callers are expected to branch on
//! (such as the JOSE error kinds) are defined as concrete types in the crates
//! that produce them, and carry an [`OpaqueError`] as their cause.
//!
//! One can use downcasting or [`ErrorExt`] to try to get the cause of an error.
//!
//! # Signet
//!
//! Crate used by the end-user `signet` crate and `signet` crate authors alike.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![cfg_attr(not(test), warn(clippy::print_stdout, clippy::dbg_macro))]

/// Alias for a type-erased error type.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

mod ext;
pub use ext::{ErrorContext, ErrorExt, OpaqueError};
