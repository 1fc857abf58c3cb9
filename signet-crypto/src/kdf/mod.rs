//! Key derivation functions used by JOSE key agreement algorithms.
//!
//! See [`rfc7518, section 4.6.2`] for how the derived key material is used.
//!
//! [`rfc7518, section 4.6.2`]: https://datatracker.ietf.org/doc/html/rfc7518#section-4.6.2

mod concat;
pub use concat::{ConcatKdf, key_data_len};
