use signet_utils::macros::enum_builder;

enum_builder! {
    /// [`JWA`] or JSON Web Algorithms as defined in [`rfc7518`]
    /// and [`rfc8037`] for `EdDSA`.
    ///
    /// Identifiers are matched exactly, as they are case-sensitive on the wire.
    /// Identifiers outside of the built-in table are kept as [`JWA::Unknown`],
    /// which allows host applications to register their own algorithms.
    ///
    /// [`rfc7518`]: https://datatracker.ietf.org/doc/html/rfc7518
    /// [`rfc8037`]: https://datatracker.ietf.org/doc/html/rfc8037
    @String
    pub enum JWA {
        /// HMAC using SHA-256 (Required)
        HS256 => "HS256",
        /// HMAC using SHA-384 (Optional)
        HS384 => "HS384",
        /// HMAC using SHA-512 (Optional)
        HS512 => "HS512",
        /// RSASSA-PKCS1-v1_5 using SHA-256 (Recommended)
        RS256 => "RS256",
        /// RSASSA-PKCS1-v1_5 using SHA-384 (Optional)
        RS384 => "RS384",
        /// RSASSA-PKCS1-v1_5 using SHA-512 (Optional)
        RS512 => "RS512",
        /// ECDSA using P-256 and SHA-256 (Recommended+)
        ES256 => "ES256",
        /// ECDSA using P-384 and SHA-384 (Optional)
        ES384 => "ES384",
        /// ECDSA using P-521 and SHA-512 (Optional)
        ES512 => "ES512",
        /// RSASSA-PSS using SHA-256 and MGF1 with SHA-256 (Optional)
        PS256 => "PS256",
        /// RSASSA-PSS using SHA-384 and MGF1 with SHA-384 (Optional)
        PS384 => "PS384",
        /// RSASSA-PSS using SHA-512 and MGF1 with SHA-512 (Optional)
        PS512 => "PS512",
        /// Edwards-curve signatures, only Ed25519 is supported
        EdDSA => "EdDSA",
    }
}
