use base64::{Engine as _, prelude::BASE64_URL_SAFE_NO_PAD};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::{Map, Value};
use signet_utils::macros::generate_set_and_with;

use super::{JWA, JoseError, JoseErrorKind};

const ALGORITHM: &str = "alg";
const JWK_SET_URL: &str = "jku";
const JWK: &str = "jwk";
const KEY_ID: &str = "kid";
const X509_URL: &str = "x5u";
const X509_CERT_CHAIN: &str = "x5c";
const X509_THUMBPRINT: &str = "x5t";
const X509_THUMBPRINT_S256: &str = "x5t#S256";
const TYPE: &str = "typ";
const CONTENT_TYPE: &str = "cty";
const CRITICAL: &str = "crit";

#[derive(Default, Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(try_from = "Map<String, Value>")]
/// [`Headers`] is an ordered set of JOSE header parameters, used for both the
/// protected (integrity covered) and the public (unprotected) headers of a signature.
///
/// Registered parameters of [`rfc7515, section 4.1`] are type checked when they
/// are set, any other name is a private parameter accepting any JSON value.
/// Insertion order is kept, and is the order in which parameters are encoded.
///
/// [`rfc7515, section 4.1`]: https://datatracker.ietf.org/doc/html/rfc7515#section-4.1
pub struct Headers(Map<String, Value>);

impl Headers {
    /// Create an empty header set.
    pub fn new() -> Self {
        Self::default()
    }

    generate_set_and_with! {
        /// Set the `alg` parameter.
        pub fn algorithm(mut self, algorithm: JWA) -> Self {
            self.0.insert(ALGORITHM.to_owned(), Value::String(algorithm.as_str().to_owned()));
            self
        }
    }

    generate_set_and_with! {
        /// Set the `kid` parameter.
        pub fn key_id(mut self, key_id: impl Into<String>) -> Self {
            self.0.insert(KEY_ID.to_owned(), Value::String(key_id.into()));
            self
        }
    }

    generate_set_and_with! {
        /// Set the `typ` parameter.
        pub fn typ(mut self, typ: impl Into<String>) -> Self {
            self.0.insert(TYPE.to_owned(), Value::String(typ.into()));
            self
        }
    }

    generate_set_and_with! {
        /// Set the `cty` parameter.
        pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
            self.0.insert(CONTENT_TYPE.to_owned(), Value::String(content_type.into()));
            self
        }
    }

    generate_set_and_with! {
        /// Set the `jku` parameter.
        pub fn jwk_set_url(mut self, url: impl Into<String>) -> Self {
            self.0.insert(JWK_SET_URL.to_owned(), Value::String(url.into()));
            self
        }
    }

    generate_set_and_with! {
        /// Set the `jwk` parameter, the public key as a JSON object.
        pub fn jwk(mut self, jwk: Map<String, Value>) -> Self {
            self.0.insert(JWK.to_owned(), Value::Object(jwk));
            self
        }
    }

    generate_set_and_with! {
        /// Set the `x5u` parameter.
        pub fn x509_url(mut self, url: impl Into<String>) -> Self {
            self.0.insert(X509_URL.to_owned(), Value::String(url.into()));
            self
        }
    }

    generate_set_and_with! {
        /// Set the `x5c` parameter, base64 (not url safe) encoded DER certificates.
        pub fn x509_cert_chain(mut self, chain: Vec<String>) -> Self {
            let chain = chain.into_iter().map(Value::String).collect();
            self.0.insert(X509_CERT_CHAIN.to_owned(), Value::Array(chain));
            self
        }
    }

    generate_set_and_with! {
        /// Set the `x5t` parameter.
        pub fn x509_thumbprint(mut self, thumbprint: impl Into<String>) -> Self {
            self.0.insert(X509_THUMBPRINT.to_owned(), Value::String(thumbprint.into()));
            self
        }
    }

    generate_set_and_with! {
        /// Set the `x5t#S256` parameter.
        pub fn x509_thumbprint_s256(mut self, thumbprint: impl Into<String>) -> Self {
            self.0.insert(X509_THUMBPRINT_S256.to_owned(), Value::String(thumbprint.into()));
            self
        }
    }

    generate_set_and_with! {
        /// Set the `crit` parameter, which must name at least one extension.
        pub fn critical(mut self, names: Vec<String>) -> Result<Self, JoseError> {
            if names.is_empty() {
                return Err(JoseError::new(JoseErrorKind::InvalidHeader)
                    .with_message("crit header parameter cannot be empty"));
            }
            let names = names.into_iter().map(Value::String).collect();
            self.0.insert(CRITICAL.to_owned(), Value::Array(names));
            Ok(self)
        }
    }

    generate_set_and_with! {
        /// Set provided header in the header map
        ///
        /// Warning: this function will replace an already existing header.
        /// Registered parameters are type checked, failing with
        /// [`JoseErrorKind::InvalidHeader`] without modifying the set.
        pub fn header(
            mut self,
            name: impl Into<String>,
            value: impl Serialize,
        ) -> Result<Self, JoseError> {
            let name = name.into();
            let value = serde_json::to_value(value).map_err(|err| {
                JoseError::new(JoseErrorKind::InvalidHeader)
                    .with_message(format!("convert header {name:?} to json value"))
                    .with_cause(err)
            })?;
            validate(&name, &value)?;
            self.0.insert(name, value);
            Ok(self)
        }
    }

    generate_set_and_with! {
        /// Set provided headers in the header map
        ///
        /// The input has to serialize to a key value object. Either all
        /// headers are set or, when one of them is invalid, none of them.
        pub fn headers(mut self, headers: impl Serialize) -> Result<Self, JoseError> {
            let headers = match serde_json::to_value(headers) {
                Ok(Value::Object(map)) => map,
                Ok(_) => {
                    return Err(JoseError::new(JoseErrorKind::InvalidHeader)
                        .with_message("can only set multiple headers from a key value object"));
                }
                Err(err) => {
                    return Err(JoseError::new(JoseErrorKind::InvalidHeader)
                        .with_message("convert headers to json value")
                        .with_cause(err));
                }
            };
            for (name, value) in &headers {
                validate(name, value)?;
            }
            self.0.extend(headers);
            Ok(self)
        }
    }

    /// The `alg` parameter, if set.
    pub fn algorithm(&self) -> Option<JWA> {
        self.get_str(ALGORITHM).map(JWA::from)
    }

    /// The `kid` parameter, if set.
    pub fn key_id(&self) -> Option<&str> {
        self.get_str(KEY_ID)
    }

    /// The `typ` parameter, if set.
    pub fn typ(&self) -> Option<&str> {
        self.get_str(TYPE)
    }

    /// The `cty` parameter, if set.
    pub fn content_type(&self) -> Option<&str> {
        self.get_str(CONTENT_TYPE)
    }

    /// The `jku` parameter, if set.
    pub fn jwk_set_url(&self) -> Option<&str> {
        self.get_str(JWK_SET_URL)
    }

    /// The `jwk` parameter, if set.
    pub fn jwk(&self) -> Option<&Map<String, Value>> {
        self.0.get(JWK).and_then(Value::as_object)
    }

    /// The `x5u` parameter, if set.
    pub fn x509_url(&self) -> Option<&str> {
        self.get_str(X509_URL)
    }

    /// The `x5c` parameter, if set.
    pub fn x509_cert_chain(&self) -> Option<Vec<&str>> {
        self.get_str_array(X509_CERT_CHAIN)
    }

    /// The `x5t` parameter, if set.
    pub fn x509_thumbprint(&self) -> Option<&str> {
        self.get_str(X509_THUMBPRINT)
    }

    /// The `x5t#S256` parameter, if set.
    pub fn x509_thumbprint_s256(&self) -> Option<&str> {
        self.get_str(X509_THUMBPRINT_S256)
    }

    /// The `crit` parameter, if set.
    pub fn critical(&self) -> Option<Vec<&str>> {
        self.get_str_array(CRITICAL)
    }

    /// Get the raw value of any header parameter.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// Returns `true` if the parameter is set.
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Remove a header parameter, keeping the order of the others.
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.0.shift_remove(name)
    }

    /// Iterate over all parameters in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Number of parameters.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if no parameter is set.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Reference to the underlying JSON object.
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Try decode headers to the provided `T`
    pub fn decode<T>(&self) -> Result<T, JoseError>
    where
        T: DeserializeOwned,
    {
        T::deserialize(&self.0).map_err(|err| {
            JoseError::new(JoseErrorKind::InvalidHeader)
                .with_message("deserialize headers")
                .with_cause(err)
        })
    }

    /// Encode headers to a base64 url safe representation,
    /// an empty set encodes to an empty string.
    pub(crate) fn encode(&self) -> Result<String, JoseError> {
        if self.0.is_empty() {
            return Ok(String::new());
        }
        let json = serde_json::to_vec(&self.0).map_err(|err| {
            JoseError::new(JoseErrorKind::Serialization)
                .with_message("encode headers to json")
                .with_cause(err)
        })?;
        Ok(BASE64_URL_SAFE_NO_PAD.encode(json))
    }

    /// Decode headers from their base64 url safe representation.
    pub(crate) fn decode_encoded(encoded: &str) -> Result<Self, JoseError> {
        if encoded.is_empty() {
            return Ok(Self::default());
        }
        let json = BASE64_URL_SAFE_NO_PAD
            .decode(encoded)
            .map_err(|err| JoseError::malformed("decode protected header").with_cause(err))?;
        let map = serde_json::from_slice::<Map<String, Value>>(&json).map_err(|err| {
            JoseError::malformed("protected header is not a json object").with_cause(err)
        })?;
        Self::try_from(map)
            .map_err(|err| JoseError::malformed("invalid protected header").with_cause(err))
    }

    fn get_str(&self, name: &str) -> Option<&str> {
        self.0.get(name).and_then(Value::as_str)
    }

    fn get_str_array(&self, name: &str) -> Option<Vec<&str>> {
        self.0
            .get(name)
            .and_then(Value::as_array)
            .map(|values| values.iter().filter_map(Value::as_str).collect())
    }
}

impl TryFrom<Map<String, Value>> for Headers {
    type Error = JoseError;

    fn try_from(map: Map<String, Value>) -> Result<Self, Self::Error> {
        for (name, value) in &map {
            validate(name, value)?;
        }
        Ok(Self(map))
    }
}

impl Serialize for Headers {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'a> IntoIterator for &'a Headers {
    type Item = (&'a String, &'a Value);
    type IntoIter = serde_json::map::Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

fn validate(name: &str, value: &Value) -> Result<(), JoseError> {
    let valid = match name {
        ALGORITHM | JWK_SET_URL | KEY_ID | X509_URL | X509_THUMBPRINT | X509_THUMBPRINT_S256
        | TYPE | CONTENT_TYPE => value.is_string(),
        JWK => value.is_object(),
        X509_CERT_CHAIN => is_string_array(value),
        CRITICAL => is_string_array(value) && value.as_array().is_some_and(|v| !v.is_empty()),
        _ => true,
    };

    if valid {
        Ok(())
    } else {
        Err(JoseError::new(JoseErrorKind::InvalidHeader)
            .with_message(format!("invalid value type for header parameter {name:?}")))
    }
}

fn is_string_array(value: &Value) -> bool {
    value
        .as_array()
        .is_some_and(|values| values.iter().all(Value::is_string))
}
