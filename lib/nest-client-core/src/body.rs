//! Body serialization utilities.

use bytes::Bytes;

use crate::Result;

/// MIME type for JSON bodies.
pub const APPLICATION_JSON: &str = "application/json";

/// A serialized request body with its content type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Body {
    bytes: Bytes,
    content_type: &'static str,
}

impl Body {
    /// Serialize a model into a JSON body.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn json<T: serde::Serialize + ?Sized>(value: &T) -> Result<Self> {
        Ok(Self::raw_json(to_json(value)?))
    }

    /// Wrap preformatted JSON text as a body.
    ///
    /// The text is sent as is, without validation.
    #[must_use]
    pub fn raw_json(bytes: impl Into<Bytes>) -> Self {
        Self {
            bytes: bytes.into(),
            content_type: APPLICATION_JSON,
        }
    }

    /// Body bytes.
    #[must_use]
    pub const fn bytes(&self) -> &Bytes {
        &self.bytes
    }

    /// Content type of the body.
    #[must_use]
    pub const fn content_type(&self) -> &'static str {
        self.content_type
    }

    /// Consume into the body bytes.
    #[must_use]
    pub fn into_bytes(self) -> Bytes {
        self.bytes
    }
}

/// Serialize a value to JSON bytes.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
///
/// # Example
///
/// ```
/// use nest_client_core::to_json;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Brewer { name: String }
///
/// let brewer = Brewer { name: "Alice".to_string() };
/// let bytes = to_json(&brewer).expect("serialize");
/// assert_eq!(bytes.as_ref(), br#"{"name":"Alice"}"#);
/// ```
pub fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<Bytes> {
    serde_json::to_vec(value)
        .map(Bytes::from)
        .map_err(Into::into)
}

/// Deserialize JSON bytes to a value with path-aware error messages.
///
/// Uses `serde_path_to_error` so the error names the exact field that failed
/// (e.g. `[0].address.city`).
///
/// # Errors
///
/// Returns [`crate::Error::JsonDeserialization`] if the bytes do not match `T`.
///
/// # Example
///
/// ```
/// use nest_client_core::from_json;
/// use serde::Deserialize;
///
/// #[derive(Debug, PartialEq, Deserialize)]
/// struct Brewer { name: String }
///
/// let bytes = br#"{"name":"Alice"}"#;
/// let brewer: Brewer = from_json(bytes).expect("deserialize");
/// assert_eq!(brewer, Brewer { name: "Alice".to_string() });
/// ```
pub fn from_json<T: serde::de::DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    let mut deserializer = serde_json::Deserializer::from_slice(bytes);
    serde_path_to_error::deserialize(&mut deserializer).map_err(|e| {
        crate::Error::json_deserialization(e.path().to_string(), e.inner().to_string())
    })
}
