//! Response classification and decoding.
//!
//! [`Outcome::from_exchange`] turns what a [`crate::Transport`] returned into
//! one of three results:
//!
//! | Exchange | Body | Outcome |
//! |----------|------|---------|
//! | failed, or status `0` / `>= 400` | any | [`Outcome::Failure`] |
//! | status `< 400` | blank | [`Outcome::Success`] with `T::default()` |
//! | status `< 400` | matches the model | [`Outcome::Success`] |
//! | status `< 400` | does not match, or is not UTF-8 | [`Outcome::Undecodable`] |

use serde::de::DeserializeOwned;

use crate::{DecodeError, Error, RequestException, Response, Result, from_json, is_error_status};

/// Expected top-level shape of a response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Shape {
    /// A single JSON object.
    #[default]
    Object,
    /// A top-level JSON array.
    Array,
}

/// Returns `true` if the body holds anything besides whitespace.
#[must_use]
pub fn has_response_data(raw: &str) -> bool {
    !raw.trim().is_empty()
}

/// Decode a body of the given shape.
///
/// # Errors
///
/// Returns [`Error::JsonDeserialization`] if the body is not of the expected
/// shape or does not match `T`.
pub fn decode<T: DeserializeOwned>(shape: Shape, body: &[u8]) -> Result<T> {
    if shape == Shape::Array && body.trim_ascii_start().first() != Some(&b'[') {
        return Err(Error::json_deserialization(
            ".",
            "expected a top-level JSON array",
        ));
    }
    from_json(body)
}

/// Result of one exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    /// The exchange succeeded; `value` is `T::default()` when the body was blank.
    Success {
        /// Response body as received.
        raw: String,
        /// Decoded model.
        value: T,
    },
    /// HTTP error status or transport failure.
    Failure(RequestException),
    /// The exchange succeeded but the body did not match the model.
    Undecodable(DecodeError),
}

impl<T: DeserializeOwned + Default> Outcome<T> {
    /// Classify and decode the result of an exchange with `url`.
    ///
    /// A transport error becomes a [`Outcome::Failure`] with status `0` and the
    /// error text as message.
    #[must_use]
    pub fn from_exchange(url: &str, shape: Shape, exchange: Result<Response>) -> Self {
        let response = match exchange {
            Ok(response) => response,
            Err(err) => {
                return Self::Failure(RequestException::transport_failure(url, err.to_string()));
            }
        };

        let status = response.status();
        let body = response.into_body();
        let raw = String::from_utf8_lossy(&body).into_owned();

        if is_error_status(status) {
            return Self::Failure(RequestException::new(status, url, raw));
        }
        if let Err(err) = std::str::from_utf8(&body) {
            return Self::Undecodable(DecodeError::new(
                status,
                url,
                ".",
                format!("response body is not valid UTF-8: {err}"),
                raw,
            ));
        }
        if !has_response_data(&raw) {
            return Self::Success {
                raw,
                value: T::default(),
            };
        }

        match decode(shape, &body) {
            Ok(value) => Self::Success { raw, value },
            Err(Error::JsonDeserialization { path, message }) => {
                Self::Undecodable(DecodeError::new(status, url, path, message, raw))
            }
            Err(other) => Self::Undecodable(DecodeError::new(
                status,
                url,
                ".",
                other.to_string(),
                raw,
            )),
        }
    }
}

impl<T> Outcome<T> {
    /// Returns `true` for [`Outcome::Failure`].
    #[must_use]
    pub const fn has_error(&self) -> bool {
        matches!(self, Self::Failure(_))
    }

    /// Response body as received.
    #[must_use]
    pub fn raw(&self) -> &str {
        match self {
            Self::Success { raw, .. } => raw,
            Self::Failure(exception) => exception.raw_response_data(),
            Self::Undecodable(error) => error.raw_response_data(),
        }
    }

    /// Returns `true` if the body holds anything besides whitespace.
    #[must_use]
    pub fn has_response_data(&self) -> bool {
        has_response_data(self.raw())
    }

    /// Decoded value, if the exchange succeeded.
    #[must_use]
    pub const fn value(&self) -> Option<&T> {
        match self {
            Self::Success { value, .. } => Some(value),
            _ => None,
        }
    }

    /// Borrow the decoded value or a copy of the error.
    pub fn as_result(&self) -> Result<&T> {
        match self {
            Self::Success { value, .. } => Ok(value),
            Self::Failure(exception) => Err(exception.clone().into()),
            Self::Undecodable(error) => Err(error.clone().into()),
        }
    }

    /// Take the decoded value or the error.
    pub fn into_result(self) -> Result<T> {
        match self {
            Self::Success { value, .. } => Ok(value),
            Self::Failure(exception) => Err(exception.into()),
            Self::Undecodable(error) => Err(error.into()),
        }
    }
}
