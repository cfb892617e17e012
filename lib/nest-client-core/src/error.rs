//! Error types for nest-client.

use derive_more::{Display, Error, From};

use crate::{DecodeError, RequestException};

// ============================================================================
// Misuse
// ============================================================================

/// Contract violations on a [`crate::RequestBuilder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum Misuse {
    /// A response accessor was called before the request was sent.
    #[display("the request has not been sent yet")]
    NotSent,
    /// The request was already sent once.
    #[display("the request was already sent")]
    AlreadySent,
    /// A chain method was called after the request was sent.
    #[display("the request was modified after it was sent")]
    ModifiedAfterSend,
}

// ============================================================================
// Error Type
// ============================================================================

/// Main error type for nest-client operations.
#[derive(Debug, Display, Error, From)]
pub enum Error {
    /// The exchange failed with an HTTP error status or did not complete
    /// (status `0`).
    #[display("{_0}")]
    #[from]
    Request(RequestException),

    /// The exchange succeeded but the body did not match the model.
    #[display("{_0}")]
    #[from]
    Decode(DecodeError),

    /// The request builder was used out of order.
    #[display("{_0}")]
    #[from]
    Misuse(Misuse),

    /// Network/connection errors.
    #[display("connection error: {_0}")]
    #[from(skip)]
    Connection(#[error(not(source))] String),

    /// TLS/SSL errors.
    #[display("TLS error: {_0}")]
    #[from(skip)]
    Tls(#[error(not(source))] String),

    /// Request timeout.
    #[display("request timeout")]
    #[from(skip)]
    Timeout,

    /// Invalid request configuration.
    #[display("invalid request: {_0}")]
    #[from(skip)]
    InvalidRequest(#[error(not(source))] String),

    /// JSON serialization error.
    #[display("JSON serialization error: {_0}")]
    #[from]
    JsonSerialization(serde_json::Error),

    /// JSON deserialization error with path context.
    #[display("JSON deserialization error at '{path}': {message}")]
    #[from(skip)]
    JsonDeserialization {
        /// JSON path to the error (e.g., "user.address.city").
        path: String,
        /// Error message.
        message: String,
    },

    /// URL parsing error.
    #[display("invalid URL: {_0}")]
    #[from]
    InvalidUrl(url::ParseError),
}

/// Result type alias using [`crate::Error`].
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a connection error.
    #[must_use]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection(message.into())
    }

    /// Create a TLS error.
    #[must_use]
    pub fn tls(message: impl Into<String>) -> Self {
        Self::Tls(message.into())
    }

    /// Create an invalid request error.
    #[must_use]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }

    /// Create a JSON deserialization error with path context.
    #[must_use]
    pub fn json_deserialization(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::JsonDeserialization {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Returns `true` if this is a timeout error.
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout)
    }

    /// Returns `true` if this is a connection error.
    #[must_use]
    pub const fn is_connection(&self) -> bool {
        matches!(self, Self::Connection(_))
    }

    /// Returns the status code if this is a request failure.
    ///
    /// Transport failures report `Some(0)`.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Request(exception) => Some(exception.status_code()),
            _ => None,
        }
    }

    /// Returns `true` if the exchange did not complete.
    #[must_use]
    pub fn is_transport_failure(&self) -> bool {
        matches!(self, Self::Request(exception) if exception.is_transport_failure())
    }

    /// Returns `true` if the server answered with a status `>= 400`.
    #[must_use]
    pub fn is_http_error(&self) -> bool {
        self.status().is_some_and(|s| s >= 400)
    }

    /// Returns `true` if the body of a successful exchange could not be decoded.
    #[must_use]
    pub const fn is_decode_error(&self) -> bool {
        matches!(self, Self::Decode(_))
    }

    /// Returns `true` if the request builder was misused.
    #[must_use]
    pub const fn is_misuse(&self) -> bool {
        matches!(self, Self::Misuse(_))
    }

    /// Returns `true` if this is a 404 Not Found error.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Returns the raw response body for request and decode failures.
    #[must_use]
    pub fn raw_response_data(&self) -> Option<&str> {
        match self {
            Self::Request(exception) => Some(exception.raw_response_data()),
            Self::Decode(error) => Some(error.raw_response_data()),
            _ => None,
        }
    }

    /// Returns the request exception if this is a request failure.
    #[must_use]
    pub const fn as_request_exception(&self) -> Option<&RequestException> {
        match self {
            Self::Request(exception) => Some(exception),
            _ => None,
        }
    }
}
