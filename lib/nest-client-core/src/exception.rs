//! Failure values carried by [`crate::Error`].
//!
//! [`RequestException`] describes an exchange that ended with an HTTP error
//! status or never completed at all (status `0`). [`DecodeError`] describes an
//! exchange that succeeded but whose body did not match the expected model.

use std::fmt;

/// Status code used when the transport could not complete the exchange.
pub const TRANSPORT_FAILURE_STATUS: u16 = 0;

/// Returns `true` if `status` counts as a failed exchange.
///
/// Both HTTP errors (`>= 400`) and transport failures (`0`) are errors.
#[must_use]
pub const fn is_error_status(status: u16) -> bool {
    status == TRANSPORT_FAILURE_STATUS || status >= 400
}

/// A request that ran into an HTTP error or a transport failure.
///
/// The raw response body is kept verbatim so callers can log it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestException {
    status_code: u16,
    url: String,
    raw_response_data: String,
    message: Option<String>,
}

impl RequestException {
    /// Create an exception from a completed exchange.
    #[must_use]
    pub fn new(
        status_code: u16,
        url: impl Into<String>,
        raw_response_data: impl Into<String>,
    ) -> Self {
        Self {
            status_code,
            url: url.into(),
            raw_response_data: raw_response_data.into(),
            message: None,
        }
    }

    /// Create an exception for an exchange the transport could not complete.
    #[must_use]
    pub fn transport_failure(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(TRANSPORT_FAILURE_STATUS, url, String::new()).with_message(message)
    }

    /// Attach a human-readable message.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// HTTP status code, `0` for transport failures.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        self.status_code
    }

    /// URL the request was sent to, query string included.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Response body as received.
    #[must_use]
    pub fn raw_response_data(&self) -> &str {
        &self.raw_response_data
    }

    /// Optional message, set for transport failures.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Human-readable label for the status code (e.g. `"Not Found"`).
    #[must_use]
    pub fn status_label(&self) -> Option<&'static str> {
        if self.is_transport_failure() {
            return Some("Transport Failure");
        }
        http::StatusCode::from_u16(self.status_code)
            .ok()
            .and_then(|status| status.canonical_reason())
    }

    /// Returns `true` if the exchange never completed.
    #[must_use]
    pub const fn is_transport_failure(&self) -> bool {
        self.status_code == TRANSPORT_FAILURE_STATUS
    }

    /// Returns `true` for 4xx statuses.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        self.status_code >= 400 && self.status_code < 500
    }

    /// Returns `true` for 5xx statuses.
    #[must_use]
    pub const fn is_server_error(&self) -> bool {
        self.status_code >= 500 && self.status_code < 600
    }

    /// Returns `true` for 404.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        self.status_code == 404
    }

    /// Try to decode the error body as JSON.
    ///
    /// Nest backends usually answer errors with a small JSON document; this
    /// lets callers bind it to their own type.
    ///
    /// Returns `None` if the body is blank.
    pub fn decode_body<T: serde::de::DeserializeOwned>(&self) -> Option<crate::Result<T>> {
        if self.raw_response_data.trim().is_empty() {
            return None;
        }
        Some(crate::from_json(self.raw_response_data.as_bytes()))
    }
}

impl fmt::Display for RequestException {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "request failed with status {}", self.status_code)?;
        if let Some(label) = self.status_label() {
            write!(f, " ({label})")?;
        }
        write!(f, " while sending to {}", self.url)?;
        if let Some(message) = &self.message {
            write!(f, ": {message}")?;
        }
        if !self.raw_response_data.is_empty() {
            write!(f, "\n{}", self.raw_response_data)?;
        }
        Ok(())
    }
}

impl std::error::Error for RequestException {}

/// A successful exchange whose body could not be bound to the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeError {
    status_code: u16,
    url: String,
    path: String,
    message: String,
    raw_response_data: String,
}

impl DecodeError {
    /// Create a decode error.
    #[must_use]
    pub fn new(
        status_code: u16,
        url: impl Into<String>,
        path: impl Into<String>,
        message: impl Into<String>,
        raw_response_data: impl Into<String>,
    ) -> Self {
        Self {
            status_code,
            url: url.into(),
            path: path.into(),
            message: message.into(),
            raw_response_data: raw_response_data.into(),
        }
    }

    /// HTTP status code of the (successful) exchange.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        self.status_code
    }

    /// URL the request was sent to.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// JSON path where decoding stopped, `"."` for the document root.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Parser message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Response body as received.
    #[must_use]
    pub fn raw_response_data(&self) -> &str {
        &self.raw_response_data
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "failed to decode response from {} at '{}': {}",
            self.url, self.path, self.message
        )
    }
}

impl std::error::Error for DecodeError {}
