//! Request middleware.
//!
//! A [`Middleware`] is handed to every request a service builds. It can add
//! headers right before a request is sent and observe every request that ends
//! with an HTTP error or a transport failure. It cannot change the method,
//! URL or body.
//!
//! # Example
//!
//! ```
//! use nest_client_core::{Header, Middleware, RequestException};
//!
//! struct ApiKey(String);
//!
//! impl Middleware for ApiKey {
//!     fn headers(&self) -> Vec<Header> {
//!         vec![Header::new("X-Api-Key", self.0.clone())]
//!     }
//!
//!     fn on_request_did_catch(&self, exception: &RequestException) {
//!         if exception.status_code() == 401 {
//!             // refresh the key, notify the user, ...
//!         }
//!     }
//! }
//! ```

use crate::RequestException;

/// A header contributed by a [`Middleware`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Header {
    name: String,
    value: String,
}

impl Header {
    /// Create a header.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Header name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Header value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Consume into `(name, value)`.
    #[must_use]
    pub fn into_pair(self) -> (String, String) {
        (self.name, self.value)
    }
}

/// Hooks invoked by [`crate::RequestBuilder::send`].
///
/// Both hooks default to no-ops. A middleware is shared by every request of a
/// service, possibly from several tasks at once, so hooks take `&self`.
pub trait Middleware: Send + Sync {
    /// Headers added to every request, after the headers set by the builder.
    ///
    /// Called once per request, right before it is sent. A header returned here
    /// replaces a builder header of the same name.
    fn headers(&self) -> Vec<Header> {
        Vec::new()
    }

    /// Called once for every request that failed with an HTTP error status or a
    /// transport failure, before the error is returned to the caller.
    ///
    /// Not called for decode errors.
    fn on_request_did_catch(&self, exception: &RequestException) {
        let _ = exception;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Silent;

    impl Middleware for Silent {}

    #[test]
    fn default_hooks_are_no_ops() {
        let middleware = Silent;
        assert!(middleware.headers().is_empty());
        middleware.on_request_did_catch(&RequestException::new(500, "u", ""));
    }

    #[test]
    fn header_accessors() {
        let header = Header::new("X-Api-Key", "secret");
        assert_eq!(header.name(), "X-Api-Key");
        assert_eq!(header.value(), "secret");
        assert_eq!(
            header.into_pair(),
            ("X-Api-Key".to_string(), "secret".to_string())
        );
    }
}
