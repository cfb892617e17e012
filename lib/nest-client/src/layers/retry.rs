//! Retry policy for idempotent exchanges.
//!
//! The request builder never retries on its own. This policy runs below it,
//! at the transport level, so a retried request is still one `send` and at
//! most one middleware notification.

use std::future;

use tower::retry::Policy;

use crate::{Error, Request, Response};

/// Retry policy for [`tower::retry::RetryLayer`].
///
/// Only idempotent methods (`GET`, `PUT`, `DELETE`) are retried, on:
/// - Connection errors and timeouts
/// - 5xx server errors
/// - 429 Too Many Requests
///
/// `POST` and `PATCH` are sent once.
///
/// # Example
///
/// ```ignore
/// use nest_client::layers::RetryPolicy;
/// use tower::retry::RetryLayer;
///
/// let client = HyperClient::builder()
///     .layer(RetryLayer::new(RetryPolicy::new(3)))
///     .build();
/// ```
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    remaining: u32,
}

impl RetryPolicy {
    /// Create a policy allowing at most `max_retries` retries per request.
    #[must_use]
    pub fn new(max_retries: u32) -> Self {
        Self {
            remaining: max_retries,
        }
    }

    /// Retries left.
    #[must_use]
    pub const fn remaining(&self) -> u32 {
        self.remaining
    }

    fn should_retry_response(response: &Response) -> bool {
        let status = response.status();
        status >= 500 || status == 429
    }

    fn should_retry_error(error: &Error) -> bool {
        error.is_connection() || error.is_timeout()
    }
}

impl Policy<Request, Response, Error> for RetryPolicy {
    type Future = future::Ready<()>;

    fn retry(
        &mut self,
        request: &mut Request,
        result: &mut Result<Response, Error>,
    ) -> Option<Self::Future> {
        if self.remaining == 0 || !request.method().is_idempotent() {
            return None;
        }

        let should_retry = match result {
            Ok(response) => Self::should_retry_response(response),
            Err(error) => Self::should_retry_error(error),
        };

        if should_retry {
            self.remaining -= 1;
            tracing::debug!(
                method = %request.method(),
                remaining = self.remaining,
                "retrying request"
            );
            Some(future::ready(()))
        } else {
            None
        }
    }

    fn clone_request(&mut self, request: &Request) -> Option<Request> {
        request
            .method()
            .is_idempotent()
            .then(|| request.clone())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use url::Url;

    use super::*;
    use crate::Method;

    fn request(method: Method) -> Request {
        let url = Url::parse("https://api.example.com/beers").expect("valid URL");
        Request::from_parts(method, url, HashMap::new(), None)
    }

    fn response(status: u16) -> Result<Response, Error> {
        Ok(Response::new(status, HashMap::default(), ""))
    }

    #[test]
    fn retries_5xx_and_429() {
        for status in [500, 503, 429] {
            assert!(RetryPolicy::should_retry_response(&Response::new(
                status,
                HashMap::default(),
                ""
            )));
        }
    }

    #[test]
    fn does_not_retry_client_errors_or_success() {
        for status in [200, 204, 400, 404] {
            assert!(!RetryPolicy::should_retry_response(&Response::new(
                status,
                HashMap::default(),
                ""
            )));
        }
    }

    #[test]
    fn retries_connection_and_timeout_errors() {
        assert!(RetryPolicy::should_retry_error(&Error::connection(
            "connection refused"
        )));
        assert!(RetryPolicy::should_retry_error(&Error::Timeout));
        assert!(!RetryPolicy::should_retry_error(&Error::invalid_request(
            "bad header"
        )));
    }

    #[test]
    fn idempotent_requests_consume_budget() {
        let mut policy = RetryPolicy::new(1);
        let mut get = request(Method::Get);

        assert!(policy.retry(&mut get, &mut response(503)).is_some());
        assert_eq!(policy.remaining(), 0);
        assert!(policy.retry(&mut get, &mut response(503)).is_none());
    }

    #[test]
    fn non_idempotent_requests_are_never_retried() {
        let mut policy = RetryPolicy::new(3);
        for method in [Method::Post, Method::Patch] {
            let mut request = request(method);
            assert!(policy.clone_request(&request).is_none());
            assert!(policy.retry(&mut request, &mut response(503)).is_none());
        }
        assert_eq!(policy.remaining(), 3);
    }
}
