//! Transport trait.
//!
//! A [`Transport`] performs exactly one HTTP exchange. The request builder
//! never talks to the network itself; it hands a frozen [`Request`] to the
//! transport and classifies what comes back. `nest_client::HyperClient` is the
//! default implementation; tests plug in stubs.

use std::future::Future;
use std::sync::Arc;

use crate::{Request, Response, Result};

/// Performs one HTTP exchange.
///
/// # Example
///
/// ```
/// use std::collections::HashMap;
///
/// use nest_client_core::{Request, Response, Result, Transport};
///
/// #[derive(Clone)]
/// struct AlwaysEmpty;
///
/// impl Transport for AlwaysEmpty {
///     async fn exchange(&self, _request: Request) -> Result<Response> {
///         Ok(Response::new(204, HashMap::new(), ""))
///     }
/// }
/// ```
pub trait Transport: Send + Sync {
    /// Send `request` and return the status, headers and raw body.
    ///
    /// Any response with a status code is `Ok`, including 4xx and 5xx.
    ///
    /// # Errors
    ///
    /// Returns an error only when no response was received:
    /// - Network errors
    /// - TLS errors
    /// - Timeouts
    /// - Invalid request
    fn exchange(&self, request: Request) -> impl Future<Output = Result<Response>> + Send;
}

impl<T: Transport + ?Sized> Transport for Arc<T> {
    fn exchange(&self, request: Request) -> impl Future<Output = Result<Response>> + Send {
        (**self).exchange(request)
    }
}

impl<T: Transport + ?Sized> Transport for &T {
    fn exchange(&self, request: Request) -> impl Future<Output = Result<Response>> + Send {
        (**self).exchange(request)
    }
}
