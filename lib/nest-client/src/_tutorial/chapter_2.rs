//! # Chapter 2: Errors & Middleware
//!
//! ## Failures
//!
//! | Situation | Error |
//! |-----------|-------|
//! | Status `>= 400` | [`Error::Request`](crate::Error::Request) with the status and raw body |
//! | No response at all | [`Error::Request`](crate::Error::Request) with status `0` |
//! | Success status, body does not match the model | [`Error::Decode`](crate::Error::Decode) |
//! | Builder used out of order | [`Error::Misuse`](crate::Error::Misuse) |
//!
//! An empty body on a success status is not an error: the model's
//! `Default` value is returned.
//!
//! ```ignore
//! match beers.read_one("missing").fetch().await {
//!     Ok(beer) => println!("{beer:?}"),
//!     Err(err) if err.is_not_found() => println!("no such beer"),
//!     Err(err) if err.is_transport_failure() => println!("backend unreachable: {err}"),
//!     Err(err) => {
//!         if let Some(raw) = err.raw_response_data() {
//!             println!("backend said: {raw}");
//!         }
//!     }
//! }
//! ```
//!
//! ## Middleware
//!
//! A [`Middleware`](crate::Middleware) attached to a service adds headers to
//! every request and is told about every HTTP or transport failure, once,
//! before the caller sees it.
//!
//! ```ignore
//! use std::sync::Arc;
//! use nest_client::prelude::*;
//!
//! struct Session {
//!     token: String,
//! }
//!
//! impl Middleware for Session {
//!     fn headers(&self) -> Vec<Header> {
//!         vec![Header::new("Authorization", format!("Bearer {}", self.token))]
//!     }
//!
//!     fn on_request_did_catch(&self, exception: &RequestException) {
//!         if exception.status_code() == 401 {
//!             tracing::warn!(url = exception.url(), "session expired");
//!         }
//!     }
//! }
//!
//! let beers = CrudService::<Beer, _>::builder("api.example.com", "beers")
//!     .middleware(Arc::new(Session { token }))
//!     .build(HyperClient::new());
//! ```
//!
//! ## Transport Layers
//!
//! Retries, logging and concurrency limits belong to the transport:
//!
//! ```ignore
//! let client = HyperClient::builder()
//!     .with_logging()
//!     .with_retry(2)
//!     .with_concurrency_limit(8)
//!     .build();
//! ```
//!
//! Only `GET`, `PUT` and `DELETE` are retried. A retried exchange is still a
//! single `send` and triggers the middleware hook at most once.
