//! Tower layers for [`crate::HyperClient`].
//!
//! These layers wrap the transport, below the request builder: they see every
//! exchange but not the decoded outcome. They are unrelated to
//! [`crate::Middleware`], which is attached to a service and observes
//! requests and failures at the builder level.
//!
//! # Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `layer-logging` | `.with_logging()` and `.with_debug_logging()` helpers |
//! | `layer-retry` | `.with_retry()` helper |
//! | `layer-concurrency` | `.with_concurrency_limit()` helper |
//! | `layers-full` | All of the above (default) |
//!
//! The layer types themselves are always available through
//! [`crate::HyperClientBuilder::layer`].
//!
//! # Example
//!
//! ```ignore
//! use nest_client::HyperClient;
//! use nest_client::layers::{ConcurrencyLimitLayer, LoggingLayer};
//!
//! let client = HyperClient::builder()
//!     .layer(LoggingLayer::new())
//!     .layer(ConcurrencyLimitLayer::new(8))
//!     .build();
//! ```

mod logging;
mod retry;

pub use logging::{LogLevel, Logging, LoggingLayer};
pub use retry::RetryPolicy;

pub use tower::limit::ConcurrencyLimitLayer;
pub use tower::retry::RetryLayer;
pub use tower::{Layer, ServiceBuilder};
