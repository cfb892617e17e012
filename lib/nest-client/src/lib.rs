//! Typed async client for Nest Utilities REST document APIs.
//!
//! Bind a model to a resource, chain query options and send over a pooled
//! hyper/rustls transport.
//!
//! # Example
//!
//! ```ignore
//! use nest_client::prelude::*;
//!
//! #[derive(Debug, Default, Serialize, Deserialize)]
//! pub struct Beer {
//!     name: String,
//!     abv: f32,
//! }
//!
//! let beers = CrudService::<Beer, _>::builder("api.example.com", "beers")
//!     .build(HyperClient::new());
//!
//! let strongest = beers
//!     .read()
//!     .sort_by("abv", SortOrder::Descending)
//!     .limit(3)
//!     .fetch()
//!     .await?;
//! ```
//!
//! See the [tutorial][_tutorial] for a complete guide.

pub mod _tutorial;
mod client;
mod config;
mod connector;
mod crud;
pub mod layers;
pub mod prelude;

// Re-export client types
pub use client::{BoxedService, HyperClient, HyperClientBuilder, ServiceFuture};
pub use config::{ClientConfig, ClientConfigBuilder, DEFAULT_USER_AGENT};
pub use crud::{CrudService, CrudServiceBuilder};

// Re-export tower for layer composition
pub use tower;

// Re-export core types
pub use nest_client_core::{
    APPLICATION_JSON, Body, CONTENT_TYPE_HEADER, DecodeError, Error, Header, METHOD_OVERRIDE_HEADER,
    MatchingOptions, Method, Middleware, Misuse, Outcome, QueryOption, Request, RequestBuilder,
    RequestException, RequestSpec, Response, Result, Shape, SortOrder, StatusCode,
    TRANSPORT_FAILURE_STATUS, ToQueryPairs, Transport, decode, encode_query, from_json,
    has_response_data, is_error_status, to_json,
};
