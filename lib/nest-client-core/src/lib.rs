//! Core types and traits for the nest-client query builder.
//!
//! This crate provides everything needed to describe, send and decode a call
//! against a Nest Utilities REST backend, independently of the HTTP stack:
//! - [`RequestBuilder`] - Fluent query builder with a single-send lifecycle
//! - [`QueryOption`] and [`encode_query`] - Nest query vocabulary and encoding
//! - [`RequestSpec`] and [`Request`] - Pending and frozen HTTP requests
//! - [`Response`] - Status, headers and raw body of one exchange
//! - [`Transport`] - Trait performing one HTTP exchange
//! - [`Middleware`] - Header and failure hooks shared by a service
//! - [`Outcome`] and [`Shape`] - Response classification and decoding
//! - [`Error`], [`RequestException`], [`DecodeError`] and [`Misuse`] - Failures
//! - [`StatusCode`] - HTTP status codes (re-exported from `http` crate)

mod body;
mod builder;
mod client;
mod decode;
mod error;
mod exception;
mod method;
mod middleware;
pub mod prelude;
mod query;
mod request;
mod response;

pub use body::{APPLICATION_JSON, Body, from_json, to_json};
pub use builder::RequestBuilder;
pub use client::Transport;
pub use decode::{Outcome, Shape, decode, has_response_data};
pub use error::{Error, Misuse, Result};
pub use exception::{DecodeError, RequestException, TRANSPORT_FAILURE_STATUS, is_error_status};
pub use method::Method;
pub use middleware::{Header, Middleware};
pub use query::{MatchingOptions, QueryOption, SortOrder, ToQueryPairs, encode_query};
pub use request::{CONTENT_TYPE_HEADER, METHOD_OVERRIDE_HEADER, Request, RequestSpec};
pub use response::Response;

// Re-export http crate status codes
pub use http::StatusCode;
