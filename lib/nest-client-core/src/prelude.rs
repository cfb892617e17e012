//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types and functions
//! for easy glob importing:
//!
//! ```ignore
//! use nest_client_core::prelude::*;
//! ```

pub use crate::{
    Error, Header, MatchingOptions, Method, Middleware, Misuse, Outcome, RequestBuilder,
    RequestException, Response, Result, Shape, SortOrder, Transport,
};
