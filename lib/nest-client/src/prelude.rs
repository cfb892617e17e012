//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types for easy glob
//! importing:
//!
//! ```ignore
//! use nest_client::prelude::*;
//! ```

pub use crate::{
    ClientConfig, CrudService, Error, Header, HyperClient, MatchingOptions, Method, Middleware,
    Misuse, RequestBuilder, RequestException, Response, Result, Shape, SortOrder, StatusCode,
    Transport,
};
pub use serde::{Deserialize, Serialize};
