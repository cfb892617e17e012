//! CRUD service for one Nest resource.
//!
//! A [`CrudService`] binds a transport, a collection URL and an optional
//! [`Middleware`], and hands out one [`RequestBuilder`] per call. The builders
//! are returned unsent so that query options can still be chained:
//!
//! ```ignore
//! use nest_client::prelude::*;
//!
//! let beers = CrudService::<Beer, _>::builder("api.example.com", "beers")
//!     .build(HyperClient::new());
//!
//! let strongest = beers
//!     .read()
//!     .sort_by("abv", SortOrder::Descending)
//!     .limit(5)
//!     .fetch()
//!     .await?;
//! ```

use std::fmt::{self, Display};
use std::marker::PhantomData;
use std::sync::Arc;

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use serde::Serialize;

use crate::{Method, Middleware, RequestBuilder, Result, Shape, Transport};

/// Characters escaped in an id path segment. `,` stays literal since it
/// separates the ids of a multi-read.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'?')
    .add(b'{')
    .add(b'}')
    .add(b'/')
    .add(b'\\')
    .add(b'%');

/// Typed CRUD access to `{protocol}://{hostname}/{resource}`.
///
/// `M` is the model of one document.
pub struct CrudService<M, C> {
    transport: C,
    url: String,
    middleware: Option<Arc<dyn Middleware>>,
    _model: PhantomData<fn() -> M>,
}

impl<M, C: Clone> Clone for CrudService<M, C> {
    fn clone(&self) -> Self {
        Self {
            transport: self.transport.clone(),
            url: self.url.clone(),
            middleware: self.middleware.clone(),
            _model: PhantomData,
        }
    }
}

impl<M, C> fmt::Debug for CrudService<M, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CrudService")
            .field("url", &self.url)
            .field("has_middleware", &self.middleware.is_some())
            .finish_non_exhaustive()
    }
}

impl<M> CrudService<M, ()> {
    /// Start configuring a service for `resource` on `hostname`.
    ///
    /// `hostname` may carry a port, e.g. `localhost:3000`.
    #[must_use]
    pub fn builder(hostname: impl Into<String>, resource: impl Into<String>) -> CrudServiceBuilder<M> {
        CrudServiceBuilder::new(hostname, resource)
    }
}

impl<M, C> CrudService<M, C>
where
    C: Transport + Clone,
{
    /// Create an `https` service without middleware.
    #[must_use]
    pub fn new(transport: C, hostname: impl Into<String>, resource: impl Into<String>) -> Self {
        CrudServiceBuilder::new(hostname, resource).build(transport)
    }

    /// Collection URL, without trailing slash.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Attached middleware.
    #[must_use]
    pub fn middleware(&self) -> Option<&Arc<dyn Middleware>> {
        self.middleware.as_ref()
    }

    /// Transport shared by every request.
    #[must_use]
    pub const fn transport(&self) -> &C {
        &self.transport
    }

    fn request<T>(&self, method: Method, url: String) -> RequestBuilder<T, C> {
        RequestBuilder::new(self.transport.clone(), method, url)
            .maybe_middleware(self.middleware.clone())
    }

    fn item_url(&self, id: impl Display) -> String {
        let id = id.to_string();
        format!("{}/{}", self.url, utf8_percent_encode(&id, PATH_SEGMENT))
    }

    /// List the collection: `GET {url}`.
    #[must_use]
    pub fn read(&self) -> RequestBuilder<Vec<M>, C> {
        self.request(Method::Get, self.url.clone())
            .shape(Shape::Array)
    }

    /// Read one document: `GET {url}/{id}`.
    #[must_use]
    pub fn read_one(&self, id: impl Display) -> RequestBuilder<M, C> {
        self.request(Method::Get, self.item_url(id))
    }

    /// Read several documents at once: `GET {url}/{id1},{id2},...`.
    #[must_use]
    pub fn read_many<I>(&self, ids: I) -> RequestBuilder<Vec<M>, C>
    where
        I: IntoIterator,
        I::Item: Display,
    {
        let ids = ids
            .into_iter()
            .map(|id| utf8_percent_encode(&id.to_string(), PATH_SEGMENT).to_string())
            .collect::<Vec<_>>()
            .join(",");
        self.request(Method::Get, format!("{}/{ids}", self.url))
            .shape(Shape::Array)
    }

    /// Delete one document: `DELETE {url}/{id}`.
    #[must_use]
    pub fn delete(&self, id: impl Display) -> RequestBuilder<M, C> {
        self.request(Method::Delete, self.item_url(id))
    }
}

impl<M, C> CrudService<M, C>
where
    M: Serialize,
    C: Transport + Clone,
{
    /// Create a document: `POST {url}` with `model` as JSON body.
    ///
    /// # Errors
    ///
    /// Returns an error if the model cannot be serialized.
    pub fn create(&self, model: &M) -> Result<RequestBuilder<M, C>> {
        self.with_body(Method::Post, model)
    }

    /// Update a document: `PUT {url}` with `model` as JSON body.
    ///
    /// The document is identified by the id carried in the model.
    ///
    /// # Errors
    ///
    /// Returns an error if the model cannot be serialized.
    pub fn update(&self, model: &M) -> Result<RequestBuilder<M, C>> {
        self.with_body(Method::Put, model)
    }

    fn with_body(&self, method: Method, model: &M) -> Result<RequestBuilder<M, C>> {
        let builder =
            RequestBuilder::with_json(self.transport.clone(), method, self.url.clone(), model)?;
        Ok(builder.maybe_middleware(self.middleware.clone()))
    }
}

// ============================================================================
// Builder
// ============================================================================

/// Builder for [`CrudService`].
pub struct CrudServiceBuilder<M> {
    hostname: String,
    resource: String,
    insecure: bool,
    middleware: Option<Arc<dyn Middleware>>,
    _model: PhantomData<fn() -> M>,
}

impl<M> fmt::Debug for CrudServiceBuilder<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CrudServiceBuilder")
            .field("hostname", &self.hostname)
            .field("resource", &self.resource)
            .field("insecure", &self.insecure)
            .field("has_middleware", &self.middleware.is_some())
            .finish()
    }
}

impl<M> CrudServiceBuilder<M> {
    /// Create a builder for `resource` on `hostname`, using `https`.
    #[must_use]
    pub fn new(hostname: impl Into<String>, resource: impl Into<String>) -> Self {
        Self {
            hostname: hostname.into(),
            resource: resource.into(),
            insecure: false,
            middleware: None,
            _model: PhantomData,
        }
    }

    /// Use plain `http` instead of `https`.
    #[must_use]
    pub const fn insecure(mut self, insecure: bool) -> Self {
        self.insecure = insecure;
        self
    }

    /// Attach a middleware to every request of the service.
    #[must_use]
    pub fn middleware(mut self, middleware: Arc<dyn Middleware>) -> Self {
        self.middleware = Some(middleware);
        self
    }

    /// Collection URL the service will use.
    #[must_use]
    pub fn url(&self) -> String {
        let protocol = if self.insecure { "http" } else { "https" };
        format!(
            "{protocol}://{}/{}",
            self.hostname.trim_end_matches('/'),
            self.resource.trim_matches('/')
        )
    }

    /// Build the service over `transport`.
    #[must_use]
    pub fn build<C: Transport + Clone>(self, transport: C) -> CrudService<M, C> {
        CrudService {
            url: self.url(),
            transport,
            middleware: self.middleware,
            _model: PhantomData,
        }
    }
}
