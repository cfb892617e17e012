//! Fluent request builder.
//!
//! A [`RequestBuilder`] collects query options and headers through chained
//! calls, then [`send`](RequestBuilder::send)s exactly one request and keeps
//! the [`Outcome`] for later inspection.
//!
//! # Lifecycle
//!
//! ```text
//! Building ──send()──▶ Sent ──exchange done──▶ Resolved
//!   │ chain methods        │                      │ response(), raw_response(),
//!   │ append               │                      │ into_response(), outcome()
//! ```
//!
//! - `send` on a builder that is not in `Building` fails with
//!   [`Misuse::AlreadySent`] and performs no exchange.
//! - Accessors before the exchange completed fail with [`Misuse::NotSent`].
//! - A chain method called after `send` is not applied; the builder is marked
//!   and every later `send` or accessor fails with [`Misuse::ModifiedAfterSend`].
//!
//! # Example
//!
//! ```ignore
//! let mut request = RequestBuilder::<Vec<Beer>, _>::new(client, Method::Get, url)
//!     .shape(Shape::Array)
//!     .populate(["brewers"])
//!     .sort_by("name", SortOrder::Descending)
//!     .limit(10);
//!
//! let beers = request.send().await?;
//! println!("{} beers, raw: {}", beers.len(), request.raw_response()?);
//! ```

use std::fmt;
use std::mem;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use serde::de::DeserializeOwned;
use tracing::{Instrument, debug, info_span, warn};

use crate::{
    Body, MatchingOptions, Method, Middleware, Misuse, Outcome, QueryOption, RequestSpec, Result,
    Shape, SortOrder, ToQueryPairs, Transport,
};

enum State<T> {
    Building(RequestSpec),
    Sent,
    Resolved(Outcome<T>),
}

impl<T> State<T> {
    const fn name(&self) -> &'static str {
        match self {
            Self::Building(_) => "building",
            Self::Sent => "sent",
            Self::Resolved(_) => "resolved",
        }
    }
}

/// Builder for one request whose response decodes into `T`.
///
/// `C` is the [`Transport`] that performs the exchange.
pub struct RequestBuilder<T, C> {
    transport: C,
    middleware: Option<Arc<dyn Middleware>>,
    shape: Shape,
    state: State<T>,
    modified_after_send: bool,
}

impl<T, C> fmt::Debug for RequestBuilder<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestBuilder")
            .field("shape", &self.shape)
            .field("state", &self.state.name())
            .field("has_middleware", &self.middleware.is_some())
            .finish_non_exhaustive()
    }
}

impl<T, C> RequestBuilder<T, C> {
    /// Creates a builder for a request without body.
    #[must_use]
    pub fn new(transport: C, method: Method, url: impl Into<String>) -> Self {
        Self::from_spec(transport, RequestSpec::new(method, url))
    }

    /// Creates a builder whose body is `model` serialized as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the model cannot be serialized.
    pub fn with_json<M: serde::Serialize + ?Sized>(
        transport: C,
        method: Method,
        url: impl Into<String>,
        model: &M,
    ) -> Result<Self> {
        let body = Body::json(model)?;
        Ok(Self::from_spec(
            transport,
            RequestSpec::with_body(method, url, body),
        ))
    }

    /// Creates a builder whose body is preformatted JSON text, sent as is.
    #[must_use]
    pub fn with_raw_body(
        transport: C,
        method: Method,
        url: impl Into<String>,
        raw_body: impl Into<String>,
    ) -> Self {
        let body = Body::raw_json(raw_body.into());
        Self::from_spec(transport, RequestSpec::with_body(method, url, body))
    }

    /// Creates a builder from an existing spec.
    #[must_use]
    pub fn from_spec(transport: C, spec: RequestSpec) -> Self {
        Self {
            transport,
            middleware: None,
            shape: Shape::Object,
            state: State::Building(spec),
            modified_after_send: false,
        }
    }

    // ========================================================================
    // Configuration
    // ========================================================================

    /// Attach a middleware.
    #[must_use]
    pub fn middleware(mut self, middleware: Arc<dyn Middleware>) -> Self {
        self.middleware = Some(middleware);
        self
    }

    /// Attach a middleware if there is one.
    #[must_use]
    pub fn maybe_middleware(mut self, middleware: Option<Arc<dyn Middleware>>) -> Self {
        self.middleware = middleware;
        self
    }

    /// Set the expected shape of the response body.
    ///
    /// The default, [`Shape::Object`], puts no constraint on the top-level
    /// JSON value and leaves the check to `T`, so a `Vec<_>` target still
    /// decodes an array. [`Shape::Array`] additionally rejects any body that is
    /// not a top-level array, whatever `T` accepts.
    #[must_use]
    pub const fn shape(mut self, shape: Shape) -> Self {
        self.shape = shape;
        self
    }

    /// Expected shape of the response body.
    #[must_use]
    pub const fn expected_shape(&self) -> Shape {
        self.shape
    }

    /// The pending spec, while the builder is still building.
    #[must_use]
    pub const fn spec(&self) -> Option<&RequestSpec> {
        match &self.state {
            State::Building(spec) => Some(spec),
            _ => None,
        }
    }

    /// Returns `true` once `send` was called.
    #[must_use]
    pub const fn is_sent(&self) -> bool {
        !matches!(self.state, State::Building(_))
    }

    // ========================================================================
    // Chain methods
    // ========================================================================

    fn edit(mut self, apply: impl FnOnce(&mut RequestSpec)) -> Self {
        match &mut self.state {
            State::Building(spec) => apply(spec),
            state => {
                warn!(state = state.name(), "request modified after it was sent");
                self.modified_after_send = true;
            }
        }
        self
    }

    /// Append a query option.
    #[must_use]
    pub fn query(self, option: QueryOption) -> Self {
        self.edit(|spec| spec.extend_query(option.to_query_pairs()))
    }

    /// Set a header, replacing any previous value for the same name.
    #[must_use]
    pub fn header(self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let (name, value) = (name.into(), value.into());
        self.edit(|spec| spec.set_header(name, value))
    }

    /// Populate references to other collections (`populate[]`).
    #[must_use]
    pub fn populate<I, S>(self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.query(QueryOption::Populate(
            fields.into_iter().map(Into::into).collect(),
        ))
    }

    /// Restrict the fields of the results (`select[]`).
    ///
    /// Nested fields are selected with dots, e.g. `brewers.name`.
    #[must_use]
    pub fn select<I, S>(self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.query(QueryOption::Select(
            fields.into_iter().map(Into::into).collect(),
        ))
    }

    /// Sort ascending on each field, in order (`sort[]`).
    #[must_use]
    pub fn sort<I, S>(self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.query(QueryOption::Sort(fields.into_iter().map(Into::into).collect()))
    }

    /// Sort on one field in the given direction.
    #[must_use]
    pub fn sort_by(self, field: impl Into<String>, order: SortOrder) -> Self {
        self.query(QueryOption::SortBy {
            field: field.into(),
            order,
        })
    }

    /// Match a field against an exact, case-sensitive value (`match[field]`).
    #[must_use]
    pub fn match_exact(self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.query(QueryOption::MatchExact {
            field: field.into(),
            value: value.into(),
        })
    }

    /// Match a field against a regular expression (`match[field][$regex]`).
    #[must_use]
    pub fn match_regex(self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.query(QueryOption::MatchRegex {
            field: field.into(),
            value: value.into(),
            options: None,
        })
    }

    /// Match a field against a regular expression with flags.
    ///
    /// Sends `match[field][$options]` before `match[field][$regex]`.
    #[must_use]
    pub fn match_regex_with(
        self,
        field: impl Into<String>,
        value: impl Into<String>,
        options: MatchingOptions,
    ) -> Self {
        self.query(QueryOption::MatchRegex {
            field: field.into(),
            value: value.into(),
            options: Some(options),
        })
    }

    /// Skip the first `amount` results. Not validated.
    #[must_use]
    pub fn offset(self, amount: i64) -> Self {
        self.query(QueryOption::Offset(amount))
    }

    /// Return at most `amount` results. Not validated.
    #[must_use]
    pub fn limit(self, amount: i64) -> Self {
        self.query(QueryOption::Limit(amount))
    }

    /// Keep one result per distinct value of `field`; the first one according
    /// to the sort wins.
    #[must_use]
    pub fn distinct(self, field: impl Into<String>) -> Self {
        self.query(QueryOption::Distinct(field.into()))
    }

    /// Randomize the order of the results. The backend ignores `sort[]` then.
    #[must_use]
    pub fn random(self) -> Self {
        self.query(QueryOption::Random)
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    fn resolved(&self) -> Result<&Outcome<T>> {
        if self.modified_after_send {
            return Err(Misuse::ModifiedAfterSend.into());
        }
        match &self.state {
            State::Resolved(outcome) => Ok(outcome),
            State::Building(_) | State::Sent => Err(Misuse::NotSent.into()),
        }
    }

    /// Outcome of the exchange, once resolved.
    #[must_use]
    pub const fn outcome(&self) -> Option<&Outcome<T>> {
        match &self.state {
            State::Resolved(outcome) => Some(outcome),
            _ => None,
        }
    }

    /// Decoded response.
    ///
    /// Fails with the request or decode error if the exchange failed.
    pub fn response(&self) -> Result<&T> {
        self.resolved()?.as_result()
    }

    /// Response body as received.
    ///
    /// Also available when the body could not be decoded; fails with the
    /// request error if the exchange failed.
    pub fn raw_response(&self) -> Result<&str> {
        match self.resolved()? {
            Outcome::Failure(exception) => Err(exception.clone().into()),
            outcome => Ok(outcome.raw()),
        }
    }

    /// Take the decoded response.
    pub fn into_response(self) -> Result<T> {
        if self.modified_after_send {
            return Err(Misuse::ModifiedAfterSend.into());
        }
        match self.state {
            State::Resolved(outcome) => outcome.into_result(),
            State::Building(_) | State::Sent => Err(Misuse::NotSent.into()),
        }
    }
}

impl<T, C> RequestBuilder<T, C>
where
    T: DeserializeOwned + Default,
    C: Transport,
{
    /// Send the request and decode the response.
    ///
    /// Middleware headers are merged right before the exchange and replace
    /// builder headers of the same name, ignoring case. On an HTTP error or
    /// transport failure the middleware's
    /// [`on_request_did_catch`](Middleware::on_request_did_catch) runs once,
    /// after the outcome is stored and before the error is returned. A panic
    /// in the hook is caught and logged. Nothing is retried.
    ///
    /// # Errors
    ///
    /// - [`crate::Error::Request`] for status `0` or `>= 400`
    /// - [`crate::Error::Decode`] if a successful body does not match `T`
    /// - [`crate::Error::Misuse`] if the builder was already sent
    pub async fn send(&mut self) -> Result<&T> {
        if self.modified_after_send {
            return Err(Misuse::ModifiedAfterSend.into());
        }
        let mut spec = match mem::replace(&mut self.state, State::Sent) {
            State::Building(spec) => spec,
            state => {
                self.state = state;
                return Err(Misuse::AlreadySent.into());
            }
        };

        let middleware = self.middleware.as_deref();
        if let Some(middleware) = middleware {
            for header in middleware.headers() {
                let (name, value) = header.into_pair();
                spec.set_header(name, value);
            }
        }

        let method = spec.method();
        let url = spec
            .url()
            .map_or_else(|_| spec.base_url().to_string(), String::from);
        let shape = self.shape;
        let transport = &self.transport;
        let span = info_span!("nest_request", %method, %url);

        let outcome = async {
            debug!(
                query_pairs = spec.query().len(),
                headers = ?spec.headers().keys().collect::<Vec<_>>(),
                has_body = spec.body().is_some(),
                "sending request"
            );

            let exchange = match spec.build() {
                Ok(request) => transport.exchange(request).await,
                Err(err) => Err(err),
            };
            let outcome = Outcome::<T>::from_exchange(&url, shape, exchange);

            match &outcome {
                Outcome::Success { raw, .. } => {
                    debug!(body_len = raw.len(), "request completed");
                }
                Outcome::Failure(exception) => {
                    warn!(
                        status = exception.status_code(),
                        message = exception.message(),
                        "request failed"
                    );
                }
                Outcome::Undecodable(error) => {
                    warn!(path = error.path(), error = error.message(), "response not decodable");
                }
            }
            outcome
        }
        .instrument(span.clone())
        .await;

        self.state = State::Resolved(outcome);
        if let (Some(middleware), State::Resolved(Outcome::Failure(exception))) =
            (self.middleware.as_deref(), &self.state)
        {
            // The outcome is already stored when the hook runs.
            let notified = span.in_scope(|| {
                panic::catch_unwind(AssertUnwindSafe(|| middleware.on_request_did_catch(exception)))
            });
            if notified.is_err() {
                warn!(parent: &span, "on_request_did_catch panicked");
            }
        }
        self.response()
    }

    /// Send the request and take the decoded response.
    ///
    /// # Errors
    ///
    /// Same as [`send`](Self::send).
    pub async fn fetch(mut self) -> Result<T> {
        self.send().await?;
        self.into_response()
    }
}
