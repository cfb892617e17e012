//! HTTP request description.
//!
//! A [`RequestSpec`] accumulates everything about one pending call while the
//! builder chain runs; [`RequestSpec::build`] freezes it into the [`Request`]
//! handed to a [`crate::Transport`].
//!
//! # Example
//!
//! ```
//! use nest_client_core::{Method, RequestSpec};
//!
//! let mut spec = RequestSpec::new(Method::Get, "https://api.example.com/beers");
//! spec.push_query("sort[]", "-name");
//! spec.push_query("limit", "10");
//!
//! let request = spec.build().expect("valid request");
//! assert_eq!(
//!     request.url().as_str(),
//!     "https://api.example.com/beers?sort[]=-name&limit=10"
//! );
//! assert_eq!(request.header("X-HTTP-Method-Override"), Some("GET"));
//! ```

use std::collections::HashMap;

use bytes::Bytes;

use crate::{Body, Method, Result, encode_query};

/// Header carrying the verb for intermediaries that drop non-GET/POST methods.
pub const METHOD_OVERRIDE_HEADER: &str = "X-HTTP-Method-Override";

/// Header carrying the body content type.
pub const CONTENT_TYPE_HEADER: &str = "Content-Type";

pub(crate) fn find_header<'a>(headers: &'a HashMap<String, String>, name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
        .map(|(_, value)| value.as_str())
}

// ============================================================================
// Request Spec
// ============================================================================

/// Mutable description of one pending call.
///
/// The method, base URL and body are fixed at construction; query pairs and
/// headers accumulate afterwards. Query pairs keep insertion order and may
/// repeat a name; headers keep the last value written per name.
#[derive(Debug, Clone)]
pub struct RequestSpec {
    method: Method,
    base_url: String,
    query: Vec<(String, String)>,
    headers: HashMap<String, String>,
    body: Option<Body>,
}

impl RequestSpec {
    /// Creates a spec without body.
    #[must_use]
    pub fn new(method: Method, base_url: impl Into<String>) -> Self {
        let mut headers = HashMap::new();
        headers.insert(METHOD_OVERRIDE_HEADER.to_string(), method.to_string());
        Self {
            method,
            base_url: base_url.into(),
            query: Vec::new(),
            headers,
            body: None,
        }
    }

    /// Creates a spec carrying a body.
    #[must_use]
    pub fn with_body(method: Method, base_url: impl Into<String>, body: Body) -> Self {
        let mut spec = Self::new(method, base_url);
        spec.set_header(CONTENT_TYPE_HEADER, body.content_type());
        spec.body = Some(body);
        spec
    }

    /// HTTP method.
    #[must_use]
    pub const fn method(&self) -> Method {
        self.method
    }

    /// URL without query string.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Accumulated query pairs, in insertion order.
    #[must_use]
    pub fn query(&self) -> &[(String, String)] {
        &self.query
    }

    /// Accumulated headers.
    #[must_use]
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Request body.
    #[must_use]
    pub const fn body(&self) -> Option<&Body> {
        self.body.as_ref()
    }

    /// Appends a query pair.
    pub fn push_query(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.query.push((name.into(), value.into()));
    }

    /// Appends query pairs, in order.
    pub fn extend_query(&mut self, pairs: impl IntoIterator<Item = (String, String)>) {
        self.query.extend(pairs);
    }

    /// Header value by name, ignoring ASCII case.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }

    /// Sets a header, replacing any previous value for the same name.
    ///
    /// Names compare ignoring ASCII case; the spelling of the last write is
    /// kept.
    pub fn set_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        self.headers
            .retain(|existing, _| !existing.eq_ignore_ascii_case(&name));
        self.headers.insert(name, value.into());
    }

    /// Full URL with the encoded query string appended.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL cannot be parsed.
    pub fn url(&self) -> Result<url::Url> {
        let mut url = url::Url::parse(&self.base_url)?;
        if !self.query.is_empty() {
            let encoded = encode_query(&self.query);
            let query = match url.query() {
                Some(existing) if !existing.is_empty() => format!("{existing}&{encoded}"),
                _ => encoded,
            };
            url.set_query(Some(&query));
        }
        Ok(url)
    }

    /// Freeze the spec into a [`Request`].
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL cannot be parsed.
    pub fn build(self) -> Result<Request> {
        let url = self.url()?;
        Ok(Request {
            method: self.method,
            url,
            headers: self.headers,
            body: self.body.map(Body::into_bytes),
        })
    }
}

// ============================================================================
// Request
// ============================================================================

/// An HTTP request with method, URL, headers, and optional body.
#[derive(Debug, Clone)]
pub struct Request {
    method: Method,
    url: url::Url,
    headers: HashMap<String, String>,
    body: Option<Bytes>,
}

impl Request {
    /// Assemble a request from its parts.
    #[must_use]
    pub fn from_parts(
        method: Method,
        url: url::Url,
        headers: HashMap<String, String>,
        body: Option<Bytes>,
    ) -> Self {
        Self {
            method,
            url,
            headers,
            body,
        }
    }

    /// HTTP method.
    #[must_use]
    pub const fn method(&self) -> Method {
        self.method
    }

    /// Request URL.
    #[must_use]
    pub fn url(&self) -> &url::Url {
        &self.url
    }

    /// Request headers.
    #[must_use]
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Mutable access to headers.
    #[must_use]
    pub fn headers_mut(&mut self) -> &mut HashMap<String, String> {
        &mut self.headers
    }

    /// Single header value by name, ignoring ASCII case.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }

    /// Request body.
    #[must_use]
    pub const fn body(&self) -> Option<&Bytes> {
        self.body.as_ref()
    }

    /// Consume into (method, url, headers, body).
    #[must_use]
    pub fn into_parts(self) -> (Method, url::Url, HashMap<String, String>, Option<Bytes>) {
        (self.method, self.url, self.headers, self.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spec_sets_method_override() {
        let spec = RequestSpec::new(Method::Delete, "https://api.example.com/beers/1");
        assert_eq!(
            spec.headers().get(METHOD_OVERRIDE_HEADER).map(String::as_str),
            Some("DELETE")
        );
        assert!(spec.body().is_none());
        assert!(!spec.headers().contains_key(CONTENT_TYPE_HEADER));
    }

    #[test]
    fn spec_with_body_sets_content_type() {
        let spec = RequestSpec::with_body(
            Method::Post,
            "https://api.example.com/beers",
            Body::raw_json(r#"{"name":"Tripel"}"#),
        );
        let request = spec.build().expect("request");

        assert_eq!(request.method(), Method::Post);
        assert_eq!(request.header(CONTENT_TYPE_HEADER), Some("application/json"));
        assert_eq!(request.header(METHOD_OVERRIDE_HEADER), Some("POST"));
        assert_eq!(
            request.body().map(Bytes::as_ref),
            Some(br#"{"name":"Tripel"}"#.as_ref())
        );
    }

    #[test]
    fn query_keeps_order_and_duplicates() {
        let mut spec = RequestSpec::new(Method::Get, "https://api.example.com/beers");
        spec.push_query("sort[]", "name");
        spec.push_query("limit", "5");
        spec.push_query("sort[]", "-abv");

        let url = spec.url().expect("url");
        assert_eq!(url.query(), Some("sort[]=name&limit=5&sort[]=-abv"));
    }

    #[test]
    fn query_appends_to_existing_query() {
        let mut spec = RequestSpec::new(Method::Get, "https://api.example.com/beers?lang=en");
        spec.extend_query([("limit".to_string(), "1".to_string())]);

        let url = spec.url().expect("url");
        assert_eq!(url.query(), Some("lang=en&limit=1"));
    }

    #[test]
    fn url_without_query() {
        let spec = RequestSpec::new(Method::Get, "https://api.example.com/beers");
        let url = spec.url().expect("url");
        assert_eq!(url.as_str(), "https://api.example.com/beers");
        assert_eq!(url.query(), None);
    }

    #[test]
    fn headers_last_write_wins() {
        let mut spec = RequestSpec::new(Method::Get, "https://api.example.com");
        spec.set_header("Authorization", "first");
        spec.set_header("Authorization", "second");
        assert_eq!(
            spec.headers().get("Authorization").map(String::as_str),
            Some("second")
        );
    }

    #[test]
    fn headers_ignore_name_case() {
        let mut spec = RequestSpec::new(Method::Get, "https://api.example.com");
        spec.set_header("Authorization", "first");
        spec.set_header("authorization", "second");
        spec.set_header("x-http-method-override", "POST");

        assert_eq!(spec.headers().len(), 2);
        assert_eq!(spec.header("AUTHORIZATION"), Some("second"));
        assert_eq!(spec.header(METHOD_OVERRIDE_HEADER), Some("POST"));
        assert!(spec.headers().contains_key("authorization"));
        assert!(!spec.headers().contains_key(METHOD_OVERRIDE_HEADER));

        let request = spec.build().expect("request");
        assert_eq!(request.headers().len(), 2);
        assert_eq!(request.header("Authorization"), Some("second"));
    }

    #[test]
    fn invalid_base_url() {
        let spec = RequestSpec::new(Method::Get, "not a url");
        let err = spec.build().expect_err("invalid url");
        assert!(err.to_string().starts_with("invalid URL"));
    }

    #[test]
    fn request_into_parts() {
        let url = url::Url::parse("https://api.example.com/beers").expect("valid URL");
        let request = Request::from_parts(Method::Get, url, HashMap::new(), None);
        let (method, url, headers, body) = request.into_parts();
        assert_eq!(method, Method::Get);
        assert_eq!(url.path(), "/beers");
        assert!(headers.is_empty());
        assert!(body.is_none());
    }
}
