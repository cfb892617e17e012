//! HTTP verbs understood by a Nest Utilities backend.

use derive_more::Display;

/// HTTP request method.
///
/// The display form is the uppercase verb, which is also what gets sent in
/// the `X-HTTP-Method-Override` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Method {
    /// GET method - read one or more documents.
    #[display("GET")]
    Get,
    /// POST method - create a document.
    #[display("POST")]
    Post,
    /// PATCH method - partially update a document.
    #[display("PATCH")]
    Patch,
    /// PUT method - replace a document.
    #[display("PUT")]
    Put,
    /// DELETE method - remove a document.
    #[display("DELETE")]
    Delete,
}

impl Method {
    /// Uppercase verb name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Patch => "PATCH",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }

    /// Returns `true` if sending the same request twice has the same effect as once.
    #[must_use]
    pub const fn is_idempotent(&self) -> bool {
        matches!(self, Self::Get | Self::Put | Self::Delete)
    }
}

impl From<Method> for http::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => Self::GET,
            Method::Post => Self::POST,
            Method::Patch => Self::PATCH,
            Method::Put => Self::PUT,
            Method::Delete => Self::DELETE,
        }
    }
}

impl TryFrom<http::Method> for Method {
    type Error = crate::Error;

    fn try_from(method: http::Method) -> Result<Self, Self::Error> {
        match method {
            http::Method::GET => Ok(Self::Get),
            http::Method::POST => Ok(Self::Post),
            http::Method::PATCH => Ok(Self::Patch),
            http::Method::PUT => Ok(Self::Put),
            http::Method::DELETE => Ok(Self::Delete),
            other => Err(crate::Error::InvalidRequest(format!(
                "unsupported HTTP method: {other}"
            ))),
        }
    }
}
