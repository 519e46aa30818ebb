//! HTTP ports: the transport the CLI sends requests through, and the
//! interception controls a test session drives.

use std::collections::BTreeMap;
use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};

use crate::error::PortError;

/// Boxed future type alias used by [`HttpTransport`] to keep the trait dyn-compatible.
pub type HttpFuture<'a> = Pin<Box<dyn Future<Output = Result<HttpResponse, PortError>> + Send + 'a>>;

/// An outgoing HTTP request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpRequest {
    /// Upper-case method name.
    pub method: String,
    /// Absolute URL including query string.
    pub url: String,
    /// Request headers.
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
    /// Request body, if any.
    #[serde(default)]
    pub body: Option<String>,
}

impl HttpRequest {
    /// Creates a request without headers or body.
    pub fn new(method: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            method: method.into().to_ascii_uppercase(),
            url: url.into(),
            headers: BTreeMap::new(),
            body: None,
        }
    }

    /// Sets the request body.
    #[must_use]
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Splits the URL into its scope (`scheme://host[:port]`) and path with query.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is not absolute.
    pub fn scope_and_path(&self) -> Result<(String, String), PortError> {
        let url = reqwest::Url::parse(&self.url)
            .map_err(|e| format!("invalid request URL {}: {e}", self.url))?;
        let host = url.host_str().ok_or_else(|| format!("request URL {} has no host", self.url))?;
        let scope = match url.port_or_known_default() {
            Some(port) => format!("{}://{host}:{port}", url.scheme()),
            None => format!("{}://{host}", url.scheme()),
        };
        let path = match url.query() {
            Some(query) => format!("{}?{query}", url.path()),
            None => url.path().to_string(),
        };
        Ok((scope, path))
    }
}

/// An HTTP response as seen by the CLI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpResponse {
    /// Status code.
    pub status: u16,
    /// Response headers.
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
    /// Response body.
    #[serde(default)]
    pub body: String,
}

/// How a recorded call matches the body of a replayed request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyMatcher {
    /// Any body, including none.
    Any,
    /// Exactly this body.
    Exact(String),
}

impl BodyMatcher {
    /// Returns `true` if `body` satisfies this matcher.
    #[must_use]
    pub fn matches(&self, body: Option<&str>) -> bool {
        match self {
            Self::Any => true,
            Self::Exact(expected) => body == Some(expected.as_str()),
        }
    }
}

/// A reconstructable description of one expected HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallDescriptor {
    /// `scheme://host:port` the call was made to.
    pub scope: String,
    /// Upper-case method name.
    pub method: String,
    /// Path including query string.
    pub path: String,
    /// Request body matcher; `None` means the request had no body.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<BodyMatcher>,
    /// Response status code.
    pub status: u16,
    /// Response headers.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, String>,
    /// Response body.
    #[serde(default)]
    pub response: String,
}

impl CallDescriptor {
    /// Builds a descriptor from a request and the response it received.
    ///
    /// # Errors
    ///
    /// Returns an error if the request URL is not absolute.
    pub fn from_exchange(request: &HttpRequest, response: &HttpResponse) -> Result<Self, PortError> {
        let (scope, path) = request.scope_and_path()?;
        Ok(Self {
            scope,
            method: request.method.clone(),
            path,
            body: request.body.clone().map(BodyMatcher::Exact),
            status: response.status,
            headers: response.headers.clone(),
            response: response.body.clone(),
        })
    }

    /// Returns `true` if this descriptor answers the request.
    #[must_use]
    pub fn matches(&self, scope: &str, path: &str, request: &HttpRequest) -> bool {
        self.scope == scope
            && self.path == path
            && self.method.eq_ignore_ascii_case(&request.method)
            && match &self.body {
                Some(matcher) => matcher.matches(request.body.as_deref()),
                None => request.body.as_deref().map_or(true, str::is_empty),
            }
    }

    /// The response this descriptor replays.
    #[must_use]
    pub fn to_response(&self) -> HttpResponse {
        HttpResponse {
            status: self.status,
            headers: self.headers.clone(),
            body: self.response.clone(),
        }
    }
}

/// One line of output from the interception recorder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedLine {
    /// A captured request/response pair.
    Exchange(CallDescriptor),
    /// Free-form diagnostic output that is not an exchange.
    Note(String),
}

/// Sends HTTP requests.
pub trait HttpTransport: Send + Sync {
    /// Sends the request and resolves to its response.
    ///
    /// Non-success status codes resolve to `Ok`; only transport failures are errors.
    fn send(&self, request: &HttpRequest) -> HttpFuture<'_>;
}

/// Controls an HTTP interception layer.
pub trait HttpInterception: Send + Sync {
    /// Starts intercepting requests.
    fn activate(&self);

    /// Stops intercepting requests and discards pending registrations.
    fn deactivate(&self);

    /// Returns `true` while interception is active.
    fn is_active(&self) -> bool;

    /// Starts capturing exchanges that pass through the layer.
    fn start_recording(&self);

    /// Stops capturing and returns everything captured since recording started.
    fn drain_recorded(&self) -> Vec<RecordedLine>;

    /// Registers an expected exchange to serve while active.
    fn register_scope(&self, descriptor: CallDescriptor);
}
