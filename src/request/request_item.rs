use std::time::SystemTime;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::Method;
use serde_json::Value;
use url::Url;

use crate::request::deferred::DeferredHandle;

/// Request options passed next to the resource. The mock stores them
/// untouched so tests can assert on what the code under test sent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestInit {
    pub method: Option<Method>,
    pub headers: HeaderMap,
    pub body: Option<String>,
}

impl RequestInit {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// JSON body, with the matching content type.
    pub fn json(self, value: &Value) -> Self {
        self.header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .body(value.to_string())
    }
}

/// One simulated request that is still waiting for a response.
#[derive(Debug, Clone)]
pub struct RequestRecord {
    pub resource: String,
    pub init: Option<RequestInit>,
    pub deferred: DeferredHandle,
    pub requested_at: SystemTime,
}

impl RequestRecord {
    pub fn new(resource: String, init: Option<RequestInit>, deferred: DeferredHandle) -> Self {
        Self { resource, init, deferred, requested_at: SystemTime::now() }
    }

    // 方法默认 GET
    pub fn method(&self) -> Method {
        self.init
            .as_ref()
            .and_then(|init| init.method.clone())
            .unwrap_or(Method::GET)
    }

    /// Parses `resource` as an absolute URL. Relative resources yield an error.
    pub fn parsed_url(&self) -> Result<Url, url::ParseError> {
        Url::parse(&self.resource)
    }
}

/// A single call to the mocked fetch, as recorded in the call log.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchCall {
    pub resource: String,
    pub init: Option<RequestInit>,
}
