use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::StatusCode;
use serde_json::Value;

/// Partial response. Every field left as `None` keeps the default value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResponseOverrides {
    pub status: Option<StatusCode>,
    pub status_text: Option<String>,
    pub ok: Option<bool>,
    pub headers: Option<HeaderMap>,
    pub url: Option<String>,
    pub text: Option<String>,
    pub json: Option<Value>,
    pub bytes: Option<Vec<u8>>,
}

impl ResponseOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(mut self, status: StatusCode) -> Self {
        self.status = Some(status);
        self
    }

    pub fn status_text(mut self, status_text: impl Into<String>) -> Self {
        self.status_text = Some(status_text.into());
        self
    }

    pub fn ok(mut self, ok: bool) -> Self {
        self.ok = Some(ok);
        self
    }

    pub fn headers(mut self, headers: HeaderMap) -> Self {
        self.headers = Some(headers);
        self
    }

    /// Adds one header on top of whatever `headers` already holds.
    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.get_or_insert_with(HeaderMap::new).insert(name, value);
        self
    }

    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn json(mut self, json: Value) -> Self {
        self.json = Some(json);
        self
    }

    pub fn bytes(mut self, bytes: impl Into<Vec<u8>>) -> Self {
        self.bytes = Some(bytes.into());
        self
    }

    /// Layers `over` on top of `self`, field by field. `over` wins.
    pub fn merge(self, over: ResponseOverrides) -> Self {
        Self {
            status: over.status.or(self.status),
            status_text: over.status_text.or(self.status_text),
            ok: over.ok.or(self.ok),
            headers: over.headers.or(self.headers),
            url: over.url.or(self.url),
            text: over.text.or(self.text),
            json: over.json.or(self.json),
            bytes: over.bytes.or(self.bytes),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
