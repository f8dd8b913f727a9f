use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::response::ResponseOverrides;

pub const DEFAULT_STATUS_TEXT: &str = "OK";
pub const DEFAULT_TEXT: &str = "dummy text";

/// Simulated server response handed to the code under test.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub status: StatusCode,
    pub status_text: String,
    /// Independent of `status`: a 404 override still reports `ok == true`
    /// unless `ok` is overridden too.
    pub ok: bool,
    pub headers: HeaderMap,
    pub url: String,
    text: String,
    json: Value,
    bytes: Vec<u8>,
}

impl Response {
    pub fn with_defaults(url: impl Into<String>) -> Self {
        Self {
            status: StatusCode::OK,
            status_text: DEFAULT_STATUS_TEXT.to_string(),
            ok: true,
            headers: HeaderMap::new(),
            url: url.into(),
            text: DEFAULT_TEXT.to_string(),
            json: Value::Object(Map::new()),
            bytes: Vec::new(),
        }
    }

    /// Default response for `url` with `overrides` applied on top.
    pub fn build(url: impl Into<String>, overrides: ResponseOverrides) -> Self {
        let defaults = Self::with_defaults(url);
        Self {
            status: overrides.status.unwrap_or(defaults.status),
            status_text: overrides.status_text.unwrap_or(defaults.status_text),
            ok: overrides.ok.unwrap_or(defaults.ok),
            headers: overrides.headers.unwrap_or(defaults.headers),
            url: overrides.url.unwrap_or(defaults.url),
            text: overrides.text.unwrap_or(defaults.text),
            json: overrides.json.unwrap_or(defaults.json),
            bytes: overrides.bytes.unwrap_or(defaults.bytes),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn json_value(&self) -> &Value {
        &self.json
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        T::deserialize(&self.json)
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}
