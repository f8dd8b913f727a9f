use std::any::{type_name, Any};
use std::fmt;

use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MockFetchError {
    /// 队列为空，或者 selector 没有匹配到任何请求
    #[error("No request to respond to!")]
    NoPendingRequest,
}

pub type Result<T> = std::result::Result<T, MockFetchError>;

/// Payload delivered through a request's failure channel.
///
/// Whatever value the test hands to `mock_error` is kept as-is and can be
/// recovered with [`Rejection::downcast`]. Nothing is converted or wrapped.
pub struct Rejection {
    payload: Box<dyn Any + Send>,
    type_name: &'static str,
}

impl Rejection {
    pub fn new<T: Any + Send>(payload: T) -> Self {
        Self { payload: Box::new(payload), type_name: type_name::<T>() }
    }

    pub fn is<T: Any>(&self) -> bool {
        self.payload.is::<T>()
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.payload.downcast_ref::<T>()
    }

    /// Takes the payload back out. On a type mismatch the rejection is
    /// returned untouched.
    pub fn downcast<T: Any>(self) -> std::result::Result<T, Self> {
        let type_name = self.type_name;
        match self.payload.downcast::<T>() {
            Ok(payload) => Ok(*payload),
            Err(payload) => Err(Self { payload, type_name }),
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }
}

// 默认是一个空对象 `{}`
impl Default for Rejection {
    fn default() -> Self {
        Self::new(Value::Object(Map::new()))
    }
}

impl fmt::Debug for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(value) = self.downcast_ref::<Value>() {
            return f.debug_tuple("Rejection").field(value).finish();
        }
        f.debug_tuple("Rejection").field(&self.type_name).finish()
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(message) = self.downcast_ref::<String>() {
            return write!(f, "request rejected: {}", message);
        }
        if let Some(message) = self.downcast_ref::<&'static str>() {
            return write!(f, "request rejected: {}", message);
        }
        if let Some(value) = self.downcast_ref::<Value>() {
            return write!(f, "request rejected: {}", value);
        }
        write!(f, "request rejected with {}", self.type_name)
    }
}

impl std::error::Error for Rejection {}
