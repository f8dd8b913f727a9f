//! Deterministic test double for an async `fetch`.
//!
//! Code under test calls [`MockFetch::fetch`] (directly or through the
//! [`Fetch`] trait) and gets a [`ResponseFuture`] back. The request waits in
//! a FIFO queue until the test settles it:
//!
//! ```
//! use futures::FutureExt;
//! use mock_fetch::{MockFetch, Rejection, ResponseOverrides};
//!
//! let fetch = MockFetch::new();
//! let first = fetch.fetch("/a", None);
//! let second = fetch.fetch("/b", None);
//!
//! fetch.mock_error(Some(Rejection::new("offline")), Some(second.selector()), false).unwrap();
//! fetch.respond(ResponseOverrides::new().text("hello")).unwrap();
//!
//! assert_eq!(first.now_or_never().unwrap().unwrap().text(), "hello");
//! assert!(second.now_or_never().unwrap().is_err());
//! ```

use std::future::Future;
use std::sync::Arc;

pub mod debug;
pub mod error;
pub mod request;
pub mod response;
pub mod utils;

pub use debug::DebugTarget;
pub use error::{MockFetchError, Rejection, Result};
pub use request::{
    Completer, DeferredHandle, FetchCall, MockFetch, MockFetchConfig, PendingRequest, RequestInit,
    RequestRecord, ResponseFuture, Selector,
};
pub use response::{Response, ResponseOverrides};

/// Anything that can issue a fetch. Write the code under test against this
/// and hand it a [`MockFetch`] in tests.
pub trait Fetch {
    type Future: Future<Output = std::result::Result<Response, Rejection>>;

    fn fetch(&self, resource: &str, init: Option<RequestInit>) -> Self::Future;
}

impl Fetch for MockFetch {
    type Future = ResponseFuture;

    fn fetch(&self, resource: &str, init: Option<RequestInit>) -> ResponseFuture {
        MockFetch::fetch(self, resource, init)
    }
}

impl<T: Fetch + ?Sized> Fetch for Arc<T> {
    type Future = T::Future;

    fn fetch(&self, resource: &str, init: Option<RequestInit>) -> Self::Future {
        (**self).fetch(resource, init)
    }
}

impl<T: Fetch + ?Sized> Fetch for &T {
    type Future = T::Future;

    fn fetch(&self, resource: &str, init: Option<RequestInit>) -> Self::Future {
        (**self).fetch(resource, init)
    }
}
