use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, warn};

use crate::error::{MockFetchError, Rejection, Result};
use crate::request::deferred::{deferred, Completer, DeferredHandle, ResponseFuture};
use crate::request::{FetchCall, MockFetchConfig, PendingQueue, PendingRequest, RequestInit, RequestRecord, Selector};
use crate::response::{Response, ResponseOverrides};

/// Fetch test double.
///
/// Every call to [`MockFetch::fetch`] is parked in a FIFO queue until the
/// test settles it with [`MockFetch::mock_response`] or
/// [`MockFetch::mock_error`]. Build one per test; nothing is shared between
/// instances.
///
/// ```
/// use futures::FutureExt;
/// use mock_fetch::{MockFetch, ResponseOverrides};
/// use reqwest::StatusCode;
///
/// let fetch = MockFetch::new();
/// let pending = fetch.fetch("/users", None);
///
/// fetch.respond(ResponseOverrides::new().status(StatusCode::NOT_FOUND)).unwrap();
///
/// let res = pending.now_or_never().unwrap().unwrap();
/// assert_eq!(res.status, StatusCode::NOT_FOUND);
/// assert!(res.ok);
/// ```
#[derive(Debug, Default)]
pub struct MockFetch {
    queue: Mutex<PendingQueue>,
    calls: Mutex<Vec<FetchCall>>,
    config: MockFetchConfig,
}

impl MockFetch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: MockFetchConfig) -> Self {
        Self {
            queue: Mutex::new(PendingQueue::new()),
            calls: Mutex::new(Vec::new()),
            config,
        }
    }

    pub fn config(&self) -> &MockFetchConfig {
        &self.config
    }

    fn queue(&self) -> MutexGuard<'_, PendingQueue> {
        self.queue.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn call_log(&self) -> MutexGuard<'_, Vec<FetchCall>> {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // 入队后立即返回
    pub fn fetch(&self, resource: impl Into<String>, init: Option<RequestInit>) -> ResponseFuture {
        let resource = resource.into();
        let (completer, future) = deferred();
        let record = Arc::new(RequestRecord::new(resource.clone(), init.clone(), completer.handle().clone()));

        self.call_log().push(FetchCall { resource, init });

        let mut queue = self.queue();
        queue.push(Arc::clone(&record), completer);
        debug!(
            resource = %record.resource,
            deferred = future.handle().id(),
            pending = queue.len(),
            "request queued"
        );
        future
    }

    /// Takes an entry out of the queue without settling it: the one named by
    /// `selector`, or the oldest one.
    pub fn remove(&self, selector: Option<Selector>) -> Option<PendingRequest> {
        let pending = self.queue().remove(selector.as_ref())?;
        Some(pending.configure(&self.config))
    }

    fn take(&self, selector: Option<Selector>, silent: bool) -> Result<Option<PendingRequest>> {
        match self.remove(selector) {
            Some(pending) => Ok(Some(pending)),
            None if silent => {
                debug!("no pending request to settle (silent)");
                Ok(None)
            }
            None => Err(MockFetchError::NoPendingRequest),
        }
    }

    /// Simulates a server response: built-in defaults, then the configured
    /// `response_defaults`, then `overrides`. `Ok(None)` only in silent mode.
    pub fn mock_response(
        &self,
        overrides: Option<ResponseOverrides>,
        selector: Option<Selector>,
        silent: bool,
    ) -> Result<Option<Response>> {
        let Some(pending) = self.take(selector, silent)? else {
            return Ok(None);
        };
        Ok(Some(pending.resolve(overrides.unwrap_or_default())))
    }

    /// Simulates a failed request. `payload` reaches the caller unchanged;
    /// without one the request is rejected with an empty JSON object.
    pub fn mock_error(&self, payload: Option<Rejection>, selector: Option<Selector>, silent: bool) -> Result<()> {
        let Some(pending) = self.take(selector, silent)? else {
            return Ok(());
        };
        pending.reject(payload.unwrap_or_default());
        Ok(())
    }

    pub fn respond(&self, overrides: ResponseOverrides) -> Result<Response> {
        self.mock_response(Some(overrides), None, false)?
            .ok_or(MockFetchError::NoPendingRequest)
    }

    pub fn fail(&self, payload: Rejection) -> Result<()> {
        self.mock_error(Some(payload), None, false)
    }

    pub fn respond_to_url(&self, url: &str, overrides: ResponseOverrides) -> Result<Response> {
        let record = self.request_by_url(url).ok_or(MockFetchError::NoPendingRequest)?;
        self.mock_response(Some(overrides), Some(Selector::Record(record)), false)?
            .ok_or(MockFetchError::NoPendingRequest)
    }

    pub fn fail_url(&self, url: &str, payload: Rejection) -> Result<()> {
        let record = self.request_by_url(url).ok_or(MockFetchError::NoPendingRequest)?;
        self.mock_error(Some(payload), Some(Selector::Record(record)), false)
    }

    pub fn last_request(&self) -> Option<Arc<RequestRecord>> {
        self.queue().last().cloned()
    }

    pub fn last_deferred(&self) -> Option<DeferredHandle> {
        self.last_request().map(|record| record.deferred.clone())
    }

    pub fn request_by_url(&self, url: &str) -> Option<Arc<RequestRecord>> {
        self.queue().find_by_url(url).cloned()
    }

    pub fn pending(&self) -> Vec<Arc<RequestRecord>> {
        self.queue().records().cloned().collect()
    }

    pub fn pending_count(&self) -> usize {
        self.queue().len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue().is_empty()
    }

    // 被丢弃的请求永远不会 settle
    pub fn reset(&self) {
        let dropped = self.queue().clear();
        debug!(dropped, "pending requests cleared");
    }

    // call log（不受 reset 影响）

    pub fn calls(&self) -> Vec<FetchCall> {
        self.call_log().clone()
    }

    pub fn call_count(&self) -> usize {
        self.call_log().len()
    }

    pub fn was_called_with(&self, resource: &str) -> bool {
        self.call_log().iter().any(|call| call.resource == resource)
    }

    pub fn clear_calls(&self) {
        self.call_log().clear();
    }

    #[deprecated(note = "use `MockFetch::remove` instead")]
    pub fn pop_promise(&self, handle: Option<&DeferredHandle>) -> Option<Completer> {
        self.legacy_notice("pop_promise");
        self.remove(handle.map(Selector::deferred))
            .map(|pending| pending.into_parts().1)
    }

    #[deprecated(note = "use `MockFetch::remove` instead")]
    pub fn pop_request(&self, record: Option<&Arc<RequestRecord>>) -> Option<PendingRequest> {
        self.legacy_notice("pop_request");
        self.remove(record.map(Selector::record))
    }

    fn legacy_notice(&self, method: &str) {
        if self.config.legacy_warnings {
            warn!(method, "MockFetch::{} is a legacy method - please use `MockFetch::remove` instead", method);
        }
    }
}
