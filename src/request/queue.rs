use std::collections::VecDeque;
use std::sync::Arc;

use tracing::debug;

use crate::debug::{debug_log, DebugTarget, Settlement};
use crate::error::Rejection;
use crate::request::deferred::{Completer, DeferredHandle};
use crate::request::{MockFetchConfig, RequestRecord};
use crate::response::{Response, ResponseOverrides};

/// Names the queue entry a completion or removal applies to.
#[derive(Debug, Clone)]
pub enum Selector {
    Record(Arc<RequestRecord>),
    Deferred(DeferredHandle),
}

impl Selector {
    pub fn record(record: &Arc<RequestRecord>) -> Self {
        Selector::Record(Arc::clone(record))
    }

    pub fn deferred(handle: &DeferredHandle) -> Self {
        Selector::Deferred(handle.clone())
    }

    fn as_record(&self) -> Option<&Arc<RequestRecord>> {
        match self {
            Selector::Record(record) => Some(record),
            Selector::Deferred(_) => None,
        }
    }

    fn as_deferred(&self) -> &DeferredHandle {
        match self {
            Selector::Record(record) => &record.deferred,
            Selector::Deferred(handle) => handle,
        }
    }
}

impl From<Arc<RequestRecord>> for Selector {
    fn from(record: Arc<RequestRecord>) -> Self {
        Selector::Record(record)
    }
}

impl From<DeferredHandle> for Selector {
    fn from(handle: DeferredHandle) -> Self {
        Selector::Deferred(handle)
    }
}

/// A request taken out of the queue, together with the means to settle it.
///
/// Handed out by `MockFetch::remove` carrying that instance's response
/// defaults and debug target, so settling it by hand matches `mock_response`.
#[derive(Debug)]
pub struct PendingRequest {
    record: Arc<RequestRecord>,
    completer: Completer,
    defaults: ResponseOverrides,
    debug: Option<DebugTarget>,
}

impl PendingRequest {
    pub(crate) fn new(record: Arc<RequestRecord>, completer: Completer) -> Self {
        Self { record, completer, defaults: ResponseOverrides::default(), debug: None }
    }

    pub(crate) fn configure(mut self, config: &MockFetchConfig) -> Self {
        self.defaults = config.response_defaults.clone();
        self.debug = config.debug.clone();
        self
    }

    pub fn record(&self) -> &Arc<RequestRecord> {
        &self.record
    }

    pub fn resource(&self) -> &str {
        &self.record.resource
    }

    // 默认值 <- 实例默认值 <- overrides
    pub fn resolve(self, overrides: ResponseOverrides) -> Response {
        let response = Response::build(self.record.resource.clone(), self.defaults.merge(overrides));

        if let Some(target) = &self.debug {
            debug_log(target, &self.record, Settlement::Resolved(&response));
        }
        debug!(resource = %self.record.resource, status = response.status.as_u16(), "request resolved");

        self.completer.resolve(response.clone());
        response
    }

    pub fn reject(self, payload: Rejection) {
        if let Some(target) = &self.debug {
            debug_log(target, &self.record, Settlement::Rejected(&payload));
        }
        debug!(resource = %self.record.resource, payload = payload.type_name(), "request rejected");

        self.completer.reject(payload);
    }

    pub fn into_parts(self) -> (Arc<RequestRecord>, Completer) {
        (self.record, self.completer)
    }
}

/// FIFO of requests still waiting for a response. Oldest first.
#[derive(Debug, Default)]
pub struct PendingQueue {
    entries: VecDeque<PendingRequest>,
}

impl PendingQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: Arc<RequestRecord>, completer: Completer) {
        self.entries.push_back(PendingRequest::new(record, completer));
    }

    /// Removes the entry named by `selector`, or the oldest one when no
    /// selector is given. Remaining entries keep their order.
    ///
    /// A selector is matched by record identity first, then by the
    /// deferred handle it carries.
    pub fn remove(&mut self, selector: Option<&Selector>) -> Option<PendingRequest> {
        let Some(selector) = selector else {
            return self.entries.pop_front();
        };

        let ix = selector
            .as_record()
            .and_then(|record| self.position_by_record(record))
            .or_else(|| self.position_by_deferred(selector.as_deferred()))?;

        self.entries.remove(ix)
    }

    fn position_by_record(&self, record: &Arc<RequestRecord>) -> Option<usize> {
        self.entries.iter().position(|entry| Arc::ptr_eq(&entry.record, record))
    }

    fn position_by_deferred(&self, handle: &DeferredHandle) -> Option<usize> {
        self.entries.iter().position(|entry| entry.record.deferred == *handle)
    }

    pub fn last(&self) -> Option<&Arc<RequestRecord>> {
        self.entries.back().map(|entry| &entry.record)
    }

    // 从新到旧查找，最新的请求优先
    pub fn find_by_url(&self, url: &str) -> Option<&Arc<RequestRecord>> {
        self.entries
            .iter()
            .rev()
            .map(|entry| &entry.record)
            .find(|record| record.resource == url)
    }

    pub fn records(&self) -> impl Iterator<Item = &Arc<RequestRecord>> {
        self.entries.iter().map(|entry| &entry.record)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops every entry and returns how many there were.
    pub fn clear(&mut self) -> usize {
        let dropped = self.entries.len();
        self.entries.clear();
        dropped
    }
}
