use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::task::{Context, Poll};

use futures::channel::oneshot;
use tracing::debug;

use crate::error::Rejection;
use crate::request::Selector;
use crate::response::Response;

pub type Outcome = Result<Response, Rejection>;

static NEXT_DEFERRED_ID: AtomicU64 = AtomicU64::new(1);

struct HandleInner {
    id: u64,
    settled: AtomicBool,
}

/// Identity of one deferred value. Clones compare equal; handles of two
/// different deferred values never do.
#[derive(Clone)]
pub struct DeferredHandle {
    inner: Arc<HandleInner>,
}

impl DeferredHandle {
    fn new() -> Self {
        Self {
            inner: Arc::new(HandleInner {
                id: NEXT_DEFERRED_ID.fetch_add(1, Ordering::Relaxed),
                settled: AtomicBool::new(false),
            }),
        }
    }

    pub fn id(&self) -> u64 {
        self.inner.id
    }

    pub fn is_settled(&self) -> bool {
        self.inner.settled.load(Ordering::Acquire)
    }
}

impl PartialEq for DeferredHandle {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for DeferredHandle {}

impl fmt::Debug for DeferredHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeferredHandle")
            .field("id", &self.id())
            .field("settled", &self.is_settled())
            .finish()
    }
}

/// Creates a fresh deferred value: the completing side and the future the
/// caller awaits.
pub fn deferred() -> (Completer, ResponseFuture) {
    let (tx, rx) = oneshot::channel();
    let handle = DeferredHandle::new();
    (
        Completer { tx, handle: handle.clone() },
        ResponseFuture { rx, handle },
    )
}

/// Completing side of a deferred value. Consumed on use, so a deferred
/// value settles at most once.
pub struct Completer {
    tx: oneshot::Sender<Outcome>,
    handle: DeferredHandle,
}

impl Completer {
    pub fn handle(&self) -> &DeferredHandle {
        &self.handle
    }

    /// Returns `false` when the future was already dropped.
    pub fn resolve(self, response: Response) -> bool {
        self.complete(Ok(response))
    }

    pub fn reject(self, rejection: Rejection) -> bool {
        self.complete(Err(rejection))
    }

    fn complete(self, outcome: Outcome) -> bool {
        self.handle.inner.settled.store(true, Ordering::Release);
        match self.tx.send(outcome) {
            Ok(()) => true,
            Err(_) => {
                debug!(deferred = self.handle.id(), "response future dropped before completion");
                false
            }
        }
    }
}

impl fmt::Debug for Completer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Completer").field("handle", &self.handle).finish()
    }
}

/// Future returned by the mocked fetch.
///
/// Settles once the test completes the matching request. If the request is
/// discarded instead (reset, or a removed entry that gets dropped) the
/// future stays pending forever.
pub struct ResponseFuture {
    rx: oneshot::Receiver<Outcome>,
    handle: DeferredHandle,
}

impl ResponseFuture {
    pub fn handle(&self) -> &DeferredHandle {
        &self.handle
    }

    pub fn selector(&self) -> Selector {
        Selector::Deferred(self.handle.clone())
    }
}

impl Future for ResponseFuture {
    type Output = Outcome;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match Pin::new(&mut self.get_mut().rx).poll(cx) {
            Poll::Ready(Ok(outcome)) => Poll::Ready(outcome),
            // completer 被丢弃：永远不会 settle
            Poll::Ready(Err(oneshot::Canceled)) => Poll::Pending,
            Poll::Pending => Poll::Pending,
        }
    }
}

impl fmt::Debug for ResponseFuture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResponseFuture").field("handle", &self.handle).finish()
    }
}
