// request/mod.rs

pub mod config;
pub mod deferred;
pub mod executor;
pub mod queue;
pub mod request_item;

// 重新导出，方便上层直接使用
pub use config::MockFetchConfig;
pub use deferred::{deferred, Completer, DeferredHandle, ResponseFuture};
pub use executor::MockFetch;
pub use queue::{PendingQueue, PendingRequest, Selector};
pub use request_item::{FetchCall, RequestInit, RequestRecord};
