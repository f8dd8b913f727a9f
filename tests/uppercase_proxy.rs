//! A small component written against `Fetch`, tested with the mock.

use std::sync::Arc;

use futures::FutureExt;
use mock_fetch::{Fetch, MockFetch, Rejection, RequestInit, ResponseOverrides};

const SERVICE_URL: &str = "/web-service-url/";

/// Sends `message` to the service and upper-cases whatever text comes back.
async fn uppercase_proxy<F: Fetch>(fetch: &F, message: &str) -> Result<String, Rejection> {
    let response = fetch.fetch(SERVICE_URL, Some(RequestInit::new().body(message))).await?;
    Ok(response.text().to_uppercase())
}

#[tokio::test]
async fn converts_the_server_reply_to_upper_case() {
    let fetch = Arc::new(MockFetch::new());
    let message = "client is saying hello!";

    let proxy = {
        let fetch = Arc::clone(&fetch);
        tokio::spawn(async move { uppercase_proxy(&fetch, message).await })
    };
    while fetch.is_empty() {
        tokio::task::yield_now().await;
    }

    let calls = fetch.calls();
    let call = &calls[0];
    assert_eq!(call.resource, SERVICE_URL);
    assert_eq!(call.init, Some(RequestInit::new().body(message)));

    fetch.respond(ResponseOverrides::new().text("server says hello!")).unwrap();

    assert_eq!(proxy.await.unwrap().unwrap(), "SERVER SAYS HELLO!");
}

#[tokio::test]
async fn server_errors_reach_the_caller_untouched() {
    let fetch = Arc::new(MockFetch::new());

    let proxy = {
        let fetch = Arc::clone(&fetch);
        tokio::spawn(async move { uppercase_proxy(&fetch, "hi").await })
    };
    while fetch.is_empty() {
        tokio::task::yield_now().await;
    }

    fetch.fail_url(SERVICE_URL, Rejection::new(String::from("service unavailable"))).unwrap();

    let err = proxy.await.unwrap().unwrap_err();
    assert_eq!(err.downcast_ref::<String>().map(String::as_str), Some("service unavailable"));
}

#[test]
fn runs_against_a_borrowed_mock() {
    let fetch = MockFetch::new();
    let borrowed: &MockFetch = &fetch;

    let mut proxy = Box::pin(uppercase_proxy(&borrowed, "ping"));
    assert!((&mut proxy).now_or_never().is_none());
    assert_eq!(fetch.pending_count(), 1);

    fetch.respond(ResponseOverrides::new().text("pong")).unwrap();

    assert_eq!(proxy.now_or_never().unwrap().unwrap(), "PONG");
}
