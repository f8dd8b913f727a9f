use futures::FutureExt;
use mock_fetch::{MockFetch, ResponseFuture};
use proptest::prelude::*;

fn settled_url(future: &mut ResponseFuture) -> Option<String> {
    future.now_or_never().map(|outcome| outcome.expect("resolved").url)
}

proptest! {
    /// N requests followed by N default completions settle in call order.
    #[test]
    fn default_completions_follow_call_order(count in 1usize..16) {
        let fetch = MockFetch::new();
        let mut futures: Vec<ResponseFuture> = (0..count)
            .map(|i| fetch.fetch(format!("/req/{}", i), None))
            .collect();

        for i in 0..count {
            fetch.mock_response(None, None, false).unwrap();
            prop_assert_eq!(settled_url(&mut futures[i]), Some(format!("/req/{}", i)));
            for later in futures.iter_mut().skip(i + 1) {
                prop_assert!(settled_url(later).is_none());
            }
        }
        prop_assert!(fetch.is_empty());
    }

    /// Explicit removals anywhere in the queue leave the rest in FIFO order.
    #[test]
    fn explicit_removals_keep_the_remaining_order(
        count in 2usize..16,
        picks in proptest::collection::vec(any::<prop::sample::Index>(), 1..8),
    ) {
        let fetch = MockFetch::new();
        let futures: Vec<ResponseFuture> = (0..count)
            .map(|i| fetch.fetch(format!("/req/{}", i), None))
            .collect();

        let mut expected: Vec<usize> = (0..count).collect();
        for pick in picks {
            if expected.len() <= 1 {
                break;
            }
            let pos = pick.index(expected.len());
            let target = expected.remove(pos);
            let removed = fetch.remove(Some(futures[target].selector())).unwrap();
            prop_assert_eq!(removed.resource(), format!("/req/{}", target));
        }

        let remaining: Vec<String> = fetch.pending().iter().map(|r| r.resource.clone()).collect();
        let expected_urls: Vec<String> = expected.iter().map(|i| format!("/req/{}", i)).collect();
        prop_assert_eq!(&remaining, &expected_urls);

        for url in expected_urls {
            let res = fetch.mock_response(None, None, false).unwrap().unwrap();
            prop_assert_eq!(res.url, url);
        }
    }
}
