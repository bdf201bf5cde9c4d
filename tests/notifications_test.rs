//! Lifecycle tests for the notification poller.
//!
//! No server is listening at the target address; the feed is expected to
//! keep ticking through failed fetches and to die exactly when told to.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast::error::RecvError;

use bright::{HttpApi, NotificationFeed};

fn unreachable_api() -> Arc<HttpApi> {
    // Port 9 (discard) refuses connections immediately.
    Arc::new(HttpApi::new("http://127.0.0.1:9", "test-token").unwrap())
}

#[tokio::test]
async fn feed_runs_until_stopped() {
    let (feed, _receiver) = NotificationFeed::start(
        unreachable_api(),
        "u1".to_string(),
        Duration::from_secs(3600),
    );

    assert!(feed.is_running());

    feed.stop();
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(!feed.is_running());

    // stop() is safe to repeat.
    feed.stop();
}

#[tokio::test]
async fn dropping_the_feed_closes_the_channel() {
    let (feed, mut receiver) = NotificationFeed::start(
        unreachable_api(),
        "u1".to_string(),
        Duration::from_secs(3600),
    );

    drop(feed);

    // The spawned task is aborted, so the sender side goes away and the
    // channel reports closed (possibly after buffered snapshots).
    let outcome = tokio::time::timeout(Duration::from_secs(5), async {
        loop {
            match receiver.recv().await {
                Ok(_) => continue,
                Err(RecvError::Lagged(_)) => continue,
                Err(RecvError::Closed) => break,
            }
        }
    })
    .await;

    assert!(outcome.is_ok(), "channel never closed after drop");
}
