//! Background notification polling.
//!
//! The feed owns a spawned task that fetches the user's notifications on
//! a fixed interval and publishes each snapshot on a broadcast channel.
//! The task lives exactly as long as its owner: `stop()` aborts it, and
//! dropping the feed aborts it too, so no timer outlives the view that
//! started it. Fetch failures are logged and skipped; the next tick
//! retries naturally.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::remote::HttpApi;
use crate::types::Notification;

pub struct NotificationFeed {
    handle: JoinHandle<()>,
}

impl NotificationFeed {
    /// Spawn the poller. Returns the feed handle and a receiver of
    /// notification snapshots; further receivers come from `subscribe`
    /// on the returned receiver's channel.
    pub fn start(
        api: Arc<HttpApi>,
        user_id: String,
        interval: Duration,
    ) -> (Self, broadcast::Receiver<Vec<Notification>>) {
        let (sender, receiver) = broadcast::channel(16);

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;
                match api.notifications(&user_id).await {
                    Ok(notifications) => {
                        // All receivers gone: nothing left to feed.
                        if sender.send(notifications).is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        tracing::warn!("failed to fetch notifications: {e}");
                    }
                }
            }
        });

        (NotificationFeed { handle }, receiver)
    }

    /// Stop polling. Safe to call more than once.
    pub fn stop(&self) {
        self.handle.abort();
    }

    pub fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }
}

impl Drop for NotificationFeed {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
