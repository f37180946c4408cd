//! SessionActivityTracker - live progress tracking for one agent session.
//!
//! The tracker is Idle until a session id is assigned, then polls the
//! activity feed on a fixed interval and publishes a monotonically refined
//! [`ActivitySnapshot`] through a watch channel. Assigning a new session
//! atomically abandons the previous subscription; dropping the tracker (or
//! calling [`clear`](SessionActivityTracker::clear)) cancels the poll task,
//! so no timer outlives its owner.
//!
//! Tracking is best-effort telemetry: feed errors are swallowed and retried
//! on the next tick, and never surface as task failure.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, watch};
use tokio_util::sync::CancellationToken;

use mcc_core::activity::ActivitySnapshot;

use crate::activity_feed::ActivityFeed;

const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Tracks at most one session at a time against an injected feed.
pub struct SessionActivityTracker {
    feed: Arc<dyn ActivityFeed>,
    poll_interval: Duration,
    current: Mutex<Option<Subscription>>,
}

/// A live subscription to one session's feed.
///
/// Cancelling happens on drop, which guarantees the poll task publishes
/// nothing after the subscription is released.
struct Subscription {
    session_id: String,
    cancel: CancellationToken,
    rx: watch::Receiver<ActivitySnapshot>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

impl SessionActivityTracker {
    /// Creates an idle tracker with the default poll interval.
    pub fn new(feed: Arc<dyn ActivityFeed>) -> Self {
        Self::with_poll_interval(feed, DEFAULT_POLL_INTERVAL)
    }

    pub fn with_poll_interval(feed: Arc<dyn ActivityFeed>, poll_interval: Duration) -> Self {
        Self {
            feed,
            poll_interval,
            current: Mutex::new(None),
        }
    }

    /// Starts tracking the given session, replacing any current one.
    ///
    /// The previous subscription (if any) is cancelled before the new poll
    /// task starts; both happen under one lock so snapshots from two
    /// sessions can never interleave. The first poll fires immediately.
    pub async fn track(&self, session_id: impl Into<String>) {
        let session_id = session_id.into();
        let mut current = self.current.lock().await;

        // Cancel the old subscription before opening the new one.
        drop(current.take());

        let cancel = CancellationToken::new();
        let (tx, rx) = watch::channel(ActivitySnapshot::new(session_id.clone()));

        tracing::debug!("Tracking session {}", session_id);
        tokio::spawn(poll_session(
            self.feed.clone(),
            session_id.clone(),
            tx,
            cancel.clone(),
            self.poll_interval,
        ));

        *current = Some(Subscription {
            session_id,
            cancel,
            rx,
        });
    }

    /// Stops tracking and returns to Idle. No further snapshot updates are
    /// observable after this returns.
    pub async fn clear(&self) {
        let mut current = self.current.lock().await;
        if let Some(subscription) = current.take() {
            tracing::debug!("Cleared session {}", subscription.session_id);
        }
    }

    /// The session currently being tracked, if any.
    pub async fn session_id(&self) -> Option<String> {
        let current = self.current.lock().await;
        current.as_ref().map(|s| s.session_id.clone())
    }

    /// The latest snapshot for the tracked session, or `None` when idle.
    pub async fn snapshot(&self) -> Option<ActivitySnapshot> {
        let current = self.current.lock().await;
        current.as_ref().map(|s| s.rx.borrow().clone())
    }

    /// Subscribes to snapshot updates for the tracked session.
    ///
    /// The receiver stops yielding new values once the session is cleared or
    /// superseded.
    pub async fn subscribe(&self) -> Option<watch::Receiver<ActivitySnapshot>> {
        let current = self.current.lock().await;
        current.as_ref().map(|s| s.rx.clone())
    }
}

/// Poll loop for one session. Runs until cancelled or the feed reports the
/// session finished.
async fn poll_session(
    feed: Arc<dyn ActivityFeed>,
    session_id: String,
    tx: watch::Sender<ActivitySnapshot>,
    cancel: CancellationToken,
    poll_interval: Duration,
) {
    let mut snapshot = ActivitySnapshot::new(session_id.clone());
    let mut ticker = tokio::time::interval(poll_interval);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            _ = ticker.tick() => {}
        }

        let page = match feed.fetch(&session_id).await {
            Ok(page) => page,
            Err(err) => {
                // Best-effort telemetry: swallow and retry next tick.
                tracing::debug!("Activity feed error for {}: {}", session_id, err);
                continue;
            }
        };

        // A fetch may have been in flight when the subscription was
        // abandoned; never publish after cancellation.
        if cancel.is_cancelled() {
            break;
        }

        let changed = snapshot.merge(&page.events);
        let finished = !page.active;
        if finished {
            snapshot.finish();
        }
        if changed || finished {
            tx.send_replace(snapshot.clone());
        }
        if finished {
            tracing::debug!("Session {} finished", session_id);
            break;
        }
    }
}
