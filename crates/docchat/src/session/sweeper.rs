//! Periodic eviction of inactive sessions

use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

use super::store::SessionStore;

/// Spawn the background inactivity sweep
///
/// Every `period`, sessions idle longer than `idle` are evicted. The task is
/// bound to application lifetime: the caller holds the handle and aborts it
/// on shutdown. No coordination with request handling is needed beyond the
/// store's own lock.
pub fn spawn_sweeper(
    store: Arc<SessionStore>,
    period: Duration,
    idle: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        // the first tick completes immediately; skip it
        ticker.tick().await;

        loop {
            ticker.tick().await;
            let removed = store.cleanup_inactive(idle);
            if removed > 0 {
                tracing::info!("evicted {} inactive sessions", removed);
            }
        }
    })
}
