//! Lifecycle Janitor
//!
//! Background task that periodically removes pages past their retention
//! window.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::pages::PageStore;

/// Spawns the janitor: an infinite loop that sleeps for the configured
/// interval, then calls `delete_expired` on the page store.
///
/// The janitor is stateless between sweeps and tolerant of concurrent
/// invocation (a row deleted by someone else is simply not there to delete).
/// A storage error fails only that sweep: it is logged and the next cycle
/// retries, so a flaky backend never crashes the process or blocks page
/// serving.
///
/// # Arguments
/// * `pages` - Shared page store
/// * `interval_secs` - Seconds between sweeps
/// * `retention_window_ms` - Maximum page age in milliseconds
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// during graceful shutdown.
pub fn spawn_janitor(
    pages: Arc<dyn PageStore>,
    interval_secs: u64,
    retention_window_ms: u64,
) -> JoinHandle<()> {
    let interval = Duration::from_secs(interval_secs);

    tokio::spawn(async move {
        info!(
            "Starting page janitor: sweep every {}s, retention {}ms",
            interval_secs, retention_window_ms
        );

        loop {
            tokio::time::sleep(interval).await;

            match pages.delete_expired(retention_window_ms) {
                Ok(0) => debug!("janitor sweep: no expired pages"),
                Ok(removed) => info!("janitor sweep: removed {} expired pages", removed),
                // Deferred, not propagated: the next sweep retries
                Err(err) => warn!("janitor sweep failed, will retry next cycle: {}", err),
            }
        }
    })
}
