//! TTL Cleanup Task
//!
//! Background task that periodically sweeps expired cache entries so they do
//! not linger until the next read touches them.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::CacheEngine;

/// Spawns a background task that periodically removes expired entries.
///
/// The task loops forever, sleeping for the configured interval between
/// sweeps. Each sweep takes the engine's critical section only for the
/// duration of `cleanup_expired`.
///
/// # Arguments
/// * `engine` - Shared cache engine
/// * `cleanup_interval_secs` - Interval in seconds between sweeps
///
/// # Returns
/// A JoinHandle for the spawned task; abort it during shutdown.
pub fn spawn_cleanup_task(engine: Arc<CacheEngine>, cleanup_interval_secs: u64) -> JoinHandle<()> {
    let interval = Duration::from_secs(cleanup_interval_secs);

    tokio::spawn(async move {
        info!(
            interval_secs = cleanup_interval_secs,
            "starting TTL cleanup task"
        );

        loop {
            tokio::time::sleep(interval).await;

            let removed = engine.cleanup_expired();
            if removed > 0 {
                info!(removed, "TTL cleanup removed expired entries");
            } else {
                debug!("TTL cleanup found no expired entries");
            }
        }
    })
}
