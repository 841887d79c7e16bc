//! TTL Sweep Task
//!
//! Background task that periodically reclaims expired cache entries.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::cache::Cache;

/// Spawns a background task that periodically sweeps expired entries.
///
/// Purely a memory-reclamation aid: expiration is already observed
/// lazily on every read, so correctness never depends on this task
/// running. On backends that enforce their own expiration the sweep is a
/// no-op.
///
/// The task runs in an infinite loop, sleeping for the given interval
/// between runs. Abort the returned handle during shutdown.
///
/// # Example
/// ```ignore
/// let cache = registry.open("memory", StoreOptions::new()).await?;
/// let sweeper = spawn_sweep_task(cache.clone(), Duration::from_secs(1));
/// // Later, during shutdown:
/// sweeper.abort();
/// ```
pub fn spawn_sweep_task(cache: Cache, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!("starting TTL sweep task with interval {:?}", interval);

        loop {
            tokio::time::sleep(interval).await;

            match cache.flush_expired().await {
                Ok(0) => debug!("sweep: no expired entries"),
                Ok(removed) => info!("sweep: removed {} expired entries", removed),
                Err(err) => warn!("sweep failed: {}", err),
            }
        }
    })
}
