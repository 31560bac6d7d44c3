//! Cleanup Sweep Task
//!
//! Background task that periodically sweeps expired, unclaimed entries and
//! their orphaned gates.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::exchange::Exchange;

/// Spawns a background task that periodically runs the cleanup sweep.
///
/// The task runs in an infinite loop, sleeping for the specified interval
/// between sweeps. A failed sweep is logged and the loop continues; the
/// sweep is stateless and restartable, so the next interval makes up for a
/// missed pass.
///
/// # Arguments
/// * `exchange` - shared exchange whose sweep is invoked
/// * `sweep_interval_secs` - interval in seconds between sweeps
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// during graceful shutdown.
pub fn spawn_sweep_task(exchange: Arc<Exchange>, sweep_interval_secs: u64) -> JoinHandle<()> {
    let interval = Duration::from_secs(sweep_interval_secs);

    tokio::spawn(async move {
        info!(
            "Starting cleanup sweep task with interval of {} seconds",
            sweep_interval_secs
        );

        loop {
            tokio::time::sleep(interval).await;

            match exchange.sweep().await {
                Ok(removed) if removed > 0 => {
                    info!("Cleanup sweep: removed {} expired entries", removed);
                }
                Ok(_) => {
                    debug!("Cleanup sweep: no expired entries found");
                }
                Err(e) => {
                    warn!("Cleanup sweep failed: {}", e);
                }
            }
        }
    })
}
