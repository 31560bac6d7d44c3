//! Cleanup Sweeper
//!
//! Batch reconciliation pass that reclaims expired, unclaimed entries and
//! their orphaned gates. Stateless and restartable: every delete it performs
//! is idempotent, so running it twice in a row or concurrently with
//! `retrieve` is safe.

use tracing::debug;

use crate::error::Result;

use super::coordinator::Exchange;
use super::naming::gate_name;
use super::{current_epoch_ms, server_error, EXPIRY_METADATA_KEY};

impl Exchange {
    // == Sweep ==
    /// Deletes entries whose expiry has passed and were never claimed,
    /// together with their gates. Returns the number of entries removed.
    ///
    /// Never deletes a live entry, even if its gate is already empty: a
    /// claimed-but-not-yet-scavenged blob is removed by `retrieve`'s own
    /// deletion path unless it is also past expiry.
    pub async fn sweep(&self) -> Result<usize> {
        let entries = self.repo.list_all().await.map_err(server_error)?;
        let now = current_epoch_ms();

        let mut removed = 0;
        for (key, metadata) in entries {
            let expiry = metadata
                .get(EXPIRY_METADATA_KEY)
                .and_then(|s| s.parse::<u64>().ok());
            let Some(expiry) = expiry else {
                debug!(key, "skipping blob without expiry metadata");
                continue;
            };
            if now < expiry {
                continue;
            }

            self.close_gate(&gate_name(&self.namespace, &key)).await;
            self.repo.delete(&key).await.map_err(server_error)?;
            removed += 1;
        }

        Ok(removed)
    }
}
