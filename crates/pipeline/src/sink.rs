//! Dual-sink status recorder: persistent upsert + live broadcast.

use std::sync::Arc;

use vidforge_bus::MessageBus;
use vidforge_core::job::StatusUpdate;
use vidforge_core::topics::TOPIC_JOB_UPDATES;
use vidforge_db::JobStore;

/// Records job state to the store and broadcasts it on the update topic.
///
/// Both halves are individually best-effort: a sink failure must never abort
/// a job that already succeeded or stop the pipeline from processing other
/// jobs, so errors are logged here and go no further. Callers treat the
/// record as informational, not as an acknowledgement.
#[derive(Clone)]
pub struct StatusSink {
    store: Arc<dyn JobStore>,
    bus: Arc<dyn MessageBus>,
}

impl StatusSink {
    pub fn new(store: Arc<dyn JobStore>, bus: Arc<dyn MessageBus>) -> Self {
        Self { store, bus }
    }

    /// Upsert the update by job id, then broadcast it.
    ///
    /// The two writes are not transactional with each other; a subscriber
    /// may see an update whose persistent write failed, and vice versa.
    pub async fn record(&self, update: &StatusUpdate) {
        if let Err(e) = self.store.upsert_status(update).await {
            tracing::error!(
                job_id = %update.job_id,
                status = %update.status,
                error = %e,
                "Failed to persist job status",
            );
        }

        match serde_json::to_string(update) {
            Ok(payload) => {
                if let Err(e) = self.bus.publish(TOPIC_JOB_UPDATES, &payload).await {
                    tracing::error!(
                        job_id = %update.job_id,
                        status = %update.status,
                        error = %e,
                        "Failed to broadcast job status",
                    );
                }
            }
            Err(e) => {
                tracing::error!(job_id = %update.job_id, error = %e, "Failed to serialize job status");
            }
        }
    }
}
