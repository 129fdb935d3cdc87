//! Bus consumer feeding the lifecycle controller.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use vidforge_bus::MessageBus;
use vidforge_core::job::JobSubmission;
use vidforge_core::topics::TOPIC_JOB_SUBMISSIONS;

use crate::runner::JobRunner;

/// Long-lived consumer of the submission topic.
///
/// Runs until the cancellation token fires or the bus closes. Malformed
/// payloads are logged and dropped — there is no valid job to attach a
/// status record to. A failure inside one job's processing never stops the
/// loop from reading the next message.
pub struct IntakeLoop {
    bus: Arc<dyn MessageBus>,
    runner: Arc<JobRunner>,
}

impl IntakeLoop {
    pub fn new(bus: Arc<dyn MessageBus>, runner: Arc<JobRunner>) -> Self {
        Self { bus, runner }
    }

    /// Consume submissions until shutdown.
    pub async fn run(&self, cancel: CancellationToken) {
        let mut submissions = match self.bus.subscribe(TOPIC_JOB_SUBMISSIONS).await {
            Ok(rx) => rx,
            Err(e) => {
                tracing::error!(error = %e, "Failed to subscribe to job submissions");
                return;
            }
        };

        tracing::info!(topic = TOPIC_JOB_SUBMISSIONS, "Listening for video generation jobs");

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::info!("Intake loop shutting down");
                    break;
                }
                message = submissions.recv() => match message {
                    Some(payload) => self.handle(payload).await,
                    None => {
                        tracing::info!("Submission stream closed, intake loop stopping");
                        break;
                    }
                }
            }
        }
    }

    /// Handle one inbound payload.
    ///
    /// Admission is awaited here so slot availability throttles intake; the
    /// generation itself is spawned so the loop is free for the next
    /// message as soon as a slot was granted.
    async fn handle(&self, payload: String) {
        let submission: JobSubmission = match serde_json::from_str(&payload) {
            Ok(submission) => submission,
            Err(e) => {
                tracing::warn!(error = %e, "Dropping malformed submission payload");
                return;
            }
        };

        let job_id = submission.job_id.clone();
        tracing::info!(job_id = %job_id, "Received job submission");

        match self.runner.admit(submission.job_id, submission.prompt).await {
            Ok(job) => {
                tokio::spawn(async move {
                    let job_id = job.job_id().to_string();
                    if let Err(e) = job.run().await {
                        tracing::error!(job_id = %job_id, error = %e, "Job processing failed");
                    }
                });
            }
            Err(e) => {
                tracing::warn!(job_id = %job_id, error = %e, "Dropping rejected submission");
            }
        }
    }
}
