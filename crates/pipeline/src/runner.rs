//! Per-job lifecycle control.
//!
//! A job's status writes happen on one control path, in order: `processing`
//! at admission, then exactly one terminal write. Admission is two-phase so
//! the intake loop can block on slot availability (backpressure) without
//! waiting for the generation itself.

use std::sync::Arc;

use vidforge_core::error::CoreError;
use vidforge_core::job::{validate_submission, video_url_for, StatusUpdate};
use vidforge_engine::{GenerateError, VideoGenerator};

use crate::sink::StatusSink;
use crate::slots::{SlotPermit, SlotPool};

/// Why a submission did not produce a completed video.
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    /// Malformed or incomplete submission. Nothing was recorded for it.
    #[error(transparent)]
    InvalidJob(CoreError),

    /// The generation call failed. A `failed` record was written before
    /// this was returned to the caller.
    #[error(transparent)]
    Generation(#[from] GenerateError),
}

/// Drives one job through `processing → {completed | failed}`.
pub struct JobRunner {
    slots: SlotPool,
    sink: StatusSink,
    generator: Arc<dyn VideoGenerator>,
}

impl JobRunner {
    pub fn new(slots: SlotPool, sink: StatusSink, generator: Arc<dyn VideoGenerator>) -> Self {
        Self {
            slots,
            sink,
            generator,
        }
    }

    /// Slots not currently running a generation.
    pub fn available_slots(&self) -> usize {
        self.slots.available()
    }

    /// Validate and admit a submission.
    ///
    /// Invalid input is rejected with no state written. Valid input gets a
    /// `processing` record — the first durable trace of the job; there is no
    /// separate `queued` write on this path — and then waits for a free
    /// slot. The wait is the intended backpressure point: while all slots
    /// are busy, the caller is throttled and backlog stays in the bus.
    pub async fn admit(&self, job_id: String, prompt: String) -> Result<AdmittedJob, SubmitError> {
        validate_submission(&job_id, &prompt).map_err(SubmitError::InvalidJob)?;

        self.sink.record(&StatusUpdate::processing(&job_id)).await;
        let slot = self.slots.acquire().await;

        Ok(AdmittedJob {
            job_id,
            prompt,
            sink: self.sink.clone(),
            generator: Arc::clone(&self.generator),
            _slot: slot,
        })
    }

    /// Run a submission to its terminal state and return the video URL.
    ///
    /// The synchronous path used by the direct HTTP endpoint; the intake
    /// loop uses [`admit`](Self::admit) and spawns the rest.
    pub async fn submit(&self, job_id: String, prompt: String) -> Result<String, SubmitError> {
        self.admit(job_id, prompt).await?.run().await
    }
}

/// A validated submission holding its slot. Dropping it (on any path)
/// frees the slot.
pub struct AdmittedJob {
    job_id: String,
    prompt: String,
    sink: StatusSink,
    generator: Arc<dyn VideoGenerator>,
    _slot: SlotPermit,
}

impl AdmittedJob {
    pub fn job_id(&self) -> &str {
        &self.job_id
    }

    /// Invoke the generation backend and record the terminal status.
    ///
    /// On failure the summarized cause is recorded as `failed` and the
    /// error is returned so the caller decides what else to do with it;
    /// the record itself is best-effort and never blocks this path.
    pub async fn run(self) -> Result<String, SubmitError> {
        tracing::info!(job_id = %self.job_id, "Starting video generation");

        match self.generator.generate(&self.job_id, &self.prompt).await {
            Ok(_path) => {
                let video_url = video_url_for(&self.job_id);
                self.sink
                    .record(&StatusUpdate::completed(&self.job_id, &video_url))
                    .await;
                tracing::info!(job_id = %self.job_id, %video_url, "Video generation completed");
                Ok(video_url)
            }
            Err(e) => {
                let detail = format!("Video generation failed: {e}");
                self.sink
                    .record(&StatusUpdate::failed(&self.job_id, &detail))
                    .await;
                tracing::error!(job_id = %self.job_id, error = %e, "Video generation failed");
                Err(SubmitError::Generation(e))
            }
        }
    }
}
