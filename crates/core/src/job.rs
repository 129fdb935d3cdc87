//! Job lifecycle types, submission validation, and result addressing.
//!
//! The wire shapes here ([`JobSubmission`], [`StatusUpdate`]) must stay
//! compatible with the submitting service and the frontend subscribers;
//! both sides speak lowercase status strings.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Maximum length of a job id. Submitters use UUID strings (36 chars);
/// the cap leaves headroom for other id schemes without admitting junk.
pub const MAX_JOB_ID_LEN: usize = 64;

/// Maximum length of a prompt.
pub const MAX_PROMPT_LEN: usize = 4096;

/// URL prefix under which finished videos are served.
pub const VIDEO_URL_PREFIX: &str = "/videos/";

/// Container extension for finished videos.
pub const VIDEO_FILE_EXT: &str = ".mp4";

// ---------------------------------------------------------------------------
// JobStatus
// ---------------------------------------------------------------------------

/// Lifecycle status of a generation job.
///
/// Statuses advance along the strict path
/// `queued → processing → {completed | failed}` and never revert.
/// `queued` is written by the submitting service before dispatch; this
/// coordinator's first write for a job is always `processing`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Queued,
    Processing,
    Completed,
    Failed,
}

impl JobStatus {
    /// The lowercase wire/store representation.
    pub fn as_str(self) -> &'static str {
        match self {
            JobStatus::Queued => "queued",
            JobStatus::Processing => "processing",
            JobStatus::Completed => "completed",
            JobStatus::Failed => "failed",
        }
    }

    /// `completed` and `failed` are terminal; no further writes follow.
    pub fn is_terminal(self) -> bool {
        matches!(self, JobStatus::Completed | JobStatus::Failed)
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JobStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "queued" => Ok(JobStatus::Queued),
            "processing" => Ok(JobStatus::Processing),
            "completed" => Ok(JobStatus::Completed),
            "failed" => Ok(JobStatus::Failed),
            other => Err(CoreError::Validation(format!(
                "Unknown job status: \"{other}\""
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Wire payloads
// ---------------------------------------------------------------------------

/// Inbound submission message consumed from the job topic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobSubmission {
    pub job_id: String,
    pub prompt: String,
}

/// One status write: the upsert input and the broadcast payload.
///
/// At most one of `video_url` / `error` is set, and only together with the
/// matching terminal status. Use the constructors to keep that invariant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusUpdate {
    pub job_id: String,
    pub status: JobStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl StatusUpdate {
    /// The job has been admitted and generation is starting.
    pub fn processing(job_id: impl Into<String>) -> Self {
        Self {
            job_id: job_id.into(),
            status: JobStatus::Processing,
            video_url: None,
            error: None,
        }
    }

    /// Generation succeeded; `video_url` points at the finished artifact.
    pub fn completed(job_id: impl Into<String>, video_url: impl Into<String>) -> Self {
        Self {
            job_id: job_id.into(),
            status: JobStatus::Completed,
            video_url: Some(video_url.into()),
            error: None,
        }
    }

    /// Generation failed; `error` carries the summarized cause.
    pub fn failed(job_id: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            job_id: job_id.into(),
            status: JobStatus::Failed,
            video_url: None,
            error: Some(error.into()),
        }
    }
}

// ---------------------------------------------------------------------------
// Result addressing
// ---------------------------------------------------------------------------

/// The URL a finished video is served under, derived from the job id alone.
///
/// Deterministic so the result location can be computed before, during, or
/// after generation without coordination.
pub fn video_url_for(job_id: &str) -> String {
    format!("{VIDEO_URL_PREFIX}{job_id}{VIDEO_FILE_EXT}")
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate an inbound submission before any state is written for it.
///
/// Rules:
/// - `job_id` must not be empty and must not exceed [`MAX_JOB_ID_LEN`].
/// - `prompt` must not be empty and must not exceed [`MAX_PROMPT_LEN`].
pub fn validate_submission(job_id: &str, prompt: &str) -> Result<(), CoreError> {
    if job_id.is_empty() {
        return Err(CoreError::Validation(
            "Job id must not be empty".to_string(),
        ));
    }
    if job_id.len() > MAX_JOB_ID_LEN {
        return Err(CoreError::Validation(format!(
            "Job id must not exceed {MAX_JOB_ID_LEN} characters"
        )));
    }
    if prompt.is_empty() {
        return Err(CoreError::Validation(
            "Prompt must not be empty".to_string(),
        ));
    }
    if prompt.len() > MAX_PROMPT_LEN {
        return Err(CoreError::Validation(format!(
            "Prompt must not exceed {MAX_PROMPT_LEN} characters"
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
