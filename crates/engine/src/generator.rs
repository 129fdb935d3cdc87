use std::path::PathBuf;

use async_trait::async_trait;

/// Frames requested per generation.
pub const DEFAULT_NUM_FRAMES: u32 = 85;

/// Frame rate of the exported container.
pub const DEFAULT_FPS: u32 = 30;

/// Errors from a generation attempt.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    /// The backend could not be reached or the request did not complete.
    #[error("Generation request failed: {0}")]
    Request(String),

    /// The backend answered with a failure.
    #[error("Generation backend error: {0}")]
    Backend(String),

    /// The generated video could not be written to disk.
    #[error("Failed to store generated video: {0}")]
    Storage(#[from] std::io::Error),
}

/// One opaque, long-running generation call.
///
/// Implementations run the prompt to completion — there is no pause, resume,
/// or cancellation once a call starts — and leave the finished container on
/// disk, returning its path. Concurrency limits are the caller's concern.
#[async_trait]
pub trait VideoGenerator: Send + Sync {
    async fn generate(&self, job_id: &str, prompt: &str) -> Result<PathBuf, GenerateError>;
}
