//! HTTP client for the inference server.

use std::path::PathBuf;

use async_trait::async_trait;
use serde::Serialize;
use vidforge_core::job::VIDEO_FILE_EXT;

use crate::generator::{GenerateError, VideoGenerator, DEFAULT_FPS, DEFAULT_NUM_FRAMES};

/// Body of `POST {base_url}/generate`.
#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    prompt: &'a str,
    num_frames: u32,
    fps: u32,
}

/// [`VideoGenerator`] that submits prompts to an inference server and
/// writes the returned container bytes under the videos directory.
///
/// The request carries no client-side timeout: a generation runs for
/// minutes and is never preempted from this side.
pub struct HttpGenerator {
    client: reqwest::Client,
    base_url: String,
    videos_dir: PathBuf,
}

impl HttpGenerator {
    /// Create a generator targeting the inference server at `base_url`
    /// (e.g. `http://localhost:8188`), writing videos into `videos_dir`.
    pub fn new(base_url: impl Into<String>, videos_dir: impl Into<PathBuf>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            videos_dir: videos_dir.into(),
        }
    }

    /// Base HTTP URL of the inference server.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Where the finished video for `job_id` is written.
    pub fn output_path(&self, job_id: &str) -> PathBuf {
        self.videos_dir.join(format!("{job_id}{VIDEO_FILE_EXT}"))
    }
}

#[async_trait]
impl VideoGenerator for HttpGenerator {
    async fn generate(&self, job_id: &str, prompt: &str) -> Result<PathBuf, GenerateError> {
        let url = format!("{}/generate", self.base_url.trim_end_matches('/'));
        tracing::info!(job_id = %job_id, "Submitting prompt to generation backend");

        let response = self
            .client
            .post(&url)
            .json(&GenerateRequest {
                prompt,
                num_frames: DEFAULT_NUM_FRAMES,
                fps: DEFAULT_FPS,
            })
            .send()
            .await
            .map_err(|e| GenerateError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(GenerateError::Backend(format!("{status}: {detail}")));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| GenerateError::Request(e.to_string()))?;

        tokio::fs::create_dir_all(&self.videos_dir).await?;
        let path = self.output_path(job_id);
        tokio::fs::write(&path, &bytes).await?;

        tracing::info!(
            job_id = %job_id,
            path = %path.display(),
            bytes = bytes.len(),
            "Generated video written",
        );
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_path_is_keyed_by_job_id() {
        let generator = HttpGenerator::new("http://localhost:8188", "/tmp/videos");
        assert_eq!(
            generator.output_path("abc"),
            PathBuf::from("/tmp/videos/abc.mp4")
        );
    }
}
