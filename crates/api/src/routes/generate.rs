use axum::extract::State;
use axum::{routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use vidforge_core::job::JobStatus;

use crate::error::AppResult;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
struct GenerateRequest {
    prompt: String,
}

#[derive(Debug, Serialize)]
struct GenerateResponse {
    job_id: String,
    video_url: String,
    status: JobStatus,
}

/// POST /generate
///
/// Direct synchronous path: mints a job id, runs the full lifecycle, and
/// answers with the terminal result. Bypasses the bus entirely; useful for
/// ad-hoc calls and smoke tests. Expect the response to take as long as a
/// generation does.
async fn generate(
    State(state): State<AppState>,
    Json(input): Json<GenerateRequest>,
) -> AppResult<Json<GenerateResponse>> {
    let job_id = uuid::Uuid::new_v4().to_string();

    let video_url = state.runner.submit(job_id.clone(), input.prompt).await?;

    Ok(Json(GenerateResponse {
        job_id,
        video_url,
        status: JobStatus::Completed,
    }))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/generate", post(generate))
}
