use axum::extract::{Path, Query, State};
use axum::{routing::get, Json, Router};
use serde::Serialize;
use vidforge_core::error::CoreError;
use vidforge_db::models::job::{JobListQuery, JobRecord};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

#[derive(Debug, Serialize)]
struct JobListResponse {
    jobs: Vec<JobRecord>,
}

/// GET /jobs/{id}
async fn get_job(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> AppResult<Json<JobRecord>> {
    let record = state
        .store
        .find_by_id(&job_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Job",
            id: job_id,
        }))?;

    Ok(Json(record))
}

/// GET /jobs?status=&limit=&offset=
///
/// Newest first. An unknown `status` value is rejected at extraction.
async fn list_jobs(
    State(state): State<AppState>,
    Query(params): Query<JobListQuery>,
) -> AppResult<Json<JobListResponse>> {
    let jobs = state.store.list(&params).await?;
    Ok(Json(JobListResponse { jobs }))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/jobs", get(list_jobs))
        .route("/jobs/{id}", get(get_job))
}
