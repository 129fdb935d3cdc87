//! Job lifecycle row model and query DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use vidforge_core::job::JobStatus;
use vidforge_core::types::Timestamp;

/// A row from the `jobs` table.
///
/// `status` is stored as its lowercase string form; parse with
/// [`JobStatus::from_str`](std::str::FromStr) when the enum is needed.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct JobRecord {
    pub id: String,
    pub status: String,
    pub video_url: Option<String>,
    pub error: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Query parameters for job listing.
#[derive(Debug, Default, Deserialize)]
pub struct JobListQuery {
    /// Filter by lifecycle status.
    pub status: Option<JobStatus>,
    /// Maximum number of results. Defaults to 50, capped at 100.
    pub limit: Option<i64>,
    /// Number of results to skip. Defaults to 0.
    pub offset: Option<i64>,
}
