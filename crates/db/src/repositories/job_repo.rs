//! Repository for the `jobs` table.
//!
//! Every status write is an upsert keyed on `id`: the coordinator may see a
//! job before the submitting service's row is visible, and repeated writes
//! for one id must land on one row with the latest write winning.

use sqlx::PgPool;
use vidforge_core::job::StatusUpdate;

use crate::models::job::{JobListQuery, JobRecord};

/// Column list for `jobs` queries.
const COLUMNS: &str = "id, status, video_url, error, created_at, updated_at";

/// Maximum page size for job listing.
const MAX_LIMIT: i64 = 100;

/// Default page size for job listing.
const DEFAULT_LIMIT: i64 = 50;

/// Provides the upsert and read operations for job lifecycle records.
pub struct JobRepo;

impl JobRepo {
    /// Upsert one status write.
    ///
    /// Inserts the row on first contact, otherwise overwrites `status`,
    /// `video_url`, and `error` wholesale and refreshes `updated_at`.
    /// Overwriting both optional columns (rather than coalescing) keeps the
    /// at-most-one-of invariant between `video_url` and `error` intact on
    /// every write.
    pub async fn upsert_status(pool: &PgPool, update: &StatusUpdate) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO jobs (id, status, video_url, error) \
             VALUES ($1, $2, $3, $4) \
             ON CONFLICT (id) DO UPDATE \
             SET status = EXCLUDED.status, \
                 video_url = EXCLUDED.video_url, \
                 error = EXCLUDED.error, \
                 updated_at = NOW()",
        )
        .bind(&update.job_id)
        .bind(update.status.as_str())
        .bind(&update.video_url)
        .bind(&update.error)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Find a job record by its id.
    pub async fn find_by_id(pool: &PgPool, id: &str) -> Result<Option<JobRecord>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM jobs WHERE id = $1");
        sqlx::query_as::<_, JobRecord>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List job records, newest first, with optional status filter and
    /// pagination.
    pub async fn list(pool: &PgPool, params: &JobListQuery) -> Result<Vec<JobRecord>, sqlx::Error> {
        let limit = params.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
        let offset = params.offset.unwrap_or(0).max(0);

        let records = if let Some(status) = params.status {
            let query = format!(
                "SELECT {COLUMNS} FROM jobs \
                 WHERE status = $1 \
                 ORDER BY created_at DESC \
                 LIMIT $2 OFFSET $3"
            );
            sqlx::query_as::<_, JobRecord>(&query)
                .bind(status.as_str())
                .bind(limit)
                .bind(offset)
                .fetch_all(pool)
                .await?
        } else {
            let query = format!(
                "SELECT {COLUMNS} FROM jobs \
                 ORDER BY created_at DESC \
                 LIMIT $1 OFFSET $2"
            );
            sqlx::query_as::<_, JobRecord>(&query)
                .bind(limit)
                .bind(offset)
                .fetch_all(pool)
                .await?
        };

        Ok(records)
    }
}
