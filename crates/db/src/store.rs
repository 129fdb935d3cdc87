//! The persistent-store seam.
//!
//! [`JobStore`] is what the pipeline writes through; [`PgJobStore`] is the
//! production implementation over the connection pool, and
//! [`MemoryJobStore`](crate::memory::MemoryJobStore) backs tests and
//! single-process setups. State transitions are not enforced here — the
//! contract is upsert-by-id with the latest write winning.

use async_trait::async_trait;
use vidforge_core::job::StatusUpdate;

use crate::models::job::{JobListQuery, JobRecord};
use crate::repositories::JobRepo;
use crate::DbPool;

/// Errors from the persistent store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Write/read access to job lifecycle records.
#[async_trait]
pub trait JobStore: Send + Sync {
    /// Upsert one status write, keyed by `update.job_id`.
    async fn upsert_status(&self, update: &StatusUpdate) -> Result<(), StoreError>;

    /// Fetch one record by job id.
    async fn find_by_id(&self, job_id: &str) -> Result<Option<JobRecord>, StoreError>;

    /// List records, newest first.
    async fn list(&self, params: &JobListQuery) -> Result<Vec<JobRecord>, StoreError>;

    /// Whether the backing store is currently reachable.
    async fn healthy(&self) -> bool;
}

/// PostgreSQL-backed store delegating to [`JobRepo`].
#[derive(Clone)]
pub struct PgJobStore {
    pool: DbPool,
}

impl PgJobStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl JobStore for PgJobStore {
    async fn upsert_status(&self, update: &StatusUpdate) -> Result<(), StoreError> {
        JobRepo::upsert_status(&self.pool, update).await?;
        Ok(())
    }

    async fn find_by_id(&self, job_id: &str) -> Result<Option<JobRecord>, StoreError> {
        Ok(JobRepo::find_by_id(&self.pool, job_id).await?)
    }

    async fn list(&self, params: &JobListQuery) -> Result<Vec<JobRecord>, StoreError> {
        Ok(JobRepo::list(&self.pool, params).await?)
    }

    async fn healthy(&self) -> bool {
        crate::health_check(&self.pool).await.is_ok()
    }
}
