//! In-memory [`JobStore`] for tests and single-process setups.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;
use vidforge_core::job::StatusUpdate;

use crate::models::job::{JobListQuery, JobRecord};
use crate::store::{JobStore, StoreError};

/// Default page size, matching the repository.
const DEFAULT_LIMIT: i64 = 50;

/// Maximum page size, matching the repository.
const MAX_LIMIT: i64 = 100;

/// HashMap-backed store with the same upsert semantics as the repository.
#[derive(Default)]
pub struct MemoryJobStore {
    records: Mutex<HashMap<String, JobRecord>>,
}

impl MemoryJobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records currently held.
    pub async fn len(&self) -> usize {
        self.records.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.lock().await.is_empty()
    }
}

#[async_trait]
impl JobStore for MemoryJobStore {
    async fn upsert_status(&self, update: &StatusUpdate) -> Result<(), StoreError> {
        let now = chrono::Utc::now();
        let mut records = self.records.lock().await;
        records
            .entry(update.job_id.clone())
            .and_modify(|record| {
                record.status = update.status.as_str().to_string();
                record.video_url = update.video_url.clone();
                record.error = update.error.clone();
                record.updated_at = now;
            })
            .or_insert_with(|| JobRecord {
                id: update.job_id.clone(),
                status: update.status.as_str().to_string(),
                video_url: update.video_url.clone(),
                error: update.error.clone(),
                created_at: now,
                updated_at: now,
            });
        Ok(())
    }

    async fn find_by_id(&self, job_id: &str) -> Result<Option<JobRecord>, StoreError> {
        Ok(self.records.lock().await.get(job_id).cloned())
    }

    async fn list(&self, params: &JobListQuery) -> Result<Vec<JobRecord>, StoreError> {
        let limit = params.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT) as usize;
        let offset = params.offset.unwrap_or(0).max(0) as usize;

        let records = self.records.lock().await;
        let mut matching: Vec<JobRecord> = records
            .values()
            .filter(|record| match params.status {
                Some(status) => record.status == status.as_str(),
                None => true,
            })
            .cloned()
            .collect();

        // Newest first; tie-break on id for a stable order.
        matching.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });

        Ok(matching.into_iter().skip(offset).take(limit).collect())
    }

    async fn healthy(&self) -> bool {
        true
    }
}
