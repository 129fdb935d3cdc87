//! Shared test doubles for pipeline integration tests.
//!
//! Not every binary uses every helper.
#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::mpsc;
use vidforge_bus::{BusError, MessageBus};
use vidforge_core::job::StatusUpdate;
use vidforge_db::models::job::{JobListQuery, JobRecord};
use vidforge_db::{JobStore, MemoryJobStore, StoreError};
use vidforge_engine::{GenerateError, VideoGenerator};
use vidforge_pipeline::{JobRunner, SlotPool, StatusSink};

/// Instrumented [`VideoGenerator`] stub.
///
/// Counts total and concurrent entries so tests can assert the admission
/// bound, and optionally sleeps and/or fails.
pub struct StubGenerator {
    delay: Duration,
    fail_with: Option<String>,
    entered: AtomicUsize,
    concurrent: AtomicUsize,
    max_concurrent: AtomicUsize,
}

impl StubGenerator {
    /// A stub that succeeds immediately.
    pub fn ok() -> Self {
        Self {
            delay: Duration::ZERO,
            fail_with: None,
            entered: AtomicUsize::new(0),
            concurrent: AtomicUsize::new(0),
            max_concurrent: AtomicUsize::new(0),
        }
    }

    /// A stub that fails every call with the given backend message.
    pub fn failing(message: &str) -> Self {
        Self {
            fail_with: Some(message.to_string()),
            ..Self::ok()
        }
    }

    /// Sleep this long inside every call.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Total number of calls that entered the generator.
    pub fn entered(&self) -> usize {
        self.entered.load(Ordering::SeqCst)
    }

    /// Highest number of calls observed running at the same time.
    pub fn max_concurrent(&self) -> usize {
        self.max_concurrent.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl VideoGenerator for StubGenerator {
    async fn generate(&self, job_id: &str, _prompt: &str) -> Result<PathBuf, GenerateError> {
        self.entered.fetch_add(1, Ordering::SeqCst);
        let now_running = self.concurrent.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_concurrent.fetch_max(now_running, Ordering::SeqCst);

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        self.concurrent.fetch_sub(1, Ordering::SeqCst);

        match &self.fail_with {
            Some(message) => Err(GenerateError::Backend(message.clone())),
            None => Ok(PathBuf::from(format!("/tmp/videos/{job_id}.mp4"))),
        }
    }
}

/// A [`JobStore`] whose every operation fails.
pub struct FailingStore;

#[async_trait]
impl JobStore for FailingStore {
    async fn upsert_status(&self, _update: &StatusUpdate) -> Result<(), StoreError> {
        Err(StoreError::Database(sqlx::Error::PoolClosed))
    }

    async fn find_by_id(&self, _job_id: &str) -> Result<Option<JobRecord>, StoreError> {
        Err(StoreError::Database(sqlx::Error::PoolClosed))
    }

    async fn list(&self, _params: &JobListQuery) -> Result<Vec<JobRecord>, StoreError> {
        Err(StoreError::Database(sqlx::Error::PoolClosed))
    }

    async fn healthy(&self) -> bool {
        false
    }
}

/// A [`MessageBus`] whose every operation fails.
pub struct FailingBus;

#[async_trait]
impl MessageBus for FailingBus {
    async fn publish(&self, _topic: &str, _payload: &str) -> Result<(), BusError> {
        Err(BusError::Publish("bus unavailable".to_string()))
    }

    async fn subscribe(&self, _topic: &str) -> Result<mpsc::Receiver<String>, BusError> {
        Err(BusError::Subscribe("bus unavailable".to_string()))
    }

    async fn healthy(&self) -> bool {
        false
    }
}

/// Build a runner over in-memory infrastructure.
///
/// Returns the runner plus the store, bus, and generator so tests can
/// observe them.
pub fn build_runner(
    capacity: usize,
    generator: StubGenerator,
) -> (
    Arc<JobRunner>,
    Arc<MemoryJobStore>,
    Arc<vidforge_bus::InMemoryBus>,
    Arc<StubGenerator>,
) {
    let store = Arc::new(MemoryJobStore::new());
    let bus = Arc::new(vidforge_bus::InMemoryBus::new());
    let generator = Arc::new(generator);

    let sink = StatusSink::new(store.clone(), bus.clone());
    let runner = Arc::new(JobRunner::new(
        SlotPool::new(capacity),
        sink,
        generator.clone(),
    ));

    (runner, store, bus, generator)
}

/// Poll the store until `job_id` reaches `status` or the timeout elapses.
pub async fn wait_for_status(store: &MemoryJobStore, job_id: &str, status: &str) -> JobRecord {
    let deadline = tokio::time::Instant::now() + Duration::from_secs(5);
    loop {
        if let Some(record) = store.find_by_id(job_id).await.unwrap() {
            if record.status == status {
                return record;
            }
        }
        if tokio::time::Instant::now() > deadline {
            panic!("timed out waiting for job {job_id} to reach status {status}");
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}
