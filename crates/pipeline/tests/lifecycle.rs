//! End-to-end lifecycle tests for [`JobRunner`] over in-memory infrastructure.

mod common;

use std::sync::Arc;
use std::time::Duration;

use assert_matches::assert_matches;
use common::{build_runner, FailingBus, FailingStore, StubGenerator};
use vidforge_bus::MessageBus;
use vidforge_core::job::{JobStatus, StatusUpdate};
use vidforge_core::topics::TOPIC_JOB_UPDATES;
use vidforge_db::JobStore;
use vidforge_pipeline::{JobRunner, SlotPool, StatusSink, SubmitError};

#[tokio::test]
async fn successful_submit_leaves_one_completed_record() {
    let (runner, store, _bus, _generator) = build_runner(2, StubGenerator::ok());

    let video_url = runner
        .submit("abc".to_string(), "a red ball".to_string())
        .await
        .expect("submit should succeed");

    assert_eq!(video_url, "/videos/abc.mp4");
    assert_eq!(store.len().await, 1);

    let record = store.find_by_id("abc").await.unwrap().unwrap();
    assert_eq!(record.status, "completed");
    assert_eq!(record.video_url.as_deref(), Some("/videos/abc.mp4"));
    assert!(record.error.is_none());
}

#[tokio::test]
async fn failed_generation_records_failed_and_reraises() {
    let (runner, store, _bus, _generator) =
        build_runner(2, StubGenerator::failing("CUDA out of memory"));

    let err = runner
        .submit("abc".to_string(), "a red ball".to_string())
        .await
        .expect_err("submit should fail");

    assert_matches!(err, SubmitError::Generation(_));

    let record = store.find_by_id("abc").await.unwrap().unwrap();
    assert_eq!(record.status, "failed");
    assert!(record.video_url.is_none());
    let detail = record.error.expect("error detail must be set");
    assert!(detail.contains("Video generation failed"), "got: {detail}");
    assert!(detail.contains("CUDA out of memory"), "got: {detail}");
}

#[tokio::test]
async fn invalid_submissions_are_rejected_without_any_record() {
    let (runner, store, _bus, generator) = build_runner(2, StubGenerator::ok());

    let err = runner
        .submit("".to_string(), "a red ball".to_string())
        .await
        .expect_err("empty job id must be rejected");
    assert_matches!(err, SubmitError::InvalidJob(_));

    let err = runner
        .submit("abc".to_string(), "".to_string())
        .await
        .expect_err("empty prompt must be rejected");
    assert_matches!(err, SubmitError::InvalidJob(_));

    assert!(store.is_empty().await, "rejected input must not be recorded");
    assert_eq!(generator.entered(), 0, "rejected input must not reach the generator");
}

#[tokio::test]
async fn resubmission_with_different_outcome_keeps_latest_write_only() {
    let (runner, store, _bus, _generator) = build_runner(1, StubGenerator::ok());
    runner
        .submit("abc".to_string(), "a red ball".to_string())
        .await
        .unwrap();

    // Same id resubmitted against a failing backend: the single record must
    // flip to the latest outcome, not duplicate.
    let failing = Arc::new(StubGenerator::failing("backend gone"));
    let sink = StatusSink::new(store.clone(), Arc::new(vidforge_bus::InMemoryBus::new()));
    let rerun = JobRunner::new(SlotPool::new(1), sink, failing);
    rerun
        .submit("abc".to_string(), "a red ball".to_string())
        .await
        .expect_err("second run fails");

    assert_eq!(store.len().await, 1);
    let record = store.find_by_id("abc").await.unwrap().unwrap();
    assert_eq!(record.status, "failed");
    assert!(record.video_url.is_none());
    assert!(record.error.is_some());
}

#[tokio::test]
async fn broadcast_sequence_is_processing_then_completed() {
    let (runner, _store, bus, _generator) = build_runner(
        1,
        StubGenerator::ok().with_delay(Duration::from_millis(50)),
    );
    let mut updates = bus.subscribe(TOPIC_JOB_UPDATES).await.unwrap();

    runner
        .submit("abc".to_string(), "a red ball".to_string())
        .await
        .unwrap();

    // The first durable/broadcast status is `processing` — there is no
    // `queued` message on this path, by design.
    let first: StatusUpdate = serde_json::from_str(&updates.recv().await.unwrap()).unwrap();
    assert_eq!(first.job_id, "abc");
    assert_eq!(first.status, JobStatus::Processing);
    assert!(first.video_url.is_none());
    assert!(first.error.is_none());

    let second: StatusUpdate = serde_json::from_str(&updates.recv().await.unwrap()).unwrap();
    assert_eq!(second.job_id, "abc");
    assert_eq!(second.status, JobStatus::Completed);
    assert_eq!(second.video_url.as_deref(), Some("/videos/abc.mp4"));
    assert!(second.error.is_none());

    // And nothing else.
    let extra = tokio::time::timeout(Duration::from_millis(100), updates.recv()).await;
    assert!(extra.is_err(), "no further updates expected");
}

#[tokio::test]
async fn sink_failures_do_not_abort_a_successful_job() {
    let sink = StatusSink::new(Arc::new(FailingStore), Arc::new(FailingBus));
    let runner = JobRunner::new(SlotPool::new(1), sink, Arc::new(StubGenerator::ok()));

    let video_url = runner
        .submit("abc".to_string(), "a red ball".to_string())
        .await
        .expect("a job must not fail just because its status could not be recorded");
    assert_eq!(video_url, "/videos/abc.mp4");
}
