//! Shared fixtures for API integration tests.
//!
//! Everything runs over the in-memory store and bus so the suite needs no
//! database or Redis; the router carries the same middleware stack as
//! production.
#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;
use vidforge_api::config::ServerConfig;
use vidforge_api::router::build_router;
use vidforge_api::state::AppState;
use vidforge_bus::InMemoryBus;
use vidforge_db::MemoryJobStore;
use vidforge_engine::{GenerateError, VideoGenerator};
use vidforge_pipeline::{JobRunner, SlotPool, StatusSink};

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        max_concurrent_generations: 2,
        generator_url: "http://localhost:8188".to_string(),
        videos_dir: "/tmp/videos".to_string(),
    }
}

/// A generator that succeeds immediately.
pub struct OkGenerator;

#[async_trait]
impl VideoGenerator for OkGenerator {
    async fn generate(&self, job_id: &str, _prompt: &str) -> Result<PathBuf, GenerateError> {
        Ok(PathBuf::from(format!("/tmp/videos/{job_id}.mp4")))
    }
}

/// A generator that fails every call.
pub struct FailingGenerator;

#[async_trait]
impl VideoGenerator for FailingGenerator {
    async fn generate(&self, _job_id: &str, _prompt: &str) -> Result<PathBuf, GenerateError> {
        Err(GenerateError::Backend("CUDA out of memory".to_string()))
    }
}

/// Build the full application router over in-memory infrastructure.
///
/// Returns the store and bus alongside so tests can seed and observe them.
pub fn build_test_app(
    generator: Arc<dyn VideoGenerator>,
) -> (Router, Arc<MemoryJobStore>, Arc<InMemoryBus>) {
    let store = Arc::new(MemoryJobStore::new());
    let bus = Arc::new(InMemoryBus::new());

    let sink = StatusSink::new(store.clone(), bus.clone());
    let runner = Arc::new(JobRunner::new(SlotPool::new(2), sink, generator));

    let state = AppState {
        store: store.clone(),
        bus: bus.clone(),
        runner,
        config: Arc::new(test_config()),
    };

    (build_router(state), store, bus)
}

/// Issue a GET request against the app.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .uri(uri)
            .body(Body::empty())
            .expect("build request"),
    )
    .await
    .expect("infallible")
}

/// Issue a POST request with a JSON body against the app.
pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .expect("build request"),
    )
    .await
    .expect("infallible")
}

/// Collect a response body as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("collect body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be JSON")
}
