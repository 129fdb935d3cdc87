use std::sync::Arc;

use vidforge_bus::MessageBus;
use vidforge_db::JobStore;
use vidforge_pipeline::JobRunner;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Job lifecycle records.
    pub store: Arc<dyn JobStore>,
    /// Pub/sub transport (status relays, health checks).
    pub bus: Arc<dyn MessageBus>,
    /// The lifecycle controller driving generations.
    pub runner: Arc<JobRunner>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}
