use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use vidforge_api::config::ServerConfig;
use vidforge_api::router::build_router;
use vidforge_api::state::AppState;
use vidforge_bus::RedisBus;
use vidforge_db::PgJobStore;
use vidforge_engine::HttpGenerator;
use vidforge_pipeline::{IntakeLoop, JobRunner, SlotPool, StatusSink};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vidforge_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Database ---
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = vidforge_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    vidforge_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database health check passed");

    vidforge_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    // --- Message bus ---
    let redis_url = std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".into());
    let bus = Arc::new(
        RedisBus::connect(&redis_url)
            .await
            .expect("Failed to connect to Redis"),
    );

    // --- Pipeline ---
    let store = Arc::new(PgJobStore::new(pool));
    let generator = Arc::new(HttpGenerator::new(
        config.generator_url.clone(),
        config.videos_dir.clone(),
    ));

    let sink = StatusSink::new(store.clone(), bus.clone());
    let runner = Arc::new(JobRunner::new(
        SlotPool::new(config.max_concurrent_generations),
        sink,
        generator,
    ));
    tracing::info!(
        slots = config.max_concurrent_generations,
        "Generation pipeline ready",
    );

    // Spawn the intake loop (consumes job submissions from the bus).
    let intake_cancel = tokio_util::sync::CancellationToken::new();
    let intake = IntakeLoop::new(bus.clone(), Arc::clone(&runner));
    let intake_handle = {
        let cancel = intake_cancel.clone();
        tokio::spawn(async move { intake.run(cancel).await })
    };
    tracing::info!("Intake loop started");

    // --- App state ---
    let state = AppState {
        store,
        bus,
        runner,
        config: Arc::new(config.clone()),
    };

    // --- Router ---
    let app = build_router(state);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, cleaning up");

    // Stop the intake loop. Generations already holding a slot run to
    // completion on their own tasks.
    intake_cancel.cancel();
    let _ = tokio::time::timeout(Duration::from_secs(5), intake_handle).await;
    tracing::info!("Intake loop stopped");

    tracing::info!("Graceful shutdown complete");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix) so the server
/// shuts down cleanly whether stopped interactively or by a process
/// manager (e.g. systemd, Docker, Kubernetes).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
