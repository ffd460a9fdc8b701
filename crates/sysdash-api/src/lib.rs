//! Sysdash API: HTTP front end for the systems status report
//!
//! # Endpoints
//!
//! - `GET /` - liveness, plain `OK`
//! - `GET /systemsstatus` - composite Report as JSON; other methods get 400
//! - `GET /metrics` - Prometheus metrics
pub mod config;
pub mod handlers;
pub mod metrics;
pub mod middleware;

use anyhow::Context;
use axum::{
    routing::{any, get},
    Router,
};
use config::ServerConfig;
use metrics::ReportMetrics;
use reqwest::Client;
use std::sync::Arc;
use sysdash_core::{CountryDirectory, PipelineRunner};
use tokio::signal;

/// Shared, read-only application state. Nothing here is mutated per request
/// except the metric counters.
pub struct AppState {
    pub runner: PipelineRunner,
    pub metrics: ReportMetrics,
}

impl AppState {
    pub fn new(runner: PipelineRunner) -> anyhow::Result<Self> {
        Ok(Self {
            runner,
            metrics: ReportMetrics::new().context("failed to register report metrics")?,
        })
    }

    /// Loads the country directory and wires the seven stages.
    pub fn from_config(config: &ServerConfig) -> anyhow::Result<Self> {
        let directory = Arc::new(CountryDirectory::load(&config.countries_path)?);
        let client = Client::builder()
            .build()
            .context("failed to construct reqwest client")?;
        let stages = sysdash_stages::default_stages(directory, &config.sources, client);
        Self::new(PipelineRunner::new(stages))
    }
}

pub fn create_app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", any(handlers::liveness))
        .route(
            "/systemsstatus",
            get(handlers::systems_status)
                .head(handlers::bad_request)
                .fallback(handlers::bad_request),
        )
        .route("/metrics", get(handlers::metrics))
        .layer(middleware::cors())
        .layer(middleware::trace())
        .with_state(state)
}

pub async fn run(config: ServerConfig) -> anyhow::Result<()> {
    let state = Arc::new(AppState::from_config(&config)?);
    let app = create_app(state);

    let listener = tokio::net::TcpListener::bind(&config.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.listen_addr))?;

    tracing::info!("Sysdash API listening on {}", config.listen_addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
