//! API Handlers
use crate::AppState;
use axum::{
    extract::State,
    http::{header::CONTENT_TYPE, StatusCode},
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use sysdash_core::RunContext;

pub async fn liveness() -> (StatusCode, &'static str) {
    (StatusCode::OK, "OK")
}

/// Always 200 with a Report, even when a subsystem failed. Only a failure
/// to encode the Report itself maps to 500.
pub async fn systems_status(State(state): State<Arc<AppState>>) -> Response {
    let ctx = RunContext::new();
    let report = state.runner.run(&ctx).await;
    state
        .metrics
        .observe(report.status, ctx.started.elapsed().as_secs_f64());

    match serde_json::to_vec(&report) {
        Ok(body) => (StatusCode::OK, [(CONTENT_TYPE, "application/json")], body).into_response(),
        Err(err) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()).into_response(),
    }
}

pub async fn bad_request() -> StatusCode {
    StatusCode::BAD_REQUEST
}

pub async fn metrics(State(state): State<Arc<AppState>>) -> Response {
    match state.metrics.encode() {
        Ok(text) => (StatusCode::OK, text).into_response(),
        Err(err) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()).into_response(),
    }
}
