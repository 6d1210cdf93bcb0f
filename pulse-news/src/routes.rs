//! HTTP routes for the news signal service.

use axum::{extract::State, response::Json};
use serde::Serialize;
use std::sync::Arc;

use crate::NewsState;

// ============================================================================
// Response Types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub service: String,
}

#[derive(Debug, Serialize)]
pub struct ProcessResponse {
    pub status: String,
    pub impact_score: f64,
    pub articles: usize,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub scheduler_enabled: bool,
    pub last_run: Option<String>,
    pub last_signal: Option<f64>,
    pub last_retrieval_ok: bool,
    pub passes: u64,
}

// ============================================================================
// Route Handlers
// ============================================================================

/// Health check endpoint
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        service: "pulse-news".to_string(),
    })
}

/// Run one aggregation pass over the latest news and report the signal.
///
/// Never fails with a 5xx for pipeline reasons: degradations inside the
/// pipeline surface as a 0.0 signal with a degraded status string.
pub async fn process_latest(State(state): State<Arc<NewsState>>) -> Json<ProcessResponse> {
    let report = state.aggregator.run_pass(state.source.as_ref()).await;
    state.poller.record(&report).await;

    let (status, message) = if report.retrieval_ok {
        ("success", "NFP news processed successfully")
    } else {
        ("degraded", "article retrieval failed, zero signal emitted")
    };

    Json(ProcessResponse {
        status: status.to_string(),
        impact_score: report.signal,
        articles: report.articles,
        message: message.to_string(),
    })
}

/// Get service status
pub async fn get_status(State(state): State<Arc<NewsState>>) -> Json<StatusResponse> {
    let poller_status = *state.poller.status_handle().read().await;

    Json(StatusResponse {
        scheduler_enabled: state.config.scheduler.enabled,
        last_run: poller_status.last_run.map(|t| t.to_rfc3339()),
        last_signal: poller_status.last_signal,
        last_retrieval_ok: poller_status.last_retrieval_ok,
        passes: poller_status.passes,
    })
}
