use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::atomic::Ordering;
use std::sync::Arc;

use crate::constants::HEALTH_TEXT;
use crate::AppState;

#[derive(Serialize)]
pub struct ReadinessResponse {
    pub status: &'static str,
    pub total_requests: u64,
    pub failed_requests: u64,
    pub consecutive_failures: u32,
    pub secs_since_last_success: Option<u64>,
    pub secs_since_last_failure: Option<u64>,
}

pub async fn liveness() -> &'static str {
    HEALTH_TEXT
}

pub async fn readiness(State(state): State<Arc<AppState>>) -> Json<ReadinessResponse> {
    let health = &state.health;
    Json(ReadinessResponse {
        status: if health.is_degraded() { "degraded" } else { "ok" },
        total_requests: health.total_requests.load(Ordering::Relaxed),
        failed_requests: health.failed_requests.load(Ordering::Relaxed),
        consecutive_failures: health.consecutive_failures.load(Ordering::Relaxed),
        secs_since_last_success: health.secs_since_success(),
        secs_since_last_failure: health.secs_since_failure(),
    })
}
