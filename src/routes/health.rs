//! Health check endpoint for container orchestration.
//!
//! A liveness probe: it answers 200 whenever the process can serve HTTP and
//! reports which instance answered.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::count::iso_timestamp;
use crate::state::AppState;

pub const HEALTHY: &str = "healthy";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub service: String,
    pub pod: String,
    pub timestamp: String,
}

/// Health check handler.
pub async fn health(State(state): State<AppState>) -> Json<HealthStatus> {
    Json(HealthStatus {
        status: HEALTHY.to_string(),
        service: state.config.service.name.clone(),
        pod: state.identity.to_string(),
        timestamp: iso_timestamp(),
    })
}
