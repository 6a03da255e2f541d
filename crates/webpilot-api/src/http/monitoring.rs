//! Health and liveness handlers.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};

use crate::state::AppState;

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub engine: String,
    pub active_sessions: usize,
}

pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.uptime().as_secs(),
        engine: state.engine_id.clone(),
        active_sessions: state.pipeline.sessions().len(),
    })
}

/// Liveness probe (Kubernetes).
pub async fn liveness_probe() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "alive"
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_pipeline;

    #[tokio::test]
    async fn test_liveness_probe() {
        let response = liveness_probe().await;
        assert_eq!(response.0["status"], "alive");
    }

    #[tokio::test]
    async fn test_health_check() {
        let state = Arc::new(AppState::new(test_pipeline(), "stub"));
        state.pipeline.create_session(Some("s1".to_string())).await.unwrap();

        let Json(health) = health_check(State(state)).await;
        assert_eq!(health.status, "healthy");
        assert_eq!(health.version, env!("CARGO_PKG_VERSION"));
        assert_eq!(health.engine, "stub");
        assert_eq!(health.active_sessions, 1);
    }
}
