//! HTTP route definitions.

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::http::handlers::{close_session, create_session, execute_command, list_sessions};
use crate::http::monitoring;
use crate::state::AppState;

/// Create the main router.
///
/// ```text
/// /api/browser
///   POST   /create-session   - Provision a browser session
///   POST   /execute-command  - Interpret user text and run it
///   POST   /close-session    - Release a session
///   GET    /sessions         - List live sessions
///
/// /health  - Health check
/// /livez   - Liveness probe
/// ```
pub fn create_router(state: Arc<AppState>) -> Router {
    let browser_routes = Router::new()
        .route("/create-session", post(create_session))
        .route("/execute-command", post(execute_command))
        .route("/close-session", post(close_session))
        .route("/sessions", get(list_sessions))
        .with_state(state.clone());

    let monitoring_routes = Router::new()
        .route("/health", get(monitoring::health_check))
        .with_state(state);

    // Liveness probe has no state dependency
    let liveness_route = Router::new().route("/livez", get(monitoring::liveness_probe));

    Router::new()
        .nest("/api/browser", browser_routes)
        .merge(monitoring_routes)
        .merge(liveness_route)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
}

#[cfg(test)]
#[path = "routes_tests.rs"]
mod tests;
