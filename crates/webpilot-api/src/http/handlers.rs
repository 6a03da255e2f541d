//! Browser session handlers.

use std::sync::Arc;

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use serde::{Deserialize, Serialize};
use tracing::info;

use webpilot_core::{CommandOutcome, SessionSummary};

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSessionRequest {
    /// Id to register the session under. A UUID is generated when absent.
    #[serde(default)]
    pub session_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSessionResponse {
    pub session_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub live_view_url: Option<String>,
    pub message: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecuteCommandRequest {
    pub session_id: String,
    pub user_input: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CloseSessionRequest {
    pub session_id: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct SessionsResponse {
    pub count: usize,
    pub sessions: Vec<SessionSummary>,
}

fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    payload
        .map(|Json(body)| body)
        .map_err(|e| ApiError::BadRequest(e.body_text()))
}

fn required(field: &str, value: &str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        return Err(ApiError::BadRequest(format!("{} is required", field)));
    }
    Ok(())
}

/// Create a browser session. The body is optional.
pub async fn create_session(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<CreateSessionResponse>, ApiError> {
    let request: CreateSessionRequest = if body.iter().all(u8::is_ascii_whitespace) {
        CreateSessionRequest::default()
    } else {
        serde_json::from_slice(&body)
            .map_err(|e| ApiError::BadRequest(format!("Invalid request body: {}", e)))?
    };

    let created = state.pipeline.create_session(request.session_id).await?;
    info!(session_id = %created.session_id, "Browser session created");

    Ok(Json(CreateSessionResponse {
        session_id: created.session_id,
        live_view_url: created.live_view_url,
        message: "Browser session created successfully".to_string(),
    }))
}

/// Interpret and run user text on a session.
pub async fn execute_command(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ExecuteCommandRequest>, JsonRejection>,
) -> Result<Json<CommandOutcome>, ApiError> {
    let request = json_body(payload)?;
    required("sessionId", &request.session_id)?;
    required("userInput", &request.user_input)?;

    let outcome = state
        .pipeline
        .execute_command(&request.session_id, &request.user_input)
        .await?;
    Ok(Json(outcome))
}

/// Close a session. Unknown ids succeed too.
pub async fn close_session(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CloseSessionRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let request = json_body(payload)?;
    state.pipeline.close_session(&request.session_id).await;

    Ok(Json(MessageResponse {
        message: "Session closed successfully".to_string(),
    }))
}

pub async fn list_sessions(State(state): State<Arc<AppState>>) -> Json<SessionsResponse> {
    let sessions = state.pipeline.list_sessions();
    Json(SessionsResponse {
        count: sessions.len(),
        sessions,
    })
}

#[cfg(test)]
#[path = "handlers_tests.rs"]
mod tests;
