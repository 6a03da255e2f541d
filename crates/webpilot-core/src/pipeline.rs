//! Caller-facing operations over the interpreter, store and executor.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::error::PipelineError;
use crate::executor::ActionExecutor;
use crate::interpreter::CommandInterpreter;
use crate::response::{CommandOutcome, ResponseAssembler};
use crate::session::{SessionStore, SessionSummary};

/// Result of a successful create-session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionCreated {
    pub session_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub live_view_url: Option<String>,
}

/// User text in, screenshot and structured result out.
pub struct Pipeline {
    interpreter: CommandInterpreter,
    sessions: Arc<SessionStore>,
    executor: ActionExecutor,
}

impl Pipeline {
    pub fn new(interpreter: CommandInterpreter, sessions: Arc<SessionStore>) -> Self {
        Self {
            interpreter,
            sessions,
            executor: ActionExecutor::new(),
        }
    }

    pub fn sessions(&self) -> &Arc<SessionStore> {
        &self.sessions
    }

    /// Provision a browser under `id`, or under a fresh UUID when none is given.
    pub async fn create_session(&self, id: Option<String>) -> Result<SessionCreated, PipelineError> {
        let id = id
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        let session = self.sessions.create(id).await?;
        Ok(SessionCreated {
            session_id: session.id().to_string(),
            live_view_url: session.live_view_url().map(str::to_string),
        })
    }

    /// Interpret `user_text` and run it on the session.
    ///
    /// An unknown session fails before anything is interpreted. A failed
    /// batch is not an error: it is reported inside the outcome.
    pub async fn execute_command(
        &self,
        session_id: &str,
        user_text: &str,
    ) -> Result<CommandOutcome, PipelineError> {
        let session = self
            .sessions
            .get(session_id)
            .ok_or_else(|| PipelineError::SessionNotFound(session_id.to_string()))?;

        let commands = self.interpreter.interpret(user_text).await;
        info!(
            session_id = %session_id,
            commands = commands.len(),
            "Executing user command"
        );

        let response = self.executor.execute(&session, commands.clone()).await;
        Ok(ResponseAssembler::assemble(
            response,
            user_text,
            commands,
            session.live_view_url().map(str::to_string),
        ))
    }

    /// Close a session. Unknown ids are accepted silently.
    pub async fn close_session(&self, session_id: &str) {
        self.sessions.close(session_id).await;
    }

    pub fn list_sessions(&self) -> Vec<SessionSummary> {
        self.sessions.list()
    }

    /// Close every remaining session.
    pub async fn shutdown(&self) -> usize {
        let closed = self.sessions.close_all().await;
        if closed > 0 {
            info!(closed, "Closed remaining sessions");
        }
        closed
    }
}

#[cfg(test)]
#[path = "pipeline_tests.rs"]
mod tests;
