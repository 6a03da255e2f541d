//! Error types for the execution pipeline.

use thiserror::Error;
use webpilot_protocols::{EngineError, ProviderError, UnknownAction};

/// Why free text could not be turned into commands.
///
/// Never escapes [`CommandInterpreter::interpret`](crate::CommandInterpreter::interpret),
/// which degrades to an empty command list.
#[derive(Debug, Error)]
pub enum InterpretationError {
    #[error("Language model request failed: {0}")]
    Provider(#[from] ProviderError),

    #[error("Interpreter output is not valid JSON: {0}")]
    Parse(String),

    #[error("Unexpected interpreter output shape: {0}")]
    Shape(String),
}

/// Session store failures.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Session not found: {0}")]
    NotFound(String),

    #[error("Session already exists: {0}")]
    Exists(String),

    #[error("Failed to provision browser: {0}")]
    Provisioning(#[source] EngineError),
}

/// A failure that aborts a command batch.
#[derive(Debug, Error)]
pub enum ExecutionError {
    #[error(transparent)]
    UnknownAction(#[from] UnknownAction),

    #[error(transparent)]
    Remote(#[from] EngineError),
}

/// Errors surfaced by the caller-facing [`Pipeline`](crate::Pipeline) operations.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Session not found: {0}")]
    SessionNotFound(String),

    #[error("Session already exists: {0}")]
    SessionExists(String),

    #[error("Failed to create browser session: {0}")]
    Provisioning(String),
}

impl From<SessionError> for PipelineError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::NotFound(id) => PipelineError::SessionNotFound(id),
            SessionError::Exists(id) => PipelineError::SessionExists(id),
            SessionError::Provisioning(e) => PipelineError::Provisioning(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_action_message() {
        let err = ExecutionError::from(UnknownAction("bogus".to_string()));
        assert_eq!(err.to_string(), "Unknown action: bogus");
    }

    #[test]
    fn test_remote_error_is_transparent() {
        let err = ExecutionError::from(EngineError::Navigation("net::ERR_ABORTED".to_string()));
        assert_eq!(err.to_string(), "Navigation failed: net::ERR_ABORTED");
    }

    #[test]
    fn test_session_error_into_pipeline_error() {
        let err: PipelineError = SessionError::NotFound("abc".to_string()).into();
        assert!(matches!(err, PipelineError::SessionNotFound(id) if id == "abc"));

        let err: PipelineError =
            SessionError::Provisioning(EngineError::Provisioning("quota".to_string())).into();
        assert!(err.to_string().contains("quota"));
    }

    #[test]
    fn test_interpretation_error_from_provider() {
        let err = InterpretationError::from(ProviderError::Timeout(30));
        assert!(matches!(err, InterpretationError::Provider(_)));
    }
}
