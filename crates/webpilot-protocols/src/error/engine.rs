//! Browser engine errors.

use thiserror::Error;

use super::ProviderError;

/// Failures raised by a [`BrowserEngine`](crate::BrowserEngine) or one of its handles.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The engine could not hand out a reachable browser.
    #[error("Provisioning failed: {0}")]
    Provisioning(String),

    #[error("Connection failed: {0}")]
    Connection(String),

    #[error("Navigation failed: {0}")]
    Navigation(String),

    #[error("Action failed: {0}")]
    Action(String),

    #[error("Extraction failed: {0}")]
    Extraction(String),

    #[error("Screenshot failed: {0}")]
    Screenshot(String),

    #[error("Timeout: {0}")]
    Timeout(String),

    /// The browser behind the handle is gone.
    #[error("Browser session closed")]
    Closed,

    #[error("Model error: {0}")]
    Model(#[from] ProviderError),
}
