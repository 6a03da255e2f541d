//! Browser engine, handle and agent traits.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use super::{ImageFormat, WaitPolicy};
use crate::error::EngineError;

/// Provisions and releases remote browsers.
#[async_trait]
pub trait BrowserEngine: Send + Sync {
    /// Returns the engine ID.
    fn id(&self) -> &str;

    /// Allocate a new live browser.
    ///
    /// Fails with [`EngineError::Provisioning`] when no reachable browser
    /// could be obtained.
    async fn open(&self) -> Result<RemoteBrowser, EngineError>;

    /// Release a browser previously returned by [`open`](Self::open).
    async fn close(&self, browser: &RemoteBrowser) -> Result<(), EngineError>;
}

/// Automation primitives on one live page.
#[async_trait]
pub trait BrowserHandle: Send + Sync {
    /// Load `url` and wait according to `wait`.
    async fn goto(&self, url: &str, wait: WaitPolicy) -> Result<(), EngineError>;

    /// Perform a natural-language action (click, type, scroll...).
    async fn act(&self, instruction: &str) -> Result<Value, EngineError>;

    /// Extract structured data described by `instruction`, shaped by `schema`.
    async fn extract(&self, instruction: &str, schema: &Value) -> Result<Value, EngineError>;

    /// Describe what on the page matches `instruction`.
    async fn observe(&self, instruction: &str) -> Result<Value, EngineError>;

    /// Capture the page.
    async fn screenshot(&self, format: ImageFormat, full_page: bool) -> Result<Vec<u8>, EngineError>;

    /// Create an autonomous agent bound to this page.
    async fn agent(&self) -> Result<Arc<dyn BrowserAgent>, EngineError>;
}

/// Runs a whole multi-step task on its own.
#[async_trait]
pub trait BrowserAgent: Send + Sync {
    /// Execute `instruction` to completion and return the execution trace.
    async fn execute(&self, instruction: &str) -> Result<Value, EngineError>;
}

/// A browser handed out by an engine.
#[derive(Clone)]
pub struct RemoteBrowser {
    /// Page handle.
    pub handle: Arc<dyn BrowserHandle>,
    /// The engine's own identifier for the browser.
    pub remote_session_id: Option<String>,
    /// URL where a human can watch the browser live.
    pub live_view_url: Option<String>,
}

impl RemoteBrowser {
    pub fn new(handle: Arc<dyn BrowserHandle>) -> Self {
        Self {
            handle,
            remote_session_id: None,
            live_view_url: None,
        }
    }

    pub fn with_remote_session_id(mut self, id: impl Into<String>) -> Self {
        self.remote_session_id = Some(id.into());
        self
    }

    pub fn with_live_view_url(mut self, url: impl Into<String>) -> Self {
        self.live_view_url = Some(url.into());
        self
    }
}

impl fmt::Debug for RemoteBrowser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemoteBrowser")
            .field("remote_session_id", &self.remote_session_id)
            .field("live_view_url", &self.live_view_url)
            .finish_non_exhaustive()
    }
}
