//! Navigation operations for CDP page session.

use std::time::{Duration, Instant};

use serde_json::json;
use tracing::debug;

use crate::cdp::error::CdpError;

use super::core::PageSession;

const LOAD_TIMEOUT: Duration = Duration::from_secs(30);
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Document readiness a navigation waits for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    /// `document.readyState == "complete"`.
    Complete,
    /// `interactive` or `complete`.
    Interactive,
    /// Do not wait.
    None,
}

impl LoadState {
    /// Whether `ready_state` satisfies this state.
    pub fn is_reached(&self, ready_state: &str) -> bool {
        match self {
            LoadState::Complete => ready_state == "complete",
            LoadState::Interactive => matches!(ready_state, "interactive" | "complete"),
            LoadState::None => true,
        }
    }
}

/// Set on the outgoing document so its readiness is not mistaken for the new one's.
const PENDING_MARKER: &str = "__webpilotPendingNavigation";

impl PageSession {
    /// Navigate to URL and wait for `state`. Returns the frame id.
    pub async fn navigate(&self, url: &str, state: LoadState) -> Result<String, CdpError> {
        let marked = state != LoadState::None
            && self
                .evaluate(&format!("window.{} = true", PENDING_MARKER))
                .await
                .is_ok();

        let result = self
            .call("Page.navigate", Some(json!({"url": url})))
            .await?;

        if let Some(error) = result.get("errorText").and_then(|e| e.as_str()) {
            return Err(CdpError::NavigationFailed(format!("{}: {}", url, error)));
        }

        let frame_id = result["frameId"].as_str().unwrap_or("main").to_string();

        // Same-document navigations carry no loaderId and keep the marker.
        let replaces_document = marked && result.get("loaderId").is_some();
        self.poll_ready_state(state, replaces_document).await?;

        debug!("Navigated to {}", url);
        Ok(frame_id)
    }

    /// Poll `document.readyState` until `state` is reached.
    pub async fn wait_for_load(&self, state: LoadState) -> Result<(), CdpError> {
        self.poll_ready_state(state, false).await
    }

    async fn poll_ready_state(&self, state: LoadState, replaces_document: bool) -> Result<(), CdpError> {
        if state == LoadState::None {
            return Ok(());
        }
        let expression = ready_state_expression(replaces_document);
        let start = Instant::now();

        loop {
            match self.evaluate(&expression).await {
                Ok(ready) if ready.as_str().is_some_and(|s| state.is_reached(s)) => return Ok(()),
                Ok(_) => {}
                Err(e) if is_transient(&e) => debug!("Document not ready yet: {}", e),
                Err(e) => return Err(e),
            }

            if start.elapsed() > LOAD_TIMEOUT {
                return Err(CdpError::Timeout("Page load timeout".to_string()));
            }

            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }

    /// Get current URL.
    pub async fn get_url(&self) -> Result<String, CdpError> {
        let result = self.evaluate("window.location.href").await?;
        Ok(result.as_str().unwrap_or("").to_string())
    }

    /// Get page title.
    pub async fn get_title(&self) -> Result<String, CdpError> {
        let result = self.evaluate("document.title").await?;
        Ok(result.as_str().unwrap_or("").to_string())
    }
}

/// Readiness expression. While the old document is still attached it answers `"stale"`.
pub(super) fn ready_state_expression(replaces_document: bool) -> String {
    if replaces_document {
        format!("window.{} ? 'stale' : document.readyState", PENDING_MARKER)
    } else {
        "document.readyState".to_string()
    }
}

/// Errors raised while the execution context is being swapped out.
pub(super) fn is_transient(err: &CdpError) -> bool {
    matches!(err, CdpError::JavaScript(_) | CdpError::Protocol { .. })
}
