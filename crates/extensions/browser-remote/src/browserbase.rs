//! Browserbase REST client: session provisioning, live view and release.

use std::time::Duration;

use serde::Deserialize;
use serde_json::json;
use thiserror::Error;
use tracing::debug;

const API_KEY_HEADER: &str = "X-BB-API-Key";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Error)]
pub enum BrowserbaseError {
    #[error("Browserbase credentials missing: {0}")]
    MissingCredentials(&'static str),

    #[error("Browserbase API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Browserbase request failed: {0}")]
    Network(String),

    #[error("Invalid Browserbase response: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for BrowserbaseError {
    fn from(e: reqwest::Error) -> Self {
        BrowserbaseError::Network(e.to_string())
    }
}

/// A freshly provisioned hosted browser.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrowserbaseSession {
    pub id: String,
    /// CDP WebSocket URL for the browser.
    pub connect_url: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DebugLinks {
    debugger_fullscreen_url: Option<String>,
    debugger_url: Option<String>,
}

/// Client for the Browserbase sessions API.
pub struct BrowserbaseClient {
    api_url: String,
    api_key: String,
    project_id: String,
    client: reqwest::Client,
}

impl BrowserbaseClient {
    pub fn new(
        api_url: impl Into<String>,
        api_key: Option<String>,
        project_id: Option<String>,
    ) -> Result<Self, BrowserbaseError> {
        let api_key = api_key
            .filter(|k| !k.is_empty())
            .ok_or(BrowserbaseError::MissingCredentials("api_key"))?;
        let project_id = project_id
            .filter(|p| !p.is_empty())
            .ok_or(BrowserbaseError::MissingCredentials("project_id"))?;

        Ok(Self {
            api_url: api_url.into().trim_end_matches('/').to_string(),
            api_key,
            project_id,
            client: reqwest::Client::new(),
        })
    }

    /// Provision a browser with the given viewport.
    pub async fn create_session(
        &self,
        width: u32,
        height: u32,
    ) -> Result<BrowserbaseSession, BrowserbaseError> {
        let body = json!({
            "projectId": self.project_id,
            "browserSettings": {
                "viewport": {"width": width, "height": height}
            }
        });

        let response = self
            .client
            .post(format!("{}/sessions", self.api_url))
            .header(API_KEY_HEADER, &self.api_key)
            .timeout(REQUEST_TIMEOUT)
            .json(&body)
            .send()
            .await?;
        let response = check_status(response).await?;

        let session: BrowserbaseSession = response
            .json()
            .await
            .map_err(|e| BrowserbaseError::InvalidResponse(e.to_string()))?;
        debug!("Browserbase session created: {}", session.id);
        Ok(session)
    }

    /// URL where a human can watch the session.
    pub async fn live_view_url(&self, session_id: &str) -> Result<String, BrowserbaseError> {
        let response = self
            .client
            .get(format!("{}/sessions/{}/debug", self.api_url, session_id))
            .header(API_KEY_HEADER, &self.api_key)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?;
        let response = check_status(response).await?;

        let links: DebugLinks = response
            .json()
            .await
            .map_err(|e| BrowserbaseError::InvalidResponse(e.to_string()))?;
        links
            .debugger_fullscreen_url
            .or(links.debugger_url)
            .ok_or_else(|| BrowserbaseError::InvalidResponse("no debugger URL".to_string()))
    }

    /// Ask Browserbase to shut the session down.
    pub async fn release_session(&self, session_id: &str) -> Result<(), BrowserbaseError> {
        let body = json!({
            "projectId": self.project_id,
            "status": "REQUEST_RELEASE",
        });

        let response = self
            .client
            .post(format!("{}/sessions/{}", self.api_url, session_id))
            .header(API_KEY_HEADER, &self.api_key)
            .timeout(REQUEST_TIMEOUT)
            .json(&body)
            .send()
            .await?;
        check_status(response).await?;

        debug!("Browserbase session released: {}", session_id);
        Ok(())
    }
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, BrowserbaseError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response.text().await.unwrap_or_default();
    Err(BrowserbaseError::Api {
        status: status.as_u16(),
        message,
    })
}

#[cfg(test)]
#[path = "browserbase_tests.rs"]
mod tests;
