//! Remote browser engine: Browserbase-hosted or plain CDP browsers.

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use tracing::{info, warn};

use webpilot_protocols::{BrowserEngine, EngineError, LanguageModel, RemoteBrowser};

use crate::ai::PageModel;
use crate::browserbase::{BrowserbaseClient, BrowserbaseError};
use crate::cdp::{CdpClient, PageSession};
use crate::config::{RemoteBrowserConfig, RemoteProvider};
use crate::driver::PageDriver;
use crate::page::RemotePage;

/// Hands out remote browsers and tracks the pages it attached to.
pub struct RemoteBrowserEngine {
    config: RemoteBrowserConfig,
    model: Arc<PageModel>,
    browserbase: Option<BrowserbaseClient>,
    pages: DashMap<String, Arc<PageDriver>>,
}

impl RemoteBrowserEngine {
    /// `model` drives act/extract/observe and the agent.
    pub fn new(config: RemoteBrowserConfig, model: Arc<dyn LanguageModel>) -> Self {
        let browserbase = match config.provider {
            RemoteProvider::Browserbase => match BrowserbaseClient::new(
                config.api_url.clone(),
                config.api_key.clone(),
                config.project_id.clone(),
            ) {
                Ok(client) => Some(client),
                Err(e) => {
                    warn!("{}; sessions cannot be created", e);
                    None
                }
            },
            RemoteProvider::Cdp => None,
        };

        Self {
            model: Arc::new(PageModel::new(model, config.model_name.clone())),
            config,
            browserbase,
            pages: DashMap::new(),
        }
    }

    /// Number of pages currently attached.
    pub fn open_pages(&self) -> usize {
        self.pages.len()
    }

    async fn open_browserbase(&self) -> Result<(CdpClient, PageSession, String, Option<String>), EngineError> {
        let bb = self.browserbase.as_ref().ok_or_else(|| {
            EngineError::Provisioning(
                "Browserbase API key and project id are required".to_string(),
            )
        })?;

        let session = bb
            .create_session(self.config.viewport_width, self.config.viewport_height)
            .await
            .map_err(provisioning)?;

        let attached = async {
            let client = CdpClient::connect_ws(&session.connect_url).await?;
            let page = client.first_page_or_new().await?;
            Ok::<_, crate::cdp::CdpError>((client, page))
        }
        .await;

        let (client, page) = match attached {
            Ok(attached) => attached,
            Err(e) => {
                if let Err(release_err) = bb.release_session(&session.id).await {
                    warn!("Failed to release Browserbase session {}: {}", session.id, release_err);
                }
                return Err(EngineError::Provisioning(format!(
                    "cannot connect to Browserbase session {}: {}",
                    session.id, e
                )));
            }
        };

        let live_view = match bb.live_view_url(&session.id).await {
            Ok(url) => Some(url),
            Err(e) => {
                warn!("No live view for Browserbase session {}: {}", session.id, e);
                None
            }
        };

        Ok((client, page, session.id, live_view))
    }

    async fn open_cdp(&self) -> Result<(CdpClient, PageSession, String, Option<String>), EngineError> {
        let client = CdpClient::connect(&self.config.cdp_endpoint)
            .await
            .map_err(|e| EngineError::Provisioning(e.to_string()))?;
        let page = client
            .new_page()
            .await
            .map_err(|e| EngineError::Provisioning(e.to_string()))?;

        if let Err(e) = page
            .set_viewport(self.config.viewport_width, self.config.viewport_height)
            .await
        {
            warn!("Failed to set viewport on {}: {}", page.target_id(), e);
        }

        let id = page.target_id().to_string();
        Ok((client, page, id, None))
    }
}

fn provisioning(e: BrowserbaseError) -> EngineError {
    EngineError::Provisioning(e.to_string())
}

#[async_trait]
impl BrowserEngine for RemoteBrowserEngine {
    fn id(&self) -> &str {
        match self.config.provider {
            RemoteProvider::Browserbase => "browserbase",
            RemoteProvider::Cdp => "cdp",
        }
    }

    async fn open(&self) -> Result<RemoteBrowser, EngineError> {
        let (client, page, remote_id, live_view) = match self.config.provider {
            RemoteProvider::Browserbase => self.open_browserbase().await?,
            RemoteProvider::Cdp => self.open_cdp().await?,
        };

        let driver = Arc::new(PageDriver::new(
            client,
            page,
            self.model.clone(),
            (self.config.viewport_width, self.config.viewport_height),
        ));
        self.pages.insert(remote_id.clone(), driver.clone());
        info!(open = self.open_pages(), "Opened {} browser {}", self.id(), remote_id);

        let handle = Arc::new(RemotePage::new(driver, self.config.agent_max_steps));
        let mut browser = RemoteBrowser::new(handle).with_remote_session_id(remote_id);
        if let Some(url) = live_view {
            browser = browser.with_live_view_url(url);
        }
        Ok(browser)
    }

    async fn close(&self, browser: &RemoteBrowser) -> Result<(), EngineError> {
        let Some(remote_id) = browser.remote_session_id.as_deref() else {
            return Ok(());
        };
        let Some((_, driver)) = self.pages.remove(remote_id) else {
            return Ok(());
        };

        match self.config.provider {
            RemoteProvider::Cdp => driver.shutdown(true).await,
            RemoteProvider::Browserbase => {
                driver.shutdown(false).await;
                if let Some(bb) = &self.browserbase {
                    bb.release_session(remote_id)
                        .await
                        .map_err(|e| EngineError::Connection(e.to_string()))?;
                }
            }
        }

        info!(open = self.open_pages(), "Closed {} browser {}", self.id(), remote_id);
        Ok(())
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
