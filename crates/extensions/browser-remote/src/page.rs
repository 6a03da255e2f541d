//! [`BrowserHandle`] over a CDP-attached page.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use webpilot_protocols::{BrowserAgent, BrowserHandle, EngineError, ImageFormat, WaitPolicy};

use crate::agent::PageAgent;
use crate::driver::PageDriver;

pub struct RemotePage {
    driver: Arc<PageDriver>,
    agent_max_steps: u32,
}

impl RemotePage {
    pub(crate) fn new(driver: Arc<PageDriver>, agent_max_steps: u32) -> Self {
        Self {
            driver,
            agent_max_steps,
        }
    }
}

#[async_trait]
impl BrowserHandle for RemotePage {
    async fn goto(&self, url: &str, wait: WaitPolicy) -> Result<(), EngineError> {
        self.driver.goto(url, wait).await
    }

    async fn act(&self, instruction: &str) -> Result<Value, EngineError> {
        self.driver.act(instruction).await
    }

    async fn extract(&self, instruction: &str, schema: &Value) -> Result<Value, EngineError> {
        self.driver.extract(instruction, schema).await
    }

    async fn observe(&self, instruction: &str) -> Result<Value, EngineError> {
        self.driver.observe(instruction).await
    }

    async fn screenshot(&self, format: ImageFormat, full_page: bool) -> Result<Vec<u8>, EngineError> {
        self.driver.screenshot(format, full_page).await
    }

    async fn agent(&self) -> Result<Arc<dyn BrowserAgent>, EngineError> {
        let model = self.driver.model().clone();
        Ok(Arc::new(PageAgent::new(
            self.driver.clone(),
            model,
            self.agent_max_steps,
        )))
    }
}
