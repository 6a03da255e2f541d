//! One attached page plus the model that drives it.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde_json::{Value, json};
use tracing::{debug, info, warn};

use webpilot_protocols::{EngineError, ImageFormat, WaitPolicy};

use crate::ai::{
    self, ACT_PROMPT, ActMethod, ActionPlan, EXTRACT_PROMPT, OBSERVE_PROMPT, PageModel, PageSnapshot,
};
use crate::ai::scripts;
use crate::cdp::{CdpClient, CdpError, LoadState, PageSession, ScreenshotFormat};

/// Pause after an input event so handlers and navigations can start.
const SETTLE: Duration = Duration::from_millis(300);

/// Share of the viewport a page scroll moves.
const SCROLL_FRACTION: f64 = 0.8;

/// Map a CDP failure onto the engine taxonomy; `wrap` picks the
/// per-operation variant for everything that is not a timeout or a lost socket.
pub(crate) fn map_cdp(err: CdpError, wrap: fn(String) -> EngineError) -> EngineError {
    match err {
        CdpError::Timeout(msg) => EngineError::Timeout(msg),
        CdpError::SessionClosed => EngineError::Closed,
        other => wrap(other.to_string()),
    }
}

/// Drives a single page over CDP.
pub(crate) struct PageDriver {
    client: CdpClient,
    page: PageSession,
    model: Arc<PageModel>,
    viewport: (u32, u32),
    closed: AtomicBool,
}

impl PageDriver {
    pub fn new(client: CdpClient, page: PageSession, model: Arc<PageModel>, viewport: (u32, u32)) -> Self {
        Self {
            client,
            page,
            model,
            viewport,
            closed: AtomicBool::new(false),
        }
    }

    pub fn target_id(&self) -> &str {
        self.page.target_id()
    }

    pub fn model(&self) -> &Arc<PageModel> {
        &self.model
    }

    fn ensure_open(&self) -> Result<(), EngineError> {
        if self.closed.load(Ordering::SeqCst) || self.client.is_closed() {
            return Err(EngineError::Closed);
        }
        Ok(())
    }

    pub async fn goto(&self, url: &str, wait: WaitPolicy) -> Result<(), EngineError> {
        self.ensure_open()?;
        let state = match wait {
            WaitPolicy::Load => LoadState::Complete,
            WaitPolicy::DomContentLoaded => LoadState::Interactive,
            WaitPolicy::Commit => LoadState::None,
        };
        self.page
            .navigate(url, state)
            .await
            .map_err(|e| map_cdp(e, EngineError::Navigation))?;
        info!("Page {} navigated to {}", self.target_id(), url);
        Ok(())
    }

    /// Index the page's interactive elements.
    pub async fn snapshot(&self) -> Result<PageSnapshot, EngineError> {
        self.ensure_open()?;
        let value = self
            .page
            .evaluate_json(scripts::SNAPSHOT)
            .await
            .map_err(|e| map_cdp(e, EngineError::Action))?;
        serde_json::from_value(value).map_err(|e| EngineError::Action(format!("bad page snapshot: {}", e)))
    }

    async fn page_text(&self) -> Result<String, EngineError> {
        let value = self
            .page
            .evaluate(scripts::PAGE_TEXT)
            .await
            .map_err(|e| map_cdp(e, EngineError::Extraction))?;
        let text = value.as_str().unwrap_or_default();
        Ok(ai::truncate_chars(text, scripts::MAX_TEXT_CHARS).to_string())
    }

    pub async fn act(&self, instruction: &str) -> Result<Value, EngineError> {
        let snapshot = self.snapshot().await?;
        let reply = self
            .model
            .ask(ACT_PROMPT, ai::act_prompt(instruction, &snapshot))
            .await?;
        let plan = ActionPlan::from_reply(reply, &snapshot)
            .map_err(|e| EngineError::Action(format!("{}: {}", instruction, e)))?;
        debug!("Action plan for {:?}: {:?}", instruction, plan);

        self.perform(&plan).await?;

        let target = plan
            .element
            .and_then(|i| snapshot.element(i))
            .map(|e| e.text.clone())
            .unwrap_or_default();
        Ok(json!({
            "success": true,
            "action": instruction,
            "method": plan.method,
            "element": plan.element,
            "target": target,
            "value": plan.value,
        }))
    }

    async fn perform(&self, plan: &ActionPlan) -> Result<(), EngineError> {
        let value = plan.value.as_deref().unwrap_or_default();
        let act_err = |e: CdpError| map_cdp(e, EngineError::Action);

        match (plan.method, plan.element) {
            (ActMethod::Click, Some(index)) => {
                let (x, y) = self.element_center(index).await?;
                self.page.click(x, y).await.map_err(act_err)?;
            }
            (ActMethod::Hover, Some(index)) => {
                let (x, y) = self.element_center(index).await?;
                self.page.mouse_move(x, y).await.map_err(act_err)?;
            }
            (ActMethod::Type, Some(index)) => {
                let (x, y) = self.element_center(index).await?;
                self.page.click(x, y).await.map_err(act_err)?;
                self.page.type_text(value).await.map_err(act_err)?;
            }
            (ActMethod::Fill, Some(index)) => {
                self.run_element_script(&scripts::fill_element(index, value), index, "fill")
                    .await?;
            }
            (ActMethod::Select, Some(index)) => {
                self.run_element_script(&scripts::select_option(index, value), index, "select")
                    .await?;
            }
            (ActMethod::Press, element) => {
                if let Some(index) = element {
                    let (x, y) = self.element_center(index).await?;
                    self.page.click(x, y).await.map_err(act_err)?;
                }
                self.page.press_key(value).await.map_err(act_err)?;
            }
            (ActMethod::Scroll, Some(index)) => {
                self.element_center(index).await?;
            }
            (ActMethod::Scroll, None) => {
                let (width, height) = self.viewport;
                let delta = height as f64 * SCROLL_FRACTION;
                let delta = if value.eq_ignore_ascii_case("up") { -delta } else { delta };
                self.page
                    .scroll(width as f64 / 2.0, height as f64 / 2.0, 0.0, delta)
                    .await
                    .map_err(act_err)?;
            }
            (method, None) => {
                return Err(EngineError::Action(format!("{:?} needs a target element", method)));
            }
        }

        self.settle().await;
        Ok(())
    }

    /// Give a triggered navigation time to start, then wait for it.
    async fn settle(&self) {
        tokio::time::sleep(SETTLE).await;
        if let Err(e) = self.page.wait_for_load(LoadState::Interactive).await {
            debug!("Page did not settle after action: {}", e);
        }
    }

    async fn element_center(&self, index: u32) -> Result<(f64, f64), EngineError> {
        let value = self
            .page
            .evaluate(&scripts::element_center(index))
            .await
            .map_err(|e| map_cdp(e, EngineError::Action))?;
        let point: Value = match value.as_str() {
            Some(text) => serde_json::from_str(text)
                .map_err(|e| EngineError::Action(format!("bad element position: {}", e)))?,
            None => return Err(EngineError::Action(format!("element {} is gone", index))),
        };
        match (point["x"].as_f64(), point["y"].as_f64()) {
            (Some(x), Some(y)) => Ok((x, y)),
            _ => Err(EngineError::Action(format!("element {} has no position", index))),
        }
    }

    async fn run_element_script(&self, script: &str, index: u32, what: &str) -> Result<(), EngineError> {
        let done = self
            .page
            .evaluate(script)
            .await
            .map_err(|e| map_cdp(e, EngineError::Action))?;
        if done.as_bool() != Some(true) {
            return Err(EngineError::Action(format!("cannot {} element {}", what, index)));
        }
        Ok(())
    }

    pub async fn extract(&self, instruction: &str, schema: &Value) -> Result<Value, EngineError> {
        self.ensure_open()?;
        let url = self.page.get_url().await.map_err(|e| map_cdp(e, EngineError::Extraction))?;
        let title = self.page.get_title().await.map_err(|e| map_cdp(e, EngineError::Extraction))?;
        let text = self.page_text().await?;

        let reply = self
            .model
            .ask(EXTRACT_PROMPT, ai::extract_prompt(instruction, schema, &url, &title, &text))
            .await?;
        Ok(ai::wrap_extraction(reply))
    }

    pub async fn observe(&self, instruction: &str) -> Result<Value, EngineError> {
        let snapshot = self.snapshot().await?;
        let reply = self
            .model
            .ask(OBSERVE_PROMPT, ai::observe_prompt(instruction, &snapshot))
            .await?;
        let observations = ai::parse_observations(reply, &snapshot);
        serde_json::to_value(observations).map_err(|e| EngineError::Action(e.to_string()))
    }

    pub async fn screenshot(&self, format: ImageFormat, full_page: bool) -> Result<Vec<u8>, EngineError> {
        self.ensure_open()?;
        let format = match format {
            ImageFormat::Png => ScreenshotFormat::Png,
            ImageFormat::Jpeg => ScreenshotFormat::Jpeg,
        };
        let data = self
            .page
            .screenshot(format, full_page)
            .await
            .map_err(|e| map_cdp(e, EngineError::Screenshot))?;
        STANDARD
            .decode(data)
            .map_err(|e| EngineError::Screenshot(format!("invalid image data: {}", e)))
    }

    /// Detach from the browser, optionally closing the page first.
    pub async fn shutdown(&self, close_target: bool) {
        if self.closed.swap(true, Ordering::SeqCst) {
            return;
        }
        if close_target {
            if let Err(e) = self.client.close_page(self.target_id()).await {
                warn!("Failed to close page {}: {}", self.target_id(), e);
            }
        }
        self.client.disconnect().await;
        debug!("Page driver {} shut down", self.target_id());
    }
}
