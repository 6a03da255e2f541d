//! Stub collaborators for router and handler tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use serde_json::{Value, json};

use webpilot_core::{CommandInterpreter, Pipeline, SessionStore};
use webpilot_protocols::{
    BrowserAgent, BrowserEngine, BrowserHandle, CompletionRequest, CompletionResponse,
    EngineError, ImageFormat, LanguageModel, ProviderError, RemoteBrowser, WaitPolicy,
};

/// 1x1 transparent PNG.
pub const PIXEL: &[u8] = &[
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44, 0x52,
];

/// Always answers with one navigate command.
pub struct StubModel;

#[async_trait]
impl LanguageModel for StubModel {
    fn id(&self) -> &str {
        "stub"
    }

    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, ProviderError> {
        let user = request.messages[0].content.text();
        let target = user.trim_start_matches("go to ").trim();
        Ok(CompletionResponse {
            id: "stub-1".to_string(),
            model: request.model,
            text: json!([{"action": "navigate", "command": target}]).to_string(),
            usage: None,
        })
    }
}

pub struct StubHandle;

#[async_trait]
impl BrowserHandle for StubHandle {
    async fn goto(&self, url: &str, _wait: WaitPolicy) -> Result<(), EngineError> {
        if url.contains("unreachable") {
            return Err(EngineError::Navigation(format!("{}: net::ERR_NAME_NOT_RESOLVED", url)));
        }
        Ok(())
    }

    async fn act(&self, _instruction: &str) -> Result<Value, EngineError> {
        Ok(json!({"success": true}))
    }

    async fn extract(&self, _instruction: &str, _schema: &Value) -> Result<Value, EngineError> {
        Ok(json!({"data": null}))
    }

    async fn observe(&self, _instruction: &str) -> Result<Value, EngineError> {
        Ok(json!([]))
    }

    async fn screenshot(&self, _format: ImageFormat, _full_page: bool) -> Result<Vec<u8>, EngineError> {
        Ok(PIXEL.to_vec())
    }

    async fn agent(&self) -> Result<Arc<dyn BrowserAgent>, EngineError> {
        Err(EngineError::Action("no agent".to_string()))
    }
}

#[derive(Default)]
pub struct StubEngine {
    pub fail_open: AtomicBool,
    pub opened: AtomicUsize,
    pub closed: AtomicUsize,
}

#[async_trait]
impl BrowserEngine for StubEngine {
    fn id(&self) -> &str {
        "stub"
    }

    async fn open(&self) -> Result<RemoteBrowser, EngineError> {
        if self.fail_open.load(Ordering::SeqCst) {
            return Err(EngineError::Provisioning("no browsers left".to_string()));
        }
        let n = self.opened.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(RemoteBrowser::new(Arc::new(StubHandle))
            .with_remote_session_id(format!("remote-{}", n))
            .with_live_view_url(format!("https://live.example/{}", n)))
    }

    async fn close(&self, _browser: &RemoteBrowser) -> Result<(), EngineError> {
        self.closed.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

pub fn pipeline_with(engine: Arc<StubEngine>) -> Arc<Pipeline> {
    let interpreter = CommandInterpreter::new(Arc::new(StubModel), "stub-model");
    Arc::new(Pipeline::new(interpreter, Arc::new(SessionStore::new(engine))))
}

pub fn test_pipeline() -> Arc<Pipeline> {
    pipeline_with(Arc::new(StubEngine::default()))
}
