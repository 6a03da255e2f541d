//! Hand-written collaborators for unit tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::{Value, json};
use webpilot_protocols::{
    BrowserAgent, BrowserEngine, BrowserHandle, CompletionRequest, CompletionResponse,
    EngineError, ImageFormat, LanguageModel, ProviderError, RemoteBrowser, WaitPolicy,
};

pub const SCREENSHOT: &[u8] = b"\x89PNG-test";

/// Model returning a canned answer or error.
pub struct MockModel {
    reply: Result<String, ProviderError>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl MockModel {
    pub fn replying(text: &str) -> Self {
        Self {
            reply: Ok(text.to_string()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(error: ProviderError) -> Self {
        Self {
            reply: Err(error),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().clone()
    }
}

#[async_trait]
impl LanguageModel for MockModel {
    fn id(&self) -> &str {
        "mock"
    }

    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, ProviderError> {
        self.requests.lock().push(request);
        self.reply.clone().map(|text| CompletionResponse {
            id: "resp-1".to_string(),
            model: "mock-1".to_string(),
            text,
            usage: None,
        })
    }
}

/// Page recording every primitive it receives.
#[derive(Default)]
pub struct MockHandle {
    pub calls: Mutex<Vec<String>>,
    pub screenshots: AtomicUsize,
    pub agents_created: AtomicUsize,
    pub fail_screenshot: bool,
}

impl MockHandle {
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    pub fn screenshot_count(&self) -> usize {
        self.screenshots.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BrowserHandle for MockHandle {
    async fn goto(&self, url: &str, wait: WaitPolicy) -> Result<(), EngineError> {
        self.calls.lock().push(format!("goto:{url}:{wait:?}"));
        // Only http(s) with a plain host is loadable.
        if url.matches("://").count() != 1 {
            return Err(EngineError::Navigation(format!("invalid URL: {url}")));
        }
        Ok(())
    }

    async fn act(&self, instruction: &str) -> Result<Value, EngineError> {
        self.calls.lock().push(format!("act:{instruction}"));
        if instruction.contains("missing") {
            return Err(EngineError::Action(format!("no element for '{instruction}'")));
        }
        Ok(json!({"success": true, "action": instruction}))
    }

    async fn extract(&self, instruction: &str, schema: &Value) -> Result<Value, EngineError> {
        self.calls.lock().push(format!("extract:{instruction}:{schema}"));
        Ok(json!({"data": ["a", "b"]}))
    }

    async fn observe(&self, instruction: &str) -> Result<Value, EngineError> {
        self.calls.lock().push(format!("observe:{instruction}"));
        Ok(json!([{"description": "Search box", "method": "fill"}]))
    }

    async fn screenshot(&self, format: ImageFormat, full_page: bool) -> Result<Vec<u8>, EngineError> {
        self.calls.lock().push(format!("screenshot:{format:?}:{full_page}"));
        self.screenshots.fetch_add(1, Ordering::SeqCst);
        if self.fail_screenshot {
            return Err(EngineError::Screenshot("target closed".to_string()));
        }
        Ok(SCREENSHOT.to_vec())
    }

    async fn agent(&self) -> Result<Arc<dyn BrowserAgent>, EngineError> {
        self.agents_created.fetch_add(1, Ordering::SeqCst);
        Ok(Arc::new(MockAgent))
    }
}

pub struct MockAgent;

#[async_trait]
impl BrowserAgent for MockAgent {
    async fn execute(&self, instruction: &str) -> Result<Value, EngineError> {
        Ok(json!({"success": true, "completed": true, "message": instruction, "actions": []}))
    }
}

/// Engine handing out [`MockHandle`]s and counting open/close calls.
#[derive(Default)]
pub struct MockEngine {
    pub opened: AtomicUsize,
    pub closed: AtomicUsize,
    pub fail_open: bool,
    pub fail_close: bool,
    pub handles: Mutex<Vec<Arc<MockHandle>>>,
}

impl MockEngine {
    pub fn failing() -> Self {
        Self {
            fail_open: true,
            ..Default::default()
        }
    }

    pub fn opened(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }

    pub fn closed(&self) -> usize {
        self.closed.load(Ordering::SeqCst)
    }

    /// Handle of the most recently opened browser.
    pub fn last_handle(&self) -> Option<Arc<MockHandle>> {
        self.handles.lock().last().cloned()
    }
}

#[async_trait]
impl BrowserEngine for MockEngine {
    fn id(&self) -> &str {
        "mock"
    }

    async fn open(&self) -> Result<RemoteBrowser, EngineError> {
        if self.fail_open {
            return Err(EngineError::Provisioning("no capacity".to_string()));
        }
        let n = self.opened.fetch_add(1, Ordering::SeqCst) + 1;
        let handle = Arc::new(MockHandle::default());
        self.handles.lock().push(Arc::clone(&handle));
        Ok(RemoteBrowser::new(handle)
            .with_remote_session_id(format!("remote-{n}"))
            .with_live_view_url(format!("https://live.example/{n}")))
    }

    async fn close(&self, _browser: &RemoteBrowser) -> Result<(), EngineError> {
        self.closed.fetch_add(1, Ordering::SeqCst);
        if self.fail_close {
            return Err(EngineError::Connection("already gone".to_string()));
        }
        Ok(())
    }
}
