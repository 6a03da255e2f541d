//! Runs command batches against a session.

use serde_json::{Value, json};
use tracing::{debug, warn};
use webpilot_protocols::{ActionKind, Command, CommandBatch, ImageFormat, WaitPolicy};

use crate::error::ExecutionError;
use crate::navigation::normalize_url;
use crate::session::Session;

/// Reported on every failed batch, next to the underlying error.
pub const FAILURE_MESSAGE: &str = "Failed to execute commands";

/// Consolidated outcome of one batch.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregatedResponse {
    pub success: bool,
    /// PNG viewport capture taken after the last command. Absent on failure.
    pub screenshot: Option<Vec<u8>>,
    /// One `Executed: <instruction>` line per completed command.
    pub messages: Vec<String>,
    /// The lone payload when exactly one command ran, otherwise all payloads in order.
    pub results: Option<Value>,
    pub error: Option<String>,
    pub message: Option<String>,
}

impl AggregatedResponse {
    fn success(screenshot: Vec<u8>, messages: Vec<String>, payloads: Vec<Value>) -> Self {
        Self {
            success: true,
            screenshot: Some(screenshot),
            messages,
            results: Some(collapse(payloads)),
            error: None,
            message: None,
        }
    }

    fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            screenshot: None,
            messages: Vec::new(),
            results: None,
            error: Some(error.into()),
            message: Some(FAILURE_MESSAGE.to_string()),
        }
    }
}

fn collapse(mut payloads: Vec<Value>) -> Value {
    if payloads.len() == 1 {
        payloads.remove(0)
    } else {
        Value::Array(payloads)
    }
}

/// Schema handed to `extract`: an object with one free-form `data` member.
pub fn extraction_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "data": {}
        }
    })
}

/// Dispatches each command to the matching browser primitive.
///
/// A batch is all-or-nothing: the first failure stops it, and later
/// commands are never sent.
#[derive(Debug, Default, Clone, Copy)]
pub struct ActionExecutor;

impl ActionExecutor {
    pub fn new() -> Self {
        Self
    }

    /// Execute `batch` on `session`. Never fails; errors are folded into the response.
    pub async fn execute(&self, session: &Session, batch: impl Into<CommandBatch>) -> AggregatedResponse {
        let commands = batch.into().into_commands();
        session.touch();

        match self.run(session, &commands).await {
            Ok(response) => response,
            Err(e) => {
                warn!(session_id = %session.id(), "Command batch failed: {}", e);
                AggregatedResponse::failure(e.to_string())
            }
        }
    }

    async fn run(&self, session: &Session, commands: &[Command]) -> Result<AggregatedResponse, ExecutionError> {
        let mut messages = Vec::with_capacity(commands.len());
        let mut payloads = Vec::with_capacity(commands.len());

        for (index, command) in commands.iter().enumerate() {
            debug!(
                session_id = %session.id(),
                index,
                action = %command.action,
                "Dispatching command"
            );
            let payload = self.dispatch(session, command).await?;
            messages.push(format!("Executed: {}", command.instruction));
            payloads.push(payload);
        }

        let screenshot = session.handle().screenshot(ImageFormat::Png, false).await?;
        Ok(AggregatedResponse::success(screenshot, messages, payloads))
    }

    async fn dispatch(&self, session: &Session, command: &Command) -> Result<Value, ExecutionError> {
        let handle = session.handle();
        let instruction = command.instruction.as_str();

        let payload = match command.kind()? {
            ActionKind::Navigate => {
                let url = normalize_url(instruction);
                handle.goto(&url, WaitPolicy::Load).await?;
                json!({ "navigatedTo": url })
            }
            ActionKind::Act => handle.act(instruction).await?,
            ActionKind::Extract => handle.extract(instruction, &extraction_schema()).await?,
            ActionKind::Observe => handle.observe(instruction).await?,
            ActionKind::AgentExecute => session.agent().await?.execute(instruction).await?,
        };
        Ok(payload)
    }
}

#[cfg(test)]
#[path = "executor_tests.rs"]
mod tests;
