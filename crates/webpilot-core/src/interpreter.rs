//! Free text to structured commands.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, warn};
use webpilot_protocols::{Command, GenerationOptions, LanguageModel};

use crate::error::InterpretationError;

/// Instructions sent ahead of every user request.
pub const SYSTEM_PROMPT: &str = r#"You are a browser automation command parser. Parse user requests into structured commands.
Available actions:
- navigate: Go to a URL (e.g., "go to google.com", "open youtube")
- act: Perform actions like clicking, typing, scrolling (e.g., "click search button", "type hello")
- extract: Extract information from the page (e.g., "get all links", "extract product prices")
- observe: Analyze what's on the page (e.g., "what can I click here?", "describe the page")
- agent_execute: Complex multi-step tasks (e.g., "search for cars and find the cheapest one")

Return ONLY a valid JSON array in this exact format, without any markdown formatting or additional text:
[
  {
    "action": "navigate|act|extract|observe|agent_execute",
    "command": "specific instruction",
    "parameters": {},
    "confidence": 0.95
  }
]
Use one element per step, in the order the steps must run.
Do not use code blocks or any other formatting."#;

/// Turns user text into an ordered list of [`Command`]s using a language model.
pub struct CommandInterpreter {
    model: Arc<dyn LanguageModel>,
    model_name: String,
    temperature: Option<f32>,
    max_tokens: Option<u32>,
}

impl CommandInterpreter {
    pub fn new(model: Arc<dyn LanguageModel>, model_name: impl Into<String>) -> Self {
        Self {
            model,
            model_name: model_name.into(),
            temperature: None,
            max_tokens: None,
        }
    }

    pub fn with_temperature(mut self, temperature: Option<f32>) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: Option<u32>) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Interpret `user_text`. Any failure yields an empty list.
    pub async fn interpret(&self, user_text: &str) -> Vec<Command> {
        match self.try_interpret(user_text).await {
            Ok(commands) => commands,
            Err(e) => {
                warn!("Failed to interpret user input: {}", e);
                Vec::new()
            }
        }
    }

    /// Interpret `user_text`, reporting why it could not be understood.
    pub async fn try_interpret(&self, user_text: &str) -> Result<Vec<Command>, InterpretationError> {
        let options = GenerationOptions::json()
            .with_temperature(self.temperature)
            .with_max_tokens(self.max_tokens);
        let reply = self
            .model
            .generate_with(&self.model_name, SYSTEM_PROMPT, user_text, &options)
            .await?;
        let commands = parse_commands(&reply)?;
        debug!(count = commands.len(), "Parsed commands");
        Ok(commands)
    }
}

/// Parse raw model output into commands.
///
/// Accepts a bare array, a single object, or `{"commands": [...]}`.
/// Actions are not validated here.
pub fn parse_commands(raw: &str) -> Result<Vec<Command>, InterpretationError> {
    let cleaned = strip_code_fences(raw);
    let value: Value =
        serde_json::from_str(&cleaned).map_err(|e| InterpretationError::Parse(e.to_string()))?;

    let value = match value {
        Value::Object(mut map) if map.get("commands").is_some_and(Value::is_array) => {
            map.remove("commands").unwrap_or_default()
        }
        other => other,
    };

    match value {
        Value::Array(items) => items
            .into_iter()
            .map(serde_json::from_value::<Command>)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| InterpretationError::Shape(e.to_string())),
        Value::Object(_) => serde_json::from_value::<Command>(value)
            .map(|command| vec![command])
            .map_err(|e| InterpretationError::Shape(e.to_string())),
        other => Err(InterpretationError::Shape(format!(
            "expected an array or object, got {other}"
        ))),
    }
}

/// Remove markdown code fences the model may wrap its answer in.
pub fn strip_code_fences(raw: &str) -> String {
    let text = remove_marker(raw, "```json");
    let text = remove_marker(&text, "```");
    let text = text.trim();

    if text.len() >= 2 && text.starts_with('`') && text.ends_with('`') {
        return text[1..text.len() - 1].trim().to_string();
    }
    if text == "`" {
        return String::new();
    }
    text.to_string()
}

/// Drop every occurrence of `marker` together with the whitespace after it.
fn remove_marker(text: &str, marker: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(pos) = rest.find(marker) {
        out.push_str(&rest[..pos]);
        rest = rest[pos + marker.len()..].trim_start();
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
#[path = "interpreter_tests.rs"]
mod tests;
