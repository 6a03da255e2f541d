//! Language model wrapper used by the page primitives and the agent.

use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use webpilot_protocols::{GenerationOptions, LanguageModel, ProviderError};

const MAX_TOKENS: u32 = 2048;

/// Sends JSON-mode prompts at temperature 0 and parses the reply.
pub struct PageModel {
    model: Arc<dyn LanguageModel>,
    model_name: String,
}

impl PageModel {
    pub fn new(model: Arc<dyn LanguageModel>, model_name: impl Into<String>) -> Self {
        Self {
            model,
            model_name: model_name.into(),
        }
    }

    /// Ask for a JSON answer.
    pub async fn ask(&self, system: &str, user: String) -> Result<Value, ProviderError> {
        let options = GenerationOptions::json()
            .with_max_tokens(Some(MAX_TOKENS))
            .with_temperature(Some(0.0));
        let reply = self
            .model
            .generate_with(&self.model_name, system, &user, &options)
            .await?;
        debug!("Page model replied with {} chars", reply.len());
        parse_json_reply(&reply)
    }
}

/// Parse a model reply as JSON, tolerating code fences and surrounding prose.
pub fn parse_json_reply(text: &str) -> Result<Value, ProviderError> {
    let trimmed = text.trim();
    let unfenced = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .map(|rest| rest.trim_end().trim_end_matches("```").trim())
        .unwrap_or(trimmed);

    if let Ok(value) = serde_json::from_str(unfenced) {
        return Ok(value);
    }

    // Fall back to the outermost object or array embedded in prose.
    for (open, close) in [('{', '}'), ('[', ']')] {
        if let (Some(start), Some(end)) = (unfenced.find(open), unfenced.rfind(close)) {
            if start < end {
                if let Ok(value) = serde_json::from_str(&unfenced[start..=end]) {
                    return Ok(value);
                }
            }
        }
    }

    Err(ProviderError::InvalidResponse(format!(
        "model reply is not JSON: {}",
        truncate_chars(trimmed, 200)
    )))
}

pub(crate) fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
