//! OpenAI-compatible provider implementation.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use webpilot_protocols::types::Usage;
use webpilot_protocols::{CompletionRequest, CompletionResponse, LanguageModel, ProviderError};

use crate::api::{ApiErrorBody, ApiRequest, ApiResponse, ResponseFormat};
use crate::converter::convert_messages;

pub const DEFAULT_API_URL: &str = "https://api.openai.com/v1/chat/completions";

const DEFAULT_TIMEOUT_SECONDS: u64 = 60;

/// Chat completions client for OpenAI and OpenAI-compatible gateways.
pub struct OpenAIProvider {
    id: String,
    api_key: String,
    api_url: String,
    timeout_seconds: u64,
    client: reqwest::Client,
}

impl OpenAIProvider {
    pub fn new(api_key: String) -> Self {
        Self::with_url(api_key, DEFAULT_API_URL.to_string())
    }

    /// Create provider with custom API URL (for OpenAI-compatible APIs).
    pub fn with_url(api_key: String, api_url: String) -> Self {
        Self {
            id: "openai".to_string(),
            api_key,
            api_url,
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            client: reqwest::Client::new(),
        }
    }

    /// Override the provider id reported in logs.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout_seconds = seconds;
        self
    }

    fn build_request(&self, request: &CompletionRequest) -> ApiRequest {
        ApiRequest {
            model: request.model.clone(),
            messages: convert_messages(request),
            max_tokens: request.max_tokens,
            temperature: request.temperature,
            response_format: request.json_mode.then(ResponseFormat::json_object),
        }
    }

    async fn send_request(&self, api_request: &ApiRequest) -> Result<String, ProviderError> {
        let response = self
            .client
            .post(&self.api_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .timeout(Duration::from_secs(self.timeout_seconds))
            .json(api_request)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| self.transport_error(e))?;

        if !status.is_success() {
            let message = serde_json::from_str::<ApiErrorBody>(&body)
                .map(|b| b.error.message())
                .unwrap_or(body);
            return Err(ProviderError::from_api_response(status.as_u16(), message));
        }

        Ok(body)
    }

    fn transport_error(&self, e: reqwest::Error) -> ProviderError {
        if e.is_timeout() {
            ProviderError::Timeout(self.timeout_seconds)
        } else {
            ProviderError::Network(e.to_string())
        }
    }
}

/// Parse a 2xx body. Gateways such as OpenRouter report upstream failures
/// as `{"error": ...}` with a success status.
fn parse_body(body: &str) -> Result<CompletionResponse, ProviderError> {
    if let Ok(err) = serde_json::from_str::<ApiErrorBody>(body) {
        return Err(ProviderError::ApiError {
            status: err.error.status().unwrap_or(200),
            message: err.error.message(),
        });
    }

    let api_response: ApiResponse =
        serde_json::from_str(body).map_err(|e| ProviderError::InvalidResponse(e.to_string()))?;

    let choice = api_response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| ProviderError::InvalidResponse("response has no choices".to_string()))?;
    debug!(finish_reason = ?choice.finish_reason, "Completion received");

    Ok(CompletionResponse {
        id: api_response.id,
        model: api_response.model,
        text: choice.message.content.unwrap_or_default(),
        usage: api_response.usage.map(|u| Usage {
            prompt_tokens: u.prompt_tokens,
            completion_tokens: u.completion_tokens,
        }),
    })
}

#[async_trait]
impl LanguageModel for OpenAIProvider {
    fn id(&self) -> &str {
        &self.id
    }

    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, ProviderError> {
        let api_request = self.build_request(&request);
        debug!(provider = %self.id, model = %api_request.model, "Sending completion request");
        let body = self.send_request(&api_request).await?;
        parse_body(&body)
    }
}

#[cfg(test)]
#[path = "provider_tests.rs"]
mod tests;
