//! Language model trait definition.

use async_trait::async_trait;

use super::{CompletionRequest, CompletionResponse, GenerationOptions};
use crate::error::ProviderError;
use crate::types::Message;

/// Core trait for text-generation providers.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Returns the provider ID.
    fn id(&self) -> &str;

    /// Generate a completion.
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, ProviderError>;

    /// Send a system prompt and one user turn, return the raw answer text.
    async fn generate(
        &self,
        model: &str,
        system_prompt: &str,
        user_text: &str,
    ) -> Result<String, ProviderError> {
        self.generate_with(model, system_prompt, user_text, &GenerationOptions::default())
            .await
    }

    /// [`generate`](Self::generate) with explicit sampling options.
    async fn generate_with(
        &self,
        model: &str,
        system_prompt: &str,
        user_text: &str,
        options: &GenerationOptions,
    ) -> Result<String, ProviderError> {
        let request = CompletionRequest::new(model, vec![Message::user(user_text)])
            .with_system(system_prompt);
        Ok(self.complete(options.apply(request)).await?.text)
    }
}
