//! OpenAI-compatible chat completions provider for WebPilot.
//!
//! Works against any endpoint speaking the OpenAI chat completions dialect:
//! OpenAI itself, OpenRouter, or Gemini's OpenAI-compatible surface.

mod api;
mod converter;
mod provider;

pub use provider::{DEFAULT_API_URL, OpenAIProvider};
