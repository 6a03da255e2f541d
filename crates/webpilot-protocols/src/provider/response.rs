//! Completion response types.

use serde::{Deserialize, Serialize};

use crate::types::Usage;

/// Response from a completion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionResponse {
    /// Provider-assigned ID for this completion.
    pub id: String,

    /// Model that answered.
    pub model: String,

    /// Raw assistant text.
    pub text: String,

    /// Token usage, when reported.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<Usage>,
}
