//! JavaScript execution for CDP page session.

use serde_json::{Value, json};

use crate::cdp::error::CdpError;

use super::core::PageSession;

impl PageSession {
    /// Evaluate a JavaScript expression and return its value.
    pub async fn evaluate(&self, expression: &str) -> Result<Value, CdpError> {
        let result = self
            .call(
                "Runtime.evaluate",
                Some(json!({
                    "expression": expression,
                    "returnByValue": true,
                    "awaitPromise": true,
                })),
            )
            .await?;

        if let Some(exception) = result.get("exceptionDetails") {
            return Err(CdpError::JavaScript(exception_text(exception)));
        }

        Ok(result["result"]["value"].clone())
    }

    /// Evaluate an expression that returns `JSON.stringify(...)` and parse it.
    pub async fn evaluate_json(&self, expression: &str) -> Result<Value, CdpError> {
        let value = self.evaluate(expression).await?;
        let text = value
            .as_str()
            .ok_or_else(|| CdpError::InvalidResponse("Expected a JSON string".to_string()))?;
        Ok(serde_json::from_str(text)?)
    }
}

/// Prefer the thrown exception's description over the generic "Uncaught".
fn exception_text(exception: &Value) -> String {
    exception["exception"]["description"]
        .as_str()
        .or_else(|| exception["text"].as_str())
        .unwrap_or("Unknown error")
        .to_string()
}
