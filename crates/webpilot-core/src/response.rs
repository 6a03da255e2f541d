//! Caller-facing response shaping.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use webpilot_protocols::Command;

use crate::executor::AggregatedResponse;

/// Batch result as the caller sees it. The screenshot is base64 PNG.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandResult {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub screenshot: Option<String>,
    #[serde(default)]
    pub messages: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub results: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Full payload for one execute-command request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandOutcome {
    pub result: CommandResult,
    pub parsed_command: Vec<Command>,
    pub user_input: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub live_view_url: Option<String>,
}

pub struct ResponseAssembler;

impl ResponseAssembler {
    pub fn assemble(
        response: AggregatedResponse,
        user_input: impl Into<String>,
        commands: Vec<Command>,
        live_view_url: Option<String>,
    ) -> CommandOutcome {
        let AggregatedResponse {
            success,
            screenshot,
            messages,
            results,
            error,
            message,
        } = response;

        CommandOutcome {
            result: CommandResult {
                success,
                screenshot: screenshot.map(|bytes| STANDARD.encode(bytes)),
                messages,
                results,
                error,
                message,
            },
            parsed_command: commands,
            user_input: user_input.into(),
            live_view_url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn success() -> AggregatedResponse {
        AggregatedResponse {
            success: true,
            screenshot: Some(b"png-bytes".to_vec()),
            messages: vec!["Executed: go to example.com".to_string()],
            results: Some(json!({"navigatedTo": "https://example.com"})),
            error: None,
            message: None,
        }
    }

    #[test]
    fn test_assemble_success_payload() {
        let commands = vec![Command::new("navigate", "go to example.com")];
        let outcome = ResponseAssembler::assemble(
            success(),
            "go to example.com",
            commands,
            Some("https://live/1".to_string()),
        );

        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["result"]["success"], true);
        assert_eq!(json["result"]["screenshot"], STANDARD.encode(b"png-bytes"));
        assert_eq!(json["result"]["results"]["navigatedTo"], "https://example.com");
        assert!(json["result"].get("error").is_none());
        assert_eq!(json["parsedCommand"][0]["action"], "navigate");
        assert_eq!(json["parsedCommand"][0]["instruction"], "go to example.com");
        assert_eq!(json["userInput"], "go to example.com");
        assert_eq!(json["liveViewUrl"], "https://live/1");
    }

    #[test]
    fn test_assemble_failure_payload() {
        let response = AggregatedResponse {
            success: false,
            screenshot: None,
            messages: Vec::new(),
            results: None,
            error: Some("Unknown action: bogus".to_string()),
            message: Some("Failed to execute commands".to_string()),
        };
        let outcome = ResponseAssembler::assemble(response, "do bogus", Vec::new(), None);

        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["result"]["success"], false);
        assert_eq!(json["result"]["error"], "Unknown action: bogus");
        assert_eq!(json["result"]["message"], "Failed to execute commands");
        assert!(json["result"].get("screenshot").is_none());
        assert!(json.get("liveViewUrl").is_none());
        assert_eq!(json["parsedCommand"], json!([]));
    }

    #[test]
    fn test_outcome_deserializes() {
        let outcome = ResponseAssembler::assemble(success(), "x", Vec::new(), None);
        let text = serde_json::to_string(&outcome).unwrap();
        let back: CommandOutcome = serde_json::from_str(&text).unwrap();
        assert_eq!(back, outcome);
    }
}
