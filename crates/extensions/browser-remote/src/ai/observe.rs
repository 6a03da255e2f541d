//! Element observation.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::scripts::element_selector;
use super::snapshot::PageSnapshot;

pub const OBSERVE_PROMPT: &str = r#"You look at a web page for a user.
Given the page elements and an instruction, list the elements that match it.

Reply with a JSON object:
{"elements": [{"element": <index>, "description": "<what it is>", "method": "<click|fill|type|press|scroll|select|hover>"}]}

Use an empty list when nothing matches. Only use indexes that appear in the list. Reply with JSON only."#;

/// A candidate element for an instruction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub element: u32,
    pub selector: String,
    pub description: String,
    pub method: String,
}

pub fn observe_prompt(instruction: &str, snapshot: &PageSnapshot) -> String {
    format!("{}\nInstruction: {}", snapshot.render(), instruction)
}

#[derive(Deserialize)]
struct RawObservation {
    element: Option<Value>,
    #[serde(default)]
    description: String,
    #[serde(default)]
    method: Option<String>,
}

/// Map the reply to observations, dropping indexes not in the snapshot.
///
/// Accepts `{"elements": [...]}` or a bare array.
pub fn parse_observations(reply: Value, snapshot: &PageSnapshot) -> Vec<Observation> {
    let items = match reply {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("elements") {
            Some(Value::Array(items)) => items,
            _ => Vec::new(),
        },
        _ => Vec::new(),
    };

    items
        .into_iter()
        .filter_map(|item| serde_json::from_value::<RawObservation>(item).ok())
        .filter_map(|raw| {
            let index = match raw.element? {
                Value::Number(n) => u32::try_from(n.as_u64()?).ok()?,
                Value::String(s) => s.trim().parse().ok()?,
                _ => return None,
            };
            let element = snapshot.element(index)?;
            let description = if raw.description.is_empty() {
                element.text.clone()
            } else {
                raw.description
            };
            Some(Observation {
                element: index,
                selector: element_selector(index),
                description,
                method: raw.method.unwrap_or_else(|| "click".to_string()),
            })
        })
        .collect()
}
