//! Natural-language actions.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::snapshot::PageSnapshot;

pub const ACT_PROMPT: &str = r#"You control a web browser. Given the current page and an instruction, choose ONE action.

Reply with a JSON object:
{"element": <index of the target element or null>, "method": "<click|fill|type|press|scroll|select|hover>", "value": "<text, key or direction, or null>"}

- click: click the element.
- fill: replace the element's content with value.
- type: click the element, then type value.
- press: press the key in value (e.g. "Enter", "Control+a"); element is optional.
- scroll: scroll to the element, or scroll the page "up" or "down" when element is null.
- select: choose the option whose label or value equals value.
- hover: move the mouse over the element.

Only use element indexes that appear in the list. Reply with JSON only."#;

/// What the model decided to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActMethod {
    Click,
    Fill,
    Type,
    Press,
    Scroll,
    Select,
    Hover,
}

impl ActMethod {
    /// Whether the method cannot run without a target element.
    pub fn needs_element(&self) -> bool {
        !matches!(self, ActMethod::Press | ActMethod::Scroll)
    }

    /// Whether the method cannot run without a value.
    pub fn needs_value(&self) -> bool {
        matches!(
            self,
            ActMethod::Fill | ActMethod::Type | ActMethod::Press | ActMethod::Select
        )
    }
}

/// A single step chosen for an instruction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionPlan {
    #[serde(default, deserialize_with = "lenient_index")]
    pub element: Option<u32>,
    pub method: ActMethod,
    #[serde(default, deserialize_with = "lenient_value")]
    pub value: Option<String>,
}

impl ActionPlan {
    /// Parse and check the plan against the snapshot it was made from.
    pub fn from_reply(reply: Value, snapshot: &PageSnapshot) -> Result<Self, String> {
        let plan: ActionPlan =
            serde_json::from_value(reply).map_err(|e| format!("unusable action plan: {}", e))?;

        match plan.element {
            Some(index) if snapshot.element(index).is_none() => {
                return Err(format!("element {} is not on the page", index));
            }
            None if plan.method.needs_element() => {
                return Err(format!("{:?} needs a target element", plan.method));
            }
            _ => {}
        }
        if plan.method.needs_value() && plan.value.as_deref().is_none_or(str::is_empty) {
            return Err(format!("{:?} needs a value", plan.method));
        }
        Ok(plan)
    }
}

pub fn act_prompt(instruction: &str, snapshot: &PageSnapshot) -> String {
    format!("{}\nInstruction: {}", snapshot.render(), instruction)
}

// Models sometimes quote the index or send a float.
fn lenient_index<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_u64().or_else(|| n.as_f64().map(|f| f as u64)).map(|n| n as u32),
        Some(Value::String(s)) => s.trim().trim_start_matches('[').trim_end_matches(']').parse().ok(),
        _ => None,
    })
}

fn lenient_value<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        Some(Value::Null) | None => None,
        Some(other) => Some(other.to_string()),
    })
}
