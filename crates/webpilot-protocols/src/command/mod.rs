//! Structured automation commands.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// One structured automation instruction.
///
/// `action` keeps whatever string the interpreter produced; it is checked
/// against [`ActionKind`] only when the command is dispatched. The
/// informational fields are read leniently: a value of the wrong type is
/// dropped rather than rejecting the command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawCommand")]
pub struct Command {
    pub action: String,

    /// Free text or URL-like target. Models are prompted with the key `command`.
    pub instruction: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Map<String, Value>>,

    /// Interpreter confidence in [0, 1]. Informational only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

impl Command {
    pub fn new(action: impl Into<String>, instruction: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            instruction: instruction.into(),
            parameters: None,
            confidence: None,
        }
    }

    /// Resolve the action string.
    pub fn kind(&self) -> Result<ActionKind, UnknownAction> {
        self.action.parse()
    }
}

/// Wire form of [`Command`]. Accepts both `command` and `instruction`;
/// `command` wins when both carry text.
#[derive(Deserialize)]
struct RawCommand {
    action: String,
    #[serde(default, deserialize_with = "lenient_text")]
    command: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    instruction: Option<String>,
    #[serde(default, deserialize_with = "lenient_map")]
    parameters: Option<Map<String, Value>>,
    #[serde(default, deserialize_with = "lenient_number")]
    confidence: Option<f64>,
}

impl From<RawCommand> for Command {
    fn from(raw: RawCommand) -> Self {
        let instruction = raw
            .command
            .filter(|text| !text.is_empty())
            .or(raw.instruction)
            .unwrap_or_default();
        Self {
            action: raw.action,
            instruction,
            parameters: raw.parameters,
            confidence: raw.confidence,
        }
    }
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
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

fn lenient_map<'de, D>(deserializer: D) -> Result<Option<Map<String, Value>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Object(map)) => Some(map),
        _ => None,
    })
}

fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

/// The fixed set of actions the executor knows how to dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Navigate,
    Act,
    Extract,
    Observe,
    AgentExecute,
}

impl ActionKind {
    pub const ALL: [ActionKind; 5] = [
        ActionKind::Navigate,
        ActionKind::Act,
        ActionKind::Extract,
        ActionKind::Observe,
        ActionKind::AgentExecute,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ActionKind::Navigate => "navigate",
            ActionKind::Act => "act",
            ActionKind::Extract => "extract",
            ActionKind::Observe => "observe",
            ActionKind::AgentExecute => "agent_execute",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActionKind {
    type Err = UnknownAction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ActionKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnknownAction(s.to_string()))
    }
}

/// An action string outside the fixed enumeration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown action: {0}")]
pub struct UnknownAction(pub String);

/// Input accepted by the executor: one bare command or an ordered sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CommandBatch {
    Sequence(Vec<Command>),
    Single(Command),
}

impl CommandBatch {
    pub fn into_commands(self) -> Vec<Command> {
        match self {
            CommandBatch::Sequence(commands) => commands,
            CommandBatch::Single(command) => vec![command],
        }
    }
}

impl From<Command> for CommandBatch {
    fn from(command: Command) -> Self {
        CommandBatch::Single(command)
    }
}

impl From<Vec<Command>> for CommandBatch {
    fn from(commands: Vec<Command>) -> Self {
        CommandBatch::Sequence(commands)
    }
}

#[cfg(test)]
#[path = "command_tests.rs"]
mod tests;
