//! Autonomous multi-step agent.

use std::fmt::Write;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::{debug, info, warn};

use webpilot_protocols::{BrowserAgent, EngineError, WaitPolicy};

use crate::ai::{PageModel, PageSnapshot};
use crate::driver::PageDriver;

pub const AGENT_PROMPT: &str = r#"You are an autonomous web browsing agent working toward a goal.
Each turn you see the goal, the current page and what you have done so far. Choose the next step.

Reply with a JSON object:
{"action": "<navigate|act|extract|done>", "instruction": "<argument>", "reasoning": "<one sentence>"}

- navigate: instruction is the URL to open.
- act: instruction is one concrete browser action, e.g. "click the Sign in button" or "type 'rust' into the search box".
- extract: instruction says what information to read from the page.
- done: the goal is reached or cannot be reached; instruction is the final answer or summary for the user.

Reply with JSON only."#;

/// Page operations the agent needs.
#[async_trait]
pub trait AgentTarget: Send + Sync {
    async fn snapshot(&self) -> Result<PageSnapshot, EngineError>;
    async fn goto(&self, url: &str) -> Result<(), EngineError>;
    async fn act(&self, instruction: &str) -> Result<Value, EngineError>;
    async fn extract(&self, instruction: &str) -> Result<Value, EngineError>;
}

#[async_trait]
impl AgentTarget for PageDriver {
    async fn snapshot(&self) -> Result<PageSnapshot, EngineError> {
        PageDriver::snapshot(self).await
    }

    async fn goto(&self, url: &str) -> Result<(), EngineError> {
        PageDriver::goto(self, url, WaitPolicy::Load).await
    }

    async fn act(&self, instruction: &str) -> Result<Value, EngineError> {
        PageDriver::act(self, instruction).await
    }

    async fn extract(&self, instruction: &str) -> Result<Value, EngineError> {
        let schema = json!({"type": "object", "properties": {"data": {}}});
        PageDriver::extract(self, instruction, &schema).await
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentAction {
    Navigate,
    Act,
    Extract,
    Done,
}

/// One decision returned by the model.
#[derive(Debug, Clone, Deserialize)]
pub struct AgentDecision {
    pub action: AgentAction,
    #[serde(default)]
    pub instruction: String,
    #[serde(default)]
    pub reasoning: String,
}

/// A step in the execution trace.
#[derive(Debug, Clone, Serialize)]
pub struct AgentStep {
    pub step: u32,
    pub action: AgentAction,
    pub instruction: String,
    pub reasoning: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Agent bound to one page.
pub struct PageAgent {
    target: Arc<dyn AgentTarget>,
    model: Arc<PageModel>,
    max_steps: u32,
}

impl PageAgent {
    pub fn new(target: Arc<dyn AgentTarget>, model: Arc<PageModel>, max_steps: u32) -> Self {
        Self {
            target,
            model,
            max_steps: max_steps.max(1),
        }
    }

    async fn decide(
        &self,
        goal: &str,
        snapshot: &PageSnapshot,
        history: &[AgentStep],
    ) -> Result<AgentDecision, EngineError> {
        let reply = self
            .model
            .ask(AGENT_PROMPT, agent_prompt(goal, snapshot, history, self.max_steps))
            .await?;
        serde_json::from_value(reply)
            .map_err(|e| EngineError::Action(format!("unusable agent decision: {}", e)))
    }

    async fn run_step(&self, decision: &AgentDecision) -> Result<Value, EngineError> {
        match decision.action {
            AgentAction::Navigate => {
                let url = with_scheme(&decision.instruction);
                self.target.goto(&url).await?;
                Ok(json!({ "navigatedTo": url }))
            }
            AgentAction::Act => self.target.act(&decision.instruction).await,
            AgentAction::Extract => self.target.extract(&decision.instruction).await,
            AgentAction::Done => Ok(Value::Null),
        }
    }
}

#[async_trait]
impl BrowserAgent for PageAgent {
    async fn execute(&self, instruction: &str) -> Result<Value, EngineError> {
        info!("Agent started: {}", instruction);
        let mut history: Vec<AgentStep> = Vec::new();
        let mut final_message = None;

        for step in 1..=self.max_steps {
            let snapshot = match self.target.snapshot().await {
                Ok(snapshot) => snapshot,
                Err(EngineError::Closed) => return Err(EngineError::Closed),
                Err(e) => {
                    warn!("Agent snapshot failed: {}", e);
                    PageSnapshot::default()
                }
            };

            let decision = self.decide(instruction, &snapshot, &history).await?;
            debug!("Agent step {}: {:?}", step, decision);

            if decision.action == AgentAction::Done {
                final_message = Some(if decision.instruction.is_empty() {
                    decision.reasoning.clone()
                } else {
                    decision.instruction.clone()
                });
                history.push(AgentStep {
                    step,
                    action: decision.action,
                    instruction: decision.instruction,
                    reasoning: decision.reasoning,
                    success: true,
                    result: None,
                    error: None,
                });
                break;
            }

            let outcome = self.run_step(&decision).await;
            if let Err(EngineError::Closed) = outcome {
                return Err(EngineError::Closed);
            }
            history.push(AgentStep {
                step,
                action: decision.action,
                instruction: decision.instruction,
                reasoning: decision.reasoning,
                success: outcome.is_ok(),
                error: outcome.as_ref().err().map(|e| e.to_string()),
                result: outcome.ok(),
            });
        }

        let completed = final_message.is_some();
        let message = final_message.unwrap_or_else(|| {
            format!(
                "Stopped after {} steps without completing: {}",
                self.max_steps, instruction
            )
        });
        info!("Agent finished (completed: {}) after {} steps", completed, history.len());

        Ok(json!({
            "success": completed,
            "completed": completed,
            "message": message,
            "actions": history,
        }))
    }
}

fn agent_prompt(goal: &str, snapshot: &PageSnapshot, history: &[AgentStep], max_steps: u32) -> String {
    let mut out = format!("Goal: {}\n\n{}\nHistory:\n", goal, snapshot.render());
    if history.is_empty() {
        out.push_str("(no steps yet)\n");
    }
    for step in history {
        let outcome = match (&step.error, &step.result) {
            (Some(e), _) => format!("failed: {}", e),
            (None, Some(r)) => format!("ok: {}", crate::ai::truncate_chars(&r.to_string(), 500)),
            (None, None) => "ok".to_string(),
        };
        let _ = writeln!(
            out,
            "{}. {:?} {:?} -> {}",
            step.step, step.action, step.instruction, outcome
        );
    }
    let _ = write!(out, "\nSteps used: {} of {}", history.len(), max_steps);
    out
}

/// Prefix `https://` unless the URL already carries a scheme.
fn with_scheme(url: &str) -> String {
    let url = url.trim();
    if url.contains("://") || url.starts_with("about:") || url.starts_with("data:") {
        url.to_string()
    } else {
        format!("https://{}", url)
    }
}

#[cfg(test)]
#[path = "agent_tests.rs"]
mod tests;
