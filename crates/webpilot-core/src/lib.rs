//! # WebPilot Core
//!
//! The command-to-action execution pipeline:
//!
//! - [`CommandInterpreter`] turns free text into an ordered list of [`Command`]s
//! - [`SessionStore`] owns the live remote browsers, keyed by session id
//! - [`ActionExecutor`] runs a batch against one session and captures a screenshot
//! - [`ResponseAssembler`] shapes the caller-facing payload
//! - [`Pipeline`] wires the four together
//!
//! [`Command`]: webpilot_protocols::Command

pub mod error;
pub mod executor;
pub mod interpreter;
pub mod navigation;
pub mod pipeline;
pub mod response;
pub mod session;

#[cfg(test)]
mod mocks;

pub use error::{ExecutionError, InterpretationError, PipelineError, SessionError};
pub use executor::{ActionExecutor, AggregatedResponse};
pub use interpreter::CommandInterpreter;
pub use navigation::normalize_url;
pub use pipeline::{Pipeline, SessionCreated};
pub use response::{CommandOutcome, CommandResult, ResponseAssembler};
pub use session::{Session, SessionStore, SessionSummary};
