//! # WebPilot Protocols
//!
//! Protocol definitions (traits and shared types) for the WebPilot workspace.
//! Contains only interface definitions - no implementations.
//!
//! ## Core Traits
//!
//! - [`LanguageModel`] - text generation used to interpret commands and drive the page
//! - [`BrowserEngine`] - provisions and releases remote browsers
//! - [`BrowserHandle`] - automation primitives on one live browser page
//! - [`BrowserAgent`] - autonomous multi-step execution bound to a page

pub mod browser;
pub mod command;
pub mod error;
pub mod provider;
pub mod types;

pub use browser::{BrowserAgent, BrowserEngine, BrowserHandle, ImageFormat, RemoteBrowser, WaitPolicy};
pub use command::{ActionKind, Command, CommandBatch, UnknownAction};
pub use error::{EngineError, ProviderError};
pub use provider::{CompletionRequest, CompletionResponse, GenerationOptions, LanguageModel};
pub use types::*;
