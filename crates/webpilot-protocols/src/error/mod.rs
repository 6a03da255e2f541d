//! Error types for the WebPilot protocol layer.

mod engine;
mod provider;

pub use engine::*;
pub use provider::*;
