//! Shared conversation types.

mod message;

pub use message::*;
