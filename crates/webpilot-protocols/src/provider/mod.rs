//! Language model protocol definitions.
//!
//! Providers connect to chat-completion APIs and turn a prompt into text.

mod request;
mod response;
mod traits;

pub use request::*;
pub use response::*;
pub use traits::*;
