//! # WebPilot API
//!
//! HTTP surface over the [`Pipeline`](webpilot_core::Pipeline):
//!
//! ```text
//! POST /api/browser/create-session   {sessionId?}            -> {sessionId, liveViewUrl?, message}
//! POST /api/browser/execute-command  {sessionId, userInput}  -> {result, parsedCommand, userInput, liveViewUrl?}
//! POST /api/browser/close-session    {sessionId}             -> {message}
//! GET  /api/browser/sessions                                 -> {count, sessions}
//! GET  /health
//! GET  /livez
//! ```

pub mod error;
pub mod http;
pub mod server;
pub mod state;

#[cfg(test)]
mod test_support;

pub use error::ApiError;
pub use http::routes::create_router;
pub use server::{ApiConfig, ApiServer};
pub use state::AppState;
