//! Remote browser engine for WebPilot.
//!
//! Browsers come from Browserbase (hosted, with a live view) or from any
//! Chrome DevTools endpoint. Pages are driven over a CDP WebSocket; the
//! natural-language primitives (`act`, `extract`, `observe`) and the
//! autonomous agent ask a [`LanguageModel`](webpilot_protocols::LanguageModel)
//! to pick elements from an indexed snapshot of the page.

pub mod agent;
pub mod ai;
pub mod browserbase;
pub mod cdp;
pub mod config;
mod driver;
mod engine;
mod page;

pub use agent::PageAgent;
pub use browserbase::{BrowserbaseClient, BrowserbaseError};
pub use config::{RemoteBrowserConfig, RemoteProvider};
pub use engine::RemoteBrowserEngine;
pub use page::RemotePage;
