//! Chrome DevTools Protocol (CDP) client.
//!
//! Connects to a browser over WebSocket, either through a discovery
//! endpoint (`http://host:9222`) or straight to a `ws://` / `wss://`
//! URL such as the `connectUrl` Browserbase hands out.
//!
//! ```rust,ignore
//! let client = CdpClient::connect("http://localhost:9222").await?;
//! let page = client.new_page().await?;
//! page.navigate("https://example.com", LoadState::Complete).await?;
//! ```

mod client;
mod error;
mod protocol;
mod session;

pub use client::CdpClient;
pub use error::CdpError;
pub use protocol::*;
pub use session::{LoadState, PageSession};
