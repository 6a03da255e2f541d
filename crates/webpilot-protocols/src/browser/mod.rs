//! Browser engine protocol definitions.
//!
//! An engine hands out [`RemoteBrowser`]s; each carries a [`BrowserHandle`]
//! exposing the automation primitives the executor dispatches to.

mod options;
mod traits;

pub use options::*;
pub use traits::*;
