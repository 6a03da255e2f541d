//! Model-driven page primitives.
//!
//! The page's interactive elements are indexed by an injected script
//! ([`scripts::SNAPSHOT`]); the model then picks elements by index.

mod act;
mod extract;
mod model;
mod observe;
pub(crate) mod scripts;
mod snapshot;

pub use act::{ACT_PROMPT, ActMethod, ActionPlan, act_prompt};
pub use extract::{EXTRACT_PROMPT, extract_prompt, wrap_extraction};
pub use model::{PageModel, parse_json_reply};
pub(crate) use model::truncate_chars;
pub use observe::{OBSERVE_PROMPT, Observation, observe_prompt, parse_observations};
pub use snapshot::{ElementInfo, PageSnapshot};
