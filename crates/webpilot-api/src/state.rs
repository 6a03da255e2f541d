//! Application state.

use std::sync::Arc;
use std::time::{Duration, Instant};

use webpilot_core::Pipeline;

/// Application state shared across handlers.
pub struct AppState {
    pub pipeline: Arc<Pipeline>,
    /// Engine serving the sessions, reported by `/health`.
    pub engine_id: String,
    start_time: Instant,
}

impl AppState {
    pub fn new(pipeline: Arc<Pipeline>, engine_id: impl Into<String>) -> Self {
        Self {
            pipeline,
            engine_id: engine_id.into(),
            start_time: Instant::now(),
        }
    }

    pub fn uptime(&self) -> Duration {
        self.start_time.elapsed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_pipeline;

    #[test]
    fn test_app_state_new() {
        let state = AppState::new(test_pipeline(), "stub");
        assert_eq!(state.engine_id, "stub");
        assert!(state.pipeline.list_sessions().is_empty());
    }

    #[test]
    fn test_uptime() {
        let state = AppState::new(test_pipeline(), "stub");
        std::thread::sleep(Duration::from_millis(10));
        assert!(state.uptime().as_millis() >= 10);
    }
}
