//! Live browser sessions.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use parking_lot::RwLock;
use serde::Serialize;
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};
use webpilot_protocols::{BrowserAgent, BrowserEngine, BrowserHandle, EngineError, RemoteBrowser};

use crate::error::SessionError;

/// One live remote browser owned by the store.
pub struct Session {
    id: String,
    browser: RemoteBrowser,
    created_at: DateTime<Utc>,
    last_activity: RwLock<DateTime<Utc>>,
    agent: OnceCell<Arc<dyn BrowserAgent>>,
}

impl Session {
    pub fn new(id: impl Into<String>, browser: RemoteBrowser) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            browser,
            created_at: now,
            last_activity: RwLock::new(now),
            agent: OnceCell::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn browser(&self) -> &RemoteBrowser {
        &self.browser
    }

    pub fn handle(&self) -> &Arc<dyn BrowserHandle> {
        &self.browser.handle
    }

    pub fn live_view_url(&self) -> Option<&str> {
        self.browser.live_view_url.as_deref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn last_activity(&self) -> DateTime<Utc> {
        *self.last_activity.read()
    }

    /// Update last activity time.
    pub fn touch(&self) {
        *self.last_activity.write() = Utc::now();
    }

    /// The session's agent, created on first use and reused afterwards.
    pub async fn agent(&self) -> Result<Arc<dyn BrowserAgent>, EngineError> {
        self.agent
            .get_or_try_init(|| self.browser.handle.agent())
            .await
            .cloned()
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            session_id: self.id.clone(),
            created_at: self.created_at,
            last_activity: self.last_activity(),
            live_view_url: self.browser.live_view_url.clone(),
        }
    }
}

/// Serializable view of a session.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    pub session_id: String,
    pub created_at: DateTime<Utc>,
    pub last_activity: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub live_view_url: Option<String>,
}

/// Process-wide registry of live sessions.
///
/// Every entry owns exactly one browser obtained from the engine. Sessions
/// with different ids are independent; nothing serializes concurrent
/// batches on the same id.
pub struct SessionStore {
    engine: Arc<dyn BrowserEngine>,
    sessions: DashMap<String, Arc<Session>>,
}

impl SessionStore {
    pub fn new(engine: Arc<dyn BrowserEngine>) -> Self {
        Self {
            engine,
            sessions: DashMap::new(),
        }
    }

    /// Open a browser and register it under `id`.
    pub async fn create(&self, id: impl Into<String>) -> Result<Arc<Session>, SessionError> {
        let id = id.into();
        if self.contains(&id) {
            return Err(SessionError::Exists(id));
        }

        debug!(session_id = %id, engine = self.engine.id(), "Provisioning browser");
        let browser = self.engine.open().await.map_err(SessionError::Provisioning)?;
        let session = Arc::new(Session::new(id.clone(), browser));

        let inserted = match self.sessions.entry(id.clone()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(Arc::clone(&session));
                true
            }
        };
        if !inserted {
            // Lost a race with a concurrent create for the same id.
            self.release(&session).await;
            return Err(SessionError::Exists(id));
        }

        info!(
            session_id = %id,
            live_view = session.live_view_url().unwrap_or("-"),
            "Session created"
        );
        Ok(session)
    }

    pub fn get(&self, id: &str) -> Option<Arc<Session>> {
        self.sessions.get(id).map(|entry| Arc::clone(entry.value()))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.sessions.contains_key(id)
    }

    /// Remove `id` and release its browser. Returns whether it was present.
    pub async fn close(&self, id: &str) -> bool {
        let Some((_, session)) = self.sessions.remove(id) else {
            debug!(session_id = %id, "Close requested for unknown session");
            return false;
        };
        self.release(&session).await;
        info!(session_id = %id, "Session closed");
        true
    }

    /// Close every session. Returns how many were closed.
    pub async fn close_all(&self) -> usize {
        let ids: Vec<String> = self.sessions.iter().map(|e| e.key().clone()).collect();
        let mut closed = 0;
        for id in ids {
            if self.close(&id).await {
                closed += 1;
            }
        }
        closed
    }

    /// Summaries of all sessions, oldest first.
    pub fn list(&self) -> Vec<SessionSummary> {
        let mut summaries: Vec<SessionSummary> =
            self.sessions.iter().map(|e| e.value().summary()).collect();
        summaries.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.session_id.cmp(&b.session_id))
        });
        summaries
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    async fn release(&self, session: &Session) {
        if let Err(e) = self.engine.close(session.browser()).await {
            warn!(session_id = %session.id(), "Failed to release browser: {}", e);
        }
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
