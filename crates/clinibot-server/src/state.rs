use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use jiff::Timestamp;
use tokio::sync::Mutex;
use uuid::Uuid;

use clinibot_core::workflow::{Session, WorkflowPolicy};
use clinibot_llm::client::ChatClient;
use clinibot_llm::error::LlmError;

use crate::config::Settings;
use crate::error::ApiError;
use crate::secrets::Secrets;
use crate::timer::PopupTimer;

/// Shared application state, injected into all route handlers via Axum state.
#[derive(Clone)]
pub struct AppState {
    pub sessions: SessionStore,
    pub chat: ChatClient,
    /// Client for the spreadsheet webhook.
    pub http: reqwest::Client,
    pub secrets: Arc<Secrets>,
    pub policy: WorkflowPolicy,
}

impl AppState {
    pub fn new(settings: &Settings, secrets: Secrets) -> Result<Self, LlmError> {
        Ok(Self {
            sessions: SessionStore::new(settings.session_ttl),
            chat: ChatClient::new(settings.provider_url.clone(), settings.retry)?,
            http: reqwest::Client::builder().build()?,
            secrets: Arc::new(secrets),
            policy: settings.workflow_policy(),
        })
    }
}

/// One live session and the timer that belongs to it.
///
/// Dropping the entry, or replacing `popup_timer`, cancels the timer.
#[derive(Default)]
pub struct SessionEntry {
    pub session: Session,
    pub popup_timer: Option<PopupTimer>,
}

pub type SharedEntry = Arc<Mutex<SessionEntry>>;

/// In-memory sessions keyed by id. Nothing is persisted.
///
/// The map lock is only held to look up, insert or sweep entries. Each entry
/// has its own lock, held for a whole turn so turns on one session never
/// overlap. A session nobody has looked up for `idle_ttl` is dropped, which
/// also cancels its popup timer.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<Mutex<HashMap<Uuid, Slot>>>,
    idle_ttl: Duration,
}

struct Slot {
    entry: SharedEntry,
    last_seen: Timestamp,
}

impl SessionStore {
    pub fn new(idle_ttl: Duration) -> Self {
        Self {
            inner: Arc::default(),
            idle_ttl,
        }
    }

    pub async fn create(&self) -> (Uuid, SharedEntry) {
        let now = Timestamp::now();
        let id = Uuid::new_v4();
        let entry = Arc::new(Mutex::new(SessionEntry::default()));

        let mut sessions = self.inner.lock().await;
        self.sweep_locked(&mut sessions, now);
        sessions.insert(
            id,
            Slot {
                entry: Arc::clone(&entry),
                last_seen: now,
            },
        );
        (id, entry)
    }

    /// Look up a session and mark it as seen.
    pub async fn get(&self, id: Uuid) -> Result<SharedEntry, ApiError> {
        let mut sessions = self.inner.lock().await;
        let slot = sessions
            .get_mut(&id)
            .ok_or_else(|| ApiError::NotFound(format!("session not found: {id}")))?;
        slot.last_seen = Timestamp::now();
        Ok(Arc::clone(&slot.entry))
    }

    pub async fn remove(&self, id: Uuid) -> Result<SharedEntry, ApiError> {
        self.inner
            .lock()
            .await
            .remove(&id)
            .map(|slot| slot.entry)
            .ok_or_else(|| ApiError::NotFound(format!("session not found: {id}")))
    }

    /// Drop every session idle for at least the TTL as of `now`. Returns how
    /// many were dropped.
    pub async fn sweep_idle(&self, now: Timestamp) -> usize {
        let mut sessions = self.inner.lock().await;
        self.sweep_locked(&mut sessions, now)
    }

    fn sweep_locked(&self, sessions: &mut HashMap<Uuid, Slot>, now: Timestamp) -> usize {
        let before = sessions.len();
        sessions.retain(|_, slot| {
            let idle = now.duration_since(slot.last_seen);
            !(idle.is_positive() && idle.unsigned_abs() >= self.idle_ttl)
        });
        let dropped = before - sessions.len();
        if dropped > 0 {
            tracing::info!(dropped, remaining = sessions.len(), "idle sessions expired");
        }
        dropped
    }

    pub async fn len(&self) -> usize {
        self.inner.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
