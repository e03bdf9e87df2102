//! Process-wide session store

use dashmap::DashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::Mutex as AsyncMutex;
use uuid::Uuid;

use crate::session::ConversationSession;

/// Handle to a stored session.
///
/// The async mutex serializes appends from concurrent requests on the same
/// session; requests on different sessions never contend.
pub type SharedSession = Arc<AsyncMutex<ConversationSession>>;

/// Owner of every conversation session in the process
///
/// Entries are created implicitly on first use of an id and removed only by
/// [`SessionStore::clear`]. Nothing is persisted across restarts.
pub struct SessionStore {
    sessions: DashMap<String, SharedSession>,
    /// Ids in creation order; also guards the creation path
    order: Mutex<Vec<String>>,
    max_history: usize,
}

impl SessionStore {
    /// Create an empty store; every session it creates uses `max_history`
    pub fn new(max_history: usize) -> Self {
        Self {
            sessions: DashMap::new(),
            order: Mutex::new(Vec::new()),
            max_history,
        }
    }

    /// Fetch an existing session or create one.
    ///
    /// With no id, a fresh UUID is generated. With an id that is absent, a
    /// session is created under that id (idempotent-create). The system
    /// prompt only seeds newly created sessions.
    pub fn get_or_create(
        &self,
        session_id: Option<&str>,
        system_prompt: Option<&str>,
    ) -> (String, SharedSession) {
        if let Some(id) = session_id {
            if let Some(existing) = self.sessions.get(id) {
                return (id.to_string(), Arc::clone(existing.value()));
            }
        }

        let id = session_id
            .map(str::to_string)
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        let mut order = self.order.lock().expect("store order lock poisoned");

        // Re-check under the creation lock: another task may have won
        if let Some(existing) = self.sessions.get(&id) {
            return (id, Arc::clone(existing.value()));
        }

        let session = Arc::new(AsyncMutex::new(ConversationSession::new(
            id.clone(),
            self.max_history,
            system_prompt,
        )));
        self.sessions.insert(id.clone(), Arc::clone(&session));
        order.push(id.clone());

        tracing::debug!(session_id = %id, "Created session");
        (id, session)
    }

    /// Look up a session without creating it
    pub fn get(&self, session_id: &str) -> Option<SharedSession> {
        self.sessions
            .get(session_id)
            .map(|entry| Arc::clone(entry.value()))
    }

    /// All known ids in creation order
    pub fn list_ids(&self) -> Vec<String> {
        self.order.lock().expect("store order lock poisoned").clone()
    }

    /// Remove a session; returns whether it existed
    pub fn clear(&self, session_id: &str) -> bool {
        let existed = self.sessions.remove(session_id).is_some();

        if existed {
            let mut order = self.order.lock().expect("store order lock poisoned");
            order.retain(|id| id != session_id);
            tracing::debug!(session_id, "Cleared session");
        }

        existed
    }

    /// Number of live sessions
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Whether the store holds no sessions
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
