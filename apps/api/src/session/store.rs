//! Session persistence contract and the in-process backend.

use std::collections::HashMap;

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::RwLock;

use crate::session::SessionState;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("Corrupt session record for {session_id}: {source}")]
    Corrupt {
        session_id: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to encode session {session_id}: {source}")]
    Encode {
        session_id: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Keyed session persistence. Used once to load and once to save per turn.
///
/// No locking across load/save: two concurrent turns on one session id race,
/// and the later save wins.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// `None` for a session id that has never been saved.
    async fn load(&self, session_id: &str) -> Result<Option<SessionState>, StoreError>;

    async fn save(&self, session_id: &str, state: &SessionState) -> Result<(), StoreError>;

    /// Removes a session. Deleting an unknown id succeeds.
    async fn delete(&self, session_id: &str) -> Result<(), StoreError>;
}

/// Process-local store. Sessions are lost on restart.
#[derive(Default)]
pub struct MemorySessionStore {
    sessions: RwLock<HashMap<String, SessionState>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn load(&self, session_id: &str) -> Result<Option<SessionState>, StoreError> {
        let sessions = self.sessions.read().await;
        Ok(sessions.get(session_id).cloned())
    }

    async fn save(&self, session_id: &str, state: &SessionState) -> Result<(), StoreError> {
        let mut sessions = self.sessions.write().await;
        sessions.insert(session_id.to_string(), state.clone());
        Ok(())
    }

    async fn delete(&self, session_id: &str) -> Result<(), StoreError> {
        let mut sessions = self.sessions.write().await;
        sessions.remove(session_id);
        Ok(())
    }
}
