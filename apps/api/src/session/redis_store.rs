//! Redis-backed session store. Sessions survive process restarts.

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;
use tracing::{debug, info};

use crate::session::store::{SessionStore, StoreError};
use crate::session::SessionState;

const KEY_PREFIX: &str = "linkedin-assistant:session:";

/// Stores each session as one JSON string value.
#[derive(Clone)]
pub struct RedisSessionStore {
    connection: MultiplexedConnection,
}

impl RedisSessionStore {
    pub async fn connect(redis_url: &str) -> Result<Self, StoreError> {
        let client = redis::Client::open(redis_url)?;
        let connection = client.get_multiplexed_async_connection().await?;
        info!("Redis session store connected");
        Ok(Self { connection })
    }
}

fn session_key(session_id: &str) -> String {
    format!("{KEY_PREFIX}{session_id}")
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn load(&self, session_id: &str) -> Result<Option<SessionState>, StoreError> {
        let mut conn = self.connection.clone();
        let payload: Option<String> = conn.get(session_key(session_id)).await?;

        payload
            .map(|raw| {
                serde_json::from_str(&raw).map_err(|source| StoreError::Corrupt {
                    session_id: session_id.to_string(),
                    source,
                })
            })
            .transpose()
    }

    async fn save(&self, session_id: &str, state: &SessionState) -> Result<(), StoreError> {
        let payload = serde_json::to_string(state).map_err(|source| StoreError::Encode {
            session_id: session_id.to_string(),
            source,
        })?;

        let mut conn = self.connection.clone();
        conn.set::<_, _, ()>(session_key(session_id), payload).await?;
        debug!("Saved session {session_id} ({} messages)", state.messages.len());
        Ok(())
    }

    async fn delete(&self, session_id: &str) -> Result<(), StoreError> {
        let mut conn = self.connection.clone();
        conn.del::<_, ()>(session_key(session_id)).await?;
        Ok(())
    }
}
