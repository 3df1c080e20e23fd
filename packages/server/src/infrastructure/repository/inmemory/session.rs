//! InMemory Session Repository 実装
//!
//! 接続 ID とユーザー情報の対応表を HashMap で保持します。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ConnectionId, Identity, SessionRepository};

/// インメモリ Session Repository 実装
#[derive(Default)]
pub struct InMemorySessionRepository {
    sessions: Mutex<HashMap<ConnectionId, Identity>>,
}

impl InMemorySessionRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn bind(&self, connection_id: ConnectionId, identity: Identity) {
        let mut sessions = self.sessions.lock().await;
        tracing::debug!(
            "Connection '{}' bound to user '{}'",
            connection_id.as_str(),
            identity.user_id.as_str()
        );
        sessions.insert(connection_id, identity);
    }

    async fn identity_of(&self, connection_id: &ConnectionId) -> Option<Identity> {
        self.sessions.lock().await.get(connection_id).cloned()
    }

    async fn unbind(&self, connection_id: &ConnectionId) -> Option<Identity> {
        self.sessions.lock().await.remove(connection_id)
    }
}
