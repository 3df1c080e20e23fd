//! WebSocket を使った MessagePusher 実装
//!
//! ## 責務
//!
//! - 接続ごとの `UnboundedSender` を管理
//! - ドメインイベントを JSON フレームにエンコードして送信（push_to, broadcast）
//!
//! ## 設計ノート
//!
//! WebSocket の生成は UI 層（`ui/handler/websocket.rs`）で行われます。
//! この実装は生成された `UnboundedSender` を受け取り、メッセージ送信に使用します。
//! 送信は非同期チャンネルへの enqueue だけなので、ルームのロックを保持したまま呼び出しても
//! I/O を待つことはありません。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::{
    domain::{ConnectionId, MessagePushError, MessagePusher, PusherChannel, ServerEvent},
    infrastructure::dto::websocket::OutboundEvent,
};

/// WebSocket を使った MessagePusher 実装
///
/// ## 使用例
///
/// ```ignore
/// let pusher = WebSocketMessagePusher::new();
/// pusher.register_client(connection_id.clone(), tx).await;
///
/// pusher.push_to(&connection_id, &ServerEvent::Error { message: "oops".into() }).await?;
/// ```
#[derive(Default)]
pub struct WebSocketMessagePusher {
    /// 接続中のクライアントの WebSocket sender
    clients: Mutex<HashMap<ConnectionId, PusherChannel>>,
}

impl WebSocketMessagePusher {
    /// 新しい WebSocketMessagePusher を作成
    pub fn new() -> Self {
        Self::default()
    }

    fn encode(event: &ServerEvent) -> Result<String, MessagePushError> {
        serde_json::to_string(&OutboundEvent::from(event))
            .map_err(|e| MessagePushError::EncodeFailed(e.to_string()))
    }
}

#[async_trait]
impl MessagePusher for WebSocketMessagePusher {
    async fn register_client(&self, connection_id: ConnectionId, sender: PusherChannel) {
        let mut clients = self.clients.lock().await;
        tracing::debug!(
            "Connection '{}' registered to MessagePusher",
            connection_id.as_str()
        );
        clients.insert(connection_id, sender);
    }

    async fn unregister_client(&self, connection_id: &ConnectionId) {
        let mut clients = self.clients.lock().await;
        clients.remove(connection_id);
        tracing::debug!(
            "Connection '{}' unregistered from MessagePusher",
            connection_id.as_str()
        );
    }

    async fn push_to(
        &self,
        connection_id: &ConnectionId,
        event: &ServerEvent,
    ) -> Result<(), MessagePushError> {
        let content = Self::encode(event)?;
        let clients = self.clients.lock().await;

        let sender = clients
            .get(connection_id)
            .ok_or_else(|| MessagePushError::ClientNotFound(connection_id.as_str().to_string()))?;
        sender
            .send(content)
            .map_err(|e| MessagePushError::PushFailed(e.to_string()))?;
        tracing::debug!("Pushed event to connection '{}'", connection_id.as_str());
        Ok(())
    }

    async fn broadcast(
        &self,
        targets: Vec<ConnectionId>,
        event: &ServerEvent,
    ) -> Result<(), MessagePushError> {
        let content = Self::encode(event)?;
        let clients = self.clients.lock().await;

        for target in targets {
            let Some(sender) = clients.get(&target) else {
                tracing::warn!(
                    "Connection '{}' not found during broadcast, skipping",
                    target.as_str()
                );
                continue;
            };
            // ブロードキャストでは一部の送信失敗を許容（切断途中の接続は単にスキップ）
            if let Err(e) = sender.send(content.clone()) {
                tracing::warn!(
                    "Failed to push event to connection '{}': {}",
                    target.as_str(),
                    e
                );
            }
        }

        Ok(())
    }
}
