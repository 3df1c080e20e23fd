//! UseCase: 接続処理
//!
//! 接続直後はどのルームにも参加しておらず、ユーザー情報も紐づいていない。
//! ここでは送信先として登録するだけで、ルームへの参加は join-room で行う。

use std::sync::Arc;

use crate::domain::{ConnectionId, MessagePusher, PusherChannel};

/// 接続のユースケース
pub struct ConnectUseCase {
    message_pusher: Arc<dyn MessagePusher>,
}

impl ConnectUseCase {
    /// 新しい ConnectUseCase を作成
    pub fn new(message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self { message_pusher }
    }

    /// 接続を送信先として登録する
    pub async fn execute(&self, connection_id: ConnectionId, sender: PusherChannel) {
        tracing::info!("Connection '{}' opened", connection_id.as_str());
        self.message_pusher
            .register_client(connection_id, sender)
            .await;
    }
}
