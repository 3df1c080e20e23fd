//! UseCase: 切断処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DisconnectUseCase::execute() メソッド
//! - 参加中の全ルームからの退出、セッションの解除、送信先の登録解除
//!
//! ### なぜこのテストが必要か
//! - 切断した接続がどのルームの参加者としても残らないことを保証する
//! - 切断は参加していた全てのルームに退出として通知される
//!
//! ### どのような状況を想定しているか
//! - 正常系：2 つのルームに参加中の接続の切断
//! - エッジケース：どのルームにも参加していない接続の切断

use std::sync::Arc;

use livechat_shared::time::Clock;

use crate::domain::{
    ConnectionId, MessagePusher, RoomId, RoomRepository, SessionRepository, Timestamp,
};

use super::leave_room::leave_and_notify;

/// 切断のユースケース
pub struct DisconnectUseCase {
    rooms: Arc<dyn RoomRepository>,
    sessions: Arc<dyn SessionRepository>,
    message_pusher: Arc<dyn MessagePusher>,
    clock: Arc<dyn Clock>,
}

impl DisconnectUseCase {
    /// 新しい DisconnectUseCase を作成
    pub fn new(
        rooms: Arc<dyn RoomRepository>,
        sessions: Arc<dyn SessionRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            rooms,
            sessions,
            message_pusher,
            clock,
        }
    }

    /// 切断を実行
    ///
    /// # Returns
    ///
    /// 接続が退出したルームの ID（ID 順）
    pub async fn execute(&self, connection_id: &ConnectionId) -> Vec<RoomId> {
        let identity = self.sessions.identity_of(connection_id).await;
        let timestamp = Timestamp::new(self.clock.now_millis());

        // 1. 参加中の全ルームから退出（ルームごとにロックを取る）
        let mut left_rooms = Vec::new();
        for shared in self.rooms.all().await {
            let mut room = shared.lock().await;
            if leave_and_notify(
                &mut room,
                connection_id,
                identity.as_ref(),
                self.message_pusher.as_ref(),
                timestamp,
            )
            .await
            {
                left_rooms.push(room.id.clone());
            }
        }

        // 2. セッションの紐づけを解除
        self.sessions.unbind(connection_id).await;

        // 3. 送信先の登録を解除
        self.message_pusher.unregister_client(connection_id).await;

        tracing::info!(
            "Connection '{}' disconnected (left {} room(s))",
            connection_id.as_str(),
            left_rooms.len()
        );

        left_rooms
    }
}
