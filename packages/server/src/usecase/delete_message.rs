//! UseCase: メッセージ削除処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DeleteMessageUseCase::execute() メソッド
//! - オーナーによる履歴上のメッセージの置き換えと削除通知
//!
//! ### なぜこのテストが必要か
//! - 削除できるのはルームのオーナーだけであることを保証する
//! - 削除済みメッセージは履歴に残るが、本文はプレースホルダーに置き換わる
//!
//! ### どのような状況を想定しているか
//! - 正常系：オーナーが自分のルームのメッセージを削除
//! - 異常系：オーナー以外の削除、未参加の接続からの削除
//! - エッジケース：履歴にない ID の削除（何も起きない）

use std::sync::Arc;

use crate::domain::{
    ConnectionId, MessageId, MessagePusher, RoomId, RoomRepository, ServerEvent,
    SessionRepository,
};

use super::error::DeleteMessageError;

/// メッセージ削除のユースケース
pub struct DeleteMessageUseCase {
    rooms: Arc<dyn RoomRepository>,
    sessions: Arc<dyn SessionRepository>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl DeleteMessageUseCase {
    /// 新しい DeleteMessageUseCase を作成
    pub fn new(
        rooms: Arc<dyn RoomRepository>,
        sessions: Arc<dyn SessionRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            rooms,
            sessions,
            message_pusher,
        }
    }

    /// メッセージ削除を実行
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - メッセージを削除し、ルーム全員に通知した
    /// * `Ok(false)` - 該当するメッセージが履歴になかった（通知なし）
    /// * `Err(DeleteMessageError)` - 削除の権限がない
    pub async fn execute(
        &self,
        connection_id: &ConnectionId,
        room_id: RoomId,
        message_id: MessageId,
    ) -> Result<bool, DeleteMessageError> {
        let identity = self
            .sessions
            .identity_of(connection_id)
            .await
            .ok_or(DeleteMessageError::NotJoined)?;

        // オーナーの存在しないルームでは誰も削除できない
        let shared = self
            .rooms
            .find(&room_id)
            .await
            .ok_or(DeleteMessageError::NotOwner)?;
        let mut room = shared.lock().await;

        if !room.moderation.is_owner(&identity.user_id) {
            tracing::warn!(
                "User '{}' tried to delete a message in room '{}' without ownership",
                identity.user_id.as_str(),
                room_id.as_str()
            );
            return Err(DeleteMessageError::NotOwner);
        }

        if !room.history.redact(&message_id) {
            tracing::debug!(
                "Message '{}' not found in room '{}'",
                message_id.as_str(),
                room_id.as_str()
            );
            return Ok(false);
        }

        let event = ServerEvent::MessageDeleted {
            room_id: room_id.clone(),
            message_id: message_id.clone(),
        };
        if let Err(e) = self
            .message_pusher
            .broadcast(room.members.members(), &event)
            .await
        {
            tracing::warn!("Failed to broadcast message-deleted: {}", e);
        }

        tracing::info!(
            "Message '{}' in room '{}' deleted by '{}'",
            message_id.as_str(),
            room_id.as_str(),
            identity.user_id.as_str()
        );

        Ok(true)
    }
}
