//! UseCase: メッセージ送信処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SendMessageUseCase::execute() メソッド
//! - メッセージ送信処理（ID の採番、履歴への追加、ルーム全員へのブロードキャスト）
//!
//! ### なぜこのテストが必要か
//! - 送信者の ID はクライアントの自己申告ではなくセッションの紐づけから取る必要がある
//! - BAN 済みユーザーのメッセージを履歴にもブロードキャストにも残さない
//! - 履歴が上限を超えたら古いものから捨てられることを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：メッセージ送信とブロードキャスト（送信者自身にも届く）
//! - 異常系：未参加の接続からの送信、BAN 済みユーザーからの送信
//! - エッジケース：存在しないルームへの送信（ルームが作成される）

use std::sync::Arc;

use livechat_shared::time::Clock;

use crate::domain::{
    ChatMessage, ConnectionId, MessageBody, MessageId, MessagePusher, RoomId, RoomRepository,
    ServerEvent, SessionRepository, Timestamp,
};

use super::error::SendMessageError;

/// メッセージ送信のユースケース
pub struct SendMessageUseCase {
    rooms: Arc<dyn RoomRepository>,
    sessions: Arc<dyn SessionRepository>,
    message_pusher: Arc<dyn MessagePusher>,
    clock: Arc<dyn Clock>,
}

impl SendMessageUseCase {
    /// 新しい SendMessageUseCase を作成
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

    /// メッセージ送信を実行
    ///
    /// # Arguments
    ///
    /// * `connection_id` - 送信元の接続
    /// * `room_id` - 送信先のルーム
    /// * `body` - 本文（前後の空白は除去済み）
    ///
    /// # Returns
    ///
    /// * `Ok(ChatMessage)` - 履歴に追加され、ブロードキャストされたメッセージ
    /// * `Err(SendMessageError)` - 送信失敗
    pub async fn execute(
        &self,
        connection_id: &ConnectionId,
        room_id: RoomId,
        body: MessageBody,
    ) -> Result<ChatMessage, SendMessageError> {
        // 1. 送信者はセッションの紐づけから決まる
        let identity = self
            .sessions
            .identity_of(connection_id)
            .await
            .ok_or(SendMessageError::NotJoined)?;

        let now = Timestamp::new(self.clock.now_millis());
        let shared = self.rooms.get_or_create(&room_id, now).await;
        let mut room = shared.lock().await;

        // 2. BAN チェック
        if room.moderation.is_banned(&identity.user_id) {
            tracing::warn!(
                "Banned user '{}' tried to send a message to room '{}'",
                identity.user_id.as_str(),
                room_id.as_str()
            );
            return Err(SendMessageError::Banned(room_id.into_string()));
        }

        // 3. 履歴に追加（上限を超えた分は古いものから捨てられる）
        let message = ChatMessage::new(
            MessageId::derive(now, connection_id),
            identity.user_id,
            identity.nickname,
            body,
            now,
            room_id,
        );
        let message = room.history.append(message).clone();

        // 4. 送信者を含むルーム全員にブロードキャスト
        if let Err(e) = self
            .message_pusher
            .broadcast(
                room.members.members(),
                &ServerEvent::NewMessage(message.clone()),
            )
            .await
        {
            tracing::warn!("Failed to broadcast new-message: {}", e);
        }

        tracing::debug!(
            "Message '{}' appended to room '{}'",
            message.id.as_str(),
            message.room_id.as_str()
        );

        Ok(message)
    }
}
