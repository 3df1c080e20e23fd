//! UseCase: ルーム参加処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - JoinRoomUseCase::execute() メソッド
//! - セッションの紐づけ、オーナーの主張、参加時の履歴送信、参加通知
//!
//! ### なぜこのテストが必要か
//! - オーナーの決定はこのシステム唯一の認可の根拠であり、先着順を保証する必要がある
//! - BAN 済みユーザーの再参加を防ぐ
//!
//! ### どのような状況を想定しているか
//! - 正常系：参加、履歴の受信、他の参加者への通知
//! - 異常系：BAN 済みユーザーの参加
//! - エッジケース：二人が同時に配信者を名乗る、削除済みメッセージを含む履歴

use std::sync::Arc;

use livechat_shared::time::Clock;

use crate::domain::{
    ChatMessage, ConnectionId, Identity, MessagePusher, RoomId, RoomRepository, ServerEvent,
    SessionRepository, Timestamp, UserId,
};

use super::error::JoinRoomError;

/// ルーム参加のユースケース
pub struct JoinRoomUseCase {
    rooms: Arc<dyn RoomRepository>,
    sessions: Arc<dyn SessionRepository>,
    message_pusher: Arc<dyn MessagePusher>,
    clock: Arc<dyn Clock>,
}

impl JoinRoomUseCase {
    /// 新しい JoinRoomUseCase を作成
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

    /// ルーム参加を実行
    ///
    /// # Arguments
    ///
    /// * `connection_id` - 参加する接続
    /// * `room_id` - 参加先のルーム（存在しなければ作成される）
    /// * `identity` - 接続に紐づけるユーザー情報（既存の紐づけは上書き）
    /// * `creator_id` - 配信者 ID の主張（`identity.user_id` と一致すればオーナーの候補）
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<ChatMessage>)` - 要求元に送った履歴（削除済みメッセージを除く）
    /// * `Err(JoinRoomError)` - 参加失敗（状態は変化しない）
    pub async fn execute(
        &self,
        connection_id: &ConnectionId,
        room_id: RoomId,
        identity: Identity,
        creator_id: Option<UserId>,
    ) -> Result<Vec<ChatMessage>, JoinRoomError> {
        let now = Timestamp::new(self.clock.now_millis());
        let shared = self.rooms.get_or_create(&room_id, now).await;
        let mut room = shared.lock().await;

        // 1. BAN チェック（紐づけより前に行い、拒否時は何も変更しない）
        if room.moderation.is_banned(&identity.user_id) {
            tracing::warn!(
                "Banned user '{}' tried to join room '{}'",
                identity.user_id.as_str(),
                room_id.as_str()
            );
            return Err(JoinRoomError::Banned(room_id.into_string()));
        }

        // 2. セッションに紐づけ
        self.sessions
            .bind(connection_id.clone(), identity.clone())
            .await;

        // 3. オーナーの主張（先着順）
        if room
            .moderation
            .claim_ownership(creator_id.as_ref(), &identity.user_id)
        {
            tracing::info!(
                "User '{}' is now the owner of room '{}'",
                identity.user_id.as_str(),
                room_id.as_str()
            );
        }

        // 4. 参加者に追加
        room.members.join(connection_id.clone());

        // 5. 要求元にだけ履歴を送信
        let snapshot = room.history.snapshot_for_join();
        let history = ServerEvent::MessageHistory {
            room_id: room_id.clone(),
            messages: snapshot.clone(),
        };
        if let Err(e) = self.message_pusher.push_to(connection_id, &history).await {
            tracing::warn!(
                "Failed to send history to connection '{}': {}",
                connection_id.as_str(),
                e
            );
        }

        // 6. 要求元以外に参加を通知
        let joined = ServerEvent::UserJoined {
            room_id: room_id.clone(),
            user_id: identity.user_id.clone(),
            nickname: identity.nickname.clone(),
            timestamp: now,
        };
        if let Err(e) = self
            .message_pusher
            .broadcast(room.members.members_except(connection_id), &joined)
            .await
        {
            tracing::warn!("Failed to broadcast user-joined: {}", e);
        }

        tracing::info!(
            "Connection '{}' joined room '{}' as '{}'",
            connection_id.as_str(),
            room_id.as_str(),
            identity.user_id.as_str()
        );

        Ok(snapshot)
    }
}
