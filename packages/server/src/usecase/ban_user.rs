//! UseCase: ユーザー BAN 処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - BanUserUseCase::execute() メソッド
//! - BAN リストへの追加、対象ユーザーの全接続の退出、BAN 通知
//!
//! ### なぜこのテストが必要か
//! - 同じユーザーが複数の接続（タブ）で参加していても、全ての接続がルームから外れる必要がある
//! - BAN できるのはルームのオーナーだけであることを保証する
//!
//! ### どのような状況を想定しているか
//! - 正常系：オーナーが視聴者を BAN（対象には banned、残りの参加者には user-banned）
//! - 異常系：オーナー以外の BAN、未参加の接続からの BAN
//! - エッジケース：同じユーザーが 2 つの接続で参加している、現在参加していないユーザーの BAN

use std::sync::Arc;

use crate::domain::{
    ConnectionId, MessagePusher, RoomId, RoomRepository, ServerEvent, SessionRepository, UserId,
};

use super::error::BanUserError;

/// ユーザー BAN のユースケース
pub struct BanUserUseCase {
    rooms: Arc<dyn RoomRepository>,
    sessions: Arc<dyn SessionRepository>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl BanUserUseCase {
    /// 新しい BanUserUseCase を作成
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

    /// ユーザー BAN を実行
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<ConnectionId>)` - ルームから外した接続（対象ユーザーが参加していなければ空）
    /// * `Err(BanUserError)` - BAN の権限がない
    pub async fn execute(
        &self,
        connection_id: &ConnectionId,
        room_id: RoomId,
        target: UserId,
    ) -> Result<Vec<ConnectionId>, BanUserError> {
        let identity = self
            .sessions
            .identity_of(connection_id)
            .await
            .ok_or(BanUserError::NotJoined)?;

        let shared = self
            .rooms
            .find(&room_id)
            .await
            .ok_or(BanUserError::NotOwner)?;
        let mut room = shared.lock().await;

        if !room.moderation.is_owner(&identity.user_id) {
            tracing::warn!(
                "User '{}' tried to ban '{}' in room '{}' without ownership",
                identity.user_id.as_str(),
                target.as_str(),
                room_id.as_str()
            );
            return Err(BanUserError::NotOwner);
        }

        // 1. BAN リストに追加（以降の参加と送信を拒否）
        room.moderation.ban(target.clone());

        // 2. 対象ユーザーに紐づく全ての接続を探す
        let mut removed = Vec::new();
        for member in room.members.members() {
            let bound = self.sessions.identity_of(&member).await;
            if bound.is_some_and(|identity| identity.user_id == target) {
                removed.push(member);
            }
        }

        // 3. 対象の接続に通知してから退出させる
        let banned = ServerEvent::Banned {
            room_id: room_id.clone(),
        };
        for member in &removed {
            if let Err(e) = self.message_pusher.push_to(member, &banned).await {
                tracing::warn!(
                    "Failed to notify connection '{}' of ban: {}",
                    member.as_str(),
                    e
                );
            }
            room.members.leave(member);
        }

        // 4. 残りの参加者に通知
        let event = ServerEvent::UserBanned {
            room_id: room_id.clone(),
            user_id: target.clone(),
        };
        if let Err(e) = self
            .message_pusher
            .broadcast(room.members.members(), &event)
            .await
        {
            tracing::warn!("Failed to broadcast user-banned: {}", e);
        }

        tracing::info!(
            "User '{}' banned from room '{}' by '{}' ({} connection(s) removed)",
            target.as_str(),
            room_id.as_str(),
            identity.user_id.as_str(),
            removed.len()
        );

        Ok(removed)
    }
}
