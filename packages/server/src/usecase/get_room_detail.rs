//! UseCase: ルーム詳細取得
//!
//! ルームのスナップショットに、参加中の各接続に紐づくユーザー情報を添えて返す。

use std::sync::Arc;

use crate::domain::{ConnectionId, Identity, Room, RoomId, RoomRepository, SessionRepository};

use super::error::GetRoomDetailError;

/// ルーム詳細
#[derive(Debug, Clone)]
pub struct RoomDetail {
    pub room: Room,
    /// 参加中の接続と、紐づいているユーザー情報（接続 ID 順）
    pub members: Vec<(ConnectionId, Option<Identity>)>,
}

/// ルーム詳細取得のユースケース
pub struct GetRoomDetailUseCase {
    rooms: Arc<dyn RoomRepository>,
    sessions: Arc<dyn SessionRepository>,
}

impl GetRoomDetailUseCase {
    /// 新しい GetRoomDetailUseCase を作成
    pub fn new(rooms: Arc<dyn RoomRepository>, sessions: Arc<dyn SessionRepository>) -> Self {
        Self { rooms, sessions }
    }

    /// ルーム詳細を取得
    ///
    /// # Returns
    ///
    /// * `Ok(RoomDetail)` - ルームのスナップショット
    /// * `Err(GetRoomDetailError::RoomNotFound)` - ルームが存在しない
    pub async fn execute(&self, room_id: &RoomId) -> Result<RoomDetail, GetRoomDetailError> {
        let shared = self
            .rooms
            .find(room_id)
            .await
            .ok_or_else(|| GetRoomDetailError::RoomNotFound(room_id.as_str().to_string()))?;
        let room = shared.lock().await.clone();

        let mut members = Vec::with_capacity(room.members.len());
        for connection_id in room.members.members() {
            let identity = self.sessions.identity_of(&connection_id).await;
            members.push((connection_id, identity));
        }

        Ok(RoomDetail { room, members })
    }
}
