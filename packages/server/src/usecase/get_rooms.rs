//! UseCase: ルーム一覧取得

use std::sync::Arc;

use crate::domain::{Room, RoomRepository};

/// ルーム一覧取得のユースケース
pub struct GetRoomsUseCase {
    rooms: Arc<dyn RoomRepository>,
}

impl GetRoomsUseCase {
    /// 新しい GetRoomsUseCase を作成
    pub fn new(rooms: Arc<dyn RoomRepository>) -> Self {
        Self { rooms }
    }

    /// 全ルームのスナップショットを ID 順に返す
    pub async fn execute(&self) -> Vec<Room> {
        let mut snapshots = Vec::new();
        for shared in self.rooms.all().await {
            snapshots.push(shared.lock().await.clone());
        }
        snapshots
    }
}
