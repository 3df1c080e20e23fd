//! InMemory Room Repository 実装
//!
//! ドメイン層が定義する RoomRepository trait の具体的な実装。
//! HashMap をインメモリ DB として使用します。
//!
//! ## ロックの粒度
//!
//! ルームの集合は `RwLock` で守り、ルーム本体はそれぞれ独立した `Mutex` で守ります。
//! 集合への書き込みロックを取るのはルームの遅延生成時だけです。

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::{Mutex, RwLock};

use crate::domain::{
    MessageHistory, Room, RoomId, RoomRepository, SharedRoom, Timestamp,
    entity::HISTORY_CAPACITY,
};

/// インメモリ Room Repository 実装
pub struct InMemoryRoomRepository {
    /// ルーム ID → ルーム本体
    rooms: RwLock<HashMap<RoomId, SharedRoom>>,
    /// 新しく作るルームの履歴上限
    history_capacity: usize,
}

impl InMemoryRoomRepository {
    /// 新しい InMemoryRoomRepository を作成
    pub fn new() -> Self {
        Self::with_history_capacity(HISTORY_CAPACITY)
    }

    /// 履歴上限を指定して作成
    pub fn with_history_capacity(history_capacity: usize) -> Self {
        Self {
            rooms: RwLock::new(HashMap::new()),
            history_capacity,
        }
    }
}

impl Default for InMemoryRoomRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RoomRepository for InMemoryRoomRepository {
    async fn get_or_create(&self, room_id: &RoomId, created_at: Timestamp) -> SharedRoom {
        if let Some(room) = self.rooms.read().await.get(room_id) {
            return room.clone();
        }

        // 読み取りロックを手放してから書き込みロックを取るため、
        // その間に他のタスクが作成している可能性がある（entry で吸収する）
        let mut rooms = self.rooms.write().await;
        rooms
            .entry(room_id.clone())
            .or_insert_with(|| {
                tracing::info!("Room '{}' created", room_id.as_str());
                Arc::new(Mutex::new(Room::with_history(
                    room_id.clone(),
                    created_at,
                    MessageHistory::with_capacity(self.history_capacity),
                )))
            })
            .clone()
    }

    async fn find(&self, room_id: &RoomId) -> Option<SharedRoom> {
        self.rooms.read().await.get(room_id).cloned()
    }

    async fn all(&self) -> Vec<SharedRoom> {
        let rooms = self.rooms.read().await;
        let mut entries: Vec<(&RoomId, &SharedRoom)> = rooms.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries.into_iter().map(|(_, room)| room.clone()).collect()
    }
}
