use std::collections::HashSet;

use crate::domain::value_object::{ConnectionId, RoomId, Timestamp};

use super::{history::MessageHistory, moderation::Moderation};

/// ルームに参加中の接続の集合
///
/// 操作はすべて冪等。二重参加や未参加での退出は何も起こさない。
#[derive(Debug, Clone, Default)]
pub struct RoomMembers {
    connections: HashSet<ConnectionId>,
}

impl RoomMembers {
    pub fn new() -> Self {
        Self::default()
    }

    /// 接続を参加させる（新規参加なら `true`）
    pub fn join(&mut self, connection_id: ConnectionId) -> bool {
        self.connections.insert(connection_id)
    }

    /// 接続を退出させる（参加中だったなら `true`）
    pub fn leave(&mut self, connection_id: &ConnectionId) -> bool {
        self.connections.remove(connection_id)
    }

    pub fn contains(&self, connection_id: &ConnectionId) -> bool {
        self.connections.contains(connection_id)
    }

    /// 現在の参加者（接続 ID 順）
    pub fn members(&self) -> Vec<ConnectionId> {
        let mut members: Vec<ConnectionId> = self.connections.iter().cloned().collect();
        members.sort();
        members
    }

    /// 指定した接続を除いた参加者
    pub fn members_except(&self, exclude: &ConnectionId) -> Vec<ConnectionId> {
        self.members()
            .into_iter()
            .filter(|id| id != exclude)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.connections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }
}

/// ルーム（配信ごとのチャットチャンネル）
///
/// 最初の参加時に遅延生成され、プロセス終了まで破棄されない。
#[derive(Debug, Clone)]
pub struct Room {
    pub id: RoomId,
    pub created_at: Timestamp,
    pub members: RoomMembers,
    pub moderation: Moderation,
    pub history: MessageHistory,
}

impl Room {
    pub fn new(id: RoomId, created_at: Timestamp) -> Self {
        Self::with_history(id, created_at, MessageHistory::new())
    }

    pub fn with_history(id: RoomId, created_at: Timestamp, history: MessageHistory) -> Self {
        Self {
            id,
            created_at,
            members: RoomMembers::new(),
            moderation: Moderation::new(),
            history,
        }
    }
}
