//! Outbound events produced by the use cases.
//!
//! The wire encoding lives in `infrastructure::dto::websocket`; the use cases only
//! decide *what* happened and *who* has to hear about it.

use super::{
    entity::ChatMessage,
    value_object::{MessageId, RoomId, Timestamp, UserId},
};

/// サーバーから接続へ送られるイベント
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerEvent {
    /// 参加時の履歴（削除済みメッセージは含まない）
    MessageHistory {
        room_id: RoomId,
        messages: Vec<ChatMessage>,
    },
    UserJoined {
        room_id: RoomId,
        user_id: UserId,
        nickname: String,
        timestamp: Timestamp,
    },
    UserLeft {
        room_id: RoomId,
        user_id: UserId,
        nickname: String,
        timestamp: Timestamp,
    },
    NewMessage(ChatMessage),
    MessageDeleted {
        room_id: RoomId,
        message_id: MessageId,
    },
    UserBanned {
        room_id: RoomId,
        user_id: UserId,
    },
    /// BAN されて追い出された接続にだけ送られる
    Banned { room_id: RoomId },
    Error { message: String },
}
