use crate::domain::value_object::{MessageBody, MessageId, RoomId, Timestamp, UserId};

/// 削除済みメッセージの本文として表示するプレースホルダー
pub const REDACTED_PLACEHOLDER: &str = "This message has been deleted";

/// チャットメッセージ
///
/// 生成後に変化するのは `redact()` による `body` と `redacted` のみ。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub id: MessageId,
    pub author_user_id: UserId,
    pub author_nickname: String,
    pub body: String,
    pub timestamp: Timestamp,
    pub room_id: RoomId,
    pub redacted: bool,
}

impl ChatMessage {
    pub fn new(
        id: MessageId,
        author_user_id: UserId,
        author_nickname: String,
        body: MessageBody,
        timestamp: Timestamp,
        room_id: RoomId,
    ) -> Self {
        Self {
            id,
            author_user_id,
            author_nickname,
            body: body.into_string(),
            timestamp,
            room_id,
            redacted: false,
        }
    }

    /// メッセージを削除済みにする（ID と履歴内の位置はそのまま）
    pub fn redact(&mut self) {
        self.redacted = true;
        self.body = REDACTED_PLACEHOLDER.to_string();
    }
}
