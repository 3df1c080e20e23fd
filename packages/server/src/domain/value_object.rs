//! Value objects of the chat domain.
//!
//! Every identifier is validated on construction, so a value that made it into
//! the domain is never blank.

use uuid::Uuid;

use super::error::ValueObjectError;

/// ルーム ID（配信 ID）
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RoomId(String);

impl RoomId {
    pub fn new(id: String) -> Result<Self, ValueObjectError> {
        if id.trim().is_empty() {
            return Err(ValueObjectError::EmptyRoomId);
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for RoomId {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// 接続 ID（トランスポートが割り当てる不透明な ID）
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConnectionId(String);

impl ConnectionId {
    pub fn new(id: String) -> Result<Self, ValueObjectError> {
        if id.is_empty() {
            return Err(ValueObjectError::EmptyConnectionId);
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// 接続 ID の生成器（UUID v4）
pub struct ConnectionIdFactory;

impl ConnectionIdFactory {
    pub fn generate() -> ConnectionId {
        ConnectionId(Uuid::new_v4().to_string())
    }
}

/// ユーザー ID（呼び出し元から渡される、検証されない ID）
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: String) -> Result<Self, ValueObjectError> {
        if id.trim().is_empty() {
            return Err(ValueObjectError::EmptyUserId);
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for UserId {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// メッセージ ID
///
/// 送信時刻と送信元の接続 ID から `"<timestamp_ms>-<connection_id>"` の形で導出される。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MessageId(String);

impl MessageId {
    pub fn new(id: String) -> Result<Self, ValueObjectError> {
        if id.trim().is_empty() {
            return Err(ValueObjectError::EmptyMessageId);
        }
        Ok(Self(id))
    }

    pub fn derive(timestamp: Timestamp, connection_id: &ConnectionId) -> Self {
        Self(format!("{}-{}", timestamp.value(), connection_id.as_str()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for MessageId {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// メッセージ本文（前後の空白を除去済み、空ではない）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageBody(String);

impl MessageBody {
    pub fn new(body: String) -> Result<Self, ValueObjectError> {
        let trimmed = body.trim();
        if trimmed.is_empty() {
            return Err(ValueObjectError::EmptyMessageBody);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for MessageBody {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Unix タイムスタンプ（ミリ秒）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(millis: i64) -> Self {
        Self(millis)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}
