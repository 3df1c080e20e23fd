//! WebSocket event DTOs.
//!
//! Every frame is a JSON object tagged by `"type"` (kebab-case event name) with
//! camelCase fields:
//!
//! ```json
//! {"type":"join-room","roomId":"s1","identity":{"userId":"u1","nickname":"Alice"},"creatorId":"u1"}
//! {"type":"new-message","message":{"id":"1700000000000-…","authorUserId":"u1",…}}
//! ```

use serde::{Deserialize, Serialize};

/// Identity payload of a `join-room` request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityDto {
    pub user_id: Option<String>,
    pub nickname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

/// Events sent by a connection to the server.
///
/// Required fields are optional here so that a missing field is reported back
/// to the sender as a validation error instead of a parse failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum InboundEvent {
    #[serde(rename_all = "camelCase")]
    JoinRoom {
        room_id: Option<String>,
        identity: Option<IdentityDto>,
        creator_id: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    SendMessage {
        room_id: Option<String>,
        message: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    DeleteMessage {
        room_id: Option<String>,
        message_id: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    BanUser {
        room_id: Option<String>,
        user_id: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    LeaveRoom { room_id: Option<String> },
}

/// A chat message as seen by clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageDto {
    pub id: String,
    pub author_user_id: String,
    pub author_nickname: String,
    pub body: String,
    pub timestamp_ms: i64,
    pub room_id: String,
    pub redacted: bool,
}

/// Events sent by the server to one or more connections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum OutboundEvent {
    #[serde(rename_all = "camelCase")]
    MessageHistory {
        room_id: String,
        messages: Vec<MessageDto>,
    },
    #[serde(rename_all = "camelCase")]
    UserJoined {
        room_id: String,
        user_id: String,
        nickname: String,
        timestamp_ms: i64,
    },
    #[serde(rename_all = "camelCase")]
    UserLeft {
        room_id: String,
        user_id: String,
        nickname: String,
        timestamp_ms: i64,
    },
    NewMessage { message: MessageDto },
    #[serde(rename_all = "camelCase")]
    MessageDeleted { room_id: String, message_id: String },
    #[serde(rename_all = "camelCase")]
    UserBanned { room_id: String, user_id: String },
    #[serde(rename_all = "camelCase")]
    Banned { room_id: String },
    Error { message: String },
}
