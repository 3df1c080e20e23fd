//! Conversion logic between DTOs and domain types.

use livechat_shared::time::timestamp_to_rfc3339;

use crate::domain::{
    ChatMessage, Identity, Room, ServerEvent, UserId, ValueObjectError,
};
use crate::infrastructure::dto::{http, websocket as dto};

// ========================================
// DTO → Domain
// ========================================

impl TryFrom<dto::IdentityDto> for Identity {
    type Error = ValueObjectError;

    /// `userId` が必須。`nickname` が省略された場合は空文字列として扱う。
    fn try_from(dto: dto::IdentityDto) -> Result<Self, Self::Error> {
        let user_id = UserId::new(dto.user_id.unwrap_or_default())?;
        Ok(Identity::new(
            user_id,
            dto.nickname.unwrap_or_default(),
            dto.avatar_url,
        ))
    }
}

// ========================================
// Domain → DTO
// ========================================

impl From<&ChatMessage> for dto::MessageDto {
    fn from(model: &ChatMessage) -> Self {
        Self {
            id: model.id.as_str().to_string(),
            author_user_id: model.author_user_id.as_str().to_string(),
            author_nickname: model.author_nickname.clone(),
            body: model.body.clone(),
            timestamp_ms: model.timestamp.value(),
            room_id: model.room_id.as_str().to_string(),
            redacted: model.redacted,
        }
    }
}

impl From<&ServerEvent> for dto::OutboundEvent {
    fn from(event: &ServerEvent) -> Self {
        match event {
            ServerEvent::MessageHistory { room_id, messages } => Self::MessageHistory {
                room_id: room_id.as_str().to_string(),
                messages: messages.iter().map(dto::MessageDto::from).collect(),
            },
            ServerEvent::UserJoined {
                room_id,
                user_id,
                nickname,
                timestamp,
            } => Self::UserJoined {
                room_id: room_id.as_str().to_string(),
                user_id: user_id.as_str().to_string(),
                nickname: nickname.clone(),
                timestamp_ms: timestamp.value(),
            },
            ServerEvent::UserLeft {
                room_id,
                user_id,
                nickname,
                timestamp,
            } => Self::UserLeft {
                room_id: room_id.as_str().to_string(),
                user_id: user_id.as_str().to_string(),
                nickname: nickname.clone(),
                timestamp_ms: timestamp.value(),
            },
            ServerEvent::NewMessage(message) => Self::NewMessage {
                message: message.into(),
            },
            ServerEvent::MessageDeleted {
                room_id,
                message_id,
            } => Self::MessageDeleted {
                room_id: room_id.as_str().to_string(),
                message_id: message_id.as_str().to_string(),
            },
            ServerEvent::UserBanned { room_id, user_id } => Self::UserBanned {
                room_id: room_id.as_str().to_string(),
                user_id: user_id.as_str().to_string(),
            },
            ServerEvent::Banned { room_id } => Self::Banned {
                room_id: room_id.as_str().to_string(),
            },
            ServerEvent::Error { message } => Self::Error {
                message: message.clone(),
            },
        }
    }
}

impl From<&Room> for http::RoomSummaryDto {
    fn from(room: &Room) -> Self {
        Self {
            id: room.id.as_str().to_string(),
            member_count: room.members.len(),
            owner_id: room.moderation.owner().map(|id| id.as_str().to_string()),
            message_count: room.history.len(),
            created_at: timestamp_to_rfc3339(room.created_at.value()),
        }
    }
}
