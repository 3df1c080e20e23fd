//! HTTP API response DTOs.

use serde::{Deserialize, Serialize};

/// `GET /api/rooms` の要素
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomSummaryDto {
    pub id: String,
    pub member_count: usize,
    pub owner_id: Option<String>,
    pub message_count: usize,
    /// RFC 3339
    pub created_at: String,
}

/// Room member as exposed by the detail endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberDto {
    pub connection_id: String,
    pub user_id: Option<String>,
    pub nickname: Option<String>,
}

/// `GET /api/rooms/{room_id}` のレスポンス
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomDetailDto {
    pub id: String,
    pub members: Vec<MemberDto>,
    pub owner_id: Option<String>,
    pub banned_user_ids: Vec<String>,
    pub message_count: usize,
    /// RFC 3339
    pub created_at: String,
}
