//! HTTP API endpoint handlers.
//!
//! Read-only views of the room registry. None of them ever creates a room.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{
    domain::RoomId,
    infrastructure::dto::http::{MemberDto, RoomDetailDto, RoomSummaryDto},
    ui::state::AppState,
    usecase::{GetRoomDetailError, RoomDetail},
};
use livechat_shared::time::timestamp_to_rfc3339;

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Get list of rooms
pub async fn get_rooms(State(state): State<Arc<AppState>>) -> Json<Vec<RoomSummaryDto>> {
    let rooms = state.get_rooms_usecase.execute().await;

    // Domain Model から DTO への変換
    Json(rooms.iter().map(RoomSummaryDto::from).collect())
}

/// Get room detail by ID
pub async fn get_room_detail(
    State(state): State<Arc<AppState>>,
    Path(room_id): Path<String>,
) -> Result<Json<RoomDetailDto>, StatusCode> {
    // 空白だけの ID のルームは存在し得ない
    let room_id = RoomId::new(room_id).map_err(|_| StatusCode::NOT_FOUND)?;

    match state.get_room_detail_usecase.execute(&room_id).await {
        Ok(detail) => Ok(Json(to_detail_dto(detail))),
        Err(GetRoomDetailError::RoomNotFound(id)) => {
            tracing::debug!("Room '{}' not found", id);
            Err(StatusCode::NOT_FOUND)
        }
    }
}

// Domain Model から DTO への変換
fn to_detail_dto(detail: RoomDetail) -> RoomDetailDto {
    let RoomDetail { room, members } = detail;
    RoomDetailDto {
        id: room.id.as_str().to_string(),
        members: members
            .into_iter()
            .map(|(connection_id, identity)| MemberDto {
                connection_id: connection_id.as_str().to_string(),
                user_id: identity
                    .as_ref()
                    .map(|identity| identity.user_id.as_str().to_string()),
                nickname: identity.map(|identity| identity.nickname),
            })
            .collect(),
        owner_id: room.moderation.owner().map(|id| id.as_str().to_string()),
        banned_user_ids: room
            .moderation
            .banned_users()
            .into_iter()
            .map(|id| id.as_str().to_string())
            .collect(),
        message_count: room.history.len(),
        created_at: timestamp_to_rfc3339(room.created_at.value()),
    }
}
