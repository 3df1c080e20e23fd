//! Server state shared by every handler.

use std::sync::Arc;

use crate::usecase::{GetRoomDetailUseCase, GetRoomsUseCase};

use super::EventDispatcher;

/// Shared application state
pub struct AppState {
    /// EventDispatcher（WebSocket イベントの振り分け）
    pub dispatcher: Arc<EventDispatcher>,
    /// GetRoomsUseCase（ルーム一覧取得のユースケース）
    pub get_rooms_usecase: Arc<GetRoomsUseCase>,
    /// GetRoomDetailUseCase（ルーム詳細取得のユースケース）
    pub get_room_detail_usecase: Arc<GetRoomDetailUseCase>,
}
