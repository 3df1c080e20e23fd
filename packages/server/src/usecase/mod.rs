//! UseCase 層
//!
//! 受信イベントごとに 1 つのユースケースを持つ。
//! 各ユースケースは対象ルームのロックを処理の最初から最後まで保持し、
//! 同じルームに対するイベントが途中で割り込まないことを保証する。

mod ban_user;
mod connect;
mod delete_message;
mod disconnect;
mod error;
mod get_room_detail;
mod get_rooms;
mod join_room;
mod leave_room;
mod send_message;

#[cfg(test)]
pub(crate) mod test_support;

pub use ban_user::BanUserUseCase;
pub use connect::ConnectUseCase;
pub use delete_message::DeleteMessageUseCase;
pub use disconnect::DisconnectUseCase;
pub use error::{
    BanUserError, DeleteMessageError, GetRoomDetailError, JoinRoomError, SendMessageError,
};
pub use get_room_detail::{GetRoomDetailUseCase, RoomDetail};
pub use get_rooms::GetRoomsUseCase;
pub use join_room::JoinRoomUseCase;
pub use leave_room::LeaveRoomUseCase;
pub use send_message::SendMessageUseCase;
