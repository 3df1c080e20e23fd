//! UseCase 層のエラー
//!
//! `Display` の文字列は、そのまま要求元の接続への `error` イベントの本文になる。

use thiserror::Error;

/// join-room のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JoinRoomError {
    #[error("You are banned from room '{0}'")]
    Banned(String),
}

/// send-message のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SendMessageError {
    #[error("Join a room before sending messages")]
    NotJoined,

    #[error("You are banned from room '{0}'")]
    Banned(String),
}

/// delete-message のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeleteMessageError {
    #[error("Join a room before moderating it")]
    NotJoined,

    #[error("Only the room owner can delete messages")]
    NotOwner,
}

/// ban-user のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BanUserError {
    #[error("Join a room before moderating it")]
    NotJoined,

    #[error("Only the room owner can ban users")]
    NotOwner,
}

/// ルーム詳細取得のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GetRoomDetailError {
    #[error("Room '{0}' not found")]
    RoomNotFound(String),
}
