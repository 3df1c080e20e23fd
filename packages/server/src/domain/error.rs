//! Domain errors.

use thiserror::Error;

/// 値オブジェクトの生成に失敗したときのエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueObjectError {
    #[error("roomId is required")]
    EmptyRoomId,

    #[error("userId is required")]
    EmptyUserId,

    #[error("connection id must not be empty")]
    EmptyConnectionId,

    #[error("messageId is required")]
    EmptyMessageId,

    #[error("message must not be empty")]
    EmptyMessageBody,
}

/// メッセージ送信（通知）のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessagePushError {
    #[error("Connection '{0}' not found")]
    ClientNotFound(String),

    #[error("Failed to push message: {0}")]
    PushFailed(String),

    #[error("Failed to encode event: {0}")]
    EncodeFailed(String),
}
