//! Routes inbound WebSocket events to the use cases.
//!
//! The dispatcher owns the boundary between untrusted frames and the domain:
//! it parses the frame, turns the DTO fields into value objects and reports any
//! failure back to the requesting connection as an `error` event. Nothing here
//! ever closes the connection.

use std::sync::Arc;

use livechat_shared::time::Clock;
use thiserror::Error;

use crate::{
    domain::{
        ConnectionId, Identity, MessageBody, MessageId, MessagePusher, PusherChannel, RoomId,
        RoomRepository, ServerEvent, SessionRepository, UserId, ValueObjectError,
    },
    infrastructure::dto::websocket::InboundEvent,
    usecase::{
        BanUserError, BanUserUseCase, ConnectUseCase, DeleteMessageError, DeleteMessageUseCase,
        DisconnectUseCase, JoinRoomError, JoinRoomUseCase, LeaveRoomUseCase, SendMessageError,
        SendMessageUseCase,
    },
};

/// Anything that turns an inbound event into an `error` reply.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("Invalid event: {0}")]
    Malformed(String),

    #[error(transparent)]
    Validation(#[from] ValueObjectError),

    #[error(transparent)]
    JoinRoom(#[from] JoinRoomError),

    #[error(transparent)]
    SendMessage(#[from] SendMessageError),

    #[error(transparent)]
    DeleteMessage(#[from] DeleteMessageError),

    #[error(transparent)]
    BanUser(#[from] BanUserError),
}

/// Event dispatcher shared by every WebSocket connection.
pub struct EventDispatcher {
    connect_usecase: ConnectUseCase,
    join_room_usecase: JoinRoomUseCase,
    send_message_usecase: SendMessageUseCase,
    delete_message_usecase: DeleteMessageUseCase,
    ban_user_usecase: BanUserUseCase,
    leave_room_usecase: LeaveRoomUseCase,
    disconnect_usecase: DisconnectUseCase,
    message_pusher: Arc<dyn MessagePusher>,
}

impl EventDispatcher {
    /// Wire every per-event use case against the same registries.
    pub fn new(
        rooms: Arc<dyn RoomRepository>,
        sessions: Arc<dyn SessionRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            connect_usecase: ConnectUseCase::new(message_pusher.clone()),
            join_room_usecase: JoinRoomUseCase::new(
                rooms.clone(),
                sessions.clone(),
                message_pusher.clone(),
                clock.clone(),
            ),
            send_message_usecase: SendMessageUseCase::new(
                rooms.clone(),
                sessions.clone(),
                message_pusher.clone(),
                clock.clone(),
            ),
            delete_message_usecase: DeleteMessageUseCase::new(
                rooms.clone(),
                sessions.clone(),
                message_pusher.clone(),
            ),
            ban_user_usecase: BanUserUseCase::new(
                rooms.clone(),
                sessions.clone(),
                message_pusher.clone(),
            ),
            leave_room_usecase: LeaveRoomUseCase::new(
                rooms.clone(),
                sessions.clone(),
                message_pusher.clone(),
                clock.clone(),
            ),
            disconnect_usecase: DisconnectUseCase::new(
                rooms,
                sessions,
                message_pusher.clone(),
                clock,
            ),
            message_pusher,
        }
    }

    /// Register a freshly accepted connection.
    pub async fn connect(&self, connection_id: ConnectionId, sender: PusherChannel) {
        self.connect_usecase.execute(connection_id, sender).await;
    }

    /// Handle one text frame received from `connection_id`.
    pub async fn handle_text(&self, connection_id: &ConnectionId, text: &str) {
        let result = match serde_json::from_str::<InboundEvent>(text) {
            Ok(event) => self.dispatch(connection_id, event).await,
            Err(e) => Err(DispatchError::Malformed(e.to_string())),
        };
        if let Err(e) = result {
            self.reply_error(connection_id, e).await;
        }
    }

    /// Implicit event fired once the transport is gone.
    pub async fn disconnect(&self, connection_id: &ConnectionId) {
        self.disconnect_usecase.execute(connection_id).await;
    }

    async fn dispatch(
        &self,
        connection_id: &ConnectionId,
        event: InboundEvent,
    ) -> Result<(), DispatchError> {
        match event {
            InboundEvent::JoinRoom {
                room_id,
                identity,
                creator_id,
            } => {
                let room_id = RoomId::new(room_id.unwrap_or_default())?;
                let identity =
                    Identity::try_from(identity.ok_or(ValueObjectError::EmptyUserId)?)?;
                // A blank claim is the same as no claim
                let creator_id = creator_id.and_then(|id| UserId::new(id).ok());
                self.join_room_usecase
                    .execute(connection_id, room_id, identity, creator_id)
                    .await?;
            }
            InboundEvent::SendMessage { room_id, message } => {
                let room_id = RoomId::new(room_id.unwrap_or_default())?;
                let body = MessageBody::new(message.unwrap_or_default())?;
                self.send_message_usecase
                    .execute(connection_id, room_id, body)
                    .await?;
            }
            InboundEvent::DeleteMessage {
                room_id,
                message_id,
            } => {
                let room_id = RoomId::new(room_id.unwrap_or_default())?;
                let message_id = MessageId::new(message_id.unwrap_or_default())?;
                self.delete_message_usecase
                    .execute(connection_id, room_id, message_id)
                    .await?;
            }
            InboundEvent::BanUser { room_id, user_id } => {
                let room_id = RoomId::new(room_id.unwrap_or_default())?;
                let user_id = UserId::new(user_id.unwrap_or_default())?;
                self.ban_user_usecase
                    .execute(connection_id, room_id, user_id)
                    .await?;
            }
            InboundEvent::LeaveRoom { room_id } => {
                let room_id = RoomId::new(room_id.unwrap_or_default())?;
                self.leave_room_usecase
                    .execute(connection_id, room_id)
                    .await;
            }
        }
        Ok(())
    }

    async fn reply_error(&self, connection_id: &ConnectionId, error: DispatchError) {
        tracing::warn!(
            "Rejected event from connection '{}': {}",
            connection_id.as_str(),
            error
        );
        let event = ServerEvent::Error {
            message: error.to_string(),
        };
        if let Err(e) = self.message_pusher.push_to(connection_id, &event).await {
            tracing::warn!(
                "Failed to send error to connection '{}': {}",
                connection_id.as_str(),
                e
            );
        }
    }
}
