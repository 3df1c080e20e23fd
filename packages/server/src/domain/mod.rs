//! Domain layer: value objects, entities, domain events and the ports
//! (repository / message pusher traits) implemented by the infrastructure layer.

pub mod entity;
pub mod error;
pub mod event;
pub mod message_pusher;
pub mod repository;
pub mod value_object;

pub use entity::{
    ChatMessage, HISTORY_CAPACITY, Identity, MessageHistory, Moderation, REDACTED_PLACEHOLDER,
    Room, RoomMembers,
};
pub use error::{MessagePushError, ValueObjectError};
pub use event::ServerEvent;
#[cfg(test)]
pub use message_pusher::MockMessagePusher;
pub use message_pusher::{MessagePusher, PusherChannel};
pub use repository::{RoomRepository, SessionRepository, SharedRoom};
pub use value_object::{
    ConnectionId, ConnectionIdFactory, MessageBody, MessageId, RoomId, Timestamp, UserId,
};
