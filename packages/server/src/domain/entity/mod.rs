//! Domain entities.
//!
//! A [`Room`] bundles everything that has to change atomically for one room:
//! its member set, its moderation state and its bounded message history.

mod history;
mod identity;
mod message;
mod moderation;
mod room;

pub use history::{HISTORY_CAPACITY, MessageHistory};
pub use identity::Identity;
pub use message::{ChatMessage, REDACTED_PLACEHOLDER};
pub use moderation::Moderation;
pub use room::{Room, RoomMembers};
