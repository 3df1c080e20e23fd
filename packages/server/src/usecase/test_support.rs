//! Shared fixtures for the use case tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use livechat_shared::time::{Clock, FixedClock};

use crate::{
    domain::{
        ConnectionId, Identity, MessagePushError, MessagePusher, PusherChannel, RoomId,
        RoomRepository, ServerEvent, SessionRepository, UserId,
    },
    infrastructure::repository::{InMemoryRoomRepository, InMemorySessionRepository},
};

pub const NOW: i64 = 1_700_000_000_000;

/// Records every delivered event per target connection.
#[derive(Default)]
pub struct RecordingPusher {
    delivered: Mutex<Vec<(ConnectionId, ServerEvent)>>,
}

impl RecordingPusher {
    pub fn events_for(&self, connection_id: &ConnectionId) -> Vec<ServerEvent> {
        self.delivered
            .lock()
            .unwrap()
            .iter()
            .filter(|(target, _)| target == connection_id)
            .map(|(_, event)| event.clone())
            .collect()
    }

    pub fn total(&self) -> usize {
        self.delivered.lock().unwrap().len()
    }

    pub fn clear(&self) {
        self.delivered.lock().unwrap().clear();
    }
}

#[async_trait]
impl MessagePusher for RecordingPusher {
    async fn register_client(&self, _connection_id: ConnectionId, _sender: PusherChannel) {}

    async fn unregister_client(&self, _connection_id: &ConnectionId) {}

    async fn push_to(
        &self,
        connection_id: &ConnectionId,
        event: &ServerEvent,
    ) -> Result<(), MessagePushError> {
        self.delivered
            .lock()
            .unwrap()
            .push((connection_id.clone(), event.clone()));
        Ok(())
    }

    async fn broadcast(
        &self,
        targets: Vec<ConnectionId>,
        event: &ServerEvent,
    ) -> Result<(), MessagePushError> {
        let mut delivered = self.delivered.lock().unwrap();
        for target in targets {
            delivered.push((target, event.clone()));
        }
        Ok(())
    }
}

/// Repositories, pusher and clock wired the way the server wires them.
pub struct Fixture {
    pub rooms: Arc<InMemoryRoomRepository>,
    pub sessions: Arc<InMemorySessionRepository>,
    pub pusher: Arc<RecordingPusher>,
    pub clock: Arc<dyn Clock>,
}

impl Fixture {
    pub fn new() -> Self {
        Self {
            rooms: Arc::new(InMemoryRoomRepository::new()),
            sessions: Arc::new(InMemorySessionRepository::new()),
            pusher: Arc::new(RecordingPusher::default()),
            clock: Arc::new(FixedClock::new(NOW)),
        }
    }

    pub async fn members_of(&self, room: &str) -> Vec<ConnectionId> {
        match self.rooms.find(&room_id(room)).await {
            Some(shared) => shared.lock().await.members.members(),
            None => Vec::new(),
        }
    }

    pub async fn bound(&self, connection_id: &ConnectionId) -> Option<Identity> {
        self.sessions.identity_of(connection_id).await
    }
}

pub fn connection(id: &str) -> ConnectionId {
    ConnectionId::new(id.to_string()).unwrap()
}

pub fn room_id(id: &str) -> RoomId {
    RoomId::new(id.to_string()).unwrap()
}

pub fn user_id(id: &str) -> UserId {
    UserId::new(id.to_string()).unwrap()
}

pub fn identity(user: &str, nickname: &str) -> Identity {
    Identity::new(user_id(user), nickname.to_string(), None)
}
