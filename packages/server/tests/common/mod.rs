//! Helpers shared by the integration tests.
//!
//! Each test starts its own server on an ephemeral port, in-process, so tests
//! can run in parallel without fighting over ports.

#![allow(dead_code)]

use std::{net::SocketAddr, sync::Arc, time::Duration};

use futures_util::{SinkExt, StreamExt};
use livechat_server::{
    infrastructure::{
        message_pusher::WebSocketMessagePusher,
        repository::{InMemoryRoomRepository, InMemorySessionRepository},
    },
    ui::{EventDispatcher, Server},
    usecase::{GetRoomDetailUseCase, GetRoomsUseCase},
};
use livechat_shared::time::SystemClock;
use serde_json::{Value, json};
use tokio::{net::TcpStream, task::JoinHandle};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async, tungstenite::Message};

const RECV_TIMEOUT: Duration = Duration::from_secs(2);
const SILENCE_WINDOW: Duration = Duration::from_millis(200);

/// Helper struct to manage the server task lifecycle
pub struct TestServer {
    addr: SocketAddr,
    handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a server wired exactly like the binary
    pub async fn start() -> Self {
        let rooms = Arc::new(InMemoryRoomRepository::new());
        let sessions = Arc::new(InMemorySessionRepository::new());
        let message_pusher = Arc::new(WebSocketMessagePusher::new());
        let dispatcher = Arc::new(EventDispatcher::new(
            rooms.clone(),
            sessions.clone(),
            message_pusher,
            Arc::new(SystemClock),
        ));
        let router = Server::new(
            dispatcher,
            Arc::new(GetRoomsUseCase::new(rooms.clone())),
            Arc::new(GetRoomDetailUseCase::new(rooms, sessions)),
        )
        .router();

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test server");
        let addr = listener.local_addr().expect("Failed to read local address");
        let handle = tokio::spawn(async move {
            axum::serve(listener, router)
                .await
                .expect("Test server failed");
        });

        Self { addr, handle }
    }

    /// Get the WebSocket URL for this server
    pub fn ws_url(&self) -> String {
        format!("ws://{}/ws", self.addr)
    }

    /// Get an HTTP URL for the given path
    pub fn http_url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Connect a new WebSocket client
    pub async fn connect(&self) -> TestClient {
        let (stream, _) = connect_async(self.ws_url())
            .await
            .expect("Failed to connect to test server");
        TestClient { stream }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// A WebSocket client speaking the JSON event protocol
pub struct TestClient {
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl TestClient {
    /// Send a raw text frame
    pub async fn send_text(&mut self, text: &str) {
        self.stream
            .send(Message::Text(text.to_string().into()))
            .await
            .expect("Failed to send frame");
    }

    /// Send an event
    pub async fn send(&mut self, event: Value) {
        self.send_text(&event.to_string()).await;
    }

    /// Send `join-room` and wait for the `message-history` reply
    pub async fn join(
        &mut self,
        room_id: &str,
        user_id: &str,
        nickname: &str,
        creator_id: Option<&str>,
    ) -> Value {
        let mut event = json!({
            "type": "join-room",
            "roomId": room_id,
            "identity": {"userId": user_id, "nickname": nickname},
        });
        if let Some(creator_id) = creator_id {
            event["creatorId"] = json!(creator_id);
        }
        self.send(event).await;
        self.recv_type("message-history").await
    }

    /// Send `join-room` and expect it to be refused because of a ban
    pub async fn join_rejected(&mut self, room_id: &str, user_id: &str, nickname: &str) {
        self.send(json!({
            "type": "join-room",
            "roomId": room_id,
            "identity": {"userId": user_id, "nickname": nickname},
        }))
        .await;
        let error = self.recv_type("error").await;
        assert_eq!(
            error["message"],
            format!("You are banned from room '{room_id}'")
        );
    }

    /// Receive the next event
    pub async fn recv(&mut self) -> Value {
        loop {
            let frame = tokio::time::timeout(RECV_TIMEOUT, self.stream.next())
                .await
                .expect("Timed out waiting for an event")
                .expect("Connection closed")
                .expect("WebSocket error");
            if let Message::Text(text) = frame {
                return serde_json::from_str(text.as_str()).expect("Event is not JSON");
            }
        }
    }

    /// Receive the next event and check its type
    pub async fn recv_type(&mut self, event_type: &str) -> Value {
        let event = self.recv().await;
        assert_eq!(event["type"], event_type, "unexpected event: {event}");
        event
    }

    /// Assert that no event arrives for a short while
    pub async fn expect_silence(&mut self) {
        if let Ok(Some(frame)) = tokio::time::timeout(SILENCE_WINDOW, self.stream.next()).await {
            panic!("Expected no event, got {frame:?}");
        }
    }

    /// Close the connection
    pub async fn close(mut self) {
        let _ = self.stream.close(None).await;
    }
}
