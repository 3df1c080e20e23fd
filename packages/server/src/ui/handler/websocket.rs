//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{Stream, sink::SinkExt, stream::StreamExt};
use tokio::sync::{mpsc, oneshot};

use crate::{
    domain::{ConnectionId, ConnectionIdFactory},
    ui::{EventDispatcher, state::AppState},
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let connection_id = ConnectionIdFactory::generate();
    ws.on_upgrade(move |socket| handle_socket(socket, state, connection_id))
}

/// Spawns a task that drains the connection's outbound channel into the WebSocket sink.
///
/// Every event the use cases push to this connection arrives on `rx` already
/// encoded as a JSON frame.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: futures_util::stream::SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(frame) = rx.recv().await {
            if sender.send(Message::Text(frame.into())).await.is_err() {
                break;
            }
        }
    })
}

/// Feeds inbound frames to the dispatcher until the transport ends or `stop` fires.
///
/// `stop` is only observed between frames: a frame that has reached the
/// dispatcher is always handled to completion, so a room never sees half of a
/// join or ban.
async fn receive_loop<S>(
    mut receiver: S,
    mut stop: oneshot::Receiver<()>,
    dispatcher: Arc<EventDispatcher>,
    connection_id: ConnectionId,
) where
    S: Stream<Item = Result<Message, axum::Error>> + Unpin,
{
    loop {
        let next = tokio::select! {
            biased;
            _ = &mut stop => break,
            next = receiver.next() => next,
        };
        let msg = match next {
            Some(Ok(msg)) => msg,
            Some(Err(e)) => {
                tracing::warn!(
                    "WebSocket error on connection '{}': {}",
                    connection_id.as_str(),
                    e
                );
                break;
            }
            None => break,
        };

        match msg {
            Message::Text(text) => {
                tracing::debug!(
                    "Received frame from connection '{}': {}",
                    connection_id.as_str(),
                    text.as_str()
                );
                dispatcher.handle_text(&connection_id, text.as_str()).await;
            }
            Message::Ping(_) => {
                tracing::debug!("Received ping");
                // Ping/pong is handled automatically by the WebSocket protocol
            }
            Message::Close(_) => {
                tracing::info!("Connection '{}' requested close", connection_id.as_str());
                break;
            }
            _ => {}
        }
    }
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>, connection_id: ConnectionId) {
    let (sender, receiver) = socket.split();

    // Register the outbound channel before reading any frame so that replies
    // to the very first event have somewhere to go
    let (tx, rx) = mpsc::unbounded_channel();
    state.dispatcher.connect(connection_id.clone(), tx).await;

    let (stop_tx, stop_rx) = oneshot::channel();
    let mut recv_task = tokio::spawn(receive_loop(
        receiver,
        stop_rx,
        state.dispatcher.clone(),
        connection_id.clone(),
    ));
    let mut send_task = pusher_loop(rx, sender);

    let sink_closed = tokio::select! {
        _ = &mut recv_task => false,
        _ = &mut send_task => true,
    };

    if sink_closed {
        // Stop reading, but let the frame in flight finish
        let _ = stop_tx.send(());
        if let Err(e) = recv_task.await {
            tracing::warn!(
                "Receive task for connection '{}' failed: {}",
                connection_id.as_str(),
                e
            );
        }
    } else {
        send_task.abort();
    }

    state.dispatcher.disconnect(&connection_id).await;
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use futures_util::stream;
    use tokio::sync::Notify;

    use super::*;
    use crate::{
        domain::{
            MessagePushError, MessagePusher, PusherChannel, RoomRepository, ServerEvent,
            SessionRepository, Timestamp,
        },
        usecase::test_support::{
            Fixture, NOW, RecordingPusher, connection, identity, room_id, user_id,
        },
    };

    /// `push_to` を呼ばれると、解放されるまでそこで止まる MessagePusher
    struct GatedPusher {
        inner: Arc<RecordingPusher>,
        entered: Notify,
        release: Notify,
    }

    #[async_trait]
    impl MessagePusher for GatedPusher {
        async fn register_client(&self, connection_id: ConnectionId, sender: PusherChannel) {
            self.inner.register_client(connection_id, sender).await;
        }

        async fn unregister_client(&self, connection_id: &ConnectionId) {
            self.inner.unregister_client(connection_id).await;
        }

        async fn push_to(
            &self,
            connection_id: &ConnectionId,
            event: &ServerEvent,
        ) -> Result<(), MessagePushError> {
            self.entered.notify_one();
            self.release.notified().await;
            self.inner.push_to(connection_id, event).await
        }

        async fn broadcast(
            &self,
            targets: Vec<ConnectionId>,
            event: &ServerEvent,
        ) -> Result<(), MessagePushError> {
            self.inner.broadcast(targets, event).await
        }
    }

    fn text(frame: serde_json::Value) -> Result<Message, axum::Error> {
        Ok(Message::Text(frame.to_string().into()))
    }

    #[tokio::test]
    async fn test_stop_during_ban_lets_the_ban_complete() {
        // テスト項目: BAN の処理中に送信側が閉じても、BAN は最後まで実行され、次のフレームは読まれない
        // given (前提条件):
        let fixture = Fixture::new();
        {
            let shared = fixture
                .rooms
                .get_or_create(&room_id("s1"), Timestamp::new(NOW))
                .await;
            let mut room = shared.lock().await;
            room.moderation
                .claim_ownership(Some(&user_id("u1")), &user_id("u1"));
            for (conn, user, nickname) in [("c1", "u1", "Alice"), ("c2", "u2", "Troll")] {
                fixture
                    .sessions
                    .bind(connection(conn), identity(user, nickname))
                    .await;
                room.members.join(connection(conn));
            }
        }
        let pusher = Arc::new(GatedPusher {
            inner: fixture.pusher.clone(),
            entered: Notify::new(),
            release: Notify::new(),
        });
        let dispatcher = Arc::new(EventDispatcher::new(
            fixture.rooms.clone(),
            fixture.sessions.clone(),
            pusher.clone(),
            fixture.clock.clone(),
        ));
        let frames = stream::iter(vec![
            text(serde_json::json!({"type": "ban-user", "roomId": "s1", "userId": "u2"})),
            text(serde_json::json!({"type": "send-message", "roomId": "s1", "message": "late"})),
        ])
        .chain(stream::pending());
        let (stop_tx, stop_rx) = oneshot::channel();
        let task = tokio::spawn(receive_loop(frames, stop_rx, dispatcher, connection("c1")));

        // when (操作):
        // banned の通知中（ルームのロック保持中）に停止を要求する
        pusher.entered.notified().await;
        stop_tx.send(()).unwrap();
        pusher.release.notify_one();
        tokio::time::timeout(std::time::Duration::from_secs(2), task)
            .await
            .expect("receive loop should stop")
            .unwrap();

        // then (期待する結果):
        assert_eq!(fixture.members_of("s1").await, vec![connection("c1")]);
        assert_eq!(
            fixture.pusher.events_for(&connection("c1")),
            vec![ServerEvent::UserBanned {
                room_id: room_id("s1"),
                user_id: user_id("u2"),
            }]
        );
        let shared = fixture.rooms.find(&room_id("s1")).await.unwrap();
        assert!(shared.lock().await.history.is_empty());
    }

    #[tokio::test]
    async fn test_receive_loop_ends_with_the_stream() {
        // テスト項目: 受信ストリームが終わればループも終わり、届いたフレームは全て処理される
        // given (前提条件):
        let fixture = Fixture::new();
        let dispatcher = Arc::new(EventDispatcher::new(
            fixture.rooms.clone(),
            fixture.sessions.clone(),
            fixture.pusher.clone(),
            fixture.clock.clone(),
        ));
        let frames = stream::iter(vec![text(serde_json::json!({
            "type": "join-room",
            "roomId": "s1",
            "identity": {"userId": "u1", "nickname": "Alice"},
        }))]);
        let (_stop_tx, stop_rx) = oneshot::channel();

        // when (操作):
        receive_loop(frames, stop_rx, dispatcher, connection("c1")).await;

        // then (期待する結果):
        assert_eq!(fixture.members_of("s1").await, vec![connection("c1")]);
    }
}
