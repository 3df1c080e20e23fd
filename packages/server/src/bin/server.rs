//! Live-stream chat server.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin livechat-server
//! cargo run --bin livechat-server -- --host 0.0.0.0 --port 3000 --log-level debug
//! ```

use std::sync::Arc;

use clap::Parser;
use livechat_server::{
    infrastructure::{
        message_pusher::WebSocketMessagePusher,
        repository::{InMemoryRoomRepository, InMemorySessionRepository},
    },
    ui::{EventDispatcher, Server},
    usecase::{GetRoomDetailUseCase, GetRoomsUseCase},
};
use livechat_shared::{
    logger::setup_logger,
    time::{Clock, SystemClock},
};

#[derive(Parser, Debug)]
#[command(name = "livechat-server")]
#[command(about = "Room-based live-stream chat server with creator moderation", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "8080")]
    port: u16,

    /// Default log level, used when RUST_LOG is not set
    #[arg(short = 'l', long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Initialize tracing
    setup_logger(
        env!("CARGO_PKG_NAME"),
        env!("CARGO_BIN_NAME"),
        &args.log_level,
    );

    // Initialize dependencies in order:
    // 1. Repositories
    // 2. MessagePusher
    // 3. Clock
    // 4. Dispatcher and UseCases
    // 5. Server

    // 1. Create Repositories (in-memory registries)
    let rooms = Arc::new(InMemoryRoomRepository::new());
    let sessions = Arc::new(InMemorySessionRepository::new());

    // 2. Create MessagePusher (WebSocket implementation)
    let message_pusher = Arc::new(WebSocketMessagePusher::new());

    // 3. Create Clock
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    // 4. Create Dispatcher and UseCases
    let dispatcher = Arc::new(EventDispatcher::new(
        rooms.clone(),
        sessions.clone(),
        message_pusher,
        clock,
    ));
    let get_rooms_usecase = Arc::new(GetRoomsUseCase::new(rooms.clone()));
    let get_room_detail_usecase = Arc::new(GetRoomDetailUseCase::new(rooms, sessions));

    // 5. Create and run the server
    let server = Server::new(dispatcher, get_rooms_usecase, get_room_detail_usecase);
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
