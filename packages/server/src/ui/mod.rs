//! WebSocket chat server implementation.

mod dispatcher;
mod handler;
mod server;
mod signal;
pub mod state;

pub use dispatcher::{DispatchError, EventDispatcher};
pub use server::Server;
