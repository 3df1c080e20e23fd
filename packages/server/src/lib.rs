//! Room-based live-stream chat server library.
//!
//! Viewers join per-stream rooms over WebSocket, exchange messages and are
//! moderated by the stream's creator (message deletion and bans).

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
