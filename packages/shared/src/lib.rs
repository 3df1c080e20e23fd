//! Utilities shared by the livechat packages: logging setup and time handling.

pub mod logger;
pub mod time;
