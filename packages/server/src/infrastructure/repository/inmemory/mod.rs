mod room;
mod session;

pub use room::InMemoryRoomRepository;
pub use session::InMemorySessionRepository;
