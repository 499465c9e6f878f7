//! In-memory repository implementations.

mod game;
mod plate_log;

pub use game::InMemoryGameRepo;
pub use plate_log::InMemoryPlateLog;
