//! File-based repository implementations.

mod game;
mod log;
mod plate_log;

pub use game::FileGameRepository;
pub use log::FileRepository;
pub use plate_log::FilePlateLog;
