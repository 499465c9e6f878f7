//! Repository layer for data that changes while games are played.
//!
//! - Game records (seed, status, and the encoded live state)
//! - Plate-appearance logs (append-only audit trail)
//!
//! Rosters and rule sets are static content handled by the oracles.

mod error;
mod export;
mod file;
mod memory;
mod traits;
mod types;

pub use error::{RepositoryError, Result};
pub use export::{entry_to_json, pitches_to_json};
pub use file::{FileGameRepository, FilePlateLog, FileRepository};
pub use memory::{InMemoryGameRepo, InMemoryPlateLog};
pub use traits::{GameRepository, PlateLogRepository};
pub use types::{
    BlobError, GAME_RECORD_SCHEMA, GameRecord, STATE_BLOB_VERSION, StateBlob,
};
