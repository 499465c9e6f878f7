//! Shared data types persisted by repository implementations.

mod blob;
mod record;

pub use blob::{BlobError, STATE_BLOB_VERSION, StateBlob};
pub use record::{GAME_RECORD_SCHEMA, GameRecord};
