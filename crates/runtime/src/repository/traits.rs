//! Repository contracts for saving and loading mutable runtime data.

use ballpark_core::{GameId, PlateAppearanceLog};

use crate::repository::Result;
use crate::types::ByteOffset;

use super::types::GameRecord;

/// Persistence for game records, keyed by game id.
///
/// Implementations take `&self` so one repository can serve several games from
/// different threads; each game is still driven by one call at a time.
pub trait GameRepository: Send + Sync {
    /// Insert or replace a record
    fn save(&self, record: &GameRecord) -> Result<()>;

    /// Load a record by id
    fn load(&self, id: GameId) -> Result<Option<GameRecord>>;

    fn exists(&self, id: GameId) -> bool;

    fn delete(&self, id: GameId) -> Result<()>;

    /// List stored game ids in ascending order
    fn list_ids(&self) -> Result<Vec<GameId>> {
        Ok(vec![])
    }
}

/// Append-only store of completed plate appearances.
///
/// # File Format
///
/// File-backed implementations keep one log per game, each entry stored as:
/// ```text
/// [u32 length][bincode serialized PlateAppearanceLog]
/// ```
pub trait PlateLogRepository: Send + Sync {
    /// Append an entry to its game's log.
    ///
    /// Returns the position the entry was written at: a byte offset for file logs,
    /// an entry index for in-memory logs.
    fn append(&mut self, entry: &PlateAppearanceLog) -> Result<ByteOffset>;

    /// All flushed entries of a game, oldest first.
    fn entries(&self, game: GameId) -> Result<Vec<PlateAppearanceLog>>;

    /// Flush buffered writes to durable storage
    fn flush(&mut self) -> Result<()>;

    /// Drop every entry of a game.
    fn clear(&mut self, game: GameId) -> Result<()>;
}
