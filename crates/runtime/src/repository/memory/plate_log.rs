//! In-memory plate-appearance log.

use std::collections::HashMap;

use ballpark_core::{GameId, PlateAppearanceLog};

use crate::repository::{PlateLogRepository, Result};
use crate::types::ByteOffset;

/// Keeps every game's log in a vector; nothing to flush.
#[derive(Debug, Default)]
pub struct InMemoryPlateLog {
    logs: HashMap<GameId, Vec<PlateAppearanceLog>>,
}

impl InMemoryPlateLog {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PlateLogRepository for InMemoryPlateLog {
    fn append(&mut self, entry: &PlateAppearanceLog) -> Result<ByteOffset> {
        let log = self.logs.entry(entry.game_id).or_default();
        log.push(entry.clone());
        Ok((log.len() - 1) as ByteOffset)
    }

    fn entries(&self, game: GameId) -> Result<Vec<PlateAppearanceLog>> {
        Ok(self.logs.get(&game).cloned().unwrap_or_default())
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    fn clear(&mut self, game: GameId) -> Result<()> {
        self.logs.remove(&game);
        Ok(())
    }
}
