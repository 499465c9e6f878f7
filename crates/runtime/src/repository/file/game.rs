//! File-based GameRepository implementation.

use std::fs;
use std::path::{Path, PathBuf};

use ballpark_core::GameId;

use crate::repository::{GameRecord, GameRepository, Result};

/// Stores each record as `game_{id}.bin` in bincode format.
///
/// Saves go through a temporary file and a rename, so a crash mid-write leaves
/// the previous record intact.
pub struct FileGameRepository {
    base_dir: PathBuf,
}

impl FileGameRepository {
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    fn record_path(&self, id: GameId) -> PathBuf {
        self.base_dir.join(format!("game_{}.bin", id.0))
    }
}

impl GameRepository for FileGameRepository {
    fn save(&self, record: &GameRecord) -> Result<()> {
        let path = self.record_path(record.id);
        let temp_path = path.with_extension("bin.tmp");

        let bytes = bincode::serialize(record)?;
        fs::write(&temp_path, bytes)?;
        fs::rename(&temp_path, &path)?;

        tracing::debug!("Saved {} to {}", record.id, path.display());
        Ok(())
    }

    fn load(&self, id: GameId) -> Result<Option<GameRecord>> {
        let path = self.record_path(id);
        if !path.exists() {
            return Ok(None);
        }

        let bytes = fs::read(&path)?;
        let record: GameRecord = bincode::deserialize(&bytes)?;
        record.check_schema()?;

        tracing::debug!("Loaded {} from {}", id, path.display());
        Ok(Some(record))
    }

    fn exists(&self, id: GameId) -> bool {
        self.record_path(id).exists()
    }

    fn delete(&self, id: GameId) -> Result<()> {
        let path = self.record_path(id);
        if path.exists() {
            fs::remove_file(&path)?;
            tracing::debug!("Deleted {}", id);
        }
        Ok(())
    }

    fn list_ids(&self) -> Result<Vec<GameId>> {
        let mut ids = Vec::new();
        for entry in fs::read_dir(&self.base_dir)? {
            let path = entry?.path();
            if let Some(filename) = path.file_name().and_then(|s| s.to_str())
                && let Some(id) = filename
                    .strip_prefix("game_")
                    .and_then(|s| s.strip_suffix(".bin"))
                && let Ok(id) = id.parse::<u64>()
            {
                ids.push(GameId(id));
            }
        }
        ids.sort_unstable();
        Ok(ids)
    }
}
