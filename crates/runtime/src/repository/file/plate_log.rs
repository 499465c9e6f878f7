//! File-backed plate-appearance log, one append-only file per game.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fs;
use std::path::{Path, PathBuf};

use ballpark_core::{GameId, PlateAppearanceLog};

use super::FileRepository;
use crate::repository::{PlateLogRepository, Result};
use crate::types::ByteOffset;

pub struct FilePlateLog {
    base_dir: PathBuf,
    open: HashMap<GameId, FileRepository<PlateAppearanceLog>>,
}

impl FilePlateLog {
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir)?;
        Ok(Self {
            base_dir,
            open: HashMap::new(),
        })
    }

    fn filename(game: GameId) -> String {
        format!("plate_log_{}.log", game.0)
    }

    fn log_for(&mut self, game: GameId) -> Result<&mut FileRepository<PlateAppearanceLog>> {
        match self.open.entry(game) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => {
                let log = FileRepository::open_or_create(&self.base_dir, Self::filename(game))?;
                Ok(entry.insert(log))
            }
        }
    }
}

impl PlateLogRepository for FilePlateLog {
    fn append(&mut self, entry: &PlateAppearanceLog) -> Result<ByteOffset> {
        self.log_for(entry.game_id)?.append(entry)
    }

    fn entries(&self, game: GameId) -> Result<Vec<PlateAppearanceLog>> {
        if let Some(log) = self.open.get(&game) {
            return log.read_all();
        }
        let filename = Self::filename(game);
        if !self.base_dir.join(&filename).exists() {
            return Ok(Vec::new());
        }
        FileRepository::<PlateAppearanceLog>::open(&self.base_dir, filename)?.read_all()
    }

    fn flush(&mut self) -> Result<()> {
        for log in self.open.values_mut() {
            log.flush()?;
        }
        Ok(())
    }

    fn clear(&mut self, game: GameId) -> Result<()> {
        self.open.remove(&game);
        let path = self.base_dir.join(Self::filename(game));
        if path.exists() {
            fs::remove_file(&path)?;
            tracing::debug!("Cleared plate log for {}", game);
        }
        Ok(())
    }
}
