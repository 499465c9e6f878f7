//! In-memory GameRepository implementation for tests and local runs.

use std::collections::HashMap;
use std::sync::RwLock;

use ballpark_core::GameId;

use crate::repository::{GameRecord, GameRepository, RepositoryError, Result};

/// In-memory implementation of GameRepository.
pub struct InMemoryGameRepo {
    records: RwLock<HashMap<GameId, GameRecord>>,
}

impl InMemoryGameRepo {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryGameRepo {
    fn default() -> Self {
        Self::new()
    }
}

impl GameRepository for InMemoryGameRepo {
    fn save(&self, record: &GameRecord) -> Result<()> {
        let mut records = self
            .records
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        records.insert(record.id, record.clone());
        Ok(())
    }

    fn load(&self, id: GameId) -> Result<Option<GameRecord>> {
        let records = self
            .records
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(records.get(&id).cloned())
    }

    fn exists(&self, id: GameId) -> bool {
        self.records
            .read()
            .map(|records| records.contains_key(&id))
            .unwrap_or(false)
    }

    fn delete(&self, id: GameId) -> Result<()> {
        let mut records = self
            .records
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        records.remove(&id);
        Ok(())
    }

    fn list_ids(&self) -> Result<Vec<GameId>> {
        let records = self
            .records
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        let mut ids: Vec<GameId> = records.keys().copied().collect();
        ids.sort_unstable();
        Ok(ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ballpark_core::{Game, TeamId};

    fn record(id: u64) -> GameRecord {
        GameRecord::new(&Game::new(GameId(id), TeamId(1), TeamId(2), id), None).unwrap()
    }

    #[test]
    fn save_load_delete() {
        let repo = InMemoryGameRepo::new();
        repo.save(&record(2)).unwrap();
        repo.save(&record(1)).unwrap();

        assert!(repo.exists(GameId(1)));
        assert_eq!(repo.load(GameId(2)).unwrap().map(|r| r.seed), Some(2));
        assert_eq!(repo.list_ids().unwrap(), vec![GameId(1), GameId(2)]);

        repo.delete(GameId(1)).unwrap();
        assert!(!repo.exists(GameId(1)));
        assert_eq!(repo.load(GameId(1)).unwrap(), None);
    }
}
