//! Persisted game record.

use ballpark_core::{Game, GameId, GameStatus, TeamId};
use serde::{Deserialize, Serialize};

use super::StateBlob;
use crate::oracle::RuleSetId;
use crate::repository::{RepositoryError, Result};
use crate::types::{SchemaVersion, Timestamp};

/// Record layout version written by this crate.
pub const GAME_RECORD_SCHEMA: SchemaVersion = 1;

/// Everything the runtime stores for one game between simulation calls.
///
/// Participants and the rule set are references into the oracles; only the seed,
/// status, and the encoded live state change as the game is played.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    pub schema_version: SchemaVersion,
    pub id: GameId,
    pub away: TeamId,
    pub home: TeamId,
    pub rule_set: Option<RuleSetId>,
    pub seed: u64,
    pub status: GameStatus,
    pub state: StateBlob,
    pub updated_at: Timestamp,
}

impl GameRecord {
    pub fn new(game: &Game, rule_set: Option<RuleSetId>) -> Result<Self> {
        Ok(Self {
            schema_version: GAME_RECORD_SCHEMA,
            id: game.id,
            away: game.away,
            home: game.home,
            rule_set,
            seed: game.seed,
            status: game.status,
            state: StateBlob::encode(&game.state)?,
            updated_at: now(),
        })
    }

    /// Rebuilds the in-memory game. A state blob that fails validation yields the
    /// opening state.
    pub fn to_game(&self) -> Game {
        Game {
            id: self.id,
            away: self.away,
            home: self.home,
            seed: self.seed,
            status: self.status,
            state: self.state.decode_or_default(),
        }
    }

    /// Copies the mutable parts of `game` back into the record.
    pub fn store(&mut self, game: &Game) -> Result<()> {
        self.seed = game.seed;
        self.status = game.status;
        self.state = StateBlob::encode(&game.state)?;
        self.updated_at = now();
        Ok(())
    }

    pub fn check_schema(&self) -> Result<()> {
        if self.schema_version == GAME_RECORD_SCHEMA {
            Ok(())
        } else {
            Err(RepositoryError::UnsupportedSchema {
                found: self.schema_version,
                expected: GAME_RECORD_SCHEMA,
            })
        }
    }
}

fn now() -> Timestamp {
    chrono::Utc::now().timestamp()
}
