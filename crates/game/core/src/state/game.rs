use crate::state::{GameId, GameState, TeamId};

/// Whether a game still accepts simulation calls.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum GameStatus {
    #[default]
    InProgress,
    Finished,
}

/// In-memory game: participants, RNG seed, status, and live state.
///
/// Storage representation is a caller concern; the runtime maps this onto its
/// own versioned record.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Game {
    pub id: GameId,
    pub away: TeamId,
    pub home: TeamId,
    /// Persisted RNG seed, replaced after every simulation call.
    pub seed: u64,
    pub status: GameStatus,
    pub state: GameState,
}

impl Game {
    pub fn new(id: GameId, away: TeamId, home: TeamId, seed: u64) -> Self {
        Self {
            id,
            away,
            home,
            seed,
            status: GameStatus::InProgress,
            state: GameState::new(),
        }
    }

    pub fn is_finished(&self) -> bool {
        self.status == GameStatus::Finished
    }

    /// Team currently at bat.
    pub fn offense(&self) -> TeamId {
        match self.state.half {
            crate::state::Half::Top => self.away,
            crate::state::Half::Bottom => self.home,
        }
    }

    /// Team currently in the field.
    pub fn defense(&self) -> TeamId {
        match self.state.half {
            crate::state::Half::Top => self.home,
            crate::state::Half::Bottom => self.away,
        }
    }
}
