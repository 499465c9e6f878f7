//! Authoritative game state representation.
//!
//! This module owns the count, score, base occupancy, and lineup bookkeeping of a
//! single game, plus the arena that stores players and teams. Callers persist and
//! clone this state between calls but mutate it exclusively through the engine.
pub mod game;
pub mod league;
pub mod types;

use bitflags::bitflags;

pub use game::{Game, GameStatus};
pub use league::League;
pub use types::{
    BattedBallProfile, BattingRatings, DefenseRatings, FieldPosition, GameId, HitQuality,
    LineupSlot, Player, PlayerId, PlayerRatings, PitchingRatings, Team, TeamId,
};

bitflags! {
    /// Occupied bases. Bit 0 is first base, bit 1 second, bit 2 third.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct Bases: u8 {
        const FIRST  = 1 << 0;
        const SECOND = 1 << 1;
        const THIRD  = 1 << 2;
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Bases {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_u8(self.bits())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Bases {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let mask = <u8 as serde::Deserialize>::deserialize(deserializer)?;
        Bases::from_bits(mask)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid bases mask {mask}")))
    }
}

impl Bases {
    pub const LOADED: Self = Self::all();

    /// Raw occupancy mask in `0..=7`.
    pub const fn mask(self) -> u8 {
        self.bits()
    }

    /// Builds bases from a raw mask, ignoring bits above third base.
    pub const fn from_mask(mask: u8) -> Self {
        Self::from_bits_truncate(mask)
    }

    pub fn runner_count(self) -> u32 {
        self.bits().count_ones()
    }
}

/// Which team is batting.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "lowercase")]
pub enum Half {
    /// Away team bats.
    #[default]
    Top,
    /// Home team bats.
    Bottom,
}

/// Relation of the batting team's score to the fielding team's score.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum ScoreContext {
    Tied,
    BattingBehind,
    BattingAhead,
}

/// Canonical snapshot of a game in progress.
///
/// Invariants maintained by the engine between calls: `inning >= 1`, `outs <= 3`,
/// `balls < 4`, `strikes < 3`, lineup indices in `0..9`. Three outs only survive
/// a call when a walk-off scored on the third out and ended the game.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameState {
    pub inning: u16,
    pub half: Half,
    pub outs: u8,
    pub balls: u8,
    pub strikes: u8,
    pub bases: Bases,
    pub away_score: u16,
    pub home_score: u16,
    /// Next away batter, taken mod 9.
    pub away_lineup_index: u8,
    /// Next home batter, taken mod 9.
    pub home_lineup_index: u8,
}

impl GameState {
    /// State at the first pitch of a game.
    pub const fn new() -> Self {
        Self {
            inning: 1,
            half: Half::Top,
            outs: 0,
            balls: 0,
            strikes: 0,
            bases: Bases::empty(),
            away_score: 0,
            home_score: 0,
            away_lineup_index: 0,
            home_lineup_index: 0,
        }
    }

    /// Adds runs to the batting team.
    pub fn score_runs(&mut self, runs: u16) {
        match self.half {
            Half::Top => self.away_score = self.away_score.saturating_add(runs),
            Half::Bottom => self.home_score = self.home_score.saturating_add(runs),
        }
    }

    /// Lineup slot (0..9) of the current batter.
    pub fn batting_index(&self) -> usize {
        let index = match self.half {
            Half::Top => self.away_lineup_index,
            Half::Bottom => self.home_lineup_index,
        };
        usize::from(index) % crate::config::RuleConfig::LINEUP_SIZE
    }

    /// Moves the batting team to its next batter.
    pub fn advance_lineup(&mut self) {
        let size = crate::config::RuleConfig::LINEUP_SIZE as u8;
        match self.half {
            Half::Top => self.away_lineup_index = (self.away_lineup_index % size + 1) % size,
            Half::Bottom => self.home_lineup_index = (self.home_lineup_index % size + 1) % size,
        }
    }

    pub fn reset_count(&mut self) {
        self.balls = 0;
        self.strikes = 0;
    }

    pub fn score_context(&self) -> ScoreContext {
        let (batting, fielding) = match self.half {
            Half::Top => (self.away_score, self.home_score),
            Half::Bottom => (self.home_score, self.away_score),
        };
        match batting.cmp(&fielding) {
            core::cmp::Ordering::Equal => ScoreContext::Tied,
            core::cmp::Ordering::Less => ScoreContext::BattingBehind,
            core::cmp::Ordering::Greater => ScoreContext::BattingAhead,
        }
    }

    /// True when every field lies in the range the engine maintains between calls.
    ///
    /// Checked at persistence boundaries on states decoded from outside.
    pub fn is_well_formed(&self) -> bool {
        self.inning >= 1
            && self.outs <= crate::config::RuleConfig::OUTS_PER_HALF
            && self.balls < crate::config::RuleConfig::BALLS_FOR_WALK
            && self.strikes < crate::config::RuleConfig::STRIKES_FOR_STRIKEOUT
            && usize::from(self.away_lineup_index) < crate::config::RuleConfig::LINEUP_SIZE
            && usize::from(self.home_lineup_index) < crate::config::RuleConfig::LINEUP_SIZE
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}
