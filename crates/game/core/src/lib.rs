//! Deterministic baseball simulation logic and data types.
//!
//! `ballpark-core` defines the canonical rules (pitch state machine, base
//! advancement, inning lifecycle) and exposes pure APIs that the runtime and
//! offline tools share. All game mutation flows through [`engine::GameEngine`]
//! or [`play::simulate_single_pitch`], and every random decision is recorded in
//! the [`trace`] returned to the caller.
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod play;
pub mod state;
pub mod trace;

#[cfg(test)]
pub(crate) mod test_utils;

pub use config::{InfieldAlignment, RuleConfig, RuleConfigError, ThrowHomePolicy};
pub use engine::{GameEngine, SimulationError};
pub use env::{
    Env, LineupError, RandomSource, ResolvedLineup, RosterOracle, SeedPolicy, SimEnv, SplitMix64,
    derive_seed, resolve_lineup, state_key,
};
pub use error::{ErrorSeverity, GameError};
pub use play::{BattedBallType, PitchContext, simulate_single_pitch};
pub use state::{
    Bases, BattedBallProfile, BattingRatings, DefenseRatings, FieldPosition, Game, GameId,
    GameState, GameStatus, Half, HitQuality, League, LineupSlot, PitchingRatings, Player,
    PlayerId, PlayerRatings, ScoreContext, Team, TeamId,
};
pub use trace::{
    Decision, PitchEvent, PitchOutcome, PitchResult, PlateAppearanceLog, PlateAppearanceOutcome,
    PlateAppearanceResult, PlateAppearanceSink, TraceDetail, TraceStep, Verdict,
};
