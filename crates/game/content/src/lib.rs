//! Data-driven content definitions and loaders.
//!
//! This crate reads the collaborators the engine consumes from data files:
//! - League rosters: players with ratings and teams with batting orders (RON)
//! - Rule sets (TOML)
//!
//! Content is consumed through the core oracles and never appears in game state.
//!
//! All loaders use ballpark-core types directly with serde for RON/TOML deserialization.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{ContentFactory, LeagueSpec, RosterLoader, RulesLoader, TeamSpec};
