pub mod common;
pub mod player;
pub mod team;

pub use common::{GameId, PlayerId, TeamId};
pub use player::{
    BattedBallProfile, BattingRatings, DefenseRatings, HitQuality, PitchingRatings, Player,
    PlayerRatings,
};
pub use team::{FieldPosition, Lineup, LineupSlot, Team};
