//! Player ratings consumed by the pitch engine.
//!
//! Every rating is a probability-like value in `[0, 1]`. The engine clamps each
//! derived probability, so out-of-range ratings degrade gracefully instead of
//! panicking.

use super::PlayerId;

/// Plate discipline and bat-to-ball skill.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BattingRatings {
    /// Swing rate at pitches in the zone.
    pub zone_swing: f64,
    /// Swing rate at pitches out of the zone.
    pub chase_swing: f64,
    /// Contact rate on swings at pitches in the zone.
    pub zone_contact: f64,
    /// Contact rate on swings at pitches out of the zone.
    pub chase_contact: f64,
}

impl Default for BattingRatings {
    fn default() -> Self {
        Self {
            zone_swing: 0.68,
            chase_swing: 0.30,
            zone_contact: 0.85,
            chase_contact: 0.60,
        }
    }
}

/// Batted-ball mix. Shares are normalized by their sum when drawn, so they need
/// not add up to exactly one.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BattedBallProfile {
    pub ground_ball: f64,
    pub fly_ball: f64,
    pub line_drive: f64,
    pub pop_up: f64,
}

impl Default for BattedBallProfile {
    fn default() -> Self {
        Self {
            ground_ball: 0.43,
            fly_ball: 0.35,
            line_drive: 0.21,
            pop_up: 0.07,
        }
    }
}

/// Quality of contact once the ball is in play.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct HitQuality {
    /// Base chance that a ball in play falls for a hit.
    pub hit_rate: f64,
    /// Home-run share among air-ball hits.
    pub home_run_share: f64,
    /// Double share among air-ball hits.
    pub double_share: f64,
    /// Triple share among air-ball hits.
    pub triple_share: f64,
}

impl Default for HitQuality {
    fn default() -> Self {
        Self {
            hit_rate: 0.30,
            home_run_share: 0.12,
            double_share: 0.22,
            triple_share: 0.02,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PitchingRatings {
    /// Share of pitches thrown in the strike zone.
    pub zone_rate: f64,
    /// Ability to make batters miss; reduces contact by up to 20%.
    pub whiff_induce: f64,
}

impl Default for PitchingRatings {
    fn default() -> Self {
        Self {
            zone_rate: 0.48,
            whiff_induce: 0.50,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DefenseRatings {
    pub fielding: f64,
    pub throwing: f64,
    pub catching: f64,
}

impl Default for DefenseRatings {
    fn default() -> Self {
        Self {
            fielding: 0.50,
            throwing: 0.50,
            catching: 0.50,
        }
    }
}

/// Complete rating sheet of one player.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PlayerRatings {
    pub batting: BattingRatings,
    pub batted_ball: BattedBallProfile,
    pub hit_quality: HitQuality,
    pub speed: f64,
    pub pitching: PitchingRatings,
    pub defense: DefenseRatings,
}

/// A player stored in the league arena.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub ratings: PlayerRatings,
}

impl Player {
    pub fn new(id: PlayerId, name: impl Into<String>, ratings: PlayerRatings) -> Self {
        Self {
            id,
            name: name.into(),
            ratings,
        }
    }
}
