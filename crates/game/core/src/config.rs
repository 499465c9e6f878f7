//! Rule configuration and engine-wide constants.

use crate::error::{ErrorSeverity, GameError};

/// Infield positioning applied to ground balls.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum InfieldAlignment {
    #[default]
    Normal,
    Shift,
    InfieldIn,
}

/// Whether a fielder on a ground ball with a runner on third goes home.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum ThrowHomePolicy {
    Never,
    Always,
    /// Throw home with fewer than two outs, or when the batting team is not ahead.
    #[default]
    Situational,
}

/// Tunable rules consumed by the pitch engine and the game lifecycle.
///
/// All rates are probabilities in `[0, 1]`; the engine clamps every derived
/// probability before rolling, but [`RuleConfig::validate`] rejects configurations
/// that are out of range up front.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RuleConfig {
    /// A foul with two strikes leaves the count at two strikes.
    pub two_strike_foul_keeps_two_strikes: bool,
    /// Share of contact that goes foul.
    pub foul_rate_on_contact: f64,
    /// Wild pitch / passed ball chance when the batter swings at a pitch out of the zone.
    pub wild_pitch_chance_on_swing: f64,
    /// Wild pitch / passed ball chance when the batter takes a pitch out of the zone.
    pub wild_pitch_chance_on_take: f64,
    /// Share of triggered wild pitches labelled as passed balls.
    pub passed_ball_share: f64,
    pub infield_alignment: InfieldAlignment,
    pub shift_gb_hit_multiplier: f64,
    pub infield_in_gb_hit_multiplier: f64,
    pub throw_home_policy: ThrowHomePolicy,
    /// Scales extra-base advancement on singles and doubles.
    pub runner_aggressiveness: f64,
    pub double_play_enabled: bool,
    /// Regulation length; play continues past it while the score is tied.
    pub innings_per_game: u8,
}

impl RuleConfig {
    /// Batting slots per side.
    pub const LINEUP_SIZE: usize = 9;
    /// Pitches in one plate appearance before it is force-ended as unknown.
    pub const MAX_PITCHES_PER_PLATE_APPEARANCE: usize = 40;
    pub const BALLS_FOR_WALK: u8 = 4;
    pub const STRIKES_FOR_STRIKEOUT: u8 = 3;
    pub const OUTS_PER_HALF: u8 = 3;

    pub const DEFAULT_INNINGS: u8 = 9;

    pub fn new() -> Self {
        Self {
            two_strike_foul_keeps_two_strikes: true,
            foul_rate_on_contact: 0.40,
            wild_pitch_chance_on_swing: 0.002,
            wild_pitch_chance_on_take: 0.008,
            passed_ball_share: 0.25,
            infield_alignment: InfieldAlignment::Normal,
            shift_gb_hit_multiplier: 0.85,
            infield_in_gb_hit_multiplier: 1.25,
            throw_home_policy: ThrowHomePolicy::Situational,
            runner_aggressiveness: 0.50,
            double_play_enabled: true,
            innings_per_game: Self::DEFAULT_INNINGS,
        }
    }

    pub fn with_innings(innings_per_game: u8) -> Self {
        Self {
            innings_per_game,
            ..Self::new()
        }
    }

    /// Checks every rate lies in `[0, 1]`, contact can put the ball in play, and the
    /// regulation length is non-zero.
    ///
    /// A foul rate of one would end every plate appearance at the pitch cap, which
    /// records no out, so a full game would never finish.
    pub fn validate(&self) -> Result<(), RuleConfigError> {
        let rates = [
            ("foul_rate_on_contact", self.foul_rate_on_contact),
            ("wild_pitch_chance_on_swing", self.wild_pitch_chance_on_swing),
            ("wild_pitch_chance_on_take", self.wild_pitch_chance_on_take),
            ("passed_ball_share", self.passed_ball_share),
            ("runner_aggressiveness", self.runner_aggressiveness),
        ];
        for (field, value) in rates {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(RuleConfigError::RateOutOfRange { field, value });
            }
        }

        if self.foul_rate_on_contact >= 1.0 {
            return Err(RuleConfigError::EndlessFouls);
        }

        let multipliers = [
            ("shift_gb_hit_multiplier", self.shift_gb_hit_multiplier),
            ("infield_in_gb_hit_multiplier", self.infield_in_gb_hit_multiplier),
        ];
        for (field, value) in multipliers {
            if !value.is_finite() || value < 0.0 {
                return Err(RuleConfigError::InvalidMultiplier { field, value });
            }
        }

        if self.innings_per_game == 0 {
            return Err(RuleConfigError::ZeroInnings);
        }

        Ok(())
    }
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Rejected rule configuration.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum RuleConfigError {
    #[error("{field} must be within [0, 1], got {value}")]
    RateOutOfRange { field: &'static str, value: f64 },

    #[error("{field} must be a finite non-negative multiplier, got {value}")]
    InvalidMultiplier { field: &'static str, value: f64 },

    #[error("foul_rate_on_contact must stay below 1 so contact can be put in play")]
    EndlessFouls,

    #[error("innings_per_game must be at least 1")]
    ZeroInnings,
}

impl GameError for RuleConfigError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::RateOutOfRange { .. } => "RULES_RATE_OUT_OF_RANGE",
            Self::InvalidMultiplier { .. } => "RULES_INVALID_MULTIPLIER",
            Self::EndlessFouls => "RULES_ENDLESS_FOULS",
            Self::ZeroInnings => "RULES_ZERO_INNINGS",
        }
    }
}
