//! Structured audit trail of every random decision.
//!
//! Each pitch produces an ordered list of [`TraceStep`]s. A step names the decision,
//! carries the numeric inputs that fed the probability, and records the roll, the
//! roll range, the integer threshold, and the chosen label. Deterministic decisions
//! (the throw-home policy, the closing score snapshot) carry no roll.
mod outcome;
mod sink;

pub use outcome::{
    PitchEvent, PitchOutcome, PitchResult, PlateAppearanceOutcome, PlateAppearanceResult,
};
pub use sink::{PlateAppearanceLog, PlateAppearanceSink};

use crate::config::{InfieldAlignment, ThrowHomePolicy};
use crate::state::{Half, ScoreContext};

/// Which decision a step records.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Decision {
    #[strum(serialize = "Zone check")]
    Zone,
    #[strum(serialize = "Swing decision")]
    Swing,
    #[strum(serialize = "Wild pitch check")]
    WildPitch,
    #[strum(serialize = "Wild pitch or passed ball")]
    WildPitchKind,
    #[strum(serialize = "Contact check")]
    Contact,
    #[strum(serialize = "Foul check")]
    Foul,
    #[strum(serialize = "Batted ball type")]
    BattedBall,
    #[strum(serialize = "Hit check")]
    Hit,
    #[strum(serialize = "Hit type")]
    HitType,
    #[strum(serialize = "Error check")]
    FieldingError,
    #[strum(serialize = "Throw home decision")]
    ThrowHome,
    #[strum(serialize = "Play at home")]
    PlayAtHome,
    #[strum(serialize = "Double play check")]
    DoublePlay,
    #[strum(serialize = "Runner advance")]
    RunnerAdvance,
    #[strum(serialize = "Score")]
    ScoreSnapshot,
}

/// Label chosen by a decision.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Verdict {
    InZone,
    OutOfZone,
    Swing,
    Take,
    WildPitch,
    PassedBall,
    NoWildPitch,
    Contact,
    Whiff,
    Foul,
    InPlay,
    GroundBall,
    FlyBall,
    LineDrive,
    PopUp,
    Hit,
    NoHit,
    HomeRun,
    Triple,
    Double,
    Single,
    Error,
    NoError,
    ThrowHome,
    ThrowToFirst,
    OutAtHome,
    RunScores,
    DoublePlay,
    NoDoublePlay,
    Scores,
    ToThird,
    ToSecond,
    Final,
}

/// Numeric inputs of a decision, one variant per [`Decision`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TraceDetail {
    Zone {
        zone_rate: f64,
    },
    Swing {
        in_zone: bool,
        base_rate: f64,
        two_strike_boost: bool,
        rate: f64,
    },
    WildPitch {
        swung: bool,
        chance: f64,
        bases: u8,
    },
    WildPitchKind {
        passed_ball_share: f64,
    },
    Contact {
        in_zone: bool,
        base_contact: f64,
        whiff_induce: f64,
        rate: f64,
    },
    Foul {
        foul_rate: f64,
        strikes: u8,
    },
    BattedBall {
        ground_ball: f64,
        fly_ball: f64,
        line_drive: f64,
        pop_up: f64,
    },
    Hit {
        hit_rate: f64,
        alignment: InfieldAlignment,
        alignment_multiplier: f64,
        defense_factor: f64,
        chance: f64,
    },
    HitType {
        home_run: f64,
        double: f64,
        triple: f64,
    },
    FieldingError {
        average_fielding: f64,
        chance: f64,
    },
    ThrowHome {
        policy: ThrowHomePolicy,
        outs: u8,
        context: ScoreContext,
    },
    PlayAtHome {
        out_chance: f64,
    },
    DoublePlay {
        chance: f64,
        outs: u8,
    },
    RunnerAdvance {
        /// Base the runner started from (1, 2 or 3).
        from_base: u8,
        aggressiveness: f64,
        chance: f64,
    },
    Score {
        inning: u16,
        half: Half,
        outs: u8,
        bases: u8,
        away: u16,
        home: u16,
    },
}

/// One recorded decision.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TraceStep {
    pub decision: Decision,
    pub detail: TraceDetail,
    /// Roll in `[1, roll_range]`, `None` for deterministic decisions.
    pub roll: Option<u32>,
    pub roll_range: Option<u32>,
    /// Success when `roll <= threshold`; for categorical draws the upper bound of the
    /// chosen bucket.
    pub threshold: Option<u32>,
    pub verdict: Verdict,
}

impl TraceStep {
    /// Step for a decision taken without a roll.
    pub fn fixed(decision: Decision, detail: TraceDetail, verdict: Verdict) -> Self {
        Self {
            decision,
            detail,
            roll: None,
            roll_range: None,
            threshold: None,
            verdict,
        }
    }
}
