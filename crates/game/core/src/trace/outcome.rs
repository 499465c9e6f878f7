//! Enumerated pitch and plate-appearance outcomes.

use std::fmt;

use super::TraceStep;

/// Final result of a plate appearance, tagged at the step that resolved it.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::IntoStaticStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PlateAppearanceOutcome {
    #[strum(serialize = "BB")]
    Walk,
    #[strum(serialize = "K")]
    Strikeout,
    #[strum(serialize = "1B")]
    Single,
    #[strum(serialize = "2B")]
    Double,
    #[strum(serialize = "3B")]
    Triple,
    #[strum(serialize = "HR")]
    HomeRun,
    /// Batter reached on a fielding error.
    #[strum(serialize = "E")]
    ReachedOnError,
    /// Batter retired at first; any forced runner moved up.
    #[strum(serialize = "GO")]
    GroundOut,
    /// An out was made on a lead runner's play or the batter was retired while a
    /// runner was forced ahead.
    #[strum(serialize = "FC")]
    FieldersChoice,
    #[strum(serialize = "DP")]
    DoublePlay,
    #[strum(serialize = "FO")]
    FlyOut,
    #[strum(serialize = "LO")]
    LineOut,
    /// Plate appearance force-ended by the pitch cap.
    #[strum(serialize = "UNKNOWN")]
    Unknown,
}

impl PlateAppearanceOutcome {
    /// Short scorebook code ("BB", "K", "1B", ...).
    pub fn code(self) -> &'static str {
        self.into()
    }

    pub const fn is_hit(self) -> bool {
        matches!(
            self,
            Self::Single | Self::Double | Self::Triple | Self::HomeRun
        )
    }
}

/// What a single pitch did.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PitchOutcome {
    Ball,
    CalledStrike,
    SwingingStrike,
    /// Swinging strike three; ends the plate appearance.
    StrikeoutSwinging,
    Foul,
    WildPitch,
    PassedBall,
    InPlay(PlateAppearanceOutcome),
}

impl PitchOutcome {
    /// Outcome of the plate appearance when this pitch ends it.
    pub const fn plate_appearance_outcome(self) -> Option<PlateAppearanceOutcome> {
        match self {
            Self::StrikeoutSwinging => Some(PlateAppearanceOutcome::Strikeout),
            Self::InPlay(outcome) => Some(outcome),
            _ => None,
        }
    }
}

impl fmt::Display for PitchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ball => f.write_str("Ball"),
            Self::CalledStrike => f.write_str("Called Strike"),
            Self::SwingingStrike => f.write_str("Swinging Strike"),
            Self::StrikeoutSwinging => f.write_str("Strikeout (swinging)"),
            Self::Foul => f.write_str("Foul"),
            Self::WildPitch => f.write_str("Wild Pitch"),
            Self::PassedBall => f.write_str("Passed Ball"),
            Self::InPlay(outcome) => write!(f, "In Play ({outcome})"),
        }
    }
}

/// One pitch and the decisions that produced it.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PitchEvent {
    /// 1-based pitch number within the plate appearance.
    pub sequence: u16,
    pub outcome: PitchOutcome,
    pub ends_plate_appearance: bool,
    pub steps: Vec<TraceStep>,
}

/// A pitch thrown through the game engine.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PitchResult {
    pub event: PitchEvent,
    /// Set when this pitch, or the count it left, ended the plate appearance.
    pub plate_appearance: Option<PlateAppearanceOutcome>,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlateAppearanceResult {
    pub outcome: PlateAppearanceOutcome,
    pub pitches: Vec<PitchEvent>,
}

impl PlateAppearanceResult {
    pub fn pitch_count(&self) -> usize {
        self.pitches.len()
    }
}
