use arrayvec::ArrayVec;

use super::{PlayerId, TeamId};
use crate::config::RuleConfig;

/// Defensive position bound to a batting slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FieldPosition {
    #[strum(serialize = "P")]
    Pitcher,
    #[strum(serialize = "C")]
    Catcher,
    #[strum(serialize = "1B")]
    FirstBase,
    #[strum(serialize = "2B")]
    SecondBase,
    #[strum(serialize = "3B")]
    ThirdBase,
    #[strum(serialize = "SS")]
    Shortstop,
    #[strum(serialize = "LF")]
    LeftField,
    #[strum(serialize = "CF")]
    CenterField,
    #[strum(serialize = "RF")]
    RightField,
}

/// One batting-order slot. The player is a weak reference into the league arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LineupSlot {
    pub position: FieldPosition,
    pub player: Option<PlayerId>,
}

impl LineupSlot {
    pub const fn new(position: FieldPosition, player: PlayerId) -> Self {
        Self {
            position,
            player: Some(player),
        }
    }

    pub const fn vacant(position: FieldPosition) -> Self {
        Self {
            position,
            player: None,
        }
    }
}

/// Batting order, at most [`RuleConfig::LINEUP_SIZE`] slots.
pub type Lineup = ArrayVec<LineupSlot, { RuleConfig::LINEUP_SIZE }>;

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    pub lineup: Lineup,
}

impl Team {
    pub fn new(id: TeamId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            lineup: Lineup::new(),
        }
    }

    /// Appends a slot to the batting order.
    ///
    /// Returns the slot back when the lineup is already full.
    pub fn push_slot(&mut self, slot: LineupSlot) -> Result<(), LineupSlot> {
        self.lineup.try_push(slot).map_err(|err| err.element())
    }

    /// Player bound to the pitcher slot, if any.
    pub fn pitcher(&self) -> Option<PlayerId> {
        self.lineup
            .iter()
            .find(|slot| slot.position == FieldPosition::Pitcher)
            .and_then(|slot| slot.player)
    }
}
