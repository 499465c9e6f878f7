//! Roster oracle and lineup resolution.

use crate::config::RuleConfig;
use crate::state::{Player, PlayerId, Team, TeamId};

/// Read-only access to the player/team arena.
pub trait RosterOracle {
    fn team(&self, id: TeamId) -> Option<&Team>;

    fn player(&self, id: PlayerId) -> Option<&Player>;
}

/// Why a side cannot take the field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LineupError {
    #[error("team is not registered")]
    UnknownTeam,

    #[error("lineup has {filled} of 9 slots")]
    Incomplete { filled: usize },

    #[error("slot {slot} has no player assigned")]
    Unassigned { slot: usize },

    #[error("slot {slot} references unknown {player}")]
    UnknownPlayer { slot: usize, player: PlayerId },

    #[error("no player is bound to the pitcher slot")]
    NoPitcher,

    #[error("roster oracle not available")]
    RostersNotAvailable,
}

/// A side whose nine slots all resolved to arena players.
#[derive(Clone, Copy, Debug)]
pub struct ResolvedLineup<'a> {
    pub team: &'a Team,
    /// Batting order, index = lineup slot.
    pub batters: [&'a Player; RuleConfig::LINEUP_SIZE],
    pub pitcher: &'a Player,
}

impl<'a> ResolvedLineup<'a> {
    /// Mean fielding rating of the nine players in the field.
    pub fn average_fielding(&self) -> f64 {
        let total: f64 = self
            .batters
            .iter()
            .map(|player| player.ratings.defense.fielding)
            .sum();
        total / RuleConfig::LINEUP_SIZE as f64
    }

    pub fn batter(&self, index: usize) -> &'a Player {
        self.batters[index % RuleConfig::LINEUP_SIZE]
    }
}

/// Resolves every slot of `team` against the arena.
///
/// Fails when the team is unknown, has fewer than nine slots, any slot is vacant or
/// dangling, or no slot is bound to the pitcher position.
pub fn resolve_lineup<'a, R>(rosters: &'a R, team: TeamId) -> Result<ResolvedLineup<'a>, LineupError>
where
    R: RosterOracle + ?Sized,
{
    let team = rosters.team(team).ok_or(LineupError::UnknownTeam)?;

    if team.lineup.len() < RuleConfig::LINEUP_SIZE {
        return Err(LineupError::Incomplete {
            filled: team.lineup.len(),
        });
    }

    let mut resolved: [Option<&Player>; RuleConfig::LINEUP_SIZE] = [None; RuleConfig::LINEUP_SIZE];
    for (slot, entry) in team.lineup.iter().enumerate() {
        let id = entry.player.ok_or(LineupError::Unassigned { slot })?;
        let player = rosters
            .player(id)
            .ok_or(LineupError::UnknownPlayer { slot, player: id })?;
        resolved[slot] = Some(player);
    }

    let pitcher_id = team.pitcher().ok_or(LineupError::NoPitcher)?;
    let pitcher = rosters
        .player(pitcher_id)
        .ok_or(LineupError::NoPitcher)?;

    let mut batters = [pitcher; RuleConfig::LINEUP_SIZE];
    for (slot, player) in resolved.into_iter().enumerate() {
        batters[slot] = player.ok_or(LineupError::Unassigned { slot })?;
    }

    Ok(ResolvedLineup {
        team,
        batters,
        pitcher,
    })
}
