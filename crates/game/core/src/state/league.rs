//! Arena storage for players and teams.
//!
//! Teams never own their players: lineup slots carry [`PlayerId`]s that are resolved
//! against the league when a game is simulated. Both collections are ordered maps so
//! iteration (and therefore anything serialized from it) is stable.

use std::collections::BTreeMap;

use crate::env::RosterOracle;
use crate::state::{Player, PlayerId, Team, TeamId};

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct League {
    players: BTreeMap<PlayerId, Player>,
    teams: BTreeMap<TeamId, Team>,
}

impl League {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a player, returning the previous entry.
    pub fn insert_player(&mut self, player: Player) -> Option<Player> {
        self.players.insert(player.id, player)
    }

    /// Inserts or replaces a team, returning the previous entry.
    pub fn insert_team(&mut self, team: Team) -> Option<Team> {
        self.teams.insert(team.id, team)
    }

    pub fn remove_player(&mut self, id: PlayerId) -> Option<Player> {
        self.players.remove(&id)
    }

    pub fn team_mut(&mut self, id: TeamId) -> Option<&mut Team> {
        self.teams.get_mut(&id)
    }

    pub fn players(&self) -> impl Iterator<Item = &Player> {
        self.players.values()
    }

    pub fn teams(&self) -> impl Iterator<Item = &Team> {
        self.teams.values()
    }

    /// Looks a team up by display name.
    pub fn team_by_name(&self, name: &str) -> Option<&Team> {
        self.teams.values().find(|team| team.name == name)
    }
}

impl RosterOracle for League {
    fn team(&self, id: TeamId) -> Option<&Team> {
        self.teams.get(&id)
    }

    fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(&id)
    }
}
