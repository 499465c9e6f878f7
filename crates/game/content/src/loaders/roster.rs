//! League roster loader.
//!
//! Loads players and teams from a RON file into a [`League`] arena. Lineup slots
//! reference players by id; the loader rejects duplicate ids, oversized lineups
//! and slots pointing at players the file does not define. Vacant slots are kept
//! as-is so the engine can report them when a game is simulated.

use std::collections::BTreeSet;
use std::path::Path;

use ballpark_core::{League, LineupSlot, Player, RuleConfig, Team, TeamId};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Team entry of a league file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamSpec {
    pub id: TeamId,
    pub name: String,
    /// Batting order, first slot leads off.
    pub lineup: Vec<LineupSlot>,
}

/// Top-level structure of a league RON file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LeagueSpec {
    pub players: Vec<Player>,
    pub teams: Vec<TeamSpec>,
}

/// Loader for league rosters from RON files.
pub struct RosterLoader;

impl RosterLoader {
    /// Load a league from a RON file.
    ///
    /// RON format: `LeagueSpec(players: [...], teams: [...])`
    pub fn load(path: &Path) -> LoadResult<League> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Invalid league {}: {}", path.display(), e))
    }

    /// Parse a league from RON text.
    pub fn parse(content: &str) -> LoadResult<League> {
        let spec: LeagueSpec = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse league RON: {}", e))?;
        Self::build(spec)
    }

    /// Build the arena from an already deserialized spec.
    pub fn build(spec: LeagueSpec) -> LoadResult<League> {
        let mut league = League::new();
        let mut known = BTreeSet::new();

        for player in spec.players {
            if !known.insert(player.id) {
                anyhow::bail!("Duplicate player id {}", player.id);
            }
            league.insert_player(player);
        }

        let mut teams = BTreeSet::new();
        for entry in spec.teams {
            if !teams.insert(entry.id) {
                anyhow::bail!("Duplicate team id {}", entry.id);
            }
            if entry.lineup.len() > RuleConfig::LINEUP_SIZE {
                anyhow::bail!(
                    "Team '{}' lists {} lineup slots, at most {} allowed",
                    entry.name,
                    entry.lineup.len(),
                    RuleConfig::LINEUP_SIZE
                );
            }

            let mut team = Team::new(entry.id, entry.name);
            for (slot, lineup_slot) in entry.lineup.into_iter().enumerate() {
                if let Some(player) = lineup_slot.player
                    && !known.contains(&player)
                {
                    anyhow::bail!(
                        "Team '{}' slot {} references unknown {}",
                        team.name,
                        slot,
                        player
                    );
                }
                team.push_slot(lineup_slot).map_err(|_| {
                    anyhow::anyhow!("Team '{}' lineup overflow at slot {}", team.name, slot)
                })?;
            }
            league.insert_team(team);
        }

        Ok(league)
    }
}
