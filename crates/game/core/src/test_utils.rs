//! Shared fixtures for unit tests.

use std::collections::VecDeque;

use crate::env::RandomSource;
use crate::state::{
    FieldPosition, League, LineupSlot, Player, PlayerId, PlayerRatings, Team, TeamId,
};

/// Random source that replays a fixed list of rolls.
///
/// Each scripted value is the roll a decision should observe, i.e. a value in
/// `[1, range]`. Panics once the script is exhausted so an unexpected extra
/// decision fails the test loudly.
#[derive(Debug, Default)]
pub struct ScriptedRng {
    rolls: VecDeque<u32>,
}

impl ScriptedRng {
    pub fn new(rolls: impl IntoIterator<Item = u32>) -> Self {
        Self {
            rolls: rolls.into_iter().collect(),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn remaining(&self) -> usize {
        self.rolls.len()
    }
}

impl RandomSource for ScriptedRng {
    fn next_integer(&mut self, bound: u64) -> u64 {
        let roll = self.rolls.pop_front().expect("scripted rolls exhausted");
        assert!(
            roll >= 1 && u64::from(roll) <= bound,
            "scripted roll {roll} outside [1, {bound}]"
        );
        u64::from(roll) - 1
    }

    fn next_double(&mut self) -> f64 {
        0.5
    }
}

pub const AWAY: TeamId = TeamId(1);
pub const HOME: TeamId = TeamId(2);

const POSITIONS: [FieldPosition; 9] = [
    FieldPosition::CenterField,
    FieldPosition::SecondBase,
    FieldPosition::RightField,
    FieldPosition::FirstBase,
    FieldPosition::ThirdBase,
    FieldPosition::LeftField,
    FieldPosition::Shortstop,
    FieldPosition::Catcher,
    FieldPosition::Pitcher,
];

/// Two complete sides whose players all carry `ratings`.
pub fn league_with(ratings: PlayerRatings) -> League {
    let mut league = League::new();
    for (team_id, name, first_player) in [(AWAY, "Visitors", 100), (HOME, "Locals", 200)] {
        let mut team = Team::new(team_id, name);
        for (offset, position) in POSITIONS.into_iter().enumerate() {
            let id = PlayerId(first_player + offset as u32);
            league.insert_player(Player::new(id, format!("{name} {offset}"), ratings));
            team.push_slot(LineupSlot::new(position, id))
                .expect("nine slots fit");
        }
        league.insert_team(team);
    }
    league
}

pub fn league() -> League {
    league_with(PlayerRatings::default())
}
