//! Static content the simulator reads but never mutates.
//!
//! The [`OracleManager`] shares the league arena and the rule-set registry behind
//! `Arc`s and builds [`SimEnv`] views on demand. Dynamic data (game records and
//! plate logs) lives in the repositories.
mod rules;

use std::sync::Arc;

use ballpark_core::{Env, League, RosterOracle, SeedPolicy, SimEnv};

pub use rules::{RuleSetId, RuleSetRegistry};

#[derive(Clone)]
pub struct OracleManager {
    pub(crate) league: Arc<League>,
    pub(crate) rule_sets: Arc<RuleSetRegistry>,
}

impl OracleManager {
    pub fn new(league: Arc<League>, rule_sets: Arc<RuleSetRegistry>) -> Self {
        Self { league, rule_sets }
    }

    /// Environment for one simulation call. An unregistered rule set leaves the
    /// environment without rules.
    pub fn as_sim_env(&self, rule_set: Option<&RuleSetId>, seed_policy: SeedPolicy) -> SimEnv<'_> {
        let rosters: &dyn RosterOracle = self.league.as_ref();
        let rules = rule_set.and_then(|id| self.rule_sets.get(id));
        Env::new(Some(rosters), rules).with_seed_policy(seed_policy)
    }

    pub fn league(&self) -> &League {
        &self.league
    }

    pub fn rule_sets(&self) -> &RuleSetRegistry {
        &self.rule_sets
    }
}
