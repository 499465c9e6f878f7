//! Named rule sets.

use std::collections::BTreeMap;
use std::fmt;

use ballpark_core::RuleConfig;
use serde::{Deserialize, Serialize};

/// Key of a registered rule set.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleSetId(pub String);

impl RuleSetId {
    pub const DEFAULT: &'static str = "default";

    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn default_set() -> Self {
        Self::new(Self::DEFAULT)
    }
}

impl fmt::Display for RuleSetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Rule configurations available to new and stored games.
#[derive(Clone, Debug, Default)]
pub struct RuleSetRegistry {
    sets: BTreeMap<RuleSetId, RuleConfig>,
}

impl RuleSetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding `rules` under [`RuleSetId::DEFAULT`].
    pub fn with_default(rules: RuleConfig) -> Self {
        let mut registry = Self::new();
        registry.insert(RuleSetId::default_set(), rules);
        registry
    }

    pub fn insert(&mut self, id: RuleSetId, rules: RuleConfig) -> Option<RuleConfig> {
        self.sets.insert(id, rules)
    }

    pub fn get(&self, id: &RuleSetId) -> Option<&RuleConfig> {
        self.sets.get(id)
    }

    pub fn contains(&self, id: &RuleSetId) -> bool {
        self.sets.contains_key(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &RuleSetId> {
        self.sets.keys()
    }
}
