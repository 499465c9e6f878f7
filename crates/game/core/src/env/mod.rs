//! Traits describing read-only collaborators of the engine.
//!
//! The roster oracle exposes players and teams; rules are borrowed as a plain
//! [`RuleConfig`]. The [`Env`] aggregate bundles them together with the seed policy
//! so the engine can access everything it needs without hard coupling to concrete
//! storage.
mod rng;
mod roster;

pub use rng::{RandomSource, SplitMix64, derive_seed, state_key};
pub use roster::{LineupError, ResolvedLineup, RosterOracle, resolve_lineup};

use crate::config::RuleConfig;

/// How a plate-appearance call derives its working seed from the stored seed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SeedPolicy {
    /// Mix the stored seed with the count situation, so a game replays from its seed.
    #[default]
    Deterministic,
    /// Mix the stored seed with a caller-supplied nonce (e.g. wall-clock nanos).
    Nonce(u64),
}

impl SeedPolicy {
    /// Key XOR-ed into the stored seed for a call made at `state`.
    pub fn key(self, state: &crate::state::GameState) -> u64 {
        match self {
            Self::Deterministic => state_key(state),
            Self::Nonce(nonce) => nonce,
        }
    }
}

/// Aggregates read-only collaborators required by the engine drivers.
pub struct Env<'a, R>
where
    R: RosterOracle + ?Sized,
{
    rosters: Option<&'a R>,
    rules: Option<&'a RuleConfig>,
    seed_policy: SeedPolicy,
}

pub type SimEnv<'a> = Env<'a, dyn RosterOracle + 'a>;

impl<'a, R> Env<'a, R>
where
    R: RosterOracle + ?Sized,
{
    pub fn new(rosters: Option<&'a R>, rules: Option<&'a RuleConfig>) -> Self {
        Self {
            rosters,
            rules,
            seed_policy: SeedPolicy::Deterministic,
        }
    }

    pub fn with_all(rosters: &'a R, rules: &'a RuleConfig) -> Self {
        Self::new(Some(rosters), Some(rules))
    }

    #[must_use]
    pub fn with_seed_policy(mut self, seed_policy: SeedPolicy) -> Self {
        self.seed_policy = seed_policy;
        self
    }

    pub fn rosters(&self) -> Option<&'a R> {
        self.rosters
    }

    pub fn rules(&self) -> Option<&'a RuleConfig> {
        self.rules
    }

    pub fn seed_policy(&self) -> SeedPolicy {
        self.seed_policy
    }
}

impl<R> Clone for Env<'_, R>
where
    R: RosterOracle + ?Sized,
{
    fn clone(&self) -> Self {
        *self
    }
}

impl<R> Copy for Env<'_, R> where R: RosterOracle + ?Sized {}

impl<R> core::fmt::Debug for Env<'_, R>
where
    R: RosterOracle + ?Sized,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Env")
            .field("rosters", &self.rosters.is_some())
            .field("rules", &self.rules)
            .field("seed_policy", &self.seed_policy)
            .finish()
    }
}
