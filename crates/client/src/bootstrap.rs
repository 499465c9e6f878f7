//! Builds the simulator from configuration and content files.
use std::sync::Arc;

use anyhow::{Context, Result};
use ballpark_content::{ContentFactory, RosterLoader, RulesLoader};
use ballpark_runtime::{OracleManager, RuleSetRegistry, Simulator};

use crate::config::ClientConfig;

/// Loads the league and the default rule set.
pub fn load_oracles(config: &ClientConfig) -> Result<OracleManager> {
    let factory = config
        .content_dir
        .clone()
        .map_or_else(ContentFactory::bundled, ContentFactory::new);

    let league = match &config.league_path {
        Some(path) => RosterLoader::load(path)?,
        None => factory.load_league()?,
    };
    let rules = match &config.rules_path {
        Some(path) => RulesLoader::load(path)?,
        None => factory.load_rules()?,
    };

    tracing::info!(
        "Loaded {} teams and {} players from {}",
        league.teams().count(),
        league.players().count(),
        factory.data_dir().display()
    );

    Ok(OracleManager::new(
        Arc::new(league),
        Arc::new(RuleSetRegistry::with_default(rules)),
    ))
}

pub fn build_simulator(config: &ClientConfig) -> Result<Simulator> {
    let oracles = load_oracles(config)?;
    Simulator::builder()
        .config(config.runtime_config())
        .oracles(oracles)
        .build()
        .context("Failed to build simulator")
}
