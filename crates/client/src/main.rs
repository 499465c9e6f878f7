//! Ballpark client binary.
//!
//! Plays one or more games between two teams of the loaded league and prints a
//! line score for each.
//!
//! # Examples
//!
//! ```bash
//! # One game with bundled content
//! cargo run -p ballpark-client
//!
//! # Five reproducible games, saved to disk, with play-by-play
//! BALLPARK_GAMES=5 BALLPARK_SEED=42 BALLPARK_PERSIST=1 BALLPARK_PLAY_BY_PLAY=true \
//!     cargo run -p ballpark-client
//! ```

use std::sync::Arc;

use anyhow::{Context, Result};
use ballpark_client::{ClientConfig, LineScore, build_simulator, describe, logging};
use ballpark_runtime::RuleSetId;
use tokio::task::JoinSet;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config = ClientConfig::from_env();
    let _guard = logging::setup_logging(config.log_dir.as_deref())?;

    tracing::info!("Starting ballpark client");
    tracing::info!("Games: {} ({} at {})", config.games, config.away, config.home);
    tracing::info!("Seed mode: {}", config.seed_mode);

    let simulator = Arc::new(build_simulator(&config)?);

    let mut ids = Vec::with_capacity(config.games);
    for index in 0..config.games {
        let rule_set = Some(RuleSetId::default_set());
        let id = match config.seed {
            Some(seed) => simulator.create_game_with_seed(
                config.away,
                config.home,
                rule_set,
                seed.wrapping_add(index as u64),
            )?,
            None => simulator.create_game(config.away, config.home, rule_set)?,
        };
        ids.push(id);
    }

    let mut tasks = JoinSet::new();
    for &id in &ids {
        let simulator = Arc::clone(&simulator);
        tasks.spawn_blocking(move || simulator.play_game(id));
    }
    while let Some(joined) = tasks.join_next().await {
        let game = joined.context("Simulation task panicked")??;
        tracing::debug!("{} finished in inning {}", game.id, game.state.inning);
    }

    for id in ids {
        let log = simulator.plate_log(id)?;
        println!("{id}");
        if config.play_by_play {
            for entry in &log {
                println!("  {}", describe(entry));
            }
        }
        if let Some(line) = LineScore::from_log(&log) {
            println!("{line}\n");
        }
    }

    tracing::info!("Client shutdown complete");
    Ok(())
}
