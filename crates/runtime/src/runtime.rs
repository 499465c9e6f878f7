//! Synchronous simulation service.
//!
//! [`Simulator`] loads a game record, decodes it, drives the engine, and writes the
//! new seed, status, and state back. The record is saved first; the plate
//! appearances produced by the call are then appended to the plate log and flushed
//! before the call returns. A failed append surfaces as an error after the record
//! was saved, so the game stays advanced and those entries are missing from its log.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use ballpark_core::{
    Game, GameEngine, GameId, PitchResult, PlateAppearanceLog, PlateAppearanceResult, SeedPolicy,
    SimEnv, SimulationError, TeamId,
};

use crate::api::{Result, RuntimeError};
use crate::oracle::{OracleManager, RuleSetId};
use crate::repository::{
    FileGameRepository, FilePlateLog, GameRecord, GameRepository, InMemoryGameRepo,
    InMemoryPlateLog, PlateLogRepository,
};

/// How each call derives its working seed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SeedMode {
    /// Stored seed mixed with the game situation; a game replays from its seed.
    #[default]
    Deterministic,
    /// Stored seed mixed with wall-clock nanoseconds.
    Nonce,
}

impl SeedMode {
    fn policy(self) -> SeedPolicy {
        match self {
            Self::Deterministic => SeedPolicy::Deterministic,
            Self::Nonce => SeedPolicy::Nonce(wall_clock_nonce()),
        }
    }
}

impl FromStr for SeedMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "deterministic" => Ok(Self::Deterministic),
            "nonce" => Ok(Self::Nonce),
            other => Err(format!("unknown seed mode '{other}'")),
        }
    }
}

impl fmt::Display for SeedMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Deterministic => f.write_str("deterministic"),
            Self::Nonce => f.write_str("nonce"),
        }
    }
}

/// Simulator configuration.
#[derive(Debug, Clone, Default)]
pub struct RuntimeConfig {
    pub seed_mode: SeedMode,
    /// Root of the file-backed repositories. In-memory repositories when `None`.
    pub data_dir: Option<PathBuf>,
}

impl RuntimeConfig {
    pub const GAMES_DIR: &'static str = "games";
    pub const LOGS_DIR: &'static str = "logs";
}

/// Drives stored games through the engine.
///
/// Different games may be simulated from different threads at once. Two calls on
/// the same game must not overlap; the caller serializes them.
pub struct Simulator {
    config: RuntimeConfig,
    oracles: OracleManager,
    games: Arc<dyn GameRepository>,
    plate_log: Mutex<Box<dyn PlateLogRepository>>,
    next_id: AtomicU64,
}

impl Simulator {
    pub fn builder() -> SimulatorBuilder {
        SimulatorBuilder::new()
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub fn oracles(&self) -> &OracleManager {
        &self.oracles
    }

    /// Creates a game with a freshly drawn seed.
    pub fn create_game(
        &self,
        away: TeamId,
        home: TeamId,
        rule_set: Option<RuleSetId>,
    ) -> Result<GameId> {
        self.create_game_with_seed(away, home, rule_set, rand::random())
    }

    /// Creates a game with a fixed seed.
    ///
    /// Rosters are not checked here; an unplayable lineup surfaces on the first
    /// simulation call.
    pub fn create_game_with_seed(
        &self,
        away: TeamId,
        home: TeamId,
        rule_set: Option<RuleSetId>,
        seed: u64,
    ) -> Result<GameId> {
        if let Some(id) = &rule_set
            && !self.oracles.rule_sets().contains(id)
        {
            return Err(RuntimeError::RuleSetNotFound {
                rule_set: id.clone(),
            });
        }

        let id = GameId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let game = Game::new(id, away, home, seed);
        self.games.save(&GameRecord::new(&game, rule_set)?)?;

        tracing::info!("Created {} ({} at {}), seed {:#018x}", id, away, home, seed);
        Ok(id)
    }

    pub fn record(&self, id: GameId) -> Result<GameRecord> {
        self.games
            .load(id)?
            .ok_or(RuntimeError::GameNotFound { game: id })
    }

    /// Current in-memory view of a stored game.
    pub fn game(&self, id: GameId) -> Result<Game> {
        Ok(self.record(id)?.to_game())
    }

    pub fn list_games(&self) -> Result<Vec<GameId>> {
        Ok(self.games.list_ids()?)
    }

    /// Throws one pitch. The working seed comes from the stored seed and the count,
    /// whatever the configured seed mode.
    pub fn pitch(&self, id: GameId) -> Result<PitchResult> {
        let (result, _) = self.drive(id, |engine, env, _| engine.simulate_pitch(env))?;
        Ok(result)
    }

    pub fn plate_appearance(&self, id: GameId) -> Result<PlateAppearanceResult> {
        let (result, _) = self.drive(id, |engine, env, sink| {
            engine.simulate_plate_appearance(env, sink)
        })?;
        Ok(result)
    }

    pub fn half_inning(&self, id: GameId) -> Result<Game> {
        let ((), game) = self.drive(id, |engine, env, sink| engine.simulate_half_inning(env, sink))?;
        Ok(game)
    }

    /// Plays the game to completion and returns its final state.
    pub fn play_game(&self, id: GameId) -> Result<Game> {
        let ((), game) = self.drive(id, |engine, env, sink| engine.simulate_game(env, sink))?;
        tracing::info!(
            "Final {}: away {} - home {} after {} innings",
            id,
            game.state.away_score,
            game.state.home_score,
            game.state.inning
        );
        Ok(game)
    }

    /// Restarts a game from the first pitch with a new seed and clears its log.
    pub fn reset_game(&self, id: GameId) -> Result<Game> {
        let mut record = self.record(id)?;
        let mut game = record.to_game();
        GameEngine::new(&mut game).reset_game(rand::random());

        record.store(&game)?;
        self.games.save(&record)?;
        self.lock_log()?.clear(id)?;

        tracing::info!("Reset {}", id);
        Ok(game)
    }

    /// Logged plate appearances of a game, oldest first.
    pub fn plate_log(&self, id: GameId) -> Result<Vec<PlateAppearanceLog>> {
        Ok(self.lock_log()?.entries(id)?)
    }

    fn drive<T>(
        &self,
        id: GameId,
        run: impl FnOnce(
            &mut GameEngine<'_>,
            SimEnv<'_>,
            &mut Vec<PlateAppearanceLog>,
        ) -> std::result::Result<T, SimulationError>,
    ) -> Result<(T, Game)> {
        let mut record = self.record(id)?;
        let mut game = record.to_game();
        let env = self
            .oracles
            .as_sim_env(record.rule_set.as_ref(), self.config.seed_mode.policy());

        let mut entries = Vec::new();
        let output = run(&mut GameEngine::new(&mut game), env, &mut entries)?;

        record.store(&game)?;
        self.games.save(&record)?;
        self.append_entries(&entries)?;

        Ok((output, game))
    }

    fn append_entries(&self, entries: &[PlateAppearanceLog]) -> Result<()> {
        if entries.is_empty() {
            return Ok(());
        }
        let mut log = self.lock_log()?;
        for entry in entries {
            log.append(entry)?;
            tracing::debug!(
                "{} {} {}: {} vs {} -> {} ({} pitches)",
                entry.game_id,
                entry.half,
                entry.inning,
                entry.batter,
                entry.pitcher,
                entry.outcome,
                entry.pitch_count
            );
        }
        log.flush()?;
        Ok(())
    }

    fn lock_log(&self) -> Result<std::sync::MutexGuard<'_, Box<dyn PlateLogRepository>>> {
        self.plate_log
            .lock()
            .map_err(|_| RuntimeError::LogLockPoisoned)
    }
}

/// Builder for [`Simulator`].
pub struct SimulatorBuilder {
    config: RuntimeConfig,
    oracles: Option<OracleManager>,
    games: Option<Arc<dyn GameRepository>>,
    plate_log: Option<Box<dyn PlateLogRepository>>,
}

impl SimulatorBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            oracles: None,
            games: None,
            plate_log: None,
        }
    }

    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Set required oracle manager
    pub fn oracles(mut self, oracles: OracleManager) -> Self {
        self.oracles = Some(oracles);
        self
    }

    /// Override the game repository chosen from the config.
    pub fn game_repository(mut self, games: impl GameRepository + 'static) -> Self {
        self.games = Some(Arc::new(games));
        self
    }

    /// Override the plate log chosen from the config.
    pub fn plate_log(mut self, log: impl PlateLogRepository + 'static) -> Self {
        self.plate_log = Some(Box::new(log));
        self
    }

    pub fn build(self) -> Result<Simulator> {
        let oracles = self.oracles.ok_or(RuntimeError::MissingOracles)?;
        let data_dir = self.config.data_dir.as_ref();

        let games: Arc<dyn GameRepository> = match (self.games, data_dir) {
            (Some(games), _) => games,
            (None, Some(dir)) => Arc::new(FileGameRepository::new(
                dir.join(RuntimeConfig::GAMES_DIR),
            )?),
            (None, None) => Arc::new(InMemoryGameRepo::new()),
        };
        let plate_log: Box<dyn PlateLogRepository> = match (self.plate_log, data_dir) {
            (Some(log), _) => log,
            (None, Some(dir)) => Box::new(FilePlateLog::new(dir.join(RuntimeConfig::LOGS_DIR))?),
            (None, None) => Box::new(InMemoryPlateLog::new()),
        };

        let next_id = games
            .list_ids()?
            .last()
            .map_or(1, |last| last.0 + 1);

        tracing::debug!(
            "Simulator ready: seed mode {}, storage {}",
            self.config.seed_mode,
            data_dir.map_or_else(|| "memory".to_string(), |dir| dir.display().to_string())
        );

        Ok(Simulator {
            config: self.config,
            oracles,
            games,
            plate_log: Mutex::new(plate_log),
            next_id: AtomicU64::new(next_id),
        })
    }
}

fn wall_clock_nonce() -> u64 {
    chrono::Utc::now()
        .timestamp_nanos_opt()
        .map_or(0, |nanos| nanos as u64)
}
