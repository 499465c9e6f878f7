//! Client configuration read from the process environment.
use std::env;
use std::path::PathBuf;

use ballpark_core::TeamId;
use ballpark_runtime::{RuntimeConfig, SeedMode};

/// Everything the binary needs to load content and run games.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Content directory holding `league.ron` and `rules.toml`. Bundled content when unset.
    pub content_dir: Option<PathBuf>,
    pub league_path: Option<PathBuf>,
    pub rules_path: Option<PathBuf>,
    pub away: TeamId,
    pub home: TeamId,
    pub games: usize,
    /// Seed of the first game; later games add their index.
    pub seed: Option<u64>,
    pub seed_mode: SeedMode,
    pub persist: bool,
    pub data_dir: Option<PathBuf>,
    pub log_dir: Option<PathBuf>,
    pub play_by_play: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            content_dir: None,
            league_path: None,
            rules_path: None,
            away: TeamId(1),
            home: TeamId(2),
            games: 1,
            seed: None,
            seed_mode: SeedMode::Deterministic,
            persist: false,
            data_dir: None,
            log_dir: None,
            play_by_play: false,
        }
    }
}

impl ClientConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `BALLPARK_CONTENT_DIR` - Directory with `league.ron` and `rules.toml`
    /// - `BALLPARK_LEAGUE` / `BALLPARK_RULES` - Override single content files
    /// - `BALLPARK_AWAY` / `BALLPARK_HOME` - Team ids (default: 1 at 2)
    /// - `BALLPARK_GAMES` - Number of games to play (default: 1)
    /// - `BALLPARK_SEED` - Fixed seed for the first game (default: random)
    /// - `BALLPARK_SEED_POLICY` - `deterministic` or `nonce` (default: deterministic)
    /// - `BALLPARK_PERSIST` - Keep games on disk (default: false)
    /// - `BALLPARK_DATA_DIR` - Save directory; implies persistence (default: platform-specific)
    /// - `BALLPARK_LOG_DIR` - Write logs to a file here instead of stderr
    /// - `BALLPARK_PLAY_BY_PLAY` - Print every plate appearance (default: false)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        config.content_dir = read(&lookup, "BALLPARK_CONTENT_DIR").map(PathBuf::from);
        config.league_path = read(&lookup, "BALLPARK_LEAGUE").map(PathBuf::from);
        config.rules_path = read(&lookup, "BALLPARK_RULES").map(PathBuf::from);

        if let Some(away) = read_parsed(&lookup, "BALLPARK_AWAY") {
            config.away = TeamId(away);
        }
        if let Some(home) = read_parsed(&lookup, "BALLPARK_HOME") {
            config.home = TeamId(home);
        }
        if let Some(games) = read_parsed::<usize>(&lookup, "BALLPARK_GAMES") {
            config.games = games.max(1);
        }
        config.seed = read_parsed(&lookup, "BALLPARK_SEED");

        if let Some(mode) = read(&lookup, "BALLPARK_SEED_POLICY") {
            match mode.parse() {
                Ok(mode) => config.seed_mode = mode,
                Err(err) => tracing::warn!("Ignoring BALLPARK_SEED_POLICY: {}", err),
            }
        }

        // A bare `BALLPARK_PERSIST=` counts as true.
        config.persist = read_parsed(&lookup, "BALLPARK_PERSIST")
            .unwrap_or_else(|| lookup("BALLPARK_PERSIST").is_some());
        config.data_dir = read(&lookup, "BALLPARK_DATA_DIR").map(PathBuf::from);
        config.log_dir = read(&lookup, "BALLPARK_LOG_DIR").map(PathBuf::from);
        config.play_by_play = read_parsed(&lookup, "BALLPARK_PLAY_BY_PLAY").unwrap_or(false);

        config
    }

    /// Save directory, if games should be kept on disk.
    pub fn save_dir(&self) -> Option<PathBuf> {
        if let Some(dir) = &self.data_dir {
            return Some(dir.clone());
        }
        if !self.persist {
            return None;
        }
        directories::ProjectDirs::from("dev", "ballpark", "ballpark")
            .map(|dirs| dirs.data_dir().to_path_buf())
    }

    pub fn runtime_config(&self) -> RuntimeConfig {
        RuntimeConfig {
            seed_mode: self.seed_mode,
            data_dir: self.save_dir(),
        }
    }
}

fn read(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<String> {
    lookup(key).filter(|value| !value.trim().is_empty())
}

fn read_parsed<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    read(lookup, key)?.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> ClientConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ClientConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_play_one_game_in_memory() {
        let config = config(&[]);
        assert_eq!((config.away, config.home), (TeamId(1), TeamId(2)));
        assert_eq!(config.games, 1);
        assert_eq!(config.seed, None);
        assert_eq!(config.seed_mode, SeedMode::Deterministic);
        assert_eq!(config.save_dir(), None);
    }

    #[test]
    fn values_are_parsed_and_bad_ones_ignored() {
        let config = config(&[
            ("BALLPARK_AWAY", "2"),
            ("BALLPARK_HOME", "1"),
            ("BALLPARK_GAMES", "0"),
            ("BALLPARK_SEED", " 12345 "),
            ("BALLPARK_SEED_POLICY", "sometimes"),
            ("BALLPARK_PLAY_BY_PLAY", "true"),
        ]);
        assert_eq!((config.away, config.home), (TeamId(2), TeamId(1)));
        assert_eq!(config.games, 1);
        assert_eq!(config.seed, Some(12345));
        assert_eq!(config.seed_mode, SeedMode::Deterministic);
        assert!(config.play_by_play);
    }

    #[test]
    fn data_dir_implies_persistence() {
        let config = config(&[
            ("BALLPARK_DATA_DIR", "/tmp/ballpark"),
            ("BALLPARK_SEED_POLICY", "nonce"),
        ]);
        let runtime = config.runtime_config();
        assert_eq!(runtime.data_dir, Some(PathBuf::from("/tmp/ballpark")));
        assert_eq!(runtime.seed_mode, SeedMode::Nonce);
        assert!(!config.persist);
    }

    #[test]
    fn bare_persist_flag_counts_as_true() {
        assert!(config(&[("BALLPARK_PERSIST", "")]).persist);
        assert!(!config(&[("BALLPARK_PERSIST", "false")]).persist);
    }
}
