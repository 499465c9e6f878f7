//! Content factory for loading a league and rule set from one directory.

use std::path::{Path, PathBuf};

use ballpark_core::{League, RuleConfig};

use crate::loaders::{LoadResult, RosterLoader, RulesLoader};

/// Content factory that loads all game content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── league.ron
/// └── rules.toml
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub const LEAGUE_FILE: &'static str = "league.ron";
    pub const RULES_FILE: &'static str = "rules.toml";

    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Factory over the data files bundled with this crate.
    pub fn bundled() -> Self {
        Self::new(Path::new(env!("CARGO_MANIFEST_DIR")).join("data"))
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Load the league from `league.ron`.
    pub fn load_league(&self) -> LoadResult<League> {
        RosterLoader::load(&self.data_dir.join(Self::LEAGUE_FILE))
    }

    /// Load the rule set from `rules.toml`.
    pub fn load_rules(&self) -> LoadResult<RuleConfig> {
        RulesLoader::load(&self.data_dir.join(Self::RULES_FILE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_content_loads() {
        let factory = ContentFactory::bundled();
        let league = factory.load_league().expect("league");
        assert_eq!(league.teams().count(), 2);
        assert!(factory.load_rules().is_ok());
    }

    #[test]
    fn missing_directory_reports_path() {
        let factory = ContentFactory::new("/nonexistent/ballpark");
        let err = factory.load_rules().unwrap_err();
        assert!(err.to_string().contains("rules.toml"));
    }
}
