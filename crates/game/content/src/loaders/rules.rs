//! Rule set loader.

use std::path::Path;

use ballpark_core::RuleConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for rule configuration from TOML files.
///
/// Missing keys take their [`RuleConfig::default`] values; the result is
/// validated before it is returned.
pub struct RulesLoader;

impl RulesLoader {
    /// Load a rule set from a TOML file.
    pub fn load(path: &Path) -> LoadResult<RuleConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Invalid rules {}: {}", path.display(), e))
    }

    /// Parse a rule set from TOML text.
    pub fn parse(content: &str) -> LoadResult<RuleConfig> {
        let rules: RuleConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse rules TOML: {}", e))?;
        rules
            .validate()
            .map_err(|e| anyhow::anyhow!("Rejected rule set: {}", e))?;
        Ok(rules)
    }
}
