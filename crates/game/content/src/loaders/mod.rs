//! Content loaders for reading league and rule data from files.
//!
//! Every loader exposes `load(path)` for files and `parse(text)` for in-memory
//! content, both returning [`LoadResult`].

pub mod factory;
pub mod roster;
pub mod rules;

pub use factory::ContentFactory;
pub use roster::{LeagueSpec, RosterLoader, TeamSpec};
pub use rules::RulesLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
