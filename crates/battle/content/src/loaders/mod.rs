//! Content loaders for reading battle data from files.
//!
//! Each loader turns one RON/TOML file into `battle-core` values. Cross-file
//! references (opponent and player repertoires naming catalog abilities) are
//! resolved here, so a bad reference fails at load time instead of mid-fight.

pub mod abilities;
pub mod config;
pub mod factory;
pub mod opponents;
pub mod player;

pub use abilities::AbilityLoader;
pub use config::ConfigLoader;
pub use factory::ContentFactory;
pub use opponents::{AbilityRef, OpponentLoader, OpponentRoster, OpponentSpec};
pub use player::{PlayerLoader, PlayerSpec};

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
