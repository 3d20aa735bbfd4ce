//! Content factory for loading a complete encounter data set.

use std::path::{Path, PathBuf};

use battle_core::{AbilityCatalog, BattleConfig};

use crate::loaders::{
    AbilityLoader, ConfigLoader, LoadResult, OpponentLoader, OpponentRoster, PlayerLoader,
    PlayerSpec,
};

/// Content factory that loads battle content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── abilities.ron
/// ├── opponents.ron
/// └── player.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load battle configuration from `config.toml`, or defaults when absent.
    pub fn load_config(&self) -> LoadResult<BattleConfig> {
        let path = self.data_dir.join("config.toml");
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(BattleConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load the ability catalog from `abilities.ron`.
    pub fn load_abilities(&self) -> LoadResult<AbilityCatalog> {
        AbilityLoader::load(&self.data_dir.join("abilities.ron"))
    }

    /// Load opponents from `opponents.ron`, resolving their repertoires.
    pub fn load_opponents(&self, catalog: &AbilityCatalog) -> LoadResult<OpponentRoster> {
        OpponentLoader::load(&self.data_dir.join("opponents.ron"), catalog)
    }

    /// Load the player from `player.ron`.
    pub fn load_player(&self, catalog: &AbilityCatalog) -> LoadResult<PlayerSpec> {
        PlayerLoader::load(&self.data_dir.join("player.ron"), catalog)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
