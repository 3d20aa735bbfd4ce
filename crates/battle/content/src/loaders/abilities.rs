//! Ability catalog loader.

use std::path::Path;

use battle_core::{Ability, AbilityCatalog, AbilityId};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Ability catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AbilityCatalogFile {
    pub abilities: Vec<Ability>,
}

/// Loader for the ability catalog from RON files.
pub struct AbilityLoader;

impl AbilityLoader {
    /// Load an ability catalog from a RON file.
    ///
    /// The built-in default attack is always present; a file may override it
    /// by defining `basic_attack` itself. Duplicate ids are rejected.
    pub fn load(path: &Path) -> LoadResult<AbilityCatalog> {
        let content = read_file(path)?;
        Self::parse(&content).map_err(|e| {
            anyhow::anyhow!("Failed to load ability catalog {}: {}", path.display(), e)
        })
    }

    /// Parse catalog RON from a string.
    pub fn parse(content: &str) -> LoadResult<AbilityCatalog> {
        let file: AbilityCatalogFile = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse ability catalog RON: {}", e))?;

        let mut catalog = AbilityCatalog::new().with(Ability::default_attack());
        let mut seen: Vec<AbilityId> = Vec::with_capacity(file.abilities.len());
        for ability in file.abilities {
            if seen.contains(&ability.id) {
                anyhow::bail!("Duplicate ability id '{}'", ability.id);
            }
            if ability.ap_cost == 0 {
                anyhow::bail!("Ability '{}' must cost at least one action point", ability.id);
            }
            seen.push(ability.id.clone());
            catalog.insert(ability);
        }

        tracing::debug!(abilities = catalog.len(), "ability catalog loaded");
        Ok(catalog)
    }
}
