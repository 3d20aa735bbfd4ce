//! Player sheet loader.

use std::path::Path;

use battle_core::{AbilityId, AbilityOracle, PlayerSheet};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Player sheet plus the abilities the player may queue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerSpec {
    pub sheet: PlayerSheet,
    #[serde(default)]
    pub abilities: Vec<AbilityId>,
}

/// Loader for player sheets from RON files.
pub struct PlayerLoader;

impl PlayerLoader {
    /// Load a player spec, checking its ability list against the catalog.
    pub fn load(path: &Path, catalog: &dyn AbilityOracle) -> LoadResult<PlayerSpec> {
        let content = read_file(path)?;
        Self::parse(&content, catalog)
            .map_err(|e| anyhow::anyhow!("Failed to load player {}: {}", path.display(), e))
    }

    pub fn parse(content: &str, catalog: &dyn AbilityOracle) -> LoadResult<PlayerSpec> {
        let spec: PlayerSpec = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse player RON: {}", e))?;

        if let Some(missing) = spec.abilities.iter().find(|id| catalog.ability(id).is_none()) {
            anyhow::bail!("Player references unknown ability '{}'", missing);
        }
        if spec.sheet.current_hp > spec.sheet.max_hp {
            anyhow::bail!(
                "Player current_hp {} exceeds max_hp {}",
                spec.sheet.current_hp,
                spec.sheet.max_hp
            );
        }

        Ok(spec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use battle_core::{Ability, AbilityCatalog, Alignment, Discipline, WeaponType};

    const PLAYER: &str = r#"(
        sheet: (
            name: "Aria",
            snapshot: (
                attributes: (strength: 14, agility: 12, constitution: 11, intellect: 9, wisdom: 10, charisma: 8, luck: 10),
                proficiencies: (ranks: { weapon(sword): 40 }),
            ),
            max_hp: 90,
            current_hp: 70,
            max_mp: 20,
            current_mp: 20,
            alignment: good,
        ),
        abilities: ["basic_attack"],
    )"#;

    #[test]
    fn parses_sheet() {
        let catalog = AbilityCatalog::new().with(Ability::default_attack());
        let spec = PlayerLoader::parse(PLAYER, &catalog).unwrap();
        assert_eq!(spec.sheet.name, "Aria");
        assert_eq!(spec.sheet.current_hp, 70);
        assert_eq!(spec.sheet.alignment, Alignment::Good);
        assert_eq!(
            spec.sheet
                .snapshot
                .proficiencies
                .rank(Discipline::Weapon(WeaponType::Sword)),
            40
        );
    }

    #[test]
    fn unknown_ability_fails() {
        let err = PlayerLoader::parse(PLAYER, &AbilityCatalog::new()).unwrap_err();
        assert!(err.to_string().contains("basic_attack"));
    }
}
