//! Opponent roster loader.
//!
//! Opponent files name their abilities by id; the loader resolves each
//! reference against the ability catalog and produces ready-to-fight
//! [`OpponentConfig`] values.

use std::path::Path;

use battle_core::{
    AbilityCategory, AbilityId, AbilityOracle, ActionWeights, ActivationCondition, Alignment,
    Behavior, MonsterAbility, OpponentConfig, OpponentKind, StatSnapshot,
};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

fn default_level() -> u32 {
    1
}

/// Reference from an opponent's repertoire to a catalog ability.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AbilityRef {
    pub ability: AbilityId,
    pub category: AbilityCategory,
    pub weight: u32,
    #[serde(default)]
    pub condition: ActivationCondition,
    #[serde(default = "default_level")]
    pub level: u32,
}

/// Opponent definition as written in RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpponentSpec {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub kind: OpponentKind,
    #[serde(default)]
    pub behavior: Behavior,
    pub snapshot: StatSnapshot,
    pub max_hp: u32,
    #[serde(default)]
    pub max_mp: u32,
    pub max_action_points: u32,
    #[serde(default)]
    pub abilities: Vec<AbilityRef>,
    #[serde(default)]
    pub action_weights: ActionWeights,
    #[serde(default)]
    pub alignment: Alignment,
}

impl OpponentSpec {
    /// Resolve ability references into a full opponent configuration.
    pub fn resolve(self, catalog: &dyn AbilityOracle) -> LoadResult<OpponentConfig> {
        if self.max_hp == 0 {
            anyhow::bail!("Opponent '{}' must have positive max_hp", self.id);
        }

        let mut config = OpponentConfig::new(
            self.id.clone(),
            self.name,
            self.snapshot,
            self.max_hp,
            self.max_action_points,
        )
        .with_kind(self.kind)
        .with_behavior(self.behavior)
        .with_mp(self.max_mp)
        .with_action_weights(self.action_weights)
        .with_alignment(self.alignment);

        for reference in self.abilities {
            let ability = catalog.ability(&reference.ability).ok_or_else(|| {
                anyhow::anyhow!(
                    "Opponent '{}' references unknown ability '{}'",
                    self.id,
                    reference.ability
                )
            })?;
            config = config.with_ability(
                MonsterAbility::new(ability.clone(), reference.category, reference.weight)
                    .with_condition(reference.condition)
                    .with_level(reference.level),
            );
        }

        Ok(config)
    }
}

/// Opponents available to the encounter builder, in file order.
#[derive(Debug, Clone, Default)]
pub struct OpponentRoster {
    opponents: Vec<OpponentConfig>,
}

impl OpponentRoster {
    pub fn get(&self, id: &str) -> Option<&OpponentConfig> {
        self.opponents.iter().find(|o| o.id == id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.opponents.iter().map(|o| o.id.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &OpponentConfig> {
        self.opponents.iter()
    }

    pub fn len(&self) -> usize {
        self.opponents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.opponents.is_empty()
    }
}

/// Loader for opponent rosters from RON files.
pub struct OpponentLoader;

impl OpponentLoader {
    /// Load an opponent roster from a RON file.
    ///
    /// RON format: `Vec<OpponentSpec>`
    pub fn load(path: &Path, catalog: &dyn AbilityOracle) -> LoadResult<OpponentRoster> {
        let content = read_file(path)?;
        Self::parse(&content, catalog)
            .map_err(|e| anyhow::anyhow!("Failed to load opponents {}: {}", path.display(), e))
    }

    pub fn parse(content: &str, catalog: &dyn AbilityOracle) -> LoadResult<OpponentRoster> {
        let specs: Vec<OpponentSpec> = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse opponent roster RON: {}", e))?;

        let mut roster = OpponentRoster::default();
        for spec in specs {
            if roster.get(&spec.id).is_some() {
                anyhow::bail!("Duplicate opponent id '{}'", spec.id);
            }
            roster.opponents.push(spec.resolve(catalog)?);
        }

        tracing::debug!(opponents = roster.len(), "opponent roster loaded");
        Ok(roster)
    }
}
