//! Ability definitions.
//!
//! Abilities are loaded from RON data files (see `battle-content`) and looked
//! up through [`crate::env::AbilityOracle`]. Opponents carry their abilities
//! inline as [`MonsterAbility`] entries, already resolved at load time.

use std::fmt;

use crate::config::BattleConfig;
use crate::stats::{Discipline, WeaponType};
use crate::status::EffectTemplate;

/// Stable identifier of an ability (e.g. `"fireball"`).
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct AbilityId(pub String);

impl AbilityId {
    /// Identifier of the built-in fallback attack.
    pub const BASIC_ATTACK: &'static str = "basic_attack";

    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AbilityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AbilityId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// What an ability does when it resolves.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum AbilityEffect {
    /// Rolls a hit and deals damage; the effect template lands on the target.
    Attack,
    /// Restores the caster's HP; the effect template lands on the caster.
    Heal,
    /// Applies the effect template to the caster without a roll.
    Buff,
    /// Rolls a hit without damage; the effect template lands on the target.
    Curse,
}

impl AbilityEffect {
    /// Whether the ability targets the opposing combatant.
    pub const fn is_hostile(self) -> bool {
        matches!(self, AbilityEffect::Attack | AbilityEffect::Curse)
    }
}

/// A usable ability.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ability {
    pub id: AbilityId,
    pub name: String,

    /// Discipline the ability scales with and trains.
    #[cfg_attr(feature = "serde", serde(default))]
    pub discipline: Discipline,

    /// Base amount before level scaling (damage or healing).
    #[cfg_attr(feature = "serde", serde(default))]
    pub power: u32,

    pub ap_cost: u32,

    #[cfg_attr(feature = "serde", serde(default))]
    pub mp_cost: u32,

    pub effect: AbilityEffect,

    /// Status effect applied on resolution (target or caster, per [`AbilityEffect`]).
    #[cfg_attr(feature = "serde", serde(default))]
    pub applies: Option<EffectTemplate>,
}

impl Ability {
    /// Built-in unarmed strike used when nothing else is available.
    pub fn default_attack() -> Self {
        Self {
            id: AbilityId::new(AbilityId::BASIC_ATTACK),
            name: "Attack".to_string(),
            discipline: Discipline::Weapon(WeaponType::Unarmed),
            power: 0,
            ap_cost: BattleConfig::DEFAULT_ATTACK_AP_COST,
            mp_cost: 0,
            effect: AbilityEffect::Attack,
            applies: None,
        }
    }

    pub fn is_magical(&self) -> bool {
        self.discipline.is_magical()
    }
}

/// Monster action category used by the first weighted draw.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum AbilityCategory {
    BasicAttack,
    SpecialSkill,
    BorrowedAbility,
}

/// Threshold predicates gating a monster ability. All present predicates
/// must hold; an empty condition always holds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ActivationCondition {
    /// HP percentage strictly below this value (exact, not rounded).
    pub hp_below: Option<u32>,
    /// HP percentage strictly above this value.
    pub hp_above: Option<u32>,
    /// Turn number strictly after this value.
    pub turn_after: Option<u32>,
}

impl ActivationCondition {
    pub fn always() -> Self {
        Self::default()
    }

    pub fn hp_below(percent: u32) -> Self {
        Self {
            hp_below: Some(percent),
            ..Self::default()
        }
    }

    pub fn hp_above(percent: u32) -> Self {
        Self {
            hp_above: Some(percent),
            ..Self::default()
        }
    }

    pub fn turn_after(turn: u32) -> Self {
        Self {
            turn_after: Some(turn),
            ..Self::default()
        }
    }

    /// Evaluate against exact HP, so 101/200 counts as above 50%.
    pub fn is_satisfied(&self, current_hp: u32, max_hp: u32, turn: u32) -> bool {
        let scaled = u64::from(current_hp) * 100;
        let threshold = |limit: u32| u64::from(limit) * u64::from(max_hp);

        self.hp_below.is_none_or(|limit| scaled < threshold(limit))
            && self.hp_above.is_none_or(|limit| scaled > threshold(limit))
            && self.turn_after.is_none_or(|after| turn > after)
    }
}

/// An ability in an opponent's repertoire.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MonsterAbility {
    pub ability: Ability,
    pub category: AbilityCategory,
    /// Weight of the second (per-ability) draw.
    pub weight: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub condition: ActivationCondition,
    #[cfg_attr(feature = "serde", serde(default = "default_level"))]
    pub level: u32,
}

#[cfg(feature = "serde")]
fn default_level() -> u32 {
    1
}

impl MonsterAbility {
    pub fn new(ability: Ability, category: AbilityCategory, weight: u32) -> Self {
        Self {
            ability,
            category,
            weight,
            condition: ActivationCondition::always(),
            level: 1,
        }
    }

    pub fn with_condition(mut self, condition: ActivationCondition) -> Self {
        self.condition = condition;
        self
    }

    pub fn with_level(mut self, level: u32) -> Self {
        self.level = level.max(1);
        self
    }
}

/// Category weights of the first monster draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ActionWeights {
    pub basic_attack: u32,
    pub special_skill: u32,
    pub borrowed_ability: u32,
}

impl ActionWeights {
    pub fn new(basic_attack: u32, special_skill: u32, borrowed_ability: u32) -> Self {
        Self {
            basic_attack,
            special_skill,
            borrowed_ability,
        }
    }

    pub fn weight(&self, category: AbilityCategory) -> u32 {
        match category {
            AbilityCategory::BasicAttack => self.basic_attack,
            AbilityCategory::SpecialSkill => self.special_skill,
            AbilityCategory::BorrowedAbility => self.borrowed_ability,
        }
    }
}

impl Default for ActionWeights {
    fn default() -> Self {
        Self::new(60, 30, 10)
    }
}
