//! StatSnapshot - effective attributes at the moment of resolution.
//!
//! The snapshot captures everything the resolvers read about a combatant so
//! that a single attack is resolved against one consistent view, regardless of
//! effects applied halfway through the turn.
//!
//! Snapshots are immutable. Gear, level, or effect changes produce a new
//! snapshot through [`StatSnapshot::with_adjustments`] or [`SnapshotBuilder`].

use std::collections::BTreeMap;

use super::attributes::Attributes;
use super::bounds::StatBounds;
use super::gear::GearStats;
use super::proficiency::{Discipline, Proficiencies, WeaponType};
use crate::combat::Element;

/// Snapshot values that status effects can raise or lower.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum StatKey {
    Strength,
    Agility,
    Constitution,
    Intellect,
    Wisdom,
    Charisma,
    Luck,
    AttackPower,
    PhysicalDefense,
}

/// Damage multipliers per incoming weapon type. Missing entries are 1.0.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackTypeResistances {
    multipliers: BTreeMap<WeaponType, f64>,
}

impl AttackTypeResistances {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the multiplier applied to damage from `weapon` (0.5 = halves it).
    pub fn with(mut self, weapon: WeaponType, multiplier: f64) -> Self {
        self.multipliers.insert(weapon, multiplier.max(0.0));
        self
    }

    pub fn multiplier(&self, weapon: WeaponType) -> f64 {
        self.multipliers.get(&weapon).copied().unwrap_or(1.0)
    }
}

/// Complete snapshot of a combatant's effective stats.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StatSnapshot {
    /// Primary attributes after effect adjustments.
    pub attributes: Attributes,

    /// Weapon/armor-derived secondary values.
    pub gear: GearStats,

    /// Discipline ranks.
    pub proficiencies: Proficiencies,

    /// Elemental affinity of the combatant when defending against spells.
    pub element: Element,

    /// Physical damage multipliers per weapon type.
    pub resistances: AttackTypeResistances,
}

impl StatSnapshot {
    /// Snapshot with no gear, no ranks, neutral element.
    pub fn from_attributes(attributes: Attributes) -> Self {
        Self {
            attributes,
            ..Self::default()
        }
    }

    /// Read a single adjustable value.
    pub fn get(&self, key: StatKey) -> i32 {
        match key {
            StatKey::Strength => self.attributes.strength,
            StatKey::Agility => self.attributes.agility,
            StatKey::Constitution => self.attributes.constitution,
            StatKey::Intellect => self.attributes.intellect,
            StatKey::Wisdom => self.attributes.wisdom,
            StatKey::Charisma => self.attributes.charisma,
            StatKey::Luck => self.attributes.luck,
            StatKey::AttackPower => self.gear.attack_power,
            StatKey::PhysicalDefense => self.gear.physical_defense,
        }
    }

    /// Produce a new snapshot with a flat adjustment per [`StatKey`].
    ///
    /// Typically fed with the aggregated stat modifiers of a combatant's active
    /// effects. Attributes stay within [`StatBounds::ATTRIBUTES`], secondary
    /// values within [`StatBounds::SECONDARY`].
    pub fn with_adjustments(&self, adjust: impl Fn(StatKey) -> i32) -> Self {
        let attr = |key: StatKey| StatBounds::ATTRIBUTES.adjust(self.get(key), adjust(key));
        let secondary = |key: StatKey| StatBounds::SECONDARY.adjust(self.get(key), adjust(key));

        Self {
            attributes: Attributes {
                strength: attr(StatKey::Strength),
                agility: attr(StatKey::Agility),
                constitution: attr(StatKey::Constitution),
                intellect: attr(StatKey::Intellect),
                wisdom: attr(StatKey::Wisdom),
                charisma: attr(StatKey::Charisma),
                luck: attr(StatKey::Luck),
            },
            gear: GearStats {
                attack_power: secondary(StatKey::AttackPower),
                physical_defense: secondary(StatKey::PhysicalDefense),
                ..self.gear.clone()
            },
            proficiencies: self.proficiencies.clone(),
            element: self.element,
            resistances: self.resistances.clone(),
        }
    }

    /// Attack-type resistance of this combatant against `weapon`.
    pub fn resistance_to(&self, weapon: WeaponType) -> f64 {
        self.resistances.multiplier(weapon)
    }

    /// Proficiency multiplier of this combatant for `discipline`.
    pub fn proficiency(&self, discipline: Discipline) -> f64 {
        self.proficiencies.multiplier(discipline)
    }
}

/// Builder for constructing snapshots with a fluent API.
pub struct SnapshotBuilder {
    base: Attributes,
    gear: GearStats,
    proficiencies: Proficiencies,
    element: Element,
    resistances: AttackTypeResistances,
}

impl SnapshotBuilder {
    pub fn from_attributes(base: Attributes) -> Self {
        Self {
            base,
            gear: GearStats::default(),
            proficiencies: Proficiencies::new(),
            element: Element::Neutral,
            resistances: AttackTypeResistances::new(),
        }
    }

    pub fn with_gear(mut self, gear: GearStats) -> Self {
        self.gear = gear;
        self
    }

    pub fn with_rank(mut self, discipline: Discipline, rank: u8) -> Self {
        self.proficiencies.set_rank(discipline, rank);
        self
    }

    pub fn with_proficiencies(mut self, proficiencies: Proficiencies) -> Self {
        self.proficiencies = proficiencies;
        self
    }

    pub fn with_element(mut self, element: Element) -> Self {
        self.element = element;
        self
    }

    pub fn with_resistances(mut self, resistances: AttackTypeResistances) -> Self {
        self.resistances = resistances;
        self
    }

    pub fn build(self) -> StatSnapshot {
        StatSnapshot {
            attributes: self.base,
            gear: self.gear,
            proficiencies: self.proficiencies,
            element: self.element,
            resistances: self.resistances,
        }
    }
}
