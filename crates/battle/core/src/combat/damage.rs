//! Damage calculation.
//!
//! All formulas follow one canonical order:
//!
//! ```text
//! pre-mitigation amount → variance → × outcome multiplier → − defense → floor
//! ```
//!
//! The variance factor is drawn by the caller (see
//! [`draw_variance`]) so that formulas stay pure and tests can pin it.

use crate::config::BattleConfig;
use crate::env::{Alignment, BattleRng, ResolutionContext};
use crate::stats::{Discipline, StatSnapshot, WeaponType};

use super::element::{Element, elemental_effectiveness};

/// Whether an attack is resolved as physical or magical.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum AttackKind {
    Physical,
    Magical,
}

impl From<Discipline> for AttackKind {
    fn from(discipline: Discipline) -> Self {
        if discipline.is_magical() {
            AttackKind::Magical
        } else {
            AttackKind::Physical
        }
    }
}

const STRENGTH_SCALE: f64 = 0.5;
const INTELLECT_SCALE: f64 = 0.8;
const MAGIC_DEFENSE_SCALE: f64 = 0.3;
const MONSTER_DEFENSE_SCALE: f64 = 0.5;
const WISDOM_HEAL_SCALE: f64 = 0.5;
const LEVEL_SCALE: f64 = 0.1;

/// Draw a variance factor uniformly from `[0.85, 1.15]`.
pub fn draw_variance(rng: &mut dyn BattleRng) -> f64 {
    let span = BattleConfig::VARIANCE_MAX - BattleConfig::VARIANCE_MIN;
    (BattleConfig::VARIANCE_MIN + rng.unit_closed() * span).min(BattleConfig::VARIANCE_MAX)
}

/// Apply a variance factor: multiply, floor, minimum 1.
///
/// ```
/// # use battle_core::combat::variance;
/// assert_eq!(variance(17.9, 1.0), 17);
/// assert_eq!(variance(0.4, 0.85), 1);
/// ```
pub fn variance(amount: f64, factor: f64) -> u32 {
    floor_to_u32(amount * factor).max(1)
}

/// Base amount of an ability at the given level: `power·(1 + 0.1·(level − 1))`.
pub fn scaled_power(power: u32, level: u32) -> f64 {
    f64::from(power) * (1.0 + LEVEL_SCALE * f64::from(level.saturating_sub(1)))
}

/// Inputs shared by the player formulas.
#[derive(Clone, Copy, Debug)]
pub struct DamageInput<'a> {
    pub attacker: &'a StatSnapshot,
    pub defender: &'a StatSnapshot,
    /// Level-scaled ability power.
    pub base_amount: f64,
    /// Discipline the attack trains and scales with.
    pub discipline: Discipline,
    /// Multiplier of the resolved hit outcome.
    pub outcome_multiplier: f64,
    /// Variance factor in `[0.85, 1.15]`.
    pub variance: f64,
}

/// Physical damage.
///
/// ```text
/// pre    = (base + strength·0.5) · proficiency · attack-type resistance
/// damage = max(1, floor(variance(pre) · outcome) − physical defense)
/// ```
pub fn physical_damage(input: &DamageInput<'_>) -> u32 {
    let weapon = match input.discipline {
        Discipline::Weapon(weapon) => weapon,
        Discipline::Spell(_) => WeaponType::Unarmed,
    };

    let pre = (input.base_amount + f64::from(input.attacker.attributes.strength) * STRENGTH_SCALE)
        * input.attacker.proficiency(input.discipline)
        * input.defender.resistance_to(weapon);

    let varied = variance(pre, input.variance);
    let after_outcome = (f64::from(varied) * input.outcome_multiplier).floor();
    let defense = f64::from(input.defender.gear.physical_defense.max(0));

    floor_to_u32(after_outcome - defense).max(1)
}

/// Magical damage.
///
/// ```text
/// pre    = (base + intellect·0.8) · proficiency · elemental effectiveness
///          · day · time of day · weather · alignment
/// damage = max(1, floor(variance(pre) · outcome − physical defense·0.3))
/// ```
pub fn magical_damage(
    input: &DamageInput<'_>,
    context: &ResolutionContext,
    alignment: Alignment,
) -> u32 {
    let element = match input.discipline {
        Discipline::Spell(element) => element,
        Discipline::Weapon(_) => Element::Neutral,
    };

    let pre = (input.base_amount
        + f64::from(input.attacker.attributes.intellect) * INTELLECT_SCALE)
        * input.attacker.proficiency(input.discipline)
        * elemental_effectiveness(element, input.defender.element)
        * context.magic_multiplier(element, alignment);

    let varied = variance(pre, input.variance);
    let after_outcome = (f64::from(varied) * input.outcome_multiplier).floor();
    let defense = f64::from(input.defender.gear.physical_defense.max(0)) * MAGIC_DEFENSE_SCALE;

    floor_to_u32(after_outcome - defense).max(1)
}

/// Monster damage. May be zero.
///
/// ```text
/// pre    = attack power + ability power − physical defense·0.5
/// damage = pre ≤ 0 ? 0 : floor(floor(pre · variance) · outcome)
/// ```
pub fn monster_damage(
    attacker: &StatSnapshot,
    defender: &StatSnapshot,
    ability_power: f64,
    outcome_multiplier: f64,
    variance_factor: f64,
) -> u32 {
    let pre = f64::from(attacker.gear.attack_power) + ability_power
        - f64::from(defender.gear.physical_defense.max(0)) * MONSTER_DEFENSE_SCALE;
    if pre <= 0.0 {
        return 0;
    }
    let varied = (pre * variance_factor).floor();
    floor_to_u32(varied * outcome_multiplier)
}

/// HP restored by a healing ability: `floor(base + wisdom·0.5)`.
pub fn heal_amount(caster: &StatSnapshot, base_amount: f64) -> u32 {
    floor_to_u32(base_amount + f64::from(caster.attributes.wisdom) * WISDOM_HEAL_SCALE)
}

const RESISTANCE_MIN_PERCENT: i32 = 10;
const RESISTANCE_MAX_PERCENT: i32 = 200;

/// Scale incoming damage by a net resistance percentage.
///
/// The damage is multiplied by `(100 − resistance)%`, clamped to
/// `[10%, 200%]`, floored, and kept at or above `minimum` unless the
/// incoming damage was already zero.
pub fn apply_resistance(damage: u32, resistance_percent: i32, minimum: u32) -> u32 {
    if damage == 0 || resistance_percent == 0 {
        return damage;
    }
    let percent = (100 - resistance_percent).clamp(RESISTANCE_MIN_PERCENT, RESISTANCE_MAX_PERCENT);
    let scaled = u64::from(damage) * u64::from(percent.unsigned_abs()) / 100;
    u32::try_from(scaled).unwrap_or(u32::MAX).max(minimum)
}

fn floor_to_u32(value: f64) -> u32 {
    if value.is_nan() || value <= 0.0 {
        0
    } else if value >= f64::from(u32::MAX) {
        u32::MAX
    } else {
        value.floor() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{DayOfWeek, SequenceRng, TimeOfDay, Weather};
    use crate::stats::{Attributes, GearStats, SnapshotBuilder, proficiency_multiplier};

    /// Returns one fixed raw value forever.
    struct Raw(u32);

    impl BattleRng for Raw {
        fn next_u32(&mut self) -> u32 {
            self.0
        }
    }

    #[test]
    fn variance_range_is_closed() {
        let low = draw_variance(&mut Raw(0));
        let high = draw_variance(&mut Raw(u32::MAX));
        assert_eq!(low, BattleConfig::VARIANCE_MIN);
        assert!((high - BattleConfig::VARIANCE_MAX).abs() < 1e-12);
        assert!(high <= BattleConfig::VARIANCE_MAX);

        let middle = draw_variance(&mut SequenceRng::constant(0.5));
        assert!((middle - 1.0).abs() < 1e-12);
    }

    fn input<'a>(attacker: &'a StatSnapshot, defender: &'a StatSnapshot) -> DamageInput<'a> {
        DamageInput {
            attacker,
            defender,
            base_amount: 10.0,
            discipline: Discipline::Weapon(WeaponType::Sword),
            outcome_multiplier: 1.0,
            variance: 1.0,
        }
    }

    #[test]
    fn physical_reference_case() {
        let attacker = SnapshotBuilder::from_attributes(Attributes::new(14, 10, 10, 10, 10, 10, 10))
            .with_rank(Discipline::Weapon(WeaponType::Sword), 40)
            .build();
        let defender = SnapshotBuilder::from_attributes(Attributes::default())
            .with_gear(GearStats::new(0, 5))
            .build();

        let expected = ((17.0 * proficiency_multiplier(40)).floor() as u32 - 5).max(1);
        assert_eq!(physical_damage(&input(&attacker, &defender)), expected);
    }

    #[test]
    fn physical_floor_is_one() {
        let attacker = StatSnapshot::from_attributes(Attributes::default());
        let defender = SnapshotBuilder::from_attributes(Attributes::default())
            .with_gear(GearStats::new(0, 500))
            .build();
        assert_eq!(physical_damage(&input(&attacker, &defender)), 1);
    }

    #[test]
    fn block_halves_after_variance() {
        let attacker = StatSnapshot::from_attributes(Attributes::new(20, 10, 10, 10, 10, 10, 10));
        let defender = StatSnapshot::from_attributes(Attributes::default());
        let mut blocked = input(&attacker, &defender);
        blocked.variance = 1.1;
        blocked.outcome_multiplier = 0.5;
        // variance(20 · 1.1) = 22, halved = 11.
        assert_eq!(physical_damage(&blocked), 11);
    }

    #[test]
    fn magical_uses_affinity_and_context() {
        let attacker = StatSnapshot::from_attributes(Attributes::new(10, 10, 10, 20, 10, 10, 10));
        let defender = SnapshotBuilder::from_attributes(Attributes::default())
            .with_element(Element::Ice)
            .with_gear(GearStats::new(0, 10))
            .build();
        let mut fire = input(&attacker, &defender);
        fire.discipline = Discipline::Spell(Element::Fire);

        let neutral = ResolutionContext::new(DayOfWeek::Sunday, TimeOfDay::Day, Weather::Clear);
        // (10 + 16) · 1.5 = 39, minus 10·0.3 = 36.
        assert_eq!(magical_damage(&fire, &neutral, Alignment::Neutral), 36);
    }

    #[test]
    fn monster_can_deal_zero() {
        let monster = SnapshotBuilder::from_attributes(Attributes::default())
            .with_gear(GearStats::new(4, 0))
            .build();
        let armored = SnapshotBuilder::from_attributes(Attributes::default())
            .with_gear(GearStats::new(0, 20))
            .build();
        assert_eq!(monster_damage(&monster, &armored, 0.0, 1.0, 1.15), 0);

        let bare = StatSnapshot::from_attributes(Attributes::default());
        assert_eq!(monster_damage(&monster, &bare, 6.0, 1.0, 1.0), 10);
        assert_eq!(monster_damage(&monster, &bare, 6.0, 0.5, 1.0), 5);
    }

    #[test]
    fn level_scales_power() {
        assert_eq!(scaled_power(10, 1), 10.0);
        assert!((scaled_power(10, 3) - 12.0).abs() < 1e-9);
    }

    #[test]
    fn resistance_clamps() {
        assert_eq!(apply_resistance(100, 30, 1), 70);
        assert_eq!(apply_resistance(100, 95, 1), 10);
        assert_eq!(apply_resistance(100, -150, 1), 200);
        assert_eq!(apply_resistance(3, 90, 1), 1);
        assert_eq!(apply_resistance(3, 90, 0), 0);
        assert_eq!(apply_resistance(0, -50, 1), 0);
    }
}
