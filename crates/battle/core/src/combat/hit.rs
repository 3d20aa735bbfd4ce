//! Hit outcome resolution.
//!
//! An attack resolves to exactly one [`HitOutcome`]. Outcomes are checked in a
//! fixed precedence, each with its own independent roll, and the first roll
//! that succeeds decides the result:
//!
//! ```text
//! missed (physical only) → dodged → blocked → critical → hit
//! ```
//!
//! Changing the order changes observed outcome frequencies.

use crate::env::BattleRng;
use crate::stats::StatSnapshot;

use super::damage::AttackKind;

/// Category an attack resolved to.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum HitOutcome {
    Missed,
    Dodged,
    Blocked,
    Critical,
    Hit,
}

impl HitOutcome {
    /// Whether the attack connects and deals damage.
    pub const fn lands(self) -> bool {
        matches!(self, HitOutcome::Blocked | HitOutcome::Critical | HitOutcome::Hit)
    }
}

/// Resolved outcome plus the multiplier it applies to damage.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HitResolution {
    pub outcome: HitOutcome,
    pub damage_multiplier: f64,
}

impl HitResolution {
    pub fn new(outcome: HitOutcome, damage_multiplier: f64) -> Self {
        Self {
            outcome,
            damage_multiplier,
        }
    }

    /// A plain hit with multiplier 1.0.
    pub fn hit() -> Self {
        Self::new(HitOutcome::Hit, 1.0)
    }
}

// ============================================================================
// Chance formulas
// ============================================================================

const MISS_BASE: f64 = 2.0;
const MISS_AGILITY_SCALE: f64 = 0.1;
const MISS_CAP: f64 = 20.0;

const DODGE_BASE: f64 = 3.0;
const DODGE_AGILITY_SCALE: f64 = 0.4;
const DODGE_CAP: f64 = 40.0;

const BLOCK_BASE: f64 = 5.0;
const BLOCK_CONSTITUTION_SCALE: f64 = 0.3;
const BLOCK_CAP: f64 = 35.0;
/// Damage multiplier of a blocked attack.
pub const BLOCK_MULTIPLIER: f64 = 0.5;

const CRIT_BASE: f64 = 5.0;
const CRIT_LUCK_SCALE: f64 = 0.3;
const CRIT_SECONDARY_SCALE: f64 = 0.05;
const CRIT_CAP: f64 = 60.0;
const CRIT_MULTIPLIER_BASE: f64 = 1.5;
const CRIT_MULTIPLIER_LUCK_SCALE: f64 = 0.01;
const CRIT_MULTIPLIER_CAP: f64 = 2.5;

/// Chance (percent) that a physical attack misses the defender outright.
///
/// ```text
/// miss = 2 + agility·0.1 + gear evasion bonus, capped at 20
/// ```
pub fn miss_chance(defender: &StatSnapshot) -> f64 {
    let chance = MISS_BASE
        + f64::from(defender.attributes.agility) * MISS_AGILITY_SCALE
        + f64::from(defender.gear.evasion_bonus);
    chance.clamp(0.0, MISS_CAP)
}

/// Chance (percent) that the defender dodges.
///
/// ```text
/// dodge = 3 + agility·0.4 + gear dodge bonus, capped at 40
/// ```
pub fn dodge_chance(defender: &StatSnapshot) -> f64 {
    let chance = DODGE_BASE
        + f64::from(defender.attributes.agility) * DODGE_AGILITY_SCALE
        + f64::from(defender.gear.dodge_bonus);
    chance.clamp(0.0, DODGE_CAP)
}

/// Chance (percent) that the defender blocks.
///
/// ```text
/// block = 5 + constitution·0.3 + gear block bonus, capped at 35
/// ```
pub fn block_chance(defender: &StatSnapshot) -> f64 {
    let chance = BLOCK_BASE
        + f64::from(defender.attributes.constitution) * BLOCK_CONSTITUTION_SCALE
        + f64::from(defender.gear.block_bonus);
    chance.clamp(0.0, BLOCK_CAP)
}

/// Chance (percent) that the attacker lands a critical.
///
/// ```text
/// critical = 5 + luck·0.3 + secondary·0.05, capped at 60
/// secondary = agility (physical) | intellect (magical)
/// ```
///
/// ```
/// # use battle_core::combat::{critical_chance, AttackKind};
/// # use battle_core::stats::{Attributes, StatSnapshot};
/// let attacker = StatSnapshot::from_attributes(Attributes::new(10, 20, 10, 10, 10, 10, 10));
/// assert!((critical_chance(&attacker, AttackKind::Physical) - 9.0).abs() < 1e-9);
/// ```
pub fn critical_chance(attacker: &StatSnapshot, kind: AttackKind) -> f64 {
    let secondary = match kind {
        AttackKind::Physical => attacker.attributes.agility,
        AttackKind::Magical => attacker.attributes.intellect,
    };
    let chance = CRIT_BASE
        + f64::from(attacker.attributes.luck) * CRIT_LUCK_SCALE
        + f64::from(secondary) * CRIT_SECONDARY_SCALE;
    chance.clamp(0.0, CRIT_CAP)
}

/// Damage multiplier of a critical: `min(2.5, 1.5 + luck·0.01)`.
pub fn critical_multiplier(attacker: &StatSnapshot) -> f64 {
    (CRIT_MULTIPLIER_BASE + f64::from(attacker.attributes.luck) * CRIT_MULTIPLIER_LUCK_SCALE)
        .min(CRIT_MULTIPLIER_CAP)
}

// ============================================================================
// Resolution
// ============================================================================

/// Roll the outcome of one attack.
///
/// Rolls are drawn lazily in precedence order; a success stops the chain, so
/// a dodged attack consumes one roll (two for physical attacks).
pub fn resolve_hit(
    attacker: &StatSnapshot,
    defender: &StatSnapshot,
    kind: AttackKind,
    rng: &mut dyn BattleRng,
) -> HitResolution {
    if kind == AttackKind::Physical && rng.chance(miss_chance(defender)) {
        return HitResolution::new(HitOutcome::Missed, 0.0);
    }
    if rng.chance(dodge_chance(defender)) {
        return HitResolution::new(HitOutcome::Dodged, 0.0);
    }
    if rng.chance(block_chance(defender)) {
        return HitResolution::new(HitOutcome::Blocked, BLOCK_MULTIPLIER);
    }
    if rng.chance(critical_chance(attacker, kind)) {
        return HitResolution::new(HitOutcome::Critical, critical_multiplier(attacker));
    }
    HitResolution::hit()
}

/// Effective probability of every outcome under the fixed precedence.
///
/// Each value is in `[0, 1]` and the five values sum to 1.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OutcomeProbabilities {
    pub missed: f64,
    pub dodged: f64,
    pub blocked: f64,
    pub critical: f64,
    pub hit: f64,
}

impl OutcomeProbabilities {
    pub fn get(&self, outcome: HitOutcome) -> f64 {
        match outcome {
            HitOutcome::Missed => self.missed,
            HitOutcome::Dodged => self.dodged,
            HitOutcome::Blocked => self.blocked,
            HitOutcome::Critical => self.critical,
            HitOutcome::Hit => self.hit,
        }
    }

    pub fn total(&self) -> f64 {
        self.missed + self.dodged + self.blocked + self.critical + self.hit
    }
}

/// Probability breakdown matching [`resolve_hit`] for the given pair.
pub fn outcome_probabilities(
    attacker: &StatSnapshot,
    defender: &StatSnapshot,
    kind: AttackKind,
) -> OutcomeProbabilities {
    let miss = match kind {
        AttackKind::Physical => miss_chance(defender) / 100.0,
        AttackKind::Magical => 0.0,
    };
    let dodge = dodge_chance(defender) / 100.0;
    let block = block_chance(defender) / 100.0;
    let crit = critical_chance(attacker, kind) / 100.0;

    let mut remaining = 1.0;
    let mut take = |p: f64| {
        let share = remaining * p;
        remaining -= share;
        share
    };

    let missed = take(miss);
    let dodged = take(dodge);
    let blocked = take(block);
    let critical = take(crit);

    OutcomeProbabilities {
        missed,
        dodged,
        blocked,
        critical,
        hit: remaining,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::SequenceRng;
    use crate::stats::{Attributes, GearStats, SnapshotBuilder};

    fn snapshot(agility: i32, constitution: i32, luck: i32) -> StatSnapshot {
        StatSnapshot::from_attributes(Attributes::new(10, agility, constitution, 10, 10, 10, luck))
    }

    #[test]
    fn critical_chance_example() {
        let attacker = snapshot(20, 10, 10);
        assert!((critical_chance(&attacker, AttackKind::Physical) - 9.0).abs() < 1e-9);
    }

    #[test]
    fn chances_respect_caps() {
        let attributes = Attributes::new(10, 999, 999, 999, 10, 10, 999);
        let nimble = SnapshotBuilder::from_attributes(attributes)
            .with_gear(GearStats::default().with_dodge_bonus(50).with_block_bonus(50))
            .build();
        assert_eq!(miss_chance(&nimble), 20.0);
        assert_eq!(dodge_chance(&nimble), 40.0);
        assert_eq!(block_chance(&nimble), 35.0);
        assert_eq!(critical_chance(&nimble, AttackKind::Magical), 60.0);
        assert_eq!(critical_multiplier(&nimble), 2.5);
    }

    #[test]
    fn critical_multiplier_scales_with_luck() {
        assert!((critical_multiplier(&snapshot(10, 10, 30)) - 1.8).abs() < 1e-9);
    }

    #[test]
    fn magical_attacks_never_miss() {
        let attacker = snapshot(10, 10, 10);
        let defender = snapshot(10, 10, 10);
        // A zero draw succeeds on every positive chance; magical skips the miss roll.
        let mut rng = SequenceRng::constant(0.0);
        let magical = resolve_hit(&attacker, &defender, AttackKind::Magical, &mut rng);
        assert_eq!(magical.outcome, HitOutcome::Dodged);
        assert_eq!(rng.consumed(), 1);

        let physical = resolve_hit(&attacker, &defender, AttackKind::Physical, &mut rng);
        assert_eq!(physical.outcome, HitOutcome::Missed);
        assert_eq!(physical.damage_multiplier, 0.0);
    }

    #[test]
    fn precedence_walks_in_order() {
        let attacker = snapshot(10, 10, 10);
        let defender = snapshot(10, 10, 10);

        // miss fails, dodge fails, block succeeds.
        let mut rng = SequenceRng::new([0.99, 0.99, 0.0]);
        let blocked = resolve_hit(&attacker, &defender, AttackKind::Physical, &mut rng);
        assert_eq!(blocked, HitResolution::new(HitOutcome::Blocked, BLOCK_MULTIPLIER));

        // everything fails.
        let mut rng = SequenceRng::constant(0.99);
        assert_eq!(
            resolve_hit(&attacker, &defender, AttackKind::Physical, &mut rng).outcome,
            HitOutcome::Hit
        );
        assert_eq!(rng.consumed(), 4);
    }

    #[test]
    fn probabilities_sum_to_one() {
        let attacker = snapshot(30, 12, 25);
        let defender = snapshot(45, 20, 8);
        for kind in [AttackKind::Physical, AttackKind::Magical] {
            let p = outcome_probabilities(&attacker, &defender, kind);
            assert!((p.total() - 1.0).abs() < 1e-9);
        }
        let magical = outcome_probabilities(&attacker, &defender, AttackKind::Magical);
        assert_eq!(magical.get(HitOutcome::Missed), 0.0);
    }
}
