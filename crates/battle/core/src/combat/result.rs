//! Attack resolution: hit roll plus damage.

use crate::env::{Alignment, BattleRng, ResolutionContext};
use crate::stats::{Discipline, StatSnapshot};

use super::damage::{
    AttackKind, DamageInput, draw_variance, magical_damage, monster_damage, physical_damage,
};
use super::hit::{HitOutcome, resolve_hit};

/// Which family of damage formulas an attacker uses.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum DamageFormula {
    /// Physical/magical formulas (players and duel rivals). Floor 1.
    Combatant,
    /// Simplified attack-power formula (monsters). Floor 0.
    Monster,
}

impl DamageFormula {
    /// Lowest damage a landed attack may deal under this formula.
    pub const fn minimum(self) -> u32 {
        match self {
            DamageFormula::Combatant => 1,
            DamageFormula::Monster => 0,
        }
    }
}

/// Everything about an attack that is not a stat snapshot.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AttackProfile {
    /// Level-scaled ability power.
    pub base_amount: f64,
    pub discipline: Discipline,
    pub formula: DamageFormula,
    /// Attacker alignment, read by magical damage only.
    pub alignment: Alignment,
}

impl AttackProfile {
    pub fn kind(&self) -> AttackKind {
        AttackKind::from(self.discipline)
    }
}

/// Outcome of one attack.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackResult {
    pub outcome: HitOutcome,

    /// Multiplier applied by the outcome (0 for missed/dodged).
    pub multiplier: f64,

    /// Damage before resistances and shields. `None` if the attack did not land.
    pub damage: Option<u32>,
}

impl AttackResult {
    pub fn landed(&self) -> bool {
        self.outcome.lands()
    }
}

/// Resolve one attack: roll the outcome, then compute damage if it landed.
///
/// Draw order is fixed: outcome rolls first, then one variance draw for a
/// landed attack.
pub fn resolve_attack(
    attacker: &StatSnapshot,
    defender: &StatSnapshot,
    profile: &AttackProfile,
    context: &ResolutionContext,
    rng: &mut dyn BattleRng,
) -> AttackResult {
    let kind = profile.kind();
    let resolution = resolve_hit(attacker, defender, kind, rng);

    if !resolution.outcome.lands() {
        return AttackResult {
            outcome: resolution.outcome,
            multiplier: resolution.damage_multiplier,
            damage: None,
        };
    }

    let factor = draw_variance(rng);
    let damage = match profile.formula {
        DamageFormula::Monster => monster_damage(
            attacker,
            defender,
            profile.base_amount,
            resolution.damage_multiplier,
            factor,
        ),
        DamageFormula::Combatant => {
            let input = DamageInput {
                attacker,
                defender,
                base_amount: profile.base_amount,
                discipline: profile.discipline,
                outcome_multiplier: resolution.damage_multiplier,
                variance: factor,
            };
            match kind {
                AttackKind::Physical => physical_damage(&input),
                AttackKind::Magical => magical_damage(&input, context, profile.alignment),
            }
        }
    };

    AttackResult {
        outcome: resolution.outcome,
        multiplier: resolution.damage_multiplier,
        damage: Some(damage),
    }
}
