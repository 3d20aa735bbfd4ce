//! Combat resolution.
//!
//! Pure functions for resolving one attack between two stat snapshots.
//!
//! # Core Functions
//!
//! - `resolve_attack`: outcome roll + damage for one attack
//! - `resolve_hit`: outcome category and multiplier
//! - `physical_damage` / `magical_damage` / `monster_damage`: damage formulas
//! - `elemental_effectiveness`: element-vs-element affinity table

pub mod damage;
pub mod element;
pub mod hit;
pub mod result;

pub use damage::{
    AttackKind, DamageInput, apply_resistance, draw_variance, heal_amount, magical_damage,
    monster_damage, physical_damage, scaled_power, variance,
};
pub use element::{Element, NOT_EFFECTIVE, SUPER_EFFECTIVE, elemental_effectiveness};
pub use hit::{
    BLOCK_MULTIPLIER, HitOutcome, HitResolution, OutcomeProbabilities, block_chance,
    critical_chance, critical_multiplier, dodge_chance, miss_chance, outcome_probabilities,
    resolve_hit,
};
pub use result::{AttackProfile, AttackResult, DamageFormula, resolve_attack};
