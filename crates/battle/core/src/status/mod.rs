//! Status effect engine.
//!
//! Pure effect catalog plus the stacking, aggregation, ticking and gating
//! logic the session runs each turn. Nothing here depends on combat or the
//! session.

pub mod effect;
pub mod effects;
pub mod shield;

pub use effect::{EffectId, EffectKind, EffectTemplate, EffectType, IncapacitateCause, StatusEffect};
pub use effects::{ApplyOutcome, StatusEffects};
pub use shield::{ShieldAbsorption, apply_damage_to_shield};
