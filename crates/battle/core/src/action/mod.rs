//! Action selection.
//!
//! - `ability`: ability definitions, monster repertoire entries, category weights
//! - `queue`: player queue validation against the action-point and MP budget
//! - `ai`: weighted monster action selection with the default-attack fallback

pub mod ability;
pub mod ai;
pub mod queue;

pub use ability::{
    Ability, AbilityCategory, AbilityEffect, AbilityId, ActionWeights, ActivationCondition,
    MonsterAbility,
};
pub use ai::{AiContext, MonsterPlan, select_monster_actions, weighted_pick};
pub use queue::{
    QueueBudget, QueueEntryStatus, QueueError, QueueValidation, QueuedAction, validate_queue,
};
