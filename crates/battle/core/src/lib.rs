//! Deterministic turn-based encounter resolution.
//!
//! `battle-core` resolves one encounter between the player and a single
//! opponent: hit outcomes, damage, status effects, monster action selection and
//! the session state machine. It performs no I/O and owns no randomness; every
//! roll is drawn from the [`env::BattleRng`] the caller passes in, so an
//! encounter replays exactly from the same seed and inputs.
//!
//! All session mutation flows through [`session::BattleEngine`]. Results leave
//! the core through the sink traits in [`outcome`].
pub mod action;
pub mod combat;
pub mod config;
pub mod env;
pub mod error;
pub mod outcome;
pub mod session;
pub mod stats;
pub mod status;

pub use action::{
    Ability, AbilityCategory, AbilityEffect, AbilityId, ActionWeights, ActivationCondition,
    MonsterAbility, MonsterPlan, QueueError, QueuedAction, select_monster_actions, validate_queue,
};
pub use combat::{
    AttackKind, AttackResult, DamageFormula, Element, HitOutcome, HitResolution, resolve_attack,
    resolve_hit,
};
pub use config::BattleConfig;
pub use env::{
    AbilityCatalog, AbilityOracle, Alignment, BattleEnv, BattleRng, DayOfWeek, PcgRng,
    ResolutionContext, SequenceRng, TimeOfDay, Weather,
};
pub use error::{BattleError, ErrorSeverity};
pub use outcome::{
    EncounterSummary, OutcomeSinks, PersistenceSink, PresentationSink, ProficiencyDelta,
    ProficiencySink, RewardSink, dispatch_summary,
};
pub use session::{
    BattleEngine, BattleLog, BattleSession, BattleState, Behavior, CombatantState, InvalidAction,
    LogAction, LogActor, LogEntry, OpponentConfig, OpponentKind, PlayerSheet, SessionError, Side,
    TurnReport, start_encounter,
};
pub use stats::{
    Attributes, Discipline, GearStats, SnapshotBuilder, StatKey, StatSnapshot, WeaponType,
};
pub use status::{
    EffectId, EffectKind, EffectTemplate, EffectType, IncapacitateCause, StatusEffect,
    StatusEffects,
};
