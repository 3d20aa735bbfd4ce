//! Encounter lifecycle.
//!
//! - `setup`: session value, opponent and player descriptions, `start_encounter`
//! - `combatant`: live HP/MP/AP and effect lists of one side
//! - `engine`: `BattleEngine` turn sequencing over a borrowed session
//! - `log`: append-only narrative
//! - `errors`: rejected operations

pub mod combatant;
pub mod engine;
pub mod errors;
pub mod log;
pub mod setup;

pub use combatant::{CombatantState, Side};
pub use engine::{BattleEngine, TurnReport};
pub use errors::{InvalidAction, SessionError};
pub use log::{BattleLog, LogAction, LogActor, LogEntry};
pub use setup::{
    BattleSession, BattleState, Behavior, OpponentConfig, OpponentKind, PlayerSheet,
    start_encounter,
};
