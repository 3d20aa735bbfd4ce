//! Append-only encounter narrative.

use crate::action::AbilityId;
use crate::combat::HitOutcome;
use crate::status::{EffectId, IncapacitateCause};

use super::combatant::Side;
use super::setup::BattleState;

/// Who produced a log entry.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum LogActor {
    Player,
    Opponent,
    /// Upkeep, expiry and state transitions.
    System,
}

impl From<Side> for LogActor {
    fn from(side: Side) -> Self {
        match side {
            Side::Player => LogActor::Player,
            Side::Opponent => LogActor::Opponent,
        }
    }
}

/// What happened.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum LogAction {
    /// An ability resolved. `outcome` is `None` for abilities without a roll.
    Ability {
        ability: AbilityId,
        outcome: Option<HitOutcome>,
    },
    /// A queued action could no longer be performed when its turn came.
    Fizzled { ability: AbilityId },
    /// The actor's turn was skipped.
    Skipped { cause: IncapacitateCause },
    /// Start-of-turn damage over time on `target`.
    DamageOverTime { target: Side },
    /// Start-of-turn healing over time on `target`.
    HealOverTime { target: Side },
    /// An effect on `target` ran out.
    EffectExpired { target: Side, effect: EffectId },
    /// Escape attempt.
    Flee { success: bool },
    /// Terminal transition.
    Outcome(BattleState),
}

/// One line of the narrative.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LogEntry {
    pub turn: u32,
    pub actor: LogActor,
    pub action: LogAction,
    pub amount: Option<u32>,
    pub message: String,
}

/// Ordered, append-only list of [`LogEntry`].
///
/// Entries can only be appended by the engine; callers get read access.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleLog {
    entries: Vec<LogEntry>,
}

impl BattleLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, entry: LogEntry) {
        tracing::trace!(turn = entry.turn, actor = %entry.actor, "{}", entry.message);
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    /// Entries appended at or after `index`.
    pub fn since(&self, index: usize) -> &[LogEntry] {
        self.entries.get(index..).unwrap_or(&[])
    }

    pub fn for_turn(&self, turn: u32) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter().filter(move |e| e.turn == turn)
    }

    pub fn iter(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    pub fn last(&self) -> Option<&LogEntry> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
