//! Player action queue validation.
//!
//! The caller builds the queue; validation only checks that every entry is
//! known, castable and affordable against the running budget. Entries are
//! never dropped: each one gets a [`QueueEntryStatus`].

use crate::config::BattleConfig;
use crate::error::{BattleError, ErrorSeverity};
use crate::env::AbilityOracle;

use super::ability::{Ability, AbilityId};

/// One intended action for the current turn.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QueuedAction {
    pub ability_id: AbilityId,
    pub level: u32,
    pub ap_cost: u32,
    pub mp_cost: u32,
}

impl QueuedAction {
    /// Queue `ability` at `level` with its declared costs.
    pub fn new(ability: &Ability, level: u32) -> Self {
        Self {
            ability_id: ability.id.clone(),
            level: level.max(1),
            ap_cost: ability.ap_cost,
            mp_cost: ability.mp_cost,
        }
    }
}

/// Why a queue entry cannot be performed.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum QueueError {
    #[error("unknown ability `{0}`")]
    UnknownAbility(AbilityId),

    #[error("costs of `{ability}` do not match its definition")]
    CostMismatch { ability: AbilityId },

    #[error("level {level} of `{ability}` is out of range")]
    InvalidLevel { ability: AbilityId, level: u32 },

    #[error("needs {required} action points, {remaining} remaining")]
    InsufficientActionPoints { required: u32, remaining: u32 },

    #[error("needs {required} MP, {remaining} remaining")]
    InsufficientMana { required: u32, remaining: u32 },

    #[error("`{0}` is magical and the caster is silenced")]
    Silenced(AbilityId),
}

impl BattleError for QueueError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            QueueError::UnknownAbility(_)
            | QueueError::CostMismatch { .. }
            | QueueError::InvalidLevel { .. } => ErrorSeverity::Validation,
            QueueError::InsufficientActionPoints { .. }
            | QueueError::InsufficientMana { .. }
            | QueueError::Silenced(_) => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            QueueError::UnknownAbility(_) => "QUEUE_UNKNOWN_ABILITY",
            QueueError::CostMismatch { .. } => "QUEUE_COST_MISMATCH",
            QueueError::InvalidLevel { .. } => "QUEUE_INVALID_LEVEL",
            QueueError::InsufficientActionPoints { .. } => "QUEUE_INSUFFICIENT_AP",
            QueueError::InsufficientMana { .. } => "QUEUE_INSUFFICIENT_MP",
            QueueError::Silenced(_) => "QUEUE_SILENCED",
        }
    }
}

/// Validation verdict for one queue entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QueueEntryStatus {
    Affordable,
    Rejected(QueueError),
}

impl QueueEntryStatus {
    pub fn is_affordable(&self) -> bool {
        matches!(self, QueueEntryStatus::Affordable)
    }
}

/// Resources the queue is checked against.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QueueBudget {
    pub action_points: u32,
    pub mana: u32,
    pub silenced: bool,
}

/// Per-entry verdicts plus the totals of the affordable entries.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QueueValidation {
    pub entries: Vec<QueueEntryStatus>,
    pub ap_spent: u32,
    pub mp_spent: u32,
}

impl QueueValidation {
    pub fn is_valid(&self) -> bool {
        self.entries.iter().all(QueueEntryStatus::is_affordable)
    }

    /// Index and reason of the first rejected entry.
    pub fn first_rejection(&self) -> Option<(usize, &QueueError)> {
        self.entries
            .iter()
            .enumerate()
            .find_map(|(index, status)| match status {
                QueueEntryStatus::Rejected(reason) => Some((index, reason)),
                QueueEntryStatus::Affordable => None,
            })
    }
}

/// Check every entry against the running budget.
///
/// An entry is affordable when `ap_cost ≤ remaining AP` and
/// `mp_cost ≤ remaining MP` after all earlier affordable entries. Rejected
/// entries do not consume budget.
pub fn validate_queue(
    queue: &[QueuedAction],
    budget: &QueueBudget,
    abilities: &dyn AbilityOracle,
) -> QueueValidation {
    let mut remaining_ap = budget.action_points;
    let mut remaining_mp = budget.mana;
    let mut validation = QueueValidation::default();

    for action in queue {
        let checked = check_entry(
            action,
            budget.silenced,
            remaining_ap,
            remaining_mp,
            abilities,
        );
        let status = match checked {
            Ok(()) => {
                remaining_ap -= action.ap_cost;
                remaining_mp -= action.mp_cost;
                validation.ap_spent += action.ap_cost;
                validation.mp_spent += action.mp_cost;
                QueueEntryStatus::Affordable
            }
            Err(reason) => QueueEntryStatus::Rejected(reason),
        };
        validation.entries.push(status);
    }

    validation
}

fn check_entry(
    action: &QueuedAction,
    silenced: bool,
    remaining_ap: u32,
    remaining_mp: u32,
    abilities: &dyn AbilityOracle,
) -> Result<(), QueueError> {
    let ability = abilities
        .ability(&action.ability_id)
        .ok_or_else(|| QueueError::UnknownAbility(action.ability_id.clone()))?;

    if ability.ap_cost != action.ap_cost || ability.mp_cost != action.mp_cost {
        return Err(QueueError::CostMismatch {
            ability: action.ability_id.clone(),
        });
    }
    if !(1..=BattleConfig::MAX_ABILITY_LEVEL).contains(&action.level) {
        return Err(QueueError::InvalidLevel {
            ability: action.ability_id.clone(),
            level: action.level,
        });
    }
    if silenced && ability.is_magical() {
        return Err(QueueError::Silenced(action.ability_id.clone()));
    }
    if action.ap_cost > remaining_ap {
        return Err(QueueError::InsufficientActionPoints {
            required: action.ap_cost,
            remaining: remaining_ap,
        });
    }
    if action.mp_cost > remaining_mp {
        return Err(QueueError::InsufficientMana {
            required: action.mp_cost,
            remaining: remaining_mp,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::AbilityEffect;
    use crate::combat::Element;
    use crate::env::AbilityCatalog;
    use crate::stats::Discipline;

    fn catalog() -> AbilityCatalog {
        let slash = Ability::default_attack();
        let fireball = Ability {
            id: AbilityId::new("fireball"),
            name: "Fireball".into(),
            discipline: Discipline::Spell(Element::Fire),
            power: 20,
            ap_cost: 4,
            mp_cost: 8,
            effect: AbilityEffect::Attack,
            applies: None,
        };
        AbilityCatalog::new().with(slash).with(fireball)
    }

    fn queued(catalog: &AbilityCatalog, id: &str) -> QueuedAction {
        QueuedAction::new(catalog.get(&AbilityId::from(id)).unwrap(), 1)
    }

    #[test]
    fn cumulative_budget_flags_overflow() {
        let catalog = catalog();
        let queue = vec![
            queued(&catalog, "basic_attack"),
            queued(&catalog, "basic_attack"),
            queued(&catalog, "basic_attack"),
            queued(&catalog, "basic_attack"),
        ];
        let budget = QueueBudget {
            action_points: 10,
            mana: 0,
            silenced: false,
        };

        let validation = validate_queue(&queue, &budget, &catalog);
        assert_eq!(validation.entries.len(), 4);
        assert_eq!(validation.ap_spent, 9);
        assert_eq!(
            validation.first_rejection(),
            Some((
                3,
                &QueueError::InsufficientActionPoints {
                    required: 3,
                    remaining: 1
                }
            ))
        );
    }

    #[test]
    fn mana_and_silence_are_checked() {
        let catalog = catalog();
        let queue = vec![queued(&catalog, "fireball"), queued(&catalog, "fireball")];

        let poor = QueueBudget {
            action_points: 10,
            mana: 10,
            silenced: false,
        };
        let validation = validate_queue(&queue, &poor, &catalog);
        assert!(validation.entries[0].is_affordable());
        assert!(matches!(
            validation.entries[1],
            QueueEntryStatus::Rejected(QueueError::InsufficientMana { .. })
        ));

        let silenced = QueueBudget {
            silenced: true,
            ..poor
        };
        let validation = validate_queue(&queue[..1], &silenced, &catalog);
        assert_eq!(
            validation.first_rejection().map(|(_, e)| e.error_code()),
            Some("QUEUE_SILENCED")
        );
    }

    #[test]
    fn unknown_and_tampered_entries_rejected() {
        let catalog = catalog();
        let mut cheap = queued(&catalog, "fireball");
        cheap.mp_cost = 0;
        let queue = vec![
            QueuedAction {
                ability_id: AbilityId::from("meteor"),
                level: 1,
                ap_cost: 1,
                mp_cost: 0,
            },
            cheap,
        ];
        let budget = QueueBudget {
            action_points: 10,
            mana: 50,
            silenced: false,
        };

        let validation = validate_queue(&queue, &budget, &catalog);
        assert!(!validation.is_valid());
        assert!(matches!(
            validation.entries[0],
            QueueEntryStatus::Rejected(QueueError::UnknownAbility(_))
        ));
        assert!(matches!(
            validation.entries[1],
            QueueEntryStatus::Rejected(QueueError::CostMismatch { .. })
        ));
        assert_eq!(validation.ap_spent, 0);
    }

    #[test]
    fn out_of_range_levels_rejected() {
        let catalog = catalog();
        let slash = queued(&catalog, "basic_attack");
        let queue = vec![
            QueuedAction {
                level: 0,
                ..slash.clone()
            },
            QueuedAction {
                level: BattleConfig::MAX_ABILITY_LEVEL + 1,
                ..slash.clone()
            },
            QueuedAction {
                level: BattleConfig::MAX_ABILITY_LEVEL,
                ..slash
            },
        ];
        let budget = QueueBudget {
            action_points: 10,
            mana: 0,
            silenced: false,
        };

        let validation = validate_queue(&queue, &budget, &catalog);
        assert_eq!(
            validation.first_rejection(),
            Some((
                0,
                &QueueError::InvalidLevel {
                    ability: AbilityId::from("basic_attack"),
                    level: 0
                }
            ))
        );
        assert!(matches!(
            validation.entries[1],
            QueueEntryStatus::Rejected(QueueError::InvalidLevel { level: 11, .. })
        ));
        assert!(validation.entries[2].is_affordable());
        assert_eq!(validation.ap_spent, 3);
    }
}
