//! Encounter results and the outbound collaborator seams.
//!
//! The core never grants rewards, writes storage, renders or levels
//! disciplines itself. Once a session is terminal, an [`EncounterSummary`] is
//! built from it and handed to whatever implements the sink traits.

use crate::session::{BattleLog, BattleSession, BattleState};
use crate::stats::Discipline;

/// Progression earned by using a discipline during the encounter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProficiencyDelta {
    pub discipline: Discipline,
    /// Number of performed actions of this discipline.
    pub amount: u32,
}

/// Everything collaborators need from a finished encounter.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EncounterSummary {
    pub state: BattleState,
    pub opponent_id: String,
    pub opponent_name: String,
    /// Turn counter at the end of the encounter.
    pub turns: u32,
    pub player_hp: u32,
    pub player_max_hp: u32,
    pub player_mp: u32,
    pub player_max_mp: u32,
    pub log: BattleLog,
    pub proficiency: Vec<ProficiencyDelta>,
}

impl EncounterSummary {
    /// Summarise a session. Returns `None` while the encounter is ongoing.
    pub fn from_session(session: &BattleSession) -> Option<Self> {
        if !session.is_terminal() {
            return None;
        }

        let player = session.player();
        let opponent = session.opponent_config();
        Some(Self {
            state: session.state(),
            opponent_id: opponent.id.clone(),
            opponent_name: opponent.name.clone(),
            turns: session.turn(),
            player_hp: player.current_hp(),
            player_max_hp: player.max_hp(),
            player_mp: player.current_mp(),
            player_max_mp: player.max_mp(),
            log: session.log().clone(),
            proficiency: session.proficiency_deltas(),
        })
    }

    pub fn is_victory(&self) -> bool {
        self.state == BattleState::Victory
    }
}

/// Computes rewards for a defeated opponent.
pub trait RewardSink {
    fn on_victory(&mut self, opponent_id: &str);
}

/// Stores the player's vitals after the encounter.
pub trait PersistenceSink {
    fn persist_vitals(&mut self, state: BattleState, hp: u32, mp: u32);
}

/// Shows the encounter narrative.
pub trait PresentationSink {
    fn present(&mut self, state: BattleState, log: &BattleLog);
}

/// Advances discipline ranks.
pub trait ProficiencySink {
    fn record_usage(&mut self, deltas: &[ProficiencyDelta]);
}

/// The collaborators a summary is dispatched to.
pub struct OutcomeSinks<'a> {
    pub rewards: &'a mut dyn RewardSink,
    pub persistence: &'a mut dyn PersistenceSink,
    pub presentation: &'a mut dyn PresentationSink,
    pub proficiency: &'a mut dyn ProficiencySink,
}

/// Hand a summary to each collaborator in turn.
///
/// Order: rewards (victory only), persistence, presentation, proficiency
/// (only when something was used).
pub fn dispatch_summary(summary: &EncounterSummary, sinks: &mut OutcomeSinks<'_>) {
    tracing::debug!(
        state = %summary.state,
        opponent = %summary.opponent_id,
        turns = summary.turns,
        "dispatching encounter summary"
    );

    if summary.is_victory() {
        sinks.rewards.on_victory(&summary.opponent_id);
    }
    sinks
        .persistence
        .persist_vitals(summary.state, summary.player_hp, summary.player_mp);
    sinks.presentation.present(summary.state, &summary.log);
    if !summary.proficiency.is_empty() {
        sinks.proficiency.record_usage(&summary.proficiency);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::{Ability, QueuedAction};
    use crate::config::BattleConfig;
    use crate::env::{AbilityCatalog, BattleEnv, SequenceRng};
    use crate::session::{BattleEngine, OpponentConfig, PlayerSheet, start_encounter};
    use crate::stats::{Attributes, StatSnapshot};

    #[derive(Default)]
    struct Recorder {
        calls: Vec<String>,
    }

    impl RewardSink for Recorder {
        fn on_victory(&mut self, opponent_id: &str) {
            self.calls.push(format!("reward:{opponent_id}"));
        }
    }

    impl PersistenceSink for Recorder {
        fn persist_vitals(&mut self, state: BattleState, hp: u32, mp: u32) {
            self.calls.push(format!("persist:{state}:{hp}:{mp}"));
        }
    }

    impl PresentationSink for Recorder {
        fn present(&mut self, _state: BattleState, log: &BattleLog) {
            self.calls.push(format!("present:{}", log.len()));
        }
    }

    impl ProficiencySink for Recorder {
        fn record_usage(&mut self, deltas: &[ProficiencyDelta]) {
            self.calls.push(format!("proficiency:{}", deltas.len()));
        }
    }

    fn won_session() -> BattleSession {
        let catalog = AbilityCatalog::new().with(Ability::default_attack());
        let config = BattleConfig::default();
        let mut rng = SequenceRng::constant(0.99);
        let mut env = BattleEnv::new(&catalog, &mut rng, &config);

        let snapshot = StatSnapshot::from_attributes(Attributes::default());
        let player = PlayerSheet::new("Hero", snapshot, 60, 10);
        let opponent = OpponentConfig::new(
            "rat",
            "Rat",
            StatSnapshot::from_attributes(Attributes::default()),
            1,
            3,
        );
        let mut session = start_encounter(player, opponent, &config);
        BattleEngine::new(&mut session)
            .submit_player_action(&mut env, &[QueuedAction::new(&Ability::default_attack(), 1)])
            .unwrap();
        session
    }

    #[test]
    fn ongoing_session_has_no_summary() {
        let session = start_encounter(
            PlayerSheet::new("Hero", StatSnapshot::default(), 10, 0),
            OpponentConfig::new("rat", "Rat", StatSnapshot::default(), 10, 3),
            &BattleConfig::default(),
        );
        assert!(EncounterSummary::from_session(&session).is_none());
    }

    #[test]
    fn victory_dispatches_to_every_sink_in_order() {
        let session = won_session();
        let summary = EncounterSummary::from_session(&session).unwrap();
        assert!(summary.is_victory());
        assert_eq!(summary.proficiency.len(), 1);
        assert_eq!(summary.proficiency[0].amount, 1);

        let mut rewards = Recorder::default();
        let mut persistence = Recorder::default();
        let mut presentation = Recorder::default();
        let mut proficiency = Recorder::default();
        let mut sinks = OutcomeSinks {
            rewards: &mut rewards,
            persistence: &mut persistence,
            presentation: &mut presentation,
            proficiency: &mut proficiency,
        };
        dispatch_summary(&summary, &mut sinks);

        assert_eq!(rewards.calls, vec!["reward:rat".to_string()]);
        assert_eq!(persistence.calls, vec!["persist:victory:60:10".to_string()]);
        assert_eq!(presentation.calls, vec![format!("present:{}", summary.log.len())]);
        assert_eq!(proficiency.calls, vec!["proficiency:1".to_string()]);
    }

    #[test]
    fn defeat_skips_rewards() {
        let mut summary = EncounterSummary::from_session(&won_session()).unwrap();
        summary.state = BattleState::Defeat;
        summary.proficiency.clear();

        let mut rewards = Recorder::default();
        let mut other = Recorder::default();
        let mut presentation = Recorder::default();
        let mut proficiency = Recorder::default();
        dispatch_summary(
            &summary,
            &mut OutcomeSinks {
                rewards: &mut rewards,
                persistence: &mut other,
                presentation: &mut presentation,
                proficiency: &mut proficiency,
            },
        );

        assert!(rewards.calls.is_empty());
        assert!(proficiency.calls.is_empty());
        assert_eq!(other.calls.len(), 1);
    }
}
