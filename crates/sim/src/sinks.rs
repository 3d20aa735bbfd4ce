//! Outbound collaborators that report through `tracing`.
use battle_core::{
    BattleLog, BattleState, PersistenceSink, PresentationSink, ProficiencyDelta, ProficiencySink,
    RewardSink,
};

/// Logs every dispatched result instead of acting on it.
#[derive(Debug, Default)]
pub struct LoggingSinks;

impl RewardSink for LoggingSinks {
    fn on_victory(&mut self, opponent_id: &str) {
        tracing::info!(opponent = opponent_id, "reward granted");
    }
}

impl PersistenceSink for LoggingSinks {
    fn persist_vitals(&mut self, state: BattleState, hp: u32, mp: u32) {
        tracing::info!(%state, hp, mp, "player vitals persisted");
    }
}

impl PresentationSink for LoggingSinks {
    fn present(&mut self, state: BattleState, log: &BattleLog) {
        tracing::info!(%state, entries = log.len(), "encounter log presented");
    }
}

impl ProficiencySink for LoggingSinks {
    fn record_usage(&mut self, deltas: &[ProficiencyDelta]) {
        for delta in deltas {
            tracing::info!(
                discipline = %delta.discipline,
                amount = delta.amount,
                "proficiency gained"
            );
        }
    }
}
