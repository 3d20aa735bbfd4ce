//! Inputs the engine reads but never owns.
//!
//! Ability definitions, the random source, world conditions and balance
//! configuration are supplied by the caller for every operation. The
//! [`BattleEnv`] aggregate bundles them so the engine has no hard coupling to
//! concrete implementations.

mod abilities;
mod context;
mod rng;

pub use abilities::{AbilityCatalog, AbilityOracle};
pub use context::{Alignment, DayOfWeek, ResolutionContext, TimeOfDay, Weather};
pub use rng::{BattleRng, PcgRng, SequenceRng};

use crate::config::BattleConfig;

/// Everything an engine operation needs besides the session itself.
pub struct BattleEnv<'a> {
    pub abilities: &'a dyn AbilityOracle,
    pub rng: &'a mut dyn BattleRng,
    pub context: ResolutionContext,
    pub config: &'a BattleConfig,
}

impl<'a> BattleEnv<'a> {
    pub fn new(
        abilities: &'a dyn AbilityOracle,
        rng: &'a mut dyn BattleRng,
        config: &'a BattleConfig,
    ) -> Self {
        Self {
            abilities,
            rng,
            context: ResolutionContext::default(),
            config,
        }
    }

    pub fn with_context(mut self, context: ResolutionContext) -> Self {
        self.context = context;
        self
    }
}
