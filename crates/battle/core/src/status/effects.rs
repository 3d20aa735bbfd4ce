//! Effect lists and the operations the session runs over them.
//!
//! A combatant owns two [`StatusEffects`] lists, one for buffs and one for
//! debuffs. Every query here works on a single list; the combatant combines
//! both.

use super::effect::{EffectId, EffectType, IncapacitateCause, StatusEffect};
use super::shield::apply_damage_to_shield;
use crate::stats::StatKey;

/// Result of [`StatusEffects::apply`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// Effect was appended as a new independent entry.
    Added(EffectId),
    /// An incapacitate of the same cause was already present; its duration
    /// was extended instead of adding a second entry.
    Refreshed(EffectId),
    /// Effect had no duration left and was discarded.
    Ignored,
}

/// Ordered list of active effects.
///
/// Entries are kept in application order. Same-type effects stack
/// additively; the only exception is incapacitation, which is limited to one
/// entry per cause.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffects {
    effects: Vec<StatusEffect>,
}

impl StatusEffects {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Adds an effect.
    ///
    /// Stat boosts, over-time effects, shields, silences and resistance
    /// modifiers from independent sources coexist. An incapacitate whose cause
    /// is already present keeps the existing entry and takes the longer of the
    /// two durations.
    pub fn apply(&mut self, effect: StatusEffect) -> ApplyOutcome {
        if effect.is_expired() {
            return ApplyOutcome::Ignored;
        }

        if let EffectType::Incapacitate(cause) = effect.effect_type {
            if let Some(existing) = self.incapacitation_mut(cause) {
                existing.remaining_duration =
                    existing.remaining_duration.max(effect.remaining_duration);
                existing.magnitude = existing.magnitude.max(effect.magnitude);
                return ApplyOutcome::Refreshed(existing.id);
            }
        }

        let id = effect.id;
        self.effects.push(effect);
        ApplyOutcome::Added(id)
    }

    /// Removes an effect by id, returning it if it was present.
    pub fn remove(&mut self, id: EffectId) -> Option<StatusEffect> {
        let index = self.effects.iter().position(|e| e.id == id)?;
        Some(self.effects.remove(index))
    }

    /// Decrements every remaining duration by 1 and drops entries that reach 0.
    ///
    /// Returns the dropped entries in list order. The session calls this
    /// exactly once per turn, at end-of-turn.
    pub fn tick_durations(&mut self) -> Vec<StatusEffect> {
        let mut expired = Vec::new();
        self.effects.retain_mut(|effect| {
            effect.remaining_duration = effect.remaining_duration.saturating_sub(1);
            if effect.is_expired() {
                expired.push(effect.clone());
                false
            } else {
                true
            }
        });
        expired
    }

    /// Sum of all damage-over-time magnitudes.
    pub fn damage_over_time(&self) -> u32 {
        self.sum_magnitudes(EffectType::DamageOverTime)
    }

    /// Sum of all heal-over-time magnitudes.
    pub fn heal_over_time(&self) -> u32 {
        self.sum_magnitudes(EffectType::HealOverTime)
    }

    /// Net contribution to one stat (buffs positive, debuffs negative).
    pub fn aggregate_stat_modifier(&self, key: StatKey) -> i32 {
        self.effects
            .iter()
            .filter(|e| e.effect_type == EffectType::StatBoost(key))
            .map(StatusEffect::signed_magnitude)
            .fold(0i32, i32::saturating_add)
    }

    /// Net incoming-damage resistance in percent (buffs positive).
    pub fn resistance_modifier(&self) -> i32 {
        self.effects
            .iter()
            .filter(|e| e.effect_type == EffectType::ResistanceModifier)
            .map(StatusEffect::signed_magnitude)
            .fold(0i32, i32::saturating_add)
    }

    pub fn is_incapacitated(&self) -> bool {
        self.incapacitation().is_some()
    }

    /// First incapacitating cause in application order.
    pub fn incapacitation(&self) -> Option<IncapacitateCause> {
        self.effects.iter().find_map(|e| match e.effect_type {
            EffectType::Incapacitate(cause) => Some(cause),
            _ => None,
        })
    }

    pub fn is_silenced(&self) -> bool {
        self.effects
            .iter()
            .any(|e| e.effect_type == EffectType::Silence)
    }

    /// Routes `incoming` damage through every shield in application order.
    ///
    /// Each shield's magnitude is reduced by what it absorbed. Depleted shields
    /// stay in the list until their duration runs out. Returns the damage left
    /// over for HP.
    pub fn absorb_with_shields(&mut self, incoming: u32) -> u32 {
        let mut remaining = incoming;
        for shield in self
            .effects
            .iter_mut()
            .filter(|e| e.effect_type == EffectType::Shield)
        {
            if remaining == 0 {
                break;
            }
            let absorption = apply_damage_to_shield(shield.magnitude, remaining);
            shield.magnitude = absorption.shield;
            remaining = absorption.passthrough;
        }
        remaining
    }

    /// Total magnitude still available across all shields.
    pub fn shield_total(&self) -> u32 {
        self.sum_magnitudes(EffectType::Shield)
    }

    pub fn get(&self, id: EffectId) -> Option<&StatusEffect> {
        self.effects.iter().find(|e| e.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &StatusEffect> {
        self.effects.iter()
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    fn sum_magnitudes(&self, effect_type: EffectType) -> u32 {
        self.effects
            .iter()
            .filter(|e| e.effect_type == effect_type)
            .map(|e| e.magnitude)
            .fold(0u32, u32::saturating_add)
    }

    fn incapacitation_mut(&mut self, cause: IncapacitateCause) -> Option<&mut StatusEffect> {
        self.effects
            .iter_mut()
            .find(|e| e.effect_type == EffectType::Incapacitate(cause))
    }
}

impl FromIterator<StatusEffect> for StatusEffects {
    fn from_iter<I: IntoIterator<Item = StatusEffect>>(iter: I) -> Self {
        let mut effects = Self::empty();
        for effect in iter {
            effects.apply(effect);
        }
        effects
    }
}
