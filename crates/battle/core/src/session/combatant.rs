//! Live per-encounter state of one combatant.

use crate::stats::{StatKey, StatSnapshot};
use crate::status::{
    ApplyOutcome, EffectId, EffectKind, EffectType, IncapacitateCause, StatusEffect,
    StatusEffects,
};

/// The two sides of an encounter.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Side {
    Player,
    Opponent,
}

impl Side {
    pub const fn opposite(self) -> Self {
        match self {
            Side::Player => Side::Opponent,
            Side::Opponent => Side::Player,
        }
    }
}

/// HP, MP, action points and active effects of one combatant.
///
/// HP and MP are clamped to `[0, max]` on every mutation; fields are private
/// so the clamp cannot be bypassed.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatantState {
    current_hp: u32,
    max_hp: u32,
    current_mp: u32,
    max_mp: u32,
    action_points: u32,
    max_action_points: u32,
    buffs: StatusEffects,
    debuffs: StatusEffects,
}

impl CombatantState {
    /// Full HP and MP, full action points, no effects.
    pub fn new(max_hp: u32, max_mp: u32, max_action_points: u32) -> Self {
        Self {
            current_hp: max_hp,
            max_hp,
            current_mp: max_mp,
            max_mp,
            action_points: max_action_points,
            max_action_points,
            buffs: StatusEffects::empty(),
            debuffs: StatusEffects::empty(),
        }
    }

    /// Start with the given HP and MP (clamped).
    pub fn with_current(mut self, hp: u32, mp: u32) -> Self {
        self.current_hp = hp.min(self.max_hp);
        self.current_mp = mp.min(self.max_mp);
        self
    }

    pub fn current_hp(&self) -> u32 {
        self.current_hp
    }

    pub fn max_hp(&self) -> u32 {
        self.max_hp
    }

    pub fn current_mp(&self) -> u32 {
        self.current_mp
    }

    pub fn max_mp(&self) -> u32 {
        self.max_mp
    }

    pub fn action_points(&self) -> u32 {
        self.action_points
    }

    pub fn max_action_points(&self) -> u32 {
        self.max_action_points
    }

    pub fn buffs(&self) -> &StatusEffects {
        &self.buffs
    }

    pub fn debuffs(&self) -> &StatusEffects {
        &self.debuffs
    }

    pub fn is_defeated(&self) -> bool {
        self.current_hp == 0
    }

    /// Current HP as a whole percentage of max HP.
    pub fn hp_percent(&self) -> u32 {
        if self.max_hp == 0 {
            return 0;
        }
        let percent = u64::from(self.current_hp) * 100 / u64::from(self.max_hp);
        u32::try_from(percent).unwrap_or(100)
    }

    /// Subtract HP, returning the amount actually lost.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        let lost = amount.min(self.current_hp);
        self.current_hp -= lost;
        lost
    }

    /// Add HP up to max, returning the amount actually restored.
    pub fn heal(&mut self, amount: u32) -> u32 {
        let restored = amount.min(self.max_hp - self.current_hp);
        self.current_hp += restored;
        restored
    }

    /// Spend MP if enough is available.
    pub fn spend_mp(&mut self, amount: u32) -> bool {
        if amount > self.current_mp {
            return false;
        }
        self.current_mp -= amount;
        true
    }

    pub fn restore_mp(&mut self, amount: u32) -> u32 {
        let restored = amount.min(self.max_mp - self.current_mp);
        self.current_mp += restored;
        restored
    }

    /// Spend action points if enough remain.
    pub fn spend_action_points(&mut self, amount: u32) -> bool {
        if amount > self.action_points {
            return false;
        }
        self.action_points -= amount;
        true
    }

    pub fn refresh_action_points(&mut self) {
        self.action_points = self.max_action_points;
    }

    /// Route an effect to the buff or debuff list by its kind.
    ///
    /// Incapacitation always lands in the debuff list whatever its declared
    /// kind, so one cause never has two entries on the same combatant.
    pub fn apply_effect(&mut self, mut effect: StatusEffect) -> ApplyOutcome {
        if matches!(effect.effect_type, EffectType::Incapacitate(_)) {
            effect.kind = EffectKind::Debuff;
        }
        match effect.kind {
            EffectKind::Buff => self.buffs.apply(effect),
            EffectKind::Debuff => self.debuffs.apply(effect),
        }
    }

    pub fn remove_effect(&mut self, id: EffectId) -> Option<StatusEffect> {
        self.buffs.remove(id).or_else(|| self.debuffs.remove(id))
    }

    /// End-of-turn tick of both lists. Returns expired effects, buffs first.
    pub fn tick_effects(&mut self) -> Vec<StatusEffect> {
        let mut expired = self.buffs.tick_durations();
        expired.extend(self.debuffs.tick_durations());
        expired
    }

    pub fn damage_over_time(&self) -> u32 {
        self.buffs
            .damage_over_time()
            .saturating_add(self.debuffs.damage_over_time())
    }

    pub fn heal_over_time(&self) -> u32 {
        self.buffs
            .heal_over_time()
            .saturating_add(self.debuffs.heal_over_time())
    }

    pub fn stat_modifier(&self, key: StatKey) -> i32 {
        self.buffs
            .aggregate_stat_modifier(key)
            .saturating_add(self.debuffs.aggregate_stat_modifier(key))
    }

    pub fn resistance_modifier(&self) -> i32 {
        self.buffs
            .resistance_modifier()
            .saturating_add(self.debuffs.resistance_modifier())
    }

    pub fn incapacitation(&self) -> Option<IncapacitateCause> {
        self.debuffs
            .incapacitation()
            .or_else(|| self.buffs.incapacitation())
    }

    pub fn is_incapacitated(&self) -> bool {
        self.incapacitation().is_some()
    }

    pub fn is_silenced(&self) -> bool {
        self.buffs.is_silenced() || self.debuffs.is_silenced()
    }

    /// Absorb incoming damage with shields (buff list first). Returns the
    /// damage left for HP.
    pub fn absorb_with_shields(&mut self, incoming: u32) -> u32 {
        let remaining = self.buffs.absorb_with_shields(incoming);
        self.debuffs.absorb_with_shields(remaining)
    }

    /// `base` adjusted by the aggregate stat modifiers of all active effects.
    pub fn effective_snapshot(&self, base: &StatSnapshot) -> StatSnapshot {
        base.with_adjustments(|key| self.stat_modifier(key))
    }
}
