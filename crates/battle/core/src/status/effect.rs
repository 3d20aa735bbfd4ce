//! Status effect catalog.
//!
//! Effects are temporary conditions that modify a combatant's stats, deal or
//! restore HP each turn, absorb damage, or restrict which actions are allowed.
//!
//! # Turn-based Duration
//!
//! Effects store `remaining_duration` in turns. The session decrements every
//! duration by exactly 1 at end-of-turn and removes an effect the instant it
//! reaches 0.

use std::fmt;

use crate::stats::StatKey;

/// Session-unique identifier of an applied effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectId(pub u32);

impl fmt::Display for EffectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "effect#{}", self.0)
    }
}

/// Whether an effect helps or hinders its bearer.
///
/// The kind decides the sign of stat and resistance contributions and which
/// list of a combatant the effect is stored in.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum EffectKind {
    Buff,
    Debuff,
}

/// Source category of an incapacitating effect.
///
/// A combatant carries at most one incapacitate effect per cause.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum IncapacitateCause {
    Stun,
    Sleep,
    Freeze,
    Paralysis,
    Petrify,
}

/// What an effect does.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum EffectType {
    /// Flat adjustment to one snapshot value (`+magnitude` buff, `-magnitude` debuff).
    StatBoost(StatKey),
    /// Deals `magnitude` damage at the start of every turn.
    DamageOverTime,
    /// Restores `magnitude` HP at the start of every turn.
    HealOverTime,
    /// Absorbs up to `magnitude` incoming damage; depletes before HP.
    Shield,
    /// Bearer skips its whole turn.
    Incapacitate(IncapacitateCause),
    /// Bearer cannot use magical abilities.
    Silence,
    /// Scales incoming damage by `magnitude` percent (buff reduces, debuff amplifies).
    ResistanceModifier,
}

impl fmt::Display for EffectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EffectType::StatBoost(key) => write!(f, "stat_boost({key})"),
            EffectType::DamageOverTime => f.write_str("damage_over_time"),
            EffectType::HealOverTime => f.write_str("heal_over_time"),
            EffectType::Shield => f.write_str("shield"),
            EffectType::Incapacitate(cause) => write!(f, "incapacitate({cause})"),
            EffectType::Silence => f.write_str("silence"),
            EffectType::ResistanceModifier => f.write_str("resistance_modifier"),
        }
    }
}

/// A single applied status effect.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffect {
    pub id: EffectId,
    pub kind: EffectKind,
    pub effect_type: EffectType,
    pub magnitude: u32,
    pub remaining_duration: u32,
    /// Display label (e.g. "Poison").
    pub label: String,
    /// Icon key for the presentation layer.
    pub icon: Option<String>,
}

impl StatusEffect {
    /// Contribution of this effect with its kind's sign applied.
    pub fn signed_magnitude(&self) -> i32 {
        let magnitude = i32::try_from(self.magnitude).unwrap_or(i32::MAX);
        match self.kind {
            EffectKind::Buff => magnitude,
            EffectKind::Debuff => -magnitude,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.remaining_duration == 0
    }
}

/// Blueprint for an effect an ability applies; becomes a [`StatusEffect`]
/// once the session assigns it an id.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectTemplate {
    pub kind: EffectKind,
    pub effect_type: EffectType,
    pub magnitude: u32,
    pub duration: u32,
    pub label: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub icon: Option<String>,
}

impl EffectTemplate {
    pub fn new(
        kind: EffectKind,
        effect_type: EffectType,
        magnitude: u32,
        duration: u32,
        label: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            effect_type,
            magnitude,
            duration,
            label: label.into(),
            icon: None,
        }
    }

    pub fn instantiate(&self, id: EffectId) -> StatusEffect {
        StatusEffect {
            id,
            kind: self.kind,
            effect_type: self.effect_type,
            magnitude: self.magnitude,
            remaining_duration: self.duration,
            label: self.label.clone(),
            icon: self.icon.clone(),
        }
    }
}
