//! Encounter setup and the session value.

use std::collections::BTreeMap;

use crate::action::{Ability, AbilityCategory, AbilityId, ActionWeights, MonsterAbility};
use crate::combat::DamageFormula;
use crate::config::BattleConfig;
use crate::env::Alignment;
use crate::outcome::ProficiencyDelta;
use crate::stats::{Discipline, StatSnapshot};
use crate::status::EffectId;

use super::combatant::{CombatantState, Side};
use super::log::BattleLog;

/// Encounter lifecycle. Every state but `Ongoing` is terminal.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum BattleState {
    #[default]
    Ongoing,
    Victory,
    Defeat,
    Fled,
}

impl BattleState {
    pub const fn is_terminal(self) -> bool {
        !matches!(self, BattleState::Ongoing)
    }
}

/// Monster or duel rival.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum OpponentKind {
    #[default]
    Monster,
    /// Another character; resolves damage with the player formulas.
    DuelRival,
}

impl OpponentKind {
    pub const fn damage_formula(self) -> DamageFormula {
        match self {
            OpponentKind::Monster => DamageFormula::Monster,
            OpponentKind::DuelRival => DamageFormula::Combatant,
        }
    }
}

/// Opening behavior of an opponent.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Behavior {
    /// Strikes once before the player's first turn.
    Aggressive,
    #[default]
    Passive,
}

/// The player's side of an encounter, as supplied by the caller.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerSheet {
    pub name: String,
    pub snapshot: StatSnapshot,
    pub max_hp: u32,
    pub current_hp: u32,
    pub max_mp: u32,
    pub current_mp: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub alignment: Alignment,
}

impl PlayerSheet {
    /// Sheet at full HP and MP.
    pub fn new(name: impl Into<String>, snapshot: StatSnapshot, max_hp: u32, max_mp: u32) -> Self {
        Self {
            name: name.into(),
            snapshot,
            max_hp,
            current_hp: max_hp,
            max_mp,
            current_mp: max_mp,
            alignment: Alignment::Neutral,
        }
    }

    pub fn with_current(mut self, hp: u32, mp: u32) -> Self {
        self.current_hp = hp;
        self.current_mp = mp;
        self
    }

    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }
}

/// Opponent definition: stats, repertoire and behavior.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OpponentConfig {
    pub id: String,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub kind: OpponentKind,
    #[cfg_attr(feature = "serde", serde(default))]
    pub behavior: Behavior,
    pub snapshot: StatSnapshot,
    pub max_hp: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub max_mp: u32,
    pub max_action_points: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub abilities: Vec<MonsterAbility>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub action_weights: ActionWeights,
    #[cfg_attr(feature = "serde", serde(default))]
    pub alignment: Alignment,
}

impl OpponentConfig {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        snapshot: StatSnapshot,
        max_hp: u32,
        max_action_points: u32,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind: OpponentKind::Monster,
            behavior: Behavior::Passive,
            snapshot,
            max_hp,
            max_mp: 0,
            max_action_points,
            abilities: Vec::new(),
            action_weights: ActionWeights::default(),
            alignment: Alignment::Neutral,
        }
    }

    pub fn with_kind(mut self, kind: OpponentKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_behavior(mut self, behavior: Behavior) -> Self {
        self.behavior = behavior;
        self
    }

    pub fn with_mp(mut self, max_mp: u32) -> Self {
        self.max_mp = max_mp;
        self
    }

    pub fn with_ability(mut self, ability: MonsterAbility) -> Self {
        self.abilities.push(ability);
        self
    }

    pub fn with_action_weights(mut self, weights: ActionWeights) -> Self {
        self.action_weights = weights;
        self
    }

    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    /// The ability used for a preemptive strike: the first configured basic
    /// attack, or the built-in default.
    pub fn opening_attack(&self) -> (Ability, u32) {
        self.abilities
            .iter()
            .find(|a| a.category == AbilityCategory::BasicAttack)
            .map(|a| (a.ability.clone(), a.level))
            .unwrap_or_else(|| (Ability::default_attack(), 1))
    }

    /// Look up a repertoire ability by id, falling back to the built-in
    /// default attack for its reserved id.
    pub(crate) fn find_ability(&self, id: &AbilityId) -> Option<Ability> {
        self.abilities
            .iter()
            .find(|a| &a.ability.id == id)
            .map(|a| a.ability.clone())
            .or_else(|| (id.as_str() == AbilityId::BASIC_ATTACK).then(Ability::default_attack))
    }
}

/// One encounter between the player and a single opponent.
///
/// Owned by the caller and passed explicitly to every operation through
/// [`super::BattleEngine`]. Fields are read through accessors; only the
/// engine mutates them.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleSession {
    pub(super) state: BattleState,
    pub(super) turn: u32,
    pub(super) player: CombatantState,
    pub(super) opponent: CombatantState,
    pub(super) player_sheet: PlayerSheet,
    pub(super) opponent_config: OpponentConfig,
    pub(super) is_preemptive_phase: bool,
    pub(super) opponent_acts_first: bool,
    pub(super) log: BattleLog,
    pub(super) next_effect_id: u32,
    /// Turn whose end-of-turn tick already ran.
    pub(super) last_ticked_turn: Option<u32>,
    pub(super) proficiency_usage: BTreeMap<Discipline, u32>,
}

impl BattleSession {
    pub fn state(&self) -> BattleState {
        self.state
    }

    pub fn is_terminal(&self) -> bool {
        self.state.is_terminal()
    }

    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn player(&self) -> &CombatantState {
        &self.player
    }

    pub fn opponent(&self) -> &CombatantState {
        &self.opponent
    }

    pub fn combatant(&self, side: Side) -> &CombatantState {
        match side {
            Side::Player => &self.player,
            Side::Opponent => &self.opponent,
        }
    }

    pub fn player_sheet(&self) -> &PlayerSheet {
        &self.player_sheet
    }

    pub fn opponent_config(&self) -> &OpponentConfig {
        &self.opponent_config
    }

    pub fn is_preemptive_phase(&self) -> bool {
        self.is_preemptive_phase
    }

    pub fn opponent_acts_first(&self) -> bool {
        self.opponent_acts_first
    }

    pub fn log(&self) -> &BattleLog {
        &self.log
    }

    /// Number of times the player used each discipline.
    pub fn proficiency_usage(&self) -> &BTreeMap<Discipline, u32> {
        &self.proficiency_usage
    }

    /// Usage counts as progression deltas, in discipline order.
    pub fn proficiency_deltas(&self) -> Vec<ProficiencyDelta> {
        self.proficiency_usage
            .iter()
            .map(|(&discipline, &amount)| ProficiencyDelta { discipline, amount })
            .collect()
    }

    pub(super) fn combatant_mut(&mut self, side: Side) -> &mut CombatantState {
        match side {
            Side::Player => &mut self.player,
            Side::Opponent => &mut self.opponent,
        }
    }

    pub(super) fn allocate_effect_id(&mut self) -> EffectId {
        let id = EffectId(self.next_effect_id);
        self.next_effect_id = self.next_effect_id.wrapping_add(1);
        id
    }
}

/// Create a session for a new encounter.
///
/// The player starts with the configured action points and the sheet's
/// current HP/MP; the opponent starts full. An aggressive opponent gets a
/// pending preemptive strike, resolved by the first engine operation.
pub fn start_encounter(
    player: PlayerSheet,
    opponent: OpponentConfig,
    config: &BattleConfig,
) -> BattleSession {
    let player_state =
        CombatantState::new(player.max_hp, player.max_mp, config.player_action_points)
            .with_current(player.current_hp, player.current_mp);
    let opponent_state =
        CombatantState::new(opponent.max_hp, opponent.max_mp, opponent.max_action_points);
    let aggressive = opponent.behavior == Behavior::Aggressive;

    tracing::info!(
        opponent = %opponent.id,
        kind = %opponent.kind,
        aggressive,
        "encounter started"
    );

    BattleSession {
        state: BattleState::Ongoing,
        turn: 1,
        player: player_state,
        opponent: opponent_state,
        player_sheet: player,
        opponent_config: opponent,
        is_preemptive_phase: aggressive,
        opponent_acts_first: aggressive,
        log: BattleLog::new(),
        next_effect_id: 1,
        last_ticked_turn: None,
        proficiency_usage: BTreeMap::new(),
    }
}
