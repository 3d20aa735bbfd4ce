//! Turn sequencing.
//!
//! The [`BattleEngine`] is the only writer of a [`BattleSession`]. Each
//! operation validates its input first and returns an error without touching
//! the session, or runs to completion and returns a [`TurnReport`] with the
//! log entries it appended.
//!
//! One exchange runs these phases in order:
//!
//! ```text
//! pending preemptive strike (turn 0, once)
//!   → start-of-turn upkeep (HoT − DoT for both sides)
//!   → player actions (or flee attempt)
//!   → opponent actions
//!   → end-of-turn effect tick for both sides, turn += 1
//! ```
//!
//! A terminal transition stops the exchange at the phase that caused it.

use crate::action::{
    Ability, AbilityEffect, AiContext, QueueBudget, QueuedAction, select_monster_actions,
    validate_queue,
};
use crate::combat::{
    AttackKind, AttackProfile, DamageFormula, apply_resistance, heal_amount, resolve_attack,
    resolve_hit, scaled_power,
};
use crate::config::BattleConfig;
use crate::env::{Alignment, BattleEnv};
use crate::stats::StatSnapshot;
use crate::status::{ApplyOutcome, EffectKind, EffectTemplate, IncapacitateCause};

use super::combatant::Side;
use super::errors::{InvalidAction, SessionError};
use super::log::{LogAction, LogActor, LogEntry};
use super::setup::{BattleSession, BattleState};

/// Result of one engine operation.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnReport {
    /// Turn counter when the operation started.
    pub turn: u32,
    /// Session state after the operation.
    pub state: BattleState,
    /// Log entries appended by the operation, in order.
    pub entries: Vec<LogEntry>,
}

/// What the player does during an exchange.
#[derive(Clone, Copy, Debug)]
enum PlayerTurn<'q> {
    Queue(&'q [QueuedAction]),
    Flee,
    Idle,
}

/// Battle engine that sequences turns over a borrowed session.
pub struct BattleEngine<'a> {
    session: &'a mut BattleSession,
}

impl<'a> BattleEngine<'a> {
    pub fn new(session: &'a mut BattleSession) -> Self {
        Self { session }
    }

    pub fn session(&self) -> &BattleSession {
        self.session
    }

    /// Resolve one exchange with the player's queued actions.
    ///
    /// The queue is validated against the player's full action-point budget,
    /// current MP and silence before anything happens. A rejected entry fails
    /// the whole call with [`SessionError::InvalidAction`].
    pub fn submit_player_action(
        &mut self,
        env: &mut BattleEnv<'_>,
        queue: &[QueuedAction],
    ) -> Result<TurnReport, SessionError> {
        self.ensure_ongoing()?;

        let player = &self.session.player;
        let budget = QueueBudget {
            action_points: player.max_action_points(),
            mana: player.current_mp(),
            silenced: player.is_silenced(),
        };
        let validation = validate_queue(queue, &budget, env.abilities);
        if let Some((index, reason)) = validation.first_rejection() {
            tracing::debug!(index, %reason, "player queue rejected");
            return Err(InvalidAction {
                index,
                reason: reason.clone(),
            }
            .into());
        }

        let mark = self.mark();
        if !self.resolve_preemptive(env) {
            self.run_exchange(env, PlayerTurn::Queue(queue));
        }
        Ok(self.report(mark))
    }

    /// Advance the encounter without player input.
    ///
    /// Resolves a pending preemptive strike on its own; otherwise runs an
    /// exchange in which the player does nothing.
    pub fn tick(&mut self, env: &mut BattleEnv<'_>) -> Result<TurnReport, SessionError> {
        self.ensure_ongoing()?;

        let mark = self.mark();
        if self.session.is_preemptive_phase {
            self.resolve_preemptive(env);
        } else {
            self.run_exchange(env, PlayerTurn::Idle);
        }
        Ok(self.report(mark))
    }

    /// Spend the player's turn on an escape attempt.
    ///
    /// Succeeds with the configured chance and ends the encounter as
    /// [`BattleState::Fled`]. On failure the opponent acts as usual.
    pub fn attempt_flee(&mut self, env: &mut BattleEnv<'_>) -> Result<TurnReport, SessionError> {
        self.ensure_ongoing()?;
        if let Some(cause) = self.session.player.incapacitation() {
            return Err(SessionError::Incapacitated { cause });
        }

        let mark = self.mark();
        if !self.resolve_preemptive(env) {
            self.run_exchange(env, PlayerTurn::Flee);
        }
        Ok(self.report(mark))
    }

    // ========================================================================
    // Phases
    // ========================================================================

    /// Returns true if the encounter ended.
    fn resolve_preemptive(&mut self, env: &mut BattleEnv<'_>) -> bool {
        if !self.session.is_preemptive_phase {
            return false;
        }

        let (mut ability, mut level) = self.session.opponent_config.opening_attack();
        if !self.session.opponent.spend_mp(ability.mp_cost) {
            ability = Ability::default_attack();
            level = 1;
        }

        tracing::debug!(ability = %ability.id, "resolving preemptive strike");
        self.perform(env, Side::Opponent, &ability, level, BattleConfig::PREEMPTIVE_TURN);
        self.session.is_preemptive_phase = false;

        self.check_terminal()
    }

    fn run_exchange(&mut self, env: &mut BattleEnv<'_>, intent: PlayerTurn<'_>) {
        if self.upkeep() {
            return;
        }

        self.session.player.refresh_action_points();
        let ended = match intent {
            PlayerTurn::Queue(queue) => self.player_phase(env, queue),
            PlayerTurn::Flee => self.flee_phase(env),
            PlayerTurn::Idle => false,
        };
        if ended || self.opponent_phase(env) {
            return;
        }

        self.end_of_turn();
    }

    /// Start-of-turn over-time resolution. Returns true if the encounter ended.
    fn upkeep(&mut self) -> bool {
        let turn = self.session.turn;
        for side in [Side::Player, Side::Opponent] {
            let name = self.name(side);
            let state = self.session.combatant_mut(side);
            let damage = state.damage_over_time();
            let healing = state.heal_over_time();

            if healing >= damage {
                state.heal(healing - damage);
            } else {
                state.take_damage(damage - healing);
            }

            if healing > 0 {
                self.push(
                    turn,
                    LogActor::System,
                    LogAction::HealOverTime { target: side },
                    Some(healing),
                    format!("{name} regenerates {healing} HP"),
                );
            }
            if damage > 0 {
                self.push(
                    turn,
                    LogActor::System,
                    LogAction::DamageOverTime { target: side },
                    Some(damage),
                    format!("{name} suffers {damage} damage over time"),
                );
            }
        }
        self.check_terminal()
    }

    /// Returns true if the encounter ended.
    fn player_phase(&mut self, env: &mut BattleEnv<'_>, queue: &[QueuedAction]) -> bool {
        let turn = self.session.turn;
        if let Some(cause) = self.session.player.incapacitation() {
            self.log_skipped(turn, Side::Player, cause);
            return false;
        }

        for action in queue {
            let Some(ability) = env.abilities.ability(&action.ability_id).cloned() else {
                continue;
            };
            if !self.try_pay(Side::Player, &ability, turn) {
                continue;
            }

            *self
                .session
                .proficiency_usage
                .entry(ability.discipline)
                .or_insert(0) += 1;

            self.perform(env, Side::Player, &ability, action.level, turn);
            if self.check_terminal() {
                return true;
            }
        }
        false
    }

    /// Returns true if the player escaped.
    fn flee_phase(&mut self, env: &mut BattleEnv<'_>) -> bool {
        let turn = self.session.turn;
        if let Some(cause) = self.session.player.incapacitation() {
            self.log_skipped(turn, Side::Player, cause);
            return false;
        }

        let success = env
            .rng
            .chance(f64::from(env.config.flee_chance_percent));
        let name = self.name(Side::Player);
        let message = if success {
            format!("{name} escapes")
        } else {
            format!("{name} fails to escape")
        };
        self.push(
            turn,
            LogActor::Player,
            LogAction::Flee { success },
            None,
            message,
        );

        if success {
            self.transition(BattleState::Fled);
        }
        success
    }

    /// Returns true if the encounter ended.
    fn opponent_phase(&mut self, env: &mut BattleEnv<'_>) -> bool {
        let turn = self.session.turn;
        if let Some(cause) = self.session.opponent.incapacitation() {
            self.log_skipped(turn, Side::Opponent, cause);
            return false;
        }

        self.session.opponent.refresh_action_points();
        let plan = {
            let opponent = &self.session.opponent;
            let ctx = AiContext {
                abilities: &self.session.opponent_config.abilities,
                weights: self.session.opponent_config.action_weights,
                hp: opponent.current_hp(),
                max_hp: opponent.max_hp(),
                turn,
                action_points: opponent.action_points(),
                mana: opponent.current_mp(),
                silenced: opponent.is_silenced(),
            };
            select_monster_actions(&ctx, &mut *env.rng)
        };

        for action in &plan.actions {
            let Some(ability) = self.session.opponent_config.find_ability(&action.ability_id)
            else {
                tracing::warn!(ability = %action.ability_id, "planned ability not in repertoire");
                continue;
            };
            if !self.try_pay(Side::Opponent, &ability, turn) {
                continue;
            }

            self.perform(env, Side::Opponent, &ability, action.level, turn);
            if self.check_terminal() {
                return true;
            }
        }
        false
    }

    fn end_of_turn(&mut self) {
        let turn = self.session.turn;
        if self.session.last_ticked_turn == Some(turn) {
            return;
        }

        for side in [Side::Player, Side::Opponent] {
            let expired = self.session.combatant_mut(side).tick_effects();
            let name = self.name(side);
            for effect in expired {
                self.push(
                    turn,
                    LogActor::System,
                    LogAction::EffectExpired {
                        target: side,
                        effect: effect.id,
                    },
                    None,
                    format!("{} on {name} wore off", effect.label),
                );
            }
        }

        self.session.last_ticked_turn = Some(turn);
        self.session.turn += 1;
    }

    // ========================================================================
    // Action resolution
    // ========================================================================

    /// Pay AP and MP for `ability`, logging a fizzle if it can no longer be
    /// afforded or cast.
    fn try_pay(&mut self, side: Side, ability: &Ability, turn: u32) -> bool {
        let state = self.session.combatant_mut(side);
        let castable = !(ability.is_magical() && state.is_silenced())
            && ability.ap_cost <= state.action_points()
            && ability.mp_cost <= state.current_mp();

        if castable {
            state.spend_action_points(ability.ap_cost);
            state.spend_mp(ability.mp_cost);
            return true;
        }

        let name = self.name(side);
        self.push(
            turn,
            side.into(),
            LogAction::Fizzled {
                ability: ability.id.clone(),
            },
            None,
            format!("{name} cannot perform {}", ability.name),
        );
        false
    }

    /// Resolve one ability and append exactly one log entry for it.
    fn perform(
        &mut self,
        env: &mut BattleEnv<'_>,
        actor: Side,
        ability: &Ability,
        level: u32,
        log_turn: u32,
    ) {
        let target = actor.opposite();
        let attacker = self.effective_snapshot(actor);
        let defender = self.effective_snapshot(target);
        let base_amount = scaled_power(ability.power, level);
        let actor_name = self.name(actor);
        let target_name = self.name(target);

        let (outcome, amount, mut message) = match ability.effect {
            AbilityEffect::Attack => {
                let profile = AttackProfile {
                    base_amount,
                    discipline: ability.discipline,
                    formula: self.formula(actor),
                    alignment: self.alignment(actor),
                };
                let result =
                    resolve_attack(&attacker, &defender, &profile, &env.context, &mut *env.rng);

                match result.damage {
                    Some(raw) => {
                        let bearer = self.session.combatant_mut(target);
                        let scaled = apply_resistance(
                            raw,
                            bearer.resistance_modifier(),
                            profile.formula.minimum(),
                        );
                        let passthrough = bearer.absorb_with_shields(scaled);
                        let dealt = bearer.take_damage(passthrough);

                        let mut message = format!(
                            "{actor_name} uses {} on {target_name}: {}, {dealt} damage",
                            ability.name, result.outcome
                        );
                        if scaled > passthrough {
                            message.push_str(&format!(" ({} absorbed)", scaled - passthrough));
                        }
                        if let Some(note) = self.inflict(ability.applies.as_ref(), target) {
                            message.push_str(&note);
                        }
                        (Some(result.outcome), Some(dealt), message)
                    }
                    None => (
                        Some(result.outcome),
                        None,
                        format!(
                            "{actor_name} uses {} on {target_name}: {}",
                            ability.name, result.outcome
                        ),
                    ),
                }
            }
            AbilityEffect::Heal => {
                let restored = self
                    .session
                    .combatant_mut(actor)
                    .heal(heal_amount(&attacker, base_amount));
                let mut message =
                    format!("{actor_name} uses {} and recovers {restored} HP", ability.name);
                if let Some(note) = self.inflict(ability.applies.as_ref(), actor) {
                    message.push_str(&note);
                }
                (None, Some(restored), message)
            }
            AbilityEffect::Buff => {
                let mut message = format!("{actor_name} uses {}", ability.name);
                if let Some(note) = self.inflict(ability.applies.as_ref(), actor) {
                    message.push_str(&note);
                }
                (None, None, message)
            }
            AbilityEffect::Curse => {
                let kind = AttackKind::from(ability.discipline);
                let resolution = resolve_hit(&attacker, &defender, kind, &mut *env.rng);
                let mut message = format!(
                    "{actor_name} uses {} on {target_name}: {}",
                    ability.name, resolution.outcome
                );
                if resolution.outcome.lands() {
                    if let Some(note) = self.inflict(ability.applies.as_ref(), target) {
                        message.push_str(&note);
                    }
                }
                (Some(resolution.outcome), None, message)
            }
        };

        if log_turn == BattleConfig::PREEMPTIVE_TURN {
            message.insert_str(0, "Ambush! ");
        }

        tracing::debug!(
            actor = %actor,
            ability = %ability.id,
            outcome = ?outcome,
            amount = ?amount,
            "action resolved"
        );

        self.push(
            log_turn,
            actor.into(),
            LogAction::Ability {
                ability: ability.id.clone(),
                outcome,
            },
            amount,
            message,
        );
    }

    /// Apply an effect template to `bearer`. Returns a message fragment.
    fn inflict(&mut self, template: Option<&EffectTemplate>, bearer: Side) -> Option<String> {
        let template = template?;
        let id = self.session.allocate_effect_id();
        let name = self.name(bearer);

        match self
            .session
            .combatant_mut(bearer)
            .apply_effect(template.instantiate(id))
        {
            ApplyOutcome::Added(_) => Some(match template.kind {
                EffectKind::Buff => format!("; {name} gains {}", template.label),
                EffectKind::Debuff => format!("; {name} is afflicted with {}", template.label),
            }),
            ApplyOutcome::Refreshed(_) => {
                Some(format!("; {} on {name} is extended", template.label))
            }
            ApplyOutcome::Ignored => None,
        }
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    fn ensure_ongoing(&self) -> Result<(), SessionError> {
        if self.session.state.is_terminal() {
            tracing::debug!(state = %self.session.state, "operation on finished encounter");
            return Err(SessionError::IllegalTransition {
                state: self.session.state,
            });
        }
        Ok(())
    }

    /// Transition to a terminal state if either side is down. Player defeat
    /// takes precedence. Returns true if the encounter is over.
    fn check_terminal(&mut self) -> bool {
        if self.session.state.is_terminal() {
            return true;
        }
        if self.session.player.is_defeated() {
            self.transition(BattleState::Defeat);
        } else if self.session.opponent.is_defeated() {
            self.transition(BattleState::Victory);
        }
        self.session.state.is_terminal()
    }

    fn transition(&mut self, state: BattleState) {
        self.session.state = state;
        let turn = self.session.turn;
        tracing::info!(
            %state,
            turn,
            opponent = %self.session.opponent_config.id,
            "encounter ended"
        );

        let message = match state {
            BattleState::Victory => format!("{} is defeated", self.name(Side::Opponent)),
            BattleState::Defeat => format!("{} falls", self.name(Side::Player)),
            BattleState::Fled => format!("{} fled the battle", self.name(Side::Player)),
            BattleState::Ongoing => String::new(),
        };
        self.push(turn, LogActor::System, LogAction::Outcome(state), None, message);
    }

    fn log_skipped(&mut self, turn: u32, side: Side, cause: IncapacitateCause) {
        let name = self.name(side);
        self.push(
            turn,
            side.into(),
            LogAction::Skipped { cause },
            None,
            format!("{name} is unable to act ({cause})"),
        );
    }

    fn push(
        &mut self,
        turn: u32,
        actor: LogActor,
        action: LogAction,
        amount: Option<u32>,
        message: String,
    ) {
        self.session.log.push(LogEntry {
            turn,
            actor,
            action,
            amount,
            message,
        });
    }

    fn mark(&self) -> (u32, usize) {
        (self.session.turn, self.session.log.len())
    }

    fn report(&self, (turn, index): (u32, usize)) -> TurnReport {
        TurnReport {
            turn,
            state: self.session.state,
            entries: self.session.log.since(index).to_vec(),
        }
    }

    fn name(&self, side: Side) -> String {
        match side {
            Side::Player => self.session.player_sheet.name.clone(),
            Side::Opponent => self.session.opponent_config.name.clone(),
        }
    }

    fn formula(&self, side: Side) -> DamageFormula {
        match side {
            Side::Player => DamageFormula::Combatant,
            Side::Opponent => self.session.opponent_config.kind.damage_formula(),
        }
    }

    fn alignment(&self, side: Side) -> Alignment {
        match side {
            Side::Player => self.session.player_sheet.alignment,
            Side::Opponent => self.session.opponent_config.alignment,
        }
    }

    fn effective_snapshot(&self, side: Side) -> StatSnapshot {
        let base = match side {
            Side::Player => &self.session.player_sheet.snapshot,
            Side::Opponent => &self.session.opponent_config.snapshot,
        };
        self.session.combatant(side).effective_snapshot(base)
    }
}
