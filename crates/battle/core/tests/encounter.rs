//! End-to-end encounter scenarios driven through `BattleEngine`.

use battle_core::action::{AiContext, select_monster_actions};
use battle_core::combat::{AttackKind, critical_chance};
use battle_core::stats::proficiency_multiplier;
use battle_core::{
    Ability, AbilityCatalog, AbilityCategory, AbilityEffect, AbilityId, ActionWeights, Attributes,
    BattleConfig, BattleEngine, BattleEnv, BattleSession, BattleState, Behavior, Discipline,
    EffectKind, EffectTemplate, EffectType, GearStats, LogAction, LogActor, MonsterAbility,
    OpponentConfig, OpponentKind, PcgRng, PlayerSheet, QueuedAction, SequenceRng, SessionError,
    SnapshotBuilder, StatKey, StatSnapshot, WeaponType, start_encounter,
};

/// Fails every percentage roll, then pins variance to 1.0.
fn forced_hit() -> SequenceRng {
    SequenceRng::new([0.99, 0.99, 0.99, 0.99, 0.5])
}

fn slash() -> Ability {
    Ability {
        id: AbilityId::new("slash"),
        name: "Slash".into(),
        discipline: Discipline::Weapon(WeaponType::Sword),
        power: 10,
        ap_cost: 3,
        mp_cost: 0,
        effect: AbilityEffect::Attack,
        applies: None,
    }
}

fn catalog() -> AbilityCatalog {
    AbilityCatalog::new()
        .with(Ability::default_attack())
        .with(slash())
}

fn hero() -> PlayerSheet {
    let snapshot = SnapshotBuilder::from_attributes(Attributes::new(14, 10, 10, 10, 10, 10, 10))
        .with_rank(Discipline::Weapon(WeaponType::Sword), 40)
        .build();
    PlayerSheet::new("Hero", snapshot, 120, 20)
}

fn goblin(behavior: Behavior, max_hp: u32) -> OpponentConfig {
    let snapshot = SnapshotBuilder::from_attributes(Attributes::default())
        .with_gear(GearStats::new(8, 5))
        .build();
    OpponentConfig::new("goblin", "Goblin", snapshot, max_hp, 6).with_behavior(behavior)
}

fn queue(ability: &Ability, count: usize) -> Vec<QueuedAction> {
    (0..count).map(|_| QueuedAction::new(ability, 1)).collect()
}

#[test]
fn physical_damage_end_to_end() {
    let catalog = catalog();
    let config = BattleConfig::default();
    let mut rng = forced_hit();
    let mut env = BattleEnv::new(&catalog, &mut rng, &config);
    let mut session = start_encounter(hero(), goblin(Behavior::Passive, 200), &config);

    let report = BattleEngine::new(&mut session)
        .submit_player_action(&mut env, &queue(&slash(), 1))
        .unwrap();

    // (10 + 14·0.5) · proficiency, variance 1.0, minus 5 defense
    let expected = ((17.0 * proficiency_multiplier(40)).floor() as u32)
        .saturating_sub(5)
        .max(1);
    let first = &report.entries[0];
    assert_eq!(first.actor, LogActor::Player);
    assert_eq!(first.amount, Some(expected));
    assert_eq!(session.opponent().current_hp(), 200 - expected);
}

#[test]
fn aggressive_opponent_strikes_once_before_the_player() {
    let catalog = catalog();
    let config = BattleConfig::default();
    let mut rng = PcgRng::seeded(7);
    let mut env = BattleEnv::new(&catalog, &mut rng, &config);
    let mut session = start_encounter(hero(), goblin(Behavior::Aggressive, 500), &config);
    assert!(session.is_preemptive_phase());

    let report = BattleEngine::new(&mut session)
        .submit_player_action(&mut env, &queue(&slash(), 1))
        .unwrap();

    let opening: Vec<_> = session.log().for_turn(0).collect();
    assert_eq!(opening.len(), 1);
    assert_eq!(opening[0].actor, LogActor::Opponent);
    assert_eq!(report.entries[0].turn, 0);
    assert_eq!(report.entries[1].actor, LogActor::Player);
    assert!(!session.is_preemptive_phase());
    assert!(session.opponent_acts_first());
    assert_eq!(session.turn(), 2);

    BattleEngine::new(&mut session)
        .submit_player_action(&mut env, &queue(&slash(), 1))
        .unwrap();
    assert_eq!(session.log().for_turn(0).count(), 1);
}

#[test]
fn monster_respects_action_point_budget() {
    let heavy = |id: &str| {
        MonsterAbility::new(
            Ability {
                id: AbilityId::new(id),
                name: id.into(),
                discipline: Discipline::default(),
                power: 2,
                ap_cost: 4,
                mp_cost: 0,
                effect: AbilityEffect::Attack,
                applies: None,
            },
            AbilityCategory::SpecialSkill,
            1,
        )
    };
    let abilities = vec![heavy("maul"), heavy("gore"), heavy("rend")];

    for seed in 0..64 {
        let mut rng = PcgRng::seeded(seed);
        let ctx = AiContext {
            abilities: &abilities,
            weights: ActionWeights::default(),
            hp: 100,
            max_hp: 100,
            turn: 1,
            action_points: 10,
            mana: 0,
            silenced: false,
        };
        let plan = select_monster_actions(&ctx, &mut rng);
        assert_eq!(plan.len(), 2);
        assert!(plan.ap_spent() <= 10);
        assert!(!plan.used_fallback);
    }

    let catalog = catalog();
    let config = BattleConfig::default();
    let mut rng = PcgRng::seeded(3);
    let mut env = BattleEnv::new(&catalog, &mut rng, &config);
    let mut opponent = goblin(Behavior::Passive, 500);
    opponent.max_action_points = 10;
    opponent.abilities = abilities;
    let mut session = start_encounter(hero(), opponent, &config);

    let report = BattleEngine::new(&mut session).tick(&mut env).unwrap();
    let opponent_actions = report
        .entries
        .iter()
        .filter(|e| e.actor == LogActor::Opponent)
        .count();
    assert_eq!(opponent_actions, 2);
}

#[test]
fn critical_chance_reference_value() {
    let attacker = StatSnapshot::from_attributes(Attributes::new(10, 20, 10, 10, 10, 10, 10));
    let chance = critical_chance(&attacker, AttackKind::Physical);
    assert!((chance - 9.0).abs() < 1e-9);
}

#[test]
fn terminal_session_rejects_every_operation() {
    let catalog = catalog();
    let config = BattleConfig::default();
    let mut rng = forced_hit();
    let mut env = BattleEnv::new(&catalog, &mut rng, &config);
    let mut session = start_encounter(hero(), goblin(Behavior::Passive, 5), &config);

    let report = BattleEngine::new(&mut session)
        .submit_player_action(&mut env, &queue(&slash(), 1))
        .unwrap();
    assert_eq!(report.state, BattleState::Victory);

    let frozen: BattleSession = session.clone();
    let mut engine = BattleEngine::new(&mut session);
    for result in [
        engine.submit_player_action(&mut env, &queue(&slash(), 1)),
        engine.tick(&mut env),
        engine.attempt_flee(&mut env),
    ] {
        assert_eq!(
            result.unwrap_err(),
            SessionError::IllegalTransition {
                state: BattleState::Victory
            }
        );
    }
    assert_eq!(session, frozen);
}

#[test]
fn effects_tick_once_per_turn() {
    let war_cry = Ability {
        id: AbilityId::new("war_cry"),
        name: "War Cry".into(),
        discipline: Discipline::default(),
        power: 0,
        ap_cost: 2,
        mp_cost: 0,
        effect: AbilityEffect::Buff,
        applies: Some(EffectTemplate::new(
            EffectKind::Buff,
            EffectType::StatBoost(StatKey::Constitution),
            2,
            3,
            "Guard",
        )),
    };
    let catalog = catalog().with(war_cry.clone());
    let config = BattleConfig::default();
    let mut rng = PcgRng::seeded(11);
    let mut env = BattleEnv::new(&catalog, &mut rng, &config);
    let mut session = start_encounter(hero(), goblin(Behavior::Passive, 5000), &config);

    BattleEngine::new(&mut session)
        .submit_player_action(&mut env, &[QueuedAction::new(&war_cry, 1)])
        .unwrap();
    let remaining = |s: &BattleSession| {
        s.player()
            .buffs()
            .iter()
            .next()
            .map(|e| e.remaining_duration)
    };
    assert_eq!(remaining(&session), Some(2));

    BattleEngine::new(&mut session).tick(&mut env).unwrap();
    assert_eq!(remaining(&session), Some(1));
    assert_eq!(session.turn(), 3);

    let report = BattleEngine::new(&mut session).tick(&mut env).unwrap();
    assert_eq!(remaining(&session), None);
    assert!(
        report
            .entries
            .iter()
            .any(|e| matches!(e.action, LogAction::EffectExpired { .. }))
    );
}

#[test]
fn flee_outcomes() {
    let catalog = catalog();

    let always = BattleConfig::default().with_flee_chance(100);
    let mut rng = PcgRng::seeded(1);
    let mut env = BattleEnv::new(&catalog, &mut rng, &always);
    let mut session = start_encounter(hero(), goblin(Behavior::Passive, 50), &always);
    let report = BattleEngine::new(&mut session).attempt_flee(&mut env).unwrap();
    assert_eq!(report.state, BattleState::Fled);
    assert!(
        report
            .entries
            .iter()
            .all(|e| e.actor != LogActor::Opponent)
    );

    let never = BattleConfig::default().with_flee_chance(0);
    let mut rng = SequenceRng::constant(0.99);
    let mut env = BattleEnv::new(&catalog, &mut rng, &never);
    let mut session = start_encounter(hero(), goblin(Behavior::Passive, 50), &never);
    let report = BattleEngine::new(&mut session).attempt_flee(&mut env).unwrap();
    assert_eq!(report.state, BattleState::Ongoing);
    assert_eq!(report.entries[0].action, LogAction::Flee { success: false });
    assert!(report.entries.iter().any(|e| e.actor == LogActor::Opponent));
    assert!(session.player().current_hp() < 120);
    assert_eq!(session.turn(), 2);
}

#[test]
fn duel_rival_uses_player_formulas() {
    let armored = SnapshotBuilder::from_attributes(Attributes::default())
        .with_gear(GearStats::new(0, 50))
        .build();
    let player = PlayerSheet::new("Hero", armored, 100, 0);
    let rival_stats = StatSnapshot::from_attributes(Attributes::default());

    let catalog = catalog();
    let config = BattleConfig::default();

    let mut amounts = Vec::new();
    for kind in [OpponentKind::Monster, OpponentKind::DuelRival] {
        let mut rng = SequenceRng::constant(0.99);
        let mut env = BattleEnv::new(&catalog, &mut rng, &config);
        let opponent =
            OpponentConfig::new("rival", "Rival", rival_stats.clone(), 100, 3).with_kind(kind);
        let mut session = start_encounter(player.clone(), opponent, &config);
        let report = BattleEngine::new(&mut session).tick(&mut env).unwrap();
        amounts.push(report.entries[0].amount);
    }

    assert_eq!(amounts, vec![Some(0), Some(1)]);
}

#[test]
fn same_seed_replays_identically() {
    let run = || {
        let catalog = catalog();
        let config = BattleConfig::default();
        let mut rng = PcgRng::seeded(2024);
        let mut env = BattleEnv::new(&catalog, &mut rng, &config);
        let mut session = start_encounter(hero(), goblin(Behavior::Aggressive, 80), &config);
        while !session.is_terminal() && session.turn() < 50 {
            BattleEngine::new(&mut session)
                .submit_player_action(&mut env, &queue(&slash(), 3))
                .unwrap();
        }
        session
    };

    assert_eq!(run(), run());
}

#[cfg(feature = "serde")]
#[test]
fn turn_report_serializes() {
    let catalog = catalog();
    let config = BattleConfig::default();
    let mut rng = PcgRng::seeded(5);
    let mut env = BattleEnv::new(&catalog, &mut rng, &config);
    let mut session = start_encounter(hero(), goblin(Behavior::Passive, 80), &config);
    let report = BattleEngine::new(&mut session).tick(&mut env).unwrap();

    let json = serde_json::to_string(&report).unwrap();
    let back: battle_core::TurnReport = serde_json::from_str(&json).unwrap();
    assert_eq!(back, report);
}
