//! Monster action selection.
//!
//! Each iteration filters the repertoire, draws a category by
//! [`ActionWeights`], then draws an ability within that category by its own
//! weight. Iterations stop when the budget runs out, nothing eligible remains,
//! or [`BattleConfig::MAX_MONSTER_ACTIONS`] actions are planned.

use arrayvec::ArrayVec;

use crate::config::BattleConfig;
use crate::env::BattleRng;

use super::ability::{Ability, AbilityCategory, ActionWeights, MonsterAbility};
use super::queue::QueuedAction;

const CATEGORIES: [AbilityCategory; 3] = [
    AbilityCategory::BasicAttack,
    AbilityCategory::SpecialSkill,
    AbilityCategory::BorrowedAbility,
];

/// What the selector knows about the acting monster this turn.
#[derive(Clone, Copy, Debug)]
pub struct AiContext<'a> {
    pub abilities: &'a [MonsterAbility],
    pub weights: ActionWeights,
    pub hp: u32,
    pub max_hp: u32,
    pub turn: u32,
    pub action_points: u32,
    pub mana: u32,
    pub silenced: bool,
}

/// Actions chosen for one monster turn, in execution order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MonsterPlan {
    pub actions: ArrayVec<QueuedAction, { BattleConfig::MAX_MONSTER_ACTIONS }>,
    /// True when the plan consists of the built-in default attack.
    pub used_fallback: bool,
}

impl MonsterPlan {
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn ap_spent(&self) -> u32 {
        self.actions.iter().map(|a| a.ap_cost).sum()
    }
}

/// Weighted draw over `items`.
///
/// Rolls `unit · total` and subtracts each entry's weight until the running
/// value is non-positive; ties resolve by list order. Zero-weight entries are
/// never picked while any weight is positive. When every weight is zero the
/// first entry is returned. Returns `None` only for an empty slice.
pub fn weighted_pick<T>(
    items: &[T],
    weight: impl Fn(&T) -> u32,
    rng: &mut dyn BattleRng,
) -> Option<usize> {
    if items.is_empty() {
        return None;
    }

    let total: u64 = items.iter().map(|item| u64::from(weight(item))).sum();
    if total == 0 {
        return Some(0);
    }

    let mut roll = rng.unit() * total as f64;
    let mut last_positive = 0;
    for (index, item) in items.iter().enumerate() {
        let w = weight(item);
        if w == 0 {
            continue;
        }
        last_positive = index;
        roll -= f64::from(w);
        if roll <= 0.0 {
            return Some(index);
        }
    }
    Some(last_positive)
}

/// Plan the monster's actions for this turn.
///
/// Falls back to [`Ability::default_attack`] (repeated while at least its
/// cost remains, under the same cap) only when nothing is eligible on the
/// first iteration.
pub fn select_monster_actions(ctx: &AiContext<'_>, rng: &mut dyn BattleRng) -> MonsterPlan {
    let mut plan = MonsterPlan::default();
    let mut remaining_ap = ctx.action_points;
    let mut remaining_mp = ctx.mana;

    while !plan.actions.is_full() {
        let eligible: Vec<&MonsterAbility> = ctx
            .abilities
            .iter()
            .filter(|candidate| {
                candidate.condition.is_satisfied(ctx.hp, ctx.max_hp, ctx.turn)
                    && candidate.ability.ap_cost <= remaining_ap
                    && candidate.ability.mp_cost <= remaining_mp
                    && !(ctx.silenced && candidate.ability.is_magical())
            })
            .collect();

        if eligible.is_empty() {
            if plan.is_empty() {
                tracing::debug!(
                    "no eligible ability with {} AP, falling back to default attack",
                    remaining_ap
                );
                return fallback_plan(remaining_ap);
            }
            tracing::debug!("no affordable ability left with {} AP", remaining_ap);
            break;
        }

        let categories: Vec<(AbilityCategory, u32)> = CATEGORIES
            .iter()
            .copied()
            .filter(|category| eligible.iter().any(|c| c.category == *category))
            .map(|category| (category, ctx.weights.weight(category)))
            .collect();
        let Some(category_index) = weighted_pick(&categories, |(_, w)| *w, rng) else {
            break;
        };
        let category = categories[category_index].0;

        let pool: Vec<&MonsterAbility> = eligible
            .into_iter()
            .filter(|c| c.category == category)
            .collect();
        let Some(pick) = weighted_pick(&pool, |c| c.weight, rng) else {
            break;
        };
        let chosen = pool[pick];

        tracing::debug!(
            "monster selected {} ({}) with {} AP remaining",
            chosen.ability.id,
            category,
            remaining_ap
        );

        remaining_ap -= chosen.ability.ap_cost;
        remaining_mp -= chosen.ability.mp_cost;
        plan.actions
            .push(QueuedAction::new(&chosen.ability, chosen.level));
    }

    plan
}

fn fallback_plan(action_points: u32) -> MonsterPlan {
    let attack = Ability::default_attack();
    let mut plan = MonsterPlan {
        used_fallback: true,
        ..MonsterPlan::default()
    };
    let mut remaining = action_points;
    while remaining >= attack.ap_cost && !plan.actions.is_full() {
        plan.actions.push(QueuedAction::new(&attack, 1));
        remaining -= attack.ap_cost;
    }
    plan
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::{AbilityEffect, AbilityId, ActivationCondition};
    use crate::combat::Element;
    use crate::env::{PcgRng, SequenceRng};
    use crate::stats::Discipline;

    fn ability(id: &str, ap_cost: u32, mp_cost: u32) -> Ability {
        Ability {
            id: AbilityId::new(id),
            name: id.to_string(),
            discipline: Discipline::default(),
            power: 5,
            ap_cost,
            mp_cost,
            effect: AbilityEffect::Attack,
            applies: None,
        }
    }

    fn ctx(abilities: &[MonsterAbility], action_points: u32) -> AiContext<'_> {
        AiContext {
            abilities,
            weights: ActionWeights::default(),
            hp: 100,
            max_hp: 100,
            turn: 1,
            action_points,
            mana: 100,
            silenced: false,
        }
    }

    #[test]
    fn budget_limits_before_cap() {
        let abilities = vec![
            MonsterAbility::new(ability("claw", 4, 0), AbilityCategory::BasicAttack, 5),
            MonsterAbility::new(ability("bite", 4, 0), AbilityCategory::SpecialSkill, 5),
        ];
        let mut rng = PcgRng::seeded(11);
        for _ in 0..50 {
            let plan = select_monster_actions(&ctx(&abilities, 10), &mut rng);
            assert_eq!(plan.len(), 2);
            assert!(!plan.used_fallback);
        }
    }

    #[test]
    fn cap_of_three_actions() {
        let abilities = vec![MonsterAbility::new(
            ability("jab", 1, 0),
            AbilityCategory::BasicAttack,
            1,
        )];
        let plan = select_monster_actions(&ctx(&abilities, 10), &mut SequenceRng::constant(0.3));
        assert_eq!(plan.len(), 3);
    }

    #[test]
    fn fallback_when_nothing_eligible() {
        let abilities = vec![
            MonsterAbility::new(ability("rage", 2, 0), AbilityCategory::SpecialSkill, 1)
                .with_condition(ActivationCondition::hp_below(30)),
        ];
        let plan = select_monster_actions(&ctx(&abilities, 10), &mut SequenceRng::constant(0.5));
        assert!(plan.used_fallback);
        assert_eq!(plan.len(), 3);
        assert!(
            plan.actions
                .iter()
                .all(|a| a.ability_id.as_str() == AbilityId::BASIC_ATTACK)
        );

        let plan = select_monster_actions(&ctx(&abilities, 7), &mut SequenceRng::constant(0.5));
        assert_eq!(plan.len(), 2);
    }

    #[test]
    fn hp_condition_uses_exact_ratio() {
        let abilities = vec![
            MonsterAbility::new(ability("rally", 3, 0), AbilityCategory::SpecialSkill, 1)
                .with_condition(ActivationCondition::hp_above(50)),
        ];
        let mut wounded = ctx(&abilities, 3);
        wounded.hp = 101;
        wounded.max_hp = 200;

        let plan = select_monster_actions(&wounded, &mut SequenceRng::constant(0.5));
        assert!(!plan.used_fallback);
        assert_eq!(plan.actions[0].ability_id.as_str(), "rally");

        wounded.hp = 100;
        let plan = select_monster_actions(&wounded, &mut SequenceRng::constant(0.5));
        assert!(plan.used_fallback);
    }

    #[test]
    fn silenced_monster_skips_spells() {
        let mut bolt = ability("bolt", 2, 5);
        bolt.discipline = Discipline::Spell(Element::Lightning);
        let abilities = vec![
            MonsterAbility::new(bolt, AbilityCategory::SpecialSkill, 10),
            MonsterAbility::new(ability("kick", 5, 0), AbilityCategory::BasicAttack, 1),
        ];
        let mut silenced = ctx(&abilities, 5);
        silenced.silenced = true;

        let plan = select_monster_actions(&silenced, &mut SequenceRng::constant(0.0));
        assert_eq!(plan.len(), 1);
        assert_eq!(plan.actions[0].ability_id.as_str(), "kick");
    }

    #[test]
    fn mana_is_budgeted_across_actions() {
        let abilities = vec![MonsterAbility::new(
            ability("drain", 1, 40),
            AbilityCategory::SpecialSkill,
            1,
        )];
        let plan = select_monster_actions(&ctx(&abilities, 10), &mut SequenceRng::constant(0.5));
        // 100 MP covers two casts; the third iteration finds nothing and stops.
        assert_eq!(plan.len(), 2);
        assert!(!plan.used_fallback);
    }

    #[test]
    fn weighted_pick_walks_cumulative_sum() {
        let weights = [2u32, 0, 3, 5];
        // total 10: roll 0.0 → first, 2.0 → first (tie), 2.1 → third, 9.9 → last.
        let pick = |draw: f64| weighted_pick(&weights, |w| *w, &mut SequenceRng::constant(draw));
        assert_eq!(pick(0.0), Some(0));
        assert_eq!(pick(0.2), Some(0));
        assert_eq!(pick(0.21), Some(2));
        assert_eq!(pick(0.99), Some(3));

        let zeros = [0u32, 0];
        assert_eq!(weighted_pick(&zeros, |w| *w, &mut SequenceRng::constant(0.7)), Some(0));
        let empty: [u32; 0] = [];
        assert_eq!(weighted_pick(&empty, |w| *w, &mut SequenceRng::constant(0.7)), None);
    }

    #[test]
    fn zero_category_weight_is_never_drawn() {
        let abilities = vec![
            MonsterAbility::new(ability("swipe", 3, 0), AbilityCategory::BasicAttack, 1),
            MonsterAbility::new(ability("steal", 3, 0), AbilityCategory::BorrowedAbility, 1),
        ];
        let mut context = ctx(&abilities, 3);
        context.weights = ActionWeights::new(0, 0, 4);
        for draw in [0.0, 0.5, 0.99] {
            let plan = select_monster_actions(&context, &mut SequenceRng::constant(draw));
            assert_eq!(plan.actions[0].ability_id.as_str(), "steal");
        }
    }
}
