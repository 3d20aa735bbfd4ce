//! Greedy player policy used by the headless runner.
use battle_core::{
    Ability, AbilityEffect, AbilityId, AbilityOracle, BattleSession, QueuedAction,
};

/// HP percentage below which the policy opens with a heal.
const HEAL_BELOW_PERCENT: u32 = 40;

/// Picks the player's queue each turn: a heal when wounded, then the
/// strongest affordable attack repeated until the budget runs out.
pub struct GreedyPolicy {
    known: Vec<Ability>,
}

impl GreedyPolicy {
    pub fn new(abilities: &[AbilityId], catalog: &dyn AbilityOracle) -> Self {
        let known = abilities
            .iter()
            .filter_map(|id| catalog.ability(id).cloned())
            .collect();
        Self { known }
    }

    pub fn plan(&self, session: &BattleSession) -> Vec<QueuedAction> {
        let player = session.player();
        let silenced = player.is_silenced();
        let mut ap = player.max_action_points();
        let mut mp = player.current_mp();
        let mut queue = Vec::new();

        let usable = |ability: &Ability, ap: u32, mp: u32| {
            ability.ap_cost <= ap && ability.mp_cost <= mp && !(silenced && ability.is_magical())
        };

        if player.hp_percent() < HEAL_BELOW_PERCENT {
            if let Some(heal) = self
                .known
                .iter()
                .find(|a| a.effect == AbilityEffect::Heal && usable(a, ap, mp))
            {
                ap -= heal.ap_cost;
                mp -= heal.mp_cost;
                queue.push(QueuedAction::new(heal, 1));
            }
        }

        while let Some(attack) = self
            .known
            .iter()
            .filter(|a| a.effect == AbilityEffect::Attack && usable(a, ap, mp))
            .max_by_key(|a| a.power)
        {
            ap -= attack.ap_cost;
            mp -= attack.mp_cost;
            queue.push(QueuedAction::new(attack, 1));
        }

        queue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use battle_core::{
        AbilityCatalog, Attributes, BattleConfig, Discipline, Element, OpponentConfig,
        PlayerSheet, StatSnapshot, start_encounter,
    };

    fn ability(id: &str, power: u32, ap: u32, mp: u32, effect: AbilityEffect) -> Ability {
        Ability {
            id: AbilityId::new(id),
            name: id.into(),
            discipline: if mp > 0 {
                Discipline::Spell(Element::Fire)
            } else {
                Discipline::default()
            },
            power,
            ap_cost: ap,
            mp_cost: mp,
            effect,
            applies: None,
        }
    }

    #[test]
    fn spends_budget_on_strongest_attacks() {
        let catalog = AbilityCatalog::new()
            .with(ability("jab", 2, 2, 0, AbilityEffect::Attack))
            .with(ability("bolt", 9, 4, 5, AbilityEffect::Attack))
            .with(ability("mend", 5, 3, 2, AbilityEffect::Heal));
        let ids: Vec<AbilityId> = ["jab", "bolt", "mend"]
            .into_iter()
            .map(AbilityId::from)
            .collect();
        let policy = GreedyPolicy::new(&ids, &catalog);

        let snapshot = StatSnapshot::from_attributes(Attributes::default());
        let player = PlayerSheet::new("Hero", snapshot, 100, 8);
        let opponent = OpponentConfig::new("dummy", "Dummy", StatSnapshot::default(), 10, 3);
        let session = start_encounter(player, opponent, &BattleConfig::default());

        let queue = policy.plan(&session);
        let names: Vec<&str> = queue.iter().map(|q| q.ability_id.as_str()).collect();
        // bolt (4 AP, 5 MP), then jab ×3 with the remaining 6 AP
        assert_eq!(names, vec!["bolt", "jab", "jab", "jab"]);
    }
}
