//! Ability lookup.

use std::collections::BTreeMap;

use crate::action::{Ability, AbilityId};

/// Read-only access to ability definitions.
pub trait AbilityOracle {
    fn ability(&self, id: &AbilityId) -> Option<&Ability>;
}

/// In-memory ability table keyed by id.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AbilityCatalog {
    abilities: BTreeMap<AbilityId, Ability>,
}

impl AbilityCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an ability, returning the definition it replaced.
    pub fn insert(&mut self, ability: Ability) -> Option<Ability> {
        self.abilities.insert(ability.id.clone(), ability)
    }

    pub fn with(mut self, ability: Ability) -> Self {
        self.insert(ability);
        self
    }

    pub fn get(&self, id: &AbilityId) -> Option<&Ability> {
        self.abilities.get(id)
    }

    pub fn contains(&self, id: &AbilityId) -> bool {
        self.abilities.contains_key(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Ability> {
        self.abilities.values()
    }

    pub fn len(&self) -> usize {
        self.abilities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.abilities.is_empty()
    }
}

impl FromIterator<Ability> for AbilityCatalog {
    fn from_iter<I: IntoIterator<Item = Ability>>(iter: I) -> Self {
        let mut catalog = Self::new();
        for ability in iter {
            catalog.insert(ability);
        }
        catalog
    }
}

impl AbilityOracle for AbilityCatalog {
    fn ability(&self, id: &AbilityId) -> Option<&Ability> {
        self.get(id)
    }
}
