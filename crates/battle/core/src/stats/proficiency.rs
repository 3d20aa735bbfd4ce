//! Discipline ranks and the proficiency damage multiplier.
//!
//! Every damaging ability belongs to a discipline: a weapon type for physical
//! abilities, a spell element for magical ones. A combatant carries a rank in
//! `[0, 100]` per discipline; the rank scales damage output for that discipline.

use std::collections::BTreeMap;
use std::fmt;

use crate::combat::Element;

/// Weapon families.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum WeaponType {
    #[default]
    Unarmed,
    Sword,
    Axe,
    Spear,
    Dagger,
    Bow,
    Staff,
    Mace,
}

/// The skill category an ability trains and scales with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Discipline {
    Weapon(WeaponType),
    Spell(Element),
}

impl Discipline {
    pub const fn is_magical(&self) -> bool {
        matches!(self, Discipline::Spell(_))
    }
}

impl Default for Discipline {
    fn default() -> Self {
        Discipline::Weapon(WeaponType::Unarmed)
    }
}

impl fmt::Display for Discipline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Discipline::Weapon(weapon) => write!(f, "weapon:{weapon}"),
            Discipline::Spell(element) => write!(f, "spell:{element}"),
        }
    }
}

/// Highest attainable discipline rank.
pub const MAX_RANK: u8 = 100;

/// Multiplier gained at [`MAX_RANK`] on top of the untrained 1.0.
const MAX_BONUS: f64 = 0.5;

/// Damage multiplier for a discipline rank.
///
/// ```text
/// multiplier = 1 + 0.5 × (1 − (1 − rank/100)²)
/// ```
///
/// Rank 0 gives 1.0 and rank 100 gives 1.5. Each additional rank adds
/// strictly more than zero but less than the rank before it. Ranks above
/// [`MAX_RANK`] are treated as [`MAX_RANK`].
pub fn proficiency_multiplier(rank: u8) -> f64 {
    let r = f64::from(rank.min(MAX_RANK)) / f64::from(MAX_RANK);
    let remaining = 1.0 - r;
    1.0 + MAX_BONUS * (1.0 - remaining * remaining)
}

/// Per-discipline ranks of a combatant. Missing disciplines are rank 0.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Proficiencies {
    ranks: BTreeMap<Discipline, u8>,
}

impl Proficiencies {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rank(mut self, discipline: Discipline, rank: u8) -> Self {
        self.set_rank(discipline, rank);
        self
    }

    pub fn set_rank(&mut self, discipline: Discipline, rank: u8) {
        self.ranks.insert(discipline, rank.min(MAX_RANK));
    }

    pub fn rank(&self, discipline: Discipline) -> u8 {
        self.ranks.get(&discipline).copied().unwrap_or(0)
    }

    pub fn multiplier(&self, discipline: Discipline) -> f64 {
        proficiency_multiplier(self.rank(discipline))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Discipline, &u8)> {
        self.ranks.iter()
    }
}
