//! Primary attributes.
//!
//! The seven attributes are the stored part of a combatant's stat sheet; every
//! other value the resolvers read is derived from them, from gear, or from
//! active effects, and locked into a [`super::StatSnapshot`].
//!
//! - **strength**: physical damage scaling
//! - **agility**: dodge chance, physical critical chance
//! - **constitution**: block chance
//! - **intellect**: magical damage scaling, magical critical chance
//! - **wisdom**: healing scaling
//! - **charisma**: carried for callers (prices, dialogue); unused by the resolvers
//! - **luck**: critical chance and critical multiplier

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Attributes {
    pub strength: i32,
    pub agility: i32,
    pub constitution: i32,
    pub intellect: i32,
    pub wisdom: i32,
    pub charisma: i32,
    pub luck: i32,
}

impl Attributes {
    pub fn new(
        strength: i32,
        agility: i32,
        constitution: i32,
        intellect: i32,
        wisdom: i32,
        charisma: i32,
        luck: i32,
    ) -> Self {
        Self {
            strength,
            agility,
            constitution,
            intellect,
            wisdom,
            charisma,
            luck,
        }
    }
}

impl Default for Attributes {
    /// Default attributes: all 10 (average adventurer)
    fn default() -> Self {
        Self::new(10, 10, 10, 10, 10, 10, 10)
    }
}
