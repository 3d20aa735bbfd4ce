//! Elements and the element-vs-element affinity table.

/// Elemental affinity of spells and combatants.
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
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Element {
    #[default]
    Neutral,
    Fire,
    Ice,
    Water,
    Lightning,
    Earth,
    Wind,
    Light,
    Dark,
}

/// Multiplier when the attacking element is strong against the defender.
pub const SUPER_EFFECTIVE: f64 = 1.5;
/// Multiplier when the defender resists the attacking element.
pub const NOT_EFFECTIVE: f64 = 0.5;

/// Look up the affinity multiplier of `attack` against a defender of `defend`.
///
/// The cycle is Fire > Ice > Wind > Earth > Lightning > Water > Fire; Light and
/// Dark are strong against each other; an element resists itself. Neutral on
/// either side is always 1.0.
pub fn elemental_effectiveness(attack: Element, defend: Element) -> f64 {
    use Element::*;

    if attack == Neutral || defend == Neutral {
        return 1.0;
    }
    if attack == defend {
        return NOT_EFFECTIVE;
    }

    match (attack, defend) {
        (Fire, Ice)
        | (Ice, Wind)
        | (Wind, Earth)
        | (Earth, Lightning)
        | (Lightning, Water)
        | (Water, Fire)
        | (Light, Dark)
        | (Dark, Light) => SUPER_EFFECTIVE,

        (Ice, Fire)
        | (Wind, Ice)
        | (Earth, Wind)
        | (Lightning, Earth)
        | (Water, Lightning)
        | (Fire, Water) => NOT_EFFECTIVE,

        _ => 1.0,
    }
}
