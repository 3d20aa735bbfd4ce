//! Shield absorption.

/// Result of routing incoming damage through one shield.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShieldAbsorption {
    /// Remaining shield magnitude after absorption.
    pub shield: u32,
    /// Damage the shield soaked up.
    pub absorbed: u32,
    /// Damage that continues on to the next shield or to HP.
    pub passthrough: u32,
}

/// Absorb `incoming` damage with a shield of magnitude `shield`.
///
/// The shield soaks up to its remaining magnitude and never goes below zero;
/// the excess passes through.
///
/// ```
/// # use battle_core::status::apply_damage_to_shield;
/// let a = apply_damage_to_shield(30, 50);
/// assert_eq!((a.shield, a.passthrough), (0, 20));
/// let b = apply_damage_to_shield(80, 50);
/// assert_eq!((b.shield, b.passthrough), (30, 0));
/// ```
pub fn apply_damage_to_shield(shield: u32, incoming: u32) -> ShieldAbsorption {
    let absorbed = shield.min(incoming);
    ShieldAbsorption {
        shield: shield - absorbed,
        absorbed,
        passthrough: incoming - absorbed,
    }
}
