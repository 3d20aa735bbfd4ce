//! Clamp ranges for adjusted snapshot values.
//!
//! Status effects only ever shift a stat by a flat amount. The shifted value
//! is clamped to the range of its category, so a pile of debuffs can weaken a
//! combatant but never push an attribute to zero or a defense below zero.

/// Inclusive range a category of snapshot values is kept in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StatBounds {
    pub min: i32,
    pub max: i32,
}

impl StatBounds {
    /// Primary attributes [1, 999].
    pub const ATTRIBUTES: Self = Self { min: 1, max: 999 };

    /// Gear-derived secondary values [0, 9999].
    pub const SECONDARY: Self = Self { min: 0, max: 9999 };

    /// `base + delta`, clamped to this range.
    pub fn adjust(self, base: i32, delta: i32) -> i32 {
        base.saturating_add(delta).clamp(self.min, self.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adjust_clamps_both_ends() {
        assert_eq!(StatBounds::ATTRIBUTES.adjust(10, -50), 1);
        assert_eq!(StatBounds::ATTRIBUTES.adjust(990, 20), 999);
        assert_eq!(StatBounds::SECONDARY.adjust(4, -6), 0);
        assert_eq!(StatBounds::SECONDARY.adjust(i32::MAX, 1), 9999);
        assert_eq!(StatBounds::ATTRIBUTES.adjust(12, 3), 15);
    }
}
