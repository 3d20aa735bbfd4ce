//! Weapon- and armor-derived secondary values.

/// Secondary values contributed by equipped weapon and armor.
///
/// Chance bonuses are expressed in percentage points and are added to the
/// attribute-derived chance before the cap is applied.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GearStats {
    /// Flat attack power (weapon damage). Drives the monster damage formula.
    pub attack_power: i32,

    /// Flat physical defense (armor). Subtracted from incoming damage.
    pub physical_defense: i32,

    /// Bonus to the chance that physical attacks against the wearer miss.
    pub evasion_bonus: i32,

    /// Bonus to the wearer's dodge chance.
    pub dodge_bonus: i32,

    /// Bonus to the wearer's block chance (shields).
    pub block_bonus: i32,
}

impl GearStats {
    pub fn new(attack_power: i32, physical_defense: i32) -> Self {
        Self {
            attack_power,
            physical_defense,
            ..Self::default()
        }
    }

    pub fn with_evasion_bonus(mut self, bonus: i32) -> Self {
        self.evasion_bonus = bonus;
        self
    }

    pub fn with_dodge_bonus(mut self, bonus: i32) -> Self {
        self.dodge_bonus = bonus;
        self
    }

    pub fn with_block_bonus(mut self, bonus: i32) -> Self {
        self.block_bonus = bonus;
        self
    }
}
