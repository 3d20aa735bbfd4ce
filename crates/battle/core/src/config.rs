/// Battle configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BattleConfig {
    /// Success chance of a flee attempt, in percent.
    pub flee_chance_percent: u32,

    /// Action points granted to the player at the start of every turn.
    pub player_action_points: u32,
}

impl BattleConfig {
    // ===== rule constants (not tunable) =====
    /// Hard cap on monster actions per turn, regardless of remaining budget.
    pub const MAX_MONSTER_ACTIONS: usize = 3;
    /// Action-point cost of the built-in fallback attack.
    pub const DEFAULT_ATTACK_AP_COST: u32 = 3;
    /// Lower bound of the uniform damage variance factor.
    pub const VARIANCE_MIN: f64 = 0.85;
    /// Upper bound of the uniform damage variance factor.
    pub const VARIANCE_MAX: f64 = 1.15;
    /// Highest ability level a queued action may request.
    pub const MAX_ABILITY_LEVEL: u32 = 10;
    /// Turn number used for log entries produced by a preemptive strike.
    pub const PREEMPTIVE_TURN: u32 = 0;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_FLEE_CHANCE_PERCENT: u32 = 50;
    pub const DEFAULT_PLAYER_ACTION_POINTS: u32 = 10;

    pub fn new() -> Self {
        Self {
            flee_chance_percent: Self::DEFAULT_FLEE_CHANCE_PERCENT,
            player_action_points: Self::DEFAULT_PLAYER_ACTION_POINTS,
        }
    }

    pub fn with_flee_chance(mut self, percent: u32) -> Self {
        self.flee_chance_percent = percent.min(100);
        self
    }

    pub fn with_player_action_points(mut self, action_points: u32) -> Self {
        self.player_action_points = action_points;
        self
    }
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self::new()
    }
}
