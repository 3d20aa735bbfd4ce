//! Simulator configuration from environment variables.
use std::env;
use std::path::PathBuf;

use battle_core::{DayOfWeek, ResolutionContext, TimeOfDay, Weather};

/// Headless run configuration.
#[derive(Clone, Debug)]
pub struct SimConfig {
    /// Seed of the encounter RNG.
    pub seed: u64,
    /// Directory holding `abilities.ron`, `opponents.ron`, `player.ron`, `config.toml`.
    pub content_dir: PathBuf,
    /// Opponent id to fight; the first roster entry when unset.
    pub opponent: Option<String>,
    /// Abandon the encounter after this many turns.
    pub max_turns: u32,
    pub context: ResolutionContext,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            content_dir: PathBuf::from("crates/battle/content/data"),
            opponent: None,
            max_turns: 100,
            context: ResolutionContext::default(),
        }
    }
}

impl SimConfig {
    /// Construct simulator configuration from environment variables.
    ///
    /// Environment variables:
    /// - `BATTLE_SEED` - RNG seed (default: 0)
    /// - `BATTLE_CONTENT_DIR` - content directory (default: `crates/battle/content/data`)
    /// - `BATTLE_OPPONENT` - opponent id (default: first in roster)
    /// - `BATTLE_MAX_TURNS` - turn limit (default: 100)
    /// - `BATTLE_DAY` - day of week, e.g. `tuesday`
    /// - `BATTLE_TIME_OF_DAY` - `dawn`, `day`, `dusk` or `night`
    /// - `BATTLE_WEATHER` - e.g. `rain`
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(seed) = read_env::<u64>("BATTLE_SEED") {
            config.seed = seed;
        }
        if let Ok(dir) = env::var("BATTLE_CONTENT_DIR") {
            config.content_dir = PathBuf::from(dir);
        }
        if let Ok(opponent) = env::var("BATTLE_OPPONENT") {
            config.opponent = Some(opponent);
        }
        if let Some(turns) = read_env::<u32>("BATTLE_MAX_TURNS") {
            config.max_turns = turns.max(1);
        }
        if let Some(day) = read_env::<DayOfWeek>("BATTLE_DAY") {
            config.context.day = day;
        }
        if let Some(time) = read_env::<TimeOfDay>("BATTLE_TIME_OF_DAY") {
            config.context.time_of_day = time;
        }
        if let Some(weather) = read_env::<Weather>("BATTLE_WEATHER") {
            config.context.weather = weather;
        }

        config
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
