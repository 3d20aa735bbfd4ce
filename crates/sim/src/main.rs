//! Headless encounter runner.
//!
//! Loads shipped content, fights one opponent with a greedy player policy and
//! prints the encounter log to stdout. Diagnostics go to stderr via `tracing`.
//!
//! ```bash
//! BATTLE_SEED=7 BATTLE_OPPONENT=dire_wolf BATTLE_WEATHER=storm cargo run -p battle-sim
//! ```
mod config;
mod policy;
mod sinks;

use anyhow::{Result, anyhow};
use battle_content::ContentFactory;
use battle_core::{
    BattleEngine, BattleEnv, EncounterSummary, OutcomeSinks, PcgRng, TurnReport,
    dispatch_summary, start_encounter,
};
use config::SimConfig;
use policy::GreedyPolicy;
use sinks::LoggingSinks;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = SimConfig::from_env();
    setup_logging();

    let factory = ContentFactory::new(config.content_dir.clone());
    let battle_config = factory.load_config()?;
    let catalog = factory.load_abilities()?;
    let roster = factory.load_opponents(&catalog)?;
    let player = factory.load_player(&catalog)?;

    let opponent = match &config.opponent {
        Some(id) => roster
            .get(id)
            .ok_or_else(|| anyhow!("unknown opponent `{id}`"))?,
        None => roster
            .iter()
            .next()
            .ok_or_else(|| anyhow!("opponent roster is empty"))?,
    }
    .clone();

    tracing::info!(
        seed = config.seed,
        opponent = %opponent.id,
        context = ?config.context,
        "starting simulation"
    );

    let policy = GreedyPolicy::new(&player.abilities, &catalog);
    let mut rng = PcgRng::seeded(config.seed);
    let mut env = BattleEnv::new(&catalog, &mut rng, &battle_config).with_context(config.context);
    let mut session = start_encounter(player.sheet, opponent, &battle_config);

    while !session.is_terminal() && session.turn() <= config.max_turns {
        let queue = policy.plan(&session);
        let mut engine = BattleEngine::new(&mut session);
        let report = if queue.is_empty() {
            engine.tick(&mut env)?
        } else {
            engine.submit_player_action(&mut env, &queue)?
        };
        print_report(&report);
    }

    let Some(summary) = EncounterSummary::from_session(&session) else {
        tracing::warn!(turns = session.turn(), "encounter abandoned at turn limit");
        return Ok(());
    };

    println!(
        "{} after {} turns (HP {}/{}, MP {}/{})",
        summary.state,
        summary.turns,
        summary.player_hp,
        summary.player_max_hp,
        summary.player_mp,
        summary.player_max_mp
    );

    let mut rewards = LoggingSinks;
    let mut persistence = LoggingSinks;
    let mut presentation = LoggingSinks;
    let mut proficiency = LoggingSinks;
    dispatch_summary(
        &summary,
        &mut OutcomeSinks {
            rewards: &mut rewards,
            persistence: &mut persistence,
            presentation: &mut presentation,
            proficiency: &mut proficiency,
        },
    );

    Ok(())
}

fn print_report(report: &TurnReport) {
    for entry in &report.entries {
        match entry.amount {
            Some(amount) => println!(
                "[{:>3}] {:<8} {} ({amount})",
                entry.turn,
                entry.actor.as_ref(),
                entry.message
            ),
            None => println!(
                "[{:>3}] {:<8} {}",
                entry.turn,
                entry.actor.as_ref(),
                entry.message
            ),
        }
    }
}

/// Setup logging to stderr so stdout carries only the encounter log.
fn setup_logging() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
