#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs a headless Garden Defense session.

mod layout;

use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{Context, Result};
use clap::Parser;
use garden_defense_core::{Event, GameConfig, Lifecycle};
use garden_defense_session::{Session, SessionConfig};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use crate::layout::PlantSpec;

/// Command-line arguments accepted by the Garden Defense runner.
#[derive(Debug, Parser)]
#[command(
    name = "garden-defense",
    version,
    about = "Welcome to Garden Defense. Runs a headless session and reports the outcome"
)]
struct CliArgs {
    /// TOML file overriding the built-in game configuration.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Seed for wave composition and sky drops.
    #[arg(long, default_value_t = 0x5eed)]
    seed: u64,
    /// Simulated milliseconds per frame.
    #[arg(long, default_value_t = 16, value_parser = clap::value_parser!(u64).range(1..))]
    frame_ms: u64,
    /// Frames to simulate before giving up.
    #[arg(long, default_value_t = 60_000)]
    max_frames: u64,
    /// Defender planted before the first wave, written KIND@ROW,COL.
    #[arg(long = "plant", value_name = "KIND@ROW,COL")]
    plants: Vec<PlantSpec>,
    /// Log filter used when RUST_LOG is unset.
    #[arg(long, default_value = "info")]
    log_level: String,
}

/// Tallies gathered while the session runs.
#[derive(Debug, Default)]
struct Summary {
    frames: u64,
    waves_cleared: u32,
    attackers_defeated: u32,
    pickups_collected: u32,
    defenders_lost: u32,
}

/// Entry point for the Garden Defense command-line interface.
fn main() -> Result<()> {
    let args = CliArgs::parse();
    init_tracing(&args.log_level);

    let game = load_config(args.config.as_deref())?;
    let total_waves = game.total_waves;
    let mut session = Session::new(SessionConfig::new(game, args.seed));
    info!(seed = args.seed, total_waves, "garden ready");

    for plant in &args.plants {
        let defender = session
            .place(plant.kind, plant.cell)
            .with_context(|| format!("failed to plant {} at {:?}", plant.kind, plant.cell))?;
        debug!(defender = defender.get(), kind = %plant.kind, "planted");
    }

    let summary = run(
        &mut session,
        Duration::from_millis(args.frame_ms),
        args.max_frames,
    );

    match session.lifecycle() {
        Lifecycle::Won => println!(
            "The garden held: all {total_waves} waves cleared in {} frames.",
            summary.frames
        ),
        Lifecycle::Lost => println!(
            "The garden fell during wave {} after {} frames.",
            session.wave(),
            summary.frames
        ),
        Lifecycle::Idle | Lifecycle::Running | Lifecycle::Paused => println!(
            "Stopped after {} frames during wave {}.",
            summary.frames,
            session.wave()
        ),
    }
    println!(
        "Waves cleared: {}, attackers defeated: {}, defenders lost: {}, pickups collected: {}, balance: {}",
        summary.waves_cleared,
        summary.attackers_defeated,
        summary.defenders_lost,
        summary.pickups_collected,
        session.balance()
    );
    Ok(())
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .try_init();
}

fn load_config(path: Option<&Path>) -> Result<GameConfig> {
    let Some(path) = path else {
        return Ok(GameConfig::default());
    };
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let config: GameConfig = toml::from_str(&raw)
        .with_context(|| format!("failed to parse config {}", path.display()))?;
    config
        .validate()
        .with_context(|| format!("invalid config {}", path.display()))?;
    info!(path = %path.display(), "loaded configuration");
    Ok(config)
}

/// Drives the session until it ends or the frame budget runs out. Waves are
/// started back to back and every pickup is collected as soon as it appears.
fn run(session: &mut Session, frame: Duration, max_frames: u64) -> Summary {
    let mut summary = Summary::default();
    session.start();

    while summary.frames < max_frames && !session.lifecycle().is_terminal() {
        session.advance(frame);
        summary.frames += 1;

        let mut next_wave = false;
        for event in session.drain_events() {
            match event {
                Event::WaveCleared { .. } => {
                    summary.waves_cleared += 1;
                    next_wave = true;
                }
                Event::AttackerDefeated { .. } => summary.attackers_defeated += 1,
                Event::DefenderDestroyed { .. } => summary.defenders_lost += 1,
                Event::GameLost { attacker } => {
                    warn!(attacker = attacker.get(), "an attacker reached the house");
                }
                Event::TimeAdvanced { .. } => {}
                other => debug!(event = ?other),
            }
        }

        for pickup in session.snapshot().pickups {
            if session.collect_at(pickup.position) {
                summary.pickups_collected += 1;
            }
        }

        if next_wave && !session.lifecycle().is_terminal() {
            session.start();
        }
    }

    summary
}
