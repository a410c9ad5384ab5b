#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Ambient income system that drops collectible pickups from the sky at
//! randomized intervals while the game runs.

use std::{ops::RangeInclusive, time::Duration};

use garden_defense_core::{Command, Lifecycle};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::trace;

const COOLDOWN_MS: RangeInclusive<u64> = 7_000..=11_000;
const REST_HEIGHT: RangeInclusive<f32> = 220.0..=440.0;
/// Horizontal clearance kept between a drop and either playfield edge.
const EDGE_MARGIN: f32 = 20.0;

/// Configuration parameters required to construct the sky-drop system.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    rng_seed: u64,
}

impl Config {
    /// Creates a new configuration using the provided seed.
    #[must_use]
    pub const fn new(rng_seed: u64) -> Self {
        Self { rng_seed }
    }
}

/// Timer that emits a pickup drop each time its randomized cooldown elapses.
#[derive(Debug)]
pub struct SkyDrops {
    rng: ChaCha8Rng,
    elapsed: Duration,
    threshold: Duration,
}

impl SkyDrops {
    /// Creates a new sky-drop system using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(config.rng_seed);
        let threshold = draw_threshold(&mut rng);
        Self {
            rng,
            elapsed: Duration::ZERO,
            threshold,
        }
    }

    /// Cooldown that must be exceeded before the next drop.
    #[must_use]
    pub const fn threshold(&self) -> Duration {
        self.threshold
    }

    /// Restarts the timer with a freshly drawn cooldown.
    pub fn reset(&mut self) {
        self.elapsed = Duration::ZERO;
        self.threshold = draw_threshold(&mut self.rng);
    }

    /// Advances the timer by `dt` and emits a drop once the cooldown is
    /// exceeded. Time only counts while the game is running.
    pub fn handle(
        &mut self,
        lifecycle: Lifecycle,
        dt: Duration,
        playfield_width: f32,
        out: &mut Vec<Command>,
    ) {
        if lifecycle != Lifecycle::Running {
            return;
        }

        self.elapsed = self.elapsed.saturating_add(dt);
        if self.elapsed <= self.threshold {
            return;
        }

        let span = (playfield_width - 2.0 * EDGE_MARGIN).max(0.0);
        let x = EDGE_MARGIN + self.rng.gen_range(0.0..=span);
        let rest_height = self.rng.gen_range(REST_HEIGHT);
        trace!(x, rest_height, "pickup falls from the sky");
        out.push(Command::DropPickup { x, rest_height });

        self.elapsed = Duration::ZERO;
        self.threshold = draw_threshold(&mut self.rng);
    }
}

fn draw_threshold(rng: &mut ChaCha8Rng) -> Duration {
    Duration::from_millis(rng.gen_range(COOLDOWN_MS))
}
