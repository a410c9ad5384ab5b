#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic spawning system that answers wave requests with a complete
//! spawn schedule.

use std::time::Duration;

use garden_defense_core::{AttackerKind, Command, Event, ScheduledSpawn};
use rand::{seq::SliceRandom, Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, warn};

const BASE_ATTACKERS: u32 = 5;
const ATTACKERS_PER_WAVE: u32 = 2;
const FIRST_DELAY: Duration = Duration::from_millis(600);
const SPACING: Duration = Duration::from_millis(450);
const JITTER_MS: u64 = 600;
/// Spawns sharing one boost step before the next bump.
const BOOST_STRIDE: u32 = 5;
const BOOST_PER_WAVE: f32 = 0.3;

const POOL_FIRST: &[AttackerKind] = &[AttackerKind::Shambling];
const POOL_SECOND: &[AttackerKind] = &[AttackerKind::Fast, AttackerKind::Shambling];
const POOL_THIRD: &[AttackerKind] = &[
    AttackerKind::Fast,
    AttackerKind::Armored,
    AttackerKind::Shambling,
];
const POOL_LATE: &[AttackerKind] = &[
    AttackerKind::Fast,
    AttackerKind::Armored,
    AttackerKind::Tank,
    AttackerKind::Shambling,
];

/// Configuration parameters required to construct the spawning system.
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

/// Number of attackers a wave brings.
#[must_use]
pub const fn attacker_count(wave: u32) -> u32 {
    BASE_ATTACKERS.saturating_add(ATTACKERS_PER_WAVE.saturating_mul(wave))
}

/// Attacker types a wave draws from. Later waves unlock tougher types.
#[must_use]
pub const fn attacker_pool(wave: u32) -> &'static [AttackerKind] {
    match wave {
        0 | 1 => POOL_FIRST,
        2 => POOL_SECOND,
        3 => POOL_THIRD,
        _ => POOL_LATE,
    }
}

/// Difficulty multiplier for the `index`-th spawn of a wave.
#[must_use]
pub fn boost(wave: u32, index: u32) -> f32 {
    1.0 + (index / BOOST_STRIDE) as f32 + BOOST_PER_WAVE * wave.saturating_sub(1) as f32
}

/// Pure system that turns wave requests into scheduled spawns.
#[derive(Debug)]
pub struct Spawning {
    rng: ChaCha8Rng,
}

impl Spawning {
    /// Creates a new spawning system using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(config.rng_seed),
        }
    }

    /// Consumes events and emits a `ScheduleWave` command per wave request.
    pub fn handle(&mut self, events: &[Event], lanes: u32, out: &mut Vec<Command>) {
        for event in events {
            let Event::WaveRequested { wave } = event else {
                continue;
            };
            if lanes == 0 {
                warn!(wave, "cannot plan a wave without lanes");
                continue;
            }

            let spawns = self.plan_wave(*wave, lanes);
            debug!(wave, attackers = spawns.len(), "planned wave");
            out.push(Command::ScheduleWave {
                wave: *wave,
                spawns,
            });
        }
    }

    /// Draws the lane, type and delay of every spawn in the wave.
    pub fn plan_wave(&mut self, wave: u32, lanes: u32) -> Vec<ScheduledSpawn> {
        let pool = attacker_pool(wave);
        (0..attacker_count(wave))
            .map(|index| {
                let lane = self.rng.gen_range(0..lanes.max(1));
                let kind = pool
                    .choose(&mut self.rng)
                    .copied()
                    .unwrap_or(AttackerKind::Shambling);
                let jitter = Duration::from_millis(self.rng.gen_range(0..JITTER_MS));
                ScheduledSpawn {
                    lane,
                    kind,
                    boost: boost(wave, index),
                    delay: FIRST_DELAY + SPACING * index + jitter,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pools_grow_with_the_wave() {
        assert_eq!(attacker_pool(1), &[AttackerKind::Shambling]);
        assert_eq!(attacker_pool(2).len(), 2);
        assert_eq!(attacker_pool(3).len(), 3);
        assert_eq!(attacker_pool(4), attacker_pool(12));
        assert!(attacker_pool(4).contains(&AttackerKind::Tank));
    }

    #[test]
    fn boost_steps_every_five_spawns() {
        assert!((boost(1, 0) - 1.0).abs() < f32::EPSILON);
        assert!((boost(1, 4) - 1.0).abs() < f32::EPSILON);
        assert!((boost(1, 5) - 2.0).abs() < f32::EPSILON);
        assert!((boost(3, 0) - 1.6).abs() < 1e-6);
        assert!((boost(5, 14) - 4.2).abs() < 1e-6);
    }

    #[test]
    fn counts_follow_the_wave_curve() {
        assert_eq!(attacker_count(1), 7);
        assert_eq!(attacker_count(5), 15);
    }
}
