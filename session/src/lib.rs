#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Host-facing game session that wires the world to its systems.
//!
//! A host drives the session with [`Session::advance`] once per frame and
//! issues player intents through the remaining methods. Every event the world
//! emits is buffered until the host drains it.

use std::time::Duration;

use garden_defense_core::{
    CellCoord, Command, DefenderId, DefenderKind, Event, GameConfig, Lifecycle, PlacementError,
    WorldPoint, WorldSnapshot,
};
use garden_defense_system_sky_drops::{Config as SkyDropsConfig, SkyDrops};
use garden_defense_system_spawning::{Config as SpawningConfig, Spawning};
use garden_defense_world::{self as world, query, World};
use tracing::debug;

/// Mixed into the seed so the two random streams never coincide.
const SKY_DROPS_SALT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Parameters used to build a [`Session`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SessionConfig {
    /// Rules of the world.
    pub game: GameConfig,
    /// Seed shared by the randomized systems.
    pub seed: u64,
}

impl SessionConfig {
    /// Creates a configuration from its parts.
    #[must_use]
    pub const fn new(game: GameConfig, seed: u64) -> Self {
        Self { game, seed }
    }
}

/// One play-through of Garden Defense.
#[derive(Debug)]
pub struct Session {
    world: World,
    spawning: Spawning,
    sky_drops: SkyDrops,
    events: Vec<Event>,
    muted: bool,
}

impl Session {
    /// Creates an idle session.
    #[must_use]
    pub fn new(config: SessionConfig) -> Self {
        Self {
            world: World::with_config(config.game),
            spawning: Spawning::new(SpawningConfig::new(config.seed)),
            sky_drops: SkyDrops::new(SkyDropsConfig::new(config.seed ^ SKY_DROPS_SALT)),
            events: Vec::new(),
            muted: false,
        }
    }

    /// Advances the simulation by one frame.
    ///
    /// Ambient drops are resolved before the world ticks so that a drop is
    /// part of the same frame.
    pub fn advance(&mut self, dt: Duration) {
        let mut drops = Vec::new();
        self.sky_drops.handle(
            query::lifecycle(&self.world),
            dt,
            query::config(&self.world).width(),
            &mut drops,
        );
        for command in drops {
            let _ = self.dispatch(command);
        }
        let _ = self.dispatch(Command::Tick { dt });
    }

    /// Starts or continues play and requests the next wave if none is active.
    pub fn start(&mut self) {
        let _ = self.dispatch(Command::Start);
    }

    /// Freezes the simulation.
    pub fn pause(&mut self) {
        let _ = self.dispatch(Command::Pause);
    }

    /// Unfreezes the simulation.
    pub fn resume(&mut self) {
        let _ = self.dispatch(Command::Resume);
    }

    /// Switches between running and paused. Other states are left alone.
    pub fn toggle_pause(&mut self) {
        match query::lifecycle(&self.world) {
            Lifecycle::Running => self.pause(),
            Lifecycle::Paused => self.resume(),
            Lifecycle::Idle | Lifecycle::Won | Lifecycle::Lost => {}
        }
    }

    /// Returns the session to its initial idle state.
    pub fn reset(&mut self) {
        let _ = self.dispatch(Command::Reset);
        self.sky_drops.reset();
    }

    /// Plants a defender in the cell.
    pub fn place(&mut self, kind: DefenderKind, cell: CellCoord) -> Result<DefenderId, PlacementError> {
        let emitted = self.dispatch(Command::PlaceDefender { kind, cell });
        for event in emitted {
            match event {
                Event::DefenderPlaced { defender, .. } => return Ok(*defender),
                Event::PlacementRejected { reason, .. } => return Err(*reason),
                _ => {}
            }
        }
        Err(PlacementError::GameOver)
    }

    /// Clears the cell without refund. Reports whether a defender was removed.
    pub fn remove(&mut self, cell: CellCoord) -> bool {
        self.dispatch(Command::RemoveDefender { cell })
            .iter()
            .any(|event| matches!(event, Event::DefenderRemoved { .. }))
    }

    /// Collects a pickup under the point. Reports whether one was taken.
    pub fn collect_at(&mut self, point: WorldPoint) -> bool {
        self.dispatch(Command::CollectAt { point })
            .iter()
            .any(|event| matches!(event, Event::PickupCollected { .. }))
    }

    /// Records whether the host should silence audio cues.
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Whether audio cues are silenced.
    #[must_use]
    pub const fn is_muted(&self) -> bool {
        self.muted
    }

    /// Captures the read-only state consumed by renderers.
    #[must_use]
    pub fn snapshot(&self) -> WorldSnapshot {
        query::snapshot(&self.world)
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn lifecycle(&self) -> Lifecycle {
        query::lifecycle(&self.world)
    }

    /// Current resource balance.
    #[must_use]
    pub fn balance(&self) -> u32 {
        query::balance(&self.world)
    }

    /// Current wave number.
    #[must_use]
    pub fn wave(&self) -> u32 {
        query::wave(&self.world)
    }

    /// Read-only access to the underlying world for [`query`] calls.
    #[must_use]
    pub const fn world(&self) -> &World {
        &self.world
    }

    /// Takes every event buffered since the previous drain.
    pub fn drain_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    /// Applies a command and routes the resulting events through the spawner
    /// until no system has anything left to say. Returns the events this
    /// command produced.
    fn dispatch(&mut self, command: Command) -> &[Event] {
        let start = self.events.len();
        let mut pending = vec![command];

        while !pending.is_empty() {
            let mut emitted = Vec::new();
            for command in pending.drain(..) {
                world::apply(&mut self.world, command, &mut emitted);
            }

            let lanes = query::config(&self.world).rows;
            self.spawning.handle(&emitted, lanes, &mut pending);
            if !pending.is_empty() {
                debug!(commands = pending.len(), "systems responded");
            }
            self.events.extend(emitted);
        }

        &self.events[start..]
    }
}
