#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Garden Defense.
//!
//! The world is mutated exclusively through [`apply`]. Each tick runs a fixed
//! sequence of phases: due scheduled events, defender behaviour, pickup aging,
//! projectile resolution, attacker resolution, explosion aging and finally
//! wave-clear evaluation. An attacker breaking through ends the tick early.

use std::{ops::ControlFlow, time::Duration};

use garden_defense_core::{
    AttackerId, CellCoord, Command, DefenderBehavior, DefenderKind, Event, GameConfig, Lifecycle,
    PickupId, PlacementError, ScheduledSpawn,
};
use tracing::{debug, info};

mod combat;
mod economy;
mod grid;
mod schedule;

use combat::{Attacker, Explosion, Projectile};
use economy::Pickup;
use grid::DefenderGrid;
use schedule::{EventQueue, ScheduledAction};

/// Represents the authoritative Garden Defense world state.
#[derive(Debug)]
pub struct World {
    config: GameConfig,
    grid: DefenderGrid,
    attackers: Vec<Attacker>,
    projectiles: Vec<Projectile>,
    pickups: Vec<Pickup>,
    explosions: Vec<Explosion>,
    balance: u32,
    wave: u32,
    in_wave: bool,
    pending_spawns: u32,
    lifecycle: Lifecycle,
    clock: Duration,
    schedule: EventQueue,
    next_attacker_id: AttackerId,
    next_pickup_id: PickupId,
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

impl World {
    /// Creates a world using the built-in configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(GameConfig::default())
    }

    /// Creates a world for the provided configuration.
    ///
    /// The configuration is expected to have passed
    /// [`GameConfig::validate`].
    #[must_use]
    pub fn with_config(config: GameConfig) -> Self {
        Self {
            grid: DefenderGrid::new(config.columns, config.rows),
            attackers: Vec::new(),
            projectiles: Vec::new(),
            pickups: Vec::new(),
            explosions: Vec::new(),
            balance: config.starting_balance,
            wave: 1,
            in_wave: false,
            pending_spawns: 0,
            lifecycle: Lifecycle::Idle,
            clock: Duration::ZERO,
            schedule: EventQueue::new(),
            next_attacker_id: AttackerId::new(0),
            next_pickup_id: PickupId::new(0),
            config,
        }
    }

    fn reset(&mut self) {
        self.schedule.clear();
        *self = Self::with_config(self.config.clone());
    }

    fn set_lifecycle(&mut self, lifecycle: Lifecycle, out_events: &mut Vec<Event>) {
        if self.lifecycle == lifecycle {
            return;
        }
        self.lifecycle = lifecycle;
        out_events.push(Event::LifecycleChanged { lifecycle });
    }

    fn place_defender(&mut self, kind: DefenderKind, cell: CellCoord) -> Result<(), PlacementError> {
        if self.lifecycle.is_terminal() {
            return Err(PlacementError::GameOver);
        }
        if !self.grid.contains(cell) {
            return Err(PlacementError::OutOfBounds);
        }
        if !self.grid.is_empty_at(cell) {
            return Err(PlacementError::Occupied);
        }

        let stats = kind.stats();
        if self.balance < stats.cost {
            return Err(PlacementError::InsufficientResource {
                required: stats.cost,
                available: self.balance,
            });
        }

        let defender = self
            .grid
            .insert(kind, cell)
            .ok_or(PlacementError::Occupied)?;
        self.balance -= stats.cost;

        if let DefenderBehavior::Bomb { arm_delay, .. } = stats.behavior {
            let due = self.clock.saturating_add(arm_delay);
            let handle = self
                .schedule
                .schedule(due, ScheduledAction::Detonate { defender, cell });
            if let Some(state) = self.grid.get_mut(cell) {
                state.arm_event = Some(handle);
            }
        }

        Ok(())
    }

    fn remove_defender(&mut self, cell: CellCoord, out_events: &mut Vec<Event>) {
        let Some(defender) = self.grid.take(cell) else {
            return;
        };
        if let Some(handle) = defender.arm_event {
            self.schedule.cancel(handle);
        }
        out_events.push(Event::DefenderRemoved {
            defender: defender.id,
            cell,
        });
    }

    fn schedule_wave(&mut self, wave: u32, spawns: Vec<ScheduledSpawn>, out_events: &mut Vec<Event>) {
        if self.lifecycle.is_terminal() || self.in_wave {
            debug!(wave, "wave already in progress; ignoring schedule");
            return;
        }
        if wave != self.wave {
            debug!(wave, current = self.wave, "ignoring schedule for another wave");
            return;
        }

        for spawn in &spawns {
            let due = self.clock.saturating_add(spawn.delay);
            let _ = self.schedule.schedule(
                due,
                ScheduledAction::SpawnAttacker {
                    lane: spawn.lane,
                    kind: spawn.kind,
                    boost: spawn.boost,
                },
            );
        }

        let attackers = u32::try_from(spawns.len()).unwrap_or(u32::MAX);
        self.in_wave = true;
        self.pending_spawns = attackers;
        info!(wave, attackers, "wave started");
        out_events.push(Event::WaveStarted { wave, attackers });
    }

    fn fire_due_events(&mut self, out_events: &mut Vec<Event>) {
        while let Some(action) = self.schedule.pop_due(self.clock) {
            match action {
                ScheduledAction::SpawnAttacker { lane, kind, boost } => {
                    self.pending_spawns = self.pending_spawns.saturating_sub(1);
                    self.spawn_attacker(lane, kind, boost, out_events);
                }
                ScheduledAction::Detonate { defender, cell } => {
                    self.detonate(defender, cell, out_events);
                }
            }
        }
    }

    fn evaluate_wave_clear(&mut self, out_events: &mut Vec<Event>) {
        if !self.in_wave || !self.attackers.is_empty() || self.pending_spawns > 0 {
            return;
        }

        info!(wave = self.wave, "wave cleared");
        self.in_wave = false;
        out_events.push(Event::WaveCleared { wave: self.wave });
        self.wave = self.wave.saturating_add(1);

        if self.wave > self.config.total_waves {
            info!("final wave cleared");
            out_events.push(Event::GameWon);
            self.set_lifecycle(Lifecycle::Won, out_events);
        }
    }

    fn tick(&mut self, dt: Duration, out_events: &mut Vec<Event>) {
        self.clock = self.clock.saturating_add(dt);
        out_events.push(Event::TimeAdvanced { dt });

        self.fire_due_events(out_events);
        self.run_defenders(dt, out_events);
        self.age_pickups(dt, out_events);
        self.resolve_projectiles(dt, out_events);
        if let ControlFlow::Break(()) = self.resolve_attackers(dt, out_events) {
            return;
        }
        self.age_explosions(dt);
        self.evaluate_wave_clear(out_events);
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::Tick { dt } => {
            if world.lifecycle == Lifecycle::Running {
                world.tick(dt, out_events);
            }
        }
        Command::Start => {
            if world.lifecycle.is_terminal() {
                debug!(lifecycle = ?world.lifecycle, "ignoring start after the game ended");
                return;
            }
            world.set_lifecycle(Lifecycle::Running, out_events);
            if !world.in_wave {
                out_events.push(Event::WaveRequested { wave: world.wave });
            }
        }
        Command::Pause => {
            if world.lifecycle == Lifecycle::Running {
                world.set_lifecycle(Lifecycle::Paused, out_events);
            }
        }
        Command::Resume => {
            if world.lifecycle == Lifecycle::Paused {
                world.set_lifecycle(Lifecycle::Running, out_events);
            }
        }
        Command::Reset => {
            let previous = world.lifecycle;
            world.reset();
            info!(?previous, "world reset");
            out_events.push(Event::LifecycleChanged {
                lifecycle: Lifecycle::Idle,
            });
        }
        Command::PlaceDefender { kind, cell } => match world.place_defender(kind, cell) {
            Ok(()) => {
                if let Some(defender) = world.grid.get(cell) {
                    out_events.push(Event::DefenderPlaced {
                        defender: defender.id,
                        kind,
                        cell,
                    });
                }
            }
            Err(reason) => {
                debug!(%kind, ?cell, %reason, "placement rejected");
                out_events.push(Event::PlacementRejected { kind, cell, reason });
            }
        },
        Command::RemoveDefender { cell } => {
            if !world.lifecycle.is_terminal() {
                world.remove_defender(cell, out_events);
            }
        }
        Command::CollectAt { point } => {
            if !world.lifecycle.is_terminal() {
                world.collect_at(point, out_events);
            }
        }
        Command::DropPickup { x, rest_height } => {
            if !world.lifecycle.is_terminal() {
                world.drop_pickup(x, rest_height, out_events);
            }
        }
        Command::ScheduleWave { wave, spawns } => {
            world.schedule_wave(wave, spawns, out_events);
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use std::time::Duration;

    use super::World;
    use garden_defense_core::{
        AttackerSnapshot, CellCoord, DefenderSnapshot, ExplosionSnapshot, GameConfig, Lifecycle,
        PickupSnapshot, ProjectileSnapshot, WorldSnapshot,
    };

    /// Provides read-only access to the world's configuration.
    #[must_use]
    pub fn config(world: &World) -> &GameConfig {
        &world.config
    }

    /// Reports whether a defender could be planted at the cell.
    #[must_use]
    pub fn can_place(world: &World, cell: CellCoord) -> bool {
        world.grid.contains(cell) && world.grid.is_empty_at(cell)
    }

    /// Returns the defender occupying the cell, if any.
    #[must_use]
    pub fn defender_at(world: &World, cell: CellCoord) -> Option<DefenderSnapshot> {
        world.grid.get(cell).map(|defender| DefenderSnapshot {
            id: defender.id,
            kind: defender.kind,
            cell,
            health: defender.health,
        })
    }

    /// Captures every planted defender in row-major order.
    #[must_use]
    pub fn defenders(world: &World) -> Vec<DefenderSnapshot> {
        world.grid.snapshots()
    }

    /// Captures every live attacker in spawn order.
    #[must_use]
    pub fn attackers(world: &World) -> Vec<AttackerSnapshot> {
        world.attackers.iter().map(|attacker| attacker.snapshot()).collect()
    }

    /// Captures every in-flight projectile.
    #[must_use]
    pub fn projectiles(world: &World) -> Vec<ProjectileSnapshot> {
        world
            .projectiles
            .iter()
            .map(|projectile| projectile.snapshot())
            .collect()
    }

    /// Captures every uncollected pickup.
    #[must_use]
    pub fn pickups(world: &World) -> Vec<PickupSnapshot> {
        world.pickups.iter().map(|pickup| pickup.snapshot()).collect()
    }

    /// Captures every visible explosion ring.
    #[must_use]
    pub fn explosions(world: &World) -> Vec<ExplosionSnapshot> {
        world
            .explosions
            .iter()
            .map(|explosion| explosion.snapshot())
            .collect()
    }

    /// Current resource balance.
    #[must_use]
    pub fn balance(world: &World) -> u32 {
        world.balance
    }

    /// Current wave number, starting at one.
    #[must_use]
    pub fn wave(world: &World) -> u32 {
        world.wave
    }

    /// Reports whether a wave is in progress.
    #[must_use]
    pub fn in_wave(world: &World) -> bool {
        world.in_wave
    }

    /// Current lifecycle of the session.
    #[must_use]
    pub fn lifecycle(world: &World) -> Lifecycle {
        world.lifecycle
    }

    /// Simulation time accumulated while running.
    #[must_use]
    pub fn clock(world: &World) -> Duration {
        world.clock
    }

    /// Number of wave spawns that have not fired yet.
    #[must_use]
    pub fn pending_spawns(world: &World) -> u32 {
        world.pending_spawns
    }

    /// Number of scheduled events of any kind that have not fired yet.
    #[must_use]
    pub fn scheduled_events(world: &World) -> usize {
        world.schedule.len()
    }

    /// Captures the complete read-only snapshot consumed by renderers.
    #[must_use]
    pub fn snapshot(world: &World) -> WorldSnapshot {
        let (columns, rows) = world.grid.dimensions();
        WorldSnapshot {
            columns,
            rows,
            tile_length: world.config.tile_length,
            defenders: defenders(world),
            attackers: attackers(world),
            projectiles: projectiles(world),
            pickups: pickups(world),
            explosions: explosions(world),
            balance: world.balance,
            wave: world.wave,
            total_waves: world.config.total_waves,
            in_wave: world.in_wave,
            lifecycle: world.lifecycle,
        }
    }
}
