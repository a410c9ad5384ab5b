#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Garden Defense engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for systems and
//! presentation collaborators to react to. Systems consume event streams and
//! respond exclusively with new command batches.
//!
//! Static entity definitions live here as well: [`DefenderKind`] and
//! [`AttackerKind`] resolve to immutable stat tables and carry no behaviour of
//! their own.

use std::{fmt, str::FromStr, time::Duration};

use serde::{Deserialize, Serialize};
use thiserror::Error;

mod config;

pub use config::{ConfigError, GameConfig};

/// Lifecycle of a play session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Lifecycle {
    /// Fresh or freshly reset session waiting for the first start.
    Idle,
    /// The simulation advances on every tick.
    Running,
    /// Ticks are ignored; scheduled events stay frozen.
    Paused,
    /// Every wave was cleared.
    Won,
    /// An attacker crossed the defended boundary.
    Lost,
}

impl Lifecycle {
    /// Reports whether the session reached a terminal state.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Advances the simulation clock by the provided delta time.
    Tick {
        /// Duration of simulated time that elapsed since the previous tick.
        dt: Duration,
    },
    /// Starts the session, requesting the current wave if none is active.
    Start,
    /// Suspends ticking while the session is running.
    Pause,
    /// Resumes a paused session.
    Resume,
    /// Cancels all scheduled events and restores the initial world.
    Reset,
    /// Requests placement of a defender into a grid cell.
    PlaceDefender {
        /// Type of defender to plant.
        kind: DefenderKind,
        /// Target cell.
        cell: CellCoord,
    },
    /// Clears a grid cell without refund.
    RemoveDefender {
        /// Cell to clear.
        cell: CellCoord,
    },
    /// Attempts to collect a pickup near the provided point.
    CollectAt {
        /// Probe location in world units.
        point: WorldPoint,
    },
    /// Drops an aerial pickup that falls toward a resting height.
    DropPickup {
        /// Horizontal position of the pickup in world units.
        x: f32,
        /// Height at which the pickup stops falling.
        rest_height: f32,
    },
    /// Installs the spawn schedule for a wave.
    ScheduleWave {
        /// Wave number the schedule belongs to.
        wave: u32,
        /// Attackers to spawn, each with its delay from the wave start.
        spawns: Vec<ScheduledSpawn>,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
    },
    /// Announces a lifecycle transition.
    LifecycleChanged {
        /// Lifecycle after the transition.
        lifecycle: Lifecycle,
    },
    /// Asks the spawner for the schedule of the given wave.
    WaveRequested {
        /// Wave awaiting a schedule.
        wave: u32,
    },
    /// Confirms that a wave schedule was installed.
    WaveStarted {
        /// Wave that started.
        wave: u32,
        /// Number of attackers scheduled for the wave.
        attackers: u32,
    },
    /// Reports that a wave was fully spawned and defeated.
    WaveCleared {
        /// Wave that was cleared.
        wave: u32,
    },
    /// The final wave was cleared.
    GameWon,
    /// An attacker reached the defended boundary.
    GameLost {
        /// Attacker that crossed the boundary.
        attacker: AttackerId,
    },
    /// Confirms that a scheduled attacker entered the playfield.
    AttackerSpawned {
        /// Identifier assigned to the attacker.
        attacker: AttackerId,
        /// Type of the attacker.
        kind: AttackerKind,
        /// Lane the attacker walks along.
        lane: u32,
    },
    /// Reports that an attacker ran out of health.
    AttackerDefeated {
        /// Identifier of the defeated attacker.
        attacker: AttackerId,
    },
    /// Confirms that a defender was placed.
    DefenderPlaced {
        /// Identifier assigned to the defender.
        defender: DefenderId,
        /// Type of the defender.
        kind: DefenderKind,
        /// Cell the defender occupies.
        cell: CellCoord,
    },
    /// Reports that a placement request was rejected.
    PlacementRejected {
        /// Requested defender type.
        kind: DefenderKind,
        /// Requested cell.
        cell: CellCoord,
        /// Specific reason the placement failed.
        reason: PlacementError,
    },
    /// Confirms that a defender was cleared from its cell on request.
    DefenderRemoved {
        /// Identifier of the removed defender.
        defender: DefenderId,
        /// Cell that was cleared.
        cell: CellCoord,
    },
    /// Reports that a defender was eaten or consumed by its own blast.
    DefenderDestroyed {
        /// Identifier of the destroyed defender.
        defender: DefenderId,
        /// Cell that was cleared.
        cell: CellCoord,
    },
    /// A defender fired a volley.
    ShotFired {
        /// Defender that fired.
        defender: DefenderId,
        /// Lane the projectiles travel along.
        lane: u32,
        /// Number of projectiles in the volley.
        volley: u32,
    },
    /// A projectile struck an attacker.
    HitLanded {
        /// Attacker that was struck.
        attacker: AttackerId,
        /// Damage applied by the projectile.
        damage: f32,
    },
    /// A bomb detonated.
    ExplosionTriggered {
        /// Center of the blast in world units.
        center: WorldPoint,
        /// Radius within which damage was applied.
        radius: f32,
        /// Number of attackers caught in the blast.
        victims: u32,
    },
    /// A support defender paid out resource.
    ResourceGenerated {
        /// Defender that produced the resource.
        defender: DefenderId,
        /// Amount credited to the balance.
        amount: u32,
    },
    /// An aerial pickup appeared.
    PickupDropped {
        /// Identifier assigned to the pickup.
        pickup: PickupId,
        /// Initial position of the pickup.
        position: WorldPoint,
    },
    /// A pickup was collected.
    PickupCollected {
        /// Identifier of the collected pickup.
        pickup: PickupId,
        /// Amount credited to the balance.
        amount: u32,
    },
    /// A pickup expired uncollected.
    PickupExpired {
        /// Identifier of the expired pickup.
        pickup: PickupId,
    },
}

/// Single attacker entry within a wave schedule.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScheduledSpawn {
    /// Lane the attacker enters on.
    pub lane: u32,
    /// Type of the attacker.
    pub kind: AttackerKind,
    /// Difficulty multiplier fixed for the attacker's lifetime.
    pub boost: f32,
    /// Delay from the wave start until the attacker enters.
    pub delay: Duration,
}

/// Visual tint attached to an attacker type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Tint {
    red: u8,
    green: u8,
    blue: u8,
}

impl Tint {
    /// Creates a new tint from byte RGB components.
    #[must_use]
    pub const fn from_rgb(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Red component of the tint.
    #[must_use]
    pub const fn red(&self) -> u8 {
        self.red
    }

    /// Green component of the tint.
    #[must_use]
    pub const fn green(&self) -> u8 {
        self.green
    }

    /// Blue component of the tint.
    #[must_use]
    pub const fn blue(&self) -> u8 {
        self.blue
    }
}

/// Unique identifier assigned to a defender.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DefenderId(u32);

impl DefenderId {
    /// Creates a new defender identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to an attacker.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AttackerId(u32);

impl AttackerId {
    /// Creates a new attacker identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a pickup.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PickupId(u32);

impl PickupId {
    /// Creates a new pickup identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Location of a single grid cell expressed as column and row coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell, which doubles as the lane index.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }
}

/// Continuous position on the playfield measured in world units.
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct WorldPoint {
    x: f32,
    y: f32,
}

impl WorldPoint {
    /// Creates a point from horizontal and vertical offsets.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Horizontal offset; attackers walk toward zero.
    #[must_use]
    pub const fn x(&self) -> f32 {
        self.x
    }

    /// Vertical offset; grows downward.
    #[must_use]
    pub const fn y(&self) -> f32 {
        self.y
    }

    /// Squared euclidean distance to another point.
    #[must_use]
    pub fn distance_squared(self, other: WorldPoint) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }
}

/// Behaviour class of a defender together with its type-specific parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DefenderBehavior {
    /// Fires projectiles down its lane whenever an attacker is ahead.
    Attack {
        /// Minimum time between volleys.
        fire_interval: Duration,
        /// Projectiles emitted per volley.
        volley: u32,
    },
    /// Pays out resource on a fixed cadence.
    Support {
        /// Time between payouts.
        payout_interval: Duration,
    },
    /// Detonates once after arming, damaging every attacker in range.
    Bomb {
        /// Delay between placement and detonation.
        arm_delay: Duration,
        /// Radius of the blast in world units.
        blast_radius: f32,
        /// Damage applied to each attacker in range.
        blast_damage: f32,
    },
    /// Obstacle without active behaviour.
    Block,
}

/// Static stat table for a defender type.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DefenderStats {
    /// Resource cost deducted on placement.
    pub cost: u32,
    /// Health the defender is planted with.
    pub max_health: f32,
    /// Behaviour class and its parameters.
    pub behavior: DefenderBehavior,
}

/// Types of defenders that can be planted on the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DefenderKind {
    /// Single-shot attacker.
    Peashooter,
    /// Two-projectile attacker with a faster cadence.
    Twinpea,
    /// Passive resource generator.
    Sunflower,
    /// Short-fused area bomb.
    CherryBomb,
    /// Sturdy blocker.
    Wallnut,
}

impl DefenderKind {
    /// Every defender type in card order.
    pub const ALL: [DefenderKind; 5] = [
        Self::Peashooter,
        Self::Twinpea,
        Self::Sunflower,
        Self::CherryBomb,
        Self::Wallnut,
    ];

    /// Returns the static stat table for the defender type.
    #[must_use]
    pub const fn stats(self) -> DefenderStats {
        match self {
            Self::Peashooter => DefenderStats {
                cost: 100,
                max_health: 5.0,
                behavior: DefenderBehavior::Attack {
                    fire_interval: Duration::from_millis(1_400),
                    volley: 1,
                },
            },
            Self::Twinpea => DefenderStats {
                cost: 175,
                max_health: 6.0,
                behavior: DefenderBehavior::Attack {
                    fire_interval: Duration::from_millis(1_200),
                    volley: 2,
                },
            },
            Self::Sunflower => DefenderStats {
                cost: 50,
                max_health: 4.0,
                behavior: DefenderBehavior::Support {
                    payout_interval: Duration::from_millis(9_000),
                },
            },
            Self::CherryBomb => DefenderStats {
                cost: 150,
                max_health: 1.0,
                behavior: DefenderBehavior::Bomb {
                    arm_delay: Duration::from_millis(1_000),
                    blast_radius: 120.0,
                    blast_damage: 999.0,
                },
            },
            Self::Wallnut => DefenderStats {
                cost: 50,
                max_health: 20.0,
                behavior: DefenderBehavior::Block,
            },
        }
    }

    /// Resource cost deducted on placement.
    #[must_use]
    pub const fn cost(self) -> u32 {
        self.stats().cost
    }

    /// Stable lowercase name used by adapters.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Peashooter => "peashooter",
            Self::Twinpea => "twinpea",
            Self::Sunflower => "sunflower",
            Self::CherryBomb => "cherry",
            Self::Wallnut => "wallnut",
        }
    }
}

impl fmt::Display for DefenderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a defender name does not match any known type.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unknown defender kind '{0}'")]
pub struct UnknownDefenderKind(pub String);

impl FromStr for DefenderKind {
    type Err = UnknownDefenderKind;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownDefenderKind(trimmed.to_owned()))
    }
}

/// Static stat table for an attacker type before wave scaling.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AttackerStats {
    /// Walking speed in world units per second.
    pub speed: f32,
    /// Health at a boost of one.
    pub health: f32,
    /// Damage applied to a defender per feed.
    pub bite_damage: f32,
    /// Time an attacker must spend feeding before each bite lands.
    pub feed_interval: Duration,
    /// Display tint for renderers.
    pub tint: Tint,
}

/// Types of attackers that walk the lanes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttackerKind {
    /// Baseline walker.
    Shambling,
    /// Quick and fragile.
    Fast,
    /// Slow with extra health.
    Armored,
    /// Slowest and toughest, bites harder.
    Tank,
}

impl AttackerKind {
    /// Returns the static stat table for the attacker type.
    #[must_use]
    pub const fn stats(self) -> AttackerStats {
        match self {
            Self::Shambling => AttackerStats {
                speed: 40.0,
                health: 6.0,
                bite_damage: 0.25,
                feed_interval: Duration::from_millis(500),
                tint: Tint::from_rgb(0xff, 0x6b, 0x6b),
            },
            Self::Fast => AttackerStats {
                speed: 65.0,
                health: 4.0,
                bite_damage: 0.25,
                feed_interval: Duration::from_millis(450),
                tint: Tint::from_rgb(0xff, 0x9f, 0x6e),
            },
            Self::Armored => AttackerStats {
                speed: 34.0,
                health: 11.0,
                bite_damage: 0.25,
                feed_interval: Duration::from_millis(520),
                tint: Tint::from_rgb(0xe2, 0x55, 0x55),
            },
            Self::Tank => AttackerStats {
                speed: 28.0,
                health: 18.0,
                bite_damage: 0.35,
                feed_interval: Duration::from_millis(520),
                tint: Tint::from_rgb(0xd9, 0x4a, 0x4a),
            },
        }
    }

    /// Health after applying the spawn-time boost.
    #[must_use]
    pub fn scaled_health(self, boost: f32) -> f32 {
        self.stats().health * (1.0 + 0.12 * (boost - 1.0))
    }

    /// Speed after applying the spawn-time boost.
    #[must_use]
    pub fn scaled_speed(self, boost: f32) -> f32 {
        self.stats().speed * (1.0 + 0.06 * (boost - 1.0))
    }
}

/// Reasons a defender placement request may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Error)]
pub enum PlacementError {
    /// The balance does not cover the defender's cost.
    #[error("not enough resource: {required} required, {available} available")]
    InsufficientResource {
        /// Cost of the requested defender.
        required: u32,
        /// Balance at the time of the request.
        available: u32,
    },
    /// The requested cell lies outside the grid.
    #[error("cell is outside the grid")]
    OutOfBounds,
    /// The requested cell already holds a defender.
    #[error("cell is occupied")]
    Occupied,
    /// The session has been won or lost.
    #[error("the game is over")]
    GameOver,
}

/// Immutable representation of a planted defender.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DefenderSnapshot {
    /// Identifier allocated to the defender by the world.
    pub id: DefenderId,
    /// Type of the defender.
    pub kind: DefenderKind,
    /// Cell occupied by the defender.
    pub cell: CellCoord,
    /// Remaining health.
    pub health: f32,
}

/// Immutable representation of a live attacker.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AttackerSnapshot {
    /// Identifier allocated to the attacker by the world.
    pub id: AttackerId,
    /// Type of the attacker.
    pub kind: AttackerKind,
    /// Lane the attacker walks along.
    pub lane: u32,
    /// Current position in world units.
    pub position: WorldPoint,
    /// Remaining health.
    pub health: f32,
    /// Health the attacker spawned with.
    pub max_health: f32,
    /// Spawn-time difficulty multiplier.
    pub boost: f32,
}

/// Immutable representation of an in-flight projectile.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectileSnapshot {
    /// Lane the projectile travels along.
    pub lane: u32,
    /// Current position in world units.
    pub position: WorldPoint,
    /// Damage applied on hit.
    pub damage: f32,
}

/// Immutable representation of a collectible pickup.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PickupSnapshot {
    /// Identifier allocated to the pickup by the world.
    pub id: PickupId,
    /// Current position in world units.
    pub position: WorldPoint,
    /// Hit-test radius in world units.
    pub radius: f32,
    /// Lifetime left before the pickup expires.
    pub remaining: Duration,
    /// Amount credited on collection.
    pub value: u32,
}

/// Immutable representation of an explosion ring.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ExplosionSnapshot {
    /// Center of the blast.
    pub center: WorldPoint,
    /// Current ring radius.
    pub radius: f32,
    /// Radius the ring grows toward.
    pub max_radius: f32,
    /// Time since detonation.
    pub elapsed: Duration,
    /// Time the ring stays visible.
    pub duration: Duration,
}

/// Read-only snapshot of the whole world queried by renderers each frame.
#[derive(Clone, Debug, PartialEq)]
pub struct WorldSnapshot {
    /// Number of grid columns.
    pub columns: u32,
    /// Number of grid rows (lanes).
    pub rows: u32,
    /// Side length of a grid cell in world units.
    pub tile_length: f32,
    /// Planted defenders in row-major order.
    pub defenders: Vec<DefenderSnapshot>,
    /// Live attackers in spawn order.
    pub attackers: Vec<AttackerSnapshot>,
    /// In-flight projectiles.
    pub projectiles: Vec<ProjectileSnapshot>,
    /// Uncollected pickups.
    pub pickups: Vec<PickupSnapshot>,
    /// Expanding explosion rings.
    pub explosions: Vec<ExplosionSnapshot>,
    /// Current resource balance.
    pub balance: u32,
    /// Current wave number, starting at one.
    pub wave: u32,
    /// Total number of waves in the session.
    pub total_waves: u32,
    /// Whether a wave is currently in progress.
    pub in_wave: bool,
    /// Session lifecycle.
    pub lifecycle: Lifecycle,
}

#[cfg(test)]
mod tests {
    use super::{
        AttackerKind, CellCoord, DefenderBehavior, DefenderId, DefenderKind, Lifecycle,
        PlacementError, WorldPoint,
    };
    use serde::{de::DeserializeOwned, Serialize};

    fn assert_round_trip<T>(value: &T)
    where
        T: Serialize + DeserializeOwned + PartialEq + std::fmt::Debug,
    {
        let bytes = bincode::serialize(value).expect("serialize");
        let restored: T = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(&restored, value);
    }

    #[test]
    fn identifiers_and_errors_round_trip_through_bincode() {
        assert_round_trip(&DefenderId::new(42));
        assert_round_trip(&CellCoord::new(3, 4));
        assert_round_trip(&PlacementError::InsufficientResource {
            required: 9_901,
            available: 9_900,
        });
    }

    #[test]
    fn defender_names_parse_back_to_kinds() {
        for kind in DefenderKind::ALL {
            assert_eq!(kind.name().parse::<DefenderKind>(), Ok(kind));
        }
        assert_eq!("  Wallnut ".parse::<DefenderKind>(), Ok(DefenderKind::Wallnut));
        assert!("shovel".parse::<DefenderKind>().is_err());
    }

    #[test]
    fn bomb_is_lethal_to_every_attacker_at_any_boost() {
        let DefenderBehavior::Bomb { blast_damage, .. } = DefenderKind::CherryBomb.stats().behavior
        else {
            panic!("cherry bomb must be bomb-class");
        };
        for kind in [
            AttackerKind::Shambling,
            AttackerKind::Fast,
            AttackerKind::Armored,
            AttackerKind::Tank,
        ] {
            assert!(kind.scaled_health(10.0) < blast_damage);
        }
    }

    #[test]
    fn boost_of_one_keeps_base_stats() {
        let stats = AttackerKind::Tank.stats();
        assert!((AttackerKind::Tank.scaled_health(1.0) - stats.health).abs() < f32::EPSILON);
        assert!((AttackerKind::Tank.scaled_speed(1.0) - stats.speed).abs() < f32::EPSILON);
    }

    #[test]
    fn boost_scales_health_faster_than_speed() {
        let kind = AttackerKind::Shambling;
        assert!((kind.scaled_health(2.0) - 6.72).abs() < 1e-4);
        assert!((kind.scaled_speed(2.0) - 42.4).abs() < 1e-4);
    }

    #[test]
    fn only_won_and_lost_are_terminal() {
        assert!(Lifecycle::Won.is_terminal());
        assert!(Lifecycle::Lost.is_terminal());
        assert!(!Lifecycle::Idle.is_terminal());
        assert!(!Lifecycle::Running.is_terminal());
        assert!(!Lifecycle::Paused.is_terminal());
    }

    #[test]
    fn distance_squared_is_symmetric() {
        let a = WorldPoint::new(0.0, 0.0);
        let b = WorldPoint::new(3.0, 4.0);
        assert!((a.distance_squared(b) - 25.0).abs() < f32::EPSILON);
        assert!((b.distance_squared(a) - 25.0).abs() < f32::EPSILON);
    }
}
