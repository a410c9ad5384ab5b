//! Session configuration shared by the world and adapters.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Layout and economy parameters for a session.
///
/// Every field falls back to the built-in value when omitted from a
/// configuration file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    /// Number of grid columns.
    pub columns: u32,
    /// Number of grid rows, one lane per row.
    pub rows: u32,
    /// Side length of a square grid cell in world units.
    ///
    /// Only the grid, lane centers and spawn line scale with it. Projectile
    /// speed, hit and bite reach, the muzzle offset, explosion growth and
    /// pickup geometry are absolute world units tuned for a 100-unit tile.
    pub tile_length: f32,
    /// Resource balance at the start of the session and after every reset.
    pub starting_balance: u32,
    /// Number of waves that must be cleared to win.
    pub total_waves: u32,
    /// Amount credited by support payouts and aerial pickups.
    pub pickup_value: u32,
    /// Lifetime of an aerial pickup in milliseconds.
    pub pickup_lifetime_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            columns: 9,
            rows: 5,
            tile_length: 100.0,
            starting_balance: 10_000,
            total_waves: 5,
            pickup_value: 25,
            pickup_lifetime_ms: 12_000,
        }
    }
}

impl GameConfig {
    /// Width of the playfield in world units.
    #[must_use]
    pub fn width(&self) -> f32 {
        self.columns as f32 * self.tile_length
    }

    /// Lifetime of an aerial pickup.
    #[must_use]
    pub const fn pickup_lifetime(&self) -> Duration {
        Duration::from_millis(self.pickup_lifetime_ms)
    }

    /// Checks that the configuration describes a playable session.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.columns == 0 || self.rows == 0 {
            return Err(ConfigError::EmptyGrid {
                columns: self.columns,
                rows: self.rows,
            });
        }
        if !self.tile_length.is_finite() || self.tile_length <= 0.0 {
            return Err(ConfigError::InvalidTileLength(self.tile_length));
        }
        if self.total_waves == 0 {
            return Err(ConfigError::NoWaves);
        }
        if self.pickup_lifetime_ms == 0 {
            return Err(ConfigError::ZeroPickupLifetime);
        }
        Ok(())
    }
}

/// Reasons a [`GameConfig`] is rejected.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ConfigError {
    /// One of the grid dimensions is zero.
    #[error("grid must have at least one column and row, got {columns}x{rows}")]
    EmptyGrid {
        /// Configured column count.
        columns: u32,
        /// Configured row count.
        rows: u32,
    },
    /// The tile length is zero, negative or not finite.
    #[error("tile length must be positive, got {0}")]
    InvalidTileLength(f32),
    /// The session would be won before it starts.
    #[error("at least one wave is required")]
    NoWaves,
    /// Pickups would expire the moment they appear.
    #[error("pickup lifetime must be positive")]
    ZeroPickupLifetime,
}
