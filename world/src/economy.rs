//! Resource income: support payouts and aerial pickups.

use std::time::Duration;

use garden_defense_core::{Event, PickupId, PickupSnapshot, WorldPoint};
use tracing::trace;

use crate::World;

const PICKUP_RADIUS: f32 = 18.0;
/// Extra reach granted to the collection point.
const COLLECT_SLACK: f32 = 8.0;
const FALL_SPEED: f32 = 60.0;
const DROP_HEIGHT: f32 = -20.0;

#[derive(Clone, Debug)]
pub(crate) struct Pickup {
    pub(crate) id: PickupId,
    pub(crate) x: f32,
    pub(crate) y: f32,
    pub(crate) rest_height: f32,
    pub(crate) remaining: Duration,
    pub(crate) value: u32,
}

impl Pickup {
    fn position(&self) -> WorldPoint {
        WorldPoint::new(self.x, self.y)
    }

    pub(crate) fn snapshot(&self) -> PickupSnapshot {
        PickupSnapshot {
            id: self.id,
            position: self.position(),
            radius: PICKUP_RADIUS,
            remaining: self.remaining,
            value: self.value,
        }
    }
}

/// Adds `dt` to the accumulator and reports whether the interval elapsed.
///
/// The accumulator resets to zero on payout, so a long frame never banks more
/// than one interval.
pub(crate) fn accrue(accumulator: &mut Duration, interval: Duration, dt: Duration) -> bool {
    *accumulator = accumulator.saturating_add(dt);
    if *accumulator > interval {
        *accumulator = Duration::ZERO;
        true
    } else {
        false
    }
}

impl World {
    pub(crate) fn drop_pickup(&mut self, x: f32, rest_height: f32, out: &mut Vec<Event>) {
        let id = self.next_pickup_id;
        self.next_pickup_id = PickupId::new(id.get().wrapping_add(1));
        let pickup = Pickup {
            id,
            x,
            y: DROP_HEIGHT,
            rest_height,
            remaining: self.config.pickup_lifetime(),
            value: self.config.pickup_value,
        };
        out.push(Event::PickupDropped {
            pickup: id,
            position: pickup.position(),
        });
        self.pickups.push(pickup);
    }

    /// Counts down pickup lifetimes and lets falling pickups settle.
    pub(crate) fn age_pickups(&mut self, dt: Duration, out: &mut Vec<Event>) {
        let fall = FALL_SPEED * dt.as_secs_f32();
        self.pickups.retain_mut(|pickup| {
            pickup.remaining = pickup.remaining.saturating_sub(dt);
            if pickup.y < pickup.rest_height {
                pickup.y = (pickup.y + fall).min(pickup.rest_height);
            }
            if pickup.remaining.is_zero() {
                out.push(Event::PickupExpired { pickup: pickup.id });
                return false;
            }
            true
        });
    }

    /// Collects the most recently dropped pickup within reach of `point`.
    pub(crate) fn collect_at(&mut self, point: WorldPoint, out: &mut Vec<Event>) {
        let reach = PICKUP_RADIUS + COLLECT_SLACK;
        let found = self
            .pickups
            .iter()
            .rposition(|pickup| pickup.position().distance_squared(point) <= reach * reach);

        let Some(index) = found else {
            trace!(x = point.x(), y = point.y(), "no pickup within reach");
            return;
        };

        let pickup = self.pickups.remove(index);
        self.balance = self.balance.saturating_add(pickup.value);
        out.push(Event::PickupCollected {
            pickup: pickup.id,
            amount: pickup.value,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accrue_pays_once_interval_is_exceeded() {
        let interval = Duration::from_millis(100);
        let mut accumulator = Duration::ZERO;

        assert!(!accrue(&mut accumulator, interval, Duration::from_millis(100)));
        assert!(accrue(&mut accumulator, interval, Duration::from_millis(1)));
        assert_eq!(accumulator, Duration::ZERO);
    }

    #[test]
    fn accrue_does_not_bank_a_backlog() {
        let interval = Duration::from_millis(100);
        let mut accumulator = Duration::ZERO;

        assert!(accrue(&mut accumulator, interval, Duration::from_secs(10)));
        assert!(!accrue(&mut accumulator, interval, Duration::from_millis(50)));
    }
}
