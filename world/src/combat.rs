//! Defender fire, projectile flight, attacker feeding and bomb blasts.

use std::{ops::ControlFlow, time::Duration};

use garden_defense_core::{
    AttackerId, AttackerKind, AttackerSnapshot, CellCoord, DefenderBehavior, DefenderId, Event,
    ExplosionSnapshot, Lifecycle, ProjectileSnapshot, WorldPoint,
};
use tracing::{debug, info, trace};

use crate::{economy, World};

const PROJECTILE_SPEED: f32 = 400.0;
const PROJECTILE_DAMAGE: f32 = 1.0;
/// Horizontal offset from a cell's left edge at which projectiles appear.
const MUZZLE_OFFSET: f32 = 70.0;
const VOLLEY_SPREAD: f32 = 10.0;
/// Distance beyond the right edge at which attackers enter.
const SPAWN_MARGIN: f32 = 10.0;
const HIT_REACH: f32 = 18.0;
/// Offset between an attacker's position and the cell it feeds on.
const BITE_REACH: f32 = 40.0;
/// Attackers left of this line have broken through.
const BOUNDARY: f32 = 10.0;
const EXPLOSION_START_RADIUS: f32 = 10.0;
const EXPLOSION_GROWTH: f32 = 437.5;
const EXPLOSION_DURATION: Duration = Duration::from_millis(380);

#[derive(Clone, Debug)]
pub(crate) struct Attacker {
    pub(crate) id: AttackerId,
    pub(crate) kind: AttackerKind,
    pub(crate) lane: u32,
    pub(crate) x: f32,
    pub(crate) y: f32,
    pub(crate) health: f32,
    pub(crate) max_health: f32,
    pub(crate) speed: f32,
    pub(crate) boost: f32,
    pub(crate) feed: Duration,
}

impl Attacker {
    fn position(&self) -> WorldPoint {
        WorldPoint::new(self.x, self.y)
    }

    pub(crate) fn snapshot(&self) -> AttackerSnapshot {
        AttackerSnapshot {
            id: self.id,
            kind: self.kind,
            lane: self.lane,
            position: self.position(),
            health: self.health,
            max_health: self.max_health,
            boost: self.boost,
        }
    }
}

#[derive(Clone, Debug)]
pub(crate) struct Projectile {
    pub(crate) lane: u32,
    pub(crate) x: f32,
    pub(crate) y: f32,
    pub(crate) velocity: f32,
    pub(crate) damage: f32,
}

impl Projectile {
    pub(crate) fn snapshot(&self) -> ProjectileSnapshot {
        ProjectileSnapshot {
            lane: self.lane,
            position: WorldPoint::new(self.x, self.y),
            damage: self.damage,
        }
    }
}

#[derive(Clone, Debug)]
pub(crate) struct Explosion {
    pub(crate) center: WorldPoint,
    pub(crate) radius: f32,
    pub(crate) max_radius: f32,
    pub(crate) elapsed: Duration,
}

impl Explosion {
    pub(crate) fn snapshot(&self) -> ExplosionSnapshot {
        ExplosionSnapshot {
            center: self.center,
            radius: self.radius,
            max_radius: self.max_radius,
            elapsed: self.elapsed,
            duration: EXPLOSION_DURATION,
        }
    }
}

impl World {
    pub(crate) fn spawn_attacker(
        &mut self,
        lane: u32,
        kind: AttackerKind,
        boost: f32,
        out: &mut Vec<Event>,
    ) {
        if lane >= self.config.rows {
            debug!(lane, "dropping spawn on a lane outside the grid");
            return;
        }

        let id = self.next_attacker_id;
        self.next_attacker_id = AttackerId::new(id.get().wrapping_add(1));
        let health = kind.scaled_health(boost);
        self.attackers.push(Attacker {
            id,
            kind,
            lane,
            x: self.config.width() + SPAWN_MARGIN,
            y: lane_center(lane, self.config.tile_length),
            health,
            max_health: health,
            speed: kind.scaled_speed(boost),
            boost,
            feed: Duration::ZERO,
        });
        trace!(attacker = id.get(), ?kind, lane, boost, "attacker spawned");
        out.push(Event::AttackerSpawned {
            attacker: id,
            kind,
            lane,
        });
    }

    /// Runs every planted defender's per-tick behaviour in row-major order.
    pub(crate) fn run_defenders(&mut self, dt: Duration, out: &mut Vec<Event>) {
        let tile = self.config.tile_length;
        let payout = self.config.pickup_value;

        for (cell, defender) in self.grid.iter_mut() {
            match defender.kind.stats().behavior {
                DefenderBehavior::Attack {
                    fire_interval,
                    volley,
                } => {
                    defender.fire_cooldown = defender.fire_cooldown.saturating_add(dt);
                    let lane = cell.row();
                    let front = cell.column() as f32 * tile;
                    let target_ahead = self
                        .attackers
                        .iter()
                        .any(|attacker| attacker.lane == lane && attacker.x > front);

                    if target_ahead && defender.fire_cooldown > fire_interval {
                        let volley = volley.max(1);
                        fire_volley(&mut self.projectiles, cell, volley, tile);
                        defender.fire_cooldown = Duration::ZERO;
                        out.push(Event::ShotFired {
                            defender: defender.id,
                            lane,
                            volley,
                        });
                    }
                }
                DefenderBehavior::Support { payout_interval } => {
                    if economy::accrue(&mut defender.payout_cooldown, payout_interval, dt) {
                        self.balance = self.balance.saturating_add(payout);
                        out.push(Event::ResourceGenerated {
                            defender: defender.id,
                            amount: payout,
                        });
                    }
                }
                DefenderBehavior::Bomb { .. } | DefenderBehavior::Block => {}
            }
        }
    }

    /// Moves projectiles and resolves hits.
    ///
    /// Each projectile strikes the first attacker in spawn order that shares
    /// its lane and has reached it, which is not necessarily the closest one.
    pub(crate) fn resolve_projectiles(&mut self, dt: Duration, out: &mut Vec<Event>) {
        let seconds = dt.as_secs_f32();
        let width = self.config.width();
        let attackers = &mut self.attackers;

        self.projectiles.retain_mut(|projectile| {
            projectile.x += projectile.velocity * seconds;
            let struck = attackers.iter_mut().find(|attacker| {
                attacker.lane == projectile.lane && attacker.x - HIT_REACH < projectile.x
            });

            if let Some(attacker) = struck {
                attacker.health -= projectile.damage;
                out.push(Event::HitLanded {
                    attacker: attacker.id,
                    damage: projectile.damage,
                });
                return false;
            }

            projectile.x <= width
        });
    }

    /// Feeds or advances every attacker newest first, then culls the
    /// defeated.
    ///
    /// Breaks as soon as an attacker crosses the boundary; older attackers
    /// are left untouched for this tick.
    pub(crate) fn resolve_attackers(
        &mut self,
        dt: Duration,
        out: &mut Vec<Event>,
    ) -> ControlFlow<()> {
        let seconds = dt.as_secs_f32();
        let tile = self.config.tile_length;
        let mut index = self.attackers.len();

        while index > 0 {
            index -= 1;
            let attacker = &mut self.attackers[index];
            let stats = attacker.kind.stats();
            let cell =
                column_under(attacker.x, tile).map(|column| CellCoord::new(column, attacker.lane));
            let defender = match cell {
                Some(cell) => self.grid.get_mut(cell),
                None => None,
            };

            let mut eaten = None;
            match defender {
                Some(defender) => {
                    attacker.feed = attacker.feed.saturating_add(dt);
                    if attacker.feed > stats.feed_interval {
                        defender.health -= stats.bite_damage;
                        attacker.feed = Duration::ZERO;
                        if defender.health <= 0.0 {
                            eaten = cell;
                        }
                    }
                }
                None => attacker.x -= attacker.speed * seconds,
            }

            let (id, health, x) = (attacker.id, attacker.health, attacker.x);
            if let Some(cell) = eaten {
                self.destroy_defender(cell, out);
            }

            if health <= 0.0 {
                let _ = self.attackers.remove(index);
                out.push(Event::AttackerDefeated { attacker: id });
                continue;
            }

            if x < BOUNDARY {
                info!(attacker = id.get(), wave = self.wave, "attacker broke through");
                self.lifecycle = Lifecycle::Lost;
                out.push(Event::GameLost { attacker: id });
                out.push(Event::LifecycleChanged {
                    lifecycle: Lifecycle::Lost,
                });
                return ControlFlow::Break(());
            }
        }

        ControlFlow::Continue(())
    }

    /// Detonates an armed bomb, applying its damage once to every attacker in
    /// range and clearing the bomb's cell.
    pub(crate) fn detonate(&mut self, defender: DefenderId, cell: CellCoord, out: &mut Vec<Event>) {
        let armed = self
            .grid
            .get(cell)
            .map_or(false, |occupant| occupant.id == defender);
        if !armed {
            debug!(defender = defender.get(), "skipping detonation of a missing bomb");
            return;
        }
        let Some(bomb) = self.grid.take(cell) else {
            return;
        };
        let DefenderBehavior::Bomb {
            blast_radius,
            blast_damage,
            ..
        } = bomb.kind.stats().behavior
        else {
            return;
        };

        let tile = self.config.tile_length;
        let center = WorldPoint::new(
            cell.column() as f32 * tile + tile / 2.0,
            lane_center(cell.row(), tile),
        );
        self.explosions.push(Explosion {
            center,
            radius: EXPLOSION_START_RADIUS.min(blast_radius),
            max_radius: blast_radius,
            elapsed: Duration::ZERO,
        });

        let reach = blast_radius * blast_radius;
        let mut victims = 0;
        let mut defeated = Vec::new();
        self.attackers.retain_mut(|attacker| {
            if attacker.position().distance_squared(center) > reach {
                return true;
            }
            victims += 1;
            attacker.health -= blast_damage;
            if attacker.health <= 0.0 {
                defeated.push(attacker.id);
                return false;
            }
            true
        });

        debug!(defender = defender.get(), victims, "bomb detonated");
        out.push(Event::ExplosionTriggered {
            center,
            radius: blast_radius,
            victims,
        });
        out.extend(
            defeated
                .into_iter()
                .map(|attacker| Event::AttackerDefeated { attacker }),
        );
        out.push(Event::DefenderDestroyed { defender, cell });
    }

    /// Grows explosion rings and drops the ones that finished.
    pub(crate) fn age_explosions(&mut self, dt: Duration) {
        let growth = EXPLOSION_GROWTH * dt.as_secs_f32();
        self.explosions.retain_mut(|explosion| {
            explosion.elapsed = explosion.elapsed.saturating_add(dt);
            explosion.radius = (explosion.radius + growth).min(explosion.max_radius);
            explosion.elapsed <= EXPLOSION_DURATION
        });
    }

    fn destroy_defender(&mut self, cell: CellCoord, out: &mut Vec<Event>) {
        let Some(defender) = self.grid.take(cell) else {
            return;
        };
        if let Some(handle) = defender.arm_event {
            self.schedule.cancel(handle);
        }
        trace!(defender = defender.id.get(), ?cell, "defender eaten");
        out.push(Event::DefenderDestroyed {
            defender: defender.id,
            cell,
        });
    }
}

fn fire_volley(projectiles: &mut Vec<Projectile>, cell: CellCoord, volley: u32, tile: f32) {
    let x = cell.column() as f32 * tile + MUZZLE_OFFSET;
    let y = lane_center(cell.row(), tile);
    let middle = (volley as f32 - 1.0) / 2.0;
    projectiles.extend((0..volley).map(|index| Projectile {
        lane: cell.row(),
        x,
        y: y + (index as f32 - middle) * VOLLEY_SPREAD,
        velocity: PROJECTILE_SPEED,
        damage: PROJECTILE_DAMAGE,
    }));
}

fn lane_center(lane: u32, tile: f32) -> f32 {
    lane as f32 * tile + tile / 2.0
}

/// Grid column an attacker at `x` is about to feed on, if any.
fn column_under(x: f32, tile: f32) -> Option<u32> {
    let column = ((x - BITE_REACH) / tile).floor();
    if column.is_finite() && column >= 0.0 {
        Some(column as u32)
    } else {
        None
    }
}
