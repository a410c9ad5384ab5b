use std::time::Duration;

use garden_defense_core::{
    AttackerId, AttackerKind, CellCoord, Command, DefenderKind, Event, GameConfig, Lifecycle,
    ScheduledSpawn, WorldPoint,
};
use garden_defense_world::{self as world, query, World};

fn running_world() -> World {
    let mut world = World::new();
    let mut events = Vec::new();
    world::apply(&mut world, Command::Start, &mut events);
    world
}

fn spawn_now(lane: u32, kind: AttackerKind) -> ScheduledSpawn {
    ScheduledSpawn {
        lane,
        kind,
        boost: 1.0,
        delay: Duration::ZERO,
    }
}

fn schedule(world: &mut World, spawns: Vec<ScheduledSpawn>) {
    let mut events = Vec::new();
    let wave = query::wave(world);
    world::apply(world, Command::ScheduleWave { wave, spawns }, &mut events);
}

fn plant(world: &mut World, kind: DefenderKind, cell: CellCoord) {
    let mut events = Vec::new();
    world::apply(world, Command::PlaceDefender { kind, cell }, &mut events);
    assert!(
        matches!(events.as_slice(), [Event::DefenderPlaced { .. }]),
        "placement failed: {events:?}"
    );
}

fn tick(world: &mut World, millis: u64) -> Vec<Event> {
    let mut events = Vec::new();
    world::apply(
        world,
        Command::Tick {
            dt: Duration::from_millis(millis),
        },
        &mut events,
    );
    events
}

#[test]
fn bomb_detonates_exactly_when_armed() {
    let mut world = running_world();
    let bomb = CellCoord::new(8, 2);
    plant(&mut world, DefenderKind::CherryBomb, bomb);
    schedule(
        &mut world,
        vec![
            spawn_now(2, AttackerKind::Shambling),
            spawn_now(2, AttackerKind::Tank),
            spawn_now(0, AttackerKind::Shambling),
        ],
    );
    let _ = tick(&mut world, 0);
    assert_eq!(query::attackers(&world).len(), 3);

    let early = tick(&mut world, 999);
    assert!(!early
        .iter()
        .any(|event| matches!(event, Event::ExplosionTriggered { .. })));
    assert!(query::defender_at(&world, bomb).is_some());

    let events = tick(&mut world, 1);
    assert!(events.iter().any(|event| matches!(
        event,
        Event::ExplosionTriggered { victims: 2, .. }
    )));
    let defeated = events
        .iter()
        .filter(|event| matches!(event, Event::AttackerDefeated { .. }))
        .count();
    assert_eq!(defeated, 2);
    assert!(query::can_place(&world, bomb));
    assert_eq!(query::explosions(&world).len(), 1);

    let survivors = query::attackers(&world);
    assert_eq!(survivors.len(), 1);
    assert_eq!(survivors[0].lane, 0);
    assert!((survivors[0].health - 6.0).abs() < f32::EPSILON);
}

#[test]
fn explosion_ring_fades_after_its_duration() {
    let mut world = running_world();
    plant(&mut world, DefenderKind::CherryBomb, CellCoord::new(1, 1));
    let _ = tick(&mut world, 999);
    assert!(query::explosions(&world).is_empty());
    let _ = tick(&mut world, 1);
    assert_eq!(query::explosions(&world).len(), 1);

    let _ = tick(&mut world, 200);
    let rings = query::explosions(&world);
    assert_eq!(rings.len(), 1);
    assert!(rings[0].radius <= rings[0].max_radius);

    let _ = tick(&mut world, 200);
    assert!(query::explosions(&world).is_empty());
}

#[test]
fn pausing_freezes_an_armed_bomb() {
    let mut world = running_world();
    let bomb = CellCoord::new(3, 3);
    plant(&mut world, DefenderKind::CherryBomb, bomb);

    let mut events = Vec::new();
    world::apply(&mut world, Command::Pause, &mut events);
    assert!(tick(&mut world, 5_000).is_empty());
    world::apply(&mut world, Command::Resume, &mut events);

    let _ = tick(&mut world, 999);
    assert!(query::defender_at(&world, bomb).is_some());
    let _ = tick(&mut world, 1);
    assert!(query::defender_at(&world, bomb).is_none());
}

#[test]
fn shooter_hits_an_attacker_in_its_lane() {
    let mut world = running_world();
    plant(&mut world, DefenderKind::Peashooter, CellCoord::new(0, 1));
    schedule(&mut world, vec![spawn_now(1, AttackerKind::Shambling)]);
    let _ = tick(&mut world, 0);

    let mut last_health = f32::MAX;
    let mut hit = false;
    for _ in 0..200 {
        let events = tick(&mut world, 100);
        let health = query::attackers(&world)[0].health;
        assert!(health <= last_health);
        last_health = health;
        if events
            .iter()
            .any(|event| matches!(event, Event::HitLanded { .. }))
        {
            hit = true;
            break;
        }
    }

    assert!(hit);
    assert!((last_health - 5.0).abs() < f32::EPSILON);
}

#[test]
fn projectile_strikes_the_earliest_spawn_in_reach_not_the_nearest() {
    let mut world = running_world();
    plant(&mut world, DefenderKind::Peashooter, CellCoord::new(0, 1));
    schedule(
        &mut world,
        vec![
            spawn_now(1, AttackerKind::Tank),
            spawn_now(1, AttackerKind::Shambling),
        ],
    );
    let _ = tick(&mut world, 0);

    let events = tick(&mut world, 1_500);
    assert!(events
        .iter()
        .any(|event| matches!(event, Event::ShotFired { .. })));
    assert!(!events
        .iter()
        .any(|event| matches!(event, Event::HitLanded { .. })));
    let attackers = query::attackers(&world);
    assert_eq!(attackers[0].kind, AttackerKind::Tank);
    assert!(attackers[1].position.x() < attackers[0].position.x());

    // Both attackers are within reach of the projectile after this tick.
    let events = tick(&mut world, 1_000);
    assert!(events.contains(&Event::HitLanded {
        attacker: AttackerId::new(0),
        damage: 1.0,
    }));
    let attackers = query::attackers(&world);
    assert!((attackers[0].health - 17.0).abs() < f32::EPSILON);
    assert!((attackers[1].health - 6.0).abs() < f32::EPSILON);
    assert!(query::projectiles(&world).is_empty());
}

#[test]
fn attackers_enter_relative_to_the_configured_tile() {
    let mut world = World::with_config(GameConfig {
        tile_length: 50.0,
        ..GameConfig::default()
    });
    let mut events = Vec::new();
    world::apply(&mut world, Command::Start, &mut events);
    schedule(&mut world, vec![spawn_now(2, AttackerKind::Fast)]);
    let _ = tick(&mut world, 0);

    let attacker = query::attackers(&world)[0];
    assert!((attacker.position.x() - 460.0).abs() < f32::EPSILON);
    assert!((attacker.position.y() - 125.0).abs() < f32::EPSILON);
}

#[test]
fn shooter_holds_fire_without_a_target() {
    let mut world = running_world();
    plant(&mut world, DefenderKind::Twinpea, CellCoord::new(4, 0));
    schedule(&mut world, vec![spawn_now(3, AttackerKind::Fast)]);

    for _ in 0..50 {
        let events = tick(&mut world, 100);
        assert!(!events
            .iter()
            .any(|event| matches!(event, Event::ShotFired { .. })));
    }
    assert!(query::projectiles(&world).is_empty());
}

#[test]
fn attacker_feeds_instead_of_moving() {
    let mut world = running_world();
    let cell = CellCoord::new(8, 3);
    plant(&mut world, DefenderKind::Wallnut, cell);
    schedule(&mut world, vec![spawn_now(3, AttackerKind::Shambling)]);
    let _ = tick(&mut world, 0);

    for _ in 0..6 {
        let _ = tick(&mut world, 100);
    }

    let wallnut = query::defender_at(&world, cell).expect("wallnut still planted");
    assert!((wallnut.health - 19.75).abs() < 1e-4);
    let attacker = query::attackers(&world)[0];
    assert!((attacker.position.x() - 910.0).abs() < f32::EPSILON);
}

#[test]
fn eaten_defender_frees_the_lane() {
    let mut world = running_world();
    let cell = CellCoord::new(8, 3);
    plant(&mut world, DefenderKind::Sunflower, cell);
    schedule(&mut world, vec![spawn_now(3, AttackerKind::Tank)]);
    let _ = tick(&mut world, 0);

    let mut eaten = false;
    for _ in 0..200 {
        let events = tick(&mut world, 100);
        if events
            .iter()
            .any(|event| matches!(event, Event::DefenderDestroyed { cell: at, .. } if *at == cell))
        {
            eaten = true;
            break;
        }
    }
    assert!(eaten);
    assert!(query::can_place(&world, cell));

    let _ = tick(&mut world, 1_000);
    assert!(query::attackers(&world)[0].position.x() < 910.0);
}

#[test]
fn support_defender_pays_after_its_interval_without_backlog() {
    let mut world = running_world();
    plant(&mut world, DefenderKind::Sunflower, CellCoord::new(0, 0));
    assert_eq!(query::balance(&world), 9_950);

    let _ = tick(&mut world, 9_000);
    assert_eq!(query::balance(&world), 9_950);

    let events = tick(&mut world, 1);
    assert!(events
        .iter()
        .any(|event| matches!(event, Event::ResourceGenerated { amount: 25, .. })));
    assert_eq!(query::balance(&world), 9_975);

    let _ = tick(&mut world, 60_000);
    assert_eq!(query::balance(&world), 10_000);
}

#[test]
fn pickups_settle_then_expire() {
    let mut world = running_world();
    let mut events = Vec::new();
    world::apply(
        &mut world,
        Command::DropPickup {
            x: 100.0,
            rest_height: 300.0,
        },
        &mut events,
    );

    let _ = tick(&mut world, 1_000);
    let pickup = query::pickups(&world)[0];
    assert!((pickup.position.y() - 40.0).abs() < 1e-3);

    let _ = tick(&mut world, 9_000);
    let pickup = query::pickups(&world)[0];
    assert!((pickup.position.y() - 300.0).abs() < f32::EPSILON);
    assert_eq!(pickup.remaining, Duration::from_secs(2));

    let events = tick(&mut world, 2_000);
    assert!(events
        .iter()
        .any(|event| matches!(event, Event::PickupExpired { .. })));
    assert!(query::pickups(&world).is_empty());
    assert_eq!(query::balance(&world), 10_000);
}

#[test]
fn collection_reaches_just_past_the_pickup_radius() {
    let mut world = running_world();
    let mut events = Vec::new();
    world::apply(
        &mut world,
        Command::DropPickup {
            x: 100.0,
            rest_height: 300.0,
        },
        &mut events,
    );
    events.clear();

    world::apply(
        &mut world,
        Command::CollectAt {
            point: WorldPoint::new(127.0, -20.0),
        },
        &mut events,
    );
    assert!(events.is_empty());
    assert_eq!(query::pickups(&world).len(), 1);

    world::apply(
        &mut world,
        Command::CollectAt {
            point: WorldPoint::new(125.0, -20.0),
        },
        &mut events,
    );
    assert!(matches!(
        events.as_slice(),
        [Event::PickupCollected { amount: 25, .. }]
    ));
    assert!(query::pickups(&world).is_empty());
    assert_eq!(query::balance(&world), 10_025);
}

#[test]
fn breakthrough_ends_the_tick_immediately() {
    let mut world = running_world();
    schedule(
        &mut world,
        vec![
            spawn_now(0, AttackerKind::Shambling),
            spawn_now(1, AttackerKind::Shambling),
        ],
    );
    let _ = tick(&mut world, 0);

    let mut lost = None;
    for _ in 0..200 {
        let oldest_before = query::attackers(&world)[0].position.x();
        let events = tick(&mut world, 250);
        if let Some(event) = events
            .iter()
            .find(|event| matches!(event, Event::GameLost { .. }))
        {
            lost = Some((event.clone(), oldest_before));
            break;
        }
    }

    // Newest attackers resolve first, so the later spawn crosses first and
    // the older one is never advanced on the losing tick.
    let (event, oldest_before) = lost.expect("attackers break through");
    let attackers = query::attackers(&world);
    assert_eq!(event, Event::GameLost {
        attacker: attackers[1].id,
    });
    assert_eq!(query::lifecycle(&world), Lifecycle::Lost);
    assert!((attackers[0].position.x() - oldest_before).abs() < f32::EPSILON);

    assert!(tick(&mut world, 1_000).is_empty());
}
