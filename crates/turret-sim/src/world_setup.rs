//! Entity spawn factories.
//!
//! Every entity gets an `EntityId`, a `Position`, a `Velocity` and a
//! `Size` alongside its kind-specific component.

use hecs::World;

use turret_core::components::*;
use turret_core::constants::*;
use turret_core::enums::*;
use turret_core::types::{Position, Size, Velocity};

use crate::weapons::ShotProfile;

/// Hand out the next session-unique id.
pub fn allocate_id(next_entity_id: &mut u32) -> EntityId {
    let id = EntityId(*next_entity_id);
    *next_entity_id += 1;
    id
}

/// Spawn an enemy with its kind's fixed stats, top-left at (`x`, `y`).
pub fn spawn_enemy(
    world: &mut World,
    next_entity_id: &mut u32,
    kind: EnemyKind,
    x: f64,
    y: f64,
) -> hecs::Entity {
    let stats = kind.stats();
    world.spawn((
        allocate_id(next_entity_id),
        Enemy {
            kind,
            health: stats.health,
        },
        Position::new(x, y),
        Velocity::new(0.0, stats.speed),
        stats.size,
    ))
}

/// Spawn an enemy just above the top edge.
pub fn spawn_enemy_above(
    world: &mut World,
    next_entity_id: &mut u32,
    kind: EnemyKind,
    x: f64,
) -> hecs::Entity {
    let height = kind.stats().size.height;
    spawn_enemy(world, next_entity_id, kind, x, -height)
}

/// Spawn a projectile travelling straight up.
pub fn spawn_projectile(
    world: &mut World,
    next_entity_id: &mut u32,
    shot: &ShotProfile,
    x: f64,
    y: f64,
) -> hecs::Entity {
    world.spawn((
        allocate_id(next_entity_id),
        Projectile {
            bullet_kind: shot.bullet_kind,
            damage: shot.damage,
            special: shot.special,
            charged: shot.charged,
            charge_level: shot.charge_level,
        },
        Position::new(x, y),
        Velocity::new(0.0, -shot.speed),
        shot.size,
    ))
}

/// Spawn a falling power-up, top-left at (`x`, `y`).
pub fn spawn_power_up(
    world: &mut World,
    next_entity_id: &mut u32,
    kind: PowerUpKind,
    x: f64,
    y: f64,
) -> hecs::Entity {
    world.spawn((
        allocate_id(next_entity_id),
        PowerUp { kind },
        Position::new(x, y),
        Velocity::new(0.0, POWER_UP_SPEED),
        Size::new(POWER_UP_SIZE, POWER_UP_SIZE),
    ))
}
