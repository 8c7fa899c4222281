//! Kinematic integration system.
//!
//! Updates Position from Velocity each tick: position += velocity * delta.

use hecs::World;

use turret_core::types::{Position, Velocity};

/// Run kinematic integration for all entities with Position + Velocity.
pub fn run(world: &mut World, delta_ms: f64) {
    for (_entity, (pos, vel)) in world.query_mut::<(&mut Position, &Velocity)>() {
        pos.x += vel.x * delta_ms;
        pos.y += vel.y * delta_ms;
    }
}
