//! ECS components for hecs entities.
//!
//! Components are plain data structs with no methods.
//! Game logic lives in systems, not components.

use serde::{Deserialize, Serialize};

use crate::enums::*;

/// Stable identity assigned at spawn time, unique within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u32);

/// Descending enemy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub kind: EnemyKind,
    /// Remaining health. Fractional because projectile damage may be.
    pub health: f64,
}

/// Player projectile travelling upward.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub bullet_kind: BulletKind,
    pub damage: f64,
    pub special: bool,
    pub charged: bool,
    /// 0..=MAX_CHARGE_LEVEL.
    pub charge_level: u32,
}

/// Falling pickup.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PowerUp {
    pub kind: PowerUpKind,
}

// Position, Velocity and Size (types.rs) are used as components too.
