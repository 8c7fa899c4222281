//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::types::Size;

/// Fixed per-kind enemy stats.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnemyStats {
    pub health: f64,
    /// Descent speed (units/ms).
    pub speed: f64,
    pub size: Size,
}

/// Base projectile profile for a bullet kind, before any modifier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BulletProfile {
    pub size: Size,
    /// Upward speed (units/ms).
    pub speed: f64,
    pub damage: f64,
}

/// Enemy archetype.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    #[default]
    Basic,
    Armored,
    Fast,
    Boss,
    /// Never chosen by the spawner; available to scripted waves and tests.
    Special,
}

impl EnemyKind {
    pub fn stats(self) -> EnemyStats {
        let (health, speed, w, h) = match self {
            EnemyKind::Basic => (1.0, 0.05, 40.0, 40.0),
            EnemyKind::Armored => (3.0, 0.03, 50.0, 50.0),
            EnemyKind::Fast => (1.0, 0.1, 30.0, 30.0),
            EnemyKind::Boss => (10.0, 0.02, 80.0, 80.0),
            EnemyKind::Special => (5.0, 0.04, 60.0, 60.0),
        };
        EnemyStats {
            health,
            speed,
            size: Size::new(w, h),
        }
    }

    /// Score awarded when a projectile destroys this enemy.
    pub fn points(self) -> u32 {
        match self {
            EnemyKind::Basic => 10,
            EnemyKind::Fast => 20,
            EnemyKind::Armored => 30,
            EnemyKind::Special => 50,
            EnemyKind::Boss => 100,
        }
    }
}

/// Player-selectable ammunition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BulletKind {
    #[default]
    Standard,
    Laser,
    Plasma,
    Explosive,
}

impl BulletKind {
    pub const ALL: [BulletKind; 4] = [
        BulletKind::Standard,
        BulletKind::Laser,
        BulletKind::Plasma,
        BulletKind::Explosive,
    ];

    pub fn profile(self) -> BulletProfile {
        let (w, h, speed, damage) = match self {
            BulletKind::Standard => (10.0, 20.0, 0.5, 1.0),
            BulletKind::Laser => (6.0, 30.0, 0.8, 1.2),
            BulletKind::Plasma => (14.0, 14.0, 0.6, 1.5),
            BulletKind::Explosive => (16.0, 16.0, 0.4, 2.0),
        };
        BulletProfile {
            size: Size::new(w, h),
            speed,
            damage,
        }
    }
}

/// Falling pickup kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerUpKind {
    RapidFire,
    Shield,
    MultiShot,
    /// Instant effect, never tracked as a timer.
    Bomb,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 4] = [
        PowerUpKind::RapidFire,
        PowerUpKind::Shield,
        PowerUpKind::MultiShot,
        PowerUpKind::Bomb,
    ];

    /// Kinds that run on a timer once collected.
    pub const TIMED: [PowerUpKind; 3] = [
        PowerUpKind::RapidFire,
        PowerUpKind::Shield,
        PowerUpKind::MultiShot,
    ];

    /// Effect duration, or `None` for instant effects.
    pub fn duration_ms(self) -> Option<f64> {
        match self {
            PowerUpKind::RapidFire => Some(RAPID_FIRE_DURATION_MS),
            PowerUpKind::Shield => Some(SHIELD_PICKUP_DURATION_MS),
            PowerUpKind::MultiShot => Some(MULTI_SHOT_DURATION_MS),
            PowerUpKind::Bomb => None,
        }
    }
}

/// Session status (top-level state).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    #[default]
    Menu,
    Playing,
    Paused,
    GameOver,
}

/// Player abilities with their own cooldown path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Ability {
    Shield,
    SpecialFire,
}
