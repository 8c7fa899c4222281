//! Events emitted by the simulation for HUD and audio feedback.
//!
//! Events are collected during a tick and delivered with that tick's
//! snapshot; the session has already applied their effects.

use serde::{Deserialize, Serialize};

use crate::components::EntityId;
use crate::enums::*;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    /// A projectile reduced an enemy to zero health.
    EnemyDestroyed {
        id: EntityId,
        kind: EnemyKind,
        points: u32,
    },
    /// An enemy got past the player, either through the floor or by contact.
    EnemyReachedBottom { id: EntityId, kind: EnemyKind },
    /// Health dropped by one.
    HealthLost { remaining: u32 },
    PowerUpCollected { kind: PowerUpKind },
    /// A bomb cleared the playfield.
    BombDetonated { enemies_destroyed: u32, points: u32 },
    ShotFired {
        projectiles: u32,
        special: bool,
        charge_level: u32,
    },
    AbilityActivated { ability: Ability },
    /// The stage countdown ran out.
    TimeExpired { stage: u32 },
    StageAdvanced { stage: u32 },
    GameOver { score: u32, stage: u32 },
}

impl GameEvent {
    /// Score contribution of this event.
    pub fn points(&self) -> u32 {
        match self {
            GameEvent::EnemyDestroyed { points, .. } | GameEvent::BombDetonated { points, .. } => {
                *points
            }
            _ => 0,
        }
    }
}
