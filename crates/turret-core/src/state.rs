//! Game state snapshot: the complete visible state handed to the shell each tick.

use serde::{Deserialize, Serialize};

use crate::components::EntityId;
use crate::enums::*;
use crate::events::GameEvent;
use crate::types::{Position, SimTime, Size};

/// Complete game state published after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub status: GameStatus,
    pub playfield: Size,
    pub score: u32,
    pub health: u32,
    pub stage: u32,
    pub combo: u32,
    /// Countdown until the stage timer expires.
    pub stage_remaining_ms: f64,
    pub player: PlayerView,
    pub abilities: AbilityView,
    /// Timed power-ups that are currently active.
    pub active_power_ups: Vec<ActivePowerUpView>,
    pub enemies: Vec<EnemyView>,
    pub projectiles: Vec<ProjectileView>,
    pub power_ups: Vec<PowerUpView>,
    pub stats: StatsView,
    /// Events raised during the tick that produced this snapshot.
    pub events: Vec<GameEvent>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayerView {
    pub position: Position,
    pub size: Size,
    pub bullet_kind: BulletKind,
    pub weapon_cooldown_ms: f64,
    pub current_cooldown_ms: f64,
    pub shield_active: bool,
    /// Longest remaining shield time across pickup and ability.
    pub shield_remaining_ms: f64,
    pub charging: bool,
    pub charge_level: u32,
    pub bombs_detonated: u32,
}

/// Ability charges and cooldowns for the HUD.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AbilityView {
    pub shield_ability_remaining_ms: f64,
    pub shield_ability_cooldown_ms: f64,
    pub special_charge: f64,
    pub special_charge_max: f64,
    pub special_cooldown_ms: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivePowerUpView {
    pub kind: PowerUpKind,
    pub total_ms: f64,
    pub remaining_ms: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyView {
    pub id: EntityId,
    pub kind: EnemyKind,
    pub position: Position,
    pub size: Size,
    pub health: f64,
    pub speed: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectileView {
    pub id: EntityId,
    pub bullet_kind: BulletKind,
    pub position: Position,
    pub size: Size,
    pub speed: f64,
    pub damage: f64,
    pub special: bool,
    pub charged: bool,
    pub charge_level: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUpView {
    pub id: EntityId,
    pub kind: PowerUpKind,
    pub position: Position,
    pub size: Size,
}

/// Running session statistics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatsView {
    pub shots_fired: u32,
    pub enemies_destroyed: u32,
    pub power_ups_collected: u32,
    pub max_combo: u32,
}
