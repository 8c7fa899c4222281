//! Simulation constants and tuning parameters.
//!
//! All durations are milliseconds, all speeds are playfield units per
//! millisecond.

// --- Playfield ---

/// Default playfield width in units.
pub const DEFAULT_PLAYFIELD_WIDTH: f64 = 800.0;

/// Default playfield height in units.
pub const DEFAULT_PLAYFIELD_HEIGHT: f64 = 600.0;

// --- Session ---

/// Health at the start of every session.
pub const STARTING_HEALTH: u32 = 3;

/// First stage of a session.
pub const STARTING_STAGE: u32 = 1;

/// Length of one stage (180 seconds).
pub const STAGE_DURATION_MS: f64 = 180_000.0;

// --- Player ---

pub const PLAYER_WIDTH: f64 = 50.0;
pub const PLAYER_HEIGHT: f64 = 50.0;

/// Gap between the player's bottom edge and the playfield floor.
pub const PLAYER_FLOOR_MARGIN: f64 = 10.0;

/// Base weapon cooldown after an ordinary shot.
pub const BASE_WEAPON_COOLDOWN_MS: f64 = 500.0;

// --- Enemy spawning ---

/// Enemy spawn interval at stage 0; shrinks by `ENEMY_SPAWN_STEP_MS` per stage.
pub const ENEMY_SPAWN_BASE_MS: f64 = 2000.0;

pub const ENEMY_SPAWN_STEP_MS: f64 = 100.0;

/// Floor for the enemy spawn interval.
pub const ENEMY_SPAWN_MIN_MS: f64 = 500.0;

/// Minimum stage (and roll threshold) for each enemy tier.
pub const BOSS_MIN_STAGE: u32 = 10;
pub const BOSS_ROLL: f64 = 0.1;
pub const ARMORED_MIN_STAGE: u32 = 5;
pub const ARMORED_ROLL: f64 = 0.3;
pub const FAST_MIN_STAGE: u32 = 3;
pub const FAST_ROLL: f64 = 0.4;

// --- Power-up spawning ---

/// Accumulated time between power-up spawn checks.
pub const POWER_UP_CHECK_INTERVAL_MS: f64 = 15_000.0;

/// Probability that a power-up check actually spawns one.
pub const POWER_UP_SPAWN_CHANCE: f64 = 0.3;

pub const POWER_UP_SIZE: f64 = 30.0;
pub const POWER_UP_SPEED: f64 = 0.05;

// --- Power-up effects ---

pub const RAPID_FIRE_DURATION_MS: f64 = 10_000.0;
pub const SHIELD_PICKUP_DURATION_MS: f64 = 15_000.0;
pub const MULTI_SHOT_DURATION_MS: f64 = 8_000.0;

/// Points per enemy destroyed by a bomb.
pub const BOMB_POINTS_PER_ENEMY: u32 = 10;

// --- Weapons ---

/// Hold time per charge level.
pub const CHARGE_STEP_MS: f64 = 300.0;

/// Highest charge level.
pub const MAX_CHARGE_LEVEL: u32 = 5;

/// Horizontal spacing of multishot projectiles.
pub const MULTI_SHOT_OFFSET: f64 = 20.0;

pub const SPECIAL_WIDTH_FACTOR: f64 = 2.0;
pub const SPECIAL_HEIGHT_FACTOR: f64 = 1.5;
pub const SPECIAL_SPEED: f64 = 0.7;
pub const SPECIAL_DAMAGE: f64 = 3.0;

pub const CHARGE_WIDTH_PER_LEVEL: f64 = 2.0;
pub const CHARGE_HEIGHT_PER_LEVEL: f64 = 3.0;
pub const CHARGE_SPEED_PER_LEVEL: f64 = 0.05;

pub const RAPID_FIRE_SPEED_FACTOR: f64 = 1.4;
pub const RAPID_FIRE_SPEED_CAP: f64 = 1.0;
pub const RAPID_FIRE_DAMAGE_FACTOR: f64 = 1.2;

pub const SPECIAL_COOLDOWN_MS: f64 = 1000.0;
pub const CHARGED_COOLDOWN_BASE_MS: f64 = 500.0;
pub const CHARGED_COOLDOWN_PER_LEVEL_MS: f64 = 100.0;
pub const RAPID_FIRE_COOLDOWN_MS: f64 = 150.0;

// --- Abilities ---

/// Manually activated shield.
pub const SHIELD_ABILITY_DURATION_MS: f64 = 3000.0;
pub const SHIELD_ABILITY_COOLDOWN_MS: f64 = 10_000.0;

/// Special-fire ability.
pub const SPECIAL_ABILITY_COST: f64 = 25.0;
pub const SPECIAL_ABILITY_COOLDOWN_MS: f64 = 5000.0;

/// Special charge pool and its regeneration policy.
pub const SPECIAL_CHARGE_MAX: f64 = 100.0;
pub const SPECIAL_CHARGE_REGEN_PER_SEC: f64 = 5.0;
pub const SPECIAL_CHARGE_PER_KILL: f64 = 2.0;
