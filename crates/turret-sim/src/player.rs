//! Player data model: position, weapon state, power-up timers and abilities.
//!
//! Stored in `SimulationEngine` directly, NOT as an ECS entity; exactly
//! one player exists per session.

use turret_core::constants::*;
use turret_core::enums::{BulletKind, PowerUpKind};
use turret_core::types::{Bounds, Position, Size};

/// Countdown for one timed power-up.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PowerUpTimer {
    pub active: bool,
    pub total_ms: f64,
    pub remaining_ms: f64,
}

impl PowerUpTimer {
    /// Start (or restart) the timer at full duration.
    pub fn activate(&mut self, duration_ms: f64) {
        self.active = true;
        self.total_ms = duration_ms;
        self.remaining_ms = duration_ms;
    }

    /// Count down by `delta_ms`. Returns true if the timer expired on this call.
    pub fn decay(&mut self, delta_ms: f64) -> bool {
        if !self.active {
            return false;
        }
        self.remaining_ms -= delta_ms;
        if self.remaining_ms <= 0.0 {
            self.active = false;
            self.remaining_ms = 0.0;
            return true;
        }
        false
    }
}

/// Timers for every timed power-up kind.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PowerUpTimers {
    pub rapid_fire: PowerUpTimer,
    pub shield: PowerUpTimer,
    pub multi_shot: PowerUpTimer,
}

impl PowerUpTimers {
    /// Timer for `kind`, or `None` for instant power-ups.
    pub fn get(&self, kind: PowerUpKind) -> Option<&PowerUpTimer> {
        match kind {
            PowerUpKind::RapidFire => Some(&self.rapid_fire),
            PowerUpKind::Shield => Some(&self.shield),
            PowerUpKind::MultiShot => Some(&self.multi_shot),
            PowerUpKind::Bomb => None,
        }
    }

    pub fn get_mut(&mut self, kind: PowerUpKind) -> Option<&mut PowerUpTimer> {
        match kind {
            PowerUpKind::RapidFire => Some(&mut self.rapid_fire),
            PowerUpKind::Shield => Some(&mut self.shield),
            PowerUpKind::MultiShot => Some(&mut self.multi_shot),
            PowerUpKind::Bomb => None,
        }
    }

    pub fn is_active(&self, kind: PowerUpKind) -> bool {
        self.get(kind).is_some_and(|t| t.active)
    }
}

/// Charge held on the charge button.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ChargeState {
    /// Playing time accumulated since the press.
    pub held_ms: f64,
    pub level: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlayerState {
    pub position: Position,
    pub size: Size,
    /// Cooldown applied after an ordinary shot.
    pub weapon_cooldown_ms: f64,
    /// Remaining cooldown; firing is gated on this being zero.
    pub current_cooldown_ms: f64,
    pub bullet_kind: BulletKind,
    pub power_ups: PowerUpTimers,
    pub shield_ability_remaining_ms: f64,
    pub shield_ability_cooldown_ms: f64,
    pub special_cooldown_ms: f64,
    /// `Some` while the charge button is held.
    pub charge: Option<ChargeState>,
    pub bombs_detonated: u32,
}

impl PlayerState {
    /// Player centred horizontally and resting just above the floor.
    pub fn new(playfield: Size) -> Self {
        let size = Size::new(PLAYER_WIDTH, PLAYER_HEIGHT);
        let mut player = Self {
            position: Position::default(),
            size,
            weapon_cooldown_ms: BASE_WEAPON_COOLDOWN_MS,
            current_cooldown_ms: 0.0,
            bullet_kind: BulletKind::default(),
            power_ups: PowerUpTimers::default(),
            shield_ability_remaining_ms: 0.0,
            shield_ability_cooldown_ms: 0.0,
            special_cooldown_ms: 0.0,
            charge: None,
            bombs_detonated: 0,
        };
        player.position.x = (playfield.width - size.width) / 2.0;
        player.anchor(playfield);
        player
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.position, self.size)
    }

    /// Shield from either the pickup or the manual ability.
    pub fn shield_active(&self) -> bool {
        self.power_ups.shield.active || self.shield_ability_remaining_ms > 0.0
    }

    pub fn shield_remaining_ms(&self) -> f64 {
        self.power_ups
            .shield
            .remaining_ms
            .max(self.shield_ability_remaining_ms)
    }

    /// Horizontal centre, used as the muzzle position.
    pub fn center_x(&self) -> f64 {
        self.position.x + self.size.width / 2.0
    }

    /// Move to an absolute x, clamped so the player stays on the playfield.
    pub fn move_to(&mut self, target_x: f64, playfield_width: f64) {
        let max_x = (playfield_width - self.size.width).max(0.0);
        self.position.x = target_x.clamp(0.0, max_x);
    }

    /// Re-seat the player after the playfield changes size.
    pub fn anchor(&mut self, playfield: Size) {
        self.position.y = (playfield.height - self.size.height - PLAYER_FLOOR_MARGIN).max(0.0);
        let x = self.position.x;
        self.move_to(x, playfield.width);
    }

    /// Apply the lasting part of a collected power-up. Bomb clearing is
    /// resolved by the collision system; here it only bumps the counter.
    pub fn apply_power_up(&mut self, kind: PowerUpKind) {
        match (kind.duration_ms(), self.power_ups.get_mut(kind)) {
            (Some(duration), Some(timer)) => timer.activate(duration),
            _ => self.bombs_detonated += 1,
        }
    }
}
