//! Projectile construction: bullet-kind profiles, special/charge/rapid-fire
//! modifiers, multishot spread and the post-shot cooldown.

use hecs::World;

use turret_core::constants::*;
use turret_core::enums::{BulletKind, PowerUpKind};
use turret_core::events::GameEvent;
use turret_core::types::Size;

use crate::player::PlayerState;
use crate::world_setup;

/// Final stats of one shot after all modifiers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShotProfile {
    pub bullet_kind: BulletKind,
    pub size: Size,
    pub speed: f64,
    pub damage: f64,
    pub special: bool,
    pub charged: bool,
    pub charge_level: u32,
}

/// Charge level for a press held `held_ms`: one level per 300 ms, capped at 5.
pub fn charge_level(held_ms: f64) -> u32 {
    let steps = (held_ms.max(0.0) / CHARGE_STEP_MS).floor();
    (steps as u32).min(MAX_CHARGE_LEVEL)
}

/// Apply modifiers in order: special overrides everything, otherwise charge
/// grows the shot; rapid fire scales the result.
pub fn shot_profile(
    bullet_kind: BulletKind,
    special: bool,
    charge_level: u32,
    rapid_fire: bool,
) -> ShotProfile {
    let base = bullet_kind.profile();
    let level = charge_level.min(MAX_CHARGE_LEVEL);
    let charged = !special && level > 0;

    let mut size = base.size;
    let mut speed = base.speed;
    let mut damage = base.damage;

    if special {
        size.width *= SPECIAL_WIDTH_FACTOR;
        size.height *= SPECIAL_HEIGHT_FACTOR;
        speed = SPECIAL_SPEED;
        damage = SPECIAL_DAMAGE;
    } else if charged {
        let l = level as f64;
        size.width += l * CHARGE_WIDTH_PER_LEVEL;
        size.height += l * CHARGE_HEIGHT_PER_LEVEL;
        speed += l * CHARGE_SPEED_PER_LEVEL;
        damage += (level / 2) as f64;
    }

    if rapid_fire {
        speed = (speed * RAPID_FIRE_SPEED_FACTOR).min(RAPID_FIRE_SPEED_CAP);
        damage *= RAPID_FIRE_DAMAGE_FACTOR;
    }

    ShotProfile {
        bullet_kind,
        size,
        speed,
        damage,
        special,
        charged,
        charge_level: if charged { level } else { 0 },
    }
}

/// Cooldown after a shot. Precedence: special, then charged, then rapid fire.
pub fn cooldown_after(shot: &ShotProfile, rapid_fire: bool, base_cooldown_ms: f64) -> f64 {
    if shot.special {
        SPECIAL_COOLDOWN_MS
    } else if shot.charged {
        CHARGED_COOLDOWN_BASE_MS + shot.charge_level as f64 * CHARGED_COOLDOWN_PER_LEVEL_MS
    } else if rapid_fire {
        RAPID_FIRE_COOLDOWN_MS
    } else {
        base_cooldown_ms
    }
}

const SINGLE_MUZZLE: [f64; 1] = [0.0];
const SPREAD_MUZZLES: [f64; 3] = [-MULTI_SHOT_OFFSET, 0.0, MULTI_SHOT_OFFSET];

/// Horizontal muzzle offsets for one trigger pull.
pub fn muzzle_offsets(multi_shot: bool, special: bool) -> &'static [f64] {
    if multi_shot && !special {
        &SPREAD_MUZZLES
    } else {
        &SINGLE_MUZZLE
    }
}

/// Fire from the player's position. No-op (returns `None`) while the weapon
/// is cooling down; the existing cooldown is left untouched.
pub fn fire(
    world: &mut World,
    player: &mut PlayerState,
    next_entity_id: &mut u32,
    special: bool,
    charge_level: u32,
) -> Option<GameEvent> {
    if player.current_cooldown_ms > 0.0 {
        return None;
    }

    let rapid_fire = player.power_ups.is_active(PowerUpKind::RapidFire);
    let multi_shot = player.power_ups.is_active(PowerUpKind::MultiShot);
    let shot = shot_profile(player.bullet_kind, special, charge_level, rapid_fire);

    // Centred on the player, bottom edge resting on the player's top edge.
    let base_x = player.center_x() - shot.size.width / 2.0;
    let y = player.position.y - shot.size.height;

    let offsets = muzzle_offsets(multi_shot, special);
    for offset in offsets {
        world_setup::spawn_projectile(world, next_entity_id, &shot, base_x + offset, y);
    }

    player.current_cooldown_ms = cooldown_after(&shot, rapid_fire, player.weapon_cooldown_ms);

    Some(GameEvent::ShotFired {
        projectiles: offsets.len() as u32,
        special,
        charge_level: shot.charge_level,
    })
}
