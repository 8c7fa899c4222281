//! Snapshot system: queries the ECS world and builds a complete GameStateSnapshot.
//!
//! This system is read-only; it never modifies the world.

use hecs::World;

use turret_core::components::*;
use turret_core::constants::SPECIAL_CHARGE_MAX;
use turret_core::enums::PowerUpKind;
use turret_core::events::GameEvent;
use turret_core::state::*;
use turret_core::types::{Position, SimTime, Size, Velocity};

use crate::player::PlayerState;
use crate::session::GameSession;

/// Build a complete GameStateSnapshot from the current engine state.
pub fn build_snapshot(
    world: &World,
    time: &SimTime,
    playfield: Size,
    session: &GameSession,
    player: &PlayerState,
    events: Vec<GameEvent>,
) -> GameStateSnapshot {
    GameStateSnapshot {
        time: *time,
        status: session.status,
        playfield,
        score: session.score,
        health: session.health,
        stage: session.stage,
        combo: session.combo,
        stage_remaining_ms: session.stage_remaining_ms,
        player: build_player(player),
        abilities: build_abilities(session, player),
        active_power_ups: build_active_power_ups(player),
        enemies: build_enemies(world),
        projectiles: build_projectiles(world),
        power_ups: build_power_ups(world),
        stats: session.stats.clone(),
        events,
    }
}

fn build_player(player: &PlayerState) -> PlayerView {
    PlayerView {
        position: player.position,
        size: player.size,
        bullet_kind: player.bullet_kind,
        weapon_cooldown_ms: player.weapon_cooldown_ms,
        current_cooldown_ms: player.current_cooldown_ms,
        shield_active: player.shield_active(),
        shield_remaining_ms: player.shield_remaining_ms(),
        charging: player.charge.is_some(),
        charge_level: player.charge.map(|c| c.level).unwrap_or(0),
        bombs_detonated: player.bombs_detonated,
    }
}

fn build_abilities(session: &GameSession, player: &PlayerState) -> AbilityView {
    AbilityView {
        shield_ability_remaining_ms: player.shield_ability_remaining_ms,
        shield_ability_cooldown_ms: player.shield_ability_cooldown_ms,
        special_charge: session.special_charge,
        special_charge_max: SPECIAL_CHARGE_MAX,
        special_cooldown_ms: player.special_cooldown_ms,
    }
}

/// Active timed power-ups in a fixed kind order.
fn build_active_power_ups(player: &PlayerState) -> Vec<ActivePowerUpView> {
    PowerUpKind::TIMED
        .iter()
        .filter_map(|&kind| {
            player
                .power_ups
                .get(kind)
                .filter(|t| t.active)
                .map(|t| ActivePowerUpView {
                    kind,
                    total_ms: t.total_ms,
                    remaining_ms: t.remaining_ms,
                })
        })
        .collect()
}

fn build_enemies(world: &World) -> Vec<EnemyView> {
    let mut enemies: Vec<EnemyView> = world
        .query::<(&EntityId, &Enemy, &Position, &Velocity, &Size)>()
        .iter()
        .map(|(_, (id, enemy, pos, vel, size))| EnemyView {
            id: *id,
            kind: enemy.kind,
            position: *pos,
            size: *size,
            health: enemy.health,
            speed: vel.speed(),
        })
        .collect();

    enemies.sort_by_key(|e| e.id);
    enemies
}

fn build_projectiles(world: &World) -> Vec<ProjectileView> {
    let mut projectiles: Vec<ProjectileView> = world
        .query::<(&EntityId, &Projectile, &Position, &Velocity, &Size)>()
        .iter()
        .map(|(_, (id, proj, pos, vel, size))| ProjectileView {
            id: *id,
            bullet_kind: proj.bullet_kind,
            position: *pos,
            size: *size,
            speed: vel.speed(),
            damage: proj.damage,
            special: proj.special,
            charged: proj.charged,
            charge_level: proj.charge_level,
        })
        .collect();

    projectiles.sort_by_key(|p| p.id);
    projectiles
}

fn build_power_ups(world: &World) -> Vec<PowerUpView> {
    let mut power_ups: Vec<PowerUpView> = world
        .query::<(&EntityId, &PowerUp, &Position, &Size)>()
        .iter()
        .map(|(_, (id, power_up, pos, size))| PowerUpView {
            id: *id,
            kind: power_up.kind,
            position: *pos,
            size: *size,
        })
        .collect();

    power_ups.sort_by_key(|p| p.id);
    power_ups
}
