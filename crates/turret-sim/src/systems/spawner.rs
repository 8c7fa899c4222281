//! Spawning system: emits enemies and power-ups from elapsed-time accumulators.

use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use tracing::trace;

use turret_core::constants::*;
use turret_core::enums::{EnemyKind, PowerUpKind};
use turret_core::types::Size;

use crate::world_setup;

/// Time accumulated towards the next spawn checks.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SpawnTimers {
    pub enemy_elapsed_ms: f64,
    pub power_up_elapsed_ms: f64,
}

/// Enemy spawn interval for a stage: 2000 ms less 100 ms per stage, never
/// below 500 ms.
pub fn enemy_spawn_interval(stage: u32) -> f64 {
    (ENEMY_SPAWN_BASE_MS - stage as f64 * ENEMY_SPAWN_STEP_MS).max(ENEMY_SPAWN_MIN_MS)
}

/// Pick an enemy kind from a single roll in [0, 1).
///
/// Each tier compares the same roll against its own threshold, first match
/// wins: boss (stage >= 10, roll < 0.1), armored (stage >= 5, roll < 0.3),
/// fast (stage >= 3, roll < 0.4), otherwise basic.
pub fn select_enemy_kind(stage: u32, roll: f64) -> EnemyKind {
    if stage >= BOSS_MIN_STAGE && roll < BOSS_ROLL {
        EnemyKind::Boss
    } else if stage >= ARMORED_MIN_STAGE && roll < ARMORED_ROLL {
        EnemyKind::Armored
    } else if stage >= FAST_MIN_STAGE && roll < FAST_ROLL {
        EnemyKind::Fast
    } else {
        EnemyKind::Basic
    }
}

/// Uniform x so an entity of `width` fits inside the playfield.
fn spawn_x(rng: &mut ChaCha8Rng, playfield_width: f64, width: f64) -> f64 {
    let span = (playfield_width - width).max(0.0);
    rng.gen::<f64>() * span
}

/// Accumulate `delta_ms` and spawn at most one enemy and one power-up.
pub fn run(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    timers: &mut SpawnTimers,
    next_entity_id: &mut u32,
    stage: u32,
    playfield: Size,
    delta_ms: f64,
) {
    timers.enemy_elapsed_ms += delta_ms;
    if timers.enemy_elapsed_ms >= enemy_spawn_interval(stage) {
        timers.enemy_elapsed_ms = 0.0;
        let kind = select_enemy_kind(stage, rng.gen::<f64>());
        let x = spawn_x(rng, playfield.width, kind.stats().size.width);
        world_setup::spawn_enemy_above(world, next_entity_id, kind, x);
        trace!(?kind, x, "enemy spawned");
    }

    timers.power_up_elapsed_ms += delta_ms;
    if timers.power_up_elapsed_ms >= POWER_UP_CHECK_INTERVAL_MS {
        timers.power_up_elapsed_ms = 0.0;
        if rng.gen_bool(POWER_UP_SPAWN_CHANCE) {
            let kind = PowerUpKind::ALL[rng.gen_range(0..PowerUpKind::ALL.len())];
            let x = spawn_x(rng, playfield.width, POWER_UP_SIZE);
            world_setup::spawn_power_up(world, next_entity_id, kind, x, -POWER_UP_SIZE);
            trace!(?kind, x, "power-up spawned");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use turret_core::components::{Enemy, PowerUp};
    use turret_core::types::Position;

    #[test]
    fn test_spawn_interval_by_stage() {
        assert_eq!(enemy_spawn_interval(1), 1900.0);
        assert_eq!(enemy_spawn_interval(10), 1000.0);
        assert_eq!(enemy_spawn_interval(15), 500.0);
        assert_eq!(enemy_spawn_interval(40), 500.0);
    }

    #[test]
    fn test_kind_selection_low_stage_always_basic() {
        for roll in [0.0, 0.05, 0.2, 0.35, 0.99] {
            assert_eq!(select_enemy_kind(1, roll), EnemyKind::Basic);
            assert_eq!(select_enemy_kind(2, roll), EnemyKind::Basic);
        }
    }

    #[test]
    fn test_kind_selection_tiers() {
        assert_eq!(select_enemy_kind(3, 0.39), EnemyKind::Fast);
        assert_eq!(select_enemy_kind(3, 0.4), EnemyKind::Basic);
        assert_eq!(select_enemy_kind(5, 0.05), EnemyKind::Armored);
        assert_eq!(select_enemy_kind(5, 0.35), EnemyKind::Fast);
        assert_eq!(select_enemy_kind(10, 0.05), EnemyKind::Boss);
        assert_eq!(select_enemy_kind(10, 0.2), EnemyKind::Armored);
        assert_eq!(select_enemy_kind(10, 0.3), EnemyKind::Fast);
        assert_eq!(select_enemy_kind(10, 0.5), EnemyKind::Basic);
    }

    #[test]
    fn test_enemy_spawns_once_interval_met() {
        let mut world = World::new();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut timers = SpawnTimers::default();
        let mut next_id = 0;
        let playfield = Size::new(800.0, 600.0);

        run(&mut world, &mut rng, &mut timers, &mut next_id, 1, playfield, 1000.0);
        assert_eq!(world.query::<&Enemy>().iter().count(), 0);

        run(&mut world, &mut rng, &mut timers, &mut next_id, 1, playfield, 900.0);
        assert_eq!(world.query::<&Enemy>().iter().count(), 1);
        assert_eq!(timers.enemy_elapsed_ms, 0.0);

        // Accumulator resets rather than carrying the overshoot.
        run(&mut world, &mut rng, &mut timers, &mut next_id, 1, playfield, 1800.0);
        assert_eq!(world.query::<&Enemy>().iter().count(), 1);
    }

    #[test]
    fn test_enemy_spawn_position() {
        let mut world = World::new();
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let mut timers = SpawnTimers::default();
        let mut next_id = 0;
        let playfield = Size::new(800.0, 600.0);

        for _ in 0..50 {
            run(&mut world, &mut rng, &mut timers, &mut next_id, 12, playfield, 2000.0);
        }
        for (_e, (enemy, pos)) in world.query::<(&Enemy, &Position)>().iter() {
            let size = enemy.kind.stats().size;
            assert!(pos.x >= 0.0 && pos.x <= playfield.width - size.width);
            assert_eq!(pos.y, -size.height);
        }
    }

    #[test]
    fn test_power_up_checks_every_15s() {
        let mut world = World::new();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut timers = SpawnTimers::default();
        let mut next_id = 0;
        let playfield = Size::new(800.0, 600.0);

        // 200 checks at a 30% chance: the count must sit well inside (0, 200).
        for _ in 0..200 {
            run(&mut world, &mut rng, &mut timers, &mut next_id, 1, playfield, 15_000.0);
        }
        let count = world.query::<&PowerUp>().iter().count();
        assert!(count > 20 && count < 110, "got {count} power-ups");

        for (_e, (_p, pos)) in world.query::<(&PowerUp, &Position)>().iter() {
            assert_eq!(pos.y, -POWER_UP_SIZE);
        }
    }
}
