//! Collision and resolution system.
//!
//! Resolution runs in two phases. `resolve` reads the world and derives a
//! complete `Resolution` (despawns, surviving enemy health, pickups, events)
//! without touching anything; `apply` then commits it in one step. No
//! removal can shift or invalidate a later check within the same frame.
//!
//! Pass order: playfield exits, projectile x enemy, player x power-up,
//! player x enemy (skipped while shielded).

use std::collections::HashSet;

use hecs::{Entity, World};

use turret_core::components::*;
use turret_core::constants::BOMB_POINTS_PER_ENEMY;
use turret_core::enums::PowerUpKind;
use turret_core::events::GameEvent;
use turret_core::types::{Bounds, Position, Size};

use crate::player::PlayerState;

/// Everything one frame of collisions changes.
#[derive(Debug, Default)]
pub struct Resolution {
    pub despawn: Vec<Entity>,
    /// New health for enemies that were hit but survived.
    pub damaged: Vec<(Entity, f64)>,
    /// Power-ups picked up this frame, in pickup order.
    pub collected: Vec<PowerUpKind>,
    pub events: Vec<GameEvent>,
}

/// Read-only copy of an enemy used while resolving.
struct EnemyRow {
    entity: Entity,
    id: EntityId,
    enemy: Enemy,
    bounds: Bounds,
    alive: bool,
    hit: bool,
}

struct Row<T> {
    entity: Entity,
    item: T,
    bounds: Bounds,
}

fn collect_enemies(world: &World) -> Vec<EnemyRow> {
    let mut rows: Vec<EnemyRow> = world
        .query::<(&EntityId, &Enemy, &Position, &Size)>()
        .iter()
        .map(|(entity, (id, enemy, pos, size))| EnemyRow {
            entity,
            id: *id,
            enemy: enemy.clone(),
            bounds: Bounds::new(*pos, *size),
            alive: enemy.health > 0.0,
            hit: false,
        })
        .collect();
    rows.sort_by_key(|r| r.id);
    rows
}

fn collect_rows<T: hecs::Component + Clone>(world: &World) -> Vec<Row<T>> {
    let mut rows: Vec<(EntityId, Row<T>)> = world
        .query::<(&EntityId, &T, &Position, &Size)>()
        .iter()
        .map(|(entity, (id, item, pos, size))| {
            (
                *id,
                Row {
                    entity,
                    item: item.clone(),
                    bounds: Bounds::new(*pos, *size),
                },
            )
        })
        .collect();
    rows.sort_by_key(|(id, _)| *id);
    rows.into_iter().map(|(_, row)| row).collect()
}

/// Derive this frame's resolution from the current world.
pub fn resolve(world: &World, player: &PlayerState, playfield: Size) -> Resolution {
    let mut res = Resolution::default();
    let mut enemies = collect_enemies(world);
    let projectiles = collect_rows::<Projectile>(world);
    let power_ups = collect_rows::<PowerUp>(world);
    let mut spent: HashSet<Entity> = HashSet::new();

    // 1. Playfield exits.
    for p in &projectiles {
        if p.bounds.top() < -p.bounds.size.height {
            spent.insert(p.entity);
        }
    }
    for u in &power_ups {
        if u.bounds.top() > playfield.height {
            spent.insert(u.entity);
        }
    }
    for e in enemies.iter_mut().filter(|e| e.alive) {
        if e.bounds.top() > playfield.height {
            e.alive = false;
            res.despawn.push(e.entity);
            res.events.push(GameEvent::EnemyReachedBottom {
                id: e.id,
                kind: e.enemy.kind,
            });
        }
    }

    // 2. Projectile x enemy: each projectile hits the first live enemy it overlaps.
    for p in &projectiles {
        if spent.contains(&p.entity) {
            continue;
        }
        let Some(target) = enemies
            .iter_mut()
            .find(|e| e.alive && e.bounds.overlaps(&p.bounds))
        else {
            continue;
        };
        spent.insert(p.entity);
        target.enemy.health -= p.item.damage;
        target.hit = true;
        if target.enemy.health <= 0.0 {
            target.alive = false;
            res.despawn.push(target.entity);
            res.events.push(GameEvent::EnemyDestroyed {
                id: target.id,
                kind: target.enemy.kind,
                points: target.enemy.kind.points(),
            });
        }
    }

    // 3. Player x power-up.
    let player_bounds = player.bounds();
    for u in &power_ups {
        if spent.contains(&u.entity) || !u.bounds.overlaps(&player_bounds) {
            continue;
        }
        spent.insert(u.entity);
        let kind = u.item.kind;
        res.collected.push(kind);
        res.events.push(GameEvent::PowerUpCollected { kind });

        if kind == PowerUpKind::Bomb {
            let mut cleared = 0u32;
            for e in enemies.iter_mut().filter(|e| e.alive) {
                e.alive = false;
                res.despawn.push(e.entity);
                cleared += 1;
            }
            res.events.push(GameEvent::BombDetonated {
                enemies_destroyed: cleared,
                points: cleared * BOMB_POINTS_PER_ENEMY,
            });
        }
    }

    // 4. Player x enemy. A shield collected this frame already protects.
    let shielded = player.shield_active() || res.collected.contains(&PowerUpKind::Shield);
    if !shielded {
        for e in enemies.iter_mut().filter(|e| e.alive) {
            if e.bounds.overlaps(&player_bounds) {
                e.alive = false;
                res.despawn.push(e.entity);
                res.events.push(GameEvent::EnemyReachedBottom {
                    id: e.id,
                    kind: e.enemy.kind,
                });
            }
        }
    }

    res.despawn.extend(spent);
    res.damaged = enemies
        .iter()
        .filter(|e| e.alive && e.hit)
        .map(|e| (e.entity, e.enemy.health))
        .collect();
    res
}

/// Commit a resolution: despawn, write surviving enemy health and apply
/// pickups to the player. Returns the frame's events.
pub fn apply(world: &mut World, player: &mut PlayerState, res: Resolution) -> Vec<GameEvent> {
    for entity in res.despawn {
        let _ = world.despawn(entity);
    }
    for (entity, health) in res.damaged {
        if let Ok(mut enemy) = world.get::<&mut Enemy>(entity) {
            enemy.health = health;
        }
    }
    for kind in res.collected {
        player.apply_power_up(kind);
    }
    res.events
}

/// Resolve and commit in one call.
pub fn run(world: &mut World, player: &mut PlayerState, playfield: Size) -> Vec<GameEvent> {
    let res = resolve(world, player, playfield);
    apply(world, player, res)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use turret_core::enums::{BulletKind, EnemyKind};

    use crate::weapons::shot_profile;
    use crate::world_setup;

    const PLAYFIELD: Size = Size {
        width: 800.0,
        height: 600.0,
    };

    struct Fixture {
        world: World,
        player: PlayerState,
        next_id: u32,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                world: World::new(),
                player: PlayerState::new(PLAYFIELD),
                next_id: 0,
            }
        }

        fn enemy(&mut self, kind: EnemyKind, x: f64, y: f64) -> Entity {
            world_setup::spawn_enemy(&mut self.world, &mut self.next_id, kind, x, y)
        }

        fn bullet(&mut self, kind: BulletKind, x: f64, y: f64) -> Entity {
            let shot = shot_profile(kind, false, 0, false);
            world_setup::spawn_projectile(&mut self.world, &mut self.next_id, &shot, x, y)
        }

        fn power_up(&mut self, kind: PowerUpKind, x: f64, y: f64) -> Entity {
            world_setup::spawn_power_up(&mut self.world, &mut self.next_id, kind, x, y)
        }

        fn run(&mut self) -> Vec<GameEvent> {
            run(&mut self.world, &mut self.player, PLAYFIELD)
        }

        fn enemy_count(&self) -> usize {
            self.world.query::<&Enemy>().iter().count()
        }

        fn projectile_count(&self) -> usize {
            self.world.query::<&Projectile>().iter().count()
        }
    }

    #[test]
    fn test_hit_subtracts_exact_damage() {
        let mut f = Fixture::new();
        let boss = f.enemy(EnemyKind::Boss, 100.0, 100.0);
        f.bullet(BulletKind::Laser, 110.0, 150.0);

        let events = f.run();
        assert!(events.is_empty());
        assert_relative_eq!(f.world.get::<&Enemy>(boss).unwrap().health, 10.0 - 1.2);
        assert_eq!(f.projectile_count(), 0);
    }

    #[test]
    fn test_kill_removes_enemy_and_awards_points() {
        let mut f = Fixture::new();
        f.enemy(EnemyKind::Fast, 100.0, 100.0);
        f.bullet(BulletKind::Standard, 105.0, 110.0);

        let events = f.run();
        assert_eq!(f.enemy_count(), 0);
        assert!(matches!(
            events.as_slice(),
            [GameEvent::EnemyDestroyed {
                kind: EnemyKind::Fast,
                points: 20,
                ..
            }]
        ));
    }

    #[test]
    fn test_two_projectiles_stack_damage_in_one_frame() {
        let mut f = Fixture::new();
        f.enemy(EnemyKind::Armored, 100.0, 100.0);
        f.bullet(BulletKind::Explosive, 105.0, 110.0);
        f.bullet(BulletKind::Standard, 120.0, 110.0);

        let events = f.run();
        assert_eq!(f.enemy_count(), 0);
        assert_eq!(f.projectile_count(), 0);
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn test_projectile_passes_dead_enemy() {
        let mut f = Fixture::new();
        f.enemy(EnemyKind::Basic, 100.0, 100.0);
        f.bullet(BulletKind::Standard, 105.0, 110.0);
        f.bullet(BulletKind::Standard, 115.0, 110.0);

        f.run();
        assert_eq!(f.enemy_count(), 0);
        // The second bullet found no live target and keeps flying.
        assert_eq!(f.projectile_count(), 1);
    }

    #[test]
    fn test_edge_contact_is_not_a_hit() {
        let mut f = Fixture::new();
        f.enemy(EnemyKind::Basic, 100.0, 100.0);
        // Projectile's top edge exactly on the enemy's bottom edge.
        f.bullet(BulletKind::Standard, 110.0, 140.0);
        f.run();
        assert_eq!(f.enemy_count(), 1);
        assert_eq!(f.projectile_count(), 1);
    }

    #[test]
    fn test_projectile_leaving_top_is_removed() {
        let mut f = Fixture::new();
        f.bullet(BulletKind::Standard, 10.0, -20.0);
        f.run();
        assert_eq!(f.projectile_count(), 1);

        f.bullet(BulletKind::Standard, 10.0, -20.5);
        f.run();
        assert_eq!(f.projectile_count(), 1);
    }

    #[test]
    fn test_enemy_past_floor_reaches_bottom() {
        let mut f = Fixture::new();
        f.enemy(EnemyKind::Basic, 0.0, 600.5);
        let events = f.run();
        assert_eq!(f.enemy_count(), 0);
        assert!(matches!(
            events.as_slice(),
            [GameEvent::EnemyReachedBottom { .. }]
        ));
    }

    #[test]
    fn test_player_contact_without_shield() {
        let mut f = Fixture::new();
        let x = f.player.position.x;
        let y = f.player.position.y;
        f.enemy(EnemyKind::Basic, x, y - 10.0);

        let events = f.run();
        assert_eq!(f.enemy_count(), 0);
        assert!(matches!(
            events.as_slice(),
            [GameEvent::EnemyReachedBottom { .. }]
        ));
    }

    #[test]
    fn test_shield_blocks_player_contact() {
        let mut f = Fixture::new();
        f.player.shield_ability_remaining_ms = 1000.0;
        let (x, y) = (f.player.position.x, f.player.position.y);
        f.enemy(EnemyKind::Basic, x, y - 10.0);

        let events = f.run();
        assert_eq!(f.enemy_count(), 1);
        assert!(events.is_empty());
    }

    #[test]
    fn test_pickup_activates_power_up() {
        let mut f = Fixture::new();
        let (x, y) = (f.player.position.x, f.player.position.y);
        f.power_up(PowerUpKind::RapidFire, x + 5.0, y - 5.0);

        let events = f.run();
        assert_eq!(
            events,
            vec![GameEvent::PowerUpCollected {
                kind: PowerUpKind::RapidFire
            }]
        );
        assert!(f.player.power_ups.is_active(PowerUpKind::RapidFire));
        assert_eq!(f.world.query::<&PowerUp>().iter().count(), 0);
    }

    #[test]
    fn test_bomb_clears_all_enemies_once() {
        let mut f = Fixture::new();
        f.enemy(EnemyKind::Basic, 10.0, 10.0);
        f.enemy(EnemyKind::Boss, 200.0, 50.0);
        f.enemy(EnemyKind::Fast, 600.0, 300.0);
        let (x, y) = (f.player.position.x, f.player.position.y);
        f.power_up(PowerUpKind::Bomb, x, y);

        let events = f.run();
        assert_eq!(f.enemy_count(), 0);
        let bombs: Vec<_> = events
            .iter()
            .filter(|e| matches!(e, GameEvent::BombDetonated { .. }))
            .collect();
        assert_eq!(
            bombs,
            vec![&GameEvent::BombDetonated {
                enemies_destroyed: 3,
                points: 30
            }]
        );
        assert_eq!(f.player.bombs_detonated, 1);
    }

    #[test]
    fn test_power_up_below_floor_is_removed() {
        let mut f = Fixture::new();
        f.power_up(PowerUpKind::Shield, 0.0, 601.0);
        let events = f.run();
        assert!(events.is_empty());
        assert_eq!(f.world.query::<&PowerUp>().iter().count(), 0);
        assert!(!f.player.shield_active());
    }

    #[test]
    fn test_resolve_does_not_mutate_world() {
        let mut f = Fixture::new();
        f.enemy(EnemyKind::Basic, 100.0, 100.0);
        f.bullet(BulletKind::Standard, 105.0, 110.0);

        let res = resolve(&f.world, &f.player, PLAYFIELD);
        assert_eq!(res.despawn.len(), 2);
        assert_eq!(f.enemy_count(), 1);
        assert_eq!(f.projectile_count(), 1);
    }
}
