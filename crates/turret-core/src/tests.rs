#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use crate::commands::PlayerCommand;
    use crate::components::EntityId;
    use crate::constants::*;
    use crate::enums::*;
    use crate::events::GameEvent;
    use crate::state::GameStateSnapshot;
    use crate::types::{Bounds, Position, SimTime, Size, Velocity};

    fn boxed(x: f64, y: f64, w: f64, h: f64) -> Bounds {
        Bounds::new(Position::new(x, y), Size::new(w, h))
    }

    // ---- Serde ----

    #[test]
    fn test_enemy_kind_serde() {
        let variants = vec![
            EnemyKind::Basic,
            EnemyKind::Armored,
            EnemyKind::Fast,
            EnemyKind::Boss,
            EnemyKind::Special,
        ];
        for v in variants {
            let json = serde_json::to_string(&v).unwrap();
            let back: EnemyKind = serde_json::from_str(&json).unwrap();
            assert_eq!(v, back);
        }
    }

    #[test]
    fn test_status_serde() {
        for v in [
            GameStatus::Menu,
            GameStatus::Playing,
            GameStatus::Paused,
            GameStatus::GameOver,
        ] {
            let json = serde_json::to_string(&v).unwrap();
            let back: GameStatus = serde_json::from_str(&json).unwrap();
            assert_eq!(v, back);
        }
    }

    /// PlayerCommand is a tagged union; the tag must survive the trip.
    #[test]
    fn test_player_command_serde() {
        let commands = vec![
            PlayerCommand::StartSession,
            PlayerCommand::PauseToggle,
            PlayerCommand::SetStatus {
                status: GameStatus::Menu,
            },
            PlayerCommand::MovePlayer { target_x: 120.5 },
            PlayerCommand::Fire {
                special: true,
                charge_level: 3,
            },
            PlayerCommand::BeginCharge,
            PlayerCommand::EndCharge,
            PlayerCommand::SetBulletType {
                kind: BulletKind::Plasma,
            },
            PlayerCommand::ActivateShieldAbility,
            PlayerCommand::ActivateSpecialAbility,
            PlayerCommand::ResizePlayfield {
                width: 640.0,
                height: 480.0,
            },
        ];
        for cmd in &commands {
            let json = serde_json::to_string(cmd).unwrap();
            let back: PlayerCommand = serde_json::from_str(&json).unwrap();
            assert_eq!(*cmd, back);
        }
    }

    #[test]
    fn test_player_command_tag_format() {
        let json = serde_json::to_string(&PlayerCommand::MovePlayer { target_x: 10.0 }).unwrap();
        assert_eq!(json, r#"{"type":"MovePlayer","target_x":10.0}"#);

        let parsed: PlayerCommand =
            serde_json::from_str(r#"{"type":"SetBulletType","kind":"Laser"}"#).unwrap();
        assert_eq!(
            parsed,
            PlayerCommand::SetBulletType {
                kind: BulletKind::Laser
            }
        );
    }

    #[test]
    fn test_game_event_serde() {
        let events = vec![
            GameEvent::EnemyDestroyed {
                id: EntityId(4),
                kind: EnemyKind::Armored,
                points: 30,
            },
            GameEvent::EnemyReachedBottom {
                id: EntityId(9),
                kind: EnemyKind::Fast,
            },
            GameEvent::HealthLost { remaining: 2 },
            GameEvent::PowerUpCollected {
                kind: PowerUpKind::Bomb,
            },
            GameEvent::BombDetonated {
                enemies_destroyed: 3,
                points: 30,
            },
            GameEvent::TimeExpired { stage: 1 },
            GameEvent::GameOver {
                score: 120,
                stage: 2,
            },
        ];
        for e in &events {
            let json = serde_json::to_string(e).unwrap();
            let back: GameEvent = serde_json::from_str(&json).unwrap();
            assert_eq!(*e, back);
        }
    }

    #[test]
    fn test_default_snapshot_serializes() {
        let snap = GameStateSnapshot::default();
        let json = serde_json::to_string(&snap).unwrap();
        let back: GameStateSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back.status, GameStatus::Menu);
        assert!(back.enemies.is_empty());
    }

    // ---- Stat tables ----

    #[test]
    fn test_enemy_stats_table() {
        let basic = EnemyKind::Basic.stats();
        assert_relative_eq!(basic.health, 1.0);
        assert_relative_eq!(basic.speed, 0.05);
        assert_eq!(basic.size, Size::new(40.0, 40.0));

        let armored = EnemyKind::Armored.stats();
        assert_relative_eq!(armored.health, 3.0);
        assert_relative_eq!(armored.speed, 0.03);
        assert_eq!(armored.size, Size::new(50.0, 50.0));

        let fast = EnemyKind::Fast.stats();
        assert_relative_eq!(fast.health, 1.0);
        assert_relative_eq!(fast.speed, 0.1);
        assert_eq!(fast.size, Size::new(30.0, 30.0));

        let boss = EnemyKind::Boss.stats();
        assert_relative_eq!(boss.health, 10.0);
        assert_relative_eq!(boss.speed, 0.02);
        assert_eq!(boss.size, Size::new(80.0, 80.0));
    }

    #[test]
    fn test_enemy_points() {
        assert_eq!(EnemyKind::Basic.points(), 10);
        assert_eq!(EnemyKind::Fast.points(), 20);
        assert_eq!(EnemyKind::Armored.points(), 30);
        assert_eq!(EnemyKind::Boss.points(), 100);
    }

    #[test]
    fn test_bullet_profiles() {
        let p = BulletKind::Standard.profile();
        assert_eq!(p.size, Size::new(10.0, 20.0));
        assert_relative_eq!(p.speed, 0.5);
        assert_relative_eq!(p.damage, 1.0);

        let p = BulletKind::Laser.profile();
        assert_eq!(p.size, Size::new(6.0, 30.0));
        assert_relative_eq!(p.speed, 0.8);
        assert_relative_eq!(p.damage, 1.2);

        let p = BulletKind::Plasma.profile();
        assert_eq!(p.size, Size::new(14.0, 14.0));
        assert_relative_eq!(p.speed, 0.6);
        assert_relative_eq!(p.damage, 1.5);

        let p = BulletKind::Explosive.profile();
        assert_eq!(p.size, Size::new(16.0, 16.0));
        assert_relative_eq!(p.speed, 0.4);
        assert_relative_eq!(p.damage, 2.0);
    }

    #[test]
    fn test_power_up_durations() {
        assert_eq!(PowerUpKind::RapidFire.duration_ms(), Some(10_000.0));
        assert_eq!(PowerUpKind::Shield.duration_ms(), Some(15_000.0));
        assert_eq!(PowerUpKind::MultiShot.duration_ms(), Some(8_000.0));
        assert_eq!(PowerUpKind::Bomb.duration_ms(), None);
        assert!(!PowerUpKind::TIMED.contains(&PowerUpKind::Bomb));
    }

    // ---- Geometry ----

    #[test]
    fn test_overlap_basic() {
        let a = boxed(0.0, 0.0, 10.0, 10.0);
        let b = boxed(5.0, 5.0, 10.0, 10.0);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = boxed(0.0, 0.0, 10.0, 10.0);
        let right = boxed(10.0, 0.0, 10.0, 10.0);
        let below = boxed(0.0, 10.0, 10.0, 10.0);
        assert!(!a.overlaps(&right));
        assert!(!a.overlaps(&below));
    }

    #[test]
    fn test_overlap_requires_both_axes() {
        let a = boxed(0.0, 0.0, 10.0, 10.0);
        let same_row_far = boxed(50.0, 2.0, 10.0, 10.0);
        let same_col_far = boxed(2.0, 50.0, 10.0, 10.0);
        assert!(!a.overlaps(&same_row_far));
        assert!(!a.overlaps(&same_col_far));
    }

    #[test]
    fn test_contained_box_overlaps() {
        let outer = boxed(0.0, 0.0, 100.0, 100.0);
        let inner = boxed(40.0, 40.0, 5.0, 5.0);
        assert!(outer.overlaps(&inner));
        assert!(inner.overlaps(&outer));
    }

    #[test]
    fn test_velocity_speed() {
        assert_relative_eq!(Velocity::new(0.0, -0.5).speed(), 0.5);
        assert_relative_eq!(Velocity::new(3.0, 4.0).speed(), 5.0);
    }

    #[test]
    fn test_sim_time_advance() {
        let mut t = SimTime::default();
        t.advance(16.0);
        t.advance(17.5);
        assert_eq!(t.tick, 2);
        assert_relative_eq!(t.elapsed_ms, 33.5);
    }

    #[test]
    fn test_event_points() {
        let destroyed = GameEvent::EnemyDestroyed {
            id: EntityId(1),
            kind: EnemyKind::Boss,
            points: 100,
        };
        let bomb = GameEvent::BombDetonated {
            enemies_destroyed: 4,
            points: 4 * BOMB_POINTS_PER_ENEMY,
        };
        assert_eq!(destroyed.points(), 100);
        assert_eq!(bomb.points(), 40);
        assert_eq!(GameEvent::HealthLost { remaining: 1 }.points(), 0);
    }
}
