//! Headless runner: plays a session with a scripted autopilot and returns
//! the final snapshot. No terminal involved.

use tracing::{debug, info};

use turret_core::commands::PlayerCommand;
use turret_core::constants::SPECIAL_ABILITY_COST;
use turret_core::enums::GameStatus;
use turret_core::state::GameStateSnapshot;
use turret_sim::{SimConfig, SimulationEngine};

/// Sweep speed of the autopilot, in playfield units per frame.
const SWEEP_STEP: f64 = 12.0;
/// Enemies this close above the player's top edge trigger the shield.
const SHIELD_TRIGGER_DISTANCE: f64 = 80.0;
/// The special ability is saved for crowded screens.
const SPECIAL_CROWD: usize = 4;

/// Scripted input: sweep left and right, fire whenever the weapon is ready,
/// shield against close enemies, and spend the special on crowds.
#[derive(Debug, Clone)]
pub struct Autopilot {
    direction: f64,
}

impl Default for Autopilot {
    fn default() -> Self {
        Self { direction: 1.0 }
    }
}

impl Autopilot {
    /// Commands for the next frame, given the last snapshot.
    pub fn decide(&mut self, snapshot: &GameStateSnapshot) -> Vec<PlayerCommand> {
        if snapshot.status != GameStatus::Playing {
            return Vec::new();
        }
        let player = &snapshot.player;
        let abilities = &snapshot.abilities;
        let mut commands = Vec::new();

        let max_x = (snapshot.playfield.width - player.size.width).max(0.0);
        let mut target_x = player.position.x + self.direction * SWEEP_STEP;
        if target_x <= 0.0 || target_x >= max_x {
            self.direction = -self.direction;
            target_x = target_x.clamp(0.0, max_x);
        }
        commands.push(PlayerCommand::MovePlayer { target_x });

        let threatened = snapshot.enemies.iter().any(|e| {
            e.position.y + e.size.height >= player.position.y - SHIELD_TRIGGER_DISTANCE
        });
        if threatened
            && !player.shield_active
            && abilities.shield_ability_cooldown_ms <= 0.0
        {
            commands.push(PlayerCommand::ActivateShieldAbility);
        }

        if player.current_cooldown_ms <= 0.0 {
            let special_ready = snapshot.enemies.len() >= SPECIAL_CROWD
                && abilities.special_charge >= SPECIAL_ABILITY_COST
                && abilities.special_cooldown_ms <= 0.0;
            commands.push(if special_ready {
                PlayerCommand::ActivateSpecialAbility
            } else {
                PlayerCommand::Fire {
                    special: false,
                    charge_level: 0,
                }
            });
        }
        commands
    }
}

/// Play up to `ticks` frames of `frame_ms` each, stopping early on game over.
pub fn run_headless(config: SimConfig, ticks: u32, frame_ms: f64) -> GameStateSnapshot {
    let mut engine = SimulationEngine::new(config);
    engine.queue_command(PlayerCommand::StartSession);
    let mut snapshot = engine.tick(0.0);
    let mut autopilot = Autopilot::default();

    for _ in 0..ticks {
        if snapshot.status == GameStatus::GameOver {
            break;
        }
        engine.queue_commands(autopilot.decide(&snapshot));
        snapshot = engine.tick(frame_ms);
        for event in &snapshot.events {
            debug!(tick = snapshot.time.tick, ?event, "game event");
        }
    }

    info!(
        score = snapshot.score,
        stage = snapshot.stage,
        health = snapshot.health,
        ticks = snapshot.time.tick,
        "headless run finished"
    );
    snapshot
}
