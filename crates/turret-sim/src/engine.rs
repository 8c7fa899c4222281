//! Simulation engine: the core of the game.
//!
//! `SimulationEngine` owns the hecs ECS world plus the session and player
//! state, processes player commands, runs all systems and produces
//! `GameStateSnapshot`s. Completely headless, enabling deterministic testing.
//!
//! Every shell operation is a method here. Guarded operations return `false`
//! and change nothing when their preconditions do not hold.

use std::collections::VecDeque;

use hecs::World;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use turret_core::commands::PlayerCommand;
use turret_core::constants::*;
use turret_core::enums::{Ability, BulletKind, GameStatus};
use turret_core::events::GameEvent;
use turret_core::state::GameStateSnapshot;
use turret_core::types::{SimTime, Size};

use crate::config::SimConfig;
use crate::player::{ChargeState, PlayerState};
use crate::session::GameSession;
use crate::systems;
use crate::systems::spawner::SpawnTimers;
use crate::weapons;

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    world: World,
    time: SimTime,
    config: SimConfig,
    playfield: Size,
    session: GameSession,
    player: PlayerState,
    rng: ChaCha8Rng,
    next_entity_id: u32,
    spawn_timers: SpawnTimers,
    command_queue: VecDeque<PlayerCommand>,
    /// Events raised since the last snapshot was taken.
    events: Vec<GameEvent>,
}

impl SimulationEngine {
    /// Create a new engine sitting at the menu.
    pub fn new(config: SimConfig) -> Self {
        let playfield = config.playfield();
        Self {
            world: World::new(),
            time: SimTime::default(),
            session: GameSession::new(&config, GameStatus::Menu),
            player: PlayerState::new(playfield),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            next_entity_id: 0,
            spawn_timers: SpawnTimers::default(),
            command_queue: VecDeque::new(),
            events: Vec::new(),
            playfield,
            config,
        }
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by one frame of `delta_ms` and return the
    /// resulting snapshot. Only a playing session on a measured playfield
    /// advances; an unmeasured playfield freezes the frame like a pause.
    pub fn tick(&mut self, delta_ms: f64) -> GameStateSnapshot {
        self.process_commands();

        if self.is_playing() && self.playfield_measured() {
            let delta_ms = if delta_ms.is_finite() {
                delta_ms.max(0.0)
            } else {
                0.0
            };
            self.run_systems(delta_ms);
            self.time.advance(delta_ms);
        }

        let events = std::mem::take(&mut self.events);
        self.build_snapshot(events)
    }

    /// Current state without advancing or draining pending events.
    pub fn snapshot(&self) -> GameStateSnapshot {
        self.build_snapshot(Vec::new())
    }

    pub fn status(&self) -> GameStatus {
        self.session.status
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn playfield(&self) -> Size {
        self.playfield
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn player(&self) -> &PlayerState {
        &self.player
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    // --- Session control ---

    /// Start a fresh session from any status. Everything from the previous
    /// session is discarded; the measured playfield is kept.
    pub fn start_session(&mut self) {
        self.world.clear();
        self.time = SimTime::default();
        self.session = GameSession::new(&self.config, GameStatus::Playing);
        self.player = PlayerState::new(self.playfield);
        self.next_entity_id = 0;
        self.spawn_timers = SpawnTimers::default();
        self.events.clear();
        info!(
            width = self.playfield.width,
            height = self.playfield.height,
            "session started"
        );
    }

    /// Toggle playing <-> paused. No-op in any other status.
    pub fn pause_toggle(&mut self) -> bool {
        let next = match self.session.status {
            GameStatus::Playing => GameStatus::Paused,
            GameStatus::Paused => GameStatus::Playing,
            other => {
                debug!(status = ?other, "pause toggle ignored");
                return false;
            }
        };
        self.session.status = next;
        debug!(status = ?next, "pause toggled");
        true
    }

    /// Request a status transition. Entering `Playing` from the menu or
    /// from game over starts a fresh session; unsupported transitions are
    /// ignored.
    pub fn set_status(&mut self, status: GameStatus) -> bool {
        use GameStatus::*;
        match (self.session.status, status) {
            (Menu | GameOver, Playing) => {
                self.start_session();
                true
            }
            (Playing, Paused) | (Paused, Playing) => self.pause_toggle(),
            (Playing, GameOver) | (Playing | Paused | GameOver, Menu) => {
                self.session.status = status;
                self.player.charge = None;
                info!(status = ?status, "status changed");
                true
            }
            (from, to) => {
                debug!(?from, ?to, "status transition ignored");
                false
            }
        }
    }

    /// Remeasure the playfield. Zero dimensions mean "not measured yet".
    pub fn resize_playfield(&mut self, width: f64, height: f64) -> bool {
        if !width.is_finite() || !height.is_finite() || width < 0.0 || height < 0.0 {
            debug!(width, height, "invalid playfield size ignored");
            return false;
        }
        self.playfield = Size::new(width, height);
        self.player.anchor(self.playfield);
        true
    }

    // --- Player input ---

    /// Move the player to an absolute x, clamped to the playfield.
    pub fn move_player(&mut self, target_x: f64) -> bool {
        if !self.is_playing() || !self.playfield_measured() || !target_x.is_finite() {
            return false;
        }
        self.player.move_to(target_x, self.playfield.width);
        true
    }

    /// Fire with the given modifiers. No-op while the weapon cools down.
    pub fn fire(&mut self, special: bool, charge_level: u32) -> bool {
        if !self.is_playing() {
            return false;
        }
        match weapons::fire(
            &mut self.world,
            &mut self.player,
            &mut self.next_entity_id,
            special,
            charge_level,
        ) {
            Some(event) => {
                self.push_event(event);
                true
            }
            None => false,
        }
    }

    /// Charge button pressed. Ignored if a charge is already held.
    pub fn begin_charge(&mut self) -> bool {
        if !self.is_playing() || self.player.charge.is_some() {
            return false;
        }
        self.player.charge = Some(ChargeState::default());
        true
    }

    /// Charge button released: fire at the held level and clear the charge.
    /// The charge is cleared even when the shot is suppressed by cooldown.
    pub fn end_charge(&mut self) -> bool {
        let Some(charge) = self.player.charge.take() else {
            return false;
        };
        let fired = self.fire(false, charge.level);
        if !fired {
            debug!(level = charge.level, "charged shot cancelled");
        }
        fired
    }

    pub fn set_bullet_type(&mut self, kind: BulletKind) -> bool {
        if self.player.bullet_kind == kind {
            return false;
        }
        self.player.bullet_kind = kind;
        debug!(?kind, "bullet type selected");
        true
    }

    /// Raise the manual shield for 3 s; 10 s cooldown.
    pub fn activate_shield_ability(&mut self) -> bool {
        if !self.is_playing()
            || self.player.shield_ability_cooldown_ms > 0.0
            || self.player.shield_ability_remaining_ms > 0.0
        {
            return false;
        }
        self.player.shield_ability_remaining_ms = SHIELD_ABILITY_DURATION_MS;
        self.player.shield_ability_cooldown_ms = SHIELD_ABILITY_COOLDOWN_MS;
        self.push_event(GameEvent::AbilityActivated {
            ability: Ability::Shield,
        });
        true
    }

    /// Spend special charge on a special shot; 5 s cooldown. Nothing is
    /// spent unless the shot can actually be fired.
    pub fn activate_special_ability(&mut self) -> bool {
        if !self.is_playing()
            || self.player.special_cooldown_ms > 0.0
            || self.player.current_cooldown_ms > 0.0
            || self.session.special_charge < SPECIAL_ABILITY_COST
        {
            return false;
        }
        if !self.fire(true, 0) {
            return false;
        }
        self.session.spend_special_charge(SPECIAL_ABILITY_COST);
        self.player.special_cooldown_ms = SPECIAL_ABILITY_COOLDOWN_MS;
        self.push_event(GameEvent::AbilityActivated {
            ability: Ability::SpecialFire,
        });
        true
    }

    // --- Internals ---

    fn is_playing(&self) -> bool {
        self.session.status == GameStatus::Playing
    }

    fn playfield_measured(&self) -> bool {
        self.playfield.width > 0.0 && self.playfield.height > 0.0
    }

    /// Record an event with the session and keep it for the next snapshot.
    fn push_event(&mut self, event: GameEvent) {
        let mut follow_up = Vec::new();
        self.session.record(&event, &mut follow_up);
        self.events.push(event);
        self.events.extend(follow_up);
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single player command.
    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::StartSession => self.start_session(),
            PlayerCommand::PauseToggle => {
                self.pause_toggle();
            }
            PlayerCommand::SetStatus { status } => {
                self.set_status(status);
            }
            PlayerCommand::MovePlayer { target_x } => {
                self.move_player(target_x);
            }
            PlayerCommand::Fire {
                special,
                charge_level,
            } => {
                self.fire(special, charge_level);
            }
            PlayerCommand::BeginCharge => {
                self.begin_charge();
            }
            PlayerCommand::EndCharge => {
                self.end_charge();
            }
            PlayerCommand::SetBulletType { kind } => {
                self.set_bullet_type(kind);
            }
            PlayerCommand::ActivateShieldAbility => {
                self.activate_shield_ability();
            }
            PlayerCommand::ActivateSpecialAbility => {
                self.activate_special_ability();
            }
            PlayerCommand::ResizePlayfield { width, height } => {
                self.resize_playfield(width, height);
            }
        }
    }

    /// Run all systems in order.
    fn run_systems(&mut self, delta_ms: f64) {
        // 1. Stage clock. An expiring stage consumes the whole frame.
        if let Some(expired) = self.session.advance_stage_timer(delta_ms) {
            self.push_event(GameEvent::TimeExpired { stage: expired });
            self.push_event(GameEvent::StageAdvanced {
                stage: self.session.stage,
            });
            return;
        }
        // 2. Spawning
        systems::spawner::run(
            &mut self.world,
            &mut self.rng,
            &mut self.spawn_timers,
            &mut self.next_entity_id,
            self.session.stage,
            self.playfield,
            delta_ms,
        );
        // 3. Cooldowns, charge, power-up and ability timers
        systems::timers::run(&mut self.player, &mut self.session, delta_ms);
        // 4. Movement integration
        systems::movement::run(&mut self.world, delta_ms);
        // 5. Collision resolution
        let events = systems::collision::run(&mut self.world, &mut self.player, self.playfield);
        for event in events {
            self.push_event(event);
        }
    }

    fn build_snapshot(&self, events: Vec<GameEvent>) -> GameStateSnapshot {
        systems::snapshot::build_snapshot(
            &self.world,
            &self.time,
            self.playfield,
            &self.session,
            &self.player,
            events,
        )
    }

    // --- Test hooks ---

    /// Spawn an enemy at an exact position.
    #[cfg(test)]
    pub fn spawn_test_enemy(
        &mut self,
        kind: turret_core::enums::EnemyKind,
        x: f64,
        y: f64,
    ) -> hecs::Entity {
        crate::world_setup::spawn_enemy(&mut self.world, &mut self.next_entity_id, kind, x, y)
    }

    /// Spawn a power-up at an exact position.
    #[cfg(test)]
    pub fn spawn_test_power_up(
        &mut self,
        kind: turret_core::enums::PowerUpKind,
        x: f64,
        y: f64,
    ) -> hecs::Entity {
        crate::world_setup::spawn_power_up(&mut self.world, &mut self.next_entity_id, kind, x, y)
    }

    #[cfg(test)]
    pub fn player_mut(&mut self) -> &mut PlayerState {
        &mut self.player
    }

    #[cfg(test)]
    pub fn session_mut(&mut self) -> &mut GameSession {
        &mut self.session
    }
}
