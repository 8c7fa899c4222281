//! Session data model: score, health, stage clock and ability charge.
//!
//! The session applies the effects of every `GameEvent` the systems emit,
//! so scoring and health rules live in one place.

use tracing::info;

use turret_core::constants::*;
use turret_core::enums::GameStatus;
use turret_core::events::GameEvent;
use turret_core::state::StatsView;

use crate::config::SimConfig;

#[derive(Debug, Clone, PartialEq)]
pub struct GameSession {
    pub status: GameStatus,
    pub score: u32,
    pub health: u32,
    /// Never decreases within a session.
    pub stage: u32,
    /// Enemies destroyed since health was last lost.
    pub combo: u32,
    pub stage_remaining_ms: f64,
    pub stage_duration_ms: f64,
    /// Pool spent by the special-fire ability.
    pub special_charge: f64,
    pub stats: StatsView,
}

impl GameSession {
    /// Fresh session in the given status.
    pub fn new(config: &SimConfig, status: GameStatus) -> Self {
        Self {
            status,
            score: 0,
            health: config.starting_health,
            stage: STARTING_STAGE,
            combo: 0,
            stage_remaining_ms: config.stage_duration_ms,
            stage_duration_ms: config.stage_duration_ms,
            special_charge: SPECIAL_CHARGE_MAX,
            stats: StatsView::default(),
        }
    }

    /// Count the stage clock down. On expiry the stage advances, the clock
    /// restarts and the expired stage number is returned.
    pub fn advance_stage_timer(&mut self, delta_ms: f64) -> Option<u32> {
        self.stage_remaining_ms -= delta_ms;
        if self.stage_remaining_ms > 0.0 {
            return None;
        }
        let expired = self.stage;
        self.stage += 1;
        self.stage_remaining_ms = self.stage_duration_ms;
        info!(stage = self.stage, "stage advanced");
        Some(expired)
    }

    pub fn regen_special(&mut self, delta_ms: f64) {
        self.add_special_charge(SPECIAL_CHARGE_REGEN_PER_SEC * delta_ms / 1000.0);
    }

    /// Spend special charge. Returns false (and spends nothing) if short.
    pub fn spend_special_charge(&mut self, cost: f64) -> bool {
        if self.special_charge < cost {
            return false;
        }
        self.special_charge -= cost;
        true
    }

    fn add_special_charge(&mut self, amount: f64) {
        self.special_charge = (self.special_charge + amount).min(SPECIAL_CHARGE_MAX);
    }

    /// Apply one event's effect. Consequences (health loss, game over) are
    /// pushed onto `follow_up`.
    pub fn record(&mut self, event: &GameEvent, follow_up: &mut Vec<GameEvent>) {
        self.score = self.score.saturating_add(event.points());

        match event {
            GameEvent::EnemyDestroyed { .. } => {
                self.combo += 1;
                self.stats.max_combo = self.stats.max_combo.max(self.combo);
                self.stats.enemies_destroyed += 1;
                self.add_special_charge(SPECIAL_CHARGE_PER_KILL);
            }
            GameEvent::EnemyReachedBottom { .. } => self.lose_health(follow_up),
            GameEvent::PowerUpCollected { .. } => self.stats.power_ups_collected += 1,
            GameEvent::ShotFired { .. } => self.stats.shots_fired += 1,
            _ => {}
        }
    }

    fn lose_health(&mut self, follow_up: &mut Vec<GameEvent>) {
        self.combo = 0;
        if self.health == 0 {
            return;
        }
        self.health -= 1;
        follow_up.push(GameEvent::HealthLost {
            remaining: self.health,
        });
        if self.health == 0 && self.status != GameStatus::GameOver {
            self.status = GameStatus::GameOver;
            info!(score = self.score, stage = self.stage, "game over");
            follow_up.push(GameEvent::GameOver {
                score: self.score,
                stage: self.stage,
            });
        }
    }
}
