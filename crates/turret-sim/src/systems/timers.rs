//! Timer system: weapon cooldown, charge polling, power-up expiry, ability
//! timers and special-charge regeneration.
//!
//! Every countdown here advances only with simulation ticks, so pausing
//! freezes all of them together.

use tracing::debug;

use turret_core::enums::PowerUpKind;

use crate::player::PlayerState;
use crate::session::GameSession;
use crate::weapons;

/// Count every player and session timer down by `delta_ms`.
pub fn run(player: &mut PlayerState, session: &mut GameSession, delta_ms: f64) {
    player.current_cooldown_ms = decay(player.current_cooldown_ms, delta_ms);

    if let Some(charge) = player.charge.as_mut() {
        charge.held_ms += delta_ms;
        charge.level = weapons::charge_level(charge.held_ms);
    }

    for kind in PowerUpKind::TIMED {
        if let Some(timer) = player.power_ups.get_mut(kind) {
            if timer.decay(delta_ms) {
                debug!(?kind, "power-up expired");
            }
        }
    }

    player.shield_ability_remaining_ms = decay(player.shield_ability_remaining_ms, delta_ms);
    player.shield_ability_cooldown_ms = decay(player.shield_ability_cooldown_ms, delta_ms);
    player.special_cooldown_ms = decay(player.special_cooldown_ms, delta_ms);

    session.regen_special(delta_ms);
}

fn decay(remaining_ms: f64, delta_ms: f64) -> f64 {
    (remaining_ms - delta_ms).max(0.0)
}
