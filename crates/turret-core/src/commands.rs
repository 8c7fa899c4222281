//! Player commands sent from the presentation shell to the simulation.
//!
//! Commands are queued and processed at the next tick boundary.

use serde::{Deserialize, Serialize};

use crate::enums::*;

/// All possible player actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- Session control ---
    /// Start (or restart) a session with fresh state.
    StartSession,
    /// Toggle between playing and paused.
    PauseToggle,
    /// Request an explicit status transition.
    SetStatus { status: GameStatus },

    // --- Movement ---
    /// Move the player to an absolute horizontal position (clamped).
    MovePlayer { target_x: f64 },

    // --- Weapons ---
    /// Fire immediately with the given modifiers.
    Fire { special: bool, charge_level: u32 },
    /// Charge button pressed.
    BeginCharge,
    /// Charge button released; fires with the accumulated level.
    EndCharge,
    /// Select ammunition.
    SetBulletType { kind: BulletKind },

    // --- Abilities ---
    ActivateShieldAbility,
    ActivateSpecialAbility,

    // --- Layout ---
    /// The shell measured (or re-measured) its playfield.
    ResizePlayfield { width: f64, height: f64 },
}
