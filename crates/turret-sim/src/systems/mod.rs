//! ECS systems that operate on the simulation world each tick.
//!
//! Systems are free functions that take `&mut World` (or `&World` for read-only).
//! They do not own state; world state lives in components, session and
//! player state live in the engine.

pub mod collision;
pub mod movement;
pub mod snapshot;
pub mod spawner;
pub mod timers;
