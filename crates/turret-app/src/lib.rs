//! Terminal shell for the turret defense game.
//!
//! This crate drives the simulation engine from a game loop thread,
//! maps keys to player commands, renders snapshots with crossterm, and
//! offers a headless autopilot mode.

pub mod game_loop;
pub mod headless;
pub mod input;
pub mod render;
pub mod state;
pub mod terminal;

pub use turret_core as core;
