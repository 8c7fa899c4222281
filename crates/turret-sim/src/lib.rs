//! Simulation engine for the turret defense game.
//!
//! Owns the hecs ECS world, runs systems once per frame with the
//! frame's elapsed time, and produces GameStateSnapshots for the shell.

pub mod config;
pub mod engine;
pub mod error;
pub mod player;
pub mod session;
pub mod systems;
pub mod weapons;
pub mod world_setup;

pub use config::SimConfig;
pub use engine::SimulationEngine;
pub use error::SimError;
pub use turret_core as core;
