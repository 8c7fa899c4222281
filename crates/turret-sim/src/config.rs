//! Simulation configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use turret_core::constants::*;
use turret_core::types::Size;

use crate::error::SimError;

/// Configuration for starting a new simulation.
///
/// Missing fields in a JSON config fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed and inputs = same simulation.
    pub seed: u64,
    pub playfield_width: f64,
    pub playfield_height: f64,
    pub starting_health: u32,
    pub stage_duration_ms: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            playfield_width: DEFAULT_PLAYFIELD_WIDTH,
            playfield_height: DEFAULT_PLAYFIELD_HEIGHT,
            starting_health: STARTING_HEALTH,
            stage_duration_ms: STAGE_DURATION_MS,
        }
    }
}

impl SimConfig {
    /// Parse and validate a JSON config.
    pub fn from_json_str(json: &str) -> Result<Self, SimError> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SimError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| SimError::ConfigRead {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    pub fn validate(&self) -> Result<(), SimError> {
        check_dimension("playfield_width", self.playfield_width, PLAYER_WIDTH)?;
        check_dimension(
            "playfield_height",
            self.playfield_height,
            PLAYER_HEIGHT + PLAYER_FLOOR_MARGIN,
        )?;
        if self.starting_health == 0 {
            return Err(SimError::InvalidConfig {
                field: "starting_health",
                reason: "must be at least 1".into(),
            });
        }
        if !self.stage_duration_ms.is_finite() || self.stage_duration_ms <= 0.0 {
            return Err(SimError::InvalidConfig {
                field: "stage_duration_ms",
                reason: format!("must be positive, got {}", self.stage_duration_ms),
            });
        }
        Ok(())
    }

    pub fn playfield(&self) -> Size {
        Size::new(self.playfield_width, self.playfield_height)
    }
}

fn check_dimension(field: &'static str, value: f64, min: f64) -> Result<(), SimError> {
    if !value.is_finite() || value < min {
        return Err(SimError::InvalidConfig {
            field,
            reason: format!("must be at least {min}, got {value}"),
        });
    }
    Ok(())
}
