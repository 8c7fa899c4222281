//! Error types for the simulation crate.
//!
//! Gameplay operations never fail; they guard on preconditions and report
//! whether they did anything. Only configuration loading can go wrong.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    /// Config file could not be read.
    #[error("Failed to read config '{path}': {source}")]
    ConfigRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid JSON for `SimConfig`.
    #[error("Invalid config JSON: {0}")]
    ConfigParse(#[from] serde_json::Error),

    /// A config value is out of range.
    #[error("Invalid config value for {field}: {reason}")]
    InvalidConfig { field: &'static str, reason: String },
}
