//! Per-model scheduling configuration.
//!
//! Stored as a JSON blob in the model table and parsed on first use.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One ladder of learning steps plus its graduation intervals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepsConfig {
    /// Minutes between successive learning steps.
    pub delays: Vec<f64>,
    /// Day intervals for the graduation paths: normal graduation,
    /// first-time removal bonus, and ordinary removal.
    pub ints: [u32; 3],
}

/// Scheduling configuration for one model: the ladder used for new cards
/// and the ladder used after a lapse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    pub new: StepsConfig,
    pub lapse: StepsConfig,
}

impl ModelConfig {
    /// Parse the JSON blob stored with the model.
    pub fn parse(json: &str) -> Result<ModelConfig, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize back to the stored representation.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).expect("model config serializes")
    }
}

impl Default for ModelConfig {
    fn default() -> ModelConfig {
        ModelConfig {
            new: StepsConfig {
                delays: vec![1.0, 10.0],
                ints: [1, 4, 7],
            },
            lapse: StepsConfig {
                delays: vec![10.0],
                ints: [1, 1, 1],
            },
        }
    }
}

/// The stored config blob could not be decoded.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("malformed model config: {0}")]
    Malformed(#[from] serde_json::Error),
}
