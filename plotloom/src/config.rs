// Tunable weights and the engine configuration file.
//
// Every constant the scorers use lives in `ScoringWeights`; its `Default` is
// the calibrated set the editor ships with. `EngineConfig` bundles the
// weights with the annealing schedule and is loaded from JSON. Missing keys
// fall back to defaults, so a config file only needs to name what it changes.

use crate::sa::AnnealConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Weights and thresholds for all scoring layers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    // Connection (A -> B)
    pub lexical: f64,
    pub topic: f64,
    pub length: f64,
    /// Tokens compared at the tail of A and the head of B.
    pub topic_window: usize,

    // Intent alignment
    pub genre: f64,
    pub theme: f64,
    pub values: f64,
    /// Subtracted once per constraint found in the unit text.
    pub constraint_penalty: f64,

    // Story composite
    pub story_alignment: f64,
    pub story_connection: f64,

    // Display bands
    pub low_band: f64,
    pub high_band: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        ScoringWeights {
            lexical: 0.4,
            topic: 0.4,
            length: 0.2,
            topic_window: 10,

            genre: 0.25,
            theme: 0.35,
            values: 0.40,
            constraint_penalty: 0.2,

            story_alignment: 0.6,
            story_connection: 0.4,

            low_band: 0.3,
            high_band: 0.6,
        }
    }
}

/// Everything the CLI needs to score and reorder a document.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub weights: ScoringWeights,
    pub anneal: AnnealConfig,
}

impl EngineConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn load(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let data = std::fs::read_to_string(path)?;
        Ok(Self::from_json(&data)?)
    }
}
