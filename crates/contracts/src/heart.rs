//! Heart-rate reading supplied by the health-data source

use serde::{Deserialize, Serialize};

/// Single heart-rate reading
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeartRateReading {
    /// Beats per minute
    pub bpm: f32,

    /// Reading timestamp (Unix milliseconds)
    #[serde(default)]
    pub timestamp_ms: i64,

    /// Normalized beat-to-beat variability (0-1), when the source provides it
    #[serde(default)]
    pub variability: Option<f32>,
}

impl HeartRateReading {
    pub fn new(bpm: f32, timestamp_ms: i64) -> Self {
        Self {
            bpm,
            timestamp_ms,
            variability: None,
        }
    }

    pub fn with_variability(mut self, variability: f32) -> Self {
        self.variability = Some(variability);
        self
    }
}
