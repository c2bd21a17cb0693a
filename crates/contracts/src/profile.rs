//! Analysis profile - tunable constants shared across crates
//!
//! Defaults are the fixed design constants; a profile file only exists so
//! deployments can pin or audit them.

use serde::{Deserialize, Serialize};

/// Complete analysis profile
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisProfile {
    pub recorder: RecorderConfig,
    pub gait: GaitConfig,
    pub fusion: FusionWeights,
}

/// Motion recording limits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecorderConfig {
    /// Recording ceiling; the recorder stops itself after this long
    pub max_duration_ms: u64,
    /// Sensor callback -> collector channel capacity
    pub channel_capacity: usize,
    /// Maximum samples kept per session
    pub max_samples: usize,
}

impl Default for RecorderConfig {
    fn default() -> Self {
        Self {
            max_duration_ms: 10_000,
            channel_capacity: 2048,
            max_samples: 4096,
        }
    }
}

/// Gait stability thresholds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GaitConfig {
    /// Minimum session length (ms)
    pub min_duration_ms: u64,
    /// Magnitude (rad/s) above which a sample counts as unstable
    pub magnitude_threshold: f32,
    /// Per-axis delta (rad/s) between consecutive samples that counts as a sudden change
    pub axis_delta_threshold: f32,
    /// Instability ratio above which the verdict is Unstable
    pub unstable_ratio: f32,
    /// Instability ratio above which the verdict is SlightlyUnstable
    pub slight_ratio: f32,
    /// Sudden-change count above which the verdict is Unstable
    pub unstable_changes: usize,
    /// Sudden-change count above which the verdict is SlightlyUnstable
    pub slight_changes: usize,
}

impl Default for GaitConfig {
    fn default() -> Self {
        Self {
            min_duration_ms: 5_000,
            magnitude_threshold: 2.0,
            axis_delta_threshold: 1.5,
            unstable_ratio: 0.30,
            slight_ratio: 0.15,
            unstable_changes: 10,
            slight_changes: 5,
        }
    }
}

/// Base fusion weights, renormalized over present signals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FusionWeights {
    pub face_weight: f32,
    pub heart_weight: f32,
    pub gyro_weight: f32,
}

impl Default for FusionWeights {
    fn default() -> Self {
        Self {
            face_weight: 0.6,
            heart_weight: 0.2,
            gyro_weight: 0.2,
        }
    }
}
