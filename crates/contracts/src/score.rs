//! Scores and fusion output
//!
//! Partial scores are oriented "higher = more sober" for every signal.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Input signal kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalKind {
    Face,
    HeartRate,
    Gyroscope,
}

impl SignalKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Face => "face",
            Self::HeartRate => "heart_rate",
            Self::Gyroscope => "gyroscope",
        }
    }
}

impl fmt::Display for SignalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-signal score in [0, 100], possibly absent
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PartialScore {
    pub value: f32,
    pub present: bool,
}

impl PartialScore {
    /// Present score
    pub fn present(value: f32) -> Self {
        Self {
            value,
            present: true,
        }
    }

    /// Absent score, excluded from fusion
    pub fn absent() -> Self {
        Self {
            value: 0.0,
            present: false,
        }
    }

    /// Value when present
    pub fn get(&self) -> Option<f32> {
        self.present.then_some(self.value)
    }
}

impl Default for PartialScore {
    fn default() -> Self {
        Self::absent()
    }
}

impl From<Option<f32>> for PartialScore {
    fn from(value: Option<f32>) -> Self {
        value.map_or_else(Self::absent, Self::present)
    }
}

/// Fused intoxication level, ordered from sober to heavy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntoxicationLevel {
    Normal,
    Slightly,
    Moderate,
    Heavy,
}

impl IntoxicationLevel {
    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::Slightly => "Slightly intoxicated",
            Self::Moderate => "Moderately intoxicated",
            Self::Heavy => "Heavily intoxicated",
        }
    }
}

impl fmt::Display for IntoxicationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Fusion engine output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FusionResult {
    pub level: IntoxicationLevel,

    /// Weighted composite in [0, 100]
    pub composite_score: f32,

    /// `composite_score / 100`, a weak proxy rather than a calibrated probability
    pub confidence: f32,

    pub summary: String,

    pub recommendations: Vec<String>,

    /// Signals that contributed to the composite
    pub signals_used: Vec<SignalKind>,

    /// Per-signal breakdown
    pub detail: String,
}
