//! Score -> message bands, shared by both capture modes.

use serde::{Deserialize, Serialize};

/// Drunk-score band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FaceBand {
    Normal,
    Slightly,
    Moderate,
    Heavy,
    VeryHeavy,
}

impl FaceBand {
    /// Band for a score; `<20`, `<40`, `<60`, `<80`, else
    pub fn from_score(score: i32) -> Self {
        match score {
            s if s < 20 => Self::Normal,
            s if s < 40 => Self::Slightly,
            s if s < 60 => Self::Moderate,
            s if s < 80 => Self::Heavy,
            _ => Self::VeryHeavy,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Slightly => "slightly intoxicated",
            Self::Moderate => "moderately intoxicated",
            Self::Heavy => "heavily intoxicated",
            Self::VeryHeavy => "very heavily intoxicated",
        }
    }
}
