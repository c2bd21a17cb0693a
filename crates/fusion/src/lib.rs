//! # Fusion
//!
//! Combines face, heart-rate and gyroscope partial scores into one
//! intoxication level.
//!
//! Responsibilities:
//! - Heart-rate banding and resting-baseline helpers
//! - Weighted fusion with renormalization over present signals
//! - Level banding, confidence proxy and recommendations
//! - Public API facade (`api`)
//!
//! `confidence` is `composite_score / 100`. It is a weak proxy that reuses
//! the composite, not a calibrated probability.
//!
//! ## Usage Example
//!
//! ```ignore
//! use fusion::{FusionEngine, heart_partial};
//!
//! let engine = FusionEngine::new(profile.fusion.clone());
//! let result = engine.fuse(face.partial(), heart_partial(reading.as_ref())?, gyro)?;
//! println!("{}: {:?}", result.level, result.recommendations);
//! ```

pub mod api;
mod engine;
mod heart;
mod recommendations;

pub use contracts::{FusionResult, FusionWeights, IntoxicationLevel, PartialScore, SignalKind};
pub use engine::{fuse, level_for, FusionEngine};
pub use heart::{
    classify_baseline_deviation, heart_partial, heart_rate_score, normal_range_for_age,
    resting_baseline, HeartRateDeviation,
};
pub use recommendations::recommendations;
