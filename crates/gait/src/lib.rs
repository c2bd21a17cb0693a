//! # Gait
//!
//! Gyroscope gait stability analysis.
//!
//! Responsibilities:
//! - Classify a closed recording session into a `StabilityVerdict`
//! - Map classified verdicts to a stability score and fusion partial
//! - Track the guided walking test and classify each leg
//!
//! ## Usage Example
//!
//! ```ignore
//! use gait::StabilityAnalyzer;
//!
//! let analyzer = StabilityAnalyzer::new(profile.gait.clone());
//! let report = analyzer.analyze_detailed(session);
//! let partial = gait::stability_partial(&report, analyzer.config());
//! ```

mod analyzer;
mod score;

pub use analyzer::{
    analyze, analyze_detailed, classify, motion_stats, MotionStats, StabilityAnalyzer,
    StabilityReport,
};
pub use contracts::{GaitConfig, StabilityVerdict};
pub use score::{stability_partial, stability_score};
pub use walking_test::{PhaseReport, WalkingPhase, WalkingTest};
