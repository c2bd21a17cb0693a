//! # Face Scorer
//!
//! Converts detector face attributes into a 0-100 drunk score.
//!
//! Responsibilities:
//! - Validate externally supplied attributes
//! - Apply the additive rule set of the capture mode
//! - Band the score into a message
//! - Handle zero-face and multi-face detector responses
//!
//! ## Usage Example
//!
//! ```ignore
//! use face_scorer::FaceScorer;
//! use contracts::CaptureMode;
//!
//! let outcome = FaceScorer::new().score_faces(&faces, CaptureMode::StillPhoto)?;
//! let partial = outcome.partial();
//! ```

mod band;
mod rules;
mod scorer;
mod validate;

pub use band::FaceBand;
pub use rules::{EmotionRule, RednessRule, RuleSet, REAL_TIME, STILL_PHOTO};
pub use scorer::{score, score_faces, FaceOutcome, FaceScore, FaceScorer, NO_FACE_MESSAGE};
pub use validate::validate_attributes;
