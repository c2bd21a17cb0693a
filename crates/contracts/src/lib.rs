//! # Contracts
//!
//! Shared data model for the intoxication estimator: motion samples and
//! recording sessions, face attributes, partial scores and fusion results,
//! the error taxonomy and the collaborator traits.
//! All business crates depend on this crate, never the other way around.
//!
//! ## Time Model
//! - Timestamps are Unix milliseconds (`i64`) taken from the device clock
//! - Recording duration is `last sample - session start`

mod collaborators;
mod error;
mod face;
mod heart;
mod motion;
mod profile;
mod score;
mod sensor_source;

pub use collaborators::{
    FaceAttributeProvider, HeartRateSource, LocalFaceAttributeProvider, LocalHeartRateSource,
};
pub use error::*;
pub use face::*;
pub use heart::*;
pub use motion::*;
pub use profile::*;
pub use score::*;
pub use sensor_source::{MotionEventCallback, MotionSource};
