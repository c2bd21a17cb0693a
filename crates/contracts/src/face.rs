//! FaceAttributes - face-attribute service output, Face Scorer input
//!
//! Only the attribute payload is modelled; bounding boxes belong to presentation.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use validator::Validate;

/// Boolean attribute with detector confidence (0-100)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
pub struct BoolAttribute {
    pub value: bool,

    #[validate(range(min = 0.0, max = 100.0))]
    pub confidence: f32,
}

impl BoolAttribute {
    pub fn new(value: bool, confidence: f32) -> Self {
        Self { value, confidence }
    }
}

/// Detected emotion type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Emotion {
    Happy,
    Sad,
    Angry,
    Confused,
    Disgusted,
    Surprised,
    Calm,
    Fear,
    #[serde(other)]
    Unknown,
}

/// Head pose (degrees)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct HeadPose {
    #[validate(range(min = -180.0, max = 180.0))]
    pub roll: f32,

    #[validate(range(min = -180.0, max = 180.0))]
    pub pitch: f32,

    #[validate(range(min = -180.0, max = 180.0))]
    pub yaw: f32,
}

/// Image quality block
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct ImageQuality {
    /// Brightness (0-100)
    #[validate(range(min = 0.0, max = 100.0))]
    pub brightness: f32,

    /// Sharpness (0-100)
    #[serde(default)]
    #[validate(range(min = 0.0, max = 100.0))]
    pub sharpness: Option<f32>,
}

/// Facial landmark type reported by the detector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LandmarkKind {
    Nose,
    LeftCheek,
    RightCheek,
    EyeLeft,
    EyeRight,
    MouthLeft,
    MouthRight,
    #[serde(other)]
    Other,
}

impl LandmarkKind {
    /// Regions used by the facial-redness proxy
    pub fn is_redness_region(&self) -> bool {
        matches!(self, Self::Nose | Self::LeftCheek | Self::RightCheek)
    }
}

/// Attributes of one detected face
///
/// Every block is optional because detectors omit blocks they could not
/// estimate. Emotion keys are unique by construction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct FaceAttributes {
    #[serde(default)]
    #[validate(nested)]
    pub eyes_open: Option<BoolAttribute>,

    #[serde(default)]
    #[validate(nested)]
    pub mouth_open: Option<BoolAttribute>,

    /// Emotion -> confidence (0-100)
    #[serde(default)]
    pub emotions: HashMap<Emotion, f32>,

    #[serde(default)]
    #[validate(nested)]
    pub pose: Option<HeadPose>,

    #[serde(default)]
    #[validate(nested)]
    pub quality: Option<ImageQuality>,

    #[serde(default)]
    pub landmarks: Vec<LandmarkKind>,
}

impl FaceAttributes {
    /// Confidence for an emotion, 0 when not reported
    pub fn emotion(&self, emotion: Emotion) -> f32 {
        self.emotions.get(&emotion).copied().unwrap_or(0.0)
    }
}

/// Capture mode of the face image
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaptureMode {
    /// Continuous live feed, dampened sensitivity
    #[default]
    RealTime,
    /// Single deliberate photo, amplified sensitivity
    StillPhoto,
}
