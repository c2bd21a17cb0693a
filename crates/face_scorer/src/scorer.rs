//! Facial heuristic scorer.

use contracts::{AnalysisError, CaptureMode, FaceAttributes, PartialScore};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::band::FaceBand;
use crate::rules::RuleSet;
use crate::validate::validate_attributes;

/// Message for a detector result with zero faces
pub const NO_FACE_MESSAGE: &str = "no face detected";

/// Drunk score of a face, 0 (sober) to 100
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaceScore {
    pub score: i32,
    pub message: String,
    pub band: FaceBand,
}

impl FaceScore {
    fn from_score(score: i32) -> Self {
        let band = FaceBand::from_score(score);
        Self {
            score,
            message: band.message().to_string(),
            band,
        }
    }

    /// Sobriety-oriented partial for fusion: `100 - score`
    pub fn partial(&self) -> PartialScore {
        PartialScore::present((100 - self.score) as f32)
    }
}

/// Result of scoring a detector response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FaceOutcome {
    Scored(FaceScore),
    /// Excluded from fusion, never treated as sober
    NoFaceDetected,
}

impl FaceOutcome {
    /// Score, 0 when no face was detected
    pub fn score(&self) -> i32 {
        match self {
            Self::Scored(face) => face.score,
            Self::NoFaceDetected => 0,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Scored(face) => &face.message,
            Self::NoFaceDetected => NO_FACE_MESSAGE,
        }
    }

    /// Fusion partial, absent when no face was detected
    pub fn partial(&self) -> PartialScore {
        match self {
            Self::Scored(face) => face.partial(),
            Self::NoFaceDetected => PartialScore::absent(),
        }
    }

    /// The score, or `NoFaceDetected` as an error
    pub fn into_score(self) -> Result<FaceScore, AnalysisError> {
        match self {
            Self::Scored(face) => Ok(face),
            Self::NoFaceDetected => Err(AnalysisError::NoFaceDetected),
        }
    }
}

impl From<&FaceOutcome> for PartialScore {
    fn from(outcome: &FaceOutcome) -> Self {
        outcome.partial()
    }
}

/// Face scorer
///
/// Rules are fixed per capture mode; the scorer itself is stateless.
#[derive(Debug, Clone, Copy, Default)]
pub struct FaceScorer;

impl FaceScorer {
    pub fn new() -> Self {
        Self
    }

    /// Score one face record
    ///
    /// # Errors
    /// `InvalidAttribute` when any confidence, angle or brightness is out of range.
    #[instrument(level = "debug", name = "face_score", skip(self, attrs))]
    pub fn score(
        &self,
        attrs: &FaceAttributes,
        mode: CaptureMode,
    ) -> Result<FaceScore, AnalysisError> {
        validate_attributes(attrs)?;

        let rules = RuleSet::for_mode(mode);
        let score = rules.score(attrs);
        let face = FaceScore::from_score(score);

        metrics::histogram!("sobriety_face_score", "mode" => mode_label(mode)).record(score as f64);
        debug!(score, band = ?face.band, "face scored");
        Ok(face)
    }

    /// Score every face of a detector response
    ///
    /// Zero faces gives `NoFaceDetected`; several faces are scored one by one
    /// and the rounded mean is re-banded.
    pub fn score_faces(
        &self,
        faces: &[FaceAttributes],
        mode: CaptureMode,
    ) -> Result<FaceOutcome, AnalysisError> {
        if faces.is_empty() {
            debug!("no face detected");
            return Ok(FaceOutcome::NoFaceDetected);
        }

        let scores = faces
            .iter()
            .map(|attrs| self.score(attrs, mode).map(|face| face.score))
            .collect::<Result<Vec<_>, _>>()?;

        let mean = scores.iter().sum::<i32>() as f32 / scores.len() as f32;
        Ok(FaceOutcome::Scored(FaceScore::from_score(mean.round() as i32)))
    }
}

fn mode_label(mode: CaptureMode) -> &'static str {
    match mode {
        CaptureMode::RealTime => "real_time",
        CaptureMode::StillPhoto => "still_photo",
    }
}

/// Score one face with the fixed rules
pub fn score(attrs: &FaceAttributes, mode: CaptureMode) -> Result<FaceScore, AnalysisError> {
    FaceScorer::new().score(attrs, mode)
}

/// Score a detector response
pub fn score_faces(
    faces: &[FaceAttributes],
    mode: CaptureMode,
) -> Result<FaceOutcome, AnalysisError> {
    FaceScorer::new().score_faces(faces, mode)
}
