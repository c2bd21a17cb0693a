//! Public API
//!
//! Pure free functions over their inputs, using the default constants.

use contracts::{
    AnalysisError, CaptureMode, FaceAttributes, FusionResult, PartialScore, RecordingSession,
    StabilityVerdict,
};

/// Classify a closed gyroscope recording
pub fn analyze_gyroscope(session: RecordingSession) -> StabilityVerdict {
    gait::analyze(session)
}

/// Score one face record, returning `(score, message)`
pub fn score_face(
    attrs: &FaceAttributes,
    mode: CaptureMode,
) -> Result<(i32, String), AnalysisError> {
    let face = face_scorer::score(attrs, mode)?;
    Ok((face.score, face.message))
}

/// Fuse optional partial scores (each in [0, 100], higher = more sober)
pub fn fuse(
    face: Option<f32>,
    heart: Option<f32>,
    gyro: Option<f32>,
) -> Result<FusionResult, AnalysisError> {
    crate::engine::fuse(
        PartialScore::from(face),
        PartialScore::from(heart),
        PartialScore::from(gyro),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::{AngularVelocity, BoolAttribute, IntoxicationLevel, MotionSample};

    #[test]
    fn test_analyze_gyroscope_all_zero() {
        let samples = (0..=60)
            .map(|i| MotionSample::new(AngularVelocity::default(), i * 100))
            .collect();
        let session = RecordingSession::closed(0, samples);
        assert_eq!(analyze_gyroscope(session), StabilityVerdict::Stable);
    }

    #[test]
    fn test_score_face_pair() {
        let attrs = FaceAttributes {
            eyes_open: Some(BoolAttribute::new(false, 80.0)),
            mouth_open: Some(BoolAttribute::new(true, 80.0)),
            ..Default::default()
        };
        let (score, message) = score_face(&attrs, CaptureMode::StillPhoto).unwrap();
        assert_eq!(score, 100);
        assert_eq!(message, "very heavily intoxicated");
    }

    #[test]
    fn test_fuse_options() {
        let result = fuse(Some(80.0), Some(100.0), Some(20.0)).unwrap();
        assert_eq!(result.level, IntoxicationLevel::Slightly);
        assert!(matches!(
            fuse(None, None, None),
            Err(AnalysisError::NoSignalsAvailable)
        ));
    }
}
