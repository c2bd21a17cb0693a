//! Simulated collaborators
//!
//! Seeded stand-ins for the face-attribute service, the health-data source and
//! the gyroscope. Only constructed explicitly by the caller; never used as a
//! fallback for a failing real source.

use std::collections::HashMap;
use std::sync::Mutex;

use contracts::{
    AnalysisError, BoolAttribute, Emotion, FaceAttributeProvider, FaceAttributes, HeadPose,
    HeartRateReading, HeartRateSource, ImageQuality, IntoxicationLevel, LandmarkKind,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::clock::now_ms;
use crate::mock::{MockMotionConfig, MockMotionSource, MotionProfile};

/// Gyroscope profile for a simulated level
pub fn motion_profile_for(level: IntoxicationLevel) -> MotionProfile {
    match level {
        IntoxicationLevel::Normal => MotionProfile::Steady,
        IntoxicationLevel::Slightly => MotionProfile::Swaying,
        IntoxicationLevel::Moderate | IntoxicationLevel::Heavy => MotionProfile::Erratic,
    }
}

/// Simulated gyroscope for a level
pub fn simulated_motion_source(level: IntoxicationLevel, seed: u64) -> MockMotionSource {
    MockMotionSource::new(
        "simulated-gyro",
        MockMotionConfig {
            profile: motion_profile_for(level),
            seed,
            ..Default::default()
        },
    )
}

/// Confidence around `base`, kept inside [0, 100]
fn jitter(rng: &mut StdRng, base: f32) -> f32 {
    (base + rng.random_range(-3.0..3.0)).clamp(0.0, 100.0)
}

/// Face-attribute service that fabricates one face per call
pub struct SimulatedFaceProvider {
    target: IntoxicationLevel,
    rng: Mutex<StdRng>,
}

impl SimulatedFaceProvider {
    pub fn new(target: IntoxicationLevel, seed: u64) -> Self {
        Self {
            target,
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    fn generate(&self, rng: &mut StdRng) -> FaceAttributes {
        let (eyes, mouth, emotions, pose, landmarks): (
            BoolAttribute,
            BoolAttribute,
            Vec<(Emotion, f32)>,
            HeadPose,
            Vec<LandmarkKind>,
        ) = match self.target {
            IntoxicationLevel::Normal => (
                BoolAttribute::new(true, jitter(rng, 95.0)),
                BoolAttribute::new(false, jitter(rng, 90.0)),
                vec![(Emotion::Calm, jitter(rng, 85.0))],
                HeadPose {
                    roll: rng.random_range(-4.0..4.0),
                    pitch: rng.random_range(-5.0..5.0),
                    yaw: rng.random_range(-5.0..5.0),
                },
                vec![LandmarkKind::EyeLeft, LandmarkKind::EyeRight],
            ),
            // Head tilt only
            IntoxicationLevel::Slightly => (
                BoolAttribute::new(true, jitter(rng, 90.0)),
                BoolAttribute::new(false, jitter(rng, 85.0)),
                vec![(Emotion::Confused, jitter(rng, 40.0))],
                HeadPose {
                    roll: rng.random_range(16.0..20.0),
                    pitch: rng.random_range(-5.0..5.0),
                    yaw: rng.random_range(-5.0..5.0),
                },
                vec![LandmarkKind::EyeLeft, LandmarkKind::EyeRight],
            ),
            // Droopy eyes and a flushed nose
            IntoxicationLevel::Moderate => (
                BoolAttribute::new(true, jitter(rng, 60.0)),
                BoolAttribute::new(false, jitter(rng, 80.0)),
                vec![(Emotion::Confused, jitter(rng, 40.0))],
                HeadPose {
                    roll: rng.random_range(-8.0..8.0),
                    pitch: rng.random_range(-10.0..10.0),
                    yaw: rng.random_range(-10.0..10.0),
                },
                vec![LandmarkKind::Nose, LandmarkKind::EyeLeft],
            ),
            IntoxicationLevel::Heavy => (
                BoolAttribute::new(false, jitter(rng, 94.0)),
                BoolAttribute::new(true, jitter(rng, 92.0)),
                vec![
                    (Emotion::Confused, jitter(rng, 90.0)),
                    (Emotion::Sad, jitter(rng, 80.0)),
                    (Emotion::Disgusted, jitter(rng, 75.0)),
                ],
                HeadPose {
                    roll: rng.random_range(22.0..30.0),
                    pitch: rng.random_range(22.0..30.0),
                    yaw: rng.random_range(27.0..35.0),
                },
                vec![
                    LandmarkKind::Nose,
                    LandmarkKind::LeftCheek,
                    LandmarkKind::RightCheek,
                ],
            ),
        };

        FaceAttributes {
            eyes_open: Some(eyes),
            mouth_open: Some(mouth),
            emotions: emotions.into_iter().collect::<HashMap<_, _>>(),
            pose: Some(pose),
            quality: Some(ImageQuality {
                brightness: jitter(rng, 60.0),
                sharpness: Some(jitter(rng, 70.0)),
            }),
            landmarks,
        }
    }
}

impl FaceAttributeProvider for SimulatedFaceProvider {
    fn name(&self) -> &str {
        "simulated-face"
    }

    async fn detect(&self, image: &[u8]) -> Result<Vec<FaceAttributes>, AnalysisError> {
        let mut rng = self
            .rng
            .lock()
            .map_err(|_| AnalysisError::collaborator(self.name(), "rng lock poisoned"))?;
        let face = self.generate(&mut rng);
        debug!(target_level = ?self.target, image_bytes = image.len(), "simulated face detected");
        Ok(vec![face])
    }
}

/// Health-data source returning a plausible reading for the target level
pub struct SimulatedHeartRate {
    target: IntoxicationLevel,
    rng: Mutex<StdRng>,
}

impl SimulatedHeartRate {
    pub fn new(target: IntoxicationLevel, seed: u64) -> Self {
        Self {
            target,
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    fn bpm_range(&self) -> std::ops::Range<f32> {
        match self.target {
            IntoxicationLevel::Normal => 64.0..84.0,
            IntoxicationLevel::Slightly => 92.0..104.0,
            IntoxicationLevel::Moderate => 106.0..118.0,
            IntoxicationLevel::Heavy => 120.0..140.0,
        }
    }
}

impl HeartRateSource for SimulatedHeartRate {
    fn name(&self) -> &str {
        "simulated-heart-rate"
    }

    async fn latest(&self) -> Result<Option<HeartRateReading>, AnalysisError> {
        let mut rng = self
            .rng
            .lock()
            .map_err(|_| AnalysisError::collaborator(self.name(), "rng lock poisoned"))?;
        let bpm = rng.random_range(self.bpm_range());
        Ok(Some(HeartRateReading::new(bpm, now_ms())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_simulated_face_is_seeded() {
        let a = SimulatedFaceProvider::new(IntoxicationLevel::Moderate, 42);
        let b = SimulatedFaceProvider::new(IntoxicationLevel::Moderate, 42);

        let faces_a = a.detect(&[]).await.unwrap();
        let faces_b = b.detect(&[]).await.unwrap();
        assert_eq!(faces_a, faces_b);
        assert_eq!(faces_a.len(), 1);
    }

    #[tokio::test]
    async fn test_simulated_heart_rate_in_band() {
        let source = SimulatedHeartRate::new(IntoxicationLevel::Normal, 9);
        for _ in 0..20 {
            let reading = source.latest().await.unwrap().unwrap();
            assert!((60.0..=90.0).contains(&reading.bpm), "got: {}", reading.bpm);
        }
    }

    #[test]
    fn test_motion_profile_mapping() {
        assert_eq!(
            motion_profile_for(IntoxicationLevel::Normal),
            MotionProfile::Steady
        );
        assert_eq!(
            motion_profile_for(IntoxicationLevel::Heavy),
            MotionProfile::Erratic
        );
    }
}
