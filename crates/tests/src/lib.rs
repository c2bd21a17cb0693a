//! # Integration Tests
//!
//! Cross-crate properties and end-to-end tests.
//!
//! Covers:
//! - Gait analyzer properties and the unstable-walk scenario
//! - Face scorer range and capture-mode ordering (seeded sweeps)
//! - Fusion renormalization, failure and idempotence
//! - Recorder -> analyzer -> fusion with mock and simulated collaborators

#[cfg(test)]
mod gait_tests {
    use contracts::{AngularVelocity, MotionSample, RecordingSession, StabilityVerdict};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn session(started_at_ms: i64, samples: Vec<(f32, f32, f32, i64)>) -> RecordingSession {
        let samples = samples
            .into_iter()
            .map(|(x, y, z, ts)| MotionSample::new(AngularVelocity::new(x, y, z), ts))
            .collect();
        RecordingSession::closed(started_at_ms, samples)
    }

    #[test]
    fn test_short_recordings_are_insufficient() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..200 {
            let started = rng.random_range(0..1_000_000i64);
            let duration = rng.random_range(0..5000i64);
            let count = rng.random_range(1..200i64);
            let samples = (0..count)
                .map(|i| {
                    (
                        rng.random_range(-6.0..6.0),
                        rng.random_range(-6.0..6.0),
                        rng.random_range(-6.0..6.0),
                        started + duration * (i + 1) / count,
                    )
                })
                .collect();

            assert_eq!(
                gait::analyze(session(started, samples)),
                StabilityVerdict::InsufficientData
            );
        }
    }

    #[test]
    fn test_all_zero_samples_are_stable() {
        let samples = (1..=250).map(|i| (0.0, 0.0, 0.0, i * 24)).collect();
        assert_eq!(gait::analyze(session(0, samples)), StabilityVerdict::Stable);
    }

    #[test]
    fn test_replayed_zero_session_ignores_stored_magnitude() {
        let sample = |ts: i64| {
            format!(
                r#"{{ "angular_velocity": {{ "x": 0.0, "y": 0.0, "z": 0.0 }},
                     "magnitude": 9.0, "timestamp_ms": {ts} }}"#
            )
        };
        let json = format!(
            r#"{{ "samples": [{}, {}], "started_at_ms": 0, "is_active": false }}"#,
            sample(3000),
            sample(6000)
        );

        let replayed: RecordingSession = serde_json::from_str(&json).unwrap();
        assert!(replayed.samples().iter().all(|s| s.magnitude() == 0.0));
        assert_eq!(gait::analyze(replayed), StabilityVerdict::Stable);
    }

    #[test]
    fn test_severity_monotonic_in_ratio() {
        // 1.0 and 2.1 rad/s differ by 1.1 on one axis: no sudden changes at any mix
        let mut previous = 0;
        for high in 0..=100usize {
            let samples = (0..100)
                .map(|i| {
                    let x = if i < high { 2.1 } else { 1.0 };
                    (x, 0.0, 0.0, (i as i64 + 1) * 60)
                })
                .collect();
            let report = gait::analyze_detailed(session(0, samples));
            assert_eq!(report.sudden_changes, 0);

            let severity = report.verdict.severity().unwrap();
            assert!(
                severity >= previous,
                "severity dropped at {high} unstable samples"
            );
            previous = severity;
        }
        assert_eq!(previous, StabilityVerdict::Unstable.severity().unwrap());
    }

    #[test]
    fn test_unstable_walk_scenario() {
        // 65 steady samples with three sign flips, then 35 above threshold
        let samples = (0..100usize)
            .map(|i| {
                let x = match i {
                    0..=10 => -1.0,
                    11..=20 => 1.0,
                    21..=30 => -1.0,
                    31..=64 => 1.0,
                    _ => 2.1,
                };
                (x, 0.0, 0.0, (i as i64 + 1) * 60)
            })
            .collect();

        let report = gait::analyze_detailed(session(0, samples));
        assert_eq!(report.duration_ms, 6000);
        assert_eq!(report.sample_count, 100);
        assert_eq!(report.sudden_changes, 3);
        assert!((report.instability_ratio - 0.35).abs() < 1e-6);
        assert_eq!(report.verdict, StabilityVerdict::Unstable);
    }
}

#[cfg(test)]
mod face_tests {
    use contracts::{
        BoolAttribute, CaptureMode, Emotion, FaceAttributes, HeadPose, ImageQuality, LandmarkKind,
    };
    use face_scorer::{FaceBand, FaceScorer};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    const EMOTIONS: [Emotion; 8] = [
        Emotion::Happy,
        Emotion::Sad,
        Emotion::Angry,
        Emotion::Confused,
        Emotion::Disgusted,
        Emotion::Surprised,
        Emotion::Calm,
        Emotion::Fear,
    ];

    const LANDMARKS: [LandmarkKind; 7] = [
        LandmarkKind::Nose,
        LandmarkKind::LeftCheek,
        LandmarkKind::RightCheek,
        LandmarkKind::EyeLeft,
        LandmarkKind::EyeRight,
        LandmarkKind::MouthLeft,
        LandmarkKind::MouthRight,
    ];

    fn random_attribute(rng: &mut StdRng) -> Option<BoolAttribute> {
        rng.random_bool(0.9)
            .then(|| BoolAttribute::new(rng.random_bool(0.5), rng.random_range(0.0..=100.0)))
    }

    fn random_face(rng: &mut StdRng) -> FaceAttributes {
        let mut attrs = FaceAttributes {
            eyes_open: random_attribute(rng),
            mouth_open: random_attribute(rng),
            pose: rng.random_bool(0.9).then(|| HeadPose {
                roll: rng.random_range(-180.0..=180.0),
                pitch: rng.random_range(-180.0..=180.0),
                yaw: rng.random_range(-180.0..=180.0),
            }),
            quality: rng.random_bool(0.8).then(|| ImageQuality {
                brightness: rng.random_range(0.0..=100.0),
                sharpness: None,
            }),
            ..Default::default()
        };
        for emotion in EMOTIONS {
            if rng.random_bool(0.6) {
                attrs.emotions.insert(emotion, rng.random_range(0.0..=100.0));
            }
        }
        for landmark in LANDMARKS {
            if rng.random_bool(0.5) {
                attrs.landmarks.push(landmark);
            }
        }
        attrs
    }

    #[test]
    fn test_scores_stay_in_range() {
        let scorer = FaceScorer::new();
        let mut rng = StdRng::seed_from_u64(2024);
        for _ in 0..2000 {
            let attrs = random_face(&mut rng);
            for mode in [CaptureMode::RealTime, CaptureMode::StillPhoto] {
                let face = scorer.score(&attrs, mode).unwrap();
                assert!((0..=100).contains(&face.score), "score {}", face.score);
            }
        }
    }

    #[test]
    fn test_real_time_never_exceeds_still_photo() {
        let scorer = FaceScorer::new();
        let mut rng = StdRng::seed_from_u64(77);
        for _ in 0..2000 {
            let attrs = random_face(&mut rng);
            let real_time = scorer.score(&attrs, CaptureMode::RealTime).unwrap();
            let still = scorer.score(&attrs, CaptureMode::StillPhoto).unwrap();
            assert!(
                real_time.score <= still.score,
                "real-time {} > still {} for {attrs:?}",
                real_time.score,
                still.score
            );
        }
    }

    #[test]
    fn test_drowsy_still_photo_scenario() {
        let attrs = FaceAttributes {
            eyes_open: Some(BoolAttribute::new(false, 80.0)),
            mouth_open: Some(BoolAttribute::new(true, 80.0)),
            pose: Some(HeadPose::default()),
            ..Default::default()
        };

        let face = face_scorer::score(&attrs, CaptureMode::StillPhoto).unwrap();
        assert_eq!(face.score, 100);
        assert_eq!(face.band, FaceBand::VeryHeavy);
        assert_eq!(face.message, "very heavily intoxicated");
    }
}

#[cfg(test)]
mod fusion_tests {
    use contracts::{AnalysisError, IntoxicationLevel, PartialScore};
    use fusion::{level_for, FusionEngine};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn test_single_signal_keeps_its_own_band() {
        let engine = FusionEngine::default();
        for step in 0..=200 {
            let value = step as f32 * 0.5;
            let present = PartialScore::present(value);
            let absent = PartialScore::absent();

            for (face, heart, gyro) in [
                (present, absent, absent),
                (absent, present, absent),
                (absent, absent, present),
            ] {
                let result = engine.fuse(face, heart, gyro).unwrap();
                assert_eq!(result.composite_score, value);
                assert_eq!(result.level, level_for(value));
                assert_eq!(result.signals_used.len(), 1);
            }
        }
    }

    #[test]
    fn test_zero_signals_fail() {
        let err = fusion::fuse(
            PartialScore::absent(),
            PartialScore::absent(),
            PartialScore::absent(),
        )
        .unwrap_err();
        assert!(matches!(err, AnalysisError::NoSignalsAvailable));
    }

    #[test]
    fn test_fuse_is_idempotent() {
        let engine = FusionEngine::default();
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..500 {
            let mut partial = || {
                if rng.random_bool(0.8) {
                    PartialScore::present(rng.random_range(0.0..=100.0))
                } else {
                    PartialScore::absent()
                }
            };
            let (face, heart, gyro) = (partial(), partial(), partial());

            let first = engine.fuse(face, heart, gyro);
            let second = engine.fuse(face, heart, gyro);
            match (first, second) {
                (Ok(a), Ok(b)) => {
                    assert_eq!(a.composite_score.to_bits(), b.composite_score.to_bits());
                    assert_eq!(a, b);
                }
                (Err(a), Err(b)) => assert_eq!(a.to_string(), b.to_string()),
                _ => panic!("fuse gave different outcomes for identical inputs"),
            }
        }
    }

    #[test]
    fn test_weighted_scenario() {
        let result = fusion::fuse(
            PartialScore::present(80.0),
            PartialScore::present(100.0),
            PartialScore::present(20.0),
        )
        .unwrap();
        assert!((result.composite_score - 72.0).abs() < 1e-4);
        assert_eq!(result.level, IntoxicationLevel::Slightly);
    }
}

#[cfg(test)]
mod config_tests {
    use config_loader::{ConfigFormat, ConfigLoader};
    use contracts::PartialScore;
    use fusion::FusionEngine;

    #[test]
    fn test_profile_drives_components() {
        let profile = ConfigLoader::load_from_str(
            r#"
            [fusion]
            face_weight = 1.0
            heart_weight = 0.0
            gyro_weight = 1.0
            "#,
            ConfigFormat::Toml,
        )
        .unwrap();

        let engine = FusionEngine::new(profile.fusion.clone());
        let result = engine
            .fuse(
                PartialScore::present(40.0),
                PartialScore::present(0.0),
                PartialScore::present(80.0),
            )
            .unwrap();
        // Zero-weight heart rate is ignored
        assert!((result.composite_score - 60.0).abs() < 1e-4);
        assert_eq!(result.signals_used.len(), 2);

        let json = ConfigLoader::to_json(&profile).unwrap();
        let round_trip = ConfigLoader::load_from_str(&json, ConfigFormat::Json).unwrap();
        assert_eq!(round_trip, profile);
    }
}

#[cfg(test)]
mod e2e_tests {
    use std::sync::Arc;
    use std::time::Duration;

    use contracts::{
        CaptureMode, FaceAttributeProvider, HeartRateSource, IntoxicationLevel, PartialScore,
        RecorderConfig, StabilityVerdict,
    };
    use face_scorer::FaceScorer;
    use fusion::FusionEngine;
    use gait::StabilityAnalyzer;
    use ingestion::simulated::{SimulatedFaceProvider, SimulatedHeartRate};
    use ingestion::{IngestionError, MockMotionSource, MotionProfile, MotionRecorder};
    use observability::AnalysisAggregator;

    /// End-to-end: mock gyroscope -> recorder -> analyzer -> fusion
    #[tokio::test]
    async fn test_e2e_steady_walk() {
        let recorder = MotionRecorder::new(RecorderConfig::default());
        let source = Arc::new(MockMotionSource::with_profile(
            "gyro",
            MotionProfile::Steady,
            3,
        ));

        let session = recorder
            .record_for(source, Duration::from_millis(5400))
            .await
            .unwrap();
        assert!(!session.is_active());
        assert!(session.len() > 200, "got {} samples", session.len());

        let analyzer = StabilityAnalyzer::default();
        let report = analyzer.analyze_detailed(session);
        assert_eq!(report.verdict, StabilityVerdict::Stable);

        let gyro = gait::stability_partial(&report, analyzer.config());
        let reading = contracts::HeartRateReading::new(72.0, 0);
        let heart = fusion::heart_partial(Some(&reading)).unwrap();
        let result = FusionEngine::default()
            .fuse(PartialScore::absent(), heart, gyro)
            .unwrap();
        assert_eq!(result.level, IntoxicationLevel::Normal);

        let metrics = recorder.metrics().snapshot();
        assert_eq!(metrics.sessions_completed, 1);
        assert!(metrics.events_received >= metrics.samples_recorded);
    }

    #[tokio::test]
    async fn test_unavailable_sensor_opens_no_session() {
        let recorder = MotionRecorder::new(RecorderConfig::default());
        let source = Arc::new(MockMotionSource::unavailable("gyro"));

        let err = recorder
            .record_for(source, Duration::from_millis(10))
            .await
            .unwrap_err();
        assert!(matches!(err, IngestionError::SensorUnavailable { .. }));
        assert!(!recorder.is_recording());
        assert_eq!(recorder.metrics().snapshot().sessions_completed, 0);
    }

    /// Simulated face and heart rate land on the targeted level without gait
    #[tokio::test]
    async fn test_simulated_collaborators_hit_extremes() {
        let scorer = FaceScorer::new();
        let engine = FusionEngine::default();
        let mut aggregator = AnalysisAggregator::new();

        for seed in 0..10 {
            for target in [IntoxicationLevel::Normal, IntoxicationLevel::Heavy] {
                let faces = SimulatedFaceProvider::new(target, seed)
                    .detect(&[])
                    .await
                    .unwrap();
                let face = scorer.score_faces(&faces, CaptureMode::StillPhoto).unwrap();
                let reading = SimulatedHeartRate::new(target, seed).latest().await.unwrap();
                let heart = fusion::heart_partial(reading.as_ref()).unwrap();

                let result = engine
                    .fuse(face.partial(), heart, PartialScore::absent())
                    .unwrap();
                assert_eq!(result.level, target, "seed {seed}");
                aggregator.update(Some(&result), StabilityVerdict::SensorUnavailable);
            }
        }

        let summary = aggregator.summary();
        assert_eq!(summary.total_runs, 20);
        assert_eq!(summary.failed_runs, 0);
        assert_eq!(
            summary.levels,
            vec![
                (IntoxicationLevel::Normal, 10),
                (IntoxicationLevel::Heavy, 10)
            ]
        );
    }
}
