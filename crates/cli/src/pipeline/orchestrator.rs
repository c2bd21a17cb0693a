//! Pipeline orchestrator - face, heart rate and gait into one fused result.

use std::sync::Arc;
use std::time::Duration;

use contracts::{
    AnalysisError, AnalysisProfile, CaptureMode, FaceAttributeProvider, HeartRateSource,
    MotionSource, PartialScore, RecordingSession,
};
use face_scorer::{FaceOutcome, FaceScorer};
use fusion::FusionEngine;
use gait::{stability_partial, StabilityAnalyzer, StabilityReport};
use ingestion::{IngestionError, MotionRecorder};
use tracing::{info, instrument, warn};

use super::AnalysisReport;

/// Where the gyroscope session comes from
pub enum MotionInput {
    /// Gait test not taken
    Skip,
    /// Sensor missing or permission denied
    Unavailable,
    /// Already recorded session
    Session(RecordingSession),
    /// Record live from a source
    Record {
        source: Arc<dyn MotionSource>,
        duration: Duration,
    },
}

impl std::fmt::Debug for MotionInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Skip => write!(f, "Skip"),
            Self::Unavailable => write!(f, "Unavailable"),
            Self::Session(session) => write!(f, "Session({} samples)", session.len()),
            Self::Record { source, duration } => f
                .debug_struct("Record")
                .field("source", &source.source_id())
                .field("duration", duration)
                .finish(),
        }
    }
}

/// Pipeline configuration
#[derive(Debug, Clone, Default)]
pub struct PipelineConfig {
    pub profile: AnalysisProfile,
    pub mode: CaptureMode,
}

/// Runs one analysis against its collaborators
pub struct Pipeline<F, H> {
    config: PipelineConfig,
    faces: F,
    heart: H,
    scorer: FaceScorer,
    analyzer: StabilityAnalyzer,
    engine: FusionEngine,
    recorder: MotionRecorder,
}

impl<F, H> Pipeline<F, H>
where
    F: FaceAttributeProvider,
    H: HeartRateSource,
{
    pub fn new(config: PipelineConfig, faces: F, heart: H) -> Self {
        let profile = &config.profile;
        Self {
            scorer: FaceScorer::new(),
            analyzer: StabilityAnalyzer::new(profile.gait.clone()),
            engine: FusionEngine::new(profile.fusion.clone()),
            recorder: MotionRecorder::new(profile.recorder.clone()),
            config,
            faces,
            heart,
        }
    }

    /// Run one analysis
    ///
    /// # Errors
    /// - `InvalidAttribute` / `InvalidScore` for malformed collaborator data
    /// - `Collaborator` when the recorder fails; a face or heart-rate outage
    ///   only drops that signal
    /// - `NoSignalsAvailable` when no signal survived
    #[instrument(
        name = "pipeline_run",
        skip(self, image, motion),
        fields(mode = ?self.config.mode, face = self.faces.name(), heart = self.heart.name())
    )]
    pub async fn run(
        &self,
        image: &[u8],
        motion: MotionInput,
    ) -> Result<AnalysisReport, AnalysisError> {
        let mut notes = Vec::new();

        let face = match degrade(self.faces.detect(image).await, &mut notes)? {
            Some(detected) => {
                let face = self.scorer.score_faces(&detected, self.config.mode)?;
                let scored = matches!(face, FaceOutcome::Scored(_)).then(|| face.score());
                observability::record_face_score(self.config.mode, scored);
                Some(face)
            }
            None => None,
        };
        let face_partial = face
            .as_ref()
            .map_or_else(PartialScore::absent, FaceOutcome::partial);

        let heart_rate = degrade(self.heart.latest().await, &mut notes)?.flatten();
        let heart_partial = fusion::heart_partial(heart_rate.as_ref())?;

        let stability = self.stability(motion).await?;
        let gyro_partial = match &stability {
            Some(report) => {
                observability::record_verdict(report.verdict);
                stability_partial(report, &self.config.profile.gait)
            }
            None => PartialScore::absent(),
        };

        let fused = self.engine.fuse(face_partial, heart_partial, gyro_partial);
        let result = match fused {
            Ok(result) => {
                observability::record_fusion(&result);
                result
            }
            Err(e) => {
                observability::record_fusion_failure();
                return Err(e);
            }
        };

        info!(
            level = %result.level,
            composite = result.composite_score,
            signals = result.signals_used.len(),
            "analysis completed"
        );

        Ok(AnalysisReport {
            face,
            heart_rate,
            stability,
            result,
            notes,
        })
    }

    async fn stability(
        &self,
        motion: MotionInput,
    ) -> Result<Option<StabilityReport>, AnalysisError> {
        let session = match motion {
            MotionInput::Skip => return Ok(None),
            MotionInput::Unavailable => return Ok(Some(StabilityReport::sensor_unavailable())),
            MotionInput::Session(session) => session,
            MotionInput::Record { source, duration } => {
                match self.recorder.record_for(source, duration).await {
                    Ok(session) => session,
                    Err(IngestionError::SensorUnavailable { source_id }) => {
                        warn!(%source_id, "gyroscope unavailable, gait signal excluded");
                        return Ok(Some(StabilityReport::sensor_unavailable()));
                    }
                    Err(e) => {
                        return Err(AnalysisError::collaborator("motion-recorder", e.to_string()))
                    }
                }
            }
        };

        Ok(Some(self.analyzer.analyze_detailed(session)))
    }

    pub fn recorder(&self) -> &MotionRecorder {
        &self.recorder
    }
}

/// Turn a recoverable collaborator failure into an absent signal
fn degrade<T>(
    outcome: Result<T, AnalysisError>,
    notes: &mut Vec<String>,
) -> Result<Option<T>, AnalysisError> {
    match outcome {
        Ok(value) => Ok(Some(value)),
        Err(e) if e.is_recoverable() => {
            warn!(error = %e, "collaborator failed, signal excluded");
            notes.push(e.to_string());
            Ok(None)
        }
        Err(e) => Err(e),
    }
}
