//! Gyroscope stability analyzer.

use contracts::{GaitConfig, MotionSample, RecordingSession, StabilityVerdict};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Verdict plus the statistics it was derived from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StabilityReport {
    pub verdict: StabilityVerdict,
    /// Fraction of samples whose magnitude exceeds the threshold
    pub instability_ratio: f32,
    /// Consecutive pairs with any axis delta above the threshold
    pub sudden_changes: usize,
    pub sample_count: usize,
    /// `last sample - session start`, 0 when empty
    pub duration_ms: i64,
}

impl StabilityReport {
    /// Report for a sensor that could not be opened
    pub fn sensor_unavailable() -> Self {
        Self::empty(StabilityVerdict::SensorUnavailable)
    }

    fn empty(verdict: StabilityVerdict) -> Self {
        Self {
            verdict,
            instability_ratio: 0.0,
            sudden_changes: 0,
            sample_count: 0,
            duration_ms: 0,
        }
    }
}

/// Windowed statistics over a run of samples
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionStats {
    pub instability_ratio: f32,
    pub sudden_changes: usize,
}

/// Compute instability ratio and sudden-change count in one pass each
pub fn motion_stats(samples: &[MotionSample], config: &GaitConfig) -> MotionStats {
    if samples.is_empty() {
        return MotionStats {
            instability_ratio: 0.0,
            sudden_changes: 0,
        };
    }

    let unstable = samples
        .iter()
        .filter(|s| s.magnitude() > config.magnitude_threshold)
        .count();

    let sudden_changes = samples
        .windows(2)
        .filter(|pair| is_sudden_change(&pair[0], &pair[1], config.axis_delta_threshold))
        .count();

    MotionStats {
        instability_ratio: unstable as f32 / samples.len() as f32,
        sudden_changes,
    }
}

fn is_sudden_change(prev: &MotionSample, curr: &MotionSample, threshold: f32) -> bool {
    let a = prev.angular_velocity();
    let b = curr.angular_velocity();
    (b.x - a.x).abs() > threshold || (b.y - a.y).abs() > threshold || (b.z - a.z).abs() > threshold
}

/// Map statistics to one of the three classified verdicts
///
/// Either criterion alone is enough to escalate.
pub fn classify(stats: MotionStats, config: &GaitConfig) -> StabilityVerdict {
    if stats.instability_ratio > config.unstable_ratio
        || stats.sudden_changes > config.unstable_changes
    {
        StabilityVerdict::Unstable
    } else if stats.instability_ratio > config.slight_ratio
        || stats.sudden_changes > config.slight_changes
    {
        StabilityVerdict::SlightlyUnstable
    } else {
        StabilityVerdict::Stable
    }
}

/// Stability analyzer
#[derive(Debug, Clone, Default)]
pub struct StabilityAnalyzer {
    config: GaitConfig,
}

impl StabilityAnalyzer {
    pub fn new(config: GaitConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GaitConfig {
        &self.config
    }

    /// Classify a closed session
    pub fn analyze(&self, session: RecordingSession) -> StabilityVerdict {
        self.analyze_detailed(session).verdict
    }

    /// Classify a closed session and keep the intermediate statistics
    ///
    /// The session is consumed; its samples are dropped on return.
    #[instrument(
        level = "debug",
        name = "gait_analyze",
        skip(self, session),
        fields(samples = session.len())
    )]
    pub fn analyze_detailed(&self, session: RecordingSession) -> StabilityReport {
        let samples = session.samples();
        let Some(duration_ms) = session.duration_ms() else {
            debug!("empty recording");
            return StabilityReport::empty(StabilityVerdict::InsufficientData);
        };

        let stats = motion_stats(samples, &self.config);
        let verdict = if duration_ms < self.config.min_duration_ms as i64 {
            debug!(duration_ms, "recording shorter than minimum duration");
            StabilityVerdict::InsufficientData
        } else {
            classify(stats, &self.config)
        };

        metrics::histogram!("sobriety_gait_instability_ratio")
            .record(stats.instability_ratio as f64);
        metrics::histogram!("sobriety_gait_sudden_changes").record(stats.sudden_changes as f64);

        debug!(
            ?verdict,
            instability_ratio = stats.instability_ratio,
            sudden_changes = stats.sudden_changes,
            duration_ms,
            "gait analyzed"
        );

        StabilityReport {
            verdict,
            instability_ratio: stats.instability_ratio,
            sudden_changes: stats.sudden_changes,
            sample_count: samples.len(),
            duration_ms,
        }
    }
}

/// Classify with the default thresholds
pub fn analyze(session: RecordingSession) -> StabilityVerdict {
    StabilityAnalyzer::default().analyze(session)
}

/// Classify with the default thresholds, keeping statistics
pub fn analyze_detailed(session: RecordingSession) -> StabilityReport {
    StabilityAnalyzer::default().analyze_detailed(session)
}
