//! Analysis metrics
//!
//! `metrics` facade helpers plus an in-memory aggregator for batch runs.

use std::collections::HashMap;

use contracts::{CaptureMode, FusionResult, IntoxicationLevel, StabilityVerdict};
use metrics::{counter, gauge, histogram};

fn verdict_label(verdict: StabilityVerdict) -> &'static str {
    match verdict {
        StabilityVerdict::Stable => "stable",
        StabilityVerdict::SlightlyUnstable => "slightly_unstable",
        StabilityVerdict::Unstable => "unstable",
        StabilityVerdict::InsufficientData => "insufficient_data",
        StabilityVerdict::SensorUnavailable => "sensor_unavailable",
    }
}

fn level_label(level: IntoxicationLevel) -> &'static str {
    match level {
        IntoxicationLevel::Normal => "normal",
        IntoxicationLevel::Slightly => "slightly",
        IntoxicationLevel::Moderate => "moderate",
        IntoxicationLevel::Heavy => "heavy",
    }
}

/// Record a gait verdict
pub fn record_verdict(verdict: StabilityVerdict) {
    counter!("sobriety_gait_verdicts_total", "verdict" => verdict_label(verdict)).increment(1);
}

/// Record a face score; `None` when no face was detected
pub fn record_face_score(mode: CaptureMode, score: Option<i32>) {
    let mode = match mode {
        CaptureMode::RealTime => "real_time",
        CaptureMode::StillPhoto => "still_photo",
    };
    match score {
        Some(score) => {
            counter!("sobriety_faces_scored_total", "mode" => mode).increment(1);
            gauge!("sobriety_last_face_score", "mode" => mode).set(score as f64);
        }
        None => counter!("sobriety_no_face_total", "mode" => mode).increment(1),
    }
}

/// Record a fusion result
pub fn record_fusion(result: &FusionResult) {
    counter!("sobriety_fusions_total", "level" => level_label(result.level)).increment(1);
    histogram!("sobriety_fusion_composite").record(result.composite_score as f64);
    gauge!("sobriety_fusion_signals_used").set(result.signals_used.len() as f64);
}

/// Record a fusion that failed for lack of signals
pub fn record_fusion_failure() {
    counter!("sobriety_fusion_failures_total").increment(1);
}

/// Aggregates results over repeated analyses
#[derive(Debug, Clone, Default)]
pub struct AnalysisAggregator {
    pub total_runs: u64,
    pub failed_runs: u64,
    pub composite_stats: RunningStats,
    pub level_counts: HashMap<IntoxicationLevel, u64>,
    pub verdict_counts: HashMap<StabilityVerdict, u64>,
}

impl AnalysisAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one analysis; `result` is `None` when fusion failed
    pub fn update(&mut self, result: Option<&FusionResult>, verdict: StabilityVerdict) {
        self.total_runs += 1;
        *self.verdict_counts.entry(verdict).or_insert(0) += 1;

        match result {
            Some(result) => {
                self.composite_stats.push(result.composite_score as f64);
                *self.level_counts.entry(result.level).or_insert(0) += 1;
            }
            None => self.failed_runs += 1,
        }
    }

    pub fn summary(&self) -> AnalysisSummary {
        let mut levels: Vec<_> = self.level_counts.iter().map(|(l, c)| (*l, *c)).collect();
        levels.sort();
        let mut verdicts: Vec<_> = self
            .verdict_counts
            .iter()
            .map(|(v, c)| (verdict_label(*v), *c))
            .collect();
        verdicts.sort();

        AnalysisSummary {
            total_runs: self.total_runs,
            failed_runs: self.failed_runs,
            composite: StatsSummary::from(&self.composite_stats),
            levels,
            verdicts,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Aggregate summary
#[derive(Debug, Clone, Default)]
pub struct AnalysisSummary {
    pub total_runs: u64,
    pub failed_runs: u64,
    pub composite: StatsSummary,
    pub levels: Vec<(IntoxicationLevel, u64)>,
    pub verdicts: Vec<(&'static str, u64)>,
}

impl std::fmt::Display for AnalysisSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Analysis Summary ===")?;
        writeln!(f, "Runs: {} ({} failed)", self.total_runs, self.failed_runs)?;
        writeln!(f, "Composite score: {}", self.composite)?;
        for (level, count) in &self.levels {
            writeln!(f, "  {}: {}", level, count)?;
        }
        writeln!(f, "Gait verdicts:")?;
        for (verdict, count) in &self.verdicts {
            writeln!(f, "  {}: {}", verdict, count)?;
        }
        Ok(())
    }
}

/// Statistics summary
#[derive(Debug, Clone, Default)]
pub struct StatsSummary {
    pub count: u64,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub std_dev: f64,
}

impl From<&RunningStats> for StatsSummary {
    fn from(stats: &RunningStats) -> Self {
        Self {
            count: stats.count,
            min: stats.min,
            max: stats.max,
            mean: stats.mean(),
            std_dev: stats.std_dev(),
        }
    }
}

impl std::fmt::Display for StatsSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.count == 0 {
            write!(f, "N/A")
        } else {
            write!(
                f,
                "min={:.1}, max={:.1}, mean={:.1}, std={:.2} (n={})",
                self.min, self.max, self.mean, self.std_dev, self.count
            )
        }
    }
}

/// Online mean / variance (Welford)
#[derive(Debug, Clone, Default)]
pub struct RunningStats {
    count: u64,
    mean: f64,
    m2: f64,
    min: f64,
    max: f64,
}

impl RunningStats {
    pub fn push(&mut self, value: f64) {
        self.count += 1;

        if self.count == 1 {
            self.min = value;
            self.max = value;
            self.mean = value;
            self.m2 = 0.0;
        } else {
            self.min = self.min.min(value);
            self.max = self.max.max(value);

            let delta = value - self.mean;
            self.mean += delta / self.count as f64;
            let delta2 = value - self.mean;
            self.m2 += delta * delta2;
        }
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn mean(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.mean
        }
    }

    /// Sample variance
    pub fn variance(&self) -> f64 {
        if self.count < 2 {
            0.0
        } else {
            self.m2 / (self.count - 1) as f64
        }
    }

    pub fn std_dev(&self) -> f64 {
        self.variance().sqrt()
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }
}
