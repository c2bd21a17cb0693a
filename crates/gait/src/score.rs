//! Stability score mapping
//!
//! Each classified verdict owns a score band; inside the band the score falls
//! linearly with the instability ratio across that verdict's ratio range.

use contracts::{GaitConfig, PartialScore, StabilityVerdict};

use crate::StabilityReport;

/// Stable: 1.0 at ratio 0, 0.85 at `slight_ratio`
const STABLE_BAND: (f32, f32) = (1.0, 0.85);
/// SlightlyUnstable: 0.8 at `slight_ratio`, 0.5 at `unstable_ratio`
const SLIGHT_BAND: (f32, f32) = (0.8, 0.5);
/// Unstable: 0.4 at `unstable_ratio`, 0.0 at ratio 1
const UNSTABLE_BAND: (f32, f32) = (0.4, 0.0);

/// Stability score in [0, 1], `None` for unclassified verdicts
pub fn stability_score(report: &StabilityReport, config: &GaitConfig) -> Option<f32> {
    let ratio = report.instability_ratio;
    let (band, lo, hi) = match report.verdict {
        StabilityVerdict::Stable => (STABLE_BAND, 0.0, config.slight_ratio),
        StabilityVerdict::SlightlyUnstable => {
            (SLIGHT_BAND, config.slight_ratio, config.unstable_ratio)
        }
        StabilityVerdict::Unstable => (UNSTABLE_BAND, config.unstable_ratio, 1.0),
        StabilityVerdict::InsufficientData | StabilityVerdict::SensorUnavailable => return None,
    };

    let t = ((ratio - lo) / (hi - lo).max(f32::EPSILON)).clamp(0.0, 1.0);
    Some(band.0 + (band.1 - band.0) * t)
}

/// Gyroscope partial for fusion (score x 100), absent when unclassified
pub fn stability_partial(report: &StabilityReport, config: &GaitConfig) -> PartialScore {
    stability_score(report, config)
        .map(|score| score * 100.0)
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(verdict: StabilityVerdict, ratio: f32) -> StabilityReport {
        StabilityReport {
            verdict,
            instability_ratio: ratio,
            sudden_changes: 0,
            sample_count: 100,
            duration_ms: 6_000,
        }
    }

    fn score(verdict: StabilityVerdict, ratio: f32) -> f32 {
        stability_score(&report(verdict, ratio), &GaitConfig::default()).unwrap()
    }

    #[test]
    fn test_band_edges() {
        assert!((score(StabilityVerdict::Stable, 0.0) - 1.0).abs() < 1e-6);
        assert!((score(StabilityVerdict::Stable, 0.15) - 0.85).abs() < 1e-6);
        assert!((score(StabilityVerdict::SlightlyUnstable, 0.15) - 0.8).abs() < 1e-6);
        assert!((score(StabilityVerdict::SlightlyUnstable, 0.30) - 0.5).abs() < 1e-6);
        assert!((score(StabilityVerdict::Unstable, 0.30) - 0.4).abs() < 1e-6);
        assert!(score(StabilityVerdict::Unstable, 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_sudden_change_escalation_uses_band_top() {
        // SlightlyUnstable from sudden changes alone, ratio below the band
        assert!((score(StabilityVerdict::SlightlyUnstable, 0.02) - 0.8).abs() < 1e-6);
        assert!((score(StabilityVerdict::Unstable, 0.0) - 0.4).abs() < 1e-6);
    }

    #[test]
    fn test_bands_never_overlap() {
        for i in 0..=100 {
            let ratio = i as f32 / 100.0;
            let stable = score(StabilityVerdict::Stable, ratio);
            let slight = score(StabilityVerdict::SlightlyUnstable, ratio);
            let unstable = score(StabilityVerdict::Unstable, ratio);
            assert!((0.85..=1.0).contains(&stable));
            assert!((0.5..=0.8).contains(&slight));
            assert!((0.0..=0.4).contains(&unstable));
        }
    }

    #[test]
    fn test_unclassified_is_absent() {
        let config = GaitConfig::default();
        let partial = stability_partial(
            &report(StabilityVerdict::InsufficientData, 0.0),
            &config,
        );
        assert!(!partial.present);
        assert!(stability_score(&StabilityReport::sensor_unavailable(), &config).is_none());
    }

    #[test]
    fn test_partial_is_percent() {
        let partial = stability_partial(
            &report(StabilityVerdict::Stable, 0.0),
            &GaitConfig::default(),
        );
        assert_eq!(partial.get(), Some(100.0));
    }
}
