//! Signal fusion engine.

use contracts::{
    AnalysisError, FusionResult, FusionWeights, IntoxicationLevel, PartialScore, SignalKind,
};
use tracing::{debug, instrument};

use crate::recommendations::recommendations;

/// Level for a composite score: >=80 Normal, >=60 Slightly, >=40 Moderate, else Heavy
pub fn level_for(composite: f32) -> IntoxicationLevel {
    if composite >= 80.0 {
        IntoxicationLevel::Normal
    } else if composite >= 60.0 {
        IntoxicationLevel::Slightly
    } else if composite >= 40.0 {
        IntoxicationLevel::Moderate
    } else {
        IntoxicationLevel::Heavy
    }
}

/// Fusion engine
///
/// Pure: identical inputs give bit-identical results.
#[derive(Debug, Clone, Default)]
pub struct FusionEngine {
    weights: FusionWeights,
}

impl FusionEngine {
    pub fn new(weights: FusionWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &FusionWeights {
        &self.weights
    }

    /// Fuse up to three partial scores
    ///
    /// Absent signals and signals with zero weight are excluded and the
    /// remaining weights renormalized to 1.
    ///
    /// # Errors
    /// - `InvalidScore` for a present value outside [0, 100] or not finite
    /// - `NoSignalsAvailable` when nothing is left to weigh
    #[instrument(level = "debug", name = "fusion_fuse", skip(self))]
    pub fn fuse(
        &self,
        face: PartialScore,
        heart: PartialScore,
        gyro: PartialScore,
    ) -> Result<FusionResult, AnalysisError> {
        let inputs = [
            (SignalKind::Face, face, self.weights.face_weight),
            (SignalKind::HeartRate, heart, self.weights.heart_weight),
            (SignalKind::Gyroscope, gyro, self.weights.gyro_weight),
        ];

        let mut used: Vec<(SignalKind, f32, f32)> = Vec::with_capacity(inputs.len());
        for (signal, partial, weight) in inputs {
            let Some(value) = partial.get() else {
                continue;
            };
            if !value.is_finite() || !(0.0..=100.0).contains(&value) {
                return Err(AnalysisError::InvalidScore { signal, value });
            }
            if weight > 0.0 {
                used.push((signal, value, weight));
            }
        }

        let total_weight: f32 = used.iter().map(|&(_, _, w)| w).sum();
        if used.is_empty() || total_weight <= 0.0 {
            return Err(AnalysisError::NoSignalsAvailable);
        }

        let composite = used
            .iter()
            .map(|&(_, value, weight)| (weight / total_weight) * value)
            .sum::<f32>()
            .clamp(0.0, 100.0);

        let level = level_for(composite);
        let signals_used: Vec<SignalKind> = used.iter().map(|&(s, _, _)| s).collect();

        debug!(
            composite,
            ?level,
            signals = signals_used.len(),
            "signals fused"
        );

        Ok(FusionResult {
            level,
            composite_score: composite,
            confidence: composite / 100.0,
            summary: summary(level, composite, &signals_used),
            recommendations: recommendations(level, composite),
            signals_used,
            detail: detail(&inputs, total_weight),
        })
    }
}

fn summary(level: IntoxicationLevel, composite: f32, signals: &[SignalKind]) -> String {
    let names: Vec<&str> = signals.iter().map(SignalKind::as_str).collect();
    format!(
        "{} (score {:.0}/100, based on {})",
        level.label(),
        composite.floor(),
        names.join(", ")
    )
}

fn detail(inputs: &[(SignalKind, PartialScore, f32)], total_weight: f32) -> String {
    inputs
        .iter()
        .map(|&(signal, partial, weight)| match partial.get() {
            Some(value) if weight > 0.0 => format!(
                "{signal}: {value:.1} (weight {:.2})",
                weight / total_weight
            ),
            Some(value) => format!("{signal}: {value:.1} (not weighted)"),
            None => format!("{signal}: not available"),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Fuse with the default weights
pub fn fuse(
    face: PartialScore,
    heart: PartialScore,
    gyro: PartialScore,
) -> Result<FusionResult, AnalysisError> {
    FusionEngine::default().fuse(face, heart, gyro)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(value: f32) -> PartialScore {
        PartialScore::present(value)
    }

    fn none() -> PartialScore {
        PartialScore::absent()
    }

    #[test]
    fn test_three_signal_scenario() {
        let result = fuse(p(80.0), p(100.0), p(20.0)).unwrap();
        assert!((result.composite_score - 72.0).abs() < 1e-3);
        assert_eq!(result.level, IntoxicationLevel::Slightly);
        assert!((result.confidence - 0.72).abs() < 1e-5);
        assert_eq!(result.recommendations.len(), 3);
        assert!(result.recommendations[0].contains("Score 72"));
        assert_eq!(
            result.signals_used,
            vec![SignalKind::Face, SignalKind::HeartRate, SignalKind::Gyroscope]
        );
    }

    #[test]
    fn test_no_signals_fails() {
        assert!(matches!(
            fuse(none(), none(), none()),
            Err(AnalysisError::NoSignalsAvailable)
        ));
    }

    #[test]
    fn test_single_signal_renormalized() {
        for value in [0.0, 39.0, 40.0, 59.5, 60.0, 79.9, 80.0, 100.0] {
            for (face, heart, gyro) in [
                (p(value), none(), none()),
                (none(), p(value), none()),
                (none(), none(), p(value)),
            ] {
                let result = fuse(face, heart, gyro).unwrap();
                assert_eq!(result.composite_score, value);
                assert_eq!(result.level, level_for(value));
                assert_eq!(result.signals_used.len(), 1);
            }
        }
    }

    #[test]
    fn test_two_signals_renormalized() {
        // face 0.6 and gyro 0.2 -> 0.75 / 0.25
        let result = fuse(p(100.0), none(), p(20.0)).unwrap();
        assert!((result.composite_score - 80.0).abs() < 1e-3);
        assert!(result.detail.contains("heart_rate: not available"));
    }

    #[test]
    fn test_invalid_score_rejected() {
        assert!(matches!(
            fuse(p(101.0), none(), none()),
            Err(AnalysisError::InvalidScore {
                signal: SignalKind::Face,
                ..
            })
        ));
        assert!(matches!(
            fuse(p(50.0), none(), p(f32::NAN)),
            Err(AnalysisError::InvalidScore {
                signal: SignalKind::Gyroscope,
                ..
            })
        ));
    }

    #[test]
    fn test_absent_values_not_validated() {
        let odd_absent = PartialScore {
            value: -5.0,
            present: false,
        };
        assert!(fuse(p(90.0), odd_absent, none()).is_ok());
    }

    #[test]
    fn test_zero_weight_signal_only() {
        let engine = FusionEngine::new(FusionWeights {
            face_weight: 1.0,
            heart_weight: 0.0,
            gyro_weight: 0.0,
        });
        assert!(matches!(
            engine.fuse(none(), p(90.0), none()),
            Err(AnalysisError::NoSignalsAvailable)
        ));
    }

    #[test]
    fn test_level_bands() {
        assert_eq!(level_for(100.0), IntoxicationLevel::Normal);
        assert_eq!(level_for(80.0), IntoxicationLevel::Normal);
        assert_eq!(level_for(79.99), IntoxicationLevel::Slightly);
        assert_eq!(level_for(60.0), IntoxicationLevel::Slightly);
        assert_eq!(level_for(59.99), IntoxicationLevel::Moderate);
        assert_eq!(level_for(40.0), IntoxicationLevel::Moderate);
        assert_eq!(level_for(39.99), IntoxicationLevel::Heavy);
        assert_eq!(level_for(0.0), IntoxicationLevel::Heavy);
    }

    #[test]
    fn test_idempotent() {
        let a = fuse(p(63.0), p(80.0), p(47.5)).unwrap();
        let b = fuse(p(63.0), p(80.0), p(47.5)).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.composite_score.to_bits(), b.composite_score.to_bits());
    }
}
