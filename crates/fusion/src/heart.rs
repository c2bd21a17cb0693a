//! Heart-rate banding and baseline helpers.

use contracts::{AnalysisError, HeartRateReading, PartialScore, SignalKind};
use serde::{Deserialize, Serialize};

/// Variability penalty per unit of normalized variability
const VARIABILITY_PENALTY: f32 = 50.0;

/// Partial score for a BPM value
///
/// 60-90 -> 100, 50-110 -> 80, otherwise 60 minus the distance outside
/// 50-110, never negative.
pub fn heart_rate_score(bpm: f32) -> f32 {
    if (60.0..=90.0).contains(&bpm) {
        100.0
    } else if (50.0..=110.0).contains(&bpm) {
        80.0
    } else {
        let distance = if bpm < 50.0 { 50.0 - bpm } else { bpm - 110.0 };
        (60.0 - distance).max(0.0)
    }
}

/// Fusion partial for an optional reading
///
/// # Errors
/// `InvalidScore` when the BPM is not finite or not positive, or the
/// variability is not a finite value in [0, 1].
pub fn heart_partial(reading: Option<&HeartRateReading>) -> Result<PartialScore, AnalysisError> {
    let Some(reading) = reading else {
        return Ok(PartialScore::absent());
    };

    if !reading.bpm.is_finite() || reading.bpm <= 0.0 {
        return Err(AnalysisError::InvalidScore {
            signal: SignalKind::HeartRate,
            value: reading.bpm,
        });
    }

    let mut score = heart_rate_score(reading.bpm);
    if let Some(variability) = reading.variability {
        if !(0.0..=1.0).contains(&variability) {
            return Err(AnalysisError::InvalidScore {
                signal: SignalKind::HeartRate,
                value: variability,
            });
        }
        score = (score - variability * VARIABILITY_PENALTY).max(0.0);
    }

    Ok(PartialScore::present(score))
}

/// Age-dependent resting range (bpm, inclusive)
pub fn normal_range_for_age(age: u32) -> (f32, f32) {
    match age {
        18..=25 => (60.0, 100.0),
        26..=35 => (60.0, 95.0),
        36..=45 => (60.0, 90.0),
        46..=55 => (60.0, 85.0),
        56..=65 => (60.0, 80.0),
        _ => (60.0, 100.0),
    }
}

/// Mean of the samples inside the age's normal range, `None` if none qualify
pub fn resting_baseline(samples_bpm: &[f32], age: u32) -> Option<f32> {
    let (lo, hi) = normal_range_for_age(age);
    let resting: Vec<f32> = samples_bpm
        .iter()
        .copied()
        .filter(|bpm| (lo..=hi).contains(bpm))
        .collect();

    if resting.is_empty() {
        return None;
    }
    Some(resting.iter().sum::<f32>() / resting.len() as f32)
}

/// Deviation of the current reading from the resting baseline
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeartRateDeviation {
    Normal,
    Mild,
    Moderate,
    High,
}

/// `|bpm - baseline|`: <10 Normal, <20 Mild, <30 Moderate, else High
pub fn classify_baseline_deviation(bpm: f32, baseline: f32) -> HeartRateDeviation {
    let difference = (bpm - baseline).abs();
    if difference < 10.0 {
        HeartRateDeviation::Normal
    } else if difference < 20.0 {
        HeartRateDeviation::Mild
    } else if difference < 30.0 {
        HeartRateDeviation::Moderate
    } else {
        HeartRateDeviation::High
    }
}
