//! Profile validation
//!
//! Rules:
//! - fusion weights finite, >= 0, sum > 0
//! - gait ratios in (0, 1], slight_ratio < unstable_ratio
//! - slight_changes < unstable_changes
//! - thresholds finite and > 0
//! - gait.min_duration_ms < recorder.max_duration_ms
//! - recorder capacities > 0

use contracts::{AnalysisError, AnalysisProfile, FusionWeights, GaitConfig, RecorderConfig};

/// Validate an AnalysisProfile
///
/// Returns the first error encountered, or Ok(()).
pub fn validate(profile: &AnalysisProfile) -> Result<(), AnalysisError> {
    validate_fusion_weights(&profile.fusion)?;
    validate_gait_thresholds(&profile.gait)?;
    validate_recorder(&profile.recorder)?;
    validate_durations(profile)?;
    Ok(())
}

fn validate_fusion_weights(weights: &FusionWeights) -> Result<(), AnalysisError> {
    let named = [
        ("fusion.face_weight", weights.face_weight),
        ("fusion.heart_weight", weights.heart_weight),
        ("fusion.gyro_weight", weights.gyro_weight),
    ];
    for (field, value) in named {
        if !value.is_finite() || value < 0.0 {
            return Err(AnalysisError::config_validation(
                field,
                format!("weight must be finite and >= 0, got {value}"),
            ));
        }
    }

    let sum = weights.face_weight + weights.heart_weight + weights.gyro_weight;
    if sum <= 0.0 {
        return Err(AnalysisError::config_validation(
            "fusion",
            "weights must not all be zero",
        ));
    }
    Ok(())
}

fn validate_gait_thresholds(gait: &GaitConfig) -> Result<(), AnalysisError> {
    for (field, value) in [
        ("gait.magnitude_threshold", gait.magnitude_threshold),
        ("gait.axis_delta_threshold", gait.axis_delta_threshold),
    ] {
        if !value.is_finite() || value <= 0.0 {
            return Err(AnalysisError::config_validation(
                field,
                format!("threshold must be > 0, got {value}"),
            ));
        }
    }

    for (field, value) in [
        ("gait.slight_ratio", gait.slight_ratio),
        ("gait.unstable_ratio", gait.unstable_ratio),
    ] {
        if !(value > 0.0 && value <= 1.0) {
            return Err(AnalysisError::config_validation(
                field,
                format!("ratio must be in (0, 1], got {value}"),
            ));
        }
    }

    if gait.slight_ratio >= gait.unstable_ratio {
        return Err(AnalysisError::config_validation(
            "gait.slight_ratio / gait.unstable_ratio",
            format!(
                "slight_ratio ({}) must be < unstable_ratio ({})",
                gait.slight_ratio, gait.unstable_ratio
            ),
        ));
    }

    if gait.slight_changes >= gait.unstable_changes {
        return Err(AnalysisError::config_validation(
            "gait.slight_changes / gait.unstable_changes",
            format!(
                "slight_changes ({}) must be < unstable_changes ({})",
                gait.slight_changes, gait.unstable_changes
            ),
        ));
    }
    Ok(())
}

fn validate_recorder(recorder: &RecorderConfig) -> Result<(), AnalysisError> {
    if recorder.channel_capacity == 0 {
        return Err(AnalysisError::config_validation(
            "recorder.channel_capacity",
            "channel_capacity must be > 0",
        ));
    }
    if recorder.max_samples == 0 {
        return Err(AnalysisError::config_validation(
            "recorder.max_samples",
            "max_samples must be > 0",
        ));
    }
    Ok(())
}

fn validate_durations(profile: &AnalysisProfile) -> Result<(), AnalysisError> {
    if profile.gait.min_duration_ms >= profile.recorder.max_duration_ms {
        return Err(AnalysisError::config_validation(
            "gait.min_duration_ms / recorder.max_duration_ms",
            format!(
                "min_duration_ms ({}) must be < max_duration_ms ({})",
                profile.gait.min_duration_ms, profile.recorder.max_duration_ms
            ),
        ));
    }
    Ok(())
}
