//! Attribute validation
//!
//! Detector bugs must surface as `InvalidAttribute`; nothing is clamped.

use contracts::{AnalysisError, FaceAttributes};
use validator::{Validate, ValidationErrors, ValidationErrorsKind};

/// Validate one face record
pub fn validate_attributes(attrs: &FaceAttributes) -> Result<(), AnalysisError> {
    check_finite(attrs)?;

    if let Err(errors) = attrs.validate() {
        let (field, message) = first_violation(&errors, "")
            .unwrap_or_else(|| ("attributes".to_string(), errors.to_string()));
        return Err(AnalysisError::invalid_attribute(field, message));
    }

    check_emotions(attrs)
}

/// Range checks pass NaN through, so reject non-finite values up front
fn check_finite(attrs: &FaceAttributes) -> Result<(), AnalysisError> {
    let mut values: Vec<(&str, f32)> = Vec::new();
    if let Some(eyes) = attrs.eyes_open {
        values.push(("eyes_open.confidence", eyes.confidence));
    }
    if let Some(mouth) = attrs.mouth_open {
        values.push(("mouth_open.confidence", mouth.confidence));
    }
    if let Some(pose) = attrs.pose {
        values.push(("pose.roll", pose.roll));
        values.push(("pose.pitch", pose.pitch));
        values.push(("pose.yaw", pose.yaw));
    }
    if let Some(quality) = attrs.quality {
        values.push(("quality.brightness", quality.brightness));
        if let Some(sharpness) = quality.sharpness {
            values.push(("quality.sharpness", sharpness));
        }
    }

    match values.into_iter().find(|(_, v)| !v.is_finite()) {
        Some((field, value)) => Err(AnalysisError::invalid_attribute(
            field,
            format!("value must be finite, got {value}"),
        )),
        None => Ok(()),
    }
}

fn check_emotions(attrs: &FaceAttributes) -> Result<(), AnalysisError> {
    let mut emotions: Vec<_> = attrs.emotions.iter().collect();
    emotions.sort_by_key(|(emotion, _)| **emotion);

    for (emotion, &confidence) in emotions {
        if !(0.0..=100.0).contains(&confidence) {
            return Err(AnalysisError::invalid_attribute(
                format!("emotions.{emotion:?}"),
                format!("confidence must be in [0, 100], got {confidence}"),
            ));
        }
    }
    Ok(())
}

/// First violation as (dotted path, message), in field-name order
fn first_violation(errors: &ValidationErrors, prefix: &str) -> Option<(String, String)> {
    let mut fields: Vec<_> = errors.errors().iter().collect();
    fields.sort_by(|a, b| a.0.to_string().cmp(&b.0.to_string()));

    for (field, kind) in fields {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{prefix}.{field}")
        };
        match kind {
            ValidationErrorsKind::Field(errs) => {
                if let Some(err) = errs.first() {
                    let message = match &err.message {
                        Some(message) => message.to_string(),
                        None => format!("{} check failed", err.code),
                    };
                    return Some((path, message));
                }
            }
            ValidationErrorsKind::Struct(inner) => {
                if let Some(found) = first_violation(inner, &path) {
                    return Some(found);
                }
            }
            ValidationErrorsKind::List(items) => {
                for (idx, inner) in items {
                    if let Some(found) = first_violation(inner, &format!("{path}[{idx}]")) {
                        return Some(found);
                    }
                }
            }
        }
    }
    None
}
