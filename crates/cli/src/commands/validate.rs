//! `validate` command implementation.

use anyhow::{Context, Result};
use contracts::AnalysisProfile;
use serde::Serialize;
use tracing::info;

use crate::cli::ValidateArgs;

/// Validation result for JSON output
#[derive(Serialize)]
struct ValidationResult {
    valid: bool,
    config_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    warnings: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<ProfileSummary>,
}

#[derive(Serialize)]
struct ProfileSummary {
    face_weight: f32,
    heart_weight: f32,
    gyro_weight: f32,
    min_duration_ms: u64,
    max_duration_ms: u64,
    unstable_ratio: f32,
    slight_ratio: f32,
}

/// Execute the `validate` command
pub fn run_validate(args: &ValidateArgs) -> Result<()> {
    info!(config = %args.config.display(), "Validating analysis profile");

    let result = validate_profile(args);

    if args.json {
        let json = serde_json::to_string_pretty(&result)
            .context("Failed to serialize validation result")?;
        println!("{}", json);
    } else {
        print_validation_result(&result);
    }

    if result.valid {
        Ok(())
    } else {
        anyhow::bail!("Profile validation failed")
    }
}

fn validate_profile(args: &ValidateArgs) -> ValidationResult {
    let config_path = args.config.display().to_string();

    if !args.config.exists() {
        return ValidationResult {
            valid: false,
            config_path,
            error: Some(format!("File not found: {}", args.config.display())),
            warnings: None,
            summary: None,
        };
    }

    match config_loader::ConfigLoader::load_from_path(&args.config) {
        Ok(profile) => {
            let warnings = collect_warnings(&profile);
            ValidationResult {
                valid: true,
                config_path,
                error: None,
                warnings: if warnings.is_empty() {
                    None
                } else {
                    Some(warnings)
                },
                summary: Some(ProfileSummary {
                    face_weight: profile.fusion.face_weight,
                    heart_weight: profile.fusion.heart_weight,
                    gyro_weight: profile.fusion.gyro_weight,
                    min_duration_ms: profile.gait.min_duration_ms,
                    max_duration_ms: profile.recorder.max_duration_ms,
                    unstable_ratio: profile.gait.unstable_ratio,
                    slight_ratio: profile.gait.slight_ratio,
                }),
            }
        }
        Err(e) => ValidationResult {
            valid: false,
            config_path,
            error: Some(e.to_string()),
            warnings: None,
            summary: None,
        },
    }
}

/// Collect profile warnings (non-fatal issues)
fn collect_warnings(profile: &AnalysisProfile) -> Vec<String> {
    let mut warnings = Vec::new();

    let weights = [
        ("face", profile.fusion.face_weight),
        ("heart rate", profile.fusion.heart_weight),
        ("gyroscope", profile.fusion.gyro_weight),
    ];
    for (signal, weight) in weights {
        if weight == 0.0 {
            warnings.push(format!("{signal} weight is 0 - the signal will never be fused"));
        }
    }

    // 50 Hz sensor
    let needed = profile.gait.min_duration_ms / 20;
    if (profile.recorder.max_samples as u64) < needed {
        warnings.push(format!(
            "recorder.max_samples = {} holds less than gait.min_duration_ms at 50 Hz ({} samples)",
            profile.recorder.max_samples, needed
        ));
    }

    warnings
}

fn print_validation_result(result: &ValidationResult) {
    if result.valid {
        println!("✓ Profile is valid: {}", result.config_path);

        if let Some(ref summary) = result.summary {
            println!(
                "\n  Weights: face {:.2}, heart {:.2}, gyro {:.2}",
                summary.face_weight, summary.heart_weight, summary.gyro_weight
            );
            println!(
                "  Recording: {} ms minimum, {} ms ceiling",
                summary.min_duration_ms, summary.max_duration_ms
            );
            println!(
                "  Instability ratio: slight > {:.2}, unstable > {:.2}",
                summary.slight_ratio, summary.unstable_ratio
            );
        }

        if let Some(ref warnings) = result.warnings {
            println!("\n⚠ Warnings:");
            for warning in warnings {
                println!("  - {}", warning);
            }
        }
    } else {
        println!("✗ Profile is invalid: {}", result.config_path);
        if let Some(ref error) = result.error {
            println!("\n  Error: {}", error);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::Builder;

    fn args_for(content: &str) -> (tempfile::NamedTempFile, ValidateArgs) {
        let mut file = Builder::new().suffix(".toml").tempfile().unwrap();
        write!(file, "{}", content).unwrap();
        let args = ValidateArgs {
            config: file.path().to_path_buf(),
            json: true,
        };
        (file, args)
    }

    #[test]
    fn test_valid_profile_with_zero_weight_warning() {
        let (_file, args) = args_for("[fusion]\nface_weight = 0.0\n");
        let result = validate_profile(&args);
        assert!(result.valid);
        let warnings = result.warnings.unwrap();
        assert!(warnings[0].starts_with("face weight is 0"));
    }

    #[test]
    fn test_invalid_profile() {
        let (_file, args) = args_for("[gait]\nslight_ratio = 0.5\nunstable_ratio = 0.3\n");
        let result = validate_profile(&args);
        assert!(!result.valid);
        assert!(result.error.is_some());
    }

    #[test]
    fn test_missing_file() {
        let args = ValidateArgs {
            config: PathBuf::from("/nonexistent/sobriety.toml"),
            json: false,
        };
        assert!(!validate_profile(&args).valid);
    }
}
