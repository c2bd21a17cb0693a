//! # Config Loader
//!
//! Analysis profile loading and parsing.
//!
//! Responsibilities:
//! - Parse TOML/JSON profile files
//! - Validate threshold and weight consistency
//! - Produce an `AnalysisProfile`
//!
//! # Example
//!
//! ```no_run
//! use config_loader::ConfigLoader;
//! use std::path::Path;
//!
//! let profile = ConfigLoader::load_from_path(Path::new("profile.toml")).unwrap();
//! println!("face weight: {}", profile.fusion.face_weight);
//! ```

mod parser;
mod validator;

pub use contracts::AnalysisProfile;
pub use parser::ConfigFormat;

use contracts::AnalysisError;
use std::path::Path;
use tracing::debug;

/// Profile loader
///
/// Provides static methods to load a profile from files or strings.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load profile from file path
    ///
    /// Detects the format from the file extension (.toml / .json).
    ///
    /// # Errors
    /// - File read failure
    /// - Unsupported format
    /// - Parse failure
    /// - Validation failure
    pub fn load_from_path(path: &Path) -> Result<AnalysisProfile, AnalysisError> {
        let format = Self::detect_format(path)?;
        let content = Self::read_file(path)?;
        debug!(path = %path.display(), ?format, "loading analysis profile");
        Self::load_from_str(&content, format)
    }

    /// Load profile from string
    ///
    /// # Errors
    /// - Parse failure
    /// - Validation failure
    pub fn load_from_str(
        content: &str,
        format: ConfigFormat,
    ) -> Result<AnalysisProfile, AnalysisError> {
        Self::parse_and_validate(content, format)
    }

    /// Validate an already constructed profile
    pub fn validate(profile: &AnalysisProfile) -> Result<(), AnalysisError> {
        validator::validate(profile)
    }

    /// Serialize profile to TOML string
    pub fn to_toml(profile: &AnalysisProfile) -> Result<String, AnalysisError> {
        toml::to_string_pretty(profile)
            .map_err(|e| AnalysisError::config_parse(format!("TOML serialize error: {e}")))
    }

    /// Serialize profile to JSON string
    pub fn to_json(profile: &AnalysisProfile) -> Result<String, AnalysisError> {
        serde_json::to_string_pretty(profile)
            .map_err(|e| AnalysisError::config_parse(format!("JSON serialize error: {e}")))
    }
}

impl ConfigLoader {
    /// Infer format from file extension
    fn detect_format(path: &Path) -> Result<ConfigFormat, AnalysisError> {
        let ext = path.extension().and_then(|e| e.to_str()).ok_or_else(|| {
            AnalysisError::config_parse("cannot determine file format from extension")
        })?;

        ConfigFormat::from_extension(ext).ok_or_else(|| {
            AnalysisError::config_parse(format!("unsupported config format: .{ext}"))
        })
    }

    fn read_file(path: &Path) -> Result<String, AnalysisError> {
        Ok(std::fs::read_to_string(path)?)
    }

    fn parse_and_validate(
        content: &str,
        format: ConfigFormat,
    ) -> Result<AnalysisProfile, AnalysisError> {
        let profile = parser::parse(content, format)?;
        validator::validate(&profile)?;
        Ok(profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const PROFILE_TOML: &str = r#"
[recorder]
max_duration_ms = 12000
channel_capacity = 512

[gait]
min_duration_ms = 6000
unstable_changes = 12

[fusion]
face_weight = 0.5
heart_weight = 0.25
gyro_weight = 0.25
"#;

    #[test]
    fn test_load_from_str_toml() {
        let result = ConfigLoader::load_from_str(PROFILE_TOML, ConfigFormat::Toml);
        assert!(result.is_ok(), "Failed: {:?}", result.err());
        let profile = result.unwrap();
        assert_eq!(profile.recorder.max_duration_ms, 12000);
        assert_eq!(profile.gait.unstable_changes, 12);
        assert_eq!(profile.gait.slight_changes, 5);
    }

    #[test]
    fn test_round_trip_toml() {
        let profile = ConfigLoader::load_from_str(PROFILE_TOML, ConfigFormat::Toml).unwrap();
        let serialized = ConfigLoader::to_toml(&profile).unwrap();
        let reloaded = ConfigLoader::load_from_str(&serialized, ConfigFormat::Toml).unwrap();
        assert_eq!(profile, reloaded);
    }

    #[test]
    fn test_round_trip_json() {
        let profile = ConfigLoader::load_from_str(PROFILE_TOML, ConfigFormat::Toml).unwrap();
        let json = ConfigLoader::to_json(&profile).unwrap();
        let reloaded = ConfigLoader::load_from_str(&json, ConfigFormat::Json).unwrap();
        assert_eq!(profile, reloaded);
    }

    #[test]
    fn test_validation_runs_after_parse() {
        let content = "[gait]\nslight_ratio = 0.5\nunstable_ratio = 0.3\n";
        let result = ConfigLoader::load_from_str(content, ConfigFormat::Toml);
        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("slight_ratio"), "got: {err}");
    }

    #[test]
    fn test_load_from_path() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(PROFILE_TOML.as_bytes()).unwrap();

        let profile = ConfigLoader::load_from_path(file.path()).unwrap();
        assert_eq!(profile.fusion.face_weight, 0.5);
    }

    #[test]
    fn test_unsupported_extension() {
        let file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        let err = ConfigLoader::load_from_path(file.path()).unwrap_err();
        assert!(err.to_string().contains(".yaml"), "got: {err}");
    }

    #[test]
    fn test_missing_file() {
        let err = ConfigLoader::load_from_path(Path::new("/nonexistent/profile.toml")).unwrap_err();
        assert!(matches!(err, AnalysisError::Io(_)));
    }
}
