//! Profile parsing
//!
//! TOML is the primary format, JSON is accepted for generated profiles.

use contracts::{AnalysisError, AnalysisProfile};

/// Profile file format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// TOML format (recommended)
    Toml,
    /// JSON format
    Json,
}

impl ConfigFormat {
    /// Infer format from file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "toml" => Some(Self::Toml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Parse TOML profile
pub fn parse_toml(content: &str) -> Result<AnalysisProfile, AnalysisError> {
    toml::from_str(content).map_err(|e| AnalysisError::ConfigParse {
        message: format!("TOML parse error: {e}"),
        source: Some(Box::new(e)),
    })
}

/// Parse JSON profile
pub fn parse_json(content: &str) -> Result<AnalysisProfile, AnalysisError> {
    serde_json::from_str(content).map_err(|e| AnalysisError::ConfigParse {
        message: format!("JSON parse error: {e}"),
        source: Some(Box::new(e)),
    })
}

/// Parse profile according to format
pub fn parse(content: &str, format: ConfigFormat) -> Result<AnalysisProfile, AnalysisError> {
    match format {
        ConfigFormat::Toml => parse_toml(content),
        ConfigFormat::Json => parse_json(content),
    }
}
