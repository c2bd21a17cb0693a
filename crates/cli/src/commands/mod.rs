//! Command implementations.

mod analyze;
mod info;
mod simulate;
mod validate;

pub use analyze::run_analyze;
pub use info::run_info;
pub use simulate::run_simulate;
pub use validate::run_validate;

use std::path::Path;

use anyhow::{Context, Result};
use contracts::{AnalysisError, AnalysisProfile};
use tracing::info;

use crate::error::CliError;

/// Load the profile at `path`, or the built-in defaults
pub(crate) fn load_profile(path: Option<&Path>) -> Result<AnalysisProfile> {
    match path {
        Some(path) => {
            if !path.exists() {
                return Err(CliError::file_not_found(path.display().to_string()).into());
            }
            let profile = config_loader::ConfigLoader::load_from_path(path)
                .with_context(|| format!("Failed to load profile from {}", path.display()))?;
            info!(config = %path.display(), "Analysis profile loaded");
            Ok(profile)
        }
        None => Ok(AnalysisProfile::default()),
    }
}

/// Map a fatal analysis error to the CLI's error
pub(crate) fn analysis_failed(err: AnalysisError) -> anyhow::Error {
    match err {
        AnalysisError::NoSignalsAvailable => CliError::NoSignals.into(),
        other => anyhow::Error::new(other).context("Analysis failed"),
    }
}
