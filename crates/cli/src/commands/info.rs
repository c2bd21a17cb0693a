//! `info` command implementation.

use anyhow::{Context, Result};
use tracing::info;

use super::load_profile;
use crate::cli::InfoArgs;

/// Execute the `info` command
pub fn run_info(args: &InfoArgs) -> Result<()> {
    let profile = load_profile(args.config.as_deref())?;
    match &args.config {
        Some(path) => info!(config = %path.display(), "Showing analysis profile"),
        None => info!("Showing built-in analysis profile"),
    }

    let rendered = if args.json {
        config_loader::ConfigLoader::to_json(&profile)
    } else {
        config_loader::ConfigLoader::to_toml(&profile)
    }
    .context("Failed to render analysis profile")?;

    println!("{}", rendered);
    Ok(())
}
