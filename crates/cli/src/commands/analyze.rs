//! `analyze` command implementation.

use anyhow::{Context, Result};
use tracing::info;

use super::{analysis_failed, load_profile};
use crate::cli::AnalyzeArgs;
use crate::pipeline::{load_input, Pipeline, PipelineConfig};

/// Execute the `analyze` command
pub async fn run_analyze(args: &AnalyzeArgs) -> Result<()> {
    let profile = load_profile(args.config.as_deref())?;

    info!(input = %args.input.display(), mode = ?args.mode, "Loading signal input");
    let input = load_input(&args.input)?;
    let (faces, heart, motion) = input.into_parts();

    let config = PipelineConfig {
        profile,
        mode: args.mode.into(),
    };
    let pipeline = Pipeline::new(config, faces, heart);
    let report = pipeline.run(&[], motion).await.map_err(analysis_failed)?;

    if args.json {
        let json =
            serde_json::to_string_pretty(&report).context("Failed to serialize analysis report")?;
        println!("{}", json);
    } else {
        report.print_summary();
    }

    Ok(())
}
