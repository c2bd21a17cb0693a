//! `simulate` command implementation.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use contracts::{AnalysisError, IntoxicationLevel, StabilityVerdict};
use ingestion::simulated::{simulated_motion_source, SimulatedFaceProvider, SimulatedHeartRate};
use observability::AnalysisAggregator;
use tracing::{info, warn};

use super::{analysis_failed, load_profile};
use crate::cli::SimulateArgs;
use crate::pipeline::{MotionInput, Pipeline, PipelineConfig};

/// Execute the `simulate` command
pub async fn run_simulate(args: &SimulateArgs) -> Result<()> {
    let profile = load_profile(args.config.as_deref())?;
    let target: IntoxicationLevel = args.level.into();

    info!(
        target = %target,
        seed = args.seed,
        runs = args.runs,
        record_ms = args.record_ms,
        "Starting simulated analysis"
    );

    let mut aggregator = AnalysisAggregator::new();
    let mut reports = Vec::new();

    for run in 0..args.runs.max(1) {
        let seed = args.seed.wrapping_add(u64::from(run));
        let pipeline = Pipeline::new(
            PipelineConfig {
                profile: profile.clone(),
                mode: args.mode.into(),
            },
            SimulatedFaceProvider::new(target, seed),
            SimulatedHeartRate::new(target, seed),
        );
        let motion = MotionInput::Record {
            source: Arc::new(simulated_motion_source(target, seed)),
            duration: Duration::from_millis(args.record_ms),
        };

        match pipeline.run(&[], motion).await {
            Ok(report) => {
                let verdict = report
                    .stability
                    .as_ref()
                    .map(|s| s.verdict)
                    .unwrap_or(StabilityVerdict::SensorUnavailable);
                aggregator.update(Some(&report.result), verdict);
                reports.push(report);
            }
            Err(AnalysisError::NoSignalsAvailable) if args.runs > 1 => {
                warn!(run, "no usable signal in run");
                aggregator.update(None, StabilityVerdict::SensorUnavailable);
            }
            Err(e) => return Err(analysis_failed(e)),
        }

        let recorder = pipeline.recorder().metrics().snapshot();
        info!(
            run,
            events_received = recorder.events_received,
            events_dropped = recorder.events_dropped,
            "Simulated run finished"
        );
    }

    if args.json {
        let json =
            serde_json::to_string_pretty(&reports).context("Failed to serialize reports")?;
        println!("{}", json);
    } else {
        for report in &reports {
            report.print_summary();
        }
        if args.runs > 1 {
            println!("{}", aggregator.summary());
        }
    }

    Ok(())
}
