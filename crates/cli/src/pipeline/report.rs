//! Analysis report and its console rendering.

use contracts::{FusionResult, HeartRateReading};
use face_scorer::FaceOutcome;
use gait::StabilityReport;
use serde::Serialize;

/// Everything one pipeline run produced
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    /// `None` when the face provider failed
    pub face: Option<FaceOutcome>,
    pub heart_rate: Option<HeartRateReading>,
    /// `None` when the gait test was not taken
    pub stability: Option<StabilityReport>,
    pub result: FusionResult,
    /// Collaborator failures degraded into absent signals
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<String>,
}

impl AnalysisReport {
    /// Print detailed summary
    pub fn print_summary(&self) {
        println!("\n╔══════════════════════════════════════════════════════════════╗");
        println!("║                    Intoxication Estimate                     ║");
        println!("╚══════════════════════════════════════════════════════════════╝\n");

        println!("Result");
        println!("   ├─ Level: {}", self.result.level);
        println!("   ├─ Composite score: {:.1}", self.result.composite_score);
        println!("   ├─ Confidence: {:.2}", self.result.confidence);
        println!("   └─ {}", self.result.summary);

        println!("\nSignals");
        match &self.face {
            Some(FaceOutcome::Scored(face)) => {
                println!("   ├─ Face: {} ({})", face.score, face.message)
            }
            Some(outcome) => println!("   ├─ Face: {}", outcome.message()),
            None => println!("   ├─ Face: not available"),
        }
        match &self.heart_rate {
            Some(reading) => println!("   ├─ Heart rate: {:.0} bpm", reading.bpm),
            None => println!("   ├─ Heart rate: not available"),
        }
        match &self.stability {
            Some(report) => println!(
                "   └─ Gait: {:?} (ratio {:.2}, {} sudden changes, {} samples over {} ms)",
                report.verdict,
                report.instability_ratio,
                report.sudden_changes,
                report.sample_count,
                report.duration_ms
            ),
            None => println!("   └─ Gait: not measured"),
        }

        println!("\nBreakdown");
        for line in self.result.detail.lines() {
            println!("   - {}", line);
        }

        if !self.notes.is_empty() {
            println!("\nDegraded signals");
            for note in &self.notes {
                println!("   - {}", note);
            }
        }

        println!("\nRecommendations");
        for recommendation in &self.result.recommendations {
            println!("   - {}", recommendation);
        }

        println!("\nThis estimate is not a medical or legal measurement.\n");
    }
}
