//! Analysis pipeline: collaborators in, fused report out.

mod input;
mod orchestrator;
mod report;

pub use input::{load_input, GyroInput, SignalInput, StaticFaces, StaticHeartRate};
pub use orchestrator::{MotionInput, Pipeline, PipelineConfig};
pub use report::AnalysisReport;
