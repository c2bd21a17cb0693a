//! CLI argument definitions using clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use contracts::{CaptureMode, IntoxicationLevel};

/// Sobriety - intoxication estimate from face, heart-rate and gait signals
#[derive(Parser, Debug)]
#[command(
    name = "sobriety",
    author,
    version,
    about = "Intoxication estimate from face, heart-rate and gait signals",
    long_about = "Scores facial attributes, heart rate and gyroscope gait stability, \n\
                  then fuses them into one intoxication level with recommendations.\n\n\
                  Not a medical or legal measurement."
)]
pub struct Cli {
    /// Increase logging verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true, env = "SOBRIETY_VERBOSE")]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log output format
    #[arg(
        long,
        value_enum,
        default_value = "compact",
        global = true,
        env = "SOBRIETY_LOG_FORMAT"
    )]
    pub log_format: LogFormat,

    /// Prometheus metrics port (0 = disabled)
    #[arg(long, default_value = "0", global = true, env = "SOBRIETY_METRICS_PORT")]
    pub metrics_port: u16,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze recorded signals from a JSON input file
    Analyze(AnalyzeArgs),

    /// Run the full pipeline against simulated collaborators
    Simulate(SimulateArgs),

    /// Validate an analysis profile without running
    Validate(ValidateArgs),

    /// Print the effective analysis profile
    Info(InfoArgs),
}

/// Arguments for the `analyze` command
#[derive(Parser, Debug, Clone)]
pub struct AnalyzeArgs {
    /// Path to the signal input file (JSON)
    #[arg(short, long)]
    pub input: PathBuf,

    /// Capture mode of the face attributes
    #[arg(short, long, value_enum, default_value = "real-time")]
    pub mode: Mode,

    /// Analysis profile (TOML or JSON); built-in defaults when omitted
    #[arg(short, long, env = "SOBRIETY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output the report as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `simulate` command
#[derive(Parser, Debug, Clone)]
pub struct SimulateArgs {
    /// Target level of the simulated signals
    #[arg(short, long, value_enum)]
    pub level: Level,

    /// RNG seed; run N uses `seed + N`
    #[arg(long, default_value = "7")]
    pub seed: u64,

    /// Gyroscope recording length in milliseconds
    #[arg(long, default_value = "6000")]
    pub record_ms: u64,

    /// Number of independent runs
    #[arg(long, default_value = "1")]
    pub runs: u32,

    /// Capture mode of the simulated face
    #[arg(short, long, value_enum, default_value = "still-photo")]
    pub mode: Mode,

    /// Analysis profile (TOML or JSON); built-in defaults when omitted
    #[arg(short, long, env = "SOBRIETY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output reports as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `validate` command
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Path to the profile to validate
    #[arg(short, long, default_value = "sobriety.toml")]
    pub config: PathBuf,

    /// Output validation result as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `info` command
#[derive(Parser, Debug)]
pub struct InfoArgs {
    /// Analysis profile; built-in defaults when omitted
    #[arg(short, long, env = "SOBRIETY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output as JSON instead of TOML
    #[arg(long)]
    pub json: bool,
}

/// Log output format
#[derive(ValueEnum, Clone, Copy, Debug, Default)]
pub enum LogFormat {
    /// JSON structured logging
    Json,
    /// Human-readable pretty format
    Pretty,
    /// Compact single-line format
    #[default]
    Compact,
}

impl From<LogFormat> for observability::LogFormat {
    fn from(format: LogFormat) -> Self {
        match format {
            LogFormat::Json => Self::Json,
            LogFormat::Pretty => Self::Pretty,
            LogFormat::Compact => Self::Compact,
        }
    }
}

/// Face capture mode
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum Mode {
    RealTime,
    StillPhoto,
}

impl From<Mode> for CaptureMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::RealTime => CaptureMode::RealTime,
            Mode::StillPhoto => CaptureMode::StillPhoto,
        }
    }
}

/// Simulated intoxication level
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum Level {
    Normal,
    Slightly,
    Moderate,
    Heavy,
}

impl From<Level> for IntoxicationLevel {
    fn from(level: Level) -> Self {
        match level {
            Level::Normal => IntoxicationLevel::Normal,
            Level::Slightly => IntoxicationLevel::Slightly,
            Level::Moderate => IntoxicationLevel::Moderate,
            Level::Heavy => IntoxicationLevel::Heavy,
        }
    }
}
