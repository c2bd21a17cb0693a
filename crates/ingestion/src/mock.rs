//! Mock motion source
//!
//! Implements `MotionSource` with a background thread, the same way a device
//! listener pushes events. Used for tests and simulation runs without hardware.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use contracts::{AngularVelocity, MotionEvent, MotionEventCallback, MotionSource};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, trace};

use crate::clock::now_ms;

/// Walking pattern produced by the mock gyroscope
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionProfile {
    /// Low noise around rest, no sudden changes
    Steady,
    /// Slow sway whose peaks cross the instability threshold
    Swaying,
    /// Large random rotations on every axis
    Erratic,
}

impl MotionProfile {
    /// Sway amplitude (rad/s); peaks spend roughly a fifth of the time above 2.0
    const SWAY_AMPLITUDE: f32 = 2.13;
    /// Sway period (ms)
    const SWAY_PERIOD_MS: f32 = 2_000.0;

    /// Angular velocity at `elapsed_ms` into the recording
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R, elapsed_ms: i64) -> AngularVelocity {
        match self {
            Self::Steady => AngularVelocity::new(
                rng.random_range(-0.3..0.3),
                rng.random_range(-0.3..0.3),
                rng.random_range(-0.3..0.3),
            ),
            Self::Swaying => {
                let phase =
                    elapsed_ms as f32 / Self::SWAY_PERIOD_MS * std::f32::consts::TAU;
                AngularVelocity::new(
                    rng.random_range(-0.05..0.05),
                    rng.random_range(-0.05..0.05),
                    Self::SWAY_AMPLITUDE * phase.sin(),
                )
            }
            Self::Erratic => AngularVelocity::new(
                rng.random_range(-3.5..3.5),
                rng.random_range(-3.5..3.5),
                rng.random_range(-3.5..3.5),
            ),
        }
    }
}

/// Mock source configuration
#[derive(Debug, Clone)]
pub struct MockMotionConfig {
    /// Emission frequency (Hz)
    pub frequency_hz: f64,
    pub profile: MotionProfile,
    /// RNG seed, fixed for reproducible runs
    pub seed: u64,
    /// Whether the sensor reports itself available
    pub available: bool,
}

impl Default for MockMotionConfig {
    fn default() -> Self {
        Self {
            frequency_hz: 50.0,
            profile: MotionProfile::Steady,
            seed: 7,
            available: true,
        }
    }
}

/// Mock gyroscope
pub struct MockMotionSource {
    source_id: String,
    config: MockMotionConfig,
    listening: Arc<AtomicBool>,
}

impl MockMotionSource {
    pub fn new(source_id: impl Into<String>, config: MockMotionConfig) -> Self {
        Self {
            source_id: source_id.into(),
            config,
            listening: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Available source with the given profile and default rate
    pub fn with_profile(source_id: impl Into<String>, profile: MotionProfile, seed: u64) -> Self {
        Self::new(
            source_id,
            MockMotionConfig {
                profile,
                seed,
                ..Default::default()
            },
        )
    }

    /// Source that reports the sensor as missing
    pub fn unavailable(source_id: impl Into<String>) -> Self {
        Self::new(
            source_id,
            MockMotionConfig {
                available: false,
                ..Default::default()
            },
        )
    }
}

impl MotionSource for MockMotionSource {
    fn source_id(&self) -> &str {
        &self.source_id
    }

    fn is_available(&self) -> bool {
        self.config.available
    }

    fn listen(&self, callback: MotionEventCallback) {
        // Idempotent: if already listening, don't start again
        if self.listening.swap(true, Ordering::SeqCst) {
            return;
        }

        let source_id = self.source_id.clone();
        let config = self.config.clone();
        let listening = self.listening.clone();
        let interval = Duration::from_secs_f64(1.0 / config.frequency_hz);

        thread::spawn(move || {
            let mut rng = StdRng::seed_from_u64(config.seed);
            let started_at = now_ms();
            let mut emitted: u64 = 0;

            debug!(
                source_id = %source_id,
                profile = ?config.profile,
                frequency_hz = config.frequency_hz,
                "mock motion source started"
            );

            while listening.load(Ordering::Relaxed) {
                let timestamp_ms = now_ms();
                let angular_velocity = config
                    .profile
                    .sample(&mut rng, timestamp_ms - started_at);
                callback(MotionEvent {
                    angular_velocity,
                    timestamp_ms,
                });
                emitted += 1;

                trace!(source_id = %source_id, emitted, "mock motion event");
                thread::sleep(interval);
            }

            debug!(source_id = %source_id, emitted, "mock motion source stopped");
        });
    }

    fn stop(&self) {
        self.listening.store(false, Ordering::SeqCst);
    }

    fn is_listening(&self) -> bool {
        self.listening.load(Ordering::Relaxed)
    }
}
