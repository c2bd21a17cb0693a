//! Motion recorder
//!
//! The sensor callback only forwards events into a bounded channel; a single
//! collector task owns the sample buffer and hands it over as a closed
//! `RecordingSession` when the recording ends.

use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use contracts::{
    MotionEvent, MotionEventCallback, MotionSample, MotionSource, RecorderConfig,
    RecordingSession,
};
use tokio::sync::mpsc::{self, error::TrySendError};
use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, trace, warn};

use crate::clock::now_ms;
use crate::error::{IngestionError, Result};
use crate::metrics::RecorderMetrics;

/// Why a recording stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// Caller requested stop
    Manual,
    /// Duration ceiling reached
    Ceiling,
    /// Source dropped its callback
    SourceClosed,
}

/// Stop state shared by the caller, the timer and the collector
struct StopControl {
    active: AtomicBool,
    stopped_at_ms: AtomicI64,
    notify: Notify,
    source: Arc<dyn MotionSource>,
}

impl StopControl {
    /// Flip active -> inactive exactly once; later calls return `false`
    fn trigger(&self, reason: StopReason) -> bool {
        if !self.active.swap(false, Ordering::SeqCst) {
            return false;
        }
        self.stopped_at_ms.store(now_ms(), Ordering::SeqCst);
        self.source.stop();
        self.notify.notify_one();
        debug!(source_id = %self.source.source_id(), ?reason, "motion recording stopped");
        true
    }

    fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    fn stopped_at_ms(&self) -> i64 {
        self.stopped_at_ms.load(Ordering::SeqCst)
    }
}

/// Motion recorder
///
/// One recording at a time. Construct with the recorder section of the
/// analysis profile.
pub struct MotionRecorder {
    config: RecorderConfig,
    metrics: Arc<RecorderMetrics>,
    busy: Arc<AtomicBool>,
}

impl MotionRecorder {
    pub fn new(config: RecorderConfig) -> Self {
        Self {
            config,
            metrics: Arc::new(RecorderMetrics::new()),
            busy: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Shared metrics handle
    pub fn metrics(&self) -> Arc<RecorderMetrics> {
        self.metrics.clone()
    }

    /// Whether a recording is in progress
    pub fn is_recording(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }

    /// Start recording from `source`
    ///
    /// Must be called within a tokio runtime.
    ///
    /// # Errors
    /// - `SensorUnavailable` when the source reports no sensor; nothing is registered
    /// - `AlreadyRecording` when a previous recording has not finished
    #[instrument(
        name = "recorder_start",
        skip(self, source),
        fields(source_id = %source.source_id())
    )]
    pub fn start(&self, source: Arc<dyn MotionSource>) -> Result<ActiveRecording> {
        if !source.is_available() {
            warn!("motion sensor unavailable, no session opened");
            return Err(IngestionError::SensorUnavailable {
                source_id: source.source_id().to_string(),
            });
        }

        if self.busy.swap(true, Ordering::SeqCst) {
            return Err(IngestionError::AlreadyRecording);
        }

        let started_at_ms = now_ms();
        let (tx, rx) = mpsc::channel(self.config.channel_capacity);
        let control = Arc::new(StopControl {
            active: AtomicBool::new(true),
            stopped_at_ms: AtomicI64::new(i64::MAX),
            notify: Notify::new(),
            source: source.clone(),
        });

        let callback: MotionEventCallback = {
            let control = control.clone();
            let metrics = self.metrics.clone();
            Arc::new(move |event: MotionEvent| {
                if !control.is_active() {
                    return;
                }
                metrics.record_received();
                match tx.try_send(event) {
                    Ok(()) => {}
                    Err(TrySendError::Full(_)) => {
                        metrics.record_dropped();
                        trace!("motion channel full, event dropped");
                    }
                    Err(TrySendError::Closed(_)) => {}
                }
            })
        };

        let collector = Collector {
            control: control.clone(),
            metrics: self.metrics.clone(),
            busy: self.busy.clone(),
            started_at_ms,
            max_duration: Duration::from_millis(self.config.max_duration_ms),
            max_samples: self.config.max_samples,
        };
        let handle = tokio::spawn(collector.run(rx));

        source.listen(callback);
        info!(
            started_at_ms,
            max_duration_ms = self.config.max_duration_ms,
            "motion recording started"
        );

        Ok(ActiveRecording {
            control,
            handle,
            started_at_ms,
        })
    }

    /// Record for `duration` and return the closed session
    ///
    /// Returns early when the collector closes first (ceiling or source end).
    pub async fn record_for(
        &self,
        source: Arc<dyn MotionSource>,
        duration: Duration,
    ) -> Result<RecordingSession> {
        let mut recording = self.start(source)?;
        let closed = tokio::select! {
            _ = tokio::time::sleep(duration) => None,
            joined = &mut recording.handle => Some(joined),
        };
        match closed {
            Some(joined) => joined.map_err(collector_failed),
            None => recording.stop_and_finish().await,
        }
    }
}

/// Handle to an in-progress recording
pub struct ActiveRecording {
    control: Arc<StopControl>,
    handle: JoinHandle<RecordingSession>,
    started_at_ms: i64,
}

impl ActiveRecording {
    /// Stop the recording
    ///
    /// Idempotent: returns `true` only for the call that actually stopped it,
    /// whether racing another `stop` or the ceiling timer.
    pub fn stop(&self) -> bool {
        self.control.trigger(StopReason::Manual)
    }

    pub fn is_active(&self) -> bool {
        self.control.is_active()
    }

    pub fn started_at_ms(&self) -> i64 {
        self.started_at_ms
    }

    /// Wait for the collector and take the closed session
    ///
    /// Without a prior `stop` this waits for the ceiling timer.
    pub async fn finish(self) -> Result<RecordingSession> {
        self.handle.await.map_err(collector_failed)
    }

    /// `stop` followed by `finish`
    pub async fn stop_and_finish(self) -> Result<RecordingSession> {
        self.stop();
        self.finish().await
    }
}

fn collector_failed(e: tokio::task::JoinError) -> IngestionError {
    IngestionError::CollectorFailed {
        message: e.to_string(),
    }
}

/// Collector task state, sole owner of the sample buffer
struct Collector {
    control: Arc<StopControl>,
    metrics: Arc<RecorderMetrics>,
    busy: Arc<AtomicBool>,
    started_at_ms: i64,
    max_duration: Duration,
    max_samples: usize,
}

impl Collector {
    async fn run(self, mut rx: mpsc::Receiver<MotionEvent>) -> RecordingSession {
        let mut session = RecordingSession::start(self.started_at_ms);
        let ceiling = tokio::time::sleep(self.max_duration);
        tokio::pin!(ceiling);

        loop {
            tokio::select! {
                _ = self.control.notify.notified() => break,
                _ = &mut ceiling => {
                    self.control.trigger(StopReason::Ceiling);
                    break;
                }
                event = rx.recv() => match event {
                    Some(event) => self.accept(&mut session, event),
                    None => {
                        self.control.trigger(StopReason::SourceClosed);
                        break;
                    }
                },
            }
        }

        // Drain what was queued before the stop
        rx.close();
        while let Ok(event) = rx.try_recv() {
            self.accept(&mut session, event);
        }

        session.close();
        self.metrics.record_session(session.len());
        ::metrics::counter!("sobriety_recorder_sessions_total").increment(1);
        ::metrics::histogram!("sobriety_recorder_session_samples").record(session.len() as f64);
        self.busy.store(false, Ordering::SeqCst);

        debug!(
            samples = session.len(),
            duration_ms = ?session.duration_ms(),
            "motion session closed"
        );
        session
    }

    fn accept(&self, session: &mut RecordingSession, event: MotionEvent) {
        if event.timestamp_ms > self.control.stopped_at_ms() {
            self.metrics.record_late();
            return;
        }
        if session.len() >= self.max_samples {
            self.metrics.record_dropped();
            return;
        }
        session.push(MotionSample::from(event));
    }
}
