//! Recorder metrics

use std::sync::atomic::{AtomicU64, Ordering};

/// Lock-free recorder counters, shared between the sensor callback and the collector
#[derive(Debug, Default)]
pub struct RecorderMetrics {
    /// Events delivered by the sensor callback
    pub events_received: AtomicU64,

    /// Events dropped because the channel was full or the buffer cap was hit
    pub events_dropped: AtomicU64,

    /// Events stamped after the stop instant
    pub events_late: AtomicU64,

    /// Samples handed over in closed sessions
    pub samples_recorded: AtomicU64,

    /// Sessions closed
    pub sessions_completed: AtomicU64,
}

impl RecorderMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_received(&self) {
        self.events_received.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_dropped(&self) {
        self.events_dropped.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_late(&self) {
        self.events_late.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a closed session of `samples` samples
    pub fn record_session(&self, samples: usize) {
        self.samples_recorded
            .fetch_add(samples as u64, Ordering::Relaxed);
        self.sessions_completed.fetch_add(1, Ordering::Relaxed);
    }

    /// Get snapshot
    pub fn snapshot(&self) -> RecorderMetricsSnapshot {
        RecorderMetricsSnapshot {
            events_received: self.events_received.load(Ordering::Relaxed),
            events_dropped: self.events_dropped.load(Ordering::Relaxed),
            events_late: self.events_late.load(Ordering::Relaxed),
            samples_recorded: self.samples_recorded.load(Ordering::Relaxed),
            sessions_completed: self.sessions_completed.load(Ordering::Relaxed),
        }
    }
}

/// Metrics snapshot
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecorderMetricsSnapshot {
    pub events_received: u64,
    pub events_dropped: u64,
    pub events_late: u64,
    pub samples_recorded: u64,
    pub sessions_completed: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_counts() {
        let metrics = RecorderMetrics::new();
        metrics.record_received();
        metrics.record_received();
        metrics.record_dropped();
        metrics.record_session(42);

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.events_received, 2);
        assert_eq!(snapshot.events_dropped, 1);
        assert_eq!(snapshot.events_late, 0);
        assert_eq!(snapshot.samples_recorded, 42);
        assert_eq!(snapshot.sessions_completed, 1);
    }
}
