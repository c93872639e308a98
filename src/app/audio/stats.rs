//! Pipeline counters and periodic status logging.

use crate::prelude::*;
use log::debug;
use std::sync::atomic::{AtomicU64, Ordering::Relaxed};
use std::sync::Arc;

/// Counters shared by the producer, the consumer and the sinks.
#[derive(Debug, Default)]
pub struct PipelineStats {
    generated: AtomicU64,
    played: AtomicU64,
    underruns: AtomicU64,
    last_peak: AtomicF64,
}

impl PipelineStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Buffers filled by the producer.
    pub fn generated(&self) -> u64 {
        self.generated.lr()
    }

    /// Buffers accepted by the sink.
    pub fn played(&self) -> u64 {
        self.played.lr()
    }

    /// Device callbacks that found no audio ready.
    pub fn underruns(&self) -> u64 {
        self.underruns.lr()
    }

    /// Buffers generated but not yet accepted by the sink.
    pub fn in_flight(&self) -> u64 {
        self.generated().saturating_sub(self.played())
    }

    /// Peak level of the most recently played buffer, `0.0..=1.0`.
    pub fn last_peak(&self) -> f64 {
        self.last_peak.lr()
    }

    /// Zeroes every counter.
    pub(crate) fn reset(&self) {
        self.generated.sr(0);
        self.played.sr(0);
        self.underruns.sr(0);
        self.last_peak.sr(0.0);
    }

    pub(crate) fn record_generated(&self) {
        self.generated.fetch_add(1, Relaxed);
    }

    pub(crate) fn record_played(&self, peak: f64) {
        self.played.fetch_add(1, Relaxed);
        self.last_peak.sr(peak);
    }

    pub(crate) fn record_underrun(&self) {
        self.underruns.fetch_add(1, Relaxed);
    }
}

/// Logs a status line for a [`PipelineStats`] at a fixed rate until dropped.
pub struct StatusReporter {
    timer: TimerThread,
}

impl StatusReporter {
    pub fn start(stats: Arc<PipelineStats>, rate_hz: f64) -> Self {
        let mut timer = TimerThread::new(move || {
            debug!(
                "status: {} generated, {} played, {} in flight, {} underruns, peak {:.1} dBFS",
                stats.generated(),
                stats.played(),
                stats.in_flight(),
                stats.underruns(),
                level_to_db(stats.last_peak()),
            );
        });

        timer.start_hz(rate_hz);

        Self { timer }
    }

    pub fn stop(&mut self) {
        self.timer.stop();
    }
}
