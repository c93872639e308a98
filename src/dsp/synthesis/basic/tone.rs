//! Continuous-phase sine tone injector.

use crate::prelude::*;

/// Adds a sine tone to a signal, driven by a sample counter that is never
/// reset, so the tone stays continuous across block boundaries.
#[derive(Debug, Clone, Copy)]
pub struct ToneInjector {
    phase: u64,
    sample_rate: f64,
}

impl ToneInjector {
    pub fn new(sample_rate: f64) -> Self {
        debug_assert!(sample_rate > 0.0);

        Self { phase: 0, sample_rate }
    }

    /// The number of samples processed so far (wrapping).
    pub const fn phase(&self) -> u64 {
        self.phase
    }

    /// Adds the tone at `pitch_hz` to `input` and advances the phase by one
    /// sample. A pitch of zero (or below) leaves `input` untouched, but the
    /// phase still advances.
    #[inline]
    pub fn process(&mut self, input: f64, pitch_hz: f64) -> f64 {
        let out = if pitch_hz > 0.0 {
            input + self.tone(pitch_hz)
        }
        else {
            input
        };

        self.phase = self.phase.wrapping_add(1);

        out
    }

    fn tone(&self, pitch_hz: f64) -> f64 {
        // only the fractional cycle matters, which keeps the argument small
        let cycles = pitch_hz * self.phase as f64 / self.sample_rate;

        (TAU * cycles.fract()).sin()
    }
}
