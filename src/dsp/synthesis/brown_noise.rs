//! Brown noise block generator.

use super::*;
use crate::dsp::{quantize, FilterState, OnePoleLowpass};
use std::fmt;

/// The synthesis parameters for one block.
///
/// A block is always rendered with a single snapshot, so a parameter change
/// lands on the next block boundary rather than part-way through a block.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SynthParams {
    /// Lowpass smoothing coefficient, in `(0, 1]`.
    pub alpha: f64,
    /// Frequency of the injected tone in Hz. `0.0` disables the tone.
    pub pitch_hz: f64,
    /// Linear output gain.
    pub volume: f64,
}

impl Default for SynthParams {
    fn default() -> Self {
        Self {
            alpha: DEFAULT_ALPHA,
            pitch_hz: DEFAULT_PITCH_HZ,
            volume: DEFAULT_VOLUME,
        }
    }
}

impl fmt::Display for SynthParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "alpha {}, pitch {} Hz, volume {}",
            self.alpha, self.pitch_hz, self.volume
        )
    }
}

/// Renders interleaved 16-bit brown noise, block after block.
///
/// Owns the noise oscillator, the lowpass [`FilterState`] and the tone phase,
/// so consecutive blocks join without discontinuities. Exactly one thread
/// should own a generator; parallel streams each need their own.
#[derive(Debug, Clone)]
pub struct BrownNoiseGenerator {
    noise: NoiseOsc,
    state: FilterState,
    tone: Option<ToneInjector>,
}

impl BrownNoiseGenerator {
    /// Creates a generator seeded from the system clock.
    pub fn new(sample_rate: f64) -> Self {
        Self::with_noise(NoiseOsc::new(), sample_rate)
    }

    /// Creates a generator with a fixed seed.
    pub fn with_seed(seed: u64, sample_rate: f64) -> Self {
        Self::with_noise(NoiseOsc::with_seed(seed), sample_rate)
    }

    fn with_noise(noise: NoiseOsc, sample_rate: f64) -> Self {
        Self {
            noise,
            state: FilterState::new(),
            tone: Some(ToneInjector::new(sample_rate)),
        }
    }

    /// Removes the tone injector entirely; the pitch parameter is then
    /// ignored.
    pub fn without_tone(mut self) -> Self {
        self.tone = None;
        self
    }

    /// The seed of the underlying noise oscillator.
    pub const fn seed(&self) -> u64 {
        self.noise.seed()
    }

    /// The filter state carried into the next block.
    pub const fn filter_state(&self) -> FilterState {
        self.state
    }

    /// Fills `block` with interleaved frames of `channels` samples each,
    /// copying the mono signal to every channel.
    ///
    /// # Panics
    ///
    /// Panics in debug builds if `channels` is zero or does not divide the
    /// block length.
    pub fn process_block(
        &mut self,
        block: &mut [i16],
        channels: usize,
        params: SynthParams,
    ) {
        debug_assert!(channels > 0 && block.len() % channels == 0);

        let filter = OnePoleLowpass::new(params.alpha);

        for frame in block.chunks_exact_mut(channels) {
            let white = self.noise.next();
            let mut sample = filter.process(&mut self.state, white);

            if let Some(tone) = &mut self.tone {
                sample = tone.process(sample, params.pitch_hz);
            }

            frame.fill(quantize(sample, params.volume));
        }
    }
}
