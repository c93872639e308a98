//! The fixed shape of every buffer in a stream.

use crate::error::EngineError;
use crate::prelude::*;
use std::time::Duration;

/// Sample rate, channel layout and buffer length of a stream.
///
/// Sinks are opened with the format and every pipeline buffer has exactly
/// `frames_per_buffer * channels` interleaved 16-bit samples.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StreamFormat {
    pub sample_rate: u32,
    pub channels: usize,
    pub frames_per_buffer: usize,
}

impl StreamFormat {
    /// A format whose buffers last `buffer_duration`, rounded down to whole
    /// frames.
    ///
    /// # Errors
    ///
    /// Returns an error if any dimension is zero, or if the duration is too
    /// short to hold a single frame.
    pub fn new(
        sample_rate: u32,
        channels: usize,
        buffer_duration: Duration,
    ) -> Result<Self, EngineError> {
        let frames_per_buffer =
            (f64::from(sample_rate) * buffer_duration.as_secs_f64()) as usize;

        let format = Self { sample_rate, channels, frames_per_buffer };
        format.validate()?;

        Ok(format)
    }

    /// Checks that every dimension is non-zero.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidConfig`] naming the offending field.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.sample_rate == 0 {
            return Err(EngineError::InvalidConfig("sample rate is zero".into()));
        }
        if self.channels == 0 {
            return Err(EngineError::InvalidConfig("channel count is zero".into()));
        }
        if self.frames_per_buffer == 0 {
            return Err(EngineError::InvalidConfig(
                "buffer is shorter than one frame".into(),
            ));
        }

        Ok(())
    }

    pub const fn bits_per_sample(&self) -> u16 {
        BITS_PER_SAMPLE
    }

    /// Interleaved samples per buffer.
    pub const fn samples_per_buffer(&self) -> usize {
        self.frames_per_buffer * self.channels
    }

    /// Size of one buffer once byte-packed.
    pub const fn buffer_bytes(&self) -> usize {
        self.samples_per_buffer() * (BITS_PER_SAMPLE as usize / 8)
    }

    /// Playback time of one buffer.
    pub fn buffer_duration(&self) -> Duration {
        Duration::from_secs_f64(
            self.frames_per_buffer as f64 / f64::from(self.sample_rate),
        )
    }

    /// How many buffers cover at least `duration` of audio.
    pub fn buffers_for(&self, duration: Duration) -> u64 {
        let frames = duration.as_secs_f64() * f64::from(self.sample_rate);

        (frames / self.frames_per_buffer as f64).ceil() as u64
    }
}

impl Default for StreamFormat {
    fn default() -> Self {
        Self {
            sample_rate: SAMPLE_RATE,
            channels: NUM_CHANNELS,
            frames_per_buffer: SAMPLE_RATE as usize
                * BUFFER_DURATION_MS as usize
                / 1000,
        }
    }
}
