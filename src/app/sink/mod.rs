//! Destinations for rendered audio.
//!
//! A sink is opened with the stream's format and then receives every buffer
//! in order through a blocking [`AudioSink::write`]. The time a write blocks
//! for is what paces the whole pipeline.

use crate::app::audio::{AudioBuffer, StreamFormat};
use crate::error::SinkError;
use std::time::Duration;

pub mod device;
pub mod raw;
pub mod wav;

pub use device::DeviceSink;
pub use raw::RawSink;
pub use wav::WavSink;

pub trait AudioSink {
    /// The format the sink was opened with.
    fn format(&self) -> &StreamFormat;

    /// Writes one buffer, blocking until the sink has accepted it.
    ///
    /// # Errors
    ///
    /// Any error is fatal to the stream; the buffer is not retried.
    fn write(&mut self, buffer: &AudioBuffer) -> Result<(), SinkError>;

    /// Flushes anything still pending. Called once after the last write.
    ///
    /// # Errors
    ///
    /// Returns an error if pending audio could not be written out.
    fn finish(&mut self) -> Result<(), SinkError> {
        Ok(())
    }
}

impl<S: AudioSink + ?Sized> AudioSink for Box<S> {
    fn format(&self) -> &StreamFormat {
        (**self).format()
    }

    fn write(&mut self, buffer: &AudioBuffer) -> Result<(), SinkError> {
        (**self).write(buffer)
    }

    fn finish(&mut self) -> Result<(), SinkError> {
        (**self).finish()
    }
}

/// Keeps everything written to it in memory.
pub struct MemorySink {
    format: StreamFormat,
    samples: Vec<i16>,
    sequences: Vec<u64>,
    delay: Option<Duration>,
    on_write: Option<Box<dyn FnMut(u64) + Send>>,
    finished: bool,
}

impl MemorySink {
    pub fn new(format: StreamFormat) -> Self {
        Self {
            format,
            samples: Vec::new(),
            sequences: Vec::new(),
            delay: None,
            on_write: None,
            finished: false,
        }
    }

    /// Makes every write take at least `delay`, like a device would.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Calls `f` after each write with the number of buffers written so far.
    pub fn on_write<F>(mut self, f: F) -> Self
    where
        F: FnMut(u64) + Send + 'static,
    {
        self.on_write = Some(Box::new(f));
        self
    }

    /// Every sample written, in order.
    pub fn samples(&self) -> &[i16] {
        &self.samples
    }

    /// The sequence number of each buffer written, in order.
    pub fn sequences(&self) -> &[u64] {
        &self.sequences
    }

    pub const fn is_finished(&self) -> bool {
        self.finished
    }
}

impl AudioSink for MemorySink {
    fn format(&self) -> &StreamFormat {
        &self.format
    }

    fn write(&mut self, buffer: &AudioBuffer) -> Result<(), SinkError> {
        if self.finished {
            return Err(SinkError::Closed);
        }

        if let Some(delay) = self.delay {
            std::thread::sleep(delay);
        }

        self.samples.extend_from_slice(buffer.samples());
        self.sequences.push(buffer.sequence());

        if let Some(f) = self.on_write.as_mut() {
            f(self.sequences.len() as u64);
        }

        Ok(())
    }

    fn finish(&mut self) -> Result<(), SinkError> {
        self.finished = true;
        Ok(())
    }
}
