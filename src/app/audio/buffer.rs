//! Reusable interleaved sample buffers.

use super::StreamFormat;

/// A fixed-length block of interleaved 16-bit samples.
///
/// Buffers are allocated once and then cycled through the pool. The sequence
/// number is stamped by the producer and increases by one per filled buffer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AudioBuffer {
    samples: Box<[i16]>,
    channels: usize,
    sequence: u64,
}

impl AudioBuffer {
    /// A silent buffer shaped by `format`.
    pub fn new(format: &StreamFormat) -> Self {
        Self {
            samples: vec![0; format.samples_per_buffer()].into_boxed_slice(),
            channels: format.channels,
            sequence: 0,
        }
    }

    pub fn samples(&self) -> &[i16] {
        &self.samples
    }

    pub fn samples_mut(&mut self) -> &mut [i16] {
        &mut self.samples
    }

    pub const fn channels(&self) -> usize {
        self.channels
    }

    pub fn frames(&self) -> usize {
        self.samples.len() / self.channels
    }

    /// Generation order of the buffer's current contents.
    pub const fn sequence(&self) -> u64 {
        self.sequence
    }

    pub(crate) fn set_sequence(&mut self, sequence: u64) {
        self.sequence = sequence;
    }

    /// Appends the samples to `out` as little-endian bytes.
    pub fn write_le_bytes(&self, out: &mut Vec<u8>) {
        out.reserve(self.samples.len() * 2);

        for s in self.samples.iter() {
            out.extend_from_slice(&s.to_le_bytes());
        }
    }
}
