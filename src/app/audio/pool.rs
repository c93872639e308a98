//! The fixed set of buffers cycled between the producer and the consumer.

use super::{AudioBuffer, StreamFormat};
use crate::error::EngineError;
use crate::prelude::*;

/// Owns `size` buffers and the two queues they move through: free buffers
/// waiting to be filled, and filled buffers waiting to be played.
///
/// Both queues are bounded to the pool size, so no buffer is ever allocated
/// after construction. The pool is [split](Self::split) into a producer end
/// and a consumer end, each owned by one thread.
pub struct BufferPool {
    free_tx: CCSender<AudioBuffer>,
    free_rx: CCReceiver<AudioBuffer>,
    filled_tx: CCSender<AudioBuffer>,
    filled_rx: CCReceiver<AudioBuffer>,
    size: usize,
}

impl BufferPool {
    /// Allocates `size` silent buffers and places them in the free queue.
    ///
    /// # Errors
    ///
    /// Returns an error if `size` is zero or `format` has a zero dimension.
    pub fn new(size: usize, format: &StreamFormat) -> Result<Self, EngineError> {
        format.validate()?;

        if size == 0 {
            return Err(EngineError::InvalidConfig("buffer pool is empty".into()));
        }

        let (free_tx, free_rx) = bounded_channel(size);
        let (filled_tx, filled_rx) = bounded_channel(size);

        for _ in 0..size {
            free_tx
                .try_send(AudioBuffer::new(format))
                .map_err(|_| EngineError::PoolClosed)?;
        }

        Ok(Self { free_tx, free_rx, filled_tx, filled_rx, size })
    }

    pub const fn size(&self) -> usize {
        self.size
    }

    /// Splits the pool into its producer and consumer ends.
    ///
    /// When either end is dropped, the other observes a closed queue once it
    /// has drained whatever is left in it.
    pub fn split(self) -> (ProducerEnd, ConsumerEnd) {
        (
            ProducerEnd { free: self.free_rx, filled: self.filled_tx },
            ConsumerEnd { filled: self.filled_rx, free: self.free_tx },
        )
    }
}

/// The producer's view of the pool.
pub struct ProducerEnd {
    free: CCReceiver<AudioBuffer>,
    filled: CCSender<AudioBuffer>,
}

impl ProducerEnd {
    /// Takes a free buffer, blocking until one is recycled. Returns `None`
    /// once the consumer end is gone and no free buffers remain.
    pub fn acquire(&self) -> Option<AudioBuffer> {
        self.free.recv().ok()
    }

    /// Queues a filled buffer for playback. Returns `false` if the consumer
    /// end is gone.
    pub fn submit(&self, buffer: AudioBuffer) -> bool {
        self.filled.send(buffer).is_ok()
    }

    /// Free buffers currently waiting.
    pub fn free_len(&self) -> usize {
        self.free.len()
    }
}

/// The consumer's view of the pool.
pub struct ConsumerEnd {
    filled: CCReceiver<AudioBuffer>,
    free: CCSender<AudioBuffer>,
}

impl ConsumerEnd {
    /// Takes the oldest filled buffer, blocking until one is ready. Returns
    /// `None` once the producer end is gone and the queue is drained.
    pub fn next_filled(&self) -> Option<AudioBuffer> {
        self.filled.recv().ok()
    }

    /// Returns a played buffer to the free queue. Returns `false` if the
    /// producer end is gone.
    pub fn recycle(&self, buffer: AudioBuffer) -> bool {
        self.free.send(buffer).is_ok()
    }

    /// Filled buffers currently waiting.
    pub fn filled_len(&self) -> usize {
        self.filled.len()
    }
}
