//! The playback side of the pipeline.

use super::*;
use crate::app::sink::AudioSink;
use crate::error::EngineError;
use log::{debug, trace};

/// Takes filled buffers in generation order, writes each one to the sink and
/// recycles it.
pub struct Consumer<S: AudioSink> {
    sink: S,
    end: ConsumerEnd,
    stop: StopHandle,
    stats: Arc<PipelineStats>,
    last_sequence: Option<u64>,
    played: u64,
    limit: Option<u64>,
}

impl<S: AudioSink> Consumer<S> {
    pub fn new(
        sink: S,
        end: ConsumerEnd,
        stop: StopHandle,
        stats: Arc<PipelineStats>,
    ) -> Self {
        Self {
            sink,
            end,
            stop,
            stats,
            last_sequence: None,
            played: 0,
            limit: None,
        }
    }

    /// Stops after this consumer has written `limit` buffers.
    pub fn with_limit(mut self, limit: Option<u64>) -> Self {
        self.limit = limit;
        self
    }

    /// Plays one buffer, blocking on the filled queue and then on the sink.
    /// Returns `Ok(false)` once the pipeline is shutting down.
    ///
    /// # Errors
    ///
    /// Returns an error if the sink rejects the buffer, or if buffers arrive
    /// out of generation order.
    pub fn step(&mut self) -> Result<bool, EngineError> {
        if self.stop.is_stopped() || self.limit_reached() {
            return Ok(false);
        }

        let Some(buffer) = self.end.next_filled() else {
            return Ok(false);
        };

        let sequence = buffer.sequence();

        if let Some(previous) = self.last_sequence {
            if sequence <= previous {
                return Err(EngineError::OutOfOrder { previous, got: sequence });
            }
        }

        let peak = analysis::peak_level(buffer.samples(), buffer.channels());
        trace!("playing buffer {sequence}, peak {peak:.3}");

        self.sink.write(&buffer)?;

        self.last_sequence = Some(sequence);
        self.played += 1;
        self.stats.record_played(peak);

        Ok(self.end.recycle(buffer))
    }

    /// Plays buffers until the pipeline shuts down, the limit is reached, or
    /// the sink fails.
    ///
    /// # Errors
    ///
    /// See [`step()`](Self::step).
    pub fn run(&mut self) -> Result<(), EngineError> {
        debug!("consumer started");

        while self.step()? {}

        debug!("consumer stopped after {} buffers", self.played);

        Ok(())
    }

    /// Consumes the consumer, releasing its end of the pool and returning the
    /// sink.
    pub fn into_sink(self) -> S {
        self.sink
    }

    fn limit_reached(&self) -> bool {
        self.limit.is_some_and(|limit| self.played >= limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::sink::MemorySink;
    use crate::error::SinkError;

    fn format() -> StreamFormat {
        StreamFormat { sample_rate: 8000, channels: 1, frames_per_buffer: 4 }
    }

    struct FailingSink(StreamFormat);

    impl AudioSink for FailingSink {
        fn format(&self) -> &StreamFormat {
            &self.0
        }

        fn write(&mut self, _: &AudioBuffer) -> Result<(), SinkError> {
            Err(SinkError::Disconnected)
        }
    }

    fn fill(producer: &ProducerEnd, sequences: &[u64]) {
        for &seq in sequences {
            let mut buffer = producer.acquire().unwrap();
            buffer.set_sequence(seq);
            assert!(producer.submit(buffer));
        }
    }

    #[test]
    fn writes_and_recycles() {
        let (producer, consumer_end) = BufferPool::new(2, &format()).unwrap().split();
        let stats = Arc::new(PipelineStats::new());
        let mut consumer = Consumer::new(
            MemorySink::new(format()),
            consumer_end,
            StopHandle::new(),
            Arc::clone(&stats),
        );

        fill(&producer, &[0, 1]);
        assert!(consumer.step().unwrap());
        assert!(consumer.step().unwrap());

        assert_eq!(stats.played(), 2);
        assert_eq!(producer.free_len(), 2);
        assert_eq!(consumer.into_sink().sequences(), [0, 1]);
    }

    #[test]
    fn sink_failure_is_fatal() {
        let (producer, consumer_end) = BufferPool::new(1, &format()).unwrap().split();
        let mut consumer = Consumer::new(
            FailingSink(format()),
            consumer_end,
            StopHandle::new(),
            Arc::new(PipelineStats::new()),
        );

        fill(&producer, &[0]);

        assert!(matches!(
            consumer.run(),
            Err(EngineError::Sink(SinkError::Disconnected))
        ));
    }

    #[test]
    fn rejects_out_of_order_buffers() {
        let (producer, consumer_end) = BufferPool::new(2, &format()).unwrap().split();
        let mut consumer = Consumer::new(
            MemorySink::new(format()),
            consumer_end,
            StopHandle::new(),
            Arc::new(PipelineStats::new()),
        );

        fill(&producer, &[5, 3]);

        assert!(consumer.step().unwrap());
        assert!(matches!(
            consumer.step(),
            Err(EngineError::OutOfOrder { previous: 5, got: 3 })
        ));
    }

    #[test]
    fn honours_the_limit() {
        let (producer, consumer_end) = BufferPool::new(3, &format()).unwrap().split();
        let mut consumer = Consumer::new(
            MemorySink::new(format()),
            consumer_end,
            StopHandle::new(),
            Arc::new(PipelineStats::new()),
        )
        .with_limit(Some(2));

        fill(&producer, &[0, 1, 2]);
        consumer.run().unwrap();

        assert_eq!(consumer.into_sink().sequences(), [0, 1]);
    }

    #[test]
    fn limit_ignores_buffers_played_elsewhere() {
        let (producer, consumer_end) = BufferPool::new(2, &format()).unwrap().split();
        let stats = Arc::new(PipelineStats::new());
        for _ in 0..10 {
            stats.record_played(0.0);
        }

        let mut consumer = Consumer::new(
            MemorySink::new(format()),
            consumer_end,
            StopHandle::new(),
            stats,
        )
        .with_limit(Some(2));

        fill(&producer, &[0, 1]);
        consumer.run().unwrap();

        assert_eq!(consumer.into_sink().sequences(), [0, 1]);
    }

    #[test]
    fn returns_when_the_producer_is_gone() {
        let (producer, consumer_end) = BufferPool::new(2, &format()).unwrap().split();
        let mut consumer = Consumer::new(
            MemorySink::new(format()),
            consumer_end,
            StopHandle::new(),
            Arc::new(PipelineStats::new()),
        );

        fill(&producer, &[0]);
        drop(producer);

        // the queued buffer is still played before the consumer returns
        consumer.run().unwrap();
        assert_eq!(consumer.into_sink().sequences(), [0]);
    }
}
