//! Wires the pool, producer and consumer together.

use super::*;
use crate::app::sink::AudioSink;
use crate::dsp::BrownNoiseGenerator;
use crate::error::EngineError;
use log::{error, info};
use std::sync::atomic::AtomicBool;

/// A cooperative stop signal, checked by both pipeline threads at every
/// buffer boundary.
#[derive(Clone, Debug, Default)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests a stop. Each pipeline thread exits at its next buffer
    /// boundary; a thread blocked on the sink finishes that write first.
    pub fn stop(&self) {
        self.0.sr(true);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.lr()
    }

    pub(crate) fn reset(&self) {
        self.0.sr(false);
    }
}

/// Pipeline configuration, fixed for the lifetime of an [`Engine`].
#[derive(Clone, Debug)]
pub struct EngineConfig {
    pub format: StreamFormat,
    /// Number of buffers cycled through the pipeline.
    pub pool_size: usize,
    /// Noise seed; `None` seeds from the clock.
    pub seed: Option<u64>,
    /// Stop after this many buffers have been played.
    pub max_buffers: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            format: StreamFormat::default(),
            pool_size: POOL_SIZE,
            seed: None,
            max_buffers: None,
        }
    }
}

/// Streams brown noise from a generator thread to a sink on the calling
/// thread, through a fixed pool of buffers.
pub struct Engine {
    config: EngineConfig,
    params: ParamStoreRef,
    stop: StopHandle,
    stats: Arc<PipelineStats>,
}

impl Engine {
    /// # Errors
    ///
    /// Returns an error if the stream format or the pool size is invalid.
    pub fn new(
        config: EngineConfig,
        params: ParamStoreRef,
    ) -> Result<Self, EngineError> {
        config.format.validate()?;

        if config.pool_size == 0 {
            return Err(EngineError::InvalidConfig("buffer pool is empty".into()));
        }

        Ok(Self {
            config,
            params,
            stop: StopHandle::new(),
            stats: Arc::new(PipelineStats::new()),
        })
    }

    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn params(&self) -> ParamStoreRef {
        Arc::clone(&self.params)
    }

    /// A handle which stops [`run()`](Self::run) from any thread.
    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    pub fn stats(&self) -> Arc<PipelineStats> {
        Arc::clone(&self.stats)
    }

    /// Streams into `sink` until stopped, until the buffer limit is reached,
    /// or until the sink fails. The sink is driven from the calling thread
    /// and is finished and handed back on a clean exit.
    ///
    /// Each call is a fresh stream: the stop signal and the stats are cleared
    /// on entry, and the buffer limit applies to this call alone.
    ///
    /// # Errors
    ///
    /// Returns an error if the sink's format differs from the engine's, if
    /// the sink fails (fatal, never retried), or if the generator thread
    /// cannot be started or panics.
    pub fn run<S: AudioSink>(&self, sink: S) -> Result<S, EngineError> {
        if sink.format() != &self.config.format {
            return Err(EngineError::InvalidConfig(format!(
                "sink format {:?} does not match stream format {:?}",
                sink.format(),
                self.config.format
            )));
        }

        self.stop.reset();
        self.stats.reset();

        let pool = BufferPool::new(self.config.pool_size, &self.config.format)?;
        let (producer_end, consumer_end) = pool.split();

        let sample_rate = f64::from(self.config.format.sample_rate);
        let generator = match self.config.seed {
            Some(seed) => BrownNoiseGenerator::with_seed(seed, sample_rate),
            None => BrownNoiseGenerator::new(sample_rate),
        };

        info!(
            "streaming {} Hz, {} ch, {} frames per buffer, {} buffers (seed {})",
            self.config.format.sample_rate,
            self.config.format.channels,
            self.config.format.frames_per_buffer,
            self.config.pool_size,
            generator.seed(),
        );

        let producer = Producer::new(
            generator,
            Arc::clone(&self.params),
            producer_end,
            self.stop.clone(),
            Arc::clone(&self.stats),
        )
        .spawn()
        .map_err(EngineError::Spawn)?;

        let mut consumer = Consumer::new(
            sink,
            consumer_end,
            self.stop.clone(),
            Arc::clone(&self.stats),
        )
        .with_limit(self.config.max_buffers);

        let played = consumer.run();

        // releasing the consumer's end of the pool unblocks the producer
        let mut sink = consumer.into_sink();
        let joined = producer.join();

        if let Err(e) = played {
            error!("pipeline stopped: {e}");
            return Err(e);
        }

        if joined.is_err() {
            return Err(EngineError::GeneratorPanicked);
        }

        sink.finish()?;

        info!(
            "pipeline finished: {} buffers generated, {} played",
            self.stats.generated(),
            self.stats.played()
        );

        Ok(sink)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::params::ParamStore;
    use crate::app::sink::MemorySink;

    fn config(max_buffers: u64) -> EngineConfig {
        EngineConfig {
            format: StreamFormat {
                sample_rate: 8000,
                channels: 2,
                frames_per_buffer: 100,
            },
            pool_size: 3,
            seed: Some(77),
            max_buffers: Some(max_buffers),
        }
    }

    #[test]
    fn rejects_an_empty_pool() {
        let cfg = EngineConfig { pool_size: 0, ..config(1) };
        assert!(Engine::new(cfg, Arc::new(ParamStore::new())).is_err());
    }

    #[test]
    fn rejects_a_mismatched_sink() {
        let engine = Engine::new(config(1), Arc::new(ParamStore::new())).unwrap();
        let sink = MemorySink::new(StreamFormat::default());

        assert!(matches!(
            engine.run(sink),
            Err(EngineError::InvalidConfig(_))
        ));
    }

    #[test]
    fn plays_the_requested_number_of_buffers() {
        let engine = Engine::new(config(10), Arc::new(ParamStore::new())).unwrap();
        let sink = engine.run(MemorySink::new(config(10).format)).unwrap();

        assert_eq!(sink.sequences(), (0..10).collect::<Vec<_>>());
        assert!(sink.is_finished());
        assert_eq!(engine.stats().played(), 10);
    }

    #[test]
    fn same_seed_same_stream() {
        let a = Engine::new(config(5), Arc::new(ParamStore::new()))
            .unwrap()
            .run(MemorySink::new(config(5).format))
            .unwrap();
        let b = Engine::new(config(5), Arc::new(ParamStore::new()))
            .unwrap()
            .run(MemorySink::new(config(5).format))
            .unwrap();

        assert_eq!(a.samples(), b.samples());
    }

    #[test]
    fn runs_again_after_finishing() {
        let engine = Engine::new(config(5), Arc::new(ParamStore::new())).unwrap();

        let first = engine.run(MemorySink::new(config(5).format)).unwrap();
        let second = engine.run(MemorySink::new(config(5).format)).unwrap();

        assert_eq!(first.sequences().len(), 5);
        assert_eq!(second.sequences(), first.sequences());
        assert_eq!(second.samples(), first.samples());
        assert_eq!(engine.stats().played(), 5);
    }

    #[test]
    fn runs_again_after_a_stop() {
        let engine = Engine::new(config(3), Arc::new(ParamStore::new())).unwrap();
        engine.stop_handle().stop();

        let sink = engine.run(MemorySink::new(config(3).format)).unwrap();
        assert_eq!(sink.sequences().len(), 3);
    }

    #[test]
    fn stop_handle_ends_the_stream() {
        let cfg = EngineConfig { max_buffers: None, ..config(0) };
        let engine = Engine::new(cfg.clone(), Arc::new(ParamStore::new())).unwrap();
        let stop = engine.stop_handle();

        let sink = MemorySink::new(cfg.format).on_write(move |count| {
            if count == 4 {
                stop.stop();
            }
        });

        let sink = engine.run(sink).unwrap();
        assert_eq!(sink.sequences().len(), 4);
    }
}
