//! The generation side of the pipeline.

use super::*;
use crate::dsp::BrownNoiseGenerator;
use log::{debug, trace};
use std::thread::JoinHandle;

/// Takes free buffers, renders noise into them with a fresh parameter
/// snapshot per buffer, and queues them for playback in generation order.
pub struct Producer {
    generator: BrownNoiseGenerator,
    params: ParamStoreRef,
    end: ProducerEnd,
    stop: StopHandle,
    stats: Arc<PipelineStats>,
    next_sequence: u64,
}

impl Producer {
    pub fn new(
        generator: BrownNoiseGenerator,
        params: ParamStoreRef,
        end: ProducerEnd,
        stop: StopHandle,
        stats: Arc<PipelineStats>,
    ) -> Self {
        Self { generator, params, end, stop, stats, next_sequence: 0 }
    }

    /// Fills and queues one buffer, blocking while no free buffer is
    /// available. Returns `false` once the pipeline is shutting down.
    pub fn step(&mut self) -> bool {
        if self.stop.is_stopped() {
            return false;
        }

        let Some(mut buffer) = self.end.acquire() else {
            return false;
        };

        let params = self.params.snapshot();
        let channels = buffer.channels();

        self.generator
            .process_block(buffer.samples_mut(), channels, params);
        buffer.set_sequence(self.next_sequence);

        trace!("filled buffer {} with {params:?}", self.next_sequence);

        self.next_sequence += 1;
        self.stats.record_generated();

        self.end.submit(buffer)
    }

    /// Fills buffers until the pipeline shuts down.
    pub fn run(mut self) {
        debug!("producer started (seed {})", self.generator.seed());

        while self.step() {}

        debug!("producer stopped after {} buffers", self.next_sequence);
    }

    /// Runs the producer on a named thread.
    ///
    /// # Errors
    ///
    /// Returns an error if the thread could not be spawned.
    pub fn spawn(self) -> std::io::Result<JoinHandle<()>> {
        std::thread::Builder::new()
            .name(String::from("murmur-producer"))
            .spawn(move || self.run())
    }
}
