//! Playback on the default output device.

use super::*;
use crate::app::audio::PipelineStats;
use crate::dsp::i16_to_f32;
use crate::prelude::*;
use log::{debug, warn};
use nannou_audio::{Buffer, Host, Stream};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// State owned by the device's render callback.
///
/// Chunks of converted audio arrive through `chunks` and go back through
/// `spare` once played, so the callback never allocates.
struct DeviceFeed {
    chunks: CCReceiver<Vec<f32>>,
    spare: CCSender<Vec<f32>>,
    current: Option<Vec<f32>>,
    pos: usize,
    primed: bool,
    closing: Arc<AtomicBool>,
    stats: Arc<PipelineStats>,
}

impl DeviceFeed {
    fn next_sample(&mut self) -> Option<f32> {
        loop {
            if let Some(chunk) = &self.current {
                if let Some(&s) = chunk.get(self.pos) {
                    self.pos += 1;
                    return Some(s);
                }
            }

            if let Some(done) = self.current.take() {
                _ = self.spare.try_send(done);
            }

            let chunk = self.chunks.try_recv().ok()?;
            self.current = Some(chunk);
            self.pos = 0;
            self.primed = true;
        }
    }
}

fn render(feed: &mut DeviceFeed, buffer: &mut Buffer) {
    let mut starved = false;

    for out in buffer.iter_mut() {
        *out = feed.next_sample().unwrap_or_else(|| {
            starved = true;
            0.0
        });
    }

    if starved && feed.primed && !feed.closing.lr() {
        feed.stats.record_underrun();
    }
}

/// Streams to the default output device.
///
/// Each write converts the buffer to `f32` and queues it for the render
/// callback, blocking while [`DEVICE_QUEUE_DEPTH`] chunks are already
/// waiting. The device clock therefore paces the pipeline.
pub struct DeviceSink {
    stream: Stream<DeviceFeed>,
    format: StreamFormat,
    chunks: CCSender<Vec<f32>>,
    spare: CCReceiver<Vec<f32>>,
    closing: Arc<AtomicBool>,
    stats: Arc<PipelineStats>,
    reported_underruns: u64,
}

impl DeviceSink {
    /// Opens and starts a stream on the default output device.
    ///
    /// # Errors
    ///
    /// Returns an error if the device rejects the format or fails to start.
    pub fn open(
        format: StreamFormat,
        stats: Arc<PipelineStats>,
    ) -> Result<Self, SinkError> {
        let (chunk_tx, chunk_rx) = bounded_channel(DEVICE_QUEUE_DEPTH);
        let (spare_tx, spare_rx) = bounded_channel(DEVICE_QUEUE_DEPTH);

        for _ in 0..DEVICE_QUEUE_DEPTH {
            spare_tx
                .try_send(Vec::with_capacity(format.samples_per_buffer()))
                .map_err(|_| SinkError::Closed)?;
        }

        let closing = Arc::new(AtomicBool::new(false));

        let feed = DeviceFeed {
            chunks: chunk_rx,
            spare: spare_tx,
            current: None,
            pos: 0,
            primed: false,
            closing: Arc::clone(&closing),
            stats: Arc::clone(&stats),
        };

        let host = Host::new();
        let stream = host
            .new_output_stream(feed)
            .render(render)
            .channels(format.channels)
            .sample_rate(format.sample_rate)
            .frames_per_buffer(DEVICE_FRAMES_PER_BUFFER)
            .build()
            .map_err(|e| SinkError::Device(e.to_string()))?;

        stream.play().map_err(|e| SinkError::Device(e.to_string()))?;

        debug!(
            "opened output device at {} Hz, {} channels",
            format.sample_rate, format.channels
        );

        Ok(Self {
            stream,
            format,
            chunks: chunk_tx,
            spare: spare_rx,
            closing,
            stats,
            reported_underruns: 0,
        })
    }

    fn report_underruns(&mut self) {
        let underruns = self.stats.underruns();

        if underruns > self.reported_underruns {
            warn!("device underrun ({underruns} so far)");
            self.reported_underruns = underruns;
        }
    }
}

impl AudioSink for DeviceSink {
    fn format(&self) -> &StreamFormat {
        &self.format
    }

    fn write(&mut self, buffer: &AudioBuffer) -> Result<(), SinkError> {
        let mut chunk = self.spare.recv().map_err(|_| SinkError::Disconnected)?;

        chunk.clear();
        chunk.extend(buffer.samples().iter().map(|&s| i16_to_f32(s)));

        self.chunks.send(chunk).map_err(|_| SinkError::Disconnected)?;
        self.report_underruns();

        Ok(())
    }

    /// Waits for queued audio to play out, then pauses the stream.
    fn finish(&mut self) -> Result<(), SinkError> {
        self.closing.sr(true);

        let queued = DEVICE_QUEUE_DEPTH as u32 + 1;
        let deadline = Instant::now() + self.format.buffer_duration() * queued;

        while self.spare.len() < DEVICE_QUEUE_DEPTH {
            if Instant::now() >= deadline {
                warn!("output device did not drain before shutdown");
                break;
            }
            std::thread::sleep(Duration::from_millis(5));
        }

        self.stream.pause().map_err(|e| SinkError::Device(e.to_string()))
    }
}
