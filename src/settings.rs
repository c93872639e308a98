//! Global constants and default settings.

/// The default output sample rate, 44.1 kHz.
pub const SAMPLE_RATE: u32 = 44100;

/// The default number of output channels. The mono noise signal is copied to
/// every channel.
pub const NUM_CHANNELS: usize = 2;

/// Bit depth of every sample handed to a sink.
pub const BITS_PER_SAMPLE: u16 = 16;

/// The default duration of one pipeline buffer in milliseconds.
///
/// Parameter changes take effect at buffer boundaries, so this is also the
/// worst-case latency of a parameter update.
pub const BUFFER_DURATION_MS: u64 = 100;

/// The default number of buffers cycled between the producer and consumer.
pub const POOL_SIZE: usize = 4;

/// Default smoothing coefficient of the brown noise filter.
pub const DEFAULT_ALPHA: f64 = 0.01;
/// Default frequency of the injected tone. `0.0` disables the tone.
pub const DEFAULT_PITCH_HZ: f64 = 0.0;
/// Default output gain.
pub const DEFAULT_VOLUME: f64 = 1.0;

/// The smallest alpha the filter will run with. Anything below this reaching
/// the filter is raised to it.
pub const MIN_ALPHA: f64 = 1e-6;

/// Scale applied to a normalised sample when quantizing to 16 bits.
pub const I16_SCALE: f64 = 32767.0;

/// The default UDP port for OSC parameter control.
pub const DEFAULT_OSC_PORT: u16 = 9000;

/// Optional OSC address prefix, i.e. both `/alpha` and `/murmur/alpha` work.
pub const OSC_ADDRESS_PREFIX: &str = "/murmur";

/// How long the OSC thread sleeps when no packet is waiting.
pub const OSC_POLL_INTERVAL_MS: u64 = 5;

/// The number of chunks queued between the device sink and its render
/// callback. Writes block once this many chunks are waiting to be played.
pub const DEVICE_QUEUE_DEPTH: usize = 2;

/// The number of frames per device render callback.
pub const DEVICE_FRAMES_PER_BUFFER: usize = 512;

/// How often the pipeline status is logged, in Hz.
pub const STATUS_REPORT_RATE: f64 = 0.2;
