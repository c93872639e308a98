//! The double-buffered audio pipeline.
//!
//! A producer thread renders noise into free buffers; the consumer, on the
//! caller's thread, writes filled buffers to a sink and recycles them. The
//! two only share the pool's queues.

use crate::prelude::*;
use std::sync::Arc;

pub mod buffer;
pub mod consumer;
pub mod engine;
pub mod format;
pub mod pool;
pub mod producer;
pub mod stats;

pub use buffer::AudioBuffer;
pub use consumer::Consumer;
pub use engine::{Engine, EngineConfig, StopHandle};
pub use format::StreamFormat;
pub use pool::{BufferPool, ConsumerEnd, ProducerEnd};
pub use producer::Producer;
pub use stats::{PipelineStats, StatusReporter};
