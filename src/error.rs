//! Error types for the pipeline, its sinks, and the parameter store.

use crate::app::params::Param;
use std::path::PathBuf;
use thiserror::Error;

/// A rejected parameter update. The store keeps its previous value.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParamError {
    #[error("unknown parameter \"{0}\"")]
    Unknown(String),

    #[error("malformed value \"{raw}\" for {param}")]
    Malformed { param: Param, raw: String },

    #[error("{param} must be {expected}, got {value}")]
    OutOfRange {
        param: Param,
        value: f64,
        expected: &'static str,
    },
}

/// Failures of an audio sink. All of them are fatal to the pipeline.
#[derive(Error, Debug)]
pub enum SinkError {
    #[error("audio device error: {0}")]
    Device(String),

    #[error("audio device stopped accepting buffers")]
    Disconnected,

    #[error("sink has already been closed")]
    Closed,

    #[error("unsupported stream format: {0}")]
    Unsupported(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("WAV encoding error: {0}")]
    Wav(#[from] hound::Error),
}

/// Failures of the producer/consumer pipeline.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("sink failed: {0}")]
    Sink(#[from] SinkError),

    #[error("invalid pipeline configuration: {0}")]
    InvalidConfig(String),

    #[error("buffer pool closed unexpectedly")]
    PoolClosed,

    #[error("buffer {got} reached the sink after buffer {previous}")]
    OutOfOrder { previous: u64, got: u64 },

    #[error("failed to spawn the generator thread: {0}")]
    Spawn(#[source] std::io::Error),

    #[error("generator thread panicked")]
    GeneratorPanicked,
}

/// Startup and top-level failures of the binary.
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error(transparent)]
    Sink(#[from] SinkError),

    #[error("invalid parameter: {0}")]
    Param(#[from] ParamError),

    #[error("failed to read preset {}: {source}", .path.display())]
    PresetIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid preset {}: {source}", .path.display())]
    PresetJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to start OSC control on port {port}: {source}")]
    Osc {
        port: u16,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to start the console: {0}")]
    Console(#[source] std::io::Error),

    #[error("invalid arguments: {0}")]
    Arguments(String),
}
