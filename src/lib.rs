#![allow(
    clippy::module_name_repetitions,
    clippy::wildcard_imports,
    clippy::return_self_not_must_use,
    clippy::redundant_closure_for_method_calls
)]

// Pipeline, sinks and control surfaces
pub mod app;

// Signal generation
pub mod dsp;

// Error types
pub mod error;

// General utilities
pub mod util;

// Some widely-used re-exports
pub mod prelude;

// Program-wide settings
pub mod settings;

pub use error::{AppError, EngineError, ParamError, SinkError};
