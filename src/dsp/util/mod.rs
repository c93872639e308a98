//! DSP utility functions.

pub mod quantize;

pub use quantize::{i16_to_f32, quantize};
