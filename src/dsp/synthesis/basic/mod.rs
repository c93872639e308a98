//! Primitive oscillator types.

pub mod noise_osc;
pub mod tone;

pub use noise_osc::NoiseOsc;
pub use tone::ToneInjector;
