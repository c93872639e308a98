//! Module for signal generation.

use super::*;

pub mod basic;
pub mod brown_noise;

pub use basic::*;

pub use brown_noise::{BrownNoiseGenerator, SynthParams};
