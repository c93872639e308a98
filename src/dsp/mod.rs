//! Signal generation and sample conversion.

use crate::prelude::*;

pub mod filtering;
pub mod synthesis;
pub mod util;

pub use filtering::{FilterState, OnePoleLowpass};
pub use synthesis::{BrownNoiseGenerator, NoiseOsc, SynthParams, ToneInjector};
pub use util::*;
