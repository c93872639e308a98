//! Conversion from normalised floating-point samples to 16-bit integers.

use crate::prelude::*;

/// Scales `sample` by `gain`, maps `1.0` to full scale, rounds to the nearest
/// integer and saturates to the `i16` range. Never wraps.
#[inline]
pub fn quantize(sample: f64, gain: f64) -> i16 {
    let scaled = (sample * gain * I16_SCALE).round();

    // NaN saturates to 0 in the cast below
    scaled.clamp(f64::from(i16::MIN), f64::from(i16::MAX)) as i16
}

/// Converts a 16-bit sample back to the normalised `-1.0..1.0` range used by
/// device streams.
#[inline]
pub fn i16_to_f32(sample: i16) -> f32 {
    f32::from(sample) / 32768.0
}
