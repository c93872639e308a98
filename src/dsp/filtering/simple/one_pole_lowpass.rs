//! One-pole lowpass filter, used to shape white noise into brown noise.

use crate::prelude::*;

/// The only state the lowpass carries between blocks: its last output.
///
/// This is the link that keeps the noise continuous across buffer
/// boundaries, so it must be threaded through every block in order and never
/// reset while a stream is running.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FilterState {
    last_sample: f64,
}

impl FilterState {
    /// A state at rest (`0.0`).
    pub const fn new() -> Self {
        Self { last_sample: 0.0 }
    }

    /// The filter output at the end of the previous block.
    pub const fn last_sample(&self) -> f64 {
        self.last_sample
    }
}

/// Exponential moving average lowpass, `y[n] = a * x[n] + (1 - a) * y[n - 1]`.
///
/// The filter itself only holds the coefficient; the running output lives in
/// a [`FilterState`] owned by the caller. Smaller coefficients give heavier
/// smoothing, and so darker noise.
#[derive(Clone, Copy, Debug)]
pub struct OnePoleLowpass {
    a0: f64,
    b1: f64,
}

impl OnePoleLowpass {
    /// Returns a new `OnePoleLowpass` with the smoothing coefficient `alpha`.
    ///
    /// `alpha` is clamped to `MIN_ALPHA..=1.0` (see
    /// [`sanitize_alpha()`](Self::sanitize_alpha)), so the recursion can
    /// never become unstable.
    pub fn new(alpha: f64) -> Self {
        let a0 = Self::sanitize_alpha(alpha);

        Self { a0, b1: 1.0 - a0 }
    }

    /// Returns a filter with identity coefficients (i.e., the input is
    /// unaltered).
    pub fn identity() -> Self {
        Self::new(1.0)
    }

    /// Forces `alpha` into `MIN_ALPHA..=1.0`. NaN maps to
    /// [`DEFAULT_ALPHA`].
    pub fn sanitize_alpha(alpha: f64) -> f64 {
        if alpha.is_nan() {
            return DEFAULT_ALPHA;
        }

        alpha.clamp(MIN_ALPHA, 1.0)
    }

    /// The coefficient in use.
    pub const fn alpha(&self) -> f64 {
        self.a0
    }

    /// Processes a single sample, advancing `state`.
    #[inline]
    pub fn process(&self, state: &mut FilterState, input: f64) -> f64 {
        state.last_sample = self.a0 * input + self.b1 * state.last_sample;
        state.last_sample
    }
}
