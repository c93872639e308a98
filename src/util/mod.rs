//! Global utilities, re-exported in `prelude.rs`.

pub mod analysis;
pub mod atomic_ops;
pub mod timer;

pub use atomic_ops::AtomicOps;
pub use timer::TimerThread;

/// Calculates amplitude in decibels from a linear power level.
#[inline]
pub fn level_to_db(level: f64) -> f64 {
    20.0 * level.log10()
}

/// Checks whether `a` and `b` are within `tolerance` of each other.
#[inline]
pub fn within_tolerance(a: f64, b: f64, tolerance: f64) -> bool {
    (a - b).abs() <= tolerance
}
