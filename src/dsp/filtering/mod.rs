//! Module for time domain filters.

pub mod simple;

pub use simple::one_pole_lowpass::{FilterState, OnePoleLowpass};
