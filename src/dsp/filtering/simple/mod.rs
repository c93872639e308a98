//! Simple recursive filters.

pub mod one_pole_lowpass;
