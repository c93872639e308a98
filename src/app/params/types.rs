//! The live-controllable parameters.

use crate::error::ParamError;
use std::fmt::{Display, Formatter, Result};
use std::str::FromStr;

/// A named synthesis parameter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Param {
    /// Lowpass smoothing coefficient, in `(0, 1]`.
    Alpha,
    /// Injected tone frequency in Hz, `>= 0`.
    Pitch,
    /// Linear output gain, `>= 0`.
    Volume,
}

impl Param {
    pub const ALL: [Self; 3] = [Self::Alpha, Self::Pitch, Self::Volume];

    /// The name used by every control surface.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Alpha => "alpha",
            Self::Pitch => "pitch",
            Self::Volume => "volume",
        }
    }

    /// Checks `value` against the parameter's valid range.
    ///
    /// # Errors
    ///
    /// Returns [`ParamError::OutOfRange`] for non-finite values, for alpha
    /// outside `(0, 1]`, and for negative pitch or volume.
    pub fn validate(self, value: f64) -> std::result::Result<f64, ParamError> {
        let valid = value.is_finite()
            && match self {
                Self::Alpha => value > 0.0 && value <= 1.0,
                Self::Pitch | Self::Volume => value >= 0.0,
            };

        if valid {
            Ok(value)
        }
        else {
            Err(ParamError::OutOfRange {
                param: self,
                value,
                expected: self.expected_range(),
            })
        }
    }

    const fn expected_range(self) -> &'static str {
        match self {
            Self::Alpha => "in (0, 1]",
            Self::Pitch => "a finite frequency >= 0 Hz",
            Self::Volume => "a finite gain >= 0",
        }
    }
}

impl Display for Param {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Param {
    type Err = ParamError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "alpha" | "a" => Ok(Self::Alpha),
            "pitch" | "p" | "tone" => Ok(Self::Pitch),
            "volume" | "v" | "vol" | "gain" => Ok(Self::Volume),
            _ => Err(ParamError::Unknown(s.trim().to_string())),
        }
    }
}
