//! Stimulus scales shared by grid models and staircases.
//!
//! - [`Scale`] declares how stimulus values relate to physical intensity.
//!
//! Notes
//! -----
//! - For grid models the scale selects the exponent transform applied to the
//!   stimulus/threshold difference; for staircases it selects additive or
//!   multiplicative stepping.

use std::fmt;
use std::str::FromStr;

/// Scale of the stimulus values handed to a procedure.
///
/// Parsing:
/// This enum implements `FromStr` and accepts case-insensitive names
/// (`"db"`/`"decibel"`, `"linear"`, `"log10"`/`"log"`). Unknown names return
/// [`ScaleParseError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scale {
    /// Decibels; one unit is a factor of `10^(1/20)`.
    Decibel,
    /// Raw intensity.
    Linear,
    /// Base-10 logarithm of intensity.
    Log10,
}

impl Scale {
    /// Move `value` by `signed_step` units of this scale.
    ///
    /// - `Linear`: `value + step`
    /// - `Log10`: `value · 10^step`
    /// - `Decibel`: `value · 10^(step/20)`
    pub fn apply_step(&self, value: f64, signed_step: f64) -> f64 {
        match self {
            Scale::Linear => value + signed_step,
            Scale::Log10 => value * 10f64.powf(signed_step),
            Scale::Decibel => value * 10f64.powf(signed_step * 0.05),
        }
    }
}

impl fmt::Display for Scale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Scale::Decibel => "dB",
            Scale::Linear => "linear",
            Scale::Log10 => "log10",
        };
        write!(f, "{name}")
    }
}

/// Unknown scale name passed to [`Scale::from_str`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaleParseError {
    pub name: String,
}

impl std::error::Error for ScaleParseError {}

impl fmt::Display for ScaleParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid scale {:?}. Valid options are 'db', 'linear' or 'log10'.", self.name)
    }
}

impl FromStr for Scale {
    type Err = ScaleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "db" | "decibel" => Ok(Scale::Decibel),
            "linear" | "lin" => Ok(Scale::Linear),
            "log10" | "log" => Ok(Scale::Log10),
            _ => Err(ScaleParseError { name: s.to_string() }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Case-insensitive parsing of scale names and rejection of unknown ones.
    // - Additive vs multiplicative stepping for each scale.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify that parsing is case-insensitive and accepts the documented
    // aliases.
    //
    // Given
    // -----
    // - Mixed-case spellings of each scale.
    //
    // Expect
    // ------
    // - Each parses to the matching variant; "cubic" is rejected.
    fn scale_from_str_accepts_aliases_and_rejects_unknown() {
        assert_eq!("dB".parse::<Scale>(), Ok(Scale::Decibel));
        assert_eq!("LINEAR".parse::<Scale>(), Ok(Scale::Linear));
        assert_eq!("Log".parse::<Scale>(), Ok(Scale::Log10));
        assert_eq!("log10".parse::<Scale>(), Ok(Scale::Log10));

        let err = "cubic".parse::<Scale>().unwrap_err();
        assert!(err.to_string().contains("cubic"), "Got: {err}");
    }

    #[test]
    // Purpose
    // -------
    // Check the stepping rule of each scale against hand-computed values.
    //
    // Given
    // -----
    // - A value of 0.8 and a step of ±0.02 (log10) / ±20 (dB) / ±0.1 (linear).
    //
    // Expect
    // ------
    // - Linear adds, log10 and dB multiply by the matching power of ten.
    fn scale_apply_step_matches_definitions() {
        assert_relative_eq!(Scale::Linear.apply_step(0.8, -0.1), 0.7, epsilon = 1e-12);
        assert_relative_eq!(Scale::Log10.apply_step(0.8, -0.02), 0.763_994_068_817_148_8, epsilon = 1e-12);
        assert_relative_eq!(Scale::Decibel.apply_step(0.8, 20.0), 8.0, epsilon = 1e-12);
    }
}
