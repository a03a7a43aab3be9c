//! staircase::errors — error type for up/down staircases.
//!
//! Purpose
//! -------
//! Report invalid staircase configuration at construction time and invalid
//! per-trial input or calls made after the staircase has finished.
//!
//! Conventions
//! -----------
//! - Configuration variants are returned by `Staircase::new`; only
//!   `InvalidResponse` and `Finished` can occur during a run.
//! - With the `python-bindings` feature every variant maps to a
//!   `PyValueError` carrying the `Display` text.

#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

pub type StaircaseResult<T> = Result<T, StaircaseError>;

/// Errors raised by [`crate::staircase::Staircase`].
#[derive(Debug, Clone, PartialEq)]
pub enum StaircaseError {
    // ---- Invalid configuration ----
    /// `step_sizes` has no entries.
    EmptyStepSizes,

    /// A step size is non-finite or not strictly positive.
    InvalidStepSize { index: usize, value: f64 },

    /// The start value is NaN/±inf.
    NonFiniteStartValue { value: f64 },

    /// A bound is NaN or `min_val > max_val`.
    InvalidBounds { min: f64, max: f64 },

    /// `n_up` or `n_down` is zero.
    InvalidRuleCount { name: &'static str, value: usize },

    // ---- Invalid per-trial input / state ----
    /// Response is neither 0 nor 1.
    InvalidResponse { response: usize },

    /// The termination criteria were met; no further trials are available.
    Finished,
}

impl std::error::Error for StaircaseError {}

impl std::fmt::Display for StaircaseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StaircaseError::EmptyStepSizes => {
                write!(f, "step_sizes must contain at least one value.")
            }
            StaircaseError::InvalidStepSize { index, value } => write!(
                f,
                "Step size at index {index} must be finite and > 0; got: {value}"
            ),
            StaircaseError::NonFiniteStartValue { value } => {
                write!(f, "start_val must be finite; got: {value}")
            }
            StaircaseError::InvalidBounds { min, max } => write!(
                f,
                "Invalid bounds: min_val ({min}) must not exceed max_val ({max}) and neither may be NaN."
            ),
            StaircaseError::InvalidRuleCount { name, value } => {
                write!(f, "{name} must be at least 1; got: {value}")
            }
            StaircaseError::InvalidResponse { response } => {
                write!(f, "The response {response} is invalid; expected 0 (incorrect) or 1 (correct).")
            }
            StaircaseError::Finished => write!(f, "The staircase has already finished."),
        }
    }
}

#[cfg(feature = "python-bindings")]
impl From<StaircaseError> for PyErr {
    fn from(err: StaircaseError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}
