//! questplus::errors — error type for grid construction and inference.
//!
//! Purpose
//! -------
//! Provide the error enum and result alias used by every QUEST+ routine:
//! parameter-domain and prior validation, likelihood-grid checks at engine
//! setup, response/stimulus validation during updates, and the degenerate
//! posterior condition.
//!
//! Key behaviors
//! -------------
//! - Define [`QPResult`] and [`QPError`] as the canonical result and error
//!   types of the `questplus` subtree.
//! - Attach human-readable `Display` messages that embed the offending value
//!   or index.
//! - With the `python-bindings` feature, map every variant into a
//!   `PyValueError` carrying the `Display` text.
//!
//! Invariants & assumptions
//! ------------------------
//! - Misconfiguration (domain, prior or grid shape problems) is reported by
//!   constructors, before any trial starts. Later calls only fail on bad
//!   per-trial input or a degenerate likelihood.
//! - No variant is transient; nothing in this subtree retries.
//!
//! Conventions
//! -----------
//! - Variants are grouped by class: invalid argument, invalid state, and
//!   degenerate likelihood.
//! - Grid indices in payloads are 0-based and ordered
//!   `[outcome, stimulus axes..., parameter axes...]` when they address the
//!   likelihood grid.

#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

use crate::procedure::Scale;

pub type QPResult<T> = Result<T, QPError>;

/// Unified error type for QUEST+ grid procedures.
#[derive(Debug, Clone, PartialEq)]
pub enum QPError {
    // ---- Invalid argument: per-trial input ----
    /// Response index is not a valid outcome.
    InvalidResponse { response: usize, n_outcomes: usize },

    /// A presented stimulus coordinate is NaN/±inf.
    NonFiniteStimulus { dim: usize, value: f64 },

    // ---- Invalid argument: domains and priors ----
    /// A stimulus or parameter domain has no candidate values.
    EmptyDomain { name: &'static str },

    /// A domain value is NaN/±inf.
    NonFiniteDomain { name: &'static str, index: usize, value: f64 },

    /// Prior weights and parameter values differ in length.
    PriorLengthMismatch { param: &'static str, expected: usize, actual: usize },

    /// Prior weight is negative or non-finite.
    InvalidPriorWeight { param: &'static str, index: usize, value: f64 },

    /// Every prior weight is zero, so the prior cannot be normalized.
    ZeroPriorMass,

    /// The model formula is not defined for this stimulus scale.
    UnsupportedScale { model: &'static str, scale: Scale },

    // ---- Invalid argument: grid setup ----
    /// Number of stimulus axes differs from the stimulus type's dimension.
    StimulusDimMismatch { expected: usize, actual: usize },

    /// A grid does not have the shape implied by the domains.
    ShapeMismatch { what: &'static str, expected: Vec<usize>, actual: Vec<usize> },

    /// Likelihood entry is non-finite or outside [0, 1].
    InvalidLikelihood { index: Vec<usize>, value: f64 },

    /// Outcome probabilities at one (stimulus, parameter) cell do not sum to 1.
    LikelihoodNotComplementary { index: Vec<usize>, sum: f64 },

    // ---- Invalid argument: configuration parsing ----
    /// Unknown stimulus-selection method name.
    InvalidSelectionMethod { name: String },

    /// Unknown parameter-estimation method name.
    InvalidEstimationMethod { name: String },

    /// Unknown stimulus scale name.
    InvalidScale { name: String },

    // ---- Invalid state ----
    /// `update` was called without a stimulus before any `next`.
    NoPendingStimulus,

    // ---- Degenerate likelihood ----
    /// The observed response has zero likelihood under the whole posterior.
    DegenerateLikelihood { response: usize, stimulus_index: Vec<usize> },
}

impl std::error::Error for QPError {}

impl std::fmt::Display for QPError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QPError::InvalidResponse { response, n_outcomes } => {
                write!(f, "The response {response} is outside the valid range [0, {n_outcomes}).")
            }
            QPError::NonFiniteStimulus { dim, value } => {
                write!(f, "Stimulus value on dimension {dim} is non-finite: {value}")
            }
            QPError::EmptyDomain { name } => {
                write!(f, "Domain '{name}' must contain at least one value.")
            }
            QPError::NonFiniteDomain { name, index, value } => {
                write!(f, "Domain '{name}' value at index {index} is non-finite: {value}")
            }
            QPError::PriorLengthMismatch { param, expected, actual } => write!(
                f,
                "The prior and parameter domain sizes must match for '{param}': expected {expected}, got {actual}."
            ),
            QPError::InvalidPriorWeight { param, index, value } => write!(
                f,
                "Prior weight for '{param}' at index {index} must be finite and >= 0; got: {value}"
            ),
            QPError::ZeroPriorMass => {
                write!(f, "Prior weights sum to zero; at least one weight must be positive.")
            }
            QPError::UnsupportedScale { model, scale } => {
                write!(f, "Stimulus scale '{scale}' is not implemented for {model}.")
            }
            QPError::StimulusDimMismatch { expected, actual } => {
                write!(f, "Expected {expected} stimulus dimension(s), got {actual}.")
            }
            QPError::ShapeMismatch { what, expected, actual } => {
                write!(f, "{what} has shape {actual:?}, expected {expected:?}.")
            }
            QPError::InvalidLikelihood { index, value } => write!(
                f,
                "Likelihood at index {index:?} must be a probability in [0, 1]; got: {value}"
            ),
            QPError::LikelihoodNotComplementary { index, sum } => write!(
                f,
                "Outcome probabilities at index {index:?} must sum to 1; got: {sum}"
            ),
            QPError::InvalidSelectionMethod { name } => write!(
                f,
                "Invalid stimulus selection method {name:?}. Valid options are 'min_entropy' or 'min_n_entropy'."
            ),
            QPError::InvalidEstimationMethod { name } => write!(
                f,
                "Invalid parameter estimation method {name:?}. Valid options are 'mean', 'median' or 'mode'."
            ),
            QPError::InvalidScale { name } => {
                write!(f, "Invalid scale {name:?}. Valid options are 'db', 'linear' or 'log10'.")
            }
            QPError::NoPendingStimulus => write!(
                f,
                "No stimulus to update with: call next() first or pass the presented stimulus."
            ),
            QPError::DegenerateLikelihood { response, stimulus_index } => write!(
                f,
                "Response {response} at stimulus index {stimulus_index:?} has zero likelihood under the posterior."
            ),
        }
    }
}

impl From<crate::procedure::ScaleParseError> for QPError {
    fn from(err: crate::procedure::ScaleParseError) -> Self {
        QPError::InvalidScale { name: err.name }
    }
}

#[cfg(feature = "python-bindings")]
impl From<QPError> for PyErr {
    fn from(err: QPError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}
