//! questplus::core::validation — construction-time guards for grids.
//!
//! Purpose
//! -------
//! Centralize the checks that must pass before a QUEST+ procedure starts:
//! candidate domains are non-empty and finite, and the likelihood grid has
//! the layout and probability semantics the engine relies on.
//!
//! Key behaviors
//! -------------
//! - [`validate_domain`] rejects empty or non-finite candidate vectors.
//! - [`validate_likelihood`] checks the grid shape against the stimulus axes
//!   and the prior, that every entry is a probability, and that the two
//!   outcomes are complementary cell by cell.
//!
//! Invariants & assumptions
//! ------------------------
//! - Called once at setup; every error is an invalid-argument condition and
//!   surfaces before the first trial.

use crate::questplus::core::grid::N_OUTCOMES;
use crate::questplus::errors::{QPError, QPResult};
use ndarray::{ArrayD, Axis, Dimension};

/// Absolute tolerance for `L[0] + L[1] == 1`.
pub const COMPLEMENT_TOL: f64 = 1e-9;

/// Validate a candidate-value vector.
///
/// Errors
/// ------
/// - `QPError::EmptyDomain` if `values` is empty.
/// - `QPError::NonFiniteDomain` for the first NaN/±inf entry.
pub fn validate_domain(name: &'static str, values: &[f64]) -> QPResult<()> {
    if values.is_empty() {
        return Err(QPError::EmptyDomain { name });
    }
    for (index, &value) in values.iter().enumerate() {
        if !value.is_finite() {
            return Err(QPError::NonFiniteDomain { name, index, value });
        }
    }
    Ok(())
}

/// Validate a likelihood grid against the stimulus axes and the prior shape.
///
/// Parameters
/// ----------
/// - `likelihoods`: `&ArrayD<f64>`
///   Candidate grid `[outcome, stimulus axes..., parameter axes...]`.
/// - `stim_lens`: `&[usize]`
///   Number of candidates on each stimulus axis.
/// - `param_shape`: `&[usize]`
///   Shape of the prior / posterior.
///
/// Errors
/// ------
/// - `QPError::ShapeMismatch` if the grid shape is not
///   `[2, stim_lens..., param_shape...]`.
/// - `QPError::InvalidLikelihood` for a non-finite entry or one outside
///   [0, 1].
/// - `QPError::LikelihoodNotComplementary` if the two outcomes of a cell do
///   not sum to 1 within [`COMPLEMENT_TOL`].
pub fn validate_likelihood(
    likelihoods: &ArrayD<f64>, stim_lens: &[usize], param_shape: &[usize],
) -> QPResult<()> {
    let mut expected = Vec::with_capacity(1 + stim_lens.len() + param_shape.len());
    expected.push(N_OUTCOMES);
    expected.extend_from_slice(stim_lens);
    expected.extend_from_slice(param_shape);
    if likelihoods.shape() != expected.as_slice() {
        return Err(QPError::ShapeMismatch {
            what: "likelihood grid",
            expected,
            actual: likelihoods.shape().to_vec(),
        });
    }

    for (index, &value) in likelihoods.indexed_iter() {
        if !value.is_finite() || !(0.0..=1.0).contains(&value) {
            return Err(QPError::InvalidLikelihood { index: index.slice().to_vec(), value });
        }
    }

    let total = likelihoods.sum_axis(Axis(0));
    for (index, &sum) in total.indexed_iter() {
        if (sum - 1.0).abs() > COMPLEMENT_TOL {
            return Err(QPError::LikelihoodNotComplementary { index: index.slice().to_vec(), sum });
        }
    }
    Ok(())
}
