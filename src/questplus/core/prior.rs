//! Parameter domains and prior construction.
//!
//! Purpose
//! -------
//! Describe one parameter dimension of a psychometric model (its candidate
//! values and optional prior weights) and combine several of them into the
//! joint, normalized prior grid the engine starts from.
//!
//! Key behaviors
//! -------------
//! - [`ParamDomain`] carries candidate values plus an optional weight vector;
//!   a missing weight vector means uniform weight.
//! - [`build_prior`] validates every domain first and only then forms the
//!   outer product of the per-dimension weights, normalized to sum 1.
//!
//! Invariants & assumptions
//! ------------------------
//! - The prior has rank `domains.len()`, with axis `i` of length
//!   `domains[i].1.values.len()`.
//! - Weights only need to be finite and non-negative; they are not required to
//!   sum to 1 individually.
//!
//! Testing notes
//! -------------
//! - Unit tests cover uniform and weighted priors, the length-mismatch guard,
//!   and rejection of negative or all-zero weights.

use crate::questplus::{
    core::{grid::axis_vector, validation::validate_domain},
    errors::{QPError, QPResult},
};
use ndarray::{ArrayD, IxDyn};

/// One parameter dimension: candidate values and optional prior weights.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamDomain {
    pub values: Vec<f64>,
    pub prior: Option<Vec<f64>>,
}

impl ParamDomain {
    /// Domain with uniform prior weight.
    pub fn new(values: Vec<f64>) -> Self {
        ParamDomain { values, prior: None }
    }

    /// Domain with explicit prior weights, one per value.
    pub fn with_prior(values: Vec<f64>, prior: Vec<f64>) -> Self {
        ParamDomain { values, prior: Some(prior) }
    }

    /// Single-valued domain, used for parameters held fixed.
    pub fn fixed(value: f64) -> Self {
        ParamDomain { values: vec![value], prior: None }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Validate values and, when present, prior weights.
    ///
    /// Errors
    /// ------
    /// - `QPError::EmptyDomain` / `QPError::NonFiniteDomain` from the values.
    /// - `QPError::PriorLengthMismatch` if the weights and values differ in
    ///   length.
    /// - `QPError::InvalidPriorWeight` for a negative or non-finite weight.
    pub fn validate(&self, name: &'static str) -> QPResult<()> {
        validate_domain(name, &self.values)?;
        if let Some(weights) = &self.prior {
            if weights.len() != self.values.len() {
                return Err(QPError::PriorLengthMismatch {
                    param: name,
                    expected: self.values.len(),
                    actual: weights.len(),
                });
            }
            for (index, &value) in weights.iter().enumerate() {
                if !value.is_finite() || value < 0.0 {
                    return Err(QPError::InvalidPriorWeight { param: name, index, value });
                }
            }
        }
        Ok(())
    }

    /// Prior weights, falling back to uniform weight 1 per value.
    pub fn weights(&self) -> Vec<f64> {
        match &self.prior {
            Some(weights) => weights.clone(),
            None => vec![1.0; self.values.len()],
        }
    }
}

/// Build the normalized joint prior over the given parameter dimensions.
///
/// Parameters
/// ----------
/// - `domains`: `&[(&'static str, &ParamDomain)]`
///   Parameter dimensions in axis order, each tagged with the name used in
///   error messages.
///
/// Returns
/// -------
/// `QPResult<ArrayD<f64>>`
///   Rank-`domains.len()` grid with entry `[i₁, …, i_D] ∝ Π_d w_d[i_d]`,
///   summing to 1.
///
/// Errors
/// ------
/// - Any error of [`ParamDomain::validate`], reported before any array is
///   allocated.
/// - `QPError::ZeroPriorMass` if the product of weights sums to zero.
pub fn build_prior(domains: &[(&'static str, &ParamDomain)]) -> QPResult<ArrayD<f64>> {
    for &(name, domain) in domains {
        domain.validate(name)?;
    }

    let rank = domains.len();
    let shape: Vec<usize> = domains.iter().map(|(_, d)| d.len()).collect();
    let mut prior = ArrayD::<f64>::ones(IxDyn(&shape));
    for (axis, (_, domain)) in domains.iter().enumerate() {
        prior *= &axis_vector(&domain.weights(), axis, rank);
    }

    let total = prior.sum();
    if total <= 0.0 || !total.is_finite() {
        return Err(QPError::ZeroPriorMass);
    }
    prior /= total;
    Ok(prior)
}
