//! Posterior store — the mutable belief state of a QUEST+ run.
//!
//! Purpose
//! -------
//! Own the current posterior over the parameter grid together with the
//! per-trial (stimulus, response) history, and apply the Bayesian
//! conditioning step atomically.
//!
//! Key behaviors
//! -------------
//! - [`PosteriorStore::new`] starts from a normalized prior.
//! - [`PosteriorStore::condition`] multiplies the posterior by a likelihood
//!   slice, renormalizes, and records the trial. If the conditioned mass is
//!   zero (or non-finite) nothing is modified and
//!   `QPError::DegenerateLikelihood` is returned.
//!
//! Invariants & assumptions
//! ------------------------
//! - After construction and after every successful `condition`, the
//!   posterior is non-negative and sums to 1 within floating-point tolerance.
//! - The history grows by exactly one entry per successful `condition`; it is
//!   not replayed into the posterior.

use crate::procedure::TrialHistory;
use crate::questplus::errors::{QPError, QPResult};
use ndarray::{ArrayD, ArrayViewD};

/// Posterior over the parameter grid plus trial history.
#[derive(Debug, Clone, PartialEq)]
pub struct PosteriorStore<S> {
    posterior: ArrayD<f64>,
    history: TrialHistory<S>,
}

impl<S> PosteriorStore<S> {
    /// Start from `prior`, which the caller has already normalized.
    pub fn new(prior: ArrayD<f64>) -> Self {
        PosteriorStore { posterior: prior, history: TrialHistory::new() }
    }

    pub fn posterior(&self) -> &ArrayD<f64> {
        &self.posterior
    }

    pub fn history(&self) -> &TrialHistory<S> {
        &self.history
    }

    /// Condition the posterior on one observed trial.
    ///
    /// Parameters
    /// ----------
    /// - `likelihood`: `ArrayViewD<'_, f64>`
    ///   P(observed response | stimulus, θ) over the parameter grid; same
    ///   shape as the posterior.
    /// - `response`, `stimulus_index`, `stimulus`
    ///   The trial being recorded; the index is only used for error reporting.
    ///
    /// Errors
    /// ------
    /// - `QPError::DegenerateLikelihood` if `Σ posterior · likelihood` is not
    ///   a positive finite number. Posterior and history are left untouched.
    pub fn condition(
        &mut self, likelihood: ArrayViewD<'_, f64>, response: usize, stimulus_index: &[usize],
        stimulus: S,
    ) -> QPResult<()> {
        let mut updated = &self.posterior * &likelihood;
        let mass = updated.sum();
        if mass <= 0.0 || !mass.is_finite() {
            return Err(QPError::DegenerateLikelihood {
                response,
                stimulus_index: stimulus_index.to_vec(),
            });
        }
        updated /= mass;
        self.posterior = updated;
        self.history.push(stimulus, response);
        Ok(())
    }
}
