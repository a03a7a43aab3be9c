//! QUEST+ inference engine — expected-entropy stimulus selection and
//! Bayesian posterior updates over a rank-generic grid.
//!
//! Purpose
//! -------
//! Drive a QUEST+ run once a grid model has tabulated its stimulus domain,
//! prior and likelihood: choose the stimulus whose outcome is expected to
//! leave the least posterior entropy, and condition the posterior on each
//! observed response.
//!
//! Key behaviors
//! -------------
//! - [`InferenceEngine::setup`] pulls the stimulus axes, prior and likelihood
//!   from a [`GridModel`] and validates them before any trial starts.
//! - [`InferenceEngine::next`] computes, for every stimulus combination `s`,
//!   `E[H | s] = Σ_r P(r | s) · H(θ | r, s)` and returns the minimizer.
//! - [`InferenceEngine::update`] snaps the presented stimulus onto the grid
//!   (per axis), slices the likelihood at the observed outcome and conditions
//!   the posterior.
//!
//! Invariants & assumptions
//! ------------------------
//! - Likelihood layout `[outcome, stimulus axes..., parameter axes...]`,
//!   posterior layout `[parameter axes...]`; checked once at setup.
//! - The posterior is non-negative and sums to 1 after setup and after every
//!   successful update.
//! - Entropy terms with zero (or undefined `0/0`) probability contribute 0.
//! - Ties in expected entropy resolve to the lowest row-major flat index over
//!   the stimulus axes, so selection is reproducible.
//! - `MinNEntropy` selects exactly like `MinEntropy`.
//!
//! Conventions
//! -----------
//! - The engine never terminates a run: `update` always reports `true` on
//!   success. Stopping is the caller's decision.
//! - Failed updates (bad response, bad stimulus, degenerate likelihood) leave
//!   the posterior, the history and the pending stimulus unchanged.
//!
//! Downstream usage
//! ----------------
//! - Wrapped by [`crate::questplus::QuestPlus`], which also owns the model.
//!   Use the engine directly when the grid comes from a custom
//!   [`GridModel`].
//!
//! Testing notes
//! -------------
//! - Unit tests below use a hand-built step-function model where the expected
//!   entropies can be reasoned about directly. Reference traces for the
//!   shipped models live in `tests/integration_questplus_pipeline.rs`.

use crate::{
    procedure::{Stimulus, TrialHistory},
    questplus::{
        core::{
            grid::{
                N_OUTCOMES, argmin_first, expand_trailing, neg_xlogx, sum_trailing_axes,
                unravel_index,
            },
            nearest::resolve_stimulus,
            options::{QuestPlusOptions, StimSelectionMethod},
            posterior::PosteriorStore,
            traits::GridModel,
            validation::{validate_domain, validate_likelihood},
        },
        errors::{QPError, QPResult},
    },
};
use ndarray::{Array1, ArrayD, Axis};
use tracing::{debug, trace, warn};

/// InferenceEngine — posterior, likelihood grid and selection state of one
/// QUEST+ run.
///
/// Fields
/// ------
/// - `stim_axes`: candidate values per stimulus dimension.
/// - `likelihoods`: `[2, stimulus axes..., parameter axes...]` grid.
/// - `store`: posterior and trial history.
/// - `joint`: scratch buffer shaped like `likelihoods`, reused by `next()`.
/// - `expected_entropy`: `E[H | s]` surface from the most recent selection.
/// - `pending`: stimulus returned by the most recent `next()`.
/// - `fresh`: whether `pending` was computed from the current posterior.
#[derive(Debug, Clone)]
pub struct InferenceEngine<S: Stimulus> {
    options: QuestPlusOptions,
    stim_axes: Vec<Array1<f64>>,
    likelihoods: ArrayD<f64>,
    store: PosteriorStore<S>,
    joint: ArrayD<f64>,
    expected_entropy: Option<ArrayD<f64>>,
    pending: Option<S>,
    fresh: bool,
}

impl<S: Stimulus> InferenceEngine<S> {
    /// Build an engine from a grid model.
    ///
    /// Parameters
    /// ----------
    /// - `model`: `&M`
    ///   Grid builder; each of its methods is called exactly once.
    /// - `options`: `QuestPlusOptions`
    ///   Selection configuration.
    ///
    /// Returns
    /// -------
    /// `QPResult<InferenceEngine<S>>`
    ///   Engine whose posterior equals the normalized prior.
    ///
    /// Errors
    /// ------
    /// - `QPError::StimulusDimMismatch` if the model returns a number of
    ///   stimulus axes different from `S::DIMS`.
    /// - `QPError::EmptyDomain` / `QPError::NonFiniteDomain` for a bad
    ///   stimulus axis.
    /// - `QPError::InvalidPriorWeight` / `QPError::ZeroPriorMass` if the prior
    ///   is not a valid unnormalized distribution.
    /// - Any error of [`validate_likelihood`].
    /// - Errors returned by the model's `generate_*` methods.
    pub fn setup<M>(model: &M, options: QuestPlusOptions) -> QPResult<Self>
    where
        M: GridModel<Stimulus = S>,
    {
        let stim_axes = model.make_stimuli();
        if stim_axes.len() != S::DIMS {
            return Err(QPError::StimulusDimMismatch { expected: S::DIMS, actual: stim_axes.len() });
        }
        for axis in &stim_axes {
            validate_domain("stimulus", &axis.to_vec())?;
        }

        let prior = normalize_prior(model.generate_prior()?)?;
        let likelihoods = model.generate_likelihoods()?;
        let stim_lens: Vec<usize> = stim_axes.iter().map(|a| a.len()).collect();
        validate_likelihood(&likelihoods, &stim_lens, prior.shape())?;

        if options.stim_selection == StimSelectionMethod::MinNEntropy {
            warn!(
                target: "questplus::engine",
                n = options.min_n_entropy.n,
                max_consecutive_reps = options.min_n_entropy.max_consecutive_reps,
                "MinNEntropy selection is not implemented; selecting by minimum entropy"
            );
        }
        debug!(
            target: "questplus::engine",
            stimulus_shape = ?stim_lens,
            param_shape = ?prior.shape(),
            grid_cells = likelihoods.len(),
            "questplus engine ready"
        );

        let joint = ArrayD::zeros(likelihoods.raw_dim());
        Ok(InferenceEngine {
            options,
            stim_axes,
            likelihoods,
            store: PosteriorStore::new(prior),
            joint,
            expected_entropy: None,
            pending: None,
            fresh: false,
        })
    }

    /// Select the stimulus that minimizes expected posterior entropy.
    ///
    /// Steps
    /// -----
    /// 1. `J = L · posterior` (posterior broadcast over outcome and stimulus
    ///    axes).
    /// 2. `pk = Σ_θ J`, the probability of each (outcome, stimulus) pair.
    /// 3. `J /= pk`, giving the candidate posterior after each pair.
    /// 4. `H = Σ_θ −J·ln J` with the zero-probability rule.
    /// 5. `E[H | s] = Σ_r pk · H`; return the first minimizer.
    ///
    /// Calling `next()` again without an intervening successful `update`
    /// returns the cached stimulus without recomputation.
    ///
    /// Errors
    /// ------
    /// - `QPError::EmptyDomain` if every expected entropy is NaN, which only
    ///   a malformed grid can produce.
    pub fn next(&mut self) -> QPResult<S> {
        if self.fresh {
            if let Some(stimulus) = self.pending {
                return Ok(stimulus);
            }
        }

        let n_params = self.store.posterior().ndim();
        self.joint.assign(&self.likelihoods);
        self.joint *= self.store.posterior();

        let pk = sum_trailing_axes(&self.joint.view(), n_params);
        self.joint /= &expand_trailing(pk.view(), n_params);
        self.joint.mapv_inplace(neg_xlogx);
        let entropy = sum_trailing_axes(&self.joint.view(), n_params);
        let expected = (&pk * &entropy).sum_axis(Axis(0));

        let flat =
            argmin_first(&expected.view()).ok_or(QPError::EmptyDomain { name: "stimulus" })?;
        let index = unravel_index(flat, expected.shape());
        let coords: Vec<f64> =
            index.iter().zip(&self.stim_axes).map(|(&i, axis)| axis[i]).collect();
        let stimulus = S::from_coords(&coords);

        debug!(
            target: "questplus::engine",
            flat_index = flat,
            expected_entropy = expected[index.as_slice()],
            stimulus = ?stimulus,
            "selected stimulus"
        );

        self.expected_entropy = Some(expected);
        self.pending = Some(stimulus);
        self.fresh = true;
        Ok(stimulus)
    }

    /// Condition the posterior on one observed response.
    ///
    /// Parameters
    /// ----------
    /// - `response`: `usize`
    ///   Outcome index, `0` = incorrect, `1` = correct.
    /// - `stimulus`: `Option<S>`
    ///   Presented stimulus; `None` uses the stimulus from the last `next()`.
    ///   Each coordinate is snapped to the nearest candidate on its own axis.
    ///
    /// Returns
    /// -------
    /// `QPResult<bool>`
    ///   Always `Ok(true)` on success; the engine never ends a run.
    ///
    /// Errors
    /// ------
    /// - `QPError::InvalidResponse` if `response >= 2`.
    /// - `QPError::NoPendingStimulus` if `stimulus` is `None` and `next()` was
    ///   never called.
    /// - `QPError::NonFiniteStimulus` for a NaN/±inf coordinate.
    /// - `QPError::DegenerateLikelihood` if the response has zero probability
    ///   under the whole posterior.
    ///
    /// All errors leave the engine state as it was before the call.
    pub fn update(&mut self, response: usize, stimulus: Option<S>) -> QPResult<bool> {
        if response >= N_OUTCOMES {
            return Err(QPError::InvalidResponse { response, n_outcomes: N_OUTCOMES });
        }
        let stimulus = stimulus.or(self.pending).ok_or(QPError::NoPendingStimulus)?;
        let stimulus_index = resolve_stimulus(&self.stim_axes, stimulus.coords())?;

        let mut slice = self.likelihoods.view().index_axis_move(Axis(0), response);
        for &i in &stimulus_index {
            slice = slice.index_axis_move(Axis(0), i);
        }
        self.store.condition(slice, response, &stimulus_index, stimulus)?;
        self.fresh = false;

        trace!(
            target: "questplus::engine",
            response,
            stimulus_index = ?stimulus_index,
            trial = self.store.history().len(),
            "posterior updated"
        );
        Ok(true)
    }

    pub fn options(&self) -> &QuestPlusOptions {
        &self.options
    }

    /// Current posterior over the parameter grid.
    pub fn posterior(&self) -> &ArrayD<f64> {
        self.store.posterior()
    }

    /// Likelihood grid `[outcome, stimulus axes..., parameter axes...]`.
    pub fn likelihoods(&self) -> &ArrayD<f64> {
        &self.likelihoods
    }

    /// Candidate values per stimulus dimension.
    pub fn stimulus_axes(&self) -> &[Array1<f64>] {
        &self.stim_axes
    }

    pub fn history(&self) -> &TrialHistory<S> {
        self.store.history()
    }

    /// `E[H | s]` over the stimulus grid from the most recent selection, or
    /// `None` before the first `next()`.
    pub fn expected_entropy(&self) -> Option<&ArrayD<f64>> {
        self.expected_entropy.as_ref()
    }
}

/// Check a model-supplied prior and scale it to sum 1.
fn normalize_prior(mut prior: ArrayD<f64>) -> QPResult<ArrayD<f64>> {
    for (index, &value) in prior.iter().enumerate() {
        if !value.is_finite() || value < 0.0 {
            return Err(QPError::InvalidPriorWeight { param: "prior", index, value });
        }
    }
    let total = prior.sum();
    if total <= 0.0 || !total.is_finite() {
        return Err(QPError::ZeroPriorMass);
    }
    prior /= total;
    Ok(prior)
}
