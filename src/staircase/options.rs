//! Staircase configuration.
//!
//! Purpose
//! -------
//! Hold the settings of a PsychoPy-style up/down staircase and validate them
//! before a run starts.
//!
//! Key behaviors
//! -------------
//! - [`StaircaseOptions::new`] fills the optional settings with their
//!   defaults: linear scale, reversal count derived from the step sizes, and
//!   no bounds.
//! - [`StaircaseOptions::validate`] rejects configurations the state machine
//!   cannot run.
//! - [`StaircaseOptions::required_reversals`] resolves the effective
//!   reversal target.

use crate::procedure::Scale;
use crate::staircase::errors::{StaircaseError, StaircaseResult};

/// Settings of an up/down staircase.
///
/// Fields
/// ------
/// - `start_val`: first stimulus value.
/// - `step_sizes`: step sizes; with more than one, the staircase moves to
///   the next entry at each reversal and stays on the last one.
/// - `n_trials`: minimum number of trials before stopping.
/// - `n_up`: consecutive incorrect responses before stepping up.
/// - `n_down`: consecutive correct responses before stepping down.
/// - `apply_initial_rule`: use a 1-up/1-down rule until the first reversal.
/// - `stim_scale`: stepping scale, default `Linear`.
/// - `n_reversals`: minimum number of reversals before stopping; defaults to
///   `step_sizes.len()` and is never less than it.
/// - `min_val` / `max_val`: optional bounds applied when stepping.
#[derive(Debug, Clone, PartialEq)]
pub struct StaircaseOptions {
    pub start_val: f64,
    pub step_sizes: Vec<f64>,
    pub n_trials: usize,
    pub n_up: usize,
    pub n_down: usize,
    pub apply_initial_rule: bool,
    pub stim_scale: Scale,
    pub n_reversals: Option<usize>,
    pub min_val: Option<f64>,
    pub max_val: Option<f64>,
}

impl StaircaseOptions {
    pub fn new(
        start_val: f64, step_sizes: Vec<f64>, n_trials: usize, n_up: usize, n_down: usize,
        apply_initial_rule: bool,
    ) -> Self {
        StaircaseOptions {
            start_val,
            step_sizes,
            n_trials,
            n_up,
            n_down,
            apply_initial_rule,
            stim_scale: Scale::Linear,
            n_reversals: None,
            min_val: None,
            max_val: None,
        }
    }

    /// Check the settings.
    ///
    /// Errors
    /// ------
    /// - `StaircaseError::EmptyStepSizes` / `InvalidStepSize` for bad steps.
    /// - `StaircaseError::NonFiniteStartValue` for a NaN/±inf start.
    /// - `StaircaseError::InvalidRuleCount` if `n_up` or `n_down` is 0.
    /// - `StaircaseError::InvalidBounds` if a bound is NaN or
    ///   `min_val > max_val`.
    pub fn validate(&self) -> StaircaseResult<()> {
        if self.step_sizes.is_empty() {
            return Err(StaircaseError::EmptyStepSizes);
        }
        for (index, &value) in self.step_sizes.iter().enumerate() {
            if !value.is_finite() || value <= 0.0 {
                return Err(StaircaseError::InvalidStepSize { index, value });
            }
        }
        if !self.start_val.is_finite() {
            return Err(StaircaseError::NonFiniteStartValue { value: self.start_val });
        }
        if self.n_up == 0 {
            return Err(StaircaseError::InvalidRuleCount { name: "n_up", value: self.n_up });
        }
        if self.n_down == 0 {
            return Err(StaircaseError::InvalidRuleCount { name: "n_down", value: self.n_down });
        }
        let min = self.min_val.unwrap_or(f64::NEG_INFINITY);
        let max = self.max_val.unwrap_or(f64::INFINITY);
        if min.is_nan() || max.is_nan() || min > max {
            return Err(StaircaseError::InvalidBounds { min, max });
        }
        Ok(())
    }

    /// Reversals required before the staircase may stop.
    pub fn required_reversals(&self) -> usize {
        match self.n_reversals {
            Some(n) => n.max(self.step_sizes.len()),
            None => self.step_sizes.len(),
        }
    }
}
