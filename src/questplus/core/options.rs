//! QUEST+ options — stimulus-selection and estimation configuration.
//!
//! Purpose
//! -------
//! Collect the procedure-level knobs of a QUEST+ run that are independent of
//! the psychometric model: how the next stimulus is chosen, which parameter
//! estimate is requested, and the settings of the `MinNEntropy` policy.
//!
//! Key behaviors
//! -------------
//! - Represent the selection policy via [`StimSelectionMethod`] and the
//!   requested point estimate via [`ParamEstimationMethod`], both parseable
//!   from case-insensitive strings.
//! - Bundle them with [`MinNEntropyParams`] into [`QuestPlusOptions`], whose
//!   `Default` matches the conventional QUEST+ settings.
//!
//! Invariants & assumptions
//! ------------------------
//! - Only `MinEntropy` changes behavior. `MinNEntropy` is accepted and its
//!   parameters are stored, but selection proceeds exactly as `MinEntropy`;
//!   the intended repetition-capped sampling is not defined well enough to
//!   implement.
//! - `ParamEstimationMethod` is stored for callers but never consulted: the
//!   engine does not produce point estimates.
//!
//! Conventions
//! -----------
//! - This module provides plain data carriers that never panic and never fail
//!   to construct; parsing helpers return `QPError` for unknown names.

use crate::questplus::errors::QPError;
use std::str::FromStr;

/// How the engine chooses the next stimulus.
///
/// Variants:
/// - `MinEntropy`: stimulus minimizing expected posterior entropy.
/// - `MinNEntropy`: declared for compatibility; currently selects exactly as
///   `MinEntropy` does.
///
/// Parsing accepts `"min_entropy"`/`"minentropy"` and
/// `"min_n_entropy"`/`"minnentropy"` in any case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StimSelectionMethod {
    #[default]
    MinEntropy,
    MinNEntropy,
}

impl FromStr for StimSelectionMethod {
    type Err = QPError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "min_entropy" | "minentropy" => Ok(StimSelectionMethod::MinEntropy),
            "min_n_entropy" | "minnentropy" => Ok(StimSelectionMethod::MinNEntropy),
            _ => Err(QPError::InvalidSelectionMethod { name: s.to_string() }),
        }
    }
}

/// Requested parameter point estimate. Stored only; never computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParamEstimationMethod {
    #[default]
    Mean,
    Median,
    Mode,
}

impl FromStr for ParamEstimationMethod {
    type Err = QPError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mean" => Ok(ParamEstimationMethod::Mean),
            "median" => Ok(ParamEstimationMethod::Median),
            "mode" => Ok(ParamEstimationMethod::Mode),
            _ => Err(QPError::InvalidEstimationMethod { name: s.to_string() }),
        }
    }
}

/// Settings of the `MinNEntropy` policy.
///
/// Fields:
/// - `n`: number of lowest-entropy candidates to draw from (default 5).
/// - `max_consecutive_reps`: cap on presenting the same stimulus in a row
///   (default 2).
/// - `random_seed`: seed for the candidate draw (default 1).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MinNEntropyParams {
    pub n: usize,
    pub max_consecutive_reps: usize,
    pub random_seed: u64,
}

impl Default for MinNEntropyParams {
    fn default() -> Self {
        MinNEntropyParams { n: 5, max_consecutive_reps: 2, random_seed: 1 }
    }
}

/// QuestPlusOptions — procedure-level configuration of a QUEST+ run.
///
/// Purpose
/// -------
/// Bundle the selection policy, the (ignored) estimation method and the
/// `MinNEntropy` settings passed to [`crate::questplus::QuestPlus::new`].
///
/// Fields
/// ------
/// - `stim_selection`: [`StimSelectionMethod`]
///   Policy used by `next()`.
/// - `param_estimation`: [`ParamEstimationMethod`]
///   Carried for callers; not consulted.
/// - `min_n_entropy`: [`MinNEntropyParams`]
///   Consulted only when `stim_selection` is `MinNEntropy`.
///
/// Notes
/// -----
/// - `QuestPlusOptions::default()` selects `MinEntropy`, `Mean` and the
///   default `MinNEntropyParams`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct QuestPlusOptions {
    pub stim_selection: StimSelectionMethod,
    pub param_estimation: ParamEstimationMethod,
    pub min_n_entropy: MinNEntropyParams,
}

impl QuestPlusOptions {
    pub fn new(
        stim_selection: StimSelectionMethod, param_estimation: ParamEstimationMethod,
        min_n_entropy: MinNEntropyParams,
    ) -> Self {
        QuestPlusOptions { stim_selection, param_estimation, min_n_entropy }
    }
}
