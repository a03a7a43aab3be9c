//! core — grid primitives, priors, posterior store and the QUEST+ engine.
//!
//! Purpose
//! -------
//! Collect the model-independent building blocks of QUEST+: rank-generic
//! grid helpers, nearest-stimulus resolution, prior construction from
//! per-parameter domains, the posterior store, construction-time validation,
//! the grid-builder capability trait, and the inference engine that ties them
//! together.
//!
//! Key behaviors
//! -------------
//! - Define the capability a psychometric model must provide
//!   ([`GridModel`]) and the engine that consumes it ([`InferenceEngine`]).
//! - Build normalized priors from [`ParamDomain`]s ([`build_prior`]) and
//!   likelihood grids from per-cell P(correct) ([`evaluate_on_grid`],
//!   [`stack_outcomes`]).
//! - Carry procedure-level configuration ([`QuestPlusOptions`],
//!   [`StimSelectionMethod`], [`ParamEstimationMethod`],
//!   [`MinNEntropyParams`]).
//!
//! Invariants & assumptions
//! ------------------------
//! - Grids are dynamic-rank `ndarray::ArrayD<f64>` in standard (row-major)
//!   layout. The likelihood is `[outcome, stimulus axes..., parameter
//!   axes...]` and the posterior `[parameter axes...]`.
//! - Every shape, domain and probability check happens in
//!   [`InferenceEngine::setup`]; later calls only validate per-trial input.
//!
//! Conventions
//! -----------
//! - Outcome 0 is "incorrect", outcome 1 is "correct".
//! - Ties (nearest candidate, minimum expected entropy) always resolve to the
//!   lowest index.
//! - Only the engine logs; the helpers here are pure.
//!
//! Downstream usage
//! ----------------
//! - Concrete models in `questplus::models` implement [`GridModel`] with the
//!   helpers from [`grid`] and [`prior`].
//! - Most callers go through `questplus::QuestPlus` instead of using the
//!   engine directly.

pub mod engine;
pub mod grid;
pub mod nearest;
pub mod options;
pub mod posterior;
pub mod prior;
pub mod traits;
pub mod validation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::engine::InferenceEngine;
pub use self::grid::{N_OUTCOMES, evaluate_on_grid, stack_outcomes};
pub use self::nearest::{nearest_index, resolve_stimulus};
pub use self::options::{
    MinNEntropyParams, ParamEstimationMethod, QuestPlusOptions, StimSelectionMethod,
};
pub use self::posterior::PosteriorStore;
pub use self::prior::{ParamDomain, build_prior};
pub use self::traits::GridModel;
pub use self::validation::{validate_domain, validate_likelihood};
