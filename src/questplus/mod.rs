//! questplus — Bayesian grid procedure (QUEST+) with expected-entropy
//! stimulus selection.
//!
//! Purpose
//! -------
//! Estimate the parameters of a psychometric function trial by trial: keep a
//! joint posterior over a grid of candidate parameter values, present the
//! stimulus whose outcome is expected to shrink that posterior the most, and
//! condition on each response.
//!
//! Key behaviors
//! -------------
//! - [`core`] holds the model-independent machinery: grid helpers, prior
//!   construction, nearest-stimulus resolution, the posterior store and the
//!   [`InferenceEngine`].
//! - [`models`] provides the Weibull, cumulative-normal and CSF grid
//!   builders.
//! - [`QuestPlus`] is the façade implementing
//!   [`AdaptiveProcedure`](crate::procedure::AdaptiveProcedure); [`Weibull`],
//!   [`NormCdf`] and [`Csf`] are its shipped instantiations.
//!
//! Invariants & assumptions
//! ------------------------
//! - Two response outcomes: 0 = incorrect, 1 = correct.
//! - Construction-time misconfiguration fails in `new`, never on a later
//!   trial.
//! - Point estimates (mean/median/mode) are not computed; the
//!   estimation method in [`QuestPlusOptions`] is carried but ignored.
//! - State is in-memory only.
//!
//! Conventions
//! -----------
//! - Errors are [`QPError`] / [`QPResult`]; with the `python-bindings`
//!   feature they convert into Python `ValueError`.
//! - The engine logs through `tracing` under the `questplus::engine` target.
//!
//! Downstream usage
//! ----------------
//! ```rust
//! use psydapt::procedure::AdaptiveProcedure;
//! use psydapt::questplus::{QuestPlusOptions, Weibull, WeibullModel, WeibullParams};
//!
//! # fn main() -> Result<(), psydapt::questplus::QPError> {
//! let grid: Vec<f64> = (0..13).map(|i| -3.5 + 0.25 * i as f64).collect();
//! let model = WeibullModel::new(WeibullParams::new(grid.clone(), grid))?;
//! let mut qp = Weibull::new(model, QuestPlusOptions::default())?;
//!
//! let stim = qp.next()?;
//! qp.update(1, Some(stim))?;
//! assert_eq!(qp.history().len(), 1);
//! # Ok(())
//! # }
//! ```

pub mod core;
pub mod errors;
pub mod models;
pub mod procedure;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::core::{
    GridModel, InferenceEngine, MinNEntropyParams, ParamDomain, ParamEstimationMethod,
    QuestPlusOptions, StimSelectionMethod,
};
pub use self::errors::{QPError, QPResult};
pub use self::models::{CsfModel, CsfParams, NormCdfModel, NormCdfParams, WeibullModel, WeibullParams};
pub use self::procedure::QuestPlus;

/// QUEST+ with a Weibull psychometric function.
pub type Weibull = QuestPlus<WeibullModel>;

/// QUEST+ with a cumulative-normal psychometric function.
pub type NormCdf = QuestPlus<NormCdfModel>;

/// QUEST+ with the contrast-sensitivity-function model.
pub type Csf = QuestPlus<CsfModel>;

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use psydapt::questplus::prelude::*;
//
// to import the main QUEST+ surface in a single line.

pub mod prelude {
    pub use super::{
        Csf, CsfModel, CsfParams, GridModel, NormCdf, NormCdfModel, NormCdfParams, ParamDomain,
        QPError, QPResult, QuestPlus, QuestPlusOptions, StimSelectionMethod, Weibull,
        WeibullModel, WeibullParams,
    };
    pub use crate::procedure::{AdaptiveProcedure, Scale};
}
