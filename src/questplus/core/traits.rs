//! Grid-builder capability consumed by the inference engine.
//!
//! A psychometric model plugs into QUEST+ by describing its stimulus domain
//! and tabulating its prior and likelihood on the candidate grid. The engine
//! calls each method exactly once, during setup, and never calls back into
//! the model afterwards.

use crate::procedure::Stimulus;
use crate::questplus::errors::QPResult;
use ndarray::{Array1, ArrayD};

/// Capability interface of a QUEST+ psychometric model.
///
/// - `type Stimulus`: value handed out by `next()`; its `DIMS` must equal
///   the number of stimulus axes returned by `make_stimuli`.
///
/// Required:
/// - `make_stimuli(&self)`: candidate values per stimulus dimension, in axis
///   order.
/// - `generate_prior(&self)`: prior over the parameter grid, rank `D_p`.
///   Need not be normalized; the engine normalizes it.
/// - `generate_likelihoods(&self)`: grid of shape
///   `[2, |s₁|, …, |s_Ds|, |p₁|, …, |p_Dp|]` with outcome 0 = incorrect and
///   outcome 1 = correct.
///
/// Errors from `generate_prior` / `generate_likelihoods` abort engine setup
/// and are returned unchanged to the caller.
pub trait GridModel {
    type Stimulus: Stimulus;

    fn make_stimuli(&self) -> Vec<Array1<f64>>;
    fn generate_prior(&self) -> QPResult<ArrayD<f64>>;
    fn generate_likelihoods(&self) -> QPResult<ArrayD<f64>>;
}
