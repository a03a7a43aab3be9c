//! QUEST+ procedure façade.
//!
//! [`QuestPlus`] binds a grid model to an [`InferenceEngine`] and exposes the
//! result through [`AdaptiveProcedure`], so experiment code can drive it
//! exactly like a staircase. The model is kept alongside the engine for
//! introspection; it is never consulted again after construction.

use crate::{
    procedure::{AdaptiveProcedure, TrialHistory},
    questplus::{
        core::{engine::InferenceEngine, options::QuestPlusOptions, traits::GridModel},
        errors::{QPError, QPResult},
    },
};
use ndarray::{Array1, ArrayD};

/// QuestPlus — a QUEST+ run over the grid of model `M`.
///
/// Parameters
/// ----------
/// Constructed via [`QuestPlus::new`]:
/// - `model`: `M`
///   A validated grid model, e.g. [`crate::questplus::WeibullModel`].
/// - `options`: [`QuestPlusOptions`]
///   Stimulus-selection configuration.
///
/// Notes
/// -----
/// - `update` always returns `Ok(true)`: the caller decides when to stop.
/// - The type aliases [`crate::questplus::Weibull`],
///   [`crate::questplus::NormCdf`] and [`crate::questplus::Csf`] name the
///   shipped instantiations.
#[derive(Debug, Clone)]
pub struct QuestPlus<M: GridModel> {
    model: M,
    engine: InferenceEngine<M::Stimulus>,
}

impl<M: GridModel> QuestPlus<M> {
    /// Build the prior and likelihood grids of `model` and start a run.
    ///
    /// Errors
    /// ------
    /// - Any setup error of [`InferenceEngine::setup`].
    pub fn new(model: M, options: QuestPlusOptions) -> QPResult<Self> {
        let engine = InferenceEngine::setup(&model, options)?;
        Ok(QuestPlus { model, engine })
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn options(&self) -> &QuestPlusOptions {
        self.engine.options()
    }

    pub fn posterior(&self) -> &ArrayD<f64> {
        self.engine.posterior()
    }

    pub fn likelihoods(&self) -> &ArrayD<f64> {
        self.engine.likelihoods()
    }

    pub fn stimulus_axes(&self) -> &[Array1<f64>] {
        self.engine.stimulus_axes()
    }

    pub fn history(&self) -> &TrialHistory<M::Stimulus> {
        self.engine.history()
    }

    pub fn expected_entropy(&self) -> Option<&ArrayD<f64>> {
        self.engine.expected_entropy()
    }
}

impl<M: GridModel> AdaptiveProcedure for QuestPlus<M> {
    type Stimulus = M::Stimulus;
    type Error = QPError;

    fn next(&mut self) -> QPResult<M::Stimulus> {
        self.engine.next()
    }

    fn update(&mut self, response: usize, stimulus: Option<M::Stimulus>) -> QPResult<bool> {
        self.engine.update(response, stimulus)
    }
}
