//! Weibull psychometric function over a 1-D stimulus.
//!
//! Purpose
//! -------
//! Tabulate the four-parameter Weibull model (threshold `t`, slope `β`,
//! lower asymptote `γ`, lapse rate `λ`) on the QUEST+ grid:
//!
//! - Linear: `p = 1 − λ − (1 − γ − λ)·exp(−(x/t)^β)`
//! - Log10:  `p = 1 − λ − (1 − γ − λ)·exp(−10^(β(x − t)))`
//! - dB:     `p = 1 − λ − (1 − γ − λ)·exp(−10^(β(x − t)/20))`
//!
//! Invariants & assumptions
//! ------------------------
//! - Parameter axes are ordered (threshold, slope, lower asymptote, lapse
//!   rate); the likelihood grid is `[2, intensity, threshold, slope, lower,
//!   lapse]`.
//! - Domains and priors are validated by [`WeibullModel::new`]; the values
//!   themselves are not range-checked here, so e.g. a lapse rate above 1 is
//!   caught by likelihood validation at engine setup.

use crate::{
    procedure::Scale,
    questplus::{
        core::{
            grid::{evaluate_on_grid, stack_outcomes},
            prior::{ParamDomain, build_prior},
            traits::GridModel,
            validation::validate_domain,
        },
        errors::QPResult,
    },
};
use ndarray::{Array1, ArrayD};

/// Probability of a correct response under the Weibull model.
#[inline]
pub fn weibull_p(scale: Scale, x: f64, threshold: f64, slope: f64, lower: f64, lapse: f64) -> f64 {
    let growth = match scale {
        Scale::Linear => (x / threshold).powf(slope),
        Scale::Log10 => 10f64.powf(slope * (x - threshold)),
        Scale::Decibel => 10f64.powf(slope * (x - threshold) * 0.05),
    };
    1.0 - lapse - (1.0 - lower - lapse) * (-growth).exp()
}

/// Settings of a Weibull QUEST+ run.
///
/// Fields
/// ------
/// - `stim_scale`: [`Scale`], default `Log10`.
/// - `intensity`: candidate stimulus values.
/// - `threshold`: threshold domain (required).
/// - `slope`: default `{3.5}`.
/// - `lower_asymptote`: default `{0.01}`.
/// - `lapse_rate`: default `{0.01}`.
///
/// Each parameter domain may carry its own prior weights.
#[derive(Debug, Clone, PartialEq)]
pub struct WeibullParams {
    pub stim_scale: Scale,
    pub intensity: Vec<f64>,
    pub threshold: ParamDomain,
    pub slope: ParamDomain,
    pub lower_asymptote: ParamDomain,
    pub lapse_rate: ParamDomain,
}

impl WeibullParams {
    /// Settings with the default slope, asymptote, lapse rate and scale.
    pub fn new(intensity: Vec<f64>, threshold: Vec<f64>) -> Self {
        WeibullParams {
            stim_scale: Scale::Log10,
            intensity,
            threshold: ParamDomain::new(threshold),
            slope: ParamDomain::fixed(3.5),
            lower_asymptote: ParamDomain::fixed(0.01),
            lapse_rate: ParamDomain::fixed(0.01),
        }
    }

    fn domains(&self) -> [(&'static str, &ParamDomain); 4] {
        [
            ("threshold", &self.threshold),
            ("slope", &self.slope),
            ("lower_asymptote", &self.lower_asymptote),
            ("lapse_rate", &self.lapse_rate),
        ]
    }
}

/// Weibull grid builder.
#[derive(Debug, Clone, PartialEq)]
pub struct WeibullModel {
    params: WeibullParams,
}

impl WeibullModel {
    /// Validate `params` and wrap them.
    ///
    /// Errors
    /// ------
    /// - `QPError::EmptyDomain` / `QPError::NonFiniteDomain` for the
    ///   intensity or any parameter domain.
    /// - `QPError::PriorLengthMismatch` / `QPError::InvalidPriorWeight` for a
    ///   malformed prior.
    pub fn new(params: WeibullParams) -> QPResult<Self> {
        validate_domain("intensity", &params.intensity)?;
        for (name, domain) in params.domains() {
            domain.validate(name)?;
        }
        Ok(WeibullModel { params })
    }

    pub fn params(&self) -> &WeibullParams {
        &self.params
    }
}

impl GridModel for WeibullModel {
    type Stimulus = f64;

    fn make_stimuli(&self) -> Vec<Array1<f64>> {
        vec![Array1::from(self.params.intensity.clone())]
    }

    fn generate_prior(&self) -> QPResult<ArrayD<f64>> {
        build_prior(&self.params.domains())
    }

    fn generate_likelihoods(&self) -> QPResult<ArrayD<f64>> {
        let p = &self.params;
        let scale = p.stim_scale;
        let axes = [
            p.intensity.as_slice(),
            p.threshold.values.as_slice(),
            p.slope.values.as_slice(),
            p.lower_asymptote.values.as_slice(),
            p.lapse_rate.values.as_slice(),
        ];
        let p_correct =
            evaluate_on_grid(&axes, |c| weibull_p(scale, c[0], c[1], c[2], c[3], c[4]));
        Ok(stack_outcomes(&p_correct))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::questplus::errors::QPError;
    use approx::assert_relative_eq;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - The Weibull formula at the threshold on each scale.
    // - Defaults and construction-time validation of `WeibullParams`.
    // - Grid shapes produced by the `GridModel` implementation.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify the formula at x = t, where the exponent term equals 1 on every
    // scale.
    //
    // Given
    // -----
    // - γ = 0.5, λ = 0.02, β = 3.5.
    //
    // Expect
    // ------
    // - p = 1 − λ − (1 − γ − λ)/e on all three scales.
    fn weibull_p_at_threshold_matches_closed_form() {
        let expected = 1.0 - 0.02 - (1.0 - 0.5 - 0.02) * (-1.0f64).exp();

        for (scale, x) in [(Scale::Linear, 2.0), (Scale::Log10, -1.5), (Scale::Decibel, -20.0)] {
            assert_relative_eq!(weibull_p(scale, x, x, 3.5, 0.5, 0.02), expected, epsilon = 1e-12);
        }
    }

    #[test]
    // Purpose
    // -------
    // Check the asymptotes: far below threshold p → γ, far above p → 1 − λ.
    //
    // Given
    // -----
    // - Log10 scale, t = 0, x = ±5.
    //
    // Expect
    // ------
    // - p ≈ 0.01 and p ≈ 0.99.
    fn weibull_p_approaches_asymptotes() {
        assert_relative_eq!(weibull_p(Scale::Log10, -5.0, 0.0, 3.5, 0.01, 0.01), 0.01, epsilon = 1e-9);
        assert_relative_eq!(weibull_p(Scale::Log10, 5.0, 0.0, 3.5, 0.01, 0.01), 0.99, epsilon = 1e-9);
    }

    #[test]
    // Purpose
    // -------
    // Verify defaults and grid shapes.
    //
    // Given
    // -----
    // - 5 intensities, 3 thresholds, 2 slopes, default asymptote and lapse.
    //
    // Expect
    // ------
    // - Log10 scale; prior shape [3, 2, 1, 1]; likelihood [2, 5, 3, 2, 1, 1].
    fn weibull_model_grids_have_expected_shapes() {
        let params = WeibullParams {
            slope: ParamDomain::new(vec![2.0, 3.5]),
            ..WeibullParams::new(vec![-2.0, -1.5, -1.0, -0.5, 0.0], vec![-2.0, -1.0, 0.0])
        };
        assert_eq!(params.stim_scale, Scale::Log10);
        let model = WeibullModel::new(params).unwrap();

        let prior = model.generate_prior().unwrap();
        let lik = model.generate_likelihoods().unwrap();

        assert_eq!(prior.shape(), &[3, 2, 1, 1]);
        assert_eq!(lik.shape(), &[2, 5, 3, 2, 1, 1]);
        assert_eq!(model.make_stimuli()[0].len(), 5);
        assert_relative_eq!(prior.sum(), 1.0, epsilon = 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // Ensure construction fails before any grid is built when a prior does
    // not match its domain.
    //
    // Given
    // -----
    // - 3 thresholds with a 2-element threshold prior.
    //
    // Expect
    // ------
    // - `PriorLengthMismatch { param: "threshold", expected: 3, actual: 2 }`.
    fn weibull_model_rejects_prior_length_mismatch() {
        let params = WeibullParams {
            threshold: ParamDomain::with_prior(vec![-2.0, -1.0, 0.0], vec![1.0, 1.0]),
            ..WeibullParams::new(vec![-1.0], vec![])
        };

        let err = WeibullModel::new(params).unwrap_err();

        assert_eq!(
            err,
            QPError::PriorLengthMismatch { param: "threshold", expected: 3, actual: 2 }
        );
    }
}
