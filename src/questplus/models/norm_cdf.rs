//! Cumulative-normal psychometric function over a 1-D stimulus.
//!
//! `p = γ + (1 − γ − λ)·Φ((x − μ)/σ)` with location `μ`, scale `σ`, lower
//! asymptote `γ` and lapse rate `λ`. Only the linear stimulus scale is
//! defined; other scales are rejected when the model is constructed.

use crate::{
    procedure::Scale,
    questplus::{
        core::{
            grid::{evaluate_on_grid, stack_outcomes},
            prior::{ParamDomain, build_prior},
            traits::GridModel,
            validation::validate_domain,
        },
        errors::{QPError, QPResult},
    },
};
use ndarray::{Array1, ArrayD};
use statrs::function::erf::erfc;

/// Standard normal CDF, `Φ(z) = ½·erfc(−z/√2)`.
#[inline]
pub fn norm_cdf(z: f64) -> f64 {
    0.5 * erfc(-z * std::f64::consts::FRAC_1_SQRT_2)
}

/// Settings of a cumulative-normal QUEST+ run.
///
/// Defaults: `stim_scale = Linear`, `scale = {3.5}`,
/// `lower_asymptote = {0.01}`, `lapse_rate = {0.01}`.
#[derive(Debug, Clone, PartialEq)]
pub struct NormCdfParams {
    pub stim_scale: Scale,
    pub intensity: Vec<f64>,
    pub location: ParamDomain,
    pub scale: ParamDomain,
    pub lower_asymptote: ParamDomain,
    pub lapse_rate: ParamDomain,
}

impl NormCdfParams {
    pub fn new(intensity: Vec<f64>, location: Vec<f64>) -> Self {
        NormCdfParams {
            stim_scale: Scale::Linear,
            intensity,
            location: ParamDomain::new(location),
            scale: ParamDomain::fixed(3.5),
            lower_asymptote: ParamDomain::fixed(0.01),
            lapse_rate: ParamDomain::fixed(0.01),
        }
    }

    fn domains(&self) -> [(&'static str, &ParamDomain); 4] {
        [
            ("location", &self.location),
            ("scale", &self.scale),
            ("lower_asymptote", &self.lower_asymptote),
            ("lapse_rate", &self.lapse_rate),
        ]
    }
}

/// Cumulative-normal grid builder.
#[derive(Debug, Clone, PartialEq)]
pub struct NormCdfModel {
    params: NormCdfParams,
}

impl NormCdfModel {
    /// Validate `params` and wrap them.
    ///
    /// Errors
    /// ------
    /// - `QPError::UnsupportedScale` unless `stim_scale` is `Linear`.
    /// - Domain and prior errors as for the Weibull model.
    pub fn new(params: NormCdfParams) -> QPResult<Self> {
        if params.stim_scale != Scale::Linear {
            return Err(QPError::UnsupportedScale { model: "NormCDF", scale: params.stim_scale });
        }
        validate_domain("intensity", &params.intensity)?;
        for (name, domain) in params.domains() {
            domain.validate(name)?;
        }
        Ok(NormCdfModel { params })
    }

    pub fn params(&self) -> &NormCdfParams {
        &self.params
    }
}

impl GridModel for NormCdfModel {
    type Stimulus = f64;

    fn make_stimuli(&self) -> Vec<Array1<f64>> {
        vec![Array1::from(self.params.intensity.clone())]
    }

    fn generate_prior(&self) -> QPResult<ArrayD<f64>> {
        build_prior(&self.params.domains())
    }

    fn generate_likelihoods(&self) -> QPResult<ArrayD<f64>> {
        let p = &self.params;
        let axes = [
            p.intensity.as_slice(),
            p.location.values.as_slice(),
            p.scale.values.as_slice(),
            p.lower_asymptote.values.as_slice(),
            p.lapse_rate.values.as_slice(),
        ];
        let p_correct = evaluate_on_grid(&axes, |c| {
            let (x, mu, sigma, lower, lapse) = (c[0], c[1], c[2], c[3], c[4]);
            lower + (1.0 - lower - lapse) * norm_cdf((x - mu) / sigma)
        });
        Ok(stack_outcomes(&p_correct))
    }
}
