//! Contrast-sensitivity-function model over (contrast, spatial frequency,
//! temporal frequency).
//!
//! Purpose
//! -------
//! Tabulate a Weibull detection model whose threshold depends linearly on
//! spatial and temporal frequency, floored at a minimum threshold:
//!
//! `t = max(min_thresh, c0 + cf·f + cw·w)`, then
//! `p = weibull_p(scale, x, t, β, γ, λ)`.
//!
//! Invariants & assumptions
//! ------------------------
//! - Stimulus axes: (contrast `x`, spatial frequency `f`, temporal frequency
//!   `w`); the stimulus type is `[f64; 3]` in that order.
//! - Parameter axes: (c0, cf, cw, min_thresh, slope, lower asymptote, lapse
//!   rate), giving a rank-11 likelihood grid.
//! - Grid size is the product of all ten domain lengths; keep the fixed
//!   parameters single-valued where possible.

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
        models::weibull::weibull_p,
    },
};
use ndarray::{Array1, ArrayD};

/// Settings of a CSF QUEST+ run.
///
/// Fields
/// ------
/// - `stim_scale`: default `Log10`.
/// - `contrast`, `spatial_freq`, `temporal_freq`: stimulus candidates.
/// - `c0`, `cf`, `cw`: coefficients of the linear threshold term.
/// - `min_thresh`: threshold floor.
/// - `slope`, `lower_asymptote`, `lapse_rate`: defaults `{3.5}`, `{0.01}`,
///   `{0.01}`.
#[derive(Debug, Clone, PartialEq)]
pub struct CsfParams {
    pub stim_scale: Scale,
    pub contrast: Vec<f64>,
    pub spatial_freq: Vec<f64>,
    pub temporal_freq: Vec<f64>,
    pub c0: ParamDomain,
    pub cf: ParamDomain,
    pub cw: ParamDomain,
    pub min_thresh: ParamDomain,
    pub slope: ParamDomain,
    pub lower_asymptote: ParamDomain,
    pub lapse_rate: ParamDomain,
}

impl CsfParams {
    pub fn new(
        contrast: Vec<f64>, spatial_freq: Vec<f64>, temporal_freq: Vec<f64>, c0: Vec<f64>,
        cf: Vec<f64>, cw: Vec<f64>, min_thresh: Vec<f64>,
    ) -> Self {
        CsfParams {
            stim_scale: Scale::Log10,
            contrast,
            spatial_freq,
            temporal_freq,
            c0: ParamDomain::new(c0),
            cf: ParamDomain::new(cf),
            cw: ParamDomain::new(cw),
            min_thresh: ParamDomain::new(min_thresh),
            slope: ParamDomain::fixed(3.5),
            lower_asymptote: ParamDomain::fixed(0.01),
            lapse_rate: ParamDomain::fixed(0.01),
        }
    }

    fn stimulus_domains(&self) -> [(&'static str, &[f64]); 3] {
        [
            ("contrast", self.contrast.as_slice()),
            ("spatial_freq", self.spatial_freq.as_slice()),
            ("temporal_freq", self.temporal_freq.as_slice()),
        ]
    }

    fn domains(&self) -> [(&'static str, &ParamDomain); 7] {
        [
            ("c0", &self.c0),
            ("cf", &self.cf),
            ("cw", &self.cw),
            ("min_thresh", &self.min_thresh),
            ("slope", &self.slope),
            ("lower_asymptote", &self.lower_asymptote),
            ("lapse_rate", &self.lapse_rate),
        ]
    }
}

/// CSF grid builder.
#[derive(Debug, Clone, PartialEq)]
pub struct CsfModel {
    params: CsfParams,
}

impl CsfModel {
    /// Validate `params` and wrap them.
    ///
    /// Errors
    /// ------
    /// - `QPError::EmptyDomain` / `QPError::NonFiniteDomain` for any stimulus
    ///   or parameter domain.
    /// - `QPError::PriorLengthMismatch` / `QPError::InvalidPriorWeight` for a
    ///   malformed prior.
    pub fn new(params: CsfParams) -> QPResult<Self> {
        for (name, values) in params.stimulus_domains() {
            validate_domain(name, values)?;
        }
        for (name, domain) in params.domains() {
            domain.validate(name)?;
        }
        Ok(CsfModel { params })
    }

    pub fn params(&self) -> &CsfParams {
        &self.params
    }
}

impl GridModel for CsfModel {
    type Stimulus = [f64; 3];

    fn make_stimuli(&self) -> Vec<Array1<f64>> {
        self.params.stimulus_domains().iter().map(|(_, v)| Array1::from(v.to_vec())).collect()
    }

    fn generate_prior(&self) -> QPResult<ArrayD<f64>> {
        build_prior(&self.params.domains())
    }

    fn generate_likelihoods(&self) -> QPResult<ArrayD<f64>> {
        let p = &self.params;
        let scale = p.stim_scale;
        let axes = [
            p.contrast.as_slice(),
            p.spatial_freq.as_slice(),
            p.temporal_freq.as_slice(),
            p.c0.values.as_slice(),
            p.cf.values.as_slice(),
            p.cw.values.as_slice(),
            p.min_thresh.values.as_slice(),
            p.slope.values.as_slice(),
            p.lower_asymptote.values.as_slice(),
            p.lapse_rate.values.as_slice(),
        ];
        let p_correct = evaluate_on_grid(&axes, |c| {
            let (x, f, w) = (c[0], c[1], c[2]);
            let (c0, cf, cw, min_thresh) = (c[3], c[4], c[5], c[6]);
            let t = min_thresh.max(c0 + cf * f + cw * w);
            weibull_p(scale, x, t, c[7], c[8], c[9])
        });
        Ok(stack_outcomes(&p_correct))
    }
}
