//! psydapt — adaptive psychophysics procedures with optional Python bindings.
//!
//! Purpose
//! -------
//! Serve as the crate root for Rust callers and as the PyO3 bridge that
//! exposes the adaptive procedures to Python via the `_psydapt` extension
//! module. When the `python-bindings` feature is enabled, this module defines
//! the Python-facing classes and submodules used by the `psydapt` package.
//!
//! Key behaviors
//! -------------
//! - Re-export the core Rust modules: [`procedure`] (shared two-method
//!   contract), [`questplus`] (Bayesian grid procedure) and [`staircase`]
//!   (up/down staircases).
//! - Define `#[pyclass]` wrappers (`Weibull`, `NormCDF`, `CSF`, `Staircase`)
//!   and the `#[pymodule]` initializer for the `_psydapt` extension.
//! - Register the `psydapt.questplus` and `psydapt.staircase` submodules in
//!   `sys.modules` so dotted imports work.
//!
//! Invariants & assumptions
//! ------------------------
//! - All numerical work lives in the inner modules; this file performs only
//!   FFI glue, argument conversion and error mapping.
//! - Python keyword arguments mirror the Rust params structs; omitted
//!   arguments take the same defaults.
//!
//! Conventions
//! -----------
//! - Responses are integers, `0` = incorrect and `1` = correct; any other
//!   value, negative ones included, raises `ValueError`.
//! - Errors from core Rust code are converted to `ValueError` at the PyO3
//!   boundary.
//!
//! Downstream usage
//! ----------------
//! - Native Rust code should depend on the inner modules and can ignore the
//!   PyO3 items guarded by the `python-bindings` feature.
//! - The Python packaging layer imports `_psydapt` and re-exports its
//!   classes from `psydapt.questplus` and `psydapt.staircase`.
//!
//! Testing notes
//! -------------
//! - Core behavior is covered by unit tests in the inner modules and by the
//!   integration tests under `tests/`; the bindings themselves are thin.

pub mod procedure;
pub mod questplus;
pub mod staircase;
pub mod utils;

#[cfg(feature = "python-bindings")]
use numpy::{IntoPyArray, PyArrayDyn};

#[cfg(feature = "python-bindings")]
use pyo3::{prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use crate::{
    procedure::{AdaptiveProcedure, Scale},
    questplus::{CsfModel, CsfParams, NormCdfModel, NormCdfParams, WeibullModel, WeibullParams},
    staircase::StaircaseOptions,
    utils::{
        extract_f64_vec, extract_param_domain, extract_questplus_options, extract_response,
        extract_scale,
    },
};

/// Weibull — Python-facing QUEST+ procedure with a Weibull psychometric
/// function.
///
/// Parameters
/// ----------
/// Constructed from Python via
/// `Weibull(intensity, threshold, slope=None, lower_asymptote=None,
/// lapse_rate=None, threshold_prior=None, slope_prior=None,
/// lower_asymptote_prior=None, lapse_rate_prior=None, stim_scale="log10",
/// stim_selection_method="min_entropy", param_estimation_method="mean",
/// n=5, max_consecutive_reps=2, random_seed=1)`.
///
/// Notes
/// -----
/// - Rust callers should use [`questplus::Weibull`] directly.
#[cfg(feature = "python-bindings")]
#[pyclass(module = "psydapt.questplus", name = "Weibull")]
pub struct PyWeibull {
    inner: questplus::Weibull,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl PyWeibull {
    #[new]
    #[pyo3(signature = (
        intensity, threshold, slope = None, lower_asymptote = None, lapse_rate = None,
        threshold_prior = None, slope_prior = None, lower_asymptote_prior = None,
        lapse_rate_prior = None, stim_scale = None, stim_selection_method = None,
        param_estimation_method = None, n = None, max_consecutive_reps = None,
        random_seed = None
    ))]
    #[allow(clippy::too_many_arguments)]
    pub fn new<'py>(
        py: Python<'py>, intensity: &Bound<'py, PyAny>, threshold: &Bound<'py, PyAny>,
        slope: Option<&Bound<'py, PyAny>>, lower_asymptote: Option<&Bound<'py, PyAny>>,
        lapse_rate: Option<&Bound<'py, PyAny>>, threshold_prior: Option<&Bound<'py, PyAny>>,
        slope_prior: Option<&Bound<'py, PyAny>>, lower_asymptote_prior: Option<&Bound<'py, PyAny>>,
        lapse_rate_prior: Option<&Bound<'py, PyAny>>, stim_scale: Option<&str>,
        stim_selection_method: Option<&str>, param_estimation_method: Option<&str>,
        n: Option<usize>, max_consecutive_reps: Option<usize>, random_seed: Option<u64>,
    ) -> PyResult<PyWeibull> {
        let params = WeibullParams {
            stim_scale: extract_scale(stim_scale, Scale::Log10)?,
            intensity: extract_f64_vec(py, intensity)?,
            threshold: extract_param_domain(py, Some(threshold), threshold_prior, &[])?,
            slope: extract_param_domain(py, slope, slope_prior, &[3.5])?,
            lower_asymptote: extract_param_domain(py, lower_asymptote, lower_asymptote_prior, &[0.01])?,
            lapse_rate: extract_param_domain(py, lapse_rate, lapse_rate_prior, &[0.01])?,
        };
        let options = extract_questplus_options(
            stim_selection_method,
            param_estimation_method,
            n,
            max_consecutive_reps,
            random_seed,
        )?;
        let inner = questplus::Weibull::new(WeibullModel::new(params)?, options)?;
        Ok(PyWeibull { inner })
    }

    pub fn next(&mut self) -> PyResult<f64> {
        Ok(self.inner.next()?)
    }

    #[pyo3(signature = (response, stimulus = None))]
    pub fn update(&mut self, response: i64, stimulus: Option<f64>) -> PyResult<bool> {
        Ok(self.inner.update(extract_response(response)?, stimulus)?)
    }

    #[getter]
    pub fn posterior<'py>(&self, py: Python<'py>) -> Bound<'py, PyArrayDyn<f64>> {
        self.inner.posterior().clone().into_pyarray(py)
    }

    #[getter]
    pub fn stimuli(&self) -> Vec<f64> {
        self.inner.history().stimuli().to_vec()
    }

    #[getter]
    pub fn responses(&self) -> Vec<usize> {
        self.inner.history().responses().to_vec()
    }
}

/// NormCDF — Python-facing QUEST+ procedure with a cumulative-normal
/// psychometric function.
///
/// Parameters
/// ----------
/// Constructed from Python via
/// `NormCDF(intensity, location, scale=None, lower_asymptote=None,
/// lapse_rate=None, location_prior=None, scale_prior=None,
/// lower_asymptote_prior=None, lapse_rate_prior=None, stim_scale="linear",
/// ...)`; the selection keywords match `Weibull`.
#[cfg(feature = "python-bindings")]
#[pyclass(module = "psydapt.questplus", name = "NormCDF")]
pub struct PyNormCdf {
    inner: questplus::NormCdf,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl PyNormCdf {
    #[new]
    #[pyo3(signature = (
        intensity, location, scale = None, lower_asymptote = None, lapse_rate = None,
        location_prior = None, scale_prior = None, lower_asymptote_prior = None,
        lapse_rate_prior = None, stim_scale = None, stim_selection_method = None,
        param_estimation_method = None, n = None, max_consecutive_reps = None,
        random_seed = None
    ))]
    #[allow(clippy::too_many_arguments)]
    pub fn new<'py>(
        py: Python<'py>, intensity: &Bound<'py, PyAny>, location: &Bound<'py, PyAny>,
        scale: Option<&Bound<'py, PyAny>>, lower_asymptote: Option<&Bound<'py, PyAny>>,
        lapse_rate: Option<&Bound<'py, PyAny>>, location_prior: Option<&Bound<'py, PyAny>>,
        scale_prior: Option<&Bound<'py, PyAny>>, lower_asymptote_prior: Option<&Bound<'py, PyAny>>,
        lapse_rate_prior: Option<&Bound<'py, PyAny>>, stim_scale: Option<&str>,
        stim_selection_method: Option<&str>, param_estimation_method: Option<&str>,
        n: Option<usize>, max_consecutive_reps: Option<usize>, random_seed: Option<u64>,
    ) -> PyResult<PyNormCdf> {
        let params = NormCdfParams {
            stim_scale: extract_scale(stim_scale, Scale::Linear)?,
            intensity: extract_f64_vec(py, intensity)?,
            location: extract_param_domain(py, Some(location), location_prior, &[])?,
            scale: extract_param_domain(py, scale, scale_prior, &[3.5])?,
            lower_asymptote: extract_param_domain(py, lower_asymptote, lower_asymptote_prior, &[0.01])?,
            lapse_rate: extract_param_domain(py, lapse_rate, lapse_rate_prior, &[0.01])?,
        };
        let options = extract_questplus_options(
            stim_selection_method,
            param_estimation_method,
            n,
            max_consecutive_reps,
            random_seed,
        )?;
        let inner = questplus::NormCdf::new(NormCdfModel::new(params)?, options)?;
        Ok(PyNormCdf { inner })
    }

    pub fn next(&mut self) -> PyResult<f64> {
        Ok(self.inner.next()?)
    }

    #[pyo3(signature = (response, stimulus = None))]
    pub fn update(&mut self, response: i64, stimulus: Option<f64>) -> PyResult<bool> {
        Ok(self.inner.update(extract_response(response)?, stimulus)?)
    }

    #[getter]
    pub fn posterior<'py>(&self, py: Python<'py>) -> Bound<'py, PyArrayDyn<f64>> {
        self.inner.posterior().clone().into_pyarray(py)
    }
}

/// CSF — Python-facing QUEST+ procedure over (contrast, spatial frequency,
/// temporal frequency).
///
/// Notes
/// -----
/// - Stimuli cross the boundary as `(contrast, spatial_freq, temporal_freq)`
///   tuples.
#[cfg(feature = "python-bindings")]
#[pyclass(module = "psydapt.questplus", name = "CSF")]
pub struct PyCsf {
    inner: questplus::Csf,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl PyCsf {
    #[new]
    #[pyo3(signature = (
        contrast, spatial_freq, temporal_freq, c0, cf, cw, min_thresh, slope = None,
        lower_asymptote = None, lapse_rate = None, c0_prior = None, cf_prior = None,
        cw_prior = None, min_thresh_prior = None, slope_prior = None,
        lower_asymptote_prior = None, lapse_rate_prior = None, stim_scale = None,
        stim_selection_method = None, param_estimation_method = None, n = None,
        max_consecutive_reps = None, random_seed = None
    ))]
    #[allow(clippy::too_many_arguments)]
    pub fn new<'py>(
        py: Python<'py>, contrast: &Bound<'py, PyAny>, spatial_freq: &Bound<'py, PyAny>,
        temporal_freq: &Bound<'py, PyAny>, c0: &Bound<'py, PyAny>, cf: &Bound<'py, PyAny>,
        cw: &Bound<'py, PyAny>, min_thresh: &Bound<'py, PyAny>, slope: Option<&Bound<'py, PyAny>>,
        lower_asymptote: Option<&Bound<'py, PyAny>>, lapse_rate: Option<&Bound<'py, PyAny>>,
        c0_prior: Option<&Bound<'py, PyAny>>, cf_prior: Option<&Bound<'py, PyAny>>,
        cw_prior: Option<&Bound<'py, PyAny>>, min_thresh_prior: Option<&Bound<'py, PyAny>>,
        slope_prior: Option<&Bound<'py, PyAny>>, lower_asymptote_prior: Option<&Bound<'py, PyAny>>,
        lapse_rate_prior: Option<&Bound<'py, PyAny>>, stim_scale: Option<&str>,
        stim_selection_method: Option<&str>, param_estimation_method: Option<&str>,
        n: Option<usize>, max_consecutive_reps: Option<usize>, random_seed: Option<u64>,
    ) -> PyResult<PyCsf> {
        let domain = |values: &Bound<'py, PyAny>, prior: Option<&Bound<'py, PyAny>>| {
            extract_param_domain(py, Some(values), prior, &[])
        };
        let params = CsfParams {
            stim_scale: extract_scale(stim_scale, Scale::Log10)?,
            contrast: extract_f64_vec(py, contrast)?,
            spatial_freq: extract_f64_vec(py, spatial_freq)?,
            temporal_freq: extract_f64_vec(py, temporal_freq)?,
            c0: domain(c0, c0_prior)?,
            cf: domain(cf, cf_prior)?,
            cw: domain(cw, cw_prior)?,
            min_thresh: domain(min_thresh, min_thresh_prior)?,
            slope: extract_param_domain(py, slope, slope_prior, &[3.5])?,
            lower_asymptote: extract_param_domain(py, lower_asymptote, lower_asymptote_prior, &[0.01])?,
            lapse_rate: extract_param_domain(py, lapse_rate, lapse_rate_prior, &[0.01])?,
        };
        let options = extract_questplus_options(
            stim_selection_method,
            param_estimation_method,
            n,
            max_consecutive_reps,
            random_seed,
        )?;
        let inner = questplus::Csf::new(CsfModel::new(params)?, options)?;
        Ok(PyCsf { inner })
    }

    pub fn next(&mut self) -> PyResult<(f64, f64, f64)> {
        let [x, f, w] = self.inner.next()?;
        Ok((x, f, w))
    }

    #[pyo3(signature = (response, stimulus = None))]
    pub fn update(&mut self, response: i64, stimulus: Option<(f64, f64, f64)>) -> PyResult<bool> {
        let stimulus = stimulus.map(|(x, f, w)| [x, f, w]);
        Ok(self.inner.update(extract_response(response)?, stimulus)?)
    }

    #[getter]
    pub fn posterior<'py>(&self, py: Python<'py>) -> Bound<'py, PyArrayDyn<f64>> {
        self.inner.posterior().clone().into_pyarray(py)
    }
}

/// Staircase — Python-facing up/down staircase.
///
/// Parameters
/// ----------
/// Constructed from Python via
/// `Staircase(start_val, step_sizes, n_trials, n_up, n_down,
/// apply_initial_rule, stim_scale="linear", n_reversals=None, min_val=None,
/// max_val=None)`.
#[cfg(feature = "python-bindings")]
#[pyclass(module = "psydapt.staircase", name = "Staircase")]
pub struct PyStaircase {
    inner: staircase::Staircase,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl PyStaircase {
    #[new]
    #[pyo3(signature = (
        start_val, step_sizes, n_trials, n_up, n_down, apply_initial_rule,
        stim_scale = None, n_reversals = None, min_val = None, max_val = None
    ))]
    #[allow(clippy::too_many_arguments)]
    pub fn new<'py>(
        py: Python<'py>, start_val: f64, step_sizes: &Bound<'py, PyAny>, n_trials: usize,
        n_up: usize, n_down: usize, apply_initial_rule: bool, stim_scale: Option<&str>,
        n_reversals: Option<usize>, min_val: Option<f64>, max_val: Option<f64>,
    ) -> PyResult<PyStaircase> {
        let options = StaircaseOptions {
            stim_scale: extract_scale(stim_scale, Scale::Linear)?,
            n_reversals,
            min_val,
            max_val,
            ..StaircaseOptions::new(
                start_val,
                extract_f64_vec(py, step_sizes)?,
                n_trials,
                n_up,
                n_down,
                apply_initial_rule,
            )
        };
        Ok(PyStaircase { inner: staircase::Staircase::new(options)? })
    }

    pub fn next(&mut self) -> PyResult<f64> {
        Ok(self.inner.next()?)
    }

    #[pyo3(signature = (response, stimulus = None))]
    pub fn update(&mut self, response: i64, stimulus: Option<f64>) -> PyResult<bool> {
        Ok(self.inner.update(extract_response(response)?, stimulus)?)
    }

    #[getter]
    pub fn reversal_count(&self) -> usize {
        self.inner.reversal_count()
    }

    #[getter]
    pub fn stimuli(&self) -> Vec<f64> {
        self.inner.history().stimuli().to_vec()
    }

    #[getter]
    pub fn responses(&self) -> Vec<usize> {
        self.inner.history().responses().to_vec()
    }
}

/// _psydapt — PyO3 module initializer for the Python extension.
///
/// Purpose
/// -------
/// Define the `_psydapt` Python module, attach the `questplus` and
/// `staircase` submodules, and register them in `sys.modules` so they are
/// importable via dotted paths.
///
/// Errors
/// ------
/// - `PyErr`
///   If creating submodules or manipulating `sys.modules` fails.
#[cfg(feature = "python-bindings")]
#[pymodule]
fn _psydapt<'py>(_py: Python<'py>, m: &Bound<'py, PyModule>) -> PyResult<()> {
    let questplus_mod = PyModule::new(_py, "questplus")?;
    let staircase_mod = PyModule::new(_py, "staircase")?;
    questplus_module(_py, m, &questplus_mod)?;
    staircase_module(_py, m, &staircase_mod)?;

    // Manually add submodules into sys.modules to allow for dot notation.
    _py.import("sys")?.getattr("modules")?.set_item("psydapt.questplus", questplus_mod)?;
    _py.import("sys")?.getattr("modules")?.set_item("psydapt.staircase", staircase_mod)?;
    Ok(())
}

#[cfg(feature = "python-bindings")]
fn questplus_module<'py>(
    _py: Python, psydapt: &Bound<'py, PyModule>, m: &Bound<'py, PyModule>,
) -> PyResult<()> {
    m.add_class::<PyWeibull>()?;
    m.add_class::<PyNormCdf>()?;
    m.add_class::<PyCsf>()?;
    psydapt.add_submodule(m)?;
    Ok(())
}

#[cfg(feature = "python-bindings")]
fn staircase_module<'py>(
    _py: Python, psydapt: &Bound<'py, PyModule>, m: &Bound<'py, PyModule>,
) -> PyResult<()> {
    m.add_class::<PyStaircase>()?;
    psydapt.add_submodule(m)?;
    Ok(())
}
