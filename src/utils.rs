//! utils — conversion helpers for the Python bindings.
//!
//! Apart from [`response_index`], every item here is gated on the
//! `python-bindings` feature. The helpers turn loosely typed Python arguments
//! (NumPy arrays, sequences, strings, integers) into the validated Rust
//! configuration types used by `questplus` and `staircase`, mapping parse
//! failures into `ValueError` / `TypeError`.

#[cfg(feature = "python-bindings")]
use pyo3::{exceptions::PyValueError, prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use crate::{
    procedure::Scale,
    questplus::{
        MinNEntropyParams, ParamDomain, ParamEstimationMethod, QuestPlusOptions,
        StimSelectionMethod,
    },
};

#[cfg(feature = "python-bindings")]
use numpy::{
    IntoPyArray,    // Vec → PyArray
    PyArrayMethods, // .readonly()
    PyReadonlyArray1,
};

/// Read a 1-D float array from a NumPy array, pandas Series or sequence.
#[cfg(feature = "python-bindings")]
#[inline]
pub fn extract_f64_array<'py>(
    py: Python<'py>, raw_data: &Bound<'py, PyAny>,
) -> PyResult<PyReadonlyArray1<'py, f64>> {
    if let Ok(arr_ro) = raw_data.extract::<PyReadonlyArray1<f64>>() {
        if arr_ro.as_slice().is_ok() {
            return Ok(arr_ro);
        }
    }

    if let Ok(obj) = raw_data.call_method("to_numpy", (false,), None) {
        if let Ok(series_ro) = obj.extract::<PyReadonlyArray1<f64>>() {
            if series_ro.as_slice().is_ok() {
                return Ok(series_ro);
            }
        }
    }

    let vec: Vec<f64> = raw_data.extract().map_err(|_| {
        pyo3::exceptions::PyTypeError::new_err(
            "expected a 1-D numpy.ndarray, pandas.Series, or sequence of float64",
        )
    })?;
    Ok(vec.into_pyarray(py).readonly())
}

/// Owned copy of a 1-D float argument.
#[cfg(feature = "python-bindings")]
pub fn extract_f64_vec<'py>(py: Python<'py>, raw_data: &Bound<'py, PyAny>) -> PyResult<Vec<f64>> {
    let arr = extract_f64_array(py, raw_data)?;
    Ok(arr.as_array().to_vec())
}

/// Owned copy of an optional 1-D float argument (`None` stays `None`).
#[cfg(feature = "python-bindings")]
pub fn extract_optional_vec<'py>(
    py: Python<'py>, raw_data: Option<&Bound<'py, PyAny>>,
) -> PyResult<Option<Vec<f64>>> {
    raw_data.map(|obj| extract_f64_vec(py, obj)).transpose()
}

/// Build a [`ParamDomain`] from optional values and prior weights.
///
/// Missing values fall back to `default`; a missing prior means uniform
/// weight. Length agreement is checked later by the model constructor.
#[cfg(feature = "python-bindings")]
pub fn extract_param_domain<'py>(
    py: Python<'py>, values: Option<&Bound<'py, PyAny>>, prior: Option<&Bound<'py, PyAny>>,
    default: &[f64],
) -> PyResult<ParamDomain> {
    let values = extract_optional_vec(py, values)?.unwrap_or_else(|| default.to_vec());
    let prior = extract_optional_vec(py, prior)?;
    Ok(ParamDomain { values, prior })
}

/// Parse a stimulus scale name, falling back to `default` when absent.
#[cfg(feature = "python-bindings")]
pub fn extract_scale(name: Option<&str>, default: Scale) -> PyResult<Scale> {
    match name {
        Some(s) => s.parse::<Scale>().map_err(|e| PyValueError::new_err(e.to_string())),
        None => Ok(default),
    }
}

/// Assemble [`QuestPlusOptions`] from the keyword arguments shared by all
/// QUEST+ classes.
#[cfg(feature = "python-bindings")]
pub fn extract_questplus_options(
    stim_selection_method: Option<&str>, param_estimation_method: Option<&str>, n: Option<usize>,
    max_consecutive_reps: Option<usize>, random_seed: Option<u64>,
) -> PyResult<QuestPlusOptions> {
    let stim_selection = match stim_selection_method {
        Some(s) => s.parse::<StimSelectionMethod>()?,
        None => StimSelectionMethod::default(),
    };
    let param_estimation = match param_estimation_method {
        Some(s) => s.parse::<ParamEstimationMethod>()?,
        None => ParamEstimationMethod::default(),
    };
    let defaults = MinNEntropyParams::default();
    let min_n_entropy = MinNEntropyParams {
        n: n.unwrap_or(defaults.n),
        max_consecutive_reps: max_consecutive_reps.unwrap_or(defaults.max_consecutive_reps),
        random_seed: random_seed.unwrap_or(defaults.random_seed),
    };
    Ok(QuestPlusOptions::new(stim_selection, param_estimation, min_n_entropy))
}

/// Convert a signed response from a caller into an outcome index.
///
/// Returns `None` for negative values. Values that fit but are out of range
/// (e.g. `2`) are passed through so the procedure reports them with its own
/// `InvalidResponse` error.
pub fn response_index(response: i64) -> Option<usize> {
    usize::try_from(response).ok()
}

/// Response argument of the Python `update` methods.
///
/// Errors
/// ------
/// - `ValueError` for a negative response, matching the error raised for
///   other out-of-range responses.
#[cfg(feature = "python-bindings")]
pub fn extract_response(response: i64) -> PyResult<usize> {
    response_index(response).ok_or_else(|| {
        PyValueError::new_err(format!("invalid response {response}: expected 0 or 1"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - The interpreter-independent response conversion.
    //
    // They intentionally DO NOT cover:
    // - Helpers that need a Python interpreter.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Ensure negative responses are refused before reaching a procedure while
    // valid and too-large values pass through unchanged.
    //
    // Given
    // -----
    // - Responses -1, i64::MIN, 0, 1 and 2.
    //
    // Expect
    // ------
    // - `None` for the negatives; `Some(r)` otherwise.
    fn response_index_rejects_negative_values() {
        assert_eq!(response_index(-1), None);
        assert_eq!(response_index(i64::MIN), None);
        assert_eq!(response_index(0), Some(0));
        assert_eq!(response_index(1), Some(1));
        assert_eq!(response_index(2), Some(2));
    }
}
