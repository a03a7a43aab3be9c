//! Nearest-stimulus resolution.
//!
//! Maps a presented stimulus value, which may differ from the value the
//! engine proposed, back onto the candidate grid. Resolution is per axis:
//! each coordinate snaps independently to its closest candidate, which is not
//! the same as finding the nearest grid point in the joint stimulus space.

use crate::questplus::errors::{QPError, QPResult};
use ndarray::Array1;

/// Index of the candidate closest to `value` by absolute difference.
///
/// Candidates need not be sorted. Exact ties resolve to the lowest index so
/// repeated runs with identical inputs resolve identically. Returns `None`
/// when `candidates` is empty or `value` is NaN.
pub fn nearest_index<'a, I>(candidates: I, value: f64) -> Option<usize>
where
    I: IntoIterator<Item = &'a f64>,
{
    let mut best: Option<(usize, f64)> = None;
    for (i, &c) in candidates.into_iter().enumerate() {
        let dist = (c - value).abs();
        if dist.is_nan() {
            continue;
        }
        match best {
            Some((_, current)) if dist >= current => {}
            _ => best = Some((i, dist)),
        }
    }
    best.map(|(i, _)| i)
}

/// Resolve every coordinate of a stimulus onto its own axis.
///
/// Parameters
/// ----------
/// - `axes`: `&[Array1<f64>]`
///   Candidate values per stimulus dimension (non-empty, as validated at
///   engine setup).
/// - `coords`: `&[f64]`
///   Presented stimulus, one coordinate per axis.
///
/// Returns
/// -------
/// `QPResult<Vec<usize>>`
///   One candidate index per axis.
///
/// Errors
/// ------
/// - `QPError::StimulusDimMismatch` if `coords.len() != axes.len()`.
/// - `QPError::NonFiniteStimulus` if a coordinate is NaN/±inf.
pub fn resolve_stimulus(axes: &[Array1<f64>], coords: &[f64]) -> QPResult<Vec<usize>> {
    if coords.len() != axes.len() {
        return Err(QPError::StimulusDimMismatch { expected: axes.len(), actual: coords.len() });
    }
    axes.iter()
        .zip(coords)
        .enumerate()
        .map(|(dim, (axis, &value))| {
            if !value.is_finite() {
                return Err(QPError::NonFiniteStimulus { dim, value });
            }
            nearest_index(axis, value).ok_or(QPError::EmptyDomain { name: "stimulus" })
        })
        .collect()
}
