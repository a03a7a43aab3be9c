//! Rank-generic grid primitives for QUEST+.
//!
//! Purpose
//! -------
//! Collect the few N-dimensional array operations the engine and the grid
//! builders need, written once over `ArrayD<f64>` so they work for any number
//! of stimulus and parameter dimensions.
//!
//! Key behaviors
//! -------------
//! - Place a 1-D value vector on one axis of an otherwise singleton shape so
//!   it broadcasts against the full grid ([`axis_vector`]).
//! - Reduce or re-expand the trailing (parameter) axes
//!   ([`sum_trailing_axes`], [`expand_trailing`]).
//! - Stack per-cell P(correct) into the two-outcome likelihood layout
//!   ([`stack_outcomes`]).
//! - Evaluate entropy terms with the `0·ln 0 = 0` rule ([`neg_xlogx`]).
//! - Locate the first minimum in row-major order and map flat indices back to
//!   per-axis indices ([`argmin_first`], [`unravel_index`]).
//!
//! Conventions
//! -----------
//! - Grids are row-major (`ndarray` standard layout). The likelihood layout is
//!   `[outcome, stimulus axes..., parameter axes...]`; the posterior layout is
//!   `[parameter axes...]`, so it aligns with the trailing axes of the
//!   likelihood under broadcasting.
//! - Outcome 0 is "incorrect", outcome 1 is "correct", so a response value can
//!   index the outcome axis directly.

use ndarray::{ArrayD, ArrayViewD, Axis, Dimension, IxDyn};

/// Number of response outcomes (incorrect, correct).
pub const N_OUTCOMES: usize = 2;

/// Reshape `values` to rank `rank`, with `values.len()` on `axis` and size 1
/// on every other axis.
///
/// The result broadcasts against any grid whose `axis` has `values.len()`
/// entries. Callers must pass `axis < rank`.
pub fn axis_vector(values: &[f64], axis: usize, rank: usize) -> ArrayD<f64> {
    let mut out = ndarray::Array1::from(values.to_vec()).into_dyn();
    for _ in 0..axis {
        out = out.insert_axis(Axis(0));
    }
    for _ in (axis + 1)..rank {
        let end = out.ndim();
        out = out.insert_axis(Axis(end));
    }
    out
}

/// Sum out the last `n_axes` axes of `grid`.
///
/// With `n_axes = 0` this is a copy.
pub fn sum_trailing_axes(grid: &ArrayViewD<'_, f64>, n_axes: usize) -> ArrayD<f64> {
    let mut out = grid.to_owned();
    for _ in 0..n_axes {
        let last = out.ndim() - 1;
        out = out.sum_axis(Axis(last));
    }
    out
}

/// View `grid` with `n_axes` trailing singleton axes appended.
pub fn expand_trailing<'a>(grid: ArrayViewD<'a, f64>, n_axes: usize) -> ArrayViewD<'a, f64> {
    let mut out = grid;
    for _ in 0..n_axes {
        let end = out.ndim();
        out = out.insert_axis(Axis(end));
    }
    out
}

/// Build the `[outcome, ...]` likelihood grid from P(correct).
///
/// Entry `[0, ix...]` is `1 − p[ix...]` and entry `[1, ix...]` is `p[ix...]`,
/// so both outcomes sum to one cell by cell.
pub fn stack_outcomes(p_correct: &ArrayD<f64>) -> ArrayD<f64> {
    let mut shape = Vec::with_capacity(p_correct.ndim() + 1);
    shape.push(N_OUTCOMES);
    shape.extend_from_slice(p_correct.shape());
    ArrayD::from_shape_fn(IxDyn(&shape), |ix| {
        let p = p_correct[&ix.slice()[1..]];
        if ix[0] == 0 { 1.0 - p } else { p }
    })
}

/// Evaluate `f` on the Cartesian product of `axes`.
///
/// The result has one axis per entry of `axes`; entry `[i₁, …, i_n]` is
/// `f(&[axes[0][i₁], …, axes[n-1][i_n]])`. Models use it to tabulate
/// P(correct) over `[stimulus axes..., parameter axes...]` before calling
/// [`stack_outcomes`].
pub fn evaluate_on_grid<F>(axes: &[&[f64]], mut f: F) -> ArrayD<f64>
where
    F: FnMut(&[f64]) -> f64,
{
    let shape: Vec<usize> = axes.iter().map(|a| a.len()).collect();
    let mut coords = vec![0.0; axes.len()];
    ArrayD::from_shape_fn(IxDyn(&shape), |ix| {
        for (d, axis) in axes.iter().enumerate() {
            coords[d] = axis[ix[d]];
        }
        f(&coords)
    })
}

/// Entropy contribution `−p·ln p`.
///
/// Zero, negative and NaN inputs contribute exactly 0. NaN arises for the
/// `0/0` cells of an outcome that has zero marginal probability.
#[inline]
pub fn neg_xlogx(p: f64) -> f64 {
    if p > 0.0 { -p * p.ln() } else { 0.0 }
}

/// Flat row-major index of the smallest entry of `grid`.
///
/// Ties resolve to the lowest flat index; NaN entries are never selected.
/// Returns `None` for an empty grid or one that is entirely NaN.
pub fn argmin_first(grid: &ArrayViewD<'_, f64>) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (flat, &value) in grid.iter().enumerate() {
        if value.is_nan() {
            continue;
        }
        match best {
            Some((_, current)) if value >= current => {}
            _ => best = Some((flat, value)),
        }
    }
    best.map(|(flat, _)| flat)
}

/// Convert a flat row-major index into per-axis indices for `shape`.
pub fn unravel_index(mut flat: usize, shape: &[usize]) -> Vec<usize> {
    let mut index = vec![0; shape.len()];
    for (axis, &len) in shape.iter().enumerate().rev() {
        if len == 0 {
            continue;
        }
        index[axis] = flat % len;
        flat /= len;
    }
    index
}
