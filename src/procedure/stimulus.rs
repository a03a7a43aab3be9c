//! Stimulus values handed out by adaptive procedures.
//!
//! A procedure with a single stimulus dimension trades plain `f64` values; a
//! procedure with `N` stimulus dimensions trades `[f64; N]`. Both views are
//! unified by [`Stimulus`], which exposes the per-dimension coordinates as a
//! slice so grid code can stay rank-agnostic.

/// A point in stimulus space.
///
/// Invariants
/// ----------
/// - `coords().len() == Self::DIMS` for every value.
/// - `from_coords(s.coords()) == s`.
pub trait Stimulus: Copy + PartialEq + std::fmt::Debug {
    /// Number of stimulus dimensions.
    const DIMS: usize;

    /// Build a stimulus from one coordinate per dimension.
    ///
    /// Callers must pass exactly `Self::DIMS` coordinates.
    fn from_coords(coords: &[f64]) -> Self;

    /// Per-dimension coordinates, in axis order.
    fn coords(&self) -> &[f64];
}

impl Stimulus for f64 {
    const DIMS: usize = 1;

    fn from_coords(coords: &[f64]) -> Self {
        coords[0]
    }

    fn coords(&self) -> &[f64] {
        std::slice::from_ref(self)
    }
}

impl<const N: usize> Stimulus for [f64; N] {
    const DIMS: usize = N;

    fn from_coords(coords: &[f64]) -> Self {
        std::array::from_fn(|i| coords[i])
    }

    fn coords(&self) -> &[f64] {
        self.as_slice()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    // Purpose
    // -------
    // Verify that scalar and array stimuli expose consistent coordinates.
    //
    // Given
    // -----
    // - A scalar and a 3-vector.
    //
    // Expect
    // ------
    // - `coords` has `DIMS` entries and `from_coords` restores the value.
    fn stimulus_coords_round_trip_for_scalar_and_array() {
        let s: f64 = -1.25;
        assert_eq!(<f64 as Stimulus>::DIMS, 1);
        assert_eq!(s.coords(), &[-1.25]);
        assert_eq!(f64::from_coords(s.coords()), s);

        let v: [f64; 3] = [-20.0, 4.0, 0.0];
        assert_eq!(<[f64; 3] as Stimulus>::DIMS, 3);
        assert_eq!(v.coords(), &[-20.0, 4.0, 0.0]);
        assert_eq!(<[f64; 3]>::from_coords(&[-20.0, 4.0, 0.0]), v);
    }
}
