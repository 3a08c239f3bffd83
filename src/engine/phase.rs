//! Phase grid construction
//!
//! The grid is the half-open angular sequence `[0, 2π)` shared by every
//! frame and every generator in a run.

use std::f64::consts::TAU;
use std::ops::Deref;

use crate::error::{MorphError, Result};

/// Canonical per-cycle sample count
pub const DEFAULT_FRAME_SIZE: usize = 2048;

/// Evenly spaced phase positions covering exactly one cycle
///
/// `value[i] = 2π·i/N`; the value `2π` itself is never included, so a frame
/// sampled on this grid tiles seamlessly when looped.
#[derive(Debug, Clone, PartialEq)]
pub struct PhaseGrid {
    theta: Vec<f64>,
}

impl PhaseGrid {
    /// Build a grid of `size` samples
    ///
    /// # Errors
    /// * `InvalidConfiguration` - if `size` is zero
    pub fn new(size: usize) -> Result<Self> {
        if size == 0 {
            return Err(MorphError::config("grid_size", "must be positive, got 0"));
        }

        let n = size as f64;
        let theta = (0..size).map(|i| TAU * i as f64 / n).collect();

        Ok(Self { theta })
    }

    /// Number of samples per cycle
    #[inline]
    pub fn len(&self) -> usize {
        self.theta.len()
    }

    /// Always false for a constructed grid
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.theta.is_empty()
    }

    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.theta
    }
}

impl Deref for PhaseGrid {
    type Target = [f64];

    fn deref(&self) -> &[f64] {
        &self.theta
    }
}

/// Build the phase grid for one run
pub fn build_phase_grid(size: usize) -> Result<PhaseGrid> {
    PhaseGrid::new(size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use test_case::test_case;

    #[test_case(1 ; "single sample")]
    #[test_case(8 ; "tiny")]
    #[test_case(128 ; "validation size")]
    #[test_case(2048 ; "canonical")]
    #[test_case(3000 ; "non power of two")]
    fn test_grid_spans_half_open_cycle(size: usize) {
        let grid = build_phase_grid(size).unwrap();

        assert_eq!(grid.len(), size);
        assert_eq!(grid[0], 0.0);
        assert!(grid.iter().all(|&t| t < TAU));
        assert!(grid.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_grid_spacing_is_uniform() {
        let grid = build_phase_grid(1024).unwrap();
        let step = TAU / 1024.0;

        for (i, &theta) in grid.iter().enumerate() {
            assert_abs_diff_eq!(theta, step * i as f64, epsilon = 1e-12);
        }
        assert_abs_diff_eq!(grid[1023] + step, TAU, epsilon = 1e-12);
    }

    #[test]
    fn test_zero_size_is_rejected() {
        let err = build_phase_grid(0).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_CONFIGURATION");
    }
}
