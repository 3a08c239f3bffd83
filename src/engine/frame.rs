//! Frame buffers and the generator adapter
//!
//! [`invoke`] is the only place generator code is called from. It checks the
//! morph value before the call and the output shape after it, so the rest of
//! the pipeline can rely on finite, correctly sized frames.

use std::ops::{Deref, DerefMut};

use log::trace;

use super::phase::PhaseGrid;
use crate::error::{MorphError, Result};
use crate::generators::WaveformGenerator;

/// One generated cycle, `N` samples long
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FrameBuffer {
    samples: Vec<f64>,
}

impl FrameBuffer {
    pub fn into_vec(self) -> Vec<f64> {
        self.samples
    }
}

impl From<Vec<f64>> for FrameBuffer {
    fn from(samples: Vec<f64>) -> Self {
        Self { samples }
    }
}

impl Deref for FrameBuffer {
    type Target = [f64];

    fn deref(&self) -> &[f64] {
        &self.samples
    }
}

impl DerefMut for FrameBuffer {
    fn deref_mut(&mut self) -> &mut [f64] {
        &mut self.samples
    }
}

/// Check a morph value lies in the closed interval [0, 1]
///
/// # Errors
/// * `InvalidParameter` - `u` is NaN, infinite or outside [0, 1]
pub fn validate_morph(u: f64) -> Result<()> {
    if (0.0..=1.0).contains(&u) {
        Ok(())
    } else {
        Err(MorphError::InvalidParameter { name: "u", value: u })
    }
}

/// Run a generator for one frame and validate what it returned
///
/// # Arguments
/// * `generator` - The formula to call
/// * `grid` - Shared phase grid
/// * `u` - Morph value for this frame
/// * `frame_index` - Index reported in error messages
///
/// # Errors
/// * `InvalidParameter` - `u` outside [0, 1]; the generator is not called
/// * `GenerationFailure` - wrong output length or a NaN/Infinity sample
pub fn invoke(
    generator: &dyn WaveformGenerator,
    grid: &PhaseGrid,
    u: f64,
    frame_index: usize,
) -> Result<FrameBuffer> {
    validate_morph(u)?;

    trace!("Invoking '{}' for frame {} (u = {})", generator.id(), frame_index, u);
    let samples = generator.generate(grid, u);

    let fail = |reason: String| MorphError::GenerationFailure {
        generator: generator.id().to_string(),
        frame_index,
        reason,
    };

    if samples.len() != grid.len() {
        return Err(fail(format!(
            "returned length {} but the phase grid has {} samples",
            samples.len(),
            grid.len()
        )));
    }

    if let Some((i, value)) = samples.iter().enumerate().find(|(_, s)| !s.is_finite()) {
        return Err(fail(format!("non-finite value {} at sample {}", value, i)));
    }

    Ok(FrameBuffer::from(samples))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::build_phase_grid;
    use crate::generators::{FnGenerator, GeneratorInfo};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use test_case::test_case;

    fn sine() -> FnGenerator<impl Fn(&[f64], f64) -> Vec<f64> + Send + Sync> {
        FnGenerator::new(GeneratorInfo::new("sine", "Pure sine"), |theta: &[f64], _u: f64| {
            theta.iter().map(|t| t.sin()).collect()
        })
    }

    #[test]
    fn test_invoke_returns_frame() {
        let grid = build_phase_grid(32).unwrap();
        let frame = invoke(&sine(), &grid, 0.5, 0).unwrap();
        assert_eq!(frame.len(), 32);
    }

    #[test_case(-0.1 ; "negative")]
    #[test_case(1.1 ; "above one")]
    #[test_case(f64::NAN ; "nan")]
    #[test_case(f64::INFINITY ; "infinite")]
    fn test_out_of_range_morph_is_rejected_before_call(u: f64) {
        let calls = AtomicUsize::new(0);
        let counting = FnGenerator::new(GeneratorInfo::new("counting", "Counts"), |theta, _u| {
            calls.fetch_add(1, Ordering::SeqCst);
            vec![0.0; theta.len()]
        });
        let grid = build_phase_grid(8).unwrap();

        let err = invoke(&counting, &grid, u, 0).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_PARAMETER");
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_boundary_morph_values_accepted() {
        assert!(validate_morph(0.0).is_ok());
        assert!(validate_morph(1.0).is_ok());
    }

    #[test]
    fn test_wrong_length_is_generation_failure() {
        let short = FnGenerator::new(GeneratorInfo::new("short", "N-1"), |theta, _u| {
            vec![0.0; theta.len() - 1]
        });
        let grid = build_phase_grid(16).unwrap();

        let err = invoke(&short, &grid, 0.0, 3).unwrap_err();
        assert_eq!(err.error_code(), "GENERATION_FAILURE");
        assert_eq!(err.frame_index(), Some(3));
        assert!(err.to_string().contains("short"));
    }

    #[test]
    fn test_nan_is_generation_failure_with_position() {
        let nan = FnGenerator::new(GeneratorInfo::new("nan_at_five", "NaN"), |theta, _u| {
            let mut out: Vec<f64> = theta.iter().map(|t| t.cos()).collect();
            out[5] = f64::NAN;
            out
        });
        let grid = build_phase_grid(16).unwrap();

        let err = invoke(&nan, &grid, 1.0, 9).unwrap_err();
        assert_eq!(err.frame_index(), Some(9));
        assert!(err.to_string().contains("sample 5"));
    }
}
