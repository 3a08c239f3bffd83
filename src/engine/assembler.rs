//! Wavetable assembly
//!
//! Drives the frame loop: one phase grid per run, one generator call per
//! frame, post-processing, then concatenation in ascending frame order.

use log::{debug, info};

use super::frame::invoke;
use super::phase::build_phase_grid;
use crate::dsp::PostProcessor;
use crate::error::{MorphError, Result};
use crate::generators::WaveformGenerator;

/// Default number of frames per table
pub const DEFAULT_FRAMES: usize = 256;

/// Morph value for one frame
///
/// The endpoint-inclusive ramp `i / (F - 1)`, or `0.0` for a single-frame
/// table. Each value is computed directly from the index, so the first frame
/// gets exactly 0.0 and the last exactly 1.0.
#[inline]
pub fn morph_value(frame_index: usize, frame_count: usize) -> f64 {
    if frame_count <= 1 {
        0.0
    } else {
        frame_index as f64 / (frame_count - 1) as f64
    }
}

/// All morph values for a table of `frame_count` frames
pub fn morph_values(frame_count: usize) -> Vec<f64> {
    (0..frame_count)
        .map(|i| morph_value(i, frame_count))
        .collect()
}

/// A complete, immutable multi-frame table
///
/// `frame_count × frame_size` samples in frame order.
#[derive(Debug, Clone, PartialEq)]
pub struct WavetableBuffer {
    samples: Vec<f64>,
    frame_size: usize,
    frame_count: usize,
    generator: String,
}

impl WavetableBuffer {
    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    pub fn frame_size(&self) -> usize {
        self.frame_size
    }

    pub fn frame_count(&self) -> usize {
        self.frame_count
    }

    /// Id of the generator that produced the table
    pub fn generator(&self) -> &str {
        &self.generator
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Borrow frame `index`, if it exists
    pub fn frame(&self, index: usize) -> Option<&[f64]> {
        let start = index.checked_mul(self.frame_size)?;
        self.samples.get(start..start + self.frame_size)
    }

    pub fn frames(&self) -> impl Iterator<Item = &[f64]> {
        self.samples.chunks_exact(self.frame_size)
    }

    pub fn into_samples(self) -> Vec<f64> {
        self.samples
    }
}

/// Builds wavetables from a generator
#[derive(Debug, Clone, Copy, Default)]
pub struct Assembler {
    align_zero_crossing: bool,
}

impl Assembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rotate each frame to a rising zero crossing (off by default)
    pub fn with_zero_crossing_alignment(mut self, enabled: bool) -> Self {
        self.align_zero_crossing = enabled;
        self
    }

    /// Generate `frame_count` frames of `grid_size` samples
    ///
    /// # Errors
    /// * `InvalidConfiguration` - `frame_count` or `grid_size` is zero, checked
    ///   before the generator is called
    /// * `InvalidParameter` / `GenerationFailure` - from the first failing
    ///   frame; assembly stops there and nothing is returned
    pub fn assemble(
        &self,
        generator: &dyn WaveformGenerator,
        frame_count: usize,
        grid_size: usize,
    ) -> Result<WavetableBuffer> {
        if frame_count == 0 {
            return Err(MorphError::config("frame_count", "must be at least 1, got 0"));
        }
        let grid = build_phase_grid(grid_size)?;

        let processor = PostProcessor::new(generator.processing())
            .with_zero_crossing_alignment(self.align_zero_crossing);

        debug!(
            "Assembling '{}': {} frames x {} samples",
            generator.id(),
            frame_count,
            grid_size
        );

        let mut samples = Vec::with_capacity(frame_count * grid_size);
        for frame_index in 0..frame_count {
            let u = morph_value(frame_index, frame_count);
            let frame = invoke(generator, &grid, u, frame_index)?;
            let frame = processor.process(frame);
            ensure_finite(generator, &frame, frame_index, "post-processing")?;
            samples.extend_from_slice(&frame);
        }

        processor.finalize_table(&mut samples);
        if let Some(position) = samples.iter().position(|s| !s.is_finite()) {
            let frame_index = position / grid_size;
            let start = frame_index * grid_size;
            ensure_finite(
                generator,
                &samples[start..start + grid_size],
                frame_index,
                "table post-processing",
            )?;
        }

        info!(
            "Generated '{}': {} samples ({} frames)",
            generator.id(),
            samples.len(),
            frame_count
        );

        Ok(WavetableBuffer {
            samples,
            frame_size: grid_size,
            frame_count,
            generator: generator.id().to_string(),
        })
    }
}

fn ensure_finite(
    generator: &dyn WaveformGenerator,
    frame: &[f64],
    frame_index: usize,
    stage: &str,
) -> Result<()> {
    match frame.iter().position(|s| !s.is_finite()) {
        Some(i) => Err(MorphError::GenerationFailure {
            generator: generator.id().to_string(),
            frame_index,
            reason: format!("{} produced non-finite value {} at sample {}", stage, frame[i], i),
        }),
        None => Ok(()),
    }
}

/// Assemble with the default settings (no zero-crossing alignment)
pub fn assemble(
    generator: &dyn WaveformGenerator,
    frame_count: usize,
    grid_size: usize,
) -> Result<WavetableBuffer> {
    Assembler::new().assemble(generator, frame_count, grid_size)
}
