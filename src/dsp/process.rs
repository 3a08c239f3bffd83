//! Post-processing stages
//!
//! Every stage works in place on `&mut [f64]`, is total, and never turns
//! finite input into non-finite output.

use log::warn;
use serde::{Deserialize, Serialize};

use super::analysis::{mean, peak};
use crate::engine::FrameBuffer;

/// Peak level at or below which a frame counts as silent and is left alone
pub const SILENCE_THRESHOLD: f64 = 1e-12;

/// Which processing stages a generator wants
///
/// `frame_*` stages run on each frame as it is generated, `table_*` stages run
/// once over the assembled table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessingConfig {
    pub frame_dc_remove: bool,
    pub frame_normalize: bool,
    pub table_dc_remove: bool,
    pub table_normalize: bool,
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            frame_dc_remove: true,
            frame_normalize: true,
            table_dc_remove: true,
            table_normalize: true,
        }
    }
}

/// Subtract the arithmetic mean from every sample
pub fn remove_dc_offset(samples: &mut [f64]) {
    let dc = mean(samples);
    if dc == 0.0 {
        return;
    }
    for sample in samples.iter_mut() {
        *sample -= dc;
    }
}

/// Scale so the peak absolute value becomes 1.0
///
/// Returns `false` and leaves the samples untouched when the input is
/// silent (peak ≤ [`SILENCE_THRESHOLD`]). A nonzero peak at or below the
/// threshold is treated as silence too, so such a frame keeps its tiny
/// level instead of being raised to 1.0.
pub fn normalize_peak(samples: &mut [f64]) -> bool {
    let level = peak(samples);
    if level <= SILENCE_THRESHOLD {
        return false;
    }
    for sample in samples.iter_mut() {
        *sample /= level;
    }
    true
}

/// Rotate so index 0 sits just after a rising zero crossing
///
/// A rising crossing is a pair `x[i-1] <= 0 < x[i]`. If the wrap-around pair
/// `(x[n-1], x[0])` already is one the frame is left as is. Returns the
/// rotation applied, or `None` when the frame has no rising crossing (it is
/// then left unrotated).
pub fn align_to_zero_crossing(samples: &mut [f64]) -> Option<usize> {
    let n = samples.len();
    if n < 2 {
        return None;
    }

    if samples[n - 1] <= 0.0 && samples[0] > 0.0 {
        return Some(0);
    }

    let shift = (1..n).find(|&i| samples[i - 1] <= 0.0 && samples[i] > 0.0)?;
    samples.rotate_left(shift);
    Some(shift)
}

/// Hard-limit samples to [-1, 1]
pub fn clamp_amplitude(samples: &mut [f64]) {
    for sample in samples.iter_mut() {
        *sample = sample.clamp(-1.0, 1.0);
    }
}

/// Per-frame post-processor
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PostProcessor {
    config: ProcessingConfig,
    align_zero_crossing: bool,
}

impl PostProcessor {
    pub fn new(config: ProcessingConfig) -> Self {
        Self {
            config,
            align_zero_crossing: false,
        }
    }

    /// Enable or disable the zero-crossing alignment stage
    pub fn with_zero_crossing_alignment(mut self, enabled: bool) -> Self {
        self.align_zero_crossing = enabled;
        self
    }

    pub fn config(&self) -> ProcessingConfig {
        self.config
    }

    pub fn aligns_zero_crossing(&self) -> bool {
        self.align_zero_crossing
    }

    /// Run the per-frame stages on an owned frame
    pub fn process(&self, mut frame: FrameBuffer) -> FrameBuffer {
        self.process_in_place(&mut frame);
        frame
    }

    /// Run the per-frame stages in place
    pub fn process_in_place(&self, samples: &mut [f64]) {
        if self.config.frame_dc_remove {
            remove_dc_offset(samples);
        }

        if self.config.frame_normalize && !normalize_peak(samples) {
            warn!("Silent frame passed through without normalization");
        }

        if self.align_zero_crossing && align_to_zero_crossing(samples).is_none() {
            warn!("No rising zero crossing, frame left unrotated");
        }
    }

    /// Table-level pass over the fully assembled buffer
    ///
    /// Global DC removal and normalization as configured, then a safety
    /// clamp against rounding overshoot.
    pub fn finalize_table(&self, samples: &mut [f64]) {
        if self.config.table_dc_remove {
            remove_dc_offset(samples);
        }
        if self.config.table_normalize {
            normalize_peak(samples);
        }
        clamp_amplitude(samples);
    }
}
