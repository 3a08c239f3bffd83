//! Objective frame measurements
//!
//! Used by validation, `inspect` and the tests to check the post-processing
//! invariants without listening to anything.

/// Arithmetic mean. Returns 0.0 for empty input.
///
/// Finite input always gives a finite mean; if the plain sum overflows the
/// samples are divided down before summing.
pub fn mean(samples: &[f64]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    let n = samples.len() as f64;
    let sum = samples.iter().sum::<f64>();
    if sum.is_finite() {
        sum / n
    } else {
        samples.iter().map(|s| s / n).sum()
    }
}

/// Maximum absolute value. Returns 0.0 for empty input.
pub fn peak(samples: &[f64]) -> f64 {
    samples.iter().fold(0.0_f64, |acc, s| acc.max(s.abs()))
}

/// Root mean square level. Returns 0.0 for empty input.
pub fn rms(samples: &[f64]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    (samples.iter().map(|s| s * s).sum::<f64>() / samples.len() as f64).sqrt()
}

/// Convert linear amplitude to decibels
#[inline]
pub fn linear_to_db(linear: f64) -> f64 {
    if linear <= 0.0 {
        f64::NEG_INFINITY
    } else {
        20.0 * linear.log10()
    }
}

/// Summary of one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameStats {
    /// DC offset
    pub mean: f64,
    pub peak: f64,
    pub rms: f64,
    /// Absolute difference between last and first sample (loop seam)
    pub seam: f64,
}

impl FrameStats {
    pub fn analyze(samples: &[f64]) -> Self {
        let seam = match (samples.first(), samples.last()) {
            (Some(first), Some(last)) => (last - first).abs(),
            _ => 0.0,
        };

        Self {
            mean: mean(samples),
            peak: peak(samples),
            rms: rms(samples),
            seam,
        }
    }

    /// Peak-to-RMS ratio in dB
    pub fn crest_factor_db(&self) -> f64 {
        if self.rms <= 0.0 {
            return 0.0;
        }
        linear_to_db(self.peak / self.rms)
    }
}
