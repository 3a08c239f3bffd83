//! Waveform generators
//!
//! A generator is a pure per-cycle formula: given the shared phase grid and a
//! morph value `u` in `[0, 1]` it returns one sample per phase position.
//! Generators are collected into a [`GeneratorCatalog`] during an explicit
//! construction phase; the catalog is read-only afterwards.

mod catalog;
mod info;
mod linear_interpolation;
mod sine_to_saw;
mod sine_to_triangle;
mod square_pwm_tz;
mod validation;

pub use catalog::{CatalogBuilder, GeneratorCatalog};
pub use info::GeneratorInfo;
pub use linear_interpolation::LinearInterpolation;
pub use sine_to_saw::SineToSaw;
pub use sine_to_triangle::SineToTriangle;
pub use square_pwm_tz::SquarePwmTz;
pub use validation::{validate_generator, GeneratorReport, VALIDATION_SAMPLE_SIZE};

use std::fmt;

use crate::dsp::ProcessingConfig;

/// Capability interface implemented by every waveform formula
pub trait WaveformGenerator: Send + Sync {
    /// Descriptive metadata; `info().id` is the catalog key
    fn info(&self) -> &GeneratorInfo;

    /// Produce one cycle for morph value `u`
    ///
    /// Must return exactly `theta.len()` finite samples. Callers guarantee
    /// `0.0 <= u <= 1.0`.
    fn generate(&self, theta: &[f64], u: f64) -> Vec<f64>;

    /// Post-processing flags for this generator
    fn processing(&self) -> ProcessingConfig {
        ProcessingConfig::default()
    }

    /// Identity used in logs and error messages
    fn id(&self) -> &str {
        &self.info().id
    }
}

/// Adapter turning a plain closure into a [`WaveformGenerator`]
///
/// # Example
/// ```
/// use morphtable::generators::{FnGenerator, GeneratorInfo, WaveformGenerator};
///
/// let sine = FnGenerator::new(GeneratorInfo::new("sine", "Pure sine"), |theta: &[f64], _u: f64| {
///     theta.iter().map(|t| t.sin()).collect()
/// });
/// assert_eq!(sine.id(), "sine");
/// ```
pub struct FnGenerator<F> {
    info: GeneratorInfo,
    processing: ProcessingConfig,
    formula: F,
}

impl<F> FnGenerator<F>
where
    F: Fn(&[f64], f64) -> Vec<f64> + Send + Sync,
{
    pub fn new(info: GeneratorInfo, formula: F) -> Self {
        Self {
            info,
            processing: ProcessingConfig::default(),
            formula,
        }
    }

    /// Override the default processing flags
    pub fn with_processing(mut self, processing: ProcessingConfig) -> Self {
        self.processing = processing;
        self
    }
}

impl<F> WaveformGenerator for FnGenerator<F>
where
    F: Fn(&[f64], f64) -> Vec<f64> + Send + Sync,
{
    fn info(&self) -> &GeneratorInfo {
        &self.info
    }

    fn generate(&self, theta: &[f64], u: f64) -> Vec<f64> {
        (self.formula)(theta, u)
    }

    fn processing(&self) -> ProcessingConfig {
        self.processing
    }
}

impl<F> fmt::Debug for FnGenerator<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnGenerator")
            .field("info", &self.info)
            .field("processing", &self.processing)
            .finish_non_exhaustive()
    }
}

/// numpy-style sign: zero maps to zero
#[inline]
pub(crate) fn sign(x: f64) -> f64 {
    if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        0.0
    }
}
