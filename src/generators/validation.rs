//! Generator self-check
//!
//! Runs a generator on a small grid at the start, middle and end of the morph
//! range and reports every problem found instead of stopping at the first.

use std::panic::{self, AssertUnwindSafe};

use log::{debug, warn};

use super::WaveformGenerator;
use crate::dsp::analysis::peak;
use crate::engine::{build_phase_grid, invoke};
use crate::error::Result;

/// Grid size used for validation runs
pub const VALIDATION_SAMPLE_SIZE: usize = 128;

/// Morph values every generator is exercised at
const VALIDATION_MORPH_VALUES: [f64; 3] = [0.0, 0.5, 1.0];

/// Outcome of validating one generator
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeneratorReport {
    pub id: String,
    /// Problems that make the generator unusable
    pub errors: Vec<String>,
    /// Suspicious but renderable output (e.g. silence)
    pub warnings: Vec<String>,
}

impl GeneratorReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Validate metadata and output shape of a generator
pub fn validate_generator(generator: &dyn WaveformGenerator) -> Result<GeneratorReport> {
    let mut report = GeneratorReport {
        id: generator.id().to_string(),
        ..Default::default()
    };

    if let Err(e) = generator.info().validate() {
        report.errors.push(format!("Invalid metadata: {}", e));
    }

    let grid = build_phase_grid(VALIDATION_SAMPLE_SIZE)?;

    for (i, &u) in VALIDATION_MORPH_VALUES.iter().enumerate() {
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| invoke(generator, &grid, u, i)));

        match outcome {
            Ok(Ok(frame)) => {
                if peak(&frame) == 0.0 {
                    report
                        .warnings
                        .push(format!("Output is silent at u = {}", u));
                }
            }
            Ok(Err(e)) => report.errors.push(format!("u = {}: {}", u, e)),
            Err(_) => report.errors.push(format!("u = {}: generate() panicked", u)),
        }
    }

    if report.is_valid() {
        debug!("Generator '{}' passed validation", report.id);
    } else {
        warn!(
            "Generator '{}' failed validation with {} error(s)",
            report.id,
            report.errors.len()
        );
    }

    Ok(report)
}
