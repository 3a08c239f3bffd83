//! End-to-end rendering
//!
//! `validate config -> assemble -> export`, plus a sequential batch driver
//! over a [`BatchPlan`].

use std::path::Path;

use log::{error, info};
use serde::Serialize;

use super::assembler::Assembler;
use super::io::{export, ExportReport};
use crate::config::{BatchPlan, WavetableConfig};
use crate::error::Result;
use crate::generators::{GeneratorCatalog, WaveformGenerator};

/// Render one wavetable to `config.output_path()`
///
/// The whole configuration is validated before the generator is called, and
/// the file is only written once every frame has been generated.
pub fn render_wavetable(
    generator: &dyn WaveformGenerator,
    config: &WavetableConfig,
) -> Result<ExportReport> {
    config.validate()?;
    let export_config = config.export_config();

    let buffer = Assembler::new()
        .with_zero_crossing_alignment(config.align_zero_crossing)
        .assemble(generator, config.frames, config.frame_size)?;

    export(buffer, &export_config)
}

/// A batch combination that did not render
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchFailure {
    pub generator: String,
    pub filename: String,
    pub error: String,
}

/// Outcome of [`run_batch`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub attempted: usize,
    pub succeeded: usize,
    pub failures: Vec<BatchFailure>,
}

impl BatchSummary {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Render every catalog generator for every combination in `plan`
///
/// A failing combination is logged and recorded, and the batch moves on.
/// Only an invalid plan aborts the run, before anything is rendered.
pub fn run_batch(
    catalog: &GeneratorCatalog,
    plan: &BatchPlan,
    output_dir: &Path,
) -> Result<BatchSummary> {
    plan.validate()?;

    let total = catalog.len() * plan.combinations();
    info!(
        "Batch: {} generators x {} combinations = {} files",
        catalog.len(),
        plan.combinations(),
        total
    );

    let mut summary = BatchSummary::default();
    for (id, generator) in catalog.iter() {
        for config in plan.configs(id, output_dir) {
            summary.attempted += 1;
            info!("[{}/{}] {}", summary.attempted, total, config.filename());

            match render_wavetable(generator.as_ref(), &config) {
                Ok(_) => summary.succeeded += 1,
                Err(e) => {
                    error!("{} failed: {}", config.filename(), e);
                    summary.failures.push(BatchFailure {
                        generator: id.to_string(),
                        filename: config.filename(),
                        error: e.to_string(),
                    });
                }
            }
        }
    }

    info!(
        "Batch complete: {}/{} succeeded",
        summary.succeeded, summary.attempted
    );
    Ok(summary)
}
