//! CLI Command Implementations
//!
//! Implements the actual logic for each CLI command.

use std::path::Path;

use log::{info, warn};

use crate::config::{BatchPlan, WavetableConfig};
use crate::dsp::analysis::{linear_to_db, FrameStats};
use crate::engine::{self, BatchSummary, ExportReport};
use crate::error::Result;
use crate::generators::{validate_generator, GeneratorCatalog};

/// Render one generator from the catalog.
pub fn generate(catalog: &GeneratorCatalog, config: &WavetableConfig) -> Result<ExportReport> {
    info!("Generating: {}", config.waveform_name);

    let generator = catalog.get(&config.waveform_name)?;
    let report = engine::render_wavetable(generator.as_ref(), config)?;

    println!("Saved: {}", report.path.display());
    println!(
        "{} frames x {} samples, {} Hz, {}-bit{}",
        report.frame_count,
        report.frame_size,
        report.sample_rate,
        report.bit_depth,
        if config.float_samples { " float" } else { "" }
    );
    println!("SHA-256: {}", report.sha256);

    Ok(report)
}

/// List generators in the catalog.
pub fn list(catalog: &GeneratorCatalog) -> Result<()> {
    if catalog.is_empty() {
        println!("No generators registered.");
        return Ok(());
    }

    println!("Available generators:");
    println!("{:-<60}", "");

    for info in catalog.list_info() {
        println!("{:<24} {}", info.id, info.name);
        println!("{:<24} {}", "", info.description);
        if !info.tags.is_empty() {
            println!("{:<24} tags: {}", "", info.tags.join(", "));
        }
    }

    println!("{:-<60}", "");
    println!("{} generator(s)", catalog.len());

    Ok(())
}

/// Validate every generator. Returns the number that failed.
pub fn validate(catalog: &GeneratorCatalog) -> Result<usize> {
    info!("Validating {} generator(s)", catalog.len());

    let mut failed = 0;
    for (_, generator) in catalog.iter() {
        let report = validate_generator(generator.as_ref())?;

        let status = if report.is_valid() { "ok" } else { "FAILED" };
        println!("{:<24} {}", report.id, status);
        for error in &report.errors {
            println!("    error: {}", error);
        }
        for warning in &report.warnings {
            println!("    warning: {}", warning);
        }

        if !report.is_valid() {
            failed += 1;
        }
    }

    println!(
        "{} passed, {} failed",
        catalog.len() - failed,
        failed
    );

    Ok(failed)
}

/// Render every generator across a batch plan.
pub fn batch(
    catalog: &GeneratorCatalog,
    output_dir: &Path,
    plan_path: Option<&Path>,
) -> Result<BatchSummary> {
    let plan = match plan_path {
        Some(path) => {
            info!("Loading batch plan: {}", path.display());
            BatchPlan::load(path)?
        }
        None => BatchPlan::default(),
    };

    let summary = engine::run_batch(catalog, &plan, output_dir)?;

    println!(
        "Batch complete: {}/{} files written to {}",
        summary.succeeded,
        summary.attempted,
        output_dir.display()
    );
    for failure in &summary.failures {
        println!("    failed: {} ({})", failure.filename, failure.error);
    }

    Ok(summary)
}

/// Print statistics for each frame of a wavetable file.
pub fn inspect(path: &Path, frame_size: usize) -> Result<()> {
    info!("Inspecting: {}", path.display());

    let table = engine::read_wavetable(path, frame_size)?;

    println!("File: {}", path.display());
    println!(
        "{} frames x {} samples, {} Hz, {}-bit{}",
        table.frame_count,
        table.frame_size,
        table.sample_rate,
        table.bit_depth,
        if table.float_samples { " float" } else { "" }
    );
    println!("{:-<60}", "");
    println!(
        "{:>6} {:>12} {:>10} {:>10} {:>10}",
        "frame", "dc", "peak dB", "rms dB", "seam"
    );

    for (i, frame) in table.frames().enumerate() {
        let stats = FrameStats::analyze(frame);
        println!(
            "{:>6} {:>12.2e} {:>10.2} {:>10.2} {:>10.4}",
            i,
            stats.mean,
            linear_to_db(stats.peak),
            linear_to_db(stats.rms),
            stats.seam
        );
        if stats.peak > 1.0 {
            warn!("Frame {} peaks above full scale", i);
        }
    }

    Ok(())
}

/// Delete generated files from the output directory.
pub fn clean(output_dir: &Path) -> Result<usize> {
    let removed = engine::clean_output_dir(output_dir)?;
    println!("Removed {} file(s) from {}", removed, output_dir.display());
    Ok(removed)
}
