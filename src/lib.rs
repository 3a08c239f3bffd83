//! Morphtable - Offline Wavetable Renderer
//!
//! Renders multi-frame wavetables: each frame is one cycle of a waveform
//! formula, and consecutive frames morph under a single control `u` that
//! ramps from 0 to 1 across the table.
//!
//! # Architecture
//!
//! - Generators: per-cycle formulas behind the [`generators::WaveformGenerator`] trait
//! - Engine: phase grid, frame assembly, quantization and WAV export
//! - DSP: per-frame and per-table post-processing (DC removal, normalization)
//!
//! # Example
//! ```no_run
//! use morphtable::config::WavetableConfig;
//! use morphtable::generators::GeneratorCatalog;
//!
//! let catalog = GeneratorCatalog::with_defaults()?;
//! let generator = catalog.get("sine_to_triangle")?;
//! let report = morphtable::engine::render_wavetable(generator.as_ref(), &WavetableConfig::new("sine_to_triangle"))?;
//! println!("{}", report.path.display());
//! # Ok::<(), morphtable::MorphError>(())
//! ```

pub mod cli;
pub mod config;
pub mod dsp;
pub mod engine;
pub mod error;
pub mod generators;

pub use error::{MorphError, Result};
