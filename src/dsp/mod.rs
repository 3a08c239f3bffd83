//! Frame post-processing
//!
//! Stages applied to every generated frame, in this order:
//! 1. DC removal (mean subtraction)
//! 2. Peak normalization to ±1.0
//! 3. Zero-crossing alignment (opt-in)
//!
//! plus the table-level DC/peak pass and safety clamp run once all frames
//! are assembled.

pub mod analysis;
mod process;

pub use process::{
    align_to_zero_crossing, clamp_amplitude, normalize_peak, remove_dc_offset, PostProcessor,
    ProcessingConfig, SILENCE_THRESHOLD,
};
