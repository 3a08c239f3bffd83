//! Rendering engine
//!
//! The numerical core:
//! - Phase grid construction
//! - Generator invocation and frame checks
//! - Frame assembly along the morph ramp
//! - Quantization and WAV I/O

pub mod assembler;
pub mod frame;
pub mod io;
pub mod phase;
pub mod pipeline;

pub use assembler::{assemble, morph_value, morph_values, Assembler, WavetableBuffer, DEFAULT_FRAMES};
pub use frame::{invoke, validate_morph, FrameBuffer};
pub use io::{
    clean_output_dir, export, read_wavetable, DecodedWavetable, ExportConfig,
    ExportReport, SUPPORTED_BIT_DEPTHS, SUPPORTED_SAMPLE_RATES,
};
pub use phase::{build_phase_grid, PhaseGrid, DEFAULT_FRAME_SIZE};
pub use pipeline::{render_wavetable, run_batch, BatchFailure, BatchSummary};
