//! CLI Module
//!
//! Command-line interface for rendering and managing wavetables.

pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::{DEFAULT_BIT_DEPTH, DEFAULT_OUTPUT_DIR, DEFAULT_SAMPLE_RATE};
use crate::engine::{DEFAULT_FRAMES, DEFAULT_FRAME_SIZE};

/// Morphtable - offline renderer for morphing wavetables
#[derive(Parser, Debug)]
#[command(name = "morphtable-cli")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render one generator to a WAV file
    #[command(name = "generate")]
    Generate {
        /// Generator id (see `list`)
        name: String,

        /// Number of frames
        #[arg(short, long, default_value_t = DEFAULT_FRAMES)]
        frames: usize,

        /// Sample rate (44100, 48000 or 96000)
        #[arg(short, long, default_value_t = DEFAULT_SAMPLE_RATE)]
        rate: u32,

        /// Bit depth (16, 24 or 32)
        #[arg(short, long, default_value_t = DEFAULT_BIT_DEPTH)]
        bits: u16,

        /// Output directory
        #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR)]
        output: PathBuf,

        /// Samples per frame
        #[arg(long, default_value_t = DEFAULT_FRAME_SIZE)]
        frame_size: usize,

        /// Write 32-bit IEEE float samples instead of integer PCM
        #[arg(long)]
        float: bool,

        /// Start every frame on a rising zero crossing
        #[arg(long)]
        align_zero_crossing: bool,
    },

    /// List available generators
    #[command(name = "list")]
    List,

    /// Check every generator for metadata and output problems
    #[command(name = "validate")]
    Validate,

    /// Render every generator across a batch plan
    #[command(name = "batch")]
    Batch {
        /// Output directory
        #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR)]
        output: PathBuf,

        /// JSON batch plan (frame_counts, sample_rates, bit_depths)
        #[arg(short, long)]
        plan: Option<PathBuf>,
    },

    /// Print per-frame statistics of a rendered wavetable
    #[command(name = "inspect")]
    Inspect {
        /// Wavetable WAV file
        file: PathBuf,

        /// Samples per frame
        #[arg(long, default_value_t = DEFAULT_FRAME_SIZE)]
        frame_size: usize,
    },

    /// Delete generated WAV files from the output directory
    #[command(name = "clean")]
    Clean {
        /// Output directory
        #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR)]
        output: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_defaults() {
        let cli = Cli::try_parse_from(["morphtable", "generate", "sine_to_saw"]).unwrap();
        match cli.command {
            Some(Commands::Generate {
                name,
                frames,
                rate,
                bits,
                output,
                float,
                align_zero_crossing,
                ..
            }) => {
                assert_eq!(name, "sine_to_saw");
                assert_eq!(frames, 256);
                assert_eq!(rate, 44100);
                assert_eq!(bits, 16);
                assert_eq!(output, PathBuf::from("wavetable_dist"));
                assert!(!float);
                assert!(!align_zero_crossing);
            }
            other => panic!("Expected Generate, got: {:?}", other),
        }
    }

    #[test]
    fn test_global_verbose_after_subcommand() {
        let cli = Cli::try_parse_from(["morphtable", "list", "--verbose"]).unwrap();
        assert!(cli.verbose);
    }

    #[test]
    fn test_batch_with_plan() {
        let cli =
            Cli::try_parse_from(["morphtable", "batch", "-o", "out", "--plan", "plan.json"]).unwrap();
        match cli.command {
            Some(Commands::Batch { output, plan }) => {
                assert_eq!(output, PathBuf::from("out"));
                assert_eq!(plan, Some(PathBuf::from("plan.json")));
            }
            other => panic!("Expected Batch, got: {:?}", other),
        }
    }

    #[test]
    fn test_non_numeric_frames_rejected() {
        assert!(Cli::try_parse_from(["morphtable", "generate", "x", "--frames", "many"]).is_err());
    }
}
