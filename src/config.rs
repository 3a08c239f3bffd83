//! Render configuration
//!
//! [`WavetableConfig`] describes one render, [`BatchPlan`] the matrix of
//! frame counts, sample rates and bit depths a batch run walks through.
//! Both are validated before any generator is called.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::engine::{ExportConfig, DEFAULT_FRAMES, DEFAULT_FRAME_SIZE};
use crate::error::{MorphError, Result};

pub use crate::engine::{SUPPORTED_BIT_DEPTHS, SUPPORTED_SAMPLE_RATES};
pub use crate::generators::VALIDATION_SAMPLE_SIZE;

pub const DEFAULT_SAMPLE_RATE: u32 = 44100;
pub const DEFAULT_BIT_DEPTH: u16 = 16;
pub const DEFAULT_OUTPUT_DIR: &str = "wavetable_dist";

/// Settings for a single wavetable render
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WavetableConfig {
    pub frames: usize,
    pub frame_size: usize,
    pub sample_rate: u32,
    pub bit_depth: u16,
    pub output_dir: PathBuf,
    pub waveform_name: String,
    pub float_samples: bool,
    pub align_zero_crossing: bool,
}

impl Default for WavetableConfig {
    fn default() -> Self {
        Self {
            frames: DEFAULT_FRAMES,
            frame_size: DEFAULT_FRAME_SIZE,
            sample_rate: DEFAULT_SAMPLE_RATE,
            bit_depth: DEFAULT_BIT_DEPTH,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            waveform_name: String::new(),
            float_samples: false,
            align_zero_crossing: false,
        }
    }
}

impl WavetableConfig {
    /// Defaults for the named waveform
    pub fn new(waveform_name: impl Into<String>) -> Self {
        Self {
            waveform_name: waveform_name.into(),
            ..Default::default()
        }
    }

    /// Check every field; nothing is generated if this fails
    pub fn validate(&self) -> Result<()> {
        if self.waveform_name.trim().is_empty() {
            return Err(MorphError::config("waveform_name", "must not be empty"));
        }
        if self.frames == 0 {
            return Err(MorphError::config("frames", "must be at least 1, got 0"));
        }
        if self.frame_size == 0 {
            return Err(MorphError::config("frame_size", "must be at least 1, got 0"));
        }
        if self.output_dir.as_os_str().is_empty() {
            return Err(MorphError::config("output_dir", "must not be empty"));
        }
        self.export_config().validate()
    }

    /// `{name}_{frames}frames_{rate}Hz_{bits}bit.wav`, with `_float` before
    /// the extension for IEEE float output
    pub fn filename(&self) -> String {
        format!(
            "{}_{}frames_{}Hz_{}bit{}.wav",
            self.waveform_name,
            self.frames,
            self.sample_rate,
            self.bit_depth,
            if self.float_samples { "_float" } else { "" }
        )
    }

    pub fn output_path(&self) -> PathBuf {
        self.output_dir.join(self.filename())
    }

    pub fn export_config(&self) -> ExportConfig {
        ExportConfig::new(self.sample_rate, self.bit_depth, self.output_path())
            .with_float_samples(self.float_samples)
    }
}

/// Frame count × sample rate × bit depth matrix for batch renders
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchPlan {
    pub frame_counts: Vec<usize>,
    pub sample_rates: Vec<u32>,
    pub bit_depths: Vec<u16>,
}

impl Default for BatchPlan {
    fn default() -> Self {
        Self {
            frame_counts: vec![64, 128, 256, 512],
            sample_rates: vec![44100, 48000],
            bit_depths: vec![16, 24],
        }
    }
}

impl BatchPlan {
    /// Load a plan from a JSON file
    ///
    /// Missing keys fall back to the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let plan: BatchPlan = serde_json::from_reader(reader)?;
        plan.validate()?;
        Ok(plan)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let file = File::create(path)?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.frame_counts.is_empty() {
            return Err(MorphError::config("frame_counts", "must not be empty"));
        }
        if self.frame_counts.contains(&0) {
            return Err(MorphError::config("frame_counts", "entries must be at least 1"));
        }
        if self.sample_rates.is_empty() {
            return Err(MorphError::config("sample_rates", "must not be empty"));
        }
        if let Some(rate) = self
            .sample_rates
            .iter()
            .find(|r| !SUPPORTED_SAMPLE_RATES.contains(r))
        {
            return Err(MorphError::config(
                "sample_rates",
                format!("must be drawn from {:?}, got {}", SUPPORTED_SAMPLE_RATES, rate),
            ));
        }
        if self.bit_depths.is_empty() {
            return Err(MorphError::config("bit_depths", "must not be empty"));
        }
        if let Some(bits) = self
            .bit_depths
            .iter()
            .find(|b| !SUPPORTED_BIT_DEPTHS.contains(b))
        {
            return Err(MorphError::config(
                "bit_depths",
                format!("must be drawn from {:?}, got {}", SUPPORTED_BIT_DEPTHS, bits),
            ));
        }
        Ok(())
    }

    /// Renders per generator
    pub fn combinations(&self) -> usize {
        self.frame_counts.len() * self.sample_rates.len() * self.bit_depths.len()
    }

    /// One config per combination, in frame count → rate → depth order
    pub fn configs(&self, waveform_name: &str, output_dir: &Path) -> Vec<WavetableConfig> {
        let mut configs = Vec::with_capacity(self.combinations());
        for &frames in &self.frame_counts {
            for &sample_rate in &self.sample_rates {
                for &bit_depth in &self.bit_depths {
                    configs.push(WavetableConfig {
                        frames,
                        sample_rate,
                        bit_depth,
                        output_dir: output_dir.to_path_buf(),
                        ..WavetableConfig::new(waveform_name)
                    });
                }
            }
        }
        configs
    }
}
