//! Wavetable file I/O
//!
//! Quantizes an assembled table and writes it as a mono WAV stream. Frame
//! boundaries are not encoded in the file; readers recover them from the
//! total sample count and a known frame size.
//!
//! Output is written to a sibling `.part` file and renamed into place once
//! the writer is finalized, so a failed export never leaves a truncated
//! `.wav` at the target path.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use log::{debug, info, warn};
use serde::Serialize;
use sha2::{Digest, Sha256};
use walkdir::WalkDir;

use super::assembler::WavetableBuffer;
use crate::error::{MorphError, Result};

/// Sample rates accepted for export
pub const SUPPORTED_SAMPLE_RATES: [u32; 3] = [44100, 48000, 96000];

/// Bit depths accepted for export
pub const SUPPORTED_BIT_DEPTHS: [u16; 3] = [16, 24, 32];

/// Export format configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportConfig {
    pub sample_rate: u32,
    /// 16, 24 or 32
    pub bit_depth: u16,
    /// Write IEEE float instead of integer PCM (32-bit only)
    pub float_samples: bool,
    pub output_path: PathBuf,
}

impl ExportConfig {
    /// Integer PCM export to `output_path`
    pub fn new(sample_rate: u32, bit_depth: u16, output_path: impl Into<PathBuf>) -> Self {
        ExportConfig {
            sample_rate,
            bit_depth,
            float_samples: false,
            output_path: output_path.into(),
        }
    }

    pub fn with_float_samples(mut self, float_samples: bool) -> Self {
        self.float_samples = float_samples;
        self
    }

    /// Check every field against the supported sets
    ///
    /// # Errors
    /// * `InvalidConfiguration` - unsupported rate or depth, float samples at a
    ///   depth other than 32, or an empty output path
    pub fn validate(&self) -> Result<()> {
        if !SUPPORTED_SAMPLE_RATES.contains(&self.sample_rate) {
            return Err(MorphError::config(
                "sample_rate",
                format!(
                    "must be one of {:?}, got {}",
                    SUPPORTED_SAMPLE_RATES, self.sample_rate
                ),
            ));
        }
        if !SUPPORTED_BIT_DEPTHS.contains(&self.bit_depth) {
            return Err(MorphError::config(
                "bit_depth",
                format!(
                    "must be one of {:?}, got {}",
                    SUPPORTED_BIT_DEPTHS, self.bit_depth
                ),
            ));
        }
        if self.float_samples && self.bit_depth != 32 {
            return Err(MorphError::config(
                "float_samples",
                format!("requires a bit depth of 32, got {}", self.bit_depth),
            ));
        }
        if self.output_path.as_os_str().is_empty() {
            return Err(MorphError::config("output_path", "must not be empty"));
        }
        Ok(())
    }

    /// WAV header for this configuration (always mono)
    pub fn wav_spec(&self) -> WavSpec {
        WavSpec {
            channels: 1,
            sample_rate: self.sample_rate,
            bits_per_sample: self.bit_depth,
            sample_format: if self.float_samples {
                SampleFormat::Float
            } else {
                SampleFormat::Int
            },
        }
    }
}

/// Summary of a finished export
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportReport {
    pub path: PathBuf,
    pub frame_count: usize,
    pub frame_size: usize,
    pub sample_count: usize,
    pub sample_rate: u32,
    pub bit_depth: u16,
    /// Hex SHA-256 of the written file
    pub sha256: String,
}

fn full_scale(bit_depth: u16) -> i64 {
    assert!(
        SUPPORTED_BIT_DEPTHS.contains(&bit_depth),
        "unsupported bit depth {}",
        bit_depth
    );
    (1i64 << (bit_depth - 1)) - 1
}

/// Scale a [-1, 1] sample to a signed integer of `bit_depth` bits
///
/// 1.0 maps to the largest positive code. Out-of-range input is clipped,
/// never wrapped.
pub(crate) fn quantize(sample: f64, bit_depth: u16) -> i32 {
    let max = full_scale(bit_depth);
    let min = -max - 1;
    (sample * max as f64).round().clamp(min as f64, max as f64) as i32
}

/// Inverse of [`quantize`]
pub(crate) fn dequantize(value: i32, bit_depth: u16) -> f64 {
    value as f64 / full_scale(bit_depth) as f64
}

fn part_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".part");
    PathBuf::from(name)
}

/// Write a table to disk
///
/// The config is validated before anything touches the filesystem.
///
/// # Errors
/// * `InvalidConfiguration` - see [`ExportConfig::validate`]; no file is
///   created or overwritten
/// * `ExportFailure` - the directory could not be created, or encoding,
///   writing or the final rename failed
pub fn export(buffer: WavetableBuffer, config: &ExportConfig) -> Result<ExportReport> {
    config.validate()?;

    let path = config.output_path.as_path();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .map_err(|e| MorphError::export(path, "could not create output directory", e))?;
    }

    let staging = part_path(path);
    if let Err(e) = write_samples(buffer.samples(), config, &staging) {
        if let Err(cleanup) = fs::remove_file(&staging) {
            debug!("No partial file to remove at {}: {}", staging.display(), cleanup);
        }
        return Err(e);
    }

    if let Err(e) = fs::rename(&staging, path) {
        if let Err(cleanup) = fs::remove_file(&staging) {
            debug!("Could not remove {}: {}", staging.display(), cleanup);
        }
        return Err(MorphError::export(path, "could not move file into place", e));
    }

    let bytes = fs::read(path).map_err(|e| MorphError::export(path, "could not read back", e))?;
    let sha256 = format!("{:x}", Sha256::digest(&bytes));

    info!("Saved: {}", path.display());

    Ok(ExportReport {
        path: path.to_path_buf(),
        frame_count: buffer.frame_count(),
        frame_size: buffer.frame_size(),
        sample_count: buffer.len(),
        sample_rate: config.sample_rate,
        bit_depth: config.bit_depth,
        sha256,
    })
}

fn write_samples(samples: &[f64], config: &ExportConfig, staging: &Path) -> Result<()> {
    let target = &config.output_path;
    let encode = |e: hound::Error| MorphError::export(target, "WAV encoding failed", e);

    let mut writer = WavWriter::create(staging, config.wav_spec()).map_err(encode)?;

    match (config.bit_depth, config.float_samples) {
        (32, true) => {
            for &sample in samples {
                writer.write_sample(sample as f32).map_err(encode)?;
            }
        }
        (16, _) => {
            for &sample in samples {
                writer
                    .write_sample(quantize(sample, 16) as i16)
                    .map_err(encode)?;
            }
        }
        (bits, _) => {
            // 24-bit stored as i32 in hound
            for &sample in samples {
                writer.write_sample(quantize(sample, bits)).map_err(encode)?;
            }
        }
    }

    writer.finalize().map_err(encode)
}

/// A wavetable read back from disk
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedWavetable {
    pub samples: Vec<f64>,
    pub frame_size: usize,
    pub frame_count: usize,
    pub sample_rate: u32,
    pub bit_depth: u16,
    pub float_samples: bool,
}

impl DecodedWavetable {
    pub fn frames(&self) -> impl Iterator<Item = &[f64]> {
        self.samples.chunks_exact(self.frame_size)
    }
}

/// Decode a mono wavetable WAV into f64 samples split into `frame_size` frames
///
/// # Errors
/// * `InvalidConfiguration` - `frame_size` is zero
/// * `InvalidAudio` - unreadable file, more than one channel, unsupported
///   sample format, or a sample count that is not a multiple of `frame_size`
pub fn read_wavetable(path: &Path, frame_size: usize) -> Result<DecodedWavetable> {
    if frame_size == 0 {
        return Err(MorphError::config("frame_size", "must be at least 1, got 0"));
    }

    let invalid = |reason: String| MorphError::InvalidAudio {
        path: path.to_path_buf(),
        reason,
    };

    let mut reader =
        WavReader::open(path).map_err(|e| invalid(format!("failed to open WAV file: {}", e)))?;
    let spec = reader.spec();

    if spec.channels != 1 {
        return Err(invalid(format!(
            "expected a mono file, found {} channels",
            spec.channels
        )));
    }

    let samples = match spec.sample_format {
        SampleFormat::Float => reader
            .samples::<f32>()
            .map(|s| s.map(f64::from))
            .collect::<std::result::Result<Vec<f64>, _>>(),
        SampleFormat::Int if SUPPORTED_BIT_DEPTHS.contains(&spec.bits_per_sample) => {
            let bits = spec.bits_per_sample;
            reader
                .samples::<i32>()
                .map(|s| s.map(|v| dequantize(v, bits)))
                .collect::<std::result::Result<Vec<f64>, _>>()
        }
        SampleFormat::Int => {
            return Err(invalid(format!(
                "{}-bit integer audio is not supported",
                spec.bits_per_sample
            )))
        }
    }
    .map_err(|e| invalid(format!("failed to read samples: {}", e)))?;

    if samples.is_empty() || samples.len() % frame_size != 0 {
        return Err(invalid(format!(
            "{} samples do not divide into frames of {}",
            samples.len(),
            frame_size
        )));
    }

    Ok(DecodedWavetable {
        frame_count: samples.len() / frame_size,
        samples,
        frame_size,
        sample_rate: spec.sample_rate,
        bit_depth: spec.bits_per_sample,
        float_samples: spec.sample_format == SampleFormat::Float,
    })
}

/// Delete generated `.wav` files (and stray `.part` files) under `dir`
///
/// Returns how many files were removed. A missing directory counts as
/// already clean.
pub fn clean_output_dir(dir: &Path) -> Result<usize> {
    if !dir.exists() {
        debug!("Nothing to clean, {} does not exist", dir.display());
        return Ok(0);
    }

    let mut removed = 0;
    for entry in WalkDir::new(dir) {
        let entry = entry.map_err(std::io::Error::from)?;
        if !entry.file_type().is_file() {
            continue;
        }
        let generated = entry
            .path()
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("wav") || ext == "part");
        if !generated {
            continue;
        }
        match fs::remove_file(entry.path()) {
            Ok(()) => {
                debug!("Removed {}", entry.path().display());
                removed += 1;
            }
            Err(e) => warn!("Could not remove {}: {}", entry.path().display(), e),
        }
    }

    info!("Removed {} file(s) from {}", removed, dir.display());
    Ok(removed)
}
