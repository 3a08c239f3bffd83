//! Integration Tests
//!
//! End-to-end tests for the Morphtable rendering pipeline.

use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use approx::assert_abs_diff_eq;
use hound::WavReader;
use pretty_assertions::assert_eq;
use tempfile::tempdir;
use test_case::test_case;

use morphtable::config::{BatchPlan, WavetableConfig};
use morphtable::dsp::analysis::{mean, peak};
use morphtable::engine::{
    assemble, read_wavetable, render_wavetable, run_batch, Assembler, ExportConfig,
};
use morphtable::generators::{FnGenerator, GeneratorCatalog, GeneratorInfo, WaveformGenerator};
use morphtable::MorphError;

/// Helper to build a closure-backed generator
fn formula<F>(id: &str, f: F) -> FnGenerator<F>
where
    F: Fn(&[f64], f64) -> Vec<f64> + Send + Sync,
{
    FnGenerator::new(GeneratorInfo::new(id, "Test formula"), f)
}

fn small_config(name: &str, dir: &Path, frames: usize, frame_size: usize) -> WavetableConfig {
    WavetableConfig {
        frames,
        frame_size,
        output_dir: dir.to_path_buf(),
        ..WavetableConfig::new(name)
    }
}

// === Full Pipeline Tests ===

#[test_case("linear_interpolation")]
#[test_case("sine_to_saw")]
#[test_case("sine_to_triangle")]
#[test_case("square_pwm_tz")]
fn test_builtin_renders_and_reads_back(name: &str) {
    let dir = tempdir().unwrap();
    let catalog = GeneratorCatalog::with_defaults().unwrap();
    let generator = catalog.get(name).unwrap();

    let report =
        render_wavetable(generator.as_ref(), &small_config(name, dir.path(), 8, 256)).unwrap();

    let decoded = read_wavetable(&report.path, 256).unwrap();
    assert_eq!(decoded.frame_count, 8);
    for frame in decoded.frames() {
        assert!(peak(frame) <= 1.0 + 1e-4);
    }
}

#[test]
fn test_sine_to_triangle_endpoints() {
    let catalog = GeneratorCatalog::with_defaults().unwrap();
    let generator = catalog.get("sine_to_triangle").unwrap();
    let table = assemble(generator.as_ref(), 3, 512).unwrap();

    // first frame is a sine, last a triangle (peak-normalized)
    let first = table.frame(0).unwrap();
    let last = table.frame(2).unwrap();
    assert_abs_diff_eq!(first[128], 1.0, epsilon = 1e-9);
    assert_abs_diff_eq!(last[64], 0.5, epsilon = 1e-9);
    assert_abs_diff_eq!(first[64], (std::f64::consts::FRAC_PI_4).sin(), epsilon = 1e-9);
}

#[test]
fn test_frame_invariants_hold_across_table() {
    let skewed = formula("skewed", |theta, u| {
        theta
            .iter()
            .map(|t| 3.0 * t.sin() + u * (2.0 * t).cos() + 0.7)
            .collect()
    });

    let table = assemble(&skewed, 32, 1024).unwrap();

    assert_eq!(table.len(), 32 * 1024);
    for frame in table.frames() {
        assert_abs_diff_eq!(mean(frame), 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(peak(frame), 1.0, epsilon = 1e-9);
    }
}

// === Edge Cases ===

#[test]
fn test_constant_zero_generator_exports_silence() {
    let dir = tempdir().unwrap();
    let zero = formula("constant_zero", |theta, _u| vec![0.0; theta.len()]);

    let report = render_wavetable(&zero, &small_config("constant_zero", dir.path(), 4, 64)).unwrap();

    let mut reader = WavReader::open(&report.path).unwrap();
    let samples: Vec<i16> = reader.samples::<i16>().map(|s| s.unwrap()).collect();
    assert_eq!(samples.len(), 4 * 64);
    assert!(samples.iter().all(|&s| s == 0));
}

#[test]
fn test_single_frame_uses_zero_morph() {
    let seen = std::sync::Mutex::new(Vec::new());
    let recorder = formula("recorder", |theta, u| {
        seen.lock().unwrap().push(u);
        theta.iter().map(|t| t.sin()).collect()
    });

    let table = assemble(&recorder, 1, 2048).unwrap();

    assert_eq!(table.len(), 2048);
    assert_eq!(*seen.lock().unwrap(), vec![0.0]);
}

#[test]
fn test_wrong_length_writes_no_file() {
    let dir = tempdir().unwrap();
    let short = formula("short", |theta, _u| vec![0.1; theta.len() - 1]);
    let config = small_config("short", dir.path(), 4, 64);

    let err = render_wavetable(&short, &config).unwrap_err();

    assert!(matches!(err, MorphError::GenerationFailure { .. }));
    assert!(!config.output_path().exists());
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn test_infinity_reports_frame_index() {
    let dir = tempdir().unwrap();
    // dividing by u blows up in frame 0 only
    let fragile = formula("fragile", |theta, u| theta.iter().map(|t| t.cos() / u).collect());
    let config = small_config("fragile", dir.path(), 5, 32);

    let err = render_wavetable(&fragile, &config).unwrap_err();

    assert_eq!(err.frame_index(), Some(0));
    assert!(err.to_string().contains("fragile"));
    assert!(!config.output_path().exists());
}

#[test]
fn test_nan_in_later_frame_reports_frame_index() {
    let dir = tempdir().unwrap();
    let late_nan = formula("late_nan", |theta, u| {
        let mut out: Vec<f64> = theta.iter().map(|t| t.sin()).collect();
        if u > 0.5 {
            out[7] = f64::NAN;
        }
        out
    });
    let config = small_config("late_nan", dir.path(), 5, 32);

    let err = render_wavetable(&late_nan, &config).unwrap_err();

    assert_eq!(err.frame_index(), Some(3));
    let message = err.to_string();
    assert!(message.contains("late_nan"));
    assert!(message.contains("NaN at sample 7"));
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn test_huge_finite_output_exports_full_scale() {
    let dir = tempdir().unwrap();
    let loud = formula("loud", |theta, _u| {
        theta.iter().map(|t| 1e307 * (t.sin() + 0.5)).collect()
    });

    let report = render_wavetable(&loud, &small_config("loud", dir.path(), 2, 64)).unwrap();

    let decoded = read_wavetable(&report.path, 64).unwrap();
    for frame in decoded.frames() {
        assert_abs_diff_eq!(peak(frame), 1.0, epsilon = 1e-4);
    }
}

#[test]
fn test_bit_depth_20_fails_before_generation() {
    let dir = tempdir().unwrap();
    let calls = AtomicUsize::new(0);
    let counting = formula("counting", |theta, _u| {
        calls.fetch_add(1, Ordering::SeqCst);
        theta.iter().map(|t| t.sin()).collect()
    });
    let config = WavetableConfig {
        bit_depth: 20,
        ..small_config("counting", dir.path(), 4, 64)
    };

    let err = render_wavetable(&counting, &config).unwrap_err();

    assert_eq!(err.error_code(), "INVALID_CONFIGURATION");
    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn test_zero_grid_size_is_configuration_error() {
    let sine = formula("sine", |theta, _u| theta.iter().map(|t| t.sin()).collect());
    let err = assemble(&sine, 4, 0).unwrap_err();
    assert_eq!(err.error_code(), "INVALID_CONFIGURATION");
}

// === Round Trip ===

#[test]
fn test_16bit_round_trip_within_one_step() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("round_trip.wav");
    let sine = formula("sine", |theta, u| {
        theta.iter().map(|t| t.sin() + u * (3.0 * t).sin() / 3.0).collect()
    });

    let table = assemble(&sine, 16, 2048).unwrap();
    let expected = table.samples().to_vec();
    morphtable::engine::export(table, &ExportConfig::new(44100, 16, &path)).unwrap();

    let decoded = read_wavetable(&path, 2048).unwrap();
    assert_eq!(decoded.samples.len(), expected.len());
    let step = 1.0 / 32767.0;
    for (a, b) in expected.iter().zip(&decoded.samples) {
        assert!((a - b).abs() <= step, "{} vs {}", a, b);
    }
}

#[test]
fn test_zero_crossing_alignment_end_to_end() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("aligned.wav");
    let shifted = formula("shifted", |theta, u| {
        theta.iter().map(|t| (t + 0.5 + u).sin()).collect()
    });

    let table = Assembler::new()
        .with_zero_crossing_alignment(true)
        .assemble(&shifted, 4, 512)
        .unwrap();
    morphtable::engine::export(table, &ExportConfig::new(48000, 24, &path)).unwrap();

    let decoded = read_wavetable(&path, 512).unwrap();
    for frame in decoded.frames() {
        assert!(frame[0] >= 0.0);
        assert!(frame[511] <= 0.0);
    }
}

// === Batch ===

#[test]
fn test_batch_over_catalog() {
    let dir = tempdir().unwrap();
    let noisy: Arc<dyn WaveformGenerator> = Arc::new(formula("always_nan", |theta: &[f64], _u: f64| {
        vec![f64::NAN; theta.len()]
    }));
    let mut builder = GeneratorCatalog::builder();
    builder.register_builtins().unwrap();
    builder.register(noisy).unwrap();
    let catalog = builder.build();

    let plan = BatchPlan {
        frame_counts: vec![2, 4],
        sample_rates: vec![44100, 96000],
        bit_depths: vec![16],
    };

    let summary = run_batch(&catalog, &plan, dir.path()).unwrap();

    assert_eq!(summary.attempted, 5 * 4);
    assert_eq!(summary.succeeded, 4 * 4);
    assert_eq!(summary.failures.len(), 4);
    assert!(dir
        .path()
        .join("square_pwm_tz_4frames_96000Hz_16bit.wav")
        .exists());
}
