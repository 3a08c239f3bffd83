//! Sine to sawtooth morph
//!
//! Also the template for writing new generators: give the struct an
//! id/description in `new()`, then put the formula in `generate()`.

use std::f64::consts::PI;

use super::{GeneratorInfo, WaveformGenerator};

#[derive(Debug, Clone)]
pub struct SineToSaw {
    info: GeneratorInfo,
}

impl SineToSaw {
    pub fn new() -> Self {
        Self {
            info: GeneratorInfo::new("sine_to_saw", "Sine to sawtooth morphing generator")
                .with_author("Wavetable Synthesis Project")
                .with_tags(&["example", "morphing", "sine", "sawtooth"])
                .with_collections(&["examples"])
                .with_keywords(&["morphing", "sine", "sawtooth", "interpolation"]),
        }
    }
}

impl Default for SineToSaw {
    fn default() -> Self {
        Self::new()
    }
}

impl WaveformGenerator for SineToSaw {
    fn info(&self) -> &GeneratorInfo {
        &self.info
    }

    fn generate(&self, theta: &[f64], u: f64) -> Vec<f64> {
        // saw ramps from -1 towards 1 over the cycle: θ/π - 1
        let mix: Vec<f64> = theta
            .iter()
            .map(|t| t.sin() * (1.0 - u) + (t / PI - 1.0) * u)
            .collect();

        let peak = mix.iter().fold(0.0_f64, |acc, s| acc.max(s.abs()));
        if peak > 0.0 {
            mix.into_iter().map(|s| s / peak).collect()
        } else {
            mix
        }
    }
}
