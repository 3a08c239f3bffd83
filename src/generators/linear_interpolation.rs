//! Linear sine to square interpolation

use super::{sign, GeneratorInfo, WaveformGenerator};

#[derive(Debug, Clone)]
pub struct LinearInterpolation {
    info: GeneratorInfo,
}

impl LinearInterpolation {
    pub fn new() -> Self {
        Self {
            info: GeneratorInfo::new(
                "linear_interpolation",
                "Linear interpolation between sine and square",
            )
            .with_author("Wavetable Project")
            .with_tags(&["morph", "sine", "square", "linear", "interpolation"])
            .with_collections(&["educational", "morphing"])
            .with_keywords(&["linear", "interpolation", "morph"]),
        }
    }
}

impl Default for LinearInterpolation {
    fn default() -> Self {
        Self::new()
    }
}

impl WaveformGenerator for LinearInterpolation {
    fn info(&self) -> &GeneratorInfo {
        &self.info
    }

    fn generate(&self, theta: &[f64], u: f64) -> Vec<f64> {
        theta
            .iter()
            .map(|t| {
                let sine = t.sin();
                sine * (1.0 - u) + sign(sine) * u
            })
            .collect()
    }
}
