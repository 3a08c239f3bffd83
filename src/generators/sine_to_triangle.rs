//! Sine to triangle morph

use std::f64::consts::FRAC_2_PI;

use super::{GeneratorInfo, WaveformGenerator};

/// Crossfades a pure sine into a triangle built as `(2/π)·asin(sin θ)`
#[derive(Debug, Clone)]
pub struct SineToTriangle {
    info: GeneratorInfo,
}

impl SineToTriangle {
    pub fn new() -> Self {
        Self {
            info: GeneratorInfo::new("sine_to_triangle", "Sine to triangle morph generator")
                .with_author("Kristoffer Ekstrand")
                .with_tags(&["morph", "sine", "triangle"])
                .with_collections(&["morphing"])
                .with_keywords(&["sine", "triangle", "morph"]),
        }
    }
}

impl Default for SineToTriangle {
    fn default() -> Self {
        Self::new()
    }
}

impl WaveformGenerator for SineToTriangle {
    fn info(&self) -> &GeneratorInfo {
        &self.info
    }

    fn generate(&self, theta: &[f64], u: f64) -> Vec<f64> {
        theta
            .iter()
            .map(|t| {
                let sine = t.sin();
                let triangle = FRAC_2_PI * sine.asin();
                (1.0 - u) * sine + u * triangle
            })
            .collect()
    }
}
