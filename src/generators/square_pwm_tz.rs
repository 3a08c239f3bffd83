//! Through-zero PWM square

use super::{GeneratorInfo, WaveformGenerator};

/// Comparator threshold below which a difference counts as zero
const COMPARATOR_EPSILON: f64 = 1e-12;

/// Square wave from a sine compared against a moving threshold
///
/// `u` maps linearly to the threshold `2u - 1`, sweeping the pulse width
/// through zero from fully high to fully low.
#[derive(Debug, Clone)]
pub struct SquarePwmTz {
    info: GeneratorInfo,
}

impl SquarePwmTz {
    pub fn new() -> Self {
        Self {
            info: GeneratorInfo::new("square_pwm_tz", "Through-zero PWM square wave via comparator")
                .with_name("Square PWM TZ")
                .with_author("Kristoffer Ekstrand")
                .with_tags(&["PWM", "square", "through-zero"])
                .with_collections(&["PWM"])
                .with_keywords(&["PWM", "square", "through-zero"]),
        }
    }
}

impl Default for SquarePwmTz {
    fn default() -> Self {
        Self::new()
    }
}

impl WaveformGenerator for SquarePwmTz {
    fn info(&self) -> &GeneratorInfo {
        &self.info
    }

    fn generate(&self, theta: &[f64], u: f64) -> Vec<f64> {
        let threshold = (2.0 * u - 1.0).clamp(-1.0, 1.0);

        theta
            .iter()
            .map(|t| {
                let d = t.sin() - threshold;
                if d > COMPARATOR_EPSILON {
                    1.0
                } else if d < -COMPARATOR_EPSILON {
                    -1.0
                } else {
                    0.0
                }
            })
            .collect()
    }
}
