//! Excitation and decay energy distributions.

use rand::{Rng, RngCore};
use rand_distr::{Cauchy, Distribution, Normal};
use serde::{Deserialize, Serialize};

use crate::errors::{DecayError, ErrorInfo};

/// Line shape used to draw an excitation or decay energy (MeV).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "kebab-case")]
pub enum ExcitationDistribution {
    /// Delta function at a fixed energy.
    Spike {
        /// Energy returned by every draw.
        energy: f64,
    },
    /// Non-relativistic Breit-Wigner (Cauchy) resonance.
    BreitWigner {
        /// Resonance centroid.
        centroid: f64,
        /// Full width at half maximum.
        width: f64,
    },
    /// Normal distribution.
    Gaussian {
        /// Mean energy.
        mean: f64,
        /// Standard deviation.
        sigma: f64,
    },
    /// Flat distribution on `[low, high)`.
    Uniform {
        /// Lower edge.
        low: f64,
        /// Upper edge.
        high: f64,
    },
}

impl ExcitationDistribution {
    /// Breit-Wigner line shape that collapses to a spike for zero width.
    pub fn breit_wigner(centroid: f64, width: f64) -> Self {
        if width == 0.0 {
            ExcitationDistribution::Spike { energy: centroid }
        } else {
            ExcitationDistribution::BreitWigner { centroid, width }
        }
    }

    /// Draws one energy.
    pub fn sample(&self, rng: &mut dyn RngCore) -> Result<f64, DecayError> {
        match *self {
            ExcitationDistribution::Spike { energy } => Ok(energy),
            ExcitationDistribution::BreitWigner { centroid, width } => {
                if width == 0.0 {
                    return Ok(centroid);
                }
                let cauchy = Cauchy::new(centroid, 0.5 * width)
                    .map_err(|err| invalid_shape("breit-wigner", err.to_string()))?;
                Ok(cauchy.sample(rng))
            }
            ExcitationDistribution::Gaussian { mean, sigma } => {
                if sigma == 0.0 {
                    return Ok(mean);
                }
                let normal = Normal::new(mean, sigma)
                    .map_err(|err| invalid_shape("gaussian", err.to_string()))?;
                Ok(normal.sample(rng))
            }
            ExcitationDistribution::Uniform { low, high } => {
                if !(low <= high) {
                    return Err(invalid_shape("uniform", "low edge above high edge"));
                }
                if low == high {
                    return Ok(low);
                }
                Ok(rng.gen_range(low..high))
            }
        }
    }
}

fn invalid_shape(shape: &str, reason: impl Into<String>) -> DecayError {
    DecayError::Config(
        ErrorInfo::new("invalid-distribution", reason).with_context("shape", shape),
    )
}
