//! Singlet neutron-neutron s-wave scattering in the effective-range expansion.

use nbreakup_core::{HBARC, NEUTRON_MASS};

use crate::evaporation::breakup_momentum;

/// Effective-range parametrisation `k cot(delta) = -1/a + r k^2 / 2`.
///
/// Lengths in fm, wave numbers in fm^-1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NnScattering {
    /// Scattering length (negative for the unbound nn virtual state).
    pub scattering_length: f64,
    /// Effective range.
    pub effective_range: f64,
}

impl NnScattering {
    /// Creates the parametrisation.
    pub fn new(scattering_length: f64, effective_range: f64) -> Self {
        Self {
            scattering_length,
            effective_range,
        }
    }

    fn k_cot_delta(&self, k: f64) -> f64 {
        let inverse_length = if self.scattering_length == 0.0 {
            f64::INFINITY
        } else {
            -1.0 / self.scattering_length
        };
        inverse_length + 0.5 * self.effective_range * k * k
    }

    /// Scattering amplitude `f(k) = 1 / (k cot(delta) - i k)` as `(re, im)`.
    pub fn amplitude(&self, k: f64) -> (f64, f64) {
        let a = self.k_cot_delta(k);
        let denom = a * a + k * k;
        if !denom.is_finite() || denom == 0.0 {
            return (0.0, 0.0);
        }
        (a / denom, k / denom)
    }

    /// `|f(k)|^2`.
    pub fn amplitude_norm2(&self, k: f64) -> f64 {
        let a = self.k_cot_delta(k);
        let denom = a * a + k * k;
        if !denom.is_finite() || denom == 0.0 {
            return 0.0;
        }
        1.0 / denom
    }

    /// Energy line shape of the pair, `sin^2(delta) / k = k |f(k)|^2`.
    pub fn line_shape(&self, k: f64) -> f64 {
        k * self.amplitude_norm2(k)
    }
}

/// Wave number of either neutron in the rest frame of a pair of mass `pair_mass`.
pub fn pair_wave_number(pair_mass: f64) -> f64 {
    breakup_momentum(pair_mass, NEUTRON_MASS, NEUTRON_MASS).unwrap_or(0.0) / HBARC
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_energy_amplitude_is_minus_scattering_length() {
        let nn = NnScattering::new(-18.7, 2.75);
        let (re, im) = nn.amplitude(0.0);
        assert!((re - 18.7).abs() < 1e-9);
        assert_eq!(im, 0.0);
    }

    #[test]
    fn line_shape_peaks_near_virtual_state() {
        let nn = NnScattering::new(-18.7, 2.75);
        let ks: Vec<f64> = (1..400).map(|i| i as f64 * 0.001).collect();
        let peak = ks
            .iter()
            .copied()
            .max_by(|a, b| nn.line_shape(*a).partial_cmp(&nn.line_shape(*b)).unwrap())
            .unwrap();
        assert!(peak > 0.03 && peak < 0.08, "peak at {peak}");
    }

    #[test]
    fn pair_wave_number_vanishes_at_threshold() {
        assert_eq!(pair_wave_number(2.0 * NEUTRON_MASS), 0.0);
        assert!(pair_wave_number(2.0 * NEUTRON_MASS + 1.0) > 0.1);
    }
}
