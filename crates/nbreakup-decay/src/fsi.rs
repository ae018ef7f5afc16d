//! Neutron-neutron final-state interaction weight.
//!
//! Lednicky-Lyuboshitz correlation function for identical neutrons emitted
//! from a Gaussian source of radius `r0`, as used by F. M. Marques et al.,
//! PLB 476, 219 (2000):
//!
//! ```text
//! C(k) = 1 - exp(-4 k^2 r0^2) / 2
//!          + 1/2 [ |f|^2 / (2 r0^2) (1 - d0 / (2 sqrt(pi) r0))
//!                  + 2 Re f F1(2 k r0) / (sqrt(pi) r0)
//!                  - Im f F2(2 k r0) / r0 ]
//! ```
//!
//! with `k` the neutron wave number in the pair rest frame.

use std::f64::consts::PI;

use crate::nn::NnScattering;

const MAX_SCAN_POINTS: usize = 256;
const SCAN_MARGIN: f64 = 1.05;

/// Dawson integral `D(x) = exp(-x^2) int_0^x exp(t^2) dt` (Rybicki's method).
pub fn dawson(x: f64) -> f64 {
    const H: f64 = 0.4;
    const A1: f64 = 2.0 / 3.0;
    const A2: f64 = 0.4;
    const A3: f64 = 2.0 / 7.0;
    const NMAX: usize = 6;

    if x.abs() < 0.2 {
        let x2 = x * x;
        return x * (1.0 - A1 * x2 * (1.0 - A2 * x2 * (1.0 - A3 * x2)));
    }
    let xx = x.abs();
    let n0 = 2.0 * (0.5 * xx / H + 0.5).floor();
    let xp = xx - n0 * H;
    let mut e1 = (2.0 * xp * H).exp();
    let e2 = e1 * e1;
    let mut d1 = n0 + 1.0;
    let mut d2 = d1 - 2.0;
    let mut sum = 0.0;
    for i in 0..NMAX {
        let c = (-((2 * i + 1) as f64 * H).powi(2)).exp();
        sum += c * (e1 / d1 + 1.0 / (d2 * e1));
        d1 += 2.0;
        d2 -= 2.0;
        e1 *= e2;
    }
    x.signum() * (-xp * xp).exp() * sum / PI.sqrt()
}

/// `F1(z) = int_0^z exp(x^2 - z^2) dx / z`.
pub fn f1(z: f64) -> f64 {
    if z.abs() < 1e-8 {
        return 1.0;
    }
    dawson(z) / z
}

/// `F2(z) = (1 - exp(-z^2)) / z`.
pub fn f2(z: f64) -> f64 {
    if z.abs() < 1e-8 {
        return z;
    }
    -(-z * z).exp_m1() / z
}

/// nn correlation function for a Gaussian source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NnCorrelation {
    /// Scattering parameters of the singlet nn channel.
    pub scattering: NnScattering,
    /// Gaussian source radius `r0` (fm).
    pub source_size: f64,
}

impl NnCorrelation {
    /// Creates the correlation function.
    pub fn new(scattering: NnScattering, source_size: f64) -> Self {
        Self {
            scattering,
            source_size,
        }
    }

    /// Correlation weight at wave number `k` (fm^-1). Never negative.
    pub fn weight(&self, k: f64) -> f64 {
        let r0 = self.source_size;
        let d0 = self.scattering.effective_range;
        let sqrt_pi = PI.sqrt();
        let (re_f, im_f) = self.scattering.amplitude(k);
        let norm2 = self.scattering.amplitude_norm2(k);
        let z = 2.0 * k * r0;

        let symmetrisation = 1.0 - 0.5 * (-4.0 * k * k * r0 * r0).exp();
        let interaction = norm2 / (2.0 * r0 * r0) * (1.0 - d0 / (2.0 * sqrt_pi * r0))
            + 2.0 * re_f / (sqrt_pi * r0) * f1(z)
            - im_f / r0 * f2(z);
        (symmetrisation + 0.5 * interaction).max(0.0)
    }

    /// Upper bound of the weight on `[0, k_max]`, for rejection sampling.
    pub fn maximum(&self, k_max: f64) -> f64 {
        let steps = MAX_SCAN_POINTS;
        (0..=steps)
            .map(|i| self.weight(k_max * i as f64 / steps as f64))
            .fold(0.0, f64::max)
            * SCAN_MARGIN
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DEFAULT_SOURCE_SIZE, NN_EFFECTIVE_RANGE, NN_SCATTERING_LENGTH};

    fn simpson_f1(z: f64) -> f64 {
        let n = 2000;
        let h = z / n as f64;
        let g = |x: f64| (x * x - z * z).exp();
        let mut sum = g(0.0) + g(z);
        for i in 1..n {
            let w = if i % 2 == 1 { 4.0 } else { 2.0 };
            sum += w * g(i as f64 * h);
        }
        sum * h / 3.0 / z
    }

    #[test]
    fn dawson_matches_quadrature() {
        for z in [0.05, 0.15, 0.3, 0.9, 1.7, 3.2, 6.0] {
            let expected = simpson_f1(z);
            assert!((f1(z) - expected).abs() < 1e-6, "z={z}: {} vs {expected}", f1(z));
        }
        assert!((dawson(1.0) - 0.538_079_506_9).abs() < 1e-6);
        assert!((dawson(-1.0) + 0.538_079_506_9).abs() < 1e-6);
    }

    #[test]
    fn correlation_enhances_small_relative_momenta() {
        let corr = NnCorrelation::new(
            NnScattering::new(NN_SCATTERING_LENGTH, NN_EFFECTIVE_RANGE),
            DEFAULT_SOURCE_SIZE,
        );
        assert!(corr.weight(0.0) > 5.0);
        assert!(corr.weight(0.02) > corr.weight(0.1));
        assert!((corr.weight(1.5) - 1.0).abs() < 0.05);
        assert!(corr.maximum(0.5) >= corr.weight(0.0));
    }
}
