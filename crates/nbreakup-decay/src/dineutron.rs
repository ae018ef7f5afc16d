//! Two-neutron decay through a correlated dineutron.

use log::warn;
use nbreakup_core::{DecayError, ErrorInfo, HBARC, NEUTRON_MASS};
use rand::{Rng, RngCore};

use crate::base::DecayBase;
use crate::config::DecayKind;
use crate::decay::{FinalState, NeutronDecay, Verbosity};
use crate::evaporation::NeutronEvaporation;
use crate::nn::{pair_wave_number, NnScattering};

const ENVELOPE_POINTS: usize = 512;
const ENVELOPE_MARGIN: f64 = 1.1;
const LOG_GRID_POINTS: usize = 256;
const LOG_GRID_LOW: f64 = 1e-4;
const LOG_GRID_HIGH: f64 = 10.0;

/// Dineutron emission following A. Volya, PRC 76, 064314 and EPJ Web Conf.
/// 38, 03003.
///
/// The pair leaves the nucleus as one quasi-particle whose internal energy
/// `eps` follows the nn s-wave line shape times the core-dineutron phase
/// space, `k |f(k)|^2 sqrt(E - eps)`. The dineutron of mass `2 m_n + eps` is
/// evaporated first, then breaks up in its own rest frame.
#[derive(Debug, Clone)]
pub struct TwoNeutronDineutron {
    base: DecayBase,
}

impl TwoNeutronDineutron {
    /// Creates the generator with standard nn scattering parameters.
    pub fn new() -> Self {
        Self {
            base: DecayBase::new(DecayKind::Dineutron),
        }
    }

    fn scattering(&self) -> Result<NnScattering, DecayError> {
        Ok(NnScattering::new(
            self.base.param("scattering-length")?,
            self.base.param("effective-range")?,
        ))
    }

    /// Unnormalised density of the dineutron internal energy.
    pub fn internal_energy_density(
        &self,
        internal_energy: f64,
        decay_energy: f64,
    ) -> Result<f64, DecayError> {
        if internal_energy < 0.0 || internal_energy > decay_energy {
            return Ok(0.0);
        }
        let k = pair_wave_number(2.0 * NEUTRON_MASS + internal_energy);
        Ok(self.scattering()?.line_shape(k) * (decay_energy - internal_energy).sqrt())
    }

    /// Internal energy at which `k |f(k)|^2` peaks in the zero-range limit,
    /// `k = 1 / |a|`.
    fn line_shape_peak(&self) -> Result<Option<f64>, DecayError> {
        let scattering_length = self.base.param("scattering-length")?;
        if scattering_length == 0.0 {
            return Ok(None);
        }
        let p = HBARC / scattering_length.abs();
        let pair_mass = 2.0 * (NEUTRON_MASS * NEUTRON_MASS + p * p).sqrt();
        Ok(Some(pair_mass - 2.0 * NEUTRON_MASS))
    }

    /// Rejection bound for the internal-energy density on `[0, decay_energy]`.
    ///
    /// The density is sharply peaked near threshold, so a uniform grid alone
    /// steps over the peak at large decay energies. The bound also scans a
    /// log-spaced grid close to threshold and the analytic peak position.
    fn density_envelope(
        &self,
        density: &dyn Fn(f64) -> f64,
        decay_energy: f64,
    ) -> Result<f64, DecayError> {
        let uniform =
            (0..=ENVELOPE_POINTS).map(|i| decay_energy * i as f64 / ENVELOPE_POINTS as f64);
        let log_high = decay_energy.min(LOG_GRID_HIGH);
        let log_low = LOG_GRID_LOW.min(log_high);
        let near_threshold = (0..LOG_GRID_POINTS).map(|i| {
            log_low * (log_high / log_low).powf(i as f64 / (LOG_GRID_POINTS - 1) as f64)
        });
        let peak = self.line_shape_peak()?.filter(|eps| *eps < decay_energy);
        let maximum = uniform
            .chain(near_threshold)
            .chain(peak)
            .map(density)
            .fold(0.0, f64::max);
        Ok(maximum * ENVELOPE_MARGIN)
    }

    fn sample_internal_energy(
        &self,
        decay_energy: f64,
        rng: &mut dyn RngCore,
    ) -> Result<f64, DecayError> {
        let scattering = self.scattering()?;
        let density = |eps: f64| {
            let k = pair_wave_number(2.0 * NEUTRON_MASS + eps);
            scattering.line_shape(k) * (decay_energy - eps).max(0.0).sqrt()
        };
        let mut envelope = self.density_envelope(&density, decay_energy)?;

        let max_tries = self.base.param("max-tries")? as u64;
        if envelope > 0.0 {
            let mut tries = 0;
            while tries < max_tries {
                tries += 1;
                let eps = rng.gen::<f64>() * decay_energy;
                let value = density(eps);
                if value > envelope {
                    // Bound was too low: raise it and start over.
                    if self.base.verbosity() >= Verbosity::All {
                        warn!(
                            "{}: raising envelope {envelope:.4e} to {value:.4e}",
                            self.base.kind()
                        );
                    }
                    envelope = value * ENVELOPE_MARGIN;
                    tries = 0;
                    continue;
                }
                if rng.gen::<f64>() * envelope < value {
                    return Ok(eps);
                }
            }
        }
        Err(DecayError::Sampling(
            ErrorInfo::new(
                "rejection-exhausted",
                "dineutron energy sampler found no accepted value",
            )
            .with_context("max-tries", max_tries)
            .with_context("decay-energy", decay_energy),
        ))
    }

    fn sample(&mut self, rng: &mut dyn RngCore) -> Result<Option<FinalState>, DecayError> {
        let particle = *self.base.input()?;
        let decay_energy = particle.excitation;
        if decay_energy <= 0.0 {
            return Ok(self.base.insufficient(
                "excitation below two-neutron threshold",
                0.0,
                decay_energy,
            ));
        }

        let internal_energy = self.sample_internal_energy(decay_energy, rng)?;
        let fragment_mass = self.base.final_frag_mass();
        let parent = particle.mass + decay_energy;
        let dineutron_mass = 2.0 * NEUTRON_MASS + internal_energy;

        let emission = NeutronEvaporation::new(parent, fragment_mass, dineutron_mass);
        if !emission.is_open() {
            return Ok(self.base.insufficient(
                "dineutron emission closed",
                0.0,
                emission.q_value(),
            ));
        }
        let breakup = NeutronEvaporation::new(dineutron_mass, NEUTRON_MASS, NEUTRON_MASS);
        if !breakup.is_open() {
            return Ok(self.base.insufficient(
                "dineutron breakup closed",
                0.0,
                breakup.q_value(),
            ));
        }

        let (fragment, dineutron) = emission.evaporate(rng)?;
        let (first, second) = breakup.evaporate(rng)?;
        let beta = dineutron.boost_vector();
        let neutrons = vec![first.boost(&beta), second.boost(&beta)];
        let initial = self.base.consumed_initial(&particle, decay_energy);
        Ok(Some(self.base.assemble(initial, fragment, neutrons, decay_energy)))
    }
}

impl Default for TwoNeutronDineutron {
    fn default() -> Self {
        Self::new()
    }
}

impl NeutronDecay for TwoNeutronDineutron {
    fn base(&self) -> &DecayBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut DecayBase {
        &mut self.base
    }

    fn generate(&mut self, rng: &mut dyn RngCore) -> Result<Option<FinalState>, DecayError> {
        let outcome = self.sample(rng);
        self.base.settle(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn density_for(decay: &TwoNeutronDineutron, decay_energy: f64) -> impl Fn(f64) -> f64 {
        let scattering = decay.scattering().unwrap();
        move |eps: f64| {
            let k = pair_wave_number(2.0 * NEUTRON_MASS + eps);
            scattering.line_shape(k) * (decay_energy - eps).max(0.0).sqrt()
        }
    }

    #[test]
    fn envelope_bounds_density_at_large_decay_energies() {
        let decay = TwoNeutronDineutron::new();
        for decay_energy in [0.5, 5.0, 50.0, 150.0, 300.0] {
            let density = density_for(&decay, decay_energy);
            let envelope = decay.density_envelope(&density, decay_energy).unwrap();
            let steps = 1_000_000;
            let maximum = (0..=steps)
                .map(|i| density(decay_energy * i as f64 / steps as f64))
                .fold(0.0, f64::max);
            assert!(
                maximum < envelope,
                "E={decay_energy}: maximum {maximum} above envelope {envelope}"
            );
        }
    }

    #[test]
    fn analytic_peak_sits_near_virtual_state() {
        let decay = TwoNeutronDineutron::new();
        let peak = decay.line_shape_peak().unwrap().unwrap();
        assert!(peak > 0.1 && peak < 0.14, "peak at {peak}");
        let density = |eps: f64| decay.internal_energy_density(eps, 300.0).unwrap();
        assert!(density(peak) > density(peak * 3.0));
        assert!(density(peak) > density(peak / 3.0));
    }
}
