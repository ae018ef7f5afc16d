//! Two-neutron decay through a real intermediate state.

use nbreakup_core::{DecayError, ErrorInfo, Particle, NEUTRON_MASS};
use rand::{Rng, RngCore};

use crate::base::DecayBase;
use crate::config::DecayKind;
use crate::decay::{FinalState, NeutronDecay};
use crate::evaporation::NeutronEvaporation;

const ENVELOPE_POINTS: usize = 512;
const ENVELOPE_MARGIN: f64 = 1.1;
const PEAK_SPAN: f64 = 4.0;
const CENTROID_ROUNDING: f64 = 1e-12;

/// Sequential emission following A. Volya, PRC 76, 064314 and EPJ Web Conf.
/// 38, 03003.
///
/// The first neutron leaves an intermediate `A-1` state of mass
/// [`intermediate_frag_mass`](Self::intermediate_frag_mass); the second is
/// evaporated from that state in its own rest frame. The intermediate energy
/// above the final fragment plus one neutron is `"intermediate-energy"`.
/// A non-zero `"intermediate-width"` spreads it according to
/// [`IntermediateLineShape`], with energy-dependent widths for both steps.
#[derive(Debug, Clone)]
pub struct TwoNeutronSequential {
    base: DecayBase,
    /// Nominal rest mass of the intermediate fragment, refreshed from the
    /// input particle and `"intermediate-energy"`. Serves as the centroid of
    /// the intermediate line shape.
    pub intermediate_frag_mass: f64,
}

impl TwoNeutronSequential {
    /// Creates the generator with the intermediate state at threshold.
    pub fn new() -> Self {
        Self {
            base: DecayBase::new(DecayKind::Sequential),
            intermediate_frag_mass: 0.0,
        }
    }

    fn refresh_intermediate(&mut self) {
        let energy = self.base.param("intermediate-energy").unwrap_or(0.0);
        self.intermediate_frag_mass = self.base.final_frag_mass() + NEUTRON_MASS + energy;
    }

    /// Intermediate-energy distribution for the current parameters.
    pub fn intermediate_line_shape(&self, decay_energy: f64) -> IntermediateLineShape {
        let threshold = self.base.final_frag_mass() + NEUTRON_MASS;
        let mut centroid = self.intermediate_frag_mass - threshold;
        // Mass differences near threshold carry rounding of the fragment mass.
        if centroid.abs() <= CENTROID_ROUNDING * self.intermediate_frag_mass.abs() {
            centroid = 0.0;
        }
        IntermediateLineShape {
            centroid,
            width: self.base.param("intermediate-width").unwrap_or(0.0),
            decay_energy,
        }
    }

    fn sample_intermediate_energy(
        &self,
        line_shape: &IntermediateLineShape,
        rng: &mut dyn RngCore,
    ) -> Result<f64, DecayError> {
        let decay_energy = line_shape.decay_energy;
        let mut envelope = line_shape.envelope();
        let max_tries = self.base.param("max-tries")? as u64;
        if envelope > 0.0 {
            let mut tries = 0;
            while tries < max_tries {
                tries += 1;
                let energy = rng.gen::<f64>() * decay_energy;
                let value = line_shape.density(energy);
                if value > envelope {
                    envelope = value * ENVELOPE_MARGIN;
                    tries = 0;
                    continue;
                }
                if rng.gen::<f64>() * envelope < value {
                    return Ok(energy);
                }
            }
        }
        Err(DecayError::Sampling(
            ErrorInfo::new(
                "rejection-exhausted",
                "intermediate energy sampler found no accepted value",
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

        let line_shape = self.intermediate_line_shape(decay_energy);
        let broad = line_shape.width > 0.0;
        if line_shape.centroid < 0.0 || (broad && line_shape.centroid == 0.0) {
            return Ok(self.base.insufficient(
                "intermediate state below its neutron threshold",
                0.0,
                line_shape.centroid,
            ));
        }
        let intermediate_energy = if broad {
            self.sample_intermediate_energy(&line_shape, rng)?
        } else {
            line_shape.centroid
        };
        let fragment_mass = self.base.final_frag_mass();
        let parent = particle.mass + decay_energy;
        let intermediate_mass = fragment_mass + NEUTRON_MASS + intermediate_energy;

        let first_step = NeutronEvaporation::with_neutron(parent, intermediate_mass);
        if !first_step.is_open() {
            return Ok(self.base.insufficient(
                "first emission closed",
                0.0,
                first_step.q_value(),
            ));
        }
        let second_step = NeutronEvaporation::with_neutron(intermediate_mass, fragment_mass);
        if !second_step.is_open() {
            return Ok(self.base.insufficient(
                "second emission closed",
                0.0,
                second_step.q_value(),
            ));
        }

        let (intermediate, first) = first_step.evaporate(rng)?;
        // Second emission happens in the intermediate rest frame.
        let (fragment, second) = second_step.evaporate(rng)?;
        let beta = intermediate.boost_vector();
        let neutrons = vec![first, second.boost(&beta)];
        let initial = self.base.consumed_initial(&particle, decay_energy);
        Ok(Some(self.base.assemble(
            initial,
            fragment.boost(&beta),
            neutrons,
            decay_energy,
        )))
    }
}

/// Distribution of the intermediate energy `e` for a broad intermediate
/// state (Volya, PRC 76, 064314):
///
/// ```text
/// w(e) = G1(E - e) G2(e) / ((e - e_r)^2 + G2(e)^2 / 4)
/// ```
///
/// Both emissions are s-wave, so the partial widths scale with the neutron
/// momentum: `G2(e) = G sqrt(e / e_r)` and `G1(E - e) ~ sqrt(E - e)`. The
/// centroid must lie above threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntermediateLineShape {
    /// Nominal intermediate energy `e_r` above the fragment plus one neutron.
    pub centroid: f64,
    /// Width `G` of the intermediate state at its centroid.
    pub width: f64,
    /// Total decay energy `E` above the two-neutron threshold.
    pub decay_energy: f64,
}

impl IntermediateLineShape {
    /// Width of the second emission at intermediate energy `energy`.
    pub fn second_width(&self, energy: f64) -> f64 {
        if energy <= 0.0 || self.centroid <= 0.0 {
            return 0.0;
        }
        self.width * (energy / self.centroid).sqrt()
    }

    /// Unnormalised density of the intermediate energy on `[0, E]`.
    pub fn density(&self, energy: f64) -> f64 {
        if energy <= 0.0 || energy >= self.decay_energy {
            return 0.0;
        }
        let second = self.second_width(energy);
        let first = (self.decay_energy - energy).sqrt();
        let detuning = energy - self.centroid;
        first * second / (detuning * detuning + 0.25 * second * second)
    }

    /// Rejection bound: uniform grid over `[0, E]` refined around the centroid.
    pub fn envelope(&self) -> f64 {
        let decay_energy = self.decay_energy;
        let uniform =
            (0..=ENVELOPE_POINTS).map(|i| decay_energy * i as f64 / ENVELOPE_POINTS as f64);
        let half_span = PEAK_SPAN * self.width;
        let around_peak = (0..=ENVELOPE_POINTS).map(|i| {
            self.centroid - half_span + 2.0 * half_span * i as f64 / ENVELOPE_POINTS as f64
        });
        uniform
            .chain(around_peak)
            .map(|energy| self.density(energy))
            .fold(0.0, f64::max)
            * ENVELOPE_MARGIN
    }
}

impl Default for TwoNeutronSequential {
    fn default() -> Self {
        Self::new()
    }
}

impl NeutronDecay for TwoNeutronSequential {
    fn base(&self) -> &DecayBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut DecayBase {
        &mut self.base
    }

    fn set_input_particle(&mut self, particle: &Particle) {
        self.base.set_input_particle(particle);
        self.refresh_intermediate();
    }

    fn set_decay_param(&mut self, name: &str, value: f64) -> Result<(), DecayError> {
        self.base.params_mut().set(name, value)?;
        if name == "intermediate-energy" {
            self.refresh_intermediate();
        }
        Ok(())
    }

    fn generate(&mut self, rng: &mut dyn RngCore) -> Result<Option<FinalState>, DecayError> {
        let outcome = self.sample(rng);
        self.base.settle(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn broad_intermediate_peaks_at_centroid() {
        let shape = IntermediateLineShape {
            centroid: 1.0,
            width: 0.3,
            decay_energy: 2.0,
        };
        assert!((shape.second_width(1.0) - 0.3).abs() < 1e-12);
        assert!(shape.second_width(0.25) < shape.second_width(1.0));
        assert!(shape.density(1.0) > shape.density(0.7));
        assert!(shape.density(1.0) > shape.density(1.3));
        assert_eq!(shape.density(0.0), 0.0);
        assert_eq!(shape.density(2.0), 0.0);
    }

    #[test]
    fn envelope_bounds_intermediate_density() {
        for (centroid, width) in [(1.0, 0.3), (0.05, 0.02), (1.9, 0.5), (0.4, 3.0)] {
            let shape = IntermediateLineShape {
                centroid,
                width,
                decay_energy: 2.0,
            };
            let envelope = shape.envelope();
            let steps = 200_000;
            let maximum = (0..=steps)
                .map(|i| shape.density(2.0 * i as f64 / steps as f64))
                .fold(0.0, f64::max);
            assert!(maximum < envelope, "{centroid}/{width}: {maximum} vs {envelope}");
        }
    }
}
