//! Single-neutron decay with a Breit-Wigner decay energy.

use nbreakup_core::{DecayError, ExcitationDistribution, NEUTRON_MASS};
use rand::RngCore;

use crate::base::DecayBase;
use crate::config::DecayKind;
use crate::decay::{FinalState, NeutronDecay};
use crate::evaporation::NeutronEvaporation;

/// One-neutron emission from an unbound state.
///
/// Parameters are `"energy"` (resonance centroid above threshold) and
/// `"width"`. A zero width yields a spike at `"energy"`.
#[derive(Debug, Clone)]
pub struct OneNeutronDecay {
    base: DecayBase,
}

impl OneNeutronDecay {
    /// Creates the generator with zero energy and width.
    pub fn new() -> Self {
        Self {
            base: DecayBase::new(DecayKind::OneNeutron),
        }
    }

    /// Line shape currently configured.
    pub fn line_shape(&self) -> Result<ExcitationDistribution, DecayError> {
        Ok(ExcitationDistribution::breit_wigner(
            self.base.param("energy")?,
            self.base.param("width")?,
        ))
    }

    fn sample(&mut self, rng: &mut dyn RngCore) -> Result<Option<FinalState>, DecayError> {
        let particle = *self.base.input()?;
        let decay_energy = self.line_shape()?.sample(rng)?;
        if decay_energy < 0.0 {
            return Ok(self.base.insufficient("decay energy below threshold", 0.0, decay_energy));
        }
        if decay_energy > particle.excitation {
            return Ok(self.base.insufficient(
                "decay energy exceeds excitation",
                decay_energy,
                particle.excitation,
            ));
        }

        let fragment_mass = self.base.final_frag_mass();
        let parent = fragment_mass + NEUTRON_MASS + decay_energy;
        let (fragment, neutron) =
            NeutronEvaporation::with_neutron(parent, fragment_mass).evaporate(rng)?;
        let initial = self.base.consumed_initial(&particle, decay_energy);
        Ok(Some(self.base.assemble(initial, fragment, vec![neutron], decay_energy)))
    }
}

impl Default for OneNeutronDecay {
    fn default() -> Self {
        Self::new()
    }
}

impl NeutronDecay for OneNeutronDecay {
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
