//! Three-body phase-space decay into fragment plus two neutrons.

use nbreakup_core::{DecayError, ErrorInfo, HBARC, NEUTRON_MASS};
use rand::{Rng, RngCore};

use crate::base::DecayBase;
use crate::config::DecayKind;
use crate::decay::{FinalState, NeutronDecay};
use crate::evaporation::{breakup_momentum, NeutronEvaporation};
use crate::fsi::NnCorrelation;
use crate::nn::NnScattering;

/// Two-neutron decay distributed according to three-body phase space.
///
/// The nn invariant mass is drawn with Raubold-Lynch weights
/// `p*(M; m_f, m_nn) p*(m_nn; m_n, m_n)`. With final-state interaction the
/// weight is multiplied by the nn correlation function (see [`crate::fsi`]).
/// The decay energy is the input excitation energy.
#[derive(Debug, Clone)]
pub struct TwoNeutronPhaseSpace {
    base: DecayBase,
    fsi: bool,
}

impl TwoNeutronPhaseSpace {
    /// Creates the generator, with or without final-state interaction.
    pub fn new(fsi: bool) -> Self {
        let kind = if fsi {
            DecayKind::PhaseSpaceFsi
        } else {
            DecayKind::PhaseSpace
        };
        Self {
            base: DecayBase::new(kind),
            fsi,
        }
    }

    /// True when the nn final-state interaction is included.
    pub fn has_fsi(&self) -> bool {
        self.fsi
    }

    fn correlation(&self) -> Result<Option<NnCorrelation>, DecayError> {
        if !self.fsi {
            return Ok(None);
        }
        let scattering = NnScattering::new(
            self.base.param("scattering-length")?,
            self.base.param("effective-range")?,
        );
        Ok(Some(NnCorrelation::new(
            scattering,
            self.base.param("source-size")?,
        )))
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

        let fragment_mass = self.base.final_frag_mass();
        let parent = particle.mass + decay_energy;
        let pair_min = 2.0 * NEUTRON_MASS;
        let pair_max = parent - fragment_mass;
        let outer = |pair: f64| breakup_momentum(parent, fragment_mass, pair).unwrap_or(0.0);
        let inner = |pair: f64| breakup_momentum(pair, NEUTRON_MASS, NEUTRON_MASS).unwrap_or(0.0);
        let weight_max = outer(pair_min) * inner(pair_max);
        if weight_max <= 0.0 {
            return Ok(self.base.insufficient(
                "no phase space above two-neutron threshold",
                0.0,
                decay_energy,
            ));
        }

        let correlation = self.correlation()?;
        let correlation_max = correlation
            .map(|corr| corr.maximum(inner(pair_max) / HBARC))
            .unwrap_or(1.0);

        let max_tries = self.base.param("max-tries")? as u64;
        for _ in 0..max_tries {
            let pair = pair_min + rng.gen::<f64>() * (pair_max - pair_min);
            let q = inner(pair);
            let mut weight = outer(pair) * q / weight_max;
            if let Some(corr) = &correlation {
                weight *= corr.weight(q / HBARC) / correlation_max;
            }
            if rng.gen::<f64>() >= weight {
                continue;
            }

            let (fragment, nn) =
                NeutronEvaporation::new(parent, fragment_mass, pair).evaporate(rng)?;
            let (first, second) =
                NeutronEvaporation::new(pair, NEUTRON_MASS, NEUTRON_MASS).evaporate(rng)?;
            let beta = nn.boost_vector();
            let neutrons = vec![first.boost(&beta), second.boost(&beta)];
            let initial = self.base.consumed_initial(&particle, decay_energy);
            return Ok(Some(self.base.assemble(initial, fragment, neutrons, decay_energy)));
        }

        Err(DecayError::Sampling(
            ErrorInfo::new("rejection-exhausted", "phase-space sampler found no accepted event")
                .with_context("decay", self.base.kind())
                .with_context("max-tries", max_tries)
                .with_context("decay-energy", decay_energy),
        ))
    }
}

impl NeutronDecay for TwoNeutronPhaseSpace {
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
