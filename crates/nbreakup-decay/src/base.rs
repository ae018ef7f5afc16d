//! Bookkeeping shared by all decay generators.

use log::{debug, error, warn};
use nbreakup_core::{DecayError, ErrorInfo, LorentzVector, Particle, NEUTRON_MASS};

use crate::config::DecayKind;
use crate::decay::{FinalState, Verbosity};
use crate::params::DecayParams;

/// Parameter store, input particle, final-state storage and verbosity.
///
/// Concrete generators embed one of these and only implement the sampling.
#[derive(Debug, Clone)]
pub struct DecayBase {
    kind: DecayKind,
    number_of_neutrons: usize,
    params: DecayParams,
    verbosity: Verbosity,
    input: Option<Particle>,
    final_frag_mass: f64,
    last: Option<FinalState>,
}

impl DecayBase {
    /// Creates the bookkeeping for a generator of the given kind.
    pub fn new(kind: DecayKind) -> Self {
        Self {
            kind,
            number_of_neutrons: kind.number_of_neutrons(),
            params: DecayParams::new(kind.parameters()),
            verbosity: Verbosity::default(),
            input: None,
            final_frag_mass: 0.0,
            last: None,
        }
    }

    /// Decay model served by this bookkeeping.
    pub fn kind(&self) -> DecayKind {
        self.kind
    }

    /// Number of neutrons emitted per decay.
    pub fn number_of_neutrons(&self) -> usize {
        self.number_of_neutrons
    }

    /// Parameter store.
    pub fn params(&self) -> &DecayParams {
        &self.params
    }

    /// Mutable parameter store.
    pub fn params_mut(&mut self) -> &mut DecayParams {
        &mut self.params
    }

    /// Reads a declared parameter.
    pub fn param(&self, name: &str) -> Result<f64, DecayError> {
        self.params.get(name)
    }

    /// Diagnostic verbosity.
    pub fn verbosity(&self) -> Verbosity {
        self.verbosity
    }

    /// Sets the diagnostic verbosity.
    pub fn set_verbosity(&mut self, level: Verbosity) {
        self.verbosity = level;
    }

    /// Stores the decaying particle and derives the final fragment mass.
    pub fn set_input_particle(&mut self, particle: &Particle) {
        self.input = Some(*particle);
        self.final_frag_mass = particle.mass - self.number_of_neutrons as f64 * NEUTRON_MASS;
    }

    /// Ground-state mass of the final fragment for the current input.
    pub fn final_frag_mass(&self) -> f64 {
        self.final_frag_mass
    }

    /// Current input particle, validated for use by `generate`.
    pub fn input(&self) -> Result<&Particle, DecayError> {
        let particle = self.input.as_ref().ok_or_else(|| {
            DecayError::State(
                ErrorInfo::new("missing-input", "generate called before set_input_particle")
                    .with_context("decay", self.kind),
            )
        })?;
        if self.final_frag_mass <= 0.0
            || !self.final_frag_mass.is_finite()
            || !particle.excitation.is_finite()
        {
            return Err(DecayError::Kinematics(
                ErrorInfo::new("non-physical-input", "input particle cannot hold the fragment")
                    .with_context("mass", particle.mass)
                    .with_context("excitation", particle.excitation)
                    .with_context("neutrons", self.number_of_neutrons)
                    .with_hint("mass is the separation threshold: fragment plus emitted neutrons"),
            ));
        }
        Ok(particle)
    }

    /// Initial state as consumed: the input three-momentum, on shell at
    /// threshold plus `decay_energy`.
    pub fn consumed_initial(&self, particle: &Particle, decay_energy: f64) -> LorentzVector {
        LorentzVector::from_momentum_and_mass(
            particle.three_momentum(),
            particle.mass + decay_energy,
        )
    }

    /// Boosts rest-frame products into the frame of `initial` and packs them.
    pub fn assemble(
        &self,
        initial: LorentzVector,
        fragment: LorentzVector,
        neutrons: Vec<LorentzVector>,
        decay_energy: f64,
    ) -> FinalState {
        let beta = initial.boost_vector();
        FinalState {
            initial,
            fragment: fragment.boost(&beta),
            neutrons: neutrons.iter().map(|n| n.boost(&beta)).collect(),
            decay_energy,
        }
    }

    /// Reports an energetically forbidden event and yields the empty outcome.
    pub fn insufficient(&self, reason: &str, required: f64, available: f64) -> Option<FinalState> {
        if self.verbosity >= Verbosity::All {
            warn!(
                "{}: {reason} (required {required:.6} MeV, available {available:.6} MeV)",
                self.kind
            );
        }
        None
    }

    /// Records the outcome of a sampling attempt.
    ///
    /// Successful outcomes replace the stored final state; anything else
    /// clears it so stale vectors cannot be read.
    pub fn settle(
        &mut self,
        outcome: Result<Option<FinalState>, DecayError>,
    ) -> Result<Option<FinalState>, DecayError> {
        match outcome {
            Ok(Some(state)) => {
                if self.verbosity >= Verbosity::All {
                    debug!("{}: decay energy {:.6} MeV", self.kind, state.decay_energy);
                }
                self.last = Some(state.clone());
                Ok(Some(state))
            }
            Ok(None) => {
                self.last = None;
                Ok(None)
            }
            Err(err) => {
                self.last = None;
                if self.verbosity >= Verbosity::Fatal {
                    error!("{}: {err}", self.kind);
                }
                Err(err)
            }
        }
    }

    /// Final state of the last successful `generate`.
    pub fn last_final(&self) -> Option<&FinalState> {
        self.last.as_ref()
    }

    /// Final-state vector by index. Panics outside `0..=neutrons + 1`.
    pub fn final_state(&self, indx: usize) -> &LorentzVector {
        assert!(
            indx <= self.number_of_neutrons + 1,
            "final-state index {indx} out of range 0..={}",
            self.number_of_neutrons + 1
        );
        match &self.last {
            Some(state) => &state[indx],
            None => panic!("no final state: the last generate did not produce a decay"),
        }
    }
}
