//! Capability contract shared by every neutron decay generator.

use std::ops::Index;

use nbreakup_core::{DecayError, LorentzVector, Particle};
use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::base::DecayBase;
use crate::config::DecayKind;

/// Diagnostic verbosity. Controls log output only, never control flow.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum Verbosity {
    /// Print nothing.
    Silent = 0,
    /// Report fatal conditions only.
    #[default]
    Fatal = 1,
    /// Report every rejected event as well.
    All = 2,
}

impl Verbosity {
    /// Maps a numeric level onto the enum, clamping out-of-range values.
    pub fn from_level(level: i32) -> Self {
        match level {
            i32::MIN..=0 => Verbosity::Silent,
            1 => Verbosity::Fatal,
            _ => Verbosity::All,
        }
    }

    /// Numeric level (0, 1 or 2).
    pub fn level(self) -> i32 {
        self as i32
    }
}

/// Four-vectors produced by one successful decay.
///
/// Indexing follows the generator convention: 0 is the initial state as
/// consumed, 1 the final fragment and 2.. the neutrons.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinalState {
    /// Initial state, on shell at threshold plus the decay energy.
    pub initial: LorentzVector,
    /// Final fragment in its ground state.
    pub fragment: LorentzVector,
    /// Emitted neutrons in emission order.
    pub neutrons: Vec<LorentzVector>,
    /// Energy released by the decay (MeV above threshold).
    pub decay_energy: f64,
}

impl FinalState {
    /// Number of stored vectors, `neutrons + 2`.
    pub fn len(&self) -> usize {
        self.neutrons.len() + 2
    }

    /// Always false; a final state holds at least initial and fragment.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Vector by index, `None` outside `0..len()`.
    pub fn get(&self, indx: usize) -> Option<&LorentzVector> {
        match indx {
            0 => Some(&self.initial),
            1 => Some(&self.fragment),
            n => self.neutrons.get(n - 2),
        }
    }

    /// Iterates over all vectors in index order.
    pub fn iter(&self) -> impl Iterator<Item = &LorentzVector> + '_ {
        [&self.initial, &self.fragment]
            .into_iter()
            .chain(self.neutrons.iter())
    }

    /// Sum of fragment and neutron vectors.
    pub fn total_products(&self) -> LorentzVector {
        self.neutrons
            .iter()
            .fold(self.fragment, |acc, neutron| acc + *neutron)
    }

    /// True when the products reproduce the initial vector to `rel_tol`.
    pub fn is_conserved(&self, rel_tol: f64) -> bool {
        self.total_products().approx_eq(&self.initial, rel_tol)
    }

    /// Combined four-vector of the first two neutrons.
    pub fn neutron_pair(&self) -> Option<LorentzVector> {
        match self.neutrons.as_slice() {
            [first, second, ..] => Some(*first + *second),
            _ => None,
        }
    }

    /// Invariant mass of the first two neutrons.
    pub fn neutron_pair_mass(&self) -> Option<f64> {
        self.neutron_pair().map(|pair| pair.mass())
    }

    /// Neutron-neutron relative energy, `m_nn - 2 m_n`.
    pub fn neutron_relative_energy(&self) -> Option<f64> {
        let pair = self.neutron_pair()?;
        let masses: f64 = self.neutrons.iter().take(2).map(|n| n.mass()).sum();
        Some(pair.mass() - masses)
    }
}

impl Index<usize> for FinalState {
    type Output = LorentzVector;

    fn index(&self, indx: usize) -> &Self::Output {
        match self.get(indx) {
            Some(vector) => vector,
            None => panic!(
                "final-state index {indx} out of range 0..={}",
                self.len() - 1
            ),
        }
    }
}

/// Neutron decay generator.
///
/// Generators are configured once, then driven per event with
/// [`set_input_particle`](NeutronDecay::set_input_particle) followed by
/// [`generate`](NeutronDecay::generate). The random source is borrowed for the
/// duration of each call only. A generator is `Send` but must not be driven
/// from two threads at once.
pub trait NeutronDecay: Send {
    /// Shared bookkeeping.
    fn base(&self) -> &DecayBase;

    /// Mutable shared bookkeeping.
    fn base_mut(&mut self) -> &mut DecayBase;

    /// Samples one decay.
    ///
    /// Returns `Ok(None)` when the excitation energy cannot support the decay;
    /// errors are reserved for misconfiguration and kinematic ill-definition.
    fn generate(&mut self, rng: &mut dyn RngCore) -> Result<Option<FinalState>, DecayError>;

    /// Decay model implemented by this generator.
    fn kind(&self) -> DecayKind {
        self.base().kind()
    }

    /// Sets the decaying particle. Must precede every call to `generate`.
    fn set_input_particle(&mut self, particle: &Particle) {
        self.base_mut().set_input_particle(particle);
    }

    /// Sets a named decay parameter.
    fn set_decay_param(&mut self, name: &str, value: f64) -> Result<(), DecayError> {
        self.base_mut().params_mut().set(name, value)
    }

    /// Reads a named decay parameter.
    fn decay_param(&self, name: &str) -> Result<f64, DecayError> {
        self.base().params().get(name)
    }

    /// Sets the diagnostic verbosity.
    fn set_verbose_level(&mut self, level: Verbosity) {
        self.base_mut().set_verbosity(level);
    }

    /// Current diagnostic verbosity.
    fn verbose_level(&self) -> Verbosity {
        self.base().verbosity()
    }

    /// Number of neutrons emitted per decay.
    fn number_of_neutrons(&self) -> usize {
        self.base().number_of_neutrons()
    }

    /// Result of the last successful `generate`, cleared by a failed one.
    fn last_final(&self) -> Option<&FinalState> {
        self.base().last_final()
    }

    /// Final-state vector of the last successful `generate`.
    ///
    /// # Panics
    ///
    /// Panics when `indx > number_of_neutrons() + 1` or when the last call to
    /// `generate` did not produce a decay.
    fn final_state(&self, indx: usize) -> &LorentzVector {
        self.base().final_state(indx)
    }
}
