//! Core data types for the neutron breakup kinematics engine: four-vectors,
//! particle state, energy distributions, deterministic randomness and
//! structured errors.

#![deny(missing_docs)]

pub mod errors;
pub mod excitation;
pub mod lorentz;
pub mod particle;
pub mod rng;

pub use errors::{DecayError, ErrorInfo};
pub use excitation::ExcitationDistribution;
pub use lorentz::LorentzVector;
pub use particle::Particle;
pub use rng::{derive_substream_seed, event_seed, RngHandle};

/// Neutron rest mass in MeV (CODATA 2018).
pub const NEUTRON_MASS: f64 = 939.565_420_52;

/// Conversion constant hbar*c in MeV fm.
pub const HBARC: f64 = 197.326_980_4;
