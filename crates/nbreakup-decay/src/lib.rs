//! Neutron decay generators: kinematics of an excited, unbound nucleus
//! breaking up into a ground-state fragment plus one or two neutrons.

#![deny(missing_docs)]

/// Shared bookkeeping embedded in every generator.
pub mod base;
/// Decay type identifiers, parameter whitelists and configuration documents.
pub mod config;
/// Generator trait, final-state container and verbosity levels.
pub mod decay;
/// Two-neutron dineutron generator.
pub mod dineutron;
/// Two-body breakup kinematics.
pub mod evaporation;
/// Generator factory.
pub mod factory;
/// Neutron-neutron final-state interaction weight.
pub mod fsi;
/// Neutron-neutron s-wave scattering amplitude.
pub mod nn;
/// One-neutron Breit-Wigner generator.
pub mod one_neutron;
/// Named parameter store.
pub mod params;
/// Two-neutron phase-space generator.
pub mod phase_space;
/// Two-neutron sequential generator.
pub mod sequential;

pub use base::DecayBase;
pub use config::{DecayConfig, DecayKind};
pub use decay::{FinalState, NeutronDecay, Verbosity};
pub use dineutron::TwoNeutronDineutron;
pub use evaporation::{breakup_momentum, NeutronEvaporation};
pub use factory::{create_decay, DecayFactory};
pub use one_neutron::OneNeutronDecay;
pub use params::{Constraint, DecayParams, ParamSpec};
pub use phase_space::TwoNeutronPhaseSpace;
pub use sequential::{IntermediateLineShape, TwoNeutronSequential};
