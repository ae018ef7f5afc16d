//! Input particle state supplied by the host simulation.

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::lorentz::LorentzVector;

/// State of the excited, unbound nucleus handed to a decay generator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    /// Separation-threshold rest mass: fragment ground state plus every
    /// neutron the decay emits.
    pub mass: f64,
    /// Laboratory four-momentum. Only its three-momentum is used to place the
    /// decay in the lab; the energy is rebuilt on shell by the generator.
    pub momentum: LorentzVector,
    /// Excitation energy above the separation threshold.
    pub excitation: f64,
}

impl Particle {
    /// Creates a particle from its threshold mass, four-momentum and excitation.
    pub fn new(mass: f64, momentum: LorentzVector, excitation: f64) -> Self {
        Self {
            mass,
            momentum,
            excitation,
        }
    }

    /// Particle decaying at rest in the laboratory.
    pub fn at_rest(mass: f64, excitation: f64) -> Self {
        Self::new(mass, LorentzVector::at_rest(mass + excitation), excitation)
    }

    /// Particle moving along `direction` with the given lab kinetic energy.
    pub fn with_kinetic_energy(
        mass: f64,
        excitation: f64,
        direction: Vector3<f64>,
        kinetic_energy: f64,
    ) -> Self {
        let total = mass + excitation;
        let energy = total + kinetic_energy;
        let p = (energy * energy - total * total).max(0.0).sqrt();
        let unit = if direction.norm() > 0.0 {
            direction.normalize()
        } else {
            Vector3::z()
        };
        Self::new(
            mass,
            LorentzVector::from_momentum_and_mass(unit * p, total),
            excitation,
        )
    }

    /// Rest mass including the excitation energy.
    pub fn total_mass(&self) -> f64 {
        self.mass + self.excitation
    }

    /// Laboratory three-momentum.
    pub fn three_momentum(&self) -> Vector3<f64> {
        self.momentum.momentum
    }
}
