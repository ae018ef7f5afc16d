//! Relativistic four-vectors (MeV, c = 1).

use std::ops::{Add, AddAssign, Neg, Sub};

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// Energy-momentum four-vector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LorentzVector {
    /// Three-momentum.
    pub momentum: Vector3<f64>,
    /// Total energy.
    pub energy: f64,
}

impl LorentzVector {
    /// Creates a four-vector from its components.
    pub fn new(px: f64, py: f64, pz: f64, energy: f64) -> Self {
        Self {
            momentum: Vector3::new(px, py, pz),
            energy,
        }
    }

    /// Four-vector of a particle of the given mass at rest.
    pub fn at_rest(mass: f64) -> Self {
        Self {
            momentum: Vector3::zeros(),
            energy: mass,
        }
    }

    /// On-shell four-vector with the given three-momentum and invariant mass.
    pub fn from_momentum_and_mass(momentum: Vector3<f64>, mass: f64) -> Self {
        let energy = (momentum.norm_squared() + mass * mass).sqrt();
        Self { momentum, energy }
    }

    /// Momentum x component.
    pub fn px(&self) -> f64 {
        self.momentum.x
    }

    /// Momentum y component.
    pub fn py(&self) -> f64 {
        self.momentum.y
    }

    /// Momentum z component.
    pub fn pz(&self) -> f64 {
        self.momentum.z
    }

    /// Magnitude of the three-momentum.
    pub fn p(&self) -> f64 {
        self.momentum.norm()
    }

    /// Invariant mass squared, `E^2 - p^2`.
    pub fn mass2(&self) -> f64 {
        self.energy * self.energy - self.momentum.norm_squared()
    }

    /// Invariant mass. Space-like vectors report zero.
    pub fn mass(&self) -> f64 {
        self.mass2().max(0.0).sqrt()
    }

    /// Kinetic energy, `E - m`.
    pub fn kinetic_energy(&self) -> f64 {
        self.energy - self.mass()
    }

    /// Velocity of the frame in which this vector is at rest.
    pub fn boost_vector(&self) -> Vector3<f64> {
        if self.energy == 0.0 {
            return Vector3::zeros();
        }
        self.momentum / self.energy
    }

    /// Applies a pure Lorentz boost with velocity `beta` (|beta| < 1).
    pub fn boost(&self, beta: &Vector3<f64>) -> Self {
        let b2 = beta.norm_squared();
        if b2 <= 0.0 {
            return *self;
        }
        let gamma = 1.0 / (1.0 - b2).sqrt();
        let bp = beta.dot(&self.momentum);
        let gamma2 = (gamma - 1.0) / b2;
        Self {
            momentum: self.momentum + beta.scale(gamma2 * bp + gamma * self.energy),
            energy: gamma * (self.energy + bp),
        }
    }

    /// Cosine of the opening angle between the two three-momenta.
    pub fn cos_angle(&self, other: &LorentzVector) -> f64 {
        let norm = self.p() * other.p();
        if norm == 0.0 {
            return 1.0;
        }
        (self.momentum.dot(&other.momentum) / norm).clamp(-1.0, 1.0)
    }

    /// Component-wise comparison relative to the larger of the two energies.
    pub fn approx_eq(&self, other: &LorentzVector, rel_tol: f64) -> bool {
        let scale = self.energy.abs().max(other.energy.abs()).max(1.0);
        let limit = rel_tol * scale;
        (self.energy - other.energy).abs() <= limit
            && (self.momentum - other.momentum).amax() <= limit
    }
}

impl Default for LorentzVector {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }
}

impl Add for LorentzVector {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self {
            momentum: self.momentum + rhs.momentum,
            energy: self.energy + rhs.energy,
        }
    }
}

impl AddAssign for LorentzVector {
    fn add_assign(&mut self, rhs: Self) {
        self.momentum += rhs.momentum;
        self.energy += rhs.energy;
    }
}

impl Sub for LorentzVector {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self {
            momentum: self.momentum - rhs.momentum,
            energy: self.energy - rhs.energy,
        }
    }
}

impl Neg for LorentzVector {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self {
            momentum: -self.momentum,
            energy: -self.energy,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boost_round_trip_preserves_vector() {
        let v = LorentzVector::from_momentum_and_mass(Vector3::new(12.0, -3.0, 40.0), 939.565);
        let beta = Vector3::new(0.1, 0.2, -0.3);
        let back = v.boost(&beta).boost(&-beta);
        assert!(v.approx_eq(&back, 1e-12));
    }

    #[test]
    fn boost_to_rest_frame_removes_momentum() {
        let v = LorentzVector::from_momentum_and_mass(Vector3::new(100.0, 50.0, 2000.0), 20000.0);
        let rest = v.boost(&-v.boost_vector());
        assert!(rest.p() < 1e-6);
        assert!((rest.energy - 20000.0).abs() < 1e-6);
    }
}
