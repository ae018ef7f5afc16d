//! Two-body breakup kinematics in the parent rest frame.

use std::f64::consts::PI;

use nalgebra::Vector3;
use nbreakup_core::{DecayError, ErrorInfo, LorentzVector, NEUTRON_MASS};
use rand::{Rng, RngCore};

const THRESHOLD_SLACK: f64 = 1e-12;

/// Momentum of either daughter when `m0` breaks up into `m1 + m2` at rest.
///
/// Returns `None` when the parent is lighter than the two daughters. Deficits
/// at the level of floating-point rounding are treated as threshold.
pub fn breakup_momentum(m0: f64, m1: f64, m2: f64) -> Option<f64> {
    if m0 <= 0.0 || m0 - m1 - m2 < -THRESHOLD_SLACK * m0 {
        return None;
    }
    // Kallen function written as a product to keep precision near threshold.
    let lambda = (m0 - m1 - m2) * (m0 + m1 + m2) * (m0 - m1 + m2) * (m0 + m1 - m2);
    Some(lambda.max(0.0).sqrt() / (2.0 * m0))
}

/// Unit vector drawn uniformly over the sphere.
pub fn isotropic_direction(rng: &mut dyn RngCore) -> Vector3<f64> {
    let cos_theta: f64 = 2.0 * rng.gen::<f64>() - 1.0;
    let phi = 2.0 * PI * rng.gen::<f64>();
    let sin_theta = (1.0 - cos_theta * cos_theta).max(0.0).sqrt();
    Vector3::new(sin_theta * phi.cos(), sin_theta * phi.sin(), cos_theta)
}

/// Evaporation of a "neutron" from a parent, leaving a fragment.
///
/// Masses include any excitation carried by parent or fragment. The helper is
/// pure kinematics; callers decide energetic feasibility beforehand.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NeutronEvaporation {
    parent: f64,
    fragment: f64,
    neutron: f64,
}

impl NeutronEvaporation {
    /// Breakup `parent -> fragment + neutron` with an arbitrary light particle.
    pub fn new(parent: f64, fragment: f64, neutron: f64) -> Self {
        Self {
            parent,
            fragment,
            neutron,
        }
    }

    /// Breakup emitting a free neutron.
    pub fn with_neutron(parent: f64, fragment: f64) -> Self {
        Self::new(parent, fragment, NEUTRON_MASS)
    }

    /// True when the parent is heavy enough for the breakup.
    pub fn is_open(&self) -> bool {
        breakup_momentum(self.parent, self.fragment, self.neutron).is_some()
    }

    /// Energy released in the breakup.
    pub fn q_value(&self) -> f64 {
        self.parent - self.fragment - self.neutron
    }

    /// Common momentum magnitude of the two daughters.
    pub fn momentum(&self) -> Result<f64, DecayError> {
        breakup_momentum(self.parent, self.fragment, self.neutron).ok_or_else(|| {
            DecayError::Kinematics(
                ErrorInfo::new("closed-breakup", "parent lighter than its daughters")
                    .with_context("parent", self.parent)
                    .with_context("fragment", self.fragment)
                    .with_context("neutron", self.neutron),
            )
        })
    }

    /// Samples an isotropic breakup; returns `(fragment, neutron)`.
    pub fn evaporate(
        &self,
        rng: &mut dyn RngCore,
    ) -> Result<(LorentzVector, LorentzVector), DecayError> {
        let direction = isotropic_direction(rng);
        self.evaporate_along(&direction)
    }

    /// Breakup with the neutron emitted along `direction`.
    pub fn evaporate_along(
        &self,
        direction: &Vector3<f64>,
    ) -> Result<(LorentzVector, LorentzVector), DecayError> {
        let p = self.momentum()?;
        let unit = direction.normalize();
        let neutron = LorentzVector::from_momentum_and_mass(unit * p, self.neutron);
        let fragment = LorentzVector::from_momentum_and_mass(unit * -p, self.fragment);
        Ok((fragment, neutron))
    }
}
