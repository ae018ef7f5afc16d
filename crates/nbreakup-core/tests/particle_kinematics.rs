use nalgebra::Vector3;
use nbreakup_core::{LorentzVector, Particle};
use proptest::prelude::*;

#[test]
fn particle_at_rest_has_total_mass_energy() {
    let particle = Particle::at_rest(20_000.0, 2.5);
    assert_eq!(particle.total_mass(), 20_002.5);
    assert_eq!(particle.momentum.energy, 20_002.5);
    assert_eq!(particle.three_momentum(), Vector3::zeros());
}

#[test]
fn kinetic_energy_constructor_is_on_shell() {
    let particle =
        Particle::with_kinetic_energy(20_000.0, 1.0, Vector3::new(0.0, 0.0, 2.0), 1_500.0);
    assert!((particle.momentum.mass() - 20_001.0).abs() < 1e-6);
    assert!((particle.momentum.kinetic_energy() - 1_500.0).abs() < 1e-6);
    assert!(particle.momentum.px().abs() < 1e-12);
}

proptest! {
    #[test]
    fn boost_preserves_invariant_mass(
        px in -500.0f64..500.0,
        py in -500.0f64..500.0,
        pz in -500.0f64..500.0,
        bx in -0.5f64..0.5,
        by in -0.5f64..0.5,
        bz in -0.5f64..0.5,
    ) {
        let v = LorentzVector::from_momentum_and_mass(Vector3::new(px, py, pz), 939.0);
        let boosted = v.boost(&Vector3::new(bx, by, bz));
        prop_assert!((boosted.mass() - 939.0).abs() < 1e-6);
    }
}
