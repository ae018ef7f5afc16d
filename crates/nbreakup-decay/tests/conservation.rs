use nalgebra::Vector3;
use nbreakup_core::{Particle, RngHandle, NEUTRON_MASS};
use nbreakup_decay::{create_decay, DecayKind, NeutronDecay};
use proptest::prelude::*;

const FRAGMENT_MASS: f64 = 22_330.0;

fn configured(kind: DecayKind) -> Box<dyn NeutronDecay> {
    let mut decay = create_decay(kind);
    match kind {
        DecayKind::OneNeutron => {
            decay.set_decay_param("energy", 0.8).unwrap();
            decay.set_decay_param("width", 0.1).unwrap();
        }
        DecayKind::Sequential => {
            decay.set_decay_param("intermediate-energy", 0.6).unwrap();
        }
        _ => {}
    }
    decay
}

fn moving_input(kind: DecayKind, excitation: f64) -> Particle {
    let mass = FRAGMENT_MASS + kind.number_of_neutrons() as f64 * NEUTRON_MASS;
    Particle::with_kinetic_energy(mass, excitation, Vector3::new(0.2, -0.1, 1.0), 5_000.0)
}

#[test]
fn every_model_conserves_four_momentum_in_flight() {
    for kind in DecayKind::ALL {
        let mut decay = configured(kind);
        let mut rng = RngHandle::from_seed(11);
        let mut produced = 0;
        for _ in 0..500 {
            decay.set_input_particle(&moving_input(kind, 3.0));
            if let Some(state) = decay.generate(&mut rng).unwrap() {
                assert!(state.is_conserved(1e-9), "{kind}: {state:?}");
                produced += 1;
            }
        }
        assert!(produced > 400, "{kind}: only {produced} decays");
    }
}

#[test]
fn final_fragment_and_neutrons_are_on_shell() {
    for kind in DecayKind::ALL {
        let mut decay = configured(kind);
        let mut rng = RngHandle::from_seed(5);
        decay.set_input_particle(&moving_input(kind, 2.0));
        let state = decay.generate(&mut rng).unwrap().unwrap();
        assert!((state.fragment.mass() - FRAGMENT_MASS).abs() < 1e-4, "{kind}");
        for neutron in &state.neutrons {
            assert!((neutron.mass() - NEUTRON_MASS).abs() < 1e-4, "{kind}");
        }
    }
}

#[test]
fn initial_state_keeps_input_three_momentum() {
    let kind = DecayKind::Dineutron;
    let mut decay = configured(kind);
    let particle = moving_input(kind, 2.0);
    decay.set_input_particle(&particle);
    let mut rng = RngHandle::from_seed(8);
    let state = decay.generate(&mut rng).unwrap().unwrap();
    assert_eq!(state.initial.momentum, particle.three_momentum());
    assert!((state.initial.mass() - particle.total_mass()).abs() < 1e-6);
}

#[test]
fn multiplicity_matches_model() {
    for kind in DecayKind::ALL {
        let mut decay = configured(kind);
        assert_eq!(decay.number_of_neutrons(), kind.number_of_neutrons());
        decay.set_input_particle(&moving_input(kind, 2.0));
        let mut rng = RngHandle::from_seed(1);
        let state = decay.generate(&mut rng).unwrap().unwrap();
        assert_eq!(state.neutrons.len(), kind.number_of_neutrons());
        assert_eq!(state.len(), kind.number_of_neutrons() + 2);
        for indx in 0..state.len() {
            assert_eq!(decay.final_state(indx), &state[indx]);
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn conservation_holds_for_random_inputs(
        seed in any::<u64>(),
        model in 0usize..5,
        excitation in 0.05f64..8.0,
        kinetic in 0.0f64..20_000.0,
        dx in -1.0f64..1.0,
        dy in -1.0f64..1.0,
    ) {
        let kind = DecayKind::ALL[model];
        let mut decay = configured(kind);
        let mass = FRAGMENT_MASS + kind.number_of_neutrons() as f64 * NEUTRON_MASS;
        let direction = Vector3::new(dx, dy, 0.5);
        let particle = Particle::with_kinetic_energy(mass, excitation, direction, kinetic);
        decay.set_input_particle(&particle);
        let mut rng = RngHandle::from_seed(seed);
        if let Some(state) = decay.generate(&mut rng).unwrap() {
            prop_assert!(state.is_conserved(1e-9));
            prop_assert!(state.decay_energy >= 0.0);
            prop_assert!(state.decay_energy <= excitation);
        }
    }
}
