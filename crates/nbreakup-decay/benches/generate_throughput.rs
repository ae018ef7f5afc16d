use nbreakup_core::{Particle, RngHandle, NEUTRON_MASS};
use nbreakup_decay::{create_decay, DecayKind};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

const FRAGMENT_MASS: f64 = 22_330.0;

fn generate_bench(c: &mut Criterion) {
    for kind in DecayKind::ALL {
        let mut decay = create_decay(kind);
        if kind == DecayKind::OneNeutron {
            decay.set_decay_param("energy", 0.8).unwrap();
            decay.set_decay_param("width", 0.2).unwrap();
        }
        let mass = FRAGMENT_MASS + kind.number_of_neutrons() as f64 * NEUTRON_MASS;
        decay.set_input_particle(&Particle::at_rest(mass, 2.0));
        let mut rng = RngHandle::from_seed(42);
        c.bench_function(&format!("generate_{kind}"), |b| {
            b.iter(|| {
                let state = decay.generate(&mut rng).unwrap();
                black_box(state);
            });
        });
    }
}

criterion_group!(benches, generate_bench);
criterion_main!(benches);
