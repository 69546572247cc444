use criterion::{criterion_group, criterion_main, Criterion};
use ffsim_core::{pdg, TruthParticle, Vector3};
use ffsim_fast::determinism::event_rng;
use ffsim_fast::{
    process_events, rotate_to_lab_frame, BatchOpts, FarForwardSmearer, SmearingConfig,
};

fn forward(pdg: i32, mass: f64, p: f64, theta: f64, phi: f64) -> TruthParticle {
    let momentum = rotate_to_lab_frame(Vector3::from_spherical(p, theta, phi), -0.025);
    TruthParticle {
        generator_status: 1,
        pdg,
        charge: if pdg == pdg::PROTON { 1.0 } else { 0.0 },
        mass,
        energy: p.hypot(mass),
        momentum,
        vertex: Vector3::ZERO,
    }
}

fn sample_event() -> Vec<TruthParticle> {
    let mut event = Vec::new();
    for i in 0..40 {
        let phi = i as f64 * 0.157;
        event.push(forward(pdg::NEUTRON, 0.9396, 40.0 + i as f64, 1e-3, phi));
        event.push(forward(pdg::PROTON, 0.9383, 30.0 + i as f64, 3e-3, phi));
        event.push(forward(211, 0.1396, 5.0, 10e-3, phi));
        event.push(forward(pdg::PHOTON, 0.0, 2.0, 30e-3, phi));
    }
    event
}

fn bench_event(c: &mut Criterion) {
    let mut config = SmearingConfig::default();
    config.ion_beam_energy = 100.0;
    let smearer = FarForwardSmearer::new(config).unwrap();
    let event = sample_event();

    c.bench_function("smear_event", |b| {
        b.iter(|| {
            let mut rng = event_rng(42, 0);
            let _ = smearer.process_event(&event, &mut rng);
        })
    });

    let events: Vec<_> = (0..64).map(|_| sample_event()).collect();
    c.bench_function("smear_batch_64", |b| {
        b.iter(|| {
            let _ = process_events(&smearer, &events, 42, &BatchOpts { threads: 4 }).unwrap();
        })
    });
}

criterion_group!(benches, bench_event);
criterion_main!(benches);
