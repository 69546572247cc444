#![allow(dead_code)]

use std::collections::VecDeque;

use ffsim_core::{pdg, NormalSource, TruthParticle, Vector3};
use ffsim_fast::SmearingConfig;

pub const PROTON_MASS: f64 = 0.938272;
pub const NEUTRON_MASS: f64 = 0.939565;

/// Replays a fixed list of standard-normal draws.
pub struct ScriptedDraws(VecDeque<f64>);

impl ScriptedDraws {
    pub fn zeros(n: usize) -> Self {
        Self(std::iter::repeat(0.0).take(n).collect())
    }

    pub fn remaining(&self) -> usize {
        self.0.len()
    }
}

impl NormalSource for ScriptedDraws {
    fn standard_normal(&mut self) -> f64 {
        self.0.pop_front().expect("scripted draws exhausted")
    }
}

pub fn truth(pdg: i32, status: i32, momentum: Vector3, mass: f64) -> TruthParticle {
    TruthParticle {
        generator_status: status,
        pdg,
        charge: if pdg == pdg::PROTON { 1.0 } else { 0.0 },
        mass,
        energy: momentum.magnitude().hypot(mass),
        momentum,
        vertex: Vector3::ZERO,
    }
}

pub fn incoming_proton(energy: f64) -> TruthParticle {
    let pz = ((energy - PROTON_MASS) * (energy + PROTON_MASS)).max(0.0).sqrt();
    TruthParticle {
        generator_status: 4,
        pdg: pdg::PROTON,
        charge: 1.0,
        mass: PROTON_MASS,
        energy,
        momentum: Vector3::new(0.0, 0.0, pz),
        vertex: Vector3::ZERO,
    }
}

/// Head-on configuration: no crossing angle, fixed 100 GeV beam.
pub fn head_on_config() -> SmearingConfig {
    let mut config = SmearingConfig::default();
    config.crossing_angle = 0.0;
    config.ion_beam_energy = 100.0;
    config
}

/// A representative 100 GeV event with hits in every station.
pub fn sample_event() -> Vec<TruthParticle> {
    let angle = -0.025_f64;
    let along_beam = |p: f64, theta: f64, phi: f64| {
        let ion = Vector3::from_spherical(p, theta, phi);
        ffsim_fast::rotate_to_lab_frame(ion, angle)
    };
    vec![
        incoming_proton(100.2),
        truth(11, 4, Vector3::new(0.0, 0.0, -10.0), 0.000511),
        truth(pdg::NEUTRON, 1, along_beam(60.0, 1.5e-3, 0.3), NEUTRON_MASS),
        truth(pdg::PHOTON, 1, along_beam(12.0, 2.0e-3, -1.2), 0.0),
        truth(pdg::PROTON, 1, along_beam(85.0, 2.5e-3, 2.0), PROTON_MASS),
        truth(pdg::PROTON, 1, along_beam(45.0, 0.5e-3, 0.1), PROTON_MASS),
        truth(211, 1, along_beam(8.0, 12e-3, 1.0), 0.13957),
        truth(pdg::PHOTON, 1, along_beam(3.0, 15e-3, -0.4), 0.0),
        truth(pdg::PROTON, 1, Vector3::new(0.5, 0.2, 3.0), PROTON_MASS),
    ]
}
