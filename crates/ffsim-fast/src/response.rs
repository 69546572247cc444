//! Stochastic detector response models.
//!
//! Both models work in the ion frame and consume exactly three
//! standard-normal draws per call, in a fixed order, so the random stream
//! advances identically whichever region accepted the particle.

use ffsim_core::{momentum_from_energy, NormalSource, Vector3};

use crate::config::{CalorimeterResolution, MomentumResolution};

/// Result of a single response-model evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SmearedKinematics {
    /// Measured energy (GeV).
    pub energy: f64,
    /// Measured momentum in the ion frame (GeV).
    pub momentum_ion: Vector3,
    /// True when a negative radicand was clamped to zero.
    pub clamped: bool,
}

/// Forward calorimeter response: stochastic plus constant energy term and an
/// energy-dependent polar-angle term. The azimuth is not smeared.
///
/// `Es = E + sqrt((cE)² + s²E)·g1`, `θs = θ + (a/√E)·g2`,
/// `ps = sqrt(Es² − m²)` evaluated without cancellation. `Es < m` is clamped
/// to `Es = m`, `ps = 0` and flagged.
pub fn smear_calorimetric(
    energy: f64,
    mass: f64,
    momentum_ion: Vector3,
    resolution: &CalorimeterResolution,
    rng: &mut dyn NormalSource,
) -> SmearedKinematics {
    let [g_energy, g_theta, _g_phi] = rng.normal_triplet();

    let constant = resolution.constant * energy;
    let sigma_e = (constant * constant + resolution.stochastic * resolution.stochastic * energy)
        .max(0.0)
        .sqrt();
    let smeared_energy = energy + sigma_e * g_energy;

    let sigma_theta = if energy > 0.0 {
        resolution.angular / energy.sqrt()
    } else {
        0.0
    };
    let theta = momentum_ion.polar_angle() + sigma_theta * g_theta;
    let phi = momentum_ion.azimuthal_angle();

    // An energy below the mass (including a negative one) is raised to the
    // mass with zero momentum.
    let (energy, magnitude, clamped) = if smeared_energy < mass {
        (mass, 0.0, true)
    } else {
        match momentum_from_energy(smeared_energy, mass) {
            Some(p) => (smeared_energy, p, false),
            None => (mass, 0.0, true),
        }
    };

    SmearedKinematics {
        energy,
        momentum_ion: Vector3::from_spherical(magnitude, theta, phi),
        clamped,
    }
}

/// Spectrometer response shared by the intermediate, forward-proton and
/// off-momentum regions.
///
/// `ps = p(1 + kp·g1)`, `pxs = px(1 + kt·g2)`, `pys = py(1 + kt·g3)`,
/// `pzs = sqrt(ps² − pxs² − pys²)` with a negative radicand clamped to zero.
pub fn smear_momentum(
    momentum_ion: Vector3,
    mass: f64,
    resolution: &MomentumResolution,
    rng: &mut dyn NormalSource,
) -> SmearedKinematics {
    let [g_p, g_x, g_y] = rng.normal_triplet();

    let p = momentum_ion.magnitude();
    let ps = p + resolution.momentum * p * g_p;
    let pxs = momentum_ion.x + resolution.transverse * momentum_ion.x * g_x;
    let pys = momentum_ion.y + resolution.transverse * momentum_ion.y * g_y;

    let radicand = ps * ps - pxs * pxs - pys * pys;
    let clamped = radicand < 0.0;
    let pzs = if clamped { 0.0 } else { radicand.sqrt() };

    SmearedKinematics {
        energy: ps.hypot(mass),
        momentum_ion: Vector3::new(pxs, pys, pzs),
        clamped,
    }
}
