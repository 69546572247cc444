//! Three-vector type and the pure kinematic helpers used by the response models.
//!
//! Conventions follow the detector frame: `z` along the nominal forward beam
//! line, `y` vertical, polar angle measured from `+z`.

use std::ops::{Add, Mul, Sub};

use serde::{Deserialize, Serialize};

/// Cartesian three-vector in GeV (momenta) or mm (positions).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector3 {
    /// Horizontal component.
    pub x: f64,
    /// Vertical component.
    pub y: f64,
    /// Longitudinal component.
    pub z: f64,
}

impl Vector3 {
    /// The zero vector.
    pub const ZERO: Vector3 = Vector3 {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    /// Creates a vector from its Cartesian components.
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Builds a vector from magnitude, polar angle and azimuthal angle.
    pub fn from_spherical(magnitude: f64, theta: f64, phi: f64) -> Self {
        let (sin_theta, cos_theta) = theta.sin_cos();
        let (sin_phi, cos_phi) = phi.sin_cos();
        Self {
            x: magnitude * sin_theta * cos_phi,
            y: magnitude * sin_theta * sin_phi,
            z: magnitude * cos_theta,
        }
    }

    /// Euclidean length.
    pub fn magnitude(&self) -> f64 {
        self.magnitude_transverse().hypot(self.z)
    }

    /// Length of the component transverse to the beam line.
    pub fn magnitude_transverse(&self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Polar angle in `[0, π]` measured from `+z`.
    pub fn polar_angle(&self) -> f64 {
        self.magnitude_transverse().atan2(self.z)
    }

    /// Azimuthal angle in `(-π, π]`.
    pub fn azimuthal_angle(&self) -> f64 {
        self.y.atan2(self.x)
    }

    /// Returns true when all components are finite.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl Add for Vector3 {
    type Output = Vector3;

    fn add(self, rhs: Vector3) -> Vector3 {
        Vector3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vector3 {
    type Output = Vector3;

    fn sub(self, rhs: Vector3) -> Vector3 {
        Vector3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f64> for Vector3 {
    type Output = Vector3;

    fn mul(self, rhs: f64) -> Vector3 {
        Vector3::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

/// Momentum magnitude for a given total energy and mass.
///
/// Evaluated as `(E - m)(E + m)` so that light particles at high energy keep
/// full double precision. A negative radicand (energy smeared below the
/// mass) yields `None`.
pub fn momentum_from_energy(energy: f64, mass: f64) -> Option<f64> {
    let radicand = (energy - mass) * (energy + mass);
    if radicand < 0.0 {
        None
    } else {
        Some(radicand.sqrt())
    }
}
