//! Rotations between the lab frame and the nominal ion-beam frame.
//!
//! The ion beam is tilted by the crossing angle about the vertical (`y`) axis.
//! All three rotations are exact inverses pairwise up to floating-point
//! rounding; `remove_crossing_angle` is numerically identical to
//! `rotate_to_ion_frame` but marks the acceptance-cut call sites.

use ffsim_core::Vector3;

fn rotate_about_y(v: Vector3, angle: f64) -> Vector3 {
    let (sin, cos) = angle.sin_cos();
    Vector3::new(cos * v.x + sin * v.z, v.y, -sin * v.x + cos * v.z)
}

/// Rotates a lab-frame vector into the ion-beam frame.
pub fn rotate_to_ion_frame(v: Vector3, crossing_angle: f64) -> Vector3 {
    rotate_about_y(v, -crossing_angle)
}

/// Rotates an ion-frame vector back into the lab frame.
pub fn rotate_to_lab_frame(v: Vector3, crossing_angle: f64) -> Vector3 {
    rotate_about_y(v, crossing_angle)
}

/// Removes the crossing angle before angular and rigidity acceptance cuts.
pub fn remove_crossing_angle(v: Vector3, crossing_angle: f64) -> Vector3 {
    rotate_about_y(v, -crossing_angle)
}

/// Crossing-angle frame bound to a single configured angle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CrossingFrame {
    angle: f64,
}

impl CrossingFrame {
    /// Binds the frame to a crossing angle in radians.
    pub fn new(angle: f64) -> Self {
        Self { angle }
    }

    /// Configured crossing angle.
    pub fn angle(&self) -> f64 {
        self.angle
    }

    /// See [`rotate_to_ion_frame`].
    pub fn to_ion(&self, v: Vector3) -> Vector3 {
        rotate_to_ion_frame(v, self.angle)
    }

    /// See [`rotate_to_lab_frame`].
    pub fn to_lab(&self, v: Vector3) -> Vector3 {
        rotate_to_lab_frame(v, self.angle)
    }

    /// See [`remove_crossing_angle`].
    pub fn remove_crossing_angle(&self, v: Vector3) -> Vector3 {
        remove_crossing_angle(v, self.angle)
    }
}
