//! Truth and reconstructed particle records plus their associations.

use std::convert::TryFrom;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::{ErrorInfo, FfsError};
use crate::kinematics::Vector3;

/// PDG Monte Carlo species codes referenced by the far-forward regions.
pub mod pdg {
    /// Photon.
    pub const PHOTON: i32 = 22;
    /// Charged pion (positive).
    pub const PION_PLUS: i32 = 211;
    /// Charged kaon (positive).
    pub const KAON_PLUS: i32 = 321;
    /// Neutron.
    pub const NEUTRON: i32 = 2112;
    /// Proton.
    pub const PROTON: i32 = 2212;
}

/// Generator status codes with special meaning.
pub mod status {
    /// Stable final-state particle.
    pub const FINAL_STATE: i32 = 1;
    /// Incoming beam particle.
    pub const INCOMING_BEAM: i32 = 4;
}

/// Generator-level particle for one event. Never mutated by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TruthParticle {
    /// Generator status code (1 = final state, 4 = incoming beam).
    pub generator_status: i32,
    /// PDG species code.
    pub pdg: i32,
    /// Electric charge in units of e.
    pub charge: f64,
    /// Rest mass in GeV.
    pub mass: f64,
    /// Total energy in GeV.
    pub energy: f64,
    /// Lab-frame momentum in GeV.
    pub momentum: Vector3,
    /// Production vertex in mm.
    #[serde(default)]
    pub vertex: Vector3,
}

impl TruthParticle {
    /// True when the particle is final state (status at most 1).
    pub fn is_final_state(&self) -> bool {
        self.generator_status <= status::FINAL_STATE
    }

    /// True for the incoming ion-beam proton used to infer the beam energy.
    pub fn is_incoming_proton(&self) -> bool {
        self.generator_status == status::INCOMING_BEAM && self.pdg == pdg::PROTON
    }

    /// Rejects records the response models cannot handle: any non-finite
    /// component or a negative mass.
    pub fn validate(&self) -> Result<(), FfsError> {
        let field = if !self.energy.is_finite() {
            Some("energy")
        } else if !self.mass.is_finite() || self.mass < 0.0 {
            Some("mass")
        } else if !self.charge.is_finite() {
            Some("charge")
        } else if !self.momentum.is_finite() {
            Some("momentum")
        } else if !self.vertex.is_finite() {
            Some("vertex")
        } else {
            None
        };
        match field {
            None => Ok(()),
            Some(field) => Err(FfsError::Kinematics(
                ErrorInfo::new("invalid-truth", format!("truth particle has invalid {field}"))
                    .with_context("field", field)
                    .with_context("pdg", self.pdg.to_string())
                    .with_hint("check the generator output for NaN or infinite values"),
            )),
        }
    }
}

/// Far-forward detector station that produced a reconstructed particle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "i32", try_from = "i32")]
pub enum DetectorTag {
    /// Intermediate magnetic spectrometer (B0).
    Intermediate,
    /// Forward proton spectrometer (Roman pots).
    ForwardProton,
    /// Off-momentum detector.
    OffMomentum,
    /// Forward neutral/photon calorimeter (ZDC).
    ForwardNeutral,
}

impl DetectorTag {
    /// All tags in ascending raw order.
    pub const ALL: [DetectorTag; 4] = [
        DetectorTag::Intermediate,
        DetectorTag::ForwardProton,
        DetectorTag::OffMomentum,
        DetectorTag::ForwardNeutral,
    ];

    /// Raw integer written to the `type` field of reconstructed particles.
    pub fn as_raw(&self) -> i32 {
        match self {
            DetectorTag::Intermediate => 1,
            DetectorTag::ForwardProton => 2,
            DetectorTag::OffMomentum => 3,
            DetectorTag::ForwardNeutral => 4,
        }
    }

    /// Short station label used in logs and summaries.
    pub fn label(&self) -> &'static str {
        match self {
            DetectorTag::Intermediate => "b0",
            DetectorTag::ForwardProton => "rp",
            DetectorTag::OffMomentum => "omd",
            DetectorTag::ForwardNeutral => "zdc",
        }
    }
}

impl fmt::Display for DetectorTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl From<DetectorTag> for i32 {
    fn from(tag: DetectorTag) -> Self {
        tag.as_raw()
    }
}

impl TryFrom<i32> for DetectorTag {
    type Error = FfsError;

    fn try_from(raw: i32) -> Result<Self, Self::Error> {
        DetectorTag::ALL
            .into_iter()
            .find(|tag| tag.as_raw() == raw)
            .ok_or_else(|| {
                FfsError::Serde(
                    ErrorInfo::new("unknown-detector-tag", "detector tag out of range")
                        .with_context("raw", raw.to_string()),
                )
            })
    }
}

/// Smeared particle emitted by one far-forward region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconstructedParticle {
    /// Region that accepted the particle.
    #[serde(rename = "type")]
    pub tag: DetectorTag,
    /// Measured energy in GeV.
    pub energy: f64,
    /// Measured lab-frame momentum in GeV.
    pub momentum: Vector3,
    /// Reference point, copied from the truth vertex.
    pub reference_point: Vector3,
    /// Charge copied from truth.
    pub charge: i16,
    /// Mass copied from truth.
    pub mass: f64,
    /// PID confidence; always 1 in this model.
    pub goodness_of_pid: f64,
    /// PDG hypothesis copied from truth.
    pub pdg: i32,
}

/// Link from a reconstructed particle back to its truth particle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Association {
    /// Index of the reconstructed particle in the event output.
    pub rec_id: usize,
    /// Index of the truth particle in the event input.
    pub sim_id: usize,
    /// Match weight; always 1.
    pub weight: f64,
}

impl Association {
    /// Creates an unambiguous association.
    pub fn new(rec_id: usize, sim_id: usize) -> Self {
        Self {
            rec_id,
            sim_id,
            weight: 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn neutron() -> TruthParticle {
        TruthParticle {
            generator_status: status::FINAL_STATE,
            pdg: pdg::NEUTRON,
            charge: 0.0,
            mass: 0.939565,
            energy: 50.0,
            momentum: Vector3::new(0.0, 0.0, 49.99),
            vertex: Vector3::ZERO,
        }
    }

    #[test]
    fn finite_particle_validates() {
        assert!(neutron().validate().is_ok());
    }

    #[test]
    fn non_finite_momentum_is_a_kinematics_error() {
        let mut part = neutron();
        part.momentum.y = f64::NAN;
        let err = part.validate().unwrap_err();
        assert!(matches!(err, FfsError::Kinematics(_)));
        assert_eq!(err.info().context.get("field").map(String::as_str), Some("momentum"));
        assert!(err.info().hint.is_some());
    }

    #[test]
    fn negative_mass_is_rejected() {
        let mut part = neutron();
        part.mass = -0.1;
        let err = part.validate().unwrap_err();
        assert_eq!(err.info().context.get("field").map(String::as_str), Some("mass"));
    }
}
