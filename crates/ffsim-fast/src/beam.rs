//! Ion beam energy resolution.
//!
//! A configured energy wins. Otherwise the first incoming beam proton is
//! snapped to the nearest standard operating point, and without one the
//! resolver falls back to [`DEFAULT_ION_BEAM_ENERGY`].

use ffsim_core::TruthParticle;
use serde::{Deserialize, Serialize};

use crate::config::SmearingConfig;

/// Beam energy assumed when the event has no incoming proton (GeV).
pub const DEFAULT_ION_BEAM_ENERGY: f64 = 100.0;

/// Standard operating points as `(open lower bound, open upper bound, nominal)`.
const OPERATING_POINTS: [(f64, f64, f64); 3] = [
    (33.0, 50.0, 41.0),
    (80.0, 120.0, 100.0),
    (220.0, 330.0, 275.0),
];

/// Where the event's beam energy came from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum BeamEnergySource {
    /// Fixed in the run configuration.
    Configured,
    /// Incoming proton energy snapped to an operating point.
    Snapped {
        /// Energy of the incoming proton.
        observed: f64,
    },
    /// Incoming proton energy outside every window, used verbatim.
    NonStandard {
        /// Energy of the incoming proton.
        observed: f64,
    },
    /// No incoming proton; default energy used.
    Default,
}

/// Beam parameters shared by every region for one event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BeamContext {
    /// Effective ion beam energy (GeV).
    pub ion_beam_energy: f64,
    /// Crossing angle (rad).
    pub crossing_angle: f64,
    /// Provenance of `ion_beam_energy`.
    pub source: BeamEnergySource,
}

impl BeamContext {
    /// Resolves the beam for one event. Runs the fallback chain at most once.
    pub fn resolve(config: &SmearingConfig, truth: &[TruthParticle]) -> Self {
        let (ion_beam_energy, source) = resolve_beam_energy(config.ion_beam_energy, truth);
        Self {
            ion_beam_energy,
            crossing_angle: config.crossing_angle,
            source,
        }
    }

    /// True when the energy is a best-effort guess rather than a standard value.
    pub fn is_fallback(&self) -> bool {
        matches!(
            self.source,
            BeamEnergySource::NonStandard { .. } | BeamEnergySource::Default
        )
    }
}

/// Snaps an observed proton energy to a standard operating point.
pub fn snap_to_operating_point(energy: f64) -> Option<f64> {
    OPERATING_POINTS
        .iter()
        .find(|(low, high, _)| *low < energy && energy < *high)
        .map(|(_, _, nominal)| *nominal)
}

/// Resolves the effective ion beam energy and records its provenance.
pub fn resolve_beam_energy(configured: f64, truth: &[TruthParticle]) -> (f64, BeamEnergySource) {
    if configured > 0.0 {
        return (configured, BeamEnergySource::Configured);
    }
    let incoming = truth.iter().find(|part| part.is_incoming_proton());
    match incoming {
        Some(part) if part.energy > 0.0 => {
            let observed = part.energy;
            match snap_to_operating_point(observed) {
                Some(nominal) => (nominal, BeamEnergySource::Snapped { observed }),
                None => {
                    log::warn!("Ion beam energy {observed} not a standard setting.");
                    (observed, BeamEnergySource::NonStandard { observed })
                }
            }
        }
        _ => {
            log::warn!(
                "No incoming ion beam; using {DEFAULT_ION_BEAM_ENERGY} GeV ion beam energy."
            );
            (DEFAULT_ION_BEAM_ENERGY, BeamEnergySource::Default)
        }
    }
}
