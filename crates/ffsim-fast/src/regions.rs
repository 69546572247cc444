//! Far-forward detector regions.
//!
//! Each region is a tagged variant carrying its own configuration. Acceptance
//! is a pure function of the truth particle, the beam energy and the frame;
//! the response consumes draws from the caller's stream only for accepted
//! particles.

use ffsim_core::{pdg, DetectorTag, NormalSource, ReconstructedParticle, TruthParticle, Vector3};

use crate::beam::BeamContext;
use crate::config::{
    ForwardNeutralConfig, ForwardProtonConfig, IntermediateConfig, MomentumResolution,
    OffMomentumConfig, SmearingConfig,
};
use crate::frame::CrossingFrame;
use crate::response::{self, SmearedKinematics};

/// Slack on angular bounds for `atan2` rounding (rad).
const ANGLE_TOLERANCE: f64 = 1e-12;

const INTERMEDIATE_SPECIES: [i32; 7] = [
    pdg::PROTON,
    -pdg::PROTON,
    pdg::PION_PLUS,
    -pdg::PION_PLUS,
    pdg::KAON_PLUS,
    -pdg::KAON_PLUS,
    pdg::PHOTON,
];

/// One far-forward station with its acceptance window.
#[derive(Debug, Clone, PartialEq)]
pub enum Region {
    /// Zero-degree neutral/photon calorimeter.
    ForwardNeutral(ForwardNeutralConfig),
    /// Roman-pot proton spectrometer.
    ForwardProton(ForwardProtonConfig),
    /// B0 spectrometer.
    Intermediate(IntermediateConfig),
    /// Off-momentum detector.
    OffMomentum(OffMomentumConfig),
}

/// Per-event inputs shared by every region.
#[derive(Debug, Clone, Copy)]
pub struct RegionContext<'a> {
    /// Resolved beam for the event.
    pub beam: &'a BeamContext,
    /// Crossing-angle frame.
    pub frame: CrossingFrame,
    /// Spectrometer resolution terms.
    pub momentum_resolution: &'a MomentumResolution,
}

impl<'a> RegionContext<'a> {
    /// Builds the context for one event.
    pub fn new(beam: &'a BeamContext, momentum_resolution: &'a MomentumResolution) -> Self {
        Self {
            beam,
            frame: CrossingFrame::new(beam.crossing_angle),
            momentum_resolution,
        }
    }
}

/// A reconstructed particle together with the index of its truth particle.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    /// Smeared particle, lab frame.
    pub particle: ReconstructedParticle,
    /// Index of the source truth particle.
    pub sim_id: usize,
    /// True when the response clamped a negative radicand.
    pub clamped: bool,
}

/// Enabled regions in output order: neutral, proton, intermediate, off-momentum.
pub fn enabled_regions(config: &SmearingConfig) -> Vec<Region> {
    let mut regions = Vec::with_capacity(4);
    if config.forward_neutral.enabled {
        regions.push(Region::ForwardNeutral(config.forward_neutral.clone()));
    }
    if config.forward_proton.enabled {
        regions.push(Region::ForwardProton(config.forward_proton.clone()));
    }
    if config.intermediate.enabled {
        regions.push(Region::Intermediate(config.intermediate.clone()));
    }
    if config.off_momentum.enabled {
        regions.push(Region::OffMomentum(config.off_momentum.clone()));
    }
    regions
}

impl Region {
    /// Tag written to reconstructed particles from this region.
    pub fn tag(&self) -> DetectorTag {
        match self {
            Region::ForwardNeutral(_) => DetectorTag::ForwardNeutral,
            Region::ForwardProton(_) => DetectorTag::ForwardProton,
            Region::Intermediate(_) => DetectorTag::Intermediate,
            Region::OffMomentum(_) => DetectorTag::OffMomentum,
        }
    }

    /// Geometric and kinematic acceptance. Non-final-state particles never pass.
    pub fn accepts(&self, part: &TruthParticle, beam_energy: f64, frame: &CrossingFrame) -> bool {
        if !part.is_final_state() {
            return false;
        }
        if !self.accepts_species(part.pdg) {
            return false;
        }
        let mom_ion = frame.remove_crossing_angle(part.momentum);
        if !self.accepts_polar_angle(mom_ion.polar_angle()) {
            return false;
        }
        match self {
            Region::ForwardNeutral(_) | Region::Intermediate(_) => true,
            Region::ForwardProton(cfg) => mom_ion.z >= cfg.min_rigidity * beam_energy,
            Region::OffMomentum(cfg) => within(
                mom_ion.z,
                cfg.min_rigidity * beam_energy,
                cfg.max_rigidity * beam_energy,
            ),
        }
    }

    /// Angular window on the ion-frame polar angle; bounds are inclusive up
    /// to a 1e-12 rad rounding slack.
    pub fn accepts_polar_angle(&self, theta: f64) -> bool {
        match self {
            Region::ForwardNeutral(cfg) => theta <= cfg.theta_max + ANGLE_TOLERANCE,
            Region::ForwardProton(cfg) => within_angle(theta, cfg.theta_min, cfg.theta_max),
            Region::Intermediate(cfg) => within_angle(theta, cfg.theta_min, cfg.theta_max),
            Region::OffMomentum(_) => true,
        }
    }

    /// Species the station can detect.
    pub fn accepts_species(&self, code: i32) -> bool {
        match self {
            Region::ForwardNeutral(_) => code == pdg::NEUTRON || code == pdg::PHOTON,
            Region::Intermediate(_) => INTERMEDIATE_SPECIES.contains(&code),
            Region::ForwardProton(_) | Region::OffMomentum(_) => code == pdg::PROTON,
        }
    }

    /// Applies acceptance and, when accepted, the station's response.
    pub fn classify(
        &self,
        sim_id: usize,
        part: &TruthParticle,
        ctx: &RegionContext<'_>,
        rng: &mut dyn NormalSource,
    ) -> Option<Candidate> {
        if !part.is_final_state() {
            log::debug!(
                "{}: ignoring particle with generator status {}",
                self.tag(),
                part.generator_status
            );
            return None;
        }
        if !self.accepts(part, ctx.beam.ion_beam_energy, &ctx.frame) {
            return None;
        }

        let mom_ion = ctx.frame.to_ion(part.momentum);
        let mut smeared = match self {
            Region::ForwardNeutral(cfg) => {
                let resolution = if part.pdg == pdg::PHOTON {
                    &cfg.photon
                } else {
                    &cfg.neutron
                };
                response::smear_calorimetric(part.energy, part.mass, mom_ion, resolution, rng)
            }
            Region::ForwardProton(_) | Region::Intermediate(_) | Region::OffMomentum(_) => {
                response::smear_momentum(mom_ion, part.mass, ctx.momentum_resolution, rng)
            }
        };
        // B0 sees photon presence and direction only.
        if matches!(self, Region::Intermediate(_)) && part.pdg == pdg::PHOTON {
            smeared.energy = 0.0;
            smeared.momentum_ion = Vector3::ZERO;
        }
        if smeared.clamped {
            log::debug!(
                "{}: clamped negative radicand for truth particle {sim_id} (pdg {})",
                self.tag(),
                part.pdg
            );
        }

        let particle = reconstruct(self.tag(), part, &smeared, &ctx.frame);
        log::debug!(
            "Found {} particle: {}, ptrue: {}, pmeas: {}, theta_true: {}, theta_meas: {}",
            self.tag(),
            part.pdg,
            part.momentum.magnitude(),
            particle.momentum.magnitude(),
            part.momentum.polar_angle(),
            particle.momentum.polar_angle()
        );
        Some(Candidate {
            particle,
            sim_id,
            clamped: smeared.clamped,
        })
    }
}

fn within(value: f64, min: f64, max: f64) -> bool {
    value >= min && value <= max
}

fn within_angle(theta: f64, min: f64, max: f64) -> bool {
    within(theta, min - ANGLE_TOLERANCE, max + ANGLE_TOLERANCE)
}

fn reconstruct(
    tag: DetectorTag,
    part: &TruthParticle,
    smeared: &SmearedKinematics,
    frame: &CrossingFrame,
) -> ReconstructedParticle {
    ReconstructedParticle {
        tag,
        energy: smeared.energy,
        momentum: frame.to_lab(smeared.momentum_ion),
        reference_point: part.vertex,
        // Truncates toward zero.
        charge: part.charge as i16,
        mass: part.mass,
        goodness_of_pid: 1.0,
        pdg: part.pdg,
    }
}
