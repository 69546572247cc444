//! Per-event driver: resolves the beam once, runs every enabled region over
//! the truth sequence and concatenates the results in region order.

use std::collections::BTreeMap;

use ffsim_core::{Association, FfsError, NormalSource, ReconstructedParticle, TruthParticle};
use serde::{Deserialize, Serialize};

use crate::beam::BeamContext;
use crate::config::SmearingConfig;
use crate::regions::{self, Region, RegionContext};

/// Diagnostic counters for one event.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EventStats {
    /// Accepted particles per region label.
    pub accepted: BTreeMap<String, usize>,
    /// Truth particles with generator status above 1.
    pub skipped_non_final: usize,
    /// Responses that clamped a negative radicand or a sub-mass energy.
    pub clamped_radicands: usize,
}

/// Output collections of one event. `particles[i]` pairs with `associations[i]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventOutput {
    /// Beam used for the event.
    pub beam: BeamContext,
    /// Reconstructed particles in region order, then truth order.
    pub particles: Vec<ReconstructedParticle>,
    /// Truth associations, index-aligned with `particles`.
    pub associations: Vec<Association>,
    /// Diagnostic counters.
    pub stats: EventStats,
}

impl EventOutput {
    /// Checks the index correspondence between particles and associations.
    pub fn is_aligned(&self, truth_len: usize) -> bool {
        self.particles.len() == self.associations.len()
            && self
                .associations
                .iter()
                .enumerate()
                .all(|(idx, assoc)| assoc.rec_id == idx && assoc.sim_id < truth_len)
    }
}

/// Far-forward smearing engine configured for a run.
#[derive(Debug, Clone)]
pub struct FarForwardSmearer {
    config: SmearingConfig,
    regions: Vec<Region>,
}

impl FarForwardSmearer {
    /// Validates the configuration and fixes the region order.
    pub fn new(config: SmearingConfig) -> Result<Self, FfsError> {
        config.validate()?;
        let regions = regions::enabled_regions(&config);
        Ok(Self { config, regions })
    }

    /// Configuration the engine was built from.
    pub fn config(&self) -> &SmearingConfig {
        &self.config
    }

    /// Enabled regions in processing order.
    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// Processes one event to completion.
    ///
    /// Draws are consumed region by region, and within a region in truth
    /// order, so identical input and stream state reproduce the output
    /// exactly.
    pub fn process_event(
        &self,
        truth: &[TruthParticle],
        rng: &mut dyn NormalSource,
    ) -> EventOutput {
        let beam = BeamContext::resolve(&self.config, truth);
        let ctx = RegionContext::new(&beam, &self.config.momentum_resolution);

        let mut stats = EventStats {
            skipped_non_final: truth.iter().filter(|part| !part.is_final_state()).count(),
            ..EventStats::default()
        };
        let mut particles = Vec::new();
        let mut associations = Vec::new();

        for region in &self.regions {
            let mut accepted = 0usize;
            for (sim_id, part) in truth.iter().enumerate() {
                let Some(candidate) = region.classify(sim_id, part, &ctx, rng) else {
                    continue;
                };
                if candidate.clamped {
                    stats.clamped_radicands += 1;
                }
                associations.push(Association::new(particles.len(), candidate.sim_id));
                particles.push(candidate.particle);
                accepted += 1;
            }
            stats
                .accepted
                .insert(region.tag().label().to_string(), accepted);
        }

        EventOutput {
            beam,
            particles,
            associations,
            stats,
        }
    }
}
