//! Multi-event batch driver.

use std::collections::BTreeMap;

use ffsim_core::errors::{ErrorInfo, FfsError};
use ffsim_core::serde::stable_hash_string;
use ffsim_core::TruthParticle;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::assembler::{EventOutput, FarForwardSmearer};
use crate::determinism;

/// Options governing multi-event processing.
#[derive(Debug, Clone)]
pub struct BatchOpts {
    /// Worker threads; output does not depend on this value.
    pub threads: usize,
}

impl Default for BatchOpts {
    fn default() -> Self {
        Self { threads: 1 }
    }
}

/// Aggregate counters over a batch.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RunTotals {
    /// Number of events processed.
    pub events: usize,
    /// Truth particles read.
    pub truth_particles: usize,
    /// Reconstructed particles written.
    pub reconstructed: usize,
    /// Accepted particles per region label.
    pub accepted: BTreeMap<String, usize>,
    /// Truth particles skipped for generator status above 1.
    pub skipped_non_final: usize,
    /// Responses that clamped a negative radicand or a sub-mass energy.
    pub clamped_radicands: usize,
    /// Events whose beam energy came from a fallback.
    pub beam_fallbacks: usize,
}

/// Result of a batch run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Master seed the per-event streams were derived from.
    pub master_seed: u64,
    /// Per-event outputs in input order.
    pub events: Vec<EventOutput>,
    /// Aggregate counters.
    pub totals: RunTotals,
    /// SHA-256 of the canonical JSON encoding of `events`.
    pub digest: String,
}

/// Processes a batch of events, each with its own derived random stream.
///
/// Every truth particle is validated before any event is smeared; the first
/// malformed record fails the whole batch with [`FfsError::Kinematics`].
pub fn process_events(
    smearer: &FarForwardSmearer,
    events: &[Vec<TruthParticle>],
    master_seed: u64,
    opts: &BatchOpts,
) -> Result<RunSummary, FfsError> {
    validate_events(events)?;
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(opts.threads.max(1))
        .build()
        .map_err(|err| FfsError::Io(ErrorInfo::new("thread_pool", err.to_string())))?;

    let outputs: Vec<EventOutput> = pool.install(|| {
        events
            .par_iter()
            .enumerate()
            .map(|(index, truth)| {
                let mut rng = determinism::event_rng(master_seed, index);
                smearer.process_event(truth, &mut rng)
            })
            .collect()
    });

    let totals = tally(events, &outputs);
    let digest = stable_hash_string(&outputs)?;
    log::info!(
        "processed {} events: {} truth particles, {} reconstructed, {} beam fallbacks",
        totals.events,
        totals.truth_particles,
        totals.reconstructed,
        totals.beam_fallbacks
    );

    Ok(RunSummary {
        master_seed,
        events: outputs,
        totals,
        digest,
    })
}

fn validate_events(events: &[Vec<TruthParticle>]) -> Result<(), FfsError> {
    for (event, truth) in events.iter().enumerate() {
        for (index, part) in truth.iter().enumerate() {
            part.validate().map_err(|err| match err {
                FfsError::Kinematics(info) => FfsError::Kinematics(
                    info.with_context("event", event.to_string())
                        .with_context("particle", index.to_string()),
                ),
                other => other,
            })?;
        }
    }
    Ok(())
}

fn tally(events: &[Vec<TruthParticle>], outputs: &[EventOutput]) -> RunTotals {
    let mut totals = RunTotals {
        events: outputs.len(),
        truth_particles: events.iter().map(Vec::len).sum(),
        ..RunTotals::default()
    };
    for output in outputs {
        totals.reconstructed += output.particles.len();
        totals.skipped_non_final += output.stats.skipped_non_final;
        totals.clamped_radicands += output.stats.clamped_radicands;
        if output.beam.is_fallback() {
            totals.beam_fallbacks += 1;
        }
        for (label, count) in &output.stats.accepted {
            *totals.accepted.entry(label.clone()).or_insert(0) += count;
        }
    }
    totals
}
