#![deny(missing_docs)]

//! Far-forward fast simulation: acceptance of truth particles by the
//! zero-degree calorimeter, Roman pots, B0 spectrometer and off-momentum
//! detector, with stochastic smearing of the accepted particles.

/// Per-event output assembly.
pub mod assembler;
/// Ion beam energy resolution.
pub mod beam;
/// YAML configuration schema and defaults.
pub mod config;
/// Deterministic per-event seed derivation.
pub mod determinism;
/// Crossing-angle frame rotations.
pub mod frame;
/// Detector regions and their acceptance.
pub mod regions;
/// Stochastic response models.
pub mod response;
/// Multi-event batch driver.
pub mod run;

pub use assembler::{EventOutput, EventStats, FarForwardSmearer};
pub use beam::{BeamContext, BeamEnergySource, DEFAULT_ION_BEAM_ENERGY};
pub use config::{load_config, SmearingConfig};
pub use frame::{remove_crossing_angle, rotate_to_ion_frame, rotate_to_lab_frame, CrossingFrame};
pub use regions::Region;
pub use run::{process_events, BatchOpts, RunSummary, RunTotals};
