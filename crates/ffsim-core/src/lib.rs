#![deny(missing_docs)]
#![doc = "Core particle records, kinematics, errors and deterministic RNG for the far-forward fast simulation."]

pub mod errors;
pub mod kinematics;
pub mod particle;
pub mod provenance;
pub mod rng;
/// Canonical JSON encoding and stable hashing helpers.
pub mod serde;

pub use errors::{ErrorInfo, FfsError};
pub use kinematics::{momentum_from_energy, Vector3};
pub use particle::{pdg, status, Association, DetectorTag, ReconstructedParticle, TruthParticle};
pub use provenance::{RunProvenance, SchemaVersion};
pub use rng::{derive_substream_seed, NormalSource, RngHandle};
