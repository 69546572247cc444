//! Per-event stream derivation for batch runs.

use ffsim_core::{derive_substream_seed, RngHandle};

/// Derives the deterministic seed used for a specific event.
pub fn event_seed(master_seed: u64, event_index: usize) -> u64 {
    derive_substream_seed(master_seed, event_index as u64)
}

/// Creates the exclusively owned stream for one event.
pub fn event_rng(master_seed: u64, event_index: usize) -> RngHandle {
    RngHandle::for_substream(master_seed, event_index as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ffsim_core::NormalSource;

    #[test]
    fn event_stream_matches_its_seed() {
        let mut from_index = event_rng(31, 5);
        let mut from_seed = RngHandle::from_seed(event_seed(31, 5));
        assert_eq!(from_index.normal_triplet(), from_seed.normal_triplet());
    }
}
