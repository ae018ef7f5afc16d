//! Seeded random source for decay generators and per-event seed derivation.

use std::hash::Hasher;

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use siphasher::sip::SipHasher13;

/// Fixed SipHash keys; derived seeds must not depend on the platform or run.
const SEED_KEYS: (u64, u64) = (0, 0);

/// Reproducible random source handed to decay generators.
///
/// Generators borrow it as `&mut dyn RngCore` for one `generate` call at a
/// time, so a single handle can drive a whole event loop. Parallel event
/// loops give each worker its own handle through [`RngHandle::for_event`] or
/// [`RngHandle::substream`].
#[derive(Debug, Clone)]
pub struct RngHandle {
    rng: StdRng,
}

impl RngHandle {
    /// Handle seeded directly from `seed`.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Handle for substream `substream` of a master seed.
    pub fn substream(master_seed: u64, substream: u64) -> Self {
        Self::from_seed(derive_substream_seed(master_seed, substream))
    }

    /// Handle dedicated to one event of one worker.
    pub fn for_event(master_seed: u64, worker: usize, event: u64) -> Self {
        Self::from_seed(event_seed(master_seed, worker, event))
    }
}

impl RngCore for RngHandle {
    fn next_u32(&mut self) -> u32 {
        self.rng.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.rng.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.rng.fill_bytes(dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.rng.try_fill_bytes(dest)
    }
}

fn hash_seed(parts: &[u64]) -> u64 {
    let mut hasher = SipHasher13::new_with_keys(SEED_KEYS.0, SEED_KEYS.1);
    for part in parts {
        hasher.write_u64(*part);
    }
    hasher.finish()
}

/// Seed of substream `substream` of `master_seed` (SipHash-1-3).
pub fn derive_substream_seed(master_seed: u64, substream: u64) -> u64 {
    hash_seed(&[master_seed, substream])
}

/// Seed for the draws of a single event of a run.
pub fn event_seed(master_seed: u64, worker: usize, event: u64) -> u64 {
    derive_substream_seed(derive_substream_seed(master_seed, worker as u64), event)
}
