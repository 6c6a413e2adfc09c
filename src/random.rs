//! Seeded random number generation.
//!
//! Every run owns exactly one generator, created here from a `u64` seed.
//! Nothing in the crate touches a thread-local or global generator, so a
//! seed fully determines a run.

use std::time::{SystemTime, UNIX_EPOCH};

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Creates a deterministic generator from `seed`.
pub fn create_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Derives a seed from the current UNIX time in whole seconds.
pub fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}
