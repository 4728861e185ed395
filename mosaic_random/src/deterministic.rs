// Copyright 2025 the Mosaic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The seeded, dual-stream generator.

use crate::seed::{Seed, SeedError};
use crate::sfc32::Sfc32;
use crate::source::RandomSource;

/// Outputs discarded from each stream before first use.
pub const WARMUP_ROUNDS: usize = 500_000;

/// A deterministic generator backed by two sfc32 streams.
///
/// Successive [`next_fraction`](RandomSource::next_fraction) calls alternate
/// between stream A (seeded from the first half of the hash) and stream B
/// (seeded from the second half), starting with A. Both streams are warmed up
/// by discarding [`WARMUP_ROUNDS`] outputs at construction.
///
/// ```rust
/// use mosaic_random::{DeterministicRandom, RandomSource};
///
/// let hash = "0xa3f1c09e5b7d24681f2e3d4c5b6a7980deadbeefcafef00d0badc0de13572468";
/// let mut a = DeterministicRandom::from_hash(hash).unwrap();
/// let mut b = DeterministicRandom::from_hash(hash).unwrap();
/// assert_eq!(a.next_int(10, 12), b.next_int(10, 12));
/// ```
#[derive(Clone, Debug)]
pub struct DeterministicRandom {
    seed: Seed,
    stream_a: Sfc32,
    stream_b: Sfc32,
    use_a: bool,
}

impl DeterministicRandom {
    /// Build a generator from a validated seed.
    pub fn new(seed: Seed) -> Self {
        let mut stream_a = Sfc32::new(seed.stream_a());
        let mut stream_b = Sfc32::new(seed.stream_b());
        stream_a.discard(WARMUP_ROUNDS);
        stream_b.discard(WARMUP_ROUNDS);
        Self {
            seed,
            stream_a,
            stream_b,
            use_a: false,
        }
    }

    /// Parse `hash` and build a generator from it.
    pub fn from_hash(hash: &str) -> Result<Self, SeedError> {
        Seed::parse(hash).map(Self::new)
    }

    /// The seed this generator was built from.
    pub fn seed(&self) -> &Seed {
        &self.seed
    }
}

impl RandomSource for DeterministicRandom {
    fn next_fraction(&mut self) -> f64 {
        self.use_a = !self.use_a;
        if self.use_a {
            self.stream_a.next_fraction()
        } else {
            self.stream_b.next_fraction()
        }
    }
}
