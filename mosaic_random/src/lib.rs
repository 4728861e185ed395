// Copyright 2025 the Mosaic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mosaic Random: hash-seeded, reproducible randomness for generative art.
//!
//! A token hash (`0x` followed by 64 hex digits) is the only determinism input
//! of a mosaic. This crate turns it into a stream of fractions:
//!
//! - [`Seed`] validates the hash and splits it into two 128-bit stream seeds.
//!   Malformed hashes fail with a [`SeedError`] instead of producing a
//!   degenerate generator.
//! - [`DeterministicRandom`] runs two warmed-up sfc32 streams and alternates
//!   between them, so callers see a single deterministic sequence.
//! - [`RandomSource`] carries the derived helpers (`next_in_range`,
//!   `next_int`, `next_bool`, `choice`) for any fraction source.
//!
//! ## Features
//!
//! - `replay`: exports `Replay`, a [`RandomSource`] over a fixed list of
//!   fractions. It is a testing aid; enable it from `[dev-dependencies]`.
//!
//! When no hash is supplied, [`Seed::generate`] makes one locally. That path is
//! not reproducible across runs.
//!
//! ## Example
//!
//! ```rust
//! use mosaic_random::{DeterministicRandom, RandomSource};
//!
//! let hash = "0xa3f1c09e5b7d24681f2e3d4c5b6a7980deadbeefcafef00d0badc0de13572468";
//! let mut random = DeterministicRandom::from_hash(hash).unwrap();
//! let division = random.next_int(10, 12);
//! assert!((10..=12).contains(&division));
//!
//! assert!(DeterministicRandom::from_hash("0x1234").is_err());
//! ```

mod deterministic;
mod seed;
mod sfc32;
mod source;

pub use deterministic::{DeterministicRandom, WARMUP_ROUNDS};
pub use seed::{SEED_DIGITS, Seed, SeedError, generate_hash};
pub use source::RandomSource;
#[cfg(any(test, feature = "replay"))]
pub use source::Replay;
