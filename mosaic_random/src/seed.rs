// Copyright 2025 the Mosaic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Seed hashes: parsing, validation, and local generation.

use std::fmt::Write as _;

/// Number of hexadecimal digits consumed from a hash (two 128-bit halves).
pub const SEED_DIGITS: usize = 64;

/// Errors produced while parsing a seed hash.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SeedError {
    /// The hash does not start with `0x`.
    #[error("seed hash must start with `0x`")]
    MissingPrefix,
    /// Fewer than [`SEED_DIGITS`] hexadecimal digits follow the prefix.
    #[error("seed hash has {digits} hex digits, need at least {SEED_DIGITS}")]
    TooShort {
        /// Digits found after the prefix.
        digits: usize,
    },
    /// A character after the prefix is not a hexadecimal digit.
    #[error("seed hash has non-hex character {found:?} at position {position}")]
    InvalidDigit {
        /// Byte offset of the offending character in the full hash string.
        position: usize,
        /// The offending character.
        found: char,
    },
}

/// A validated seed hash, split into the two stream seeds.
///
/// Digits `0..32` after the prefix seed stream A and digits `32..64` seed
/// stream B. Each half is read as four big-endian `u32` words.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Seed {
    hash: String,
    a: [u32; 4],
    b: [u32; 4],
}

impl Seed {
    /// Parse and validate a `0x`-prefixed hexadecimal hash.
    ///
    /// Every character after the prefix must be a hex digit, and there must be
    /// at least [`SEED_DIGITS`] of them. Extra digits are validated but unused.
    pub fn parse(hash: &str) -> Result<Self, SeedError> {
        let digits = hash.strip_prefix("0x").ok_or(SeedError::MissingPrefix)?;
        if let Some((offset, found)) = digits.char_indices().find(|(_, c)| !c.is_ascii_hexdigit())
        {
            return Err(SeedError::InvalidDigit {
                position: offset + 2,
                found,
            });
        }
        if digits.len() < SEED_DIGITS {
            return Err(SeedError::TooShort {
                digits: digits.len(),
            });
        }
        Ok(Self {
            hash: String::from(hash),
            a: words(&digits[0..32]),
            b: words(&digits[32..64]),
        })
    }

    /// Generate a fresh hash from the process-local entropy source and parse it.
    ///
    /// The result is not reproducible across runs.
    pub fn generate() -> Self {
        let hash = generate_hash();
        Self {
            a: words(&hash[2..34]),
            b: words(&hash[34..66]),
            hash,
        }
    }

    /// The hash string as given, prefix included.
    pub fn hash(&self) -> &str {
        &self.hash
    }

    pub(crate) fn stream_a(&self) -> [u32; 4] {
        self.a
    }

    pub(crate) fn stream_b(&self) -> [u32; 4] {
        self.b
    }
}

/// Produce a random `0x`-prefixed hash of [`SEED_DIGITS`] lowercase hex digits.
pub fn generate_hash() -> String {
    let mut rng = fastrand::Rng::new();
    let mut out = String::with_capacity(SEED_DIGITS + 2);
    out.push_str("0x");
    for _ in 0..SEED_DIGITS / 8 {
        // Writing into a String cannot fail.
        let _ = write!(out, "{:08x}", rng.u32(..));
    }
    out
}

/// Split 32 validated hex digits into four big-endian words.
fn words(half: &str) -> [u32; 4] {
    let mut out = [0_u32; 4];
    for (i, word) in out.iter_mut().enumerate() {
        let chunk = &half[i * 8..i * 8 + 8];
        *word = chunk
            .bytes()
            .fold(0_u32, |acc, b| (acc << 4) | u32::from(hex_value(b)));
    }
    out
}

fn hex_value(b: u8) -> u8 {
    match b {
        b'0'..=b'9' => b - b'0',
        b'a'..=b'f' => b - b'a' + 10,
        b'A'..=b'F' => b - b'A' + 10,
        _ => unreachable!("digits are validated before conversion"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HASH: &str = "0xa3f1c09e5b7d24681f2e3d4c5b6a7980deadbeefcafef00d0badc0de13572468";

    #[test]
    fn splits_halves_into_words() {
        let seed = Seed::parse(HASH).unwrap();
        assert_eq!(
            seed.stream_a(),
            [0xa3f1_c09e, 0x5b7d_2468, 0x1f2e_3d4c, 0x5b6a_7980]
        );
        assert_eq!(
            seed.stream_b(),
            [0xdead_beef, 0xcafe_f00d, 0x0bad_c0de, 0x1357_2468]
        );
        assert_eq!(seed.hash(), HASH);
    }

    #[test]
    fn uppercase_digits_are_accepted() {
        let upper = format!("0x{}", HASH[2..].to_ascii_uppercase());
        let a = Seed::parse(HASH).unwrap();
        let b = Seed::parse(&upper).unwrap();
        assert_eq!(a.stream_a(), b.stream_a());
        assert_eq!(a.stream_b(), b.stream_b());
    }

    #[test]
    fn rejects_missing_prefix() {
        assert_eq!(Seed::parse(&HASH[2..]), Err(SeedError::MissingPrefix));
    }

    #[test]
    fn rejects_short_hash() {
        assert_eq!(
            Seed::parse("0xabcdef"),
            Err(SeedError::TooShort { digits: 6 })
        );
    }

    #[test]
    fn rejects_non_hex_even_past_the_used_digits() {
        let mut bad = String::from(HASH);
        bad.push('z');
        assert_eq!(
            Seed::parse(&bad),
            Err(SeedError::InvalidDigit {
                position: 66,
                found: 'z'
            })
        );
        let bad = HASH.replacen('9', "g", 1);
        assert!(matches!(
            Seed::parse(&bad),
            Err(SeedError::InvalidDigit { found: 'g', .. })
        ));
    }

    #[test]
    fn generated_hash_round_trips() {
        let hash = generate_hash();
        assert_eq!(hash.len(), SEED_DIGITS + 2, "prefix plus 64 digits");
        assert!(Seed::parse(&hash).is_ok());
        let seed = Seed::generate();
        assert_eq!(Seed::parse(seed.hash()).unwrap(), seed);
    }
}
