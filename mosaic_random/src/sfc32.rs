// Copyright 2025 the Mosaic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The sfc32 ("small fast counting") generator.

/// One sfc32 stream: four 32-bit words of state, wrapping arithmetic.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Sfc32 {
    a: u32,
    b: u32,
    c: u32,
    d: u32,
}

impl Sfc32 {
    pub(crate) const fn new([a, b, c, d]: [u32; 4]) -> Self {
        Self { a, b, c, d }
    }

    /// Advance the state and return the raw 32-bit output.
    pub(crate) fn next_u32(&mut self) -> u32 {
        let t = self.a.wrapping_add(self.b).wrapping_add(self.d);
        self.d = self.d.wrapping_add(1);
        self.a = self.b ^ (self.b >> 9);
        self.b = self.c.wrapping_add(self.c << 3);
        self.c = self.c.rotate_left(21).wrapping_add(t);
        t
    }

    /// Advance the state and return a fraction in `[0, 1)`.
    pub(crate) fn next_fraction(&mut self) -> f64 {
        f64::from(self.next_u32()) / 4_294_967_296.0
    }

    pub(crate) fn discard(&mut self, n: usize) {
        for _ in 0..n {
            self.next_u32();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_state_counts_up_first() {
        let mut g = Sfc32::new([0, 0, 0, 0]);
        let out: Vec<u32> = (0..6).map(|_| g.next_u32()).collect();
        assert_eq!(out, [0, 1, 2, 12, 18_874_399, 56_669_315]);
    }

    #[test]
    fn known_sequence_from_small_words() {
        let mut g = Sfc32::new([1, 2, 3, 4]);
        let out: Vec<u32> = (0..4).map(|_| g.next_u32()).collect();
        assert_eq!(out, [7, 34, 56_623_200, 188_882_296]);
    }

    #[test]
    fn fraction_stays_below_one() {
        let mut g = Sfc32::new([u32::MAX; 4]);
        for _ in 0..10_000 {
            let f = g.next_fraction();
            assert!((0.0..1.0).contains(&f), "fraction {f} out of range");
        }
    }
}
