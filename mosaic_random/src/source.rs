// Copyright 2025 the Mosaic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The [`RandomSource`] trait and, behind the `replay` feature, a replaying
//! implementation for tests.

/// A source of uniformly distributed fractions, plus the derived helpers used
/// to draw artwork attributes and tile geometry.
///
/// Only [`next_fraction`](RandomSource::next_fraction) is required. The other
/// methods are defined in terms of it, so two sources that agree on fractions
/// agree on everything.
pub trait RandomSource {
    /// A fraction in `[0, 1)`.
    fn next_fraction(&mut self) -> f64;

    /// A float in `[a, b)`.
    fn next_in_range(&mut self, a: f64, b: f64) -> f64 {
        a + (b - a) * self.next_fraction()
    }

    /// An integer in `[a, b]`, computed as `floor(next_in_range(a, b + 1))`.
    ///
    /// Requires `a <= b` for a uniform distribution.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "The floored value lies in [a, b + 1); `as` saturates at the i64 bounds."
    )]
    fn next_int(&mut self, a: i64, b: i64) -> i64 {
        self.next_in_range(a as f64, b as f64 + 1.0).floor() as i64
    }

    /// `true` with probability `p`.
    fn next_bool(&mut self, p: f64) -> bool {
        self.next_fraction() < p
    }

    /// A uniformly chosen element, or `None` for an empty slice.
    fn choice<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T>
    where
        Self: Sized,
    {
        if items.is_empty() {
            return None;
        }
        let last = i64::try_from(items.len() - 1).ok()?;
        let i = usize::try_from(self.next_int(0, last)).ok()?;
        items.get(i)
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_fraction(&mut self) -> f64 {
        (**self).next_fraction()
    }
}

/// A [`RandomSource`] that cycles through a fixed list of fractions.
///
/// A testing aid for code that needs exact control over every draw. Only
/// compiled with the `replay` feature, which dependents enable from their
/// `[dev-dependencies]`.
/// Values are clamped into `[0, 1)` on construction; an empty list yields `0.0`.
#[cfg(any(test, feature = "replay"))]
#[derive(Clone, Debug)]
pub struct Replay {
    values: Vec<f64>,
    cursor: usize,
}

#[cfg(any(test, feature = "replay"))]
impl Replay {
    /// Replay `values` in order, wrapping around at the end.
    pub fn new(values: impl IntoIterator<Item = f64>) -> Self {
        Self {
            values: values
                .into_iter()
                .map(|v| v.clamp(0.0, 1.0 - f64::EPSILON))
                .collect(),
            cursor: 0,
        }
    }

    /// Number of fractions drawn so far.
    pub fn draws(&self) -> usize {
        self.cursor
    }
}

#[cfg(any(test, feature = "replay"))]
impl RandomSource for Replay {
    fn next_fraction(&mut self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let v = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        v
    }
}
