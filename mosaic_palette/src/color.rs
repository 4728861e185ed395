// Copyright 2025 the Mosaic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Normalized RGB colors and hex conversion.

use std::fmt::Write as _;

/// An RGB color with channels normalized to `[0, 1]`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rgb {
    /// Red channel.
    pub r: f32,
    /// Green channel.
    pub g: f32,
    /// Blue channel.
    pub b: f32,
}

impl Rgb {
    /// Pure black, also the fallback for unparseable hex strings.
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0);
    /// Pure white.
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0);

    /// Create a color from normalized channels.
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rgb` or `#rrggbb` (case-insensitive).
    ///
    /// Channels are normalized to `[0, 1]` and rounded to three decimals.
    /// Anything else resolves to [`Rgb::BLACK`].
    pub fn from_hex(hex: &str) -> Self {
        parse_hex(hex).unwrap_or(Self::BLACK)
    }

    /// Format as `#rrggbb`, or `None` if any channel lies outside `[0, 1]`.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "Channels are checked to lie in [0, 1], so the scaled value fits in u8."
    )]
    pub fn to_hex(self) -> Option<String> {
        let channels = self.to_array();
        if channels.iter().any(|c| !(0.0..=1.0).contains(c)) {
            return None;
        }
        let mut out = String::with_capacity(7);
        out.push('#');
        for c in channels {
            let _ = write!(out, "{:02x}", (c * 255.0).round() as u8);
        }
        Some(out)
    }

    /// Perceived luminance, `0.299 R + 0.587 G + 0.114 B`, on a `0..1` scale.
    pub fn luminance(self) -> f32 {
        0.299 * self.r + 0.587 * self.g + 0.114 * self.b
    }

    /// Channels as `[r, g, b]`, the layout vertex attributes expect.
    pub const fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }
}

fn parse_hex(hex: &str) -> Option<Rgb> {
    let digits = hex.strip_prefix('#')?;
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let [r, g, b] = match digits.len() {
        6 => [
            u8::from_str_radix(&digits[0..2], 16).ok()?,
            u8::from_str_radix(&digits[2..4], 16).ok()?,
            u8::from_str_radix(&digits[4..6], 16).ok()?,
        ],
        3 => {
            let mut out = [0_u8; 3];
            for (slot, i) in out.iter_mut().zip(0..3) {
                let v = u8::from_str_radix(&digits[i..=i], 16).ok()?;
                *slot = v * 17;
            }
            out
        }
        _ => return None,
    };
    Some(Rgb::new(normalize(r), normalize(g), normalize(b)))
}

fn normalize(channel: u8) -> f32 {
    (f32::from(channel) / 255.0 * 1000.0).round() / 1000.0
}
