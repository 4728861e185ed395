// Copyright 2025 the Mosaic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The named palette table and background/foreground selection.

use mosaic_random::RandomSource;

use crate::color::Rgb;

/// Luminance below which a background gets the light foreground.
pub const LIGHT_FOREGROUND_THRESHOLD: f32 = 80.0 / 255.0;

/// One named palette entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PaletteEntry {
    /// Display color, `#rrggbb`.
    pub hex: &'static str,
    /// Human-readable name, reported in artwork metadata.
    pub name: &'static str,
}

/// The built-in palette.
pub static DEFAULT_ENTRIES: [PaletteEntry; 6] = [
    PaletteEntry {
        hex: "#020402",
        name: "Black",
    },
    PaletteEntry {
        hex: "#c52233",
        name: "Cardinal",
    },
    PaletteEntry {
        hex: "#5b2a86",
        name: "KSU Purple",
    },
    PaletteEntry {
        hex: "#eeba0b",
        name: "Orange Yellow",
    },
    PaletteEntry {
        hex: "#1098f7",
        name: "Dodger Blue",
    },
    PaletteEntry {
        hex: "#00ffc5",
        name: "Sea Green Crayola",
    },
];

/// A palette entry together with its normalized color.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Swatch {
    /// The table entry.
    pub entry: PaletteEntry,
    /// `entry.hex` normalized to `[0, 1]` channels.
    pub color: Rgb,
}

impl Swatch {
    /// The foreground color that contrasts with this swatch.
    pub fn foreground(&self) -> Rgb {
        foreground_for(self.color)
    }
}

/// A fixed, non-empty palette table with wrapping lookup.
#[derive(Clone, Copy, Debug)]
pub struct Palette {
    entries: &'static [PaletteEntry],
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            entries: &DEFAULT_ENTRIES,
        }
    }
}

impl Palette {
    /// Wrap a custom table. Returns `None` for an empty table.
    pub fn new(entries: &'static [PaletteEntry]) -> Option<Self> {
        (!entries.is_empty()).then_some(Self { entries })
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always `false`; empty palettes cannot be constructed.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up `index` modulo the palette length.
    pub fn select(&self, index: usize) -> Swatch {
        let entry = self.entries[index % self.entries.len()];
        Swatch {
            entry,
            color: Rgb::from_hex(entry.hex),
        }
    }

    /// Draw an index in `[0, len]` (inclusive) and select it.
    ///
    /// The inclusive upper end wraps onto the first entry, which therefore
    /// comes up twice as often as the others. Existing seeds depend on this.
    pub fn draw(&self, random: &mut impl RandomSource) -> Swatch {
        let len = i64::try_from(self.entries.len()).unwrap_or(i64::MAX);
        let index = usize::try_from(random.next_int(0, len)).unwrap_or(0);
        self.select(index)
    }
}

/// White for dark backgrounds (luminance below
/// [`LIGHT_FOREGROUND_THRESHOLD`]), black otherwise.
pub fn foreground_for(background: Rgb) -> Rgb {
    if background.luminance() < LIGHT_FOREGROUND_THRESHOLD {
        Rgb::WHITE
    } else {
        Rgb::BLACK
    }
}
