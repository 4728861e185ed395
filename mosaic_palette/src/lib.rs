// Copyright 2025 the Mosaic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mosaic Palette: the background palette and contrast rule for mosaics.
//!
//! - [`Palette`] is a fixed, non-empty table of named [`PaletteEntry`] values
//!   with wrapping lookup. [`Palette::select`] returns a [`Swatch`]: the entry
//!   plus its normalized [`Rgb`] color.
//! - [`Rgb::from_hex`] normalizes `#rgb`/`#rrggbb` strings and falls back to
//!   black on anything else; it never fails.
//! - [`foreground_for`] picks white or black so text and tiles stay legible
//!   against a background, based on perceived luminance.
//!
//! ```rust
//! use mosaic_palette::{Palette, Rgb, foreground_for};
//!
//! let swatch = Palette::default().select(0);
//! assert_eq!(swatch.entry.name, "Black");
//! assert_eq!(foreground_for(swatch.color), Rgb::WHITE);
//! ```

mod color;
mod palette;

pub use color::Rgb;
pub use palette::{
    DEFAULT_ENTRIES, LIGHT_FOREGROUND_THRESHOLD, Palette, PaletteEntry, Swatch, foreground_for,
};
