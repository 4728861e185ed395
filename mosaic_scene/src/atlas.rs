// Copyright 2025 the Mosaic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layout of the text atlas the shader samples glyphs from.
//!
//! Rasterization is left to the host; this module only decides which glyph
//! goes in which cell and what colors fill it.

use kurbo::{Point, Size};
use mosaic_palette::{Rgb, Swatch};

/// Cells per atlas row and column.
pub const ATLAS_GRID: usize = 5;
/// Side length of one square cell, in texels.
pub const ATLAS_CELL: f64 = 200.0;
/// Glyph size as a fraction of the cell.
pub const GLYPH_SCALE: f64 = 0.8;
/// Filler for texts shorter than the grid (ideographic space).
pub const PAD_GLYPH: char = '\u{3000}';

/// One glyph placement.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Glyph {
    /// Character to draw, centered in its cell.
    pub ch: char,
    /// Cell center in texels, origin at the top-left.
    pub center: Point,
}

/// An `ATLAS_GRID x ATLAS_GRID` grid of glyphs on a solid background.
#[derive(Clone, Debug, PartialEq)]
pub struct TextAtlas {
    glyphs: Vec<char>,
    background: Rgb,
    foreground: Rgb,
}

impl TextAtlas {
    /// Lay out the first `ATLAS_GRID²` characters of `text`, padding with
    /// [`PAD_GLYPH`]. The background is the swatch color; glyphs use its
    /// contrasting foreground.
    pub fn new(text: &str, background: &Swatch) -> Self {
        let cells = ATLAS_GRID * ATLAS_GRID;
        let mut glyphs: Vec<char> = text.chars().take(cells).collect();
        glyphs.resize(cells, PAD_GLYPH);
        Self {
            glyphs,
            background: background.color,
            foreground: background.foreground(),
        }
    }

    /// Glyphs in row-major order with their cell centers.
    pub fn glyphs(&self) -> impl Iterator<Item = Glyph> + '_ {
        self.glyphs.iter().enumerate().map(|(i, &ch)| Glyph {
            ch,
            center: cell_center(i),
        })
    }

    /// The characters alone, row-major.
    pub fn chars(&self) -> &[char] {
        &self.glyphs
    }

    /// Texture size in texels.
    pub fn resolution(&self) -> Size {
        let side = ATLAS_GRID as f64 * ATLAS_CELL;
        Size::new(side, side)
    }

    /// Cells per row, as the shader's block size.
    pub fn block_size(&self) -> usize {
        ATLAS_GRID
    }

    /// Font size for glyphs.
    pub fn font_size(&self) -> f64 {
        ATLAS_CELL * GLYPH_SCALE
    }

    /// Fill color behind glyphs.
    pub fn background(&self) -> Rgb {
        self.background
    }

    /// Glyph color.
    pub fn foreground(&self) -> Rgb {
        self.foreground
    }
}

fn cell_center(i: usize) -> Point {
    let col = (i % ATLAS_GRID) as f64;
    let row = (i / ATLAS_GRID) as f64;
    Point::new(
        col * ATLAS_CELL + ATLAS_CELL / 2.0,
        row * ATLAS_CELL + ATLAS_CELL / 2.0,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use mosaic_palette::Palette;

    #[test]
    fn short_text_is_padded() {
        let atlas = TextAtlas::new("熊 🧸", &Palette::default().select(0));
        assert_eq!(atlas.chars().len(), 25);
        assert_eq!(&atlas.chars()[..3], &['熊', ' ', '🧸']);
        assert!(atlas.chars()[3..].iter().all(|&c| c == PAD_GLYPH));
    }

    #[test]
    fn cells_count_chars_not_bytes() {
        let text = "コード💻で切り拓く、アート🖼の新たな地平🌅。";
        let atlas = TextAtlas::new(text, &Palette::default().select(1));
        assert_eq!(atlas.chars().len(), 25);
        assert_eq!(atlas.chars()[3], '💻');
        assert_eq!(atlas.chars()[21], '。');
        assert_eq!(atlas.chars()[22], PAD_GLYPH);
    }

    #[test]
    fn long_text_is_truncated() {
        let atlas = TextAtlas::new(
            "abcdefghijklmnopqrstuvwxyz0123",
            &Palette::default().select(1),
        );
        assert_eq!(atlas.chars().len(), 25);
        assert_eq!(atlas.chars()[24], 'y');
    }

    #[test]
    fn cells_are_row_major() {
        let atlas = TextAtlas::new("abcdefg", &Palette::default().select(0));
        let glyphs: Vec<Glyph> = atlas.glyphs().collect();
        assert_eq!(glyphs[0].center, Point::new(100.0, 100.0));
        assert_eq!(glyphs[6].ch, 'g');
        assert_eq!(glyphs[6].center, Point::new(300.0, 300.0));
        assert_eq!(glyphs[24].center, Point::new(900.0, 900.0));
        assert_eq!(atlas.resolution(), Size::new(1000.0, 1000.0));
        assert_eq!(atlas.font_size(), 160.0);
    }

    #[test]
    fn colors_contrast() {
        let dark = TextAtlas::new("a", &Palette::default().select(0));
        assert_eq!(dark.foreground(), Rgb::WHITE);
        let light = TextAtlas::new("a", &Palette::default().select(3));
        assert_eq!(light.foreground(), Rgb::BLACK);
        assert_eq!(light.background(), Rgb::from_hex("#eeba0b"));
    }
}
