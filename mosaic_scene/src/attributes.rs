// Copyright 2025 the Mosaic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Artwork attributes drawn from the seed, and the metadata reported for them.

use mosaic_buffers::LeafStyle;
use mosaic_palette::{Palette, Rgb, Swatch};
use mosaic_random::RandomSource;
use mosaic_tile_tree::TreeConfig;
use serde::Serialize;

use crate::SceneError;

/// Texts a mosaic can spell out, one glyph per atlas cell.
pub const TEXTS: [&str; 4] = [
    "コード💻で切り拓く、アート🖼の新たな地平🌅。",
    "Gen Art 🖥 is the future🚀.",
    "@!+-?*/,[=}%:~&#_;*[>.$(¥",
    "🐻 KUMA 🌈 熊 🎌 くま 🧸 BEAR 🎨",
];

/// Divider width used when a mosaic has dividers.
pub const DIVIDER_WIDTH: f32 = 0.8;

/// Everything about a mosaic that the seed decides before geometry.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Attributes {
    /// Text rasterized into the atlas.
    pub text: &'static str,
    /// Glyph color written into every leaf.
    pub text_color: Rgb,
    /// Background palette entry.
    pub background: Swatch,
    /// Maximum deviation of an initial split ratio from `0.5`.
    pub tile_ratio_offset: f64,
    /// Whether the tree animates.
    pub dynamic: bool,
    /// Tree depth.
    pub division: u32,
    /// Divider width; `0.0` means no dividers.
    pub divider: f32,
}

impl Attributes {
    /// Draw attributes in their fixed order: text, background, ratio offset,
    /// dynamic flag, division, divider.
    ///
    /// The order is part of the seed format; changing it changes every mosaic.
    pub fn draw<R: RandomSource>(random: &mut R) -> Result<Self, SceneError> {
        let text = random.choice(&TEXTS).copied().unwrap_or(TEXTS[0]);
        let background = Palette::default().draw(random);
        let tile_ratio_offset = random.next_in_range(0.0, 0.2);
        let dynamic = random.next_bool(0.1);
        let division = random.next_int(10, 12);
        let division =
            u32::try_from(division).map_err(|_| SceneError::InvalidDivision(division))?;
        let divider = if random.next_bool(0.1) {
            DIVIDER_WIDTH
        } else {
            0.0
        };
        Ok(Self {
            text,
            text_color: Rgb::WHITE,
            background,
            tile_ratio_offset,
            dynamic,
            division,
            divider,
        })
    }

    /// Style written into every leaf quad.
    pub fn leaf_style(&self) -> LeafStyle {
        LeafStyle {
            bg_color: self.background.color.to_array(),
            text_color: self.text_color.to_array(),
            padding: self.divider,
        }
    }

    /// Tree parameters implied by these attributes.
    pub fn tree_config(&self) -> TreeConfig {
        TreeConfig::new()
            .with_division(self.division)
            .with_tile_ratio_offset(self.tile_ratio_offset)
            .with_style(self.leaf_style())
    }

    /// The public description of these attributes.
    pub fn metadata(&self) -> Metadata {
        Metadata {
            text: self.text,
            background_color: self.background.entry.name,
            tile_ratio_offset: self.tile_ratio_offset,
            dynamic: self.dynamic,
            division: self.division,
            divider: self.divider > 0.0,
        }
    }
}

/// Attribute summary published alongside a mosaic.
///
/// Serializes with `PascalCase` keys (`Text`, `BackgroundColor`, ...).
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Metadata {
    /// The text.
    pub text: &'static str,
    /// Name of the background palette entry.
    pub background_color: &'static str,
    /// Initial ratio jitter.
    pub tile_ratio_offset: f64,
    /// Whether the mosaic animates.
    pub dynamic: bool,
    /// Tree depth.
    pub division: u32,
    /// Whether tiles are separated by dividers.
    pub divider: bool,
}
