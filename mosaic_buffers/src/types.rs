// Copyright 2025 the Mosaic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the mesh buffers: slots, channels, and vertex layouts.

use bytemuck::{Pod, Zeroable};
use kurbo::{Rect, Vec2};

/// Vertices per leaf quad.
pub const VERTICES_PER_LEAF: usize = 4;
/// Indices per leaf quad (two triangles).
pub const INDICES_PER_LEAF: usize = 6;

/// Corner order shared by the `uv` and `offset` attributes.
pub(crate) const CORNERS: [[f32; 2]; VERTICES_PER_LEAF] =
    [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];

/// Triangle winding within one quad, relative to its first vertex.
pub(crate) const QUAD_INDICES: [u32; INDICES_PER_LEAF] = [0, 1, 2, 2, 3, 0];

/// Stable handle of a leaf's quad within the buffers.
///
/// Slots are dense and assigned in registration order, starting at 0.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LeafSlot(pub(crate) u32);

impl LeafSlot {
    /// The raw slot number.
    pub const fn get(self) -> u32 {
        self.0
    }

    /// The slot number as an array index.
    pub const fn idx(self) -> usize {
        self.0 as usize
    }
}

bitflags::bitflags! {
    /// Per-leaf attribute channels rewritten while animating.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Channels: u8 {
        /// Quad origin.
        const POSITION  = 0b0000_0001;
        /// Quad extent.
        const SIZE      = 0b0000_0010;
        /// Most recent ratio change of the parent split.
        const IMPULSE   = 0b0000_0100;
        /// Aspect classification.
        const DIRECTION = 0b0000_1000;
        /// Normalized position of the quad center within the viewport.
        const WEIGHT    = 0b0001_0000;
    }
}

/// Aspect classification of a leaf, consumed by the shader as a hint.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Width and height are within tolerance of each other.
    #[default]
    NearSquare,
    /// Wider than tall.
    Wide,
    /// Taller than wide.
    Tall,
}

impl Direction {
    /// The value written into the `direction` attribute.
    pub const fn shader_code(self) -> f32 {
        match self {
            Self::NearSquare => -1.0,
            Self::Wide => 1.0,
            Self::Tall => 0.0,
        }
    }
}

/// Attributes fixed when a leaf is registered.
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct StaticVertex {
    /// Slot number of the owning leaf.
    pub leaf_index: f32,
    /// Total number of leaves, filled in when the buffers are sealed.
    pub leaf_total: f32,
    /// Texture coordinate of this corner.
    pub uv: [f32; 2],
    /// Corner offset, scaled by the padded quad size in the vertex stage.
    pub offset: [f32; 2],
    /// Divider padding subtracted from the quad size.
    pub padding: [f32; 2],
    /// Tile background color.
    pub bg_color: [f32; 3],
    /// Tile text color.
    pub text_color: [f32; 3],
}

/// Attributes rewritten every animation tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct DynamicVertex {
    /// Impulse of the last ratio change.
    pub impulse: f32,
    /// [`Direction::shader_code`].
    pub direction: f32,
    /// Normalized quad center within the viewport.
    pub weight: [f32; 2],
}

/// Per-leaf style applied to all four corners at registration.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LeafStyle {
    /// Tile background color.
    pub bg_color: [f32; 3],
    /// Tile text color.
    pub text_color: [f32; 3],
    /// Divider width, applied on both axes.
    pub padding: f32,
}

/// Geometry and shading inputs for one leaf write.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LeafWrite {
    /// Current leaf rectangle in scene units.
    pub rect: Rect,
    /// Impulse handed down from the parent split.
    pub impulse: f64,
    /// Aspect classification.
    pub direction: Direction,
    /// Normalized quad center within the viewport.
    pub weight: Vec2,
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "Scene coordinates are uploaded as f32 vertex attributes."
)]
impl LeafWrite {
    pub(crate) fn position(&self) -> [f32; 3] {
        [self.rect.x0 as f32, self.rect.y0 as f32, 0.0]
    }

    pub(crate) fn size(&self) -> [f32; 2] {
        [self.rect.width() as f32, self.rect.height() as f32]
    }

    pub(crate) fn dynamic(&self) -> DynamicVertex {
        DynamicVertex {
            impulse: self.impulse as f32,
            direction: self.direction.shader_code(),
            weight: [self.weight.x as f32, self.weight.y as f32],
        }
    }
}
