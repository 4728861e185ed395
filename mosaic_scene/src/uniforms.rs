// Copyright 2025 the Mosaic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shader uniforms and their per-frame update rules.

use bytemuck::{Pod, Zeroable};
use kurbo::{Point, Size};

use crate::atlas::TextAtlas;

/// Pointer influence radius, in CSS pixels.
pub const FORCE_RADIUS: f64 = 800.0;
/// Pointer push strength, in CSS pixels.
pub const POINTER_FORCE: f64 = 400.0;
/// Fraction of the remaining distance to 1 the force factor covers per frame.
pub const POINTER_EASE: f32 = 0.1;

/// The uniform block shared by every vertex and fragment.
///
/// `#[repr(C)]` and [`Pod`] so it uploads as raw bytes; the texture itself is
/// bound by the host from the [`TextAtlas`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct Uniforms {
    /// Drawing buffer size in device pixels.
    pub resolution: [f32; 2],
    /// Atlas size in texels.
    pub texture_resolution: [f32; 2],
    /// Pointer position in device pixels.
    pub pointer_pos: [f32; 2],
    /// Seconds since the scene started.
    pub time: f32,
    /// Atlas cells per row.
    pub texture_block_size: f32,
    /// Pointer influence radius in device pixels.
    pub force_radius: f32,
    /// Pointer push strength in device pixels.
    pub pointer_force: f32,
    /// Eases from 0 toward 1 once a pointer has been seen.
    pub pointer_force_factor: f32,
    padding: f32,
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "Uniforms are uploaded as f32."
)]
impl Uniforms {
    /// Initial values for `atlas`, before the first resize.
    pub fn new(atlas: &TextAtlas) -> Self {
        let texture = atlas.resolution();
        Self {
            resolution: [0.0, 0.0],
            texture_resolution: [texture.width as f32, texture.height as f32],
            pointer_pos: [0.0, 0.0],
            time: 1.0,
            texture_block_size: atlas.block_size() as f32,
            force_radius: 1.0,
            pointer_force: 1.0,
            pointer_force_factor: 0.0,
            padding: 0.0,
        }
    }

    /// Drawing buffer size for a viewport at `pixel_ratio`.
    pub fn set_resolution(&mut self, viewport: Size, pixel_ratio: f64) {
        self.resolution = [
            (viewport.width * pixel_ratio) as f32,
            (viewport.height * pixel_ratio) as f32,
        ];
    }

    /// Per-frame update: time, pointer, and force scaling.
    pub fn advance(&mut self, time: f64, pointer: Option<Point>, pixel_ratio: f64) {
        if let Some(p) = pointer {
            self.pointer_pos = [(p.x * pixel_ratio) as f32, (p.y * pixel_ratio) as f32];
            self.pointer_force_factor += (1.0 - self.pointer_force_factor) * POINTER_EASE;
        }
        self.time = time as f32;
        self.force_radius = (FORCE_RADIUS * pixel_ratio) as f32;
        self.pointer_force = (POINTER_FORCE * pixel_ratio) as f32;
    }

    /// Raw bytes for upload.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}
