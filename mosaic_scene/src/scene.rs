// Copyright 2025 the Mosaic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The scene aggregate: one seeded generator, one tree, one set of buffers.

use kurbo::{Point, Rect, Size};
use mosaic_buffers::{BufferDamage, Channels, RenderBuffers};
use mosaic_palette::{Rgb, foreground_for};
use mosaic_random::{DeterministicRandom, Seed};
use mosaic_tile_tree::{TickReport, TileTree};

use crate::atlas::TextAtlas;
use crate::attributes::{Attributes, Metadata};
use crate::config::{SceneConfig, SceneError, check_viewport, effective_pixel_ratio};
use crate::uniforms::Uniforms;

/// Whole seconds between periodic retargets of a dynamic mosaic.
pub const RETARGET_PERIOD_SECS: u64 = 10;
/// Ratio every split is sent toward on a periodic retarget.
pub const RETARGET_RATIO: f64 = 0.5;

/// Everything a renderer needs to draw one frame.
#[derive(Clone, Copy, Debug)]
pub struct Frame<'a> {
    /// Vertex and index arrays.
    pub buffers: &'a RenderBuffers,
    /// Uniform block.
    pub uniforms: &'a Uniforms,
    /// Glyph atlas to rasterize and bind.
    pub atlas: &'a TextAtlas,
    /// Clear color behind the mesh.
    pub clear_color: Rgb,
    /// Orthographic view bounds in scene units, centered on the origin.
    pub view: Rect,
}

/// A running mosaic.
///
/// Owns the seeded generator, the tile tree and its buffers, and the uniform
/// block. The host drives it through [`Scene::tick`] and [`Scene::resize`]
/// and reads it through [`Scene::frame`]; nothing here schedules or blocks.
pub struct Scene {
    random: DeterministicRandom,
    attributes: Attributes,
    atlas: TextAtlas,
    uniforms: Uniforms,
    buffers: RenderBuffers,
    tree: TileTree,
    viewport: Size,
    pixel_ratio: f64,
    pointer: Option<Point>,
    last_retarget: u64,
    frames: u64,
}

impl core::fmt::Debug for Scene {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Scene")
            .field("hash", &self.hash())
            .field("attributes", &self.attributes)
            .field("viewport", &self.viewport)
            .field("pixel_ratio", &self.pixel_ratio)
            .field("tree", &self.tree)
            .field("frames", &self.frames)
            .finish_non_exhaustive()
    }
}

impl Scene {
    /// Seed the generator, draw the attributes, and build tree and buffers.
    ///
    /// The tree draws its ratios from the same generator after the
    /// attributes, so a hash fixes the initial geometry as well.
    pub fn init(config: &SceneConfig) -> Result<Self, SceneError> {
        check_viewport(config.viewport)?;
        let pixel_ratio = effective_pixel_ratio(config.device_pixel_ratio)?;
        let seed = match &config.hash {
            Some(hash) => Seed::parse(hash)?,
            None => Seed::generate(),
        };
        let mut random = DeterministicRandom::new(seed);
        let attributes = Attributes::draw(&mut random)?;
        let metadata = attributes.metadata();
        tracing::info!(
            hash = random.seed().hash(),
            text = metadata.text,
            background = metadata.background_color,
            tile_ratio_offset = metadata.tile_ratio_offset,
            dynamic = metadata.dynamic,
            division = metadata.division,
            divider = metadata.divider,
            "mosaic attributes drawn"
        );

        let atlas = TextAtlas::new(attributes.text, &attributes.background);
        let mut uniforms = Uniforms::new(&atlas);
        uniforms.set_resolution(config.viewport, pixel_ratio);
        let (tree, buffers) = TileTree::build_with_buffers(
            root_rect(config.viewport),
            &attributes.tree_config(),
            &mut random,
        )?;

        Ok(Self {
            random,
            attributes,
            atlas,
            uniforms,
            buffers,
            tree,
            viewport: config.viewport,
            pixel_ratio,
            pointer: None,
            last_retarget: 0,
            frames: 0,
        })
    }

    /// Advance one frame at `elapsed_secs` since start.
    ///
    /// Uniforms always advance. A dynamic mosaic also runs one tree update,
    /// then retargets every split to [`RETARGET_RATIO`] during second 0 and
    /// on each new multiple of [`RETARGET_PERIOD_SECS`]. Returns the tree
    /// report when the tree ran.
    pub fn tick(&mut self, elapsed_secs: f64) -> Option<TickReport> {
        let time = elapsed_secs.max(0.0);
        self.uniforms.advance(time, self.pointer, self.pixel_ratio);
        self.frames += 1;
        if !self.attributes.dynamic {
            return None;
        }

        let report = self.tree.update(&mut self.random, &mut self.buffers);
        #[allow(
            clippy::cast_possible_truncation,
            reason = "Elapsed seconds are non-negative and far below u64::MAX."
        )]
        let sec = time.floor() as u64;
        if sec == 0 || (sec != self.last_retarget && sec % RETARGET_PERIOD_SECS == 0) {
            self.tree.retarget(Some(RETARGET_RATIO), &mut self.random);
            self.last_retarget = sec;
        }
        Some(report)
    }

    /// Follow a viewport change.
    ///
    /// Caps the pixel ratio, updates the resolution, and resizes the tree to
    /// a root centered on the origin. Slots and ratios are kept.
    pub fn resize(
        &mut self,
        viewport: Size,
        device_pixel_ratio: f64,
    ) -> Result<Channels, SceneError> {
        check_viewport(viewport)?;
        let pixel_ratio = effective_pixel_ratio(device_pixel_ratio)?;
        let changed = self.tree.resize(root_rect(viewport), &mut self.buffers)?;
        self.viewport = viewport;
        self.pixel_ratio = pixel_ratio;
        self.uniforms.set_resolution(viewport, pixel_ratio);
        tracing::debug!(
            width = viewport.width,
            height = viewport.height,
            pixel_ratio,
            "scene resized"
        );
        Ok(changed)
    }

    /// Record the pointer position in CSS pixels. From now on the pointer
    /// force factor eases toward 1.
    pub fn set_pointer(&mut self, position: Point) {
        self.pointer = Some(position);
    }

    /// Read-only view for rendering.
    pub fn frame(&self) -> Frame<'_> {
        Frame {
            buffers: &self.buffers,
            uniforms: &self.uniforms,
            atlas: &self.atlas,
            clear_color: foreground_for(self.attributes.background.color),
            view: self.view_bounds(),
        }
    }

    /// Buffer changes since the last call, for partial uploads.
    pub fn take_damage(&mut self) -> BufferDamage {
        self.buffers.take_damage()
    }

    /// The seed hash.
    pub fn hash(&self) -> &str {
        self.random.seed().hash()
    }

    /// Attributes drawn from the seed.
    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// Published metadata.
    pub fn metadata(&self) -> Metadata {
        self.attributes.metadata()
    }

    /// The tile tree.
    pub fn tree(&self) -> &TileTree {
        &self.tree
    }

    /// The render buffers.
    pub fn buffers(&self) -> &RenderBuffers {
        &self.buffers
    }

    /// The uniform block.
    pub fn uniforms(&self) -> &Uniforms {
        &self.uniforms
    }

    /// Current viewport in CSS pixels.
    pub fn viewport(&self) -> Size {
        self.viewport
    }

    /// Pixel ratio in use, after capping.
    pub fn pixel_ratio(&self) -> f64 {
        self.pixel_ratio
    }

    /// Orthographic bounds: `±width/2`, `±height/2`.
    pub fn view_bounds(&self) -> Rect {
        root_rect(self.viewport)
    }

    /// Frames ticked so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

fn root_rect(viewport: Size) -> Rect {
    Rect::from_origin_size((-viewport.width / 2.0, -viewport.height / 2.0), viewport)
}
