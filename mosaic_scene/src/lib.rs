// Copyright 2025 the Mosaic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mosaic Scene: a seeded, animated tile mosaic ready for a renderer.
//!
//! A [`Scene`] ties the other Mosaic crates together:
//!
//! - a [`mosaic_random::DeterministicRandom`] seeded from a token hash,
//! - the [`Attributes`] it draws (text, background, ratio jitter, dynamic
//!   flag, division, divider) and their serializable [`Metadata`],
//! - a [`mosaic_tile_tree::TileTree`] built from those attributes, with its
//!   [`mosaic_buffers::RenderBuffers`],
//! - the [`Uniforms`] block and the [`TextAtlas`] layout the shader samples.
//!
//! The host owns the frame loop. It calls [`Scene::tick`] once per frame and
//! [`Scene::resize`] on viewport changes, then draws from [`Scene::frame`].
//! [`FrameDriver`] is the callback-shaped version of that contract, and
//! [`SceneDriver`] implements it over an owned scene.
//!
//! Shader text, GPU setup and glyph rasterization stay with the host.
//!
//! ## Example
//!
//! ```rust
//! use kurbo::Size;
//! use mosaic_scene::{FrameDriver, SceneConfig, SceneDriver};
//!
//! let config = SceneConfig::new()
//!     .with_hash("0xa3f1c09e5b7d24681f2e3d4c5b6a7980deadbeefcafef00d0badc0de13572468")
//!     .with_viewport(Size::new(640.0, 480.0));
//! let mut driver = SceneDriver::new(config);
//! driver.on_init().unwrap();
//! driver.on_update(0.016);
//!
//! let scene = driver.scene().unwrap();
//! assert_eq!(scene.metadata().division, 11);
//! assert_eq!(scene.frame().buffers.vertex_count(), 4 << 11);
//! ```

mod atlas;
mod attributes;
mod config;
mod driver;
mod scene;
mod uniforms;

pub use atlas::{ATLAS_CELL, ATLAS_GRID, GLYPH_SCALE, Glyph, PAD_GLYPH, TextAtlas};
pub use attributes::{Attributes, DIVIDER_WIDTH, Metadata, TEXTS};
pub use config::{MAX_PIXEL_RATIO, SceneConfig, SceneError};
pub use driver::{FrameDriver, SceneDriver};
pub use scene::{Frame, RETARGET_PERIOD_SECS, RETARGET_RATIO, Scene};
pub use uniforms::{FORCE_RADIUS, POINTER_EASE, POINTER_FORCE, Uniforms};
