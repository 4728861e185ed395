// Copyright 2025 the Mosaic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mosaic Buffers: flat quad-mesh buffers kept in lockstep with a tile tree.
//!
//! Every leaf of a mosaic owns one quad: 4 vertices and 6 indices at a fixed
//! [`LeafSlot`]. This crate is the arena those quads live in. It knows nothing
//! about trees or graphics APIs; it stores arrays a renderer can upload
//! directly and records what changed.
//!
//! - [`RenderBuffers::register_leaf`] appends a quad during construction and
//!   returns its slot. Slots are dense and follow registration order.
//! - [`RenderBuffers::seal`] freezes the layout. From then on only
//!   [`RenderBuffers::write_leaf`] mutates data, in place.
//! - [`RenderBuffers::take_damage`] returns a [`BufferDamage`]: the dirty
//!   [`Channels`] and the span of slots to re-upload.
//!
//! ## Layout
//!
//! Four parallel per-vertex arrays, indexed by `slot * 4 + corner`:
//!
//! - positions, `[f32; 3]` (quad origin, `z = 0`);
//! - sizes, `[f32; 2]`;
//! - [`StaticVertex`]: leaf index and total, uv/offset corner, padding, colors;
//! - [`DynamicVertex`]: impulse, [`Direction`] code, viewport weight.
//!
//! The vertex structs are `#[repr(C)]` and [`bytemuck::Pod`], so the `*_bytes`
//! accessors are zero-copy views.
//!
//! Holding a [`LeafSlot`] instead of a reference keeps the tree's lifetime
//! independent of the buffers' lifetime.

mod buffers;
mod damage;
mod types;

pub use buffers::RenderBuffers;
pub use damage::BufferDamage;
pub use types::{
    Channels, Direction, DynamicVertex, INDICES_PER_LEAF, LeafSlot, LeafStyle, LeafWrite,
    StaticVertex, VERTICES_PER_LEAF,
};
