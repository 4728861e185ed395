// Copyright 2025 the Mosaic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mosaic Tile Tree: an animated binary space partition of a viewport.
//!
//! A [`TileTree`] is a complete binary tree of depth `division`. Each internal
//! [`Split`] divides its rect between two children along an [`Axis`] fixed by
//! its depth (side by side at even depths, stacked at odd). Each [`Leaf`] owns
//! one quad in a [`mosaic_buffers::RenderBuffers`].
//!
//! - [`TileTree::build`] constructs the whole tree once and registers every
//!   leaf, depth-first and left-to-right, so slot numbers follow that order.
//! - [`TileTree::update`] eases every split ratio toward its target, redraws
//!   targets that have been reached, and writes the new leaf geometry in place.
//! - [`TileTree::retarget`] sends every split toward a common ratio or fresh
//!   random ones.
//! - [`TileTree::resize`] moves the root and recomputes all rects from the
//!   current ratios without animating.
//!
//! Topology and slots never change after construction. Sibling rects always
//! share their boundary coordinate, so the leaves tile the root exactly.
//!
//! Randomness comes from any [`mosaic_random::RandomSource`]; passing the
//! same seeded source that produced the artwork attributes makes the geometry
//! reproducible too.
//!
//! ## Example
//!
//! ```rust
//! use kurbo::Rect;
//! use mosaic_random::Replay;
//! use mosaic_tile_tree::{TileTree, TreeConfig};
//!
//! let mut random = Replay::new([0.5]);
//! let config = TreeConfig::new().with_division(2);
//! let (mut tree, mut buffers) =
//!     TileTree::build_with_buffers(Rect::new(0.0, 0.0, 100.0, 100.0), &config, &mut random)
//!         .unwrap();
//!
//! assert_eq!(tree.leaf_count(), 4);
//! assert_eq!(buffers.vertex_count(), 16);
//! let slots: Vec<u32> = tree.leaves().map(|l| l.slot().get()).collect();
//! assert_eq!(slots, [0, 1, 2, 3]);
//!
//! // Every split already sits on its target, so it draws a new one.
//! let _ = buffers.take_damage();
//! let report = tree.update(&mut random, &mut buffers);
//! assert_eq!(report.new_targets, 3);
//! ```

mod node;
mod tree;
mod types;

pub use node::{Leaf, Node, Split};
pub use tree::{Nodes, TileTree};
pub use types::{
    Axis, CONVERGED_EPSILON, EASE_DURATION, MAX_DIVISION, MAX_EASE_RATE, SETTLED_EPSILON,
    SQUARE_TOLERANCE, TickReport, TreeConfig, TreeError, TreeStats, classify,
};
