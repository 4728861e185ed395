// Copyright 2025 the Mosaic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The tile tree: construction, animation, retargeting, and resize.

use kurbo::Rect;
use mosaic_buffers::{Channels, LeafWrite, RenderBuffers};
use mosaic_random::RandomSource;

use crate::node::{Leaf, Node, Split, weight};
use crate::types::{Axis, TickReport, TreeConfig, TreeError, TreeStats, check_rect, classify};

/// A complete binary partition of a rectangle whose split ratios animate.
///
/// The tree is built once. Every leaf registers a quad in a
/// [`RenderBuffers`] during [`TileTree::build`] and keeps that slot for its
/// whole life; [`TileTree::update`] and [`TileTree::resize`] only rewrite
/// geometry in place and push it into the same slots.
///
/// Both passes are top-down: a node's rect is computed by its parent and is
/// the only input its children see.
pub struct TileTree {
    root: Node,
    division: u32,
}

impl core::fmt::Debug for TileTree {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TileTree")
            .field("root_rect", &self.root.rect())
            .field("division", &self.division)
            .field("leaves", &self.leaf_count())
            .finish_non_exhaustive()
    }
}

impl TileTree {
    /// Build the tree over `rect` and register its leaves into `buffers`.
    ///
    /// Split ratios start at `0.5 ± tile_ratio_offset`, drawn from `random` in
    /// depth-first order. Leaves register in depth-first, left-to-right order,
    /// so slot numbers follow that order. `buffers` must be empty and reserve
    /// exactly [`TreeConfig::leaf_count`] leaves; it is sealed on success.
    pub fn build(
        rect: Rect,
        config: &TreeConfig,
        random: &mut impl RandomSource,
        buffers: &mut RenderBuffers,
    ) -> Result<Self, TreeError> {
        config.validate(rect)?;
        if buffers.is_sealed() || buffers.leaf_count() != 0 {
            return Err(TreeError::BuffersInUse);
        }
        let expected = config.leaf_count();
        if buffers.capacity() != expected {
            return Err(TreeError::CapacityMismatch {
                expected,
                capacity: buffers.capacity(),
            });
        }

        let root = build_node(rect, 0, config, rect, random, buffers);
        buffers.seal();
        let tree = Self {
            root,
            division: config.division,
        };
        tracing::debug!(
            division = tree.division,
            leaves = expected,
            x = rect.x0,
            y = rect.y0,
            width = rect.width(),
            height = rect.height(),
            "tile tree built"
        );
        Ok(tree)
    }

    /// Allocate buffers of the right size and build into them.
    pub fn build_with_buffers(
        rect: Rect,
        config: &TreeConfig,
        random: &mut impl RandomSource,
    ) -> Result<(Self, RenderBuffers), TreeError> {
        config.validate(rect)?;
        let mut buffers = RenderBuffers::with_leaf_capacity(config.leaf_count());
        let tree = Self::build(rect, config, random, &mut buffers)?;
        Ok((tree, buffers))
    }

    /// Advance every split ratio by one tick and push the new leaf geometry.
    ///
    /// Splits are stepped in depth-first order, so the sequence of targets
    /// drawn from `random` is reproducible. The root rect does not change.
    pub fn update(
        &mut self,
        random: &mut impl RandomSource,
        buffers: &mut RenderBuffers,
    ) -> TickReport {
        let viewport = self.root.rect();
        let mut report = TickReport::default();
        let mut stack: Vec<(&mut Node, Rect, f64)> = vec![(&mut self.root, viewport, 0.0)];

        while let Some((node, rect, impulse)) = stack.pop() {
            match node {
                Node::Split(split) => {
                    split.rect = rect;
                    let before = split.convergences;
                    let diff = split.step(random);
                    report.new_targets += split.convergences - before;
                    report.max_impulse = report.max_impulse.max(diff);
                    let (a, b) = split.child_rects();
                    let [first, second] = &mut split.children;
                    // Second pushed first so the first child is visited first.
                    stack.push((second.as_mut(), b, diff));
                    stack.push((first.as_mut(), a, diff));
                }
                Node::Leaf(leaf) => {
                    leaf.rect = rect;
                    leaf.impulse = impulse;
                    leaf.direction = classify(rect);
                    report.changed |= buffers.write_leaf(leaf.slot, &leaf.write(viewport));
                }
            }
        }

        tracing::trace!(
            max_impulse = report.max_impulse,
            new_targets = report.new_targets,
            changed = ?report.changed,
            "tile tree updated"
        );
        report
    }

    /// Set the target ratio of every split.
    ///
    /// With `Some(ratio)` every split eases toward that value (clamped to
    /// `[0, 1]`); with `None` each split draws its own target from `random`
    /// in depth-first order. A non-finite ratio is treated as `None`.
    /// Current ratios and leaves are untouched.
    pub fn retarget(&mut self, ratio: Option<f64>, random: &mut impl RandomSource) {
        if let Some(r) = ratio.filter(|r| !r.is_finite()) {
            tracing::warn!(ratio = r, "non-finite retarget ratio; drawing targets instead");
        }
        let fixed = ratio.filter(|r| r.is_finite()).map(|r| r.clamp(0.0, 1.0));
        let mut stack: Vec<&mut Node> = vec![&mut self.root];
        let mut splits = 0_usize;
        while let Some(node) = stack.pop() {
            if let Node::Split(split) = node {
                split.target_ratio = match fixed {
                    Some(r) => r,
                    None => random.next_fraction(),
                };
                splits += 1;
                let [first, second] = &mut split.children;
                stack.push(second.as_mut());
                stack.push(first.as_mut());
            }
        }
        tracing::debug!(?fixed, splits, "tile tree retargeted");
    }

    /// Move the root to `rect` and recompute every rect from current ratios.
    ///
    /// Nothing eases and no random values are drawn. Leaves keep their slots
    /// and impulses; only geometry, direction, and weight are rewritten.
    pub fn resize(
        &mut self,
        rect: Rect,
        buffers: &mut RenderBuffers,
    ) -> Result<Channels, TreeError> {
        check_rect(rect)?;
        let mut changed = Channels::empty();
        let mut stack: Vec<(&mut Node, Rect)> = vec![(&mut self.root, rect)];
        while let Some((node, r)) = stack.pop() {
            match node {
                Node::Split(split) => {
                    split.rect = r;
                    let (a, b) = split.child_rects();
                    let [first, second] = &mut split.children;
                    stack.push((second.as_mut(), b));
                    stack.push((first.as_mut(), a));
                }
                Node::Leaf(leaf) => {
                    leaf.rect = r;
                    leaf.direction = classify(r);
                    changed |= buffers.write_leaf(leaf.slot, &leaf.write(rect));
                }
            }
        }
        tracing::debug!(
            width = rect.width(),
            height = rect.height(),
            ?changed,
            "tile tree resized"
        );
        Ok(changed)
    }

    /// The root node.
    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Current root rectangle.
    pub fn root_rect(&self) -> Rect {
        self.root.rect()
    }

    /// Depth of the tree.
    pub fn division(&self) -> u32 {
        self.division
    }

    /// Number of leaves, `2^division`.
    pub fn leaf_count(&self) -> usize {
        1_usize << self.division
    }

    /// All nodes in depth-first, first-child-first order.
    pub fn nodes(&self) -> Nodes<'_> {
        Nodes {
            stack: vec![&self.root],
        }
    }

    /// Leaves in slot order.
    pub fn leaves(&self) -> impl Iterator<Item = &Leaf> + '_ {
        self.nodes().filter_map(Node::as_leaf)
    }

    /// Internal nodes in depth-first order.
    pub fn splits(&self) -> impl Iterator<Item = &Split> + '_ {
        self.nodes().filter_map(Node::as_split)
    }

    /// Summary counts for logging.
    pub fn stats(&self) -> TreeStats {
        let mut stats = TreeStats {
            division: self.division,
            ..TreeStats::default()
        };
        for node in self.nodes() {
            match node {
                Node::Leaf(_) => stats.leaves += 1,
                Node::Split(split) => {
                    stats.splits += 1;
                    stats.convergences += u64::from(split.convergences);
                }
            }
        }
        stats
    }
}

/// Depth-first iterator over the nodes of a [`TileTree`].
#[derive(Clone, Debug)]
pub struct Nodes<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Iterator for Nodes<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        if let Node::Split(split) = node {
            self.stack.push(&split.children[1]);
            self.stack.push(&split.children[0]);
        }
        Some(node)
    }
}

fn build_node(
    rect: Rect,
    depth: u32,
    config: &TreeConfig,
    viewport: Rect,
    random: &mut impl RandomSource,
    buffers: &mut RenderBuffers,
) -> Node {
    if depth < config.division {
        let axis = Axis::for_depth(depth);
        let ratio = 0.5 + (2.0 * random.next_fraction() - 1.0) * config.tile_ratio_offset;
        let (a, b) = axis.split(rect, ratio);
        let first = build_node(a, depth + 1, config, viewport, random, buffers);
        let second = build_node(b, depth + 1, config, viewport, random, buffers);
        Node::Split(Split {
            rect,
            depth,
            axis,
            ratio,
            target_ratio: ratio,
            convergences: 0,
            children: [Box::new(first), Box::new(second)],
        })
    } else {
        let direction = classify(rect);
        let initial = LeafWrite {
            rect,
            impulse: 0.0,
            direction,
            weight: weight(rect, viewport),
        };
        let slot = buffers.register_leaf(config.style, &initial);
        Node::Leaf(Leaf {
            rect,
            depth,
            slot,
            impulse: 0.0,
            direction,
        })
    }
}
