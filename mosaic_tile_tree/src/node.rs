// Copyright 2025 the Mosaic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tree nodes and the per-node animation step.

use kurbo::{Rect, Vec2};
use mosaic_buffers::{Direction, LeafSlot, LeafWrite};
use mosaic_random::RandomSource;

use crate::types::{Axis, CONVERGED_EPSILON, EASE_DURATION, MAX_EASE_RATE, SETTLED_EPSILON};

/// A node of the partition tree.
#[derive(Clone, Debug)]
pub enum Node {
    /// A renderable tile.
    Leaf(Leaf),
    /// An internal node dividing its rect between two children.
    Split(Split),
}

impl Node {
    /// Current rectangle.
    pub fn rect(&self) -> Rect {
        match self {
            Self::Leaf(leaf) => leaf.rect,
            Self::Split(split) => split.rect,
        }
    }

    /// Distance from the root; the root is at depth 0.
    pub fn depth(&self) -> u32 {
        match self {
            Self::Leaf(leaf) => leaf.depth,
            Self::Split(split) => split.depth,
        }
    }

    /// The leaf payload, if this is a leaf.
    pub fn as_leaf(&self) -> Option<&Leaf> {
        match self {
            Self::Leaf(leaf) => Some(leaf),
            Self::Split(_) => None,
        }
    }

    /// The split payload, if this is an internal node.
    pub fn as_split(&self) -> Option<&Split> {
        match self {
            Self::Split(split) => Some(split),
            Self::Leaf(_) => None,
        }
    }
}

/// A leaf tile and the quad it owns.
#[derive(Clone, Debug)]
pub struct Leaf {
    pub(crate) rect: Rect,
    pub(crate) depth: u32,
    pub(crate) slot: LeafSlot,
    pub(crate) impulse: f64,
    pub(crate) direction: Direction,
}

impl Leaf {
    /// Current rectangle.
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Distance from the root.
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Buffer slot, assigned at construction and never changed.
    pub fn slot(&self) -> LeafSlot {
        self.slot
    }

    /// Impulse received from the parent during the last update.
    pub fn impulse(&self) -> f64 {
        self.impulse
    }

    /// Aspect classification as of the last update or resize.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// The buffer write describing this leaf within `viewport`.
    pub(crate) fn write(&self, viewport: Rect) -> LeafWrite {
        LeafWrite {
            rect: self.rect,
            impulse: self.impulse,
            direction: self.direction,
            weight: weight(self.rect, viewport),
        }
    }
}

/// An internal node with an animated split ratio.
#[derive(Clone, Debug)]
pub struct Split {
    pub(crate) rect: Rect,
    pub(crate) depth: u32,
    pub(crate) axis: Axis,
    pub(crate) ratio: f64,
    pub(crate) target_ratio: f64,
    pub(crate) convergences: u32,
    pub(crate) children: [Box<Node>; 2],
}

impl Split {
    /// Current rectangle.
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Distance from the root.
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Split orientation.
    pub fn axis(&self) -> Axis {
        self.axis
    }

    /// Fraction of the rect given to the first child.
    pub fn ratio(&self) -> f64 {
        self.ratio
    }

    /// Ratio the node is easing toward.
    pub fn target_ratio(&self) -> f64 {
        self.target_ratio
    }

    /// How many times this node reached its target and drew a new one.
    pub fn convergences(&self) -> u32 {
        self.convergences
    }

    /// The two children, first then second.
    pub fn children(&self) -> [&Node; 2] {
        [&self.children[0], &self.children[1]]
    }

    /// Child rects for the current ratio.
    pub fn child_rects(&self) -> (Rect, Rect) {
        self.axis.split(self.rect, self.ratio)
    }

    /// Advance the ratio one tick toward its target and return the impulse
    /// for the children.
    ///
    /// A node within [`CONVERGED_EPSILON`] of its target draws a new one from
    /// `random`. Within [`SETTLED_EPSILON`] the impulse is zero. The ease
    /// covers `min(distance / EASE_DURATION, MAX_EASE_RATE)` of the remaining
    /// distance, so the ratio never overshoots.
    pub(crate) fn step(&mut self, random: &mut impl RandomSource) -> f64 {
        let mut diff = (self.ratio - self.target_ratio).abs();
        if diff < CONVERGED_EPSILON {
            self.target_ratio = random.next_fraction();
            self.convergences += 1;
        }
        if diff < SETTLED_EPSILON {
            diff = 0.0;
        }
        let gap = self.target_ratio - self.ratio;
        let rate = (gap.abs() / EASE_DURATION).clamp(0.0, MAX_EASE_RATE);
        self.ratio = (self.ratio + gap * rate).clamp(0.0, 1.0);
        diff
    }
}

/// Center of `rect` normalized to `viewport`: `(0, 0)` at its top-left corner,
/// `(1, 1)` at the bottom-right.
pub(crate) fn weight(rect: Rect, viewport: Rect) -> Vec2 {
    let center = rect.center();
    Vec2::new(
        (center.x - viewport.x0) / viewport.width(),
        (center.y - viewport.y0) / viewport.height(),
    )
}
