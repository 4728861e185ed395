// Copyright 2025 the Mosaic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the tile tree: axes, configuration, errors, and tuning constants.

use kurbo::Rect;
use mosaic_buffers::{Channels, Direction, LeafStyle};

/// Below this distance from its target a split draws a fresh random target.
pub const CONVERGED_EPSILON: f64 = 0.002;
/// Below this distance a split reports zero impulse to its children.
pub const SETTLED_EPSILON: f64 = 0.005;
/// Time constant of the ratio ease: the rate is `distance / EASE_DURATION`.
pub const EASE_DURATION: f64 = 0.5;
/// Upper bound on the fraction of the remaining distance covered per tick.
pub const MAX_EASE_RATE: f64 = 0.1;
/// Leaves whose width and height differ by less than this are near-square.
pub const SQUARE_TOLERANCE: f64 = 100.0;
/// Deepest accepted `division`; `2^20` leaves already means four million vertices.
pub const MAX_DIVISION: u32 = 20;

/// Split orientation of an internal node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Children sit side by side; the ratio divides the width.
    Horizontal,
    /// Children are stacked; the ratio divides the height.
    Vertical,
}

impl Axis {
    /// The axis used at `depth`: horizontal at even depths, vertical at odd.
    pub const fn for_depth(depth: u32) -> Self {
        if depth % 2 == 0 {
            Self::Horizontal
        } else {
            Self::Vertical
        }
    }

    /// Split `rect` into two children, giving `ratio` of it to the first.
    ///
    /// Both children share the single boundary coordinate, so they cover
    /// `rect` with no gap or overlap.
    pub fn split(self, rect: Rect, ratio: f64) -> (Rect, Rect) {
        match self {
            Self::Horizontal => {
                let at = rect.x0 + rect.width() * ratio;
                (
                    Rect::new(rect.x0, rect.y0, at, rect.y1),
                    Rect::new(at, rect.y0, rect.x1, rect.y1),
                )
            }
            Self::Vertical => {
                let at = rect.y0 + rect.height() * ratio;
                (
                    Rect::new(rect.x0, rect.y0, rect.x1, at),
                    Rect::new(rect.x0, at, rect.x1, rect.y1),
                )
            }
        }
    }
}

/// Classify a leaf rectangle for the shader.
pub fn classify(rect: Rect) -> Direction {
    let (w, h) = (rect.width(), rect.height());
    if (w - h).abs() < SQUARE_TOLERANCE {
        Direction::NearSquare
    } else if w > h {
        Direction::Wide
    } else {
        Direction::Tall
    }
}

/// Construction parameters for a [`crate::TileTree`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TreeConfig {
    /// Depth of the complete tree; it has `2^division` leaves.
    pub division: u32,
    /// Maximum deviation of an initial split ratio from `0.5`.
    pub tile_ratio_offset: f64,
    /// Style written into every leaf quad.
    pub style: LeafStyle,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            division: 10,
            tile_ratio_offset: 0.0,
            style: LeafStyle::default(),
        }
    }
}

impl TreeConfig {
    /// Create the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the tree depth.
    pub fn with_division(mut self, division: u32) -> Self {
        self.division = division;
        self
    }

    /// Set the initial ratio jitter.
    pub fn with_tile_ratio_offset(mut self, offset: f64) -> Self {
        self.tile_ratio_offset = offset;
        self
    }

    /// Set the leaf style.
    pub fn with_style(mut self, style: LeafStyle) -> Self {
        self.style = style;
        self
    }

    /// Number of leaves a tree built from this configuration has.
    pub const fn leaf_count(&self) -> usize {
        1_usize << self.division
    }

    pub(crate) fn validate(&self, rect: Rect) -> Result<(), TreeError> {
        check_rect(rect)?;
        if self.division > MAX_DIVISION {
            return Err(TreeError::DivisionTooDeep {
                division: self.division,
                max: MAX_DIVISION,
            });
        }
        if !(0.0..=0.5).contains(&self.tile_ratio_offset) {
            return Err(TreeError::InvalidRatioOffset(self.tile_ratio_offset));
        }
        Ok(())
    }
}

/// Reject rects that would make every split degenerate.
pub(crate) fn check_rect(rect: Rect) -> Result<(), TreeError> {
    let (width, height) = (rect.width(), rect.height());
    if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0)
        || !(rect.x0.is_finite() && rect.y0.is_finite())
    {
        return Err(TreeError::InvalidRect { width, height });
    }
    Ok(())
}

/// What one [`crate::TileTree::update`] pass did.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TickReport {
    /// Largest impulse handed to any leaf.
    pub max_impulse: f64,
    /// Splits that reached their target and drew a new one.
    pub new_targets: u32,
    /// Buffer channels rewritten by the pass.
    pub changed: Channels,
}

/// Shape and history of a [`crate::TileTree`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TreeStats {
    /// Depth of the complete tree.
    pub division: u32,
    /// Number of leaves.
    pub leaves: usize,
    /// Number of internal nodes.
    pub splits: usize,
    /// Convergences summed over all splits.
    pub convergences: u64,
}

/// Errors rejected before construction starts.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum TreeError {
    /// The root rectangle has a non-finite or non-positive extent.
    #[error("root rect must have finite, positive extent; got {width} x {height}")]
    InvalidRect {
        /// Root width.
        width: f64,
        /// Root height.
        height: f64,
    },
    /// The requested depth exceeds [`MAX_DIVISION`].
    #[error("division {division} exceeds the maximum of {max}")]
    DivisionTooDeep {
        /// Requested depth.
        division: u32,
        /// Accepted maximum.
        max: u32,
    },
    /// The ratio jitter lies outside `[0, 0.5]`, which could push ratios out of `[0, 1]`.
    #[error("tile ratio offset {0} is outside [0, 0.5]")]
    InvalidRatioOffset(f64),
    /// The buffers passed in cannot hold exactly this tree's leaves.
    #[error("buffers reserve {capacity} leaves but the tree has {expected}")]
    CapacityMismatch {
        /// Leaves the tree will register.
        expected: usize,
        /// Leaves the buffers reserve.
        capacity: usize,
    },
    /// The buffers already hold leaves or are sealed.
    #[error("buffers already contain registered leaves")]
    BuffersInUse,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn axis_alternates_by_depth() {
        assert_eq!(Axis::for_depth(0), Axis::Horizontal);
        assert_eq!(Axis::for_depth(1), Axis::Vertical);
        assert_eq!(Axis::for_depth(10), Axis::Horizontal);
    }

    #[test]
    fn horizontal_split_shares_vertical_edge() {
        let (a, b) = Axis::Horizontal.split(Rect::new(10.0, 20.0, 110.0, 70.0), 0.25);
        assert_eq!(a, Rect::new(10.0, 20.0, 35.0, 70.0));
        assert_eq!(b, Rect::new(35.0, 20.0, 110.0, 70.0));
    }

    #[test]
    fn vertical_split_shares_horizontal_edge() {
        let (a, b) = Axis::Vertical.split(Rect::new(0.0, 0.0, 40.0, 200.0), 0.75);
        assert_eq!(a, Rect::new(0.0, 0.0, 40.0, 150.0));
        assert_eq!(b, Rect::new(0.0, 150.0, 40.0, 200.0));
    }

    #[test]
    fn classify_uses_absolute_tolerance() {
        assert_eq!(
            classify(Rect::new(0.0, 0.0, 199.0, 100.0)),
            Direction::NearSquare
        );
        assert_eq!(classify(Rect::new(0.0, 0.0, 200.0, 100.0)), Direction::Wide);
        assert_eq!(classify(Rect::new(0.0, 0.0, 10.0, 300.0)), Direction::Tall);
    }

    #[test]
    fn validation_rejects_bad_inputs() {
        let ok = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(TreeConfig::new().validate(ok).is_ok());
        assert!(matches!(
            TreeConfig::new().validate(Rect::new(0.0, 0.0, 0.0, 10.0)),
            Err(TreeError::InvalidRect { .. })
        ));
        assert!(matches!(
            TreeConfig::new().validate(Rect::new(0.0, 0.0, f64::INFINITY, 10.0)),
            Err(TreeError::InvalidRect { .. })
        ));
        assert_eq!(
            TreeConfig::new().with_division(21).validate(ok),
            Err(TreeError::DivisionTooDeep {
                division: 21,
                max: MAX_DIVISION
            })
        );
        assert_eq!(
            TreeConfig::new().with_tile_ratio_offset(0.6).validate(ok),
            Err(TreeError::InvalidRatioOffset(0.6))
        );
    }

    #[test]
    fn leaf_count_is_power_of_two() {
        assert_eq!(TreeConfig::new().with_division(0).leaf_count(), 1);
        assert_eq!(TreeConfig::new().with_division(12).leaf_count(), 4096);
    }
}
