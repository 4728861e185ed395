// Copyright 2025 the Mosaic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The slot arena: registration, in-place writes, and read access for upload.

use core::ops::Range;

use crate::damage::{BufferDamage, index_range};
use crate::types::{
    CORNERS, Channels, DynamicVertex, INDICES_PER_LEAF, LeafSlot, LeafStyle, LeafWrite,
    QUAD_INDICES, StaticVertex, VERTICES_PER_LEAF,
};

/// Flat quad-mesh buffers keyed by [`LeafSlot`].
///
/// The buffers have two phases:
///
/// 1. **Construction**: [`RenderBuffers::register_leaf`] appends one quad per
///    leaf (4 vertices, 6 indices) and hands back its slot. Registration order
///    defines slot order. [`RenderBuffers::seal`] ends this phase.
/// 2. **Animation**: [`RenderBuffers::write_leaf`] overwrites a quad's dynamic
///    attributes in place and records which channels changed. Array lengths
///    and the index array never change again.
///
/// Changes accumulate until [`RenderBuffers::take_damage`] reports and clears
/// them, mirroring a batched commit.
///
/// ## Example
///
/// ```rust
/// use kurbo::{Rect, Vec2};
/// use mosaic_buffers::{Direction, LeafStyle, LeafWrite, RenderBuffers};
///
/// let mut buffers = RenderBuffers::with_leaf_capacity(1);
/// let write = LeafWrite {
///     rect: Rect::new(0.0, 0.0, 10.0, 10.0),
///     impulse: 0.0,
///     direction: Direction::NearSquare,
///     weight: Vec2::new(0.5, 0.5),
/// };
/// let slot = buffers.register_leaf(LeafStyle::default(), &write);
/// buffers.seal();
///
/// assert_eq!(slot.get(), 0);
/// assert_eq!(buffers.indices(), &[0, 1, 2, 2, 3, 0]);
/// ```
pub struct RenderBuffers {
    capacity: usize,
    sealed: bool,
    positions: Vec<[f32; 3]>,
    sizes: Vec<[f32; 2]>,
    statics: Vec<StaticVertex>,
    dynamics: Vec<DynamicVertex>,
    indices: Vec<u32>,
    damage: BufferDamage,
}

impl core::fmt::Debug for RenderBuffers {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RenderBuffers")
            .field("leaves", &self.leaf_count())
            .field("capacity", &self.capacity)
            .field("sealed", &self.sealed)
            .field("damage", &self.damage)
            .finish_non_exhaustive()
    }
}

impl RenderBuffers {
    /// Create empty buffers sized for exactly `leaves` quads.
    pub fn with_leaf_capacity(leaves: usize) -> Self {
        let vertices = leaves * VERTICES_PER_LEAF;
        Self {
            capacity: leaves,
            sealed: false,
            positions: Vec::with_capacity(vertices),
            sizes: Vec::with_capacity(vertices),
            statics: Vec::with_capacity(vertices),
            dynamics: Vec::with_capacity(vertices),
            indices: Vec::with_capacity(leaves * INDICES_PER_LEAF),
            damage: BufferDamage::default(),
        }
    }

    /// Append a quad for a new leaf and return its slot.
    ///
    /// # Panics
    ///
    /// Panics if the buffers are sealed or already hold their full capacity.
    /// The layout is fixed up front, so either case is a construction bug.
    pub fn register_leaf(&mut self, style: LeafStyle, initial: &LeafWrite) -> LeafSlot {
        assert!(!self.sealed, "leaf registered after buffers were sealed");
        let n = self.leaf_count();
        assert!(
            n < self.capacity,
            "leaf slot {n} exceeds reserved capacity {}",
            self.capacity
        );
        #[allow(
            clippy::cast_possible_truncation,
            reason = "Leaf counts are bounded far below u32::MAX by the tree depth cap."
        )]
        let slot = LeafSlot(n as u32);
        #[allow(
            clippy::cast_possible_truncation,
            reason = "Four vertices per leaf stay within u32 for any tree under the depth cap."
        )]
        let base = (n * VERTICES_PER_LEAF) as u32;

        let position = initial.position();
        let size = initial.size();
        let dynamic = initial.dynamic();
        for corner in CORNERS {
            self.positions.push(position);
            self.sizes.push(size);
            self.statics.push(StaticVertex {
                leaf_index: slot.get() as f32,
                leaf_total: 0.0,
                uv: corner,
                offset: corner,
                padding: [style.padding, style.padding],
                bg_color: style.bg_color,
                text_color: style.text_color,
            });
            self.dynamics.push(dynamic);
        }
        self.indices.extend(QUAD_INDICES.iter().map(|i| base + i));
        slot
    }

    /// End the construction phase.
    ///
    /// Writes the final leaf count into every static vertex and marks every
    /// channel of every slot dirty so the first upload is complete.
    ///
    /// # Panics
    ///
    /// Panics if fewer leaves were registered than reserved.
    pub fn seal(&mut self) {
        assert_eq!(
            self.leaf_count(),
            self.capacity,
            "buffers sealed before every reserved leaf was registered"
        );
        let total = self.capacity as f32;
        for v in &mut self.statics {
            v.leaf_total = total;
        }
        self.sealed = true;
        if self.capacity > 0 {
            #[allow(
                clippy::cast_possible_truncation,
                reason = "Leaf counts are bounded far below u32::MAX by the tree depth cap."
            )]
            let end = self.capacity as u32;
            self.damage = BufferDamage {
                channels: Channels::all(),
                slots: Some(0..end),
            };
        }
        tracing::debug!(
            leaves = self.capacity,
            vertices = self.vertex_count(),
            indices = self.indices.len(),
            "render buffers sealed"
        );
    }

    /// Overwrite the dynamic attributes of `slot` in place.
    ///
    /// Only channels whose values actually change are recorded as damage.
    /// Returns the channels that changed.
    ///
    /// # Panics
    ///
    /// Panics if `slot` was never registered.
    pub fn write_leaf(&mut self, slot: LeafSlot, write: &LeafWrite) -> Channels {
        let range = self.vertex_range(slot);
        assert!(
            range.end <= self.positions.len(),
            "write to unregistered leaf slot {}",
            slot.get()
        );
        let first = range.start;
        let position = write.position();
        let size = write.size();
        let dynamic = write.dynamic();

        let mut changed = Channels::empty();
        if self.positions[first] != position {
            changed |= Channels::POSITION;
        }
        if self.sizes[first] != size {
            changed |= Channels::SIZE;
        }
        let old = self.dynamics[first];
        if old.impulse != dynamic.impulse {
            changed |= Channels::IMPULSE;
        }
        if old.direction != dynamic.direction {
            changed |= Channels::DIRECTION;
        }
        if old.weight != dynamic.weight {
            changed |= Channels::WEIGHT;
        }
        if changed.is_empty() {
            return changed;
        }

        self.positions[range.clone()].fill(position);
        self.sizes[range.clone()].fill(size);
        self.dynamics[range].fill(dynamic);
        self.damage.touch(slot, changed);
        changed
    }

    /// Report and clear the damage accumulated since the last call.
    pub fn take_damage(&mut self) -> BufferDamage {
        core::mem::take(&mut self.damage)
    }

    /// Damage accumulated so far, without clearing it.
    pub fn pending_damage(&self) -> &BufferDamage {
        &self.damage
    }

    /// Whether [`RenderBuffers::seal`] has run.
    pub fn is_sealed(&self) -> bool {
        self.sealed
    }

    /// Number of registered leaves.
    pub fn leaf_count(&self) -> usize {
        self.positions.len() / VERTICES_PER_LEAF
    }

    /// Reserved number of leaves.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of vertices (four per leaf).
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Vertex range owned by `slot`.
    pub fn vertex_range(&self, slot: LeafSlot) -> Range<usize> {
        slot.idx() * VERTICES_PER_LEAF..(slot.idx() + 1) * VERTICES_PER_LEAF
    }

    /// Index range owned by `slot`.
    pub fn index_range(&self, slot: LeafSlot) -> Range<usize> {
        index_range(slot)
    }

    /// Per-vertex quad origin.
    pub fn positions(&self) -> &[[f32; 3]] {
        &self.positions
    }

    /// Per-vertex quad extent.
    pub fn sizes(&self) -> &[[f32; 2]] {
        &self.sizes
    }

    /// Per-vertex attributes fixed at registration.
    pub fn statics(&self) -> &[StaticVertex] {
        &self.statics
    }

    /// Per-vertex attributes rewritten while animating.
    pub fn dynamics(&self) -> &[DynamicVertex] {
        &self.dynamics
    }

    /// Triangle list, two triangles per leaf.
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Raw bytes of [`RenderBuffers::positions`] for upload.
    pub fn position_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.positions)
    }

    /// Raw bytes of [`RenderBuffers::sizes`] for upload.
    pub fn size_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.sizes)
    }

    /// Raw bytes of [`RenderBuffers::statics`] for upload.
    pub fn static_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.statics)
    }

    /// Raw bytes of [`RenderBuffers::dynamics`] for upload.
    pub fn dynamic_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.dynamics)
    }

    /// Raw bytes of [`RenderBuffers::indices`] for upload.
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Direction;
    use kurbo::{Rect, Vec2};

    fn write_at(x: f64, impulse: f64) -> LeafWrite {
        LeafWrite {
            rect: Rect::new(x, 0.0, x + 10.0, 20.0),
            impulse,
            direction: Direction::Tall,
            weight: Vec2::new(0.25, 0.75),
        }
    }

    fn style() -> LeafStyle {
        LeafStyle {
            bg_color: [0.1, 0.2, 0.3],
            text_color: [1.0, 1.0, 1.0],
            padding: 0.8,
        }
    }

    fn sealed(leaves: usize) -> RenderBuffers {
        let mut b = RenderBuffers::with_leaf_capacity(leaves);
        for i in 0..leaves {
            b.register_leaf(style(), &write_at(i as f64 * 10.0, 0.0));
        }
        b.seal();
        b
    }

    #[test]
    fn registration_assigns_dense_slots_and_quads() {
        let mut b = RenderBuffers::with_leaf_capacity(3);
        let slots: Vec<u32> = (0..3)
            .map(|i| b.register_leaf(style(), &write_at(f64::from(i), 0.0)).get())
            .collect();
        assert_eq!(slots, [0, 1, 2]);
        assert_eq!(b.vertex_count(), 12);
        assert_eq!(
            b.indices(),
            &[0, 1, 2, 2, 3, 0, 4, 5, 6, 6, 7, 4, 8, 9, 10, 10, 11, 8]
        );
        let uvs: Vec<[f32; 2]> = b.statics()[4..8].iter().map(|v| v.uv).collect();
        assert_eq!(uvs, [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]]);
        assert!(b.statics()[4..8].iter().all(|v| v.leaf_index == 1.0));
    }

    #[test]
    fn seal_fills_totals_and_marks_everything_dirty() {
        let mut b = sealed(4);
        assert!(b.is_sealed());
        assert!(b.statics().iter().all(|v| v.leaf_total == 4.0));
        let d = b.take_damage();
        assert_eq!(d.channels, Channels::all());
        assert_eq!(d.slots, Some(0..4));
        assert!(b.take_damage().is_empty(), "damage is cleared once taken");
    }

    #[test]
    fn write_updates_all_four_corners_and_only_changed_channels() {
        let mut b = sealed(2);
        let _ = b.take_damage();

        let mut w = write_at(10.0, 0.0);
        w.impulse = 0.125;
        let changed = b.write_leaf(LeafSlot(1), &w);
        assert_eq!(changed, Channels::IMPULSE);
        assert!(b.dynamics()[4..8].iter().all(|v| v.impulse == 0.125));
        assert!(b.dynamics()[0..4].iter().all(|v| v.impulse == 0.0));

        let d = b.take_damage();
        assert_eq!(d.channels, Channels::IMPULSE);
        assert_eq!(d.slots, Some(1..2));
    }

    #[test]
    fn identical_write_reports_nothing() {
        let mut b = sealed(1);
        let _ = b.take_damage();
        assert!(b.write_leaf(LeafSlot(0), &write_at(0.0, 0.0)).is_empty());
        assert!(b.take_damage().is_empty());
    }

    #[test]
    fn writes_never_change_lengths_or_indices() {
        let mut b = sealed(3);
        let indices = b.indices().to_vec();
        let len = b.vertex_count();
        let mut w = write_at(50.0, 0.5);
        w.rect = Rect::new(-5.0, -5.0, 100.0, 3.0);
        w.direction = Direction::Wide;
        b.write_leaf(LeafSlot(2), &w);
        assert_eq!(b.indices(), indices.as_slice());
        assert_eq!(b.vertex_count(), len);
        assert_eq!(b.positions()[8], [-5.0, -5.0, 0.0]);
        assert_eq!(b.sizes()[11], [105.0, 8.0]);
        assert_eq!(b.dynamics()[9].direction, 1.0);
    }

    #[test]
    fn byte_views_match_layouts() {
        let b = sealed(2);
        assert_eq!(b.position_bytes().len(), 8 * 12);
        assert_eq!(b.size_bytes().len(), 8 * 8);
        assert_eq!(b.static_bytes().len(), 8 * 14 * 4);
        assert_eq!(b.dynamic_bytes().len(), 8 * 4 * 4);
        assert_eq!(b.index_bytes().len(), 12 * 4);
    }

    #[test]
    fn ranges_line_up_with_slots() {
        let b = sealed(3);
        assert_eq!(b.vertex_range(LeafSlot(2)), 8..12);
        assert_eq!(b.index_range(LeafSlot(2)), 12..18);
        assert_eq!(&b.indices()[b.index_range(LeafSlot(2))], &[8, 9, 10, 10, 11, 8]);
    }

    #[test]
    #[should_panic(expected = "exceeds reserved capacity")]
    fn registering_past_capacity_panics() {
        let mut b = RenderBuffers::with_leaf_capacity(1);
        b.register_leaf(style(), &write_at(0.0, 0.0));
        b.register_leaf(style(), &write_at(1.0, 0.0));
    }

    #[test]
    #[should_panic(expected = "after buffers were sealed")]
    fn registering_after_seal_panics() {
        let mut b = sealed(0);
        b.register_leaf(style(), &write_at(0.0, 0.0));
    }

    #[test]
    #[should_panic(expected = "before every reserved leaf")]
    fn sealing_short_panics() {
        let mut b = RenderBuffers::with_leaf_capacity(2);
        b.register_leaf(style(), &write_at(0.0, 0.0));
        b.seal();
    }
}
