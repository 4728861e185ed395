// Copyright 2025 the Mosaic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Upload damage returned from [`crate::RenderBuffers::take_damage`].

use core::ops::Range;

use crate::types::{Channels, INDICES_PER_LEAF, LeafSlot, VERTICES_PER_LEAF};

/// Channels and slots changed since the previous [`crate::RenderBuffers::take_damage`].
///
/// The slot range is a single span covering every touched leaf. It may include
/// untouched leaves in between; it is meant to bound a partial upload, not to
/// list exact writes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BufferDamage {
    /// Channels that need uploading.
    pub channels: Channels,
    /// Half-open span of slots touched, if any.
    pub slots: Option<Range<u32>>,
}

impl BufferDamage {
    /// Nothing changed.
    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    /// Vertex range covered by [`BufferDamage::slots`].
    pub fn vertex_range(&self) -> Option<Range<usize>> {
        let slots = self.slots.as_ref()?;
        Some(slots.start as usize * VERTICES_PER_LEAF..slots.end as usize * VERTICES_PER_LEAF)
    }

    pub(crate) fn touch(&mut self, slot: LeafSlot, channels: Channels) {
        if channels.is_empty() {
            return;
        }
        self.channels |= channels;
        let s = slot.get();
        self.slots = Some(match self.slots.take() {
            Some(r) => r.start.min(s)..r.end.max(s + 1),
            None => s..s + 1,
        });
    }
}

/// Index range owned by `slot`; indices never change after registration.
pub(crate) fn index_range(slot: LeafSlot) -> Range<usize> {
    slot.idx() * INDICES_PER_LEAF..(slot.idx() + 1) * INDICES_PER_LEAF
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn touch_grows_a_single_span() {
        let mut d = BufferDamage::default();
        assert!(d.is_empty());
        d.touch(LeafSlot(5), Channels::SIZE);
        d.touch(LeafSlot(2), Channels::POSITION);
        d.touch(LeafSlot(3), Channels::empty());
        assert_eq!(d.slots, Some(2..6));
        assert_eq!(d.channels, Channels::SIZE | Channels::POSITION);
        assert_eq!(d.vertex_range(), Some(8..24));
    }

    #[test]
    fn empty_touch_is_ignored() {
        let mut d = BufferDamage::default();
        d.touch(LeafSlot(9), Channels::empty());
        assert_eq!(d, BufferDamage::default());
    }
}
