// Copyright 2025 the Mosaic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property-based invariant tests for the tile tree.
//!
//! 1. Children of every split tile their parent exactly
//! 2. Ratios stay in `[0, 1]` through any sequence of operations
//! 3. A tree of depth `d` has `2^d` leaves, `4 * 2^d` vertices and `6 * 2^d` indices
//! 4. Resize never changes slots or the index array
//! 5. The buffers mirror the leaf rects after every pass

use kurbo::Rect;
use mosaic_buffers::RenderBuffers;
use mosaic_random::Replay;
use mosaic_tile_tree::{Axis, Node, TileTree, TreeConfig};
use proptest::prelude::*;

// ── Strategies ──────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
enum Op {
    Update,
    Retarget(Option<f64>),
    Resize(Rect),
}

fn rect_strategy() -> impl Strategy<Value = Rect> {
    (-2000.0..2000.0_f64, -2000.0..2000.0_f64, 1.0..4000.0_f64, 1.0..4000.0_f64)
        .prop_map(|(x, y, w, h)| Rect::new(x, y, x + w, y + h))
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        6 => Just(Op::Update),
        1 => proptest::option::of(-0.5..1.5_f64).prop_map(Op::Retarget),
        1 => rect_strategy().prop_map(Op::Resize),
    ]
}

fn config_strategy() -> impl Strategy<Value = TreeConfig> {
    (0_u32..=6, 0.0..=0.5_f64).prop_map(|(division, offset)| {
        TreeConfig::new()
            .with_division(division)
            .with_tile_ratio_offset(offset)
    })
}

fn fractions() -> impl Strategy<Value = Vec<f64>> {
    proptest::collection::vec(0.0..1.0_f64, 1..32)
}

fn apply(tree: &mut TileTree, buffers: &mut RenderBuffers, random: &mut Replay, op: &Op) {
    match op {
        Op::Update => {
            tree.update(random, buffers);
        }
        Op::Retarget(ratio) => tree.retarget(*ratio, random),
        Op::Resize(rect) => {
            tree.resize(*rect, buffers).expect("strategy yields valid rects");
        }
    }
}

fn assert_partitions(tree: &TileTree) {
    for split in tree.splits() {
        let parent = split.rect();
        let [a, b] = split.children().map(Node::rect);
        match split.axis() {
            Axis::Horizontal => {
                assert_eq!(a.x1, b.x0, "shared boundary");
                assert_eq!((a.x0, b.x1), (parent.x0, parent.x1), "outer edges");
                assert_eq!((a.y0, a.y1), (parent.y0, parent.y1), "first spans parent");
                assert_eq!((b.y0, b.y1), (parent.y0, parent.y1), "second spans parent");
            }
            Axis::Vertical => {
                assert_eq!(a.y1, b.y0, "shared boundary");
                assert_eq!((a.y0, b.y1), (parent.y0, parent.y1), "outer edges");
                assert_eq!((a.x0, a.x1), (parent.x0, parent.x1), "first spans parent");
                assert_eq!((b.x0, b.x1), (parent.x0, parent.x1), "second spans parent");
            }
        }
    }
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "Buffers store f32 copies of f64 geometry."
)]
fn assert_buffers_mirror_leaves(tree: &TileTree, buffers: &RenderBuffers) {
    for leaf in tree.leaves() {
        let r = leaf.rect();
        let range = buffers.vertex_range(leaf.slot());
        for v in range {
            assert_eq!(buffers.positions()[v], [r.x0 as f32, r.y0 as f32, 0.0], "position");
            assert_eq!(
                buffers.sizes()[v],
                [r.width() as f32, r.height() as f32],
                "size"
            );
            assert_eq!(
                buffers.dynamics()[v].direction,
                leaf.direction().shader_code(),
                "direction"
            );
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 1, 2, 5. Partition, ratio bounds and buffer mirroring under any ops
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn invariants_hold_through_any_op_sequence(
        config in config_strategy(),
        rect in rect_strategy(),
        values in fractions(),
        ops in proptest::collection::vec(op_strategy(), 0..60),
    ) {
        let mut random = Replay::new(values);
        let (mut tree, mut buffers) =
            TileTree::build_with_buffers(rect, &config, &mut random).expect("valid config");
        assert_partitions(&tree);
        for op in &ops {
            apply(&mut tree, &mut buffers, &mut random, op);
            assert_partitions(&tree);
            for split in tree.splits() {
                prop_assert!((0.0..=1.0).contains(&split.ratio()), "ratio {}", split.ratio());
                prop_assert!((0.0..=1.0).contains(&split.target_ratio()));
            }
            assert_buffers_mirror_leaves(&tree, &buffers);
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 3. Leaf, vertex and index counts
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn counts_follow_division(config in config_strategy(), values in fractions()) {
        let mut random = Replay::new(values);
        let rect = Rect::new(0.0, 0.0, 640.0, 480.0);
        let (tree, buffers) =
            TileTree::build_with_buffers(rect, &config, &mut random).expect("valid config");
        let leaves = 1_usize << config.division;
        prop_assert_eq!(tree.leaves().count(), leaves);
        prop_assert_eq!(tree.splits().count(), leaves - 1);
        prop_assert_eq!(buffers.vertex_count(), 4 * leaves);
        prop_assert_eq!(buffers.indices().len(), 6 * leaves);
        prop_assert!(tree.leaves().all(|l| l.depth() == config.division));
        let slots: Vec<u32> = tree.leaves().map(|l| l.slot().get()).collect();
        let expected: Vec<u32> = (0..).take(leaves).collect();
        prop_assert_eq!(slots, expected);
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 4. Resize keeps slots and indices
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn resize_keeps_topology(
        config in config_strategy(),
        values in fractions(),
        ticks in 0_usize..30,
        rects in proptest::collection::vec(rect_strategy(), 1..5),
    ) {
        let mut random = Replay::new(values);
        let (mut tree, mut buffers) = TileTree::build_with_buffers(
            Rect::new(0.0, 0.0, 800.0, 600.0),
            &config,
            &mut random,
        )
        .expect("valid config");
        for _ in 0..ticks {
            tree.update(&mut random, &mut buffers);
        }
        let slots: Vec<u32> = tree.leaves().map(|l| l.slot().get()).collect();
        let ratios: Vec<f64> = tree.splits().map(|s| s.ratio()).collect();
        let indices = buffers.indices().to_vec();
        let draws = random.draws();

        for rect in rects {
            tree.resize(rect, &mut buffers).expect("valid rect");
            prop_assert_eq!(tree.root_rect(), rect);
            prop_assert_eq!(tree.leaves().map(|l| l.slot().get()).collect::<Vec<_>>(), slots.clone());
            prop_assert_eq!(tree.splits().map(|s| s.ratio()).collect::<Vec<_>>(), ratios.clone());
            prop_assert_eq!(buffers.indices(), indices.as_slice());
            assert_buffers_mirror_leaves(&tree, &buffers);
        }
        prop_assert_eq!(random.draws(), draws, "resize draws nothing");
    }
}
