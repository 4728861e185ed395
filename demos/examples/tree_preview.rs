// Copyright 2025 the Mosaic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Print a small tile tree as text while its ratios animate.
//!
//! Each leaf is drawn with a letter for its slot, so you can watch slots stay
//! attached to the same tiles as the partition moves.
//!
//! Run:
//! - `cargo run -p mosaic_demos --example tree_preview`

use kurbo::Rect;
use mosaic_buffers::RenderBuffers;
use mosaic_random::{DeterministicRandom, generate_hash};
use mosaic_tile_tree::{TileTree, TreeConfig};

const COLS: usize = 48;
const ROWS: usize = 16;

fn main() {
    let hash = generate_hash();
    let mut random = DeterministicRandom::from_hash(&hash).expect("generated hashes are valid");
    let config = TreeConfig::new()
        .with_division(4)
        .with_tile_ratio_offset(0.2);
    let bounds = Rect::new(0.0, 0.0, COLS as f64, ROWS as f64);
    let (mut tree, mut buffers) =
        TileTree::build_with_buffers(bounds, &config, &mut random).expect("valid tree");

    println!("hash: {hash}");
    print_tree(&tree);
    tree.retarget(None, &mut random);
    for step in 1..=3 {
        for _ in 0..20 {
            tree.update(&mut random, &mut buffers);
        }
        let damage = buffers.take_damage();
        println!(
            "after {} ticks, dirty {:?} over slots {:?}",
            step * 20,
            damage.channels,
            damage.slots
        );
        print_tree(&tree);
    }
    print_buffers(&buffers);
}

fn print_tree(tree: &TileTree) {
    let mut grid = vec![['.'; COLS]; ROWS];
    for leaf in tree.leaves() {
        let r = leaf.rect();
        let glyph = char::from_digit(leaf.slot().get() % 36, 36).unwrap_or('?');
        for (y, row) in grid.iter_mut().enumerate() {
            for (x, cell) in row.iter_mut().enumerate() {
                let (cx, cy) = (x as f64 + 0.5, y as f64 + 0.5);
                if cx >= r.x0 && cx < r.x1 && cy >= r.y0 && cy < r.y1 {
                    *cell = glyph;
                }
            }
        }
    }
    for row in grid {
        println!("{}", row.iter().collect::<String>());
    }
    println!();
}

fn print_buffers(buffers: &RenderBuffers) {
    println!(
        "{} leaves, {} vertices, {} indices, {} bytes of dynamic attributes",
        buffers.leaf_count(),
        buffers.vertex_count(),
        buffers.indices().len(),
        buffers.dynamic_bytes().len()
    );
}
