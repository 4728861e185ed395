// Copyright 2025 the Mosaic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A headless host: drives a scene through init, frames, a pointer, and a resize.
//!
//! The host plays the part of a browser runtime. It owns the clock and the
//! viewport, calls the [`FrameDriver`] callbacks, and "uploads" whatever the
//! scene reports as damaged.
//!
//! Run:
//! - `cargo run -p mosaic_demos --example headless_session`
//! - `cargo run -p mosaic_demos --example headless_session -- 0x<64 hex digits> 600`
//!
//! Set `RUST_LOG=debug` (or `trace`) for tree and buffer events.

use std::error::Error;

use kurbo::{Point, Size};
use mosaic_scene::{FrameDriver, Scene, SceneConfig, SceneDriver};
use tracing_subscriber::EnvFilter;

const FRAME_SECS: f64 = 1.0 / 60.0;

fn main() -> Result<(), Box<dyn Error>> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive("info".parse().expect("invalid filter"))
                .from_env_lossy(),
        )
        .try_init();

    let mut args = std::env::args().skip(1);
    let mut config = SceneConfig::new().with_viewport(Size::new(1280.0, 720.0));
    if let Some(hash) = args.next() {
        config = config.with_hash(hash);
    }
    let frames: u32 = args.next().map(|n| n.parse()).transpose()?.unwrap_or(900);

    let mut driver = SceneDriver::new(config);
    driver.on_resize(Size::new(1280.0, 720.0), 2.0)?;
    driver.on_init()?;

    let scene = driver.scene().ok_or("scene did not initialize")?;
    println!("{}", serde_json::to_string_pretty(&scene.metadata())?);
    println!("hash: {}", scene.hash());
    report_upload("initial", driver.scene_mut());

    for frame in 0..frames {
        let elapsed = f64::from(frame) * FRAME_SECS;
        if frame == 120 {
            if let Some(scene) = driver.scene_mut() {
                scene.set_pointer(Point::new(640.0, 360.0));
            }
        }
        if frame == frames / 2 {
            driver.on_resize(Size::new(900.0, 1200.0), 1.0)?;
            report_upload("resize", driver.scene_mut());
        }
        driver.on_update(elapsed);
        if frame % 60 == 59 {
            report_upload("second", driver.scene_mut());
        }
    }

    if let Some(scene) = driver.scene() {
        let stats = scene.tree().stats();
        let uniforms = scene.uniforms();
        tracing::info!(
            frames = scene.frames(),
            leaves = stats.leaves,
            splits = stats.splits,
            convergences = stats.convergences,
            pointer_force_factor = uniforms.pointer_force_factor,
            "session finished"
        );
    }
    Ok(())
}

/// Stand-in for a GPU upload: report how much of each array would be sent.
fn report_upload(label: &str, scene: Option<&mut Scene>) {
    let Some(scene) = scene else {
        return;
    };
    let damage = scene.take_damage();
    if damage.is_empty() {
        tracing::info!(label, "nothing to upload");
        return;
    }
    let vertices = damage.vertex_range().map_or(0, |r| r.len());
    let frame = scene.frame();
    tracing::info!(
        label,
        channels = ?damage.channels,
        vertices,
        of = frame.buffers.vertex_count(),
        uniform_bytes = frame.uniforms.as_bytes().len(),
        "upload"
    );
}
