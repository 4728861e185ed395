// Copyright 2025 the Mosaic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The host callback boundary.

use kurbo::Size;

use crate::config::{SceneConfig, SceneError, check_viewport, effective_pixel_ratio};
use crate::scene::Scene;

/// Callbacks a host runtime invokes on its frame loop.
///
/// All three run on the host's render thread; a render must not start until
/// the current callback has returned.
pub trait FrameDriver {
    /// Called once before the first frame.
    fn on_init(&mut self) -> Result<(), SceneError>;

    /// Called once per displayed frame with seconds since start.
    fn on_update(&mut self, elapsed_secs: f64);

    /// Called when the viewport or device pixel ratio changes.
    fn on_resize(&mut self, viewport: Size, device_pixel_ratio: f64) -> Result<(), SceneError>;
}

/// A [`FrameDriver`] backed by a [`Scene`] created on init.
#[derive(Debug)]
pub struct SceneDriver {
    config: SceneConfig,
    scene: Option<Scene>,
}

impl SceneDriver {
    /// A driver that will build its scene from `config`.
    pub fn new(config: SceneConfig) -> Self {
        Self {
            config,
            scene: None,
        }
    }

    /// The scene, once initialized.
    pub fn scene(&self) -> Option<&Scene> {
        self.scene.as_ref()
    }

    /// Mutable access to the scene, once initialized.
    pub fn scene_mut(&mut self) -> Option<&mut Scene> {
        self.scene.as_mut()
    }
}

impl FrameDriver for SceneDriver {
    fn on_init(&mut self) -> Result<(), SceneError> {
        if self.scene.is_some() {
            tracing::warn!("scene already initialized; ignoring repeated init");
            return Ok(());
        }
        self.scene = Some(Scene::init(&self.config)?);
        Ok(())
    }

    fn on_update(&mut self, elapsed_secs: f64) {
        if let Some(scene) = &mut self.scene {
            scene.tick(elapsed_secs);
        }
    }

    fn on_resize(&mut self, viewport: Size, device_pixel_ratio: f64) -> Result<(), SceneError> {
        match &mut self.scene {
            Some(scene) => {
                scene.resize(viewport, device_pixel_ratio)?;
            }
            None => {
                check_viewport(viewport)?;
                effective_pixel_ratio(device_pixel_ratio)?;
            }
        }
        self.config.viewport = viewport;
        self.config.device_pixel_ratio = device_pixel_ratio;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HASH: &str = "0x0000000000000000000000000000000000000000000000000000000000000000";

    #[test]
    fn update_before_init_is_ignored() {
        let mut d = SceneDriver::new(SceneConfig::new().with_hash(HASH));
        d.on_update(1.0);
        assert!(d.scene().is_none());
    }

    #[test]
    fn resize_before_init_sizes_the_scene() {
        let mut d = SceneDriver::new(SceneConfig::new().with_hash(HASH));
        d.on_resize(Size::new(640.0, 480.0), 1.0).expect("valid viewport");
        d.on_init().expect("valid config");
        let scene = d.scene().expect("initialized");
        assert_eq!(scene.viewport(), Size::new(640.0, 480.0));
        assert_eq!(scene.tree().root_rect().width(), 640.0);
    }

    #[test]
    fn lifecycle_drives_the_scene() {
        let mut d = SceneDriver::new(SceneConfig::new().with_hash(HASH));
        d.on_init().expect("valid config");
        let first = d.scene().map(|s| s.tree().root_rect());
        d.on_init().expect("repeat init is a no-op");
        assert_eq!(d.scene().map(|s| s.tree().root_rect()), first);

        d.on_update(0.016);
        d.on_update(0.033);
        assert_eq!(d.scene().map(Scene::frames), Some(2));

        d.on_resize(Size::new(300.0, 300.0), 2.0).expect("valid viewport");
        assert_eq!(d.scene().map(Scene::pixel_ratio), Some(2.0));
        assert!(d.on_resize(Size::new(300.0, -1.0), 1.0).is_err());
        assert_eq!(d.scene().map(Scene::viewport), Some(Size::new(300.0, 300.0)));
    }
}
