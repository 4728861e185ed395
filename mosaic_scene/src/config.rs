// Copyright 2025 the Mosaic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scene configuration and errors.

use kurbo::Size;
use mosaic_random::SeedError;
use mosaic_tile_tree::TreeError;

/// Device pixel ratios above this are rendered at this ratio.
pub const MAX_PIXEL_RATIO: f64 = 2.0;

/// Host-supplied inputs for [`crate::Scene::init`].
#[derive(Clone, Debug, PartialEq)]
pub struct SceneConfig {
    /// Seed hash; a fresh, non-reproducible one is generated when absent.
    pub hash: Option<String>,
    /// Viewport size in CSS pixels.
    pub viewport: Size,
    /// Device pixel ratio reported by the host.
    pub device_pixel_ratio: f64,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            hash: None,
            viewport: Size::new(1280.0, 720.0),
            device_pixel_ratio: 1.0,
        }
    }
}

impl SceneConfig {
    /// Create the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed from `hash`.
    pub fn with_hash(mut self, hash: impl Into<String>) -> Self {
        self.hash = Some(hash.into());
        self
    }

    /// Set the initial viewport.
    pub fn with_viewport(mut self, viewport: Size) -> Self {
        self.viewport = viewport;
        self
    }

    /// Set the device pixel ratio.
    pub fn with_device_pixel_ratio(mut self, ratio: f64) -> Self {
        self.device_pixel_ratio = ratio;
        self
    }
}

/// Pixel ratio actually rendered at, or an error for unusable host values.
pub(crate) fn effective_pixel_ratio(device: f64) -> Result<f64, SceneError> {
    if !(device.is_finite() && device > 0.0) {
        return Err(SceneError::InvalidPixelRatio(device));
    }
    Ok(device.min(MAX_PIXEL_RATIO))
}

pub(crate) fn check_viewport(viewport: Size) -> Result<(), SceneError> {
    let Size { width, height } = viewport;
    if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
        return Err(SceneError::InvalidViewport { width, height });
    }
    Ok(())
}

/// Errors surfaced to the host.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum SceneError {
    /// The seed hash is malformed.
    #[error(transparent)]
    Seed(#[from] SeedError),
    /// The tree rejected its configuration.
    #[error(transparent)]
    Tree(#[from] TreeError),
    /// The viewport has a non-finite or non-positive extent.
    #[error("viewport must have finite, positive extent; got {width} x {height}")]
    InvalidViewport {
        /// Viewport width.
        width: f64,
        /// Viewport height.
        height: f64,
    },
    /// The device pixel ratio is not a finite positive number.
    #[error("device pixel ratio must be finite and positive; got {0}")]
    InvalidPixelRatio(f64),
    /// The drawn division does not fit a tree depth.
    #[error("drawn division {0} is not a valid tree depth")]
    InvalidDivision(i64),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixel_ratio_is_capped() {
        assert_eq!(effective_pixel_ratio(1.0), Ok(1.0));
        assert_eq!(effective_pixel_ratio(3.0), Ok(MAX_PIXEL_RATIO));
        assert_eq!(
            effective_pixel_ratio(0.0),
            Err(SceneError::InvalidPixelRatio(0.0))
        );
        assert!(effective_pixel_ratio(f64::NAN).is_err());
    }

    #[test]
    fn viewport_must_be_positive() {
        assert!(check_viewport(Size::new(1.0, 1.0)).is_ok());
        assert_eq!(
            check_viewport(Size::new(0.0, 10.0)),
            Err(SceneError::InvalidViewport {
                width: 0.0,
                height: 10.0
            })
        );
    }

    #[test]
    fn builder_sets_fields() {
        let c = SceneConfig::new()
            .with_hash("0xabc")
            .with_viewport(Size::new(300.0, 200.0))
            .with_device_pixel_ratio(1.5);
        assert_eq!(c.hash.as_deref(), Some("0xabc"));
        assert_eq!(c.viewport, Size::new(300.0, 200.0));
        assert_eq!(c.device_pixel_ratio, 1.5);
    }
}
