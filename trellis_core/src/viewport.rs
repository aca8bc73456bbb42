// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Screen resolution and the derived UI scale.

use kurbo::{Point, Rect, Size};

/// The resolution UI art is authored against.
pub const REFERENCE_RESOLUTION: Size = Size::new(1920.0, 1080.0);

/// The drawable area that root nodes are laid out against.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Viewport {
    /// Viewport size in pixels.
    pub size: Size,
    /// User-configured multiplier applied on top of the resolution ratio.
    pub hud_scale: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            size: REFERENCE_RESOLUTION,
            hud_scale: 1.0,
        }
    }
}

impl Viewport {
    /// Creates a viewport of the given size with a HUD scale of 1.
    #[must_use]
    pub const fn new(size: Size) -> Self {
        Self {
            size,
            hud_scale: 1.0,
        }
    }

    /// Returns a copy with the given HUD scale.
    ///
    /// Non-positive values are clamped to a small positive floor.
    #[must_use]
    pub fn with_hud_scale(mut self, hud_scale: f64) -> Self {
        if hud_scale <= 0.0 {
            log::warn!("hud scale {hud_scale} is not positive; clamping");
            self.hud_scale = f64::EPSILON;
        } else {
            self.hud_scale = hud_scale;
        }
        self
    }

    /// Horizontal ratio against [`REFERENCE_RESOLUTION`].
    #[must_use]
    pub fn x_scale(&self) -> f64 {
        self.size.width / REFERENCE_RESOLUTION.width
    }

    /// Vertical ratio against [`REFERENCE_RESOLUTION`].
    #[must_use]
    pub fn y_scale(&self) -> f64 {
        self.size.height / REFERENCE_RESOLUTION.height
    }

    /// The mean of the horizontal and vertical ratios, times the HUD scale.
    ///
    /// Sprite borders and other pixel-authored chrome scale by this.
    #[must_use]
    pub fn ui_scale(&self) -> f64 {
        (self.x_scale() + self.y_scale()) / 2.0 * self.hud_scale
    }

    /// The viewport as a rectangle at the origin.
    #[must_use]
    pub fn rect(&self) -> Rect {
        Rect::from_origin_size(Point::ORIGIN, self.size)
    }
}
