// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The drawing contract a backend implements.

use kurbo::{Point, Rect, Size};

/// Opaque handle to a backend-managed image.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ImageId(pub u32);

/// Linear RGBA tint, components in `0.0..=1.0`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Color {
    /// Red.
    pub r: f32,
    /// Green.
    pub g: f32,
    /// Blue.
    pub b: f32,
    /// Alpha.
    pub a: f32,
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl Color {
    /// Opaque white; draws images unchanged.
    pub const WHITE: Self = Self::rgba(1.0, 1.0, 1.0, 1.0);
    /// Fully transparent.
    pub const TRANSPARENT: Self = Self::rgba(0.0, 0.0, 0.0, 0.0);

    /// Creates a color.
    #[must_use]
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Same color with a different alpha.
    #[must_use]
    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// Component-wise product.
    #[must_use]
    pub fn modulate(self, other: Self) -> Self {
        Self::rgba(
            self.r * other.r,
            self.g * other.g,
            self.b * other.b,
            self.a * other.a,
        )
    }

    /// Returns whether drawing with this tint has no visible effect.
    #[must_use]
    pub fn is_invisible(self) -> bool {
        self.a <= 0.0
    }
}

/// Immediate-mode drawing target.
///
/// Coordinates are viewport pixels. Images are addressed by [`ImageId`];
/// an image that is not loaded yet reports no size and is skipped by every
/// drawing routine in this crate.
pub trait RenderSurface {
    /// Draws the `source` region of `image` stretched into `dest`.
    fn draw_region(&mut self, image: ImageId, source: Rect, dest: Rect, tint: Color);

    /// Draws a line segment.
    fn draw_line(&mut self, p0: Point, p1: Point, color: Color, thickness: f64);

    /// Restricts drawing to `rect` intersected with the current clip.
    fn push_clip_rect(&mut self, rect: Rect);

    /// Restores the previous clip.
    fn pop_clip_rect(&mut self);

    /// Pixel size of `image`, or `None` while it is not loaded.
    fn image_size(&self, image: ImageId) -> Option<Size>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modulate_multiplies_components() {
        let c = Color::rgba(0.5, 1.0, 0.25, 1.0).modulate(Color::rgba(0.5, 0.5, 1.0, 0.5));
        assert_eq!(c, Color::rgba(0.25, 0.5, 0.25, 0.5));
        assert!(Color::TRANSPARENT.is_invisible());
        assert!(!Color::WHITE.with_alpha(0.1).is_invisible());
    }
}
