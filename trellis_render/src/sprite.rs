// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sprites and how they fill a rectangle.

use kurbo::{Rect, Size};

use crate::sliced::SlicedSprite;
use crate::surface::{Color, ImageId, RenderSurface};

/// A region of an image.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Sprite {
    /// The image.
    pub image: ImageId,
    /// Source region in image pixels.
    pub source: Rect,
}

impl Sprite {
    /// Creates a sprite.
    #[must_use]
    pub const fn new(image: ImageId, source: Rect) -> Self {
        Self { image, source }
    }
}

/// How a sprite fills its destination.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SpriteMode {
    /// Scaled to the destination.
    Stretched {
        /// Scale uniformly by the smaller ratio and center.
        maintain_aspect_ratio: bool,
    },
    /// Repeated at source size; the last row and column are cropped.
    Tiled,
    /// Nine-slice scaled.
    Sliced(SlicedSprite),
}

impl Default for SpriteMode {
    fn default() -> Self {
        Self::Stretched {
            maintain_aspect_ratio: false,
        }
    }
}

/// A sprite with a fill mode, as attached to a node.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UiSprite {
    /// The sprite.
    pub sprite: Sprite,
    /// Fill mode.
    pub mode: SpriteMode,
}

impl UiSprite {
    /// A stretched sprite.
    #[must_use]
    pub fn stretched(sprite: Sprite) -> Self {
        Self {
            sprite,
            mode: SpriteMode::default(),
        }
    }

    /// A tiled sprite.
    #[must_use]
    pub fn tiled(sprite: Sprite) -> Self {
        Self {
            sprite,
            mode: SpriteMode::Tiled,
        }
    }

    /// A nine-slice sprite.
    #[must_use]
    pub fn sliced(sprite: Sprite, slices: SlicedSprite) -> Self {
        Self {
            sprite,
            mode: SpriteMode::Sliced(slices.sanitized()),
        }
    }

    /// Draws into `dest`. Does nothing while the image is not loaded.
    pub fn draw(&self, surface: &mut dyn RenderSurface, dest: Rect, tint: Color, ui_scale: f64) {
        if surface.image_size(self.sprite.image).is_none() {
            log::trace!("{:?} not loaded; skipped", self.sprite.image);
            return;
        }
        match self.mode {
            SpriteMode::Stretched {
                maintain_aspect_ratio,
            } => {
                let dest = if maintain_aspect_ratio {
                    fit_centered(self.sprite.source.size(), dest)
                } else {
                    dest
                };
                if dest.width() > 0.0 && dest.height() > 0.0 {
                    surface.draw_region(self.sprite.image, self.sprite.source, dest, tint);
                }
            }
            SpriteMode::Tiled => draw_tiled(surface, &self.sprite, dest, tint),
            SpriteMode::Sliced(slices) => slices.draw(surface, &self.sprite, dest, tint, ui_scale),
        }
    }
}

/// Largest rectangle with the aspect of `source` centered in `dest`.
fn fit_centered(source: Size, dest: Rect) -> Rect {
    if source.width <= 0.0 || source.height <= 0.0 {
        return dest;
    }
    let scale = (dest.width() / source.width).min(dest.height() / source.height);
    let size = Size::new(source.width * scale, source.height * scale);
    Rect::from_center_size(dest.center(), size)
}

fn draw_tiled(surface: &mut dyn RenderSurface, sprite: &Sprite, dest: Rect, tint: Color) {
    let tile = sprite.source.size();
    if tile.width <= 0.0 || tile.height <= 0.0 {
        return;
    }
    let mut y = dest.y0;
    while y < dest.y1 {
        let h = tile.height.min(dest.y1 - y);
        let mut x = dest.x0;
        while x < dest.x1 {
            let w = tile.width.min(dest.x1 - x);
            let source = Rect::new(
                sprite.source.x0,
                sprite.source.y0,
                sprite.source.x0 + w,
                sprite.source.y0 + h,
            );
            surface.draw_region(sprite.image, source, Rect::new(x, y, x + w, y + h), tint);
            x += tile.width;
        }
        y += tile.height;
    }
}
