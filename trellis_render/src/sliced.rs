// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Nine-slice scaling.
//!
//! The source region is cut into a 3x3 grid by four border widths. Corners
//! keep their aspect, edges stretch along one axis and the center along
//! both:
//!
//! ```text
//!   +----+-----------+----+
//!   | 0  |     1     | 2  |   top
//!   +----+-----------+----+
//!   | 3  |     4     | 5  |
//!   +----+-----------+----+
//!   | 6  |     7     | 8  |   bottom
//!   +----+-----------+----+
//!   left              right
//! ```
//!
//! Borders shrink uniformly when the target is too small to hold them and
//! never grow past the UI scale.

use kurbo::{Insets, Rect, Size};

use crate::sprite::Sprite;
use crate::surface::{Color, RenderSurface};

/// Nine-slice configuration for one sprite.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SlicedSprite {
    /// Border widths in source pixels. `x0` is left, `y0` top, `x1` right,
    /// `y1` bottom.
    pub borders: Insets,
    /// Lower bound for the border scale.
    pub min_border_scale: f64,
    /// Upper bound for the border scale.
    pub max_border_scale: f64,
    /// Scale the borders by `min(W / source_w, H / source_h)` instead of the
    /// border scale, keeping the frame's proportions.
    pub maintain_border_aspect_ratio: bool,
}

impl Default for SlicedSprite {
    fn default() -> Self {
        Self::new(Insets::ZERO)
    }
}

impl SlicedSprite {
    /// Slices with the given borders and the default scale range `0..=1`.
    #[must_use]
    pub const fn new(borders: Insets) -> Self {
        Self {
            borders,
            min_border_scale: 0.0,
            max_border_scale: 1.0,
            maintain_border_aspect_ratio: false,
        }
    }

    /// Equal borders on every side.
    #[must_use]
    pub const fn uniform(border: f64) -> Self {
        Self::new(Insets::uniform(border))
    }

    /// Sets the border scale range. Inverted or negative ranges are fixed up
    /// by [`sanitized`](Self::sanitized).
    #[must_use]
    pub fn with_border_scale_range(mut self, min: f64, max: f64) -> Self {
        self.min_border_scale = min;
        self.max_border_scale = max;
        self.sanitized()
    }

    /// Sets whether the border aspect ratio is preserved.
    #[must_use]
    pub const fn with_maintain_border_aspect_ratio(mut self, on: bool) -> Self {
        self.maintain_border_aspect_ratio = on;
        self
    }

    /// Clamps negative borders and scale bounds to zero and orders the scale
    /// range.
    #[must_use]
    pub fn sanitized(mut self) -> Self {
        let b = &mut self.borders;
        if b.x0 < 0.0 || b.y0 < 0.0 || b.x1 < 0.0 || b.y1 < 0.0 {
            log::warn!("negative slice border {b:?} clamped to zero");
            b.x0 = b.x0.max(0.0);
            b.y0 = b.y0.max(0.0);
            b.x1 = b.x1.max(0.0);
            b.y1 = b.y1.max(0.0);
        }
        if self.min_border_scale < 0.0 {
            log::warn!("negative min border scale {} clamped to zero", self.min_border_scale);
            self.min_border_scale = 0.0;
        }
        if self.max_border_scale < self.min_border_scale {
            log::warn!(
                "max border scale {} below min {}; using min",
                self.max_border_scale,
                self.min_border_scale
            );
            self.max_border_scale = self.min_border_scale;
        }
        self
    }

    /// Scale applied to the borders when drawing into `target`.
    #[must_use]
    pub fn border_scale(&self, target: Size, ui_scale: f64) -> f64 {
        let b = self.borders;
        let sx = fit(target.width, b.x0 + b.x1);
        let sy = fit(target.height, b.y0 + b.y1);
        sx.min(sy)
            .min(ui_scale)
            .max(self.min_border_scale)
            .min(self.max_border_scale)
    }

    /// Scale actually used for `target`, honoring
    /// [`maintain_border_aspect_ratio`](Self::maintain_border_aspect_ratio).
    #[must_use]
    pub fn effective_scale(&self, source: Size, target: Size, ui_scale: f64) -> f64 {
        if self.maintain_border_aspect_ratio && source.width > 0.0 && source.height > 0.0 {
            (target.width / source.width).min(target.height / source.height)
        } else {
            self.border_scale(target, ui_scale)
        }
    }

    /// The nine source regions, row by row.
    #[must_use]
    pub fn slice_rects(&self, source: Rect) -> [Rect; 9] {
        let b = self.borders;
        let xs = [source.x0, source.x0 + b.x0, source.x1 - b.x1, source.x1];
        let ys = [source.y0, source.y0 + b.y0, source.y1 - b.y1, source.y1];
        grid(xs, ys)
    }

    /// The nine destination regions inside `dest` at border scale `scale`,
    /// row by row. Each scaled border is capped at half of `dest` on its
    /// axis, so no slice leaves `dest` and the center never goes negative.
    #[must_use]
    pub fn dest_rects(&self, dest: Rect, scale: f64) -> [Rect; 9] {
        let b = self.borders;
        let half_w = dest.width().max(0.0) / 2.0;
        let half_h = dest.height().max(0.0) / 2.0;
        let (left, right) = ((b.x0 * scale).min(half_w), (b.x1 * scale).min(half_w));
        let (top, bottom) = ((b.y0 * scale).min(half_h), (b.y1 * scale).min(half_h));
        let center_w = (dest.width() - left - right).max(0.0);
        let center_h = (dest.height() - top - bottom).max(0.0);
        let xs = [
            dest.x0,
            dest.x0 + left,
            dest.x0 + left + center_w,
            dest.x0 + left + center_w + right,
        ];
        let ys = [
            dest.y0,
            dest.y0 + top,
            dest.y0 + top + center_h,
            dest.y0 + top + center_h + bottom,
        ];
        grid(xs, ys)
    }

    /// Draws `sprite` into `dest`. Slices with no area are skipped, and so is
    /// everything if the image is not loaded.
    pub fn draw(
        &self,
        surface: &mut dyn RenderSurface,
        sprite: &Sprite,
        dest: Rect,
        tint: Color,
        ui_scale: f64,
    ) {
        if surface.image_size(sprite.image).is_none() {
            return;
        }
        let scale = self.effective_scale(sprite.source.size(), dest.size(), ui_scale);
        let sources = self.slice_rects(sprite.source);
        let dests = self.dest_rects(dest, scale);
        for (src, dst) in sources.into_iter().zip(dests) {
            if has_area(src) && has_area(dst) {
                surface.draw_region(sprite.image, src, dst, tint);
            }
        }
    }
}

/// `clamp(extent / border, 0, 1)`, or 1 without borders.
fn fit(extent: f64, border: f64) -> f64 {
    if border <= 0.0 {
        1.0
    } else {
        (extent / border).clamp(0.0, 1.0)
    }
}

fn grid(xs: [f64; 4], ys: [f64; 4]) -> [Rect; 9] {
    core::array::from_fn(|i| {
        let (row, col) = (i / 3, i % 3);
        Rect::new(xs[col], ys[row], xs[col + 1], ys[row + 1])
    })
}

fn has_area(r: Rect) -> bool {
    r.width() > 0.0 && r.height() > 0.0
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use kurbo::Vec2;

    use super::*;
    use crate::plan::{DrawOp, RenderPlan};
    use crate::surface::ImageId;

    fn sprite() -> Sprite {
        Sprite::new(ImageId(1), Rect::new(0.0, 0.0, 30.0, 30.0))
    }

    fn plan() -> RenderPlan {
        let mut plan = RenderPlan::new();
        plan.register_image(ImageId(1), Size::new(64.0, 64.0));
        plan
    }

    fn regions(plan: &RenderPlan) -> Vec<(Rect, Rect)> {
        plan.ops()
            .iter()
            .filter_map(|op| match *op {
                DrawOp::Region { source, dest, .. } => Some((source, dest)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn border_scale_is_monotonic_up_to_max() {
        let s = SlicedSprite::uniform(10.0).with_border_scale_range(0.0, 0.8);
        let mut last = 0.0;
        for i in 0..200 {
            let w = f64::from(i) * 0.25;
            let scale = s.border_scale(Size::new(w, w), 1.0);
            assert!(scale >= last, "w {w}: {scale} < {last}");
            assert!(scale <= 0.8);
            last = scale;
        }
        assert!((last - 0.8).abs() < 1e-12);
    }

    #[test]
    fn border_scale_respects_ui_scale_and_min() {
        let s = SlicedSprite::uniform(10.0).with_border_scale_range(0.25, 1.0);
        assert!((s.border_scale(Size::new(100.0, 100.0), 0.5) - 0.5).abs() < 1e-12);
        assert!((s.border_scale(Size::new(1.0, 1.0), 1.0) - 0.25).abs() < 1e-12);
    }

    #[test]
    fn no_negative_slices_for_any_target() {
        let s = SlicedSprite::uniform(10.0).with_border_scale_range(0.5, 1.0);
        for i in 0..60 {
            let w = f64::from(i);
            let target = Rect::new(0.0, 0.0, w, w * 0.5);
            let scale = s.border_scale(target.size(), 1.0);
            for r in s.dest_rects(target, scale) {
                assert!(r.width() >= 0.0 && r.height() >= 0.0, "{r:?}");
            }
        }
    }

    #[test]
    fn source_sized_target_is_one_to_one() {
        let s = SlicedSprite::uniform(10.0);
        let mut plan = plan();
        let dest = Rect::new(100.0, 100.0, 130.0, 130.0);
        s.draw(&mut plan, &sprite(), dest, Color::WHITE, 1.0);
        let drawn = regions(&plan);
        assert_eq!(drawn.len(), 9);
        for (src, dst) in drawn {
            assert_eq!(dst, src + Vec2::new(100.0, 100.0));
        }
    }

    #[test]
    fn stretched_center_and_fixed_corners() {
        let s = SlicedSprite::uniform(10.0);
        let dests = s.dest_rects(Rect::new(0.0, 0.0, 100.0, 50.0), 1.0);
        assert_eq!(dests[0], Rect::new(0.0, 0.0, 10.0, 10.0));
        assert_eq!(dests[4], Rect::new(10.0, 10.0, 90.0, 40.0));
        assert_eq!(dests[8], Rect::new(90.0, 40.0, 100.0, 50.0));
    }

    #[test]
    fn squashed_target_skips_center() {
        let s = SlicedSprite::uniform(10.0);
        let mut plan = plan();
        // Border scale 0.5: 10px borders fill the 10px target exactly.
        s.draw(&mut plan, &sprite(), Rect::new(0.0, 0.0, 10.0, 10.0), Color::WHITE, 1.0);
        let drawn = regions(&plan);
        assert_eq!(drawn.len(), 4, "{drawn:?}");
        assert_eq!(drawn[0].1, Rect::new(0.0, 0.0, 5.0, 5.0));
    }

    #[test]
    fn min_border_scale_stays_inside_target() {
        let s = SlicedSprite::uniform(10.0).with_border_scale_range(1.0, 1.0);
        let dest = Rect::new(50.0, 50.0, 62.0, 58.0);
        let scale = s.border_scale(dest.size(), 1.0);
        assert!((scale - 1.0).abs() < 1e-12);
        let dests = s.dest_rects(dest, scale);
        for r in dests {
            assert!(
                r.x0 >= dest.x0 && r.y0 >= dest.y0 && r.x1 <= dest.x1 && r.y1 <= dest.y1,
                "{r:?} outside {dest:?}"
            );
        }
        assert_eq!(dests[0], Rect::new(50.0, 50.0, 56.0, 54.0));
        assert_eq!(dests[8], Rect::new(56.0, 54.0, 62.0, 58.0));

        let mut plan = plan();
        s.draw(&mut plan, &sprite(), dest, Color::WHITE, 1.0);
        assert_eq!(regions(&plan).len(), 4);
    }

    #[test]
    fn maintain_aspect_uses_uniform_factor() {
        let s = SlicedSprite::uniform(10.0).with_maintain_border_aspect_ratio(true);
        let scale = s.effective_scale(Size::new(30.0, 30.0), Size::new(60.0, 90.0), 1.0);
        assert!((scale - 2.0).abs() < 1e-12);
    }

    #[test]
    fn unloaded_image_draws_nothing() {
        let s = SlicedSprite::uniform(10.0);
        let mut plan = RenderPlan::new();
        s.draw(&mut plan, &sprite(), Rect::new(0.0, 0.0, 30.0, 30.0), Color::WHITE, 1.0);
        assert!(plan.ops().is_empty());
    }
}
