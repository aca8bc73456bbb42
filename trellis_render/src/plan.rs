// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Render plan: a recorded sequence of draw operations for one frame.

use alloc::collections::BTreeMap;
use alloc::vec::Vec;

use kurbo::{Point, Rect, Size};

use crate::surface::{Color, ImageId, RenderSurface};

/// A single recorded draw operation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DrawOp {
    /// [`RenderSurface::draw_region`].
    Region {
        /// Image drawn.
        image: ImageId,
        /// Source region in image pixels.
        source: Rect,
        /// Destination in viewport pixels.
        dest: Rect,
        /// Tint.
        tint: Color,
    },
    /// [`RenderSurface::draw_line`].
    Line {
        /// Start point.
        p0: Point,
        /// End point.
        p1: Point,
        /// Line color.
        color: Color,
        /// Width in pixels.
        thickness: f64,
    },
    /// [`RenderSurface::push_clip_rect`], already intersected with the
    /// enclosing clip.
    PushClip(Rect),
    /// [`RenderSurface::pop_clip_rect`].
    PopClip,
}

/// A [`RenderSurface`] that records instead of drawing.
///
/// Backends replay the operations into native draw calls; tests inspect
/// them. Image sizes are registered up front; unregistered images count as
/// not loaded.
#[derive(Clone, Debug, Default)]
pub struct RenderPlan {
    ops: Vec<DrawOp>,
    clips: Vec<Rect>,
    images: BTreeMap<ImageId, Size>,
}

impl RenderPlan {
    /// Creates an empty plan with no images.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes `image` known with the given pixel size.
    pub fn register_image(&mut self, image: ImageId, size: Size) {
        self.images.insert(image, size);
    }

    /// Forgets `image`; it is treated as not loaded from now on.
    pub fn unregister_image(&mut self, image: ImageId) {
        self.images.remove(&image);
    }

    /// Recorded operations in order.
    #[must_use]
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Current clip, if any.
    #[must_use]
    pub fn clip(&self) -> Option<Rect> {
        self.clips.last().copied()
    }

    /// Clears the recorded operations for reuse. Registered images stay.
    pub fn clear(&mut self) {
        self.ops.clear();
        self.clips.clear();
    }
}

impl RenderSurface for RenderPlan {
    fn draw_region(&mut self, image: ImageId, source: Rect, dest: Rect, tint: Color) {
        self.ops.push(DrawOp::Region {
            image,
            source,
            dest,
            tint,
        });
    }

    fn draw_line(&mut self, p0: Point, p1: Point, color: Color, thickness: f64) {
        self.ops.push(DrawOp::Line {
            p0,
            p1,
            color,
            thickness,
        });
    }

    fn push_clip_rect(&mut self, rect: Rect) {
        let clip = match self.clips.last() {
            Some(outer) => outer.intersect(rect),
            None => rect,
        };
        self.clips.push(clip);
        self.ops.push(DrawOp::PushClip(clip));
    }

    fn pop_clip_rect(&mut self) {
        if self.clips.pop().is_some() {
            self.ops.push(DrawOp::PopClip);
        } else {
            log::warn!("pop_clip_rect without a matching push");
        }
    }

    fn image_size(&self, image: ImageId) -> Option<Size> {
        self.images.get(&image).copied()
    }
}
