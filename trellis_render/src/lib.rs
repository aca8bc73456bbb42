// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sprites, nine-slice scaling and render plans for trellis.
//!
//! This crate sits between [`trellis_core`]'s draw list and a backend's
//! drawing API. It defines:
//!
//! - [`RenderSurface`]: the drawing contract a backend implements
//! - [`Sprite`], [`UiSprite`], [`SpriteMode`]: image regions and how they
//!   fill a rectangle (stretched, tiled or sliced)
//! - [`SlicedSprite`]: nine-slice border scaling
//! - [`RenderPlan`]: a recording surface, for backends that replay draw
//!   calls later and for tests
//! - [`NodePainter`]: a [`Painter`](trellis_core::backend::Painter) that
//!   draws each node's [`NodeVisual`] with the tint of its interaction state

#![no_std]
#![cfg_attr(docsrs, feature(doc_cfg))]

extern crate alloc;

mod painter;
mod plan;
mod sliced;
mod sprite;
mod surface;

pub use painter::{NodePainter, NodeVisual, VisualTable};
pub use plan::{DrawOp, RenderPlan};
pub use sliced::SlicedSprite;
pub use sprite::{Sprite, SpriteMode, UiSprite};
pub use surface::{Color, ImageId, RenderSurface};
