// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layout groups.
//!
//! A [`LayoutGroup`] attached to a node arranges that node's children along
//! one [`Axis`](crate::geometry::Axis). Arranging only writes the children's
//! anchor, pivot, along-axis offsets, and (when stretching) along-axis
//! relative size; everything else stays under the caller's control.
//!
//! # Stretching
//!
//! With `stretch` on, the group computes one factor for the whole row:
//!
//! ```text
//!   min_total = sum of child min sizes (fixed children: their size)
//!   total     = sum of natural sizes + (n - 1) * spacing
//!   factor    = 1                                   if total <= 0
//!                                                   or min_total >= group
//!             = (group - min_total) / (total - min_total)   otherwise
//! ```
//!
//! and every non-fixed child gets `clamp(natural * factor, min, max)`, with
//! spacing scaled by the same factor.
//!
//! # Dirty tracking
//!
//! A group goes dirty when its own size changes, when a child is added,
//! removed, or reordered, or when a child's size or scale changes.
//! [`NodeStore::update_layout`](crate::node::NodeStore::update_layout)
//! re-arranges dirty groups once per tick, parents first.

mod group;

pub use group::{LayoutGroup, LayoutOutcome, StretchMode};
