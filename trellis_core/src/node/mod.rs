// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Node tree data model.
//!
//! A *node* is a positioned rectangle in the UI hierarchy. Each node has:
//!
//! - An identity ([`NodeId`]): a generational handle that becomes stale when
//!   the node is destroyed, preventing use-after-free bugs at the API level.
//! - Topology: parent, first-child, and sibling links forming an ordered tree.
//!   Destroying a node orphans its children instead of destroying them.
//! - **Local properties** set by the caller: relative, absolute, and
//!   screen-space offsets; relative or absolute size with min/max clamps;
//!   [`Anchor`](crate::geometry::Anchor) and [`Pivot`](crate::geometry::Pivot);
//!   local scale; [`ScaleBasis`](crate::geometry::ScaleBasis); and
//!   [`NodeFlags`].
//! - **Computed properties** produced lazily: the non-scaled size, the
//!   inherited scale, and the absolute rectangle.
//!
//! # Placement
//!
//! A node's rectangle is derived from its parent's (or, for roots, the
//! [`Viewport`](crate::viewport::Viewport)):
//!
//! ```text
//!   non_scaled = clamp(scale_basis(parent_non_scaled) * relative_size, min, max)
//!   scale      = parent_scale * local_scale        (roots: global * local)
//!   size       = non_scaled * scale
//!   origin     = anchor point on parent rect
//!              + pivot offset for size
//!              + away_from_anchor(absolute_offset)
//!              + away_from_anchor(parent size * relative_offset)
//!              + screen_offset
//! ```
//!
//! Fixed-size nodes keep their non-scaled size when the parent resizes.
//!
//! # Dirty tracking
//!
//! Mutations mark the `GEOMETRY` channel (see [`dirty`](crate::dirty)) with
//! eager propagation, so a parent change invalidates the whole subtree.
//! Nothing is recomputed until a rectangle is read.

mod evaluate;
mod id;
mod spec;
mod store;
mod traverse;

pub use evaluate::FrameChanges;
pub use id::{INVALID, NodeId};
pub use spec::{NodeFlags, NodeSpec, SizeSpec};
pub(crate) use spec::SizeRequest;
pub use store::NodeStore;
pub(crate) use store::non_empty;
pub use traverse::{Ancestors, Children};
