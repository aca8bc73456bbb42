// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dirty-tracking channel constants.
//!
//! Trellis uses multi-channel dirty tracking (via [`understory_dirty`]) to
//! defer geometry work until a rectangle is actually read. Each channel
//! represents an independent category of change.
//!
//! # Propagation semantics
//!
//! - **Propagating**: [`GEOMETRY`] uses
//!   [`EagerPolicy`](understory_dirty::EagerPolicy) and has dependency edges
//!   from child to parent. Any offset, size, anchor, pivot, or scale mutation
//!   on a node marks its whole subtree, because a child's rectangle is derived
//!   from its parent's rectangle and inherited scale.
//!
//! - **Structural**: [`TOPOLOGY`] is marked on topology mutations
//!   (create/destroy, reparent, reorder). It triggers a traversal-order
//!   rebuild but does not propagate to descendants.
//!
//! # Consumption
//!
//! Geometry is drained lazily by the first rectangle read after a mutation
//! (see [`NodeStore::rect`](crate::node::NodeStore::rect)), and
//! [`NodeStore::evaluate`](crate::node::NodeStore::evaluate) surfaces the
//! accumulated notifications as [`FrameChanges`](crate::node::FrameChanges).

use understory_dirty::Channel;

/// Offset, size, anchor, pivot, or scale changed; the node and all of its
/// descendants need their rectangles recomputed.
pub const GEOMETRY: Channel = Channel::new(0);

/// Tree topology changed; triggers a traversal order rebuild.
pub const TOPOLOGY: Channel = Channel::new(1);
