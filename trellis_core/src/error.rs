// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recoverable error types.
//!
//! Hierarchy and subscription mistakes that a caller can reasonably trigger
//! at runtime are reported through these enums. Stale [`NodeId`] handles are
//! programming errors and panic instead.

use crate::node::NodeId;
use crate::overlay::OverlayId;

/// An invalid tree mutation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    /// A node was asked to become its own parent.
    #[error("{0:?} cannot be its own parent")]
    SelfParent(NodeId),
    /// The requested parent is a descendant of the child.
    #[error("cannot parent {child:?} under its descendant {parent:?}")]
    Cycle {
        /// The node being moved.
        child: NodeId,
        /// The rejected parent.
        parent: NodeId,
    },
    /// The node has no parent, so it has no sibling position.
    #[error("{0:?} has no parent")]
    Detached(NodeId),
    /// A sibling index past the end of the child list.
    #[error("child index {index} out of range (len {len})")]
    IndexOutOfRange {
        /// The requested index.
        index: usize,
        /// The number of children available at that moment.
        len: usize,
    },
}

/// An invalid overlay subscription request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum OverlayError {
    /// The owner already has a live subscription.
    #[error("{0:?} already has an overlay subscription")]
    AlreadySubscribed(NodeId),
    /// The overlay content would be drawn inside its own injection.
    #[error("overlay content {content:?} is an ancestor of its owner {owner:?}")]
    ContentIsAncestor {
        /// The subscribing node.
        owner: NodeId,
        /// The overlay content root.
        content: NodeId,
    },
    /// No subscription exists for this id (never created or already dropped).
    #[error("unknown overlay {0:?}")]
    UnknownOverlay(OverlayId),
}
