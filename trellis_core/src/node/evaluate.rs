// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Geometry refresh and change tracking.
//!
//! Refresh follows a drain-recompute pattern:
//!
//! 1. **TOPOLOGY**: if the tree changed shape, rebuild the depth-first
//!    pre-order traversal.
//! 2. **GEOMETRY**: drain the affected slots, then walk the traversal order
//!    and recompute each stale node from its (already fresh) parent:
//!    inherited scale, non-scaled size, and the placed rectangle.
//!
//! Refresh runs lazily from [`NodeStore::rect`] and friends.
//! [`NodeStore::evaluate`] refreshes and then hands over the notifications
//! accumulated since the previous call as a [`FrameChanges`].
//!
//! [`FrameChanges`] uses raw slot indices (`u32`) rather than [`NodeId`]
//! handles so consumers can index directly via the `*_at()` accessors.
//!
//! [`NodeId`]: super::NodeId

use alloc::vec::Vec;

use kurbo::{Rect, Size, Vec2};

use super::id::INVALID;
use super::spec::SizeRequest;
use super::store::NodeStore;
use crate::dirty;

/// The notifications produced by a single [`NodeStore::evaluate`] call.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FrameChanges {
    /// Nodes whose rectangle size changed.
    pub resized: Vec<u32>,
    /// Nodes whose inherited scale changed.
    pub rescaled: Vec<u32>,
    /// Nodes whose parent changed (including detach and orphaning).
    pub reparented: Vec<u32>,
    /// Nodes created since the last evaluate.
    pub added: Vec<u32>,
    /// Nodes destroyed since the last evaluate.
    pub removed: Vec<u32>,
    /// Whether the draw structure changed (topology, sibling order, draw
    /// order bands, or visibility).
    pub topology_changed: bool,
}

impl FrameChanges {
    /// Clears all change lists.
    pub fn clear(&mut self) {
        self.resized.clear();
        self.rescaled.clear();
        self.reparented.clear();
        self.added.clear();
        self.removed.clear();
        self.topology_changed = false;
    }

    /// Returns whether nothing changed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.resized.is_empty()
            && self.rescaled.is_empty()
            && self.reparented.is_empty()
            && self.added.is_empty()
            && self.removed.is_empty()
            && !self.topology_changed
    }

    /// Folds `other` into `self`, keeping every list sorted and unique.
    pub fn merge(&mut self, other: &Self) {
        for (dst, src) in [
            (&mut self.resized, &other.resized),
            (&mut self.rescaled, &other.rescaled),
            (&mut self.reparented, &other.reparented),
            (&mut self.added, &other.added),
            (&mut self.removed, &other.removed),
        ] {
            dst.extend_from_slice(src);
            dst.sort_unstable();
            dst.dedup();
        }
        self.topology_changed |= other.topology_changed;
    }
}

impl NodeStore {
    /// Brings all geometry up to date and returns the notifications
    /// accumulated since the previous call.
    pub fn evaluate(&mut self) -> FrameChanges {
        let mut changes = FrameChanges::default();
        self.evaluate_into(&mut changes);
        changes
    }

    /// Like [`evaluate`](Self::evaluate), but reuses a caller-provided buffer
    /// to avoid allocation.
    pub fn evaluate_into(&mut self, changes: &mut FrameChanges) {
        changes.clear();
        self.refresh();

        // Drain TOPOLOGY channel (just consume, changes are structural).
        let _: Vec<u32> = self
            .dirty
            .drain(dirty::TOPOLOGY)
            .deterministic()
            .run()
            .collect();
        changes.topology_changed = core::mem::take(&mut self.topology_pending);

        core::mem::swap(&mut self.pending_added, &mut changes.added);
        core::mem::swap(&mut self.pending_removed, &mut changes.removed);
        core::mem::swap(&mut self.pending_reparented, &mut changes.reparented);
        core::mem::swap(&mut self.pending_resized, &mut changes.resized);
        core::mem::swap(&mut self.pending_rescaled, &mut changes.rescaled);

        let alive = &self.alive;
        for list in [
            &mut changes.reparented,
            &mut changes.resized,
            &mut changes.rescaled,
            &mut changes.added,
        ] {
            list.sort_unstable();
            list.dedup();
            // Slots destroyed later in the frame only show up in `removed`.
            list.retain(|&idx| alive[idx as usize]);
        }
        changes.removed.sort_unstable();
        changes.removed.dedup();
    }

    /// Returns the current traversal order (depth-first pre-order, roots in
    /// slot order, children in sibling order).
    ///
    /// Only valid after a refresh (any geometry read or
    /// [`evaluate`](Self::evaluate)).
    #[must_use]
    pub fn traversal_order(&self) -> &[u32] {
        &self.traversal_order
    }

    /// Recomputes every stale node. Cheap when nothing is pending.
    pub(crate) fn refresh(&mut self) {
        if self.traversal_dirty {
            self.rebuild_traversal_order();
            self.traversal_dirty = false;
            self.topology_pending = true;
        }
        if !self.geometry_pending {
            return;
        }
        self.geometry_pending = false;

        let stale: Vec<u32> = self
            .dirty
            .drain(dirty::GEOMETRY)
            .affected()
            .deterministic()
            .run()
            .collect();
        if stale.is_empty() {
            return;
        }

        let mut marks = core::mem::take(&mut self.stale_scratch);
        marks.clear();
        marks.resize(self.len as usize, false);
        for idx in stale {
            if idx < self.len {
                marks[idx as usize] = true;
            }
        }
        // Walk in traversal order so parents are fresh before their children.
        for pos in 0..self.traversal_order.len() {
            let idx = self.traversal_order[pos];
            if marks[idx as usize] {
                self.recompute(idx);
            }
        }
        self.stale_scratch = marks;
    }

    /// Recomputes scale, size, and rectangle of `idx` from its parent.
    fn recompute(&mut self, idx: u32) {
        let i = idx as usize;
        let p = self.parent[i];
        let (parent_rect, parent_ns, parent_scale) = if p == INVALID {
            (self.viewport.rect(), self.viewport.size, self.global_scale)
        } else {
            let p = p as usize;
            (self.rect[p], self.non_scaled_size[p], self.scale[p])
        };

        let local = self.local_scale[i];
        let scale = Vec2::new(parent_scale.x * local.x, parent_scale.y * local.y);

        let fixed = self.flags[i].fixed_size;
        let from_relative = match self.size_request[i] {
            SizeRequest::Initial => true,
            SizeRequest::FromRelative => !fixed,
            SizeRequest::None => !fixed && self.size_source[i] != parent_ns,
            SizeRequest::FromAbsolute => {
                let ns = self.non_scaled_size[i];
                let rel = &mut self.relative_size[i];
                if parent_ns.width != 0.0 {
                    rel.x = ns.width / parent_ns.width;
                }
                if parent_ns.height != 0.0 {
                    rel.y = ns.height / parent_ns.height;
                }
                false
            }
        };
        if from_relative {
            let basis = self.scale_basis[i].apply(parent_ns);
            let rel = self.relative_size[i];
            self.non_scaled_size[i] = Size::new(basis.width * rel.x, basis.height * rel.y)
                .clamp(self.min_size[i], self.max_size[i]);
        }
        self.size_request[i] = SizeRequest::None;
        self.size_source[i] = parent_ns;

        let ns = self.non_scaled_size[i];
        let scaled = Size::new(ns.width * scale.x, ns.height * scale.y);

        let anchor = self.anchor[i];
        let rel_offset = self.relative_offset[i];
        let origin = anchor.point_in(parent_rect)
            + self.pivot[i].offset_for(scaled)
            + anchor.away_from(self.absolute_offset[i])
            + anchor.away_from(Vec2::new(
                parent_rect.width() * rel_offset.x,
                parent_rect.height() * rel_offset.y,
            ))
            + self.screen_offset[i];
        let rect = Rect::from_origin_size(origin, scaled);

        let old = self.rect[i];
        if old.size() != scaled {
            self.pending_resized.push(idx);
            // A resized node re-arranges its own children and disturbs its
            // parent's arrangement.
            self.layout_dirty[i] = true;
            if p != INVALID {
                self.layout_dirty[p as usize] = true;
            }
        }
        if self.scale[i] != scale {
            self.pending_rescaled.push(idx);
            self.scale[i] = scale;
        }
        self.rect[i] = rect;
    }

    /// Rebuilds the depth-first pre-order traversal of all live nodes.
    fn rebuild_traversal_order(&mut self) {
        self.traversal_order.clear();
        for idx in 0..self.len {
            if self.alive[idx as usize] && self.parent[idx as usize] == INVALID {
                self.dfs_collect(idx);
            }
        }
    }

    /// Depth-first pre-order collection starting from `idx`.
    fn dfs_collect(&mut self, idx: u32) {
        self.traversal_order.push(idx);
        let mut child = self.first_child[idx as usize];
        while child != INVALID {
            self.dfs_collect(child);
            child = self.next_sibling[child as usize];
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use kurbo::Point;

    use super::*;
    use crate::geometry::Anchor;
    use crate::node::NodeSpec;
    use crate::viewport::Viewport;

    #[test]
    fn no_change_evaluate_returns_empty() {
        let mut store = NodeStore::default();
        let _root = store.create_node(NodeSpec::default());
        let first = store.evaluate();
        assert!(first.topology_changed, "creation changes topology");
        assert_eq!(first.added.len(), 1);

        let second = store.evaluate();
        assert!(second.is_empty(), "nothing changed: {second:?}");
    }

    #[test]
    fn evaluate_reports_resize_and_reparent() {
        let mut store = NodeStore::default();
        let a = store.create_node(NodeSpec::absolute(Size::new(100.0, 100.0)));
        let b = store.create_node(NodeSpec::absolute(Size::new(100.0, 100.0)));
        let child = store.create_child(a, NodeSpec::relative(Vec2::new(0.5, 0.5)));
        let _ = store.evaluate();

        store.resize(a, Size::new(200.0, 100.0));
        let changes = store.evaluate();
        assert_eq!(changes.resized, vec![a.index(), child.index()]);
        assert!(changes.reparented.is_empty());

        store.set_parent(child, Some(b)).unwrap();
        let changes = store.evaluate();
        assert_eq!(changes.reparented, vec![child.index()]);
        assert_eq!(changes.resized, vec![child.index()]);
        assert!(changes.topology_changed);
    }

    #[test]
    fn evaluate_reports_rescale() {
        let mut store = NodeStore::default();
        let root = store.create_node(NodeSpec::default());
        let child = store.create_child(root, NodeSpec::default());
        let _ = store.evaluate();

        store.set_local_scale(root, Vec2::new(2.0, 2.0));
        let changes = store.evaluate();
        assert_eq!(changes.rescaled, vec![root.index(), child.index()]);
    }

    #[test]
    fn destroyed_nodes_only_appear_in_removed() {
        let mut store = NodeStore::default();
        let root = store.create_node(NodeSpec::default());
        let _ = store.evaluate();
        store.resize(root, Size::new(5.0, 5.0));
        let _ = store.rect(root);
        store.destroy_node(root);
        let changes = store.evaluate();
        assert!(changes.resized.is_empty());
        assert_eq!(changes.removed, vec![root.index()]);
    }

    #[test]
    fn traversal_is_preorder() {
        let mut store = NodeStore::default();
        let r = store.create_node(NodeSpec::default());
        let a = store.create_child(r, NodeSpec::default());
        let a1 = store.create_child(a, NodeSpec::default());
        let b = store.create_child(r, NodeSpec::default());
        let _ = store.evaluate();
        assert_eq!(
            store.traversal_order(),
            &[r.index(), a.index(), a1.index(), b.index()]
        );
    }

    #[test]
    fn mutation_is_lazy_until_read() {
        let mut store = NodeStore::new(Viewport::new(Size::new(100.0, 100.0)));
        let root = store.create_node(NodeSpec::absolute(Size::new(10.0, 10.0)));
        assert_eq!(store.rect(root), Rect::new(0.0, 0.0, 10.0, 10.0));
        store.set_anchor(root, Anchor::BottomRight);
        store.match_pivot_to_anchor(root);
        // Cached value is untouched until the next read.
        assert_eq!(store.cached_rect(root), Rect::new(0.0, 0.0, 10.0, 10.0));
        assert_eq!(store.rect(root).origin(), Point::new(90.0, 90.0));
    }

    #[test]
    fn child_follows_parent_move() {
        let mut store = NodeStore::default();
        let root = store.create_node(NodeSpec::absolute(Size::new(100.0, 100.0)));
        let child = store.create_child(
            root,
            NodeSpec::absolute(Size::new(10.0, 10.0)).with_anchor(Anchor::Center),
        );
        assert_eq!(store.rect(child).origin(), Point::new(45.0, 45.0));
        store.set_absolute_offset(root, Vec2::new(100.0, 0.0));
        assert_eq!(store.rect(child).origin(), Point::new(145.0, 45.0));
    }

    #[test]
    fn merge_sorts_and_dedups() {
        let mut a = FrameChanges {
            resized: vec![3, 1],
            ..FrameChanges::default()
        };
        let b = FrameChanges {
            resized: vec![1, 2],
            topology_changed: true,
            ..FrameChanges::default()
        };
        a.merge(&b);
        assert_eq!(a.resized, vec![1, 2, 3]);
        assert!(a.topology_changed);
    }
}
