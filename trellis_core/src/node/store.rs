// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Struct-of-arrays node storage with allocation, topology, and property management.

use alloc::vec::Vec;
use core::cmp::Ordering;

use kurbo::{Rect, Size, Vec2};
use understory_dirty::{CycleHandling, DirtyTracker, EagerPolicy};

use super::id::{INVALID, NodeId};
use super::spec::{NodeFlags, NodeSpec, SizeRequest, SizeSpec};
use super::traverse::{Ancestors, Children};
use crate::dirty;
use crate::error::TreeError;
use crate::geometry::{Anchor, Pivot, ScaleBasis};
use crate::layout::LayoutGroup;
use crate::viewport::Viewport;

/// Struct-of-arrays storage for all nodes.
///
/// Nodes are addressed by [`NodeId`] handles. Internally, each node occupies
/// a slot in parallel arrays. Destroyed nodes are recycled via a free list,
/// and generation counters prevent stale handle access.
///
/// Mutations never recompute geometry. They mark the `GEOMETRY` channel and
/// the next read through [`rect`](Self::rect) (or any call that needs
/// geometry, such as [`evaluate`](Self::evaluate)) brings every stale node
/// up to date in parent-before-child order.
#[derive(Debug)]
pub struct NodeStore {
    // -- Topology --
    pub(crate) parent: Vec<u32>,
    pub(crate) first_child: Vec<u32>,
    pub(crate) next_sibling: Vec<u32>,
    pub(crate) prev_sibling: Vec<u32>,

    // -- Local properties (set by callers) --
    pub(crate) relative_offset: Vec<Vec2>,
    pub(crate) absolute_offset: Vec<Vec2>,
    pub(crate) screen_offset: Vec<Vec2>,
    pub(crate) relative_size: Vec<Vec2>,
    pub(crate) non_scaled_size: Vec<Size>,
    pub(crate) min_size: Vec<Size>,
    pub(crate) max_size: Vec<Size>,
    pub(crate) anchor: Vec<Anchor>,
    pub(crate) pivot: Vec<Pivot>,
    pub(crate) local_scale: Vec<Vec2>,
    pub(crate) scale_basis: Vec<ScaleBasis>,
    pub(crate) flags: Vec<NodeFlags>,
    pub(crate) draw_order: Vec<i32>,
    pub(crate) size_request: Vec<SizeRequest>,
    /// Parent non-scaled size seen by the last size computation.
    pub(crate) size_source: Vec<Size>,

    // -- Layout groups --
    pub(crate) layout: Vec<Option<LayoutGroup>>,
    pub(crate) layout_dirty: Vec<bool>,
    /// Relative size captured the first time a stretching group resized the
    /// node; cleared by any explicit size change.
    pub(crate) stretch_basis: Vec<Option<Vec2>>,

    // -- Computed properties (written by refresh) --
    pub(crate) rect: Vec<Rect>,
    pub(crate) scale: Vec<Vec2>,

    // -- Allocation --
    pub(crate) generation: Vec<u32>,
    pub(crate) alive: Vec<bool>,
    pub(crate) free_list: Vec<u32>,
    pub(crate) len: u32,

    // -- Dirty tracking --
    pub(crate) dirty: DirtyTracker<u32>,
    pub(crate) geometry_pending: bool,
    pub(crate) stale_scratch: Vec<bool>,

    // -- Environment --
    pub(crate) viewport: Viewport,
    pub(crate) global_scale: Vec2,

    // -- Traversal cache --
    pub(crate) traversal_order: Vec<u32>,
    pub(crate) traversal_dirty: bool,
    pub(crate) topology_pending: bool,

    // -- Notifications --
    pub(crate) pending_added: Vec<u32>,
    pub(crate) pending_removed: Vec<u32>,
    pub(crate) pending_reparented: Vec<u32>,
    pub(crate) pending_resized: Vec<u32>,
    pub(crate) pending_rescaled: Vec<u32>,
}

impl Default for NodeStore {
    fn default() -> Self {
        Self::new(Viewport::default())
    }
}

impl NodeStore {
    /// Creates an empty store laid out against `viewport`.
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            parent: Vec::new(),
            first_child: Vec::new(),
            next_sibling: Vec::new(),
            prev_sibling: Vec::new(),
            relative_offset: Vec::new(),
            absolute_offset: Vec::new(),
            screen_offset: Vec::new(),
            relative_size: Vec::new(),
            non_scaled_size: Vec::new(),
            min_size: Vec::new(),
            max_size: Vec::new(),
            anchor: Vec::new(),
            pivot: Vec::new(),
            local_scale: Vec::new(),
            scale_basis: Vec::new(),
            flags: Vec::new(),
            draw_order: Vec::new(),
            size_request: Vec::new(),
            size_source: Vec::new(),
            layout: Vec::new(),
            layout_dirty: Vec::new(),
            stretch_basis: Vec::new(),
            rect: Vec::new(),
            scale: Vec::new(),
            generation: Vec::new(),
            alive: Vec::new(),
            free_list: Vec::new(),
            len: 0,
            dirty: DirtyTracker::with_cycle_handling(CycleHandling::Error),
            geometry_pending: false,
            stale_scratch: Vec::new(),
            viewport,
            global_scale: Vec2::new(1.0, 1.0),
            traversal_order: Vec::new(),
            traversal_dirty: true,
            topology_pending: false,
            pending_added: Vec::new(),
            pending_removed: Vec::new(),
            pending_reparented: Vec::new(),
            pending_resized: Vec::new(),
            pending_rescaled: Vec::new(),
        }
    }

    // -- Allocation API --

    /// Creates a new root node and returns its handle.
    pub fn create_node(&mut self, spec: NodeSpec) -> NodeId {
        let idx = if let Some(idx) = self.free_list.pop() {
            // Reuse a freed slot.
            self.generation[idx as usize] += 1;
            self.alive[idx as usize] = true;
            self.parent[idx as usize] = INVALID;
            self.first_child[idx as usize] = INVALID;
            self.next_sibling[idx as usize] = INVALID;
            self.prev_sibling[idx as usize] = INVALID;
            self.layout[idx as usize] = None;
            self.layout_dirty[idx as usize] = false;
            self.stretch_basis[idx as usize] = None;
            self.rect[idx as usize] = Rect::ZERO;
            self.scale[idx as usize] = Vec2::new(1.0, 1.0);
            self.size_source[idx as usize] = Size::ZERO;
            idx
        } else {
            // Allocate a new slot.
            let idx = self.len;
            self.len += 1;
            self.parent.push(INVALID);
            self.first_child.push(INVALID);
            self.next_sibling.push(INVALID);
            self.prev_sibling.push(INVALID);
            self.relative_offset.push(Vec2::ZERO);
            self.absolute_offset.push(Vec2::ZERO);
            self.screen_offset.push(Vec2::ZERO);
            self.relative_size.push(Vec2::ZERO);
            self.non_scaled_size.push(Size::ZERO);
            self.min_size.push(Size::ZERO);
            self.max_size.push(Size::ZERO);
            self.anchor.push(Anchor::TopLeft);
            self.pivot.push(Pivot::TopLeft);
            self.local_scale.push(Vec2::new(1.0, 1.0));
            self.scale_basis.push(ScaleBasis::Normal);
            self.flags.push(NodeFlags::default());
            self.draw_order.push(0);
            self.size_request.push(SizeRequest::None);
            self.size_source.push(Size::ZERO);
            self.layout.push(None);
            self.layout_dirty.push(false);
            self.stretch_basis.push(None);
            self.rect.push(Rect::ZERO);
            self.scale.push(Vec2::new(1.0, 1.0));
            self.generation.push(0);
            self.alive.push(true);
            idx
        };
        self.apply_spec(idx, &spec);

        self.traversal_dirty = true;
        self.pending_added.push(idx);
        self.dirty.mark(idx, dirty::TOPOLOGY);
        self.mark_geometry(idx);

        self.id_unchecked(idx)
    }

    /// Creates a new node as the last child of `parent`.
    ///
    /// # Panics
    ///
    /// Panics if `parent` is stale.
    pub fn create_child(&mut self, parent: NodeId, spec: NodeSpec) -> NodeId {
        self.validate(parent);
        let id = self.create_node(spec);
        self.link_last(parent.idx, id.idx);
        self.after_link(id.idx);
        id
    }

    /// Destroys a node, freeing its slot for reuse.
    ///
    /// Children are orphaned, not destroyed: each becomes a root and is
    /// reported as reparented.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn destroy_node(&mut self, id: NodeId) {
        self.validate(id);
        let idx = id.idx;
        self.clear_children(id);

        let p = self.parent[idx as usize];
        if p != INVALID {
            self.unlink_from_parent(idx);
            self.dirty.remove_dependency(idx, p, dirty::GEOMETRY);
            self.layout_dirty[p as usize] = true;
            self.dirty.mark(p, dirty::TOPOLOGY);
        }

        self.dirty.remove_key(idx);

        // Bump generation so old handles immediately fail validation.
        self.generation[idx as usize] += 1;
        self.alive[idx as usize] = false;
        self.layout[idx as usize] = None;

        self.free_list.push(idx);
        self.traversal_dirty = true;
        self.pending_removed.push(idx);
    }

    /// Returns whether the given handle refers to a live node.
    #[must_use]
    pub fn is_alive(&self, id: NodeId) -> bool {
        id.idx < self.len
            && self.alive[id.idx as usize]
            && self.generation[id.idx as usize] == id.generation
    }

    /// Returns the live handle at raw slot `idx`, if any.
    #[must_use]
    pub fn node_at(&self, idx: u32) -> Option<NodeId> {
        (idx < self.len && self.alive[idx as usize]).then(|| self.id_unchecked(idx))
    }

    /// Number of live nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.len as usize - self.free_list.len()
    }

    // -- Topology API --

    /// Moves `child` under `parent` (as its last child), or detaches it when
    /// `parent` is `None`.
    ///
    /// Setting the current parent again is a no-op and keeps the child's
    /// sibling position.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::SelfParent`] or [`TreeError::Cycle`] if the move
    /// would make the tree cyclic. The tree is left untouched.
    ///
    /// # Panics
    ///
    /// Panics if either handle is stale.
    pub fn set_parent(&mut self, child: NodeId, parent: Option<NodeId>) -> Result<(), TreeError> {
        self.validate(child);
        let Some(parent) = parent else {
            self.detach(child.idx);
            return Ok(());
        };
        self.check_new_parent(child, parent)?;
        if self.parent[child.idx as usize] == parent.idx {
            return Ok(());
        }
        self.detach(child.idx);
        self.link_last(parent.idx, child.idx);
        self.after_link(child.idx);
        Ok(())
    }

    /// Adds `child` as the last child of `parent`.
    ///
    /// Equivalent to `set_parent(child, Some(parent))`.
    ///
    /// # Errors
    ///
    /// See [`set_parent`](Self::set_parent).
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), TreeError> {
        self.set_parent(child, Some(parent))
    }

    /// Inserts `child` at sibling position `index` under `parent`.
    ///
    /// If `child` is already a child of `parent`, `index` refers to the
    /// child list without it.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::IndexOutOfRange`] if `index` is past the end, or a
    /// cycle error as for [`set_parent`](Self::set_parent).
    ///
    /// # Panics
    ///
    /// Panics if either handle is stale.
    pub fn insert_child(
        &mut self,
        parent: NodeId,
        index: usize,
        child: NodeId,
    ) -> Result<(), TreeError> {
        self.validate(child);
        self.check_new_parent(child, parent)?;
        let same_parent = self.parent[child.idx as usize] == parent.idx;
        let len = self.child_count(parent) - usize::from(same_parent);
        if index > len {
            return Err(TreeError::IndexOutOfRange { index, len });
        }
        self.detach(child.idx);
        self.link_at(parent.idx, index, child.idx);
        if same_parent {
            self.after_reorder(parent.idx);
        } else {
            self.after_link(child.idx);
        }
        Ok(())
    }

    /// Detaches `child` from its parent, making it a root. No-op for roots.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn remove_from_parent(&mut self, child: NodeId) {
        self.validate(child);
        self.detach(child.idx);
    }

    /// Moves `child` to sibling position `index` within its parent.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::Detached`] for roots and
    /// [`TreeError::IndexOutOfRange`] if `index` is not a valid position.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn reposition_child(&mut self, child: NodeId, index: usize) -> Result<(), TreeError> {
        self.validate(child);
        let c = child.idx;
        let p = self.parent[c as usize];
        if p == INVALID {
            return Err(TreeError::Detached(child));
        }
        let len = self.child_count(self.id_unchecked(p));
        if index >= len {
            return Err(TreeError::IndexOutOfRange { index, len });
        }
        if self.child_index(child) == Some(index) {
            return Ok(());
        }
        self.unlink_from_parent(c);
        self.link_at(p, index, c);
        self.after_reorder(p);
        Ok(())
    }

    /// Moves `child` to the front of its parent's child list.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::Detached`] for roots.
    pub fn set_as_first_child(&mut self, child: NodeId) -> Result<(), TreeError> {
        self.reposition_child(child, 0)
    }

    /// Moves `child` to the back of its parent's child list.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::Detached`] for roots.
    pub fn set_as_last_child(&mut self, child: NodeId) -> Result<(), TreeError> {
        self.validate(child);
        let p = self.parent[child.idx as usize];
        if p == INVALID {
            return Err(TreeError::Detached(child));
        }
        let last = self.child_count(self.id_unchecked(p)) - 1;
        self.reposition_child(child, last)
    }

    /// Detaches every child of `parent`. The children become roots.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn clear_children(&mut self, parent: NodeId) {
        self.validate(parent);
        while self.first_child[parent.idx as usize] != INVALID {
            let c = self.first_child[parent.idx as usize];
            self.detach(c);
        }
    }

    /// Reorders the children of `parent` with a stable sort.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn sort_children(
        &mut self,
        parent: NodeId,
        mut compare: impl FnMut(NodeId, NodeId) -> Ordering,
    ) {
        let mut kids: Vec<NodeId> = self.children(parent).collect();
        kids.sort_by(|a, b| compare(*a, *b));
        let order: Vec<u32> = kids.iter().map(|k| k.idx).collect();
        self.relink_children(parent.idx, &order);
    }

    /// Reverses the children of `parent`.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn reverse_children(&mut self, parent: NodeId) {
        let mut order: Vec<u32> = self.children(parent).map(|k| k.idx).collect();
        order.reverse();
        self.relink_children(parent.idx, &order);
    }

    /// Returns the parent of a node, if any.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.validate(id);
        let p = self.parent[id.idx as usize];
        (p != INVALID).then(|| self.id_unchecked(p))
    }

    /// Returns an iterator over the direct children of a node.
    #[must_use]
    pub fn children(&self, id: NodeId) -> Children<'_> {
        self.validate(id);
        Children::new(self, self.first_child[id.idx as usize])
    }

    /// Returns an iterator from the node's parent up to its root.
    #[must_use]
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        self.validate(id);
        Ancestors::new(self, id.idx)
    }

    /// Returns whether `ancestor` is a proper ancestor of `node`.
    #[must_use]
    pub fn is_ancestor_of(&self, ancestor: NodeId, node: NodeId) -> bool {
        self.validate(ancestor);
        self.ancestors(node).any(|a| a == ancestor)
    }

    /// Number of direct children.
    #[must_use]
    pub fn child_count(&self, id: NodeId) -> usize {
        self.children(id).count()
    }

    /// Position of `child` among its siblings, or `None` for roots.
    #[must_use]
    pub fn child_index(&self, child: NodeId) -> Option<usize> {
        let p = self.parent(child)?;
        self.children(p).position(|c| c == child)
    }

    /// Returns the root nodes in slot order.
    #[must_use]
    pub fn roots(&self) -> Vec<NodeId> {
        (0..self.len)
            .filter(|&idx| self.alive[idx as usize] && self.parent[idx as usize] == INVALID)
            .map(|idx| self.id_unchecked(idx))
            .collect()
    }

    // -- Property getters (read-only, no refresh) --

    /// Returns the relative offset.
    #[must_use]
    pub fn relative_offset(&self, id: NodeId) -> Vec2 {
        self.validate(id);
        self.relative_offset[id.idx as usize]
    }

    /// Returns the absolute offset.
    #[must_use]
    pub fn absolute_offset(&self, id: NodeId) -> Vec2 {
        self.validate(id);
        self.absolute_offset[id.idx as usize]
    }

    /// Returns the screen-space offset.
    #[must_use]
    pub fn screen_offset(&self, id: NodeId) -> Vec2 {
        self.validate(id);
        self.screen_offset[id.idx as usize]
    }

    /// Returns the minimum size.
    #[must_use]
    pub fn min_size(&self, id: NodeId) -> Size {
        self.validate(id);
        self.min_size[id.idx as usize]
    }

    /// Returns the maximum size.
    #[must_use]
    pub fn max_size(&self, id: NodeId) -> Size {
        self.validate(id);
        self.max_size[id.idx as usize]
    }

    /// Returns the anchor.
    #[must_use]
    pub fn anchor(&self, id: NodeId) -> Anchor {
        self.validate(id);
        self.anchor[id.idx as usize]
    }

    /// Returns the pivot.
    #[must_use]
    pub fn pivot(&self, id: NodeId) -> Pivot {
        self.validate(id);
        self.pivot[id.idx as usize]
    }

    /// Returns the local scale.
    #[must_use]
    pub fn local_scale(&self, id: NodeId) -> Vec2 {
        self.validate(id);
        self.local_scale[id.idx as usize]
    }

    /// Returns the scale basis.
    #[must_use]
    pub fn scale_basis(&self, id: NodeId) -> ScaleBasis {
        self.validate(id);
        self.scale_basis[id.idx as usize]
    }

    /// Returns the flags.
    #[must_use]
    pub fn flags(&self, id: NodeId) -> NodeFlags {
        self.validate(id);
        self.flags[id.idx as usize]
    }

    /// Returns the draw order band.
    #[must_use]
    pub fn draw_order(&self, id: NodeId) -> i32 {
        self.validate(id);
        self.draw_order[id.idx as usize]
    }

    /// Returns the viewport.
    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Returns the global scale.
    #[must_use]
    pub fn global_scale(&self) -> Vec2 {
        self.global_scale
    }

    // -- Computed getters (refresh stale geometry first) --

    /// Returns the absolute rectangle, recomputing stale geometry first.
    #[must_use]
    pub fn rect(&mut self, id: NodeId) -> Rect {
        self.validate(id);
        self.refresh();
        self.rect[id.idx as usize]
    }

    /// Returns the non-scaled size, recomputing stale geometry first.
    #[must_use]
    pub fn non_scaled_size(&mut self, id: NodeId) -> Size {
        self.validate(id);
        self.refresh();
        self.non_scaled_size[id.idx as usize]
    }

    /// Returns the relative size, recomputing stale geometry first.
    ///
    /// For nodes sized with [`resize`](Self::resize) this is derived from the
    /// parent's non-scaled size.
    #[must_use]
    pub fn relative_size(&mut self, id: NodeId) -> Vec2 {
        self.validate(id);
        self.refresh();
        self.relative_size[id.idx as usize]
    }

    /// Returns the inherited scale, recomputing stale geometry first.
    #[must_use]
    pub fn scale(&mut self, id: NodeId) -> Vec2 {
        self.validate(id);
        self.refresh();
        self.scale[id.idx as usize]
    }

    /// Returns the rectangle computed by the last refresh.
    ///
    /// Stale while mutations are pending; call [`rect`](Self::rect) or
    /// [`evaluate`](Self::evaluate) first.
    #[must_use]
    pub fn cached_rect(&self, id: NodeId) -> Rect {
        self.validate(id);
        self.rect[id.idx as usize]
    }

    /// Returns the hit-test rectangle.
    ///
    /// Empty for nodes that cannot be focused. With
    /// [`clamp_mouse_rect_to_parent`](NodeFlags::clamp_mouse_rect_to_parent)
    /// the rectangle is intersected with the parent's (recursively while
    /// parents clamp too), and it is always intersected with ancestors that
    /// clip their children. Reads cached geometry.
    #[must_use]
    pub fn mouse_rect(&self, id: NodeId) -> Rect {
        self.validate(id);
        let idx = id.idx as usize;
        if !self.flags[idx].can_be_focused {
            return Rect::ZERO;
        }
        let mut r = self.clamp_rect(id.idx, self.rect[idx]);
        for a in self.ancestors(id) {
            if self.flags[a.idx as usize].clip_children {
                r = r.intersect(self.rect[a.idx as usize]);
            }
        }
        non_empty(r)
    }

    fn clamp_rect(&self, idx: u32, r: Rect) -> Rect {
        let p = self.parent[idx as usize];
        if p == INVALID || !self.flags[idx as usize].clamp_mouse_rect_to_parent {
            return r;
        }
        let parent_rect = self.rect[p as usize];
        let parent_rect = if self.flags[p as usize].clamp_mouse_rect_to_parent {
            self.clamp_rect(p, parent_rect)
        } else {
            parent_rect
        };
        if parent_rect.width() <= 0.0 || parent_rect.height() <= 0.0 {
            return Rect::ZERO;
        }
        r.intersect(parent_rect)
    }

    // -- Mutation API (auto-marks dirty) --

    /// Sets the offset given as a fraction of the parent rectangle.
    pub fn set_relative_offset(&mut self, id: NodeId, offset: Vec2) {
        self.validate(id);
        if self.relative_offset[id.idx as usize] == offset {
            return;
        }
        self.relative_offset[id.idx as usize] = offset;
        self.mark_geometry(id.idx);
    }

    /// Sets the pixel offset, measured away from the anchor.
    pub fn set_absolute_offset(&mut self, id: NodeId, offset: Vec2) {
        self.validate(id);
        if self.absolute_offset[id.idx as usize] == offset {
            return;
        }
        self.absolute_offset[id.idx as usize] = offset;
        self.mark_geometry(id.idx);
    }

    /// Sets the screen-space offset (pixels, not anchor-relative).
    pub fn set_screen_offset(&mut self, id: NodeId, offset: Vec2) {
        self.validate(id);
        if self.screen_offset[id.idx as usize] == offset {
            return;
        }
        self.screen_offset[id.idx as usize] = offset;
        self.mark_geometry(id.idx);
    }

    /// Adds `delta` to the screen-space offset.
    pub fn translate(&mut self, id: NodeId, delta: Vec2) {
        self.validate(id);
        let offset = self.screen_offset[id.idx as usize] + delta;
        self.set_screen_offset(id, offset);
    }

    /// Sets the anchor without touching the pivot.
    pub fn set_anchor(&mut self, id: NodeId, anchor: Anchor) {
        self.validate(id);
        if self.anchor[id.idx as usize] == anchor {
            return;
        }
        self.anchor[id.idx as usize] = anchor;
        self.mark_geometry(id.idx);
    }

    /// Sets the pivot without touching the anchor.
    pub fn set_pivot(&mut self, id: NodeId, pivot: Pivot) {
        self.validate(id);
        if self.pivot[id.idx as usize] == pivot {
            return;
        }
        self.pivot[id.idx as usize] = pivot;
        self.mark_geometry(id.idx);
    }

    /// Sets anchor and pivot together and clears the screen-space offset.
    ///
    /// `pivot` defaults to the anchor's matching point.
    pub fn set_position(&mut self, id: NodeId, anchor: Anchor, pivot: Option<Pivot>) {
        self.validate(id);
        let i = id.idx as usize;
        self.anchor[i] = anchor;
        self.pivot[i] = pivot.unwrap_or(anchor.matching_pivot());
        self.screen_offset[i] = Vec2::ZERO;
        self.mark_geometry(id.idx);
    }

    /// Sets the pivot to the point matching the current anchor.
    pub fn match_pivot_to_anchor(&mut self, id: NodeId) {
        let anchor = self.anchor(id);
        self.set_pivot(id, anchor.matching_pivot());
    }

    /// Sets the size relative to the parent.
    ///
    /// Fixed-size nodes store the value but keep their current size.
    pub fn resize_relative(&mut self, id: NodeId, relative_size: Vec2) {
        self.validate(id);
        let i = id.idx as usize;
        if self.relative_size[i] == relative_size && self.size_request[i] == SizeRequest::None {
            return;
        }
        self.relative_size[i] = relative_size;
        self.request_size(id.idx, SizeRequest::FromRelative);
        self.mark_resized(id.idx);
    }

    /// Alias for [`resize_relative`](Self::resize_relative).
    pub fn set_relative_size(&mut self, id: NodeId, relative_size: Vec2) {
        self.resize_relative(id, relative_size);
    }

    /// Sets the non-scaled size in pixels, clamped to the node's min/max.
    ///
    /// The relative size is derived from the parent's non-scaled size on the
    /// next refresh.
    pub fn resize(&mut self, id: NodeId, size: Size) {
        self.validate(id);
        let i = id.idx as usize;
        let clamped = size.clamp(self.min_size[i], self.max_size[i]);
        if self.non_scaled_size[i] == clamped && self.size_request[i] == SizeRequest::None {
            return;
        }
        self.non_scaled_size[i] = clamped;
        self.size_request[i] = SizeRequest::FromAbsolute;
        self.mark_resized(id.idx);
    }

    /// Alias for [`resize`](Self::resize).
    pub fn set_non_scaled_size(&mut self, id: NodeId, size: Size) {
        self.resize(id, size);
    }

    /// Sets the minimum size.
    pub fn set_min_size(&mut self, id: NodeId, min_size: Size) {
        self.validate(id);
        if self.min_size[id.idx as usize] == min_size {
            return;
        }
        self.min_size[id.idx as usize] = min_size;
        self.after_clamp_change(id.idx);
    }

    /// Sets the maximum size.
    pub fn set_max_size(&mut self, id: NodeId, max_size: Size) {
        self.validate(id);
        if self.max_size[id.idx as usize] == max_size {
            return;
        }
        self.max_size[id.idx as usize] = max_size;
        self.after_clamp_change(id.idx);
    }

    /// Sets the local scale, inherited by every descendant.
    pub fn set_local_scale(&mut self, id: NodeId, scale: Vec2) {
        self.validate(id);
        if self.local_scale[id.idx as usize] == scale {
            return;
        }
        self.local_scale[id.idx as usize] = scale;
        self.mark_resized(id.idx);
    }

    /// Sets the scale basis and recomputes the size from the relative size.
    pub fn set_scale_basis(&mut self, id: NodeId, basis: ScaleBasis) {
        self.validate(id);
        if self.scale_basis[id.idx as usize] == basis {
            return;
        }
        self.scale_basis[id.idx as usize] = basis;
        self.request_size(id.idx, SizeRequest::Initial);
        self.mark_resized(id.idx);
    }

    /// Replaces the flags.
    pub fn set_flags(&mut self, id: NodeId, flags: NodeFlags) {
        self.validate(id);
        let i = id.idx as usize;
        let old = self.flags[i];
        if old == flags {
            return;
        }
        self.flags[i] = flags;
        if old.fixed_size != flags.fixed_size
            || old.ignore_parent_layout != flags.ignore_parent_layout
        {
            self.mark_parent_layout(id.idx);
        }
        if old.hidden != flags.hidden {
            self.topology_pending = true;
        }
    }

    /// Sets the draw order band. Among siblings (and among roots), lower
    /// bands draw first and hit-test last.
    pub fn set_draw_order(&mut self, id: NodeId, draw_order: i32) {
        self.validate(id);
        if self.draw_order[id.idx as usize] == draw_order {
            return;
        }
        self.draw_order[id.idx as usize] = draw_order;
        self.topology_pending = true;
    }

    /// Replaces the viewport and invalidates every rectangle.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        if self.viewport == viewport {
            return;
        }
        self.viewport = viewport;
        self.mark_all_roots();
    }

    /// Replaces the global scale and invalidates every rectangle.
    pub fn set_global_scale(&mut self, scale: Vec2) {
        if self.global_scale == scale {
            return;
        }
        self.global_scale = scale;
        self.mark_all_roots();
    }

    // -- Raw-index accessors --
    //
    // These accept raw slot indices (as found in `FrameChanges` or
    // `traversal_order()`) and skip generation validation.

    /// Returns the cached rectangle at raw slot `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= self.len`.
    #[must_use]
    pub fn rect_at(&self, idx: u32) -> Rect {
        assert!(
            idx < self.len,
            "slot index {idx} out of range (len {})",
            self.len
        );
        self.rect[idx as usize]
    }

    /// Returns the flags at raw slot `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= self.len`.
    #[must_use]
    pub fn flags_at(&self, idx: u32) -> NodeFlags {
        assert!(
            idx < self.len,
            "slot index {idx} out of range (len {})",
            self.len
        );
        self.flags[idx as usize]
    }

    // -- Internal helpers --

    /// Panics if the handle is stale.
    pub(crate) fn validate(&self, id: NodeId) {
        assert!(
            self.is_alive(id),
            "stale NodeId: {id:?} (current gen: {})",
            if id.idx < self.len {
                self.generation[id.idx as usize]
            } else {
                u32::MAX
            }
        );
    }

    pub(crate) fn id_unchecked(&self, idx: u32) -> NodeId {
        NodeId {
            idx,
            generation: self.generation[idx as usize],
        }
    }

    fn apply_spec(&mut self, idx: u32, spec: &NodeSpec) {
        let i = idx as usize;
        self.relative_offset[i] = spec.relative_offset;
        self.absolute_offset[i] = spec.absolute_offset;
        self.screen_offset[i] = Vec2::ZERO;
        self.min_size[i] = spec.min_size;
        self.max_size[i] = spec.max_size;
        self.anchor[i] = spec.anchor;
        self.pivot[i] = spec.pivot.unwrap_or(spec.anchor.matching_pivot());
        self.local_scale[i] = spec.local_scale;
        self.scale_basis[i] = spec.scale_basis;
        self.flags[i] = spec.flags;
        self.draw_order[i] = spec.draw_order;
        match spec.size {
            SizeSpec::Relative(rel) => {
                self.relative_size[i] = rel;
                self.non_scaled_size[i] = Size::ZERO;
                self.size_request[i] = SizeRequest::Initial;
            }
            SizeSpec::Absolute(size) => {
                self.relative_size[i] = Vec2::ZERO;
                self.non_scaled_size[i] = size.clamp(spec.min_size, spec.max_size);
                self.size_request[i] = SizeRequest::FromAbsolute;
            }
        }
    }

    fn check_new_parent(&self, child: NodeId, parent: NodeId) -> Result<(), TreeError> {
        self.validate(parent);
        if child == parent {
            return Err(TreeError::SelfParent(child));
        }
        if self.is_ancestor_of(child, parent) {
            return Err(TreeError::Cycle { child, parent });
        }
        Ok(())
    }

    /// Unlinks `c` from its parent (if any) and records the change.
    fn detach(&mut self, c: u32) {
        let p = self.parent[c as usize];
        if p == INVALID {
            return;
        }
        self.unlink_from_parent(c);
        self.dirty.remove_dependency(c, p, dirty::GEOMETRY);
        self.layout_dirty[p as usize] = true;
        self.dirty.mark(p, dirty::TOPOLOGY);
        self.after_move(c);
    }

    /// Dependency edges and notifications once `c` has been linked under a
    /// new parent.
    fn after_link(&mut self, c: u32) {
        let p = self.parent[c as usize];
        let _ = self.dirty.add_dependency(c, p, dirty::GEOMETRY);
        self.layout_dirty[p as usize] = true;
        self.dirty.mark(p, dirty::TOPOLOGY);
        self.after_move(c);
    }

    fn after_move(&mut self, c: u32) {
        self.stretch_basis[c as usize] = None;
        self.pending_reparented.push(c);
        self.traversal_dirty = true;
        self.mark_geometry(c);
    }

    fn after_reorder(&mut self, p: u32) {
        self.layout_dirty[p as usize] = true;
        self.traversal_dirty = true;
        self.dirty.mark(p, dirty::TOPOLOGY);
    }

    fn link_last(&mut self, p: u32, c: u32) {
        self.parent[c as usize] = p;
        self.prev_sibling[c as usize] = INVALID;
        self.next_sibling[c as usize] = INVALID;

        if self.first_child[p as usize] == INVALID {
            self.first_child[p as usize] = c;
        } else {
            // Walk to last child.
            let mut last = self.first_child[p as usize];
            while self.next_sibling[last as usize] != INVALID {
                last = self.next_sibling[last as usize];
            }
            self.next_sibling[last as usize] = c;
            self.prev_sibling[c as usize] = last;
        }
    }

    /// Links `c` at sibling position `index` (which must be in range).
    fn link_at(&mut self, p: u32, index: usize, c: u32) {
        let mut before = self.first_child[p as usize];
        for _ in 0..index {
            if before == INVALID {
                break;
            }
            before = self.next_sibling[before as usize];
        }
        if before == INVALID {
            self.link_last(p, c);
            return;
        }
        self.parent[c as usize] = p;
        self.next_sibling[c as usize] = before;
        self.prev_sibling[c as usize] = self.prev_sibling[before as usize];
        if self.prev_sibling[before as usize] != INVALID {
            self.next_sibling[self.prev_sibling[before as usize] as usize] = c;
        } else {
            self.first_child[p as usize] = c;
        }
        self.prev_sibling[before as usize] = c;
    }

    /// Rewrites the sibling links of `p` to follow `order`.
    fn relink_children(&mut self, p: u32, order: &[u32]) {
        let mut prev = INVALID;
        for &c in order {
            self.prev_sibling[c as usize] = prev;
            self.next_sibling[c as usize] = INVALID;
            if prev == INVALID {
                self.first_child[p as usize] = c;
            } else {
                self.next_sibling[prev as usize] = c;
            }
            prev = c;
        }
        self.after_reorder(p);
    }

    /// Removes `idx` from its parent's child list without touching dirty state.
    fn unlink_from_parent(&mut self, idx: u32) {
        let p = self.parent[idx as usize];
        let prev = self.prev_sibling[idx as usize];
        let next = self.next_sibling[idx as usize];

        if prev != INVALID {
            self.next_sibling[prev as usize] = next;
        } else {
            // Was first child.
            self.first_child[p as usize] = next;
        }

        if next != INVALID {
            self.prev_sibling[next as usize] = prev;
        }

        self.parent[idx as usize] = INVALID;
        self.prev_sibling[idx as usize] = INVALID;
        self.next_sibling[idx as usize] = INVALID;
    }

    /// Marks the subtree rooted at `idx` for geometry recomputation.
    pub(crate) fn mark_geometry(&mut self, idx: u32) {
        self.dirty.mark_with(idx, dirty::GEOMETRY, &EagerPolicy);
        self.geometry_pending = true;
    }

    /// An explicit size-affecting change: marks geometry, invalidates the
    /// parent's layout, and forgets the stretch snapshot.
    fn mark_resized(&mut self, idx: u32) {
        self.stretch_basis[idx as usize] = None;
        self.mark_parent_layout(idx);
        self.mark_geometry(idx);
    }

    pub(crate) fn mark_parent_layout(&mut self, idx: u32) {
        let p = self.parent[idx as usize];
        if p != INVALID {
            self.layout_dirty[p as usize] = true;
        }
    }

    /// Records a size request without downgrading a pending explicit one.
    pub(crate) fn request_size(&mut self, idx: u32, request: SizeRequest) {
        let slot = &mut self.size_request[idx as usize];
        *slot = match (*slot, request) {
            (SizeRequest::Initial, _) | (_, SizeRequest::Initial) => SizeRequest::Initial,
            (_, r) => r,
        };
    }

    fn after_clamp_change(&mut self, idx: u32) {
        let i = idx as usize;
        if self.size_request[i] == SizeRequest::FromAbsolute {
            self.non_scaled_size[i] = self.non_scaled_size[i].clamp(self.min_size[i], self.max_size[i]);
        } else {
            self.request_size(idx, SizeRequest::FromRelative);
        }
        self.mark_resized(idx);
    }

    fn mark_all_roots(&mut self) {
        for idx in 0..self.len {
            if self.alive[idx as usize] && self.parent[idx as usize] == INVALID {
                self.mark_geometry(idx);
            }
        }
    }
}

/// Collapses rectangles with no area to [`Rect::ZERO`].
pub(crate) fn non_empty(r: Rect) -> Rect {
    if r.width() <= 0.0 || r.height() <= 0.0 {
        Rect::ZERO
    } else {
        r
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use kurbo::Point;

    use super::*;

    fn store() -> NodeStore {
        NodeStore::new(Viewport::new(Size::new(1000.0, 500.0)))
    }

    #[test]
    fn create_and_destroy() {
        let mut store = store();
        let id = store.create_node(NodeSpec::default());
        assert!(store.is_alive(id));
        store.destroy_node(id);
        assert!(!store.is_alive(id));
        assert_eq!(store.node_count(), 0);
    }

    #[test]
    fn generation_prevents_stale_access() {
        let mut store = store();
        let id1 = store.create_node(NodeSpec::default());
        store.destroy_node(id1);
        let id2 = store.create_node(NodeSpec::default());
        // id2 reuses the same slot but has a different generation.
        assert!(!store.is_alive(id1));
        assert!(store.is_alive(id2));
        assert_eq!(id1.idx, id2.idx);
        assert_ne!(id1.generation, id2.generation);
    }

    #[test]
    fn add_child_and_query() {
        let mut store = store();
        let parent = store.create_node(NodeSpec::default());
        let a = store.create_child(parent, NodeSpec::default());
        let b = store.create_node(NodeSpec::default());
        store.add_child(parent, b).unwrap();

        assert_eq!(store.parent(a), Some(parent));
        assert_eq!(store.parent(b), Some(parent));
        let kids: Vec<_> = store.children(parent).collect();
        assert_eq!(kids, vec![a, b]);
        assert_eq!(store.child_index(b), Some(1));
    }

    #[test]
    fn set_same_parent_keeps_position() {
        let mut store = store();
        let parent = store.create_node(NodeSpec::default());
        let a = store.create_child(parent, NodeSpec::default());
        let b = store.create_child(parent, NodeSpec::default());
        store.set_parent(a, Some(parent)).unwrap();
        let kids: Vec<_> = store.children(parent).collect();
        assert_eq!(kids, vec![a, b]);
    }

    #[test]
    fn cycles_are_rejected() {
        let mut store = store();
        let root = store.create_node(NodeSpec::default());
        let mid = store.create_child(root, NodeSpec::default());
        let leaf = store.create_child(mid, NodeSpec::default());

        assert_eq!(
            store.set_parent(root, Some(leaf)),
            Err(TreeError::Cycle {
                child: root,
                parent: leaf
            })
        );
        assert_eq!(
            store.set_parent(mid, Some(mid)),
            Err(TreeError::SelfParent(mid))
        );
        // Untouched.
        assert_eq!(store.parent(leaf), Some(mid));
        assert_eq!(store.parent(root), None);
    }

    #[test]
    fn destroy_orphans_children() {
        let mut store = store();
        let root = store.create_node(NodeSpec::default());
        let mid = store.create_child(root, NodeSpec::default());
        let leaf = store.create_child(mid, NodeSpec::default());

        store.destroy_node(mid);
        assert!(store.is_alive(leaf));
        assert_eq!(store.parent(leaf), None);
        assert_eq!(store.child_count(root), 0);
        assert!(store.roots().contains(&leaf));
    }

    #[test]
    fn reorder_children() {
        let mut store = store();
        let p = store.create_node(NodeSpec::default());
        let a = store.create_child(p, NodeSpec::default());
        let b = store.create_child(p, NodeSpec::default());
        let c = store.create_child(p, NodeSpec::default());

        store.set_as_first_child(c).unwrap();
        assert_eq!(store.children(p).collect::<Vec<_>>(), vec![c, a, b]);

        store.set_as_last_child(c).unwrap();
        assert_eq!(store.children(p).collect::<Vec<_>>(), vec![a, b, c]);

        store.reposition_child(a, 1).unwrap();
        assert_eq!(store.children(p).collect::<Vec<_>>(), vec![b, a, c]);

        assert_eq!(
            store.reposition_child(a, 3),
            Err(TreeError::IndexOutOfRange { index: 3, len: 3 })
        );
        assert_eq!(store.set_as_first_child(p), Err(TreeError::Detached(p)));

        store.reverse_children(p);
        assert_eq!(store.children(p).collect::<Vec<_>>(), vec![c, a, b]);

        store.sort_children(p, |x, y| x.index().cmp(&y.index()));
        assert_eq!(store.children(p).collect::<Vec<_>>(), vec![a, b, c]);
    }

    #[test]
    fn insert_child_at_index() {
        let mut store = store();
        let p = store.create_node(NodeSpec::default());
        let a = store.create_child(p, NodeSpec::default());
        let c = store.create_child(p, NodeSpec::default());
        let b = store.create_node(NodeSpec::default());

        store.insert_child(p, 1, b).unwrap();
        assert_eq!(store.children(p).collect::<Vec<_>>(), vec![a, b, c]);

        // Moving within the same parent indexes the list without the child.
        store.insert_child(p, 2, a).unwrap();
        assert_eq!(store.children(p).collect::<Vec<_>>(), vec![b, c, a]);

        let d = store.create_node(NodeSpec::default());
        assert_eq!(
            store.insert_child(p, 5, d),
            Err(TreeError::IndexOutOfRange { index: 5, len: 3 })
        );
    }

    #[test]
    fn clear_children_orphans() {
        let mut store = store();
        let p = store.create_node(NodeSpec::default());
        let a = store.create_child(p, NodeSpec::default());
        let b = store.create_child(p, NodeSpec::default());
        store.clear_children(p);
        assert_eq!(store.child_count(p), 0);
        assert_eq!(store.parent(a), None);
        assert_eq!(store.parent(b), None);
    }

    #[test]
    fn ancestors_walk_to_root() {
        let mut store = store();
        let root = store.create_node(NodeSpec::default());
        let mid = store.create_child(root, NodeSpec::default());
        let leaf = store.create_child(mid, NodeSpec::default());
        assert_eq!(store.ancestors(leaf).collect::<Vec<_>>(), vec![mid, root]);
        assert!(store.is_ancestor_of(root, leaf));
        assert!(!store.is_ancestor_of(leaf, root));
        assert!(!store.is_ancestor_of(leaf, leaf));
    }

    #[test]
    fn relative_size_tracks_viewport() {
        let mut store = store();
        let root = store.create_node(NodeSpec::relative(Vec2::new(0.5, 0.25)));
        assert_eq!(store.rect(root), Rect::new(0.0, 0.0, 500.0, 125.0));
    }

    #[test]
    fn anchor_and_pivot_place_rect() {
        let mut store = store();
        let root = store.create_node(NodeSpec::absolute(Size::new(400.0, 200.0)));
        let child = store.create_child(
            root,
            NodeSpec::absolute(Size::new(100.0, 50.0)).with_anchor(Anchor::Center),
        );
        assert_eq!(store.rect(child), Rect::new(150.0, 75.0, 250.0, 125.0));

        store.set_position(child, Anchor::BottomRight, None);
        assert_eq!(store.rect(child), Rect::new(300.0, 150.0, 400.0, 200.0));
    }

    #[test]
    fn offsets_point_away_from_anchor() {
        let mut store = store();
        let root = store.create_node(NodeSpec::absolute(Size::new(400.0, 200.0)));
        let child = store.create_child(
            root,
            NodeSpec::absolute(Size::new(100.0, 50.0))
                .with_anchor(Anchor::BottomRight)
                .with_absolute_offset(Vec2::new(10.0, 5.0))
                .with_relative_offset(Vec2::new(0.1, 0.0)),
        );
        // 400 - 100 - 10 - 0.1 * 400 = 250
        assert_eq!(store.rect(child).origin(), Point::new(250.0, 145.0));
    }

    #[test]
    fn min_max_clamp_after_relative() {
        let mut store = store();
        let root = store.create_node(
            NodeSpec::relative(Vec2::new(0.01, 2.0))
                .with_min_size(Size::new(50.0, 0.0))
                .with_max_size(Size::new(f64::INFINITY, 600.0)),
        );
        assert_eq!(store.rect(root).size(), Size::new(50.0, 600.0));
    }

    #[test]
    fn absolute_resize_derives_relative_size() {
        let mut store = store();
        let root = store.create_node(NodeSpec::absolute(Size::new(250.0, 100.0)));
        assert_eq!(store.relative_size(root), Vec2::new(0.25, 0.2));

        // Non-fixed nodes follow their parent from then on.
        store.set_viewport(Viewport::new(Size::new(2000.0, 500.0)));
        assert_eq!(store.rect(root).size(), Size::new(500.0, 100.0));
    }

    #[test]
    fn fixed_size_ignores_parent_resize() {
        let mut store = store();
        let root = store.create_node(NodeSpec::absolute(Size::new(250.0, 100.0)).fixed());
        let _ = store.rect(root);
        store.set_viewport(Viewport::new(Size::new(2000.0, 500.0)));
        assert_eq!(store.rect(root).size(), Size::new(250.0, 100.0));
    }

    #[test]
    fn scale_multiplies_down_the_tree() {
        let mut store = store();
        let root = store.create_node(
            NodeSpec::absolute(Size::new(100.0, 100.0)).with_local_scale(Vec2::new(2.0, 1.0)),
        );
        let child = store.create_child(root, NodeSpec::relative(Vec2::new(0.5, 0.5)));
        store.set_global_scale(Vec2::new(1.0, 3.0));
        assert_eq!(store.scale(child), Vec2::new(2.0, 3.0));
        // Non-scaled 50x50, scaled by (2, 3).
        assert_eq!(store.rect(child).size(), Size::new(100.0, 150.0));
    }

    #[test]
    fn translate_and_set_position_reset() {
        let mut store = store();
        let root = store.create_node(NodeSpec::absolute(Size::new(10.0, 10.0)));
        store.translate(root, Vec2::new(5.0, 7.0));
        store.translate(root, Vec2::new(1.0, 0.0));
        assert_eq!(store.rect(root).origin(), Point::new(6.0, 7.0));
        store.set_position(root, Anchor::TopLeft, None);
        assert_eq!(store.rect(root).origin(), Point::ORIGIN);
    }

    #[test]
    fn mouse_rect_clamps_to_parent() {
        let mut store = store();
        let root = store.create_node(NodeSpec::absolute(Size::new(100.0, 100.0)));
        let child = store.create_child(
            root,
            NodeSpec::absolute(Size::new(80.0, 80.0)).with_absolute_offset(Vec2::new(50.0, 50.0)),
        );
        let _ = store.rect(child);
        assert_eq!(store.mouse_rect(child), Rect::new(50.0, 50.0, 130.0, 130.0));

        let mut flags = store.flags(child);
        flags.clamp_mouse_rect_to_parent = true;
        store.set_flags(child, flags);
        assert_eq!(store.mouse_rect(child), Rect::new(50.0, 50.0, 100.0, 100.0));

        flags.can_be_focused = false;
        store.set_flags(child, flags);
        assert_eq!(store.mouse_rect(child), Rect::ZERO);
    }

    #[test]
    fn mouse_rect_clipped_by_ancestor() {
        let mut store = store();
        let root = store.create_node(
            NodeSpec::absolute(Size::new(100.0, 100.0)).with_flags(NodeFlags {
                clip_children: true,
                ..NodeFlags::default()
            }),
        );
        let mid = store.create_child(root, NodeSpec::default());
        let leaf = store.create_child(
            mid,
            NodeSpec::absolute(Size::new(50.0, 50.0)).with_absolute_offset(Vec2::new(75.0, 0.0)),
        );
        let _ = store.rect(leaf);
        assert_eq!(store.mouse_rect(leaf), Rect::new(75.0, 0.0, 100.0, 50.0));
    }

    #[test]
    #[should_panic(expected = "stale NodeId")]
    fn destroyed_handle_panics_on_rect() {
        let mut store = store();
        let id = store.create_node(NodeSpec::default());
        store.destroy_node(id);
        let _ = store.rect(id);
    }

    #[test]
    #[should_panic(expected = "stale NodeId")]
    fn destroyed_handle_panics_on_add_child() {
        let mut store = store();
        let root = store.create_node(NodeSpec::default());
        let id = store.create_node(NodeSpec::default());
        store.destroy_node(id);
        let _ = store.add_child(root, id);
    }
}
