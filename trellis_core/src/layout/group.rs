// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Single-axis layout groups with stretch distribution.

use alloc::vec::Vec;

use kurbo::Size;

use crate::geometry::{Anchor, Axis, ScaleBasis};
use crate::node::{INVALID, NodeId, NodeStore, SizeRequest};
use crate::trace::{LayoutEvent, Tracer};

/// Differences below this are treated as "no room to distribute".
const STRETCH_EPSILON: f64 = 1e-9;

/// Where a stretching group measures each child's natural size.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StretchMode {
    /// The child's relative size is captured the first time the group
    /// stretches it and every later pass starts from that snapshot, so
    /// recalculation is idempotent. An explicit resize of the child or moving
    /// it to another parent drops the snapshot.
    #[default]
    Retained,
    /// Every pass starts from the child's current size, so the stretched
    /// share compounds across passes.
    Accumulate,
}

/// Arranges a node's children along one axis.
///
/// Attach with [`NodeStore::set_layout`].
///
/// ```
/// use trellis_core::geometry::Anchor;
/// use trellis_core::layout::LayoutGroup;
///
/// let row = LayoutGroup::horizontal()
///     .with_stretch(true)
///     .with_absolute_spacing(4.0)
///     .with_child_anchor(Anchor::CenterLeft);
/// assert!(row.stretch);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayoutGroup {
    /// Layout axis.
    pub axis: Axis,
    /// Scale children so they fill the group along the axis.
    pub stretch: bool,
    /// Gap between children in pixels.
    pub absolute_spacing: f64,
    /// Gap between children as a fraction of the group size.
    pub relative_spacing: f64,
    /// Anchor (and matching pivot) applied to every arranged child.
    pub child_anchor: Anchor,
    /// Natural-size source for stretching.
    pub stretch_mode: StretchMode,
}

impl Default for LayoutGroup {
    fn default() -> Self {
        Self::vertical()
    }
}

impl LayoutGroup {
    /// A top-to-bottom group.
    #[must_use]
    pub const fn vertical() -> Self {
        Self {
            axis: Axis::Vertical,
            stretch: false,
            absolute_spacing: 0.0,
            relative_spacing: 0.0,
            child_anchor: Anchor::TopLeft,
            stretch_mode: StretchMode::Retained,
        }
    }

    /// A left-to-right group.
    #[must_use]
    pub const fn horizontal() -> Self {
        Self {
            axis: Axis::Horizontal,
            ..Self::vertical()
        }
    }

    /// Sets whether children are stretched to fill the group.
    #[must_use]
    pub const fn with_stretch(mut self, stretch: bool) -> Self {
        self.stretch = stretch;
        self
    }

    /// Sets the pixel spacing. Negative values are clamped to zero.
    #[must_use]
    pub fn with_absolute_spacing(mut self, spacing: f64) -> Self {
        self.absolute_spacing = spacing;
        self.sanitized()
    }

    /// Sets the relative spacing. Negative values are clamped to zero.
    #[must_use]
    pub fn with_relative_spacing(mut self, spacing: f64) -> Self {
        self.relative_spacing = spacing;
        self.sanitized()
    }

    /// Sets the child anchor.
    #[must_use]
    pub const fn with_child_anchor(mut self, anchor: Anchor) -> Self {
        self.child_anchor = anchor;
        self
    }

    /// Sets the stretch mode.
    #[must_use]
    pub const fn with_stretch_mode(mut self, mode: StretchMode) -> Self {
        self.stretch_mode = mode;
        self
    }

    /// Clamps negative spacing to zero.
    #[must_use]
    pub fn sanitized(mut self) -> Self {
        if self.absolute_spacing < 0.0 {
            log::warn!(
                "negative absolute spacing {} clamped to 0",
                self.absolute_spacing
            );
            self.absolute_spacing = 0.0;
        }
        if self.relative_spacing < 0.0 {
            log::warn!(
                "negative relative spacing {} clamped to 0",
                self.relative_spacing
            );
            self.relative_spacing = 0.0;
        }
        self
    }
}

/// Result of one layout pass over a group.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutOutcome {
    /// Factor applied to natural sizes and spacing; 1 when not stretching.
    pub stretch_factor: f64,
    /// Number of children arranged (ignored children excluded).
    pub arranged: usize,
}

#[derive(Clone, Copy, Debug)]
struct Measure {
    idx: u32,
    natural: f64,
    min: f64,
    max: f64,
    fixed: bool,
    scale: f64,
}

fn clamp(v: f64, lo: f64, hi: f64) -> f64 {
    v.max(lo).min(hi)
}

impl NodeStore {
    /// Attaches or removes a layout group. The group is arranged on the
    /// next [`update_layout`](Self::update_layout).
    pub fn set_layout(&mut self, id: NodeId, layout: Option<LayoutGroup>) {
        self.validate(id);
        let i = id.idx as usize;
        self.layout[i] = layout.map(LayoutGroup::sanitized);
        self.layout_dirty[i] = self.layout[i].is_some();
    }

    /// Returns the layout group attached to a node.
    #[must_use]
    pub fn layout(&self, id: NodeId) -> Option<LayoutGroup> {
        self.validate(id);
        self.layout[id.idx as usize]
    }

    /// Returns whether the node's group is waiting to be re-arranged.
    #[must_use]
    pub fn is_layout_dirty(&self, id: NodeId) -> bool {
        self.validate(id);
        self.layout[id.idx as usize].is_some() && self.layout_dirty[id.idx as usize]
    }

    /// Arranges the children of `id` now. Returns `None` if the node has no
    /// layout group.
    ///
    /// Children with `ignore_parent_layout` are skipped entirely. The cross
    /// axis of each child is left alone apart from its anchor and pivot.
    ///
    /// The stretch factor is `(group - Σmin) / (Σnatural + spacing - Σmin)`.
    /// It stays 1 when the natural total is not positive, when the mins
    /// already fill the group, or when the natural total exceeds the mins by
    /// no more than `1e-9` pixels (every child sits at its min, so there is
    /// no share to scale).
    pub fn recalculate_layout(&mut self, id: NodeId) -> Option<LayoutOutcome> {
        self.validate(id);
        let g = id.idx as usize;
        let group = self.layout[g]?;
        self.refresh();

        let kids: Vec<u32> = self
            .children(id)
            .map(NodeId::index)
            .filter(|&c| !self.flags[c as usize].ignore_parent_layout)
            .collect();
        if kids.is_empty() {
            self.layout_dirty[g] = false;
            return Some(LayoutOutcome {
                stretch_factor: 1.0,
                arranged: 0,
            });
        }

        // Square-icon children derive their along-axis min from their own
        // cross-axis size.
        let mut mins_changed = false;
        for &c in &kids {
            mins_changed |= self.resolve_basis_min(c, group.axis);
        }
        if mins_changed {
            self.refresh();
        }

        let axis = group.axis;
        let group_size = axis.size(self.rect[g].size());
        let group_ns = self.non_scaled_size[g];
        let abs_spacing = group.absolute_spacing.max(0.0);
        let rel_spacing = group.relative_spacing.max(0.0);
        let retained = group.stretch && group.stretch_mode == StretchMode::Retained;

        let measures: Vec<Measure> = kids
            .iter()
            .map(|&c| self.measure(c, axis, group_ns, retained))
            .collect();

        let stretch_factor = if group.stretch {
            let min_total: f64 = measures.iter().map(|m| m.min).sum();
            let gaps = (measures.len() - 1) as f64;
            let total: f64 = measures.iter().map(|m| m.natural).sum::<f64>()
                + gaps * (abs_spacing + rel_spacing * group_size);
            if total <= 0.0
                || min_total >= group_size
                || total - min_total <= STRETCH_EPSILON
            {
                1.0
            } else {
                (group_size - min_total) / (total - min_total)
            }
        } else {
            1.0
        };

        let mut abs_cursor = 0.0;
        let mut rel_cursor = 0.0;
        for m in &measures {
            let c = m.idx;
            self.layout_place(c, group.child_anchor, axis, rel_cursor, abs_cursor);
            if m.fixed {
                abs_cursor += m.natural;
            } else {
                let size = clamp(m.natural * stretch_factor, m.min, m.max);
                if group_size > 0.0 {
                    rel_cursor += size / group_size;
                } else {
                    abs_cursor += size;
                }
                if group.stretch {
                    let basis = axis.size(self.scale_basis[c as usize].apply(group_ns));
                    if basis > 0.0 && m.scale > 0.0 {
                        self.layout_set_relative_size(c, axis, size / m.scale / basis);
                    }
                }
            }
            abs_cursor += abs_spacing * stretch_factor;
            rel_cursor += rel_spacing * stretch_factor;
        }

        // Settle the children now so their size notifications don't re-dirty
        // this group.
        self.refresh();
        self.layout_dirty[g] = false;
        log::trace!(
            "layout {id:?}: {} children, stretch factor {stretch_factor}",
            measures.len()
        );

        Some(LayoutOutcome {
            stretch_factor,
            arranged: measures.len(),
        })
    }

    /// Arranges every dirty group, parents first. Returns the number of
    /// groups recalculated.
    ///
    /// Groups dirtied by this pass that come later in traversal order are
    /// handled in the same pass; anything else waits for the next call.
    pub fn update_layout(&mut self, tracer: &mut Tracer<'_>) -> usize {
        self.refresh();
        let mut count = 0;
        let mut pos = 0;
        while pos < self.traversal_order.len() {
            let idx = self.traversal_order[pos];
            pos += 1;
            let i = idx as usize;
            if !self.layout_dirty[i] {
                continue;
            }
            if self.layout[i].is_none() {
                self.layout_dirty[i] = false;
                continue;
            }
            let id = self.id_unchecked(idx);
            if let Some(outcome) = self.recalculate_layout(id) {
                count += 1;
                tracer.layout(&LayoutEvent {
                    node: id,
                    stretch_factor: outcome.stretch_factor,
                    arranged: outcome.arranged,
                });
            }
        }
        count
    }

    /// Measures one child along `axis`, in scaled pixels.
    fn measure(&mut self, c: u32, axis: Axis, group_ns: Size, retained: bool) -> Measure {
        let i = c as usize;
        let scale = axis.vec(self.scale[i]);
        let ns = axis.size(self.non_scaled_size[i]);
        if self.flags[i].fixed_size {
            let natural = ns * scale;
            return Measure {
                idx: c,
                natural,
                min: natural,
                max: natural,
                fixed: true,
                scale,
            };
        }
        let min_ns = axis.size(self.min_size[i]);
        let max_ns = axis.size(self.max_size[i]);
        let natural_ns = if retained {
            let snapshot = *self.stretch_basis[i].get_or_insert(self.relative_size[i]);
            let basis = axis.size(self.scale_basis[i].apply(group_ns));
            clamp(basis * axis.vec(snapshot), min_ns, max_ns)
        } else {
            ns
        };
        Measure {
            idx: c,
            natural: natural_ns * scale,
            min: min_ns * scale,
            max: max_ns * scale,
            fixed: false,
            scale,
        }
    }

    /// Sets the along-axis min of a non-normal scale-basis child to its own
    /// cross-axis size. The cross axis never reads this min back, so the
    /// child shrinks again when its parent does. Returns whether the min size
    /// changed.
    fn resolve_basis_min(&mut self, c: u32, axis: Axis) -> bool {
        let i = c as usize;
        if self.scale_basis[i] == ScaleBasis::Normal {
            return false;
        }
        let min = self.min_size[i];
        let cross = axis.cross().size(self.non_scaled_size[i]);
        let resolved = match axis {
            Axis::Horizontal => Size::new(cross, min.height),
            Axis::Vertical => Size::new(min.width, cross),
        };
        if resolved == min {
            return false;
        }
        self.min_size[i] = resolved;
        self.request_size(c, SizeRequest::FromRelative);
        self.mark_geometry(c);
        true
    }

    /// Anchors a child and sets its along-axis offsets. The cross-axis
    /// offsets are kept.
    fn layout_place(&mut self, c: u32, anchor: Anchor, axis: Axis, rel: f64, abs: f64) {
        let i = c as usize;
        let pivot = anchor.matching_pivot();
        let rel_offset = axis.with_vec(self.relative_offset[i], rel);
        let abs_offset = axis.with_vec(self.absolute_offset[i], abs);
        if self.anchor[i] == anchor
            && self.pivot[i] == pivot
            && self.relative_offset[i] == rel_offset
            && self.absolute_offset[i] == abs_offset
        {
            return;
        }
        self.anchor[i] = anchor;
        self.pivot[i] = pivot;
        self.relative_offset[i] = rel_offset;
        self.absolute_offset[i] = abs_offset;
        self.mark_geometry(c);
    }

    /// Sets the along-axis relative size without dropping the stretch
    /// snapshot.
    fn layout_set_relative_size(&mut self, c: u32, axis: Axis, value: f64) {
        let i = c as usize;
        let rel = axis.with_vec(self.relative_size[i], value);
        if self.relative_size[i] == rel {
            return;
        }
        self.relative_size[i] = rel;
        self.request_size(c, SizeRequest::FromRelative);
        self.mark_geometry(c);
        debug_assert!(self.parent[i] != INVALID, "arranged child has a parent");
    }
}
