// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Creation parameters and per-node flags.

use kurbo::{Size, Vec2};

use crate::geometry::{Anchor, Pivot, ScaleBasis};

/// Per-node boolean flags.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct NodeFlags {
    /// The node keeps its non-scaled size when its parent resizes. Scaling
    /// still applies.
    pub fixed_size: bool,
    /// Layout groups skip this node entirely.
    pub ignore_parent_layout: bool,
    /// The node paints something itself, as opposed to being a pure layout
    /// container. Overlay routing only injects after nodes that draw.
    pub draws_content: bool,
    /// The node and its subtree are neither drawn nor hit-tested.
    pub hidden: bool,
    /// The node takes part in hover and press resolution.
    pub can_be_focused: bool,
    /// The node's mouse rectangle is clamped to its parent's.
    pub clamp_mouse_rect_to_parent: bool,
    /// Descendants are clipped to this node's rectangle when drawn and
    /// hit-tested.
    pub clip_children: bool,
}

impl Default for NodeFlags {
    fn default() -> Self {
        Self {
            fixed_size: false,
            ignore_parent_layout: false,
            draws_content: false,
            hidden: false,
            can_be_focused: true,
            clamp_mouse_rect_to_parent: false,
            clip_children: false,
        }
    }
}

/// How a node's initial size is given.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SizeSpec {
    /// A fraction of the parent's (scale-basis adjusted) non-scaled size.
    Relative(Vec2),
    /// A non-scaled size in pixels. The relative size is derived from the
    /// parent on the next geometry refresh.
    Absolute(Size),
}

/// Parameters for [`NodeStore::create_node`](super::NodeStore::create_node).
///
/// ```
/// use kurbo::{Size, Vec2};
/// use trellis_core::geometry::Anchor;
/// use trellis_core::node::NodeSpec;
///
/// let spec = NodeSpec::relative(Vec2::new(0.5, 1.0))
///     .with_anchor(Anchor::Center)
///     .with_min_size(Size::new(40.0, 0.0));
/// assert_eq!(spec.anchor, Anchor::Center);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeSpec {
    /// Initial size.
    pub size: SizeSpec,
    /// Attachment point on the parent.
    pub anchor: Anchor,
    /// Point placed on the anchor; `None` uses the anchor's matching pivot.
    pub pivot: Option<Pivot>,
    /// Lower size clamp (non-scaled pixels).
    pub min_size: Size,
    /// Upper size clamp (non-scaled pixels).
    pub max_size: Size,
    /// Relative sizing basis.
    pub scale_basis: ScaleBasis,
    /// Offset as a fraction of the parent rectangle.
    pub relative_offset: Vec2,
    /// Offset in pixels, pointing away from the anchor.
    pub absolute_offset: Vec2,
    /// Per-node scale multiplied into every descendant.
    pub local_scale: Vec2,
    /// Sibling draw priority band; lower draws first.
    pub draw_order: i32,
    /// Flags.
    pub flags: NodeFlags,
}

impl Default for NodeSpec {
    fn default() -> Self {
        Self::relative(Vec2::new(1.0, 1.0))
    }
}

impl NodeSpec {
    /// A node sized relative to its parent.
    #[must_use]
    pub fn relative(relative_size: Vec2) -> Self {
        Self::with_size(SizeSpec::Relative(relative_size))
    }

    /// A node with an absolute non-scaled size.
    #[must_use]
    pub fn absolute(size: Size) -> Self {
        Self::with_size(SizeSpec::Absolute(size))
    }

    fn with_size(size: SizeSpec) -> Self {
        Self {
            size,
            anchor: Anchor::TopLeft,
            pivot: None,
            min_size: Size::ZERO,
            max_size: Size::new(f64::INFINITY, f64::INFINITY),
            scale_basis: ScaleBasis::Normal,
            relative_offset: Vec2::ZERO,
            absolute_offset: Vec2::ZERO,
            local_scale: Vec2::new(1.0, 1.0),
            draw_order: 0,
            flags: NodeFlags::default(),
        }
    }

    /// Sets the anchor.
    #[must_use]
    pub fn with_anchor(mut self, anchor: Anchor) -> Self {
        self.anchor = anchor;
        self
    }

    /// Sets an explicit pivot.
    #[must_use]
    pub fn with_pivot(mut self, pivot: Pivot) -> Self {
        self.pivot = Some(pivot);
        self
    }

    /// Sets the minimum size.
    #[must_use]
    pub fn with_min_size(mut self, min_size: Size) -> Self {
        self.min_size = min_size;
        self
    }

    /// Sets the maximum size.
    #[must_use]
    pub fn with_max_size(mut self, max_size: Size) -> Self {
        self.max_size = max_size;
        self
    }

    /// Sets the scale basis.
    #[must_use]
    pub fn with_scale_basis(mut self, scale_basis: ScaleBasis) -> Self {
        self.scale_basis = scale_basis;
        self
    }

    /// Sets the relative offset.
    #[must_use]
    pub fn with_relative_offset(mut self, offset: Vec2) -> Self {
        self.relative_offset = offset;
        self
    }

    /// Sets the absolute offset.
    #[must_use]
    pub fn with_absolute_offset(mut self, offset: Vec2) -> Self {
        self.absolute_offset = offset;
        self
    }

    /// Sets the local scale.
    #[must_use]
    pub fn with_local_scale(mut self, scale: Vec2) -> Self {
        self.local_scale = scale;
        self
    }

    /// Sets the draw order band.
    #[must_use]
    pub fn with_draw_order(mut self, draw_order: i32) -> Self {
        self.draw_order = draw_order;
        self
    }

    /// Replaces all flags.
    #[must_use]
    pub fn with_flags(mut self, flags: NodeFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Marks the node as drawing its own content.
    #[must_use]
    pub fn draws_content(mut self) -> Self {
        self.flags.draws_content = true;
        self
    }

    /// Marks the node as fixed-size.
    #[must_use]
    pub fn fixed(mut self) -> Self {
        self.flags.fixed_size = true;
        self
    }

    /// Excludes the node from its parent's layout group.
    #[must_use]
    pub fn ignore_parent_layout(mut self) -> Self {
        self.flags.ignore_parent_layout = true;
        self
    }
}

/// Pending size work for the next geometry refresh.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum SizeRequest {
    /// Recompute only if the parent's non-scaled size changed.
    None,
    /// Recompute the non-scaled size from the relative size, even for
    /// fixed-size nodes.
    Initial,
    /// Recompute the non-scaled size from the relative size.
    FromRelative,
    /// Keep the explicit non-scaled size and derive the relative size.
    FromAbsolute,
}
