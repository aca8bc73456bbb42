// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Frozen copies of the node tree for inspection and diffing.
//!
//! [`TreeSnapshot::capture`] walks every root, refreshing geometry as it
//! goes, and records what each node resolved to. Snapshots serialize to JSON
//! with [`TreeSnapshot::to_json`] and print as an indented outline with
//! [`TreeSnapshot::write_outline`].

use std::io::{self, Write};

use kurbo::{Rect, Size, Vec2};
use serde::{Deserialize, Serialize};

use trellis_core::geometry::{Anchor, Pivot};
use trellis_core::layout::LayoutGroup;
use trellis_core::node::{NodeFlags, NodeId, NodeStore};
use trellis_core::viewport::Viewport;

/// One node as it was at capture time.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NodeSnapshot {
    /// Slot index.
    pub index: u32,
    /// Slot generation.
    pub generation: u32,
    /// Absolute rectangle.
    pub rect: Rect,
    /// Size before scaling.
    pub non_scaled_size: Size,
    /// Size relative to the parent.
    pub relative_size: Vec2,
    /// Inherited scale.
    pub scale: Vec2,
    /// Anchor on the parent.
    pub anchor: Anchor,
    /// Pivot on this node.
    pub pivot: Pivot,
    /// Flags.
    pub flags: NodeFlags,
    /// Sibling draw order.
    pub draw_order: i32,
    /// Layout group, if the node arranges its children.
    pub layout: Option<LayoutGroup>,
    /// Children in order.
    pub children: Vec<NodeSnapshot>,
}

impl NodeSnapshot {
    fn capture(store: &mut NodeStore, id: NodeId) -> Self {
        let children: Vec<NodeId> = store.children(id).collect();
        Self {
            index: id.index(),
            generation: id.generation(),
            rect: store.rect(id),
            non_scaled_size: store.non_scaled_size(id),
            relative_size: store.relative_size(id),
            scale: store.scale(id),
            anchor: store.anchor(id),
            pivot: store.pivot(id),
            flags: store.flags(id),
            draw_order: store.draw_order(id),
            layout: store.layout(id),
            children: children
                .into_iter()
                .map(|c| Self::capture(store, c))
                .collect(),
        }
    }

    fn count(&self) -> usize {
        1 + self.children.iter().map(Self::count).sum::<usize>()
    }

    fn write_outline(&self, out: &mut dyn Write, depth: usize) -> io::Result<()> {
        let r = self.rect;
        write!(
            out,
            "{:indent$}#{} [{:.1}, {:.1}, {:.1} x {:.1}] {:?}/{:?}",
            "",
            self.index,
            r.x0,
            r.y0,
            r.width(),
            r.height(),
            self.anchor,
            self.pivot,
            indent = depth * 2
        )?;
        if let Some(layout) = self.layout {
            write!(out, " layout={:?}", layout.axis)?;
            if layout.stretch {
                write!(out, " stretch")?;
            }
        }
        if self.flags.hidden {
            write!(out, " hidden")?;
        }
        writeln!(out)?;
        for child in &self.children {
            child.write_outline(out, depth + 1)?;
        }
        Ok(())
    }
}

/// The whole tree at capture time.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TreeSnapshot {
    /// Viewport the tree was laid out in.
    pub viewport: Viewport,
    /// Root subtrees in slot order.
    pub roots: Vec<NodeSnapshot>,
}

impl TreeSnapshot {
    /// Captures every live node.
    pub fn capture(store: &mut NodeStore) -> Self {
        let roots = store.roots();
        Self {
            viewport: store.viewport(),
            roots: roots
                .into_iter()
                .map(|r| NodeSnapshot::capture(store, r))
                .collect(),
        }
    }

    /// Number of captured nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.roots.iter().map(NodeSnapshot::count).sum()
    }

    /// Finds a captured node by slot index.
    #[must_use]
    pub fn find(&self, index: u32) -> Option<&NodeSnapshot> {
        fn search(nodes: &[NodeSnapshot], index: u32) -> Option<&NodeSnapshot> {
            nodes.iter().find_map(|n| {
                if n.index == index {
                    Some(n)
                } else {
                    search(&n.children, index)
                }
            })
        }
        search(&self.roots, index)
    }

    /// Pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Parses JSON produced by [`to_json`](Self::to_json).
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Writes an indented outline, one node per line.
    pub fn write_outline(&self, out: &mut dyn Write) -> io::Result<()> {
        for root in &self.roots {
            root.write_outline(out, 0)?;
        }
        Ok(())
    }
}
