// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Flattened draw order with overlay injection.

use alloc::vec::Vec;

use kurbo::{Point, Rect};

use super::router::{Injection, OverlayRouter};
use crate::node::{NodeId, NodeStore};
use crate::trace::Tracer;

/// One entry of a [`DrawList`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DrawCommand {
    /// Draw a node at its cached rectangle.
    Node(NodeId),
    /// Restrict drawing to a rectangle until the matching [`DrawCommand::PopClip`].
    PushClip(Rect),
    /// End the innermost clip.
    PopClip,
}

/// Back-to-front draw order for one tick.
///
/// Built by a pre-order walk over the roots. Siblings (and roots) are drawn
/// in ascending `draw_order`, ties in child order. Hidden nodes skip their
/// whole subtree. Overlay content roots are never drawn in place; an open
/// overlay's content is drawn right after its anchor's subtree, so it sits
/// above the anchor and everything the anchor contains.
#[derive(Clone, Debug, Default)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
    nodes: Vec<NodeId>,
}

impl DrawList {
    /// Refreshes geometry, validates overlay subscriptions and builds the
    /// draw list.
    pub fn build(store: &mut NodeStore, router: &mut OverlayRouter, tracer: &mut Tracer<'_>) -> Self {
        store.refresh();
        let injections = router.injections(store, tracer);
        let mut builder = Builder {
            store,
            router,
            injections: &injections,
            list: Self::default(),
        };
        for root in sorted(builder.store, builder.store.roots()) {
            builder.visit(root, false);
        }
        builder.list
    }

    /// Commands in draw order.
    #[must_use]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Drawn nodes, back to front.
    #[must_use]
    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    /// Number of commands.
    #[must_use]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Returns whether nothing is drawn.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Position of `node` in draw order.
    #[must_use]
    pub fn position(&self, node: NodeId) -> Option<usize> {
        self.nodes.iter().position(|&n| n == node)
    }

    /// Drawn nodes, front to back.
    pub fn hit_order(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.iter().rev().copied()
    }

    /// Topmost node whose mouse rectangle contains `point` and that passes
    /// `accept`.
    pub fn hit_test(
        &self,
        store: &NodeStore,
        point: Point,
        mut accept: impl FnMut(NodeId) -> bool,
    ) -> Option<NodeId> {
        self.hit_order()
            .find(|&n| store.is_alive(n) && store.mouse_rect(n).contains(point) && accept(n))
    }
}

struct Builder<'a> {
    store: &'a NodeStore,
    router: &'a OverlayRouter,
    injections: &'a [Injection],
    list: DrawList,
}

impl Builder<'_> {
    fn visit(&mut self, node: NodeId, injected: bool) {
        let flags = self.store.flags(node);
        if flags.hidden || (!injected && self.router.is_content(node)) {
            return;
        }
        self.list.commands.push(DrawCommand::Node(node));
        self.list.nodes.push(node);
        if flags.clip_children {
            self.list
                .commands
                .push(DrawCommand::PushClip(self.store.cached_rect(node)));
        }
        let children: Vec<NodeId> = self.store.children(node).collect();
        for child in sorted(self.store, children) {
            self.visit(child, false);
        }
        if flags.clip_children {
            self.list.commands.push(DrawCommand::PopClip);
        }
        for inj in self.injections {
            if inj.anchor == node && self.store.is_alive(inj.content) {
                self.visit(inj.content, true);
            }
        }
    }
}

fn sorted(store: &NodeStore, mut nodes: Vec<NodeId>) -> Vec<NodeId> {
    nodes.sort_by_key(|&n| store.draw_order(n));
    nodes
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use kurbo::{Size, Vec2};

    use super::*;
    use crate::node::{NodeFlags, NodeSpec};

    fn nodes_of(list: &DrawList) -> Vec<NodeId> {
        list.nodes().to_vec()
    }

    #[test]
    fn preorder_with_draw_order() {
        let mut store = NodeStore::default();
        let root = store.create_node(NodeSpec::default());
        let a = store.create_child(root, NodeSpec::default().with_draw_order(1));
        let b = store.create_child(root, NodeSpec::default());
        let a1 = store.create_child(a, NodeSpec::default());
        let mut router = OverlayRouter::default();
        let list = DrawList::build(&mut store, &mut router, &mut Tracer::none());
        assert_eq!(nodes_of(&list), vec![root, b, a, a1]);
    }

    #[test]
    fn hidden_subtree_is_skipped() {
        let mut store = NodeStore::default();
        let root = store.create_node(NodeSpec::default());
        let hidden = store.create_child(
            root,
            NodeSpec::default().with_flags(NodeFlags {
                hidden: true,
                ..NodeFlags::default()
            }),
        );
        let _inner = store.create_child(hidden, NodeSpec::default());
        let mut router = OverlayRouter::default();
        let list = DrawList::build(&mut store, &mut router, &mut Tracer::none());
        assert_eq!(nodes_of(&list), vec![root]);
    }

    #[test]
    fn clip_brackets_children() {
        let mut store = NodeStore::default();
        let root = store.create_node(NodeSpec::absolute(Size::new(50.0, 50.0)).with_flags(
            NodeFlags {
                clip_children: true,
                ..NodeFlags::default()
            },
        ));
        let child = store.create_child(root, NodeSpec::default());
        let mut router = OverlayRouter::default();
        let list = DrawList::build(&mut store, &mut router, &mut Tracer::none());
        assert_eq!(
            list.commands(),
            &[
                DrawCommand::Node(root),
                DrawCommand::PushClip(Rect::new(0.0, 0.0, 50.0, 50.0)),
                DrawCommand::Node(child),
                DrawCommand::PopClip,
            ]
        );
    }

    #[test]
    fn open_overlay_draws_after_anchor_subtree() {
        let mut store = NodeStore::default();
        let root = store.create_node(NodeSpec::default());
        let panel = store.create_child(root, NodeSpec::default().draws_content());
        let owner = store.create_child(panel, NodeSpec::default().draws_content());
        let sibling = store.create_child(root, NodeSpec::default().with_draw_order(5));
        let content = store.create_node(NodeSpec::default().draws_content());
        let item = store.create_child(content, NodeSpec::default());

        let mut router = OverlayRouter::default();
        let id = router.subscribe(&store, owner, content).unwrap();

        let closed = DrawList::build(&mut store, &mut router, &mut Tracer::none());
        assert_eq!(nodes_of(&closed), vec![root, panel, owner, sibling]);

        router.open(&store, id).unwrap();
        let open = DrawList::build(&mut store, &mut router, &mut Tracer::none());
        assert_eq!(
            nodes_of(&open),
            vec![root, panel, owner, content, item, sibling]
        );
    }

    #[test]
    fn hit_test_prefers_topmost() {
        let mut store = NodeStore::default();
        let root = store.create_node(NodeSpec::absolute(Size::new(100.0, 100.0)));
        let under = store.create_child(root, NodeSpec::absolute(Size::new(50.0, 50.0)));
        let over = store.create_child(
            root,
            NodeSpec::absolute(Size::new(50.0, 50.0)).with_absolute_offset(Vec2::new(25.0, 25.0)),
        );
        let mut router = OverlayRouter::default();
        let list = DrawList::build(&mut store, &mut router, &mut Tracer::none());
        assert_eq!(
            list.hit_test(&store, Point::new(30.0, 30.0), |_| true),
            Some(over)
        );
        assert_eq!(
            list.hit_test(&store, Point::new(10.0, 10.0), |_| true),
            Some(under)
        );
        assert_eq!(
            list.hit_test(&store, Point::new(10.0, 10.0), |n| n == root),
            Some(root)
        );
        assert_eq!(list.position(over), Some(2));
    }
}
