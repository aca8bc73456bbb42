// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backend contract for platform integrations.
//!
//! Trellis keeps everything platform-specific out of the core. An
//! integration provides two pieces:
//!
//! - **Input**: Implements [`InputSampler`] to turn the platform's pointer
//!   and keyboard state into one [`InputFrame`] per tick.
//!   [`InputTracker`](crate::input::InputTracker) does the edge detection if
//!   the platform only reports "is down".
//!
//! - **Painter**: Implements [`Painter`] to draw the nodes of a
//!   [`DrawList`]. `trellis_render` provides one that turns nodes into
//!   sprite draws on any render surface.
//!
//! # Frame loop pseudocode
//!
//! ```rust,ignore
//! fn on_frame() {
//!     let input = sampler.sample();
//!
//!     // Input, layout and draw phases
//!     let out = ctx.tick(&mut store, input, &mut Tracer::none());
//!
//!     // React: open overlays, move dragged nodes, ...
//!     for event in &out.events { handle(event); }
//!
//!     // Paint what the tick produced
//!     paint(ctx.draw_list(), &store, &ctx.focus, &mut painter);
//! }
//! ```

use kurbo::Rect;

use crate::focus::{FocusModel, VisualState};
use crate::input::InputFrame;
use crate::node::{NodeId, NodeStore};
use crate::overlay::{DrawCommand, DrawList};

/// Produces one [`InputFrame`] per tick.
pub trait InputSampler {
    /// Samples the platform's input state.
    fn sample(&mut self) -> InputFrame;
}

/// Draws nodes.
pub trait Painter {
    /// Draws `node` at `rect` in the given interaction state.
    fn paint_node(&mut self, store: &NodeStore, node: NodeId, rect: Rect, state: VisualState);

    /// Restricts drawing to `rect`.
    fn push_clip(&mut self, rect: Rect);

    /// Ends the innermost clip.
    fn pop_clip(&mut self);
}

/// Replays a draw list into a painter. Nodes without `draws_content` are
/// skipped.
pub fn paint(list: &DrawList, store: &NodeStore, focus: &FocusModel, painter: &mut dyn Painter) {
    for command in list.commands() {
        match *command {
            DrawCommand::Node(node) => {
                if !store.is_alive(node) || !store.flags(node).draws_content {
                    continue;
                }
                painter.paint_node(store, node, store.cached_rect(node), focus.visual_state(node));
            }
            DrawCommand::PushClip(rect) => painter.push_clip(rect),
            DrawCommand::PopClip => painter.pop_clip(),
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use kurbo::Size;

    use super::*;
    use crate::node::{NodeFlags, NodeSpec};
    use crate::overlay::OverlayRouter;
    use crate::trace::Tracer;

    #[derive(Default)]
    struct Recorder {
        log: Vec<(Option<NodeId>, Rect)>,
    }

    impl Painter for Recorder {
        fn paint_node(&mut self, _: &NodeStore, node: NodeId, rect: Rect, _: VisualState) {
            self.log.push((Some(node), rect));
        }
        fn push_clip(&mut self, rect: Rect) {
            self.log.push((None, rect));
        }
        fn pop_clip(&mut self) {
            self.log.push((None, Rect::ZERO));
        }
    }

    #[test]
    fn paint_skips_layout_only_nodes() {
        let mut store = NodeStore::default();
        let root = store.create_node(NodeSpec::absolute(Size::new(10.0, 10.0)).with_flags(
            NodeFlags {
                clip_children: true,
                ..NodeFlags::default()
            },
        ));
        let child = store.create_child(root, NodeSpec::default().draws_content());
        let mut router = OverlayRouter::default();
        let list = DrawList::build(&mut store, &mut router, &mut Tracer::none());
        let mut painter = Recorder::default();
        paint(&list, &store, &FocusModel::default(), &mut painter);
        let full = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert_eq!(
            painter.log,
            [(None, full), (Some(child), full), (None, Rect::ZERO)]
        );
    }
}
