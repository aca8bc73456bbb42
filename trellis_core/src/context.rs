// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The per-frame tick driver.
//!
//! [`UiContext`] owns the state that outlives a single node: focus and drag,
//! open overlays, the last input frame and the last draw list. One call to
//! [`UiContext::tick`] runs the three phases of a frame:
//!
//! 1. **Input**: hover, press, drag and selection against the previous
//!    frame's draw list; a primary press outside every open overlay closes
//!    it; Escape closes the innermost one.
//! 2. **Layout**: dirty layout groups are re-arranged and the store is
//!    evaluated; overlay subscriptions see the resulting notifications.
//! 3. **Draw**: a fresh draw list is built with open overlays injected.
//!
//! Anything event handlers change between ticks (moving a dragged node,
//! opening a dropdown) is picked up by the next tick's layout phase.

use alloc::vec::Vec;

use crate::focus::{FocusConfig, FocusEvent, FocusModel};
use crate::input::{InputFrame, KeyCode};
use crate::node::{FrameChanges, NodeStore};
use crate::overlay::{DrawList, OverlayConfig, OverlayId, OverlayRouter};
use crate::trace::{FrameSummary, FrameTickEvent, PhaseBeginEvent, PhaseEndEvent, PhaseKind, Tracer};
use crate::viewport::Viewport;

/// What one tick produced.
#[derive(Clone, Debug, Default)]
pub struct TickOutput {
    /// Store notifications drained this tick.
    pub changes: FrameChanges,
    /// Focus events, in order.
    pub events: Vec<FocusEvent>,
    /// Overlays closed by the input phase, innermost first.
    pub closed_overlays: Vec<OverlayId>,
    /// Layout groups re-arranged.
    pub layouts: usize,
}

/// Explicit UI state threaded through every tick.
#[derive(Debug, Default)]
pub struct UiContext {
    /// Hover, press, drag and selection.
    pub focus: FocusModel,
    /// Overlay subscriptions and the open stack.
    pub overlays: OverlayRouter,
    input: InputFrame,
    draw_list: DrawList,
    frame_index: u64,
}

impl UiContext {
    /// Creates a context.
    #[must_use]
    pub fn new(focus: FocusConfig, overlays: OverlayConfig) -> Self {
        Self {
            focus: FocusModel::new(focus),
            overlays: OverlayRouter::new(overlays),
            ..Self::default()
        }
    }

    /// Input of the most recent tick.
    #[must_use]
    pub fn input(&self) -> &InputFrame {
        &self.input
    }

    /// Draw list built by the most recent tick.
    #[must_use]
    pub fn draw_list(&self) -> &DrawList {
        &self.draw_list
    }

    /// Number of completed ticks.
    #[must_use]
    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }

    /// Applies a new viewport (window resize, HUD scale change).
    pub fn set_viewport(&mut self, store: &mut NodeStore, viewport: Viewport) {
        if store.viewport() != viewport {
            log::debug!(
                "viewport {:?} -> {:?}, ui scale {}",
                store.viewport().size,
                viewport.size,
                viewport.ui_scale()
            );
            store.set_viewport(viewport);
        }
    }

    /// Runs one frame: input, layout, draw.
    pub fn tick(&mut self, store: &mut NodeStore, input: InputFrame, tracer: &mut Tracer<'_>) -> TickOutput {
        let frame_index = self.frame_index;
        tracer.frame_tick(&FrameTickEvent {
            frame_index,
            pointer: input.pointer,
            viewport: store.viewport().size,
        });
        let mut out = TickOutput::default();

        tracer.phase_begin(&PhaseBeginEvent {
            frame_index,
            phase: PhaseKind::Input,
        });
        out.events = self.focus.update(store, &self.draw_list, &input, tracer);
        if input.primary.pressed {
            out.closed_overlays = self.overlays.close_on_click_outside(store, input.pointer);
        }
        if input.key_pressed(KeyCode::ESCAPE)
            && let Some(id) = self.overlays.close_top()
        {
            out.closed_overlays.push(id);
        }
        tracer.phase_end(&PhaseEndEvent {
            frame_index,
            phase: PhaseKind::Input,
        });

        tracer.phase_begin(&PhaseBeginEvent {
            frame_index,
            phase: PhaseKind::Layout,
        });
        out.layouts = store.update_layout(tracer);
        store.evaluate_into(&mut out.changes);
        self.overlays.sync(store, &out.changes);
        tracer.phase_end(&PhaseEndEvent {
            frame_index,
            phase: PhaseKind::Layout,
        });

        tracer.phase_begin(&PhaseBeginEvent {
            frame_index,
            phase: PhaseKind::Draw,
        });
        self.draw_list = DrawList::build(store, &mut self.overlays, tracer);
        tracer.phase_end(&PhaseEndEvent {
            frame_index,
            phase: PhaseKind::Draw,
        });

        tracer.frame_summary(&FrameSummary {
            frame_index,
            layouts: out.layouts,
            draw_commands: self.draw_list.len(),
            events: out.events.len(),
            overlays_open: self.overlays.open_chain().len(),
            topology_changed: out.changes.topology_changed,
        });
        self.input = input;
        self.frame_index += 1;
        out
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Size};

    use super::*;
    use crate::input::ButtonState;
    use crate::node::NodeSpec;

    #[test]
    fn first_tick_builds_draw_list() {
        let mut store = NodeStore::default();
        let root = store.create_node(NodeSpec::default().draws_content());
        let mut ctx = UiContext::default();
        let out = ctx.tick(&mut store, InputFrame::at(Point::new(5.0, 5.0)), &mut Tracer::none());
        assert!(out.changes.added.contains(&root.index()));
        assert!(out.events.is_empty());
        assert_eq!(ctx.draw_list().nodes(), &[root]);
        assert_eq!(ctx.frame_index(), 1);

        // Hover resolves against the list built by the previous tick.
        let out = ctx.tick(&mut store, InputFrame::at(Point::new(5.0, 5.0)), &mut Tracer::none());
        assert_eq!(out.events, [FocusEvent::HoverEnter(root)]);
    }

    #[test]
    fn escape_closes_innermost_overlay() {
        let mut store = NodeStore::default();
        let root = store.create_node(NodeSpec::default());
        let owner = store.create_child(root, NodeSpec::absolute(Size::new(10.0, 10.0)));
        let list = store.create_node(NodeSpec::absolute(Size::new(10.0, 10.0)));
        let mut ctx = UiContext::default();
        let id = ctx.overlays.subscribe(&store, owner, list).unwrap();
        ctx.overlays.open(&store, id).unwrap();

        let input = InputFrame {
            keys: alloc::vec![KeyCode::ESCAPE],
            ..InputFrame::default()
        };
        let out = ctx.tick(&mut store, input, &mut Tracer::none());
        assert_eq!(out.closed_overlays, [id]);
        assert!(ctx.overlays.open_chain().is_empty());
    }

    #[test]
    fn press_outside_closes_overlay() {
        let mut store = NodeStore::default();
        let root = store.create_node(NodeSpec::default());
        let owner = store.create_child(root, NodeSpec::absolute(Size::new(10.0, 10.0)));
        let list = store.create_node(NodeSpec::absolute(Size::new(10.0, 10.0)));
        let mut ctx = UiContext::default();
        let id = ctx.overlays.subscribe(&store, owner, list).unwrap();
        ctx.overlays.open(&store, id).unwrap();
        let _ = ctx.tick(&mut store, InputFrame::default(), &mut Tracer::none());
        assert!(ctx.overlays.is_open(id));

        let input = InputFrame {
            pointer: Point::new(500.0, 500.0),
            primary: ButtonState::from_transition(false, true),
            ..InputFrame::default()
        };
        let out = ctx.tick(&mut store, input, &mut Tracer::none());
        assert_eq!(out.closed_overlays, [id]);
    }
}
