// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::collections::{BTreeMap, BTreeSet};
use alloc::vec::Vec;

use kurbo::{Point, Vec2};

use crate::input::InputFrame;
use crate::node::{NodeId, NodeStore};
use crate::overlay::DrawList;
use crate::trace::{DragEvent, DragPhase, Tracer};

/// How a node reacts to the primary button.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Behavior {
    /// A press claims a drag session.
    pub draggable: bool,
    /// A click flips selection.
    pub toggle: bool,
}

impl Behavior {
    /// Draggable, not toggling.
    pub const DRAGGABLE: Self = Self {
        draggable: true,
        toggle: false,
    };
    /// Toggling, not draggable.
    pub const TOGGLE: Self = Self {
        draggable: false,
        toggle: true,
    };
}

/// Focus configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FocusConfig {
    /// Allow more than one selected node.
    pub multi_select: bool,
}

/// Resolved interaction state of a node, used to pick a tint or sprite.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VisualState {
    /// Nothing going on.
    #[default]
    Idle,
    /// Under the pointer or externally highlighted.
    Hover,
    /// Pressed and not yet released, or being dragged.
    Pressed,
    /// Selected.
    Selected,
    /// Selected and hovered.
    HoverSelected,
}

/// What happened during a tick, in order.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FocusEvent {
    /// The pointer started hovering a node.
    HoverEnter(NodeId),
    /// The pointer stopped hovering a node.
    HoverLeave(NodeId),
    /// The primary button went down over a node.
    Pressed(NodeId),
    /// The primary button went up over the node it went down on.
    Clicked(NodeId),
    /// The secondary button went up over a node.
    SecondaryClicked(NodeId),
    /// A click flipped a toggle.
    Toggled {
        /// The toggle.
        node: NodeId,
        /// Selection after the flip.
        selected: bool,
    },
    /// A claimed drag moved for the first time.
    DragStarted {
        /// Drag owner.
        owner: NodeId,
        /// Pointer position.
        position: Point,
    },
    /// A live drag moved.
    Dragged {
        /// Drag owner.
        owner: NodeId,
        /// Pointer movement this tick.
        delta: Vec2,
    },
    /// The primary button was released; the drag is over.
    Released {
        /// Former drag owner.
        owner: NodeId,
        /// Pointer position at release.
        position: Point,
        /// Pointer movement accumulated since the press.
        total_delta: Vec2,
    },
}

#[derive(Clone, Copy, Debug)]
struct DragSession {
    owner: NodeId,
    total_delta: Vec2,
    started: bool,
}

/// Hover, press, drag and selection state for the whole UI.
///
/// There is at most one hovered node, one pressed node and one drag owner.
/// Hover is resolved against the previous tick's [`DrawList`]: the topmost
/// node whose mouse rectangle contains the pointer. While the primary button
/// is held the previous hover is kept, and while a drag is live the drag
/// owner is the hover.
#[derive(Clone, Debug, Default)]
pub struct FocusModel {
    config: FocusConfig,
    behaviors: BTreeMap<NodeId, Behavior>,
    highlighted: BTreeSet<NodeId>,
    selected: Vec<NodeId>,
    hover: Option<NodeId>,
    pressed: Option<NodeId>,
    drag: Option<DragSession>,
}

impl FocusModel {
    /// Creates an empty model.
    #[must_use]
    pub fn new(config: FocusConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> FocusConfig {
        self.config
    }

    /// Sets how `node` reacts to the primary button.
    pub fn set_behavior(&mut self, node: NodeId, behavior: Behavior) {
        if behavior == Behavior::default() {
            self.behaviors.remove(&node);
        } else {
            self.behaviors.insert(node, behavior);
        }
    }

    /// Returns how `node` reacts to the primary button.
    #[must_use]
    pub fn behavior(&self, node: NodeId) -> Behavior {
        self.behaviors.get(&node).copied().unwrap_or_default()
    }

    /// Forces hover visuals on a node regardless of the pointer.
    pub fn set_external_highlight(&mut self, node: NodeId, on: bool) {
        if on {
            self.highlighted.insert(node);
        } else {
            self.highlighted.remove(&node);
        }
    }

    /// Hovered node.
    #[must_use]
    pub fn hover(&self) -> Option<NodeId> {
        self.hover
    }

    /// Node the primary button went down on, until release.
    #[must_use]
    pub fn pressed(&self) -> Option<NodeId> {
        self.pressed
    }

    /// Current drag owner, claimed or live.
    #[must_use]
    pub fn drag_owner(&self) -> Option<NodeId> {
        self.drag.map(|d| d.owner)
    }

    /// Returns whether a claimed drag has moved.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some_and(|d| d.started)
    }

    /// Pointer movement accumulated by the current drag.
    #[must_use]
    pub fn drag_delta(&self) -> Vec2 {
        self.drag.map_or(Vec2::ZERO, |d| d.total_delta)
    }

    /// Selected nodes in selection order.
    #[must_use]
    pub fn selected(&self) -> &[NodeId] {
        &self.selected
    }

    /// Returns whether `node` is selected.
    #[must_use]
    pub fn is_selected(&self, node: NodeId) -> bool {
        self.selected.contains(&node)
    }

    /// Selects `node`. Without multi-select this replaces the selection.
    pub fn select(&mut self, node: NodeId) {
        if self.is_selected(node) {
            return;
        }
        if !self.config.multi_select {
            self.selected.clear();
        }
        self.selected.push(node);
    }

    /// Deselects `node`.
    pub fn deselect(&mut self, node: NodeId) {
        self.selected.retain(|&n| n != node);
    }

    /// Clears the selection.
    pub fn clear_selection(&mut self) {
        self.selected.clear();
    }

    /// Topmost node in `list` whose mouse rectangle contains `point`.
    #[must_use]
    pub fn hit_test(&self, store: &NodeStore, list: &DrawList, point: Point) -> Option<NodeId> {
        list.hit_test(store, point, |_| true)
    }

    /// Resolves the visual state of `node`.
    #[must_use]
    pub fn visual_state(&self, node: NodeId) -> VisualState {
        let hovered = self.hover == Some(node) || self.highlighted.contains(&node);
        if self.pressed == Some(node) || self.drag_owner() == Some(node) {
            VisualState::Pressed
        } else if self.is_selected(node) {
            if hovered {
                VisualState::HoverSelected
            } else {
                VisualState::Selected
            }
        } else if hovered {
            VisualState::Hover
        } else {
            VisualState::Idle
        }
    }

    /// Advances one tick and returns what happened.
    ///
    /// `list` is the draw list the user is looking at, normally the one built
    /// at the end of the previous tick.
    pub fn update(
        &mut self,
        store: &NodeStore,
        list: &DrawList,
        input: &InputFrame,
        tracer: &mut Tracer<'_>,
    ) -> Vec<FocusEvent> {
        self.prune(store);
        let mut events = Vec::new();
        let pointer = input.pointer;

        let hit = self.hit_test(store, list, pointer);
        let hover = if input.primary.pressed {
            hit
        } else if let Some(drag) = self.drag {
            Some(drag.owner)
        } else if input.primary.held {
            self.hover
        } else {
            hit
        };
        self.set_hover(hover, &mut events);

        if input.primary.pressed {
            self.press(hover, pointer, &mut events, tracer);
        } else if input.primary.held {
            self.drag_moved(input.delta, pointer, &mut events, tracer);
        }

        if !input.primary.held {
            self.release(store, pointer, &mut events, tracer);
        }

        if input.secondary.clicked
            && let Some(node) = hit
        {
            events.push(FocusEvent::SecondaryClicked(node));
        }
        events
    }

    fn set_hover(&mut self, hover: Option<NodeId>, events: &mut Vec<FocusEvent>) {
        if hover == self.hover {
            return;
        }
        if let Some(old) = self.hover {
            events.push(FocusEvent::HoverLeave(old));
        }
        if let Some(new) = hover {
            events.push(FocusEvent::HoverEnter(new));
        }
        self.hover = hover;
    }

    fn press(
        &mut self,
        target: Option<NodeId>,
        pointer: Point,
        events: &mut Vec<FocusEvent>,
        tracer: &mut Tracer<'_>,
    ) {
        self.pressed = target;
        // A new press always overrides a stale session.
        self.drag = None;
        let Some(node) = target else {
            return;
        };
        events.push(FocusEvent::Pressed(node));
        if self.behavior(node).draggable {
            log::trace!("{node:?} claimed drag at {pointer:?}");
            self.drag = Some(DragSession {
                owner: node,
                total_delta: Vec2::ZERO,
                started: false,
            });
            tracer.drag(&DragEvent {
                phase: DragPhase::Claimed,
                owner: node,
                position: pointer,
                total_delta: Vec2::ZERO,
            });
        }
    }

    fn drag_moved(
        &mut self,
        delta: Vec2,
        pointer: Point,
        events: &mut Vec<FocusEvent>,
        tracer: &mut Tracer<'_>,
    ) {
        let Some(drag) = &mut self.drag else {
            return;
        };
        if delta == Vec2::ZERO {
            return;
        }
        drag.total_delta += delta;
        if !drag.started {
            drag.started = true;
            events.push(FocusEvent::DragStarted {
                owner: drag.owner,
                position: pointer,
            });
            tracer.drag(&DragEvent {
                phase: DragPhase::Started,
                owner: drag.owner,
                position: pointer,
                total_delta: drag.total_delta,
            });
        }
        events.push(FocusEvent::Dragged {
            owner: drag.owner,
            delta,
        });
    }

    fn release(
        &mut self,
        store: &NodeStore,
        pointer: Point,
        events: &mut Vec<FocusEvent>,
        tracer: &mut Tracer<'_>,
    ) {
        if let Some(drag) = self.drag.take() {
            events.push(FocusEvent::Released {
                owner: drag.owner,
                position: pointer,
                total_delta: drag.total_delta,
            });
            tracer.drag(&DragEvent {
                phase: DragPhase::Released,
                owner: drag.owner,
                position: pointer,
                total_delta: drag.total_delta,
            });
        }
        let Some(node) = self.pressed.take() else {
            return;
        };
        if !store.mouse_rect(node).contains(pointer) {
            return;
        }
        events.push(FocusEvent::Clicked(node));
        if self.behavior(node).toggle {
            let selected = !self.is_selected(node);
            if selected {
                self.select(node);
            } else {
                self.deselect(node);
            }
            events.push(FocusEvent::Toggled { node, selected });
        }
    }

    fn prune(&mut self, store: &NodeStore) {
        let alive = |n: &NodeId| store.is_alive(*n);
        self.hover = self.hover.filter(alive);
        self.pressed = self.pressed.filter(alive);
        self.drag = self.drag.filter(|d| store.is_alive(d.owner));
        self.selected.retain(alive);
        self.highlighted.retain(alive);
        self.behaviors.retain(|n, _| store.is_alive(*n));
    }
}
