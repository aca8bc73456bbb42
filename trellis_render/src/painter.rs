// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Turns draw-list nodes into sprite draws.

use alloc::collections::BTreeMap;
use alloc::vec::Vec;

use kurbo::{Point, Rect};
use trellis_core::backend::Painter;
use trellis_core::focus::VisualState;
use trellis_core::node::{NodeId, NodeStore};

use crate::sprite::UiSprite;
use crate::surface::{Color, RenderSurface};

/// How one node looks.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeVisual {
    /// Sprites drawn back to front.
    pub sprites: Vec<UiSprite>,
    /// Tint when idle.
    pub color: Color,
    /// Tint under the pointer.
    pub hover_color: Color,
    /// Tint while pressed.
    pub pressed_color: Color,
    /// Tint when selected.
    pub selected_color: Color,
}

impl Default for NodeVisual {
    fn default() -> Self {
        Self {
            sprites: Vec::new(),
            color: Color::WHITE,
            hover_color: Color::WHITE,
            pressed_color: Color::WHITE,
            selected_color: Color::WHITE,
        }
    }
}

impl NodeVisual {
    /// A visual with one sprite and white tints.
    #[must_use]
    pub fn sprite(sprite: UiSprite) -> Self {
        Self {
            sprites: alloc::vec![sprite],
            ..Self::default()
        }
    }

    /// Tint for an interaction state. Hovering a selected node modulates the
    /// selected tint by the hover tint.
    #[must_use]
    pub fn tint(&self, state: VisualState) -> Color {
        match state {
            VisualState::Idle => self.color,
            VisualState::Hover => self.hover_color,
            VisualState::Pressed => self.pressed_color,
            VisualState::Selected => self.selected_color,
            VisualState::HoverSelected => self.selected_color.modulate(self.hover_color),
        }
    }
}

/// Visuals keyed by node.
#[derive(Clone, Debug, Default)]
pub struct VisualTable {
    visuals: BTreeMap<NodeId, NodeVisual>,
}

impl VisualTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the visual of `node`, returning the previous one.
    pub fn insert(&mut self, node: NodeId, visual: NodeVisual) -> Option<NodeVisual> {
        self.visuals.insert(node, visual)
    }

    /// Removes the visual of `node`.
    pub fn remove(&mut self, node: NodeId) -> Option<NodeVisual> {
        self.visuals.remove(&node)
    }

    /// Visual of `node`.
    #[must_use]
    pub fn get(&self, node: NodeId) -> Option<&NodeVisual> {
        self.visuals.get(&node)
    }

    /// Drops visuals of destroyed nodes.
    pub fn retain_alive(&mut self, store: &NodeStore) {
        self.visuals.retain(|&n, _| store.is_alive(n));
    }
}

/// A [`Painter`] that draws each node's sprites onto a [`RenderSurface`].
#[derive(Debug)]
pub struct NodePainter<'a, S: RenderSurface> {
    surface: &'a mut S,
    visuals: &'a VisualTable,
    ui_scale: f64,
    outline: Option<Color>,
}

impl<'a, S: RenderSurface> NodePainter<'a, S> {
    /// Creates a painter. `ui_scale` caps nine-slice border scaling.
    pub fn new(surface: &'a mut S, visuals: &'a VisualTable, ui_scale: f64) -> Self {
        Self {
            surface,
            visuals,
            ui_scale,
            outline: None,
        }
    }

    /// Also outlines every painted node's rectangle in `color`.
    #[must_use]
    pub fn with_debug_outlines(mut self, color: Color) -> Self {
        self.outline = Some(color);
        self
    }
}

impl<S: RenderSurface> Painter for NodePainter<'_, S> {
    fn paint_node(&mut self, _store: &NodeStore, node: NodeId, rect: Rect, state: VisualState) {
        if let Some(visual) = self.visuals.get(node) {
            let tint = visual.tint(state);
            if !tint.is_invisible() {
                for sprite in &visual.sprites {
                    sprite.draw(&mut *self.surface, rect, tint, self.ui_scale);
                }
            }
        }
        if let Some(color) = self.outline {
            outline(&mut *self.surface, rect, color);
        }
    }

    fn push_clip(&mut self, rect: Rect) {
        self.surface.push_clip_rect(rect);
    }

    fn pop_clip(&mut self) {
        self.surface.pop_clip_rect();
    }
}

fn outline(surface: &mut dyn RenderSurface, r: Rect, color: Color) {
    let corners = [
        Point::new(r.x0, r.y0),
        Point::new(r.x1, r.y0),
        Point::new(r.x1, r.y1),
        Point::new(r.x0, r.y1),
    ];
    for (i, &p0) in corners.iter().enumerate() {
        surface.draw_line(p0, corners[(i + 1) % 4], color, 1.0);
    }
}
