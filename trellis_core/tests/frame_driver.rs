// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Whole-frame scenarios driven through `UiContext::tick`.

use kurbo::{Point, Size, Vec2};
use trellis_core::context::UiContext;
use trellis_core::focus::{Behavior, FocusEvent};
use trellis_core::geometry::Anchor;
use trellis_core::input::{ButtonState, InputFrame};
use trellis_core::layout::LayoutGroup;
use trellis_core::node::{NodeFlags, NodeId, NodeSpec, NodeStore};
use trellis_core::trace::Tracer;
use trellis_core::viewport::Viewport;

fn tick(ctx: &mut UiContext, store: &mut NodeStore, input: InputFrame) -> trellis_core::context::TickOutput {
    ctx.tick(store, input, &mut Tracer::none())
}

fn press(x: f64, y: f64, was_down: bool, is_down: bool, delta: Vec2) -> InputFrame {
    InputFrame {
        pointer: Point::new(x, y),
        delta,
        primary: ButtonState::from_transition(was_down, is_down),
        ..InputFrame::default()
    }
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn wider_canvas_keeps_relative_size_and_scales_width() {
    let mut store = NodeStore::new(Viewport::new(Size::new(1920.0, 1080.0)));
    let root = store.create_node(NodeSpec::default());
    let dropdown = store.create_child(
        root,
        NodeSpec::relative(Vec2::new(0.25, 0.05)).draws_content(),
    );
    let button = store.create_child(root, NodeSpec::absolute(Size::new(200.0, 40.0)));
    let mut ctx = UiContext::default();
    let _ = tick(&mut ctx, &mut store, InputFrame::default());

    let before = store.rect(dropdown).width();
    let button_before = store.rect(button).width();
    assert!(close(before, 480.0), "{before}");

    ctx.set_viewport(&mut store, Viewport::new(Size::new(2560.0, 1080.0)));
    let out = tick(&mut ctx, &mut store, InputFrame::default());
    assert!(out.changes.resized.contains(&dropdown.index()));

    let rel = store.relative_size(dropdown);
    assert!(close(rel.x, 0.25) && close(rel.y, 0.05), "{rel:?}");
    let after = store.rect(dropdown).width();
    assert!(close(after / before, 2560.0 / 1920.0), "{after}");
    let button_after = store.rect(button).width();
    assert!(close(button_after / button_before, 2560.0 / 1920.0), "{button_after}");
    assert!(close(store.rect(dropdown).height(), 54.0));
}

#[test]
fn layout_child_tracks_canvas_width() {
    let mut store = NodeStore::new(Viewport::new(Size::new(1920.0, 1080.0)));
    let canvas = store.create_node(NodeSpec::default());
    store.set_layout(canvas, Some(LayoutGroup::vertical()));
    let dropdown = store.create_child(canvas, NodeSpec::default().draws_content());
    let mut ctx = UiContext::default();
    let _ = tick(&mut ctx, &mut store, InputFrame::default());
    assert!(close(store.rect(dropdown).width(), 1920.0));

    ctx.set_viewport(&mut store, Viewport::new(Size::new(2560.0, 1080.0)));
    let out = tick(&mut ctx, &mut store, InputFrame::default());
    assert_eq!(out.layouts, 1);
    assert_eq!(store.relative_size(dropdown), Vec2::new(1.0, 1.0));
    assert!(close(store.rect(dropdown).width(), 2560.0));
}

/// root -> window (draws) -> column -> dropdown, with a separate list root.
struct DropdownScene {
    store: NodeStore,
    ctx: UiContext,
    window: NodeId,
    column: NodeId,
    dropdown: NodeId,
    list: NodeId,
}

fn dropdown_scene() -> DropdownScene {
    let mut store = NodeStore::default();
    let root = store.create_node(NodeSpec::default());
    let window = store.create_child(
        root,
        NodeSpec::absolute(Size::new(300.0, 300.0)).with_flags(NodeFlags {
            draws_content: true,
            clip_children: true,
            ..NodeFlags::default()
        }),
    );
    let column = store.create_child(window, NodeSpec::default());
    let dropdown = store.create_child(
        column,
        NodeSpec::absolute(Size::new(120.0, 24.0)).draws_content(),
    );
    let list = store.create_node(
        NodeSpec::absolute(Size::new(120.0, 200.0))
            .with_absolute_offset(Vec2::new(0.0, 24.0))
            .draws_content(),
    );
    let mut ctx = UiContext::default();
    let id = ctx.overlays.subscribe(&store, dropdown, list).unwrap();
    assert_eq!(ctx.overlays.anchor(id), Some(window));
    DropdownScene {
        store,
        ctx,
        window,
        column,
        dropdown,
        list,
    }
}

#[test]
fn open_dropdown_draws_above_its_window() {
    let mut s = dropdown_scene();
    let id = s.ctx.overlays.subscription_of(s.dropdown).unwrap();
    let _ = tick(&mut s.ctx, &mut s.store, InputFrame::default());
    assert!(s.ctx.draw_list().position(s.list).is_none());

    s.ctx.overlays.open(&s.store, id).unwrap();
    let _ = tick(&mut s.ctx, &mut s.store, InputFrame::default());
    let list = s.ctx.draw_list();
    let window_at = list.position(s.window).unwrap();
    let dropdown_at = list.position(s.dropdown).unwrap();
    let list_at = list.position(s.list).unwrap();
    assert!(window_at < dropdown_at && dropdown_at < list_at);

    // The list sits above the window, so it takes the hover.
    let out = tick(&mut s.ctx, &mut s.store, InputFrame::at(Point::new(60.0, 100.0)));
    assert!(out.events.contains(&FocusEvent::HoverEnter(s.list)));
}

#[test]
fn removing_intermediate_ancestor_blocks_injection() {
    let mut s = dropdown_scene();
    let id = s.ctx.overlays.subscription_of(s.dropdown).unwrap();
    s.ctx.overlays.open(&s.store, id).unwrap();
    let _ = tick(&mut s.ctx, &mut s.store, InputFrame::default());
    assert!(s.ctx.draw_list().position(s.list).is_some());

    s.store.remove_from_parent(s.column);
    let _ = tick(&mut s.ctx, &mut s.store, InputFrame::default());
    assert!(s.ctx.draw_list().position(s.list).is_none());
    assert!(s.ctx.overlays.subscription_of(s.dropdown).is_none());
    assert!(s.ctx.overlays.open_chain().is_empty());
}

#[test]
fn click_outside_closes_dropdown() {
    let mut s = dropdown_scene();
    let id = s.ctx.overlays.subscription_of(s.dropdown).unwrap();
    s.ctx.overlays.open(&s.store, id).unwrap();
    let _ = tick(&mut s.ctx, &mut s.store, InputFrame::default());

    // Within the margin below the list: stays open.
    let out = tick(&mut s.ctx, &mut s.store, press(60.0, 235.0, false, true, Vec2::ZERO));
    assert!(out.closed_overlays.is_empty());
    let _ = tick(&mut s.ctx, &mut s.store, press(60.0, 235.0, true, false, Vec2::ZERO));

    let out = tick(&mut s.ctx, &mut s.store, press(280.0, 280.0, false, true, Vec2::ZERO));
    assert_eq!(out.closed_overlays, [id]);
    let _ = tick(&mut s.ctx, &mut s.store, InputFrame::default());
    assert!(s.ctx.draw_list().position(s.list).is_none());
}

#[test]
fn drag_moves_node_and_release_clears_owner() {
    let mut store = NodeStore::default();
    let root = store.create_node(NodeSpec::default());
    let handle = store.create_child(root, NodeSpec::absolute(Size::new(50.0, 50.0)).draws_content());
    let mut ctx = UiContext::default();
    ctx.focus.set_behavior(handle, Behavior::DRAGGABLE);
    let _ = tick(&mut ctx, &mut store, InputFrame::default());

    let frames = [
        press(10.0, 10.0, false, true, Vec2::ZERO),
        press(40.0, 20.0, true, true, Vec2::new(30.0, 10.0)),
        press(70.0, 30.0, true, true, Vec2::new(30.0, 10.0)),
    ];
    for input in frames {
        let out = tick(&mut ctx, &mut store, input);
        for event in out.events {
            if let FocusEvent::Dragged { owner, delta } = event {
                store.translate(owner, delta);
            }
        }
        assert_eq!(ctx.focus.drag_owner(), Some(handle));
    }

    let out = tick(&mut ctx, &mut store, press(70.0, 30.0, true, false, Vec2::ZERO));
    assert!(out.events.contains(&FocusEvent::Released {
        owner: handle,
        position: Point::new(70.0, 30.0),
        total_delta: Vec2::new(60.0, 20.0),
    }));
    assert_eq!(ctx.focus.drag_owner(), None);

    let _ = tick(&mut ctx, &mut store, InputFrame::at(Point::new(70.0, 30.0)));
    assert_eq!(store.rect(handle).origin(), Point::new(60.0, 20.0));
}

#[test]
fn stretch_row_settles_in_one_tick() {
    let mut store = NodeStore::default();
    let row = store.create_node(
        NodeSpec::absolute(Size::new(90.0, 10.0)).with_anchor(Anchor::TopLeft),
    );
    store.set_layout(row, Some(LayoutGroup::horizontal().with_stretch(true)));
    let cells: Vec<NodeId> = (0..3)
        .map(|_| {
            store.create_child(
                row,
                NodeSpec::absolute(Size::new(20.0, 10.0)).with_min_size(Size::new(10.0, 0.0)),
            )
        })
        .collect();
    let mut ctx = UiContext::default();
    let out = tick(&mut ctx, &mut store, InputFrame::default());
    assert_eq!(out.layouts, 1);
    let xs: Vec<f64> = cells.iter().map(|&c| store.rect(c).x0).collect();
    let widths: Vec<f64> = cells.iter().map(|&c| store.rect(c).width()).collect();
    for (i, w) in widths.iter().enumerate() {
        assert!(close(*w, 40.0), "cell {i}: {w}");
    }
    assert!(close(xs[1], 40.0) && close(xs[2], 80.0), "{xs:?}");

    let out = tick(&mut ctx, &mut store, InputFrame::default());
    assert_eq!(out.layouts, 0);
    assert!(out.changes.resized.is_empty());
}
