// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Retained-mode UI composition: node tree, layout, overlays and focus.
//!
//! `trellis_core` owns the data model and the per-frame driver of a
//! resolution-independent UI. It is `no_std` compatible (with `alloc`) and
//! stores nodes in struct-of-arrays form behind generational handles.
//!
//! # Architecture
//!
//! ```text
//!   InputSampler ──► InputFrame
//!                        │
//!                        ▼
//!   UiContext::tick ── Input ──► FocusModel::update ──► FocusEvents
//!        │                       OverlayRouter (click outside, Escape)
//!        │
//!        ├──────── Layout ─► NodeStore::update_layout
//!        │                   NodeStore::evaluate ──► FrameChanges
//!        │                                               │
//!        │                   OverlayRouter::sync ◄───────┘
//!        │
//!        └──────── Draw ───► DrawList::build ──► Painter
//! ```
//!
//! **[`node`]**: The node tree. Each node is placed relative to its
//! parent by an anchor, a pivot, relative and absolute offsets, and a size
//! that is either a fraction of the parent or a fixed unscaled size.
//! Rectangles are computed lazily and memoized.
//!
//! **[`layout`]**: Layout groups that stack children along an axis, with
//! optional stretching to fill the group.
//!
//! **[`overlay`]**: Out-of-tree drawing for dropdown lists and similar,
//! plus the flattened [`DrawList`](overlay::DrawList).
//!
//! **[`focus`]**: Hover, press, drag and selection.
//!
//! **[`input`]**: Per-tick input snapshots.
//!
//! **[`context`]**: [`UiContext`](context::UiContext), the tick driver.
//!
//! **[`viewport`]**: Screen size and the derived UI scale.
//!
//! **[`dirty`]**: Dirty channels via `understory_dirty`. GEOMETRY
//! propagates to descendants; TOPOLOGY triggers a traversal rebuild.
//!
//! **[`backend`]**: The [`InputSampler`](backend::InputSampler) and
//! [`Painter`](backend::Painter) traits platform glue implements.
//!
//! **[`trace`]**: [`TraceSink`](trace::TraceSink) trait and event types for
//! tick instrumentation, with a zero-overhead [`Tracer`](trace::Tracer)
//! wrapper.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `serde` (disabled by default): `Serialize`/`Deserialize` for
//!   configuration types.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod backend;
pub mod context;
pub mod dirty;
pub mod error;
pub mod focus;
pub mod geometry;
pub mod input;
pub mod layout;
pub mod node;
pub mod overlay;
pub mod trace;
pub mod viewport;
