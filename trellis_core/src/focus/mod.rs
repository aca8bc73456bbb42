// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hover, press, drag and selection.
//!
//! ```text
//!   draggable:  Idle -> Hover -> Pressed -> Dragging -> Idle
//!   toggle:     Idle <-> Selected
//! ```
//!
//! A press on a draggable node claims the drag immediately, replacing any
//! previous owner. The drag goes live on the first pointer movement and ends
//! on release wherever the pointer is, in the same tick, with a
//! [`FocusEvent::Released`] carrying the final position and the accumulated
//! movement.

mod model;

pub use model::{Behavior, FocusConfig, FocusEvent, FocusModel, VisualState};
