// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Overlays: content drawn out of tree order, above an ancestor of its owner.
//!
//! A dropdown's list is the canonical case. The list is an ordinary node
//! subtree, usually a root, that [`OverlayRouter::subscribe`] attaches to the
//! dropdown. When open, [`DrawList::build`] draws it right after the
//! subscription's anchor, which keeps it above siblings that a plain child
//! would be hidden behind and outside any clip the dropdown sits in.
//!
//! ```text
//!   root
//!    └─ panel (draws)      <- anchor
//!        └─ column
//!            └─ dropdown   <- owner
//!
//!   draw order: root, panel, column, dropdown, [list], ...
//! ```

mod draw_list;
mod router;

pub use draw_list::{DrawCommand, DrawList};
pub use router::{Injection, OverlayConfig, OverlayId, OverlayRouter};
