// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pretty-printing and tree snapshots for trellis diagnostics.
//!
//! - [`pretty::PrettyPrintSink`]: a [`TraceSink`](trellis_core::trace::TraceSink)
//!   writing one line per event.
//! - [`snapshot::TreeSnapshot`]: a serializable copy of the node tree with
//!   resolved geometry, exportable as JSON or as an indented outline.

pub mod pretty;
pub mod snapshot;
