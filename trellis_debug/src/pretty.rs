// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] writes one line per trace event:
//!
//! ```text
//! [frame 12] tick pointer=(40.0, 18.0) viewport=1920x1080
//! [frame 12]   begin Input
//! [frame 12]   drag Claimed NodeId(3@gen0) at (40.0, 18.0)
//! [frame 12]   end Input
//! [frame 12]   layout NodeId(1@gen0) arranged=3 stretch=2.000
//! [frame 12] summary layouts=1 draw=9 events=2 overlays=0
//! ```

use std::io::{self, Write};

use trellis_core::trace::{
    DragEvent, FrameSummary, FrameTickEvent, LayoutEvent, OverlayInvalidatedEvent,
    PhaseBeginEvent, PhaseEndEvent, TraceSink,
};

/// A [`TraceSink`] that formats every event as a line of text.
///
/// Write errors are ignored; tracing never fails the tick.
#[derive(Debug)]
pub struct PrettyPrintSink<W: Write> {
    out: W,
    frame_index: u64,
}

impl PrettyPrintSink<io::Stderr> {
    /// Writes to standard error.
    #[must_use]
    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Writes to `out`.
    pub fn new(out: W) -> Self {
        Self {
            out,
            frame_index: 0,
        }
    }

    /// Returns the writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, indent: bool, args: std::fmt::Arguments<'_>) {
        let pad = if indent { "  " } else { "" };
        let _ = writeln!(self.out, "[frame {}] {pad}{args}", self.frame_index);
    }
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_frame_tick(&mut self, e: &FrameTickEvent) {
        self.frame_index = e.frame_index;
        self.line(
            false,
            format_args!(
                "tick pointer=({:.1}, {:.1}) viewport={}x{}",
                e.pointer.x, e.pointer.y, e.viewport.width, e.viewport.height
            ),
        );
    }

    fn on_phase_begin(&mut self, e: &PhaseBeginEvent) {
        self.line(true, format_args!("begin {:?}", e.phase));
    }

    fn on_phase_end(&mut self, e: &PhaseEndEvent) {
        self.line(true, format_args!("end {:?}", e.phase));
    }

    fn on_layout(&mut self, e: &LayoutEvent) {
        self.line(
            true,
            format_args!(
                "layout {:?} arranged={} stretch={:.3}",
                e.node, e.arranged, e.stretch_factor
            ),
        );
    }

    fn on_overlay_invalidated(&mut self, e: &OverlayInvalidatedEvent) {
        match e.broken_at {
            Some(at) => self.line(
                true,
                format_args!("overlay {:?} of {:?} dropped, chain broken at {at:?}", e.overlay, e.owner),
            ),
            None => self.line(
                true,
                format_args!("overlay {:?} of {:?} dropped, node destroyed", e.overlay, e.owner),
            ),
        }
    }

    fn on_drag(&mut self, e: &DragEvent) {
        self.line(
            true,
            format_args!(
                "drag {:?} {:?} at ({:.1}, {:.1}) total=({:.1}, {:.1})",
                e.phase, e.owner, e.position.x, e.position.y, e.total_delta.x, e.total_delta.y
            ),
        );
    }

    fn on_frame_summary(&mut self, s: &FrameSummary) {
        self.line(
            false,
            format_args!(
                "summary layouts={} draw={} events={} overlays={}{}",
                s.layouts,
                s.draw_commands,
                s.events,
                s.overlays_open,
                if s.topology_changed { " topology" } else { "" }
            ),
        );
    }
}
