// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for the UI tick.
//!
//! This module provides a [`TraceSink`] trait with per-event methods that the
//! tick driver calls at each stage. All method bodies default to no-ops, so
//! implementing only the events you care about is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace` feature
//! is **off**, every `Tracer` method compiles to nothing (zero overhead). When
//! **on**, each method performs a single `Option` branch before dispatching.
//!
//! Warnings that need no structured payload (clamped configuration, for
//! example) go through the [`log`] facade instead.
//!
//! # Crate features
//!
//! - `trace`: enables the `Tracer` method bodies (one branch per call).

use kurbo::{Point, Size, Vec2};

use crate::node::NodeId;
use crate::overlay::OverlayId;

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Which phase of the tick is being measured.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PhaseKind {
    /// Pointer sampling, hover and press resolution, overlay dismissal.
    Input,
    /// Dirty layout groups re-arranged.
    Layout,
    /// Draw list built.
    Draw,
}

/// Which step of a drag session an event reports.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DragPhase {
    /// A press claimed the drag owner.
    Claimed,
    /// The pointer moved while held; the drag is live.
    Started,
    /// The primary button was released.
    Released,
}

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted at the start of every tick.
#[derive(Clone, Copy, Debug)]
pub struct FrameTickEvent {
    /// Monotonic tick counter.
    pub frame_index: u64,
    /// Pointer position sampled for this tick.
    pub pointer: Point,
    /// Viewport size for this tick.
    pub viewport: Size,
}

/// Marks the beginning of a tick phase.
#[derive(Clone, Copy, Debug)]
pub struct PhaseBeginEvent {
    /// Tick counter.
    pub frame_index: u64,
    /// Which phase is starting.
    pub phase: PhaseKind,
}

/// Marks the end of a tick phase.
#[derive(Clone, Copy, Debug)]
pub struct PhaseEndEvent {
    /// Tick counter.
    pub frame_index: u64,
    /// Which phase is ending.
    pub phase: PhaseKind,
}

/// Emitted after a layout group was re-arranged.
#[derive(Clone, Copy, Debug)]
pub struct LayoutEvent {
    /// The group node.
    pub node: NodeId,
    /// Stretch factor applied.
    pub stretch_factor: f64,
    /// Number of children arranged.
    pub arranged: usize,
}

/// Emitted when an overlay subscription found its recorded parent chain
/// broken and unsubscribed itself.
#[derive(Clone, Copy, Debug)]
pub struct OverlayInvalidatedEvent {
    /// The dropped subscription.
    pub overlay: OverlayId,
    /// Its owner.
    pub owner: NodeId,
    /// The first chain level that no longer parents the level below it.
    pub broken_at: Option<NodeId>,
}

/// Emitted for drag session transitions.
#[derive(Clone, Copy, Debug)]
pub struct DragEvent {
    /// Transition.
    pub phase: DragPhase,
    /// The drag owner.
    pub owner: NodeId,
    /// Pointer position at the transition.
    pub position: Point,
    /// Pointer movement accumulated since the press.
    pub total_delta: Vec2,
}

/// Per-tick summary produced at the end of
/// [`UiContext::tick`](crate::context::UiContext::tick).
#[derive(Clone, Copy, Debug, Default)]
pub struct FrameSummary {
    /// Tick counter.
    pub frame_index: u64,
    /// Layout groups re-arranged.
    pub layouts: usize,
    /// Commands in the draw list.
    pub draw_commands: usize,
    /// Focus events emitted.
    pub events: usize,
    /// Overlays open at the end of the tick.
    pub overlays_open: usize,
    /// Whether the tree changed shape this tick.
    pub topology_changed: bool,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from the tick driver.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called at the start of a tick.
    fn on_frame_tick(&mut self, e: &FrameTickEvent) {
        _ = e;
    }

    /// Called at the beginning of a tick phase.
    fn on_phase_begin(&mut self, e: &PhaseBeginEvent) {
        _ = e;
    }

    /// Called at the end of a tick phase.
    fn on_phase_end(&mut self, e: &PhaseEndEvent) {
        _ = e;
    }

    /// Called after a layout group was re-arranged.
    fn on_layout(&mut self, e: &LayoutEvent) {
        _ = e;
    }

    /// Called when an overlay subscription dropped itself.
    fn on_overlay_invalidated(&mut self, e: &OverlayInvalidatedEvent) {
        _ = e;
    }

    /// Called on drag session transitions.
    fn on_drag(&mut self, e: &DragEvent) {
        _ = e;
    }

    /// Called with the per-tick summary.
    fn on_frame_summary(&mut self, s: &FrameSummary) {
        _ = s;
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing. When
/// **on**, each method checks the inner `Option` (one branch) before
/// dispatching to the sink.
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

macro_rules! dispatch {
    ($(#[$meta:meta])* $name:ident => $hook:ident($ty:ty)) => {
        $(#[$meta])*
        #[inline]
        pub fn $name(&mut self, e: &$ty) {
            #[cfg(feature = "trace")]
            if let Some(s) = &mut self.sink {
                s.$hook(e);
            }
            #[cfg(not(feature = "trace"))]
            {
                _ = e;
            }
        }
    };
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    dispatch!(
        /// Emits a [`FrameTickEvent`].
        frame_tick => on_frame_tick(FrameTickEvent)
    );
    dispatch!(
        /// Emits a [`PhaseBeginEvent`].
        phase_begin => on_phase_begin(PhaseBeginEvent)
    );
    dispatch!(
        /// Emits a [`PhaseEndEvent`].
        phase_end => on_phase_end(PhaseEndEvent)
    );
    dispatch!(
        /// Emits a [`LayoutEvent`].
        layout => on_layout(LayoutEvent)
    );
    dispatch!(
        /// Emits an [`OverlayInvalidatedEvent`].
        overlay_invalidated => on_overlay_invalidated(OverlayInvalidatedEvent)
    );
    dispatch!(
        /// Emits a [`DragEvent`].
        drag => on_drag(DragEvent)
    );
    dispatch!(
        /// Emits a [`FrameSummary`].
        frame_summary => on_frame_summary(FrameSummary)
    );
}
