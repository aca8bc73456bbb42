// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-tick input snapshots.
//!
//! An [`InputFrame`] is what the tick driver consumes: pointer position and
//! movement, the two mouse buttons, and the keys that went down this tick.
//! Platform glue produces it either directly or through an
//! [`InputSampler`](crate::backend::InputSampler). [`InputTracker`] derives
//! the edge-triggered fields from raw "is down" samples.

use alloc::vec::Vec;

use kurbo::{Point, Vec2};

/// Button state for one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ButtonState {
    /// Went down this tick.
    pub pressed: bool,
    /// Is down.
    pub held: bool,
    /// Went up this tick.
    pub clicked: bool,
}

impl ButtonState {
    /// Derives the edges from the previous and current "is down" samples.
    #[must_use]
    pub const fn from_transition(was_down: bool, is_down: bool) -> Self {
        Self {
            pressed: is_down && !was_down,
            held: is_down,
            clicked: was_down && !is_down,
        }
    }
}

/// Platform-neutral key code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KeyCode(pub u32);

impl KeyCode {
    /// Closes the innermost open overlay.
    pub const ESCAPE: Self = Self(27);
    /// Confirms the focused element.
    pub const ENTER: Self = Self(13);
}

/// Input for one tick.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InputFrame {
    /// Pointer position in viewport pixels.
    pub pointer: Point,
    /// Pointer movement since the previous tick.
    pub delta: Vec2,
    /// Primary (left) button.
    pub primary: ButtonState,
    /// Secondary (right) button.
    pub secondary: ButtonState,
    /// Keys that went down this tick.
    pub keys: Vec<KeyCode>,
}

impl InputFrame {
    /// A frame with the pointer at `pointer` and nothing else happening.
    #[must_use]
    pub fn at(pointer: Point) -> Self {
        Self {
            pointer,
            ..Self::default()
        }
    }

    /// Returns whether `key` went down this tick.
    #[must_use]
    pub fn key_pressed(&self, key: KeyCode) -> bool {
        self.keys.contains(&key)
    }
}

/// Turns raw samples into [`InputFrame`]s.
#[derive(Clone, Copy, Debug, Default)]
pub struct InputTracker {
    last_pointer: Option<Point>,
    primary_down: bool,
    secondary_down: bool,
}

impl InputTracker {
    /// Creates a tracker with both buttons up.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Produces the next frame. The first sample reports zero movement.
    pub fn sample(
        &mut self,
        pointer: Point,
        primary_down: bool,
        secondary_down: bool,
        keys: Vec<KeyCode>,
    ) -> InputFrame {
        let delta = self.last_pointer.map_or(Vec2::ZERO, |last| pointer - last);
        let frame = InputFrame {
            pointer,
            delta,
            primary: ButtonState::from_transition(self.primary_down, primary_down),
            secondary: ButtonState::from_transition(self.secondary_down, secondary_down),
            keys,
        };
        self.last_pointer = Some(pointer);
        self.primary_down = primary_down;
        self.secondary_down = secondary_down;
        frame
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;

    #[test]
    fn edges() {
        let s = ButtonState::from_transition(false, true);
        assert!(s.pressed && s.held && !s.clicked);
        let s = ButtonState::from_transition(true, true);
        assert!(!s.pressed && s.held && !s.clicked);
        let s = ButtonState::from_transition(true, false);
        assert!(!s.pressed && !s.held && s.clicked);
        assert_eq!(ButtonState::from_transition(false, false), ButtonState::default());
    }

    #[test]
    fn tracker_derives_delta_and_edges() {
        let mut t = InputTracker::new();
        let f = t.sample(Point::new(10.0, 10.0), false, false, vec![]);
        assert_eq!(f.delta, Vec2::ZERO);

        let f = t.sample(Point::new(15.0, 8.0), true, false, vec![KeyCode::ESCAPE]);
        assert_eq!(f.delta, Vec2::new(5.0, -2.0));
        assert!(f.primary.pressed);
        assert!(f.key_pressed(KeyCode::ESCAPE));

        let f = t.sample(Point::new(15.0, 8.0), false, false, vec![]);
        assert!(f.primary.clicked);
        assert!(!f.key_pressed(KeyCode::ESCAPE));
    }
}
