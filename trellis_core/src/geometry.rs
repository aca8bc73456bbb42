// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Anchors, pivots, axes, and scale bases.
//!
//! All geometry is in `f64` pixels using [`kurbo`] types, with the origin at
//! the top-left of the viewport and y growing downward.

use kurbo::{Point, Rect, Size, Vec2};

/// One of the two layout axes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Axis {
    /// Left to right.
    #[default]
    Horizontal,
    /// Top to bottom.
    Vertical,
}

impl Axis {
    /// Returns the other axis.
    #[must_use]
    pub const fn cross(self) -> Self {
        match self {
            Self::Horizontal => Self::Vertical,
            Self::Vertical => Self::Horizontal,
        }
    }

    /// The component of `size` along this axis.
    #[must_use]
    pub const fn size(self, size: Size) -> f64 {
        match self {
            Self::Horizontal => size.width,
            Self::Vertical => size.height,
        }
    }

    /// The component of `v` along this axis.
    #[must_use]
    pub const fn vec(self, v: Vec2) -> f64 {
        match self {
            Self::Horizontal => v.x,
            Self::Vertical => v.y,
        }
    }

    /// Returns `size` with its component along this axis replaced.
    #[must_use]
    pub const fn with_size(self, mut size: Size, value: f64) -> Size {
        match self {
            Self::Horizontal => size.width = value,
            Self::Vertical => size.height = value,
        }
        size
    }

    /// Returns `v` with its component along this axis replaced.
    #[must_use]
    pub const fn with_vec(self, mut v: Vec2, value: f64) -> Vec2 {
        match self {
            Self::Horizontal => v.x = value,
            Self::Vertical => v.y = value,
        }
        v
    }
}

macro_rules! compass {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        pub enum $name {
            /// Top-left corner.
            #[default]
            TopLeft,
            /// Middle of the top edge.
            TopCenter,
            /// Top-right corner.
            TopRight,
            /// Middle of the left edge.
            CenterLeft,
            /// Center.
            Center,
            /// Middle of the right edge.
            CenterRight,
            /// Bottom-left corner.
            BottomLeft,
            /// Middle of the bottom edge.
            BottomCenter,
            /// Bottom-right corner.
            BottomRight,
        }

        impl $name {
            /// Every point, in reading order.
            pub const ALL: [Self; 9] = [
                Self::TopLeft,
                Self::TopCenter,
                Self::TopRight,
                Self::CenterLeft,
                Self::Center,
                Self::CenterRight,
                Self::BottomLeft,
                Self::BottomCenter,
                Self::BottomRight,
            ];

            /// Position of this point as a fraction of a rectangle's size.
            #[must_use]
            pub const fn fraction(self) -> Vec2 {
                match self {
                    Self::TopLeft => Vec2::new(0.0, 0.0),
                    Self::TopCenter => Vec2::new(0.5, 0.0),
                    Self::TopRight => Vec2::new(1.0, 0.0),
                    Self::CenterLeft => Vec2::new(0.0, 0.5),
                    Self::Center => Vec2::new(0.5, 0.5),
                    Self::CenterRight => Vec2::new(1.0, 0.5),
                    Self::BottomLeft => Vec2::new(0.0, 1.0),
                    Self::BottomCenter => Vec2::new(0.5, 1.0),
                    Self::BottomRight => Vec2::new(1.0, 1.0),
                }
            }
        }
    };
}

compass!(
    /// A point on the parent rectangle that a node attaches to.
    Anchor
);

compass!(
    /// The point on a node's own rectangle that is placed on its anchor.
    Pivot
);

impl Anchor {
    /// The anchor point on `rect`.
    #[must_use]
    pub fn point_in(self, rect: Rect) -> Point {
        let f = self.fraction();
        Point::new(
            rect.x0 + rect.width() * f.x,
            rect.y0 + rect.height() * f.y,
        )
    }

    /// The pivot at the same compass point.
    #[must_use]
    pub const fn matching_pivot(self) -> Pivot {
        match self {
            Self::TopLeft => Pivot::TopLeft,
            Self::TopCenter => Pivot::TopCenter,
            Self::TopRight => Pivot::TopRight,
            Self::CenterLeft => Pivot::CenterLeft,
            Self::Center => Pivot::Center,
            Self::CenterRight => Pivot::CenterRight,
            Self::BottomLeft => Pivot::BottomLeft,
            Self::BottomCenter => Pivot::BottomCenter,
            Self::BottomRight => Pivot::BottomRight,
        }
    }

    /// Converts an offset so positive values point away from this anchor.
    ///
    /// Right-anchored nodes flip X and bottom-anchored nodes flip Y, so an
    /// offset of `(10, 10)` always moves a node inward from the edge it is
    /// attached to.
    #[must_use]
    pub const fn away_from(self, offset: Vec2) -> Vec2 {
        match self {
            Self::BottomRight => Vec2::new(-offset.x, -offset.y),
            Self::BottomLeft | Self::BottomCenter => Vec2::new(offset.x, -offset.y),
            Self::TopRight | Self::CenterRight => Vec2::new(-offset.x, offset.y),
            Self::TopLeft | Self::TopCenter | Self::CenterLeft | Self::Center => offset,
        }
    }
}

impl Pivot {
    /// Offset from the pivot point to the top-left corner of a rectangle of
    /// the given size.
    #[must_use]
    pub fn offset_for(self, size: Size) -> Vec2 {
        let f = self.fraction();
        Vec2::new(-size.width * f.x, -size.height * f.y)
    }
}

/// How a node turns its parent's size into the basis for relative sizing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScaleBasis {
    /// Width and height are relative to the parent's width and height.
    #[default]
    Normal,
    /// Both axes are relative to the parent's width.
    BothWidth,
    /// Both axes are relative to the parent's height.
    BothHeight,
    /// Both axes are relative to the smaller parent dimension.
    Smallest,
    /// Both axes are relative to the larger parent dimension.
    Largest,
}

impl ScaleBasis {
    /// Applies this basis to `size`.
    #[must_use]
    pub fn apply(self, size: Size) -> Size {
        match self {
            Self::Normal => size,
            Self::BothWidth => Size::new(size.width, size.width),
            Self::BothHeight => Size::new(size.height, size.height),
            Self::Smallest => {
                let s = size.width.min(size.height);
                Size::new(s, s)
            }
            Self::Largest => {
                let s = size.width.max(size.height);
                Size::new(s, s)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anchor_points_on_rect() {
        let r = Rect::new(10.0, 20.0, 110.0, 220.0);
        assert_eq!(Anchor::TopLeft.point_in(r), Point::new(10.0, 20.0));
        assert_eq!(Anchor::Center.point_in(r), Point::new(60.0, 120.0));
        assert_eq!(Anchor::BottomRight.point_in(r), Point::new(110.0, 220.0));
        assert_eq!(Anchor::CenterRight.point_in(r), Point::new(110.0, 120.0));
    }

    #[test]
    fn matching_pivot_has_same_fraction() {
        for anchor in Anchor::ALL {
            assert_eq!(
                anchor.fraction(),
                anchor.matching_pivot().fraction(),
                "{anchor:?}"
            );
        }
    }

    #[test]
    fn pivot_offset_is_negative_fraction_of_size() {
        let size = Size::new(40.0, 20.0);
        assert_eq!(Pivot::TopLeft.offset_for(size), Vec2::ZERO);
        assert_eq!(Pivot::Center.offset_for(size), Vec2::new(-20.0, -10.0));
        assert_eq!(Pivot::BottomRight.offset_for(size), Vec2::new(-40.0, -20.0));
    }

    #[test]
    fn offsets_point_away_from_anchor() {
        let v = Vec2::new(3.0, 4.0);
        assert_eq!(Anchor::TopLeft.away_from(v), v);
        assert_eq!(Anchor::Center.away_from(v), v);
        assert_eq!(Anchor::TopRight.away_from(v), Vec2::new(-3.0, 4.0));
        assert_eq!(Anchor::CenterRight.away_from(v), Vec2::new(-3.0, 4.0));
        assert_eq!(Anchor::BottomCenter.away_from(v), Vec2::new(3.0, -4.0));
        assert_eq!(Anchor::BottomRight.away_from(v), Vec2::new(-3.0, -4.0));
    }

    #[test]
    fn scale_basis_squares_size() {
        let s = Size::new(200.0, 50.0);
        assert_eq!(ScaleBasis::Normal.apply(s), s);
        assert_eq!(ScaleBasis::BothWidth.apply(s), Size::new(200.0, 200.0));
        assert_eq!(ScaleBasis::BothHeight.apply(s), Size::new(50.0, 50.0));
        assert_eq!(ScaleBasis::Smallest.apply(s), Size::new(50.0, 50.0));
        assert_eq!(ScaleBasis::Largest.apply(s), Size::new(200.0, 200.0));
    }

    #[test]
    fn axis_accessors() {
        let s = Size::new(1.0, 2.0);
        assert_eq!(Axis::Horizontal.size(s), 1.0);
        assert_eq!(Axis::Vertical.size(s), 2.0);
        assert_eq!(Axis::Vertical.with_size(s, 5.0), Size::new(1.0, 5.0));
        assert_eq!(Axis::Horizontal.cross(), Axis::Vertical);
    }
}
