//! Axis-aligned geometry shared by every entity in a level.
//!
//! Coordinates are screen pixels: `x` grows to the right and `y` grows
//! downwards. All arithmetic is integer, so collision results are exact and
//! replays reproduce positions bit-for-bit.
use std::fmt;

/// Top-left corner of a box, in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns this position shifted by `(dx, dy)`.
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Width and height of a box, in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub const fn square(side: u32) -> Self {
        Self::new(side, side)
    }

    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Axis-aligned rectangle anchored at its top-left corner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    pub origin: Position,
    pub size: Size,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            origin: Position::new(x, y),
            size: Size::new(width, height),
        }
    }

    pub const fn at(origin: Position, size: Size) -> Self {
        Self { origin, size }
    }

    pub const fn left(&self) -> i64 {
        self.origin.x as i64
    }

    pub const fn top(&self) -> i64 {
        self.origin.y as i64
    }

    pub const fn right(&self) -> i64 {
        self.origin.x as i64 + self.size.width as i64
    }

    pub const fn bottom(&self) -> i64 {
        self.origin.y as i64 + self.size.height as i64
    }

    /// Strict overlap test on both axes.
    ///
    /// Boxes that only share an edge do not intersect, and a box with zero
    /// width or height never intersects anything.
    pub const fn intersects(&self, other: &Rect) -> bool {
        if self.size.is_empty() || other.size.is_empty() {
            return false;
        }

        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }
}

/// Playable area of a level. Actor boxes never leave it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    pub width: u32,
    pub height: u32,
}

impl Bounds {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Clamps `position` so a box of `size` stays fully inside the bounds.
    ///
    /// A box larger than the bounds is pinned to the origin on that axis.
    pub fn clamp(&self, position: Position, size: Size) -> Position {
        let max_x = (self.width as i64 - size.width as i64).max(0);
        let max_y = (self.height as i64 - size.height as i64).max(0);

        Position::new(
            (position.x as i64).clamp(0, max_x) as i32,
            (position.y as i64).clamp(0, max_y) as i32,
        )
    }
}
