//! Integer geometry used by layout and drawing.
//!
//! Coordinates are whole pixels. Negative values are legal everywhere: the final document is
//! sized from the resolved grid, not from clamped shapes.

use serde::{Deserialize, Serialize};

pub type Unit = euclid::UnknownUnit;

pub type Point = euclid::Point2D<i32, Unit>;
pub type Size = euclid::Size2D<i32, Unit>;
pub type Rect = euclid::Rect<i32, Unit>;

pub fn point(x: i32, y: i32) -> Point {
    euclid::point2(x, y)
}

pub fn rect(x: i32, y: i32, w: i32, h: i32) -> Rect {
    euclid::rect(x, y, w, h)
}

/// One of the nine reference points of a rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gravity {
    NorthWest,
    North,
    NorthEast,
    West,
    Center,
    East,
    SouthWest,
    South,
    SouthEast,
}

impl Gravity {
    pub const ALL: [Gravity; 9] = [
        Gravity::NorthWest,
        Gravity::North,
        Gravity::NorthEast,
        Gravity::West,
        Gravity::Center,
        Gravity::East,
        Gravity::SouthWest,
        Gravity::South,
        Gravity::SouthEast,
    ];

    /// Horizontal and vertical position of the reference point, in halves of the extent
    /// (0 = leading edge, 1 = middle, 2 = trailing edge).
    fn halves(self) -> (i32, i32) {
        match self {
            Gravity::NorthWest => (0, 0),
            Gravity::North => (1, 0),
            Gravity::NorthEast => (2, 0),
            Gravity::West => (0, 1),
            Gravity::Center => (1, 1),
            Gravity::East => (2, 1),
            Gravity::SouthWest => (0, 2),
            Gravity::South => (1, 2),
            Gravity::SouthEast => (2, 2),
        }
    }
}

fn offset_for(extent: i32, halves: i32) -> i32 {
    match halves {
        0 => 0,
        1 => extent / 2,
        _ => extent,
    }
}

/// Gravity-relative positioning on top of [`euclid::Rect`].
pub trait RectExt {
    /// Returns this rect moved so that its `gravity` reference point lands on `(x, y)`.
    fn position_at(&self, x: i32, y: i32, gravity: Gravity) -> Rect;

    /// The `gravity` reference point of this rect.
    fn anchor(&self, gravity: Gravity) -> Point;

    /// Grows the rect by `padding.x` on the left and right and `padding.y` on the top and bottom.
    fn blow_out(&self, padding: Point) -> Rect;
}

impl RectExt for Rect {
    fn position_at(&self, x: i32, y: i32, gravity: Gravity) -> Rect {
        let (hx, hy) = gravity.halves();
        rect(
            x - offset_for(self.size.width, hx),
            y - offset_for(self.size.height, hy),
            self.size.width,
            self.size.height,
        )
    }

    fn anchor(&self, gravity: Gravity) -> Point {
        let (hx, hy) = gravity.halves();
        point(
            self.origin.x + offset_for(self.size.width, hx),
            self.origin.y + offset_for(self.size.height, hy),
        )
    }

    fn blow_out(&self, padding: Point) -> Rect {
        self.inflate(padding.x, padding.y)
    }
}
