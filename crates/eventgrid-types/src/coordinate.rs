//! Signed integer grid coordinates.

use serde::{Deserialize, Serialize};

/// A point on the world grid.
///
/// Coordinates are signed so a world can be centred on the origin; the
/// world maps them onto non-negative storage indices itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Coordinate {
    /// Horizontal position.
    pub x: i32,
    /// Vertical position.
    pub y: i32,
}

impl Coordinate {
    /// Create a coordinate from its components.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Manhattan distance: `|x1 - x2| + |y1 - y2|`.
    ///
    /// Each axis difference fits in a `u32`, so their sum always fits in a
    /// `u64` and the result never overflows, even across the full `i32`
    /// range.
    pub fn manhattan_distance(self, other: Self) -> u64 {
        let dx = u64::from(self.x.abs_diff(other.x));
        let dy = u64::from(self.y.abs_diff(other.y));
        dx.saturating_add(dy)
    }
}

impl core::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}, {}", self.x, self.y)
    }
}

impl From<(i32, i32)> for Coordinate {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}
