//! Spatial queries — distance checks and axis-aligned bounds.
//!
//! Everything here is pure geometry. The two call sites that matter are
//! "is the player near this NPC" (strict Euclidean threshold) and "is the
//! player standing in a structure's entry band" (AABB-style band math in
//! the zone module).

use serde::{Deserialize, Serialize};

use crate::types::Position;

/// Euclidean distance between two positions.
#[must_use]
pub fn distance(a: Position, b: Position) -> f32 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    (dx * dx + dy * dy).sqrt()
}

/// Strict range predicate: true iff `distance(a, b) < range`.
///
/// Strict `<` matters at the boundary — at exactly `range` units the
/// interaction is unavailable. Both the hover affordance and the
/// click-to-open action must go through this one predicate.
#[must_use]
pub fn within_range(a: Position, b: Position, range: f32) -> bool {
    distance(a, b) < range
}

/// An axis-aligned rectangle, anchored at its top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge.
    pub x: f32,
    /// Top edge.
    pub y: f32,
    /// Horizontal extent.
    pub width: f32,
    /// Vertical extent.
    pub height: f32,
}

impl Rect {
    /// Construct a rect from its top-left corner and extents.
    #[must_use]
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Center of the rect.
    #[must_use]
    pub fn center(&self) -> Position {
        Position::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Whether a point lies inside (edges inclusive).
    #[must_use]
    pub fn contains(&self, p: Position) -> bool {
        p.x >= self.x && p.x <= self.x + self.width && p.y >= self.y && p.y <= self.y + self.height
    }

    /// Whether two rects overlap (touching edges count).
    #[must_use]
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x <= other.x + other.width
            && other.x <= self.x + self.width
            && self.y <= other.y + other.height
            && other.y <= self.y + self.height
    }

    /// Clamp a position into this rect. Used for world bounds.
    #[must_use]
    pub fn clamp(&self, p: Position) -> Position {
        Position::new(
            p.x.clamp(self.x, self.x + self.width),
            p.y.clamp(self.y, self.y + self.height),
        )
    }
}
