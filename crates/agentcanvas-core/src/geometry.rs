//! World and screen coordinate types.
//!
//! World coordinates are the infinite canvas plane items live on; screen
//! coordinates are pixels in the viewport. The camera in the designer crate
//! owns the mapping between the two. Keeping them as distinct types stops a
//! pointer position from being used in the wrong space.

use serde::{Deserialize, Serialize};

/// A point on the infinite canvas, in world units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Both coordinates are finite (neither NaN nor infinite).
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    pub fn offset(&self, dx: f64, dy: f64) -> Point {
        Point::new(self.x + dx, self.y + dy)
    }
}

/// A point in viewport pixels, origin at the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

impl ScreenPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Component-wise delta from `other` to `self`.
    pub fn delta_from(&self, other: &ScreenPoint) -> (f64, f64) {
        (self.x - other.x, self.y - other.y)
    }
}
