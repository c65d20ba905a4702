//! Camera and coordinate transformation for the canvas.
//!
//! Handles conversion between screen coordinates (viewport pixels, origin
//! top-left) and world coordinates (the infinite canvas plane). Manages zoom
//! and pan with proper coordinate mapping.

use std::fmt;

use agentcanvas_core::constants::{BUTTON_ZOOM_STEP, MAX_ZOOM, MIN_ZOOM};
use agentcanvas_core::{Point, ScreenPoint};

/// The camera transformation state (zoom and pan).
///
/// Pan is stored in world units; the mapping is
///
/// ```text
/// world  = screen / zoom - pan
/// screen = (world + pan) * zoom
/// ```
#[derive(Debug, Clone)]
pub struct Camera {
    zoom: f64,
    pan_x: f64,
    pan_y: f64,
    viewport_width: f64,
    viewport_height: f64,
}

impl Camera {
    /// Creates a camera over a viewport of the given pixel dimensions,
    /// at 1:1 zoom with the world origin in the top-left corner.
    pub fn new(viewport_width: f64, viewport_height: f64) -> Self {
        Self {
            zoom: 1.0,
            pan_x: 0.0,
            pan_y: 0.0,
            viewport_width,
            viewport_height,
        }
    }

    pub fn viewport_width(&self) -> f64 {
        self.viewport_width
    }

    pub fn viewport_height(&self) -> f64 {
        self.viewport_height
    }

    /// Sets the viewport dimensions (typically called when the window resizes).
    pub fn set_viewport_size(&mut self, width: f64, height: f64) {
        self.viewport_width = width;
        self.viewport_height = height;
    }

    /// Current zoom level (1.0 = 100%).
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Sets the zoom level, saturating at the `[MIN_ZOOM, MAX_ZOOM]` bounds.
    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
    }

    /// Pan offset in world units.
    pub fn pan(&self) -> (f64, f64) {
        (self.pan_x, self.pan_y)
    }

    pub fn set_pan(&mut self, x: f64, y: f64) {
        self.pan_x = x;
        self.pan_y = y;
    }

    /// Converts a screen position to world coordinates.
    pub fn to_world(&self, screen: ScreenPoint) -> Point {
        Point::new(
            screen.x / self.zoom - self.pan_x,
            screen.y / self.zoom - self.pan_y,
        )
    }

    /// Converts a world position to screen coordinates.
    pub fn to_screen(&self, world: Point) -> ScreenPoint {
        ScreenPoint::new(
            (world.x + self.pan_x) * self.zoom,
            (world.y + self.pan_y) * self.zoom,
        )
    }

    /// Pans by a screen-space delta: the canvas follows the pointer, so a
    /// drag of `dx` pixels moves the world by `dx / zoom` world units.
    pub fn pan_by(&mut self, dx_screen: f64, dy_screen: f64) {
        self.pan_x += dx_screen / self.zoom;
        self.pan_y += dy_screen / self.zoom;
    }

    /// Rescales by `factor` keeping the world point under `pivot` visually
    /// fixed (zoom-to-cursor). Out-of-range results saturate at the zoom
    /// bounds rather than erroring.
    pub fn apply_zoom(&mut self, factor: f64, pivot: ScreenPoint) {
        let new_zoom = (self.zoom * factor).clamp(MIN_ZOOM, MAX_ZOOM);
        if new_zoom == self.zoom {
            return;
        }

        // World point currently under the pivot; solving
        // screen = (world + pan) * zoom for pan keeps it there.
        let anchor = self.to_world(pivot);
        self.zoom = new_zoom;
        self.pan_x = pivot.x / new_zoom - anchor.x;
        self.pan_y = pivot.y / new_zoom - anchor.y;
    }

    /// Zooms in one toolbar step, pivoting on the viewport center.
    pub fn zoom_in(&mut self) {
        self.apply_zoom(BUTTON_ZOOM_STEP, self.viewport_center());
    }

    /// Zooms out one toolbar step, pivoting on the viewport center.
    pub fn zoom_out(&mut self) {
        self.apply_zoom(1.0 / BUTTON_ZOOM_STEP, self.viewport_center());
    }

    /// Centers the viewport on a world coordinate.
    pub fn center_on(&mut self, world: Point) {
        self.pan_x = self.viewport_width / (2.0 * self.zoom) - world.x;
        self.pan_y = self.viewport_height / (2.0 * self.zoom) - world.y;
    }

    /// Resets to 1:1 zoom with the origin in the top-left corner.
    pub fn reset(&mut self) {
        self.zoom = 1.0;
        self.pan_x = 0.0;
        self.pan_y = 0.0;
    }

    fn viewport_center(&self) -> ScreenPoint {
        ScreenPoint::new(self.viewport_width / 2.0, self.viewport_height / 2.0)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(1200.0, 800.0)
    }
}

impl fmt::Display for Camera {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Zoom: {:.2}x | Pan: ({:.1}, {:.1})",
            self.zoom, self.pan_x, self.pan_y
        )
    }
}
