use serde::{Deserialize, Serialize};

use crate::geometry::Point;

/// A gaze or fixation point in device/screen coordinates, with a monotonic
/// millisecond timestamp. The timestamp disambiguates otherwise-identical
/// points. NaN coordinates mark the "no data yet" sentinel.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GazePoint {
    pub x: f32,
    pub y: f32,
    pub timestamp: f64,
}

impl GazePoint {
    /// The "no data yet" sentinel.
    pub const INVALID: GazePoint = GazePoint {
        x: f32::NAN,
        y: f32::NAN,
        timestamp: f64::NAN,
    };

    pub fn new(x: f32, y: f32, timestamp: f64) -> Self {
        Self { x, y, timestamp }
    }

    pub fn is_valid(&self) -> bool {
        !self.x.is_nan()
    }

    /// The point in GUI coordinates: window-local, origin at the window's
    /// top-left corner.
    pub fn gui(&self, window_position: Point) -> Point {
        Point::new(self.x - window_position.x, self.y - window_position.y)
    }

    /// The point in screen-space pixels with a bottom-left origin, as used
    /// by camera projections.
    pub fn screen(&self, window_position: Point, screen_height: f32) -> Point {
        let gui = self.gui(window_position);
        Point::new(gui.x, screen_height - 1.0 - gui.y)
    }

    /// The point in the viewport coordinate system: bottom-left is (0, 0),
    /// top-right is (1, 1).
    pub fn viewport(&self, window_position: Point, screen_width: f32, screen_height: f32) -> Point {
        let screen = self.screen(window_position, screen_height);
        Point::new(screen.x / screen_width, screen.y / screen_height)
    }

    /// Whether the point is valid and falls inside the window.
    pub fn is_within_screen(
        &self,
        window_position: Point,
        screen_width: f32,
        screen_height: f32,
    ) -> bool {
        let screen = self.screen(window_position, screen_height);
        self.is_valid()
            && screen.x >= 0.0
            && screen.x < screen_width
            && screen.y >= 0.0
            && screen.y < screen_height
    }
}
