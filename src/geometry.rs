use serde::{Deserialize, Serialize};

/// A 2-D point. Which coordinate space it lives in (device/screen, viewport,
/// or window-local GUI space) is determined by context.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle with its origin at the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Tells whether this rectangle and `other` share any interior area.
    /// Rectangles that merely touch along an edge do not overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x < self.right() && point.y >= self.y && point.y < self.bottom()
    }

    /// Returns a copy shifted by the given offsets. Used to move bounds
    /// between absolute screen coordinates and window-local GUI coordinates.
    pub fn translated(&self, dx: f32, dy: f32) -> Rect {
        Rect::new(self.x + dx, self.y + dy, self.width, self.height)
    }
}

/// The on-screen location of an interactor: a rectangle in GUI coordinates,
/// a relative depth, and a validity flag. Scene projection can fail (object
/// behind the camera, off screen), in which case the location is invalid and
/// the interactor never matches any query.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectedRect {
    pub rect: Rect,
    pub relative_z: f32,
    pub is_valid: bool,
}

impl ProjectedRect {
    pub fn valid(rect: Rect, relative_z: f32) -> Self {
        Self {
            rect,
            relative_z,
            is_valid: true,
        }
    }

    pub fn invalid() -> Self {
        Self {
            rect: Rect::new(0.0, 0.0, 0.0, 0.0),
            relative_z: 0.0,
            is_valid: false,
        }
    }
}
