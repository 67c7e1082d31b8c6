//! Coordinate spaces.
//!
//! Landmarks arrive in *normalized* image space (`[0, 1]` on both axes) while
//! keys live in *pixel* space.  [`to_pixel`] is the only bridge between the
//! two, so the pinch classifier never sees pixels and the hit tester never
//! sees normalized values.

// ════════════════════════════════════════════════════════════════════════════
// Viewport
// ════════════════════════════════════════════════════════════════════════════

/// Dimensions of a delivered camera frame, in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Viewport {
    pub width:  u32,
    pub height: u32,
}

impl Viewport {
    pub const fn new(width: u32, height: u32) -> Self {
        Viewport { width, height }
    }

    /// Width as a signed pixel coordinate, saturating at `i32::MAX`.
    pub fn width_px(&self) -> i32 {
        i32::try_from(self.width).unwrap_or(i32::MAX)
    }

    /// Height as a signed pixel coordinate, saturating at `i32::MAX`.
    pub fn height_px(&self) -> i32 {
        i32::try_from(self.height).unwrap_or(i32::MAX)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Points
// ════════════════════════════════════════════════════════════════════════════

/// A landmark position in normalized image coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct NormPoint {
    pub x: f32,
    pub y: f32,
}

impl NormPoint {
    pub const fn new(x: f32, y: f32) -> Self {
        NormPoint { x, y }
    }

    /// Euclidean distance in normalized space.
    pub fn distance(self, other: NormPoint) -> f32 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Reflect across the vertical centre line of the image.
    pub fn mirrored(self) -> Self {
        NormPoint { x: 1.0 - self.x, y: self.y }
    }
}

/// A position in viewport pixels.  May be negative or beyond the viewport.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PixelPoint {
    pub x: i32,
    pub y: i32,
}

impl PixelPoint {
    pub const fn new(x: i32, y: i32) -> Self {
        PixelPoint { x, y }
    }
}

/// Denormalize a landmark into viewport pixels.
///
/// Truncates toward zero, so `x = 0.9999` on a 1280-wide frame lands on
/// column 1279, never 1280.
pub fn to_pixel(point: NormPoint, viewport: Viewport) -> PixelPoint {
    PixelPoint {
        x: (point.x * viewport.width as f32) as i32,
        y: (point.y * viewport.height as f32) as i32,
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Rect
// ════════════════════════════════════════════════════════════════════════════

/// Axis-aligned rectangle in pixel space.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x:      i32,
    pub y:      i32,
    pub width:  i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Rect { x, y, width, height }
    }

    pub fn right(&self) -> i32 { self.x + self.width }
    pub fn bottom(&self) -> i32 { self.y + self.height }

    /// Containment test, inclusive on all four edges.
    pub fn contains(&self, p: PixelPoint) -> bool {
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
    }

    /// Whether the open interiors of two rectangles intersect.
    /// Rectangles that merely share an edge do not overlap.
    pub fn interiors_overlap(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// Centre pixel (rounded toward the top-left).
    pub fn center(&self) -> PixelPoint {
        PixelPoint::new(self.x + self.width / 2, self.y + self.height / 2)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
