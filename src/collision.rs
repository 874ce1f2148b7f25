//! Overlap tests between circles and axis-aligned rectangles.
//!
//! Coordinates follow the play field: origin at the top-left corner,
//! y grows downward.  Every function here is pure.

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Circle {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
}

/// Axis-aligned rectangle anchored at its top-left corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    /// Inclusive point test, used for pointer hit regions.
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x <= self.right() && y >= self.y && y <= self.bottom()
    }
}

/// Tangent circles do not count as overlapping.
pub fn circles_overlap(a: &Circle, b: &Circle) -> bool {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    (dx * dx + dy * dy).sqrt() < a.radius + b.radius
}

/// Shared edges count as overlapping.
pub fn rectangles_overlap(a: &Rect, b: &Rect) -> bool {
    if a.right() < b.x || b.right() < a.x {
        return false;
    }
    if a.bottom() < b.y || b.bottom() < a.y {
        return false;
    }
    true
}

pub fn circle_rectangle_overlap(circle: &Circle, rect: &Rect) -> bool {
    // Nearest point of the rectangle to the circle's center
    let nearest_x = circle.x.clamp(rect.x, rect.right());
    let nearest_y = circle.y.clamp(rect.y, rect.bottom());
    let dx = circle.x - nearest_x;
    let dy = circle.y - nearest_y;
    dx * dx + dy * dy <= circle.radius * circle.radius
}
