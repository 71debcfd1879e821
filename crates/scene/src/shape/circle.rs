use glam::Vec2;
use vellum_core::{PathData, Point, Rect};

/// A circle centered at (cx, cy).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Circle {
    pub cx: f32,
    pub cy: f32,
    pub r: f32,
}

impl Circle {
    pub fn new(cx: f32, cy: f32, r: f32) -> Self {
        Self { cx, cy, r }
    }

    pub fn bounding_rect(&self) -> Rect {
        Rect::new(
            Vec2::new(self.cx - self.r, self.cy - self.r),
            Vec2::new(self.cx + self.r, self.cy + self.r),
        )
    }

    /// Squared-distance test against the radius.
    pub fn contains(&self, p: Point) -> bool {
        if self.r <= 0.0 {
            return false;
        }
        p.distance_squared(Point::new(self.cx, self.cy)) <= self.r * self.r
    }

    pub fn to_path(&self) -> PathData {
        let mut path = PathData::new();
        path.circle((self.cx, self.cy), self.r);
        path
    }
}
