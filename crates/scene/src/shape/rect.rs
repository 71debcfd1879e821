use glam::Vec2;
use vellum_core::{PathData, Point, Rect};

/// An axis-aligned rectangle, optionally with rounded corners.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RectShape {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Corner radius; clamped to half the smaller side when painting.
    pub radius: f32,
}

impl RectShape {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
            radius: 0.0,
        }
    }

    pub fn with_radius(mut self, radius: f32) -> Self {
        self.radius = radius;
        self
    }

    pub fn bounding_rect(&self) -> Rect {
        Rect::from_origin_size(
            Vec2::new(self.x, self.y),
            Vec2::new(self.width, self.height),
        )
    }

    /// Box membership; rounded corners are ignored for hit-testing.
    pub fn contains(&self, p: Point) -> bool {
        if self.width <= 0.0 || self.height <= 0.0 {
            return false;
        }
        self.bounding_rect().contains_point(p.to_vec2())
    }

    pub fn to_path(&self) -> PathData {
        let mut path = PathData::new();
        if self.radius > 0.0 {
            path.rounded_rect(self.x, self.y, self.width, self.height, self.radius);
        } else {
            path.rect(self.x, self.y, self.width, self.height);
        }
        path
    }
}
