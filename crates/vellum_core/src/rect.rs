//! Axis-aligned bounding rects.
//!
//! Shape bounds stay axis-aligned in local space; rotated nodes get their
//! world box by transforming the four corners and re-wrapping.

use crate::matrix::Matrix;
use glam::Vec2;

/// An axis-aligned bounding rect represented by min/max corners.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Rect {
    /// Top-left in screen coordinates.
    pub min: Vec2,
    /// Bottom-right in screen coordinates.
    pub max: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    pub fn from_origin_size(origin: Vec2, size: Vec2) -> Self {
        Self {
            min: origin,
            max: origin + size,
        }
    }

    /// Builds a rect from two corner points, ordering them automatically.
    pub fn from_corners(a: Vec2, b: Vec2) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Smallest rect covering every point, or the zero rect when empty.
    pub fn from_points<I>(points: I) -> Self
    where
        I: IntoIterator<Item = Vec2>,
    {
        let mut iter = points.into_iter();
        let Some(first) = iter.next() else {
            return Self::zero();
        };
        let mut rect = Self {
            min: first,
            max: first,
        };
        for p in iter {
            rect.min = rect.min.min(p);
            rect.max = rect.max.max(p);
        }
        rect
    }

    /// An empty rect at the origin. Empty aggregates (e.g. a group with no
    /// children) report this.
    pub fn zero() -> Self {
        Self {
            min: Vec2::ZERO,
            max: Vec2::ZERO,
        }
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    pub fn is_empty(&self) -> bool {
        self.min.x >= self.max.x || self.min.y >= self.max.y
    }

    /// The smallest rect containing both inputs.
    pub fn union(&self, other: &Self) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Points on the boundary count as contained.
    pub fn contains_point(&self, point: Vec2) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }

    /// Grows the rect by `amount` in every direction (e.g. half the stroke
    /// width so bounds cover the stroked outline).
    pub fn expand(&self, amount: f32) -> Self {
        Self {
            min: self.min - Vec2::splat(amount),
            max: self.max + Vec2::splat(amount),
        }
    }

    pub fn translate(&self, offset: Vec2) -> Self {
        Self {
            min: self.min + offset,
            max: self.max + offset,
        }
    }

    pub fn intersects(&self, other: &Self) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }

    /// Axis-aligned box covering this rect after an affine transform.
    pub fn transformed(&self, m: &Matrix) -> Self {
        let corners = [
            self.min,
            Vec2::new(self.max.x, self.min.y),
            self.max,
            Vec2::new(self.min.x, self.max.y),
        ];
        Self::from_points(corners.into_iter().map(|c| m.apply(c)))
    }
}

impl Default for Rect {
    fn default() -> Self {
        Self::zero()
    }
}
