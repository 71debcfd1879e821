//! Annular sectors and circular arcs.
//!
//! Angles are radians. The `clockwise` flag picks which way the span runs
//! from `start_angle` to `end_angle`; query angles are normalized into
//! [0, 2π) so spans that cross the zero axis wrap correctly.

use std::f32::consts::TAU;
use vellum_core::{PathData, Point, Rect};

/// A pie slice, optionally annular (`r0 > 0` leaves an inner hole).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Sector {
    pub cx: f32,
    pub cy: f32,
    /// Inner radius; 0 for a full slice.
    pub r0: f32,
    /// Outer radius.
    pub r: f32,
    pub start_angle: f32,
    pub end_angle: f32,
    pub clockwise: bool,
}

impl Sector {
    pub fn new(
        cx: f32,
        cy: f32,
        r0: f32,
        r: f32,
        start_angle: f32,
        end_angle: f32,
        clockwise: bool,
    ) -> Self {
        Self {
            cx,
            cy,
            r0,
            r,
            start_angle,
            end_angle,
            clockwise,
        }
    }

    pub fn bounding_rect(&self) -> Rect {
        self.to_path().bounds()
    }

    pub fn contains(&self, p: Point) -> bool {
        if self.r <= 0.0 {
            return false;
        }
        let d2 = p.distance_squared(Point::new(self.cx, self.cy));
        if d2 > self.r * self.r || d2 < self.r0 * self.r0 {
            return false;
        }
        let angle = (p.y - self.cy).atan2(p.x - self.cx);
        angle_in_span(angle, self.start_angle, self.end_angle, self.clockwise)
    }

    pub fn to_path(&self) -> PathData {
        let mut path = PathData::new();
        let sweep = sweep_angle(self.start_angle, self.end_angle, self.clockwise);
        path.arc((self.cx, self.cy), self.r, self.start_angle, sweep);
        if self.r0 > 0.0 {
            // Inner edge traced back toward the start angle.
            path.arc((self.cx, self.cy), self.r0, self.start_angle + sweep, -sweep);
        } else {
            path.line_to((self.cx, self.cy));
        }
        path.close();
        path
    }
}

/// An open circular arc (stroked, no interior fill of its own).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Arc {
    pub cx: f32,
    pub cy: f32,
    pub r: f32,
    pub start_angle: f32,
    pub end_angle: f32,
    pub clockwise: bool,
}

impl Arc {
    pub fn new(cx: f32, cy: f32, r: f32, start_angle: f32, end_angle: f32, clockwise: bool) -> Self {
        Self {
            cx,
            cy,
            r,
            start_angle,
            end_angle,
            clockwise,
        }
    }

    pub fn bounding_rect(&self) -> Rect {
        self.to_path().bounds()
    }

    /// Squared-distance test against the radius plus membership of the
    /// normalized query angle in the arc's angular span.
    pub fn contains(&self, p: Point) -> bool {
        if self.r <= 0.0 {
            return false;
        }
        let d2 = p.distance_squared(Point::new(self.cx, self.cy));
        if d2 > self.r * self.r {
            return false;
        }
        let angle = (p.y - self.cy).atan2(p.x - self.cx);
        angle_in_span(angle, self.start_angle, self.end_angle, self.clockwise)
    }

    pub fn to_path(&self) -> PathData {
        let mut path = PathData::new();
        let sweep = sweep_angle(self.start_angle, self.end_angle, self.clockwise);
        path.arc((self.cx, self.cy), self.r, self.start_angle, sweep);
        path
    }
}

/// Signed sweep from `start` to `end` in the requested direction; spans of
/// a full turn or more cover the whole circle.
pub(crate) fn sweep_angle(start: f32, end: f32, clockwise: bool) -> f32 {
    let diff = end - start;
    if diff.abs() >= TAU {
        return if clockwise { -TAU } else { TAU };
    }
    if clockwise {
        -((start - end).rem_euclid(TAU))
    } else {
        diff.rem_euclid(TAU)
    }
}

/// Whether `angle` falls inside the span, honoring direction and handling
/// wraparound when the end angle is numerically less than the start.
pub(crate) fn angle_in_span(angle: f32, start: f32, end: f32, clockwise: bool) -> bool {
    if (end - start).abs() >= TAU {
        return true;
    }
    // A clockwise span from start to end covers the same angles as a
    // counterclockwise span from end to start.
    let (s, e) = if clockwise { (end, start) } else { (start, end) };
    let s = s.rem_euclid(TAU);
    let mut e = e.rem_euclid(TAU);
    if e < s {
        e += TAU;
    }
    let a = angle.rem_euclid(TAU);
    (s..=e).contains(&a) || (s..=e).contains(&(a + TAU))
}
