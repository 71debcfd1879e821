use vellum_core::{PathData, Point, Rect};

/// A single quadratic or cubic bezier segment. Stroke-only geometry: it is
/// never contained as an area.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BezierCurve {
    pub start: Point,
    pub ctrl1: Point,
    /// Second control point; `None` makes the segment quadratic.
    pub ctrl2: Option<Point>,
    pub end: Point,
}

impl BezierCurve {
    pub fn quadratic(start: impl Into<Point>, ctrl: impl Into<Point>, end: impl Into<Point>) -> Self {
        Self {
            start: start.into(),
            ctrl1: ctrl.into(),
            ctrl2: None,
            end: end.into(),
        }
    }

    pub fn cubic(
        start: impl Into<Point>,
        ctrl1: impl Into<Point>,
        ctrl2: impl Into<Point>,
        end: impl Into<Point>,
    ) -> Self {
        Self {
            start: start.into(),
            ctrl1: ctrl1.into(),
            ctrl2: Some(ctrl2.into()),
            end: end.into(),
        }
    }

    pub fn bounding_rect(&self) -> Rect {
        self.to_path().bounds()
    }

    pub fn to_path(&self) -> PathData {
        let mut path = PathData::new();
        path.move_to(self.start);
        match self.ctrl2 {
            Some(c2) => path.cubic_to(self.ctrl1, c2, self.end),
            None => path.quad_to(self.ctrl1, self.end),
        }
        path
    }
}
