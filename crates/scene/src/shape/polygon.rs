use vellum_core::curve::{smooth_area_spline, smooth_spline};
use vellum_core::{PathData, Point, Rect};

/// A closed polygon. With `smooth > 0` the outline is rendered as a
/// Catmull-Rom smoothed spline; containment always uses the straight edges.
#[derive(Clone, Debug, PartialEq)]
pub struct Polygon {
    pub points: Vec<Point>,
    /// Smoothing tension in [0, 1]; 0 disables smoothing.
    pub smooth: f32,
}

impl Polygon {
    pub fn new(points: Vec<Point>) -> Self {
        Self {
            points,
            smooth: 0.0,
        }
    }

    pub fn with_smooth(mut self, smooth: f32) -> Self {
        self.smooth = smooth;
        self
    }

    pub fn bounding_rect(&self) -> Rect {
        if self.smooth > 0.0 {
            // Smoothed control points may overshoot the point hull.
            self.to_path().bounds()
        } else {
            Rect::from_points(self.points.iter().map(|p| p.to_vec2()))
        }
    }

    /// Ray-casting edge parity. Requires at least 3 vertices.
    pub fn contains(&self, p: Point) -> bool {
        point_in_polygon(&self.points, p)
    }

    pub fn to_path(&self) -> PathData {
        let mut path = if self.smooth > 0.0 {
            smooth_spline(&self.points, self.smooth)
        } else {
            polyline_path(&self.points)
        };
        if !path.is_empty() {
            path.close();
        }
        path
    }
}

/// An open polyline. Stroke-only: it is never contained as an area.
#[derive(Clone, Debug, PartialEq)]
pub struct Polyline {
    pub points: Vec<Point>,
    /// Smoothing tension in [0, 1]; 0 disables smoothing.
    pub smooth: f32,
    /// Closes the smoothed stroke down to this baseline as a fillable area.
    pub area_baseline: Option<f32>,
}

impl Polyline {
    pub fn new(points: Vec<Point>) -> Self {
        Self {
            points,
            smooth: 0.0,
            area_baseline: None,
        }
    }

    pub fn with_smooth(mut self, smooth: f32) -> Self {
        self.smooth = smooth;
        self
    }

    pub fn with_area_baseline(mut self, baseline: f32) -> Self {
        self.area_baseline = Some(baseline);
        self
    }

    pub fn bounding_rect(&self) -> Rect {
        if self.smooth > 0.0 || self.area_baseline.is_some() {
            self.to_path().bounds()
        } else {
            Rect::from_points(self.points.iter().map(|p| p.to_vec2()))
        }
    }

    pub fn to_path(&self) -> PathData {
        match self.area_baseline {
            Some(baseline) => smooth_area_spline(&self.points, self.smooth, baseline),
            None if self.smooth > 0.0 => smooth_spline(&self.points, self.smooth),
            None => polyline_path(&self.points),
        }
    }
}

fn polyline_path(points: &[Point]) -> PathData {
    let mut path = PathData::new();
    let Some((first, rest)) = points.split_first() else {
        return path;
    };
    if rest.is_empty() {
        return path;
    }
    path.move_to(*first);
    for p in rest {
        path.line_to(*p);
    }
    path
}

/// Ray casting (even-odd parity) against the polygon's edges.
pub(crate) fn point_in_polygon(points: &[Point], p: Point) -> bool {
    if points.len() < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = points.len() - 1;
    for i in 0..points.len() {
        let (pi, pj) = (points[i], points[j]);
        if (pi.y > p.y) != (pj.y > p.y)
            && p.x < (pj.x - pi.x) * (p.y - pi.y) / (pj.y - pi.y) + pi.x
        {
            inside = !inside;
        }
        j = i;
    }
    inside
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};
    use vellum_core::PathCmd;

    /// Winding-number reference used to cross-check the ray caster.
    fn winding_number(points: &[Point], p: Point) -> i32 {
        let is_left = |a: Point, b: Point, c: Point| -> f32 {
            (b.x - a.x) * (c.y - a.y) - (c.x - a.x) * (b.y - a.y)
        };
        let mut wn = 0;
        let n = points.len();
        for i in 0..n {
            let a = points[i];
            let b = points[(i + 1) % n];
            if a.y <= p.y {
                if b.y > p.y && is_left(a, b, p) > 0.0 {
                    wn += 1;
                }
            } else if b.y <= p.y && is_left(a, b, p) < 0.0 {
                wn -= 1;
            }
        }
        wn
    }

    #[test]
    fn test_square_containment() {
        let square = Polygon::new(vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
        ]);
        assert!(square.contains(Point::new(5.0, 5.0)));
        assert!(!square.contains(Point::new(15.0, 5.0)));
    }

    #[test]
    fn test_fewer_than_three_vertices_never_contained() {
        let degenerate = Polygon::new(vec![Point::new(0.0, 0.0), Point::new(10.0, 10.0)]);
        assert!(!degenerate.contains(Point::new(5.0, 5.0)));
    }

    #[test]
    fn test_ray_casting_agrees_with_winding_reference() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(0x5eed);
        for _ in 0..50 {
            // Convex-ish polygon from sorted angles keeps edges simple
            // (the two rules agree only on non-self-intersecting input).
            let n = rng.random_range(3..10);
            let mut angles: Vec<f32> = (0..n)
                .map(|_| rng.random_range(0.0..std::f32::consts::TAU))
                .collect();
            angles.sort_by(|a, b| a.partial_cmp(b).unwrap());
            angles.dedup_by(|a, b| (*a - *b).abs() < 1e-3);
            if angles.len() < 3 {
                continue;
            }
            let points: Vec<Point> = angles
                .iter()
                .map(|a| {
                    let r = rng.random_range(5.0..50.0);
                    Point::new(50.0 + r * a.cos(), 50.0 + r * a.sin())
                })
                .collect();

            for _ in 0..20 {
                let q = Point::new(rng.random_range(0.0..100.0), rng.random_range(0.0..100.0));
                let parity = point_in_polygon(&points, q);
                let winding = winding_number(&points, q) != 0;
                assert_eq!(parity, winding, "disagree at {q:?} on {points:?}");
            }
        }
    }

    #[test]
    fn test_polyline_has_no_area() {
        let line = Polyline::new(vec![Point::new(0.0, 0.0), Point::new(10.0, 10.0)]);
        let path = line.to_path();
        assert_eq!(path.commands().len(), 2);
        assert!(!path.commands().iter().any(|c| matches!(c, PathCmd::Close)));
    }

    #[test]
    fn test_smooth_polygon_closes() {
        let tri = Polygon::new(vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(5.0, 10.0),
        ])
        .with_smooth(0.5);
        let path = tri.to_path();
        assert!(matches!(path.commands().last(), Some(PathCmd::Close)));
    }
}
