//! Catmull-Rom smoothing for polylines.
//!
//! Interior control points are the neighbor chord scaled by `tension / 3`,
//! so the emitted cubics pass through every input point exactly. Boundary
//! segments clamp the missing neighbor to the first/last point.

use crate::path::PathData;
use crate::point::Point;

/// Smooths an ordered point sequence into a cubic-Bezier path.
///
/// Fewer than 2 points yield an empty path; exactly 2 yield a straight
/// segment; otherwise the output has one cubic command per input segment.
pub fn smooth_spline(points: &[Point], tension: f32) -> PathData {
    let mut path = PathData::new();
    if points.len() < 2 {
        return path;
    }

    path.move_to(points[0]);
    if points.len() == 2 {
        path.line_to(points[1]);
        return path;
    }

    let t = tension.clamp(0.0, 1.0) / 3.0;
    let n = points.len();
    for i in 0..n - 1 {
        let prev = points[i.saturating_sub(1)];
        let p0 = points[i];
        let p1 = points[i + 1];
        let next = points[(i + 2).min(n - 1)];

        let c1 = p0 + (p1 - prev) * t;
        let c2 = p1 - (next - p0) * t;
        path.cubic_to(c1, c2, p1);
    }
    path
}

/// The area variant: the smoothed path is closed down to `baseline` and back
/// to the first point's x, forming a fillable region.
pub fn smooth_area_spline(points: &[Point], tension: f32, baseline: f32) -> PathData {
    let mut path = smooth_spline(points, tension);
    if points.len() < 2 {
        return path;
    }
    let first = points[0];
    let last = points[points.len() - 1];
    path.line_to((last.x, baseline));
    path.line_to((first.x, baseline));
    path.close();
    path
}

/// Evaluates a cubic Bezier at `t`.
pub fn cubic_point_at(p0: Point, c1: Point, c2: Point, p1: Point, t: f32) -> Point {
    let u = 1.0 - t;
    p0 * (u * u * u) + c1 * (3.0 * u * u * t) + c2 * (3.0 * u * t * t) + p1 * (t * t * t)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::PathCmd;

    #[test]
    fn test_fewer_than_two_points_is_empty() {
        assert!(smooth_spline(&[], 0.5).is_empty());
        assert!(smooth_spline(&[Point::new(1.0, 1.0)], 0.5).is_empty());
    }

    #[test]
    fn test_two_points_is_a_straight_segment() {
        let path = smooth_spline(&[Point::new(0.0, 0.0), Point::new(10.0, 5.0)], 0.5);
        assert_eq!(path.commands().len(), 2);
        assert!(matches!(path.commands()[1], PathCmd::LineTo(p) if p == Point::new(10.0, 5.0)));
    }

    #[test]
    fn test_one_cubic_per_segment_through_every_point() {
        let points = [
            Point::new(0.0, 0.0),
            Point::new(10.0, 20.0),
            Point::new(20.0, 5.0),
            Point::new(30.0, 15.0),
        ];
        let path = smooth_spline(&points, 0.5);

        let cubics: Vec<_> = path
            .commands()
            .iter()
            .filter(|c| matches!(c, PathCmd::CubicTo { .. }))
            .collect();
        assert_eq!(cubics.len(), points.len() - 1);

        // Every input point appears exactly as a segment endpoint.
        let mut endpoints = vec![match path.commands()[0] {
            PathCmd::MoveTo(p) => p,
            _ => unreachable!(),
        }];
        for cmd in path.commands() {
            if let PathCmd::CubicTo { end, .. } = cmd {
                endpoints.push(*end);
            }
        }
        assert_eq!(endpoints, points);
    }

    #[test]
    fn test_zero_tension_degenerates_toward_chords() {
        let points = [
            Point::new(0.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(20.0, 0.0),
        ];
        let path = smooth_spline(&points, 0.0);
        // With zero tension control points collapse onto the endpoints.
        if let PathCmd::CubicTo { c1, c2, end } = path.commands()[1] {
            assert_eq!(c1, points[0]);
            assert_eq!(c2, end);
        } else {
            panic!("expected cubic");
        }
    }

    #[test]
    fn test_area_variant_closes_to_baseline() {
        let points = [
            Point::new(0.0, 5.0),
            Point::new(10.0, 2.0),
            Point::new(20.0, 8.0),
        ];
        let path = smooth_area_spline(&points, 0.5, 100.0);
        let cmds = path.commands();
        assert!(matches!(cmds[cmds.len() - 1], PathCmd::Close));
        assert!(
            matches!(cmds[cmds.len() - 2], PathCmd::LineTo(p) if p == Point::new(0.0, 100.0))
        );
        assert!(
            matches!(cmds[cmds.len() - 3], PathCmd::LineTo(p) if p == Point::new(20.0, 100.0))
        );
    }

    #[test]
    fn test_cubic_point_at_endpoints() {
        let p0 = Point::new(0.0, 0.0);
        let p1 = Point::new(10.0, 10.0);
        let c1 = Point::new(3.0, 0.0);
        let c2 = Point::new(7.0, 10.0);
        assert_eq!(cubic_point_at(p0, c1, c2, p1, 0.0), p0);
        assert_eq!(cubic_point_at(p0, c1, c2, p1, 1.0), p1);
    }
}
