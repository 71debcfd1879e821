//! Path command lists shared by both painter backends.
//!
//! [`PathData`] is an ordered command sequence with incrementally tracked
//! bounds. Bounds are the control extent: conservative for curves, exact for
//! lines. The command set is deliberately small (no arc variant); circular
//! geometry is emitted as cubic segments so both backends consume one
//! vocabulary.

use crate::point::Point;
use crate::rect::Rect;
use glam::Vec2;

/// Cubic approximation constant for a quarter circle.
const KAPPA: f32 = 0.552_284_8;

/// A path command.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathCmd {
    /// Starts a new subpath.
    MoveTo(Point),
    LineTo(Point),
    QuadTo { ctrl: Point, end: Point },
    CubicTo { c1: Point, c2: Point, end: Point },
    /// Closes the current subpath.
    Close,
}

/// A path of multiple commands with control-extent bounds.
#[derive(Clone, Debug, Default)]
pub struct PathData {
    cmds: Vec<PathCmd>,
    bounds: Option<Rect>,
    current: Point,
    subpath_start: Point,
}

impl PathData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[PathCmd] {
        &self.cmds
    }

    pub fn is_empty(&self) -> bool {
        self.cmds.is_empty()
    }

    /// Control extent of the path; the zero rect when empty.
    pub fn bounds(&self) -> Rect {
        self.bounds.unwrap_or_else(Rect::zero)
    }

    pub fn current_point(&self) -> Point {
        self.current
    }

    fn include(&mut self, p: Point) {
        let v = p.to_vec2();
        self.bounds = Some(match self.bounds {
            Some(r) => Rect::new(r.min.min(v), r.max.max(v)),
            None => Rect::new(v, v),
        });
    }

    pub fn move_to(&mut self, p: impl Into<Point>) {
        let p = p.into();
        self.cmds.push(PathCmd::MoveTo(p));
        self.include(p);
        self.current = p;
        self.subpath_start = p;
    }

    pub fn line_to(&mut self, p: impl Into<Point>) {
        let p = p.into();
        self.cmds.push(PathCmd::LineTo(p));
        self.include(p);
        self.current = p;
    }

    pub fn quad_to(&mut self, ctrl: impl Into<Point>, end: impl Into<Point>) {
        let (ctrl, end) = (ctrl.into(), end.into());
        self.cmds.push(PathCmd::QuadTo { ctrl, end });
        self.include(ctrl);
        self.include(end);
        self.current = end;
    }

    pub fn cubic_to(
        &mut self,
        c1: impl Into<Point>,
        c2: impl Into<Point>,
        end: impl Into<Point>,
    ) {
        let (c1, c2, end) = (c1.into(), c2.into(), end.into());
        self.cmds.push(PathCmd::CubicTo { c1, c2, end });
        self.include(c1);
        self.include(c2);
        self.include(end);
        self.current = end;
    }

    pub fn close(&mut self) {
        self.cmds.push(PathCmd::Close);
        self.current = self.subpath_start;
    }

    pub fn rect(&mut self, x: f32, y: f32, w: f32, h: f32) {
        self.move_to((x, y));
        self.line_to((x + w, y));
        self.line_to((x + w, y + h));
        self.line_to((x, y + h));
        self.close();
    }

    /// Rectangle with corners rounded by `r`, clamped to half the smaller
    /// side.
    pub fn rounded_rect(&mut self, x: f32, y: f32, w: f32, h: f32, r: f32) {
        let r = r.min(w * 0.5).min(h * 0.5).max(0.0);
        if r == 0.0 {
            self.rect(x, y, w, h);
            return;
        }
        let k = KAPPA * r;
        self.move_to((x + r, y));
        self.line_to((x + w - r, y));
        self.cubic_to((x + w - r + k, y), (x + w, y + r - k), (x + w, y + r));
        self.line_to((x + w, y + h - r));
        self.cubic_to(
            (x + w, y + h - r + k),
            (x + w - r + k, y + h),
            (x + w - r, y + h),
        );
        self.line_to((x + r, y + h));
        self.cubic_to((x + r - k, y + h), (x, y + h - r + k), (x, y + h - r));
        self.line_to((x, y + r));
        self.cubic_to((x, y + r - k), (x + r - k, y), (x + r, y));
        self.close();
    }

    /// Full circle as four cubic segments.
    pub fn circle(&mut self, center: impl Into<Point>, radius: f32) {
        let c = center.into();
        self.ellipse(c, radius, radius);
    }

    pub fn ellipse(&mut self, center: impl Into<Point>, rx: f32, ry: f32) {
        let c = center.into();
        let (kx, ky) = (KAPPA * rx, KAPPA * ry);
        self.move_to((c.x + rx, c.y));
        self.cubic_to((c.x + rx, c.y + ky), (c.x + kx, c.y + ry), (c.x, c.y + ry));
        self.cubic_to((c.x - kx, c.y + ry), (c.x - rx, c.y + ky), (c.x - rx, c.y));
        self.cubic_to((c.x - rx, c.y - ky), (c.x - kx, c.y - ry), (c.x, c.y - ry));
        self.cubic_to((c.x + kx, c.y - ry), (c.x + rx, c.y - ky), (c.x + rx, c.y));
        self.close();
    }

    /// Circular arc from `start_angle` sweeping `sweep` radians, emitted as
    /// cubic segments of at most a quarter turn each. Starts with a line to
    /// the arc's first point when a subpath is already open, otherwise a
    /// move.
    pub fn arc(&mut self, center: impl Into<Point>, radius: f32, start_angle: f32, sweep: f32) {
        let c = center.into();
        let first = Point::new(
            c.x + radius * start_angle.cos(),
            c.y + radius * start_angle.sin(),
        );
        if self.cmds.is_empty() {
            self.move_to(first);
        } else {
            self.line_to(first);
        }

        let segments = (sweep.abs() / std::f32::consts::FRAC_PI_2).ceil().max(1.0) as usize;
        let step = sweep / segments as f32;
        let mut angle = start_angle;
        for _ in 0..segments {
            let next = angle + step;
            let k = 4.0 / 3.0 * (step / 4.0).tan() * radius;
            let (sin0, cos0) = angle.sin_cos();
            let (sin1, cos1) = next.sin_cos();
            let p0 = Point::new(c.x + radius * cos0, c.y + radius * sin0);
            let p1 = Point::new(c.x + radius * cos1, c.y + radius * sin1);
            let c1 = Point::new(p0.x - k * sin0, p0.y + k * cos0);
            let c2 = Point::new(p1.x + k * sin1, p1.y - k * cos1);
            self.cubic_to(c1, c2, p1);
            angle = next;
        }
    }

    /// Flattens every subpath into a polyline, `steps` samples per curve.
    /// Used for scanline containment of arbitrary paths.
    pub fn flatten(&self, steps: usize) -> Vec<Vec<Vec2>> {
        let steps = steps.max(2);
        let mut subpaths: Vec<Vec<Vec2>> = Vec::new();
        let mut current: Vec<Vec2> = Vec::new();
        let mut cursor = Vec2::ZERO;

        for cmd in &self.cmds {
            match *cmd {
                PathCmd::MoveTo(p) => {
                    if current.len() > 1 {
                        subpaths.push(std::mem::take(&mut current));
                    } else {
                        current.clear();
                    }
                    cursor = p.to_vec2();
                    current.push(cursor);
                }
                PathCmd::LineTo(p) => {
                    cursor = p.to_vec2();
                    current.push(cursor);
                }
                PathCmd::QuadTo { ctrl, end } => {
                    let (p0, p1, p2) = (cursor, ctrl.to_vec2(), end.to_vec2());
                    for i in 1..=steps {
                        let t = i as f32 / steps as f32;
                        let u = 1.0 - t;
                        current.push(p0 * (u * u) + p1 * (2.0 * u * t) + p2 * (t * t));
                    }
                    cursor = p2;
                }
                PathCmd::CubicTo { c1, c2, end } => {
                    let (p0, p1, p2, p3) = (cursor, c1.to_vec2(), c2.to_vec2(), end.to_vec2());
                    for i in 1..=steps {
                        let t = i as f32 / steps as f32;
                        let u = 1.0 - t;
                        current.push(
                            p0 * (u * u * u)
                                + p1 * (3.0 * u * u * t)
                                + p2 * (3.0 * u * t * t)
                                + p3 * (t * t * t),
                        );
                    }
                    cursor = p3;
                }
                PathCmd::Close => {
                    if current.len() > 1 {
                        subpaths.push(std::mem::take(&mut current));
                    } else {
                        current.clear();
                    }
                }
            }
        }
        if current.len() > 1 {
            subpaths.push(current);
        }
        subpaths
    }
}
