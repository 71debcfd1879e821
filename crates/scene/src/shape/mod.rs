//! Shape geometry.
//!
//! Each shape type defines its own bounding box, local-space containment
//! test, and path construction. Bounds are post-stroke-width (expanded by
//! half the stroke) but pre-transform; containment runs in the shape's local
//! coordinate space.

mod bezier;
mod circle;
mod image;
mod path;
mod polygon;
mod rect;
mod sector;
mod text;

pub use bezier::BezierCurve;
pub use circle::Circle;
pub use image::{Image, ImageData};
pub use path::PathShape;
pub use polygon::{Polygon, Polyline};
pub use rect::RectShape;
pub use sector::{Arc, Sector};
pub use text::{Text, TextAlign};

use crate::style::Style;
use vellum_core::{PathData, Point, Rect};

/// A drawable geometric primitive.
#[derive(Clone, Debug)]
pub enum Shape {
    Circle(Circle),
    Rect(RectShape),
    Polygon(Polygon),
    Polyline(Polyline),
    Sector(Sector),
    Arc(Arc),
    Path(PathShape),
    Text(Text),
    Image(Image),
    Bezier(BezierCurve),
}

impl Shape {
    /// Axis-aligned box covering the shape after stroking, before any
    /// transform.
    pub fn bounding_rect(&self, style: &Style) -> Rect {
        let raw = match self {
            Shape::Circle(s) => s.bounding_rect(),
            Shape::Rect(s) => s.bounding_rect(),
            Shape::Polygon(s) => s.bounding_rect(),
            Shape::Polyline(s) => s.bounding_rect(),
            Shape::Sector(s) => s.bounding_rect(),
            Shape::Arc(s) => s.bounding_rect(),
            Shape::Path(s) => s.bounding_rect(),
            Shape::Text(s) => s.bounding_rect(style),
            Shape::Image(s) => s.bounding_rect(),
            Shape::Bezier(s) => s.bounding_rect(),
        };
        let pad = style.stroke_padding();
        if pad > 0.0 {
            raw.expand(pad)
        } else {
            raw
        }
    }

    /// Point containment in local coordinates. Degenerate geometry is never
    /// contained; open strokes (polyline, bezier) have no interior.
    pub fn contains(&self, p: Point, style: &Style) -> bool {
        match self {
            Shape::Circle(s) => s.contains(p),
            Shape::Rect(s) => s.contains(p),
            Shape::Polygon(s) => s.contains(p),
            Shape::Polyline(_) => false,
            Shape::Sector(s) => s.contains(p),
            Shape::Arc(s) => s.contains(p),
            Shape::Path(s) => s.contains(p),
            Shape::Text(s) => s.contains(p, style),
            Shape::Image(s) => s.contains(p),
            Shape::Bezier(_) => false,
        }
    }

    /// The path geometry both painter backends consume. Text and image
    /// nodes carry their own payloads instead of a path.
    pub fn to_path(&self) -> Option<PathData> {
        match self {
            Shape::Circle(s) => Some(s.to_path()),
            Shape::Rect(s) => Some(s.to_path()),
            Shape::Polygon(s) => Some(s.to_path()),
            Shape::Polyline(s) => Some(s.to_path()),
            Shape::Sector(s) => Some(s.to_path()),
            Shape::Arc(s) => Some(s.to_path()),
            Shape::Path(s) => Some(s.data.clone()),
            Shape::Bezier(s) => Some(s.to_path()),
            Shape::Text(_) | Shape::Image(_) => None,
        }
    }
}
