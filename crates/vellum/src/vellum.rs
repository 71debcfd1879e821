//! The façade crate: composes the scene graph, a painter backend, the
//! pointer handler, and the animator behind one [`Renderer`] surface.

pub mod handler;
pub mod locale;
pub mod renderer;
pub mod theme;

pub use handler::{Handler, PointerState};
pub use locale::Locale;
pub use renderer::Renderer;
pub use theme::Theme;

pub use motion::{Animation, AnimationOptions, Easing, FrameClock, ManualClock, SystemClock};
pub use paint::{PaintError, Painter, RasterPainter, VectorContent, VectorNode, VectorPainter};
pub use scene::{
    Arc, BezierCurve, Circle, Element, ElementId, ElementKind, ElementPatch, Event, HandlerId,
    Image, ImageData, PathShape, Polygon, Polyline, RectShape, Scene, Sector, Shape, Storage,
    Style, StylePatch, Text, TextAlign, Transform, TransformPatch, Traversal,
};
pub use vellum_core::{parse_color, Color, Matrix, PathCmd, PathData, Point, Rect};
