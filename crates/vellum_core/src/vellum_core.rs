//! Pure geometry, color, and curve math underneath the vellum scene graph.
//!
//! Everything in this crate is stateless: affine matrices, axis-aligned
//! rects, color parsing and blending, path command lists, and Catmull-Rom
//! smoothing. Nothing here knows about elements, painters, or events.

pub mod color;
pub mod curve;
pub mod matrix;
pub mod path;
pub mod point;
pub mod rect;

pub use color::{parse_color, Color};
pub use matrix::Matrix;
pub use path::{PathCmd, PathData};
pub use point::Point;
pub use rect::Rect;
