//! Painter backends.
//!
//! [`Painter`] is the contract the renderer drives; [`RasterPainter`] draws
//! into a `tiny_skia` pixmap, [`VectorPainter`] maintains a retained tree of
//! resolved vector nodes for embedders that consume geometry instead of
//! pixels.

pub mod painter;
pub mod raster;
pub mod vector;

pub use painter::{PaintError, Painter};
pub use raster::RasterPainter;
pub use vector::{VectorContent, VectorNode, VectorPainter};
