//! The painter contract.

use scene::{Scene, Storage};
use thiserror::Error;

/// Painter failures. Construction and resize fail fast; everything past a
/// live surface degrades silently instead.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PaintError {
    /// A pixel surface of the requested size could not be allocated.
    #[error("cannot allocate a {width}x{height} surface")]
    SurfaceUnavailable { width: u32, height: u32 },
    /// The painter was disposed and cannot accept further work.
    #[error("painter already disposed")]
    Disposed,
}

/// A rendering backend driven by the renderer's frame loop.
///
/// Repaints are coalesced: any number of [`Painter::mark_dirty`] calls
/// before the next frame collapse into a single [`Painter::paint`].
pub trait Painter {
    /// Changes the logical surface size; `None` keeps the current extent on
    /// that axis.
    fn resize(&mut self, width: Option<u32>, height: Option<u32>) -> Result<(), PaintError>;

    /// Logical width in surface units (pre device-pixel-ratio).
    fn width(&self) -> u32;

    fn height(&self) -> u32;

    /// Requests a repaint on the next frame.
    fn mark_dirty(&mut self);

    fn needs_paint(&self) -> bool;

    /// Repaints from the current storage order and clears element dirty
    /// flags. A disposed painter ignores the call.
    fn paint(&mut self, scene: &mut Scene, storage: &Storage);

    /// Releases the backend; every later call is a no-op.
    fn dispose(&mut self);
}
