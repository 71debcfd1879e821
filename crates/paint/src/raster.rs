//! The pixel backend.
//!
//! Owns a `tiny_skia` pixmap sized to logical size times the device pixel
//! ratio. Every repaint clears the surface and redraws visible elements in
//! storage order; per-element partial redraw is a non-goal here, the dirty
//! flags only gate whether a frame repaints at all.
//!
//! Glyph rasterization is delegated to the embedder: there is no font stack
//! in this core, so text nodes are skipped on the pixel surface and reported
//! through the vector backend instead.

use scene::{ElementKind, Scene, Shape, Storage, Style};
use tiny_skia::{
    FillRule, Paint, PathBuilder, Pixmap, PixmapPaint, PixmapRef, Shader, Stroke, StrokeDash,
    Transform,
};
use tracing::trace;
use vellum_core::{Color, Matrix, PathCmd, PathData};

pub struct RasterPainter {
    pixmap: Pixmap,
    width: u32,
    height: u32,
    dpr: f32,
    background: Option<Color>,
    dirty: bool,
    disposed: bool,
}

impl RasterPainter {
    /// Allocates the surface up front; zero or overflowing dimensions fail
    /// with [`PaintError::SurfaceUnavailable`].
    ///
    /// [`PaintError::SurfaceUnavailable`]: crate::PaintError::SurfaceUnavailable
    pub fn new(width: u32, height: u32, dpr: f32) -> Result<Self, crate::PaintError> {
        let pixmap = allocate(width, height, dpr)?;
        Ok(Self {
            pixmap,
            width,
            height,
            dpr: dpr.max(0.0),
            background: None,
            dirty: true,
            disposed: false,
        })
    }

    /// Opaque clear color painted before every frame; `None` clears to
    /// transparent.
    pub fn with_background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }

    pub fn device_pixel_ratio(&self) -> f32 {
        self.dpr
    }

    pub fn pixel_width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn pixel_height(&self) -> u32 {
        self.pixmap.height()
    }

    /// The rendered surface, premultiplied RGBA8.
    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    fn draw_element(&mut self, scene: &Scene, id: scene::ElementId) {
        let Some(el) = scene.get(id) else {
            return;
        };
        if el.invisible() {
            return;
        }
        let device = Matrix::scale(self.dpr, self.dpr).compose(scene.world_matrix(id));
        let ts = to_ts_transform(&device);
        let style = el.style();

        let ElementKind::Shape(shape) = el.kind() else {
            return;
        };
        match shape {
            Shape::Text(text) => {
                trace!(content = %text.content, "skipping glyph raster (no font stack)");
            }
            Shape::Image(image) => {
                let data = &image.data;
                let Some(src) = PixmapRef::from_bytes(data.pixels(), data.width(), data.height())
                else {
                    return;
                };
                let sx = image.width / data.width() as f32;
                let sy = image.height / data.height() as f32;
                if sx <= 0.0 || sy <= 0.0 {
                    return;
                }
                let placed = device
                    .compose(Matrix::translate(image.x, image.y))
                    .compose(Matrix::scale(sx, sy));
                let paint = PixmapPaint {
                    opacity: style.opacity.clamp(0.0, 1.0),
                    ..PixmapPaint::default()
                };
                self.pixmap
                    .draw_pixmap(0, 0, src, &paint, to_ts_transform(&placed), None);
            }
            _ => {
                let Some(data) = shape.to_path() else {
                    return;
                };
                let Some(path) = build_path(&data) else {
                    return;
                };
                self.fill_and_stroke(&path, style, ts);
            }
        }
    }

    fn fill_and_stroke(&mut self, path: &tiny_skia::Path, style: &Style, ts: Transform) {
        let opacity = style.opacity.clamp(0.0, 1.0);
        if let Some(fill) = style.fill {
            let paint = solid_paint(fill.scale_alpha(opacity));
            self.pixmap
                .fill_path(path, &paint, FillRule::EvenOdd, ts, None);
        }
        if let Some(stroke_color) = style.stroke {
            if style.stroke_width > 0.0 {
                let paint = solid_paint(stroke_color.scale_alpha(opacity));
                let stroke = Stroke {
                    width: style.stroke_width,
                    dash: style.line_dash.as_deref().and_then(to_stroke_dash),
                    ..Stroke::default()
                };
                self.pixmap.stroke_path(path, &paint, &stroke, ts, None);
            }
        }
    }
}

impl crate::Painter for RasterPainter {
    fn resize(&mut self, width: Option<u32>, height: Option<u32>) -> Result<(), crate::PaintError> {
        if self.disposed {
            return Err(crate::PaintError::Disposed);
        }
        let width = width.unwrap_or(self.width);
        let height = height.unwrap_or(self.height);
        self.pixmap = allocate(width, height, self.dpr)?;
        self.width = width;
        self.height = height;
        self.dirty = true;
        trace!(width, height, "raster surface resized");
        Ok(())
    }

    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn mark_dirty(&mut self) {
        if !self.disposed {
            self.dirty = true;
        }
    }

    fn needs_paint(&self) -> bool {
        self.dirty
    }

    fn paint(&mut self, scene: &mut Scene, storage: &Storage) {
        if self.disposed {
            return;
        }
        match self.background {
            Some(bg) => self.pixmap.fill(to_ts_color(bg)),
            None => self.pixmap.fill(tiny_skia::Color::TRANSPARENT),
        }
        for &id in storage.elements_list() {
            self.draw_element(scene, id);
        }
        scene.clear_dirty_flags();
        self.dirty = false;
        trace!(elements = storage.len(), "raster repaint");
    }

    fn dispose(&mut self) {
        self.disposed = true;
        self.dirty = false;
    }
}

fn allocate(width: u32, height: u32, dpr: f32) -> Result<Pixmap, crate::PaintError> {
    let pw = (width as f32 * dpr).round() as u32;
    let ph = (height as f32 * dpr).round() as u32;
    Pixmap::new(pw, ph).ok_or(crate::PaintError::SurfaceUnavailable { width, height })
}

fn to_ts_transform(m: &Matrix) -> Transform {
    Transform::from_row(m.a, m.b, m.c, m.d, m.e, m.f)
}

fn to_ts_color(c: Color) -> tiny_skia::Color {
    tiny_skia::Color::from_rgba(
        c.red().clamp(0.0, 1.0),
        c.green().clamp(0.0, 1.0),
        c.blue().clamp(0.0, 1.0),
        c.alpha().clamp(0.0, 1.0),
    )
    .unwrap_or(tiny_skia::Color::TRANSPARENT)
}

fn solid_paint(color: Color) -> Paint<'static> {
    Paint {
        shader: Shader::SolidColor(to_ts_color(color)),
        anti_alias: true,
        ..Paint::default()
    }
}

/// Canvas dash semantics: odd-length patterns repeat to even length.
fn to_stroke_dash(pattern: &[f32]) -> Option<StrokeDash> {
    if pattern.is_empty() || pattern.iter().any(|d| *d < 0.0) {
        return None;
    }
    let array = if pattern.len() % 2 == 0 {
        pattern.to_vec()
    } else {
        let mut doubled = pattern.to_vec();
        doubled.extend_from_slice(pattern);
        doubled
    };
    StrokeDash::new(array, 0.0)
}

fn build_path(data: &PathData) -> Option<tiny_skia::Path> {
    let mut pb = PathBuilder::new();
    for cmd in data.commands() {
        match *cmd {
            PathCmd::MoveTo(p) => pb.move_to(p.x, p.y),
            PathCmd::LineTo(p) => pb.line_to(p.x, p.y),
            PathCmd::QuadTo { ctrl, end } => pb.quad_to(ctrl.x, ctrl.y, end.x, end.y),
            PathCmd::CubicTo { c1, c2, end } => {
                pb.cubic_to(c1.x, c1.y, c2.x, c2.y, end.x, end.y)
            }
            PathCmd::Close => pb.close(),
        }
    }
    pb.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Painter;
    use scene::{Circle, Element};

    fn red_circle(cx: f32, cy: f32, r: f32) -> Element {
        Element::shape(Shape::Circle(Circle::new(cx, cy, r)))
            .with_style(Style::filled(Color::rgb(1.0, 0.0, 0.0)))
    }

    #[test]
    fn test_zero_size_surface_fails_fast() {
        let err = RasterPainter::new(0, 100, 1.0).err();
        assert_eq!(
            err,
            Some(crate::PaintError::SurfaceUnavailable {
                width: 0,
                height: 100
            })
        );
    }

    #[test]
    fn test_dpr_scales_pixel_dimensions() {
        let p = RasterPainter::new(100, 50, 2.0).unwrap();
        assert_eq!(p.width(), 100);
        assert_eq!(p.pixel_width(), 200);
        assert_eq!(p.pixel_height(), 100);
    }

    #[test]
    fn test_paint_fills_circle_pixels() {
        let mut scene = Scene::new();
        scene.add_to_root(red_circle(10.0, 10.0, 8.0));
        let mut storage = Storage::new();
        storage.update_from(&mut scene);

        let mut painter = RasterPainter::new(20, 20, 1.0).unwrap();
        painter.paint(&mut scene, &storage);

        let center = painter.pixmap().pixel(10, 10).unwrap();
        assert!(center.red() > 200);
        let corner = painter.pixmap().pixel(0, 0).unwrap();
        assert_eq!(corner.alpha(), 0);
    }

    #[test]
    fn test_paint_clears_dirty_state() {
        let mut scene = Scene::new();
        let id = scene.add_to_root(red_circle(5.0, 5.0, 2.0));
        let mut storage = Storage::new();
        storage.update_from(&mut scene);

        let mut painter = RasterPainter::new(10, 10, 1.0).unwrap();
        assert!(painter.needs_paint());
        painter.paint(&mut scene, &storage);
        assert!(!painter.needs_paint());
        assert!(!scene.get(id).unwrap().is_dirty());

        painter.mark_dirty();
        painter.mark_dirty();
        assert!(painter.needs_paint()); // coalesced, still one repaint
    }

    #[test]
    fn test_disposed_painter_ignores_work() {
        let mut scene = Scene::new();
        let mut storage = Storage::new();
        storage.update_from(&mut scene);

        let mut painter = RasterPainter::new(10, 10, 1.0).unwrap();
        painter.dispose();
        painter.mark_dirty();
        assert!(!painter.needs_paint());
        assert_eq!(
            painter.resize(Some(20), None),
            Err(crate::PaintError::Disposed)
        );
        painter.paint(&mut scene, &storage);
    }

    #[test]
    fn test_resize_keeps_unspecified_axis() {
        let mut painter = RasterPainter::new(100, 50, 1.0).unwrap();
        painter.resize(Some(30), None).unwrap();
        assert_eq!((painter.width(), painter.height()), (30, 50));
    }

    #[test]
    fn test_invisible_after_flatten_is_skipped() {
        let mut scene = Scene::new();
        let id = scene.add_to_root(red_circle(5.0, 5.0, 4.0));
        let mut storage = Storage::new();
        storage.update_from(&mut scene);

        // Visibility toggled after the flatten; the painter must skip it.
        scene.get_mut(id).unwrap().set_invisible(true);
        let mut painter = RasterPainter::new(10, 10, 1.0).unwrap();
        painter.paint(&mut scene, &storage);
        assert_eq!(painter.pixmap().pixel(5, 5).unwrap().alpha(), 0);
    }

    #[test]
    fn test_odd_dash_pattern_doubles() {
        assert!(to_stroke_dash(&[4.0, 2.0]).is_some());
        assert!(to_stroke_dash(&[4.0]).is_some());
        assert!(to_stroke_dash(&[]).is_none());
        assert!(to_stroke_dash(&[-1.0, 2.0]).is_none());
    }
}
