//! The retained vector backend.
//!
//! Instead of pixels, [`VectorPainter`] maintains a flat tree of
//! [`VectorNode`]s: resolved path geometry, style, and world transform per
//! visible element, in paint order. Each sync reuses nodes whose element
//! (and ancestor chain) is clean, rebuilds dirty ones, and prunes nodes
//! whose elements left the scene, keeping churn proportional to what
//! actually changed. Geometry matches the raster backend up to backend
//! artifacts.

use std::collections::HashMap;

use scene::{ElementId, ElementKind, ImageData, Scene, Shape, Storage, TextAlign};
use tracing::trace;
use vellum_core::{Color, Matrix, PathData};

/// Resolved drawable payload of one vector node.
#[derive(Clone, Debug)]
pub enum VectorContent {
    Path {
        path: PathData,
        fill: Option<Color>,
        stroke: Option<Color>,
        stroke_width: f32,
        line_dash: Option<Vec<f32>>,
    },
    Text {
        x: f32,
        y: f32,
        content: String,
        align: TextAlign,
        font_size: f32,
        font_family: String,
        fill: Option<Color>,
    },
    Image {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        data: ImageData,
    },
}

/// One element of the retained tree.
#[derive(Clone, Debug)]
pub struct VectorNode {
    pub id: ElementId,
    pub content: VectorContent,
    /// World transform in logical surface coordinates.
    pub transform: Matrix,
    pub opacity: f32,
}

#[derive(Default)]
pub struct VectorPainter {
    nodes: Vec<VectorNode>,
    width: u32,
    height: u32,
    dirty: bool,
    disposed: bool,
    last_reused: usize,
    last_rebuilt: usize,
    last_pruned: usize,
}

impl VectorPainter {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            dirty: true,
            ..Self::default()
        }
    }

    /// The retained tree, back-most node first.
    pub fn nodes(&self) -> &[VectorNode] {
        &self.nodes
    }

    /// Sync statistics from the last paint: (reused, rebuilt, pruned).
    pub fn last_sync_stats(&self) -> (usize, usize, usize) {
        (self.last_reused, self.last_rebuilt, self.last_pruned)
    }
}

impl crate::Painter for VectorPainter {
    fn resize(&mut self, width: Option<u32>, height: Option<u32>) -> Result<(), crate::PaintError> {
        if self.disposed {
            return Err(crate::PaintError::Disposed);
        }
        self.width = width.unwrap_or(self.width);
        self.height = height.unwrap_or(self.height);
        self.dirty = true;
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
        let mut retained: HashMap<ElementId, VectorNode> =
            self.nodes.drain(..).map(|n| (n.id, n)).collect();
        let (mut reused, mut rebuilt) = (0usize, 0usize);

        for &id in storage.elements_list() {
            let Some(el) = scene.get(id) else {
                continue;
            };
            if el.invisible() {
                continue;
            }
            let node = match retained.remove(&id) {
                Some(existing) if chain_clean(scene, id) => {
                    reused += 1;
                    existing
                }
                _ => {
                    let Some(node) = build_node(scene, id) else {
                        continue;
                    };
                    rebuilt += 1;
                    node
                }
            };
            self.nodes.push(node);
        }

        self.last_reused = reused;
        self.last_rebuilt = rebuilt;
        self.last_pruned = retained.len();
        scene.clear_dirty_flags();
        self.dirty = false;
        trace!(reused, rebuilt, pruned = retained.len(), "vector sync");
    }

    fn dispose(&mut self) {
        self.disposed = true;
        self.dirty = false;
        self.nodes.clear();
    }
}

/// A node's world transform is stale whenever it or any ancestor changed.
fn chain_clean(scene: &Scene, id: ElementId) -> bool {
    let mut cursor = Some(id);
    while let Some(n) = cursor {
        let Some(node) = scene.get(n) else {
            return false;
        };
        if node.is_dirty() {
            return false;
        }
        cursor = node.parent();
    }
    true
}

fn build_node(scene: &Scene, id: ElementId) -> Option<VectorNode> {
    let el = scene.get(id)?;
    let ElementKind::Shape(shape) = el.kind() else {
        return None;
    };
    let style = el.style();
    let content = match shape {
        Shape::Text(text) => VectorContent::Text {
            x: text.x,
            y: text.y,
            content: text.content.clone(),
            align: text.align,
            font_size: style.font_size,
            font_family: style.font_family.clone(),
            fill: style.fill.or(style.stroke),
        },
        Shape::Image(image) => VectorContent::Image {
            x: image.x,
            y: image.y,
            width: image.width,
            height: image.height,
            data: image.data.clone(),
        },
        _ => VectorContent::Path {
            path: shape.to_path()?,
            fill: style.fill,
            stroke: style.stroke,
            stroke_width: style.stroke_width,
            line_dash: style.line_dash.clone(),
        },
    };
    Some(VectorNode {
        id,
        content,
        transform: scene.world_matrix(id),
        opacity: style.opacity.clamp(0.0, 1.0),
    })
}
