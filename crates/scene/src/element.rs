//! Scene nodes.
//!
//! An [`Element`] is either a shape leaf or a group. Nodes carry style,
//! a decomposed transform, z ordering, visibility/interaction flags, and a
//! per-instance event emitter. Mutation goes through [`Element::attr`] or
//! the typed setters, all of which mark the node dirty so painters know to
//! refresh it.

use crate::events::{Event, EventEmitter, HandlerId};
use crate::shape::Shape;
use crate::style::{Style, StylePatch};
use crate::transform::{Transform, TransformPatch};
use vellum_core::{Point, Rect};

slotmap::new_key_type! {
    /// Generational key identifying a node in the scene arena.
    pub struct ElementId;
}

/// What a node draws: leaf geometry or a grouping container.
#[derive(Clone, Debug)]
pub enum ElementKind {
    Shape(Shape),
    Group,
}

/// One node of the scene graph.
pub struct Element {
    pub(crate) kind: ElementKind,
    pub(crate) style: Style,
    pub(crate) transform: Transform,
    /// Draw order within a zlevel.
    pub(crate) z: f32,
    /// Coarse layer; sorts above `z`.
    pub(crate) zlevel: i32,
    /// Skipped by painting and hit-testing.
    pub(crate) invisible: bool,
    /// Painted but transparent to hit-testing.
    pub(crate) silent: bool,
    pub(crate) draggable: bool,
    pub(crate) dirty: bool,
    /// Insertion order, assigned by the scene; ties in (zlevel, z) keep it.
    pub(crate) seq: u64,
    /// Back-reference only; the children list owns the relationship.
    pub(crate) parent: Option<ElementId>,
    pub(crate) emitter: EventEmitter,
}

/// Partial node update applied by [`Element::attr`].
#[derive(Clone, Debug, Default)]
pub struct ElementPatch {
    pub style: StylePatch,
    pub transform: TransformPatch,
    pub shape: Option<Shape>,
    pub z: Option<f32>,
    pub zlevel: Option<i32>,
    pub invisible: Option<bool>,
    pub silent: Option<bool>,
    pub draggable: Option<bool>,
}

impl Element {
    pub fn shape(shape: Shape) -> Self {
        Self::with_kind(ElementKind::Shape(shape))
    }

    pub fn group() -> Self {
        Self::with_kind(ElementKind::Group)
    }

    fn with_kind(kind: ElementKind) -> Self {
        Self {
            kind,
            style: Style::default(),
            transform: Transform::default(),
            z: 0.0,
            zlevel: 0,
            invisible: false,
            silent: false,
            draggable: false,
            dirty: true,
            seq: 0,
            parent: None,
            emitter: EventEmitter::new(),
        }
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    pub fn with_z(mut self, z: f32) -> Self {
        self.z = z;
        self
    }

    pub fn with_zlevel(mut self, zlevel: i32) -> Self {
        self.zlevel = zlevel;
        self
    }

    pub fn with_invisible(mut self, invisible: bool) -> Self {
        self.invisible = invisible;
        self
    }

    pub fn with_silent(mut self, silent: bool) -> Self {
        self.silent = silent;
        self
    }

    pub fn with_draggable(mut self, draggable: bool) -> Self {
        self.draggable = draggable;
        self
    }

    pub fn kind(&self) -> &ElementKind {
        &self.kind
    }

    pub fn is_group(&self) -> bool {
        matches!(self.kind, ElementKind::Group)
    }

    pub fn style(&self) -> &Style {
        &self.style
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn z(&self) -> f32 {
        self.z
    }

    pub fn zlevel(&self) -> i32 {
        self.zlevel
    }

    pub fn invisible(&self) -> bool {
        self.invisible
    }

    pub fn silent(&self) -> bool {
        self.silent
    }

    pub fn draggable(&self) -> bool {
        self.draggable
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn parent(&self) -> Option<ElementId> {
        self.parent
    }

    /// Merges a partial update and marks the node dirty.
    pub fn attr(&mut self, patch: ElementPatch) {
        patch.style.apply_to(&mut self.style);
        patch.transform.apply_to(&mut self.transform);
        if let Some(shape) = patch.shape {
            if !self.is_group() {
                self.kind = ElementKind::Shape(shape);
            }
        }
        if let Some(z) = patch.z {
            self.z = z;
        }
        if let Some(zlevel) = patch.zlevel {
            self.zlevel = zlevel;
        }
        if let Some(invisible) = patch.invisible {
            self.invisible = invisible;
        }
        if let Some(silent) = patch.silent {
            self.silent = silent;
        }
        if let Some(draggable) = patch.draggable {
            self.draggable = draggable;
        }
        self.dirty = true;
    }

    /// Replaces the whole style record (the patch in `attr` only merges).
    pub fn set_style(&mut self, style: Style) {
        self.style = style;
        self.dirty = true;
    }

    pub fn set_transform(&mut self, transform: Transform) {
        self.transform = transform;
        self.dirty = true;
    }

    pub fn set_translation(&mut self, translation: glam::Vec2) {
        self.transform.translation = translation;
        self.dirty = true;
    }

    pub fn set_invisible(&mut self, invisible: bool) {
        self.invisible = invisible;
        self.dirty = true;
    }

    /// Requests a repaint of this node without changing any attribute.
    pub fn mark_redraw(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn clear_dirty(&mut self) {
        self.dirty = false;
    }

    /// Local bounds: shape extent grown by the stroke; groups have none of
    /// their own (the scene aggregates children).
    pub fn local_bounds(&self) -> Option<Rect> {
        match &self.kind {
            ElementKind::Shape(shape) => Some(shape.bounding_rect(&self.style)),
            ElementKind::Group => None,
        }
    }

    /// Local-space containment; groups never contain directly.
    pub fn contains_local(&self, p: Point) -> bool {
        match &self.kind {
            ElementKind::Shape(shape) => shape.contains(p, &self.style),
            ElementKind::Group => false,
        }
    }

    pub fn on(&mut self, name: &str, callback: impl FnMut(&Event) + 'static) -> HandlerId {
        self.emitter.on(name, callback)
    }

    pub fn off(&mut self, name: &str, id: HandlerId) -> bool {
        self.emitter.off(name, id)
    }

    pub fn trigger(&mut self, event: &Event) {
        self.emitter.trigger(event);
    }

    pub fn has_listeners(&self, name: &str) -> bool {
        self.emitter.has_listeners(name)
    }

    /// Reads a numeric property through a dotted path (`style.opacity`,
    /// `transform.x`, `shape.r`, ...). Unknown or non-numeric paths read as
    /// `None`; animation treats that as 0.
    pub fn get_prop(&self, path: &str) -> Option<f32> {
        match path {
            "style.opacity" => Some(self.style.opacity),
            "style.stroke_width" => Some(self.style.stroke_width),
            "style.font_size" => Some(self.style.font_size),
            "transform.x" => Some(self.transform.translation.x),
            "transform.y" => Some(self.transform.translation.y),
            "transform.scale_x" => Some(self.transform.scale.x),
            "transform.scale_y" => Some(self.transform.scale.y),
            "transform.rotation" => Some(self.transform.rotation),
            "transform.origin_x" => Some(self.transform.origin.x),
            "transform.origin_y" => Some(self.transform.origin.y),
            "z" => Some(self.z),
            _ => self.get_shape_prop(path),
        }
    }

    /// Writes a numeric property through a dotted path, marking the node
    /// dirty. Unknown paths are a silent no-op; returns whether a write
    /// happened.
    pub fn set_prop(&mut self, path: &str, value: f32) -> bool {
        let wrote = match path {
            "style.opacity" => {
                self.style.opacity = value.clamp(0.0, 1.0);
                true
            }
            "style.stroke_width" => {
                self.style.stroke_width = value;
                true
            }
            "style.font_size" => {
                self.style.font_size = value;
                true
            }
            "transform.x" => {
                self.transform.translation.x = value;
                true
            }
            "transform.y" => {
                self.transform.translation.y = value;
                true
            }
            "transform.scale_x" => {
                self.transform.scale.x = value;
                true
            }
            "transform.scale_y" => {
                self.transform.scale.y = value;
                true
            }
            "transform.rotation" => {
                self.transform.rotation = value;
                true
            }
            "transform.origin_x" => {
                self.transform.origin.x = value;
                true
            }
            "transform.origin_y" => {
                self.transform.origin.y = value;
                true
            }
            "z" => {
                self.z = value;
                true
            }
            _ => self.set_shape_prop(path, value),
        };
        if wrote {
            self.dirty = true;
        }
        wrote
    }

    fn get_shape_prop(&self, path: &str) -> Option<f32> {
        let ElementKind::Shape(shape) = &self.kind else {
            return None;
        };
        let field = path.strip_prefix("shape.")?;
        match shape {
            Shape::Circle(s) => match field {
                "cx" => Some(s.cx),
                "cy" => Some(s.cy),
                "r" => Some(s.r),
                _ => None,
            },
            Shape::Rect(s) => match field {
                "x" => Some(s.x),
                "y" => Some(s.y),
                "width" => Some(s.width),
                "height" => Some(s.height),
                "radius" => Some(s.radius),
                _ => None,
            },
            Shape::Sector(s) => match field {
                "cx" => Some(s.cx),
                "cy" => Some(s.cy),
                "r0" => Some(s.r0),
                "r" => Some(s.r),
                "start_angle" => Some(s.start_angle),
                "end_angle" => Some(s.end_angle),
                _ => None,
            },
            Shape::Arc(s) => match field {
                "cx" => Some(s.cx),
                "cy" => Some(s.cy),
                "r" => Some(s.r),
                "start_angle" => Some(s.start_angle),
                "end_angle" => Some(s.end_angle),
                _ => None,
            },
            Shape::Text(s) => match field {
                "x" => Some(s.x),
                "y" => Some(s.y),
                _ => None,
            },
            Shape::Image(s) => match field {
                "x" => Some(s.x),
                "y" => Some(s.y),
                "width" => Some(s.width),
                "height" => Some(s.height),
                _ => None,
            },
            _ => None,
        }
    }

    fn set_shape_prop(&mut self, path: &str, value: f32) -> bool {
        let ElementKind::Shape(shape) = &mut self.kind else {
            return false;
        };
        let Some(field) = path.strip_prefix("shape.") else {
            return false;
        };
        match shape {
            Shape::Circle(s) => match field {
                "cx" => s.cx = value,
                "cy" => s.cy = value,
                "r" => s.r = value,
                _ => return false,
            },
            Shape::Rect(s) => match field {
                "x" => s.x = value,
                "y" => s.y = value,
                "width" => s.width = value,
                "height" => s.height = value,
                "radius" => s.radius = value,
                _ => return false,
            },
            Shape::Sector(s) => match field {
                "cx" => s.cx = value,
                "cy" => s.cy = value,
                "r0" => s.r0 = value,
                "r" => s.r = value,
                "start_angle" => s.start_angle = value,
                "end_angle" => s.end_angle = value,
                _ => return false,
            },
            Shape::Arc(s) => match field {
                "cx" => s.cx = value,
                "cy" => s.cy = value,
                "r" => s.r = value,
                "start_angle" => s.start_angle = value,
                "end_angle" => s.end_angle = value,
                _ => return false,
            },
            Shape::Text(s) => match field {
                "x" => s.x = value,
                "y" => s.y = value,
                _ => return false,
            },
            Shape::Image(s) => match field {
                "x" => s.x = value,
                "y" => s.y = value,
                "width" => s.width = value,
                "height" => s.height = value,
                _ => return false,
            },
            _ => return false,
        }
        true
    }
}

impl std::fmt::Debug for Element {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Element")
            .field("kind", &self.kind)
            .field("z", &self.z)
            .field("zlevel", &self.zlevel)
            .field("invisible", &self.invisible)
            .field("silent", &self.silent)
            .field("dirty", &self.dirty)
            .field("parent", &self.parent)
            .finish()
    }
}
