//! The scene arena.
//!
//! Elements live in a `SlotMap` keyed by [`ElementId`]; an implicit root
//! group anchors the tree. Children lists own the parent/child relationship,
//! parent fields are back-references only. Structural edits set a flag the
//! renderer uses to re-derive [`crate::Storage`] before the next paint.

use slotmap::{SecondaryMap, SlotMap};
use smallvec::SmallVec;
use tracing::debug;
use vellum_core::{Matrix, Point, Rect};

use crate::element::{Element, ElementId, ElementKind};
use crate::storage::Storage;

type Children = SmallVec<[ElementId; 4]>;

/// Early-stop sentinel for [`Scene::traverse`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Traversal {
    Continue,
    /// Visit no more nodes anywhere in the walk.
    Stop,
}

pub struct Scene {
    nodes: SlotMap<ElementId, Element>,
    children: SecondaryMap<ElementId, Children>,
    root: ElementId,
    next_seq: u64,
    structure_dirty: bool,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    pub fn new() -> Self {
        let mut nodes = SlotMap::with_key();
        let mut children = SecondaryMap::new();
        let root = nodes.insert(Element::group());
        children.insert(root, Children::new());
        Self {
            nodes,
            children,
            root,
            next_seq: 1,
            structure_dirty: true,
        }
    }

    pub fn root(&self) -> ElementId {
        self.root
    }

    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.nodes.get(id)
    }

    pub fn get_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.nodes.get_mut(id)
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Node count excluding the root group.
    pub fn len(&self) -> usize {
        self.nodes.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn children(&self, id: ElementId) -> &[ElementId] {
        self.children.get(id).map(|c| c.as_slice()).unwrap_or(&[])
    }

    /// Inserts a new element under `parent` (the root when `parent` is
    /// stale). Returns the new node's key.
    pub fn add(&mut self, parent: ElementId, mut element: Element) -> ElementId {
        let parent = if self.nodes.contains_key(parent) {
            parent
        } else {
            self.root
        };
        element.seq = self.next_seq;
        self.next_seq += 1;
        element.parent = Some(parent);
        let id = self.nodes.insert(element);
        self.children.insert(id, Children::new());
        self.children[parent].push(id);
        self.structure_dirty = true;
        id
    }

    pub fn add_to_root(&mut self, element: Element) -> ElementId {
        self.add(self.root, element)
    }

    /// Moves an existing node under a new parent. Re-attaching to the
    /// current parent is a no-op; attaching a node under its own descendant
    /// is rejected.
    pub fn attach(&mut self, parent: ElementId, child: ElementId) -> bool {
        if !self.nodes.contains_key(parent) || !self.nodes.contains_key(child) {
            return false;
        }
        if child == self.root || child == parent {
            return false;
        }
        if self.nodes[child].parent == Some(parent) {
            return true;
        }
        if self.is_ancestor(child, parent) {
            debug!(?child, ?parent, "rejected attach: would create a cycle");
            return false;
        }
        if let Some(old) = self.nodes[child].parent {
            if let Some(siblings) = self.children.get_mut(old) {
                siblings.retain(|c| *c != child);
            }
        }
        self.children[parent].push(child);
        self.nodes[child].parent = Some(parent);
        self.structure_dirty = true;
        true
    }

    /// Removes a node and its whole subtree. Removing the root or a stale
    /// key is a no-op.
    pub fn remove(&mut self, id: ElementId) {
        if id == self.root || !self.nodes.contains_key(id) {
            return;
        }
        if let Some(parent) = self.nodes[id].parent {
            if let Some(siblings) = self.children.get_mut(parent) {
                siblings.retain(|c| *c != id);
            }
        }
        let mut stack = vec![id];
        while let Some(n) = stack.pop() {
            if let Some(kids) = self.children.remove(n) {
                stack.extend(kids);
            }
            self.nodes.remove(n);
        }
        self.structure_dirty = true;
    }

    /// Clears everything but the root group.
    pub fn remove_all(&mut self) {
        let top: Vec<ElementId> = self.children[self.root].iter().copied().collect();
        for id in top {
            self.remove(id);
        }
    }

    fn is_ancestor(&self, candidate: ElementId, of: ElementId) -> bool {
        let mut cursor = self.nodes[of].parent;
        while let Some(p) = cursor {
            if p == candidate {
                return true;
            }
            cursor = self.nodes.get(p).and_then(|n| n.parent);
        }
        false
    }

    /// Walks parent back-references to the child of the root.
    pub fn top_ancestor(&self, id: ElementId) -> Option<ElementId> {
        if !self.nodes.contains_key(id) || id == self.root {
            return None;
        }
        let mut cursor = id;
        while let Some(parent) = self.nodes[cursor].parent {
            if parent == self.root {
                return Some(cursor);
            }
            cursor = parent;
        }
        Some(cursor)
    }

    /// Pre-order walk from `from` (inclusive). The visitor's sentinel stops
    /// the whole walk early.
    pub fn traverse(
        &self,
        from: ElementId,
        visit: &mut impl FnMut(ElementId, &Element) -> Traversal,
    ) -> Traversal {
        let Some(node) = self.nodes.get(from) else {
            return Traversal::Continue;
        };
        if visit(from, node) == Traversal::Stop {
            return Traversal::Stop;
        }
        if let Some(kids) = self.children.get(from) {
            for child in kids.clone() {
                if self.traverse(child, visit) == Traversal::Stop {
                    return Traversal::Stop;
                }
            }
        }
        Traversal::Continue
    }

    /// Composition of node matrices from the root down to `id`.
    pub fn world_matrix(&self, id: ElementId) -> Matrix {
        let mut chain = SmallVec::<[ElementId; 8]>::new();
        let mut cursor = Some(id);
        while let Some(n) = cursor {
            chain.push(n);
            cursor = self.nodes.get(n).and_then(|e| e.parent);
        }
        let mut m = Matrix::IDENTITY;
        for n in chain.iter().rev() {
            if let Some(node) = self.nodes.get(*n) {
                if !node.transform.is_identity() {
                    m = m.compose(node.transform.matrix());
                }
            }
        }
        m
    }

    /// Subtree bounds in the parent space of `id`; the zero rect for an
    /// empty group.
    pub fn bounding_rect(&self, id: ElementId) -> Rect {
        match self.local_union(id) {
            Some(rect) => {
                let node = &self.nodes[id];
                if node.transform.is_identity() {
                    rect
                } else {
                    rect.transformed(&node.transform.matrix())
                }
            }
            None => Rect::zero(),
        }
    }

    fn local_union(&self, id: ElementId) -> Option<Rect> {
        let node = self.nodes.get(id)?;
        match &node.kind {
            ElementKind::Shape(shape) => Some(shape.bounding_rect(&node.style)),
            ElementKind::Group => {
                let mut acc: Option<Rect> = None;
                for child in self.children(id) {
                    let Some(inner) = self.local_union(*child) else {
                        continue;
                    };
                    let child_node = &self.nodes[*child];
                    let rect = if child_node.transform.is_identity() {
                        inner
                    } else {
                        inner.transformed(&child_node.transform.matrix())
                    };
                    acc = Some(match acc {
                        Some(a) => a.union(&rect),
                        None => rect,
                    });
                }
                acc
            }
        }
    }

    /// Whether the node or any ancestor is flagged silent.
    pub fn effectively_silent(&self, id: ElementId) -> bool {
        let mut cursor = Some(id);
        while let Some(n) = cursor {
            let Some(node) = self.nodes.get(n) else {
                return false;
            };
            if node.silent {
                return true;
            }
            cursor = node.parent;
        }
        false
    }

    /// Top-most element under a world-space point, back-to-front over the
    /// storage order. Invisible subtrees are absent from storage; silent
    /// elements are skipped here. The first geometric hit wins regardless of
    /// fill transparency.
    pub fn hit_test(&self, storage: &Storage, p: Point) -> Option<ElementId> {
        for id in storage.rev() {
            let Some(node) = self.nodes.get(id) else {
                continue;
            };
            if node.invisible || self.effectively_silent(id) {
                continue;
            }
            let Some(inverse) = self.world_matrix(id).invert() else {
                continue;
            };
            let local = inverse.apply(p.to_vec2());
            if node.contains_local(Point::new(local.x, local.y)) {
                return Some(id);
            }
        }
        None
    }

    /// Dotted-path property read for the animation layer; stale keys and
    /// unknown paths read as `None`.
    pub fn get_prop(&self, id: ElementId, path: &str) -> Option<f32> {
        self.nodes.get(id).and_then(|n| n.get_prop(path))
    }

    /// Dotted-path property write; stale keys and unknown paths are a
    /// silent no-op.
    pub fn set_prop(&mut self, id: ElementId, path: &str, value: f32) -> bool {
        match self.nodes.get_mut(id) {
            Some(node) => node.set_prop(path, value),
            None => false,
        }
    }

    /// Whether the tree shape changed since storage was last derived.
    pub fn structure_dirty(&self) -> bool {
        self.structure_dirty
    }

    pub(crate) fn clear_structure_dirty(&mut self) {
        self.structure_dirty = false;
    }

    /// Whether any node needs repainting, structural edits included.
    pub fn any_dirty(&self) -> bool {
        self.structure_dirty || self.nodes.values().any(|n| n.dirty)
    }

    /// Clears per-node dirty flags after a paint.
    pub fn clear_dirty_flags(&mut self) {
        for node in self.nodes.values_mut() {
            node.clear_dirty();
        }
    }
}

impl std::fmt::Debug for Scene {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scene")
            .field("len", &self.len())
            .field("structure_dirty", &self.structure_dirty)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::{Circle, Shape};

    fn circle(cx: f32, cy: f32, r: f32) -> Element {
        Element::shape(Shape::Circle(Circle::new(cx, cy, r)))
    }

    #[test]
    fn test_add_and_remove_subtree() {
        let mut scene = Scene::new();
        let group = scene.add_to_root(Element::group());
        let a = scene.add(group, circle(0.0, 0.0, 5.0));
        let b = scene.add(group, circle(10.0, 0.0, 5.0));
        assert_eq!(scene.len(), 3);
        assert_eq!(scene.children(group), &[a, b]);

        scene.remove(group);
        assert_eq!(scene.len(), 0);
        assert!(!scene.contains(a));
        assert!(!scene.contains(b));
    }

    #[test]
    fn test_attach_is_idempotent_and_rejects_cycles() {
        let mut scene = Scene::new();
        let outer = scene.add_to_root(Element::group());
        let inner = scene.add(outer, Element::group());

        assert!(scene.attach(outer, inner)); // same parent, no-op
        assert_eq!(scene.children(outer), &[inner]);

        // Attaching an ancestor under its descendant must fail.
        assert!(!scene.attach(inner, outer));
        assert_eq!(scene.get(outer).unwrap().parent(), Some(scene.root()));
    }

    #[test]
    fn test_attach_detaches_from_prior_parent() {
        let mut scene = Scene::new();
        let g1 = scene.add_to_root(Element::group());
        let g2 = scene.add_to_root(Element::group());
        let leaf = scene.add(g1, circle(0.0, 0.0, 1.0));

        assert!(scene.attach(g2, leaf));
        assert!(scene.children(g1).is_empty());
        assert_eq!(scene.children(g2), &[leaf]);
        assert_eq!(scene.get(leaf).unwrap().parent(), Some(g2));
    }

    #[test]
    fn test_traverse_preorder_with_early_stop() {
        let mut scene = Scene::new();
        let group = scene.add_to_root(Element::group());
        let a = scene.add(group, circle(0.0, 0.0, 1.0));
        let _b = scene.add(group, circle(1.0, 0.0, 1.0));

        let mut seen = Vec::new();
        scene.traverse(scene.root(), &mut |id, _| {
            seen.push(id);
            if id == a {
                Traversal::Stop
            } else {
                Traversal::Continue
            }
        });
        assert_eq!(seen, vec![scene.root(), group, a]);
    }

    #[test]
    fn test_group_bounds_union_children() {
        let mut scene = Scene::new();
        let group = scene.add_to_root(Element::group());
        scene.add(group, circle(0.0, 0.0, 5.0).with_style(crate::Style::filled(vellum_core::Color::BLACK)));
        scene.add(group, circle(20.0, 0.0, 5.0).with_style(crate::Style::filled(vellum_core::Color::BLACK)));

        let b = scene.bounding_rect(group);
        assert_eq!(b.min.x, -5.0);
        assert_eq!(b.max.x, 25.0);
    }

    #[test]
    fn test_empty_group_bounds_are_zero() {
        let mut scene = Scene::new();
        let group = scene.add_to_root(Element::group());
        assert_eq!(scene.bounding_rect(group), Rect::zero());
    }

    #[test]
    fn test_world_matrix_composes_down_the_chain() {
        let mut scene = Scene::new();
        let mut g = Element::group();
        g.set_translation(glam::Vec2::new(10.0, 0.0));
        let group = scene.add_to_root(g);
        let mut c = circle(0.0, 0.0, 1.0);
        c.set_translation(glam::Vec2::new(0.0, 5.0));
        let leaf = scene.add(group, c);

        let world = scene.world_matrix(leaf).apply(glam::Vec2::ZERO);
        assert_eq!(world, glam::Vec2::new(10.0, 5.0));
    }

    #[test]
    fn test_top_ancestor_walks_to_root_child() {
        let mut scene = Scene::new();
        let outer = scene.add_to_root(Element::group());
        let inner = scene.add(outer, Element::group());
        let leaf = scene.add(inner, circle(0.0, 0.0, 1.0));
        assert_eq!(scene.top_ancestor(leaf), Some(outer));
        assert_eq!(scene.top_ancestor(outer), Some(outer));
        assert_eq!(scene.top_ancestor(scene.root()), None);
    }

    #[test]
    fn test_silent_group_shields_children() {
        let mut scene = Scene::new();
        let group = scene.add_to_root(Element::group().with_silent(true));
        let leaf = scene.add(group, circle(0.0, 0.0, 5.0));
        assert!(scene.effectively_silent(leaf));
    }
}
