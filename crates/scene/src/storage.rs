//! The flattened, z-sorted view of the scene that painters and the
//! hit-tester consume.
//!
//! Storage is derived, never authored: [`Storage::update_from`] re-flattens
//! the tree into leaf elements sorted by (zlevel, z, insertion sequence),
//! stably, so insertion order breaks ties. Painters iterate front-to-back
//! via [`Storage::elements_list`]; the hit-tester walks [`Storage::rev`].

use std::cmp::Ordering;

use crate::element::ElementId;
use crate::scene::Scene;

#[derive(Debug, Default)]
pub struct Storage {
    order: Vec<ElementId>,
}

impl Storage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-derives the flat paint order from the scene. Invisible subtrees
    /// are excluded entirely; groups themselves never appear (they have no
    /// geometry of their own).
    pub fn update_from(&mut self, scene: &mut Scene) {
        self.order.clear();
        let mut keyed: Vec<(i32, f32, u64, ElementId)> = Vec::new();
        collect(scene, scene.root(), &mut keyed);
        keyed.sort_by(|a, b| {
            a.0.cmp(&b.0)
                .then(a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal))
                .then(a.2.cmp(&b.2))
        });
        self.order.extend(keyed.into_iter().map(|(_, _, _, id)| id));
        scene.clear_structure_dirty();
    }

    /// Paint order, back-most first.
    pub fn elements_list(&self) -> &[ElementId] {
        &self.order
    }

    /// Front-most first, for hit-testing.
    pub fn rev(&self) -> impl Iterator<Item = ElementId> + '_ {
        self.order.iter().rev().copied()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

fn collect(scene: &Scene, id: ElementId, out: &mut Vec<(i32, f32, u64, ElementId)>) {
    let Some(node) = scene.get(id) else {
        return;
    };
    if node.invisible() {
        return;
    }
    if node.is_group() {
        for child in scene.children(id) {
            collect(scene, *child, out);
        }
    } else {
        out.push((node.zlevel(), node.z(), node.seq, id));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::Element;
    use crate::shape::{Circle, Shape};

    fn circle() -> Element {
        Element::shape(Shape::Circle(Circle::new(0.0, 0.0, 5.0)))
    }

    #[test]
    fn test_sorts_by_zlevel_then_z_then_insertion() {
        let mut scene = Scene::new();
        let low = scene.add_to_root(circle().with_z(1.0));
        let high_level = scene.add_to_root(circle().with_zlevel(1).with_z(-10.0));
        let tied_a = scene.add_to_root(circle());
        let tied_b = scene.add_to_root(circle());

        let mut storage = Storage::new();
        storage.update_from(&mut scene);

        // zlevel dominates z; equal keys keep insertion order.
        assert_eq!(storage.elements_list(), &[tied_a, tied_b, low, high_level]);
    }

    #[test]
    fn test_invisible_subtree_excluded() {
        let mut scene = Scene::new();
        let hidden = scene.add_to_root(Element::group().with_invisible(true));
        scene.add(hidden, circle());
        let visible = scene.add_to_root(circle());

        let mut storage = Storage::new();
        storage.update_from(&mut scene);
        assert_eq!(storage.elements_list(), &[visible]);
    }

    #[test]
    fn test_groups_never_appear() {
        let mut scene = Scene::new();
        let group = scene.add_to_root(Element::group());
        let leaf = scene.add(group, circle());

        let mut storage = Storage::new();
        storage.update_from(&mut scene);
        assert_eq!(storage.elements_list(), &[leaf]);
    }

    #[test]
    fn test_update_clears_structure_flag() {
        let mut scene = Scene::new();
        scene.add_to_root(circle());
        assert!(scene.structure_dirty());

        let mut storage = Storage::new();
        storage.update_from(&mut scene);
        assert!(!scene.structure_dirty());
    }

    #[test]
    fn test_rev_is_front_to_back() {
        let mut scene = Scene::new();
        let back = scene.add_to_root(circle().with_z(0.0));
        let front = scene.add_to_root(circle().with_z(1.0));

        let mut storage = Storage::new();
        storage.update_from(&mut scene);
        let rev: Vec<_> = storage.rev().collect();
        assert_eq!(rev, vec![front, back]);
    }
}
