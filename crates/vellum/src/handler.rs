//! Pointer event dispatch.
//!
//! A small state machine (idle / hovering / dragging) translates raw input
//! into the semantic events elements listen for: `mouseover`/`mouseout`
//! pairs on hover transitions, the `dragstart`/`drag`/`dragend` lifecycle
//! on draggable elements, and stateless `click`/`dblclick`/`contextmenu`/
//! `wheel` hits. Touch input maps onto the same down/move/up path.
//!
//! Coordinates arriving from the embedder are raw surface input; the
//! handler translates them by the surface box offset before hit-testing.
//! Every dispatched event also reaches surface-level listeners.

use glam::Vec2;
use scene::{ElementId, Event, EventEmitter, HandlerId, Scene, Storage};
use tracing::trace;
use vellum_core::Point;

/// Where the pointer interaction currently stands.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum PointerState {
    Idle,
    Hovering(ElementId),
    Dragging {
        target: ElementId,
        start_translation: Vec2,
        start_pointer: Vec2,
        last_pointer: Vec2,
    },
}

pub struct Handler {
    state: PointerState,
    /// Offset of the surface box in raw input coordinates.
    surface_offset: Vec2,
    emitter: EventEmitter,
}

impl Default for Handler {
    fn default() -> Self {
        Self::new()
    }
}

impl Handler {
    pub fn new() -> Self {
        Self {
            state: PointerState::Idle,
            surface_offset: Vec2::ZERO,
            emitter: EventEmitter::new(),
        }
    }

    pub fn state(&self) -> PointerState {
        self.state
    }

    /// Raw input minus this offset gives local surface coordinates.
    pub fn set_surface_offset(&mut self, offset: Vec2) {
        self.surface_offset = offset;
    }

    /// Surface-level listener (fires for every dispatched event of `name`,
    /// hit or miss).
    pub fn on(&mut self, name: &str, callback: impl FnMut(&Event) + 'static) -> HandlerId {
        self.emitter.on(name, callback)
    }

    pub fn off(&mut self, name: &str, id: HandlerId) -> bool {
        self.emitter.off(name, id)
    }

    fn local(&self, x: f32, y: f32) -> Vec2 {
        Vec2::new(x, y) - self.surface_offset
    }

    /// Hit-test without dispatching anything.
    pub fn find_hover(&self, scene: &Scene, storage: &Storage, x: f32, y: f32) -> Option<ElementId> {
        let p = self.local(x, y);
        scene.hit_test(storage, Point::new(p.x, p.y))
    }

    fn dispatch(&mut self, scene: &mut Scene, target: Option<ElementId>, mut event: Event) {
        event.target = target;
        event.top = target.and_then(|id| scene.top_ancestor(id));
        if let Some(id) = target {
            if let Some(el) = scene.get_mut(id) {
                el.trigger(&event);
            }
        }
        self.emitter.trigger(&event);
    }

    /// Pointer motion. Returns whether the scene needs repainting (true
    /// while a drag moves an element).
    pub fn pointer_move(
        &mut self,
        scene: &mut Scene,
        storage: &Storage,
        x: f32,
        y: f32,
    ) -> bool {
        let p = self.local(x, y);
        if let PointerState::Dragging {
            target,
            start_translation,
            start_pointer,
            last_pointer,
        } = self.state
        {
            if let Some(el) = scene.get_mut(target) {
                el.set_translation(start_translation + (p - start_pointer));
            }
            let step = p - last_pointer;
            self.state = PointerState::Dragging {
                target,
                start_translation,
                start_pointer,
                last_pointer: p,
            };
            let mut event = Event::new("drag", p.x, p.y);
            event.dx = step.x;
            event.dy = step.y;
            self.dispatch(scene, Some(target), event);
            return true;
        }

        let hit = scene.hit_test(storage, Point::new(p.x, p.y));
        let old = match self.state {
            PointerState::Hovering(id) => Some(id),
            _ => None,
        };
        if hit != old {
            if let Some(left) = old {
                self.dispatch(scene, Some(left), Event::new("mouseout", p.x, p.y));
            }
            if let Some(entered) = hit {
                self.dispatch(scene, Some(entered), Event::new("mouseover", p.x, p.y));
            } else {
                trace!(x = p.x, y = p.y, "hover miss");
            }
            self.state = match hit {
                Some(id) => PointerState::Hovering(id),
                None => PointerState::Idle,
            };
        }
        if hit.is_some() {
            self.dispatch(scene, hit, Event::new("mousemove", p.x, p.y));
        }
        false
    }

    /// Button press. Entering a drag snapshots the draggable ancestor's
    /// translation and the pointer position.
    pub fn pointer_down(&mut self, scene: &mut Scene, storage: &Storage, x: f32, y: f32) {
        let p = self.local(x, y);
        let hit = scene.hit_test(storage, Point::new(p.x, p.y));
        self.dispatch(scene, hit, Event::new("mousedown", p.x, p.y));

        let Some(hit) = hit else {
            return;
        };
        let Some(drag_target) = draggable_ancestor(scene, hit) else {
            return;
        };
        let Some(el) = scene.get(drag_target) else {
            return;
        };
        self.state = PointerState::Dragging {
            target: drag_target,
            start_translation: el.transform().translation,
            start_pointer: p,
            last_pointer: p,
        };
        self.dispatch(scene, Some(drag_target), Event::new("dragstart", p.x, p.y));
    }

    /// Button release; a live drag ends and hover state is rebuilt from
    /// whatever sits under the pointer.
    pub fn pointer_up(&mut self, scene: &mut Scene, storage: &Storage, x: f32, y: f32) {
        let p = self.local(x, y);
        let hit = scene.hit_test(storage, Point::new(p.x, p.y));
        self.dispatch(scene, hit, Event::new("mouseup", p.x, p.y));

        if let PointerState::Dragging { target, .. } = self.state {
            self.dispatch(scene, Some(target), Event::new("dragend", p.x, p.y));
            self.state = match hit {
                Some(id) => {
                    self.dispatch(scene, Some(id), Event::new("mouseover", p.x, p.y));
                    PointerState::Hovering(id)
                }
                None => PointerState::Idle,
            };
        }
    }

    /// Pointer left the surface.
    pub fn pointer_leave(&mut self, scene: &mut Scene, x: f32, y: f32) {
        let p = self.local(x, y);
        if let PointerState::Hovering(id) = self.state {
            self.dispatch(scene, Some(id), Event::new("mouseout", p.x, p.y));
            self.state = PointerState::Idle;
        }
    }

    /// Stateless hit events: each occurrence hit-tests independently.
    pub fn click(&mut self, scene: &mut Scene, storage: &Storage, x: f32, y: f32) {
        self.stateless(scene, storage, "click", x, y);
    }

    pub fn double_click(&mut self, scene: &mut Scene, storage: &Storage, x: f32, y: f32) {
        self.stateless(scene, storage, "dblclick", x, y);
    }

    pub fn context_menu(&mut self, scene: &mut Scene, storage: &Storage, x: f32, y: f32) {
        self.stateless(scene, storage, "contextmenu", x, y);
    }

    pub fn wheel(&mut self, scene: &mut Scene, storage: &Storage, x: f32, y: f32, delta: f32) {
        let p = self.local(x, y);
        let hit = scene.hit_test(storage, Point::new(p.x, p.y));
        let mut event = Event::new("wheel", p.x, p.y);
        event.wheel_delta = delta;
        self.dispatch(scene, hit, event);
    }

    fn stateless(&mut self, scene: &mut Scene, storage: &Storage, name: &str, x: f32, y: f32) {
        let p = self.local(x, y);
        let hit = scene.hit_test(storage, Point::new(p.x, p.y));
        self.dispatch(scene, hit, Event::new(name, p.x, p.y));
    }

    /// Touch input shares the mouse path.
    pub fn touch_start(&mut self, scene: &mut Scene, storage: &Storage, x: f32, y: f32) {
        self.pointer_down(scene, storage, x, y);
    }

    pub fn touch_move(&mut self, scene: &mut Scene, storage: &Storage, x: f32, y: f32) -> bool {
        self.pointer_move(scene, storage, x, y)
    }

    pub fn touch_end(&mut self, scene: &mut Scene, storage: &Storage, x: f32, y: f32) {
        self.pointer_up(scene, storage, x, y);
    }
}

/// The nearest ancestor (the element itself included) flagged draggable.
fn draggable_ancestor(scene: &Scene, id: ElementId) -> Option<ElementId> {
    let mut cursor = Some(id);
    while let Some(n) = cursor {
        let el = scene.get(n)?;
        if el.draggable() {
            return Some(n);
        }
        cursor = el.parent();
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use scene::{Circle, Element, Shape, Style};
    use std::cell::RefCell;
    use std::rc::Rc;
    use vellum_core::Color;

    fn circle_at(cx: f32, cy: f32, r: f32) -> Element {
        Element::shape(Shape::Circle(Circle::new(cx, cy, r)))
            .with_style(Style::filled(Color::BLACK))
    }

    fn setup(elements: Vec<Element>) -> (Scene, Storage, Vec<ElementId>) {
        let mut scene = Scene::new();
        let ids = elements
            .into_iter()
            .map(|e| scene.add_to_root(e))
            .collect();
        let mut storage = Storage::new();
        storage.update_from(&mut scene);
        (scene, storage, ids)
    }

    #[test]
    fn test_hover_transition_emits_out_then_over() {
        let (mut scene, storage, ids) = setup(vec![
            circle_at(10.0, 10.0, 5.0),
            circle_at(30.0, 10.0, 5.0),
        ]);
        let log = Rc::new(RefCell::new(Vec::new()));
        for (label, id) in [("a", ids[0]), ("b", ids[1])] {
            for name in ["mouseover", "mouseout", "mousemove"] {
                let l = log.clone();
                scene
                    .get_mut(id)
                    .unwrap()
                    .on(name, move |e| l.borrow_mut().push(format!("{label}:{}", e.name)));
            }
        }

        let mut handler = Handler::new();
        handler.pointer_move(&mut scene, &storage, 10.0, 10.0);
        handler.pointer_move(&mut scene, &storage, 30.0, 10.0);

        assert_eq!(
            *log.borrow(),
            vec![
                "a:mouseover",
                "a:mousemove",
                "a:mouseout",
                "b:mouseover",
                "b:mousemove"
            ]
        );
    }

    #[test]
    fn test_move_over_empty_space_goes_idle() {
        let (mut scene, storage, ids) = setup(vec![circle_at(10.0, 10.0, 5.0)]);
        let mut handler = Handler::new();
        handler.pointer_move(&mut scene, &storage, 10.0, 10.0);
        assert_eq!(handler.state(), PointerState::Hovering(ids[0]));

        handler.pointer_move(&mut scene, &storage, 90.0, 90.0);
        assert_eq!(handler.state(), PointerState::Idle);
    }

    #[test]
    fn test_drag_lifecycle_moves_the_element() {
        let (mut scene, storage, ids) =
            setup(vec![circle_at(10.0, 10.0, 5.0).with_draggable(true)]);
        let names = Rc::new(RefCell::new(Vec::new()));
        for name in ["dragstart", "drag", "dragend"] {
            let n = names.clone();
            scene
                .get_mut(ids[0])
                .unwrap()
                .on(name, move |e| n.borrow_mut().push(e.name.clone()));
        }

        let mut handler = Handler::new();
        handler.pointer_down(&mut scene, &storage, 10.0, 10.0);
        assert!(handler.pointer_move(&mut scene, &storage, 15.0, 12.0));
        handler.pointer_up(&mut scene, &storage, 15.0, 12.0);

        assert_eq!(*names.borrow(), vec!["dragstart", "drag", "dragend"]);
        let t = scene.get(ids[0]).unwrap().transform().translation;
        assert_eq!(t, Vec2::new(5.0, 2.0));
        // Back to hovering over the dragged element.
        assert_eq!(handler.state(), PointerState::Hovering(ids[0]));
    }

    #[test]
    fn test_drag_deltas_are_per_event() {
        let (mut scene, storage, ids) =
            setup(vec![circle_at(10.0, 10.0, 5.0).with_draggable(true)]);
        let deltas = Rc::new(RefCell::new(Vec::new()));
        let d = deltas.clone();
        scene
            .get_mut(ids[0])
            .unwrap()
            .on("drag", move |e| d.borrow_mut().push((e.dx, e.dy)));

        let mut handler = Handler::new();
        handler.pointer_down(&mut scene, &storage, 10.0, 10.0);
        handler.pointer_move(&mut scene, &storage, 13.0, 10.0);
        handler.pointer_move(&mut scene, &storage, 14.0, 16.0);

        assert_eq!(*deltas.borrow(), vec![(3.0, 0.0), (1.0, 6.0)]);
    }

    #[test]
    fn test_drag_flag_found_on_ancestor_group() {
        let mut scene = Scene::new();
        let group = scene.add_to_root(Element::group().with_draggable(true));
        let leaf = scene.add(group, circle_at(10.0, 10.0, 5.0));
        let mut storage = Storage::new();
        storage.update_from(&mut scene);

        let mut handler = Handler::new();
        handler.pointer_down(&mut scene, &storage, 10.0, 10.0);
        match handler.state() {
            PointerState::Dragging { target, .. } => assert_eq!(target, group),
            other => panic!("expected drag on the group, got {other:?}"),
        }
        let _ = leaf;
    }

    #[test]
    fn test_non_draggable_down_does_not_drag() {
        let (mut scene, storage, _) = setup(vec![circle_at(10.0, 10.0, 5.0)]);
        let mut handler = Handler::new();
        handler.pointer_down(&mut scene, &storage, 10.0, 10.0);
        assert_eq!(handler.state(), PointerState::Idle);
    }

    #[test]
    fn test_silent_element_is_transparent_to_hits() {
        let (scene, storage, ids) = setup(vec![
            circle_at(10.0, 10.0, 5.0),
            circle_at(10.0, 10.0, 5.0).with_z(1.0).with_silent(true),
        ]);
        let handler = Handler::new();
        assert_eq!(
            handler.find_hover(&scene, &storage, 10.0, 10.0),
            Some(ids[0])
        );
    }

    #[test]
    fn test_topmost_wins_even_when_transparent() {
        let (scene, storage, ids) = setup(vec![
            circle_at(10.0, 10.0, 5.0),
            circle_at(10.0, 10.0, 5.0)
                .with_z(1.0)
                .with_style(Style::filled(Color::TRANSPARENT)),
        ]);
        let handler = Handler::new();
        assert_eq!(
            handler.find_hover(&scene, &storage, 10.0, 10.0),
            Some(ids[1])
        );
    }

    #[test]
    fn test_leave_while_hovering_emits_mouseout() {
        let (mut scene, storage, ids) = setup(vec![circle_at(10.0, 10.0, 5.0)]);
        let left = Rc::new(RefCell::new(false));
        let l = left.clone();
        scene
            .get_mut(ids[0])
            .unwrap()
            .on("mouseout", move |_| *l.borrow_mut() = true);

        let mut handler = Handler::new();
        handler.pointer_move(&mut scene, &storage, 10.0, 10.0);
        handler.pointer_leave(&mut scene, 10.0, 10.0);
        assert!(*left.borrow());
        assert_eq!(handler.state(), PointerState::Idle);
    }

    #[test]
    fn test_surface_offset_translates_input() {
        let (scene, storage, ids) = setup(vec![circle_at(10.0, 10.0, 5.0)]);
        let mut handler = Handler::new();
        handler.set_surface_offset(Vec2::new(100.0, 50.0));
        assert_eq!(
            handler.find_hover(&scene, &storage, 110.0, 60.0),
            Some(ids[0])
        );
    }

    #[test]
    fn test_click_carries_top_ancestor() {
        let mut scene = Scene::new();
        let group = scene.add_to_root(Element::group());
        let leaf = scene.add(group, circle_at(10.0, 10.0, 5.0));
        let mut storage = Storage::new();
        storage.update_from(&mut scene);

        let seen = Rc::new(RefCell::new(None));
        let s = seen.clone();
        let mut handler = Handler::new();
        handler.on("click", move |e| *s.borrow_mut() = Some((e.target, e.top)));
        handler.click(&mut scene, &storage, 10.0, 10.0);

        assert_eq!(*seen.borrow(), Some((Some(leaf), Some(group))));
    }

    #[test]
    fn test_wheel_carries_delta_and_misses_dispatch_to_surface() {
        let (mut scene, storage, _) = setup(vec![]);
        let delta = Rc::new(RefCell::new(0.0f32));
        let d = delta.clone();
        let mut handler = Handler::new();
        handler.on("wheel", move |e| *d.borrow_mut() = e.wheel_delta);
        handler.wheel(&mut scene, &storage, 50.0, 50.0, -3.0);
        assert_eq!(*delta.borrow(), -3.0);
    }

    #[test]
    fn test_touch_maps_to_drag_path() {
        let (mut scene, storage, ids) =
            setup(vec![circle_at(10.0, 10.0, 5.0).with_draggable(true)]);
        let mut handler = Handler::new();
        handler.touch_start(&mut scene, &storage, 10.0, 10.0);
        handler.touch_move(&mut scene, &storage, 20.0, 10.0);
        handler.touch_end(&mut scene, &storage, 20.0, 10.0);

        let t = scene.get(ids[0]).unwrap().transform().translation;
        assert_eq!(t, Vec2::new(10.0, 0.0));
    }
}
