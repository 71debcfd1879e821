//! The renderer facade.
//!
//! Owns the scene, its derived storage, a boxed painter backend, the
//! pointer handler, and the animator, and drives them on a cooperative
//! frame loop: `tick(now)` advances animations, re-derives storage after
//! structural edits, and coalesces every dirty signal into at most one
//! repaint per frame.

use glam::Vec2;
use motion::{Animation, AnimationOptions, Animator};
use paint::{PaintError, Painter};
use scene::{Element, ElementId, Event, HandlerId, Scene, Storage};
use tracing::debug;
use vellum_core::Point;

use crate::handler::Handler;
use crate::locale::Locale;
use crate::theme::Theme;

pub struct Renderer {
    scene: Scene,
    storage: Storage,
    painter: Box<dyn Painter>,
    handler: Handler,
    animator: Animator,
    theme: Theme,
    locale: Locale,
    disposed: bool,
}

impl Renderer {
    pub fn new(painter: Box<dyn Painter>) -> Self {
        Self {
            scene: Scene::new(),
            storage: Storage::new(),
            painter,
            handler: Handler::new(),
            animator: Animator::new(),
            theme: Theme::default(),
            locale: Locale::default(),
            disposed: false,
        }
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Direct scene access; callers mutating through it are responsible for
    /// the dirty flags (`attr` and the typed setters handle them).
    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    pub fn width(&self) -> u32 {
        self.painter.width()
    }

    pub fn height(&self) -> u32 {
        self.painter.height()
    }

    // -- scene construction ------------------------------------------------

    pub fn add(&mut self, parent: ElementId, element: Element) -> ElementId {
        let id = self.scene.add(parent, element);
        self.painter.mark_dirty();
        id
    }

    pub fn add_to_root(&mut self, element: Element) -> ElementId {
        let root = self.scene.root();
        self.add(root, element)
    }

    pub fn remove(&mut self, id: ElementId) {
        self.scene.remove(id);
        self.painter.mark_dirty();
    }

    pub fn remove_all(&mut self) {
        self.scene.remove_all();
        self.painter.mark_dirty();
    }

    // -- events ------------------------------------------------------------

    /// Surface-level listener; fires for every dispatched event of `name`.
    pub fn on(&mut self, name: &str, callback: impl FnMut(&Event) + 'static) -> HandlerId {
        self.handler.on(name, callback)
    }

    pub fn off(&mut self, name: &str, id: HandlerId) -> bool {
        self.handler.off(name, id)
    }

    /// Per-node listener; a stale key is a no-op returning `None`.
    pub fn element_on(
        &mut self,
        id: ElementId,
        name: &str,
        callback: impl FnMut(&Event) + 'static,
    ) -> Option<HandlerId> {
        self.scene.get_mut(id).map(|el| el.on(name, callback))
    }

    pub fn element_off(&mut self, id: ElementId, name: &str, handler: HandlerId) -> bool {
        self.scene
            .get_mut(id)
            .is_some_and(|el| el.off(name, handler))
    }

    // -- pointer input -----------------------------------------------------

    pub fn set_surface_offset(&mut self, offset: Vec2) {
        self.handler.set_surface_offset(offset);
    }

    pub fn mouse_move(&mut self, x: f32, y: f32) {
        self.refresh_storage();
        if self.handler.pointer_move(&mut self.scene, &self.storage, x, y) {
            self.painter.mark_dirty();
        }
    }

    pub fn mouse_down(&mut self, x: f32, y: f32) {
        self.refresh_storage();
        self.handler.pointer_down(&mut self.scene, &self.storage, x, y);
    }

    pub fn mouse_up(&mut self, x: f32, y: f32) {
        self.refresh_storage();
        self.handler.pointer_up(&mut self.scene, &self.storage, x, y);
    }

    pub fn mouse_leave(&mut self, x: f32, y: f32) {
        self.handler.pointer_leave(&mut self.scene, x, y);
    }

    pub fn click(&mut self, x: f32, y: f32) {
        self.refresh_storage();
        self.handler.click(&mut self.scene, &self.storage, x, y);
    }

    pub fn double_click(&mut self, x: f32, y: f32) {
        self.refresh_storage();
        self.handler.double_click(&mut self.scene, &self.storage, x, y);
    }

    pub fn context_menu(&mut self, x: f32, y: f32) {
        self.refresh_storage();
        self.handler.context_menu(&mut self.scene, &self.storage, x, y);
    }

    pub fn wheel(&mut self, x: f32, y: f32, delta: f32) {
        self.refresh_storage();
        self.handler.wheel(&mut self.scene, &self.storage, x, y, delta);
    }

    pub fn touch_start(&mut self, x: f32, y: f32) {
        self.mouse_down(x, y);
    }

    pub fn touch_move(&mut self, x: f32, y: f32) {
        self.mouse_move(x, y);
    }

    pub fn touch_end(&mut self, x: f32, y: f32) {
        self.mouse_up(x, y);
    }

    /// Hit-test without dispatching any event.
    pub fn find_hover(&mut self, x: f32, y: f32) -> Option<ElementId> {
        self.refresh_storage();
        self.handler.find_hover(&self.scene, &self.storage, x, y)
    }

    // -- animation ---------------------------------------------------------

    /// Tweens one numeric property to `end_value`; the tween starts on the
    /// next tick.
    pub fn animate(
        &mut self,
        target: ElementId,
        path: impl Into<String>,
        end_value: f32,
        options: AnimationOptions,
    ) {
        self.animator
            .animate(&self.scene, target, path, end_value, options);
    }

    /// Queues a pre-built tween (for frame/completion callbacks).
    pub fn add_animation(&mut self, animation: Animation) {
        self.animator.add(animation);
    }

    pub fn animation_count(&self) -> usize {
        self.animator.len()
    }

    pub fn stop_animations(&mut self) {
        self.animator.stop_all();
    }

    pub fn pause_animations(&mut self, now: f64) {
        self.animator.pause_all(now);
    }

    pub fn resume_animations(&mut self, now: f64) {
        self.animator.resume_all(now);
    }

    // -- frame loop ----------------------------------------------------------

    /// One frame: advance animations to `now`, then repaint at most once if
    /// anything is dirty.
    pub fn tick(&mut self, now: f64) {
        if self.disposed {
            return;
        }
        if self.animator.step(&mut self.scene, now) {
            self.painter.mark_dirty();
        }
        if self.scene.structure_dirty() || self.scene.any_dirty() {
            self.painter.mark_dirty();
        }
        if self.painter.needs_paint() {
            self.refresh_storage();
            self.painter.paint(&mut self.scene, &self.storage);
        }
    }

    /// Forces an immediate repaint regardless of dirty state.
    pub fn flush(&mut self) {
        if self.disposed {
            return;
        }
        self.refresh_storage();
        self.painter.paint(&mut self.scene, &self.storage);
    }

    pub fn resize(&mut self, width: Option<u32>, height: Option<u32>) -> Result<(), PaintError> {
        self.painter.resize(width, height)
    }

    /// Whether a repaint is pending for the next tick.
    pub fn needs_paint(&self) -> bool {
        self.painter.needs_paint()
    }

    pub fn painter(&self) -> &dyn Painter {
        self.painter.as_ref()
    }

    /// Stops animations, releases the painter, and ignores all later work.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.animator.stop_all();
        self.painter.dispose();
        self.disposed = true;
        debug!("renderer disposed");
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Aggregate scene bounds, for embedders sizing around content.
    pub fn bounding_rect(&self) -> vellum_core::Rect {
        self.scene.bounding_rect(self.scene.root())
    }

    /// Convenience hit query in already-local coordinates.
    pub fn element_at(&mut self, p: Point) -> Option<ElementId> {
        self.find_hover(p.x, p.y)
    }

    fn refresh_storage(&mut self) {
        if self.scene.structure_dirty() {
            self.storage.update_from(&mut self.scene);
        }
    }
}
