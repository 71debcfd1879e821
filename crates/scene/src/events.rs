//! Per-instance publish/subscribe, keyed by event name.
//!
//! Every element composes one [`EventEmitter`]; the renderer's surface keeps
//! another for surface-level listeners. Handlers run synchronously in
//! registration order. Dispatch does not guard against panicking handlers: a
//! panic in one aborts delivery to the handlers registered after it.

use crate::element::ElementId;
use smallvec::SmallVec;
use std::collections::HashMap;

/// Payload delivered to event handlers.
#[derive(Clone, Debug, Default)]
pub struct Event {
    /// Semantic event name (`mouseover`, `drag`, `click`, ...).
    pub name: String,
    /// Pointer position in local surface coordinates.
    pub x: f32,
    pub y: f32,
    /// The element the event was dispatched to, if any.
    pub target: Option<ElementId>,
    /// Top-most ancestor of `target` below the scene root.
    pub top: Option<ElementId>,
    /// Drag delta since the last event, where applicable.
    pub dx: f32,
    pub dy: f32,
    /// Wheel delta, for `wheel` events.
    pub wheel_delta: f32,
}

impl Event {
    pub fn new(name: impl Into<String>, x: f32, y: f32) -> Self {
        Self {
            name: name.into(),
            x,
            y,
            ..Self::default()
        }
    }
}

/// Token returned by [`EventEmitter::on`], used to unregister.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct HandlerId(u64);

type Callback = Box<dyn FnMut(&Event)>;

/// Minimal per-instance event emitter.
#[derive(Default)]
pub struct EventEmitter {
    handlers: HashMap<String, SmallVec<[(HandlerId, Callback); 2]>>,
    next_id: u64,
}

impl EventEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a handler; handlers for one name run in registration order.
    pub fn on(&mut self, name: &str, callback: impl FnMut(&Event) + 'static) -> HandlerId {
        let id = HandlerId(self.next_id);
        self.next_id += 1;
        self.handlers
            .entry(name.to_string())
            .or_default()
            .push((id, Box::new(callback)));
        id
    }

    /// Unregisters one handler; returns whether it was found.
    pub fn off(&mut self, name: &str, id: HandlerId) -> bool {
        let Some(list) = self.handlers.get_mut(name) else {
            return false;
        };
        let before = list.len();
        list.retain(|(hid, _)| *hid != id);
        list.len() != before
    }

    /// Drops every handler registered for `name`.
    pub fn off_all(&mut self, name: &str) {
        self.handlers.remove(name);
    }

    pub fn has_listeners(&self, name: &str) -> bool {
        self.handlers.get(name).is_some_and(|l| !l.is_empty())
    }

    /// Invokes all handlers registered for `event.name`, synchronously, in
    /// registration order.
    pub fn trigger(&mut self, event: &Event) {
        if let Some(list) = self.handlers.get_mut(&event.name) {
            for (_, callback) in list.iter_mut() {
                callback(event);
            }
        }
    }
}

impl std::fmt::Debug for EventEmitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventEmitter")
            .field("events", &self.handlers.keys().collect::<Vec<_>>())
            .finish()
    }
}
