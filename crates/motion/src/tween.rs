//! A single-property tween.
//!
//! The start value is snapshotted when the tween is constructed (a missing
//! property reads as 0); every step writes the eased interpolation back
//! through the element's property path. Completion fires exactly once, at
//! progress 1; `stop` cancels without completion.

use scene::{ElementId, Scene};
use tracing::trace;

use crate::easing::Easing;

type FrameCallback = Box<dyn FnMut(f32)>;
type DoneCallback = Box<dyn FnOnce()>;

pub struct Animation {
    target: ElementId,
    path: String,
    start_value: f32,
    end_value: f32,
    /// Milliseconds; a zero duration completes on the first gated step.
    duration: f64,
    delay: f64,
    easing: Easing,
    on_frame: Option<FrameCallback>,
    on_complete: Option<DoneCallback>,
    start_time: Option<f64>,
    paused: bool,
    paused_at: f64,
    finished: bool,
}

impl Animation {
    /// Snapshots the current property value as the tween's start.
    pub fn new(scene: &Scene, target: ElementId, path: impl Into<String>, end_value: f32) -> Self {
        let path = path.into();
        let start_value = scene.get_prop(target, &path).unwrap_or(0.0);
        Self {
            target,
            path,
            start_value,
            end_value,
            duration: 500.0,
            delay: 0.0,
            easing: Easing::Linear,
            on_frame: None,
            on_complete: None,
            start_time: None,
            paused: false,
            paused_at: 0.0,
            finished: false,
        }
    }

    pub fn duration(mut self, ms: f64) -> Self {
        self.duration = ms.max(0.0);
        self
    }

    pub fn delay(mut self, ms: f64) -> Self {
        self.delay = ms.max(0.0);
        self
    }

    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn on_frame(mut self, callback: impl FnMut(f32) + 'static) -> Self {
        self.on_frame = Some(Box::new(callback));
        self
    }

    pub fn on_complete(mut self, callback: impl FnOnce() + 'static) -> Self {
        self.on_complete = Some(Box::new(callback));
        self
    }

    pub fn target(&self) -> ElementId {
        self.target
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn is_started(&self) -> bool {
        self.start_time.is_some()
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Anchors the timeline at `now`; calling again is a no-op.
    pub fn start(&mut self, now: f64) {
        if self.start_time.is_none() {
            self.start_time = Some(now);
        }
    }

    /// Cancels without firing the completion callback.
    pub fn stop(&mut self) {
        self.finished = true;
        self.on_complete = None;
    }

    /// Freezes progress; a no-op unless started and running.
    pub fn pause(&mut self, now: f64) {
        if self.start_time.is_some() && !self.paused && !self.finished {
            self.paused = true;
            self.paused_at = now;
        }
    }

    /// Shifts the timeline by the paused span; a no-op unless paused.
    pub fn resume(&mut self, now: f64) {
        if self.paused {
            if let Some(start) = self.start_time {
                self.start_time = Some(start + (now - self.paused_at));
            }
            self.paused = false;
        }
    }

    /// Advances the tween to `now`, writing the interpolated value through
    /// the property path. Returns true once, on the step that completes it.
    pub fn step(&mut self, scene: &mut Scene, now: f64) -> bool {
        if self.finished || self.paused {
            return false;
        }
        let Some(start_time) = self.start_time else {
            return false;
        };
        let elapsed = now - start_time - self.delay;
        if elapsed < 0.0 {
            return false;
        }
        let progress = if self.duration <= 0.0 {
            1.0
        } else {
            (elapsed / self.duration).clamp(0.0, 1.0) as f32
        };
        let eased = self.easing.apply(progress);
        let value = self.start_value + (self.end_value - self.start_value) * eased;
        scene.set_prop(self.target, &self.path, value);
        if let Some(on_frame) = &mut self.on_frame {
            on_frame(value);
        }
        if progress >= 1.0 {
            self.finished = true;
            if let Some(on_complete) = self.on_complete.take() {
                on_complete();
            }
            trace!(path = %self.path, "tween complete");
            return true;
        }
        false
    }
}
