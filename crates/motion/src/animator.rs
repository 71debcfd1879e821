//! The animation scheduler.
//!
//! Holds every live tween and advances them all on each tick, in FIFO
//! order within the frame. Tweens that complete on a step are removed on
//! that same step; there is no cross-tween ordering guarantee beyond
//! all-before-the-next-repaint.

use scene::{ElementId, Scene};
use tracing::debug;

use crate::easing::Easing;
use crate::tween::Animation;

/// Scheduling knobs for [`Animator::animate`].
#[derive(Clone, Debug)]
pub struct AnimationOptions {
    /// Milliseconds.
    pub duration: f64,
    pub delay: f64,
    pub easing: Easing,
}

impl Default for AnimationOptions {
    fn default() -> Self {
        Self {
            duration: 500.0,
            delay: 0.0,
            easing: Easing::Linear,
        }
    }
}

#[derive(Default)]
pub struct Animator {
    animations: Vec<Animation>,
}

impl Animator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Constructs a tween from the property's current value and queues it;
    /// it starts on the next [`Animator::step`].
    pub fn animate(
        &mut self,
        scene: &Scene,
        target: ElementId,
        path: impl Into<String>,
        end_value: f32,
        options: AnimationOptions,
    ) {
        let animation = Animation::new(scene, target, path, end_value)
            .duration(options.duration)
            .delay(options.delay)
            .easing(options.easing);
        self.animations.push(animation);
    }

    /// Queues an already-configured tween (for per-frame or completion
    /// callbacks).
    pub fn add(&mut self, animation: Animation) {
        self.animations.push(animation);
    }

    pub fn len(&self) -> usize {
        self.animations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.animations.is_empty()
    }

    /// Advances every live tween to `now`, removing the ones that finish.
    /// Returns whether any tween advanced (the scene may need repainting).
    pub fn step(&mut self, scene: &mut Scene, now: f64) -> bool {
        if self.animations.is_empty() {
            return false;
        }
        let mut wrote = false;
        let mut completed = 0usize;
        self.animations.retain_mut(|anim| {
            anim.start(now);
            if anim.is_finished() {
                return false;
            }
            if anim.is_paused() {
                return true;
            }
            let done = anim.step(scene, now);
            wrote = true;
            if done {
                completed += 1;
            }
            !done
        });
        if completed > 0 {
            debug!(completed, remaining = self.animations.len(), "tweens finished");
        }
        wrote
    }

    /// Cancels everything; completion callbacks do not fire.
    pub fn stop_all(&mut self) {
        for anim in &mut self.animations {
            anim.stop();
        }
        self.animations.clear();
    }

    pub fn pause_all(&mut self, now: f64) {
        for anim in &mut self.animations {
            anim.pause(now);
        }
    }

    pub fn resume_all(&mut self, now: f64) {
        for anim in &mut self.animations {
            anim.resume(now);
        }
    }
}
