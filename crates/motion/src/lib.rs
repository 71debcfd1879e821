//! Property-tween animation: a frame clock abstraction, easing functions,
//! single-property tweens, and the animator that schedules them.

pub mod animator;
pub mod clock;
pub mod easing;
pub mod tween;

pub use animator::{AnimationOptions, Animator};
pub use clock::{FrameClock, ManualClock, SystemClock};
pub use easing::Easing;
pub use tween::Animation;
