// extensions/mod.rs
//
// Animation helpers decoupled from the scene and the controller.
// The focus machine builds on these; nothing here knows about bodies.

pub mod easing;
pub mod tween;

pub use easing::Easing;
pub use tween::{Lerp, Tween, TweenStatus};
