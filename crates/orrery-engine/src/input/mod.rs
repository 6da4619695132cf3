pub mod pointer;

pub use pointer::{InputEvent, PointerTracker};
