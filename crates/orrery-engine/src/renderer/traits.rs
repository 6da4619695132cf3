//! Renderer seam.
//!
//! The controller never talks to a graphics API. Once per committed frame it
//! assembles a `FrameData` and hands it to a `Renderer`: a WebGL/WebGPU host
//! through the web bridge, a native backend, or a recording fake in tests.

use super::camera::{CameraPose, CameraUniform};
use super::instance::BodyInstance;
use crate::systems::lighting::PointLight;
use crate::systems::starfield::StarPoint;

/// Renderer backend.
///
/// ```ignore
/// struct CanvasRenderer { /* ... */ }
///
/// impl Renderer for CanvasRenderer {
///     fn backend(&self) -> &'static str { "webgl2" }
///     fn draw(&mut self, frame: &FrameData) { /* encode draw calls */ }
///     fn resize(&mut self, width: u32, height: u32) { /* resize surface */ }
/// }
/// ```
pub trait Renderer {
    /// Backend identifier (e.g., "webgl2", "webgpu", "buffer").
    fn backend(&self) -> &'static str;

    /// Draw one complete frame. Called exactly once per committed frame.
    fn draw(&mut self, frame: &FrameData);

    /// The viewport changed size.
    fn resize(&mut self, width: u32, height: u32);

    /// Free GPU resources. Called once, from `dispose`.
    fn release(&mut self) {}
}

/// Complete frame data for rendering.
pub struct FrameData<'a> {
    /// View, projection and eye position.
    pub camera: CameraUniform,
    pub pose: CameraPose,
    /// One instance per body, in registry order.
    pub bodies: &'a [BodyInstance],
    pub lights: &'a [PointLight],
    pub ambient: [f32; 3],
    /// Background points in their local frame.
    pub stars: &'a [StarPoint],
    /// Model matrix for the background points.
    pub star_rotation: [[f32; 4]; 4],
    /// Host timestamp of this frame, milliseconds.
    pub time_ms: f64,
}
