//! Point lights for the orbit scene.
//!
//! Lights are created once when the scene is built. A light may be attached
//! to a body, in which case it is moved to that body's position every
//! committed frame.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

use crate::api::types::BodyHandle;
use crate::components::body::Color;

/// A 3D point light.
///
/// Wire format (8 floats / 32 bytes):
/// `[x, y, z, r, g, b, intensity, range]`
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct PointLight {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub intensity: f32,
    /// Falloff distance in world units; 0 means infinite.
    pub range: f32,
}

impl PointLight {
    pub const FLOATS: usize = 8;

    /// - `pos`: World-space position
    /// - `color`: Light colour
    /// - `intensity`: Strength multiplier
    /// - `range`: Falloff distance in world units
    pub fn new(pos: Vec3, color: Color, intensity: f32, range: f32) -> Self {
        Self {
            x: pos.x,
            y: pos.y,
            z: pos.z,
            r: color.r,
            g: color.g,
            b: color.b,
            intensity,
            range,
        }
    }

    pub fn pos(&self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    pub fn set_pos(&mut self, pos: Vec3) {
        self.x = pos.x;
        self.y = pos.y;
        self.z = pos.z;
    }
}

/// All lights in the scene plus the ambient term.
pub struct LightState {
    lights: Vec<PointLight>,
    /// Parallel to `lights`: the body each light follows, if any.
    anchors: Vec<Option<BodyHandle>>,
    ambient: [f32; 3],
}

impl LightState {
    pub fn new() -> Self {
        Self {
            lights: Vec::new(),
            anchors: Vec::new(),
            ambient: [0.25, 0.25, 0.25],
        }
    }

    /// Add a fixed light.
    pub fn add(&mut self, light: PointLight) {
        self.lights.push(light);
        self.anchors.push(None);
    }

    /// Add a light that follows `body`.
    pub fn attach(&mut self, light: PointLight, body: BodyHandle) {
        self.lights.push(light);
        self.anchors.push(Some(body));
    }

    /// Move every anchored light to its body's current position.
    pub fn follow(&mut self, mut position_of: impl FnMut(BodyHandle) -> Option<Vec3>) {
        for (light, anchor) in self.lights.iter_mut().zip(&self.anchors) {
            if let Some(pos) = anchor.and_then(&mut position_of) {
                light.set_pos(pos);
            }
        }
    }

    /// The light attached to `body`, if any.
    pub fn attached_to(&self, body: BodyHandle) -> Option<&PointLight> {
        self.anchors
            .iter()
            .position(|a| *a == Some(body))
            .map(|i| &self.lights[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = &PointLight> {
        self.lights.iter()
    }

    pub fn as_slice(&self) -> &[PointLight] {
        &self.lights
    }

    pub fn count(&self) -> usize {
        self.lights.len()
    }

    pub fn clear(&mut self) {
        self.lights.clear();
        self.anchors.clear();
    }

    pub fn set_ambient(&mut self, r: f32, g: f32, b: f32) {
        self.ambient = [r, g, b];
    }

    pub fn ambient(&self) -> [f32; 3] {
        self.ambient
    }

    /// Pointer to the lights data for buffer reads from the host.
    pub fn buffer_ptr(&self) -> *const f32 {
        self.lights.as_ptr() as *const f32
    }
}

impl Default for LightState {
    fn default() -> Self {
        Self::new()
    }
}
