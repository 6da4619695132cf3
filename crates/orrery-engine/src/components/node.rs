use glam::Vec3;
use crate::api::types::BodyHandle;
use crate::components::material::{Material, TextureState};

/// Renderer-side mesh handle. Every body owns a distinct one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MeshId(pub u32);

/// Per-body scene state: the mutable half of a body.
/// Static attributes stay in the registry; this holds what changes per frame.
#[derive(Debug, Clone)]
pub struct BodyNode {
    pub body: BodyHandle,
    pub mesh: MeshId,
    pub material: Material,
    pub texture: TextureState,
    /// World-space centre.
    pub pos: Vec3,
    /// Self-rotation about the Y axis, radians.
    pub spin: f32,
    /// Orbital angle at the epoch.
    pub initial_phase: f32,
    /// Current orbital angle, radians in [0, 2π).
    pub orbital_angle: f32,
    pub orbital_radius: f32,
    pub angular_speed: f32,
    /// Sphere radius used for drawing and picking.
    pub radius: f32,
    pub is_star: bool,
}

impl BodyNode {
    pub fn new(body: BodyHandle, mesh: MeshId, material: Material) -> Self {
        Self {
            body,
            mesh,
            material,
            texture: TextureState::None,
            pos: Vec3::ZERO,
            spin: 0.0,
            initial_phase: 0.0,
            orbital_angle: 0.0,
            orbital_radius: 0.0,
            angular_speed: 0.0,
            radius: 1.0,
            is_star: false,
        }
    }

    // -- Builder pattern --

    pub fn with_orbit(mut self, radius: f32, phase: f32, angular_speed: f32) -> Self {
        self.orbital_radius = radius;
        self.initial_phase = phase;
        self.orbital_angle = phase;
        self.angular_speed = angular_speed;
        self
    }

    pub fn with_radius(mut self, radius: f32) -> Self {
        self.radius = radius;
        self
    }

    pub fn with_texture(mut self, texture: TextureState) -> Self {
        self.texture = texture;
        self
    }

    pub fn as_star(mut self) -> Self {
        self.is_star = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::body::Color;

    #[test]
    fn builder_sets_orbit() {
        let node = BodyNode::new(BodyHandle(1), MeshId(1), Material::Flat(Color::WHITE))
            .with_orbit(16.0, 1.5, 0.006)
            .with_radius(1.3);
        assert_eq!(node.orbital_angle, node.initial_phase);
        assert_eq!(node.orbital_radius, 16.0);
        assert_eq!(node.radius, 1.3);
        assert!(!node.is_star);
        assert_eq!(node.texture, TextureState::None);
    }
}
