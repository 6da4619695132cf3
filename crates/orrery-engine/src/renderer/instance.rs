use bytemuck::{Pod, Zeroable};

use crate::components::node::BodyNode;

/// Per-body render data handed to the host renderer.
/// 12 floats = 48 bytes per instance.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct BodyInstance {
    /// World-space centre.
    pub x: f32,
    pub y: f32,
    pub z: f32,
    /// Sphere radius.
    pub radius: f32,
    /// Self-rotation about Y, radians.
    pub spin: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    /// Host texture id, or -1 for the flat colour. Exact only up to
    /// [`BodyInstance::MAX_TEXTURE_ID`].
    pub texture: f32,
    /// 1.0 for self-lit bodies (the star).
    pub emissive: f32,
    /// Mesh id, so the host can keep one mesh per body.
    pub mesh: f32,
    pub _pad0: f32,
}

impl BodyInstance {
    pub const FLOATS: usize = 12;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
    /// Largest texture id an f32 slot holds exactly (2^24).
    pub const MAX_TEXTURE_ID: u32 = 1 << 24;

    pub fn from_node(node: &BodyNode) -> Self {
        let color = node.material.color();
        Self {
            x: node.pos.x,
            y: node.pos.y,
            z: node.pos.z,
            radius: node.radius,
            spin: node.spin,
            r: color.r,
            g: color.g,
            b: color.b,
            texture: node.material.texture().map_or(-1.0, |t| t.0 as f32),
            emissive: if node.is_star { 1.0 } else { 0.0 },
            mesh: node.mesh.0 as f32,
            _pad0: 0.0,
        }
    }
}

/// Reusable buffer of body instances, rebuilt every committed frame.
pub struct InstanceBuffer {
    instances: Vec<BodyInstance>,
}

impl InstanceBuffer {
    pub fn new() -> Self {
        Self::with_capacity(16)
    }

    pub fn with_capacity(max: usize) -> Self {
        Self {
            instances: Vec::with_capacity(max),
        }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
    }

    pub fn push(&mut self, instance: BodyInstance) {
        self.instances.push(instance);
    }

    /// Replace the contents with one instance per node.
    pub fn fill(&mut self, nodes: &[BodyNode]) {
        self.instances.clear();
        self.instances.extend(nodes.iter().map(BodyInstance::from_node));
    }

    pub fn as_slice(&self) -> &[BodyInstance] {
        &self.instances
    }

    pub fn instance_count(&self) -> usize {
        self.instances.len()
    }

    pub fn instances_ptr(&self) -> *const f32 {
        self.instances.as_ptr() as *const f32
    }
}

impl Default for InstanceBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::BodyHandle;
    use crate::components::body::Color;
    use crate::components::material::{Material, TextureId};
    use crate::components::node::MeshId;

    #[test]
    fn body_instance_is_48_bytes() {
        assert_eq!(std::mem::size_of::<BodyInstance>(), 48);
        assert_eq!(BodyInstance::STRIDE_BYTES, 48);
    }

    #[test]
    fn instance_reflects_material() {
        let flat = BodyNode::new(BodyHandle(0), MeshId(0), Material::Flat(Color::WHITE)).as_star();
        let i = BodyInstance::from_node(&flat);
        assert_eq!(i.texture, -1.0);
        assert_eq!(i.emissive, 1.0);

        let textured = BodyNode::new(
            BodyHandle(3),
            MeshId(3),
            Material::Textured { texture: TextureId(5), fallback: Color::WHITE },
        );
        let i = BodyInstance::from_node(&textured);
        assert_eq!(i.texture, 5.0);
        assert_eq!(i.mesh, 3.0);
        assert_eq!(i.emissive, 0.0);
    }

    #[test]
    fn largest_texture_id_survives_the_float_slot() {
        let node = BodyNode::new(
            BodyHandle(1),
            MeshId(1),
            Material::Textured {
                texture: TextureId(BodyInstance::MAX_TEXTURE_ID),
                fallback: Color::WHITE,
            },
        );
        let i = BodyInstance::from_node(&node);
        assert_eq!(i.texture as u32, BodyInstance::MAX_TEXTURE_ID);
        // One past the limit no longer round-trips.
        assert_eq!((BodyInstance::MAX_TEXTURE_ID + 1) as f32 as u32, BodyInstance::MAX_TEXTURE_ID);
    }

    #[test]
    fn fill_replaces_contents() {
        let mut buf = InstanceBuffer::new();
        buf.push(BodyInstance::default());
        let nodes = [
            BodyNode::new(BodyHandle(0), MeshId(0), Material::Flat(Color::WHITE)),
            BodyNode::new(BodyHandle(1), MeshId(1), Material::Flat(Color::WHITE)),
        ];
        buf.fill(&nodes);
        assert_eq!(buf.instance_count(), 2);
        assert_eq!(buf.as_slice()[1].mesh, 1.0);
    }
}
