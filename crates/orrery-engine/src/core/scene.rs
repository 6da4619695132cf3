use std::f32::consts::TAU;

use glam::Vec3;

use crate::api::types::BodyHandle;
use crate::assets::config::SceneOptions;
use crate::components::material::{Material, TextureId, TextureState};
use crate::components::node::{BodyNode, MeshId};
use crate::core::registry::BodyRegistry;
use crate::systems::lighting::{LightState, PointLight};
use crate::systems::orbit::orbit_position;
use crate::systems::picking::PickTarget;
use crate::systems::starfield::Starfield;

/// Everything drawable: one node per body, the lights and the star cloud.
/// Node order matches registry order, so `BodyHandle` indexes both.
pub struct SceneGraph {
    nodes: Vec<BodyNode>,
    lights: LightState,
    starfield: Starfield,
    star: BodyHandle,
}

impl SceneGraph {
    /// Build the scene once from a validated registry.
    ///
    /// Body `i` starts at angle `i / count * 2π` on the XZ plane. The star
    /// gets the main light; every other body without a texture gets a weak
    /// light of its own colour that travels with it.
    pub fn build(registry: &BodyRegistry, options: &SceneOptions) -> Self {
        let count = registry.len().max(1) as f32;
        let mut nodes = Vec::with_capacity(registry.len());
        let mut lights = LightState::new();

        for (handle, body) in registry.iter() {
            let phase = handle.index() as f32 / count * TAU;
            let texture = match body.surface.texture_url {
                Some(_) => TextureState::Pending,
                None => TextureState::None,
            };
            let mut node = BodyNode::new(handle, MeshId(handle.0), Material::Flat(body.surface.color))
                .with_orbit(body.orbital_radius, phase, body.angular_speed)
                .with_radius(body.visual_radius)
                .with_texture(texture);

            if body.is_star() {
                node = node.as_star();
                lights.add(PointLight::new(
                    Vec3::ZERO,
                    body.surface.color,
                    options.lights.star_intensity,
                    options.lights.star_range,
                ));
            } else {
                node.pos = orbit_position(body.orbital_radius, phase);
                if body.surface.texture_url.is_none() {
                    lights.attach(
                        PointLight::new(
                            node.pos,
                            body.surface.color,
                            options.lights.body_intensity,
                            options.lights.body_range,
                        ),
                        handle,
                    );
                }
            }
            nodes.push(node);
        }

        log::debug!(
            "scene built: {} bodies, {} lights, {} background stars",
            nodes.len(),
            lights.count(),
            options.starfield.count
        );

        Self {
            nodes,
            lights,
            starfield: Starfield::generate(&options.starfield),
            star: registry.star(),
        }
    }

    pub fn node(&self, body: BodyHandle) -> Option<&BodyNode> {
        self.nodes.get(body.index())
    }

    pub fn node_mut(&mut self, body: BodyHandle) -> Option<&mut BodyNode> {
        self.nodes.get_mut(body.index())
    }

    pub fn nodes(&self) -> &[BodyNode] {
        &self.nodes
    }

    pub fn nodes_mut(&mut self) -> &mut [BodyNode] {
        &mut self.nodes
    }

    pub fn position(&self, body: BodyHandle) -> Option<Vec3> {
        self.node(body).map(|n| n.pos)
    }

    pub fn star_position(&self) -> Vec3 {
        self.position(self.star).unwrap_or(Vec3::ZERO)
    }

    /// Distance from the star, as shown in readouts.
    pub fn distance_from_star(&self, body: BodyHandle) -> Option<f32> {
        let star = self.star_position();
        self.position(body).map(|p| p.distance(star))
    }

    pub fn lights(&self) -> &LightState {
        &self.lights
    }

    pub fn starfield(&self) -> &Starfield {
        &self.starfield
    }

    pub fn starfield_mut(&mut self) -> &mut Starfield {
        &mut self.starfield
    }

    /// Move body-anchored lights to their bodies.
    pub fn sync_lights(&mut self) {
        let nodes = &self.nodes;
        self.lights.follow(|body| nodes.get(body.index()).map(|n| n.pos));
    }

    /// Spheres for ray casting at the current positions.
    pub fn pick_targets(&self) -> impl Iterator<Item = PickTarget> + '_ {
        self.nodes.iter().map(|n| PickTarget {
            body: n.body,
            centre: n.pos,
            radius: n.radius,
        })
    }

    /// Swap a body to its loaded image. Returns false when the body has no
    /// pending load.
    pub fn apply_texture(&mut self, body: BodyHandle, texture: TextureId) -> bool {
        let Some(node) = self.node_mut(body) else { return false };
        if !node.texture.is_pending() {
            return false;
        }
        node.material = Material::Textured {
            texture,
            fallback: node.material.color(),
        };
        node.texture = TextureState::Loaded(texture);
        true
    }

    /// Record a failed load. The flat material stays in place.
    pub fn fail_texture(&mut self, body: BodyHandle, reason: String) -> bool {
        let Some(node) = self.node_mut(body) else { return false };
        if !node.texture.is_pending() {
            return false;
        }
        node.texture = TextureState::Failed(reason);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::config::{BodyConfig, StarfieldOptions};
    use crate::components::body::{BodyKind, Color};

    fn options() -> SceneOptions {
        SceneOptions {
            starfield: StarfieldOptions { count: 16, ..Default::default() },
            ..Default::default()
        }
    }

    fn registry() -> BodyRegistry {
        BodyRegistry::from_configs(&[
            BodyConfig::new("sun", BodyKind::Star, 5.0, 0.0, 0.005, Color::from_hex(0xffff00)),
            BodyConfig::new("a", BodyKind::Terrestrial, 1.0, 8.0, 0.01, Color::from_hex(0x8c7853)),
            BodyConfig::new("b", BodyKind::Terrestrial, 1.3, 16.0, 0.006, Color::from_hex(0x0077be))
                .with_texture("b.jpg"),
            BodyConfig::new("c", BodyKind::GasGiant, 2.5, 28.0, 0.003, Color::from_hex(0xffa500)),
        ])
        .unwrap()
    }

    #[test]
    fn initial_layout_spreads_bodies_by_index() {
        let scene = SceneGraph::build(&registry(), &options());
        assert_eq!(scene.star_position(), Vec3::ZERO);
        // Index 1 of 4: a quarter turn.
        let a = scene.position(BodyHandle(1)).unwrap();
        assert!(a.abs_diff_eq(Vec3::new(0.0, 0.0, 8.0), 1e-4));
        // Index 2 of 4: half a turn.
        let b = scene.position(BodyHandle(2)).unwrap();
        assert!(b.abs_diff_eq(Vec3::new(-16.0, 0.0, 0.0), 1e-4));
        assert!((scene.distance_from_star(BodyHandle(3)).unwrap() - 28.0).abs() < 1e-4);
    }

    #[test]
    fn every_body_gets_its_own_mesh() {
        let scene = SceneGraph::build(&registry(), &options());
        let mut meshes: Vec<_> = scene.nodes().iter().map(|n| n.mesh).collect();
        meshes.dedup();
        assert_eq!(meshes.len(), 4);
    }

    #[test]
    fn lights_for_star_and_untextured_planets() {
        let scene = SceneGraph::build(&registry(), &options());
        // Star + "a" + "c"; "b" has a texture.
        assert_eq!(scene.lights().count(), 3);
        assert!(scene.lights().attached_to(BodyHandle(2)).is_none());
        let a_light = scene.lights().attached_to(BodyHandle(1)).unwrap();
        assert_eq!(a_light.intensity, 0.5);
        assert_eq!(a_light.range, 20.0);
        assert!(a_light.pos().abs_diff_eq(scene.position(BodyHandle(1)).unwrap(), 1e-6));
    }

    #[test]
    fn lights_follow_after_sync() {
        let mut scene = SceneGraph::build(&registry(), &options());
        scene.node_mut(BodyHandle(3)).unwrap().pos = Vec3::new(1.0, 2.0, 3.0);
        scene.sync_lights();
        assert_eq!(scene.lights().attached_to(BodyHandle(3)).unwrap().pos(), Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn textured_body_starts_flat_and_pending() {
        let scene = SceneGraph::build(&registry(), &options());
        let b = scene.node(BodyHandle(2)).unwrap();
        assert!(b.texture.is_pending());
        assert_eq!(b.material, Material::Flat(Color::from_hex(0x0077be)));
        assert_eq!(scene.node(BodyHandle(1)).unwrap().texture, TextureState::None);
    }

    #[test]
    fn texture_success_and_failure() {
        let mut scene = SceneGraph::build(&registry(), &options());
        assert!(!scene.apply_texture(BodyHandle(1), TextureId(1)));
        assert!(scene.apply_texture(BodyHandle(2), TextureId(9)));
        assert_eq!(scene.node(BodyHandle(2)).unwrap().material.texture(), Some(TextureId(9)));
        // Already resolved: a late failure changes nothing.
        assert!(!scene.fail_texture(BodyHandle(2), "late".into()));

        let mut scene = SceneGraph::build(&registry(), &options());
        assert!(scene.fail_texture(BodyHandle(2), "404".into()));
        let b = scene.node(BodyHandle(2)).unwrap();
        assert_eq!(b.material, Material::Flat(Color::from_hex(0x0077be)));
        assert_eq!(b.texture, TextureState::Failed("404".into()));
    }

    #[test]
    fn pick_targets_cover_all_bodies() {
        let scene = SceneGraph::build(&registry(), &options());
        let radii: Vec<f32> = scene.pick_targets().map(|t| t.radius).collect();
        assert_eq!(radii, vec![5.0, 1.0, 1.3, 2.5]);
        assert_eq!(scene.starfield().len(), 16);
    }
}
