//! Ray casting against body spheres.
//!
//! Picking reads the positions committed by the last rendered frame, so what
//! the user clicks on is what they saw.

use glam::Vec3;

use crate::api::types::BodyHandle;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    /// Unit length.
    pub direction: Vec3,
}

impl Ray {
    /// Build a ray; `direction` is normalized (degenerate input points down -Z).
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or(Vec3::NEG_Z),
        }
    }

    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Distance along `ray` to the first intersection with the sphere, if any.
/// A ray starting inside the sphere reports the exit point.
pub fn ray_sphere(ray: &Ray, centre: Vec3, radius: f32) -> Option<f32> {
    let oc = ray.origin - centre;
    let b = oc.dot(ray.direction);
    let c = oc.length_squared() - radius * radius;
    let discriminant = b * b - c;
    if discriminant < 0.0 {
        return None;
    }
    let root = discriminant.sqrt();
    let near = -b - root;
    if near > 0.0 {
        return Some(near);
    }
    let far = -b + root;
    (far > 0.0).then_some(far)
}

/// A candidate for picking: a body and the sphere it occupies this frame.
#[derive(Debug, Clone, Copy)]
pub struct PickTarget {
    pub body: BodyHandle,
    pub centre: Vec3,
    pub radius: f32,
}

/// Nearest hit along the ray. Ties go to the earlier target.
pub fn pick_nearest<I>(ray: &Ray, targets: I) -> Option<(BodyHandle, f32)>
where
    I: IntoIterator<Item = PickTarget>,
{
    let mut best: Option<(BodyHandle, f32)> = None;
    for target in targets {
        if let Some(t) = ray_sphere(ray, target.centre, target.radius) {
            if best.map_or(true, |(_, best_t)| t < best_t) {
                best = Some((target.body, t));
            }
        }
    }
    best
}
