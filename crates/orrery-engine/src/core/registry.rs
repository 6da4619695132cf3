// core/registry.rs
//
// Validated, immutable list of bodies. Built once at initialization;
// everything downstream addresses bodies by `BodyHandle`.

use std::collections::HashMap;

use crate::api::types::BodyHandle;
use crate::assets::config::BodyConfig;
use crate::components::body::{visual_radius_for_diameter, CelestialBody, Surface};
use crate::error::OrreryError;

pub struct BodyRegistry {
    bodies: Vec<CelestialBody>,
    by_id: HashMap<String, BodyHandle>,
    star: BodyHandle,
}

impl BodyRegistry {
    /// Validate `configs` and build the registry.
    ///
    /// Rejects: an empty list, duplicate ids, zero or several stars, a star
    /// off the origin, non-finite numbers, non-positive radii, and planets
    /// whose orbital radius does not strictly increase in list order.
    pub fn from_configs(configs: &[BodyConfig]) -> Result<Self, OrreryError> {
        if configs.is_empty() {
            return Err(OrreryError::EmptyRegistry);
        }

        let mut bodies = Vec::with_capacity(configs.len());
        let mut by_id = HashMap::with_capacity(configs.len());
        let mut star: Option<BodyHandle> = None;
        let mut previous_orbit: Option<(usize, f32)> = None;

        for (i, config) in configs.iter().enumerate() {
            let handle = BodyHandle(i as u32);
            let body = resolve_body(config)?;

            if by_id.insert(body.id.clone(), handle).is_some() {
                return Err(OrreryError::DuplicateBodyId(body.id));
            }

            if body.is_star() {
                if let Some(first) = star {
                    let first: &CelestialBody = &bodies[first.index()];
                    return Err(OrreryError::MultipleStars {
                        first: first.id.clone(),
                        second: body.id,
                    });
                }
                if body.orbital_radius != 0.0 {
                    return Err(OrreryError::StarNotAtOrigin {
                        id: body.id,
                        radius: body.orbital_radius,
                    });
                }
                star = Some(handle);
            } else {
                if body.orbital_radius <= 0.0 {
                    return Err(OrreryError::InvalidBody {
                        id: body.id,
                        reason: "orbital radius must be positive",
                    });
                }
                if let Some((prev_index, prev_radius)) = previous_orbit {
                    if body.orbital_radius <= prev_radius {
                        let previous_body: &CelestialBody = &bodies[prev_index];
                        return Err(OrreryError::OrbitOrder {
                            id: body.id,
                            radius: body.orbital_radius,
                            previous_id: previous_body.id.clone(),
                            previous: prev_radius,
                        });
                    }
                }
                previous_orbit = Some((i, body.orbital_radius));
            }

            bodies.push(body);
        }

        let star = star.ok_or(OrreryError::MissingStar)?;
        log::debug!("body registry built: {} bodies", bodies.len());
        Ok(Self { bodies, by_id, star })
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    /// Always false for a successfully built registry.
    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn get(&self, handle: BodyHandle) -> Option<&CelestialBody> {
        self.bodies.get(handle.index())
    }

    pub fn handle_of(&self, id: &str) -> Option<BodyHandle> {
        self.by_id.get(id).copied()
    }

    pub fn by_id(&self, id: &str) -> Option<&CelestialBody> {
        self.handle_of(id).and_then(|h| self.get(h))
    }

    /// The single star.
    pub fn star(&self) -> BodyHandle {
        self.star
    }

    /// Bodies in configuration order, paired with their handles.
    pub fn iter(&self) -> impl Iterator<Item = (BodyHandle, &CelestialBody)> {
        self.bodies
            .iter()
            .enumerate()
            .map(|(i, body)| (BodyHandle(i as u32), body))
    }
}

fn resolve_body(config: &BodyConfig) -> Result<CelestialBody, OrreryError> {
    let invalid = |reason: &'static str| OrreryError::InvalidBody {
        id: config.id.clone(),
        reason,
    };

    if config.id.is_empty() {
        return Err(invalid("id must not be empty"));
    }
    if !config.orbital_radius.is_finite() {
        return Err(invalid("orbital radius must be finite"));
    }
    if !config.angular_speed.is_finite() {
        return Err(invalid("angular speed must be finite"));
    }

    let visual_radius = match (config.visual_radius, config.diameter_km) {
        (Some(r), _) => r,
        (None, Some(d)) if d.is_finite() && d > 0.0 => visual_radius_for_diameter(d),
        (None, Some(_)) => return Err(invalid("diameter must be positive")),
        (None, None) => return Err(OrreryError::MissingVisualRadius(config.id.clone())),
    };
    if !(visual_radius.is_finite() && visual_radius > 0.0) {
        return Err(invalid("visual radius must be positive"));
    }

    Ok(CelestialBody {
        id: config.id.clone(),
        display_name: config.name.clone(),
        kind: config.kind,
        visual_radius,
        orbital_radius: config.orbital_radius,
        angular_speed: config.angular_speed,
        surface: Surface {
            color: config.color,
            texture_url: config.texture.clone().filter(|url| !url.is_empty()),
        },
        facts: config.facts.clone(),
        events: config.events.clone(),
    })
}
