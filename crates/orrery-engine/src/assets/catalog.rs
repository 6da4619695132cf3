// assets/catalog.rs
//
// Built-in dataset: the Sun and the eight planets in render units.
// Distances, sizes and speeds are presentation values, not physical ones.

use crate::assets::config::{BodyConfig, SceneConfig, SceneOptions};
use crate::components::body::{BodyEvent, BodyKind, Color};

const TEXTURE_BASE: &str = "https://raw.githubusercontent.com/mrdoob/three.js/dev/examples/textures/planets";

struct Planet {
    id: &'static str,
    name: &'static str,
    kind: BodyKind,
    distance: f32,
    size: f32,
    color: u32,
    speed: f32,
    texture: Option<&'static str>,
    facts: &'static str,
}

const PLANETS: [Planet; 8] = [
    Planet {
        id: "mercury", name: "Mercury", kind: BodyKind::Terrestrial,
        distance: 8.0, size: 0.8, color: 0x8c7853, speed: 0.01, texture: None,
        facts: "Mercury is the smallest and innermost planet in the Solar System. It has no moons and no atmosphere.",
    },
    Planet {
        id: "venus", name: "Venus", kind: BodyKind::Terrestrial,
        distance: 12.0, size: 1.2, color: 0xffd700, speed: 0.008, texture: None,
        facts: "Venus is the second planet from the Sun and is Earth's closest planetary neighbor. It's one of the four inner, terrestrial planets.",
    },
    Planet {
        id: "earth", name: "Earth", kind: BodyKind::Terrestrial,
        distance: 16.0, size: 1.3, color: 0x0077be, speed: 0.006, texture: Some("earth_atmos_2048.jpg"),
        facts: "Earth is the third planet from the Sun and the only astronomical object known to harbor life. It has one natural satellite, the Moon.",
    },
    Planet {
        id: "mars", name: "Mars", kind: BodyKind::Terrestrial,
        distance: 20.0, size: 1.1, color: 0xff4500, speed: 0.005, texture: Some("mars_1k_color.jpg"),
        facts: "Mars is the fourth planet from the Sun and the second-smallest planet in the Solar System. It's often called the \"Red Planet\" due to its reddish appearance.",
    },
    Planet {
        id: "jupiter", name: "Jupiter", kind: BodyKind::GasGiant,
        distance: 28.0, size: 2.5, color: 0xffa500, speed: 0.003, texture: Some("jupiter_1k.jpg"),
        facts: "Jupiter is the fifth planet from the Sun and the largest in the Solar System. It is a gas giant with a mass more than two and a half times that of all the other planets combined.",
    },
    Planet {
        id: "saturn", name: "Saturn", kind: BodyKind::GasGiant,
        distance: 36.0, size: 2.2, color: 0xffd700, speed: 0.002, texture: None,
        facts: "Saturn is the sixth planet from the Sun and the second-largest in the Solar System, after Jupiter. It is known for its distinctive ring system.",
    },
    Planet {
        id: "uranus", name: "Uranus", kind: BodyKind::IceGiant,
        distance: 44.0, size: 1.8, color: 0x00ffff, speed: 0.0015, texture: None,
        facts: "Uranus is the seventh planet from the Sun. It has the third-largest diameter in our solar system and was the first planet discovered with a telescope.",
    },
    Planet {
        id: "neptune", name: "Neptune", kind: BodyKind::IceGiant,
        distance: 52.0, size: 1.7, color: 0x0000ff, speed: 0.001, texture: None,
        facts: "Neptune is the eighth and farthest known planet from the Sun. It was the first planet located through mathematical calculations rather than observation.",
    },
];

fn missions(id: &str) -> Vec<BodyEvent> {
    let list: &[(&str, i32)] = match id {
        "mars" => &[("Perseverance", 2020), ("Curiosity", 2011), ("Opportunity", 2003), ("Spirit", 2003)],
        "jupiter" => &[("Juno", 2011), ("Galileo", 1989), ("Voyager 1", 1977), ("Voyager 2", 1977)],
        "saturn" => &[("Cassini", 1997), ("Voyager 1", 1977), ("Voyager 2", 1977)],
        "earth" => &[("Apollo Program", 1961), ("Space Shuttle", 1981), ("ISS", 1998)],
        _ => &[],
    };
    list.iter().map(|&(name, year)| BodyEvent::new(name, year)).collect()
}

/// Sun plus the eight planets, star first.
pub fn solar_system_bodies() -> Vec<BodyConfig> {
    let sun = BodyConfig::new("sun", BodyKind::Star, 5.0, 0.0, 0.005, Color::from_hex(0xffff00))
        .with_name("Sun")
        .with_facts(
            "The Sun is the star at the center of our Solar System. It contains 99.86% of the \
             system's mass and provides the energy that sustains life on Earth.",
        );

    std::iter::once(sun)
        .chain(PLANETS.iter().map(|p| {
            let mut config = BodyConfig::new(p.id, p.kind, p.size, p.distance, p.speed, Color::from_hex(p.color))
                .with_name(p.name)
                .with_facts(p.facts)
                .with_events(missions(p.id));
            if let Some(file) = p.texture {
                config = config.with_texture(format!("{}/{}", TEXTURE_BASE, file));
            }
            config
        }))
        .collect()
}

/// The built-in scene with default options.
pub fn solar_system() -> SceneConfig {
    SceneConfig {
        bodies: solar_system_bodies(),
        options: SceneOptions::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::registry::BodyRegistry;

    #[test]
    fn catalog_is_a_valid_registry() {
        let reg = BodyRegistry::from_configs(&solar_system_bodies()).unwrap();
        assert_eq!(reg.len(), 9);
        assert_eq!(reg.get(reg.star()).map(|b| b.id.as_str()), Some("sun"));
    }

    #[test]
    fn missions_attached_to_the_right_planets() {
        let bodies = solar_system_bodies();
        let mars = bodies.iter().find(|b| b.id == "mars").unwrap();
        assert_eq!(mars.events.len(), 4);
        assert_eq!(mars.events[0], BodyEvent::new("Perseverance", 2020));
        let venus = bodies.iter().find(|b| b.id == "venus").unwrap();
        assert!(venus.events.is_empty());
    }

    #[test]
    fn three_planets_have_textures() {
        let textured: Vec<_> = solar_system_bodies()
            .into_iter()
            .filter(|b| b.texture.is_some())
            .map(|b| b.id)
            .collect();
        assert_eq!(textured, ["earth", "mars", "jupiter"]);
    }

    #[test]
    fn catalog_survives_json() {
        let scene = solar_system();
        let json = serde_json::to_string(&scene).unwrap();
        let back = SceneConfig::from_json(&json).unwrap();
        assert_eq!(back.bodies, scene.bodies);
    }
}
