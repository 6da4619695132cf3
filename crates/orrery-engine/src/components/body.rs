use serde::{Deserialize, Serialize};
use crate::error::OrreryError;

/// Diameter of the reference body (Earth) in kilometres.
pub const REFERENCE_DIAMETER_KM: f32 = 12_756.0;
/// Render radius of the reference body.
pub const REFERENCE_VISUAL_RADIUS: f32 = 1.3;
/// Smallest and largest render radius a derived size may take.
pub const MIN_VISUAL_RADIUS: f32 = 0.5;
pub const MAX_VISUAL_RADIUS: f32 = 6.0;

/// Broad classification of a body. Exactly one `Star` per registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BodyKind {
    Star,
    Terrestrial,
    GasGiant,
    IceGiant,
}

impl BodyKind {
    pub fn is_star(self) -> bool {
        self == BodyKind::Star
    }
}

/// Linear RGB colour, each channel in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const WHITE: Color = Color { r: 1.0, g: 1.0, b: 1.0 };

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Build from a packed `0xRRGGBB` value.
    pub fn from_hex(rgb: u32) -> Self {
        Self {
            r: ((rgb >> 16) & 0xff) as f32 / 255.0,
            g: ((rgb >> 8) & 0xff) as f32 / 255.0,
            b: (rgb & 0xff) as f32 / 255.0,
        }
    }

    /// Pack back into `0xRRGGBB`.
    pub fn to_hex(self) -> u32 {
        let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u32;
        (channel(self.r) << 16) | (channel(self.g) << 8) | channel(self.b)
    }

    /// Parse `#rrggbb`.
    pub fn parse(text: &str) -> Result<Self, OrreryError> {
        let digits = text
            .strip_prefix('#')
            .filter(|d| d.len() == 6)
            .ok_or_else(|| OrreryError::InvalidColor(text.to_string()))?;
        u32::from_str_radix(digits, 16)
            .map(Self::from_hex)
            .map_err(|_| OrreryError::InvalidColor(text.to_string()))
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }
}

impl TryFrom<String> for Color {
    type Error = OrreryError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Color::parse(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        format!("#{:06x}", color.to_hex())
    }
}

/// Appearance of a body: a flat colour always, plus an optional surface image.
/// The colour doubles as the placeholder while the image loads and as the
/// fallback if it never does.
#[derive(Debug, Clone, PartialEq)]
pub struct Surface {
    pub color: Color,
    pub texture_url: Option<String>,
}

/// A named event tied to a body (a mission launch, a flyby).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BodyEvent {
    pub name: String,
    pub year: i32,
}

impl BodyEvent {
    pub fn new(name: impl Into<String>, year: i32) -> Self {
        Self {
            name: name.into(),
            year,
        }
    }
}

/// One orbitable entity. Immutable once the registry is built; only its
/// transient pose (held by the scene graph) changes per frame.
#[derive(Debug, Clone, PartialEq)]
pub struct CelestialBody {
    pub id: String,
    pub display_name: String,
    pub kind: BodyKind,
    /// Render-space sphere radius.
    pub visual_radius: f32,
    /// Render-space distance from the origin; 0 for the star.
    pub orbital_radius: f32,
    /// Per-frame spin increment, also scales the orbital angular velocity.
    pub angular_speed: f32,
    pub surface: Surface,
    pub facts: String,
    pub events: Vec<BodyEvent>,
}

impl CelestialBody {
    pub fn is_star(&self) -> bool {
        self.kind.is_star()
    }
}

/// Map a real diameter to a render radius.
///
/// Square-root compression keeps gas giants from dwarfing the inner planets,
/// and the clamp keeps the smallest bodies clickable.
pub fn visual_radius_for_diameter(diameter_km: f32) -> f32 {
    let ratio = (diameter_km / REFERENCE_DIAMETER_KM).max(0.0);
    (REFERENCE_VISUAL_RADIUS * ratio.sqrt()).clamp(MIN_VISUAL_RADIUS, MAX_VISUAL_RADIUS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_parses_hex_string() {
        let c = Color::parse("#ff8000").unwrap();
        assert!((c.r - 1.0).abs() < 1e-6);
        assert!((c.g - 128.0 / 255.0).abs() < 1e-6);
        assert_eq!(c.b, 0.0);
        assert_eq!(c.to_hex(), 0xff8000);
    }

    #[test]
    fn color_rejects_garbage() {
        assert!(matches!(Color::parse("ff8000"), Err(OrreryError::InvalidColor(_))));
        assert!(matches!(Color::parse("#ff80"), Err(OrreryError::InvalidColor(_))));
        assert!(matches!(Color::parse("#gg0000"), Err(OrreryError::InvalidColor(_))));
    }

    #[test]
    fn color_serde_uses_hex_strings() {
        let c: Color = serde_json::from_str("\"#0077be\"").unwrap();
        assert_eq!(c.to_hex(), 0x0077be);
        assert_eq!(serde_json::to_string(&c).unwrap(), "\"#0077be\"");
    }

    #[test]
    fn body_kind_uses_camel_case() {
        let k: BodyKind = serde_json::from_str("\"gasGiant\"").unwrap();
        assert_eq!(k, BodyKind::GasGiant);
        assert!(BodyKind::Star.is_star());
        assert!(!BodyKind::IceGiant.is_star());
    }

    #[test]
    fn reference_diameter_maps_to_reference_radius() {
        let r = visual_radius_for_diameter(REFERENCE_DIAMETER_KM);
        assert!((r - REFERENCE_VISUAL_RADIUS).abs() < 1e-5);
    }

    #[test]
    fn derived_radius_is_clamped() {
        assert_eq!(visual_radius_for_diameter(1.0), MIN_VISUAL_RADIUS);
        assert_eq!(visual_radius_for_diameter(1_392_700.0), MAX_VISUAL_RADIUS);
        // Jupiter is bigger than Earth but far less than 11x on screen.
        let jupiter = visual_radius_for_diameter(142_984.0);
        assert!(jupiter > REFERENCE_VISUAL_RADIUS && jupiter < 5.0);
    }
}
