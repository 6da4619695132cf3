use serde::{Deserialize, Serialize};
use crate::components::body::{BodyEvent, BodyKind, Color};
use crate::error::OrreryError;

/// Key under which hosts conventionally persist [`DisplaySettings`].
pub const SETTINGS_STORAGE_KEY: &str = "spaceAppSettings";

/// Lowest and highest frame rate the pacer accepts.
pub const MIN_FRAME_RATE: u32 = 1;
pub const MAX_FRAME_RATE: u32 = 240;

/// Complete scene description: bodies plus tuning options.
/// Loaded from JSON at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneConfig {
    pub bodies: Vec<BodyConfig>,
    #[serde(default)]
    pub options: SceneOptions,
}

impl SceneConfig {
    /// Parse a scene from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, OrreryError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Static per-body input, as supplied by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BodyConfig {
    pub id: String,
    pub name: String,
    pub kind: BodyKind,
    /// Render radius. When absent, derived from `diameter_km`.
    #[serde(default)]
    pub visual_radius: Option<f32>,
    /// Real diameter, used only to derive a missing `visual_radius`.
    #[serde(default)]
    pub diameter_km: Option<f32>,
    pub orbital_radius: f32,
    pub angular_speed: f32,
    pub color: Color,
    #[serde(default)]
    pub texture: Option<String>,
    #[serde(default)]
    pub facts: String,
    #[serde(default)]
    pub events: Vec<BodyEvent>,
}

impl BodyConfig {
    /// Minimal body with a flat colour and no facts.
    pub fn new(
        id: impl Into<String>,
        kind: BodyKind,
        visual_radius: f32,
        orbital_radius: f32,
        angular_speed: f32,
        color: Color,
    ) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            kind,
            visual_radius: Some(visual_radius),
            diameter_km: None,
            orbital_radius,
            angular_speed,
            color,
            texture: None,
            facts: String::new(),
            events: Vec::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_texture(mut self, url: impl Into<String>) -> Self {
        self.texture = Some(url.into());
        self
    }

    pub fn with_facts(mut self, facts: impl Into<String>) -> Self {
        self.facts = facts.into();
        self
    }

    pub fn with_events(mut self, events: Vec<BodyEvent>) -> Self {
        self.events = events;
        self
    }
}

/// Orbit-camera tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CameraOptions {
    pub initial_yaw: f32,
    pub initial_pitch: f32,
    pub initial_distance: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    /// Radians per pixel of drag.
    pub rotate_sensitivity: f32,
    /// Distance units per wheel delta unit.
    pub zoom_sensitivity: f32,
    /// Vertical field of view in degrees.
    pub fov_y_degrees: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            initial_yaw: 0.0,
            initial_pitch: 0.0,
            initial_distance: 50.0,
            min_distance: 10.0,
            max_distance: 100.0,
            rotate_sensitivity: 0.01,
            zoom_sensitivity: 0.01,
            fov_y_degrees: 75.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

/// Fly-to tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FocusOptions {
    pub duration_ms: f64,
    /// Camera distance from the star when focused on it.
    pub star_distance: f32,
    /// Camera distance from any other body when focused on it.
    pub body_distance: f32,
}

impl Default for FocusOptions {
    fn default() -> Self {
        Self {
            duration_ms: 2000.0,
            star_distance: 15.0,
            body_distance: 8.0,
        }
    }
}

/// Background point cloud.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StarfieldOptions {
    pub count: usize,
    /// Half-width of the cube the points are scattered in.
    pub extent: f32,
    pub seed: u64,
    /// Per-frame rotation about X and Y.
    pub spin_x: f32,
    pub spin_y: f32,
}

impl Default for StarfieldOptions {
    fn default() -> Self {
        Self {
            count: 10_000,
            extent: 1000.0,
            seed: 0x5eed_57a2,
            spin_x: 0.0002,
            spin_y: 0.0005,
        }
    }
}

/// Intensity and range of the scene's point lights.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LightOptions {
    pub star_intensity: f32,
    pub star_range: f32,
    pub body_intensity: f32,
    pub body_range: f32,
}

impl Default for LightOptions {
    fn default() -> Self {
        Self {
            star_intensity: 2.0,
            star_range: 100.0,
            body_intensity: 0.5,
            body_range: 20.0,
        }
    }
}

/// Everything tunable about the controller besides the bodies themselves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SceneOptions {
    pub target_frame_rate: u32,
    /// Orbital radians per millisecond per unit of angular speed.
    pub orbit_time_scale: f64,
    /// Pointer travel (pixels) below which a press-release counts as a click.
    pub click_threshold_px: f32,
    pub camera: CameraOptions,
    pub focus: FocusOptions,
    pub starfield: StarfieldOptions,
    pub lights: LightOptions,
}

impl Default for SceneOptions {
    fn default() -> Self {
        Self {
            target_frame_rate: 30,
            orbit_time_scale: 0.001,
            click_threshold_px: 5.0,
            camera: CameraOptions::default(),
            focus: FocusOptions::default(),
            starfield: StarfieldOptions::default(),
            lights: LightOptions::default(),
        }
    }
}

impl SceneOptions {
    pub fn with_frame_rate(mut self, fps: u32) -> Self {
        self.target_frame_rate = fps;
        self
    }
}

/// User-facing display preferences that survive across sessions.
/// The engine only (de)serializes them; storing them is the host's job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    /// Target frames per second.
    pub frames: u32,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self { frames: 30 }
    }
}

impl DisplaySettings {
    /// Parse stored settings, falling back to defaults for anything
    /// missing or unreadable.
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str::<DisplaySettings>(json) {
            Ok(settings) => settings.sanitized(),
            Err(err) => {
                log::warn!("ignoring unreadable display settings: {}", err);
                Self::default()
            }
        }
    }

    pub fn to_json(&self) -> String {
        format!("{{\"frames\":{}}}", self.frames)
    }

    fn sanitized(self) -> Self {
        Self {
            frames: self.frames.clamp(MIN_FRAME_RATE, MAX_FRAME_RATE),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_minimal_scene() {
        let json = r##"{
            "bodies": [
                { "id": "sun", "name": "Sun", "kind": "star",
                  "visualRadius": 5, "orbitalRadius": 0, "angularSpeed": 0.005,
                  "color": "#ffff00" },
                { "id": "mars", "name": "Mars", "kind": "terrestrial",
                  "diameterKm": 6792, "orbitalRadius": 20, "angularSpeed": 0.005,
                  "color": "#ff4500", "texture": "mars.jpg",
                  "events": [ { "name": "Curiosity", "year": 2011 } ] }
            ]
        }"##;
        let scene = SceneConfig::from_json(json).unwrap();
        assert_eq!(scene.bodies.len(), 2);
        assert_eq!(scene.bodies[0].visual_radius, Some(5.0));
        assert_eq!(scene.bodies[1].visual_radius, None);
        assert_eq!(scene.bodies[1].diameter_km, Some(6792.0));
        assert_eq!(scene.bodies[1].texture.as_deref(), Some("mars.jpg"));
        assert_eq!(scene.bodies[1].events[0], BodyEvent::new("Curiosity", 2011));
        assert_eq!(scene.options, SceneOptions::default());
    }

    #[test]
    fn partial_options_keep_defaults() {
        let json = r##"{
            "bodies": [],
            "options": { "targetFrameRate": 60, "camera": { "maxDistance": 200 } }
        }"##;
        let scene = SceneConfig::from_json(json).unwrap();
        assert_eq!(scene.options.target_frame_rate, 60);
        assert_eq!(scene.options.camera.max_distance, 200.0);
        assert_eq!(scene.options.camera.min_distance, 10.0);
        assert_eq!(scene.options.focus.duration_ms, 2000.0);
    }

    #[test]
    fn malformed_scene_is_a_config_error() {
        let err = SceneConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, OrreryError::Config(_)));
    }

    #[test]
    fn bad_colour_is_rejected_at_parse_time() {
        let json = r##"{ "bodies": [ { "id": "x", "name": "X", "kind": "star",
            "visualRadius": 1, "orbitalRadius": 0, "angularSpeed": 0, "color": "yellow" } ] }"##;
        assert!(SceneConfig::from_json(json).is_err());
    }

    #[test]
    fn display_settings_round_trip() {
        let settings = DisplaySettings { frames: 60 };
        assert_eq!(DisplaySettings::from_json(&settings.to_json()), settings);
    }

    #[test]
    fn display_settings_tolerate_garbage() {
        assert_eq!(DisplaySettings::from_json("nonsense"), DisplaySettings::default());
        assert_eq!(DisplaySettings::from_json("{}"), DisplaySettings::default());
        assert_eq!(DisplaySettings::from_json("{\"frames\":0}").frames, MIN_FRAME_RATE);
        assert_eq!(DisplaySettings::from_json("{\"frames\":10000}").frames, MAX_FRAME_RATE);
    }
}
