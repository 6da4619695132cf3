use serde::Serialize;
use crate::components::body::{BodyEvent, BodyKind, CelestialBody};

/// Index of a body in the registry. Stable for the controller's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyHandle(pub u32);

impl BodyHandle {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Payload handed to focus listeners when a body becomes focused.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FocusDetails {
    pub body_id: String,
    pub display_name: String,
    pub kind: BodyKind,
    /// Render-space distance between the body and the star at the moment
    /// focus settled.
    pub distance_from_star: f32,
    pub facts: String,
    pub events: Vec<BodyEvent>,
}

impl FocusDetails {
    pub fn new(body: &CelestialBody, distance_from_star: f32) -> Self {
        Self {
            body_id: body.id.clone(),
            display_name: body.display_name.clone(),
            kind: body.kind,
            distance_from_star,
            facts: body.facts.clone(),
            events: body.events.clone(),
        }
    }

    pub fn to_json(&self) -> String {
        // Every field is plain data; serialization cannot fail.
        serde_json::to_string(self).unwrap_or_default()
    }
}

/// Live readout for whatever body sits under the pointer.
#[derive(Debug, Clone, PartialEq)]
pub struct HoverReadout {
    pub body: BodyHandle,
    pub body_id: String,
    pub distance_from_star: f32,
}

/// What the host should do after a `frame` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Too early for the target frame rate; nothing changed.
    Skipped,
    /// Bodies advanced and exactly one draw was issued.
    Committed,
    /// The controller has been disposed; stop scheduling frames.
    Stopped,
}

impl FrameOutcome {
    pub fn keep_running(self) -> bool {
        self != FrameOutcome::Stopped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::body::{Color, Surface};

    #[test]
    fn focus_details_serialize_camel_case() {
        let body = CelestialBody {
            id: "mars".into(),
            display_name: "Mars".into(),
            kind: BodyKind::Terrestrial,
            visual_radius: 1.1,
            orbital_radius: 20.0,
            angular_speed: 0.005,
            surface: Surface { color: Color::from_hex(0xff4500), texture_url: None },
            facts: "Red".into(),
            events: vec![BodyEvent::new("Curiosity", 2011)],
        };
        let json = FocusDetails::new(&body, 20.0).to_json();
        assert!(json.contains("\"bodyId\":\"mars\""));
        assert!(json.contains("\"distanceFromStar\":20.0"));
        assert!(json.contains("\"kind\":\"terrestrial\""));
        assert!(json.contains("\"year\":2011"));
    }

    #[test]
    fn only_stopped_ends_the_loop() {
        assert!(FrameOutcome::Skipped.keep_running());
        assert!(FrameOutcome::Committed.keep_running());
        assert!(!FrameOutcome::Stopped.keep_running());
    }
}
