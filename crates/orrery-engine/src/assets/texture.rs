// assets/texture.rs
//
// Seam between the controller and whatever fetches and decodes surface
// images. Requests are fire-and-forget; the host reports back through
// `SceneController::texture_loaded` with the ticket it was given.
//
// A ticket carries the controller generation it was issued under. Results
// for an older generation (the controller was disposed meanwhile) are
// dropped, since most hosts cannot actually abort an in-flight image load.

use std::collections::HashMap;

use crate::api::types::BodyHandle;
use crate::components::material::TextureId;

/// Identifies one texture request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureTicket {
    pub generation: u32,
    pub body: BodyHandle,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureRequest {
    pub ticket: TextureTicket,
    pub body_id: String,
    pub url: String,
}

/// Outcome reported by the host. The error is a human-readable reason.
pub type TextureResult = Result<TextureId, String>;

/// Starts asynchronous image loads.
pub trait TextureLoader {
    fn request(&mut self, request: TextureRequest);

    /// Hint that no outstanding result will be used. Optional.
    fn cancel_all(&mut self) {}
}

/// Loader for hosts without image support: never requests anything, so
/// every body keeps its flat colour.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoTextures;

impl TextureLoader for NoTextures {
    fn request(&mut self, request: TextureRequest) {
        log::debug!("texture for `{}` not requested (no loader)", request.body_id);
    }
}

/// Supplies a texture URL for bodies whose configuration has none.
pub trait ImageSource {
    fn texture_url(&self, body_id: &str) -> Option<String>;
}

/// Map-backed [`ImageSource`].
#[derive(Debug, Default, Clone)]
pub struct StaticImageSource {
    urls: HashMap<String, String>,
}

impl StaticImageSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, body_id: impl Into<String>, url: impl Into<String>) -> Self {
        self.insert(body_id, url);
        self
    }

    pub fn insert(&mut self, body_id: impl Into<String>, url: impl Into<String>) {
        self.urls.insert(body_id.into(), url.into());
    }
}

impl ImageSource for StaticImageSource {
    fn texture_url(&self, body_id: &str) -> Option<String> {
        self.urls.get(body_id).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_source_lookup() {
        let source = StaticImageSource::new().with("mars", "mars.jpg");
        assert_eq!(source.texture_url("mars").as_deref(), Some("mars.jpg"));
        assert_eq!(source.texture_url("venus"), None);
    }

    #[test]
    fn tickets_compare_by_generation_and_body() {
        let a = TextureTicket { generation: 1, body: BodyHandle(2) };
        let b = TextureTicket { generation: 2, body: BodyHandle(2) };
        assert_ne!(a, b);
        assert_eq!(a, TextureTicket { generation: 1, body: BodyHandle(2) });
    }
}
