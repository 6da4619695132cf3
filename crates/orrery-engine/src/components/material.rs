use crate::components::body::Color;

/// Host-side handle for a decoded surface image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId(pub u32);

/// How a body's sphere is shaded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Material {
    /// Solid colour. Used until (and unless) a texture arrives.
    Flat(Color),
    /// Surface image, with the colour kept for hosts that cannot sample it.
    Textured { texture: TextureId, fallback: Color },
}

impl Material {
    pub fn color(&self) -> Color {
        match *self {
            Material::Flat(color) => color,
            Material::Textured { fallback, .. } => fallback,
        }
    }

    pub fn texture(&self) -> Option<TextureId> {
        match *self {
            Material::Flat(_) => None,
            Material::Textured { texture, .. } => Some(texture),
        }
    }
}

/// Progress of a body's surface image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextureState {
    /// No image configured; the flat colour is final.
    None,
    /// Requested from the host, result not yet delivered.
    Pending,
    Loaded(TextureId),
    /// Load or decode failed; the flat colour is final.
    Failed(String),
}

impl TextureState {
    pub fn is_pending(&self) -> bool {
        matches!(self, TextureState::Pending)
    }
}
