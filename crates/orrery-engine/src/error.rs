use thiserror::Error;

/// Errors surfaced to the host. All of them are configuration problems
/// detected before any scene construction; runtime asset and input problems
/// are recovered locally and never reach this type.
#[derive(Debug, Error)]
pub enum OrreryError {
    #[error("body configuration is empty")]
    EmptyRegistry,

    #[error("duplicate body id `{0}`")]
    DuplicateBodyId(String),

    #[error("no body has kind `star`")]
    MissingStar,

    #[error("more than one star configured: `{first}` and `{second}`")]
    MultipleStars { first: String, second: String },

    #[error("star `{id}` must have orbital radius 0, got {radius}")]
    StarNotAtOrigin { id: String, radius: f32 },

    #[error("orbital radius of `{id}` ({radius}) must be greater than `{previous_id}` ({previous})")]
    OrbitOrder {
        id: String,
        radius: f32,
        previous_id: String,
        previous: f32,
    },

    #[error("body `{id}`: {reason}")]
    InvalidBody { id: String, reason: &'static str },

    #[error("body `{0}` has neither a visual radius nor a diameter")]
    MissingVisualRadius(String),

    #[error("unknown body `{0}`")]
    UnknownBody(String),

    #[error("invalid colour `{0}`, expected #rrggbb")]
    InvalidColor(String),

    #[error("malformed scene configuration: {0}")]
    Config(#[from] serde_json::Error),
}
