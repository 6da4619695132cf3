pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod renderer;
pub mod input;
pub mod assets;
pub mod extensions;
pub mod error;

// Re-export key types at crate root for convenience
pub use api::controller::{FocusListener, SceneController};
pub use api::types::{BodyHandle, FocusDetails, FrameOutcome, HoverReadout};
pub use assets::catalog::{solar_system, solar_system_bodies};
pub use assets::config::{
    BodyConfig, CameraOptions, DisplaySettings, FocusOptions, LightOptions, SceneConfig,
    SceneOptions, StarfieldOptions, SETTINGS_STORAGE_KEY,
};
pub use assets::texture::{
    ImageSource, NoTextures, StaticImageSource, TextureLoader, TextureRequest, TextureResult,
    TextureTicket,
};
pub use components::body::{BodyEvent, BodyKind, CelestialBody, Color, Surface};
pub use components::material::{Material, TextureId, TextureState};
pub use components::node::{BodyNode, MeshId};
pub use core::registry::BodyRegistry;
pub use core::scene::SceneGraph;
pub use core::time::{FramePacer, Pace};
pub use error::OrreryError;
pub use input::{InputEvent, PointerTracker};
pub use renderer::{
    free_orbit_pose, BodyInstance, CameraOrbitState, CameraPose, CameraUniform, FrameData,
    InstanceBuffer, OrbitLimits, Projection, Renderer,
};
pub use systems::focus::{FocusMachine, FocusPhase, FocusSignal};
pub use systems::lighting::{LightState, PointLight};
pub use systems::picking::{pick_nearest, ray_sphere, PickTarget, Ray};
pub use systems::starfield::{StarPoint, Starfield};

// Extensions — decoupled animation helpers
pub use extensions::{Easing, Lerp, Tween, TweenStatus};
