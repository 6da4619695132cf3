pub mod instance;
pub mod camera;
pub mod traits;

// Re-export key types for convenient access
pub use camera::{free_orbit_pose, CameraOrbitState, CameraPose, CameraUniform, OrbitLimits, Projection};
pub use instance::{BodyInstance, InstanceBuffer};
pub use traits::{FrameData, Renderer};
