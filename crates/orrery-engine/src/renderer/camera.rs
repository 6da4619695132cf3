use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec2, Vec3};

use crate::api::types::BodyHandle;
use crate::assets::config::CameraOptions;
use crate::extensions::tween::Lerp;
use crate::systems::picking::Ray;

const HALF_PI: f32 = std::f32::consts::FRAC_PI_2;

/// Clamp ranges and input gains for the free orbit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitLimits {
    pub min_distance: f32,
    pub max_distance: f32,
    /// Radians per pixel of drag, both axes.
    pub rotate_sensitivity: f32,
    /// Distance units per wheel delta unit.
    pub zoom_sensitivity: f32,
}

impl OrbitLimits {
    pub fn from_options(options: &CameraOptions) -> Self {
        let (min_distance, max_distance) = if options.min_distance <= options.max_distance {
            (options.min_distance, options.max_distance)
        } else {
            (options.max_distance, options.min_distance)
        };
        Self {
            min_distance,
            max_distance,
            rotate_sensitivity: options.rotate_sensitivity,
            zoom_sensitivity: options.zoom_sensitivity,
        }
    }
}

impl Default for OrbitLimits {
    fn default() -> Self {
        Self::from_options(&CameraOptions::default())
    }
}

/// Spherical camera state around the star.
///
/// This is the source of truth for the free camera; the absolute pose is
/// always derived from it (see [`free_orbit_pose`]), so it can never leave
/// its clamped ranges.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraOrbitState {
    yaw: f32,
    pitch: f32,
    distance: f32,
    focus_target: Option<BodyHandle>,
    is_animating_focus: bool,
    limits: OrbitLimits,
}

impl CameraOrbitState {
    pub fn new(yaw: f32, pitch: f32, distance: f32, limits: OrbitLimits) -> Self {
        Self {
            yaw,
            pitch: pitch.clamp(-HALF_PI, HALF_PI),
            distance: distance.clamp(limits.min_distance, limits.max_distance),
            focus_target: None,
            is_animating_focus: false,
            limits,
        }
    }

    pub fn from_options(options: &CameraOptions) -> Self {
        Self::new(
            options.initial_yaw,
            options.initial_pitch,
            options.initial_distance,
            OrbitLimits::from_options(options),
        )
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    pub fn focus_target(&self) -> Option<BodyHandle> {
        self.focus_target
    }

    pub fn is_animating_focus(&self) -> bool {
        self.is_animating_focus
    }

    pub fn limits(&self) -> &OrbitLimits {
        &self.limits
    }

    /// True when neither a focus nor a fly animation owns the camera.
    pub fn accepts_orbit_input(&self) -> bool {
        self.focus_target.is_none() && !self.is_animating_focus
    }

    /// Apply a drag delta in pixels.
    pub fn orbit_by(&mut self, dx: f32, dy: f32) {
        self.yaw += dx * self.limits.rotate_sensitivity;
        self.pitch = (self.pitch + dy * self.limits.rotate_sensitivity).clamp(-HALF_PI, HALF_PI);
    }

    /// Apply a wheel delta.
    pub fn zoom_by(&mut self, delta: f32) {
        self.distance = (self.distance + delta * self.limits.zoom_sensitivity)
            .clamp(self.limits.min_distance, self.limits.max_distance);
    }

    /// Mirror the focus machine's view of who owns the camera.
    pub fn set_focus(&mut self, target: Option<BodyHandle>, animating: bool) {
        self.focus_target = target;
        self.is_animating_focus = animating;
    }
}

/// Camera position plus look-at target, both in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub position: Vec3,
    pub target: Vec3,
}

impl CameraPose {
    pub fn new(position: Vec3, target: Vec3) -> Self {
        Self { position, target }
    }

    /// Unit viewing direction. Falls back to -Z for a degenerate pose.
    pub fn forward(&self) -> Vec3 {
        (self.target - self.position).normalize_or(Vec3::NEG_Z)
    }

    pub fn approx_eq(&self, other: &CameraPose, eps: f32) -> bool {
        self.position.abs_diff_eq(other.position, eps) && self.target.abs_diff_eq(other.target, eps)
    }
}

impl Lerp for CameraPose {
    fn lerp(self, to: Self, t: f32) -> Self {
        Self {
            position: self.position.lerp(to.position, t),
            target: self.target.lerp(to.target, t),
        }
    }
}

/// Free-orbit pose around `centre`: a pure function of the orbit state.
pub fn free_orbit_pose(state: &CameraOrbitState, centre: Vec3) -> CameraPose {
    let (sin_yaw, cos_yaw) = state.yaw.sin_cos();
    let (sin_pitch, cos_pitch) = state.pitch.sin_cos();
    let offset = Vec3::new(sin_yaw * cos_pitch, sin_pitch, cos_yaw * cos_pitch) * state.distance;
    CameraPose::new(centre + offset, centre)
}

/// Up vector for `look_at`, swapped out when the view runs along the Y axis.
fn up_for(forward: Vec3) -> Vec3 {
    if forward.dot(Vec3::Y).abs() > 0.9999 {
        Vec3::NEG_Z
    } else {
        Vec3::Y
    }
}

/// Perspective projection plus the viewport it maps onto.
#[derive(Debug, Clone, PartialEq)]
pub struct Projection {
    pub fov_y: f32,
    pub near: f32,
    pub far: f32,
    viewport: Vec2,
}

/// GPU-side uniform data for the camera.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct CameraUniform {
    pub view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
    /// xyz = eye position, w unused.
    pub eye: [f32; 4],
}

impl CameraUniform {
    pub const FLOATS: usize = 36;
}

impl Projection {
    pub fn new(fov_y_degrees: f32, near: f32, far: f32) -> Self {
        Self {
            fov_y: fov_y_degrees.to_radians(),
            near,
            far,
            viewport: Vec2::ONE,
        }
    }

    pub fn from_options(options: &CameraOptions) -> Self {
        Self::new(options.fov_y_degrees, options.near, options.far)
    }

    /// Update the viewport. Zero-sized viewports are kept at one pixel.
    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.viewport = Vec2::new(width.max(1.0), height.max(1.0));
    }

    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    pub fn aspect(&self) -> f32 {
        self.viewport.x / self.viewport.y
    }

    /// Pixel coordinates (origin top-left) to normalized device coordinates.
    pub fn ndc(&self, pixel: Vec2) -> Vec2 {
        Vec2::new(
            pixel.x / self.viewport.x * 2.0 - 1.0,
            1.0 - pixel.y / self.viewport.y * 2.0,
        )
    }

    pub fn view_matrix(&self, pose: &CameraPose) -> Mat4 {
        Mat4::look_at_rh(pose.position, pose.target, up_for(pose.forward()))
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov_y, self.aspect(), self.near, self.far)
    }

    pub fn uniform(&self, pose: &CameraPose) -> CameraUniform {
        CameraUniform {
            view: self.view_matrix(pose).to_cols_array_2d(),
            projection: self.projection_matrix().to_cols_array_2d(),
            eye: pose.position.extend(1.0).to_array(),
        }
    }

    /// Pixel position of a world point, or `None` when it is behind the eye.
    pub fn project(&self, pose: &CameraPose, world: Vec3) -> Option<Vec2> {
        let clip = self.projection_matrix() * self.view_matrix(pose) * world.extend(1.0);
        if clip.w <= 0.0 {
            return None;
        }
        let ndc = clip.truncate() / clip.w;
        Some(Vec2::new(
            (ndc.x + 1.0) * 0.5 * self.viewport.x,
            (1.0 - ndc.y) * 0.5 * self.viewport.y,
        ))
    }

    /// World-space ray from the eye through `ndc`.
    pub fn ray(&self, pose: &CameraPose, ndc: Vec2) -> Ray {
        let forward = pose.forward();
        let right = forward.cross(up_for(forward)).normalize_or(Vec3::X);
        let up = right.cross(forward);
        let half_h = (self.fov_y * 0.5).tan();
        let half_w = half_h * self.aspect();
        let direction = forward + right * (ndc.x * half_w) + up * (ndc.y * half_h);
        Ray::new(pose.position, direction)
    }
}
