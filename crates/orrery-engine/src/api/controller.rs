// api/controller.rs
//
// The orbit scene controller: one instance owns the registry, the scene, the
// camera, the focus machine and the frame pacer. Hosts drive it with three
// kinds of calls:
//   - `frame(now)` on every animation callback,
//   - `handle_input(event, now)` for every pointer/wheel event, in order,
//   - `texture_loaded(ticket, result)` when an image request settles.
// All time is passed in explicitly (host milliseconds), so the controller
// is deterministic and testable without a clock or a rendering context.

use std::sync::atomic::{AtomicU32, Ordering};

use glam::{Vec2, Vec3};

use crate::api::types::{BodyHandle, FocusDetails, FrameOutcome, HoverReadout};
use crate::assets::config::{BodyConfig, SceneConfig, SceneOptions};
use crate::assets::texture::{ImageSource, TextureLoader, TextureRequest, TextureResult, TextureTicket};
use crate::core::registry::BodyRegistry;
use crate::core::scene::SceneGraph;
use crate::core::time::{FramePacer, Pace};
use crate::error::OrreryError;
use crate::input::pointer::{InputEvent, PointerTracker};
use crate::renderer::camera::{free_orbit_pose, CameraOrbitState, CameraPose, Projection};
use crate::renderer::instance::{BodyInstance, InstanceBuffer};
use crate::renderer::traits::{FrameData, Renderer};
use crate::systems::focus::{FocusMachine, FocusPhase, FocusSignal, FocusTarget, PickResponse};
use crate::systems::orbit::{advance_bodies, OrbitClock};
use crate::systems::picking::pick_nearest;

/// Called with the focused body's details when focus settles, and with
/// `None` when focus has been released.
pub type FocusListener = Box<dyn FnMut(Option<&FocusDetails>)>;

/// Source of controller generations. Unique per process, so a texture
/// ticket can never be mistaken for one issued by another instance.
static NEXT_GENERATION: AtomicU32 = AtomicU32::new(1);

fn next_generation() -> u32 {
    NEXT_GENERATION.fetch_add(1, Ordering::Relaxed)
}

pub struct SceneController<R: Renderer, T: TextureLoader> {
    registry: BodyRegistry,
    scene: SceneGraph,
    orbit: CameraOrbitState,
    projection: Projection,
    focus: FocusMachine,
    pointer: PointerTracker,
    pacer: FramePacer,
    clock: OrbitClock,
    instances: InstanceBuffer,
    /// Pose of the last committed frame: what the user is looking at.
    pose: CameraPose,
    hover: Option<HoverReadout>,
    focused: Option<FocusDetails>,
    listeners: Vec<FocusListener>,
    renderer: R,
    textures: T,
    generation: u32,
    live: bool,
    committed_frames: u64,
}

impl<R: Renderer, T: TextureLoader> SceneController<R, T> {
    /// Validate the bodies, build the scene and request textures.
    ///
    /// Configuration errors are returned before anything is built or drawn.
    pub fn initialize(
        bodies: &[BodyConfig],
        options: SceneOptions,
        renderer: R,
        textures: T,
    ) -> Result<Self, OrreryError> {
        let registry = BodyRegistry::from_configs(bodies)?;
        let scene = SceneGraph::build(&registry, &options);
        let orbit = CameraOrbitState::from_options(&options.camera);
        let pose = free_orbit_pose(&orbit, scene.star_position());

        let mut controller = Self {
            projection: Projection::from_options(&options.camera),
            focus: FocusMachine::new(options.focus),
            pointer: PointerTracker::new(options.click_threshold_px),
            pacer: FramePacer::new(options.target_frame_rate),
            clock: OrbitClock::new(options.orbit_time_scale),
            instances: InstanceBuffer::with_capacity(registry.len()),
            pose,
            hover: None,
            focused: None,
            listeners: Vec::new(),
            renderer,
            textures,
            generation: next_generation(),
            live: true,
            committed_frames: 0,
            registry,
            scene,
            orbit,
        };
        controller.request_textures();

        log::info!(
            "orrery initialized: {} bodies, {} fps, renderer `{}`",
            controller.registry.len(),
            controller.pacer.target_fps(),
            controller.renderer.backend()
        );
        Ok(controller)
    }

    /// Like [`initialize`](Self::initialize), but bodies without a texture
    /// URL (absent or empty) ask `images` for one first.
    pub fn with_image_source(
        bodies: &[BodyConfig],
        options: SceneOptions,
        renderer: R,
        textures: T,
        images: &dyn ImageSource,
    ) -> Result<Self, OrreryError> {
        let bodies: Vec<BodyConfig> = bodies
            .iter()
            .cloned()
            .map(|mut body| {
                if body.texture.as_deref().map_or(true, str::is_empty) {
                    body.texture = images.texture_url(&body.id);
                }
                body
            })
            .collect();
        Self::initialize(&bodies, options, renderer, textures)
    }

    pub fn from_config(config: SceneConfig, renderer: R, textures: T) -> Result<Self, OrreryError> {
        Self::initialize(&config.bodies, config.options, renderer, textures)
    }

    fn request_textures(&mut self) {
        for (handle, body) in self.registry.iter() {
            if let Some(url) = &body.surface.texture_url {
                self.textures.request(TextureRequest {
                    ticket: TextureTicket {
                        generation: self.generation,
                        body: handle,
                    },
                    body_id: body.id.clone(),
                    url: url.clone(),
                });
            }
        }
    }

    // ── Host operations ──────────────────────────────────────────────

    /// Change the target frame rate. Body phase is untouched: orbital
    /// angles depend only on elapsed time. Returns the rate applied.
    pub fn set_frame_rate(&mut self, fps: u32) -> u32 {
        if !self.live {
            log::debug!("set_frame_rate after dispose ignored");
            return self.pacer.target_fps();
        }
        let applied = self.pacer.set_target_fps(fps);
        log::info!("frame rate set to {} fps", applied);
        applied
    }

    pub fn frame_rate(&self) -> u32 {
        self.pacer.target_fps()
    }

    /// Register a focus listener. Any number may be registered.
    pub fn on_focus_changed<F>(&mut self, listener: F)
    where
        F: FnMut(Option<&FocusDetails>) + 'static,
    {
        if self.live {
            self.listeners.push(Box::new(listener));
        }
    }

    /// Leave focus: fly back to where the camera was before focusing.
    /// Returns false if nothing was focused.
    pub fn request_close(&mut self, now_ms: f64) -> bool {
        if !self.live {
            return false;
        }
        let closing = self.focus.request_close(self.pose, now_ms);
        self.sync_orbit_focus();
        closing
    }

    /// Programmatic pick, as if the user clicked the body.
    pub fn focus_body(&mut self, id: &str, now_ms: f64) -> Result<(), OrreryError> {
        if !self.live {
            return Ok(());
        }
        let body = self
            .registry
            .handle_of(id)
            .ok_or_else(|| OrreryError::UnknownBody(id.to_string()))?;
        self.pick_body(body, now_ms);
        Ok(())
    }

    /// Process one input event. Events take effect immediately; the camera
    /// pose they imply is drawn on the next committed frame.
    pub fn handle_input(&mut self, event: InputEvent, now_ms: f64) {
        if !self.live {
            return;
        }
        match event {
            InputEvent::PointerDown { x, y } => self.pointer.down(Vec2::new(x, y)),
            InputEvent::PointerMove { x, y } => {
                let pos = Vec2::new(x, y);
                if let Some(delta) = self.pointer.moved(pos) {
                    if self.orbit.accepts_orbit_input() {
                        self.orbit.orbit_by(delta.x, delta.y);
                    }
                }
                self.update_hover(pos);
            }
            InputEvent::PointerUp { x, y } => {
                if let Some(click) = self.pointer.up(Vec2::new(x, y)) {
                    self.click(click, now_ms);
                }
            }
            InputEvent::Wheel { delta_y } => {
                if self.orbit.accepts_orbit_input() {
                    self.orbit.zoom_by(delta_y);
                }
            }
        }
    }

    /// The viewport changed size. Only the projection is affected.
    pub fn resize(&mut self, width: u32, height: u32) {
        if !self.live {
            return;
        }
        self.projection.set_viewport(width as f32, height as f32);
        self.renderer.resize(width, height);
    }

    /// Deliver the outcome of a texture request. Returns true if it was
    /// applied. Results for a disposed controller or an unknown ticket are
    /// dropped; failures keep the flat colour.
    pub fn texture_loaded(&mut self, ticket: TextureTicket, result: TextureResult) -> bool {
        if !self.live || ticket.generation != self.generation {
            log::debug!("dropping stale texture result for body {}", ticket.body.0);
            return false;
        }
        let Some(body) = self.registry.get(ticket.body) else {
            return false;
        };
        match result {
            Ok(texture) if texture.0 > BodyInstance::MAX_TEXTURE_ID => {
                log::warn!(
                    "texture id {} for `{}` exceeds {}; keeping flat colour",
                    texture.0,
                    body.id,
                    BodyInstance::MAX_TEXTURE_ID
                );
                self.scene
                    .fail_texture(ticket.body, format!("texture id {} out of range", texture.0))
            }
            Ok(texture) => self.scene.apply_texture(ticket.body, texture),
            Err(reason) => {
                log::warn!(
                    "texture for `{}` failed ({}); keeping flat colour",
                    body.id,
                    reason
                );
                self.scene.fail_texture(ticket.body, reason)
            }
        }
    }

    /// One animation callback. Commits (animates and draws once) only when
    /// the frame interval has elapsed.
    pub fn frame(&mut self, now_ms: f64) -> FrameOutcome {
        if !self.live {
            return FrameOutcome::Stopped;
        }
        self.clock.start(now_ms);
        if self.pacer.poll(now_ms) == Pace::Skip {
            return FrameOutcome::Skipped;
        }

        advance_bodies(self.scene.nodes_mut(), &self.clock, now_ms);
        self.scene.starfield_mut().advance();
        self.scene.sync_lights();

        let star = self.scene.star_position();
        let target = self
            .focus
            .phase()
            .target()
            .and_then(|body| self.scene.position(body))
            .unwrap_or(star);
        let step = self.focus.advance(now_ms, target);
        self.pose = step.pose.unwrap_or_else(|| free_orbit_pose(&self.orbit, star));
        self.sync_orbit_focus();
        if let Some(signal) = step.signal {
            self.dispatch(signal);
        }

        self.draw(now_ms);
        self.committed_frames += 1;
        FrameOutcome::Committed
    }

    /// Tear down. Listeners are dropped, pending textures are orphaned and
    /// graphics resources released. Safe to call more than once.
    pub fn dispose(&mut self) {
        if !self.live {
            return;
        }
        self.live = false;
        self.generation = next_generation();
        self.focus.abandon();
        self.focused = None;
        self.listeners.clear();
        self.pointer.reset();
        self.hover = None;
        self.textures.cancel_all();
        self.renderer.release();
        log::info!("orrery disposed after {} frames", self.committed_frames);
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn is_live(&self) -> bool {
        self.live
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    pub fn phase(&self) -> FocusPhase {
        self.focus.phase()
    }

    /// Details of the settled focus, if any.
    pub fn focused(&self) -> Option<&FocusDetails> {
        self.focused.as_ref()
    }

    pub fn hover(&self) -> Option<&HoverReadout> {
        self.hover.as_ref()
    }

    /// Camera pose of the last committed frame.
    pub fn camera_pose(&self) -> CameraPose {
        self.pose
    }

    pub fn orbit_state(&self) -> &CameraOrbitState {
        &self.orbit
    }

    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    pub fn body_position(&self, id: &str) -> Option<Vec3> {
        self.registry.handle_of(id).and_then(|h| self.scene.position(h))
    }

    pub fn registry(&self) -> &BodyRegistry {
        &self.registry
    }

    pub fn scene(&self) -> &SceneGraph {
        &self.scene
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn textures(&self) -> &T {
        &self.textures
    }

    pub fn committed_frames(&self) -> u64 {
        self.committed_frames
    }

    // ── Internals ────────────────────────────────────────────────────

    fn sync_orbit_focus(&mut self) {
        let phase = self.focus.phase();
        self.orbit.set_focus(phase.target(), phase.is_animating());
    }

    fn body_under(&self, pixel: Vec2) -> Option<BodyHandle> {
        let ray = self.projection.ray(&self.pose, self.projection.ndc(pixel));
        pick_nearest(&ray, self.scene.pick_targets()).map(|(body, _)| body)
    }

    fn update_hover(&mut self, pixel: Vec2) {
        self.hover = self.body_under(pixel).and_then(|body| {
            let record = self.registry.get(body)?;
            Some(HoverReadout {
                body,
                body_id: record.id.clone(),
                distance_from_star: self.scene.distance_from_star(body)?,
            })
        });
    }

    fn click(&mut self, pixel: Vec2, now_ms: f64) {
        match self.body_under(pixel) {
            Some(body) => self.pick_body(body, now_ms),
            None => log::debug!("click at ({:.0}, {:.0}) hit nothing", pixel.x, pixel.y),
        }
    }

    fn pick_body(&mut self, body: BodyHandle, now_ms: f64) {
        let (Some(position), Some(record)) = (self.scene.position(body), self.registry.get(body)) else {
            return;
        };
        let target = FocusTarget {
            body,
            position,
            is_star: record.is_star(),
        };
        // While free, the orbit state may have moved since the last commit.
        let current = if self.focus.phase() == FocusPhase::Free {
            free_orbit_pose(&self.orbit, self.scene.star_position())
        } else {
            self.pose
        };
        if let PickResponse::Started(_) = self.focus.pick(target, current, now_ms) {
            // A new target supersedes whatever was settled.
            self.focused = None;
        }
        self.sync_orbit_focus();
    }

    fn dispatch(&mut self, signal: FocusSignal) {
        match signal {
            FocusSignal::Entered(body) => {
                let Some(record) = self.registry.get(body) else { return };
                let distance = self.scene.distance_from_star(body).unwrap_or(0.0);
                let details = FocusDetails::new(record, distance);
                for listener in self.listeners.iter_mut() {
                    listener(Some(&details));
                }
                self.focused = Some(details);
            }
            FocusSignal::Exited => {
                self.focused = None;
                for listener in self.listeners.iter_mut() {
                    listener(None);
                }
            }
        }
    }

    fn draw(&mut self, now_ms: f64) {
        self.instances.fill(self.scene.nodes());
        let lights = self.scene.lights();
        let starfield = self.scene.starfield();
        let frame = FrameData {
            camera: self.projection.uniform(&self.pose),
            pose: self.pose,
            bodies: self.instances.as_slice(),
            lights: lights.as_slice(),
            ambient: lights.ambient(),
            stars: starfield.points(),
            star_rotation: starfield.model_matrix().to_cols_array_2d(),
            time_ms: now_ms,
        };
        self.renderer.draw(&frame);
    }
}
