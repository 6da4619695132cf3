use js_sys::Function;
use wasm_bindgen::JsValue;

use orrery_engine::{
    BodyInstance, CameraUniform, FrameData, PointLight, Renderer, StarPoint, TextureLoader,
    TextureRequest,
};

/// Renderer that copies each committed frame into flat buffers.
///
/// The JS side reads them straight out of WASM linear memory through the
/// pointer/length accessors and does the actual WebGL work. Nothing here
/// touches a graphics API.
pub struct BufferRenderer {
    camera: CameraUniform,
    bodies: Vec<BodyInstance>,
    lights: Vec<PointLight>,
    ambient: [f32; 3],
    /// Background points never move in their local frame; copied once.
    stars: Vec<StarPoint>,
    star_rotation: [f32; 16],
    viewport: (u32, u32),
    frames: u64,
    released: bool,
}

impl BufferRenderer {
    pub fn new() -> Self {
        Self {
            camera: CameraUniform {
                view: [[0.0; 4]; 4],
                projection: [[0.0; 4]; 4],
                eye: [0.0; 4],
            },
            bodies: Vec::new(),
            lights: Vec::new(),
            ambient: [0.0; 3],
            stars: Vec::new(),
            star_rotation: [0.0; 16],
            viewport: (1, 1),
            frames: 0,
            released: false,
        }
    }

    // ---- Pointer accessors for linear-memory reads ----

    pub fn camera_ptr(&self) -> *const f32 {
        &self.camera as *const CameraUniform as *const f32
    }

    pub fn camera_floats(&self) -> u32 {
        CameraUniform::FLOATS as u32
    }

    pub fn instances_ptr(&self) -> *const f32 {
        self.bodies.as_ptr() as *const f32
    }

    pub fn instance_count(&self) -> u32 {
        self.bodies.len() as u32
    }

    pub fn instance_floats(&self) -> u32 {
        BodyInstance::FLOATS as u32
    }

    pub fn lights_ptr(&self) -> *const f32 {
        self.lights.as_ptr() as *const f32
    }

    pub fn light_count(&self) -> u32 {
        self.lights.len() as u32
    }

    pub fn ambient(&self) -> [f32; 3] {
        self.ambient
    }

    pub fn stars_ptr(&self) -> *const f32 {
        self.stars.as_ptr() as *const f32
    }

    pub fn star_count(&self) -> u32 {
        self.stars.len() as u32
    }

    pub fn star_rotation_ptr(&self) -> *const f32 {
        self.star_rotation.as_ptr()
    }

    pub fn viewport(&self) -> (u32, u32) {
        self.viewport
    }

    /// Frames drawn so far. The host uploads only when this changes.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn is_released(&self) -> bool {
        self.released
    }

    pub fn bodies(&self) -> &[BodyInstance] {
        &self.bodies
    }
}

impl Default for BufferRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for BufferRenderer {
    fn backend(&self) -> &'static str {
        "buffer"
    }

    fn draw(&mut self, frame: &FrameData) {
        self.camera = frame.camera;
        self.bodies.clear();
        self.bodies.extend_from_slice(frame.bodies);
        self.lights.clear();
        self.lights.extend_from_slice(frame.lights);
        self.ambient = frame.ambient;
        if self.stars.len() != frame.stars.len() {
            self.stars.clear();
            self.stars.extend_from_slice(frame.stars);
        }
        for (col, values) in frame.star_rotation.iter().enumerate() {
            self.star_rotation[col * 4..col * 4 + 4].copy_from_slice(values);
        }
        self.frames += 1;
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.viewport = (width, height);
    }

    fn release(&mut self) {
        self.bodies = Vec::new();
        self.lights = Vec::new();
        self.stars = Vec::new();
        self.released = true;
    }
}

/// Forwards texture requests to a JS callback
/// `(generation: number, body: number, url: string) => void`.
///
/// The host loads the image, uploads it and reports back through
/// `WebOrrery::texture_loaded` with the same generation and body.
pub struct JsTextureLoader {
    callback: Function,
}

impl JsTextureLoader {
    pub fn new(callback: Function) -> Self {
        Self { callback }
    }
}

impl TextureLoader for JsTextureLoader {
    fn request(&mut self, request: TextureRequest) {
        let result = self.callback.call3(
            &JsValue::NULL,
            &JsValue::from(request.ticket.generation),
            &JsValue::from(request.ticket.body.0),
            &JsValue::from_str(&request.url),
        );
        if let Err(err) = result {
            log::warn!("texture request for `{}` threw: {:?}", request.body_id, err);
        }
    }
}
