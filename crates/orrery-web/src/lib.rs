pub mod runner;

pub use runner::{BufferRenderer, JsTextureLoader};

use js_sys::Function;
use wasm_bindgen::prelude::*;
use web_sys::{Element, Storage};

use orrery_engine::{
    solar_system, BodyHandle, DisplaySettings, InputEvent, OrreryError, Renderer, SceneConfig,
    SceneController, TextureId, TextureLoader, TextureTicket, SETTINGS_STORAGE_KEY,
};

type Controller = SceneController<BufferRenderer, JsTextureLoader>;

fn to_js(err: OrreryError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn local_storage() -> Option<Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

fn load_settings(storage: Option<&Storage>) -> DisplaySettings {
    storage
        .and_then(|s| s.get_item(SETTINGS_STORAGE_KEY).ok().flatten())
        .map(|json| DisplaySettings::from_json(&json))
        .unwrap_or_default()
}

/// Settings worth saving after a frame-rate change, or `None` once the
/// controller is disposed and the change was ignored.
fn settings_to_persist<R: Renderer, T: TextureLoader>(
    controller: &SceneController<R, T>,
) -> Option<DisplaySettings> {
    controller.is_live().then(|| DisplaySettings {
        frames: controller.frame_rate(),
    })
}

/// Browser handle for one orbit scene.
///
/// ```ignore
/// const orrery = new WebOrrery(container, "", (generation, body, url) => {
///   loadImage(url).then(
///     (id) => orrery.texture_loaded(generation, body, true, id, ""),
///     (err) => orrery.texture_loaded(generation, body, false, 0, String(err)),
///   );
/// });
/// orrery.on_focus_changed((json) => showPanel(json && JSON.parse(json)));
/// const loop = (now) => { if (orrery.frame(now)) requestAnimationFrame(loop); };
/// requestAnimationFrame(loop);
/// ```
#[wasm_bindgen]
pub struct WebOrrery {
    controller: Controller,
    container: Element,
    storage: Option<Storage>,
}

#[wasm_bindgen]
impl WebOrrery {
    /// `scene_json` is a serialized scene config; an empty string selects
    /// the built-in solar system.
    #[wasm_bindgen(constructor)]
    pub fn new(
        container: Element,
        scene_json: &str,
        request_texture: Function,
    ) -> Result<WebOrrery, JsValue> {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        let config = if scene_json.trim().is_empty() {
            solar_system()
        } else {
            SceneConfig::from_json(scene_json).map_err(to_js)?
        };
        let storage = local_storage();
        let settings = load_settings(storage.as_ref());
        let config = SceneConfig {
            options: config.options.with_frame_rate(settings.frames),
            ..config
        };

        let controller = SceneController::from_config(
            config,
            BufferRenderer::new(),
            JsTextureLoader::new(request_texture),
        )
        .map_err(to_js)?;

        let mut orrery = WebOrrery {
            controller,
            container,
            storage,
        };
        orrery.resize();
        Ok(orrery)
    }

    /// Animation callback. Returns false once disposed.
    pub fn frame(&mut self, now: f64) -> bool {
        self.controller.frame(now).keep_running()
    }

    /// Number of frames drawn so far; re-upload buffers when it changes.
    pub fn frames_drawn(&self) -> f64 {
        self.controller.renderer().frames() as f64
    }

    // ---- Input ----

    pub fn pointer_down(&mut self, x: f32, y: f32, now: f64) {
        self.controller.handle_input(InputEvent::PointerDown { x, y }, now);
    }

    pub fn pointer_move(&mut self, x: f32, y: f32, now: f64) {
        self.controller.handle_input(InputEvent::PointerMove { x, y }, now);
    }

    pub fn pointer_up(&mut self, x: f32, y: f32, now: f64) {
        self.controller.handle_input(InputEvent::PointerUp { x, y }, now);
    }

    pub fn wheel(&mut self, delta_y: f32, now: f64) {
        self.controller.handle_input(InputEvent::Wheel { delta_y }, now);
    }

    /// Re-read the container size.
    pub fn resize(&mut self) {
        let width = self.container.client_width().max(1) as u32;
        let height = self.container.client_height().max(1) as u32;
        self.controller.resize(width, height);
    }

    // ---- Controls ----

    /// Apply and persist a new frame rate. Returns the rate applied.
    /// Nothing is stored after `dispose`.
    pub fn set_frame_rate(&mut self, fps: u32) -> u32 {
        let applied = self.controller.set_frame_rate(fps);
        let settings = settings_to_persist(&self.controller);
        if let (Some(storage), Some(settings)) = (&self.storage, settings) {
            if let Err(err) = storage.set_item(SETTINGS_STORAGE_KEY, &settings.to_json()) {
                log::warn!("could not persist display settings: {:?}", err);
            }
        }
        applied
    }

    pub fn frame_rate(&self) -> u32 {
        self.controller.frame_rate()
    }

    pub fn request_close(&mut self, now: f64) -> bool {
        self.controller.request_close(now)
    }

    pub fn focus_body(&mut self, id: &str, now: f64) -> Result<(), JsValue> {
        self.controller.focus_body(id, now).map_err(to_js)
    }

    /// `listener` is called with the focused body as a JSON string, or
    /// with `null` once focus is released.
    pub fn on_focus_changed(&mut self, listener: Function) {
        self.controller.on_focus_changed(move |details| {
            let arg = details.map_or(JsValue::NULL, |d| JsValue::from_str(&d.to_json()));
            if let Err(err) = listener.call1(&JsValue::NULL, &arg) {
                log::warn!("focus listener threw: {:?}", err);
            }
        });
    }

    /// Report a texture request's outcome. Returns true if it was applied.
    pub fn texture_loaded(
        &mut self,
        generation: u32,
        body: u32,
        ok: bool,
        texture_id: u32,
        reason: String,
    ) -> bool {
        let ticket = TextureTicket {
            generation,
            body: BodyHandle(body),
        };
        let result = if ok { Ok(TextureId(texture_id)) } else { Err(reason) };
        self.controller.texture_loaded(ticket, result)
    }

    pub fn dispose(&mut self) {
        self.controller.dispose();
    }

    // ---- Hover readout ----

    pub fn hover_body_id(&self) -> Option<String> {
        self.controller.hover().map(|h| h.body_id.clone())
    }

    pub fn hover_distance(&self) -> Option<f32> {
        self.controller.hover().map(|h| h.distance_from_star)
    }

    /// Details of the settled focus as JSON, if any.
    pub fn focused_json(&self) -> Option<String> {
        self.controller.focused().map(|d| d.to_json())
    }

    // ---- Data accessors ----

    pub fn camera_ptr(&self) -> *const f32 {
        self.controller.renderer().camera_ptr()
    }

    pub fn camera_floats(&self) -> u32 {
        self.controller.renderer().camera_floats()
    }

    pub fn instances_ptr(&self) -> *const f32 {
        self.controller.renderer().instances_ptr()
    }

    pub fn instance_count(&self) -> u32 {
        self.controller.renderer().instance_count()
    }

    pub fn instance_floats(&self) -> u32 {
        self.controller.renderer().instance_floats()
    }

    pub fn lights_ptr(&self) -> *const f32 {
        self.controller.renderer().lights_ptr()
    }

    pub fn light_count(&self) -> u32 {
        self.controller.renderer().light_count()
    }

    pub fn ambient_r(&self) -> f32 {
        self.controller.renderer().ambient()[0]
    }

    pub fn ambient_g(&self) -> f32 {
        self.controller.renderer().ambient()[1]
    }

    pub fn ambient_b(&self) -> f32 {
        self.controller.renderer().ambient()[2]
    }

    pub fn stars_ptr(&self) -> *const f32 {
        self.controller.renderer().stars_ptr()
    }

    pub fn star_count(&self) -> u32 {
        self.controller.renderer().star_count()
    }

    pub fn star_rotation_ptr(&self) -> *const f32 {
        self.controller.renderer().star_rotation_ptr()
    }
}
