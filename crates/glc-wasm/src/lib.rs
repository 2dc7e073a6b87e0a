//! WASM bridge for GLC: exposes the WebGL canvas to JavaScript.
//!
//! Compiled via `wasm-pack build --target web`. Typical frame:
//!
//! ```js
//! const canvas = new WebCanvas(document.querySelector("#c"), null);
//! if (canvas.success()) {
//!   canvas.draw_rect(10, 10, 100, 50, "#FF0080");
//!   canvas.draw_circle(200, 200, 40, 32, 0, 0, null);
//!   canvas.display();
//! }
//! ```

pub mod dom;
pub mod logging;
pub mod webgl;

use dom::DocumentShaders;
use glc_core::{Circle, Color, DrawList, ImageId, Point, Rectangle, RenderConfig, TextureInfo};
use glc_render::{BuiltinShaders, Canvas, ShaderSource, Surface};
use wasm_bindgen::prelude::*;
use web_sys::{HtmlCanvasElement, HtmlImageElement};
use webgl::{CanvasSurface, ImageRegistry, WebGlContext};

/// The JS-facing canvas.
///
/// Wraps a [`Canvas`] over WebGL plus the registry of images that textured
/// shapes refer to by id.
#[wasm_bindgen]
pub struct WebCanvas {
    canvas: Canvas<WebGlContext>,
    surface: Option<CanvasSurface>,
    images: ImageRegistry,
}

#[wasm_bindgen]
impl WebCanvas {
    /// Bootstrap on `canvas`, reading shaders from `<script>` elements keyed
    /// by the configured ids. `config_json` may be `null` for defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(canvas: Option<HtmlCanvasElement>, config_json: Option<String>) -> Self {
        Self::bootstrap(canvas, config_json.as_deref(), &DocumentShaders::from_window())
    }

    /// Like the constructor, but with the built-in shaders instead of
    /// shaders from the page.
    pub fn with_builtin_shaders(
        canvas: Option<HtmlCanvasElement>,
        config_json: Option<String>,
    ) -> Self {
        Self::bootstrap(canvas, config_json.as_deref(), &BuiltinShaders)
    }

    /// Whether bootstrap succeeded. A failed canvas ignores every call.
    pub fn success(&self) -> bool {
        self.canvas.success()
    }

    /// Register a decoded image; textured draws refer to it by the returned id.
    pub fn register_image(&mut self, image: HtmlImageElement) -> u32 {
        self.images.register(image).0
    }

    /// Forget an image. Returns `false` if the id was unknown.
    pub fn unregister_image(&mut self, id: u32) -> bool {
        self.images.unregister(ImageId(id))
    }

    /// Queue a rectangle filled with a hex color (`#RGB`, `#RRGGBB`, ...).
    pub fn draw_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: &str) {
        match Color::from_hex(color) {
            Some(color) => self
                .canvas
                .draw(Rectangle::new(x, y, width, height).filled(color)),
            None => log::warn!("draw_rect: invalid color {color:?}; rectangle dropped"),
        }
    }

    /// Queue a textured rectangle. It is drawn at the texture's size.
    #[allow(clippy::too_many_arguments)]
    pub fn draw_textured_rect(
        &mut self,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        image: u32,
        texture_width: u32,
        texture_height: u32,
    ) {
        let texture = TextureInfo::new(ImageId(image), texture_width, texture_height);
        self.canvas
            .draw(Rectangle::new(x, y, width, height).textured(texture));
    }

    /// Queue a flat circle. `color` is only used with the `shape_color`
    /// circle fill setting.
    #[allow(clippy::too_many_arguments)]
    pub fn draw_circle(
        &mut self,
        x: f64,
        y: f64,
        radius: f64,
        vertex_count: u32,
        origin_x: f64,
        origin_y: f64,
        color: Option<String>,
    ) {
        let mut circle =
            Circle::new(x, y, radius, vertex_count).with_relative_origin(origin_x, origin_y);
        if let Some(hex) = color.as_deref() {
            match Color::from_hex(hex) {
                Some(color) => circle = circle.filled(color),
                None => log::warn!("draw_circle: invalid color {hex:?}; drawing unstyled"),
            }
        }
        self.canvas.draw_circle(circle);
    }

    /// Queue a circle with a texture clipped to its disc.
    #[allow(clippy::too_many_arguments)]
    pub fn draw_textured_circle(
        &mut self,
        x: f64,
        y: f64,
        radius: f64,
        vertex_count: u32,
        origin_x: f64,
        origin_y: f64,
        image: u32,
        texture_width: u32,
        texture_height: u32,
    ) {
        let texture = TextureInfo::new(ImageId(image), texture_width, texture_height);
        let circle = Circle::new(x, y, radius, vertex_count)
            .with_relative_origin(origin_x, origin_y)
            .textured(texture);
        self.canvas.draw_circle(circle);
    }

    /// Draw a texture immediately, skipping the draw list.
    pub fn draw_texture(&mut self, image: u32, texture_width: u32, texture_height: u32, x: f64, y: f64) {
        let texture = TextureInfo::new(ImageId(image), texture_width, texture_height);
        self.canvas.draw_texture(&texture, Point::new(x, y));
    }

    /// Queue a whole frame given as a JSON draw list
    /// (`{"rectangles":[...],"circles":[...]}`). Returns `false` and queues
    /// nothing if the JSON is malformed.
    pub fn draw_json(&mut self, json: &str) -> bool {
        match parse_draw_list(json) {
            Ok(list) => {
                self.canvas.draw_all(list);
                true
            }
            Err(e) => {
                log::warn!("draw_json: {e}");
                false
            }
        }
    }

    /// Flush the frame. Returns the number of draw calls issued.
    pub fn display(&mut self) -> u32 {
        self.canvas.display().draw_calls as u32
    }

    /// Match the canvas to its displayed size and update the viewport.
    pub fn resize(&mut self) {
        let Some(surface) = &self.surface else {
            return;
        };
        surface.fit_to_display();
        let (width, height) = surface.size();
        self.canvas.resize(width, height);
    }

    /// Delete every texture kept alive between frames.
    pub fn release_textures(&mut self) {
        self.canvas.release_textures();
    }

    /// Number of textures kept alive between frames.
    pub fn resident_textures(&self) -> u32 {
        self.canvas.resident_textures() as u32
    }
}

impl WebCanvas {
    fn bootstrap(
        canvas: Option<HtmlCanvasElement>,
        config_json: Option<&str>,
        sources: &dyn ShaderSource,
    ) -> Self {
        logging::init_logging(log::LevelFilter::Info);

        let config = match config_json.map(parse_config) {
            None => RenderConfig::default(),
            Some(Ok(config)) => config,
            Some(Err(e)) => {
                log::error!("invalid canvas config, using defaults: {e}");
                RenderConfig::default()
            }
        };

        let images = ImageRegistry::default();
        let surface = canvas.map(|c| CanvasSurface::new(c, images.clone()));
        let canvas = Canvas::new(surface.as_ref(), sources, config);

        Self {
            canvas,
            surface,
            images,
        }
    }
}

// ─── Standalone functions (no canvas needed) ─────────────────────────────

/// Set the console log level (`"off"`, `"error"`, `"warn"`, `"info"`,
/// `"debug"`, `"trace"`). Returns `false` for an unknown level.
#[wasm_bindgen]
pub fn set_log_level(level: &str) -> bool {
    match logging::parse_level(level) {
        Ok(level) => {
            logging::init_logging(level);
            true
        }
        Err(_) => false,
    }
}

/// Validate a canvas config document.
/// Returns JSON: `{"ok":true}` or `{"ok":false,"error":"..."}`.
#[wasm_bindgen]
pub fn validate_config(json: &str) -> String {
    validation_report(parse_config(json).map(drop))
}

/// Validate a draw list document, same report shape as `validate_config`.
#[wasm_bindgen]
pub fn validate_draw_list(json: &str) -> String {
    validation_report(parse_draw_list(json).map(drop))
}

fn validation_report(result: Result<(), String>) -> String {
    match result {
        Ok(()) => serde_json::json!({ "ok": true }).to_string(),
        Err(e) => serde_json::json!({ "ok": false, "error": e }).to_string(),
    }
}

/// Parse a [`RenderConfig`] from JSON. Missing fields take their defaults.
pub fn parse_config(json: &str) -> Result<RenderConfig, String> {
    serde_json::from_str(json).map_err(|e| format!("config: {e}"))
}

/// Parse a [`DrawList`] from JSON.
pub fn parse_draw_list(json: &str) -> Result<DrawList, String> {
    serde_json::from_str(json).map_err(|e| format!("draw list: {e}"))
}
