//! WebGL 1 backend over `web_sys::WebGlRenderingContext`.

use glc_core::{Color, ImageId, TextureInfo};
use glc_render::{GraphicsContext, ShaderKind, Surface, TextureFilter, TextureParams, TextureWrap};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys::{
    HtmlCanvasElement, HtmlImageElement, WebGlBuffer, WebGlProgram, WebGlRenderingContext as GL,
    WebGlShader, WebGlTexture, WebGlUniformLocation,
};

// ─── Image registry ──────────────────────────────────────────────────────

/// Decoded `<img>` elements, addressed by the ids shapes carry.
///
/// Shared between the JS-facing canvas (which registers images) and the
/// context (which uploads them).
#[derive(Clone, Default)]
pub struct ImageRegistry {
    inner: Rc<RefCell<Images>>,
}

#[derive(Default)]
struct Images {
    next: u32,
    elements: HashMap<ImageId, HtmlImageElement>,
}

impl ImageRegistry {
    /// Register `image` under a fresh id.
    pub fn register(&self, image: HtmlImageElement) -> ImageId {
        let mut images = self.inner.borrow_mut();
        let id = ImageId(images.next);
        images.next += 1;
        images.elements.insert(id, image);
        id
    }

    /// Forget `id`. Returns `false` if it was never registered.
    pub fn unregister(&self, id: ImageId) -> bool {
        self.inner.borrow_mut().elements.remove(&id).is_some()
    }

    fn get(&self, id: ImageId) -> Option<HtmlImageElement> {
        self.inner.borrow().elements.get(&id).cloned()
    }
}

// ─── Context ─────────────────────────────────────────────────────────────

pub struct WebGlContext {
    gl: GL,
    images: ImageRegistry,
}

fn wrap_mode(wrap: TextureWrap) -> i32 {
    match wrap {
        TextureWrap::ClampToEdge => GL::CLAMP_TO_EDGE as i32,
        TextureWrap::Repeat => GL::REPEAT as i32,
    }
}

fn filter_mode(filter: TextureFilter) -> i32 {
    match filter {
        TextureFilter::Nearest => GL::NEAREST as i32,
        TextureFilter::Linear => GL::LINEAR as i32,
    }
}

impl GraphicsContext for WebGlContext {
    type Shader = WebGlShader;
    type Program = WebGlProgram;
    type Buffer = WebGlBuffer;
    type Texture = WebGlTexture;
    type UniformLocation = WebGlUniformLocation;

    fn compile_shader(&mut self, kind: ShaderKind, source: &str) -> Result<WebGlShader, String> {
        let stage = match kind {
            ShaderKind::Vertex => GL::VERTEX_SHADER,
            ShaderKind::Fragment => GL::FRAGMENT_SHADER,
        };
        let shader = self
            .gl
            .create_shader(stage)
            .ok_or("could not create shader")?;
        self.gl.shader_source(&shader, source);
        self.gl.compile_shader(&shader);

        let compiled = self
            .gl
            .get_shader_parameter(&shader, GL::COMPILE_STATUS)
            .as_bool()
            .unwrap_or(false);
        if compiled {
            return Ok(shader);
        }
        let info_log = self.gl.get_shader_info_log(&shader).unwrap_or_default();
        self.gl.delete_shader(Some(&shader));
        Err(info_log)
    }

    fn link_program(
        &mut self,
        vertex: &WebGlShader,
        fragment: &WebGlShader,
    ) -> Result<WebGlProgram, String> {
        let program = self
            .gl
            .create_program()
            .ok_or("could not create program")?;
        self.gl.attach_shader(&program, vertex);
        self.gl.attach_shader(&program, fragment);
        self.gl.link_program(&program);

        let linked = self
            .gl
            .get_program_parameter(&program, GL::LINK_STATUS)
            .as_bool()
            .unwrap_or(false);
        if linked {
            return Ok(program);
        }
        let info_log = self.gl.get_program_info_log(&program).unwrap_or_default();
        self.gl.delete_program(Some(&program));
        Err(info_log)
    }

    fn attrib_location(&mut self, program: &WebGlProgram, name: &str) -> Option<u32> {
        // -1 means "no such active attribute"
        u32::try_from(self.gl.get_attrib_location(program, name)).ok()
    }

    fn uniform_location(&mut self, program: &WebGlProgram, name: &str) -> Option<WebGlUniformLocation> {
        self.gl.get_uniform_location(program, name)
    }

    fn create_buffer(&mut self) -> Option<WebGlBuffer> {
        self.gl.create_buffer()
    }

    fn viewport(&mut self, width: u32, height: u32) {
        self.gl.viewport(0, 0, width as i32, height as i32);
    }

    fn clear(&mut self, color: Color) {
        self.gl.clear_color(color.r, color.g, color.b, color.a);
        self.gl.clear(GL::COLOR_BUFFER_BIT);
    }

    fn use_program(&mut self, program: &WebGlProgram) {
        self.gl.use_program(Some(program));
    }

    fn upload_vertices(&mut self, buffer: &WebGlBuffer, data: &[f32]) {
        self.gl.bind_buffer(GL::ARRAY_BUFFER, Some(buffer));
        let array = js_sys::Float32Array::from(data);
        self.gl
            .buffer_data_with_array_buffer_view(GL::ARRAY_BUFFER, &array, GL::STATIC_DRAW);
    }

    fn bind_attribute(&mut self, location: u32, buffer: &WebGlBuffer, components: i32) {
        self.gl.bind_buffer(GL::ARRAY_BUFFER, Some(buffer));
        self.gl.enable_vertex_attrib_array(location);
        self.gl
            .vertex_attrib_pointer_with_i32(location, components, GL::FLOAT, false, 0, 0);
    }

    fn disable_attribute(&mut self, location: u32) {
        self.gl.disable_vertex_attrib_array(location);
    }

    fn uniform2f(&mut self, location: &WebGlUniformLocation, x: f32, y: f32) {
        self.gl.uniform2f(Some(location), x, y);
    }

    fn uniform4f(&mut self, location: &WebGlUniformLocation, color: Color) {
        self.gl
            .uniform4f(Some(location), color.r, color.g, color.b, color.a);
    }

    fn create_texture(&mut self) -> Option<WebGlTexture> {
        self.gl.create_texture()
    }

    fn bind_texture(&mut self, texture: &WebGlTexture, params: TextureParams) {
        self.gl.bind_texture(GL::TEXTURE_2D, Some(texture));
        let wrap = wrap_mode(params.wrap);
        let filter = filter_mode(params.filter);
        self.gl
            .tex_parameteri(GL::TEXTURE_2D, GL::TEXTURE_WRAP_S, wrap);
        self.gl
            .tex_parameteri(GL::TEXTURE_2D, GL::TEXTURE_WRAP_T, wrap);
        self.gl
            .tex_parameteri(GL::TEXTURE_2D, GL::TEXTURE_MIN_FILTER, filter);
        self.gl
            .tex_parameteri(GL::TEXTURE_2D, GL::TEXTURE_MAG_FILTER, filter);
    }

    fn upload_image(&mut self, info: &TextureInfo) -> Result<(), String> {
        let image = self
            .images
            .get(info.image)
            .ok_or_else(|| format!("no image registered as {:?}", info.image))?;
        self.gl
            .tex_image_2d_with_u32_and_u32_and_image(
                GL::TEXTURE_2D,
                0,
                GL::RGBA as i32,
                GL::RGBA,
                GL::UNSIGNED_BYTE,
                &image,
            )
            .map_err(|e| format!("texImage2D rejected {:?}: {e:?}", info.image))
    }

    fn delete_texture(&mut self, texture: WebGlTexture) {
        self.gl.delete_texture(Some(&texture));
    }

    fn draw_triangles(&mut self, count: i32) {
        self.gl.draw_arrays(GL::TRIANGLES, 0, count);
    }
}

// ─── Surface ─────────────────────────────────────────────────────────────

/// An `HtmlCanvasElement` to draw into.
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    images: ImageRegistry,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement, images: ImageRegistry) -> Self {
        Self { canvas, images }
    }
}

impl Surface for CanvasSurface {
    type Context = WebGlContext;

    fn acquire_context(&self) -> Option<WebGlContext> {
        let gl = self
            .canvas
            .get_context("webgl")
            .ok()
            .flatten()?
            .dyn_into::<GL>()
            .ok()?;
        Some(WebGlContext {
            gl,
            images: self.images.clone(),
        })
    }

    fn size(&self) -> (u32, u32) {
        (self.canvas.width(), self.canvas.height())
    }

    fn fit_to_display(&self) -> bool {
        // Size the canvas is displayed at, in CSS pixels.
        let display_width = self.canvas.client_width().max(0) as u32;
        let display_height = self.canvas.client_height().max(0) as u32;

        if self.size() == (display_width, display_height) {
            return false;
        }
        self.canvas.set_width(display_width);
        self.canvas.set_height(display_height);
        true
    }
}
