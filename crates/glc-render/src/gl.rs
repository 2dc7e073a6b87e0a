//! The host graphics API, as seen by the renderer.
//!
//! The renderer never touches a real GL binding directly. Each host
//! implements [`GraphicsContext`] for its context type and [`Surface`] for
//! whatever it draws into:
//! - WASM: `WebGlRenderingContext` on an `HtmlCanvasElement`
//! - tests: [`crate::recording::RecordingContext`]
//!
//! There is no ambient "currently bound" state in this interface beyond what
//! GL itself requires: callers pass the program, buffer, or texture an
//! operation works on.

use glc_core::{Color, TextureInfo};

/// Shader stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderKind {
    Vertex,
    Fragment,
}

/// Texture wrap mode on both axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureWrap {
    ClampToEdge,
    Repeat,
}

/// Texture min/mag filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureFilter {
    Nearest,
    Linear,
}

/// Sampling parameters applied to every texture the renderer creates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureParams {
    pub wrap: TextureWrap,
    pub filter: TextureFilter,
}

impl TextureParams {
    /// Clamp-to-edge, nearest-neighbor: pixel-exact sprites, no bleeding.
    pub const PIXEL: Self = Self {
        wrap: TextureWrap::ClampToEdge,
        filter: TextureFilter::Nearest,
    };
}

/// A hardware-accelerated drawing context.
///
/// Handle types are opaque and owned by whoever created them. Compile and
/// link report the driver's info log as the error string.
pub trait GraphicsContext {
    type Shader;
    type Program;
    type Buffer;
    type Texture;
    type UniformLocation;

    /// Create and compile a shader. On failure the shader is deleted and the
    /// info log returned.
    fn compile_shader(&mut self, kind: ShaderKind, source: &str) -> Result<Self::Shader, String>;

    /// Create a program from two compiled shaders and link it. On failure
    /// the program is deleted and the info log returned.
    fn link_program(
        &mut self,
        vertex: &Self::Shader,
        fragment: &Self::Shader,
    ) -> Result<Self::Program, String>;

    /// Attribute slot for `name`, or `None` if the program has no such
    /// active attribute.
    fn attrib_location(&mut self, program: &Self::Program, name: &str) -> Option<u32>;

    fn uniform_location(
        &mut self,
        program: &Self::Program,
        name: &str,
    ) -> Option<Self::UniformLocation>;

    fn create_buffer(&mut self) -> Option<Self::Buffer>;

    fn viewport(&mut self, width: u32, height: u32);

    fn clear(&mut self, color: Color);

    fn use_program(&mut self, program: &Self::Program);

    /// Replace the contents of `buffer` with `data` (static draw usage).
    fn upload_vertices(&mut self, buffer: &Self::Buffer, data: &[f32]);

    /// Point attribute `location` at `buffer`: `components` floats per
    /// vertex, not normalized, tightly packed, offset 0. Enables the array.
    fn bind_attribute(&mut self, location: u32, buffer: &Self::Buffer, components: i32);

    /// Disable the array at attribute `location`.
    fn disable_attribute(&mut self, location: u32);

    fn uniform2f(&mut self, location: &Self::UniformLocation, x: f32, y: f32);

    fn uniform4f(&mut self, location: &Self::UniformLocation, color: Color);

    fn create_texture(&mut self) -> Option<Self::Texture>;

    /// Bind `texture` to the 2D texture unit and apply `params`.
    fn bind_texture(&mut self, texture: &Self::Texture, params: TextureParams);

    /// Upload the image behind `info` into the bound texture as RGBA8.
    fn upload_image(&mut self, info: &TextureInfo) -> Result<(), String>;

    fn delete_texture(&mut self, texture: Self::Texture);

    /// Draw `count` vertices as a triangle list, starting at vertex 0.
    fn draw_triangles(&mut self, count: i32);
}

/// Something a [`GraphicsContext`] can be acquired from.
pub trait Surface {
    type Context: GraphicsContext;

    /// Acquire a rendering context, or `None` if the host can't provide one.
    fn acquire_context(&self) -> Option<Self::Context>;

    /// Current backing-store size in pixels.
    fn size(&self) -> (u32, u32);

    /// Match the backing store to the size the surface is displayed at.
    /// Returns `true` if the size changed.
    fn fit_to_display(&self) -> bool {
        false
    }
}
