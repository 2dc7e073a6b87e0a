//! Backend-agnostic 2D renderer.
//!
//! Compiles a textured and a flat-color program on a host graphics context,
//! then draws rectangles and circle fans either immediately or through the
//! per-frame draw list of [`Canvas`].

pub mod canvas;
pub mod context;
pub mod gl;
pub mod recording;
pub mod shaders;
mod textures;

pub use canvas::{Canvas, FrameStats};
pub use context::RenderContext;
pub use gl::{GraphicsContext, ShaderKind, Surface, TextureFilter, TextureParams, TextureWrap};
pub use shaders::{BuiltinShaders, ShaderSource};
