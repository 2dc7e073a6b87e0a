//! Shader sources and program compilation.
//!
//! Shader text is not compiled into the renderer. The host supplies it
//! through [`ShaderSource`], keyed by a logical name:
//! - WASM: `<script id="vertex-shader-2d">` elements in the page
//! - tests and headless hosts: [`BuiltinShaders`] or a map

use crate::gl::{GraphicsContext, ShaderKind};
use std::collections::HashMap;

// ─── Source provider ─────────────────────────────────────────────────────

/// Trait for looking up shader text by logical key.
pub trait ShaderSource {
    /// Source text for `key`, or `None` if the host has no such shader.
    fn source(&self, key: &str) -> Option<String>;
}

impl ShaderSource for HashMap<String, String> {
    fn source(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

/// The stock GLSL ES 1.0 shaders, under the default keys.
///
/// Positions are in surface pixels with y pointing down; the vertex shader
/// maps them to clip space through `u_resolution`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinShaders;

pub const BUILTIN_VERTEX: &str = r#"
attribute vec2 a_position;
attribute vec2 a_texCoord;
uniform vec2 u_resolution;
varying vec2 v_texCoord;

void main() {
    vec2 clipSpace = (a_position / u_resolution) * 2.0 - 1.0;
    gl_Position = vec4(clipSpace * vec2(1, -1), 0, 1);
    v_texCoord = a_texCoord;
}
"#;

pub const BUILTIN_TEXTURE_FRAGMENT: &str = r#"
precision mediump float;
uniform sampler2D u_image;
varying vec2 v_texCoord;

void main() {
    gl_FragColor = texture2D(u_image, v_texCoord);
}
"#;

pub const BUILTIN_FILL_FRAGMENT: &str = r#"
precision mediump float;
uniform vec4 u_color;

void main() {
    gl_FragColor = u_color;
}
"#;

impl ShaderSource for BuiltinShaders {
    fn source(&self, key: &str) -> Option<String> {
        let text = match key {
            glc_core::VERTEX_SHADER_KEY => BUILTIN_VERTEX,
            glc_core::TEXTURE_FRAGMENT_KEY => BUILTIN_TEXTURE_FRAGMENT,
            glc_core::FILL_FRAGMENT_KEY => BUILTIN_FILL_FRAGMENT,
            _ => return None,
        };
        Some(text.to_string())
    }
}

// ─── Compilation ─────────────────────────────────────────────────────────

/// Look up `key` and compile it as a `kind` shader.
///
/// A missing key counts as a compile failure. Diagnostics go to the log;
/// the caller only learns that there is no shader.
pub fn compile_shader<C: GraphicsContext>(
    gl: &mut C,
    sources: &dyn ShaderSource,
    kind: ShaderKind,
    key: &str,
) -> Option<C::Shader> {
    let Some(source) = sources.source(key) else {
        log::error!("shader source {key:?} not found");
        return None;
    };

    match gl.compile_shader(kind, &source) {
        Ok(shader) => Some(shader),
        Err(info_log) => {
            log::error!("failed to compile {kind:?} shader {key:?}: {info_log}");
            None
        }
    }
}

/// Link `vertex` and `fragment` into a program, logging the info log on
/// failure.
pub fn link_program<C: GraphicsContext>(
    gl: &mut C,
    vertex: &C::Shader,
    fragment: &C::Shader,
    label: &str,
) -> Option<C::Program> {
    match gl.link_program(vertex, fragment) {
        Ok(program) => Some(program),
        Err(info_log) => {
            log::error!("failed to link {label} program: {info_log}");
            None
        }
    }
}
